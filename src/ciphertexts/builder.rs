use super::ckks::{CkksCiphertext, CkksParams};
use super::errors::CiphertextResult;
use crate::benchmark::OpCounter;

/// Builder for [`CkksCiphertext`].
///
/// Unset fields fall back to [`CkksParams::default`]; without an explicit
/// counter, operations are reported to [`OpCounter::global`].
#[derive(Debug, Default)]
pub struct CkksBuilder {
    poly_mod_degree: Option<usize>,
    scale: Option<f64>,
    replicated: Option<bool>,
    counter: Option<OpCounter>,
}

impl CkksBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poly_mod_degree(mut self, degree: usize) -> Self {
        self.poly_mod_degree = Some(degree);
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Sets the scale to `2^scale_bits`.
    pub fn scale_bits(mut self, scale_bits: u32) -> Self {
        self.scale = Some(2f64.powi(scale_bits as i32));
        self
    }

    pub fn replicated(mut self, replicated: bool) -> Self {
        self.replicated = Some(replicated);
        self
    }

    pub fn counter(mut self, counter: OpCounter) -> Self {
        self.counter = Some(counter);
        self
    }

    pub fn params(&self) -> CkksParams {
        let defaults = CkksParams::default();
        CkksParams {
            poly_mod_degree: self.poly_mod_degree.unwrap_or(defaults.poly_mod_degree),
            scale: self.scale.unwrap_or(defaults.scale),
            replicated: self.replicated.unwrap_or(defaults.replicated),
        }
    }

    pub fn build(self, data: &[f64]) -> CiphertextResult<CkksCiphertext> {
        let params = self.params();
        let counter = self
            .counter
            .unwrap_or_else(|| OpCounter::global().clone());
        CkksCiphertext::new(data, &params, counter)
    }
}
