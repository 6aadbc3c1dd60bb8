//! Simulated CKKS ciphertext with slot batching.
//!
//! The payload is a plain vector of `poly_mod_degree / 2` fixed-point slots,
//! each holding `value * scale`. Arithmetic is element-wise over the slots,
//! multiplication rescales by `scale` once, and rotation is a cyclic shift.
//! Nothing is encrypted: `decrypt` just removes the scale.
use super::builder::CkksBuilder;
use super::errors::{CiphertextError, CiphertextResult};
use super::traits::{Ciphertext, Operand};
use crate::benchmark::OpCounter;
use std::borrow::Cow;
use std::iter;
use std::ops::Neg;
use tracing::{debug, trace};

pub const DEFAULT_POLY_MOD_DEGREE: usize = 8192;
pub const DEFAULT_SCALE_BITS: u32 = 40;
pub const DEFAULT_SCALE: f64 = (1u64 << DEFAULT_SCALE_BITS) as f64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CkksParams {
    pub poly_mod_degree: usize,
    pub scale: f64,
    /// Tile the input across all slots instead of zero-padding it.
    pub replicated: bool,
}

impl Default for CkksParams {
    fn default() -> Self {
        Self {
            poly_mod_degree: DEFAULT_POLY_MOD_DEGREE,
            scale: DEFAULT_SCALE,
            replicated: false,
        }
    }
}

impl CkksParams {
    pub fn slots(&self) -> usize {
        self.poly_mod_degree / 2
    }

    pub fn validate(&self) -> CiphertextResult<()> {
        if self.poly_mod_degree < 2 || self.poly_mod_degree % 2 != 0 {
            return Err(CiphertextError::invalid_parameter(format!(
                "poly_mod_degree must be a positive even number, got {}",
                self.poly_mod_degree
            )));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(CiphertextError::invalid_parameter(format!(
                "scale must be positive and finite, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CkksCiphertext {
    data: Vec<f64>,
    slots: usize,
    scale: f64,
    counter: OpCounter,
}

impl CkksCiphertext {
    /// Scales `data` and packs it into `params.slots()` slots.
    ///
    /// Operations on the ciphertext and its copies are reported to `counter`.
    pub fn new(
        data: &[f64],
        params: &CkksParams,
        counter: OpCounter,
    ) -> CiphertextResult<Self> {
        params.validate()?;
        check_values(data)?;

        let slots = params.slots();
        if data.len() > slots {
            return Err(CiphertextError::CapacityExceeded {
                got: data.len(),
                max: slots,
            });
        }

        let scale = params.scale;
        let scaled = data.iter().map(move |&v| v * scale);
        let data: Vec<f64> = if params.replicated {
            scaled.cycle().take(slots).collect()
        } else {
            scaled.chain(iter::repeat(0.0)).take(slots).collect()
        };

        debug!(
            slots,
            scale,
            replicated = params.replicated,
            "packed CKKS ciphertext"
        );

        Ok(Self {
            data,
            slots,
            scale,
            counter,
        })
    }

    pub fn builder() -> CkksBuilder {
        CkksBuilder::new()
    }

    pub fn poly_mod_degree(&self) -> usize {
        self.slots * 2
    }

    pub fn counter(&self) -> &OpCounter {
        &self.counter
    }

    /// Scaled slot values, as the arithmetic sees them.
    pub fn raw_data(&self) -> &[f64] {
        &self.data
    }

    fn record(&self, op: &str) {
        self.counter.record(Self::SCHEME, op);
    }

    /// Resolves the second operand into a `slots`-long scaled vector.
    fn coerce<'a>(&self, other: Operand<'a, Self>) -> CiphertextResult<Cow<'a, [f64]>> {
        match other {
            Operand::Ciphertext(ct) => {
                if ct.slots != self.slots {
                    return Err(CiphertextError::SchemeMismatch {
                        expected: self.poly_mod_degree(),
                        actual: ct.poly_mod_degree(),
                    });
                }
                if ct.scale != self.scale {
                    return Err(CiphertextError::ScaleMismatch {
                        expected: self.scale,
                        actual: ct.scale,
                    });
                }
                Ok(Cow::Borrowed(ct.data.as_slice()))
            }
            Operand::Plain(values) => {
                if values.is_empty() {
                    return Err(CiphertextError::UnsupportedOperand {
                        message: "an empty plaintext can't be broadcast over slots"
                            .to_owned(),
                    });
                }
                check_values(values)?;
                if values.len() > self.slots {
                    return Err(CiphertextError::CapacityExceeded {
                        got: values.len(),
                        max: self.slots,
                    });
                }
                let scale = self.scale;
                Ok(Cow::Owned(
                    values
                        .iter()
                        .map(move |&v| v * scale)
                        .cycle()
                        .take(self.slots)
                        .collect(),
                ))
            }
        }
    }
}

fn check_values(values: &[f64]) -> CiphertextResult<()> {
    if values.is_empty() {
        return Err(CiphertextError::invalid_input("data must not be empty"));
    }
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(CiphertextError::invalid_input(format!(
            "data must contain finite numbers, got {} at index {}",
            values[pos], pos
        )));
    }
    Ok(())
}

impl Ciphertext for CkksCiphertext {
    const SCHEME: &'static str = "CKKS";

    fn slots(&self) -> usize {
        self.slots
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn decrypt(&self) -> Vec<f64> {
        self.data.iter().map(|&v| v / self.scale).collect()
    }

    fn add_assign<'a>(
        &mut self,
        other: impl Into<Operand<'a, Self>>,
    ) -> CiphertextResult<&mut Self>
    where
        Self: 'a,
    {
        let other = self.coerce(other.into())?;
        for (d, &o) in self.data.iter_mut().zip(other.iter()) {
            *d += o;
        }
        self.record("add");
        Ok(self)
    }

    fn sub_assign<'a>(
        &mut self,
        other: impl Into<Operand<'a, Self>>,
    ) -> CiphertextResult<&mut Self>
    where
        Self: 'a,
    {
        let other = self.coerce(other.into())?;
        for (d, &o) in self.data.iter_mut().zip(other.iter()) {
            *d -= o;
        }
        self.record("sub");
        Ok(self)
    }

    fn mul_assign<'a>(
        &mut self,
        other: impl Into<Operand<'a, Self>>,
    ) -> CiphertextResult<&mut Self>
    where
        Self: 'a,
    {
        let other = self.coerce(other.into())?;
        let scale = self.scale;
        // product carries scale^2, rescale back down to scale
        for (d, &o) in self.data.iter_mut().zip(other.iter()) {
            *d = *d * o / scale;
        }
        self.record("mul");
        Ok(self)
    }

    fn negate_assign(&mut self) -> &mut Self {
        for d in self.data.iter_mut() {
            *d = -*d;
        }
        self.record("negate");
        self
    }

    fn rotate_assign(&mut self, rotation: isize) -> &mut Self {
        // floor modulo: -1 rotates by slots - 1
        let shift = rotation.rem_euclid(self.slots as isize) as usize;
        trace!(rotation, shift, "rotating slots");
        self.data.rotate_left(shift);
        self.record("rotate");
        self
    }
}

impl<'a> From<&'a CkksCiphertext> for Operand<'a, CkksCiphertext> {
    fn from(ct: &'a CkksCiphertext) -> Self {
        Operand::Ciphertext(ct)
    }
}

impl Neg for &CkksCiphertext {
    type Output = CkksCiphertext;

    fn neg(self) -> CkksCiphertext {
        self.negate()
    }
}

impl Neg for CkksCiphertext {
    type Output = CkksCiphertext;

    fn neg(mut self) -> CkksCiphertext {
        self.negate_assign();
        self
    }
}
