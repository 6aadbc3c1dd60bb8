use super::errors::CiphertextResult;

/// Second operand of a binary ciphertext operation.
///
/// A plain vector shorter than the slot count is broadcast: it is tiled
/// cyclically across all slots before the operation.
#[derive(Debug)]
pub enum Operand<'a, C> {
    Ciphertext(&'a C),
    Plain(&'a [f64]),
}

impl<'a, C> From<&'a [f64]> for Operand<'a, C> {
    fn from(values: &'a [f64]) -> Self {
        Operand::Plain(values)
    }
}

impl<'a, C> From<&'a Vec<f64>> for Operand<'a, C> {
    fn from(values: &'a Vec<f64>) -> Self {
        Operand::Plain(values.as_slice())
    }
}

impl<'a, C, const N: usize> From<&'a [f64; N]> for Operand<'a, C> {
    fn from(values: &'a [f64; N]) -> Self {
        Operand::Plain(values.as_slice())
    }
}

/// Capability set of a simulated ciphertext.
///
/// Schemes implement the in-place operations; the copying forms are
/// provided on top of them and never touch the receiver.
pub trait Ciphertext: Clone {
    /// Name the scheme reports its operations under.
    const SCHEME: &'static str;

    fn slots(&self) -> usize;
    fn scale(&self) -> f64;

    /// Unscaled content of every slot, padding and repeats included.
    fn decrypt(&self) -> Vec<f64>;

    fn copy(&self) -> Self {
        self.clone()
    }

    fn add_assign<'a>(
        &mut self,
        other: impl Into<Operand<'a, Self>>,
    ) -> CiphertextResult<&mut Self>
    where
        Self: 'a;

    fn sub_assign<'a>(
        &mut self,
        other: impl Into<Operand<'a, Self>>,
    ) -> CiphertextResult<&mut Self>
    where
        Self: 'a;

    fn mul_assign<'a>(
        &mut self,
        other: impl Into<Operand<'a, Self>>,
    ) -> CiphertextResult<&mut Self>
    where
        Self: 'a;

    fn negate_assign(&mut self) -> &mut Self;

    /// Cyclic left rotation of the slots. Negative amounts rotate right.
    fn rotate_assign(&mut self, rotation: isize) -> &mut Self;

    fn add<'a>(&self, other: impl Into<Operand<'a, Self>>) -> CiphertextResult<Self>
    where
        Self: 'a,
    {
        let mut new = self.copy();
        new.add_assign(other)?;
        Ok(new)
    }

    fn sub<'a>(&self, other: impl Into<Operand<'a, Self>>) -> CiphertextResult<Self>
    where
        Self: 'a,
    {
        let mut new = self.copy();
        new.sub_assign(other)?;
        Ok(new)
    }

    fn mul<'a>(&self, other: impl Into<Operand<'a, Self>>) -> CiphertextResult<Self>
    where
        Self: 'a,
    {
        let mut new = self.copy();
        new.mul_assign(other)?;
        Ok(new)
    }

    fn negate(&self) -> Self {
        let mut new = self.copy();
        new.negate_assign();
        new
    }

    fn rotate(&self, rotation: isize) -> Self {
        let mut new = self.copy();
        new.rotate_assign(rotation);
        new
    }
}
