//! Simulated ciphertexts.
//!
//! [`Ciphertext`] is the capability set an algorithm may rely on;
//! [`CkksCiphertext`] is the CKKS slot-batching simulation implementing it.

pub mod builder;
pub mod ckks;
pub mod errors;
pub mod traits;

pub use builder::CkksBuilder;
pub use ckks::{
    CkksCiphertext, CkksParams, DEFAULT_POLY_MOD_DEGREE, DEFAULT_SCALE,
    DEFAULT_SCALE_BITS,
};
pub use errors::{CiphertextError, CiphertextResult};
pub use traits::{Ciphertext, Operand};
