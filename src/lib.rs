//! Simulation of homomorphic encryption schemes for prototyping encrypted
//! algorithms.
//!
//! Ciphertexts here carry no cryptography: a [`CkksCiphertext`] is a vector
//! of scaled slots with CKKS's batching semantics (slot capacity, scale
//! compatibility, rescaling after multiplication, cyclic rotation). That is
//! enough to check that an algorithm such as [`ckks_conv2d`] only uses
//! operations a real scheme offers, and to count how many it needs.

pub mod algorithms;
pub mod benchmark;
pub mod ciphertexts;

pub use algorithms::{Conv2dParams, ckks_conv2d, conv2d_plain, im2col, padded_im2col};
pub use benchmark::{CounterScope, OpCounter, reset_counters, scoped_counter};
pub use ciphertexts::{
    Ciphertext, CiphertextError, CiphertextResult, CkksBuilder, CkksCiphertext,
    CkksParams, Operand,
};
