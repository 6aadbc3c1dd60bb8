//! Algorithms written against the simulated ciphertext primitives.

pub mod conv2d;
pub mod windows;

pub use conv2d::{Conv2dParams, PackedConv, ckks_conv2d, conv2d_plain, padded_im2col};
pub use windows::{im2col, output_shape};
