//! 2D convolution over a slot-packed CKKS ciphertext.
//!
//! The windows of the input are laid out offset-major: for kernel offset
//! `o`, slots `o * chunk_size .. (o + 1) * chunk_size` hold that offset's
//! value in every window. One plaintext multiplication applies the kernel to
//! all windows at once, then `log2(chunk_nb)` rotate-and-add steps fold the
//! offsets together, leaving the sum for window `w` in slot `w`.
use super::windows::{im2col, output_shape};
use crate::benchmark::OpCounter;
use crate::ciphertexts::{Ciphertext, CiphertextResult, CkksCiphertext, CkksParams};
use ndarray::{Array2, ArrayView2, s};
use std::iter;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conv2dParams {
    pub stride: usize,
    pub poly_mod_degree: usize,
    pub scale: f64,
}

impl Default for Conv2dParams {
    fn default() -> Self {
        Self {
            stride: 1,
            poly_mod_degree: 4096,
            scale: 1024.0,
        }
    }
}

/// Windows and kernel laid out for the packed convolution.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedConv {
    /// Zero-padded windows, transposed and flattened (offset-major).
    pub windows: Vec<f64>,
    /// Flattened kernel zero-padded to `chunk_nb`.
    pub kernel: Vec<f64>,
    /// Number of windows, i.e. output positions.
    pub chunk_size: usize,
    /// Padded kernel length, a power of two.
    pub chunk_nb: usize,
    pub output_shape: (usize, usize),
}

impl PackedConv {
    /// Each kernel entry repeated once per window, aligned with `windows`.
    pub fn replicated_kernel(&self) -> Vec<f64> {
        self.kernel
            .iter()
            .flat_map(|&k| iter::repeat_n(k, self.chunk_size))
            .collect()
    }
}

pub fn padded_im2col(
    matrix: ArrayView2<f64>,
    kernel: ArrayView2<f64>,
    stride: usize,
) -> CiphertextResult<PackedConv> {
    let output_shape = output_shape(matrix.dim(), kernel.dim(), stride)?;
    let cols = im2col(matrix, kernel.dim(), stride)?;

    let kernel_size = kernel.len();
    let chunk_nb = kernel_size.next_power_of_two();
    let mut padded = Array2::<f64>::zeros((cols.nrows(), chunk_nb));
    padded.slice_mut(s![.., ..kernel_size]).assign(&cols);

    let mut flat_kernel: Vec<f64> = kernel.iter().copied().collect();
    flat_kernel.resize(chunk_nb, 0.0);

    Ok(PackedConv {
        windows: padded.t().iter().copied().collect(),
        kernel: flat_kernel,
        chunk_size: cols.nrows(),
        chunk_nb,
        output_shape,
    })
}

/// Convolves `matrix` with `kernel` (no padding) on a simulated ciphertext.
///
/// Returns the `out_h * out_w` outputs in row-major order. Fails with
/// `CapacityExceeded` when the padded windows don't fit in
/// `poly_mod_degree / 2` slots.
#[instrument(
    skip_all,
    fields(matrix = ?matrix.dim(), kernel = ?kernel.dim(), stride = params.stride)
)]
pub fn ckks_conv2d(
    matrix: ArrayView2<f64>,
    kernel: ArrayView2<f64>,
    params: &Conv2dParams,
    counter: &OpCounter,
) -> CiphertextResult<Vec<f64>> {
    let packed = padded_im2col(matrix, kernel, params.stride)?;
    let ckks_params = CkksParams {
        poly_mod_degree: params.poly_mod_degree,
        scale: params.scale,
        replicated: true,
    };
    debug!(
        chunk_size = packed.chunk_size,
        chunk_nb = packed.chunk_nb,
        slots = ckks_params.slots(),
        "packed windows"
    );

    let mut ct = CkksCiphertext::new(&packed.windows, &ckks_params, counter.clone())?;
    ct.mul_assign(&packed.replicated_kernel())?;

    let mut next_rotation = packed.chunk_nb / 2;
    while next_rotation >= 1 {
        let rotated = ct.rotate((next_rotation * packed.chunk_size) as isize);
        ct.add_assign(&rotated)?;
        next_rotation /= 2;
    }

    let mut result = ct.decrypt();
    result.truncate(packed.chunk_size);
    Ok(result)
}

/// Direct floating point convolution, the reference for [`ckks_conv2d`].
pub fn conv2d_plain(
    matrix: ArrayView2<f64>,
    kernel: ArrayView2<f64>,
    stride: usize,
) -> CiphertextResult<Array2<f64>> {
    let (k_h, k_w) = kernel.dim();
    let shape = output_shape(matrix.dim(), kernel.dim(), stride)?;
    Ok(Array2::from_shape_fn(shape, |(i, j)| {
        let (r, c) = (i * stride, j * stride);
        matrix
            .slice(s![r..r + k_h, c..c + k_w])
            .iter()
            .zip(kernel.iter())
            .map(|(x, k)| x * k)
            .sum()
    }))
}
