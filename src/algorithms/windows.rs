//! Sliding-window extraction (im2col) with no padding.
use crate::ciphertexts::{CiphertextError, CiphertextResult};
use ndarray::{Array2, ArrayView2, s};

/// Output shape of a valid (unpadded) convolution.
pub fn output_shape(
    matrix_shape: (usize, usize),
    kernel_shape: (usize, usize),
    stride: usize,
) -> CiphertextResult<(usize, usize)> {
    let (x_h, x_w) = matrix_shape;
    let (k_h, k_w) = kernel_shape;

    if stride == 0 {
        return Err(CiphertextError::invalid_input("stride must be at least 1"));
    }
    if x_h == 0 || x_w == 0 || k_h == 0 || k_w == 0 {
        return Err(CiphertextError::invalid_input(format!(
            "matrix {x_h}x{x_w} and kernel {k_h}x{k_w} must not be empty"
        )));
    }
    if k_h > x_h || k_w > x_w {
        return Err(CiphertextError::invalid_input(format!(
            "kernel {k_h}x{k_w} is larger than matrix {x_h}x{x_w}"
        )));
    }

    Ok(((x_h - k_h) / stride + 1, (x_w - k_w) / stride + 1))
}

/// Flattens every `kernel_shape` window of `matrix` taken at `stride`.
///
/// Row `i` of the result is the window of output position `i` (row-major
/// over the output), read row-major.
pub fn im2col(
    matrix: ArrayView2<f64>,
    kernel_shape: (usize, usize),
    stride: usize,
) -> CiphertextResult<Array2<f64>> {
    let (out_h, out_w) = output_shape(matrix.dim(), kernel_shape, stride)?;
    let (k_h, k_w) = kernel_shape;

    let mut cols = Array2::zeros((out_h * out_w, k_h * k_w));
    for (idx, mut row) in cols.rows_mut().into_iter().enumerate() {
        let i = (idx / out_w) * stride;
        let j = (idx % out_w) * stride;
        let window = matrix.slice(s![i..i + k_h, j..j + k_w]);
        for (dst, &src) in row.iter_mut().zip(window.iter()) {
            *dst = src;
        }
    }
    Ok(cols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_output_shape() {
        assert_eq!(output_shape((4, 4), (3, 3), 1).unwrap(), (2, 2));
        assert_eq!(output_shape((9, 11), (3, 5), 2).unwrap(), (4, 4));
        assert_eq!(output_shape((7, 3), (2, 2), 5).unwrap(), (2, 1));
        assert_eq!(output_shape((2, 2), (2, 2), 3).unwrap(), (1, 1));
    }

    #[test]
    fn test_output_shape_errors() {
        for (matrix, kernel, stride) in [
            ((4, 4), (3, 3), 0),
            ((4, 4), (5, 1), 1),
            ((4, 4), (0, 1), 1),
            ((0, 4), (1, 1), 1),
        ] {
            assert!(matches!(
                output_shape(matrix, kernel, stride),
                Err(CiphertextError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_im2col_stride_one() {
        let x = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let cols = im2col(x.view(), (2, 2), 1).unwrap();
        let expected = array![
            [1.0, 2.0, 4.0, 5.0],
            [2.0, 3.0, 5.0, 6.0],
            [4.0, 5.0, 7.0, 8.0],
            [5.0, 6.0, 8.0, 9.0],
        ];
        assert_eq!(cols, expected);
    }

    #[test]
    fn test_im2col_strided() {
        let x = Array2::from_shape_fn((4, 5), |(i, j)| (i * 5 + j) as f64);
        let cols = im2col(x.view(), (2, 2), 2).unwrap();
        let expected = array![
            [0.0, 1.0, 5.0, 6.0],
            [2.0, 3.0, 7.0, 8.0],
            [10.0, 11.0, 15.0, 16.0],
            [12.0, 13.0, 17.0, 18.0],
        ];
        assert_eq!(cols, expected);
    }
}
