//! Counts the ciphertext operations a slot-packed convolution needs.
//!
//! Run with `RUST_LOG=he_sim=debug` to see packing details.
use he_sim::{Conv2dParams, OpCounter, ckks_conv2d, conv2d_plain};
use ndarray::Array2;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let matrix = Array2::from_shape_fn((8, 8), |(i, j)| ((i * 8 + j) as f64) * 0.1);
    let kernel = Array2::from_shape_fn((3, 3), |(i, j)| if i == j { 1.0 } else { -0.5 });
    let counter = OpCounter::new();

    for stride in 1..=3 {
        let params = Conv2dParams {
            stride,
            ..Conv2dParams::default()
        };
        println!("--- 8x8 * 3x3, stride {} ---", stride);

        let result = {
            // the report is printed when the scope ends
            let _scope = counter.scope();
            ckks_conv2d(matrix.view(), kernel.view(), &params, &counter)
                .expect("Convolution failed")
        };
        let expected =
            conv2d_plain(matrix.view(), kernel.view(), stride).expect("Invalid shapes");

        let max_error = result
            .iter()
            .zip(expected.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        println!("outputs: {}, max error: {:e}", result.len(), max_error);
    }
}
