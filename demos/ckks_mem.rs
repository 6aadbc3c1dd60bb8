#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use he_sim::{Ciphertext, CkksCiphertext, OpCounter};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _dhat = dhat::Profiler::new_heap();

    println!("Beginning memory profiling for large slot vectors");

    let counter = OpCounter::new();
    let values: Vec<f64> = (0..8000).map(|i| (i as f64) * 0.01).collect();

    println!("Packing 8K values into 16K slots...");
    let mut ct = CkksCiphertext::builder()
        .poly_mod_degree(8192 * 4)
        .scale_bits(40)
        .replicated(true)
        .counter(counter.clone())
        .build(&values)
        .expect("Packing failed");

    println!("Running copying operations...");
    let squared = ct.mul(&ct).expect("Multiplication failed");
    let rotated = squared.rotate(1024);

    println!("Running in-place operations...");
    ct.add_assign(&rotated)
        .expect("Addition failed")
        .rotate_assign(-1)
        .negate_assign();

    let decrypted = ct.decrypt();
    println!("First values: {:?}", &decrypted[..4]);
    print!("{}", counter);
}
