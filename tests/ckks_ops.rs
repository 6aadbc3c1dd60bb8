use he_sim::{Ciphertext, CiphertextError, CkksCiphertext, CkksParams, OpCounter};

fn encrypt(data: &[f64], poly_mod_degree: usize, scale: f64, replicated: bool) -> CkksCiphertext {
    let params = CkksParams {
        poly_mod_degree,
        scale,
        replicated,
    };
    CkksCiphertext::new(data, &params, OpCounter::new()).unwrap()
}

#[test]
fn test_encryption_decryption() {
    let inputs: [&[f64]; 3] = [&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0, 0.0], &[-1.0, 5.0, 93.5]];
    for data in inputs {
        for poly_mod_degree in [2048, 4096, 8192] {
            for scale in [2f64.powi(20), 2f64.powi(40)] {
                for replicated in [true, false] {
                    let ct = encrypt(data, poly_mod_degree, scale, replicated);
                    let slots = poly_mod_degree / 2;

                    let expected: Vec<f64> = if replicated {
                        data.iter().copied().cycle().take(slots).collect()
                    } else {
                        let mut padded = data.to_vec();
                        padded.resize(slots, 0.0);
                        padded
                    };
                    assert_eq!(ct.decrypt(), expected);
                }
            }
        }
    }
}

#[test]
fn test_copy_is_independent() {
    let ct = encrypt(&[1.0, 2.0, 3.0], 16, 1024.0, true);
    let mut copy = ct.copy();
    assert_eq!(copy.decrypt(), ct.decrypt());
    assert_eq!(copy.slots(), ct.slots());
    assert_eq!(copy.scale(), ct.scale());

    copy.add_assign(&[1.0]).unwrap().rotate_assign(2).negate_assign();
    assert_eq!(ct.decrypt()[..3], [1.0, 2.0, 3.0]);
    assert_ne!(copy.decrypt(), ct.decrypt());
}

#[test]
fn test_copying_ops_leave_receiver_untouched() {
    let ct = encrypt(&[1.0, -2.0, 3.0], 32, 2f64.powi(20), true);
    let other = encrypt(&[0.5, 4.0], 32, 2f64.powi(20), true);
    let before = ct.decrypt();

    let _ = ct.add(&other).unwrap();
    let _ = ct.sub(&[1.0, 1.0]).unwrap();
    let _ = ct.mul(&other).unwrap();
    let _ = ct.negate();
    let _ = ct.rotate(5);
    assert_eq!(ct.decrypt(), before);

    let mut mutated = ct.copy();
    mutated.mul_assign(&other).unwrap();
    assert_ne!(mutated.decrypt(), before);
}

#[test]
fn test_ciphertext_arithmetic() {
    let a = encrypt(&[1.0, 2.0, 3.0, 4.0], 8, 1024.0, false);
    let b = encrypt(&[0.5, -1.0, 2.0, 0.0], 8, 1024.0, false);

    assert_eq!(a.add(&b).unwrap().decrypt(), vec![1.5, 1.0, 5.0, 4.0]);
    assert_eq!(a.sub(&b).unwrap().decrypt(), vec![0.5, 3.0, 1.0, 4.0]);
    assert_eq!(a.mul(&b).unwrap().decrypt(), vec![0.5, -2.0, 6.0, 0.0]);
    assert_eq!(a.negate().decrypt(), vec![-1.0, -2.0, -3.0, -4.0]);
}

#[test]
fn test_sub_is_antisymmetric() {
    let c = encrypt(&[1.0, 2.0, 3.0], 16, 1024.0, true);
    let o = encrypt(&[7.0, -1.0], 16, 1024.0, true);

    let c_minus_o = c.sub(&o).unwrap().decrypt();
    let o_minus_c = o.sub(&c).unwrap().decrypt();
    for (x, y) in c_minus_o.iter().zip(&o_minus_c) {
        assert_eq!(*x, -*y);
    }
}

#[test]
fn test_rotation_identities() {
    let data: Vec<f64> = (0..8).map(f64::from).collect();
    let ct = encrypt(&data, 16, 1024.0, false);

    assert_eq!(ct.rotate(0).decrypt(), data);
    assert_eq!(ct.rotate(8).decrypt(), data);
    assert_eq!(ct.rotate(-8).decrypt(), data);
    assert_eq!(
        ct.rotate(1).decrypt(),
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 0.0]
    );
    assert_eq!(
        ct.rotate(-1).decrypt(),
        vec![7.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
    );
}

#[test]
fn test_mismatched_ciphertexts() {
    let mut small = encrypt(&[1.0], 2048, 1024.0, true);
    let large = encrypt(&[1.0], 4096, 1024.0, true);
    let rescaled = encrypt(&[1.0], 2048, 2048.0, true);
    let before = small.decrypt();

    assert_eq!(
        small.add_assign(&large).unwrap_err(),
        CiphertextError::SchemeMismatch {
            expected: 2048,
            actual: 4096
        }
    );
    assert!(matches!(
        small.sub_assign(&rescaled),
        Err(CiphertextError::ScaleMismatch { .. })
    ));
    assert!(matches!(
        small.mul_assign(&rescaled),
        Err(CiphertextError::ScaleMismatch { .. })
    ));
    assert_eq!(small.decrypt(), before);
}

#[test]
fn test_error_messages() {
    let err = CiphertextError::CapacityExceeded { got: 10, max: 8 };
    assert_eq!(err.to_string(), "Capacity exceeded: got 10 values, max 8 slots");

    let err = CiphertextError::SchemeMismatch {
        expected: 2048,
        actual: 4096,
    };
    assert_eq!(
        err.to_string(),
        "Poly modulus degrees don't match: expected 2048, got 4096"
    );
}
