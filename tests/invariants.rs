//! Universal invariants that must hold for every successful pack, exercised
//! against a handful of varied random instances (seeded, so failures
//! reproduce) rather than a fixed literal scenario.

use num_bigint::BigInt;
use num_traits::Zero;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rpack_core::{bbox_size, overlapping, pack, packing_density, PackBounds, Rectangle};

fn random_sizes(seed: u64, n: usize) -> Vec<Rectangle> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Rectangle::new(rng.gen_range(1..50), rng.gen_range(1..50)))
        .collect()
}

fn check_invariants(sizes: &[Rectangle], result: &[rpack_core::Placement]) {
    assert_eq!(result.len(), sizes.len());

    for p in result {
        assert!(p.x >= BigInt::zero());
        assert!(p.y >= BigInt::zero());
    }

    if !sizes.is_empty() {
        assert!(result.iter().any(|p| p.x == BigInt::zero()));
        assert!(result.iter().any(|p| p.y == BigInt::zero()));
    }

    assert_eq!(overlapping(sizes, result).unwrap(), None);

    let (w, h) = bbox_size(sizes, result).unwrap();
    let total_area: BigInt = sizes.iter().map(|r| &r.width * &r.height).sum();
    assert!(&w * &h >= total_area);
    assert!(packing_density(sizes, result).unwrap() <= 1.0);
}

#[test]
fn invariants_hold_across_random_instances() {
    for seed in 0..8u64 {
        let sizes = random_sizes(seed, 12);
        let result = pack(&sizes, PackBounds::default()).unwrap();
        check_invariants(&sizes, &result);
    }
}

#[test]
fn determinism_across_repeated_calls() {
    let sizes = random_sizes(42, 15);
    let first = pack(&sizes, PackBounds::default()).unwrap();
    let second = pack(&sizes, PackBounds::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn result_preserves_input_order_and_length() {
    let sizes = vec![Rectangle::new(4, 1), Rectangle::new(1, 4), Rectangle::new(2, 2)];
    let result = pack(&sizes, PackBounds::default()).unwrap();
    let indices: Vec<usize> = result.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn repacking_a_results_sizes_in_original_order_is_stable() {
    let sizes = random_sizes(11, 9);
    let first = pack(&sizes, PackBounds::default()).unwrap();
    let second = pack(&sizes, PackBounds::default()).unwrap();
    assert_eq!(first, second);
}
