//! With the `parallel` feature enabled, concurrent width/ordering evaluation
//! must still settle on the exact same result as the sequential path would.
//! Run with `--features parallel`; compiles to nothing otherwise.

#![cfg(feature = "parallel")]

use rpack_core::{bbox_size, pack, PackBounds, Rectangle};

#[test]
fn parallel_feature_agrees_with_literal_scenario() {
    let sizes = vec![
        Rectangle::new(2, 2),
        Rectangle::new(2, 2),
        Rectangle::new(2, 2),
        Rectangle::new(3, 3),
    ];
    let result = pack(&sizes, PackBounds::default()).unwrap();
    let (w, h) = bbox_size(&sizes, &result).unwrap();
    assert_eq!(&w * &h, num_bigint::BigInt::from(25));
}

#[test]
fn parallel_feature_is_deterministic_across_runs() {
    let sizes: Vec<Rectangle> = (2..=20).rev().map(|i| Rectangle::new(i, i)).collect();
    let first = pack(&sizes, PackBounds::default()).unwrap();
    let second = pack(&sizes, PackBounds::default()).unwrap();
    assert_eq!(first, second);
}
