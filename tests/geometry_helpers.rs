//! `bbox_size` / `packing_density` / `overlapping`, independent of `pack`.

use num_bigint::BigInt;
use rpack_core::{bbox_size, overlapping, packing_density, PackError, Placement, Rectangle};

fn p(index: usize, x: i64, y: i64) -> Placement {
    Placement { index, x: BigInt::from(x), y: BigInt::from(y) }
}

#[test]
fn bbox_size_of_empty_input_is_zero() {
    assert_eq!(bbox_size(&[], &[]).unwrap(), (BigInt::from(0), BigInt::from(0)));
}

#[test]
fn bbox_size_matches_literal_example() {
    let sizes = vec![Rectangle::new(3, 5), Rectangle::new(1, 1), Rectangle::new(1, 1)];
    let positions = vec![p(0, 0, 0), p(1, 3, 0), p(2, 0, 5)];
    assert_eq!(bbox_size(&sizes, &positions).unwrap(), (BigInt::from(4), BigInt::from(6)));
}

#[test]
fn packing_density_is_one_for_perfect_pack() {
    let sizes = vec![Rectangle::new(2, 2), Rectangle::new(2, 2)];
    let positions = vec![p(0, 0, 0), p(1, 2, 0)];
    assert_eq!(packing_density(&sizes, &positions).unwrap(), 1.0);
}

#[test]
fn packing_density_is_below_one_with_dead_space() {
    let sizes = vec![Rectangle::new(1, 1)];
    let positions = vec![p(0, 0, 0)];
    // A single rectangle is always density 1.0 regardless of position...
    assert_eq!(packing_density(&sizes, &positions).unwrap(), 1.0);
    // ...but two rectangles leaving a gap are not.
    let sizes = vec![Rectangle::new(1, 1), Rectangle::new(1, 1)];
    let positions = vec![p(0, 0, 0), p(1, 5, 0)];
    assert!(packing_density(&sizes, &positions).unwrap() < 1.0);
}

#[test]
fn overlapping_finds_first_colliding_pair_in_index_order() {
    let sizes = vec![Rectangle::new(4, 4), Rectangle::new(4, 4), Rectangle::new(4, 4)];
    let positions = vec![p(0, 0, 0), p(1, 10, 10), p(2, 2, 2)];
    // (0, 2) overlap; (1, *) do not.
    assert_eq!(overlapping(&sizes, &positions).unwrap(), Some((0, 2)));
}

#[test]
fn overlapping_is_none_for_touching_but_disjoint_rectangles() {
    let sizes = vec![Rectangle::new(4, 4), Rectangle::new(4, 4)];
    let positions = vec![p(0, 0, 0), p(1, 4, 0)];
    assert_eq!(overlapping(&sizes, &positions).unwrap(), None);
}

#[test]
fn mismatched_lengths_report_index_mismatch() {
    let sizes = vec![Rectangle::new(1, 1), Rectangle::new(1, 1)];
    let positions = vec![p(0, 0, 0)];
    let err = bbox_size(&sizes, &positions).unwrap_err();
    assert!(matches!(err, PackError::IndexMismatch { sizes: 2, positions: 1 }));
}
