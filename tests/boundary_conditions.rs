//! Boundary behaviors named explicitly by the specification: empty input,
//! single rectangles, and zero bounds.

use num_bigint::BigInt;
use rpack_core::{pack, PackBounds, PackError, Placement, Rectangle};

#[test]
fn empty_input_yields_empty_output_for_any_bounds() {
    assert_eq!(pack(&[], PackBounds::default()).unwrap(), Vec::new());
    assert_eq!(
        pack(&[], PackBounds::builder().max_width(0).max_height(0).build()).unwrap(),
        Vec::new()
    );
    assert_eq!(
        pack(&[], PackBounds::builder().max_width(-5).build()).unwrap(),
        Vec::new()
    );
}

#[test]
fn single_rectangle_with_no_bounds() {
    let sizes = vec![Rectangle::new(7, 11)];
    let result = pack(&sizes, PackBounds::default()).unwrap();
    assert_eq!(result, vec![Placement { index: 0, x: BigInt::from(0), y: BigInt::from(0) }]);
}

#[test]
fn single_rectangle_with_max_width_too_small() {
    let sizes = vec![Rectangle::new(10, 1)];
    let err = pack(&sizes, PackBounds::builder().max_width(9).build()).unwrap_err();
    assert!(matches!(err, PackError::PackingImpossible { .. }));
    assert!(err.to_string().contains("max_width"));
}

#[test]
fn max_width_zero_with_non_empty_input() {
    let sizes = vec![Rectangle::new(1, 1)];
    let err = pack(&sizes, PackBounds::builder().max_width(0).build()).unwrap_err();
    assert!(err.to_string().contains("zero"));
}

#[test]
fn max_height_zero_with_non_empty_input() {
    let sizes = vec![Rectangle::new(1, 1)];
    let err = pack(&sizes, PackBounds::builder().max_height(0).build()).unwrap_err();
    assert!(err.to_string().contains("zero"));
}

#[test]
fn non_positive_rectangle_side_is_invalid_input() {
    let sizes = vec![Rectangle::new(0, 5)];
    let err = pack(&sizes, PackBounds::default()).unwrap_err();
    assert!(matches!(err, PackError::InvalidInput(_)));
}

#[test]
fn sides_beyond_engine_range_still_produce_correct_placement() {
    let huge = BigInt::from(1) << 100;
    let sizes = vec![Rectangle::new(huge.clone(), huge.clone())];
    let result = pack(&sizes, PackBounds::default()).unwrap();
    assert_eq!(result, vec![Placement { index: 0, x: BigInt::from(0), y: BigInt::from(0) }]);
}
