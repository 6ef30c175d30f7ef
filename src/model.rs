//! Data types shared across the packer: the caller-facing (arbitrary-precision)
//! rectangle/placement types, and the engine-internal fixed-width counterparts
//! the fast path and the big-integer fallback both eventually call into.

use num_bigint::BigInt;

use crate::error::{PackError, Result};

/// A rectangle to place, given as a `(width, height)` pair.
///
/// Accepts anything convertible into [`BigInt`] so callers with ordinary
/// machine integers never have to think about the arbitrary-precision type;
/// the engine only reaches for the wide representation when a machine word
/// cannot hold the bookkeeping (SPEC_FULL SS4.1/SS4.7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rectangle {
    pub width: BigInt,
    pub height: BigInt,
}

impl Rectangle {
    pub fn new(width: impl Into<BigInt>, height: impl Into<BigInt>) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
        }
    }
}

/// Placement of one input rectangle's lower-left corner.
///
/// `index` is the position of the rectangle in the input sequence passed to
/// [`crate::pack`]; results are always returned in input order (the field is
/// carried so that internal reordering by heuristics can be undone).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub index: usize,
    pub x: BigInt,
    pub y: BigInt,
}

fn check_equal_len(sizes_len: usize, positions_len: usize) -> Result<()> {
    if sizes_len != positions_len {
        return Err(PackError::IndexMismatch {
            sizes: sizes_len,
            positions: positions_len,
        });
    }
    Ok(())
}

/// Enclosing bounding box `(W, H)` of `sizes` placed at `positions`.
///
/// `(0, 0)` for empty input. Accepts arbitrary-precision coordinates
/// transparently (SPEC_FULL SS4.8).
pub fn bbox_size(sizes: &[Rectangle], positions: &[Placement]) -> Result<(BigInt, BigInt)> {
    check_equal_len(sizes.len(), positions.len())?;
    let mut max_w = BigInt::from(0);
    let mut max_h = BigInt::from(0);
    for (rect, pos) in sizes.iter().zip(positions.iter()) {
        let right = &pos.x + &rect.width;
        let bottom = &pos.y + &rect.height;
        if right > max_w {
            max_w = right;
        }
        if bottom > max_h {
            max_h = bottom;
        }
    }
    Ok((max_w, max_h))
}

/// Ratio of total rectangle area to bounding-box area, in `[0.0, 1.0]`.
///
/// `1.0` for a single-rectangle input (SPEC_FULL SS4.8).
pub fn packing_density(sizes: &[Rectangle], positions: &[Placement]) -> Result<f64> {
    check_equal_len(sizes.len(), positions.len())?;
    if sizes.is_empty() {
        return Ok(1.0);
    }
    let (w, h) = bbox_size(sizes, positions)?;
    let bbox_area = &w * &h;
    if bbox_area == BigInt::from(0) {
        return Ok(1.0);
    }
    let rect_area: BigInt = sizes.iter().map(|r| &r.width * &r.height).sum();
    // Both operands are non-negative and bbox_area > 0 here; this division is
    // exact enough for a density figure and always finite.
    let ratio = big_ratio_to_f64(&rect_area, &bbox_area);
    Ok(ratio)
}

/// First overlapping pair `(i, j)` with `i < j`, in index-lexicographic order,
/// or `None` if no two placements overlap (SPEC_FULL SS4.8).
pub fn overlapping(sizes: &[Rectangle], positions: &[Placement]) -> Result<Option<(usize, usize)>> {
    check_equal_len(sizes.len(), positions.len())?;
    let n = sizes.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (wi, hi) = (&sizes[i].width, &sizes[i].height);
            let (xi, yi) = (&positions[i].x, &positions[i].y);
            let (wj, hj) = (&sizes[j].width, &sizes[j].height);
            let (xj, yj) = (&positions[j].x, &positions[j].y);
            let disjoint_x = (xi + wi) <= *xj || (xj + wj) <= *xi;
            let disjoint_y = (yi + hi) <= *yj || (yj + hj) <= *yi;
            if !(disjoint_x || disjoint_y) {
                return Ok(Some((i, j)));
            }
        }
    }
    Ok(None)
}

/// Converts a non-negative `numerator / denominator` big-integer ratio to
/// `f64` without overflowing: scale the numerator up before truncating to
/// `u128`/`f64` rather than converting both operands to `f64` directly (which
/// can overflow to infinity for legitimately huge but proportionate areas).
fn big_ratio_to_f64(numerator: &BigInt, denominator: &BigInt) -> f64 {
    use num_traits::ToPrimitive;
    if let (Some(n), Some(d)) = (numerator.to_f64(), denominator.to_f64()) {
        if d.is_finite() && d != 0.0 && n.is_finite() {
            return n / d;
        }
    }
    // Extremely wide values: reduce both by their common bit length before
    // falling back to f64 division so the ratio stays representable.
    let shift = numerator
        .bits()
        .max(denominator.bits())
        .saturating_sub(52) as u64;
    let n = numerator >> shift;
    let d = denominator >> shift;
    let (n, d) = (n.to_f64().unwrap_or(f64::MAX), d.to_f64().unwrap_or(1.0));
    if d == 0.0 {
        1.0
    } else {
        n / d
    }
}

/// Engine-internal rectangle: fixed-width `i64`, tagged with its position in
/// the caller's input so the search driver can restore input order.
///
/// This is the type every component in SPEC_FULL SS2 items 1-6 actually
/// operates on; the big-integer fallback (SS4.7) produces instances of this
/// type only after GCD reduction and/or power-of-two approximation guarantee
/// they fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FastRect {
    pub index: usize,
    pub w: i64,
    pub h: i64,
}

/// Engine-internal placement: fixed-width counterpart of [`Placement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FastPlacement {
    pub index: usize,
    pub x: i64,
    pub y: i64,
}

/// Attempts to convert `sizes` and the given bounds into the engine's `i64`
/// range, mirroring the reference implementation's `_fits_clong_core`
/// (`original_source/rpack/_bigint_fallback.py`): every side, every bound,
/// both axis sums and the total area must fit. Returns `None` the moment
/// anything doesn't, which is the signal to divert to the big-integer
/// fallback (SPEC_FULL SS4.1/SS4.7) instead of attempting the fast engine.
pub(crate) fn try_fast_path(
    sizes: &[Rectangle],
    max_width: &Option<BigInt>,
    max_height: &Option<BigInt>,
) -> Option<(Vec<FastRect>, Option<i64>, Option<i64>)> {
    use crate::intcheck::{checked_add, checked_mul, MAX_ENGINE_VALUE};
    use num_traits::ToPrimitive;

    let to_fast_bound = |b: &Option<BigInt>| -> Option<Option<i64>> {
        match b {
            None => Some(None),
            Some(v) => v.to_i64().filter(|&v| v <= MAX_ENGINE_VALUE).map(Some),
        }
    };
    let fast_max_width = to_fast_bound(max_width)?;
    let fast_max_height = to_fast_bound(max_height)?;

    let mut rects = Vec::with_capacity(sizes.len());
    let mut sum_w: i64 = 0;
    let mut sum_h: i64 = 0;
    let mut area: i64 = 0;
    for (index, r) in sizes.iter().enumerate() {
        let w = r.width.to_i64().filter(|&w| w > 0 && w <= MAX_ENGINE_VALUE)?;
        let h = r.height.to_i64().filter(|&h| h > 0 && h <= MAX_ENGINE_VALUE)?;
        let rect_area = checked_mul(w, h).ok()?;
        area = checked_add(area, rect_area).ok()?;
        sum_w = checked_add(sum_w, w).ok()?;
        sum_h = checked_add(sum_h, h).ok()?;
        rects.push(FastRect { index, w, h });
    }
    Some((rects, fast_max_width, fast_max_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_size_empty_is_zero() {
        let (w, h) = bbox_size(&[], &[]).unwrap();
        assert_eq!(w, BigInt::from(0));
        assert_eq!(h, BigInt::from(0));
    }

    #[test]
    fn bbox_size_matches_literal_example() {
        let sizes = vec![
            Rectangle::new(3, 5),
            Rectangle::new(1, 1),
            Rectangle::new(1, 1),
        ];
        let positions = vec![
            Placement { index: 0, x: BigInt::from(0), y: BigInt::from(0) },
            Placement { index: 1, x: BigInt::from(3), y: BigInt::from(0) },
            Placement { index: 2, x: BigInt::from(0), y: BigInt::from(5) },
        ];
        let (w, h) = bbox_size(&sizes, &positions).unwrap();
        assert_eq!(w, BigInt::from(4));
        assert_eq!(h, BigInt::from(6));
    }

    #[test]
    fn packing_density_single_rect_is_one() {
        let sizes = vec![Rectangle::new(3, 5)];
        let positions = vec![Placement { index: 0, x: BigInt::from(0), y: BigInt::from(0) }];
        assert_eq!(packing_density(&sizes, &positions).unwrap(), 1.0);
    }

    #[test]
    fn overlapping_detects_first_pair() {
        let sizes = vec![Rectangle::new(4, 4), Rectangle::new(4, 4)];
        let positions = vec![
            Placement { index: 0, x: BigInt::from(0), y: BigInt::from(0) },
            Placement { index: 1, x: BigInt::from(2), y: BigInt::from(2) },
        ];
        assert_eq!(overlapping(&sizes, &positions).unwrap(), Some((0, 1)));
    }

    #[test]
    fn overlapping_none_when_disjoint() {
        let sizes = vec![Rectangle::new(4, 4), Rectangle::new(4, 4)];
        let positions = vec![
            Placement { index: 0, x: BigInt::from(0), y: BigInt::from(0) },
            Placement { index: 1, x: BigInt::from(4), y: BigInt::from(0) },
        ];
        assert_eq!(overlapping(&sizes, &positions).unwrap(), None);
    }

    #[test]
    fn index_mismatch_is_reported() {
        let sizes = vec![Rectangle::new(1, 1)];
        let err = bbox_size(&sizes, &[]).unwrap_err();
        assert!(matches!(err, PackError::IndexMismatch { sizes: 1, positions: 0 }));
    }
}
