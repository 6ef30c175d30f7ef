//! Big-integer fallback pipeline (SPEC_FULL SS4.7).
//!
//! Entered whenever [`crate::model::try_fast_path`] reports that an instance
//! (or its bounds) cannot fit the engine's `i64` range. Translated from
//! `original_source/rpack/_bigint_fallback.py`'s `pack_with_bigint_fallback`
//! and its helpers almost line-for-line in control flow, adapted from
//! Python's arbitrary-precision `int` to `num_bigint::BigInt`.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

use crate::error::{PackError, Result};
use crate::intcheck::MAX_ENGINE_VALUE;
use crate::model::{bbox_size, try_fast_path, Placement, Rectangle};
use crate::search::{search, SearchResult};

fn max_engine_value() -> BigInt {
    BigInt::from(MAX_ENGINE_VALUE)
}

fn ceil_div(a: &BigInt, b: &BigInt) -> BigInt {
    (a + b - 1u32) / b
}

/// `ceil(sqrt(value))` for a non-negative `value`, via `num_integer::Roots`.
fn ceil_sqrt(value: &BigInt) -> BigInt {
    use num_integer::Roots;
    let root = value.sqrt();
    if &root * &root == *value {
        root
    } else {
        root + 1
    }
}

fn next_power_of_two(value: &BigInt) -> BigInt {
    if value <= &BigInt::from(1) {
        return BigInt::from(1);
    }
    let bits = (value - 1u32).bits();
    BigInt::from(1) << bits
}

/// Drops a bound that is non-binding: at or above the corresponding axis sum,
/// the bound can never be the thing that makes the instance infeasible.
fn drop_non_binding(bound: Option<BigInt>, axis_sum: &BigInt) -> Option<BigInt> {
    bound.filter(|b| b < axis_sum)
}

fn axis_sums(sizes: &[Rectangle]) -> (BigInt, BigInt) {
    let sum_w = sizes.iter().map(|r| &r.width).sum();
    let sum_h = sizes.iter().map(|r| &r.height).sum();
    (sum_w, sum_h)
}

/// Exact per-axis GCD reduction (SPEC_FULL SS4.7 step 3).
fn reduce_by_axis_gcd(
    sizes: &[Rectangle],
    max_width: Option<BigInt>,
    max_height: Option<BigInt>,
) -> (Vec<Rectangle>, Option<BigInt>, Option<BigInt>, BigInt, BigInt) {
    let mut gcd_w = BigInt::zero();
    let mut gcd_h = BigInt::zero();
    for r in sizes {
        gcd_w = gcd_w.gcd(&r.width);
        gcd_h = gcd_h.gcd(&r.height);
        if gcd_w == BigInt::from(1) && gcd_h == BigInt::from(1) {
            break;
        }
    }
    if gcd_w <= BigInt::from(1) && gcd_h <= BigInt::from(1) {
        return (sizes.to_vec(), max_width, max_height, BigInt::from(1), BigInt::from(1));
    }
    let reduced: Vec<Rectangle> = sizes
        .iter()
        .map(|r| Rectangle::new(&r.width / &gcd_w, &r.height / &gcd_h))
        .collect();
    let reduced_mw = max_width.map(|w| &w / &gcd_w);
    let reduced_mh = max_height.map(|h| &h / &gcd_h);
    (reduced, reduced_mw, reduced_mh, gcd_w, gcd_h)
}

/// Ceil-scaled over-approximation with floor-scaled bounds
/// (SPEC_FULL SS4.7 step 5).
fn build_approximation(
    sizes: &[Rectangle],
    max_width: &Option<BigInt>,
    max_height: &Option<BigInt>,
    scale: &BigInt,
) -> (Vec<Rectangle>, Option<BigInt>, Option<BigInt>) {
    let scaled: Vec<Rectangle> = sizes
        .iter()
        .map(|r| Rectangle::new(ceil_div(&r.width, scale), ceil_div(&r.height, scale)))
        .collect();
    let scaled_mw = max_width.as_ref().map(|w| w / scale);
    let scaled_mh = max_height.as_ref().map(|h| h / scale);
    (scaled, scaled_mw, scaled_mh)
}

/// Minimum scale so `bound / scale` fits the engine's range.
fn min_scale_for_floor_bound(bound: &Option<BigInt>) -> BigInt {
    match bound {
        None => BigInt::from(1),
        Some(b) if b <= &max_engine_value() => BigInt::from(1),
        Some(b) => b / (max_engine_value() + 1) + 1,
    }
}

/// Estimates a power-of-two approximation scale directly from the instance's
/// sizes, sums, and areas rather than doubling from `1`, grounded on
/// `original_source/rpack/_bigint_fallback.py`'s `_initial_approx_scale`: each
/// term targets a specific accumulator that could overflow (a single side, an
/// axis sum, a single rectangle's area, the total area), square-rooted where
/// the term is quadratic in the scale, so instances enormously over the
/// machine-word range don't need many doubling retries.
fn initial_approx_scale(
    sizes: &[Rectangle],
    max_width: &Option<BigInt>,
    max_height: &Option<BigInt>,
) -> BigInt {
    let cap = max_engine_value();
    let mut min_scale = BigInt::from(1);
    let mut sum_w = BigInt::zero();
    let mut sum_h = BigInt::zero();
    let mut max_rect_area = BigInt::zero();
    let mut total_area = BigInt::zero();

    for r in sizes {
        min_scale = min_scale.max(ceil_div(&r.width, &cap));
        min_scale = min_scale.max(ceil_div(&r.height, &cap));
        sum_w += &r.width;
        sum_h += &r.height;
        let rect_area = &r.width * &r.height;
        if rect_area > max_rect_area {
            max_rect_area = rect_area.clone();
        }
        total_area += rect_area;
    }

    min_scale = min_scale.max(ceil_div(&sum_w, &cap));
    min_scale = min_scale.max(ceil_div(&sum_h, &cap));
    if let Some(mw) = max_width {
        if mw < &sum_w {
            min_scale = min_scale.max(min_scale_for_floor_bound(&Some(mw.clone())));
        }
    }
    if let Some(mh) = max_height {
        if mh < &sum_h {
            min_scale = min_scale.max(min_scale_for_floor_bound(&Some(mh.clone())));
        }
    }

    if max_rect_area > cap {
        min_scale = min_scale.max(ceil_sqrt(&ceil_div(&max_rect_area, &cap)));
    }
    if total_area > cap {
        min_scale = min_scale.max(ceil_sqrt(&ceil_div(&total_area, &cap)));
    }

    next_power_of_two(&min_scale)
}

/// Rejects approximation artifacts where floor-scaling a genuinely positive
/// bound collapses it to `0` (which would otherwise read as "zero bound" and
/// report the wrong reason).
fn check_scaled_bound_zero_artifact(
    scaled_max_width: &Option<BigInt>,
    scaled_max_height: &Option<BigInt>,
    original_max_width: &Option<BigInt>,
    original_max_height: &Option<BigInt>,
) -> Result<()> {
    if matches!(scaled_max_width, Some(w) if w.is_zero())
        && matches!(original_max_width, Some(w) if w.is_positive())
    {
        return Err(PackError::packing_impossible(
            "max_width too small under bigint approximation",
            Vec::new(),
        ));
    }
    if matches!(scaled_max_height, Some(h) if h.is_zero())
        && matches!(original_max_height, Some(h) if h.is_positive())
    {
        return Err(PackError::packing_impossible(
            "max_height too small under bigint approximation",
            Vec::new(),
        ));
    }
    Ok(())
}

fn scale_placements(
    placements: &[crate::model::FastPlacement],
    factor_x: &BigInt,
    factor_y: &BigInt,
) -> Vec<Placement> {
    placements
        .iter()
        .map(|p| Placement {
            index: p.index,
            x: BigInt::from(p.x) * factor_x,
            y: BigInt::from(p.y) * factor_y,
        })
        .collect()
}

/// Re-validates the rescaled result against the caller's original explicit
/// bounds in arbitrary precision (SPEC_FULL SS4.7 step 9): ceil-scaling can
/// only grow sides, never shrink them, so a previously-feasible instance can
/// come back out of the approximation violating a tight bound.
fn enforce_explicit_bounds(
    sizes: &[Rectangle],
    positions: &[Placement],
    max_width: &Option<BigInt>,
    max_height: &Option<BigInt>,
) -> Result<()> {
    let (w, h) = bbox_size(sizes, positions).expect("equal length by construction");
    if let Some(mw) = max_width {
        if &w > mw {
            return Err(PackError::packing_impossible(
                "max_width exceeded after bigint fallback (positions violate bounds)",
                positions.to_vec(),
            ));
        }
    }
    if let Some(mh) = max_height {
        if &h > mh {
            return Err(PackError::packing_impossible(
                "max_height exceeded after bigint fallback (positions violate bounds)",
                positions.to_vec(),
            ));
        }
    }
    Ok(())
}

/// Runs the full fallback pipeline: GCD reduction, then (if still out of
/// range) power-of-two over-approximation, invokes the `i64` engine, rescales
/// positions, and revalidates explicit bounds.
///
/// `max_width`/`max_height` must already be normalized (negative -> `None`,
/// SPEC_FULL SS4.7 step 2) by the caller; this is the same normalization
/// [`crate::pack`] applies before deciding whether to divert here.
#[tracing::instrument(skip_all, fields(n = sizes.len()))]
pub(crate) fn pack_with_bigint_fallback(
    sizes: &[Rectangle],
    max_width: Option<BigInt>,
    max_height: Option<BigInt>,
) -> Result<Vec<Placement>> {
    let (sum_w, sum_h) = axis_sums(sizes);
    let effective_max_width = drop_non_binding(max_width.clone(), &sum_w);
    let effective_max_height = drop_non_binding(max_height.clone(), &sum_h);

    let (reduced_sizes, reduced_mw, reduced_mh, gx, gy) =
        reduce_by_axis_gcd(sizes, effective_max_width, effective_max_height);

    let (reduced_sum_w, reduced_sum_h) = axis_sums(&reduced_sizes);
    let reduced_mw = drop_non_binding(reduced_mw, &reduced_sum_w);
    let reduced_mh = drop_non_binding(reduced_mh, &reduced_sum_h);

    let mut approx_scale = initial_approx_scale(&reduced_sizes, &reduced_mw, &reduced_mh);

    loop {
        let (scaled_sizes, scaled_mw, scaled_mh) =
            build_approximation(&reduced_sizes, &reduced_mw, &reduced_mh, &approx_scale);

        check_scaled_bound_zero_artifact(&scaled_mw, &scaled_mh, &max_width, &max_height)?;

        let Some((fast_rects, fast_mw, fast_mh)) = try_fast_path(&scaled_sizes, &scaled_mw, &scaled_mh)
        else {
            approx_scale *= 2;
            continue;
        };

        let factor_x = &gx * &approx_scale;
        let factor_y = &gy * &approx_scale;

        return match search(&fast_rects, fast_mw, fast_mh) {
            SearchResult::Full(placements) => {
                let final_positions = scale_placements(&placements, &factor_x, &factor_y);
                enforce_explicit_bounds(sizes, &final_positions, &max_width, &max_height)?;
                Ok(final_positions)
            }
            SearchResult::Partial(placements) => {
                let rescaled = scale_placements(&placements, &factor_x, &factor_y);
                Err(PackError::packing_impossible("Partial result", rescaled))
            }
        };
    }
}
