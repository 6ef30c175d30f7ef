//! Ordering heuristics (SPEC_FULL SS4.5).
//!
//! A finite closed set of deterministic orderings, modeled as a tagged enum
//! dispatched by the search driver rather than runtime-registered callbacks
//! (SPEC_FULL SS9, "Dynamic dispatch"). Grounded on the teacher's `SortOrder`
//! enum (`src/config.rs`) and the sorting it drives in `src/pipeline.rs`,
//! generalized from "sort input images before packing" to the exact
//! tie-broken orderings the specification names.
//!
//! Every variant sorts with [`slice::sort_by`], which is a stable sort: ties
//! on the stated keys keep the rectangles' original input order, giving the
//! "stable by original index" tie-break the specification requires without
//! an explicit index comparison.

use crate::model::FastRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Ordering {
    /// Non-increasing height, then non-increasing width.
    HeightThenWidth,
    /// Non-increasing width, then non-increasing height.
    WidthThenHeight,
    /// Non-increasing longer side, then non-increasing shorter side.
    LongerThenShorter,
    /// Non-increasing area.
    AreaDesc,
    /// Non-increasing perimeter.
    PerimeterDesc,
}

pub(crate) const ALL_ORDERINGS: [Ordering; 5] = [
    Ordering::HeightThenWidth,
    Ordering::WidthThenHeight,
    Ordering::LongerThenShorter,
    Ordering::AreaDesc,
    Ordering::PerimeterDesc,
];

/// Returns `rects` sorted per `ordering`.
///
/// Callers must have already validated that every rectangle's area and the
/// instance-wide sums fit the engine's range (SPEC_FULL SS4.1) before this is
/// called, since `w * h` and `w + h` here are plain (unchecked) `i64`
/// arithmetic -- that invariant is guaranteed by the validation boundary the
/// big-integer fallback sits behind, never by this module.
pub(crate) fn order(rects: &[FastRect], ordering: Ordering) -> Vec<FastRect> {
    let mut sorted = rects.to_vec();
    match ordering {
        Ordering::HeightThenWidth => {
            sorted.sort_by(|a, b| b.h.cmp(&a.h).then(b.w.cmp(&a.w)));
        }
        Ordering::WidthThenHeight => {
            sorted.sort_by(|a, b| b.w.cmp(&a.w).then(b.h.cmp(&a.h)));
        }
        Ordering::LongerThenShorter => {
            sorted.sort_by(|a, b| {
                let (long_a, short_a) = (a.w.max(a.h), a.w.min(a.h));
                let (long_b, short_b) = (b.w.max(b.h), b.w.min(b.h));
                long_b.cmp(&long_a).then(short_b.cmp(&short_a))
            });
        }
        Ordering::AreaDesc => {
            sorted.sort_by(|a, b| (b.w * b.h).cmp(&(a.w * a.h)));
        }
        Ordering::PerimeterDesc => {
            sorted.sort_by(|a, b| (b.w + b.h).cmp(&(a.w + a.h)));
        }
    }
    sorted
}
