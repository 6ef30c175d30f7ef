//! Width search driver (SPEC_FULL SS4.6).
//!
//! Outer loop that searches over candidate enclosure widths `W`, invokes the
//! pack-into-width engine under each ordering heuristic, and keeps the best
//! result. Grounded on the teacher's `pack_auto` portfolio evaluation
//! (`src/pipeline.rs`: try several algorithm/heuristic combinations, keep the
//! best by `(pages, area)`, optionally in parallel under the `parallel`
//! feature) -- here the portfolio is "enclosure width x ordering heuristic"
//! rather than "packer family x heuristic", and the score is the
//! `(area, max_side, perimeter, placement vector)` tuple SPEC_FULL SS4.6
//! names instead of page count.

use std::cmp::Reverse;

use crate::engine::{pack_into_width, EngineOutcome};
use crate::model::{FastPlacement, FastRect};
use crate::order::{order, ALL_ORDERINGS};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of the whole width/ordering search.
#[derive(Debug, Clone)]
pub(crate) enum SearchResult {
    /// Every rectangle placed; `placements` restored to input order.
    Full(Vec<FastPlacement>),
    /// No width/ordering combination placed every rectangle; `placements`
    /// holds the best partial packing found (possibly empty), in input
    /// order.
    Partial(Vec<FastPlacement>),
}

type FullKey = (i128, i64, i128, Vec<(i64, i64)>);
type PartialKey = (Reverse<usize>, Reverse<i128>, Vec<(i64, i64)>);

fn sorted_positions(placements: &[FastPlacement]) -> Vec<(i64, i64)> {
    let mut sorted = placements.to_vec();
    sorted.sort_by_key(|p| p.index);
    sorted.into_iter().map(|p| (p.x, p.y)).collect()
}

fn full_key(rects: &[FastRect], placements: &[FastPlacement], height: i64) -> FullKey {
    let width = placements
        .iter()
        .map(|p| rects[p.index].w + p.x)
        .max()
        .unwrap_or(0);
    let area = width as i128 * height as i128;
    let max_side = width.max(height);
    let perimeter = width as i128 + height as i128;
    (area, max_side, perimeter, sorted_positions(placements))
}

fn partial_key(rects: &[FastRect], placements: &[FastPlacement]) -> PartialKey {
    let placed_area: i128 = placements
        .iter()
        .map(|p| {
            let r = &rects[p.index];
            r.w as i128 * r.h as i128
        })
        .sum();
    (
        Reverse(placements.len()),
        Reverse(placed_area),
        sorted_positions(placements),
    )
}

fn ceil_sqrt(value: i64) -> i64 {
    if value <= 0 {
        return 0;
    }
    let mut root = (value as f64).sqrt() as i64;
    while root > 0 && root * root > value {
        root -= 1;
    }
    while root * root < value {
        root += 1;
    }
    root
}

fn ceil_div(a: i64, b: i64) -> i64 {
    (a + b - 1) / b
}

/// Threshold below which the full integer range `[lo, hi]` is scanned
/// densely. Above it a coarse geometric ladder plus a dense window around the
/// area-driven anchor `ceil(sqrt(A))` is used instead, to keep the search
/// bounded on instances with very large total width.
const DENSE_SCAN_LIMIT: i64 = 4096;

fn candidate_widths(lo: i64, hi: i64, anchor: i64) -> Vec<i64> {
    if hi <= lo {
        return vec![lo];
    }
    if hi - lo <= DENSE_SCAN_LIMIT {
        return (lo..=hi).rev().collect();
    }
    let mut widths = Vec::new();
    // Coarse geometric ladder spanning the whole range, descending.
    let mut w = hi;
    while w > lo {
        widths.push(w);
        let step = ((w - lo) / 16).max(1);
        w -= step;
    }
    widths.push(lo);
    // Dense window around the area-driven near-square anchor: skyline-style
    // packers tend to do best close to a square enclosure, so this is where
    // refinement around the coarse pass's likely winner pays off.
    let anchor = anchor.clamp(lo, hi);
    let window = (anchor / 20).max(32);
    let from = (anchor - window).max(lo);
    let to = (anchor + window).min(hi);
    for w in (from..=to).rev() {
        widths.push(w);
    }
    widths.sort_unstable_by(|a, b| b.cmp(a));
    widths.dedup();
    widths
}

/// Outcome of evaluating every ordering heuristic against one candidate
/// width.
enum WidthOutcome {
    Full(Vec<FastPlacement>, FullKey),
    Partial(Vec<FastPlacement>, PartialKey),
    Infeasible,
}

fn evaluate_width(rects: &[FastRect], width: i64, h_max: Option<i64>) -> WidthOutcome {
    let mut best_full: Option<(Vec<FastPlacement>, FullKey)> = None;
    let mut best_partial: Option<(Vec<FastPlacement>, PartialKey)> = None;
    let mut any_feasible = false;

    for heuristic in ALL_ORDERINGS {
        let ordered = order(rects, heuristic);
        match pack_into_width(&ordered, width, h_max) {
            EngineOutcome::Full { placements, height } => {
                any_feasible = true;
                let key = full_key(rects, &placements, height);
                if best_full.as_ref().map_or(true, |(_, best)| key < *best) {
                    best_full = Some((placements, key));
                }
            }
            EngineOutcome::BoundViolation { placements } => {
                any_feasible = true;
                let key = partial_key(rects, &placements);
                if best_partial.as_ref().map_or(true, |(_, best)| key < *best) {
                    best_partial = Some((placements, key));
                }
            }
            EngineOutcome::Infeasible => {}
        }
    }

    if let Some((placements, key)) = best_full {
        return WidthOutcome::Full(placements, key);
    }
    if let Some((placements, key)) = best_partial {
        return WidthOutcome::Partial(placements, key);
    }
    if any_feasible {
        WidthOutcome::Partial(Vec::new(), partial_key(rects, &[]))
    } else {
        WidthOutcome::Infeasible
    }
}

/// Searches over candidate widths for the best full packing, falling back to
/// the best partial packing if no width produces a full one.
///
/// `rects` must be indexed `0..rects.len()` in original input order (i.e.
/// `rects[i].index == i`); every placement looked up by index throughout this
/// module relies on that invariant, which the caller (SPEC_FULL SS4.1's
/// validation boundary) is responsible for establishing.
pub(crate) fn search(rects: &[FastRect], max_width: Option<i64>, max_height: Option<i64>) -> SearchResult {
    if rects.is_empty() {
        return SearchResult::Full(Vec::new());
    }

    let max_w = rects.iter().map(|r| r.w).max().unwrap();
    let sum_w: i64 = rects.iter().map(|r| r.w).sum();
    let area: i64 = rects.iter().map(|r| r.w * r.h).sum();

    let w_up = match max_width {
        Some(mw) => mw.min(sum_w),
        None => sum_w,
    };

    // Hard feasibility floor: see DESIGN.md "W_min formula" for why this is
    // `max_w` alone rather than `max(max_w, ceil(sqrt(area)))` as a plain
    // reading of SPEC_FULL SS4.6 step 1 might suggest -- the latter produces
    // false impossibility whenever an explicit `max_width` forces a much
    // narrower (and thus taller) enclosure than the near-square ideal.
    if w_up < max_w {
        return SearchResult::Partial(Vec::new());
    }

    let anchor = ceil_sqrt(area).max(max_w);
    let search_floor = if w_up >= anchor { anchor } else { max_w };

    let widths = candidate_widths(search_floor, w_up, anchor);

    let max_h = rects.iter().map(|r| r.h).max().unwrap();
    let h_min = |w: i64| -> i64 { max_h.max(ceil_div(area, w)) };

    let mut best_full: Option<(Vec<FastPlacement>, FullKey)> = None;
    let mut best_partial: Option<(Vec<FastPlacement>, PartialKey)> = None;

    fn fold_outcome(
        outcome: WidthOutcome,
        best_full: &mut Option<(Vec<FastPlacement>, FullKey)>,
        best_partial: &mut Option<(Vec<FastPlacement>, PartialKey)>,
    ) {
        match outcome {
            WidthOutcome::Full(placements, key) => {
                if best_full.as_ref().map_or(true, |(_, best)| key < *best) {
                    *best_full = Some((placements, key));
                }
            }
            WidthOutcome::Partial(placements, key) => {
                if best_partial.as_ref().map_or(true, |(_, best)| key < *best) {
                    *best_partial = Some((placements, key));
                }
            }
            WidthOutcome::Infeasible => {}
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        // Pruning (SPEC_FULL SS4.6 step 3): once a full packing of area `A*`
        // is known, skip `evaluate_width` entirely for any width whose
        // theoretical area floor `W * H_min(W)` cannot beat it, rather than
        // running the engine over every ordering for that width and
        // discarding the result. This is what actually bounds engine
        // invocations on adversarial inputs, layered on top of
        // `candidate_widths`'s own ladder/dense-scan cap.
        for w in widths {
            if let Some((_, best_key)) = &best_full {
                let floor_area = w as i128 * h_min(w) as i128;
                if floor_area >= best_key.0 {
                    continue;
                }
            }
            let outcome = evaluate_width(rects, w, max_height);
            fold_outcome(outcome, &mut best_full, &mut best_partial);
        }
    }

    #[cfg(feature = "parallel")]
    {
        // Concurrent evaluation has no running "best so far" to prune
        // against until a batch of widths has already been computed, so
        // every width in `widths` is evaluated here regardless of its area
        // floor -- this is *not* the SPEC_FULL SS4.6 step 3 prune, just a
        // post-hoc key comparison over already-computed outcomes. The
        // sequential path above does the real skip-before-evaluating prune.
        let outcomes: Vec<(i64, WidthOutcome)> = widths
            .par_iter()
            .map(|&w| (w, evaluate_width(rects, w, max_height)))
            .collect();
        for (w, outcome) in outcomes {
            if let Some((_, best_key)) = &best_full {
                let floor_area = w as i128 * h_min(w) as i128;
                if floor_area >= best_key.0 && !matches!(outcome, WidthOutcome::Full(..)) {
                    continue;
                }
            }
            fold_outcome(outcome, &mut best_full, &mut best_partial);
        }
    }

    if let Some((mut placements, _)) = best_full {
        placements.sort_by_key(|p| p.index);
        return SearchResult::Full(placements);
    }
    if let Some((mut placements, _)) = best_partial {
        placements.sort_by_key(|p| p.index);
        return SearchResult::Partial(placements);
    }
    SearchResult::Partial(Vec::new())
}
