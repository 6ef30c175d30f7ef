//! Pack-into-width engine (SPEC_FULL SS4.4).
//!
//! Installs an already-ordered sequence of rectangles into a fixed-width
//! enclosure one at a time using [`Front`] and the [`scorer`]. Grounded on
//! the teacher's `Packer` trait and `SkylinePacker::pack` (`src/packer/mod.rs`,
//! `src/packer/skyline.rs`), collapsed from "one rectangle in, one `Frame`
//! out" into the three-way full/partial/infeasible outcome this
//! specification requires.

use crate::front::Front;
use crate::model::FastRect;
use crate::scorer::best_candidate;

/// Result of attempting to pack `rects` (in the given order) into one
/// enclosure of fixed width `W`.
#[derive(Debug, Clone)]
pub(crate) enum EngineOutcome {
    /// Every rectangle was placed; `height` is `max(y + h)` over all of them
    /// (or `0` if `rects` was empty).
    Full {
        placements: Vec<crate::model::FastPlacement>,
        height: i64,
    },
    /// A bound violation was hit partway through; `placements` holds every
    /// rectangle placed before the violation, in the order they were placed.
    BoundViolation {
        placements: Vec<crate::model::FastPlacement>,
    },
    /// Some rectangle cannot possibly fit this width or this height bound,
    /// independent of ordering or placement -- not worth attempting.
    Infeasible,
}

/// Runs the pack-into-width engine for one ordering against one candidate
/// width `width`, honoring `h_max` when set.
pub(crate) fn pack_into_width(
    rects: &[FastRect],
    width: i64,
    h_max: Option<i64>,
) -> EngineOutcome {
    // Failure condition 1 (SPEC_FULL SS4.4): a single rectangle that cannot
    // possibly fit this width/height makes the whole attempt infeasible,
    // with no partial output -- checked up front so the loop below never has
    // to distinguish "doesn't fit geometrically" from "front ran out of
    // room", which the scorer cannot tell apart on its own.
    for r in rects {
        if r.w > width {
            return EngineOutcome::Infeasible;
        }
        if let Some(hm) = h_max {
            if r.h > hm {
                return EngineOutcome::Infeasible;
            }
        }
    }

    let mut front = Front::new(width);
    let mut placements = Vec::with_capacity(rects.len());
    let mut height: i64 = 0;

    for r in rects {
        match best_candidate(&front, r.w, r.h, h_max) {
            Some(placement) => {
                front.install(placement.x, placement.top_y, r.w);
                height = height.max(placement.top_y);
                placements.push(crate::model::FastPlacement {
                    index: r.index,
                    x: placement.x,
                    y: placement.bottom_y,
                });
            }
            None => {
                return EngineOutcome::BoundViolation { placements };
            }
        }
    }

    EngineOutcome::Full { placements, height }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(index: usize, w: i64, h: i64) -> FastRect {
        FastRect { index, w, h }
    }

    #[test]
    fn full_pack_5x3_block() {
        let rects = [rect(0, 3, 3), rect(1, 2, 2), rect(2, 2, 1)];
        let outcome = pack_into_width(&rects, 5, None);
        match outcome {
            EngineOutcome::Full { placements, height } => {
                assert_eq!(height, 3);
                let pos: Vec<(i64, i64)> = placements.iter().map(|p| (p.x, p.y)).collect();
                assert_eq!(pos, vec![(0, 0), (3, 0), (3, 2)]);
            }
            other => panic!("expected full pack, got {other:?}"),
        }
    }

    #[test]
    fn infeasible_when_rect_wider_than_width() {
        let rects = [rect(0, 10, 1)];
        assert!(matches!(pack_into_width(&rects, 5, None), EngineOutcome::Infeasible));
    }

    #[test]
    fn bound_violation_with_partial_output() {
        let rects: Vec<FastRect> = (0..10).map(|i| rect(i, 10, 1)).collect();
        match pack_into_width(&rects, 50, Some(1)) {
            EngineOutcome::BoundViolation { placements } => {
                assert_eq!(placements.len(), 5);
                let xs: Vec<i64> = placements.iter().map(|p| p.x).collect();
                assert_eq!(xs, vec![0, 10, 20, 30, 40]);
            }
            other => panic!("expected bound violation, got {other:?}"),
        }
    }
}
