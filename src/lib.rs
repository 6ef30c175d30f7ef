//! Fixed-orientation 2D rectangle packing.
//!
//! Given a list of rectangle sizes, [`pack`] places each at a non-overlapping
//! integer `(x, y)` offset, optionally honoring an enclosure width and/or
//! height bound, and returns the placements in input order. Rectangles are
//! never rotated. Sizes and bounds accept anything convertible into
//! [`num_bigint::BigInt`]; inputs that fit the engine's native `i64` range
//! take a fast path, everything else is routed through an arbitrary-precision
//! fallback (see [`bigint`]) that is exact where possible and otherwise a
//! conservative over-approximation.
//!
//! ```
//! use rpack_core::{pack, PackBounds, Rectangle};
//!
//! let sizes = vec![
//!     Rectangle::new(58, 206),
//!     Rectangle::new(231, 176),
//!     Rectangle::new(35, 113),
//!     Rectangle::new(46, 109),
//! ];
//! let placements = pack(&sizes, PackBounds::default()).unwrap();
//! assert_eq!(placements.len(), sizes.len());
//! ```

mod bigint;
mod config;
mod engine;
mod error;
mod front;
mod intcheck;
mod model;
mod order;
mod scorer;
mod search;

pub use config::{PackBounds, PackBoundsBuilder};
pub use error::{PackError, Result};
pub use model::{bbox_size, overlapping, packing_density, Placement, Rectangle};

use num_bigint::BigInt;
use num_traits::Zero;

use model::{try_fast_path, FastPlacement};
use search::SearchResult;

/// Convenience prelude for common types and functions.
pub mod prelude {
    pub use crate::{pack, overlapping, packing_density, bbox_size, PackBounds, PackError, Placement, Rectangle};
}

fn to_bigint_placements(fast: Vec<FastPlacement>) -> Vec<Placement> {
    fast.into_iter()
        .map(|p| Placement {
            index: p.index,
            x: BigInt::from(p.x),
            y: BigInt::from(p.y),
        })
        .collect()
}

/// Packs `sizes` into a minimal-area enclosure, honoring `bounds`.
///
/// Returns placements in input order on success. Fails with
/// [`PackError::InvalidInput`] if any rectangle's width or height is not
/// strictly positive, with [`PackError::PackingImpossible`] if `bounds`
/// cannot be satisfied (carrying as many placements as were found), and never
/// with [`PackError::IndexMismatch`] (that variant is only produced by the
/// geometry helpers called with mismatched slice lengths).
#[tracing::instrument(skip_all, fields(n = sizes.len()))]
pub fn pack(sizes: &[Rectangle], bounds: PackBounds) -> Result<Vec<Placement>> {
    for r in sizes {
        if r.width <= BigInt::zero() || r.height <= BigInt::zero() {
            return Err(PackError::InvalidInput(
                "rectangle width and height must be strictly positive".to_string(),
            ));
        }
    }

    let bounds = bounds.validate(!sizes.is_empty())?;

    if sizes.is_empty() {
        return Ok(Vec::new());
    }

    let max_width = bounds.max_width;
    let max_height = bounds.max_height;

    for r in sizes {
        if matches!(&max_width, Some(w) if &r.width > w) {
            return Err(PackError::packing_impossible(
                "rectangle wider than max_width",
                Vec::new(),
            ));
        }
        if matches!(&max_height, Some(h) if &r.height > h) {
            return Err(PackError::packing_impossible(
                "rectangle taller than max_height",
                Vec::new(),
            ));
        }
    }

    match try_fast_path(sizes, &max_width, &max_height) {
        Some((fast_rects, fast_max_width, fast_max_height)) => {
            match search::search(&fast_rects, fast_max_width, fast_max_height) {
                SearchResult::Full(placements) => Ok(to_bigint_placements(placements)),
                SearchResult::Partial(placements) => Err(PackError::packing_impossible(
                    "Partial result",
                    to_bigint_placements(placements),
                )),
            }
        }
        None => bigint::pack_with_bigint_fallback(sizes, max_width, max_height),
    }
}
