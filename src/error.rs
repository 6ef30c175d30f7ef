use thiserror::Error;

use crate::model::Placement;

/// Caller-facing error surface for [`crate::pack`] and the geometry helpers.
///
/// The internal overflow signal used to switch from the fixed-width engine to
/// the big-integer fallback (SPEC_FULL SS4.1/SS4.7) is *not* a variant here: it
/// never escapes past the boundary between the public entry point and the
/// engine, so it has no caller-facing representation.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("packing impossible: {reason}")]
    PackingImpossible {
        reason: String,
        partial: Vec<Placement>,
    },

    #[error("sizes and positions have different lengths ({sizes} vs {positions})")]
    IndexMismatch { sizes: usize, positions: usize },
}

impl PackError {
    pub(crate) fn packing_impossible(
        reason: impl Into<String>,
        partial: Vec<Placement>,
    ) -> Self {
        Self::PackingImpossible {
            reason: reason.into(),
            partial,
        }
    }

    /// The partial placements attached to a [`PackError::PackingImpossible`], if any.
    pub fn partial(&self) -> Option<&[Placement]> {
        match self {
            Self::PackingImpossible { partial, .. } => Some(partial),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PackError>;
