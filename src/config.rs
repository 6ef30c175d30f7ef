//! Bound configuration for [`crate::pack`] (SPEC_FULL SS2 item 9).
//!
//! Grounded on the teacher's `PackerConfig`/`PackerConfigBuilder`
//! (`src/config.rs`), reduced to the two fields this specification actually
//! has: an optional enclosure width and height bound. Both accept anything
//! convertible into [`BigInt`] so callers plugging in ordinary machine
//! integers never see the arbitrary-precision type.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::error::{PackError, Result};

/// Optional upper bounds on the enclosure's width and height.
///
/// A missing or negative bound means "unbounded" (SPEC_FULL SS4.7 step 2,
/// SS6). `PackBounds` itself is a plain data holder callers can construct
/// with either a struct literal or the builder; [`PackBounds::validate`]
/// performs the actual normalization and rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackBounds {
    pub max_width: Option<BigInt>,
    pub max_height: Option<BigInt>,
}

impl PackBounds {
    /// Convenience constructor for "no bounds at all".
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Fluent builder for `PackBounds`.
    pub fn builder() -> PackBoundsBuilder {
        PackBoundsBuilder::new()
    }

    /// Normalizes and validates these bounds, mirroring the teacher's
    /// `PackerConfig::validate` in shape: a single `-> Result<...>` check
    /// called once from [`crate::pack`] before any placement is attempted.
    ///
    /// A negative bound is normalized to "unbounded" (SPEC_FULL SS4.7 step 2).
    /// An explicit zero bound is rejected with [`PackError::PackingImpossible`]
    /// -- but only when `non_empty_input` is true, since an empty rectangle
    /// list trivially satisfies any bound including zero (SPEC_FULL SS8:
    /// "Empty input yields empty output for any bounds"). That one
    /// input-dependent exception is this domain's own; the teacher's
    /// dimension check has no input-count analogue to defer to.
    pub fn validate(&self, non_empty_input: bool) -> Result<PackBounds> {
        let max_width = self.max_width.clone().filter(|w| !w.is_negative());
        let max_height = self.max_height.clone().filter(|h| !h.is_negative());

        if non_empty_input {
            if matches!(&max_width, Some(w) if w.is_zero()) {
                return Err(PackError::packing_impossible("max_width zero", Vec::new()));
            }
            if matches!(&max_height, Some(h) if h.is_zero()) {
                return Err(PackError::packing_impossible("max_height zero", Vec::new()));
            }
        }

        Ok(PackBounds { max_width, max_height })
    }
}

#[derive(Debug, Default, Clone)]
pub struct PackBoundsBuilder {
    bounds: PackBounds,
}

impl PackBoundsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_width(mut self, w: impl Into<BigInt>) -> Self {
        self.bounds.max_width = Some(w.into());
        self
    }

    pub fn max_height(mut self, h: impl Into<BigInt>) -> Self {
        self.bounds.max_height = Some(h.into());
        self
    }

    pub fn build(self) -> PackBounds {
        self.bounds
    }
}
