//! Safe integer layer (SPEC_FULL SS4.1).
//!
//! The engine works exclusively in `i64`, restricted in practice to the
//! non-negative range `0..=MAX_ENGINE_VALUE`. Every addition or multiplication
//! on a user-supplied size is checked: on overflow the caller gets
//! [`Overflow`] rather than a silently wrapped result. `Overflow` is not a
//! [`crate::error::PackError`] variant -- it never reaches a caller, it only
//! tells the public entry point to divert into the big-integer fallback
//! (SPEC_FULL SS4.7).

/// Conservative ceiling mirroring the reference implementation's C `long`
/// bookkeeping limit (`(1 << 63) - 1` on a 64-bit platform with a signed
/// `long`), so the same fallback-entry threshold applies regardless of host
/// pointer width.
pub const MAX_ENGINE_VALUE: i64 = i64::MAX;

/// Internal signal that an accumulator would exceed [`MAX_ENGINE_VALUE`].
///
/// Deliberately not `std::error::Error`: the propagation policy (SPEC_FULL
/// SS7) is that overflow is caught only at the boundary between the public
/// entry point and the engine, never surfaced to the caller. Keeping this
/// type out of the public error enum makes that policy a compile-time
/// guarantee rather than a convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Overflow;

pub(crate) type CheckedResult<T> = std::result::Result<T, Overflow>;

#[inline]
pub(crate) fn checked_add(a: i64, b: i64) -> CheckedResult<i64> {
    a.checked_add(b).filter(|&v| v >= 0 && v <= MAX_ENGINE_VALUE).ok_or(Overflow)
}

#[inline]
pub(crate) fn checked_mul(a: i64, b: i64) -> CheckedResult<i64> {
    a.checked_mul(b).filter(|&v| v >= 0 && v <= MAX_ENGINE_VALUE).ok_or(Overflow)
}

/// Sums `values`, failing fast with [`Overflow`] the moment the running total
/// would exceed the engine's range.
pub(crate) fn checked_sum(values: impl IntoIterator<Item = i64>) -> CheckedResult<i64> {
    let mut total: i64 = 0;
    for v in values {
        total = checked_add(total, v)?;
    }
    Ok(total)
}
