//! Shared primitive types used across the whole pipeline.

/// 1-based position of a record in the feed.
pub type RecordIndex = u64;

/// Error intensity knob, inclusive range `0..=MAX_ERROR_INTENSITY`.
pub type ErrorIntensity = u8;

pub const MAX_ERROR_INTENSITY: ErrorIntensity = 10;

/// Generation epoch. Bumped on every (re)initialization so that pages
/// reserved under an older configuration can be recognised as stale.
pub type Epoch = u64;
