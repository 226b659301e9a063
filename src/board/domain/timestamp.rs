//! Timestamp capture for board entities.

use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;

/// Fractional-second digits kept on recorded timestamps.
///
/// Matches the microsecond resolution of `TIMESTAMPTZ`, so an entity returned
/// from a write compares equal to the same entity read back from storage.
pub const TIMESTAMP_PRECISION_DIGITS: u16 = 6;

/// Reads the current UTC time truncated to [`TIMESTAMP_PRECISION_DIGITS`].
#[must_use]
pub fn recorded_now(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(TIMESTAMP_PRECISION_DIGITS)
}
