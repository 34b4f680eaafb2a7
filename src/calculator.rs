//! # Sleep Duration Calculation
//!
//! Turns a bedtime and a wake time into a whole number of hours.
//!
//! ## Validation Order
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. **Hours**: both hour fields must be in `0..=23` → [`SleepError::InvalidHour`]
//! 2. **Interval**: both time points are resolved on the local clock and the
//!    wake time must come strictly after the bedtime → [`SleepError::InvalidInterval`]
//!
//! ## Rounding
//!
//! The span is measured in milliseconds and rounded half up to whole hours, so
//! 2h30m counts as 3 hours. A span that rounds to zero is rejected as an
//! invalid interval.
//!
//! ## Local Time
//!
//! Time points are wall-clock readings. They are resolved in a caller-chosen
//! [`TimeZone`] (the system zone for [`compute_sleep_duration`]), which makes
//! a night across a daylight-saving change one hour shorter or longer:
//! - **Ambiguous** readings (clocks going back) resolve to the earlier instant
//! - **Skipped** readings (clocks going forward) are pushed past the gap

use crate::{Hours, SleepInterval, TimePoint};
use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MS_PER_HOUR: i64 = 3_600_000;

/// Reasons a calculation can be refused.
///
/// Both are user-correctable: the caller reports the problem and keeps the
/// form as it was.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepError {
    /// An hour field is outside 0-23
    #[error("hour must be between 0 and 23")]
    InvalidHour,

    /// The wake time is not after the bedtime (or no span could be computed)
    #[error("wake up time must be after bedtime")]
    InvalidInterval,
}

/// Compute the hours slept between two date/hour pairs on the local clock.
///
/// Dates are ISO `YYYY-MM-DD` strings as a date input field produces them.
///
/// # Example
/// ```
/// use sleep_calc_lib::{compute_sleep_duration_in, SleepError};
/// use chrono::Utc;
///
/// assert_eq!(compute_sleep_duration_in(&Utc, "2024-01-01", 22, "2024-01-02", 6), Ok(8));
/// assert_eq!(
///     compute_sleep_duration_in(&Utc, "2024-01-01", 24, "2024-01-02", 6),
///     Err(SleepError::InvalidHour)
/// );
/// ```
pub fn compute_sleep_duration(
    bed_date: &str,
    bed_hour: i64,
    wake_date: &str,
    wake_hour: i64,
) -> Result<Hours, SleepError> {
    compute_sleep_duration_in(&Local, bed_date, bed_hour, wake_date, wake_hour)
}

/// Same as [`compute_sleep_duration`], resolving wall-clock times in `tz`.
pub fn compute_sleep_duration_in<Tz: TimeZone>(
    tz: &Tz,
    bed_date: &str,
    bed_hour: i64,
    wake_date: &str,
    wake_hour: i64,
) -> Result<Hours, SleepError> {
    if crate::checked_hour(bed_hour).is_none() || crate::checked_hour(wake_hour).is_none() {
        debug!("rejecting hours bed={bed_hour} wake={wake_hour}");
        return Err(SleepError::InvalidHour);
    }

    let interval = SleepInterval {
        bed: TimePoint::new(parse_date(bed_date)?, bed_hour)?,
        wake: TimePoint::new(parse_date(wake_date)?, wake_hour)?,
    };
    interval.hours_in(tz)
}

/// Parse a date field. An unreadable date leaves nothing to measure.
pub fn parse_date(input: &str) -> Result<NaiveDate, SleepError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        debug!("unparseable date field {input:?}");
        SleepError::InvalidInterval
    })
}

impl SleepInterval {
    /// Build an interval from typed dates and raw hour fields.
    pub fn new(
        bed_date: NaiveDate,
        bed_hour: i64,
        wake_date: NaiveDate,
        wake_hour: i64,
    ) -> Result<Self, SleepError> {
        Ok(Self {
            bed: TimePoint::new(bed_date, bed_hour)?,
            wake: TimePoint::new(wake_date, wake_hour)?,
        })
    }

    /// Whole hours between bedtime and wake time on the local clock.
    pub fn hours(&self) -> Result<Hours, SleepError> {
        self.hours_in(&Local)
    }

    /// Whole hours between bedtime and wake time, resolved in `tz`.
    pub fn hours_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<Hours, SleepError> {
        let bed = resolve_local(tz, self.bed.naive()).ok_or(SleepError::InvalidInterval)?;
        let wake = resolve_local(tz, self.wake.naive()).ok_or(SleepError::InvalidInterval)?;

        let span_ms = wake.signed_duration_since(bed).num_milliseconds();
        let hours = round_hours(span_ms).ok_or(SleepError::InvalidInterval)?;
        debug!(
            "{} -> {}: {span_ms} ms, {hours} h",
            self.bed.naive(),
            self.wake.naive()
        );
        Ok(hours)
    }
}

/// Round a millisecond span half up to whole hours.
///
/// Returns `None` for spans that are not positive or that round to zero.
pub fn round_hours(span_ms: i64) -> Option<Hours> {
    if span_ms <= 0 {
        return None;
    }
    let hours = span_ms.saturating_add(MS_PER_HOUR / 2) / MS_PER_HOUR;
    Hours::try_from(hours).ok().filter(|h| *h > 0)
}

/// Map a wall-clock reading onto an instant in `tz`.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Some(instant),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        // reading fell into a forward gap; gaps are one hour in practice
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest(),
    }
}
