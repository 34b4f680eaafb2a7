//! # Sleep Calc Core Library
//!
//! This library provides the data structures and logic behind the sleep hours
//! calculator: a small form that takes a bedtime and a wake time, each given as
//! a calendar date plus a whole hour, and reports how many hours of sleep lie
//! between them.
//!
//! ## Design Philosophy
//!
//! ### Pure core
//! - **Calculation**: [`calculator::compute_sleep_duration`] is a pure function of its
//!   four inputs. Calling it twice with the same values yields the same answer.
//! - **Seeding**: [`defaults::seed_defaults`] derives the initial form values from a
//!   timestamp passed in by the caller, never from the system clock directly.
//!
//! ### Explicit state
//! Theme and language live in [`preferences::Preferences`], which is loaded from a
//! key/value store at startup and writes through on every change. The text shown
//! to the user is recomputed from `(last result, language)` by
//! [`renderer::View::build`] rather than patched in place.
//!
//! ### Data Flow
//! 1. **Startup**: load [`config::Config`] → open the preference store → seed the form
//! 2. **Submit**: validate hours → resolve both local time points → round the span
//! 3. **Display**: build a [`renderer::View`] in the current language and render it
//!
//! ## Core Types
//!
//! - [`TimePoint`]: a local calendar date plus an hour of day
//! - [`SleepInterval`]: a bedtime / wake time pair
//! - [`Hours`]: the whole-hour result of a successful calculation

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

pub mod calculator;
pub mod config;
pub mod defaults;
pub mod form;
pub mod i18n;
pub mod preferences;
pub mod renderer;
pub mod session;

pub use calculator::{compute_sleep_duration, compute_sleep_duration_in, SleepError};
pub use defaults::{seed_defaults, SeededDefaults};

/// Whole hours of sleep. A successful calculation never yields zero.
pub type Hours = u32;

/// Highest hour of day accepted for a time point.
pub const MAX_HOUR: u32 = 23;

/// A local calendar date combined with an hour of day.
///
/// Minutes and seconds are always zero. The hour is guaranteed to be in
/// `0..=23` because the only constructor checks it.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use sleep_calc_lib::TimePoint;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let bedtime = TimePoint::new(date, 22).unwrap();
/// assert_eq!(bedtime.hour(), 22);
///
/// assert!(TimePoint::new(date, 24).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimePoint {
    date: NaiveDate,
    hour: u32,
}

impl TimePoint {
    /// Build a time point, rejecting hours outside `0..=23`.
    pub fn new(date: NaiveDate, hour: i64) -> Result<Self, SleepError> {
        let hour = checked_hour(hour).ok_or(SleepError::InvalidHour)?;
        Ok(Self { date, hour })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// The wall-clock reading this point stands for, with zero minutes.
    pub fn naive(&self) -> NaiveDateTime {
        // hour is kept in 0..=23 by `new`, so the time is always valid
        let time = NaiveTime::from_hms_opt(self.hour, 0, 0).unwrap_or_default();
        self.date.and_time(time)
    }
}

/// Convert a raw hour field into an hour of day, if it is one.
pub fn checked_hour(hour: i64) -> Option<u32> {
    u32::try_from(hour).ok().filter(|h| *h <= MAX_HOUR)
}

/// A bedtime / wake time pair as entered by the user.
///
/// The pair itself is not checked for ordering; [`SleepInterval::hours_in`]
/// rejects intervals where the wake time does not come strictly after the
/// bedtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SleepInterval {
    /// When the user goes to bed
    pub bed: TimePoint,
    /// When the user wakes up
    pub wake: TimePoint,
}
