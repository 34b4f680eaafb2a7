//! # Default Form Values
//!
//! Proposes a bedtime and wake date when the form is first shown, so the user
//! starts from a working example instead of empty fields.
//!
//! ## Rules
//!
//! - **Bedtime** is the next whole hour. At 23:xx that is midnight, which moves
//!   the bed date to tomorrow (the *rollover* case).
//! - **Wake date** is tomorrow for an evening bedtime (18-23), the day after
//!   tomorrow after a rollover, and the bed date otherwise.
//! - **Floors**: the bed date may not precede today and the wake date may not
//!   precede the bed date.
//!
//! The wake hour is left for the user to fill in.

use chrono::{Days, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// First bed hour that counts as an evening bedtime.
const EVENING_START_HOUR: u32 = 18;

/// Initial form values derived from the current time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededDefaults {
    /// Local calendar date of the seeding timestamp
    pub today: NaiveDate,
    pub bed_date: NaiveDate,
    pub bed_hour: u32,
    pub wake_date: NaiveDate,
    /// Earliest date the bed date field accepts (always `today`)
    pub min_bed_date: NaiveDate,
    /// Earliest date the wake date field accepts (always `bed_date`)
    pub min_wake_date: NaiveDate,
}

/// Derive initial form values from a local wall-clock timestamp.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use sleep_calc_lib::seed_defaults;
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap().and_hms_opt(22, 30, 0).unwrap();
/// let seeded = seed_defaults(now);
///
/// assert_eq!(seeded.bed_hour, 23);
/// assert_eq!(seeded.bed_date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
/// assert_eq!(seeded.wake_date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
/// ```
pub fn seed_defaults(now: NaiveDateTime) -> SeededDefaults {
    let today = now.date();
    let candidate_hour = now.hour() + 1;

    let (bed_date, bed_hour, wake_date) = if candidate_hour > crate::MAX_HOUR {
        (days_after(today, 1), 0, days_after(today, 2))
    } else if candidate_hour >= EVENING_START_HOUR {
        (today, candidate_hour, days_after(today, 1))
    } else {
        (today, candidate_hour, today)
    };

    SeededDefaults {
        today,
        bed_date,
        bed_hour,
        wake_date,
        min_bed_date: today,
        min_wake_date: bed_date,
    }
}

/// Seed from the system clock.
pub fn seed_defaults_now() -> SeededDefaults {
    seed_defaults(Local::now().naive_local())
}

/// `date` moved forward by `n` days, saturating at the end of the calendar.
fn days_after(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_add_days(Days::new(n)).unwrap_or(NaiveDate::MAX)
}
