//! Form state for the calculator: the four input fields plus the date floors
//! that keep the wake date from ever preceding the bed date.

use crate::calculator::SleepError;
use crate::defaults::{seed_defaults, SeededDefaults};
use crate::{Hours, SleepInterval};
use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;

/// Current field values of the calculator form.
///
/// Hour fields keep whatever the user typed; they are only validated when the
/// form is submitted. Date fields are clamped to their floors on every change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SleepForm {
    min_bed_date: NaiveDate,
    min_wake_date: NaiveDate,
    bed_date: NaiveDate,
    bed_hour: i64,
    wake_date: NaiveDate,
    wake_hour: Option<i64>,
}

impl From<SeededDefaults> for SleepForm {
    fn from(seeded: SeededDefaults) -> Self {
        Self {
            min_bed_date: seeded.min_bed_date,
            min_wake_date: seeded.min_wake_date,
            bed_date: seeded.bed_date,
            bed_hour: i64::from(seeded.bed_hour),
            wake_date: seeded.wake_date,
            wake_hour: None,
        }
    }
}

impl SleepForm {
    /// A form pre-filled from the given local timestamp.
    pub fn seeded(now: NaiveDateTime) -> Self {
        seed_defaults(now).into()
    }

    pub fn bed_date(&self) -> NaiveDate {
        self.bed_date
    }

    pub fn bed_hour(&self) -> i64 {
        self.bed_hour
    }

    pub fn wake_date(&self) -> NaiveDate {
        self.wake_date
    }

    pub fn wake_hour(&self) -> Option<i64> {
        self.wake_hour
    }

    pub fn min_bed_date(&self) -> NaiveDate {
        self.min_bed_date
    }

    pub fn min_wake_date(&self) -> NaiveDate {
        self.min_wake_date
    }

    /// Change the bed date, dragging the wake date along if it would fall behind.
    pub fn set_bed_date(&mut self, date: NaiveDate) {
        self.bed_date = date.max(self.min_bed_date);
        self.min_wake_date = self.bed_date;
        if self.wake_date < self.bed_date {
            self.wake_date = self.bed_date;
        }
    }

    pub fn set_bed_hour(&mut self, hour: i64) {
        self.bed_hour = hour;
        self.min_wake_date = self.bed_date;
    }

    /// Change the wake date; dates before the bed date are raised to it.
    pub fn set_wake_date(&mut self, date: NaiveDate) {
        self.wake_date = date.max(self.min_wake_date);
    }

    pub fn set_wake_hour(&mut self, hour: i64) {
        self.wake_hour = Some(hour);
    }

    /// The interval described by the form, if both hours are valid.
    pub fn interval(&self) -> Result<SleepInterval, SleepError> {
        let wake_hour = self.wake_hour.ok_or(SleepError::InvalidHour)?;
        SleepInterval::new(self.bed_date, self.bed_hour, self.wake_date, wake_hour)
    }

    /// Run the calculation on the local clock.
    pub fn calculate(&self) -> Result<Hours, SleepError> {
        self.calculate_in(&Local)
    }

    pub fn calculate_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<Hours, SleepError> {
        self.interval()?.hours_in(tz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn evening_form() -> SleepForm {
        SleepForm::seeded(date(2024, 3, 10).and_hms_opt(22, 30, 0).unwrap())
    }

    #[test]
    fn seeded_form_leaves_wake_hour_empty() {
        let form = evening_form();
        assert_eq!(form.bed_hour(), 23);
        assert_eq!(form.wake_hour(), None);
        assert_eq!(form.calculate_in(&Utc), Err(SleepError::InvalidHour));
    }

    #[test]
    fn seeded_form_calculates_once_wake_hour_is_set() {
        let mut form = evening_form();
        form.set_wake_hour(7);
        assert_eq!(form.calculate_in(&Utc), Ok(8));
    }

    #[test]
    fn moving_bed_date_past_wake_date_drags_wake_date() {
        let mut form = evening_form();
        form.set_bed_date(date(2024, 3, 15));
        assert_eq!(form.bed_date(), date(2024, 3, 15));
        assert_eq!(form.wake_date(), date(2024, 3, 15));
        assert_eq!(form.min_wake_date(), date(2024, 3, 15));
    }

    #[test]
    fn moving_bed_date_back_keeps_later_wake_date() {
        let mut form = evening_form();
        form.set_wake_date(date(2024, 3, 20));
        form.set_bed_date(date(2024, 3, 12));
        assert_eq!(form.wake_date(), date(2024, 3, 20));
        assert_eq!(form.min_wake_date(), date(2024, 3, 12));
    }

    #[test]
    fn bed_date_cannot_precede_today() {
        let mut form = evening_form();
        form.set_bed_date(date(2024, 3, 1));
        assert_eq!(form.bed_date(), date(2024, 3, 10));
    }

    #[test]
    fn wake_date_cannot_precede_bed_date() {
        let mut form = evening_form();
        form.set_bed_date(date(2024, 3, 12));
        form.set_wake_date(date(2024, 3, 11));
        assert_eq!(form.wake_date(), date(2024, 3, 12));
    }

    #[test]
    fn bed_hour_is_checked_on_submit_only() {
        let mut form = evening_form();
        form.set_bed_hour(30);
        form.set_wake_hour(7);
        assert_eq!(form.bed_hour(), 30);
        assert_eq!(form.calculate_in(&Utc), Err(SleepError::InvalidHour));
    }

    #[test]
    fn same_day_wake_before_bed_is_rejected() {
        let mut form = evening_form();
        form.set_wake_date(date(2024, 3, 10));
        form.set_wake_hour(6);
        assert_eq!(form.calculate_in(&Utc), Err(SleepError::InvalidInterval));
    }
}
