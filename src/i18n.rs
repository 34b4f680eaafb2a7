//! # Translations
//!
//! Italian and English string tables for every piece of text the calculator
//! shows, plus the small formatting rules that depend on them.

use crate::calculator::SleepError;
use crate::preferences::Language;
use crate::Hours;

/// Every user-facing string for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translations {
    pub title: &'static str,
    pub bed_date_label: &'static str,
    pub bed_time_label: &'static str,
    pub wake_date_label: &'static str,
    pub wake_time_label: &'static str,
    pub min_bed_date_label: &'static str,
    pub min_wake_date_label: &'static str,
    pub calculate_button: &'static str,
    pub result_title: &'static str,
    pub hours_text: &'static str,
    pub one_hour_text: &'static str,
    pub error_invalid_time: &'static str,
    pub error_invalid_hour: &'static str,
}

const ITALIAN: Translations = Translations {
    title: "Calcola ore di sonno",
    bed_date_label: "Data di andata a dormire",
    bed_time_label: "Orario di andata a dormire (ora)",
    wake_date_label: "Data di sveglia",
    wake_time_label: "Orario di sveglia (ora)",
    min_bed_date_label: "Prima data di andata a dormire",
    min_wake_date_label: "Prima data di sveglia",
    calculate_button: "Calcola",
    result_title: "Durata del sonno",
    hours_text: "ore",
    one_hour_text: "Un'ora",
    error_invalid_time: "L'orario di sveglia deve essere successivo all'orario di andata a dormire!",
    error_invalid_hour: "Inserisci un orario valido (0-23)!",
};

const ENGLISH: Translations = Translations {
    title: "Sleep Hours Calculator",
    bed_date_label: "Bedtime date",
    bed_time_label: "Bedtime (hour)",
    wake_date_label: "Wake up date",
    wake_time_label: "Wake up time (hour)",
    min_bed_date_label: "Earliest bedtime date",
    min_wake_date_label: "Earliest wake up date",
    calculate_button: "Calculate",
    result_title: "Sleep Duration",
    hours_text: "hours",
    one_hour_text: "One hour",
    error_invalid_time: "Wake up time must be after bedtime!",
    error_invalid_hour: "Enter a valid time (0-23)!",
};

impl Language {
    /// The string table for this language.
    pub fn translations(self) -> &'static Translations {
        match self {
            Language::It => &ITALIAN,
            Language::En => &ENGLISH,
        }
    }
}

impl Translations {
    /// "One hour" for a single hour, "8 hours" otherwise.
    pub fn format_hours(&self, hours: Hours) -> String {
        if hours == 1 {
            self.one_hour_text.to_string()
        } else {
            format!("{} {}", hours, self.hours_text)
        }
    }

    /// Message shown to the user for a refused calculation.
    pub fn error_message(&self, error: SleepError) -> &'static str {
        match error {
            SleepError::InvalidHour => self.error_invalid_hour,
            SleepError::InvalidInterval => self.error_invalid_time,
        }
    }
}
