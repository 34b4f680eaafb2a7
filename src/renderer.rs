//! # Calculator Rendering
//!
//! Builds the text the user sees from explicit inputs and draws it as a framed
//! card in the terminal.
//!
//! A [`View`] is a pure function of the form fields, the last computed result,
//! the language and the theme. Switching language therefore only means
//! building a new view; the cached result is re-labelled without being
//! recomputed. Errors show up as a transient toast under the card and never
//! replace a result that is already on screen.

use crate::calculator::SleepError;
use crate::form::SleepForm;
use crate::preferences::{Language, Theme};
use crate::Hours;

/// Minimum inner width of the card, in characters.
const CARD_WIDTH: usize = 40;

const RESET: &str = "\x1b[0m";

/// The result section of the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub title: String,
    pub text: String,
}

/// Field values as displayed, before translation of their labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields {
    pub bed_date: String,
    pub bed_hour: String,
    pub wake_date: String,
    pub wake_hour: String,
}

impl From<&SleepForm> for Fields {
    fn from(form: &SleepForm) -> Self {
        Fields {
            bed_date: form.bed_date().to_string(),
            bed_hour: form.bed_hour().to_string(),
            wake_date: form.wake_date().to_string(),
            wake_hour: form
                .wake_hour()
                .map(|h| h.to_string())
                .unwrap_or_else(|| "--".to_string()),
        }
    }
}

/// Everything shown on screen, already translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub language: Language,
    pub theme: Theme,
    pub title: String,
    /// Label / value pairs in form order
    pub fields: Vec<(String, String)>,
    pub button: String,
    /// Present once a calculation has succeeded
    pub result: Option<ResultCard>,
    /// Transient error message
    pub toast: Option<String>,
}

impl View {
    pub fn build(
        fields: &Fields,
        last_result: Option<Hours>,
        toast: Option<SleepError>,
        language: Language,
        theme: Theme,
    ) -> Self {
        let t = language.translations();

        View {
            language,
            theme,
            title: t.title.to_string(),
            fields: vec![
                (t.bed_date_label.to_string(), fields.bed_date.clone()),
                (t.bed_time_label.to_string(), fields.bed_hour.clone()),
                (t.wake_date_label.to_string(), fields.wake_date.clone()),
                (t.wake_time_label.to_string(), fields.wake_hour.clone()),
            ],
            button: t.calculate_button.to_string(),
            result: last_result.map(|hours| ResultCard {
                title: t.result_title.to_string(),
                text: t.format_hours(hours),
            }),
            toast: toast.map(|e| t.error_message(e).to_string()),
        }
    }

    /// Card body lines without framing.
    fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.clone(), String::new()];
        for (label, value) in &self.fields {
            lines.push(format!("{label}: {value}"));
        }
        lines.push(String::new());
        lines.push(format!("[ {} ]", self.button));
        if let Some(result) = &self.result {
            lines.push(String::new());
            lines.push(result.title.clone());
            lines.push(result.text.clone());
        }
        lines
    }
}

/// Render a view as a framed card, optionally coloured for its theme.
pub fn render_text(view: &View, color: bool) -> String {
    let lines = view.lines();
    let width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(CARD_WIDTH);

    let mut rows = Vec::with_capacity(lines.len() + 2);
    rows.push(format!("┌{}┐", "─".repeat(width + 2)));
    for line in &lines {
        let pad = width - line.chars().count();
        rows.push(format!("│ {}{} │", line, " ".repeat(pad)));
    }
    rows.push(format!("└{}┘", "─".repeat(width + 2)));

    let (prefix, suffix) = if color {
        (palette(view.theme), RESET)
    } else {
        ("", "")
    };

    let mut out = String::new();
    for row in rows {
        out.push_str(prefix);
        out.push_str(&row);
        out.push_str(suffix);
        out.push('\n');
    }
    if let Some(toast) = &view.toast {
        out.push_str(&format!("⚠ {toast}\n"));
    }
    out
}

/// Print a view to stdout.
pub fn draw_ascii(view: &View, color: bool) {
    print!("{}", render_text(view, color));
}

/// ANSI colours for each theme.
fn palette(theme: Theme) -> &'static str {
    match theme {
        // light text on black
        Theme::Dark => "\x1b[97;40m",
        // black text on light grey
        Theme::Light => "\x1b[30;47m",
    }
}
