//! # Sleep Calc Application Entry Point
//!
//! This binary crate is the terminal front end of the calculator. Each invocation
//! handles one event: show the seeded defaults, run one calculation, or show or
//! flip one stored preference.


use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sleep_calc_lib::config::{Config, DEFAULT_CONFIG_PATH};
use sleep_calc_lib::form::SleepForm;
use sleep_calc_lib::preferences::{FileStore, Language, Preferences};
use sleep_calc_lib::renderer::{draw_ascii, Fields, View};
use sleep_calc_lib::session::Session;
use sleep_calc_lib::{seed_defaults, Hours, SleepError};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sleep-calc",
    version,
    about = "Calculate hours of sleep between a bedtime and a wake time"
)]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Disable theme colours
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the values the form starts with
    Defaults {
        /// Local time to seed from (YYYY-MM-DDTHH:MM), defaults to now
        #[arg(long)]
        now: Option<String>,
        /// Language for this output only
        #[arg(long)]
        lang: Option<Language>,
        #[arg(long)]
        json: bool,
    },
    /// Calculate hours of sleep; omitted fields are seeded from now
    Calc {
        /// Bedtime date (YYYY-MM-DD), raised to today if earlier
        #[arg(long)]
        bed_date: Option<NaiveDate>,
        #[arg(long, allow_negative_numbers = true)]
        bed_hour: Option<i64>,
        /// Wake up date (YYYY-MM-DD), raised to the bedtime date if earlier
        #[arg(long)]
        wake_date: Option<NaiveDate>,
        #[arg(long, allow_negative_numbers = true)]
        wake_hour: i64,
        #[arg(long)]
        now: Option<String>,
        #[arg(long)]
        lang: Option<Language>,
        #[arg(long)]
        json: bool,
    },
    /// Show or flip the colour theme
    Theme {
        #[arg(value_enum, default_value_t = Action::Show)]
        action: Action,
    },
    /// Show or flip the display language
    Lang {
        #[arg(value_enum, default_value_t = Action::Show)]
        action: Action,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Action {
    Show,
    Toggle,
}

/// Machine-readable result of `calc --json`.
#[derive(Serialize, Debug)]
struct CalcReport {
    bed_date: NaiveDate,
    bed_hour: i64,
    wake_date: NaiveDate,
    wake_hour: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hours: Option<Hours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<SleepError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

/// Main application entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::load_from_path(&cli.config);
    let mut prefs = config.open_preferences(config_dir(&cli.config));
    let color = !cli.no_color && std::io::stdout().is_terminal();

    match cli.command {
        Command::Defaults { now, lang, json } => {
            let seeded = seed_defaults(parse_now(now.as_deref())?);
            if json {
                println!("{}", serde_json::to_string_pretty(&seeded)?);
                return Ok(ExitCode::SUCCESS);
            }

            let t = lang.unwrap_or(prefs.language()).translations();
            println!("{}: {}", t.bed_date_label, seeded.bed_date);
            println!("{}: {}", t.bed_time_label, seeded.bed_hour);
            println!("{}: {}", t.wake_date_label, seeded.wake_date);
            println!("{}: {}", t.min_bed_date_label, seeded.min_bed_date);
            println!("{}: {}", t.min_wake_date_label, seeded.min_wake_date);
            Ok(ExitCode::SUCCESS)
        }
        Command::Calc {
            bed_date,
            bed_hour,
            wake_date,
            wake_hour,
            now,
            lang,
            json,
        } => {
            let language = lang.unwrap_or(prefs.language());
            let theme = prefs.theme();
            let t = language.translations();

            // fields are applied in form order so the date floors hold
            let form = SleepForm::seeded(parse_now(now.as_deref())?);
            let mut session = Session::new(prefs, form);
            let form = session.form_mut();
            if let Some(date) = bed_date {
                form.set_bed_date(date);
            }
            if let Some(hour) = bed_hour {
                form.set_bed_hour(hour);
            }
            if let Some(date) = wake_date {
                form.set_wake_date(date);
            }
            form.set_wake_hour(wake_hour);

            let outcome = session.submit();
            let form = session.form();

            if json {
                let report = CalcReport {
                    bed_date: form.bed_date(),
                    bed_hour: form.bed_hour(),
                    wake_date: form.wake_date(),
                    wake_hour: form.wake_hour(),
                    hours: outcome.ok(),
                    error: outcome.err(),
                    message: outcome.err().map(|e| t.error_message(e)),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(exit_code(&outcome));
            }

            // the toast goes to stderr rather than under the card
            let view = View::build(
                &Fields::from(form),
                session.last_result(),
                None,
                language,
                theme,
            );
            draw_ascii(&view, color);
            if let Some(e) = session.toast() {
                eprintln!("{}", t.error_message(e));
            }
            Ok(exit_code(&outcome))
        }
        Command::Theme { action } => {
            let theme = match action {
                Action::Show => prefs.theme(),
                Action::Toggle => prefs
                    .toggle_theme()
                    .with_context(|| save_failure(&prefs))?,
            };
            println!("{theme}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Lang { action } => {
            let language = match action {
                Action::Show => prefs.language(),
                Action::Toggle => prefs
                    .toggle_language()
                    .with_context(|| save_failure(&prefs))?,
            };
            println!("{language}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Send library warnings to stderr; `RUST_LOG` overrides the `warn` default.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn save_failure(prefs: &Preferences<FileStore>) -> String {
    format!(
        "failed to save preferences to {}",
        prefs.store().path().display()
    )
}

fn exit_code(outcome: &Result<Hours, SleepError>) -> ExitCode {
    if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Directory relative store paths are resolved against.
fn config_dir(config: &Path) -> &Path {
    config
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

/// Parse a `--now` override, or read the local clock.
fn parse_now(input: Option<&str>) -> Result<NaiveDateTime> {
    let Some(text) = input else {
        return Ok(Local::now().naive_local());
    };
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .with_context(|| format!("invalid --now '{text}', expected YYYY-MM-DDTHH:MM"))
}
