use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

fn sleep_calc(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("sleep-calc");
    cmd.env("TZ", "UTC")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.join("sleep-config.toml"));
    cmd
}

#[test]
fn calc_prints_hours_in_default_language() {
    let dir = tempdir().expect("tempdir");
    sleep_calc(dir.path())
        .args(["calc", "--now", "2024-01-01T08:00"])
        .args(["--bed-date", "2024-01-01", "--bed-hour", "22"])
        .args(["--wake-date", "2024-01-02", "--wake-hour", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Calcola ore di sonno"))
        .stdout(predicate::str::contains("8 ore"));
}

#[test]
fn calc_single_hour_in_english() {
    let dir = tempdir().expect("tempdir");
    sleep_calc(dir.path())
        .args(["calc", "--now", "2024-01-01T08:00", "--lang", "en"])
        .args(["--bed-date", "2024-01-01", "--bed-hour", "23"])
        .args(["--wake-date", "2024-01-02", "--wake-hour", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("One hour"));
}

#[test]
fn calc_reversed_interval_fails_with_message() {
    let dir = tempdir().expect("tempdir");
    sleep_calc(dir.path())
        .args(["calc", "--now", "2024-01-01T08:00", "--lang", "en"])
        .args(["--bed-date", "2024-01-01", "--bed-hour", "10"])
        .args(["--wake-date", "2024-01-01", "--wake-hour", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wake up time must be after bedtime!"));
}

#[test]
fn calc_invalid_hour_reports_json_error() {
    let dir = tempdir().expect("tempdir");
    sleep_calc(dir.path())
        .args(["calc", "--json", "--now", "2024-01-01T08:00"])
        .args(["--bed-date", "2024-01-01", "--bed-hour", "24"])
        .args(["--wake-date", "2024-01-02", "--wake-hour", "-1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"error\": \"invalid_hour\""))
        .stdout(predicate::str::contains("Inserisci un orario valido (0-23)!"));
}

#[test]
fn calc_seeds_missing_bedtime_from_now() {
    let dir = tempdir().expect("tempdir");
    sleep_calc(dir.path())
        .args(["calc", "--json", "--now", "2024-03-10T22:30", "--wake-hour", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bed_date\": \"2024-03-10\""))
        .stdout(predicate::str::contains("\"bed_hour\": 23"))
        .stdout(predicate::str::contains("\"wake_date\": \"2024-03-11\""))
        .stdout(predicate::str::contains("\"hours\": 8"));
}

#[test]
fn calc_later_bed_date_drags_wake_date() {
    let dir = tempdir().expect("tempdir");
    sleep_calc(dir.path())
        .args(["calc", "--json", "--now", "2024-03-10T10:00"])
        .args(["--bed-date", "2024-03-15", "--bed-hour", "1", "--wake-hour", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bed_date\": \"2024-03-15\""))
        .stdout(predicate::str::contains("\"wake_date\": \"2024-03-15\""))
        .stdout(predicate::str::contains("\"hours\": 7"));
}

#[test]
fn calc_raises_past_dates_to_today() {
    let dir = tempdir().expect("tempdir");
    sleep_calc(dir.path())
        .args(["calc", "--json", "--now", "2024-03-10T10:00"])
        .args(["--bed-date", "2024-03-01", "--bed-hour", "22"])
        .args(["--wake-date", "2024-02-01", "--wake-hour", "23"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bed_date\": \"2024-03-10\""))
        .stdout(predicate::str::contains("\"wake_date\": \"2024-03-10\""))
        .stdout(predicate::str::contains("\"hours\": 1"));
}

#[test]
fn calc_rejects_malformed_date_as_usage_error() {
    let dir = tempdir().expect("tempdir");
    sleep_calc(dir.path())
        .args(["calc", "--bed-date", "2024-13-01", "--wake-hour", "6"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--bed-date"));
}

#[test]
fn defaults_text_labels_are_translated() {
    let dir = tempdir().expect("tempdir");
    sleep_calc(dir.path())
        .args(["defaults", "--now", "2024-03-10T21:15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Prima data di andata a dormire: 2024-03-10"))
        .stdout(predicate::str::contains("Prima data di sveglia: 2024-03-10"))
        .stdout(predicate::str::contains("min ").not());
}

#[test]
fn defaults_roll_over_past_midnight() {
    let dir = tempdir().expect("tempdir");
    sleep_calc(dir.path())
        .args(["defaults", "--json", "--now", "2024-03-10T23:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"bed_date\": \"2024-03-11\""))
        .stdout(predicate::str::contains("\"bed_hour\": 0"))
        .stdout(predicate::str::contains("\"wake_date\": \"2024-03-12\""));
}

#[test]
fn malformed_now_fails_with_clear_error() {
    let dir = tempdir().expect("tempdir");
    sleep_calc(dir.path())
        .args(["defaults", "--now", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --now"));
}

#[test]
fn theme_toggle_persists() {
    let dir = tempdir().expect("tempdir");
    sleep_calc(dir.path())
        .args(["theme"])
        .assert()
        .success()
        .stdout("light\n");
    sleep_calc(dir.path())
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout("dark\n");
    sleep_calc(dir.path())
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout("dark\n");

    let stored = fs::read_to_string(dir.path().join("sleep-prefs.toml")).expect("prefs file");
    assert!(stored.contains("theme = \"dark\""));
}

#[test]
fn malformed_prefs_file_is_reported_and_kept() {
    let dir = tempdir().expect("tempdir");
    let prefs = dir.path().join("sleep-prefs.toml");
    let damaged = "language = \"en\"\nnot a toml line\n";
    fs::write(&prefs, damaged).expect("write prefs");

    sleep_calc(dir.path())
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout("dark\n")
        .stderr(predicate::str::contains("malformed preference file"));

    let backup = fs::read_to_string(dir.path().join("sleep-prefs.toml.bak")).expect("backup");
    assert_eq!(backup, damaged);
}

#[test]
fn log_filter_can_silence_warnings() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("sleep-prefs.toml"), "= =").expect("write prefs");

    sleep_calc(dir.path())
        .env("RUST_LOG", "off")
        .args(["theme"])
        .assert()
        .success()
        .stderr("");
}

#[test]
fn language_toggle_changes_calc_output() {
    let dir = tempdir().expect("tempdir");
    sleep_calc(dir.path())
        .args(["lang", "toggle"])
        .assert()
        .success()
        .stdout("en\n");
    sleep_calc(dir.path())
        .args(["calc", "--now", "2024-01-01T08:00"])
        .args(["--bed-date", "2024-01-01", "--bed-hour", "22"])
        .args(["--wake-date", "2024-01-02", "--wake-hour", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8 hours"));
}

#[test]
fn configured_defaults_apply_before_first_toggle() {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("sleep-config.toml"),
        "[storage]\npath = \"state/prefs.toml\"\n\n[defaults]\nlanguage = \"en\"\ntheme = \"dark\"\n",
    )
    .expect("write config");

    sleep_calc(dir.path())
        .args(["lang"])
        .assert()
        .success()
        .stdout("en\n");
    sleep_calc(dir.path())
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout("light\n");
    assert!(dir.path().join("state").join("prefs.toml").exists());
}
