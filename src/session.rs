//! A calculator session: the form, the user's preferences and what is
//! currently on screen, driven one event at a time.

use crate::calculator::SleepError;
use crate::form::SleepForm;
use crate::preferences::{Language, PreferenceStore, Preferences, StoreError, Theme};
use crate::renderer::{Fields, View};
use crate::Hours;
use chrono::{Local, TimeZone};
use log::debug;

pub struct Session<S: PreferenceStore> {
    preferences: Preferences<S>,
    form: SleepForm,
    last_result: Option<Hours>,
    toast: Option<SleepError>,
}

impl<S: PreferenceStore> Session<S> {
    pub fn new(preferences: Preferences<S>, form: SleepForm) -> Self {
        Self {
            preferences,
            form,
            last_result: None,
            toast: None,
        }
    }

    pub fn form(&self) -> &SleepForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SleepForm {
        &mut self.form
    }

    pub fn preferences(&self) -> &Preferences<S> {
        &self.preferences
    }

    pub fn last_result(&self) -> Option<Hours> {
        self.last_result
    }

    pub fn toast(&self) -> Option<SleepError> {
        self.toast
    }

    /// Submit the form on the local clock.
    pub fn submit(&mut self) -> Result<Hours, SleepError> {
        self.submit_in(&Local)
    }

    /// Submit the form, resolving wall-clock times in `tz`.
    ///
    /// A success replaces the shown result and clears any toast. A failure
    /// raises a toast and leaves the previous result and all fields alone.
    pub fn submit_in<Tz: TimeZone>(&mut self, tz: &Tz) -> Result<Hours, SleepError> {
        match self.form.calculate_in(tz) {
            Ok(hours) => {
                self.last_result = Some(hours);
                self.toast = None;
                Ok(hours)
            }
            Err(e) => {
                debug!("submission refused: {e}");
                self.toast = Some(e);
                Err(e)
            }
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    pub fn toggle_language(&mut self) -> Result<Language, StoreError> {
        self.preferences.toggle_language()
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StoreError> {
        self.preferences.toggle_theme()
    }

    /// What the screen shows right now.
    pub fn view(&self) -> View {
        View::build(
            &Fields::from(&self.form),
            self.last_result,
            self.toast,
            self.preferences.language(),
            self.preferences.theme(),
        )
    }
}
