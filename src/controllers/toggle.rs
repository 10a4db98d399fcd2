//! Boolean toggle controller.

use super::{Availability, Preference, PreferenceController};
use crate::store::SettingsStore;
use std::sync::Arc;

/// Binds one boolean settings row to a two-state preference: the checked
/// state mirrors the row, a click flips it and writes back.
pub struct TogglePreferenceController {
    key: String,
    setting: String,
    default_on: bool,
    store: Arc<dyn SettingsStore>,
}

impl std::fmt::Debug for TogglePreferenceController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TogglePreferenceController")
            .field("key", &self.key)
            .field("setting", &self.setting)
            .field("default_on", &self.default_on)
            .finish_non_exhaustive()
    }
}

impl TogglePreferenceController {
    pub fn new(
        key: impl Into<String>,
        setting: impl Into<String>,
        default_on: bool,
        store: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            key: key.into(),
            setting: setting.into(),
            default_on,
            store,
        }
    }

    fn current(&self) -> bool {
        self.store.get_bool(&self.setting).unwrap_or(self.default_on)
    }
}

impl PreferenceController for TogglePreferenceController {
    fn key(&self) -> &str {
        &self.key
    }

    fn availability(&self) -> Availability {
        Availability::Available
    }

    fn update_state(&self, preference: &mut Preference) {
        preference.checked = Some(self.current());
    }

    fn handle_click(&mut self, preference: &mut Preference) -> bool {
        let next = !self.current();
        self.store.set_bool(&self.setting, next);
        preference.checked = Some(next);
        true
    }
}
