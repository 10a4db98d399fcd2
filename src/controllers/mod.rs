//! Preference controllers: the glue between one on-screen preference and
//! its backing setting.
//!
//! Controllers are built by name through an explicit registration table
//! (`ControllerRegistry`) - every controller a screen definition can name
//! must be registered at startup. See `factory`.

pub mod factory;
pub mod toggle;

pub use factory::{ControllerError, ControllerRegistry};
pub use toggle::TogglePreferenceController;

/// Widget-side state of a single preference, as much of it as controllers
/// touch.
#[derive(Clone, Debug, PartialEq)]
pub struct Preference {
    pub key: String,
    pub title: String,
    pub summary: String,
    /// Checked state for two-state preferences; None for plain entries.
    pub checked: Option<bool>,
    pub visible: bool,
}

impl Preference {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: String::new(),
            summary: String::new(),
            checked: None,
            visible: true,
        }
    }
}

/// Whether a controller's preference should be shown on this device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Availability {
    /// Supported and currently actionable.
    Available,
    /// Supported, but hidden under the current conditions (e.g. no work
    /// profile is present).
    ConditionallyUnavailable,
    /// The device lacks the underlying capability.
    UnsupportedOnDevice,
    /// Shown, but managed by another setting that currently disables it.
    DisabledDependentSetting,
}

/// One preference's controller: reads the backing setting into the widget
/// state and writes user interactions back.
pub trait PreferenceController: std::fmt::Debug {
    /// The preference key this controller is bound to.
    fn key(&self) -> &str;

    fn availability(&self) -> Availability;

    fn is_available(&self) -> bool {
        matches!(
            self.availability(),
            Availability::Available | Availability::DisabledDependentSetting
        )
    }

    /// Reflect availability into the widget when the screen is built.
    fn display(&self, preference: &mut Preference) {
        preference.visible = self.is_available();
    }

    /// Refresh the widget from the backing setting.
    fn update_state(&self, preference: &mut Preference) {
        let _ = preference;
    }

    /// Handle a click on the preference. Returns true when consumed.
    fn handle_click(&mut self, preference: &mut Preference) -> bool {
        let _ = preference;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FixedController {
        key: String,
        availability: Availability,
    }

    impl PreferenceController for FixedController {
        fn key(&self) -> &str {
            &self.key
        }

        fn availability(&self) -> Availability {
            self.availability
        }
    }

    #[test]
    fn display_hides_unavailable_preferences() {
        let controller = FixedController {
            key: "auto_rotate".into(),
            availability: Availability::UnsupportedOnDevice,
        };
        let mut preference = Preference::new("auto_rotate");
        controller.display(&mut preference);
        assert!(!preference.visible);
    }

    #[test]
    fn dependent_setting_still_counts_as_available() {
        let controller = FixedController {
            key: "night_light".into(),
            availability: Availability::DisabledDependentSetting,
        };
        assert!(controller.is_available());

        let mut preference = Preference::new("night_light");
        controller.display(&mut preference);
        assert!(preference.visible);
    }
}
