//! Declarative preference screen definitions.
//!
//! Screens are JSON documents naming their preferences and, for each, the
//! controller that drives it. The (key, controller) pairs feed the
//! registration table in `controllers::factory`.

use crate::controllers::{ControllerError, ControllerRegistry, Preference, PreferenceController};
use serde::Deserialize;

/// One preference screen.
#[derive(Clone, Debug, Deserialize)]
pub struct ScreenDef {
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub preferences: Vec<PreferenceDef>,
}

/// One preference entry on a screen. `controller` is optional: entries
/// without one are plain display items.
#[derive(Clone, Debug, Deserialize)]
pub struct PreferenceDef {
    pub key: String,
    #[serde(default)]
    pub controller: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error("malformed screen definition: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("preference \"{key}\": {source}")]
    Controller {
        key: String,
        #[source]
        source: ControllerError,
    },
}

impl From<&PreferenceDef> for Preference {
    fn from(def: &PreferenceDef) -> Self {
        Self {
            key: def.key.clone(),
            title: def.title.clone(),
            summary: def.summary.clone(),
            checked: None,
            visible: true,
        }
    }
}

impl ScreenDef {
    pub fn from_json(json: &str) -> Result<Self, ScreenError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The (preference key, controller name) pairs, in document order.
    /// Preferences that declare no controller are skipped.
    pub fn controller_bindings(&self) -> Vec<(&str, &str)> {
        self.preferences
            .iter()
            .filter_map(|p| p.controller.as_deref().map(|c| (p.key.as_str(), c)))
            .collect()
    }

    /// Build every bound controller through the registration table. An
    /// unknown controller name fails the whole screen, naming the
    /// offending preference.
    pub fn build_controllers(
        &self,
        registry: &ControllerRegistry,
    ) -> Result<Vec<Box<dyn PreferenceController>>, ScreenError> {
        let mut controllers = Vec::with_capacity(self.preferences.len());
        for (key, name) in self.controller_bindings() {
            let controller =
                registry
                    .create(name, key)
                    .map_err(|source| ScreenError::Controller {
                        key: key.to_string(),
                        source,
                    })?;
            controllers.push(controller);
        }
        Ok(controllers)
    }
}
