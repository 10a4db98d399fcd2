//! Registration-table controller construction.
//!
//! Screens name their controllers by a stable string; this table maps each
//! name to a factory closure. Unknown names are a declared error instead
//! of a generic construction failure.

use super::PreferenceController;
use log::warn;
use std::collections::HashMap;

/// Builds one controller bound to the given preference key.
pub type ControllerFactory = Box<dyn Fn(&str) -> Box<dyn PreferenceController> + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("no controller registered under \"{0}\"")]
    UnknownControllerKey(String),
}

/// Explicit name -> factory table, populated at startup.
#[derive(Default)]
pub struct ControllerRegistry {
    factories: HashMap<String, ControllerFactory>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under a stable name. Re-registering replaces the
    /// previous factory.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&str) -> Box<dyn PreferenceController> + Send + Sync + 'static,
    {
        let name = name.into();
        if self
            .factories
            .insert(name.clone(), Box::new(factory))
            .is_some()
        {
            warn!("Controller \"{}\" re-registered, replacing previous factory", name);
        }
    }

    /// Build the controller registered under `name`, bound to preference
    /// key `key`.
    pub fn create(
        &self,
        name: &str,
        key: &str,
    ) -> Result<Box<dyn PreferenceController>, ControllerError> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory(key)),
            None => Err(ControllerError::UnknownControllerKey(name.to_string())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}
