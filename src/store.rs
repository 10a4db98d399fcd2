//! Settings store seam.
//!
//! Controllers read and write settings rows through this trait; the real
//! platform store lives behind it.

use std::collections::HashMap;
use std::sync::RwLock;

/// The key-value system settings store controllers bind to.
pub trait SettingsStore: Send + Sync {
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn set_bool(&self, key: &str, value: bool);
    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&self, key: &str, value: &str);
}

/// In-process store backed by a plain map. Rows are stored as strings,
/// booleans as "1"/"0" the way settings rows traditionally are.
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.rows
            .read()
            .unwrap()
            .get(key)
            .map(|v| v == "1" || v == "true")
    }

    fn set_bool(&self, key: &str, value: bool) {
        self.rows
            .write()
            .unwrap()
            .insert(key.to_string(), if value { "1" } else { "0" }.to_string());
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.rows.read().unwrap().get(key).cloned()
    }

    fn set_string(&self, key: &str, value: &str) {
        self.rows
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}
