//! Core tile types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifies one settings entry point: the owning package plus the entry
/// class declared in its manifest. Flattened form is `"package/Class"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentName {
    pub package: String,
    pub class: String,
}

impl ComponentName {
    pub fn new(package: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class: class.into(),
        }
    }

    /// Parse the flattened `"package/Class"` form.
    pub fn parse(flat: &str) -> Option<Self> {
        let (package, class) = flat.split_once('/')?;
        if package.is_empty() || class.is_empty() {
            return None;
        }
        Some(Self::new(package, class))
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.class)
    }
}

/// Manifest text that is either a plain string or a locale -> string map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    PerLocale(BTreeMap<String, String>),
}

impl LocalizedText {
    /// Resolve against a locale tag. Tries the exact tag, then the bare
    /// language ("de" for "de-AT"), then the "default" entry, then the
    /// first entry in key order.
    pub fn resolve(&self, locale: &str) -> String {
        match self {
            LocalizedText::Plain(text) => text.clone(),
            LocalizedText::PerLocale(map) => {
                if let Some(text) = map.get(locale) {
                    return text.clone();
                }
                if let Some((language, _)) = locale.split_once('-') {
                    if let Some(text) = map.get(language) {
                        return text.clone();
                    }
                }
                if let Some(text) = map.get("default") {
                    return text.clone();
                }
                map.values().next().cloned().unwrap_or_default()
            }
        }
    }
}

impl Default for LocalizedText {
    fn default() -> Self {
        LocalizedText::Plain(String::new())
    }
}

/// One dashboard entry, keyed by component. Title and summary are already
/// resolved for the locale the registry was last reloaded with.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub component: ComponentName,
    pub category: String,
    pub title: String,
    pub summary: String,
    pub order: i32,
}
