//! Settings-entry manifest parsing.
//!
//! Each installed package declares its dashboard entry points in a JSON
//! manifest named `<package>.json`, listing the entry class, the category
//! it appears under and its display text.

use crate::types::{ComponentName, LocalizedText, Tile};
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One package's declared entry points.
#[derive(Clone, Debug, Deserialize)]
pub struct PackageManifest {
    pub package: String,
    #[serde(default)]
    pub entries: Vec<ManifestEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ManifestEntry {
    pub class: String,
    pub category: String,
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub summary: LocalizedText,
    #[serde(default)]
    pub order: i32,
}

impl PackageManifest {
    /// Flatten into tiles, resolving display text for `locale`.
    pub fn into_tiles(self, locale: &str) -> Vec<Tile> {
        let package = self.package;
        self.entries
            .into_iter()
            .map(|entry| Tile {
                component: ComponentName::new(package.clone(), entry.class),
                category: entry.category,
                title: entry.title.resolve(locale),
                summary: entry.summary.resolve(locale),
                order: entry.order,
            })
            .collect()
    }
}

/// Parse a manifest file into tiles. Returns None for unreadable or
/// malformed files; a bad manifest never fails the scan.
pub fn parse_manifest_file(path: &Path, locale: &str) -> Option<Vec<Tile>> {
    let content = fs::read_to_string(path).ok()?;
    let manifest: PackageManifest = match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            warn!("Skipping malformed manifest {}: {}", path.display(), e);
            return None;
        }
    };
    Some(manifest.into_tiles(locale))
}
