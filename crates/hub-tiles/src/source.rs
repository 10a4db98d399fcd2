//! Tile sources: where the registry reads entry points from.

use crate::manifest::parse_manifest_file;
use crate::types::Tile;
use log::debug;
use std::path::PathBuf;
use std::sync::RwLock;

/// Trait all tile providers implement.
/// `load` is a blocking full read of the current entry-point universe.
pub trait TileSource: Send + Sync {
    fn load(&self, locale: &str) -> Vec<Tile>;
}

/// Get the manifest directories for the current system (XDG + system paths).
pub fn manifest_directories() -> Vec<PathBuf> {
    let mut dirs_out = Vec::new();

    if let Some(data_home) = dirs::data_dir() {
        dirs_out.push(data_home.join("settings-hub/manifests"));
    }

    let xdg_data_dirs = std::env::var("XDG_DATA_DIRS")
        .unwrap_or_else(|_| "/usr/local/share:/usr/share".to_string());
    for data_dir in xdg_data_dirs.split(':') {
        if !data_dir.is_empty() {
            dirs_out.push(PathBuf::from(data_dir).join("settings-hub/manifests"));
        }
    }

    dirs_out
}

/// Scans manifest directories for `<package>.json` files.
pub struct ManifestSource {
    dirs: Vec<PathBuf>,
}

impl ManifestSource {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Source over the system's default manifest directories.
    pub fn system() -> Self {
        Self::new(manifest_directories())
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl TileSource for ManifestSource {
    fn load(&self, locale: &str) -> Vec<Tile> {
        let mut tiles = Vec::new();

        for dir in &self.dirs {
            if !dir.exists() {
                continue;
            }

            let walker = walkdir::WalkDir::new(dir).follow_links(true).max_depth(2);
            for entry in walker.into_iter().filter_map(|e| e.ok()) {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) == Some("json") {
                    if let Some(parsed) = parse_manifest_file(path, locale) {
                        tiles.extend(parsed);
                    }
                }
            }
        }

        debug!(
            "Loaded {} tiles from {} manifest directories",
            tiles.len(),
            self.dirs.len()
        );
        tiles
    }
}

/// Fixed in-memory source, for owners that assemble tiles themselves and
/// for tests.
#[derive(Default)]
pub struct StaticSource {
    tiles: RwLock<Vec<Tile>>,
}

impl StaticSource {
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self {
            tiles: RwLock::new(tiles),
        }
    }

    pub fn set_tiles(&self, tiles: Vec<Tile>) {
        *self.tiles.write().unwrap() = tiles;
    }
}

impl TileSource for StaticSource {
    fn load(&self, _locale: &str) -> Vec<Tile> {
        self.tiles.read().unwrap().clone()
    }
}
