//! hub-tiles: Settings dashboard tile registry.
//!
//! Provides a unified service for:
//! - Tile metadata parsed from per-package manifest files
//! - A registry that reloads wholesale from a tile source and hides
//!   denylisted components
//! - Package change events, sourced from manifest directory watches

mod manifest;
mod registry;
mod source;
mod types;
mod watcher;

pub use manifest::{ManifestEntry, PackageManifest, parse_manifest_file};
pub use registry::TileRegistry;
pub use source::{ManifestSource, StaticSource, TileSource, manifest_directories};
pub use types::{ComponentName, LocalizedText, Tile};
pub use watcher::{PackageEvent, PackageEvents, PackageWatcher};
