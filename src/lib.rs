//! settings-hub - Coordination layer for a settings dashboard.
//!
//! Ties together:
//! - `hub-tiles` - the tile registry and package change events
//! - `category` - the refresh coordinator that tells listeners which
//!   dashboard categories need re-rendering
//! - `controllers` + `screens` - preference controllers built by name from
//!   declarative screen definitions
//! - `store` - the settings row seam controllers bind to

pub mod category;
pub mod controllers;
pub mod screens;
pub mod store;

pub use category::{CategoryCoordinator, CategoryListener, changed_categories};
pub use controllers::{
    Availability, ControllerError, ControllerRegistry, Preference, PreferenceController,
    TogglePreferenceController,
};
pub use screens::{PreferenceDef, ScreenDef, ScreenError};
pub use store::{MemoryStore, SettingsStore};

pub use hub_tiles as tiles;
