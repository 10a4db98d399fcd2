//! Tile registry: the component -> tile store backing the dashboard.

use crate::source::TileSource;
use crate::types::{ComponentName, Tile};
use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// Holds the current tile universe. Contents are replaced wholesale by
/// `reload` - never patched incrementally - so a later reload always
/// observes every change that happened before it ran.
///
/// Mutating calls (`reload`, `apply_denylist`) are expected to come from a
/// single coordinator-owned worker; everything else is read-only.
pub struct TileRegistry {
    source: Arc<dyn TileSource>,
    tiles: RwLock<HashMap<ComponentName, Tile>>,
    locale: RwLock<String>,
}

impl TileRegistry {
    pub fn new(source: Arc<dyn TileSource>) -> Self {
        Self {
            source,
            tiles: RwLock::new(HashMap::new()),
            locale: RwLock::new("default".to_string()),
        }
    }

    /// Locale used by subsequent reloads to resolve tile display text.
    pub fn set_locale(&self, locale: impl Into<String>) {
        *self.locale.write().unwrap() = locale.into();
    }

    pub fn locale(&self) -> String {
        self.locale.read().unwrap().clone()
    }

    /// Blocking full re-read from the source. Replaces the registry
    /// contents with whatever the source reports now.
    pub fn reload(&self) {
        let locale = self.locale();
        let loaded = self.source.load(&locale);

        let mut map = HashMap::with_capacity(loaded.len());
        for tile in loaded {
            if let Some(replaced) = map.insert(tile.component.clone(), tile) {
                debug!("Duplicate tile declaration for {}", replaced.component);
            }
        }

        info!("Registry reloaded: {} tiles ({})", map.len(), locale);
        *self.tiles.write().unwrap() = map;
    }

    /// Hide every tile whose component is in `denied` from the externally
    /// visible contents.
    pub fn apply_denylist(&self, denied: &HashSet<ComponentName>) {
        if denied.is_empty() {
            return;
        }

        let mut tiles = self.tiles.write().unwrap();
        let before = tiles.len();
        tiles.retain(|component, _| !denied.contains(component));
        if tiles.len() != before {
            debug!("Denylist suppressed {} tiles", before - tiles.len());
        }
    }

    /// Snapshot clone of the current component -> tile map.
    pub fn tile_by_component_map(&self) -> HashMap<ComponentName, Tile> {
        self.tiles.read().unwrap().clone()
    }

    pub fn get_tile(&self, component: &ComponentName) -> Option<Tile> {
        self.tiles.read().unwrap().get(component).cloned()
    }

    /// All category keys present, sorted.
    pub fn categories(&self) -> Vec<String> {
        let tiles = self.tiles.read().unwrap();
        let mut categories: Vec<String> = tiles
            .values()
            .map(|t| t.category.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        categories.sort();
        categories
    }

    /// Tiles in one category, ordered by their declared order, ties broken
    /// by component.
    pub fn tiles_in_category(&self, category: &str) -> Vec<Tile> {
        let tiles = self.tiles.read().unwrap();
        let mut matched: Vec<Tile> = tiles
            .values()
            .filter(|t| t.category == category)
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.component.cmp(&b.component)));
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;

    fn tile(package: &str, class: &str, category: &str, title: &str, order: i32) -> Tile {
        Tile {
            component: ComponentName::new(package, class),
            category: category.to_string(),
            title: title.to_string(),
            summary: String::new(),
            order,
        }
    }

    fn registry_with(tiles: Vec<Tile>) -> (Arc<StaticSource>, TileRegistry) {
        let source = Arc::new(StaticSource::new(tiles));
        let registry = TileRegistry::new(source.clone());
        registry.reload();
        (source, registry)
    }

    #[test]
    fn reload_replaces_contents_wholesale() {
        let (source, registry) = registry_with(vec![
            tile("pkg.a", "One", "network", "One", 0),
            tile("pkg.b", "Two", "sound", "Two", 0),
        ]);
        assert_eq!(registry.tile_by_component_map().len(), 2);

        source.set_tiles(vec![tile("pkg.c", "Three", "display", "Three", 0)]);
        registry.reload();

        let map = registry.tile_by_component_map();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key(&ComponentName::new("pkg.c", "Three")));
    }

    #[test]
    fn denylist_hides_components_until_removed() {
        let (_, registry) = registry_with(vec![
            tile("pkg.a", "One", "network", "One", 0),
            tile("pkg.b", "Two", "sound", "Two", 0),
        ]);

        let denied: HashSet<_> = [ComponentName::new("pkg.a", "One")].into();
        registry.apply_denylist(&denied);

        assert!(registry.get_tile(&ComponentName::new("pkg.a", "One")).is_none());
        assert!(registry.get_tile(&ComponentName::new("pkg.b", "Two")).is_some());

        // The next reload re-reads everything; an emptied denylist stops
        // suppressing the component.
        registry.reload();
        registry.apply_denylist(&HashSet::new());
        assert!(registry.get_tile(&ComponentName::new("pkg.a", "One")).is_some());
    }

    #[test]
    fn category_queries_are_ordered() {
        let (_, registry) = registry_with(vec![
            tile("pkg.a", "Late", "display", "Late", 20),
            tile("pkg.b", "Early", "display", "Early", 5),
            tile("pkg.c", "Other", "sound", "Other", 0),
        ]);

        assert_eq!(registry.categories(), vec!["display", "sound"]);
        let display: Vec<String> = registry
            .tiles_in_category("display")
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(display, vec!["Early", "Late"]);
        assert!(registry.tiles_in_category("battery").is_empty());
    }

    #[test]
    fn locale_change_shows_up_after_reload() {
        struct LocaleSource;
        impl TileSource for LocaleSource {
            fn load(&self, locale: &str) -> Vec<Tile> {
                let title = if locale == "de" { "Ton" } else { "Sound" };
                vec![tile("pkg.a", "One", "sound", title, 0)]
            }
        }

        let registry = TileRegistry::new(Arc::new(LocaleSource));
        registry.reload();
        let component = ComponentName::new("pkg.a", "One");
        assert_eq!(registry.get_tile(&component).unwrap().title, "Sound");

        registry.set_locale("de");
        registry.reload();
        assert_eq!(registry.get_tile(&component).unwrap().title, "Ton");
    }
}
