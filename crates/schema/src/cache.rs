//! Schema cache for space and index descriptors.
//!
//! This module provides the `SchemaCache` struct which resolves space and
//! index locators into descriptors, fetching from the system catalog the
//! first time a locator is seen and serving later lookups from memory.

use crate::client::SelectClient;
use crate::index::IndexDescriptor;
use crate::registry::DualKeyMap;
use crate::space::SpaceDescriptor;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use spacecache_core::{CatalogConfig, Error, Locator, Result, Tuple, Value};

/// A registered space together with the indexes resolved for it so far.
struct SpaceEntry {
    space: Arc<SpaceDescriptor>,
    indexes: DualKeyMap<Arc<IndexDescriptor>>,
}

impl SpaceEntry {
    fn new(space: Arc<SpaceDescriptor>) -> Self {
        Self {
            space,
            indexes: DualKeyMap::new(),
        }
    }
}

/// Hit/miss counters for a `SchemaCache`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    space_hits: u64,
    space_misses: u64,
    index_hits: u64,
    index_misses: u64,
    fetches: u64,
}

impl CacheStats {
    /// Space lookups served from memory.
    pub fn space_hits(&self) -> u64 {
        self.space_hits
    }

    /// Space lookups that went to the catalog.
    pub fn space_misses(&self) -> u64 {
        self.space_misses
    }

    /// Index lookups served from memory.
    pub fn index_hits(&self) -> u64 {
        self.index_hits
    }

    /// Index lookups that went to the catalog.
    pub fn index_misses(&self) -> u64 {
        self.index_misses
    }

    /// Catalog selects issued, successful or not.
    pub fn fetches(&self) -> u64 {
        self.fetches
    }

    /// Total hits across both entity kinds.
    pub fn hits(&self) -> u64 {
        self.space_hits + self.index_hits
    }

    /// Total misses across both entity kinds.
    pub fn misses(&self) -> u64 {
        self.space_misses + self.index_misses
    }

    /// Returns cache hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits() + self.misses();
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64
        }
    }
}

/// Client-side cache of the server's schema catalog.
///
/// Spaces and indexes are fetched one at a time, only when first asked for,
/// and stay cached until flushed. Each descriptor is reachable by id and, if
/// it has one, by name; both keys always lead to the same `Arc`.
///
/// The cache is meant to be owned by a single connection. Wrap it in a
/// `SharedSchemaCache` (feature `sync`) to share it between threads.
pub struct SchemaCache<C> {
    client: C,
    config: CatalogConfig,
    spaces: DualKeyMap<SpaceEntry>,
    stats: CacheStats,
}

impl<C: SelectClient> SchemaCache<C> {
    /// Creates an empty cache using the stock catalog layout.
    pub fn new(client: C) -> Self {
        Self::with_config(client, CatalogConfig::default())
    }

    /// Creates an empty cache with a custom catalog layout.
    pub fn with_config(client: C, config: CatalogConfig) -> Self {
        Self {
            client,
            config,
            spaces: DualKeyMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Resolves a space by id or name, fetching it on first use.
    pub fn resolve_space<L: Into<Locator>>(&mut self, locator: L) -> Result<Arc<SpaceDescriptor>> {
        let locator = locator.into();
        if let Some(entry) = self.spaces.get(&locator) {
            self.stats.space_hits += 1;
            tracing::trace!(space = %locator, "space cache hit");
            return Ok(Arc::clone(&entry.space));
        }
        self.stats.space_misses += 1;

        let catalog = self.config.get_space_catalog();
        let path = self.config.space_index_for(locator.is_name());
        let row = match self.fetch_one(catalog, path, &[locator.to_value()])? {
            Some(row) => row,
            None => return Err(Error::space_not_found(locator)),
        };

        let space = Arc::new(SpaceDescriptor::from_tuple(&row)?);
        if !answers(space.id(), space.name(), &locator) {
            return Err(Error::malformed_row(format!(
                "space row {} '{}' does not match requested {} '{}'",
                space.id(),
                space.name(),
                locator.kind(),
                locator
            )));
        }
        let replaced = self
            .spaces
            .insert(space.id(), space.name(), SpaceEntry::new(Arc::clone(&space)));
        tracing::debug!(
            space_id = space.id(),
            name = space.name(),
            replaced = replaced.len(),
            "registered space"
        );
        Ok(space)
    }

    /// Resolves an index of a space, resolving the space first.
    pub fn resolve_index<S, I>(&mut self, space: S, index: I) -> Result<Arc<IndexDescriptor>>
    where
        S: Into<Locator>,
        I: Into<Locator>,
    {
        let space = self.resolve_space(space)?;
        let locator = index.into();
        if let Some(found) = self
            .spaces
            .get_by_id(space.id())
            .and_then(|entry| entry.indexes.get(&locator))
        {
            self.stats.index_hits += 1;
            tracing::trace!(space_id = space.id(), index = %locator, "index cache hit");
            return Ok(Arc::clone(found));
        }
        self.stats.index_misses += 1;

        let catalog = self.config.get_index_catalog();
        let path = self.config.index_index_for(locator.is_name());
        let key = [Value::Unsigned(space.id() as u64), locator.to_value()];
        let row = match self.fetch_one(catalog, path, &key)? {
            Some(row) => row,
            None => return Err(Error::index_not_found(space_label(&space), locator)),
        };

        let index = Arc::new(IndexDescriptor::from_tuple(&row, &space)?);
        if !answers(index.id(), index.name(), &locator) {
            return Err(Error::malformed_row(format!(
                "index row {} '{}' does not match requested {} '{}'",
                index.id(),
                index.name(),
                locator.kind(),
                locator
            )));
        }
        let entry = self
            .spaces
            .get_by_id_mut(space.id())
            .ok_or_else(|| Error::stale_key(format!("space {}", space.id())))?;
        let replaced = entry
            .indexes
            .insert(index.id(), index.name(), Arc::clone(&index));
        tracing::debug!(
            space_id = space.id(),
            index_id = index.id(),
            name = index.name(),
            replaced = replaced.len(),
            "registered index"
        );
        Ok(index)
    }

    /// Selects from a unique-keyed catalog, expecting at most one row.
    ///
    /// Returns `None` for no rows or a single empty row.
    fn fetch_one(&mut self, catalog: u32, index: u32, key: &[Value]) -> Result<Option<Tuple>> {
        self.stats.fetches += 1;
        tracing::debug!(catalog, index, "fetching catalog row");
        let mut rows = self.client.select(catalog, index, key)?;
        if rows.len() > 1 {
            tracing::warn!(
                catalog,
                rows = rows.len(),
                "catalog returned several rows for a unique key"
            );
            return Err(Error::malformed_response(catalog, rows.len()));
        }
        Ok(rows.pop().filter(|row| !row.is_empty()))
    }
}

impl<C> SchemaCache<C> {
    /// Drops every cached space and, with them, every cached index.
    ///
    /// Call this when the server reports that its schema changed.
    pub fn flush_all(&mut self) {
        let spaces = self.spaces.len();
        self.spaces.clear();
        tracing::debug!(spaces, "flushed schema cache");
    }

    /// Unregisters one space under both of its keys.
    ///
    /// Its indexes go with it. Fails with `StaleKey` if this instance is no
    /// longer the registered one (already flushed, or refetched since).
    pub fn flush_space(&mut self, space: &Arc<SpaceDescriptor>) -> Result<()> {
        self.spaces
            .remove_if(space.id(), |entry| Arc::ptr_eq(&entry.space, space))
            .map_err(|_| Error::stale_key(format!("space {}", space.id())))?;
        tracing::debug!(space_id = space.id(), "flushed space");
        Ok(())
    }

    /// Unregisters one index from its owning space under both of its keys.
    ///
    /// Other indexes of the space stay cached. Fails with `StaleKey` if this
    /// instance is no longer the registered one.
    pub fn flush_index(&mut self, index: &Arc<IndexDescriptor>) -> Result<()> {
        let stale = || {
            Error::stale_key(format!(
                "index {} of space {}",
                index.id(),
                index.space_id()
            ))
        };
        let entry = self
            .spaces
            .get_by_id_mut(index.space_id())
            .ok_or_else(stale)?;
        entry
            .indexes
            .remove_if(index.id(), |current| Arc::ptr_eq(current, index))
            .map_err(|_| stale())?;
        tracing::debug!(
            space_id = index.space_id(),
            index_id = index.id(),
            "flushed index"
        );
        Ok(())
    }

    /// Returns a cached space without going to the server.
    pub fn cached_space<L: Into<Locator>>(&self, locator: L) -> Option<Arc<SpaceDescriptor>> {
        self.spaces
            .get(&locator.into())
            .map(|entry| Arc::clone(&entry.space))
    }

    /// Returns a cached index without going to the server.
    pub fn cached_index<S, I>(&self, space: S, index: I) -> Option<Arc<IndexDescriptor>>
    where
        S: Into<Locator>,
        I: Into<Locator>,
    {
        self.spaces
            .get(&space.into())?
            .indexes
            .get(&index.into())
            .map(Arc::clone)
    }

    /// Returns the indexes cached so far for a space, ordered by id.
    pub fn cached_indexes<L: Into<Locator>>(&self, space: L) -> Vec<Arc<IndexDescriptor>> {
        let mut indexes: Vec<Arc<IndexDescriptor>> = self
            .spaces
            .get(&space.into())
            .map(|entry| entry.indexes.values().cloned().collect())
            .unwrap_or_default();
        indexes.sort_by_key(|index| index.id());
        indexes
    }

    /// Returns the number of cached spaces.
    pub fn space_count(&self) -> usize {
        self.spaces.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    /// Returns the hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Resets the hit/miss counters. Cached entries are kept.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Returns the catalog layout in use.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Returns a reference to the select client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Returns a mutable reference to the select client.
    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    /// Consumes the cache and returns the select client.
    pub fn into_client(self) -> C {
        self.client
    }
}

/// Whether a row keyed by `id` and `name` is the one `locator` asked for.
fn answers(id: u32, name: &str, locator: &Locator) -> bool {
    match locator {
        Locator::Id(requested) => id == *requested,
        Locator::Name(requested) => name == requested.as_str(),
    }
}

fn space_label(space: &SpaceDescriptor) -> String {
    if space.is_named() {
        space.name().into()
    } else {
        format!("#{}", space.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SelectFn;
    use alloc::vec;

    type Select = SelectFn<fn(u32, u32, &[Value]) -> Result<Vec<Tuple>>>;

    fn space_row(id: u32, name: &str) -> Tuple {
        Tuple::new(vec![Value::from(id), Value::Unsigned(0), Value::from(name)])
    }

    fn index_row(space: u32, id: u32, name: &str) -> Tuple {
        Tuple::new(vec![
            Value::from(space),
            Value::from(id),
            Value::from(name),
            Value::from("TREE"),
            Value::Unsigned(1),
            Value::Unsigned(1),
            Value::Unsigned(0),
            Value::from("NUM"),
        ])
    }

    /// One space `users` (id 7) with one index `primary` (id 0).
    fn users_catalog(space: u32, _path: u32, key: &[Value]) -> Result<Vec<Tuple>> {
        let rows = match (space, key) {
            (280, [Value::Unsigned(7)]) => vec![space_row(7, "users")],
            (280, [Value::String(name)]) if name == "users" => vec![space_row(7, "users")],
            (288, [Value::Unsigned(7), Value::Unsigned(0)]) => vec![index_row(7, 0, "primary")],
            (288, [Value::Unsigned(7), Value::String(name)]) if name == "primary" => {
                vec![index_row(7, 0, "primary")]
            }
            _ => vec![],
        };
        Ok(rows)
    }

    fn cache() -> SchemaCache<Select> {
        SchemaCache::new(SelectFn(users_catalog as fn(u32, u32, &[Value]) -> Result<Vec<Tuple>>))
    }

    #[test]
    fn test_resolve_space_hit_after_miss() {
        let mut cache = cache();
        let first = cache.resolve_space(7).unwrap();
        let second = cache.resolve_space(7).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats().fetches(), 1);
        assert_eq!(cache.stats().space_hits(), 1);
        assert_eq!(cache.stats().space_misses(), 1);
    }

    #[test]
    fn test_resolve_space_by_name_then_id() {
        let mut cache = cache();
        let by_name = cache.resolve_space("users").unwrap();
        let by_id = cache.resolve_space(7).unwrap();

        assert!(Arc::ptr_eq(&by_name, &by_id));
        assert_eq!(cache.stats().fetches(), 1);
    }

    #[test]
    fn test_resolve_index() {
        let mut cache = cache();
        let index = cache.resolve_index("users", "primary").unwrap();

        assert_eq!(index.id(), 0);
        assert_eq!(index.space_id(), 7);
        assert!(Arc::ptr_eq(&index, &cache.resolve_index(7, 0).unwrap()));
        assert_eq!(cache.stats().fetches(), 2);
        assert_eq!(cache.stats().index_hits(), 1);
    }

    #[test]
    fn test_space_not_found() {
        let mut cache = cache();
        let err = cache.resolve_space(999).unwrap_err();
        assert_eq!(err, Error::space_not_found(999));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_index_not_found_names_space() {
        let mut cache = cache();
        let err = cache.resolve_index(7, "missing").unwrap_err();
        assert_eq!(err, Error::index_not_found("users", "missing"));
        // The space itself stays cached.
        assert!(cache.cached_space(7).is_some());
    }

    #[test]
    fn test_flush_all() {
        let mut cache = cache();
        cache.resolve_index(7, 0).unwrap();
        cache.flush_all();

        assert!(cache.is_empty());
        assert!(cache.cached_index(7, 0).is_none());
        cache.resolve_space(7).unwrap();
        assert_eq!(cache.stats().fetches(), 3);
    }

    #[test]
    fn test_flush_space_twice_is_stale() {
        let mut cache = cache();
        let space = cache.resolve_space("users").unwrap();

        cache.flush_space(&space).unwrap();
        assert!(cache.cached_space(7).is_none());
        assert!(cache.cached_space("users").is_none());
        assert!(matches!(cache.flush_space(&space), Err(Error::StaleKey { .. })));
    }

    #[test]
    fn test_flush_index_keeps_space() {
        let mut cache = cache();
        let index = cache.resolve_index("users", "primary").unwrap();

        cache.flush_index(&index).unwrap();
        assert!(cache.cached_index(7, 0).is_none());
        assert!(cache.cached_index(7, "primary").is_none());
        assert!(cache.cached_space(7).is_some());
        assert!(matches!(cache.flush_index(&index), Err(Error::StaleKey { .. })));
    }

    #[test]
    fn test_stats_hit_rate() {
        let mut cache = cache();
        assert_eq!(cache.stats().hit_rate(), 0.0);
        cache.resolve_space(7).unwrap();
        cache.resolve_space(7).unwrap();
        assert_eq!(cache.stats().hit_rate(), 0.5);

        cache.reset_stats();
        assert_eq!(cache.stats(), CacheStats::default());
        assert_eq!(cache.space_count(), 1);
    }

    #[test]
    fn test_answers_requested_locator() {
        assert!(answers(7, "users", &Locator::Id(7)));
        assert!(answers(7, "users", &Locator::from("users")));
        assert!(!answers(7, "users", &Locator::Id(70)));
        assert!(!answers(7, "users", &Locator::from("orders")));
    }

    #[test]
    fn test_into_client_returns_client() {
        let mut cache = cache();
        cache.resolve_space(7).unwrap();
        let SelectFn(select) = cache.into_client();
        assert_eq!(select(280, 0, &[Value::Unsigned(7)]).unwrap().len(), 1);
    }

    #[test]
    fn test_space_label_for_unnamed() {
        assert_eq!(space_label(&SpaceDescriptor::new(9, 0, "")), "#9");
        assert_eq!(space_label(&SpaceDescriptor::new(9, 0, "users")), "users");
    }
}
