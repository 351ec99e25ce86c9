//! Catalog layout configuration.
//!
//! The numeric ids of the system catalogs and their access paths are fixed by
//! the server. `CatalogConfig::default()` carries the stock values; the
//! setters exist for servers (or tests) that lay the catalog out differently.

/// Id of the `_space` system catalog.
pub const SPACE_CATALOG: u32 = 280;
/// Id of the `_index` system catalog.
pub const INDEX_CATALOG: u32 = 288;
/// Primary-key access path of `_space` (keyed by space id).
pub const SPACE_PRIMARY_INDEX: u32 = 0;
/// Name access path of `_space`.
pub const SPACE_NAME_INDEX: u32 = 2;
/// Primary-key access path of `_index` (keyed by space id, index id).
pub const INDEX_PRIMARY_INDEX: u32 = 0;
/// Name access path of `_index` (keyed by space id, index name).
pub const INDEX_NAME_INDEX: u32 = 2;

/// Where the schema catalog lives on the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    space_catalog: u32,
    index_catalog: u32,
    space_primary_index: u32,
    space_name_index: u32,
    index_primary_index: u32,
    index_name_index: u32,
}

impl CatalogConfig {
    /// Creates a config with the stock catalog layout.
    pub const fn new() -> Self {
        Self {
            space_catalog: SPACE_CATALOG,
            index_catalog: INDEX_CATALOG,
            space_primary_index: SPACE_PRIMARY_INDEX,
            space_name_index: SPACE_NAME_INDEX,
            index_primary_index: INDEX_PRIMARY_INDEX,
            index_name_index: INDEX_NAME_INDEX,
        }
    }

    /// Sets the id of the space catalog.
    pub fn space_catalog(mut self, id: u32) -> Self {
        self.space_catalog = id;
        self
    }

    /// Sets the id of the index catalog.
    pub fn index_catalog(mut self, id: u32) -> Self {
        self.index_catalog = id;
        self
    }

    /// Sets the primary-key and name access paths of the space catalog.
    pub fn space_indexes(mut self, primary: u32, name: u32) -> Self {
        self.space_primary_index = primary;
        self.space_name_index = name;
        self
    }

    /// Sets the primary-key and name access paths of the index catalog.
    pub fn index_indexes(mut self, primary: u32, name: u32) -> Self {
        self.index_primary_index = primary;
        self.index_name_index = name;
        self
    }

    /// Returns the id of the space catalog.
    #[inline]
    pub fn get_space_catalog(&self) -> u32 {
        self.space_catalog
    }

    /// Returns the id of the index catalog.
    #[inline]
    pub fn get_index_catalog(&self) -> u32 {
        self.index_catalog
    }

    /// Returns the access path used to look a space up by id or by name.
    pub fn space_index_for(&self, by_name: bool) -> u32 {
        if by_name {
            self.space_name_index
        } else {
            self.space_primary_index
        }
    }

    /// Returns the access path used to look an index up by id or by name.
    pub fn index_index_for(&self, by_name: bool) -> u32 {
        if by_name {
            self.index_name_index
        } else {
            self.index_primary_index
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = CatalogConfig::default();
        assert_eq!(config.get_space_catalog(), 280);
        assert_eq!(config.get_index_catalog(), 288);
        assert_eq!(config.space_index_for(false), 0);
        assert_eq!(config.space_index_for(true), 2);
        assert_eq!(config.index_index_for(false), 0);
        assert_eq!(config.index_index_for(true), 2);
    }

    #[test]
    fn test_config_overrides() {
        let config = CatalogConfig::new()
            .space_catalog(1)
            .index_catalog(2)
            .space_indexes(10, 11)
            .index_indexes(20, 21);

        assert_eq!(config.get_space_catalog(), 1);
        assert_eq!(config.get_index_catalog(), 2);
        assert_eq!(config.space_index_for(true), 11);
        assert_eq!(config.index_index_for(false), 20);
    }
}
