//! Space descriptor parsed from a `_space` catalog row.

use alloc::string::String;
use spacecache_core::{Result, Tuple};

/// Position of the space id in a `_space` row.
const FIELD_ID: usize = 0;
/// Position of the declared field count.
const FIELD_ARITY: usize = 1;
/// Position of the space name.
const FIELD_NAME: usize = 2;

/// A space (collection of tuples) as declared on the server.
///
/// Descriptors are immutable once built. A changed server-side definition
/// only shows up after the cache entry is flushed and refetched.
///
/// A descriptor does not hold its indexes. The cache keeps them next to the
/// space's entry: use `SchemaCache::resolve_index` to look one up and
/// `SchemaCache::cached_indexes` to list the ones loaded so far. Flushing the
/// space drops that index map with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpaceDescriptor {
    /// Space id, unique on the server.
    id: u32,
    /// Declared field count, 0 when unconstrained.
    arity: u32,
    /// Space name, empty when unnamed.
    name: String,
}

impl SpaceDescriptor {
    /// Creates a descriptor directly.
    pub fn new(id: u32, arity: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            arity,
            name: name.into(),
        }
    }

    /// Parses a `_space` row laid out as `[id, arity, name, ...]`.
    ///
    /// Fields past the name (owner, engine, flags, format) are ignored.
    pub fn from_tuple(tuple: &Tuple) -> Result<Self> {
        let id = tuple.require_u32(FIELD_ID, "space id")?;
        let arity = tuple.require_u32(FIELD_ARITY, "space arity")?;
        let name = tuple.require_str(FIELD_NAME, "space name")?;
        Ok(Self::new(id, arity, name))
    }

    /// Returns the space id.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the declared field count (0 = unconstrained).
    #[inline]
    pub fn arity(&self) -> u32 {
        self.arity
    }

    /// Returns the space name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the space has a name.
    #[inline]
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}
