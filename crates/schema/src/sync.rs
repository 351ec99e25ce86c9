//! Thread-safe handle around a `SchemaCache`.
//!
//! Every operation runs under one mutex for its whole duration, including
//! the catalog round trip. A lookup racing a flush therefore sees the cache
//! either before or after the flush, never in between, and two threads
//! asking for the same unknown locator issue a single fetch: the second one
//! waits and then hits.

use crate::cache::{CacheStats, SchemaCache};
use crate::client::SelectClient;
use crate::index::IndexDescriptor;
use crate::space::SpaceDescriptor;
use alloc::sync::Arc;
use parking_lot::Mutex;
use spacecache_core::{Locator, Result};

/// Cloneable, `Send + Sync` handle to a shared `SchemaCache`.
pub struct SharedSchemaCache<C> {
    inner: Arc<Mutex<SchemaCache<C>>>,
}

impl<C> Clone for SharedSchemaCache<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: SelectClient> SharedSchemaCache<C> {
    /// Wraps a cache for shared use.
    pub fn new(cache: SchemaCache<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// See [`SchemaCache::resolve_space`].
    pub fn resolve_space<L: Into<Locator>>(&self, locator: L) -> Result<Arc<SpaceDescriptor>> {
        self.inner.lock().resolve_space(locator)
    }

    /// See [`SchemaCache::resolve_index`].
    pub fn resolve_index<S, I>(&self, space: S, index: I) -> Result<Arc<IndexDescriptor>>
    where
        S: Into<Locator>,
        I: Into<Locator>,
    {
        self.inner.lock().resolve_index(space, index)
    }

    /// See [`SchemaCache::flush_all`].
    pub fn flush_all(&self) {
        self.inner.lock().flush_all();
    }

    /// See [`SchemaCache::flush_space`].
    pub fn flush_space(&self, space: &Arc<SpaceDescriptor>) -> Result<()> {
        self.inner.lock().flush_space(space)
    }

    /// See [`SchemaCache::flush_index`].
    pub fn flush_index(&self, index: &Arc<IndexDescriptor>) -> Result<()> {
        self.inner.lock().flush_index(index)
    }

    /// Returns a snapshot of the hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Runs `f` with exclusive access to the underlying cache.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut SchemaCache<C>) -> R) -> R {
        let mut cache = self.inner.lock();
        f(&mut *cache)
    }
}
