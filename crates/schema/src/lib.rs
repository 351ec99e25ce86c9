//! Spacecache Schema - Client-side cache of the server's schema catalog.
//!
//! A client has to turn space and index locators (names or numeric ids) into
//! descriptors before it can encode a request. This crate does that lookup
//! once per locator and remembers the answer:
//!
//! - `SchemaCache`: Lazily fetches and caches space and index descriptors
//! - `SpaceDescriptor` / `IndexDescriptor`: Parsed `_space` / `_index` rows
//! - `SelectClient` / `SelectFn`: The `select` the cache fetches catalog rows through
//! - `DualKeyMap`: Identity map addressable by id or by name
//! - `SharedSchemaCache`: Mutex-guarded handle for multi-threaded use (feature `sync`)
//!
//! # Example
//!
//! ```rust
//! use spacecache_core::{Result, Tuple, Value};
//! use spacecache_schema::{SchemaCache, SelectFn};
//!
//! let select = SelectFn::new(|_space, _index, key: &[Value]| -> Result<Vec<Tuple>> {
//!     Ok(match key {
//!         [Value::Unsigned(512)] => vec![Tuple::new(vec![
//!             Value::Unsigned(512),
//!             Value::Unsigned(0),
//!             Value::String("users".into()),
//!         ])],
//!         _ => vec![],
//!     })
//! });
//!
//! let mut cache = SchemaCache::new(select);
//! let space = cache.resolve_space(512).unwrap();
//! assert_eq!(space.name(), "users");
//!
//! // Served from memory, under either key.
//! assert!(std::sync::Arc::ptr_eq(&space, &cache.resolve_space("users").unwrap()));
//! assert_eq!(cache.stats().fetches(), 1);
//! ```

#![no_std]

extern crate alloc;

pub mod cache;
pub mod client;
pub mod index;
pub mod registry;
pub mod space;
#[cfg(feature = "sync")]
pub mod sync;

pub use cache::{CacheStats, SchemaCache};
pub use client::{SelectClient, SelectFn};
pub use index::{IndexDescriptor, IndexPart, IndexType};
pub use registry::DualKeyMap;
pub use space::SpaceDescriptor;
#[cfg(feature = "sync")]
pub use sync::SharedSchemaCache;
