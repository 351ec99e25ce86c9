//! Spacecache Core - Core types for the schema catalog client.
//!
//! This crate provides the foundational types shared by the cache layer:
//!
//! - `Value`: One field of a tuple returned by the server
//! - `Tuple`: A catalog row, with typed field accessors
//! - `Locator`: A space or index address, either numeric id or name
//! - `CatalogConfig`: Ids of the system catalogs and their access paths
//! - `Error`: Error types for catalog resolution
//!
//! # Example
//!
//! ```rust
//! use spacecache_core::{Locator, Tuple, Value};
//!
//! let row = Tuple::new(vec![
//!     Value::Unsigned(512),
//!     Value::Unsigned(0),
//!     Value::String("users".into()),
//! ]);
//!
//! assert_eq!(row.require_u32(0, "space id").unwrap(), 512);
//! assert_eq!(row.require_str(2, "space name").unwrap(), "users");
//! assert_eq!(Locator::from("users").kind(), "name");
//! ```

#![no_std]

extern crate alloc;

pub mod config;
mod error;
mod locator;
mod tuple;
mod value;

pub use config::CatalogConfig;
pub use error::{Error, Result};
pub use locator::Locator;
pub use tuple::Tuple;
pub use value::Value;
