//! Error types for the schema catalog client.

use crate::locator::Locator;
use alloc::string::String;
use core::fmt;

/// Result type alias for catalog operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for catalog resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// No catalog row for the requested space.
    SpaceNotFound {
        locator: Locator,
    },
    /// No catalog row for the requested index within a space.
    IndexNotFound {
        space: String,
        locator: Locator,
    },
    /// A unique-keyed catalog lookup returned more than one row.
    MalformedResponse {
        catalog: u32,
        rows: usize,
    },
    /// A catalog row does not have the expected layout.
    MalformedRow {
        message: String,
    },
    /// A key that should be registered is no longer present.
    StaleKey {
        key: String,
    },
    /// The select collaborator failed.
    Transport {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SpaceNotFound { locator } => {
                write!(f, "There's no space with {} '{}'", locator.kind(), locator)
            }
            Error::IndexNotFound { space, locator } => {
                write!(
                    f,
                    "There's no index with {} '{}' in space '{}'",
                    locator.kind(),
                    locator,
                    space
                )
            }
            Error::MalformedResponse { catalog, rows } => {
                write!(
                    f,
                    "Malformed server response: catalog {} returned {} rows for a unique key",
                    catalog, rows
                )
            }
            Error::MalformedRow { message } => {
                write!(f, "Malformed catalog row: {}", message)
            }
            Error::StaleKey { key } => {
                write!(f, "Key not present: {}", key)
            }
            Error::Transport { message } => {
                write!(f, "Transport error: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates a space not found error.
    pub fn space_not_found(locator: impl Into<Locator>) -> Self {
        Error::SpaceNotFound {
            locator: locator.into(),
        }
    }

    /// Creates an index not found error.
    pub fn index_not_found(space: impl Into<String>, locator: impl Into<Locator>) -> Self {
        Error::IndexNotFound {
            space: space.into(),
            locator: locator.into(),
        }
    }

    /// Creates a malformed response error.
    pub fn malformed_response(catalog: u32, rows: usize) -> Self {
        Error::MalformedResponse { catalog, rows }
    }

    /// Creates a malformed row error.
    pub fn malformed_row(message: impl Into<String>) -> Self {
        Error::MalformedRow {
            message: message.into(),
        }
    }

    /// Creates a stale key error.
    pub fn stale_key(key: impl Into<String>) -> Self {
        Error::StaleKey { key: key.into() }
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport {
            message: message.into(),
        }
    }

    /// Returns true for the recoverable "no such space/index" conditions.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::SpaceNotFound { .. } | Error::IndexNotFound { .. })
    }
}
