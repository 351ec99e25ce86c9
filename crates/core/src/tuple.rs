//! Tuple structure for catalog rows.
//!
//! This module defines the `Tuple` struct which represents a single row
//! returned by a `select` against a system catalog, plus typed field
//! accessors that report layout problems as `Error::MalformedRow`.

use crate::error::{Error, Result};
use crate::value::Value;
use alloc::format;
use alloc::vec::Vec;

/// A row returned by the server.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tuple {
    /// Fields indexed by position.
    values: Vec<Value>,
}

impl Tuple {
    /// Creates a new tuple from its fields.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Creates a tuple with no fields.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a reference to the fields.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consumes the tuple and returns its fields.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Gets the field at the given position.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Returns the number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this tuple has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Gets the field at `index`, failing if the tuple is too short.
    pub fn require(&self, index: usize, field: &str) -> Result<&Value> {
        self.values.get(index).ok_or_else(|| {
            Error::malformed_row(format!(
                "missing {} at position {} (row has {} fields)",
                field,
                index,
                self.values.len()
            ))
        })
    }

    /// Reads a non-negative integer that fits in u32.
    pub fn require_u32(&self, index: usize, field: &str) -> Result<u32> {
        let value = self.require(index, field)?;
        value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| unexpected(field, index, "unsigned", value))
    }

    /// Reads a string field.
    pub fn require_str(&self, index: usize, field: &str) -> Result<&str> {
        let value = self.require(index, field)?;
        value
            .as_str()
            .ok_or_else(|| unexpected(field, index, "string", value))
    }

    /// Reads a flag stored either as a boolean or as 0/1.
    pub fn require_flag(&self, index: usize, field: &str) -> Result<bool> {
        let value = self.require(index, field)?;
        match value {
            Value::Boolean(v) => Ok(*v),
            other => other
                .as_u64()
                .map(|v| v != 0)
                .ok_or_else(|| unexpected(field, index, "boolean", other)),
        }
    }
}

fn unexpected(field: &str, index: usize, expected: &str, got: &Value) -> Error {
    Error::malformed_row(format!(
        "{} at position {} must be {}, got {}",
        field,
        index,
        expected,
        got.type_name()
    ))
}

impl From<Vec<Value>> for Tuple {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}
