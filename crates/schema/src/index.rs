//! Index descriptor parsed from an `_index` catalog row.

use crate::space::SpaceDescriptor;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use spacecache_core::{Error, Result, Tuple, Value};

const FIELD_SPACE_ID: usize = 0;
const FIELD_ID: usize = 1;
const FIELD_NAME: usize = 2;
const FIELD_TYPE: usize = 3;
const FIELD_UNIQUE: usize = 4;
const FIELD_PART_COUNT: usize = 5;
/// First (field-position, field-type) pair.
const FIELD_PARTS: usize = 6;

/// Index type enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexType {
    /// B+Tree index - ordered, supports range scans.
    Tree,
    /// Hash index - point lookups only.
    Hash,
    /// Bitset index.
    Bitset,
    /// R-Tree index - spatial.
    RTree,
}

impl IndexType {
    /// Classifies a type tag as stored in the catalog, case-insensitively.
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag.eq_ignore_ascii_case("tree") {
            Some(IndexType::Tree)
        } else if tag.eq_ignore_ascii_case("hash") {
            Some(IndexType::Hash)
        } else if tag.eq_ignore_ascii_case("bitset") {
            Some(IndexType::Bitset)
        } else if tag.eq_ignore_ascii_case("rtree") {
            Some(IndexType::RTree)
        } else {
            None
        }
    }
}

/// One key part of an index: which field, and how it is typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexPart {
    /// Zero-based field position in the space's tuples.
    pub field_no: u32,
    /// Field type tag as declared on the server (e.g. `NUM`, `STR`).
    pub field_type: String,
}

/// An index of a space as declared on the server.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexDescriptor {
    /// Id of the owning space. Not an owning reference.
    space_id: u32,
    /// Index id, unique within the space.
    id: u32,
    /// Index name, empty when unnamed.
    name: String,
    /// Raw type tag, passed through unchanged.
    kind: Value,
    /// Whether this index enforces uniqueness.
    unique: bool,
    /// Key parts in key order.
    parts: Vec<IndexPart>,
}

impl IndexDescriptor {
    /// Parses an `_index` row belonging to `space`.
    ///
    /// The row is laid out as
    /// `[space_id, index_id, name, type, unique, part_count, (field_no, field_type) * part_count]`.
    /// A row that does not carry every declared part is rejected rather than
    /// truncated, as is a row describing some other space.
    pub fn from_tuple(tuple: &Tuple, space: &SpaceDescriptor) -> Result<Self> {
        let space_id = tuple.require_u32(FIELD_SPACE_ID, "index space id")?;
        if space_id != space.id() {
            return Err(Error::malformed_row(format!(
                "index row belongs to space {}, expected {}",
                space_id,
                space.id()
            )));
        }
        let id = tuple.require_u32(FIELD_ID, "index id")?;
        let name = tuple.require_str(FIELD_NAME, "index name")?;
        let kind = tuple.require(FIELD_TYPE, "index type")?.clone();
        let unique = tuple.require_flag(FIELD_UNIQUE, "index unique flag")?;
        let part_count = tuple.require_u32(FIELD_PART_COUNT, "index part count")? as usize;

        let declared_end = FIELD_PARTS.saturating_add(part_count.saturating_mul(2));
        if tuple.len() < declared_end {
            return Err(Error::malformed_row(format!(
                "index '{}' declares {} parts but row has {} fields, need {}",
                name,
                part_count,
                tuple.len(),
                declared_end
            )));
        }

        let mut parts = Vec::with_capacity(part_count);
        for i in 0..part_count {
            let pos = FIELD_PARTS + i * 2;
            parts.push(IndexPart {
                field_no: tuple.require_u32(pos, "part field number")?,
                field_type: tuple.require_str(pos + 1, "part field type")?.into(),
            });
        }

        Ok(Self {
            space_id,
            id,
            name: name.into(),
            kind,
            unique,
            parts,
        })
    }

    /// Returns the id of the owning space.
    #[inline]
    pub fn space_id(&self) -> u32 {
        self.space_id
    }

    /// Returns the index id.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the index name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the index has a name.
    #[inline]
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    /// Returns the raw type tag from the catalog row.
    #[inline]
    pub fn kind(&self) -> &Value {
        &self.kind
    }

    /// Returns the index type if the tag is one of the known ones.
    pub fn index_type(&self) -> Option<IndexType> {
        self.kind.as_str().and_then(IndexType::from_tag)
    }

    /// Returns whether this index is unique.
    #[inline]
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Returns the key parts in key order.
    #[inline]
    pub fn parts(&self) -> &[IndexPart] {
        &self.parts
    }

    /// Returns the field positions that make up the key, in key order.
    pub fn field_numbers(&self) -> Vec<u32> {
        self.parts.iter().map(|p| p.field_no).collect()
    }
}
