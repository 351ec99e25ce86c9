//! Locators address a space or an index either by numeric id or by name.

use crate::value::Value;
use alloc::string::String;
use core::fmt;

/// Identifies a space or an index.
///
/// The wire protocol addresses objects by small integers while client code
/// usually spells them by name; both forms resolve to the same descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Numeric id.
    Id(u32),
    /// Name as declared on the server.
    Name(String),
}

impl Locator {
    /// Returns true if this locator is a name.
    #[inline]
    pub fn is_name(&self) -> bool {
        matches!(self, Locator::Name(_))
    }

    /// Returns `"name"` or `"id"`, matching how the locator was interpreted.
    pub fn kind(&self) -> &'static str {
        match self {
            Locator::Id(_) => "id",
            Locator::Name(_) => "name",
        }
    }

    /// Returns the id if this is an `Id` locator.
    pub fn as_id(&self) -> Option<u32> {
        match self {
            Locator::Id(id) => Some(*id),
            Locator::Name(_) => None,
        }
    }

    /// Returns the name if this is a `Name` locator.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Locator::Id(_) => None,
            Locator::Name(name) => Some(name.as_str()),
        }
    }

    /// Converts the locator into a key field for a catalog select.
    pub fn to_value(&self) -> Value {
        match self {
            Locator::Id(id) => Value::Unsigned(*id as u64),
            Locator::Name(name) => Value::String(name.clone()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(id) => write!(f, "{}", id),
            Locator::Name(name) => f.write_str(name),
        }
    }
}

impl From<u32> for Locator {
    fn from(id: u32) -> Self {
        Locator::Id(id)
    }
}

impl From<&str> for Locator {
    fn from(name: &str) -> Self {
        Locator::Name(name.into())
    }
}

impl From<String> for Locator {
    fn from(name: String) -> Self {
        Locator::Name(name)
    }
}

impl From<&String> for Locator {
    fn from(name: &String) -> Self {
        Locator::Name(name.clone())
    }
}

impl From<&Locator> for Locator {
    fn from(locator: &Locator) -> Self {
        locator.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_locator_kind() {
        assert_eq!(Locator::from(7).kind(), "id");
        assert_eq!(Locator::from("users").kind(), "name");
        assert!(Locator::from("users").is_name());
        assert!(!Locator::from(7).is_name());
    }

    #[test]
    fn test_locator_as_id_and_name() {
        assert_eq!(Locator::from(7).as_id(), Some(7));
        assert_eq!(Locator::from(7).as_name(), None);
        assert_eq!(Locator::from("users").as_id(), None);
        assert_eq!(Locator::from("users").as_name(), Some("users"));
    }

    #[test]
    fn test_locator_to_value() {
        assert_eq!(Locator::from(7).to_value(), Value::Unsigned(7));
        assert_eq!(Locator::from("users").to_value(), Value::String("users".into()));
    }

    #[test]
    fn test_locator_display() {
        assert_eq!(Locator::from(999).to_string(), "999");
        assert_eq!(Locator::from("ghost").to_string(), "ghost");
    }
}
