//! Dual-keyed identity map.
//!
//! Every entry is stored once, keyed by its numeric id, and optionally
//! aliased by a name that points back at the id. A name never outlives its
//! entry: registering and removing always update both keys together, so a
//! lookup by id and a lookup by name can only ever reach the same value.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use spacecache_core::{Error, Locator, Result};

struct Slot<V> {
    name: String,
    value: V,
}

/// A map addressable by numeric id or, when the entry has one, by name.
pub struct DualKeyMap<V> {
    by_id: HashMap<u32, Slot<V>>,
    by_name: HashMap<String, u32>,
}

impl<V> DualKeyMap<V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Resolves a locator to the id of a registered entry.
    pub fn resolve(&self, locator: &Locator) -> Option<u32> {
        match locator {
            Locator::Id(id) => self.by_id.contains_key(id).then_some(*id),
            Locator::Name(name) => self.by_name.get(name.as_str()).copied(),
        }
    }

    /// Returns true if the locator resolves to an entry.
    #[inline]
    pub fn contains(&self, locator: &Locator) -> bool {
        self.resolve(locator).is_some()
    }

    /// Gets an entry by id or name.
    pub fn get(&self, locator: &Locator) -> Option<&V> {
        let id = self.resolve(locator)?;
        self.get_by_id(id)
    }

    /// Gets a mutable entry by id or name.
    pub fn get_mut(&mut self, locator: &Locator) -> Option<&mut V> {
        let id = self.resolve(locator)?;
        self.get_by_id_mut(id)
    }

    /// Gets an entry by id.
    #[inline]
    pub fn get_by_id(&self, id: u32) -> Option<&V> {
        self.by_id.get(&id).map(|slot| &slot.value)
    }

    /// Gets a mutable entry by id.
    #[inline]
    pub fn get_by_id_mut(&mut self, id: u32) -> Option<&mut V> {
        self.by_id.get_mut(&id).map(|slot| &mut slot.value)
    }

    /// Registers `value` under `id` and, if non-empty, under `name`.
    ///
    /// Any entry already holding the id or the name is dropped under both of
    /// its keys first. The displaced values are returned.
    pub fn insert(&mut self, id: u32, name: &str, value: V) -> Vec<V> {
        let mut evicted = Vec::new();
        if let Some(old) = self.take(id) {
            evicted.push(old);
        }
        if !name.is_empty() {
            if let Some(other) = self.by_name.get(name).copied() {
                if let Some(old) = self.take(other) {
                    evicted.push(old);
                }
            }
            self.by_name.insert(name.into(), id);
        }
        self.by_id.insert(
            id,
            Slot {
                name: name.into(),
                value,
            },
        );
        evicted
    }

    /// Removes the entry under `id` together with its name alias.
    pub fn remove(&mut self, id: u32) -> Result<V> {
        self.take(id)
            .ok_or_else(|| Error::stale_key(format!("id {}", id)))
    }

    /// Removes the entry under `id` only if `is_same` accepts it.
    ///
    /// Used to flush a specific instance: a newer entry registered under the
    /// same id is left untouched and the call reports a stale key.
    pub fn remove_if<F>(&mut self, id: u32, is_same: F) -> Result<V>
    where
        F: FnOnce(&V) -> bool,
    {
        let same = self.by_id.get(&id).is_some_and(|slot| is_same(&slot.value));
        if same {
            self.remove(id)
        } else {
            Err(Error::stale_key(format!("id {}", id)))
        }
    }

    fn take(&mut self, id: u32) -> Option<V> {
        let slot = self.by_id.remove(&id)?;
        if !slot.name.is_empty() && self.by_name.get(slot.name.as_str()) == Some(&id) {
            self.by_name.remove(slot.name.as_str());
        }
        Some(slot.value)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.by_id.clear();
        self.by_name.clear();
    }

    /// Returns the number of entries (not keys).
    #[inline]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if the map has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Returns the number of name aliases.
    #[inline]
    pub fn name_count(&self) -> usize {
        self.by_name.len()
    }

    /// Iterates over all entries in arbitrary order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.by_id.values().map(|slot| &slot.value)
    }
}

impl<V> Default for DualKeyMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get_by_both_keys() {
        let mut map = DualKeyMap::new();
        assert!(map.insert(7, "users", 'a').is_empty());

        assert_eq!(map.get(&Locator::from(7)), Some(&'a'));
        assert_eq!(map.get(&Locator::from("users")), Some(&'a'));
        assert_eq!(map.resolve(&Locator::from("users")), Some(7));
        assert_eq!(map.len(), 1);
        assert_eq!(map.name_count(), 1);
    }

    #[test]
    fn test_get_mut_by_either_key() {
        let mut map = DualKeyMap::new();
        map.insert(7, "users", 1u32);

        *map.get_mut(&Locator::from("users")).unwrap() += 1;
        *map.get_mut(&Locator::from(7)).unwrap() += 1;
        assert_eq!(map.get_by_id(7), Some(&3));
        assert!(map.get_mut(&Locator::from("orders")).is_none());
    }

    #[test]
    fn test_unnamed_entry() {
        let mut map = DualKeyMap::new();
        map.insert(3, "", 'x');

        assert_eq!(map.get(&Locator::from(3)), Some(&'x'));
        assert!(!map.contains(&Locator::from("")));
        assert_eq!(map.name_count(), 0);
    }

    #[test]
    fn test_remove_drops_both_keys() {
        let mut map = DualKeyMap::new();
        map.insert(7, "users", 'a');

        assert_eq!(map.remove(7).unwrap(), 'a');
        assert!(!map.contains(&Locator::from(7)));
        assert!(!map.contains(&Locator::from("users")));
        assert!(map.is_empty());
        assert_eq!(map.name_count(), 0);
    }

    #[test]
    fn test_remove_twice_is_stale() {
        let mut map = DualKeyMap::new();
        map.insert(7, "users", 'a');
        map.remove(7).unwrap();

        assert!(matches!(map.remove(7), Err(Error::StaleKey { .. })));
    }

    #[test]
    fn test_remove_if_rejects_other_instance() {
        let mut map = DualKeyMap::new();
        map.insert(7, "users", 'b');

        assert!(matches!(
            map.remove_if(7, |v| *v == 'a'),
            Err(Error::StaleKey { .. })
        ));
        assert_eq!(map.get(&Locator::from("users")), Some(&'b'));
        assert_eq!(map.remove_if(7, |v| *v == 'b').unwrap(), 'b');
    }

    #[test]
    fn test_reinsert_same_id_drops_old_name() {
        let mut map = DualKeyMap::new();
        map.insert(7, "people", 'a');

        let evicted = map.insert(7, "users", 'b');
        assert_eq!(evicted, alloc::vec!['a']);
        assert!(!map.contains(&Locator::from("people")));
        assert_eq!(map.get(&Locator::from("users")), Some(&'b'));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_reinsert_name_evicts_previous_owner() {
        let mut map = DualKeyMap::new();
        map.insert(7, "users", 'a');

        let evicted = map.insert(8, "users", 'b');
        assert_eq!(evicted, alloc::vec!['a']);
        assert!(!map.contains(&Locator::from(7)));
        assert_eq!(map.get(&Locator::from("users")), Some(&'b'));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut map = DualKeyMap::new();
        map.insert(1, "a", 1);
        map.insert(2, "b", 2);
        map.clear();

        assert!(map.is_empty());
        assert_eq!(map.name_count(), 0);
        assert_eq!(map.values().count(), 0);
    }
}
