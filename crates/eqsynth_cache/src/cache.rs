//! The in-memory generation cache handed from one pass to the next.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use eqsynth_common::{EqResult, InternalError};

use crate::key::{StructuralKey, TypeIdentity};
use crate::unit::GeneratedUnit;

/// A cached synthesis result.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    /// Identity of the type the unit was synthesized for.
    pub identity: TypeIdentity,
    /// Instance member names the unit was synthesized from.
    pub members: Arc<[String]>,
    /// Key derived from `identity` and `members`.
    pub key: StructuralKey,
    /// The generated unit.
    pub unit: Arc<GeneratedUnit>,
}

/// Generated units indexed by structural key.
///
/// A pass reads the previous pass's cache and builds a fresh one, so a cache
/// is never mutated once handed over. Cloning is cheap: units and member
/// lists are shared.
#[derive(Clone, Debug, Default)]
pub struct GenerationCache {
    entries: BTreeMap<TypeIdentity, CacheEntry>,
    by_key: HashMap<StructuralKey, TypeIdentity>,
}

impl GenerationCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the entry stored under `key`.
    pub fn lookup(&self, key: StructuralKey) -> Option<&CacheEntry> {
        let identity = self.by_key.get(&key)?;
        self.entries.get(identity)
    }

    /// Returns the entry for a type identity, whatever its key.
    pub fn get(&self, identity: &TypeIdentity) -> Option<&CacheEntry> {
        self.entries.get(identity)
    }

    /// Returns `true` if an entry exists for `identity`.
    pub fn contains(&self, identity: &TypeIdentity) -> bool {
        self.entries.contains_key(identity)
    }

    /// Inserts an entry, replacing any earlier entry for the same identity.
    ///
    /// Fails if `entry.key` is already held by a different identity: a
    /// correct key derivation never produces such a collision.
    pub fn insert(&mut self, entry: CacheEntry) -> EqResult<()> {
        if let Some(holder) = self.by_key.get(&entry.key) {
            if *holder != entry.identity {
                return Err(InternalError::new(format!(
                    "structural key {} derived for both `{}` and `{}`",
                    entry.key, holder, entry.identity
                )));
            }
        }
        if let Some(previous) = self.entries.get(&entry.identity) {
            self.by_key.remove(&previous.key);
        }
        self.by_key.insert(entry.key, entry.identity.clone());
        self.entries.insert(entry.identity.clone(), entry);
        Ok(())
    }

    /// Number of cached types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in identity order.
    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.values()
    }

    /// Iterates over cached identities in order.
    pub fn identities(&self) -> impl Iterator<Item = &TypeIdentity> {
        self.entries.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(namespace: &str, name: &str, members: &[&str]) -> CacheEntry {
        let identity = TypeIdentity::new(namespace, name);
        let key = StructuralKey::derive(&identity, members);
        let members: Vec<String> = members.iter().map(|m| m.to_string()).collect();
        CacheEntry {
            unit: Arc::new(GeneratedUnit::new(name, "_ValueObject", members.join(","))),
            identity,
            members: members.into(),
            key,
        }
    }

    #[test]
    fn empty_cache() {
        let cache = GenerationCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn insert_then_lookup_by_key() {
        let mut cache = GenerationCache::new();
        let foo = entry("Demo", "Foo", &["X", "Y"]);
        let key = foo.key;
        cache.insert(foo).unwrap();
        let hit = cache.lookup(key).unwrap();
        assert_eq!(hit.identity, TypeIdentity::new("Demo", "Foo"));
        assert_eq!(hit.unit.output_key, "Foo_ValueObject");
    }

    #[test]
    fn replacing_identity_drops_old_key() {
        let mut cache = GenerationCache::new();
        let old = entry("Demo", "Foo", &["X"]);
        let old_key = old.key;
        cache.insert(old).unwrap();
        let new = entry("Demo", "Foo", &["X", "Y"]);
        let new_key = new.key;
        cache.insert(new).unwrap();

        assert_eq!(cache.len(), 1);
        assert!(cache.lookup(old_key).is_none());
        assert!(cache.lookup(new_key).is_some());
    }

    #[test]
    fn key_collision_across_identities_is_fatal() {
        let mut cache = GenerationCache::new();
        let foo = entry("Demo", "Foo", &["X"]);
        let forged = CacheEntry {
            identity: TypeIdentity::new("Demo", "Bar"),
            ..foo.clone()
        };
        cache.insert(foo).unwrap();
        let err = cache.insert(forged).unwrap_err();
        assert!(err.message.contains("Demo.Foo"));
        assert!(err.message.contains("Demo.Bar"));
    }

    #[test]
    fn reinserting_same_entry_is_fine() {
        let mut cache = GenerationCache::new();
        let foo = entry("Demo", "Foo", &["X"]);
        cache.insert(foo.clone()).unwrap();
        cache.insert(foo).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn identities_are_ordered() {
        let mut cache = GenerationCache::new();
        cache.insert(entry("Demo", "Zed", &[])).unwrap();
        cache.insert(entry("Demo", "Alpha", &[])).unwrap();
        let names: Vec<&str> = cache.identities().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zed"]);
    }

    #[test]
    fn clones_share_units() {
        let mut cache = GenerationCache::new();
        cache.insert(entry("Demo", "Foo", &["X"])).unwrap();
        let copy = cache.clone();
        let a = &cache.get(&TypeIdentity::new("Demo", "Foo")).unwrap().unit;
        let b = &copy.get(&TypeIdentity::new("Demo", "Foo")).unwrap().unit;
        assert!(Arc::ptr_eq(a, b));
    }
}
