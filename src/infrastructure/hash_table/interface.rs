// Common map interface, used to compare the hash table with std and linked maps

use std::collections::HashMap;
use std::hash::Hash;

use linked_hash_map::LinkedHashMap;
use log::warn;

use super::HashTable;
use super::error::HashtableResult;
use crate::infrastructure::hash::{HashProvider, SipHashProvider};

/// A trait that defines a unified interface for key-value maps
///
/// `insert` is an upsert: an existing key keeps its place and gets the new
/// value.
pub trait HashMapInterface<K, V> {
    /// Insert or overwrite, returning the previous value
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    fn get(&self, key: &K) -> Option<&V>;

    fn remove(&mut self, key: &K) -> Option<V>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// std HashMap wrapper
pub struct StdHashMapWrapper<K, V> {
    inner: HashMap<K, V>,
}

impl<K: Hash + Eq, V> StdHashMapWrapper<K, V> {
    pub fn new() -> Self {
        StdHashMapWrapper {
            inner: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq, V> Default for StdHashMapWrapper<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> HashMapInterface<K, V> for StdHashMapWrapper<K, V> {
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.inner.insert(key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        self.inner.remove(key)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

// LinkedHashMap wrapper, keeps insertion order like HashTable
pub struct LinkedHashMapWrapper<K: Hash + Eq, V> {
    inner: LinkedHashMap<K, V>,
}

impl<K: Hash + Eq, V> LinkedHashMapWrapper<K, V> {
    pub fn new() -> Self {
        LinkedHashMapWrapper {
            inner: LinkedHashMap::new(),
        }
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.inner.keys()
    }
}

impl<K: Hash + Eq, V> Default for LinkedHashMapWrapper<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> HashMapInterface<K, V> for LinkedHashMapWrapper<K, V> {
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        // LinkedHashMap::insert would move an existing key to the back
        if let Some(current) = self.inner.get_mut(&key) {
            return Some(std::mem::replace(current, value));
        }
        self.inner.insert(key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        self.inner.remove(key)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

// HashTable wrapper
pub struct HashTableWrapper<K, V, H = SipHashProvider> {
    inner: HashTable<K, V, H>,
}

impl<K, V, H> HashTableWrapper<K, V, H> {
    pub fn new(table: HashTable<K, V, H>) -> Self {
        HashTableWrapper { inner: table }
    }

    pub fn inner(&self) -> &HashTable<K, V, H> {
        &self.inner
    }

    pub fn into_inner(self) -> HashTable<K, V, H> {
        self.inner
    }
}

impl<K, V> Default for HashTableWrapper<K, V, SipHashProvider> {
    fn default() -> Self {
        Self::new(HashTable::default())
    }
}

impl<K: Eq, V, H: HashProvider<K>> HashTableWrapper<K, V, H> {
    /// Upsert that reports a failed insertion instead of hiding it
    pub fn try_insert(&mut self, key: K, value: V) -> HashtableResult<Option<V>> {
        if self.inner.contains_key(&key) {
            return self.inner.set(&key, value).map(Some);
        }
        self.inner.add(key, value)?;
        Ok(None)
    }
}

impl<K: Eq, V, H: HashProvider<K>> HashMapInterface<K, V> for HashTableWrapper<K, V, H> {
    /// Panics in debug builds when the table cannot take the entry
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.try_insert(key, value) {
            Ok(previous) => previous,
            Err(err) => {
                warn!("Hash table insert failed: {}", err);
                debug_assert!(false, "hash table insert failed: {}", err);
                None
            }
        }
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key).ok()
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        self.inner.remove(key).ok()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
