// Hash table with bucket-and-slot addressing and an insertion-ordered entry store
//
// Keys hash to a home bucket, a fixed run of slots in the slot arena. Lookups
// probe linearly from the bucket's first slot and spill into the following
// buckets when it is full. Slots hold positions into a dense entry store kept
// in insertion order; removal leaves a hole there so survivors never move.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Index;

use log::{debug, trace};

use crate::infrastructure::hash::{HashProvider, SipHashProvider};
use crate::types::{DEFAULT_BUCKETS, DEFAULT_GROWTH_FACTOR, DEFAULT_SLOTS_PER_BUCKET, Position};

pub mod config;
pub mod cursor;
pub mod error;
pub mod interface;

pub use config::HashtableConfig;
pub use cursor::{Cursor, Direction};
pub use error::{HashtableError, HashtableResult};
pub use interface::{HashMapInterface, HashTableWrapper, LinkedHashMapWrapper, StdHashMapWrapper};

/// Stored key-value pair with its cached hash
#[derive(Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: u64,
}

/// State of one cell of the slot arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Empty,
    /// Holds the position of an entry in the entry store
    Occupied(Position),
    /// Tombstone: skipped by lookups, reusable by insertions
    Deleted,
}

/// Per-bucket bookkeeping
#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    /// Occupied slots inside this bucket's slot range
    occupied: usize,
}

/// Linear probe over the whole slot arena, starting at a bucket's first slot
struct ProbeSequence {
    index: usize,
    remaining: usize,
    len: usize,
}

impl Iterator for ProbeSequence {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.index;
        self.index = (self.index + 1) % self.len;
        self.remaining -= 1;
        Some(index)
    }
}

/// Snapshot of a table's layout, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashtableStats {
    pub count: usize,
    pub capacity: usize,
    pub buckets: usize,
    pub slots_per_bucket: usize,
    /// Tombstones currently in the slot arena
    pub deleted_slots: usize,
    /// Removed entries still occupying a place in the entry store
    pub holes: usize,
    /// Highest number of occupied slots in a single bucket
    pub max_bucket_load: usize,
    /// Entries stored outside their home bucket
    pub displaced: usize,
    /// Longest probe needed to reach a stored entry
    pub longest_probe: usize,
}

/// Hash table structure
#[derive(Clone)]
pub struct HashTable<K, V, H = SipHashProvider> {
    buckets: Vec<Bucket>,
    slots: Vec<Slot>,
    slots_per_bucket: usize,
    /// Entries in insertion order; `None` marks a removed entry
    entries: Vec<Option<Entry<K, V>>>,
    capacity: usize,
    count: usize,
    deleted_slots: usize,
    growth_factor: usize,
    hasher: H,
}

impl<K, V> HashTable<K, V, SipHashProvider> {
    /// Create a table with `buckets * slots_per_bucket` capacity
    ///
    /// Fails with `InvalidCapacity` when either argument is zero.
    pub fn new(buckets: usize, slots_per_bucket: usize) -> HashtableResult<Self> {
        Self::with_hasher(buckets, slots_per_bucket, SipHashProvider)
    }
}

impl<K, V, H> HashTable<K, V, H> {
    /// Create a table that hashes keys with `hasher`
    pub fn with_hasher(buckets: usize, slots_per_bucket: usize, hasher: H) -> HashtableResult<Self> {
        Self::from_config(&HashtableConfig::new(buckets, slots_per_bucket), hasher)
    }

    /// Create a table shaped by a configuration
    pub fn from_config(config: &HashtableConfig, hasher: H) -> HashtableResult<Self> {
        config.validate()?;
        Ok(Self::build(
            config.buckets,
            config.slots_per_bucket,
            config.growth_factor,
            hasher,
        ))
    }

    // Arguments must already be validated
    fn build(buckets: usize, slots_per_bucket: usize, growth_factor: usize, hasher: H) -> Self {
        let capacity = buckets * slots_per_bucket;
        HashTable {
            buckets: vec![Bucket::default(); buckets],
            slots: vec![Slot::Empty; capacity],
            slots_per_bucket,
            entries: Vec::with_capacity(capacity),
            capacity,
            count: 0,
            deleted_slots: 0,
            growth_factor,
            hasher,
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Entries the table can hold before it compacts or grows
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn slots_per_bucket(&self) -> usize {
        self.slots_per_bucket
    }

    pub fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Occupied slots in one bucket, `None` when the bucket does not exist
    pub fn bucket_load(&self, bucket: usize) -> Option<usize> {
        self.buckets.get(bucket).map(|b| b.occupied)
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries.iter(),
            remaining: self.count,
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }

    /// Cursor on the first entry, or on the forward end when empty
    pub fn first(&self) -> Cursor<'_, K, V, H> {
        Cursor::first(self)
    }

    /// Cursor on the last entry, or on the forward end when empty
    pub fn last(&self) -> Cursor<'_, K, V, H> {
        Cursor::last(self)
    }

    /// Remove every entry, keeping the current capacity
    pub fn clear(&mut self) {
        self.entries.clear();
        self.slots.fill(Slot::Empty);
        self.buckets.iter_mut().for_each(|bucket| bucket.occupied = 0);
        self.count = 0;
        self.deleted_slots = 0;
    }

    /// Grow capacity to exactly `capacity`
    ///
    /// Does nothing, and moves nothing, when `capacity` is not above the
    /// current capacity.
    pub fn reserve(&mut self, capacity: usize) -> HashtableResult<()> {
        if capacity <= self.capacity {
            return Ok(());
        }
        debug!(
            "Reserving hash table capacity {} -> {}",
            self.capacity, capacity
        );
        self.rebuild(capacity)
    }

    /// Remove the entry stored at a cursor position
    ///
    /// A cursor opened afterwards at the same position lands on the entry
    /// that followed the removed one.
    pub fn remove_at(&mut self, position: Position) -> HashtableResult<(K, V)> {
        let invalid = HashtableError::InvalidPosition {
            position,
            capacity: self.capacity,
        };
        let hash = match self.entries.get(position) {
            Some(Some(entry)) => entry.hash,
            _ => return Err(invalid),
        };
        let slot = self.slot_of(hash, position).ok_or(invalid)?;
        let entry = self.release(slot, position).ok_or(HashtableError::InvalidPosition {
            position,
            capacity: self.capacity,
        })?;
        Ok((entry.key, entry.value))
    }

    pub fn stats(&self) -> HashtableStats {
        let len = self.slots.len();
        let mut displaced = 0;
        let mut longest_probe = 0;

        for (index, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied(position) = slot {
                if let Some(entry) = &self.entries[*position] {
                    let home = self.home_slot(entry.hash);
                    if index / self.slots_per_bucket != home / self.slots_per_bucket {
                        displaced += 1;
                    }
                    longest_probe = longest_probe.max((index + len - home) % len + 1);
                }
            }
        }

        HashtableStats {
            count: self.count,
            capacity: self.capacity,
            buckets: self.buckets.len(),
            slots_per_bucket: self.slots_per_bucket,
            deleted_slots: self.deleted_slots,
            holes: self.entries.len() - self.count,
            max_bucket_load: self.buckets.iter().map(|b| b.occupied).max().unwrap_or(0),
            displaced,
            longest_probe,
        }
    }

    // First live position at or after `from`
    pub(crate) fn next_position(&self, from: Position) -> Option<Position> {
        (from..self.entries.len()).find(|&position| self.entries[position].is_some())
    }

    // Last live position strictly before `before`
    pub(crate) fn prev_position(&self, before: Position) -> Option<Position> {
        (0..before.min(self.entries.len()))
            .rev()
            .find(|&position| self.entries[position].is_some())
    }

    // One past the highest position in use
    pub(crate) fn end_position(&self) -> Position {
        self.entries.len()
    }

    pub(crate) fn key_value_at(&self, position: Position) -> Option<(&K, &V)> {
        self.entries
            .get(position)
            .and_then(Option::as_ref)
            .map(|entry| (&entry.key, &entry.value))
    }

    fn home_slot(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize * self.slots_per_bucket
    }

    fn probe(&self, hash: u64) -> ProbeSequence {
        ProbeSequence {
            index: self.home_slot(hash),
            remaining: self.slots.len(),
            len: self.slots.len(),
        }
    }

    // Slot holding the entry at `position`
    fn slot_of(&self, hash: u64, position: Position) -> Option<usize> {
        for slot in self.probe(hash) {
            match self.slots[slot] {
                Slot::Empty => return None,
                Slot::Occupied(p) if p == position => return Some(slot),
                _ => {}
            }
        }
        None
    }

    // Claim the first free slot on the probe path of `hash`
    fn place(&mut self, hash: u64, position: Position) -> HashtableResult<usize> {
        let slot = self
            .probe(hash)
            .find(|&slot| !matches!(self.slots[slot], Slot::Occupied(_)))
            // The arena always has more slots than the entry store has places
            .ok_or(HashtableError::CapacityOverflow)?;

        if self.slots[slot] == Slot::Deleted {
            self.deleted_slots -= 1;
        }
        self.slots[slot] = Slot::Occupied(position);
        self.buckets[slot / self.slots_per_bucket].occupied += 1;
        Ok(slot)
    }

    // Unlink the entry at `position`, stored in `slot`
    fn release(&mut self, slot: usize, position: Position) -> Option<Entry<K, V>> {
        let entry = self.entries[position].take()?;

        self.slots[slot] = Slot::Deleted;
        self.deleted_slots += 1;
        self.buckets[slot / self.slots_per_bucket].occupied -= 1;
        self.count -= 1;

        // Trailing holes carry no order information
        while matches!(self.entries.last(), Some(None)) {
            self.entries.pop();
        }

        Some(entry)
    }

    // Make sure the next insertion has a place in the entry store
    fn make_room(&mut self) -> HashtableResult<()> {
        if self.entries.len() < self.capacity {
            if self.deleted_slots * 2 > self.slots.len() {
                trace!(
                    "Sweeping {} tombstones out of {} slots",
                    self.deleted_slots,
                    self.slots.len()
                );
                self.rebuild(self.capacity)?;
            }
            return Ok(());
        }

        if self.count < self.capacity {
            debug!(
                "Compacting hash table: {} entries, {} holes",
                self.count,
                self.entries.len() - self.count
            );
            return self.rebuild(self.capacity);
        }

        let new_capacity = self
            .capacity
            .checked_mul(self.growth_factor)
            .ok_or(HashtableError::CapacityOverflow)?;
        debug!(
            "Growing hash table from {} to {} entries",
            self.capacity, new_capacity
        );
        self.rebuild(new_capacity)
    }

    // Compact the entry store and re-place every entry into a fresh arena
    fn rebuild(&mut self, capacity: usize) -> HashtableResult<()> {
        let slots_per_bucket = capacity.div_ceil(self.buckets.len());
        let slot_count = self
            .buckets
            .len()
            .checked_mul(slots_per_bucket)
            .ok_or(HashtableError::CapacityOverflow)?;

        // Allocate before touching the table so a failure leaves it intact
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(capacity)
            .map_err(|_| HashtableError::CapacityOverflow)?;
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(slot_count)
            .map_err(|_| HashtableError::CapacityOverflow)?;
        slots.resize(slot_count, Slot::Empty);

        entries.extend(self.entries.drain(..).flatten().map(Some));

        self.entries = entries;
        self.slots = slots;
        self.buckets.iter_mut().for_each(|bucket| bucket.occupied = 0);
        self.slots_per_bucket = slots_per_bucket;
        self.capacity = capacity;
        self.deleted_slots = 0;

        for position in 0..self.entries.len() {
            if let Some(hash) = self.entries[position].as_ref().map(|entry| entry.hash) {
                self.place(hash, position)?;
            }
        }
        Ok(())
    }
}

impl<K, V, H> HashTable<K, V, H>
where
    K: Eq,
    H: HashProvider<K>,
{
    /// Insert a new entry and return a cursor on it
    ///
    /// Fails with `DuplicateKey` when the key is already stored. A full table
    /// compacts its holes or, when there are none, grows by its growth factor.
    pub fn add(&mut self, key: K, value: V) -> HashtableResult<Cursor<'_, K, V, H>> {
        let hash = <H as HashProvider<K>>::hash(&self.hasher, &key);
        if self.locate(hash, &key).is_some() {
            return Err(HashtableError::DuplicateKey);
        }

        self.make_room()?;

        let position = self.entries.len();
        self.place(hash, position)?;
        self.entries.push(Some(Entry { key, value, hash }));
        self.count += 1;

        Ok(Cursor::at_position(self, position))
    }

    /// Get the value stored for a key
    pub fn get<Q>(&self, key: &Q) -> HashtableResult<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashProvider<Q>,
    {
        let (_, position) = self.lookup(key).ok_or(HashtableError::KeyNotFound)?;
        self.entries[position]
            .as_ref()
            .map(|entry| &entry.value)
            .ok_or(HashtableError::KeyNotFound)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> HashtableResult<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashProvider<Q>,
    {
        let (_, position) = self.lookup(key).ok_or(HashtableError::KeyNotFound)?;
        self.entries[position]
            .as_mut()
            .map(|entry| &mut entry.value)
            .ok_or(HashtableError::KeyNotFound)
    }

    /// Overwrite the value of an existing key and return the old one
    pub fn set<Q>(&mut self, key: &Q, value: V) -> HashtableResult<V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashProvider<Q>,
    {
        let current = self.get_mut(key)?;
        Ok(std::mem::replace(current, value))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashProvider<Q>,
    {
        !self.is_empty() && self.lookup(key).is_some()
    }

    /// Cursor on the entry stored for a key
    pub fn find<Q>(&self, key: &Q) -> Option<Cursor<'_, K, V, H>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashProvider<Q>,
    {
        self.lookup(key)
            .map(|(_, position)| Cursor::at_position(self, position))
    }

    /// Remove a key and return its value
    ///
    /// The remaining entries keep their relative order.
    pub fn remove<Q>(&mut self, key: &Q) -> HashtableResult<V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashProvider<Q>,
    {
        let (slot, position) = self.lookup(key).ok_or(HashtableError::KeyNotFound)?;
        self.release(slot, position)
            .map(|entry| entry.value)
            .ok_or(HashtableError::KeyNotFound)
    }

    fn lookup<Q>(&self, key: &Q) -> Option<(usize, Position)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
        H: HashProvider<Q>,
    {
        let hash = <H as HashProvider<Q>>::hash(&self.hasher, key);
        self.locate(hash, key)
    }

    // Slot and position of a key, stopping at the first empty slot
    fn locate<Q>(&self, hash: u64, key: &Q) -> Option<(usize, Position)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        for slot in self.probe(hash) {
            match self.slots[slot] {
                Slot::Empty => return None,
                Slot::Deleted => {}
                Slot::Occupied(position) => {
                    if let Some(entry) = &self.entries[position] {
                        if entry.hash == hash && entry.key.borrow() == key {
                            return Some((slot, position));
                        }
                    }
                }
            }
        }
        None
    }
}

impl<K, V, H: Default> Default for HashTable<K, V, H> {
    fn default() -> Self {
        Self::build(
            DEFAULT_BUCKETS,
            DEFAULT_SLOTS_PER_BUCKET,
            DEFAULT_GROWTH_FACTOR,
            H::default(),
        )
    }
}

impl<K: fmt::Debug, V: fmt::Debug, H> fmt::Debug for HashTable<K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, Q, V, H> Index<&Q> for HashTable<K, V, H>
where
    K: Eq + Borrow<Q>,
    Q: Eq + ?Sized,
    H: HashProvider<K> + HashProvider<Q>,
{
    type Output = V;

    /// Panics when the key is not stored
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Ok(value) => value,
            Err(_) => panic!("key not found"),
        }
    }
}

/// Iterator over a table's entries in insertion order
pub struct Iter<'a, K, V> {
    inner: std::slice::Iter<'a, Option<Entry<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.by_ref().flatten().next()?;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let entry = self.inner.by_ref().rev().flatten().next()?;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, H> IntoIterator for &'a HashTable<K, V, H> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
