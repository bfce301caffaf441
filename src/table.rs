//! `SlotTable` — a keyed store with manually-managed values.
//!
//! A linear-probing hash table mapping plain keys to values held in
//! [`Slot`]s, so that reassigning a key replaces the value *in place*
//! inside its slot (old value destroyed exactly once, then the new value
//! stored) instead of swapping table entries.
//!
//! Implementation:
//! - Power-of-two capacity, linear probing, 75% load factor.
//! - Keys are stored plainly for lookups; values live in `Slot<V>`.
//! - Removal backfills the trailing probe cluster so lookups stay exact.
//!
//! ## Teardown
//!
//! Dropping a non-empty table does **not** destroy the stored values:
//! the table has no `Drop` impl and the slots never run destructors on
//! their own. This is a documented limitation of the manual-lifetime
//! protocol; call [`SlotTable::clear`] (or [`SlotTable::remove`] per key)
//! before the table goes out of scope.

use core::fmt;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash, Hasher};

use crate::error::NotFound;
use crate::optional::OptionSlot;
use crate::shape::Erase;
use crate::slot::Slot;

/// A hash map from `K` to manually-managed slots of `V`.
///
/// Invariant: every entry's slot is occupied.
///
/// # Examples
///
/// ```rust
/// use shroud::SlotTable;
///
/// let mut table = SlotTable::new();
/// table.insert("answer", 42u32);
/// table.insert("answer", 43u32); // replaced in place
///
/// assert_eq!(table.get(&"answer"), Ok(43));
/// assert_eq!(table.get_or(&"missing", 0), 0);
///
/// table.clear();
/// assert!(table.is_empty());
/// ```
pub struct SlotTable<K, V: Erase, S = RandomState> {
    buckets: Vec<Option<Entry<K, V>>>,
    len: usize,
    hash_builder: S,
}

struct Entry<K, V: Erase> {
    key: K,
    value: Slot<V>,
}

impl<K, V> SlotTable<K, V, RandomState>
where
    K: Eq + Hash,
    V: Erase,
{
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty table with at least the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let n = if capacity == 0 {
            0
        } else {
            capacity.next_power_of_two().max(8)
        };
        Self {
            buckets: (0..n).map(|_| None).collect(),
            len: 0,
            hash_builder: RandomState::new(),
        }
    }
}

impl<K, V, S> SlotTable<K, V, S>
where
    K: Eq + Hash,
    V: Erase,
    S: BuildHasher,
{
    /// Creates an empty table using the given hash builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            buckets: Vec::new(),
            len: 0,
            hash_builder,
        }
    }

    /// Returns the number of entries.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no entries.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current bucket capacity.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor (entries / capacity).
    #[inline]
    pub fn load_factor(&self) -> f32 {
        if self.buckets.is_empty() {
            0.0
        } else {
            self.len as f32 / self.buckets.len() as f32
        }
    }

    #[inline(always)]
    fn bucket_for(&self, key: &K) -> usize {
        let mut hasher = self.hash_builder.build_hasher();
        key.hash(&mut hasher);
        (hasher.finish() as usize) & (self.buckets.len() - 1)
    }

    #[inline(always)]
    fn find_index(&self, key: &K) -> Option<usize> {
        if self.buckets.is_empty() {
            return None;
        }
        let mut idx = self.bucket_for(key);
        loop {
            match &self.buckets[idx] {
                None => return None,
                Some(entry) if &entry.key == key => return Some(idx),
                _ => idx = (idx + 1) & (self.buckets.len() - 1),
            }
        }
    }

    /// Returns `true` if the table contains `key`.
    #[inline(always)]
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    /// Reserves capacity for at least `additional` more entries,
    /// rehashing into a larger power-of-two bucket array when needed.
    pub fn reserve(&mut self, additional: usize) {
        let needed = self.len.saturating_add(additional);
        if needed * 4 > self.buckets.len() * 3 {
            let new_capacity = (needed * 4 / 3 + 1).next_power_of_two().max(8);
            self.resize(new_capacity);
        }
    }

    fn resize(&mut self, new_capacity: usize) {
        let old_buckets =
            core::mem::replace(&mut self.buckets, (0..new_capacity).map(|_| None).collect());

        for entry in old_buckets.into_iter().flatten() {
            let mut idx = self.bucket_for(&entry.key);
            while self.buckets[idx].is_some() {
                idx = (idx + 1) & (new_capacity - 1);
            }
            self.buckets[idx] = Some(entry);
        }
    }

    /// Assigns `value` to `key`.
    ///
    /// If the key is present, the old value is destroyed exactly once and
    /// the new value stored in the same slot; otherwise a fresh entry is
    /// created. Maintains a 75% load factor.
    pub fn insert(&mut self, key: K, value: V) {
        if self.buckets.is_empty() || self.len * 4 >= self.buckets.len() * 3 {
            self.reserve(1);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.len, "slot table insert");

        let mut idx = self.bucket_for(&key);
        loop {
            match &mut self.buckets[idx] {
                None => {
                    self.buckets[idx] = Some(Entry {
                        key,
                        value: Slot::new(value),
                    });
                    self.len += 1;
                    return;
                }
                Some(entry) if entry.key == key => {
                    // In-place replacement: the slot keeps its address,
                    // the old occupant is destroyed, the new one stored.
                    // SAFETY: table invariant: entry slots are occupied.
                    unsafe { entry.value.replace(value) };
                    return;
                }
                _ => idx = (idx + 1) & (self.buckets.len() - 1),
            }
        }
    }

    /// Returns a copy of the value for `key`, or [`NotFound`].
    pub fn get(&self, key: &K) -> Result<V, NotFound>
    where
        V: Clone,
    {
        let idx = self.find_index(key).ok_or(NotFound)?;
        let entry = self.buckets[idx].as_ref().ok_or(NotFound)?;
        // SAFETY: table invariant: entry slots are occupied.
        Ok(unsafe { entry.value.peek() }.clone())
    }

    /// Returns a copy of the value for `key`, or `default` when absent.
    #[inline]
    pub fn get_or(&self, key: &K, default: V) -> V
    where
        V: Clone,
    {
        self.get(key).unwrap_or(default)
    }

    /// Returns the value for `key` wrapped in an [`OptionSlot`]: present
    /// when the key exists, absent otherwise.
    pub fn get_optional(&self, key: &K) -> OptionSlot<V>
    where
        V: Clone,
    {
        match self.get(key) {
            Ok(value) => OptionSlot::new(value),
            Err(NotFound) => OptionSlot::absent(),
        }
    }

    /// Removes `key`, destroying its value. Returns `false` when absent.
    ///
    /// The trailing probe cluster is re-seated so later lookups stay
    /// exact.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(idx) = self.find_index(key) else {
            return false;
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.len, "slot table remove");

        if let Some(mut entry) = self.buckets[idx].take() {
            // SAFETY: table invariant: entry slots are occupied.
            unsafe { entry.value.destroy() };
            self.len -= 1;
        }

        let mask = self.buckets.len() - 1;
        let mut next = (idx + 1) & mask;
        while let Some(entry) = self.buckets[next].take() {
            let mut target = self.bucket_for(&entry.key);
            while self.buckets[target].is_some() {
                target = (target + 1) & mask;
            }
            self.buckets[target] = Some(entry);
            next = (next + 1) & mask;
        }

        true
    }

    /// Removes all entries, destroying each value individually.
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.len, "slot table clear");

        for bucket in &mut self.buckets {
            if let Some(mut entry) = bucket.take() {
                // SAFETY: table invariant: entry slots are occupied.
                unsafe { entry.value.destroy() };
            }
        }
        self.len = 0;
    }

    /// Iterates over the keys.
    ///
    /// The table cannot be mutated while an iterator borrows it.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.buckets.iter().flatten().map(|entry| &entry.key)
    }

    /// Iterates over copies of the values.
    pub fn values(&self) -> impl Iterator<Item = V> + '_
    where
        V: Clone,
    {
        self.buckets
            .iter()
            .flatten()
            // SAFETY: table invariant: entry slots are occupied.
            .map(|entry| unsafe { entry.value.peek() }.clone())
    }

    /// Iterates over `(key, value copy)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&K, V)>
    where
        V: Clone,
    {
        self.buckets
            .iter()
            .flatten()
            // SAFETY: table invariant: entry slots are occupied.
            .map(|entry| (&entry.key, unsafe { entry.value.peek() }.clone()))
    }
}

impl<K, V> Default for SlotTable<K, V, RandomState>
where
    K: Eq + Hash,
    V: Erase,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> fmt::Debug for SlotTable<K, V, S>
where
    K: fmt::Debug,
    V: Erase + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.buckets
                    .iter()
                    .flatten()
                    // SAFETY: table invariant: entry slots are occupied.
                    .map(|entry| (&entry.key, unsafe { entry.value.peek() })),
            )
            .finish()
    }
}

#[cfg(feature = "serde")]
impl<K, V, S> serde::Serialize for SlotTable<K, V, S>
where
    K: serde::Serialize,
    V: Erase + serde::Serialize,
{
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len))?;
        for entry in self.buckets.iter().flatten() {
            // SAFETY: table invariant: entry slots are occupied.
            map.serialize_entry(&entry.key, unsafe { entry.value.peek() })?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, S> serde::Deserialize<'de> for SlotTable<K, V, S>
where
    K: serde::Deserialize<'de> + Eq + Hash,
    V: Erase + serde::Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let pairs = std::collections::HashMap::<K, V>::deserialize(deserializer)?;
        let mut table = Self::with_hasher(S::default());
        table.reserve(pairs.len());
        for (key, value) in pairs {
            table.insert(key, value);
        }
        Ok(table)
    }
}
