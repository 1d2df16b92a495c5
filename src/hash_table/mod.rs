//! # Hash Table
//!
//! A generic string-keyed associative store using open addressing with
//! quadratic probing: `h(k, i) = (hash(k) + i^2) mod capacity`. The table
//! doubles in capacity whenever the load factor reaches 0.5, rehashing every
//! live entry into the new buffer.
//!
//! This replaces the reference implementation's 27-multiplier rolling hash
//! (an intentionally non-contractual choice per the design notes) with
//! `std::hash::Hash`, and replaces its manual malloc/free discipline with
//! ordinary ownership: keys are owned `String`s, values are owned `V`.
//!
//! Duplicate-insert is an error, not a silent replace, matching the
//! reference's `HT_KEY_DUPLICATE` behavior.

#[cfg(test)]
mod tests;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const INITIAL_CAPACITY: usize = 32;
const LOAD_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateKey;

/// Open-addressed, quadratic-probing string-keyed hash table.
#[derive(Debug, Clone)]
pub struct HashTable<V> {
    slots: Vec<Option<(String, V)>>,
    len: usize,
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<V> HashTable<V> {
    /// Create an empty table. `initial_capacity` of 0 means "use the default".
    pub fn new(initial_capacity: usize) -> Self {
        let capacity = if initial_capacity == 0 {
            INITIAL_CAPACITY
        } else {
            initial_capacity
        };
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn hash_index(key: &str, capacity: usize) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % capacity
    }

    /// Insert `key -> value`. Fails with `DuplicateKey` if `key` is already present.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Result<(), DuplicateKey> {
        let key = key.into();
        if self.load_factor() >= LOAD_THRESHOLD {
            self.grow();
        }
        self.insert_raw(key, value)
    }

    fn load_factor(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    fn grow(&mut self) {
        let old = std::mem::take(&mut self.slots);
        let new_capacity = old.len() * 2;
        self.slots = (0..new_capacity).map(|_| None).collect();
        self.len = 0;
        for slot in old.into_iter().flatten() {
            let (key, value) = slot;
            // Capacity just doubled and every prior entry fit at load 0.5,
            // so re-insertion into the larger table cannot collide-forever.
            self.insert_raw(key, value).expect("rehash cannot duplicate");
        }
    }

    fn insert_raw(&mut self, key: String, value: V) -> Result<(), DuplicateKey> {
        let capacity = self.slots.len();
        let hash_index = Self::hash_index(&key, capacity);
        let mut i: usize = 1;
        let mut index = hash_index;
        while let Some((existing_key, _)) = &self.slots[index] {
            if *existing_key == key {
                return Err(DuplicateKey);
            }
            index = (hash_index + i * i) % capacity;
            i += 1;
        }
        self.slots[index] = Some((key, value));
        self.len += 1;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        let capacity = self.slots.len();
        let hash_index = Self::hash_index(key, capacity);
        let mut i: usize = 1;
        let mut index = hash_index;
        while let Some((existing_key, value)) = &self.slots[index] {
            if existing_key == key {
                return Some(value);
            }
            index = (hash_index + i * i) % capacity;
            i += 1;
        }
        None
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
