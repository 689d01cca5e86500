//! Identity-keyed instance map owned by the composing application
//!
//! Opening the same key twice returns the existing instance instead of
//! building a second one. Iteration follows insertion order.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug)]
pub struct Registry<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Default for Registry<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> Registry<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the instance for `key`, building it with `init` on first use
    pub fn get_or_insert_with<F>(&mut self, key: K, init: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.entries.push((key.clone(), init()));
                self.index.insert(key, slot);
                slot
            }
        };
        &mut self.entries[slot].1
    }

    /// Fallible variant of [`Registry::get_or_insert_with`]
    pub fn get_or_try_insert_with<F, E>(&mut self, key: K, init: F) -> Result<&mut V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let value = init()?;
                let slot = self.entries.len();
                self.entries.push((key.clone(), value));
                self.index.insert(key, slot);
                slot
            }
        };
        Ok(&mut self.entries[slot].1)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.index.get(key).map(|&slot| &mut self.entries[slot].1)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Insertion position of `key`
    pub fn slot_of(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Instance at insertion position `slot`
    pub fn at(&self, slot: usize) -> Option<&V> {
        self.entries.get(slot).map(|(_, v)| v)
    }

    pub fn at_mut(&mut self, slot: usize) -> Option<&mut V> {
        self.entries.get_mut(slot).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.iter_mut().map(|(_, v)| v)
    }
}
