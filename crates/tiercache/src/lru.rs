//! LRU (Least Recently Used) ordering
//!
//! Uses an intrusive linked list over a node arena for O(1) touch and
//! eviction. The head is the least recently used entry, the tail the most
//! recently used one.

use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;

/// Upper bound on slots reserved up front; larger caches grow on demand
const MAX_PREALLOC: usize = 1024;

/// Node in the LRU doubly-linked list
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Recency-ordered map with fixed capacity
pub struct LruCache<K, V> {
    map: HashMap<K, usize, RandomState>,
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");
        let reserve = capacity.min(MAX_PREALLOC);

        Self {
            map: HashMap::with_capacity_and_hasher(reserve, RandomState::new()),
            nodes: Vec::with_capacity(reserve),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
        }
    }

    /// Get a value and mark it most recently used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.move_to_back(idx);
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Get a value without touching recency
    pub fn peek(&self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Get a mutable value without touching recency
    pub fn peek_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = *self.map.get(key)?;
        self.nodes[idx].as_mut().map(|node| &mut node.value)
    }

    /// Check whether a key is resident
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Insert a key-value pair at the most recently used end
    ///
    /// An existing key is updated in place and touched. A new key in a full
    /// cache displaces the least recently used entry, which is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(node) = &mut self.nodes[idx] {
                node.value = value;
            }
            self.move_to_back(idx);
            return None;
        }

        let evicted = if self.map.len() >= self.capacity {
            self.pop_lru()
        } else {
            None
        };

        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key: key.clone(),
            value,
            prev: self.tail,
            next: None,
        });
        self.link_back(idx);
        self.map.insert(key, idx);

        evicted
    }

    /// Remove and return the least recently used entry
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let idx = self.head?;
        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.map.remove(&node.key);
        self.free_node(idx);
        Some((node.key, node.value))
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Check if the next new key would displace an entry
    pub fn is_full(&self) -> bool {
        self.map.len() >= self.capacity
    }

    /// Maximum number of resident entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterate keys from least to most recently used
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }

    /// Visit every entry from least to most recently used without touching
    /// recency
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V),
    {
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let Some(node) = self.nodes[idx].as_mut() else {
                break;
            };
            f(&node.key, &mut node.value);
            cursor = node.next;
        }
    }

    fn move_to_back(&mut self, idx: usize) {
        if self.tail == Some(idx) {
            return; // Already most recent
        }

        self.unlink(idx);

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = self.tail;
            node.next = None;
        }

        self.link_back(idx);
    }

    /// Attach an already-initialized node after the current tail
    fn link_back(&mut self, idx: usize) {
        if let Some(tail_idx) = self.tail {
            if let Some(tail) = &mut self.nodes[tail_idx] {
                tail.next = Some(idx);
            }
        }

        self.tail = Some(idx);
        if self.head.is_none() {
            self.head = Some(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = if let Some(node) = &self.nodes[idx] {
            (node.prev, node.next)
        } else {
            return;
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }

    fn free_node(&mut self, idx: usize) {
        self.free_list.push(idx);
    }
}

/// Iterator over keys in LRU -> MRU order
pub struct Keys<'a, K, V> {
    nodes: &'a [Option<Node<K, V>>],
    cursor: Option<usize>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.nodes[idx].as_ref()?;
        self.cursor = node.next;
        Some(&node.key)
    }
}
