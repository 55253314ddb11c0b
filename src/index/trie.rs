// src/index/trie.rs
// =============================================================================
// A 27-way prefix tree mapping string keys to values.
//
// Layout:
// - Every node owns up to 27 children, one per character class (key.rs)
// - A node is terminal when it holds a value (value: Some(_))
// - The Trie owns the root and counts terminal nodes, so len() is O(1)
//
// Invariant kept by delete(): apart from the root, no node exists that is both
// non-terminal and childless. Removing a key prunes every ancestor that is
// left in that state, walking back toward the root.
// =============================================================================

use std::fmt;

use crate::error::IndexError;

use super::iter::{Iter, WildcardIter};
use super::key::{char_class, normalize_key, ALPHABET_SIZE};

pub(super) struct TrieNode<V> {
    pub(super) children: [Option<Box<TrieNode<V>>>; ALPHABET_SIZE],
    pub(super) value: Option<V>,
}

impl<V> TrieNode<V> {
    fn new() -> Self {
        Self {
            children: std::array::from_fn(|_| None),
            value: None,
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    pub(super) fn child(&self, class: usize) -> Option<&TrieNode<V>> {
        self.children[class].as_deref()
    }
}

/// Prefix tree keyed by normalized characters.
///
/// Lookups are case-insensitive and fold every non-letter into one class, so
/// `"Don't"`, `"don-t"` and `"DON T"` all address the same entry. Keys handed
/// back by [`Trie::iter`], [`Trie::wildcard_search`] and [`Trie::autocomplete`]
/// are in canonical form (lowercase letters, `_` for anything else).
pub struct Trie<V> {
    root: TrieNode<V>,
    len: usize,
}

impl<V> Trie<V> {
    /// Creates an empty trie.
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
            len: 0,
        }
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Result<&V, IndexError> {
        self.find(key)
            .and_then(|node| node.value.as_ref())
            .ok_or_else(|| IndexError::NotFound(key.to_string()))
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Result<&mut V, IndexError> {
        let mut node = &mut self.root;
        for c in key.chars() {
            node = match node.children[char_class(c)].as_deref_mut() {
                Some(child) => child,
                None => return Err(IndexError::NotFound(key.to_string())),
            };
        }
        node.value
            .as_mut()
            .ok_or_else(|| IndexError::NotFound(key.to_string()))
    }

    /// Stores `value` under `key`, overwriting any previous value.
    ///
    /// Returns `true` when the key was not present before.
    pub fn set(&mut self, key: &str, value: V) -> bool {
        let mut node = &mut self.root;
        for c in key.chars() {
            node = &mut **node.children[char_class(c)]
                .get_or_insert_with(|| Box::new(TrieNode::new()));
        }

        let is_new = node.value.is_none();
        node.value = Some(value);
        if is_new {
            self.len += 1;
        }
        is_new
    }

    /// Removes `key` and returns its value.
    pub fn delete(&mut self, key: &str) -> Result<V, IndexError> {
        let classes: Vec<usize> = key.chars().map(char_class).collect();
        let (value, _) = remove(&mut self.root, &classes)
            .ok_or_else(|| IndexError::NotFound(key.to_string()))?;
        self.len -= 1;
        Ok(value)
    }

    /// Returns true if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    /// Number of keys currently present.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over every `(key, value)` pair in depth-first pre-order.
    ///
    /// A key is emitted before any longer key sharing its prefix, and children
    /// are visited in class order, so keys containing non-letters sort after
    /// all-letter keys with the same prefix. Calling `iter()` again restarts
    /// the traversal.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.root, String::new())
    }

    /// Iterates over entries whose key matches `pattern` position by position.
    ///
    /// `*` matches any single character class; every other character must
    /// match its own class. Only keys exactly as long as the pattern match.
    pub fn wildcard_search(&self, pattern: &str) -> WildcardIter<'_, V> {
        WildcardIter::new(&self.root, pattern)
    }

    /// Returns every key that starts with `prefix`, in [`Trie::iter`] order.
    ///
    /// The prefix is walked literally (`*` is not a wildcard here).
    pub fn autocomplete(&self, prefix: &str) -> Vec<String> {
        match self.find(prefix) {
            Some(node) => Iter::new(node, normalize_key(prefix))
                .map(|(key, _)| key)
                .collect(),
            None => Vec::new(),
        }
    }

    fn find(&self, key: &str) -> Option<&TrieNode<V>> {
        key.chars()
            .try_fold(&self.root, |node, c| node.child(char_class(c)))
    }
}

// Removes the value at the end of `key` below `node`.
//
// Returns the removed value and whether `node` itself is now prunable
// (non-terminal with no children). None means the key is absent.
fn remove<V>(node: &mut TrieNode<V>, key: &[usize]) -> Option<(V, bool)> {
    match key.split_first() {
        None => {
            let value = node.value.take()?;
            Some((value, node.is_leaf()))
        }
        Some((&class, rest)) => {
            let child = node.children[class].as_deref_mut()?;
            let (value, prune_child) = remove(child, rest)?;
            if prune_child {
                node.children[class] = None;
            }
            Some((value, node.value.is_none() && node.is_leaf()))
        }
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for Trie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: AsRef<str>, V> Extend<(K, V)> for Trie<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key.as_ref(), value);
        }
    }
}

impl<K: AsRef<str>, V> FromIterator<(K, V)> for Trie<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

impl<'a, V> IntoIterator for &'a Trie<V> {
    type Item = (String, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
