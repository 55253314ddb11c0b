// src/index/iter.rs
// =============================================================================
// Lazy traversals over a Trie.
//
// Both iterators keep an explicit stack of (node, key-so-far) instead of
// recursing, so results are produced one at a time and nothing is collected
// up front. They borrow the trie, which means it cannot be mutated while a
// traversal is alive.
// =============================================================================

use super::key::{char_class, class_char, WILDCARD};
use super::trie::TrieNode;

/// Depth-first, pre-order iterator over `(key, value)` pairs.
pub struct Iter<'a, V> {
    stack: Vec<(&'a TrieNode<V>, String)>,
}

impl<'a, V> Iter<'a, V> {
    pub(super) fn new(start: &'a TrieNode<V>, prefix: String) -> Self {
        Self {
            stack: vec![(start, prefix)],
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, key)) = self.stack.pop() {
            // Reverse push so the lowest class is popped first
            for (class, child) in node.children.iter().enumerate().rev() {
                if let Some(child) = child {
                    let mut child_key = key.clone();
                    child_key.push(class_char(class));
                    self.stack.push((child, child_key));
                }
            }
            if let Some(value) = &node.value {
                return Some((key, value));
            }
        }
        None
    }
}

/// Iterator over entries matching a fixed-length wildcard pattern.
pub struct WildcardIter<'a, V> {
    // None marks a wildcard position
    pattern: Vec<Option<usize>>,
    stack: Vec<(&'a TrieNode<V>, String)>,
}

impl<'a, V> WildcardIter<'a, V> {
    pub(super) fn new(root: &'a TrieNode<V>, pattern: &str) -> Self {
        let pattern = pattern
            .chars()
            .map(|c| (c != WILDCARD).then(|| char_class(c)))
            .collect();
        Self {
            pattern,
            stack: vec![(root, String::new())],
        }
    }
}

impl<'a, V> Iterator for WildcardIter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, key)) = self.stack.pop() {
            // Reconstructed keys are ASCII, so byte length is depth
            let depth = key.len();
            if depth == self.pattern.len() {
                if let Some(value) = &node.value {
                    return Some((key, value));
                }
                continue;
            }

            match self.pattern[depth] {
                None => {
                    for (class, child) in node.children.iter().enumerate().rev() {
                        if let Some(child) = child {
                            let mut child_key = key.clone();
                            child_key.push(class_char(class));
                            self.stack.push((child, child_key));
                        }
                    }
                }
                Some(class) => {
                    if let Some(child) = node.child(class) {
                        let mut child_key = key;
                        child_key.push(class_char(class));
                        self.stack.push((child, child_key));
                    }
                }
            }
        }
        None
    }
}
