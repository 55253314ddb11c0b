// src/index/mod.rs
// =============================================================================
// The word index: a prefix tree with wildcard and prefix search.
//
// Submodules:
// - key: character classes and canonical key reconstruction
// - trie: the tree itself (get / set / delete / search)
// - iter: lazy traversals returned by Trie::iter and Trie::wildcard_search
//
// KeyValueIndex is the mapping interface the rest of the crate programs
// against; Trie is its only implementation.
// =============================================================================

mod iter;
mod key;
mod trie;

pub use iter::{Iter, WildcardIter};
pub use key::{char_class, class_char, normalize_key, PLACEHOLDER, WILDCARD};
pub use trie::Trie;

use crate::error::IndexError;

/// Mapping interface over string keys.
pub trait KeyValueIndex<V> {
    /// Returns the value for `key`, or `IndexError::NotFound`.
    fn get(&self, key: &str) -> Result<&V, IndexError>;

    /// Inserts or overwrites; returns true when the key is new.
    fn set(&mut self, key: &str, value: V) -> bool;

    /// Removes `key`, or fails with `IndexError::NotFound`.
    fn delete(&mut self, key: &str) -> Result<V, IndexError>;

    fn len(&self) -> usize;

    /// Every `(key, value)` pair, in the index's own order.
    fn entries(&self) -> Box<dyn Iterator<Item = (String, &V)> + '_>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> KeyValueIndex<V> for Trie<V> {
    fn get(&self, key: &str) -> Result<&V, IndexError> {
        Trie::get(self, key)
    }

    fn set(&mut self, key: &str, value: V) -> bool {
        Trie::set(self, key, value)
    }

    fn delete(&mut self, key: &str) -> Result<V, IndexError> {
        Trie::delete(self, key)
    }

    fn len(&self) -> usize {
        Trie::len(self)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (String, &V)> + '_> {
        Box::new(self.iter())
    }
}

/// Extracts an index key from an untyped JSON value.
///
/// Anything other than a JSON string is a `TypeMismatch`.
pub fn key_from_json(value: &serde_json::Value) -> Result<&str, IndexError> {
    value
        .as_str()
        .ok_or_else(|| IndexError::TypeMismatch(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Exercises the trait object path rather than the inherent methods
    fn fill(index: &mut dyn KeyValueIndex<u32>) {
        assert!(index.set("one", 1));
        assert!(index.set("two", 2));
        assert!(!index.set("ONE", 11));
    }

    #[test]
    fn test_trie_through_trait() {
        let mut trie = Trie::new();
        fill(&mut trie);

        let index: &mut dyn KeyValueIndex<u32> = &mut trie;
        assert_eq!(index.len(), 2);
        assert!(index.contains("one"));
        assert_eq!(index.get("one"), Ok(&11));
        assert_eq!(index.delete("two"), Ok(2));
        assert!(!index.contains("two"));
        assert_eq!(
            index.delete("two"),
            Err(IndexError::NotFound("two".to_string()))
        );

        let entries: Vec<_> = index.entries().collect();
        assert_eq!(entries, vec![("one".to_string(), &11)]);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_key_from_json() {
        let mut trie = Trie::new();
        trie.set("word", 1);

        let value = json!("word");
        let key = key_from_json(&value).unwrap();
        assert_eq!(trie.get(key), Ok(&1));

        assert_eq!(
            key_from_json(&json!(42)),
            Err(IndexError::TypeMismatch("42".to_string()))
        );
        assert!(matches!(
            key_from_json(&json!(["word"])),
            Err(IndexError::TypeMismatch(_))
        ));
        assert!(matches!(
            key_from_json(&serde_json::Value::Null),
            Err(IndexError::TypeMismatch(_))
        ));
    }
}
