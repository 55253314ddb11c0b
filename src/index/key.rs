// src/index/key.rs
// =============================================================================
// Key normalization for the prefix tree.
//
// Every character of a key is folded into one of 27 classes:
// - ASCII letters a-z / A-Z -> 0..=25 (case-insensitive)
// - anything else           -> 26
//
// Going back from a class to a character is lossy: class 26 always becomes
// PLACEHOLDER and letters always come back lowercase. Keys reported by the
// traversals are therefore in canonical form (see normalize_key).
// =============================================================================

/// Number of child slots per node.
pub const ALPHABET_SIZE: usize = 27;

/// Class used for every non-letter character.
pub const OTHER_CLASS: usize = 26;

/// Character used when reconstructing class 26.
pub const PLACEHOLDER: char = '_';

/// Wildcard character accepted by wildcard patterns.
pub const WILDCARD: char = '*';

/// Maps a character to its class in `0..=26`.
pub fn char_class(c: char) -> usize {
    if c.is_ascii_alphabetic() {
        (c.to_ascii_lowercase() as u8 - b'a') as usize
    } else {
        OTHER_CLASS
    }
}

/// Maps a class back to the character used in reconstructed keys.
pub fn class_char(class: usize) -> char {
    debug_assert!(class < ALPHABET_SIZE);
    if class < OTHER_CLASS {
        (b'a' + class as u8) as char
    } else {
        PLACEHOLDER
    }
}

/// Returns the canonical form of `key`, as the traversals report it.
///
/// `normalize_key("Don't")` is `"don_t"`.
pub fn normalize_key(key: &str) -> String {
    key.chars().map(|c| class_char(char_class(c))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_case_insensitive() {
        assert_eq!(char_class('a'), 0);
        assert_eq!(char_class('A'), 0);
        assert_eq!(char_class('z'), 25);
        assert_eq!(char_class('Z'), 25);
        assert_eq!(char_class('m'), char_class('M'));
    }

    #[test]
    fn test_other_characters_share_one_class() {
        for c in ['_', '-', '1', ' ', '*', 'é', 'ß'] {
            assert_eq!(char_class(c), OTHER_CLASS, "{c:?}");
        }
    }

    #[test]
    fn test_class_char_inverse() {
        for class in 0..OTHER_CLASS {
            assert_eq!(char_class(class_char(class)), class);
        }
        assert_eq!(class_char(OTHER_CLASS), PLACEHOLDER);
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Don't"), "don_t");
        assert_eq!(normalize_key("HELLO"), "hello");
        assert_eq!(normalize_key(""), "");
    }
}
