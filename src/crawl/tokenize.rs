// src/crawl/tokenize.rs
// Splits page text into words.
//
// A word is a maximal run of ASCII letters. Everything else (digits,
// punctuation, whitespace, non-ASCII letters) separates words. Case is kept
// exactly as found.

/// Returns the words of `text` in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
