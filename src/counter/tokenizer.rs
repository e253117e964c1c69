use once_cell::sync::Lazy;
use regex::Regex;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Splits text into lowercase word tokens.
///
/// A token is a maximal run of word characters (letters, digits, `_`); every
/// other character run is a separator and never produces a token.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD.find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Tokenizes raw resource bytes.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD, which is not a word
/// character, so binary content splits into whatever text runs it contains.
pub fn tokenize_bytes(bytes: &[u8]) -> Vec<String> {
    tokenize(&String::from_utf8_lossy(bytes))
}
