use std::{borrow::Borrow, fmt, ops::Deref, str::SplitWhitespace};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Characters a token may hold: word characters other than punctuation and numerals.
static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w&&[^\p{P}\p{N}]]+$").expect("token pattern"));

/// A normalized word: lowercase, non-empty, no whitespace, punctuation or numerals.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Returns `None` unless `word` is already in normalized form.
    pub fn new(word: &str) -> Option<Self> {
        let normalized = TOKEN.is_match(word) && word.to_lowercase() == word;
        normalized.then(|| Self(word.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for Token {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Token {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns raw corpus text into [`Token`]s.
///
/// Rules are applied in order: markup spans are stripped, ASCII punctuation and
/// numerals are removed, whitespace, other punctuation and any remaining
/// non-word characters collapse into single separators, the text is lowercased
/// and finally split on whitespace.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    markup: Regex,
    strip: Regex,
    separators: Regex,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            // `.` stops at line breaks, so a stray `<` never swallows the rest of the corpus
            markup: Regex::new(r"<.*?>").expect("markup pattern"),
            strip: Regex::new(r"[[:punct:]\p{N}]+").expect("strip pattern"),
            // `\w` keeps connector punctuation such as `‿`, so punctuation is named explicitly
            separators: Regex::new(r"[\s\W\p{P}]+").expect("separator pattern"),
        }
    }

    pub fn normalize(&self, raw: &str) -> Normalized {
        let text = self.markup.replace_all(raw, "");
        let text = self.strip.replace_all(&text, "");
        let text = self.separators.replace_all(&text, " ");
        Normalized {
            text: text.to_lowercase(),
        }
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalized corpus text. Every call to [`Normalized::tokens`] restarts from
/// the first token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    text: String,
}

impl Normalized {
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens {
            words: self.text.split_whitespace(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl<'a> IntoIterator for &'a Normalized {
    type Item = Token;
    type IntoIter = Tokens<'a>;

    fn into_iter(self) -> Tokens<'a> {
        self.tokens()
    }
}

pub struct Tokens<'a> {
    words: SplitWhitespace<'a>,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.words.next().map(|w| Token(w.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn words(raw: &str) -> Vec<String> {
        Tokenizer::new()
            .normalize(raw)
            .tokens()
            .map(Token::into_string)
            .collect()
    }

    #[test]
    fn test_lowercase_and_punctuation() {
        assert_eq!(
            words("The cat sat. The CAT sat!"),
            ["the", "cat", "sat", "the", "cat", "sat"]
        );
    }

    #[test]
    fn test_markup_stripped() {
        assert_eq!(words("<b>Go</b> go Go!"), ["go", "go", "go"]);
        assert_eq!(words("<a href=\"x\">link</a>text"), ["linktext"]);
    }

    #[test]
    fn test_markup_does_not_cross_lines() {
        assert_eq!(words("a < b\nc > d"), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_digits_removed() {
        assert_eq!(words("route 66 and r2d2"), ["route", "and", "rd"]);
        assert_eq!(words("1984"), Vec::<String>::new());
    }

    #[test]
    fn test_unicode_punctuation_separates() {
        assert_eq!(words("a\u{203F}b"), ["a", "b"]);
        assert_eq!(words("x\u{FE4D}y"), ["x", "y"]);
        assert_eq!(words("«quoted» ¿word?"), ["quoted", "word"]);
    }

    #[test]
    fn test_numerals_removed() {
        assert_eq!(words("chapter \u{216B}"), ["chapter"]);
        assert_eq!(words("x² ٣ items"), ["x", "items"]);
    }

    #[test]
    fn test_punctuation_joins_word() {
        assert_eq!(words("don't stop_me"), ["dont", "stopme"]);
    }

    #[test]
    fn test_unicode_separators() {
        assert_eq!(words("naïve—Café\t\n  ÉTÉ"), ["naïve", "café", "été"]);
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(words("").is_empty());
        assert!(words(" \n\t ... 123 <p></p>").is_empty());
    }

    #[test]
    fn test_tokens_restart() {
        let normalized = Tokenizer::new().normalize("one two three");
        let first: Vec<_> = normalized.tokens().collect();
        let second: Vec<_> = (&normalized).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_token_invariants() {
        let normalized = Tokenizer::new().normalize("Hello,   World! <i>x</i> 42 foo-bar");
        for token in normalized.tokens() {
            assert!(!token.is_empty());
            assert!(!token.chars().any(char::is_whitespace));
            assert_eq!(Token::new(&token), Some(token.clone()));
        }
    }

    #[test]
    fn test_checked_constructor() {
        assert!(Token::new("word").is_some());
        assert!(Token::new("").is_none());
        assert!(Token::new("Word").is_none());
        assert!(Token::new("two words").is_none());
        assert!(Token::new("w0rd").is_none());
        assert!(Token::new("end.").is_none());
        assert!(Token::new("a\u{203F}b").is_none());
        assert!(Token::new("\u{216B}").is_none());
        assert!(Token::new("a€b").is_none());
    }

    proptest! {
        #[test]
        fn tokens_hold_invariant_for_any_text(raw in "\\PC{0,200}") {
            let forbidden = Regex::new(r"[\s\p{P}\p{N}]").unwrap();
            for token in Tokenizer::new().normalize(&raw).tokens() {
                prop_assert!(!token.is_empty());
                prop_assert!(!forbidden.is_match(&token), "{:?}", token);
                prop_assert_eq!(Token::new(&token), Some(token.clone()));
            }
        }
    }
}
