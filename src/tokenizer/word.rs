// file: src/tokenizer/word.rs
// description: regex-driven word tokenization within a sentence
// reference: https://docs.rs/regex

use crate::error::Result;
use regex::Regex;
use std::ops::Range;

pub const DEFAULT_WORD_PATTERN: &str = r"\S+";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub index: usize,
    pub span: Range<usize>,
    pub text: &'a str,
}

#[derive(Debug, Clone)]
pub struct WordTokenizer {
    pattern: Regex,
}

impl WordTokenizer {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Empty matches are never tokens, so patterns such as `\w*` are safe.
    pub fn tokenize<'a>(&self, sentence: &'a str) -> Vec<Token<'a>> {
        self.pattern
            .find_iter(sentence)
            .filter(|m| !m.as_str().is_empty())
            .enumerate()
            .map(|(index, m)| Token {
                index,
                span: m.range(),
                text: m.as_str(),
            })
            .collect()
    }

    pub fn words<'a>(&self, sentence: &'a str) -> Vec<&'a str> {
        self.tokenize(sentence).into_iter().map(|t| t.text).collect()
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_WORD_PATTERN).expect("default word pattern is valid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuizError;

    #[test]
    fn test_default_pattern_splits_on_whitespace() {
        let tokenizer = WordTokenizer::default();
        assert_eq!(
            tokenizer.words("I have  a red\tcar ."),
            vec!["I", "have", "a", "red", "car", "."]
        );
    }

    #[test]
    fn test_token_spans_point_into_sentence() {
        let tokenizer = WordTokenizer::default();
        let sentence = "I loved cats .";
        let tokens = tokenizer.tokenize(sentence);

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1].index, 1);
        assert_eq!(&sentence[tokens[1].span.clone()], "loved");
    }

    #[test]
    fn test_custom_pattern() {
        let tokenizer = WordTokenizer::new(r"[\p{L}']+").unwrap();
        assert_eq!(
            tokenizer.words("don't stop, believing."),
            vec!["don't", "stop", "believing"]
        );
    }

    #[test]
    fn test_empty_matches_are_skipped() {
        let tokenizer = WordTokenizer::new(r"\w*").unwrap();
        assert_eq!(tokenizer.words("a , b"), vec!["a", "b"]);
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        assert!(matches!(
            WordTokenizer::new("(unclosed"),
            Err(QuizError::Config(_))
        ));
    }
}
