// file: src/tokenizer/sentence.rs
// description: sentence segmentation on a configurable terminal punctuation set
// reference: https://doc.rust-lang.org/std/primitive.str.html#method.char_indices

use crate::error::{QuizError, Result};
use std::ops::Range;

pub const DEFAULT_TERMINATORS: &str = ".!?。！？";

/// A sentence borrowed from the text it was split from.
///
/// `span` is the raw byte range, including whitespace that precedes the
/// sentence; the spans of all sentences tile the input. `text` is the trimmed
/// sentence content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence<'a> {
    pub index: usize,
    pub span: Range<usize>,
    pub text: &'a str,
}

#[derive(Debug, Clone)]
pub struct SentenceTokenizer {
    terminators: Vec<char>,
}

impl SentenceTokenizer {
    pub fn new(terminators: impl IntoIterator<Item = char>) -> Result<Self> {
        let mut terminators: Vec<char> = terminators
            .into_iter()
            .filter(|c| !c.is_whitespace())
            .collect();
        terminators.sort_unstable();
        terminators.dedup();

        if terminators.is_empty() {
            return Err(QuizError::Config(
                "sentence terminator set must not be empty".to_string(),
            ));
        }

        Ok(Self { terminators })
    }

    pub fn from_config(terminators: &str) -> Result<Self> {
        Self::new(terminators.chars())
    }

    pub fn terminators(&self) -> &[char] {
        &self.terminators
    }

    fn is_terminator(&self, c: char) -> bool {
        self.terminators.binary_search(&c).is_ok()
    }

    /// A run of terminators closes a sentence unless it sits between two
    /// ASCII digits, as in `3.50`.
    pub fn split_into_sentences<'a>(&self, text: &'a str) -> Vec<Sentence<'a>> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut in_terminator_run = false;
        let mut before_run = None;
        let mut prev = None;

        for (offset, c) in text.char_indices() {
            if self.is_terminator(c) {
                if !in_terminator_run {
                    before_run = prev;
                    in_terminator_run = true;
                }
                prev = Some(c);
                continue;
            }

            if in_terminator_run {
                let inside_number =
                    c.is_ascii_digit() && before_run.is_some_and(|b: char| b.is_ascii_digit());
                if !inside_number {
                    self.push_sentence(text, start..offset, &mut sentences);
                    start = offset;
                }
                in_terminator_run = false;
            }
            prev = Some(c);
        }

        let tail = &text[start..];
        if !tail.trim().is_empty() {
            self.push_sentence(text, start..text.len(), &mut sentences);
        } else if let Some(last) = sentences.last_mut() {
            last.span.end = text.len();
        }

        sentences
    }

    pub fn count(&self, text: &str) -> usize {
        self.split_into_sentences(text).len()
    }

    pub fn sentence_at<'a>(&self, index: usize, text: &'a str) -> Result<Sentence<'a>> {
        let mut sentences = self.split_into_sentences(text);
        let count = sentences.len();

        if index >= count {
            return Err(QuizError::IndexOutOfRange { index, count });
        }

        Ok(sentences.swap_remove(index))
    }

    fn push_sentence<'a>(
        &self,
        text: &'a str,
        span: Range<usize>,
        sentences: &mut Vec<Sentence<'a>>,
    ) {
        let trimmed = text[span.clone()].trim();

        sentences.push(Sentence {
            index: sentences.len(),
            span,
            text: trimmed,
        });
    }
}

impl Default for SentenceTokenizer {
    fn default() -> Self {
        Self {
            terminators: {
                let mut chars: Vec<char> = DEFAULT_TERMINATORS.chars().collect();
                chars.sort_unstable();
                chars
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts<'a>(sentences: &[Sentence<'a>]) -> Vec<&'a str> {
        sentences.iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_split_basic() {
        let tokenizer = SentenceTokenizer::default();
        let sentences = tokenizer.split_into_sentences("I love cats . I have a red car .");

        assert_eq!(texts(&sentences), vec!["I love cats .", "I have a red car ."]);
        assert_eq!(sentences[1].index, 1);
    }

    #[test]
    fn test_trailing_fragment_is_a_sentence() {
        let tokenizer = SentenceTokenizer::default();
        let sentences = tokenizer.split_into_sentences("First one! And then the rest");

        assert_eq!(texts(&sentences), vec!["First one!", "And then the rest"]);
    }

    #[test]
    fn test_terminator_run_closes_one_sentence() {
        let tokenizer = SentenceTokenizer::default();
        let sentences = tokenizer.split_into_sentences("Really?! Yes... Fine.");

        assert_eq!(texts(&sentences), vec!["Really?!", "Yes...", "Fine."]);
    }

    #[test]
    fn test_decimal_point_does_not_close_sentence() {
        let tokenizer = SentenceTokenizer::default();
        let sentences = tokenizer.split_into_sentences("It costs 3.50 . Chapter 2. 5 cats .");

        assert_eq!(
            texts(&sentences),
            vec!["It costs 3.50 .", "Chapter 2.", "5 cats ."]
        );
    }

    #[test]
    fn test_split_is_lossless() {
        let tokenizer = SentenceTokenizer::default();
        let inputs = [
            "I love cats . I have a red car .",
            "  leading space. trailing space.   \n",
            "no terminator at all",
            "a. . b.",
            "It costs 3.50 . Done",
            "かみがみ 、 かみがみ 。 さらさら 。",
        ];

        for input in inputs {
            let rebuilt: String = tokenizer
                .split_into_sentences(input)
                .iter()
                .map(|s| &input[s.span.clone()])
                .collect();
            assert_eq!(rebuilt, input);
        }
    }

    #[test]
    fn test_whitespace_only_text_has_no_sentences() {
        let tokenizer = SentenceTokenizer::default();
        assert!(tokenizer.split_into_sentences("   \n\t").is_empty());
        assert!(tokenizer.split_into_sentences("").is_empty());
    }

    #[test]
    fn test_sentence_at_matches_split() {
        let tokenizer = SentenceTokenizer::default();
        let text = "One. Two? Three!";
        let sentences = tokenizer.split_into_sentences(text);

        for (k, expected) in sentences.iter().enumerate() {
            assert_eq!(&tokenizer.sentence_at(k, text).unwrap(), expected);
        }
    }

    #[test]
    fn test_sentence_at_out_of_range() {
        let tokenizer = SentenceTokenizer::default();
        let err = tokenizer.sentence_at(2, "One. Two.").unwrap_err();

        assert!(matches!(
            err,
            QuizError::IndexOutOfRange { index: 2, count: 2 }
        ));
    }

    #[test]
    fn test_custom_terminators() {
        let tokenizer = SentenceTokenizer::from_config(";").unwrap();
        let sentences = tokenizer.split_into_sentences("a b; c. d;");

        assert_eq!(texts(&sentences), vec!["a b;", "c. d;"]);
    }

    #[test]
    fn test_empty_terminators_rejected() {
        assert!(matches!(
            SentenceTokenizer::from_config("  "),
            Err(QuizError::Config(_))
        ));
    }

    #[test]
    fn test_japanese_terminators() {
        let tokenizer = SentenceTokenizer::default();
        let sentences = tokenizer.split_into_sentences("ささみ 、 ひびわれ 。 さらさら 。");

        assert_eq!(texts(&sentences), vec!["ささみ 、 ひびわれ 。", "さらさら 。"]);
    }
}
