// file: src/transform/english.rs
// description: built-in English preprocessor and rule-based lemmatizer
// reference: https://docs.rs/regex

use super::TextTransform;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

const SPLIT_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '"', '(', ')', '[', ']'];

/// Consecutive marks from this set stay together as one token, e.g. `...` or `?!`.
const RUN_PUNCTUATION: &[char] = &['.', '!', '?'];

lazy_static! {
    static ref WORD: Regex =
        Regex::new(r"\p{L}[\p{L}'\-]*").expect("WORD regex is valid");

    static ref IRREGULAR: HashMap<&'static str, &'static str> = {
        let pairs: &[(&str, &[&str])] = &[
            ("be", &["is", "am", "are", "was", "were", "been", "being"]),
            ("have", &["has", "had", "having"]),
            ("do", &["does", "did", "done", "doing"]),
            ("go", &["goes", "went", "gone"]),
            ("see", &["saw", "seen"]),
            ("make", &["made"]),
            ("take", &["took", "taken"]),
            ("come", &["came"]),
            ("get", &["got", "gotten"]),
            ("give", &["gave", "given"]),
            ("know", &["knew", "known"]),
            ("think", &["thought"]),
            ("tell", &["told"]),
            ("find", &["found"]),
            ("say", &["said"]),
            ("eat", &["ate", "eaten"]),
            ("drink", &["drank", "drunk"]),
            ("run", &["ran"]),
            ("write", &["wrote", "written"]),
            ("buy", &["bought"]),
            ("bring", &["brought"]),
            ("feel", &["felt"]),
            ("leave", &["left"]),
            ("keep", &["kept"]),
            ("hold", &["held"]),
            ("stand", &["stood"]),
            ("understand", &["understood"]),
            ("begin", &["began", "begun"]),
            ("speak", &["spoke", "spoken"]),
            ("break", &["broke", "broken"]),
            ("choose", &["chose", "chosen"]),
            ("drive", &["drove", "driven"]),
            ("fly", &["flew", "flown"]),
            ("grow", &["grew", "grown"]),
            ("lose", &["lost"]),
            ("meet", &["met"]),
            ("pay", &["paid"]),
            ("sit", &["sat"]),
            ("send", &["sent"]),
            ("spend", &["spent"]),
            ("teach", &["taught"]),
            ("win", &["won"]),
            ("child", &["children"]),
            ("man", &["men"]),
            ("woman", &["women"]),
            ("mouse", &["mice"]),
            ("foot", &["feet"]),
            ("tooth", &["teeth"]),
            ("person", &["people"]),
            ("good", &["better", "best"]),
        ];

        let mut map = HashMap::new();
        for (lemma, forms) in pairs {
            for form in *forms {
                map.insert(*form, *lemma);
            }
        }
        map
    };
}

/// Separates sentence punctuation into standalone tokens and collapses
/// whitespace, keeping one line per input line.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishPreprocessor;

impl EnglishPreprocessor {
    pub fn new() -> Self {
        Self
    }

    fn normalize_quotes(text: &str) -> String {
        text.replace(['\u{2018}', '\u{2019}'], "'")
            .replace(['\u{201C}', '\u{201D}'], "\"")
            .replace('\u{2026}', "...")
    }

    fn separate_punctuation(line: &str) -> String {
        let chars: Vec<char> = line.chars().collect();
        let mut out = String::with_capacity(line.len() + 8);

        for (i, &c) in chars.iter().enumerate() {
            let numeric_separator = (c == '.' || c == ',')
                && i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());

            if SPLIT_PUNCTUATION.contains(&c) && !numeric_separator {
                let in_run = RUN_PUNCTUATION.contains(&c);
                let joins_prev = in_run && i > 0 && RUN_PUNCTUATION.contains(&chars[i - 1]);
                let joins_next =
                    in_run && chars.get(i + 1).is_some_and(|n| RUN_PUNCTUATION.contains(n));

                if !joins_prev {
                    out.push(' ');
                }
                out.push(c);
                if !joins_next {
                    out.push(' ');
                }
            } else {
                out.push(c);
            }
        }

        out
    }
}

impl TextTransform for EnglishPreprocessor {
    fn name(&self) -> &str {
        "en-preprocessor"
    }

    fn apply(&self, text: &str) -> anyhow::Result<String> {
        let normalized = Self::normalize_quotes(text);

        let lines: Vec<String> = normalized
            .lines()
            .map(|line| {
                Self::separate_punctuation(line)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|line| !line.is_empty())
            .collect();

        Ok(lines.join("\n"))
    }
}

/// Reduces each word to a lowercase canonical form. Only word characters are
/// rewritten, so sentence and token boundaries survive unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishLemmatizer;

impl EnglishLemmatizer {
    pub fn new() -> Self {
        Self
    }

    pub fn lemmatize_word(word: &str) -> String {
        let lower = word.to_lowercase();

        if let Some(lemma) = IRREGULAR.get(lower.as_str()) {
            return (*lemma).to_string();
        }

        if lower.contains('\'') || lower.chars().count() < 4 {
            return lower;
        }

        if let Some(stem) = lower.strip_suffix("ies").filter(|s| s.len() > 1) {
            return format!("{}y", stem);
        }
        if let Some(stem) = lower.strip_suffix("ied").filter(|s| s.len() > 1) {
            return format!("{}y", stem);
        }
        if lower.ends_with("sses") {
            return lower[..lower.len() - 2].to_string();
        }
        for suffix in ["ches", "shes", "xes", "zes"] {
            if lower.ends_with(suffix) {
                return lower[..lower.len() - 2].to_string();
            }
        }
        if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
            return lower;
        }
        if let Some(stem) = lower.strip_suffix('s') {
            return stem.to_string();
        }
        if lower.len() > 4
            && let Some(stem) = lower.strip_suffix("ed")
        {
            return Self::restore_stem(stem).unwrap_or(lower.clone());
        }
        if lower.len() > 5
            && let Some(stem) = lower.strip_suffix("ing")
        {
            return Self::restore_stem(stem).unwrap_or(lower.clone());
        }

        lower
    }

    /// Rebuilds a base form after an -ed/-ing suffix was cut off; `None` when
    /// the remainder does not look like a stem.
    fn restore_stem(stem: &str) -> Option<String> {
        let has_vowel = stem.chars().any(|c| "aeiouy".contains(c));
        if !has_vowel || stem.ends_with('e') {
            return None;
        }

        let chars: Vec<char> = stem.chars().collect();
        let n = chars.len();
        if n >= 2 && chars[n - 1] == chars[n - 2] && !"aeioulsz".contains(chars[n - 1]) {
            return Some(chars[..n - 1].iter().collect());
        }

        if ["v", "c", "z", "u", "bl", "dg", "iz"]
            .iter()
            .any(|ending| stem.ends_with(ending))
        {
            return Some(format!("{}e", stem));
        }

        Some(stem.to_string())
    }
}

impl TextTransform for EnglishLemmatizer {
    fn name(&self) -> &str {
        "en-lemmatizer"
    }

    fn apply(&self, text: &str) -> anyhow::Result<String> {
        Ok(WORD
            .replace_all(text, |caps: &Captures| Self::lemmatize_word(&caps[0]))
            .into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::SentenceTokenizer;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preprocessor_separates_punctuation() {
        let output = EnglishPreprocessor::new()
            .apply("I loved cats. I have a red car.")
            .unwrap();
        assert_eq!(output, "I loved cats . I have a red car .");
    }

    #[test]
    fn test_preprocessor_keeps_numbers_and_apostrophes() {
        let output = EnglishPreprocessor::new()
            .apply("It costs 3.50, doesn\u{2019}t it?")
            .unwrap();
        assert_eq!(output, "It costs 3.50 , doesn't it ?");
    }

    #[test]
    fn test_preprocessor_keeps_terminator_runs_together() {
        let output = EnglishPreprocessor::new()
            .apply("Wait... Really?! Yes\u{2026}")
            .unwrap();
        assert_eq!(output, "Wait ... Really ?! Yes ...");
    }

    #[test]
    fn test_prepared_variants_split_into_same_sentences() {
        let tokenizer = SentenceTokenizer::default();
        let preprocessed = EnglishPreprocessor::new()
            .apply("It costs 3.50. Wait... Cheaper ones exist!")
            .unwrap();
        let lemmatized = EnglishLemmatizer::new().apply(&preprocessed).unwrap();

        let sentences: Vec<&str> = tokenizer
            .split_into_sentences(&preprocessed)
            .iter()
            .map(|s| s.text)
            .collect();
        assert_eq!(
            sentences,
            vec!["It costs 3.50 .", "Wait ...", "Cheaper ones exist !"]
        );
        assert_eq!(tokenizer.count(&lemmatized), 3);
    }

    #[test]
    fn test_preprocessor_collapses_whitespace_per_line() {
        let output = EnglishPreprocessor::new()
            .apply("  First   line.\n\n\tSecond \u{201C}quoted\u{201D} line!  ")
            .unwrap();
        assert_eq!(output, "First line .\nSecond \" quoted \" line !");
    }

    #[test]
    fn test_lemmatize_words() {
        let cases = [
            ("loved", "love"),
            ("cats", "cat"),
            ("Cities", "city"),
            ("stopped", "stop"),
            ("running", "run"),
            ("played", "play"),
            ("was", "be"),
            ("children", "child"),
            ("glasses", "glass"),
            ("boxes", "box"),
            ("this", "this"),
            ("red", "red"),
            ("need", "need"),
            ("thing", "thing"),
        ];

        for (word, lemma) in cases {
            assert_eq!(EnglishLemmatizer::lemmatize_word(word), lemma, "{}", word);
        }
    }

    #[test]
    fn test_lemmatizer_preserves_token_layout() {
        let input = "I loved cats . I have a red car .";
        let output = EnglishLemmatizer::new().apply(input).unwrap();

        assert_eq!(output, "i love cat . i have a red car .");
        assert_eq!(
            input.split_whitespace().count(),
            output.split_whitespace().count()
        );
    }
}
