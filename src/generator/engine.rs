// file: src/generator/engine.rs
// description: phrase localization in lemmatized text and alignment to preprocessed words
// reference: https://doc.rust-lang.org/std/primitive.slice.html#method.windows

use super::question_set::QuestionSet;
use crate::config::GeneratorConfig;
use crate::error::{QuizError, Result};
use crate::models::{Phrase, Question};
use crate::source::{SourceText, Variant};
use crate::tokenizer::{SentenceTokenizer, WordTokenizer};
use crate::transform::SharedTransform;
use tracing::{debug, info, warn};

/// Where a phrase was found: a sentence and the contiguous token positions
/// of the match inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub sentence_index: usize,
    pub word_indexes: Vec<usize>,
}

pub struct Generator {
    phrases: Vec<Phrase>,
    sources: Vec<SourceText>,
    sentences: SentenceTokenizer,
    words: WordTokenizer,
    phrase_lemmatizer: Option<SharedTransform>,
}

impl Generator {
    pub fn new(phrases: Vec<Phrase>, sources: Vec<SourceText>) -> Self {
        Self {
            phrases,
            sources,
            sentences: SentenceTokenizer::default(),
            words: WordTokenizer::default(),
            phrase_lemmatizer: None,
        }
    }

    pub fn from_config(
        phrases: Vec<Phrase>,
        sources: Vec<SourceText>,
        config: &GeneratorConfig,
    ) -> Result<Self> {
        Ok(Self::new(phrases, sources).with_tokenizers(
            SentenceTokenizer::from_config(&config.sentence_terminators)?,
            WordTokenizer::new(&config.word_pattern)?,
        ))
    }

    pub fn with_tokenizers(mut self, sentences: SentenceTokenizer, words: WordTokenizer) -> Self {
        self.sentences = sentences;
        self.words = words;
        self
    }

    /// Canonicalizes catalog phrases with `lemmatizer` before matching.
    pub fn with_phrase_lemmatizer(mut self, lemmatizer: SharedTransform) -> Self {
        self.phrase_lemmatizer = Some(lemmatizer);
        self
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn sources(&self) -> &[SourceText] {
        &self.sources
    }

    pub fn phrase_tokens(&self, phrase: &str) -> Result<Vec<String>> {
        let canonical = match &self.phrase_lemmatizer {
            Some(lemmatizer) => {
                lemmatizer
                    .apply(phrase)
                    .map_err(|err| QuizError::PhraseTransform {
                        phrase: phrase.to_string(),
                        stage: lemmatizer.name().to_string(),
                        message: format!("{:#}", err),
                    })?
            }
            None => phrase.to_string(),
        };

        Ok(self
            .words
            .words(&canonical)
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Finds the first lemmatized sentence containing the phrase tokens as a
    /// contiguous run. `Ok(None)` means the phrase is not in this source.
    pub fn select_sentence(&self, phrase: &str, source: &SourceText) -> Result<Option<Location>> {
        let tokens = self.phrase_tokens(phrase)?;
        let lemmatized = source.require(Variant::Lemmatized)?;
        Ok(self.locate(&tokens, lemmatized))
    }

    fn locate(&self, phrase_tokens: &[String], lemmatized: &str) -> Option<Location> {
        if phrase_tokens.is_empty() {
            return None;
        }

        self.sentences
            .split_into_sentences(lemmatized)
            .iter()
            .find_map(|sentence| {
                let words = self.words.words(sentence.text);
                find_subsequence(&words, phrase_tokens).map(|start| Location {
                    sentence_index: sentence.index,
                    word_indexes: (start..start + phrase_tokens.len()).collect(),
                })
            })
    }

    pub fn question_from_source(
        &self,
        phrase: &Phrase,
        source: &SourceText,
    ) -> Result<Option<Question>> {
        let tokens = self.phrase_tokens(&phrase.phrase)?;
        self.question_for_tokens(phrase, &tokens, source)
    }

    fn question_for_tokens(
        &self,
        phrase: &Phrase,
        tokens: &[String],
        source: &SourceText,
    ) -> Result<Option<Question>> {
        let lemmatized = source.require(Variant::Lemmatized)?;

        let Some(location) = self.locate(tokens, lemmatized) else {
            return Ok(None);
        };

        let preprocessed = source.require(Variant::Preprocessed)?;
        let lemmatized_sentences = self.sentences.split_into_sentences(lemmatized);
        let preprocessed_sentences = self.sentences.split_into_sentences(preprocessed);
        let index = location.sentence_index;

        if lemmatized_sentences.len() != preprocessed_sentences.len() {
            return Err(alignment_error(
                source,
                index,
                format!(
                    "{} lemmatized sentences but {} preprocessed sentences",
                    lemmatized_sentences.len(),
                    preprocessed_sentences.len()
                ),
            ));
        }

        let sentence = &preprocessed_sentences[index];
        let lemmatized_count = self.words.words(lemmatized_sentences[index].text).len();
        let preprocessed_tokens = self.words.tokenize(sentence.text);

        if lemmatized_count != preprocessed_tokens.len() {
            return Err(alignment_error(
                source,
                index,
                format!(
                    "{} lemmatized tokens but {} preprocessed tokens",
                    lemmatized_count,
                    preprocessed_tokens.len()
                ),
            ));
        }

        let words = location
            .word_indexes
            .iter()
            .map(|&i| preprocessed_tokens[i].text.to_string())
            .collect();

        Ok(Some(Question::new(
            phrase,
            source.display_path(),
            index,
            sentence.text.to_string(),
            location.word_indexes,
            words,
        )))
    }

    /// Builds one question per phrase from the first source that yields one.
    /// Phrases no source can answer are returned alongside the question set.
    pub fn run(&self) -> Result<(QuestionSet, Vec<Phrase>)> {
        let mut questions = Vec::with_capacity(self.phrases.len());
        let mut unanswerable = Vec::new();

        for phrase in &self.phrases {
            match self.first_question(phrase)? {
                Some(question) => questions.push(question),
                None => {
                    debug!("No source contains phrase '{}'", phrase.phrase);
                    unanswerable.push(phrase.clone());
                }
            }
        }

        info!(
            "Generated {} questions, {} phrases unanswerable",
            questions.len(),
            unanswerable.len()
        );

        Ok((questions.into_iter().collect(), unanswerable))
    }

    fn first_question(&self, phrase: &Phrase) -> Result<Option<Question>> {
        let tokens = match self.phrase_tokens(&phrase.phrase) {
            Ok(tokens) => tokens,
            Err(err @ QuizError::PhraseTransform { .. }) => {
                warn!("{}", err);
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        for source in &self.sources {
            match self.question_for_tokens(phrase, &tokens, source) {
                Ok(Some(question)) => return Ok(Some(question)),
                Ok(None) => continue,
                Err(err @ QuizError::Alignment { .. }) => {
                    warn!("Skipping source for '{}': {}", phrase.phrase, err);
                }
                Err(err @ QuizError::MissingVariant { .. }) => {
                    warn!("Source not prepared for '{}': {}", phrase.phrase, err);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(None)
    }
}

fn alignment_error(source: &SourceText, sentence_index: usize, detail: String) -> QuizError {
    QuizError::Alignment {
        path: source.path().to_path_buf(),
        sentence_index,
        detail,
    }
}

/// Earliest start offset of `needle` as a contiguous run of whole tokens.
fn find_subsequence(haystack: &[&str], needle: &[String]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }

    haystack
        .windows(needle.len())
        .position(|window| window.iter().zip(needle).all(|(a, b)| *a == b.as_str()))
}
