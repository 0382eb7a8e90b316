// file: src/transform/mod.rs
// description: text transform capability, language registry and override slots
// reference: internal module structure

pub mod english;
pub mod old_japanese;

pub use english::{EnglishLemmatizer, EnglishPreprocessor};
pub use old_japanese::OldJapanesePreprocessor;

use crate::error::{QuizError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// An opaque text-to-text transform such as a preprocessor or lemmatizer.
pub trait TextTransform: Send + Sync {
    fn name(&self) -> &str;

    fn apply(&self, text: &str) -> anyhow::Result<String>;
}

pub type SharedTransform = Arc<dyn TextTransform>;

/// Wraps a closure so callers can supply ad-hoc transforms.
pub struct FnTransform<F> {
    name: String,
    func: F,
}

impl<F> FnTransform<F>
where
    F: Fn(&str) -> anyhow::Result<String> + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> TextTransform for FnTransform<F>
where
    F: Fn(&str) -> anyhow::Result<String> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, text: &str) -> anyhow::Result<String> {
        (self.func)(text)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl TextTransform for Identity {
    fn name(&self) -> &str {
        "identity"
    }

    fn apply(&self, text: &str) -> anyhow::Result<String> {
        Ok(text.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct LanguageEntry {
    pub tag: &'static str,
    pub description: &'static str,
    pub preprocessor: Option<&'static str>,
    pub lemmatizer: Option<&'static str>,
}

/// The preprocessor/lemmatizer pair used for one run.
#[derive(Clone, Default)]
pub struct TransformSet {
    pub preprocessor: Option<SharedTransform>,
    pub lemmatizer: Option<SharedTransform>,
}

impl TransformSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_language(tag: &str) -> Result<Self> {
        TransformRegistry::builtin().transform_set(tag)
    }

    pub fn with_preprocessor(mut self, transform: SharedTransform) -> Self {
        self.preprocessor = Some(transform);
        self
    }

    pub fn with_lemmatizer(mut self, transform: SharedTransform) -> Self {
        self.lemmatizer = Some(transform);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.preprocessor.is_none() && self.lemmatizer.is_none()
    }

    pub fn require_any(&self) -> Result<()> {
        if self.is_empty() {
            return Err(QuizError::Config(
                "no usable preprocessor or lemmatizer supplied".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for TransformSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformSet")
            .field("preprocessor", &self.preprocessor.as_ref().map(|t| t.name()))
            .field("lemmatizer", &self.lemmatizer.as_ref().map(|t| t.name()))
            .finish()
    }
}

pub struct TransformRegistry {
    transforms: BTreeMap<&'static str, SharedTransform>,
    languages: Vec<LanguageEntry>,
}

impl TransformRegistry {
    pub fn builtin() -> Self {
        let mut transforms: BTreeMap<&'static str, SharedTransform> = BTreeMap::new();
        transforms.insert("en-preprocessor", Arc::new(EnglishPreprocessor::new()));
        transforms.insert("en-lemmatizer", Arc::new(EnglishLemmatizer::new()));
        transforms.insert("ojp-preprocessor", Arc::new(OldJapanesePreprocessor::new()));
        transforms.insert("identity", Arc::new(Identity));

        let languages = vec![
            LanguageEntry {
                tag: "en",
                description: "English",
                preprocessor: Some("en-preprocessor"),
                lemmatizer: Some("en-lemmatizer"),
            },
            LanguageEntry {
                tag: "ojp",
                description: "Old Japanese",
                preprocessor: Some("ojp-preprocessor"),
                lemmatizer: Some("identity"),
            },
        ];

        Self {
            transforms,
            languages,
        }
    }

    pub fn get(&self, name: &str) -> Option<SharedTransform> {
        self.transforms.get(name).cloned()
    }

    pub fn require(&self, name: &str) -> Result<SharedTransform> {
        self.get(name).ok_or_else(|| {
            QuizError::Config(format!(
                "unknown transform '{}' (available: {})",
                name,
                self.transform_names().join(", ")
            ))
        })
    }

    pub fn transform_names(&self) -> Vec<&'static str> {
        self.transforms.keys().copied().collect()
    }

    pub fn languages(&self) -> &[LanguageEntry] {
        &self.languages
    }

    /// Looks a language up by its primary subtag, so `en-US` resolves to `en`.
    pub fn language(&self, tag: &str) -> Option<&LanguageEntry> {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or(tag)
            .to_ascii_lowercase();

        self.languages.iter().find(|entry| entry.tag == primary)
    }

    pub fn transform_set(&self, tag: &str) -> Result<TransformSet> {
        let entry = self
            .language(tag)
            .ok_or_else(|| QuizError::Config(format!("unsupported language tag '{}'", tag)))?;

        let mut set = TransformSet::new();
        if let Some(name) = entry.preprocessor {
            set = set.with_preprocessor(self.require(name)?);
        }
        if let Some(name) = entry.lemmatizer {
            set = set.with_lemmatizer(self.require(name)?);
        }

        Ok(set)
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
