// file: src/source/text.rs
// description: one source file with its raw, preprocessed and lemmatized variants
// reference: https://docs.rs/tokio/latest/tokio/fs/index.html

use crate::error::{QuizError, Result};
use crate::transform::TextTransform;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Raw,
    Preprocessed,
    Lemmatized,
}

impl Variant {
    /// Extension appended to the source path for the sidecar cache file.
    pub fn sidecar_extension(self) -> Option<&'static str> {
        match self {
            Variant::Raw => None,
            Variant::Preprocessed => Some("preprocessed"),
            Variant::Lemmatized => Some("lemmatized"),
        }
    }

    pub fn cached_variants() -> [Variant; 2] {
        [Variant::Preprocessed, Variant::Lemmatized]
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Raw => "raw",
            Variant::Preprocessed => "preprocessed",
            Variant::Lemmatized => "lemmatized",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct SourceText {
    path: PathBuf,
    raw: String,
    preprocessed: Option<String>,
    lemmatized: Option<String>,
}

impl SourceText {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let raw = fs::read_to_string(&path)
            .await
            .map_err(|source| QuizError::FileOperation {
                path: path.clone(),
                source,
            })?;

        Ok(Self::from_parts(path, raw))
    }

    pub fn from_parts(path: impl Into<PathBuf>, raw: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            raw: raw.into(),
            preprocessed: None,
            lemmatized: None,
        }
    }

    /// Sets a variant in memory only; nothing is written to disk.
    pub fn with_variant(mut self, variant: Variant, text: impl Into<String>) -> Self {
        match variant {
            Variant::Raw => self.raw = text.into(),
            Variant::Preprocessed => self.preprocessed = Some(text.into()),
            Variant::Lemmatized => self.lemmatized = Some(text.into()),
        }
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    pub fn sidecar_path(&self, variant: Variant) -> Option<PathBuf> {
        variant.sidecar_extension().map(|ext| {
            let mut name = self.path.clone().into_os_string();
            name.push(".");
            name.push(ext);
            PathBuf::from(name)
        })
    }

    pub fn cached(&self, variant: Variant) -> Option<&str> {
        match variant {
            Variant::Raw => Some(self.raw.as_str()),
            Variant::Preprocessed => self.preprocessed.as_deref(),
            Variant::Lemmatized => self.lemmatized.as_deref(),
        }
    }

    pub fn require(&self, variant: Variant) -> Result<&str> {
        self.cached(variant).ok_or_else(|| QuizError::MissingVariant {
            path: self.path.clone(),
            variant,
        })
    }

    fn slot_mut(&mut self, variant: Variant) -> Option<&mut Option<String>> {
        match variant {
            Variant::Raw => None,
            Variant::Preprocessed => Some(&mut self.preprocessed),
            Variant::Lemmatized => Some(&mut self.lemmatized),
        }
    }

    pub async fn preprocess(&mut self, transform: &dyn TextTransform) -> Result<&str> {
        let output = self.run_transform(transform, &self.raw)?;
        self.store(Variant::Preprocessed, output).await?;
        self.require(Variant::Preprocessed)
    }

    /// Lemmatizes the preprocessed text when present in memory or as a
    /// sidecar, the raw text otherwise.
    pub async fn lemmatize(&mut self, transform: &dyn TextTransform) -> Result<&str> {
        match self.text(Variant::Preprocessed).await {
            Ok(_) | Err(QuizError::MissingVariant { .. }) => {}
            Err(err) => return Err(err),
        }

        let input = self.preprocessed.as_deref().unwrap_or(&self.raw);
        let output = self.run_transform(transform, input)?;
        self.store(Variant::Lemmatized, output).await?;
        self.require(Variant::Lemmatized)
    }

    /// Returns a variant, reading its sidecar from disk on first access.
    pub async fn text(&mut self, variant: Variant) -> Result<&str> {
        if self.cached(variant).is_none()
            && let Some(loaded) = self.read_sidecar(variant).await?
            && let Some(slot) = self.slot_mut(variant)
        {
            *slot = Some(loaded);
        }

        self.require(variant)
    }

    /// Pulls every existing sidecar into memory.
    pub async fn load_cached(&mut self) -> Result<()> {
        for variant in Variant::cached_variants() {
            if self.cached(variant).is_none()
                && let Some(loaded) = self.read_sidecar(variant).await?
                && let Some(slot) = self.slot_mut(variant)
            {
                *slot = Some(loaded);
            }
        }
        Ok(())
    }

    fn run_transform(&self, transform: &dyn TextTransform, input: &str) -> Result<String> {
        transform
            .apply(input)
            .map_err(|err| QuizError::Transform {
                path: self.path.clone(),
                stage: transform.name().to_string(),
                message: format!("{:#}", err),
            })
    }

    async fn store(&mut self, variant: Variant, output: String) -> Result<()> {
        if let Some(sidecar) = self.sidecar_path(variant) {
            fs::write(&sidecar, &output)
                .await
                .map_err(|source| QuizError::FileOperation {
                    path: sidecar.clone(),
                    source,
                })?;
            debug!("Wrote {} sidecar: {}", variant, sidecar.display());
        }

        if let Some(slot) = self.slot_mut(variant) {
            *slot = Some(output);
        }
        Ok(())
    }

    async fn read_sidecar(&self, variant: Variant) -> Result<Option<String>> {
        let Some(sidecar) = self.sidecar_path(variant) else {
            return Ok(None);
        };

        match fs::read_to_string(&sidecar).await {
            Ok(content) => {
                debug!("Loaded {} sidecar: {}", variant, sidecar.display());
                Ok(Some(content))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(QuizError::FileOperation {
                path: sidecar,
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{EnglishLemmatizer, EnglishPreprocessor, FnTransform};
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn write_source(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std_fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_preprocess_and_lemmatize_write_sidecars() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "story.txt", "I loved cats. I have a red car.");

        let mut source = SourceText::open(&path).await.unwrap();
        source.preprocess(&EnglishPreprocessor::new()).await.unwrap();
        source.lemmatize(&EnglishLemmatizer::new()).await.unwrap();

        let preprocessed =
            std_fs::read_to_string(dir.path().join("story.txt.preprocessed")).unwrap();
        let lemmatized =
            std_fs::read_to_string(dir.path().join("story.txt.lemmatized")).unwrap();

        assert_eq!(preprocessed, "I loved cats . I have a red car .");
        assert_eq!(lemmatized, "i love cat . i have a red car .");
    }

    #[tokio::test]
    async fn test_lemmatize_falls_back_to_raw() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "raw.txt", "Cats ran");

        let mut source = SourceText::open(&path).await.unwrap();
        let lemmatized = source.lemmatize(&EnglishLemmatizer::new()).await.unwrap();

        assert_eq!(lemmatized, "cat run");
        assert!(source.cached(Variant::Preprocessed).is_none());
    }

    #[tokio::test]
    async fn test_lemmatize_reads_preprocessed_sidecar() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "s.txt", "RAW");
        write_source(&dir, "s.txt.preprocessed", "PRE");
        let echo = FnTransform::new("echo", |text: &str| Ok(format!("lemma of {}", text)));

        let mut source = SourceText::open(&path).await.unwrap();
        let lemmatized = source.lemmatize(&echo).await.unwrap();

        assert_eq!(lemmatized, "lemma of PRE");
        assert_eq!(source.cached(Variant::Preprocessed), Some("PRE"));
    }

    #[tokio::test]
    async fn test_text_reads_sidecar_lazily() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "lazy.txt", "raw");
        write_source(&dir, "lazy.txt.lemmatized", "cached lemma");

        let mut source = SourceText::open(&path).await.unwrap();
        assert!(source.cached(Variant::Lemmatized).is_none());

        assert_eq!(source.text(Variant::Lemmatized).await.unwrap(), "cached lemma");
        assert_eq!(source.cached(Variant::Lemmatized), Some("cached lemma"));
    }

    #[tokio::test]
    async fn test_missing_variant() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "bare.txt", "raw");

        let mut source = SourceText::open(&path).await.unwrap();
        let err = source.text(Variant::Preprocessed).await.unwrap_err();

        assert!(matches!(
            err,
            QuizError::MissingVariant {
                variant: Variant::Preprocessed,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_failing_transform_leaves_variant_unset() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "broken.txt", "raw");
        let failing = FnTransform::new("broken", |_: &str| {
            Err(anyhow::anyhow!("dictionary missing"))
        });

        let mut source = SourceText::open(&path).await.unwrap();
        let err = source.preprocess(&failing).await.unwrap_err();

        match err {
            QuizError::Transform { stage, message, .. } => {
                assert_eq!(stage, "broken");
                assert!(message.contains("dictionary missing"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(source.cached(Variant::Preprocessed).is_none());
        assert!(!dir.path().join("broken.txt.preprocessed").exists());
    }

    #[tokio::test]
    async fn test_load_cached_pulls_both_sidecars() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "both.txt", "raw");
        write_source(&dir, "both.txt.preprocessed", "pre");
        write_source(&dir, "both.txt.lemmatized", "lem");

        let mut source = SourceText::open(&path).await.unwrap();
        source.load_cached().await.unwrap();

        assert_eq!(source.require(Variant::Preprocessed).unwrap(), "pre");
        assert_eq!(source.require(Variant::Lemmatized).unwrap(), "lem");
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let err = SourceText::open("/nonexistent/source.txt").await.unwrap_err();
        assert!(matches!(err, QuizError::FileOperation { .. }));
    }

    #[test]
    fn test_sidecar_paths() {
        let source = SourceText::from_parts("/data/a.txt", "raw");

        assert_eq!(
            source.sidecar_path(Variant::Preprocessed).unwrap(),
            PathBuf::from("/data/a.txt.preprocessed")
        );
        assert_eq!(
            source.sidecar_path(Variant::Lemmatized).unwrap(),
            PathBuf::from("/data/a.txt.lemmatized")
        );
        assert!(source.sidecar_path(Variant::Raw).is_none());
    }
}
