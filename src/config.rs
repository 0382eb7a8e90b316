// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{QuizError, Result};
use crate::tokenizer::{DEFAULT_TERMINATORS, DEFAULT_WORD_PATTERN};
use dotenvy::dotenv;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub sources: SourcesConfig,
    pub generator: GeneratorConfig,
    pub pipeline: PipelineConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourcesConfig {
    pub extension: String,
    #[serde(default)]
    pub skip_patterns: Vec<String>,
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorConfig {
    pub sentence_terminators: String,
    pub word_pattern: String,
    /// Run catalog phrases through the language lemmatizer before matching.
    #[serde(default = "default_lemmatize_phrases")]
    pub lemmatize_phrases: bool,
}

fn default_lemmatize_phrases() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub language: String,
    pub parallel_workers: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub pretty: bool,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("WORD_QUIZ")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| QuizError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| QuizError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            sources: SourcesConfig {
                extension: "txt".to_string(),
                skip_patterns: vec![".git/*".to_string()],
                max_file_size_mb: 50,
            },
            generator: GeneratorConfig {
                sentence_terminators: DEFAULT_TERMINATORS.to_string(),
                word_pattern: DEFAULT_WORD_PATTERN.to_string(),
                lemmatize_phrases: default_lemmatize_phrases(),
            },
            pipeline: PipelineConfig {
                language: "en".to_string(),
                parallel_workers: 4,
            },
            output: OutputConfig {
                directory: PathBuf::from("./quiz"),
                pretty: true,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pipeline.parallel_workers == 0 {
            return Err(QuizError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        if self.sources.extension.trim().is_empty() {
            return Err(QuizError::Config(
                "source extension must not be empty".to_string(),
            ));
        }

        if self.generator.sentence_terminators.trim().is_empty() {
            return Err(QuizError::Config(
                "sentence_terminators must not be empty".to_string(),
            ));
        }

        Regex::new(&self.generator.word_pattern)?;

        Ok(())
    }
}
