// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod generator;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod source;
pub mod tokenizer;
pub mod transform;
pub mod utils;

pub use config::{Config, GeneratorConfig, OutputConfig, PipelineConfig, SourcesConfig};
pub use error::{QuizError, Result};
pub use exporter::{ExportManifest, JsonExporter};
pub use generator::{Generator, Location, QuestionSet};
pub use models::{Phrase, Question};
pub use parser::PhraseCatalog;
pub use pipeline::{GenerationOutcome, PipelineOrchestrator, PipelineStats, ProgressTracker};
pub use source::{FileScanner, ScannedFile, SourceText, Variant, clean_sidecars};
pub use tokenizer::{Sentence, SentenceTokenizer, Token, WordTokenizer};
pub use transform::{
    FnTransform, Identity, SharedTransform, TextTransform, TransformRegistry, TransformSet,
};
pub use utils::Validator;
