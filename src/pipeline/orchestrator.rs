// file: src/pipeline/orchestrator.rs
// description: coordinates source discovery, variant preparation and question generation
// reference: bounded-concurrency task collection with futures streams

use crate::config::Config;
use crate::error::{QuizError, Result};
use crate::generator::{Generator, QuestionSet};
use crate::models::Phrase;
use crate::parser::PhraseCatalog;
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::source::{FileScanner, ScannedFile, SourceText, clean_sidecars};
use crate::transform::TransformSet;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub questions: QuestionSet,
    pub unanswerable: Vec<Phrase>,
    pub sources_loaded: usize,
}

pub struct PipelineOrchestrator {
    config: Config,
    transforms: TransformSet,
    max_concurrent_tasks: usize,
    show_progress: bool,
}

impl PipelineOrchestrator {
    pub fn new(config: Config, transforms: TransformSet) -> Self {
        let max_concurrent_tasks = config.pipeline.parallel_workers.max(1);

        Self {
            config,
            transforms,
            max_concurrent_tasks,
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rebuilds the preprocessed and lemmatized sidecars for every source
    /// under `paths`. Individual file failures are logged and counted.
    pub async fn make(&self, paths: &str) -> Result<PipelineStats> {
        self.transforms.require_any()?;
        info!("Preparing sources with {:?}", self.transforms);

        let sidecars_removed = {
            let paths = paths.to_string();
            tokio::task::spawn_blocking(move || clean_sidecars(&paths))
                .await
                .map_err(|e| QuizError::Validation(format!("Cleaning task failed: {}", e)))??
        };

        let files = self.scan_files(paths).await?;
        if files.is_empty() {
            warn!("No source files found to prepare");
            return Ok(PipelineStats {
                sidecars_removed,
                ..PipelineStats::new()
            });
        }

        let progress = Arc::new(self.tracker(files.len()));

        info!(
            "Preparing {} files with {} concurrent tasks...",
            files.len(),
            self.max_concurrent_tasks
        );

        let tasks = files.into_iter().map(|file| {
            let progress = progress.clone();

            async move {
                progress.set_current(&file.relative_path);

                match self.prepare_source(&file).await {
                    Ok(sidecars) => progress.record_prepared(file.size, sidecars),
                    Err(e) => {
                        progress.record_failed();
                        warn!("Failed to prepare {}: {}", file.relative_path, e);
                    }
                }
            }
        });

        stream::iter(tasks)
            .buffer_unordered(self.max_concurrent_tasks)
            .collect::<Vec<()>>()
            .await;

        progress.finish();
        let stats = PipelineStats {
            sidecars_removed,
            ..progress.stats()
        };

        self.log_final_stats(&stats);
        Ok(stats)
    }

    /// Returns the number of sidecars written for the file.
    async fn prepare_source(&self, file: &ScannedFile) -> Result<usize> {
        let mut source = SourceText::open(&file.path).await?;
        let mut written = 0;

        if let Some(preprocessor) = &self.transforms.preprocessor {
            source.preprocess(preprocessor.as_ref()).await?;
            written += 1;
            debug!("Finished preprocessing: {}", file.relative_path);
        }

        if let Some(lemmatizer) = &self.transforms.lemmatizer {
            source.lemmatize(lemmatizer.as_ref()).await?;
            written += 1;
            debug!("Finished lemmatizing: {}", file.relative_path);
        }

        Ok(written)
    }

    /// Opens every source under `paths` with its cached sidecars, keeping
    /// scan order. Sources that cannot be read are skipped.
    pub async fn load_sources(&self, paths: &str) -> Result<Vec<SourceText>> {
        let files = self.scan_files(paths).await?;

        let loaded: Vec<Option<SourceText>> = stream::iter(files.into_iter().map(|file| async move {
            let result = async {
                let mut source = SourceText::open(&file.path).await?;
                source.load_cached().await?;
                Ok::<_, QuizError>(source)
            }
            .await;

            match result {
                Ok(source) => Some(source),
                Err(e) => {
                    warn!("Skipping source {}: {}", file.relative_path, e);
                    None
                }
            }
        }))
        .buffered(self.max_concurrent_tasks)
        .collect()
        .await;

        Ok(loaded.into_iter().flatten().collect())
    }

    pub async fn generate(&self, catalog: PhraseCatalog, paths: &str) -> Result<GenerationOutcome> {
        let sources = self.load_sources(paths).await?;
        let sources_loaded = sources.len();
        info!(
            "Generating questions for {} phrases from {} sources",
            catalog.len(),
            sources_loaded
        );

        let mut generator = Generator::from_config(
            catalog.into_phrases(),
            sources,
            &self.config.generator,
        )?;

        if self.config.generator.lemmatize_phrases {
            match &self.transforms.lemmatizer {
                Some(lemmatizer) => {
                    generator = generator.with_phrase_lemmatizer(lemmatizer.clone());
                }
                None => warn!("lemmatize_phrases is set but no lemmatizer is configured"),
            }
        }

        let (questions, unanswerable) = tokio::task::spawn_blocking(move || generator.run())
            .await
            .map_err(|e| QuizError::Validation(format!("Generation task failed: {}", e)))??;

        Ok(GenerationOutcome {
            questions,
            unanswerable,
            sources_loaded,
        })
    }

    async fn scan_files(&self, paths: &str) -> Result<Vec<ScannedFile>> {
        let sources_config = self.config.sources.clone();
        let paths = paths.to_string();

        tokio::task::spawn_blocking(move || {
            let scanner = FileScanner::new(sources_config);
            scanner.scan_paths(&paths)
        })
        .await
        .map_err(|e| QuizError::Validation(format!("File scanning task failed: {}", e)))?
    }

    fn tracker(&self, total: usize) -> ProgressTracker {
        if self.show_progress {
            ProgressTracker::new(total)
        } else {
            ProgressTracker::hidden(total)
        }
    }

    fn log_final_stats(&self, stats: &PipelineStats) {
        info!("=== Preparation Summary ===");
        info!("{}", stats.summary());
        info!("Stale sidecars removed: {}", stats.sidecars_removed);
        info!("Success rate: {:.2}%", stats.success_rate());
        info!("Processing speed: {:.2} files/sec", stats.files_per_second());
        info!("===========================");
    }
}
