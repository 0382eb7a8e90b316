// file: src/exporter/json.rs
// description: json export of generated questions and unanswerable phrases

use crate::error::{QuizError, Result};
use crate::generator::QuestionSet;
use crate::models::Phrase;
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const QUESTIONS_FILE: &str = "questions.json";
pub const UNANSWERABLE_FILE: &str = "unanswerable.json";
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
    pretty: bool,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_questions: usize,
    pub total_unanswerable: usize,
    pub questions_per_section: BTreeMap<i64, usize>,
    pub files: Vec<String>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>, pretty: bool) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| QuizError::FileOperation {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir, pretty })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn export(&self, questions: &QuestionSet, unanswerable: &[Phrase]) -> Result<ExportManifest> {
        info!("Starting JSON export to {:?}", self.output_dir);

        self.write_json(QUESTIONS_FILE, questions)?;
        self.write_json(UNANSWERABLE_FILE, &unanswerable)?;

        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            total_questions: questions.len(),
            total_unanswerable: unanswerable.len(),
            questions_per_section: questions
                .by_section()
                .into_iter()
                .map(|(section, group)| (section, group.len()))
                .collect(),
            files: vec![QUESTIONS_FILE.to_string(), UNANSWERABLE_FILE.to_string()],
        };
        self.write_json(MANIFEST_FILE, &manifest)?;

        info!(
            "Export complete: {} questions, {} unanswerable phrases",
            manifest.total_questions, manifest.total_unanswerable
        );
        Ok(manifest)
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        let path = self.output_dir.join(name);
        fs::write(&path, json).map_err(|source| QuizError::FileOperation { path, source })
    }
}
