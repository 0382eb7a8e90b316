// file: src/parser/catalog.rs
// description: phrase catalog parsing from headerless section,phrase,answer CSV
// reference: https://docs.rs/csv

use crate::error::{QuizError, Result};
use crate::models::Phrase;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseCatalog {
    phrases: Vec<Phrase>,
}

impl PhraseCatalog {
    pub fn new(phrases: Vec<Phrase>) -> Self {
        Self { phrases }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| QuizError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_reader(file)?;
        info!(
            "Loaded {} phrases from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Rows with an empty phrase are skipped. A first row labelled like
    /// `section,phrase,...` is taken as a header. Any other section that is not
    /// an integer is logged and read as section 0.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut phrases = Vec::new();

        for (row, record) in csv_reader.records().enumerate() {
            let record = record?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(row as u64 + 1);

            let section = record.get(0).unwrap_or("");
            let phrase = record.get(1).unwrap_or("");
            let answer = record.get(2).unwrap_or("");

            if row == 0 && is_header(section, phrase) {
                debug!("Skipping catalog header row");
                continue;
            }

            if phrase.is_empty() {
                continue;
            }

            let section = parse_section(section).unwrap_or_else(|| {
                warn!(
                    "Catalog line {}: section '{}' is not an integer, using 0",
                    line, section
                );
                0
            });

            phrases.push(Phrase::new(section, phrase, answer));
        }

        Ok(Self { phrases })
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn sections(&self) -> BTreeSet<i64> {
        self.phrases.iter().map(|p| p.section).collect()
    }

    pub fn into_phrases(self) -> Vec<Phrase> {
        self.phrases
    }
}

fn is_header(section: &str, phrase: &str) -> bool {
    parse_section(section).is_none()
        && (section.eq_ignore_ascii_case("section") || phrase.eq_ignore_ascii_case("phrase"))
}

/// Integers, including integral decimals like `1.0`. Empty is section 0.
fn parse_section(field: &str) -> Option<i64> {
    if field.is_empty() {
        return Some(0);
    }
    if let Ok(section) = field.parse::<i64>() {
        return Some(section);
    }

    let value = field.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}
