// file: src/utils/validation.rs
// description: input path checks and display truncation
// reference: input validation patterns

use crate::error::{QuizError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(QuizError::Validation(format!(
                "Path does not exist: {}",
                path.display()
            )));
        }
        Ok(())
    }

    pub fn validate_file_path(path: &Path) -> Result<()> {
        Self::validate_exists(path)?;

        if !path.is_file() {
            return Err(QuizError::Validation(format!(
                "Path is not a file: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Truncates on a character boundary and appends an ellipsis.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let head: String = text.chars().take(max_chars).collect();
            format!("{}...", head)
        }
    }
}
