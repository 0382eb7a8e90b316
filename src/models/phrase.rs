// file: src/models/phrase.rs
// description: catalog entry naming a target expression and its quiz answer
// reference: internal data structures

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub section: i64,
    pub phrase: String,
    pub answer: String,
}

impl Phrase {
    pub fn new(section: i64, phrase: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            section,
            phrase: phrase.into(),
            answer: answer.into(),
        }
    }
}
