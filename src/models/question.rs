// file: src/models/question.rs
// description: located phrase ready for fill-in-the-blank presentation
// reference: internal data structures

use super::Phrase;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub section: i64,
    pub phrase: String,
    pub answer: String,
    pub source_path: String,
    pub sentence_index: usize,
    pub sentence: String,
    pub word_indexes: Vec<usize>,
    /// Preprocessed words found at `word_indexes`, in order.
    pub words: Vec<String>,
}

impl Question {
    pub fn new(
        phrase: &Phrase,
        source_path: String,
        sentence_index: usize,
        sentence: String,
        word_indexes: Vec<usize>,
        words: Vec<String>,
    ) -> Self {
        Self {
            section: phrase.section,
            phrase: phrase.phrase.clone(),
            answer: phrase.answer.clone(),
            source_path,
            sentence_index,
            sentence,
            word_indexes,
            words,
        }
    }

    pub fn matched_text(&self) -> String {
        self.words.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_carries_phrase_fields() {
        let phrase = Phrase::new(2, "love cats", "cats");
        let question = Question::new(
            &phrase,
            "/tmp/source.txt".to_string(),
            0,
            "I loved cats .".to_string(),
            vec![1, 2],
            vec!["loved".to_string(), "cats".to_string()],
        );

        assert_eq!(question.section, 2);
        assert_eq!(question.phrase, "love cats");
        assert_eq!(question.answer, "cats");
        assert_eq!(question.matched_text(), "loved cats");
    }
}
