// file: src/generator/question_set.rs
// description: ordered, read-only collection of generated questions
// reference: internal data structures

use crate::models::Question;
use serde::Serialize;
use std::collections::BTreeMap;

/// Questions in catalog order. Built once by the generator, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn by_section(&self) -> BTreeMap<i64, Vec<&Question>> {
        let mut groups: BTreeMap<i64, Vec<&Question>> = BTreeMap::new();
        for question in &self.questions {
            groups.entry(question.section).or_default().push(question);
        }
        groups
    }

    pub fn sections(&self) -> Vec<i64> {
        self.by_section().into_keys().collect()
    }

    pub fn into_vec(self) -> Vec<Question> {
        self.questions
    }
}

impl FromIterator<Question> for QuestionSet {
    fn from_iter<I: IntoIterator<Item = Question>>(iter: I) -> Self {
        Self {
            questions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Phrase;

    fn question(section: i64, phrase: &str) -> Question {
        Question::new(
            &Phrase::new(section, phrase, phrase),
            "src.txt".to_string(),
            0,
            phrase.to_string(),
            vec![0],
            vec![phrase.to_string()],
        )
    }

    #[test]
    fn test_preserves_order() {
        let set: QuestionSet = vec![question(2, "b"), question(1, "a"), question(2, "c")]
            .into_iter()
            .collect();

        let phrases: Vec<&str> = set.iter().map(|q| q.phrase.as_str()).collect();
        assert_eq!(phrases, vec!["b", "a", "c"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_groups_by_section() {
        let set: QuestionSet = vec![question(2, "b"), question(1, "a"), question(2, "c")]
            .into_iter()
            .collect();

        let groups = set.by_section();
        assert_eq!(set.sections(), vec![1, 2]);
        assert_eq!(groups[&1].len(), 1);

        let second: Vec<&str> = groups[&2].iter().map(|q| q.phrase.as_str()).collect();
        assert_eq!(second, vec!["b", "c"]);
    }

    #[test]
    fn test_empty_set() {
        let set = QuestionSet::default();
        assert!(set.is_empty());
        assert!(set.by_section().is_empty());
    }
}
