//! Question bank
//!
//! The control questions stored at /admin/control_questions, one per
//! line. Indices are 1-based everywhere they appear, in records and in
//! prompts alike.

use crate::error::{ConfirmError, VfshError};
use crate::storage::Filesystem;

/// Path segments of the bank file.
pub fn questions_path() -> Vec<String> {
    vec!["admin".to_string(), "control_questions".to_string()]
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBank {
    questions: Vec<String>,
}

impl QuestionBank {
    /// Splits file content into questions. Interior blank lines are
    /// kept so stored indices stay stable; only trailing whitespace is
    /// dropped.
    pub fn from_content(content: &str) -> Self {
        QuestionBank {
            questions: content.trim_end().lines().map(str::to_string).collect(),
        }
    }

    pub fn load(fs: &Filesystem) -> Result<Self, VfshError> {
        Ok(Self::from_content(fs.file_content(&questions_path())?))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The question text at a 1-based index.
    pub fn question(&self, index: usize) -> Result<&str, ConfirmError> {
        index
            .checked_sub(1)
            .and_then(|i| self.questions.get(i))
            .map(String::as_str)
            .ok_or(ConfirmError::UnknownQuestion(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_content_splits_lines() {
        let bank = QuestionBank::from_content("first?\nsecond?\nthird?\n");
        assert_eq!(bank.len(), 3);
        assert_eq!(bank.question(1).unwrap(), "first?");
        assert_eq!(bank.question(3).unwrap(), "third?");
    }

    #[test]
    fn test_question_indices_are_one_based() {
        let bank = QuestionBank::from_content("only?");
        assert!(matches!(
            bank.question(0),
            Err(ConfirmError::UnknownQuestion(0))
        ));
        assert!(matches!(
            bank.question(2),
            Err(ConfirmError::UnknownQuestion(2))
        ));
    }

    #[test]
    fn test_empty_content_yields_empty_bank() {
        assert!(QuestionBank::from_content("").is_empty());
        assert!(QuestionBank::from_content("\n\n").is_empty());
    }
}
