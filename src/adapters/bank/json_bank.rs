//! Implements QuestionBankPort from a JSON file.
//!
//! The file holds an array of question records:
//! `[{"id": 1, "category": "Verbal", "question": "...", "options": [...], "correct_answer": 0}]`

use crate::domain::{DomainError, Question, QuestionBank};
use crate::ports::QuestionBankPort;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

pub struct JsonQuestionBank {
    path: PathBuf,
}

impl JsonQuestionBank {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl QuestionBankPort for JsonQuestionBank {
    async fn load(&self) -> Result<QuestionBank, DomainError> {
        let raw = fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::QuestionBank(format!("read {}: {}", self.path.display(), e))
        })?;
        let questions: Vec<Question> = serde_json::from_str(&raw).map_err(|e| {
            DomainError::QuestionBank(format!("parse {}: {}", self.path.display(), e))
        })?;
        let bank = QuestionBank::new(questions)?;
        info!(
            path = %self.path.display(),
            questions = bank.len(),
            "loaded question bank"
        );
        Ok(bank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[tokio::test]
    async fn test_loads_valid_file() {
        let f = write_file(
            r#"[
                {"id": 10, "category": "Verbal", "question": "Synonym of QUICK?",
                 "options": ["Slow", "Fast"], "correct_answer": 1},
                {"id": 11, "category": "Quantitative", "question": "2 + 2?",
                 "options": ["3", "4", "5"], "correct_answer": 1}
            ]"#,
        );
        let bank = JsonQuestionBank::new(f.path()).load().await.unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.get(0).unwrap().prompt, "Synonym of QUICK?");
    }

    #[tokio::test]
    async fn test_rejects_invalid_record() {
        let f = write_file(
            r#"[{"id": 1, "category": "Verbal", "question": "?", "options": ["a"], "correct_answer": 0}]"#,
        );
        let err = JsonQuestionBank::new(f.path()).load().await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuestion(_)));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = JsonQuestionBank::new("/nonexistent/prepdeck-bank.json")
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::QuestionBank(_)));
    }
}
