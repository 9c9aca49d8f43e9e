//! Domain entities. Pure data structures for the core business.
//!
//! No device/HTTP types here; adapters map into these.

use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::io::Cursor;

/// Allowed number of answer options per question.
pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 6;

/// A multiple-choice aptitude question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub category: String,
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    /// 0-based index into `options`.
    pub correct_answer: usize,
}

impl Question {
    pub fn new(
        id: u32,
        category: impl Into<String>,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: usize,
    ) -> Result<Self, DomainError> {
        let q = Self {
            id,
            category: category.into(),
            prompt: prompt.into(),
            options,
            correct_answer,
        };
        q.validate()?;
        Ok(q)
    }

    /// Checks option count and correct index. Also used for deserialized records.
    pub fn validate(&self) -> Result<(), DomainError> {
        let n = self.options.len();
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&n) {
            return Err(DomainError::InvalidQuestion(format!(
                "question {} has {} options (expected {}..={})",
                self.id, n, MIN_OPTIONS, MAX_OPTIONS
            )));
        }
        if self.correct_answer >= n {
            return Err(DomainError::InvalidQuestion(format!(
                "question {} correct answer {} out of range for {} options",
                self.id, self.correct_answer, n
            )));
        }
        Ok(())
    }
}

/// Ordered, non-empty set of questions. Loaded once at startup.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, DomainError> {
        if questions.is_empty() {
            return Err(DomainError::QuestionBank("question bank is empty".into()));
        }
        let mut seen = HashSet::new();
        for q in &questions {
            q.validate()?;
            if !seen.insert(q.id) {
                return Err(DomainError::QuestionBank(format!(
                    "duplicate question id {}",
                    q.id
                )));
            }
        }
        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for q in &self.questions {
            if !out.contains(&q.category.as_str()) {
                out.push(&q.category);
            }
        }
        out
    }
}

/// Job role offered on the interview setup screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobRole {
    FrontendDeveloper,
    BackendDeveloper,
    FullStackDeveloper,
    DevOpsEngineer,
    DataScientist,
    UiUxDesigner,
}

impl JobRole {
    pub const ALL: [JobRole; 6] = [
        JobRole::FrontendDeveloper,
        JobRole::BackendDeveloper,
        JobRole::FullStackDeveloper,
        JobRole::DevOpsEngineer,
        JobRole::DataScientist,
        JobRole::UiUxDesigner,
    ];

    pub fn label(self) -> &'static str {
        match self {
            JobRole::FrontendDeveloper => "Frontend Developer",
            JobRole::BackendDeveloper => "Backend Developer",
            JobRole::FullStackDeveloper => "Full Stack Developer",
            JobRole::DevOpsEngineer => "DevOps Engineer",
            JobRole::DataScientist => "Data Scientist",
            JobRole::UiUxDesigner => "UI/UX Designer",
        }
    }
}

impl fmt::Display for JobRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry Level (0-2 years)",
            ExperienceLevel::Mid => "Mid Level (2-5 years)",
            ExperienceLevel::Senior => "Senior Level (5+ years)",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mono PCM16 audio drained from a capture stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedAudio {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl CapturedAudio {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            samples: Vec::new(),
            sample_rate,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Encode as a 16-bit mono WAV file (for upload to speech-to-text).
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, DomainError> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)
                .map_err(|e| DomainError::Transcription(format!("wav header: {}", e)))?;
            for &s in &self.samples {
                writer
                    .write_sample(s)
                    .map_err(|e| DomainError::Transcription(format!("wav write: {}", e)))?;
            }
            writer
                .finalize()
                .map_err(|e| DomainError::Transcription(format!("wav finalize: {}", e)))?;
        }
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("opt{}", i)).collect()
    }

    #[test]
    fn test_question_rejects_bad_option_count() {
        assert!(Question::new(1, "Verbal", "q", opts(1), 0).is_err());
        assert!(Question::new(1, "Verbal", "q", opts(7), 0).is_err());
        assert!(Question::new(1, "Verbal", "q", opts(2), 1).is_ok());
        assert!(Question::new(1, "Verbal", "q", opts(6), 5).is_ok());
    }

    #[test]
    fn test_question_rejects_out_of_range_answer() {
        let err = Question::new(4, "Verbal", "q", opts(4), 4).unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuestion(_)));
    }

    #[test]
    fn test_bank_rejects_empty_and_duplicates() {
        assert!(QuestionBank::new(vec![]).is_err());

        let a = Question::new(1, "A", "q1", opts(2), 0).unwrap();
        let b = Question::new(1, "B", "q2", opts(2), 1).unwrap();
        let err = QuestionBank::new(vec![a, b]).unwrap_err();
        assert!(matches!(err, DomainError::QuestionBank(_)));
    }

    #[test]
    fn test_bank_categories_in_order() {
        let bank = QuestionBank::new(vec![
            Question::new(1, "Quantitative", "q1", opts(2), 0).unwrap(),
            Question::new(2, "Verbal", "q2", opts(2), 0).unwrap(),
            Question::new(3, "Quantitative", "q3", opts(2), 0).unwrap(),
        ])
        .unwrap();
        assert_eq!(bank.categories(), vec!["Quantitative", "Verbal"]);
    }

    #[test]
    fn test_wav_encoding_has_riff_header() {
        let audio = CapturedAudio {
            samples: vec![0, 100, -100, 0],
            sample_rate: 16_000,
        };
        let bytes = audio.to_wav_bytes().unwrap();
        assert_eq!(&bytes[..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        // 44-byte header + 2 bytes per sample
        assert_eq!(bytes.len(), 44 + 8);
    }
}
