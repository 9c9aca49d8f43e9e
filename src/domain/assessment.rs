//! Aptitude test session state and pure scoring/formatting.

use crate::domain::Question;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default test duration: 15 minutes.
pub const DEFAULT_DURATION_SECS: u32 = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssessmentStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// Mutable state of one aptitude test run. Owned by `AssessmentEngine`.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentSession {
    pub status: AssessmentStatus,
    pub current_index: usize,
    /// One slot per question once started; `None` = not answered. Empty before start.
    pub answers: Vec<Option<usize>>,
    pub remaining_secs: u32,
    pub score: Option<ScoreReport>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl AssessmentSession {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            status: AssessmentStatus::NotStarted,
            current_index: 0,
            answers: Vec::new(),
            remaining_secs: duration_secs,
            score: None,
            started_at: None,
            completed_at: None,
        }
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }
}

/// Result of one question in a scored run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOutcome {
    pub question_id: u32,
    pub selected: Option<usize>,
    pub correct_answer: usize,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub correct: usize,
    pub total: usize,
    /// Unrounded; use `format_percentage` for display.
    pub percentage: f64,
    pub outcomes: Vec<QuestionOutcome>,
}

impl ScoreReport {
    pub fn compute(answers: &[Option<usize>], questions: &[Question]) -> Self {
        let outcomes = questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let selected = answers.get(i).copied().flatten();
                QuestionOutcome {
                    question_id: q.id,
                    selected,
                    correct_answer: q.correct_answer,
                    is_correct: selected == Some(q.correct_answer),
                }
            })
            .collect();
        let correct = score(answers, questions);
        Self {
            correct,
            total: questions.len(),
            percentage: percentage(correct, questions.len()),
            outcomes,
        }
    }

    pub fn percentage_display(&self) -> String {
        format_percentage(self.percentage)
    }
}

/// Number of positions where the selected answer equals the correct one. Unset never matches.
pub fn score(answers: &[Option<usize>], questions: &[Question]) -> usize {
    answers
        .iter()
        .zip(questions)
        .filter(|(a, q)| **a == Some(q.correct_answer))
        .count()
}

pub fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * correct as f64 / total as f64
}

/// One decimal place, e.g. `66.7%`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// `m:ss`, e.g. `15:00` or `0:05`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(correct: &[usize]) -> Vec<Question> {
        correct
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                Question::new(
                    i as u32 + 1,
                    "Quantitative",
                    format!("q{}", i + 1),
                    vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    c,
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_score_counts_matches() {
        let qs = questions(&[1, 2, 0]);
        assert_eq!(score(&[Some(1), Some(2), Some(1)], &qs), 2);
        assert_eq!(score(&[Some(1), Some(2), Some(0)], &qs), 3);
        assert_eq!(score(&[Some(0), None, Some(0)], &qs), 1);
    }

    #[test]
    fn test_all_unset_scores_zero() {
        let qs = questions(&[0, 0, 0]);
        assert_eq!(score(&[None, None, None], &qs), 0);
    }

    #[test]
    fn test_report_scenario_two_of_three() {
        let qs = questions(&[1, 2, 0]);
        let report = ScoreReport::compute(&[Some(1), Some(2), Some(1)], &qs);
        assert_eq!(report.correct, 2);
        assert_eq!(report.total, 3);
        assert!((report.percentage - 66.666_666).abs() < 1e-3);
        assert_eq!(report.percentage_display(), "66.7%");
        assert!(report.outcomes[0].is_correct);
        assert!(!report.outcomes[2].is_correct);
        assert_eq!(report.outcomes[2].selected, Some(1));
    }

    #[test]
    fn test_percentage_empty_total() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(format_percentage(100.0), "100.0%");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(900), "15:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(5), "0:05");
        assert_eq!(format_clock(0), "0:00");
    }
}
