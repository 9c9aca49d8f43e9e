//! Built-in question and prompt banks.

use crate::domain::{DomainError, ExperienceLevel, JobRole, Question, QuestionBank};
use crate::ports::{PromptBankPort, QuestionBankPort};
use tracing::debug;

/// The three sample aptitude questions.
pub struct StaticQuestionBank;

impl StaticQuestionBank {
    pub fn new() -> Self {
        Self
    }

    pub fn sample_questions() -> Result<Vec<Question>, DomainError> {
        Ok(vec![
            Question::new(
                1,
                "Quantitative",
                "If a train travels 420 kilometers in 7 hours, what is its average speed in kilometers per hour?",
                strings(&["50 km/h", "60 km/h", "65 km/h", "70 km/h"]),
                1,
            )?,
            Question::new(
                2,
                "Logical Reasoning",
                "Which number should come next in the pattern? 2, 6, 12, 20, 30, __",
                strings(&["35", "40", "42", "45"]),
                2,
            )?,
            Question::new(
                3,
                "Verbal",
                "Choose the word that is most nearly opposite in meaning to \"BENEVOLENT\"",
                strings(&["Malevolent", "Charitable", "Generous", "Kind"]),
                0,
            )?,
        ])
    }
}

impl Default for StaticQuestionBank {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl QuestionBankPort for StaticQuestionBank {
    async fn load(&self) -> Result<QuestionBank, DomainError> {
        QuestionBank::new(Self::sample_questions()?)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Fallback when a role has no dedicated prompt.
pub const DEFAULT_PROMPT: &str = "Tell me about your experience with React development and any significant projects you've worked on.";

/// One opening prompt per role; experience level only changes the closing clause.
pub struct StaticPromptBank;

impl StaticPromptBank {
    pub fn new() -> Self {
        Self
    }

    fn base_prompt(role: JobRole) -> &'static str {
        match role {
            JobRole::FrontendDeveloper => DEFAULT_PROMPT,
            JobRole::BackendDeveloper => {
                "Walk me through an API or service you designed and how you kept it reliable under load."
            }
            JobRole::FullStackDeveloper => {
                "Describe a feature you delivered end to end, from the database schema to the user interface."
            }
            JobRole::DevOpsEngineer => {
                "Tell me about a deployment pipeline you built or improved and how you handled a production incident."
            }
            JobRole::DataScientist => {
                "Describe a model you took from exploration to production and how you measured its impact."
            }
            JobRole::UiUxDesigner => {
                "Walk me through a design you iterated on based on user research or usability testing."
            }
        }
    }

    fn level_suffix(level: ExperienceLevel) -> &'static str {
        match level {
            ExperienceLevel::Entry => "",
            ExperienceLevel::Mid => " What trade-offs did you weigh along the way?",
            ExperienceLevel::Senior => {
                " How did you guide the team's technical decisions along the way?"
            }
        }
    }
}

impl Default for StaticPromptBank {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PromptBankPort for StaticPromptBank {
    async fn prompt_for(
        &self,
        role: JobRole,
        level: ExperienceLevel,
    ) -> Result<String, DomainError> {
        debug!(%role, %level, "selecting interview prompt");
        Ok(format!(
            "{}{}",
            Self::base_prompt(role),
            Self::level_suffix(level)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_bank_loads_sample_questions() {
        let bank = StaticQuestionBank::new().load().await.unwrap();
        assert_eq!(bank.len(), 3);
        let correct: Vec<usize> = bank.questions().iter().map(|q| q.correct_answer).collect();
        assert_eq!(correct, vec![1, 2, 0]);
        assert_eq!(
            bank.categories(),
            vec!["Quantitative", "Logical Reasoning", "Verbal"]
        );
    }

    #[tokio::test]
    async fn test_prompt_for_role_and_level() {
        let bank = StaticPromptBank::new();
        let entry = bank
            .prompt_for(JobRole::FrontendDeveloper, ExperienceLevel::Entry)
            .await
            .unwrap();
        assert_eq!(entry, DEFAULT_PROMPT);

        let senior = bank
            .prompt_for(JobRole::DevOpsEngineer, ExperienceLevel::Senior)
            .await
            .unwrap();
        assert!(senior.starts_with("Tell me about a deployment pipeline"));
        assert!(senior.ends_with("technical decisions along the way?"));
    }
}
