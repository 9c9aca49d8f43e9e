//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI drives the aptitude test and mock interview.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the main menu until the user exits.
    async fn run(&self) -> Result<(), DomainError>;

    /// Run one aptitude test from instructions to results.
    async fn run_assessment(&self) -> Result<(), DomainError>;

    /// Run one mock interview from setup to feedback.
    async fn run_interview(&self) -> Result<(), DomainError>;
}
