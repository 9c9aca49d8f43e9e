//! Question and prompt bank adapters. Implement QuestionBankPort and PromptBankPort.

pub mod json_bank;
pub mod static_bank;

pub use json_bank::JsonQuestionBank;
pub use static_bank::{DEFAULT_PROMPT, StaticPromptBank, StaticQuestionBank};
