//! Implements InputPort. Inquire-based interactive screens.
//!
//! Engine and controller are shared behind tokio mutexes; locks are never held across a
//! prompt, so the tick driver keeps counting down while the user reads a question.

use crate::domain::{
    AssessmentStatus, DomainError, ExperienceLevel, InterviewStatus, JobRole, Question,
    ScoreReport, format_clock,
};
use crate::ports::InputPort;
use crate::usecases::{AssessmentEngine, RecordingController};
use async_trait::async_trait;
use crossterm::ExecutableCommand;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Confirm, InquireError, Select};
use std::fmt;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

/// Outcome of a prompt: a value, or the user backed out with Esc / Ctrl-C.
fn prompt_result<T>(res: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

fn clear_screen() {
    let mut out = stdout();
    let _ = out.execute(Clear(ClearType::All));
    let _ = out.execute(MoveTo(0, 0));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainChoice {
    Aptitude,
    Interview,
    Exit,
}

impl fmt::Display for MainChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MainChoice::Aptitude => "Aptitude Test",
            MainChoice::Interview => "Mock Interview",
            MainChoice::Exit => "Exit",
        })
    }
}

/// One entry on the question screen.
#[derive(Debug, Clone, PartialEq, Eq)]
enum QuestionAction {
    Answer { index: usize, label: String },
    Previous,
    Next,
    Jump,
    Submit,
}

impl fmt::Display for QuestionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionAction::Answer { label, .. } => f.write_str(label),
            QuestionAction::Previous => f.write_str("← Previous"),
            QuestionAction::Next => f.write_str("Next →"),
            QuestionAction::Jump => f.write_str("Go to question…"),
            QuestionAction::Submit => f.write_str("Submit Test"),
        }
    }
}

fn question_actions(
    question: &Question,
    selected: Option<usize>,
    index: usize,
    count: usize,
) -> Vec<QuestionAction> {
    let mut actions: Vec<QuestionAction> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, opt)| QuestionAction::Answer {
            index: i,
            label: format!("{} {}", if selected == Some(i) { "(•)" } else { "( )" }, opt),
        })
        .collect();
    if index > 0 {
        actions.push(QuestionAction::Previous);
    }
    if index + 1 == count {
        actions.push(QuestionAction::Submit);
    } else {
        actions.push(QuestionAction::Next);
    }
    if count > 1 {
        actions.push(QuestionAction::Jump);
    }
    actions
}

/// Numbered navigator entries: current, answered, or not yet answered.
fn navigator_labels(answers: &[Option<usize>], current: usize) -> Vec<String> {
    answers
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let mark = if i == current {
                "▶"
            } else if a.is_some() {
                "✓"
            } else {
                "·"
            };
            format!("{} {}", mark, i + 1)
        })
        .collect()
}

fn result_lines(report: &ScoreReport, questions: &[Question]) -> Vec<String> {
    let mut lines = vec![
        report.percentage_display(),
        format!("Your Score: {} out of {}", report.correct, report.total),
        String::new(),
    ];
    for (outcome, q) in report.outcomes.iter().zip(questions) {
        let mark = if outcome.is_correct { "✓" } else { "✗" };
        lines.push(format!("{} {}", mark, q.prompt));
        lines.push(format!(
            "    Correct answer: {}",
            q.options[outcome.correct_answer]
        ));
        if !outcome.is_correct {
            let yours = outcome
                .selected
                .and_then(|i| q.options.get(i))
                .map(String::as_str)
                .unwrap_or("Not answered");
            lines.push(format!("    Your answer: {}", yours));
        }
    }
    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InterviewAction {
    StartRecording,
    StopRecording,
    EndInterview,
    Restart,
}

impl fmt::Display for InterviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InterviewAction::StartRecording => "🎙 Start Recording",
            InterviewAction::StopRecording => "■ Stop Recording",
            InterviewAction::EndInterview => "End Interview",
            InterviewAction::Restart => "Restart",
        })
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    engine: Arc<Mutex<AssessmentEngine>>,
    interview: Arc<Mutex<RecordingController>>,
}

impl TuiInputPort {
    pub fn new(
        engine: Arc<Mutex<AssessmentEngine>>,
        interview: Arc<Mutex<RecordingController>>,
    ) -> Self {
        Self { engine, interview }
    }

    async fn show_instructions(&self) -> Result<bool, DomainError> {
        let (minutes, count, categories) = {
            let e = self.engine.lock().await;
            (
                e.duration_secs() / 60,
                e.question_count(),
                e.bank().categories().join(", "),
            )
        };
        clear_screen();
        println!("Aptitude Test\n");
        println!("Test Instructions");
        println!("  • Total duration: {} minutes", minutes);
        println!("  • Number of questions: {}", count);
        println!("  • Categories: {}", categories);
        println!("  • All questions are multiple choice");
        println!("  • No negative marking\n");
        let start = prompt_result(Confirm::new("Start Test?").with_default(true).prompt())?;
        Ok(start.unwrap_or(false))
    }

    /// One question screen. Returns false when the user backs out to the menu.
    async fn question_screen(&self) -> Result<bool, DomainError> {
        let (question, selected, index, count, remaining, answers) = {
            let e = self.engine.lock().await;
            let index = e.session().current_index;
            let Some(q) = e.current_question().cloned() else {
                return Ok(false);
            };
            (
                q,
                e.session().answers.get(index).copied().flatten(),
                index,
                e.question_count(),
                e.session().remaining_secs,
                e.session().answers.clone(),
            )
        };

        clear_screen();
        println!(
            "Question {}/{}        ⏱ {}",
            index + 1,
            count,
            format_clock(remaining)
        );
        println!("[{}]\n", question.category);

        let actions = question_actions(&question, selected, index, count);
        let Some(action) = prompt_result(Select::new(&question.prompt, actions).prompt())? else {
            return Ok(false);
        };

        let mut e = self.engine.lock().await;
        if e.status() != AssessmentStatus::InProgress {
            // Time ran out while the prompt was open.
            return Ok(true);
        }
        match action {
            QuestionAction::Answer { index: option, .. } => e.select_answer(index, option),
            QuestionAction::Previous => e.previous(),
            QuestionAction::Next => e.next(),
            QuestionAction::Submit => e.submit(),
            QuestionAction::Jump => {
                drop(e);
                let labels = navigator_labels(&answers, index);
                if let Some(choice) =
                    prompt_result(Select::new("Go to question", labels.clone()).prompt())?
                {
                    if let Some(target) = labels.iter().position(|l| *l == choice) {
                        self.engine.lock().await.navigate(target as isize);
                    }
                }
            }
        }
        Ok(true)
    }

    async fn show_results(&self, timed_out: bool) -> Result<bool, DomainError> {
        let lines = {
            let e = self.engine.lock().await;
            match e.score_report() {
                Some(report) => result_lines(report, e.questions()),
                None => return Ok(false),
            }
        };
        clear_screen();
        if timed_out {
            println!("Time's up!\n");
        }
        println!("Test Results\n");
        for line in lines {
            println!("{}", line);
        }
        println!();
        let again = prompt_result(
            Confirm::new("Take Another Test?")
                .with_default(false)
                .prompt(),
        )?;
        Ok(again.unwrap_or(false))
    }

    async fn choose_setup(&self) -> Result<Option<(JobRole, ExperienceLevel)>, DomainError> {
        clear_screen();
        println!("Mock Interview Setup\n");
        let Some(role) =
            prompt_result(Select::new("Select Job Role", JobRole::ALL.to_vec()).prompt())?
        else {
            return Ok(None);
        };
        let Some(level) = prompt_result(
            Select::new("Experience Level", ExperienceLevel::ALL.to_vec()).prompt(),
        )?
        else {
            return Ok(None);
        };
        Ok(Some((role, level)))
    }

    /// Stop recording and transcribe with a spinner, without holding the controller lock.
    async fn stop_and_transcribe(&self) {
        let (request, stt) = {
            let mut c = self.interview.lock().await;
            (c.end_recording(), c.transcriber())
        };
        let Some(request) = request else {
            return;
        };

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Converting speech to text…");
        spinner.enable_steady_tick(Duration::from_millis(100));
        let outcome = request.run(stt.as_ref()).await;
        spinner.finish_and_clear();

        self.interview.lock().await.apply_transcription(outcome);
    }

    /// Active interview screen. Returns false when the user restarts back to setup.
    async fn interview_screen(&self) -> Result<bool, DomainError> {
        let session = self.interview.lock().await.session().clone();
        clear_screen();
        println!("Mock Interview in Progress\n");
        println!("{}\n", session.prompt);
        if let Some(err) = &session.last_error {
            println!("! {}\n", err);
        }
        if session.transcript.is_empty() {
            println!("Your response will appear here after recording...\n");
        } else {
            println!("{}\n", session.transcript);
        }
        if session.recording {
            println!("● ● ● recording\n");
        }

        let toggle = if session.recording {
            InterviewAction::StopRecording
        } else {
            InterviewAction::StartRecording
        };
        let actions = vec![toggle, InterviewAction::EndInterview, InterviewAction::Restart];
        let action = prompt_result(Select::new("Action", actions).prompt())?
            .unwrap_or(InterviewAction::Restart);

        match action {
            InterviewAction::StartRecording => self.interview.lock().await.begin_recording().await,
            InterviewAction::StopRecording => self.stop_and_transcribe().await,
            InterviewAction::EndInterview => {
                if session.recording {
                    self.stop_and_transcribe().await;
                }
                self.interview.lock().await.end_session().await;
            }
            InterviewAction::Restart => {
                self.interview.lock().await.restart();
                return Ok(false);
            }
        }
        Ok(true)
    }

    async fn feedback_screen(&self) -> Result<bool, DomainError> {
        let (feedback, transcript) = {
            let c = self.interview.lock().await;
            (c.feedback(), c.session().transcript.clone())
        };
        clear_screen();
        println!("Interview Feedback\n");
        if !transcript.is_empty() {
            println!("Your response:\n  {}\n", transcript);
        }
        if let Some(fb) = feedback {
            println!("Strengths");
            for s in fb.strengths {
                println!("  • {}", s);
            }
            println!("\nAreas for Improvement");
            for s in fb.improvements {
                println!("  • {}", s);
            }
            println!();
        }
        let again = prompt_result(
            Confirm::new("Start New Interview?")
                .with_default(false)
                .prompt(),
        )?;
        self.interview.lock().await.restart();
        Ok(again.unwrap_or(false))
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choices = vec![MainChoice::Aptitude, MainChoice::Interview, MainChoice::Exit];
            let choice =
                prompt_result(Select::new("What would you like to practice?", choices).prompt())?
                    .unwrap_or(MainChoice::Exit);
            match choice {
                MainChoice::Aptitude => self.run_assessment().await?,
                MainChoice::Interview => self.run_interview().await?,
                MainChoice::Exit => {
                    info!("exiting");
                    return Ok(());
                }
            }
        }
    }

    async fn run_assessment(&self) -> Result<(), DomainError> {
        loop {
            self.engine.lock().await.restart();
            if !self.show_instructions().await? {
                return Ok(());
            }
            self.engine.lock().await.start();

            while self.engine.lock().await.status() == AssessmentStatus::InProgress {
                if !self.question_screen().await? {
                    self.engine.lock().await.restart();
                    return Ok(());
                }
            }

            let timed_out = self.engine.lock().await.session().remaining_secs == 0;
            if !self.show_results(timed_out).await? {
                self.engine.lock().await.restart();
                return Ok(());
            }
        }
    }

    async fn run_interview(&self) -> Result<(), DomainError> {
        loop {
            let Some((role, level)) = self.choose_setup().await? else {
                return Ok(());
            };
            self.interview.lock().await.start_session(role, level).await;
            if self.interview.lock().await.status() != InterviewStatus::Active {
                continue;
            }

            while self.interview.lock().await.status() == InterviewStatus::Active {
                if !self.interview_screen().await? {
                    break;
                }
            }

            if self.interview.lock().await.status() == InterviewStatus::Feedback
                && !self.feedback_screen().await?
            {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question::new(
            2,
            "Logical Reasoning",
            "Which number should come next?",
            vec!["35".into(), "40".into(), "42".into(), "45".into()],
            2,
        )
        .unwrap()
    }

    #[test]
    fn test_question_actions_mark_selection_and_nav() {
        let q = question();
        let first = question_actions(&q, Some(1), 0, 3);
        assert_eq!(first[1].to_string(), "(•) 40");
        assert_eq!(first[0].to_string(), "( ) 35");
        assert!(!first.contains(&QuestionAction::Previous));
        assert!(first.contains(&QuestionAction::Next));
        assert!(!first.contains(&QuestionAction::Submit));

        let last = question_actions(&q, None, 2, 3);
        assert!(last.contains(&QuestionAction::Previous));
        assert!(last.contains(&QuestionAction::Submit));
        assert!(!last.contains(&QuestionAction::Next));
    }

    #[test]
    fn test_navigator_labels() {
        let labels = navigator_labels(&[Some(0), None, None], 1);
        assert_eq!(labels, vec!["✓ 1", "▶ 2", "· 3"]);
    }

    #[test]
    fn test_result_lines_show_unanswered() {
        let q = question();
        let report = ScoreReport::compute(&[None], std::slice::from_ref(&q));
        let lines = result_lines(&report, &[q]);
        assert_eq!(lines[0], "0.0%");
        assert_eq!(lines[1], "Your Score: 0 out of 1");
        assert!(lines.contains(&"    Correct answer: 42".to_string()));
        assert!(lines.contains(&"    Your answer: Not answered".to_string()));
    }
}
