//! Mock interview: setup -> active (record / stop pairs) -> feedback -> (restart) setup.
//!
//! - The capture device is held by a `CaptureGuard` and released before the session
//!   ever leaves `active`, including on drop.
//! - Transcription runs outside the controller via `TranscriptionRequest`; outcomes
//!   carry the generation they were requested under and stale ones are discarded.

use crate::domain::{
    CapturedAudio, DomainError, ExperienceLevel, InterviewFeedback, InterviewSession,
    InterviewStatus, JobRole, STATIC_FEEDBACK,
};
use crate::ports::{AudioCapturePort, PromptBankPort, TranscriptionPort};
use crate::usecases::capture_guard::CaptureGuard;
use std::sync::Arc;
use tracing::{info, warn};

pub struct RecordingController {
    device: Arc<dyn AudioCapturePort>,
    stt: Arc<dyn TranscriptionPort>,
    prompts: Arc<dyn PromptBankPort>,
    session: InterviewSession,
    capture: Option<CaptureGuard>,
    /// Bumped on start_session and restart.
    generation: u64,
}

/// Captured audio waiting for speech-to-text.
pub struct TranscriptionRequest {
    generation: u64,
    audio: CapturedAudio,
}

impl TranscriptionRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn audio(&self) -> &CapturedAudio {
        &self.audio
    }

    pub async fn run(self, stt: &dyn TranscriptionPort) -> TranscriptionOutcome {
        let result = stt.transcribe(&self.audio).await;
        TranscriptionOutcome {
            generation: self.generation,
            result,
        }
    }
}

pub struct TranscriptionOutcome {
    generation: u64,
    result: Result<String, DomainError>,
}

impl TranscriptionOutcome {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl RecordingController {
    pub fn new(
        device: Arc<dyn AudioCapturePort>,
        stt: Arc<dyn TranscriptionPort>,
        prompts: Arc<dyn PromptBankPort>,
    ) -> Self {
        Self {
            device,
            stt,
            prompts,
            session: InterviewSession::new(),
            capture: None,
            generation: 0,
        }
    }

    pub fn session(&self) -> &InterviewSession {
        &self.session
    }

    pub fn status(&self) -> InterviewStatus {
        self.session.status
    }

    pub fn is_recording(&self) -> bool {
        self.session.recording
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Speech-to-text collaborator, for callers that run requests outside the controller.
    pub fn transcriber(&self) -> Arc<dyn TranscriptionPort> {
        Arc::clone(&self.stt)
    }

    pub fn feedback(&self) -> Option<InterviewFeedback> {
        (self.session.status == InterviewStatus::Feedback).then_some(STATIC_FEEDBACK)
    }

    pub async fn start_session(&mut self, role: JobRole, level: ExperienceLevel) {
        if self.session.status != InterviewStatus::Setup {
            warn!(status = ?self.session.status, "start_session ignored: not in setup");
            return;
        }
        match self.prompts.prompt_for(role, level).await {
            Ok(prompt) => {
                self.generation += 1;
                self.session.role = Some(role);
                self.session.level = Some(level);
                self.session.prompt = prompt;
                self.session.last_error = None;
                self.session.status = InterviewStatus::Active;
                info!(%role, %level, generation = self.generation, "interview started");
            }
            Err(e) => {
                warn!(error = %e, "no prompt for interview");
                self.session.last_error = Some(e.user_message());
            }
        }
    }

    pub async fn begin_recording(&mut self) {
        if self.session.status != InterviewStatus::Active || self.session.recording {
            warn!(
                status = ?self.session.status,
                recording = self.session.recording,
                "begin_recording ignored"
            );
            return;
        }
        match self.device.acquire().await {
            Ok(stream) => {
                self.capture = Some(CaptureGuard::new(stream));
                self.session.recording = true;
                self.session.last_error = None;
                info!("recording started");
            }
            Err(e) => {
                warn!(error = %e, "failed to start recording");
                self.session.recording = false;
                self.session.last_error = Some(e.user_message());
            }
        }
    }

    /// Release the device and hand back the audio for transcription.
    pub fn end_recording(&mut self) -> Option<TranscriptionRequest> {
        let Some(guard) = self.capture.take() else {
            warn!("end_recording ignored: not recording");
            return None;
        };
        let audio = guard.finish();
        self.session.recording = false;
        info!(secs = audio.duration_secs(), "recording stopped");
        Some(TranscriptionRequest {
            generation: self.generation,
            audio,
        })
    }

    /// Store a finished transcription. Returns false if it was discarded as stale.
    pub fn apply_transcription(&mut self, outcome: TranscriptionOutcome) -> bool {
        if outcome.generation != self.generation
            || self.session.status != InterviewStatus::Active
        {
            info!(
                generation = outcome.generation,
                current = self.generation,
                status = ?self.session.status,
                "discarding stale transcription"
            );
            return false;
        }
        match outcome.result {
            Ok(text) => {
                self.session.transcript = text;
                self.session.last_error = None;
            }
            Err(e) => {
                warn!(error = %e, "speech-to-text failed");
                self.session.transcript.clear();
                self.session.last_error = Some(e.user_message());
            }
        }
        true
    }

    /// Stop recording and transcribe in place.
    pub async fn finish_recording(&mut self) {
        let Some(request) = self.end_recording() else {
            return;
        };
        let stt = Arc::clone(&self.stt);
        let outcome = request.run(stt.as_ref()).await;
        self.apply_transcription(outcome);
    }

    pub async fn end_session(&mut self) {
        if self.session.status != InterviewStatus::Active {
            warn!(status = ?self.session.status, "end_session ignored: not active");
            return;
        }
        if self.session.recording {
            self.finish_recording().await;
        }
        self.session.status = InterviewStatus::Feedback;
        info!("interview ended; showing feedback");
    }

    pub fn restart(&mut self) {
        if let Some(guard) = self.capture.take() {
            drop(guard);
            info!("recording discarded on restart");
        }
        self.generation += 1;
        self.session = InterviewSession::new();
        info!(generation = self.generation, "interview reset");
    }
}
