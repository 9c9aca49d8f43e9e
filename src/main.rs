//! Wiring & DI. Entry point: bootstrap adapters, inject into use cases, run UI.
//! No business logic here.

use dotenv::dotenv;
use prepdeck::adapters::audio::SimulatedMicrophone;
use prepdeck::adapters::bank::{JsonQuestionBank, StaticPromptBank, StaticQuestionBank};
use prepdeck::adapters::clock::IntervalTicker;
use prepdeck::adapters::stt::{MockTranscriber, WhisperTranscriber};
use prepdeck::adapters::ui::tui::TuiInputPort;
use prepdeck::ports::{InputPort, QuestionBankPort, TranscriptionPort};
use prepdeck::shared::config::AppConfig;
use prepdeck::usecases::{AssessmentEngine, RecordingController, drive_ticks};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration; using defaults");
        AppConfig::default()
    });

    prepdeck::adapters::ui::init_ui();

    // --- Question bank (loaded once, immutable afterwards) ---
    let bank_source: Box<dyn QuestionBankPort> = match cfg.question_bank_path.as_deref() {
        Some(path) => Box::new(JsonQuestionBank::new(path)),
        None => Box::new(StaticQuestionBank::new()),
    };
    let bank = Arc::new(
        bank_source
            .load()
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?,
    );

    // --- Aptitude test: engine + 1s ticker + driver task ---
    let (ticker, ticks) = IntervalTicker::per_second();
    let duration_secs = cfg.assessment_duration_secs_or_default();
    info!(
        questions = bank.len(),
        duration_secs, "aptitude test configured"
    );
    let engine = Arc::new(Mutex::new(AssessmentEngine::new(
        Arc::clone(&bank),
        Arc::new(ticker),
        duration_secs,
    )));
    tokio::spawn(drive_ticks(Arc::clone(&engine), ticks));

    // --- Mock interview: microphone + speech-to-text + prompts ---
    let mic = SimulatedMicrophone::new(cfg.mic_sample_rate_or_default());
    mic.set_available(cfg.mic_available_or_default());

    let stt: Arc<dyn TranscriptionPort> = if cfg.is_stt_configured() {
        info!(
            model = %cfg.stt_model_or_default(),
            url = %cfg.stt_api_url_or_default(),
            "speech-to-text enabled"
        );
        Arc::new(WhisperTranscriber::new(
            cfg.stt_api_url_or_default(),
            cfg.stt_api_key.clone().unwrap_or_default(),
            cfg.stt_model_or_default(),
        ))
    } else {
        warn!("PREPDECK_STT_API_KEY not set, using mock transcriber");
        Arc::new(MockTranscriber::with_delay(
            cfg.mock_stt_delay_ms_or_default(),
        ))
    };

    let controller = Arc::new(Mutex::new(RecordingController::new(
        Arc::new(mic),
        stt,
        Arc::new(StaticPromptBank::new()),
    )));

    // --- Run (main menu -> Aptitude Test / Mock Interview) ---
    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(engine, controller));
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
