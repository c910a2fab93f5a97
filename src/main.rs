mod archive;
mod audio;
mod config;
mod delivery;
mod llm_client;
mod note;
mod pipeline;
mod transcription;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};

use archive::EncounterArchive;
use config::Config;
use llm_client::OllamaClient;
use pipeline::ScribePipeline;
use transcription::WhisperProvider;

/// Headless CLI for clinical encounter transcription and structured note generation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the encounter audio recording (MP3, WAV, M4A, ...)
    audio: PathBuf,

    /// Path to the Whisper model file (.bin)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Ollama server URL
    #[arg(long)]
    ollama_url: Option<String>,

    /// Generative model name for note structuring
    #[arg(long)]
    llm_model: Option<String>,

    /// Number of threads for Whisper inference
    #[arg(long, default_value = "4")]
    threads: i32,

    /// Archive the encounter under this directory
    #[arg(long)]
    archive_dir: Option<PathBuf>,

    /// Deliver the finished note to this webhook URL
    #[arg(long)]
    notify_url: Option<String>,

    /// Contact identifier for note delivery
    #[arg(long)]
    contact: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = Config::load(&Config::default_config_path()?)?;

    // CLI flags override config
    let model_path = match &args.model {
        Some(path) => path.clone(),
        None => config.get_model_path()?,
    };
    let ollama_url = args
        .ollama_url
        .clone()
        .unwrap_or_else(|| config.ollama_url.clone());
    let llm_model = args
        .llm_model
        .clone()
        .unwrap_or_else(|| config.llm_model.clone());

    info!("Scribe CLI starting...");
    info!("Audio: {:?}", args.audio);
    info!("Whisper model: {:?}", model_path);
    info!("Ollama: {} (model {})", ollama_url, llm_model);

    if !model_path.exists() {
        error!("Model file not found: {:?}", model_path);
        eprintln!("\nModel file not found: {:?}", model_path);
        eprintln!("\nPlease download a Whisper model and place it at the expected location.");
        eprintln!("You can download models from:");
        eprintln!("  https://huggingface.co/ggerganov/whisper.cpp/tree/main");
        eprintln!("\nRecommended for clinical audio: ggml-large.bin");
        eprintln!("\nPlace the model file at: {:?}", model_path);
        eprintln!("Or specify a custom path with: --model /path/to/model.bin");
        return Ok(());
    }

    // Load process-lifetime model handles
    let whisper = WhisperProvider::new(&model_path, args.threads)?;
    let llm = OllamaClient::new(&ollama_url, &llm_model)?;

    match llm.list_models().await {
        Ok(models) => {
            if !models.iter().any(|m| m == &llm_model) {
                warn!(
                    "Model {} not reported by Ollama (available: {:?})",
                    llm_model, models
                );
            }
        }
        Err(e) => warn!("Could not verify Ollama connectivity: {}", e),
    }
    if let Err(e) = llm.prewarm().await {
        warn!("Model warm-up failed: {}", e);
    }

    let pipeline = ScribePipeline::new(whisper, llm);
    let encounter = pipeline.process(&args.audio).await?;

    if !encounter.transcript.is_empty() {
        println!("\n--- Transcript ---\n");
        println!("{}", encounter.transcript);
    }
    println!("\n--- Structured Note ---");
    println!("{}", encounter.note);
    println!("Detected language: {}", encounter.detected_language);

    if let Some(dir) = &args.archive_dir {
        let archive = EncounterArchive::new(dir.clone());
        let id = archive.store(&encounter)?;
        println!("Archived encounter: {}", id);
    }

    if let Some(url) = &args.notify_url {
        match &args.contact {
            Some(contact) => {
                let http = reqwest::Client::new();
                let receipt = delivery::deliver_note(&http, url, contact, &encounter.note).await?;
                println!(
                    "Note delivered to {} (status {})",
                    receipt.contact, receipt.status
                );
            }
            None => warn!("--notify-url given without --contact; skipping delivery"),
        }
    }

    info!("Encounter complete");
    Ok(())
}
