// Letter Journey command line
// Swedish letters and sounds for children who need to hear them, at a terminal

mod config;
mod console;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::{AppConfig, Overrides};
use console::GameConsole;
use letterjourney_core::config::default_config_path;
use letterjourney_core::{FirstRunMarker, PhoneticsTable, ProgressStore};
use letterjourney_game::GameSession;
use letterjourney_spk::{detect, SpeechEngine, TtsBackend};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// How long queued speech may keep playing after the player quits
const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);

#[derive(Parser)]
#[command(name = "letterjourney")]
#[command(about = "Letter Journey - learn Swedish letters and their sounds", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Directory holding progress.json and welcome.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Play without speech
    #[arg(long, global = true)]
    no_speech: bool,

    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the games (default)
    Play,

    /// Show progress
    Stats,

    /// Clear all progress
    Reset {
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },

    /// Show which speech backend is available
    Voices,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let overrides = Overrides {
        data_dir: cli.data_dir.clone(),
        no_speech: cli.no_speech,
    };
    let config = AppConfig::load(&config_path, &overrides)?;

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => play(config).await?,
        Commands::Stats => show_stats(&config),
        Commands::Reset { yes } => reset_progress(&config, yes)?,
        Commands::Voices => show_voices(&config).await,
    }

    Ok(())
}

/// Logs go to stderr so they never interleave with the game on stdout
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

async fn play(config: AppConfig) -> Result<()> {
    let speech = SpeechEngine::start(config.speech.clone()).await?;
    info!("Speech backend: {}", speech.backend());

    let progress = ProgressStore::load(config.storage.progress_path());
    let welcome = FirstRunMarker::new(config.storage.welcome_path()).check_and_mark();

    let session = GameSession::new(PhoneticsTable::swedish(), progress, &speech, config.game.clone());
    let mut console = GameConsole::new(session);

    let stdin = io::stdin();
    let result = console.run(stdin.lock(), io::stdout(), welcome);

    let progress = console.into_session().into_progress();
    if let Err(e) = progress.save() {
        warn!("Failed to save progress on exit: {}", e);
    }

    speech.flush(SHUTDOWN_GRACE).await;
    result
}

fn show_stats(config: &AppConfig) {
    let table = PhoneticsTable::swedish();
    let progress = ProgressStore::load(config.storage.progress_path());
    let summary = progress.summary(table.len());

    println!("📊 Letter Journey progress");
    println!("  Level:    {}", summary.level);
    println!("  Stars:    ⭐ {}", summary.stars);
    println!("  Streak:   🔥 {}", summary.streak);
    println!("  Attempts: {}", summary.total_attempts);
    println!("  {}", summary);

    let mastered: String = progress.mastered_letters().iter().collect();
    if !mastered.is_empty() {
        println!("  Mastered: {}", mastered);
    }
}

fn reset_progress(config: &AppConfig, yes: bool) -> Result<()> {
    let path = config.storage.progress_path();
    if !yes {
        print!("Reset all progress in {}? [y/N] ", path.display());
        io::Write::flush(&mut io::stdout())?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Nothing changed.");
            return Ok(());
        }
    }

    let mut progress = ProgressStore::load(&path);
    progress.reset();
    progress.save()?;
    println!("✅ Progress reset");
    Ok(())
}

async fn show_voices(config: &AppConfig) {
    if !config.speech.enabled {
        println!("🔇 Speech disabled");
        return;
    }

    match detect(&config.speech).await {
        TtsBackend::Piper => println!(
            "🔊 piper with {}",
            config.speech.piper.resolved_model_path().display()
        ),
        TtsBackend::EspeakNg => println!("🔊 espeak-ng (voice '{}')", config.speech.espeak.voice),
        TtsBackend::None => {
            println!("🔇 No speech backend found. Install piper or espeak-ng for sound.")
        }
    }
}
