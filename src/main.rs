//! historymidi: turns browser history into a four-voice MIDI sequence.
//!
//! Entry point: parses arguments, loads the mapping config, reads the
//! browser's history and writes a MIDI file.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use historymidi::app::{App, OUTPUT_FILENAME};
use historymidi::managers::history_source::HistorySource;
use historymidi::services::config_loader::{ConfigLoader, ConfigLoaderTrait};
use historymidi::types::browser::Browser;
use historymidi::types::config::MappingConfig;
use historymidi::types::errors::AppError;

/// Convert browser history into a polyphonic MIDI sequence.
#[derive(Parser)]
#[command(name = "historymidi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Browser whose history you want to use
    #[arg(long, value_parser = ["chrome", "firefox"])]
    browser: String,

    /// Tempo in beats per minute (default 120, or the config file's value)
    #[arg(long)]
    bpm: Option<u32>,

    /// Number of voices (MIDI tracks) to spread domains across
    #[arg(long)]
    voices: Option<usize>,

    /// Output MIDI file
    #[arg(short, long, default_value = OUTPUT_FILENAME)]
    output: PathBuf,

    /// Read this history database instead of the browser's default profile
    #[arg(long)]
    history_db: Option<PathBuf>,

    /// Mapping config file (JSON); defaults to the platform config directory
    #[arg(long)]
    config: Option<String>,

    /// Save the effective mapping config back to the config file
    #[arg(long)]
    save_config: bool,

    /// Log debug details (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<MappingConfig, AppError> {
    let mut loader = ConfigLoader::new(cli.config.clone());
    let mut config = loader.load()?;
    if let Some(bpm) = cli.bpm {
        config.bpm = bpm;
    }
    if let Some(voices) = cli.voices {
        config.voice_count = voices;
    }
    loader.set_config(config.clone())?;
    if cli.save_config {
        loader.save()?;
        println!("Saved config to: {}", loader.get_config_path());
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let browser: Browser = cli.browser.parse()?;
    let config = load_config(cli)?;
    let app = App::new(config)?;

    println!(
        "Starting process for {} at {} BPM...",
        browser,
        app.config().bpm
    );

    println!("Locating browser history file...");
    let source = App::history_source(browser, cli.history_db.as_deref())?;
    println!("Found history at: {}", source.path().display());

    println!("Fetching history data...");
    let records = source.fetch_records()?;
    println!("Found {} history entries.", records.len());

    println!("Composing MIDI sequence...");
    let summary = app.render(&records, &cli.output)?;
    if summary.records_skipped > 0 {
        println!("Skipped {} malformed URLs.", summary.records_skipped);
    }
    if summary.is_empty() {
        println!("No history data to process.");
    }

    println!();
    println!("----------------------------------------------------");
    println!(
        "Success! MIDI file created: {} ({} notes)",
        summary.output_path.display(),
        summary.notes_written
    );
    println!("----------------------------------------------------");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
