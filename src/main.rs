//! Pet Sound Translator CLI

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use saywhat::{App, ClipRecorder, Config, Phase};

/// Pet Sound Translator
#[derive(Parser)]
#[command(name = "saywhat")]
#[command(about = "Record a pet sound and translate it to a phrase", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive record/translate session
    Run {
        /// Audio input device name (uses default if not specified)
        #[arg(short, long)]
        device: Option<String>,

        /// Path to the classifier model file
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Path to the label table JSON file
        #[arg(short, long)]
        labels: Option<PathBuf>,
    },

    /// List available audio input devices
    Devices,

    /// Record a clip to a WAV file (for inspection)
    Record {
        /// Recording duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u32,

        /// Audio input device name
        #[arg(short = 'D', long)]
        device: Option<String>,
    },

    /// Run a single inference and print the translation
    Translate {
        /// Path to the classifier model file
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Path to the label table JSON file
        #[arg(short, long)]
        labels: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Quiet by default, use -v for more
    let log_level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();

    let mut config = if let Some(ref config_path) = cli.config {
        Config::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        Config::default()
    };

    match cli.command {
        Commands::Run {
            device,
            model,
            labels,
        } => {
            if let Some(device) = device {
                config.audio.device = Some(device);
            }
            if let Some(model) = model {
                config.model.model_path = model;
            }
            if let Some(labels) = labels {
                config.labels.labels_path = labels;
            }

            run_session(config)
        }
        Commands::Devices => list_devices(),
        Commands::Record { duration, device } => {
            if let Some(device) = device {
                config.audio.device = Some(device);
            }
            record_clip(config, duration)
        }
        Commands::Translate { model, labels } => {
            if let Some(model) = model {
                config.model.model_path = model;
            }
            if let Some(labels) = labels {
                config.labels.labels_path = labels;
            }

            let text = saywhat::app::translate_once(&config)?;
            println!("{}", text);
            Ok(())
        }
    }
}

/// Interactive session: Enter is the record/stop toggle
fn run_session(config: Config) -> Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    let mut app = App::new(config);
    if !app.model_ready() {
        println!("{}", app.display());
    }

    println!("Press Enter to record, Enter again to stop and translate.");
    println!("Type 'q' (or Ctrl+C, then Enter) to quit.");
    print_status(&app);

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        if !running.load(Ordering::SeqCst) {
            break;
        }

        let line = line?;
        if line.trim() == "q" {
            break;
        }

        app.press();
        print_status(&app);
    }

    // Finalize a session left open at shutdown
    if app.phase() == Phase::Recording {
        app.press();
        print_status(&app);
    }

    Ok(())
}

fn print_status(app: &App) {
    if app.display().is_empty() {
        println!("[{}]", app.phase().button_label());
    } else {
        println!("[{}] {}", app.phase().button_label(), app.display());
    }
}

/// List available audio input devices
fn list_devices() -> Result<()> {
    let devices = saywhat::audio::list_input_devices()?;

    if devices.is_empty() {
        println!("No audio input devices found");
    } else {
        println!("Available audio input devices:");
        for (i, name) in devices.iter().enumerate() {
            println!("  {}. {}", i + 1, name);
        }
    }

    Ok(())
}

/// Record a fixed-duration clip
fn record_clip(config: Config, duration_secs: u32) -> Result<()> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    let mut recorder = ClipRecorder::new(config.audio, config.recording);
    recorder.start().context("Failed to start recording")?;

    println!(
        "Recording for {} seconds... Press Ctrl+C to stop early",
        duration_secs
    );

    let mut elapsed = 0u32;
    while running.load(Ordering::SeqCst) && elapsed < duration_secs * 10 {
        std::thread::sleep(Duration::from_millis(100));
        elapsed += 1;
        print!("\rRecording: {:.1}s / {}s", elapsed as f32 / 10.0, duration_secs);
        let _ = std::io::Write::flush(&mut std::io::stdout());
    }
    println!();

    match recorder.stop().context("Failed to finalize clip")? {
        Some(path) => println!("Clip saved to: {}", path.display()),
        None => println!("Nothing was recorded"),
    }

    Ok(())
}
