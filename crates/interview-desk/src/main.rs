//! Interview Desk: console front end for AI-led video interviews.

mod app;
mod app_command;
mod config;
mod console;
mod error;
mod link_clipboard;
mod logging;
mod media;
mod notifier;
mod uploader;

pub(crate) use {
    app::App,
    app_command::{AppCommand, ConsoleCommand},
    console::ConsoleReader,
    error::{AppError, Result as AppResult},
    link_clipboard::LinkClipboard,
    notifier::Notifier,
    uploader::SimulatedUploader,
};

use crate::{
    config::{Config, MediaBackendKind},
    media::{MicrophoneDevices, SimulatedDevices},
};

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use interview_desk_core::MediaDevices;
use tracing::{error, info};

/// How long to wait for blocking work (the stdin reader) on exit.
const RUNTIME_SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Parser, Debug)]
#[command(name = "interview-desk", version, about = "Record and manage AI video interviews")]
struct Cli {
    /// Path to the config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Media backend, overriding the config file
    #[arg(long, value_enum)]
    backend: Option<MediaBackendKind>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

/// Application entry point.
fn main() {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let log_dir = if config.logging.file {
        match Config::log_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                eprintln!("Failed to prepare log directory: {}", e);
                None
            }
        }
    } else {
        None
    };

    // Held until exit so the file writer flushes.
    let _log_guard = match logging::init(&config.logging, cli.log_json, log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let backend = cli.backend.unwrap_or(config.capture.backend);
    info!(backend = ?backend, "Selected media backend");

    rt.block_on(async {
        match backend {
            MediaBackendKind::Microphone => serve(MicrophoneDevices::new(), &config).await,
            MediaBackendKind::Simulated => serve(SimulatedDevices::new(), &config).await,
        }
    });

    // The stdin reader may still be parked in a blocking read.
    rt.shutdown_timeout(RUNTIME_SHUTDOWN_TIMEOUT);
}

async fn serve<D>(devices: D, config: &Config)
where
    D: MediaDevices + Send + Sync + 'static,
{
    let app = App::new(devices, config, Box::new(std::io::stdout()));
    let console = ConsoleReader::new(app.command_sender());
    let shutdown_rx = app.subscribe_shutdown();

    tokio::join!(
        async {
            if let Err(e) = console.run(shutdown_rx).await {
                error!(error = ?e, "Console reader error");
            }
        },
        async {
            if let Err(e) = app.run().await {
                error!(error = ?e, "App error");
            }
        }
    );
}
