use std::{
    fmt::Display,
    fs::{self, File},
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

mod error;
pub mod geometry;
pub mod grid;
pub mod input;

pub use error::PuzzleError;
pub use grid::{Direction, Grid, Position};

pub fn init_tracing() -> anyhow::Result<()> {
    install_subscriber(None)
}

/// Like [`init_tracing`], but also writes every debug event to a fresh
/// `debug-<timestamp>.log` inside `dir`. Returns the path of the log file.
pub fn init_tracing_with_log_file(dir: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let timestamp = chrono::Local::now().format("%Y-%m-%d-%H%M%S");
    let path = dir.join(format!("debug-{timestamp}.log"));
    let file = File::create(&path)?;
    install_subscriber(Some(file))?;
    Ok(path)
}

fn install_subscriber(log_file: Option<File>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()?;
    let indicatif_layer = IndicatifLayer::new();
    let file_layer = log_file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .with_filter(LevelFilter::DEBUG)
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_filter(env_filter),
        )
        .with(indicatif_layer)
        .with(file_layer)
        .try_init()?;
    Ok(())
}

/// Prints one answer line to stdout and records it as an event.
pub fn report(day: u8, part: u8, label: &str, value: impl Display) {
    println!("Day {day:02} - Part {part}: {label} = {value}");
    tracing::info!(day, part, %value, "{label}");
}
