mod app;

use anyhow::{Context, Result};
use std::{
    fs::{self, File, OpenOptions},
    io,
    path::Path,
    sync::Mutex,
};

use hotel_core::{
    config::{self, AppConfig},
    lifecycle, Store,
};
use tracing::{error, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|err| {
        eprintln!("Could not read configuration ({err:#}); using defaults.");
        AppConfig::default()
    });
    init_logging(&config.log_dir());

    if let Err(err) = config::ensure_default_config() {
        warn!("could not write default configuration: {err:#}");
    }

    let store = Store::from_config(&config);
    let catalog = lifecycle::open(&store);

    let mut desk = app::Desk::new(catalog, io::stdin().lock(), io::stdout());
    desk.run()?;
    let catalog = desk.into_catalog();

    if let Err(err) = lifecycle::close(&store, &catalog) {
        error!("{err}");
        println!("Could not save data: {err}");
    }
    Ok(())
}

/// Install stderr logging plus a file layer when the log file can be opened.
fn init_logging(log_dir: &Path) {
    let log_file = match open_log_file(log_dir) {
        Ok(file) => Some(file),
        Err(err) => {
            eprintln!("Logging to stderr only: {err:#}");
            None
        }
    };

    let env_filter = EnvFilter::from_default_env();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(io::stderr);

    let file_layer = log_file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .compact()
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

fn open_log_file(log_dir: &Path) -> Result<File> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;
    let log_path = log_dir.join("hotel.log");
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))
}
