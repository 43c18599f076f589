use std::{fs::File, io, path::Path, sync::Mutex};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "WEATHER_SPARK_LOG";

/// Installs the global subscriber. The dashboard owns the terminal, so events
/// only go to `log_file`; without one they are dropped.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true);

    match log_file {
        Some(path) => {
            let writer = open_log_writer(path)?;
            let _ = builder.with_writer(writer).try_init();
        }
        None => {
            let _ = builder.with_writer(io::sink).try_init();
        }
    }
    Ok(())
}

pub fn open_log_writer(path: &Path) -> anyhow::Result<Mutex<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context("creating log directory failed")?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {} failed", path.display()))?;
    Ok(Mutex::new(file))
}
