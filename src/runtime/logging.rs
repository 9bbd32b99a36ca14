use std::fs;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

/// Send `tracing` output to a daily rotating file.
///
/// The terminal belongs to the UI, so nothing is written to stderr.
/// `RUST_LOG` wins over the configured filter.
pub fn init(settings: &Settings) -> anyhow::Result<()> {
    let Some(dir) = settings.log_dir() else {
        return Ok(());
    };
    fs::create_dir_all(&dir).with_context(|| format!("creating log dir {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(&dir, "lilt.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("installing log subscriber")?;

    // the writer thread must outlive every span; leak the guard
    std::mem::forget(guard);
    Ok(())
}
