//! Logger module
//!
//! Installs a `tracing-subscriber` registry with:
//! - Console output with color control
//! - Optional file output in Full, Compact or JSON format
//! - An `EnvFilter` built from the configured level, overridable with `RUST_LOG`

pub mod config;

pub use config::*;

use std::fs::{self, OpenOptions};
use std::io::IsTerminal;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::Layered, layer::SubscriberExt,
    util::SubscriberInitExt,
};

type FilteredRegistry = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Initialize the global subscriber with the given configuration
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // File layer must come before the console layer, otherwise ANSI codes from
    // span field formatting leak into the file.
    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.file.enabled {
        layers.push(file_layer(&config.file)?);
    }
    if config.console.enabled {
        layers.push(console_layer(&config.console));
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    Ok(())
}

fn console_layer(config: &ConsoleConfig) -> BoxedLayer {
    let use_ansi = config.colored && std::io::stdout().is_terminal();

    fmt::layer()
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}

fn file_layer(config: &FileConfig) -> anyhow::Result<BoxedLayer> {
    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(config.append)
        .truncate(!config.append)
        .open(&config.path)
        .with_context(|| format!("Failed to open log file {}", config.path.display()))?;
    let writer = Mutex::new(file);

    let layer = match config.format {
        LogFormat::Full => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .compact()
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_ansi(false)
            .json()
            .with_writer(writer)
            .boxed(),
    };

    Ok(layer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_layer_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.log");
        let config = FileConfig::new(true, path.clone(), false, LogFormat::Compact).unwrap();

        assert!(file_layer(&config).is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_init_logger_rejects_invalid_config() {
        let config = LoggerConfig::default().with_level("chatty");
        assert!(init_logger(config).is_err());
    }
}
