use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

/// Initializes file-backed logging. The TUI owns the terminal, so nothing is
/// ever written to stdout/stderr; `RUST_LOG` controls verbosity.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let path = match log_file {
        Some(path) => path.to_path_buf(),
        None => default_log_path(),
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("memtune=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("memtune")
        .join("memtune.log")
}
