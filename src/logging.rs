use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "cost-estimator.log";

pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("cost-estimator").join(LOG_FILE_NAME))
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Log to stderr. Used when no full-screen UI owns the terminal.
pub fn init_stderr(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log to a file under the user cache dir so the TUI screen stays clean.
/// Logging is silently disabled if the file cannot be opened.
pub fn init_file(level: &str) {
    let Some(path) = log_path() else {
        return;
    };
    let file = path
        .parent()
        .map_or(Ok(()), |dir| fs::create_dir_all(dir))
        .and_then(|_| File::options().create(true).append(true).open(&path));
    let Ok(file) = file else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
