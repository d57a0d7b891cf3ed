//! Log sink setup
//!
//! Events go to stderr and are appended to `daemon-manager.log` in the
//! working directory.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};

/// Append-only log file, relative to the working directory
pub const LOG_FILE: &str = "daemon-manager.log";

const DEFAULT_FILTER: &str = "daemon_manager=info,daemon_manager_core=info,tower_http=info";

/// Installs the global subscriber, creating the log file if absent
pub fn init(log_file: &Path) -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer(log_file)?)
        .init();

    Ok(())
}

/// Plain-text layer appending to `log_file`, created if absent
pub fn file_layer<S>(log_file: &Path) -> Result<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let file = open_append(log_file)?;

    Ok(fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file)))
}

fn open_append(log_file: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Error opening log file {}", log_file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_layer_creates_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);
        assert!(!path.exists());

        for attempt in 1..=2 {
            let subscriber = tracing_subscriber::registry().with(file_layer(&path).unwrap());
            tracing::subscriber::with_default(subscriber, || {
                tracing::info!("Starting daemon: nginx (attempt {})", attempt);
            });
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Starting daemon: nginx (attempt 1)"));
        assert!(lines[1].contains("Starting daemon: nginx (attempt 2)"));
        assert!(!contents.contains('\x1b'));
    }

    #[test]
    fn test_unwritable_log_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(LOG_FILE);
        assert!(open_append(&path).is_err());
    }
}
