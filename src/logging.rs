use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `MULTAB_LOG=debug`
pub const LOG_ENV: &str = "MULTAB_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Send tracing output to `path`. The terminal belongs to the TUI, so without a
/// log file nothing is installed and events are dropped.
pub fn init_file_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_events_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("multab.log");
        init_file_logging(&path).unwrap();
        tracing::info!("hello from the drill");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("hello from the drill"));
    }
}
