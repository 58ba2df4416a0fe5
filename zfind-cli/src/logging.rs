use anyhow::{Context, Result};
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::dispatcher::{self, DefaultGuard, Dispatch};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging for one run of the binary.
///
/// The subscriber is installed as the default for the current thread only and
/// removed again when the session is closed or dropped. Library code that
/// spawns threads carries the active dispatcher along with it.
pub struct LogSession {
    _guard: DefaultGuard,
}

impl LogSession {
    /// Opens the log sink: `log_file` (truncated) when given, stderr otherwise.
    ///
    /// `RUST_LOG` takes precedence over `level`.
    pub fn open(level: &str, log_file: Option<&Path>) -> Result<Self> {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(level)
                .with_context(|| format!("Invalid log level '{}'", level))?,
        };

        let dispatch = match log_file {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Error opening log file {}", path.display()))?;
                Dispatch::new(
                    fmt()
                        .with_env_filter(filter)
                        .with_ansi(false)
                        .with_writer(Arc::new(file))
                        .finish(),
                )
            }
            None => Dispatch::new(
                fmt()
                    .with_env_filter(filter)
                    .with_writer(io::stderr)
                    .finish(),
            ),
        };

        let guard = dispatcher::set_default(&dispatch);
        info!("Log session opened");
        Ok(Self { _guard: guard })
    }

    /// Flushes a final record and uninstalls the subscriber
    pub fn close(self) {
        info!("Log session closed");
    }
}
