//! Logging configuration for PrimDB
//!
//! Structured logging built on the `tracing` framework, with level
//! filtering, pretty or compact output and daily file rotation.

use primdb_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name used when a log path has none
const DEFAULT_LOG_FILE: &str = "primdb.log";

/// Log output destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    /// Output to stdout
    Stdout,
    /// Output to a file with daily rotation
    File(PathBuf),
}

/// Log format style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line format (default)
    Pretty,
    /// Compact single-line format
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level filter, in `EnvFilter` syntax
    pub level: String,
    /// Output destination
    pub output: LogOutput,
    /// Format style
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: LogOutput::Stdout,
            format: LogFormat::Pretty,
        }
    }
}

impl LogConfig {
    /// Info level on stdout
    pub fn info() -> Self {
        Self::default()
    }

    /// Debug level, which includes cache hits, misses and timings
    pub fn debug() -> Self {
        Self {
            level: "debug".to_string(),
            ..Default::default()
        }
    }

    /// Warn level
    pub fn warn() -> Self {
        Self {
            level: "warn".to_string(),
            ..Default::default()
        }
    }

    /// Set log output to a daily-rotated file
    pub fn with_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = LogOutput::File(path.into());
        self
    }

    /// Set log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set log level filter
    pub fn with_level<S: Into<String>>(mut self, level: S) -> Self {
        self.level = level.into();
        self
    }

    /// Initialize global logging with this configuration
    ///
    /// `RUST_LOG` takes precedence over the configured level. For file
    /// output the returned guard must be kept alive; dropping it flushes
    /// and stops the writer thread.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the level filter does not parse or a
    /// global subscriber is already installed.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use primdb::logging::LogConfig;
    ///
    /// let _guard = LogConfig::info().init()?;
    /// # Ok::<(), primdb::Error>(())
    /// ```
    pub fn init(self) -> Result<Option<WorkerGuard>> {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|e| Error::InvalidInput(format!("invalid log level: {}", e)))?;

        let (writer, guard) = match &self.output {
            LogOutput::Stdout => (None, None),
            LogOutput::File(path) => {
                let (dir, file_name) = split_log_path(path);
                let file_appender = tracing_appender::rolling::daily(dir, file_name);
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                (Some(non_blocking), Some(guard))
            }
        };

        let registry = tracing_subscriber::registry().with(env_filter);
        let installed = match (writer, self.format) {
            (None, LogFormat::Pretty) => registry.with(fmt::layer().pretty()).try_init(),
            (None, LogFormat::Compact) => registry.with(fmt::layer().compact()).try_init(),
            (Some(writer), LogFormat::Pretty) => registry
                .with(fmt::layer().with_writer(writer).with_ansi(false).pretty())
                .try_init(),
            (Some(writer), LogFormat::Compact) => registry
                .with(fmt::layer().with_writer(writer).with_ansi(false).compact())
                .try_init(),
        };
        installed.map_err(|e| Error::InvalidInput(format!("logging already initialized: {}", e)))?;

        Ok(guard)
    }
}

fn split_log_path(path: &Path) -> (PathBuf, String) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_LOG_FILE)
        .to_string();
    (dir, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.output, LogOutput::Stdout);
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_log_config_builders() {
        let config = LogConfig::debug()
            .with_file("/tmp/primdb-test.log")
            .with_format(LogFormat::Compact);
        assert_eq!(config.level, "debug");
        assert!(matches!(config.output, LogOutput::File(_)));
        assert_eq!(config.format, LogFormat::Compact);

        let config = LogConfig::warn().with_level("primdb_core=trace");
        assert_eq!(config.level, "primdb_core=trace");
    }

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("logs/db.log"));
        assert_eq!(dir, PathBuf::from("logs"));
        assert_eq!(name, "db.log");

        let (dir, name) = split_log_path(Path::new("db.log"));
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "db.log");

        let (_, name) = split_log_path(Path::new("/"));
        assert_eq!(name, DEFAULT_LOG_FILE);
    }
}
