//! Tracing setup: console plus an append-only log file.
//!
//! The subscriber is built as an explicit [`Dispatch`] handle. `main` installs
//! it once for the whole process; tests scope it with
//! [`tracing::dispatcher::with_default`].
//!
//! Span fields are formatted once per field formatter type and cached on the
//! span. The file layer uses its own [`FileFields`] type so the colored span
//! fields rendered for the console never end up in the log file.

use std::fmt;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::Dispatch;
use tracing_subscriber::field::RecordFields;
use tracing_subscriber::fmt::FormatFields;
use tracing_subscriber::fmt::format::{DefaultFields, Writer};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled(#[from] tracing::dispatcher::SetGlobalDefaultError),
}

/// Plain field formatting for the log file.
#[derive(Debug, Default)]
struct FileFields(DefaultFields);

impl<'writer> FormatFields<'writer> for FileFields {
    fn format_fields<R: RecordFields>(&self, writer: Writer<'writer>, fields: R) -> fmt::Result {
        self.0.format_fields(writer, fields)
    }
}

/// `RUST_LOG` if set and valid, otherwise `info`.
pub fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Build a dispatch that writes to stderr and appends to `log_file`.
pub fn build_dispatch(log_file: &Path, filter: EnvFilter) -> Result<Dispatch, LoggingError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|source| LoggingError::LogFile {
            path: log_file.to_path_buf(),
            source,
        })?;

    let console = tfmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(UtcTime::rfc_3339())
        .with_writer(io::stderr);
    let file = tfmt::layer()
        .fmt_fields(FileFields::default())
        .with_ansi(false)
        .with_target(true)
        .with_timer(UtcTime::rfc_3339())
        .with_writer(Arc::new(file));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file);
    Ok(Dispatch::new(subscriber))
}

/// Install `dispatch` as the process-wide subscriber. Call once.
pub fn install(dispatch: Dispatch) -> Result<(), LoggingError> {
    tracing::dispatcher::set_global_default(dispatch)?;
    Ok(())
}
