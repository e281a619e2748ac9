//! Terminal ordering shell.
//!
//! Wires configuration, structured logging and the order session into a
//! line-oriented shell. Order status changes are pushed to the terminal as
//! the sequencer advances.

pub mod command;
pub mod config;
pub mod reply;
pub mod shell;

use sequencer::{OrderSession, SessionError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

pub use command::{Command, CommandError, ProfileAction};
pub use config::{Config, ConfigError, LogFormat};
pub use reply::{Reply, Toast, ToastVariant};
pub use shell::Shell;

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("tracing subscriber already installed: {0}")]
    Init(#[from] TryInitError),
}

/// Installs the global tracing subscriber. Logs go to stderr so the shell's
/// own output on stdout stays readable.
pub fn init_tracing(config: &Config) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(&config.log_level)?;
    let json = config.log_format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .try_init()?;
    Ok(())
}

/// Builds a shell around a fresh order session.
///
/// Must be called from within a Tokio runtime.
pub fn build_shell(config: &Config) -> Result<Shell, SessionError> {
    let session = OrderSession::new(config.pricing, config.schedule.clone())?;
    Ok(Shell::new(session))
}
