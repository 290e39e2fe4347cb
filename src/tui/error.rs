use crate::config::ConfigError;
use crate::storage::StorageError;
use crate::transport::TransportError;

/// Errors that can occur in the TUI layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, runtime start-up).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The draft store could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}
