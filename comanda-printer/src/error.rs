//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Host has no serial capability
    #[error("Serial devices unavailable: {0}")]
    Unavailable(String),

    /// No device was selected (declined, or none present)
    #[error("No serial device selected")]
    SelectionDeclined,

    /// Opening the port or acquiring its writer failed
    #[error("Failed to open {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: std::io::Error,
    },

    /// Write to an open port failed
    #[error("Write failed: {0}")]
    Write(#[source] std::io::Error),

    /// Operation requires an open connection
    #[error("Printer not connected")]
    NotConnected,

    /// IO error outside of a port write (e.g. background task lost)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
