//! Error types for host-side streaming.

use thiserror::Error;

use exglink_core::FrameError;

/// Errors that can occur while reading and framing the byte stream.
///
/// "Not ready" is deliberately absent: insufficient buffered data is the
/// ordinary idle state of a polled stream and is reported as `Ok(None)`
/// by read operations, never as an error.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The byte source has been closed or exhausted while bytes were
    /// expected. Terminal for that source; never retried internally.
    #[error("byte source reached end of stream")]
    EndOfStream,

    /// A byte block violated the frame contract.
    #[error("malformed frame: {0}")]
    Frame(#[from] FrameError),

    /// Transport-level I/O failure.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serial port failure.
    #[cfg(feature = "serial")]
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

/// Result type for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;
