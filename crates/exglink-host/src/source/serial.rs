//! Serial transport adapter
//!
//! Wraps an already-open [`serialport::SerialPort`] as a [`ByteSource`].
//! Port discovery, opening, and baud configuration stay with the caller;
//! this adapter only exposes the read/inspect contract. The port should be
//! opened with a finite read timeout so `read_one` honors the non-blocking
//! contract - timeouts surface as `Ok(None)`, not errors.

use std::io::Read;

use crate::error::{StreamError, StreamResult};
use crate::source::ByteSource;

/// [`ByteSource`] over an open serial port.
///
/// ```rust,ignore
/// let port = serialport::new("/dev/ttyACM0", DEFAULT_BAUD_RATE)
///     .timeout(Duration::from_millis(100))
///     .open()?;
/// let source = SerialSource::new(port);
/// ```
pub struct SerialSource {
    port: Option<Box<dyn serialport::SerialPort>>,
}

impl SerialSource {
    /// Adapt an already-open serial port.
    #[must_use]
    pub fn new(port: Box<dyn serialport::SerialPort>) -> Self {
        Self { port: Some(port) }
    }
}

impl ByteSource for SerialSource {
    fn available(&mut self) -> StreamResult<usize> {
        match &self.port {
            Some(port) => Ok(port.bytes_to_read()? as usize),
            None => Ok(0),
        }
    }

    fn read_one(&mut self) -> StreamResult<Option<u8>> {
        let Some(port) = &mut self.port else {
            return Err(StreamError::EndOfStream);
        };

        let mut byte = [0u8; 1];
        match port.read(&mut byte) {
            Ok(n) if n > 0 => Ok(Some(byte[0])),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn close(&mut self) {
        if self.port.take().is_some() {
            tracing::debug!("serial source closed");
        }
    }
}
