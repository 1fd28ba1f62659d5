//! Byte-source capability and its implementations
//!
//! Anything the framing layer reads from implements [`ByteSource`]:
//! a real serial transport ([`serial::SerialSource`], behind the `serial`
//! feature), the queue side of a [`crate::NonBlockingReader`], or the
//! deterministic doubles in [`mock`]. The synchronizer only ever sees this
//! contract, which is what makes hardware-free testing possible.

pub mod mock;

#[cfg(feature = "serial")]
pub mod serial;

use crate::error::StreamResult;

/// Capability required of any transport the framing layer reads from.
///
/// Implementations must uphold three properties:
///
/// - [`available`](Self::available) is non-blocking, safe to call
///   arbitrarily often, and calling it repeatedly without an intervening
///   read never changes reader state.
/// - [`read_one`](Self::read_one) never blocks indefinitely unless the
///   implementation explicitly documents itself as blocking.
/// - [`close`](Self::close) is idempotent. After close, `available`
///   reports 0 and `read_one` either returns `Ok(None)` forever or
///   signals [`StreamError::EndOfStream`](crate::StreamError::EndOfStream);
///   consumers treat both as terminal.
pub trait ByteSource {
    /// Number of bytes that can currently be read without waiting.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the underlying source failed.
    fn available(&mut self) -> StreamResult<usize>;

    /// Read exactly one byte, or `Ok(None)` if none is ready.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::EndOfStream`](crate::StreamError::EndOfStream)
    /// once the source is exhausted or closed, or a transport error if the
    /// underlying source failed.
    fn read_one(&mut self) -> StreamResult<Option<u8>>;

    /// Release the source. Idempotent.
    fn close(&mut self);
}
