//! Marker-based frame synchronization
//!
//! The wire offers no length delimiting or escaping, so alignment is
//! recovered by scanning byte-wise for the two-byte sync marker - at every
//! offset, including immediately after a successfully delivered frame, so
//! a one-byte drift mid-stream self-heals on the next marker.

use exglink_core::{Frame, FRAME_LEN, SYNC_0, SYNC_1};

use crate::error::{StreamError, StreamResult};
use crate::source::ByteSource;

/// Scans an unbounded byte stream for the sync marker and assembles one
/// frame at a time.
///
/// The synchronizer is a persistent state machine: it keeps only the two
/// most recently seen bytes between calls, so a scan interrupted by an
/// empty source resumes exactly where it left off instead of restarting.
/// Each call is a single poll - it never sleeps or busy-waits; composing
/// with a [`crate::NonBlockingReader`] adds bounded-wait semantics when
/// those are wanted.
#[derive(Debug, Default)]
pub struct FrameSynchronizer {
    prev: Option<u8>,
    curr: Option<u8>,
}

impl FrameSynchronizer {
    /// Create a synchronizer with no lookback state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to assemble the next frame from `source`.
    ///
    /// Returns `Ok(None)` when fewer than `FRAME_LEN - 1` bytes are
    /// available - enough must be buffered to finish the marker scan and
    /// the frame body in one pass, so no bytes are consumed and the same
    /// bytes are re-offered on the next call. While scanning, the guard is
    /// re-checked before every byte so a slow producer only ever costs the
    /// noise bytes already ruled out.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::EndOfStream`] if the source reports enough
    /// available bytes but then fails to produce one; a transport that
    /// lies about availability is treated as fatally disconnected, not
    /// retried.
    pub fn next_frame<S: ByteSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> StreamResult<Option<Frame>> {
        while self.prev != Some(SYNC_0) || self.curr != Some(SYNC_1) {
            // Reserve the marker's second byte plus the frame body before
            // committing to any read.
            if source.available()? < FRAME_LEN - 1 {
                return Ok(None);
            }
            self.prev = self.curr;
            self.curr = Some(source.read_one()?.ok_or(StreamError::EndOfStream)?);
        }

        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = SYNC_0;
        bytes[1] = SYNC_1;
        for slot in bytes.iter_mut().skip(2) {
            *slot = source.read_one()?.ok_or(StreamError::EndOfStream)?;
        }

        // Next call scans fresh, so a marker directly after this frame is
        // found again even if the stream drifted by a byte in between.
        self.prev = None;
        self.curr = None;

        Ok(Some(Frame::from_bytes(&bytes)?))
    }
}
