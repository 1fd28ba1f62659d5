//! Error types for the EXG wire protocol
//!
//! All errors work in `no_std` environments and carry the context needed to
//! diagnose a malformed frame without heap allocation.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::protocol::FRAME_LEN;

/// Errors raised when interpreting raw bytes as a frame.
///
/// These indicate a programming-contract violation at the frame boundary:
/// the synchronizer only hands out marker-aligned, fixed-size byte blocks,
/// so a caller constructing a [`crate::Frame`] from anything else fails
/// loudly rather than being silently padded or truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameError {
    /// Byte slice is not exactly one frame long
    WrongLength {
        /// Number of bytes received
        received: usize,
        /// Number of bytes a frame occupies
        expected: usize,
    },
    /// Frame does not begin with the sync marker
    InvalidSync {
        /// First sync byte received
        got_0: u8,
        /// Second sync byte received
        got_1: u8,
    },
}

impl FrameError {
    /// Construct a `WrongLength` error for a slice of `received` bytes.
    #[must_use]
    pub const fn wrong_length(received: usize) -> Self {
        Self::WrongLength { received, expected: FRAME_LEN }
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { received, expected } => {
                write!(f, "Wrong frame length: got {received} bytes, expected {expected}")
            }
            Self::InvalidSync { got_0, got_1 } => {
                write!(f, "Invalid sync: 0x{got_0:02X} 0x{got_1:02X}")
            }
        }
    }
}

impl core::error::Error for FrameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_length_carries_frame_len() {
        let err = FrameError::wrong_length(5);
        assert_eq!(err, FrameError::WrongLength { received: 5, expected: FRAME_LEN });
    }
}
