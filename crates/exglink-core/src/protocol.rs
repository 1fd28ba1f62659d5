//! Wire protocol for the EXG shield serial link
//!
//! The shield transmits fixed-size binary packets over a plain serial line
//! with no length delimiting or escaping; the only reliable anchor in the
//! byte stream is a two-byte sync marker at the start of every frame.
//!
//! Frame layout (17 bytes for the 6-channel configuration):
//!
//! | Offset | Size | Field           | Encoding                               |
//! |--------|------|-----------------|----------------------------------------|
//! | 0      | 1    | sync0           | constant `0xA5`                        |
//! | 1      | 1    | sync1           | constant `0x5A`                        |
//! | 2      | 1    | version         | protocol version, currently 2          |
//! | 3      | 1    | sequence        | wraps modulo 256                       |
//! | 4..16  | 12   | channel payload | 6 x big-endian u16, low 10 bits used   |
//! | 16     | 1    | switches        | digital inputs PD2-PD5 in bits 0-3     |
//!
//! The protocol carries no checksum, so a marker pattern that happens to
//! appear inside a payload is indistinguishable from a real frame boundary.
//! Resynchronization is therefore positional only.

use serde::{Deserialize, Serialize};

use crate::error::FrameError;
use crate::types::{ExgSample, SwitchStates};

// ============================================================================
// Wire Constants
// ============================================================================

/// Number of analog channels per frame.
pub const CHANNEL_COUNT: usize = 6;

/// Header length in bytes: sync marker, version, sequence counter.
pub const HEADER_LEN: usize = 4;

/// Total frame length in bytes, derived from the channel count.
pub const FRAME_LEN: usize = CHANNEL_COUNT * 2 + HEADER_LEN + 1;

/// First sync marker byte.
pub const SYNC_0: u8 = 0xA5;

/// Second sync marker byte.
pub const SYNC_1: u8 = 0x5A;

/// Protocol version emitted by current shield firmware.
pub const PROTOCOL_VERSION: u8 = 2;

/// ADC sampling rate of the shield in Hz.
pub const SAMPLE_FREQUENCY_HZ: u16 = 125;

/// Baud rate the shield transmits at by default.
pub const DEFAULT_BAUD_RATE: u32 = 57600;

// ============================================================================
// Frame
// ============================================================================

/// One marker-aligned wire frame, held as its raw bytes.
///
/// A `Frame` can only be constructed from a byte block that is exactly
/// [`FRAME_LEN`] bytes long and begins with the sync marker, so every
/// accessor below operates on validated data and is infallible.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    bytes: [u8; FRAME_LEN],
}

impl Frame {
    /// Frame length in bytes.
    pub const LEN: usize = FRAME_LEN;

    /// Interpret a byte slice as a frame.
    ///
    /// The slice must be exactly [`FRAME_LEN`] bytes and begin with the
    /// sync marker.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::WrongLength`] for any other slice length and
    /// [`FrameError::InvalidSync`] if the marker bytes are wrong.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() != FRAME_LEN {
            return Err(FrameError::wrong_length(bytes.len()));
        }

        if bytes[0] != SYNC_0 || bytes[1] != SYNC_1 {
            return Err(FrameError::InvalidSync { got_0: bytes[0], got_1: bytes[1] });
        }

        let mut raw = [0u8; FRAME_LEN];
        raw.copy_from_slice(bytes);
        Ok(Self { bytes: raw })
    }

    /// Raw frame bytes, sync marker included at positions 0-1.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    /// Protocol version tag. Exposed for consumers; the decoder never
    /// branches on it.
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.bytes[2]
    }

    /// Sender-side packet counter, wrapping modulo 256. Useful for loss
    /// detection by consumers; not enforced here.
    #[must_use]
    pub const fn sequence(&self) -> u8 {
        self.bytes[3]
    }

    /// The channel payload view: [`CHANNEL_COUNT`] big-endian 16-bit
    /// fields, marker and header excluded.
    #[must_use]
    pub fn channel_payload(&self) -> &[u8] {
        &self.bytes[HEADER_LEN..HEADER_LEN + CHANNEL_COUNT * 2]
    }

    /// State of the shield's digital inputs. Exposed, not validated.
    #[must_use]
    pub const fn switches(&self) -> SwitchStates {
        SwitchStates::from_byte(self.bytes[FRAME_LEN - 1])
    }

    /// Decode the channel payload into ordered sample values.
    ///
    /// For each consecutive big-endian byte pair the value is
    /// `(high << 8) | low`, channel 0 first. No bounds adjustment and no
    /// calibration is applied; a well-formed sender keeps each value within
    /// the 10-bit ADC range 0-1023.
    #[must_use]
    pub fn channels(&self) -> [u16; CHANNEL_COUNT] {
        let payload = self.channel_payload();
        let mut values = [0u16; CHANNEL_COUNT];

        for (channel, value) in values.iter_mut().enumerate() {
            let high = payload[channel * 2];
            let low = payload[channel * 2 + 1];
            *value = (u16::from(high) << 8) | u16::from(low);
        }

        values
    }

    /// Decode the whole frame into an [`ExgSample`].
    #[must_use]
    pub fn sample(&self) -> ExgSample {
        ExgSample {
            channels: self.channels(),
            sequence: self.sequence(),
            version: self.version(),
            switches: self.switches(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with_payload(payload: [u8; CHANNEL_COUNT * 2]) -> Frame {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = SYNC_0;
        bytes[1] = SYNC_1;
        bytes[2] = PROTOCOL_VERSION;
        bytes[3] = 0x2A;
        bytes[HEADER_LEN..HEADER_LEN + CHANNEL_COUNT * 2].copy_from_slice(&payload);
        bytes[FRAME_LEN - 1] = 0x01;
        Frame::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn test_frame_len_is_derived() {
        assert_eq!(FRAME_LEN, 17);
        assert_eq!(FRAME_LEN, CHANNEL_COUNT * 2 + HEADER_LEN + 1);
    }

    #[test]
    fn test_decode_low_range_vector() {
        let frame = frame_with_payload([
            0x00, 0x00, 0x00, 0x25, 0x00, 0xF7, 0x01, 0x83, 0x01, 0xB0, 0x01, 0xFF,
        ]);
        assert_eq!(frame.channels(), [0, 37, 247, 387, 432, 511]);
    }

    #[test]
    fn test_decode_high_range_vector() {
        let frame = frame_with_payload([
            0x02, 0x00, 0x02, 0xA6, 0x02, 0xEE, 0x03, 0x40, 0x03, 0x84, 0x03, 0xFF,
        ]);
        assert_eq!(frame.channels(), [512, 678, 750, 832, 900, 1023]);
    }

    #[test]
    fn test_decode_is_pure() {
        let frame = frame_with_payload([
            0x01, 0x23, 0x00, 0x45, 0x02, 0x67, 0x03, 0x89, 0x00, 0xAB, 0x01, 0xCD,
        ]);
        assert_eq!(frame.channels(), frame.channels());
    }

    #[test]
    fn test_header_accessors() {
        let frame = frame_with_payload([0u8; CHANNEL_COUNT * 2]);
        assert_eq!(frame.version(), PROTOCOL_VERSION);
        assert_eq!(frame.sequence(), 0x2A);
        assert_eq!(frame.switches().raw(), 0x01);
        assert_eq!(frame.channel_payload().len(), CHANNEL_COUNT * 2);
    }

    #[test]
    fn test_from_bytes_rejects_wrong_length() {
        let short = [SYNC_0, SYNC_1, PROTOCOL_VERSION, 0x00];
        let result = Frame::from_bytes(&short);
        assert_eq!(result, Err(FrameError::WrongLength { received: 4, expected: FRAME_LEN }));
    }

    #[test]
    fn test_from_bytes_rejects_bad_sync() {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = 0xFF;
        bytes[1] = SYNC_1;
        let result = Frame::from_bytes(&bytes);
        assert_eq!(result, Err(FrameError::InvalidSync { got_0: 0xFF, got_1: SYNC_1 }));
    }

    #[test]
    fn test_round_trip_preserves_raw_bytes() {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = SYNC_0;
        bytes[1] = SYNC_1;
        for (i, b) in bytes.iter_mut().enumerate().skip(2) {
            *b = i as u8;
        }
        let frame = Frame::from_bytes(&bytes).unwrap();
        assert_eq!(frame.as_bytes(), &bytes);
    }
}
