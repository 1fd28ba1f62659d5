//! Decoded sample types for the EXG shield
//!
//! These are the values consumers work with after framing and decoding:
//! one [`ExgSample`] per wire frame, carrying the ordered channel readings
//! together with the frame's bookkeeping fields.

use serde::{Deserialize, Serialize};

use crate::protocol::CHANNEL_COUNT;

// ============================================================================
// Switch States
// ============================================================================

/// State of the shield's digital inputs PD2-PD5.
///
/// The trailing frame byte carries the four input lines in its low bits;
/// the upper four bits are unspecified and preserved as received.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct SwitchStates(u8);

impl SwitchStates {
    /// Wrap a raw switch byte as received on the wire.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    /// The raw switch byte, including the unspecified upper bits.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// State of input PD2 (bit 0).
    #[must_use]
    pub const fn pd2(self) -> bool {
        self.0 & 0x01 != 0
    }

    /// State of input PD3 (bit 1).
    #[must_use]
    pub const fn pd3(self) -> bool {
        self.0 & 0x02 != 0
    }

    /// State of input PD4 (bit 2).
    #[must_use]
    pub const fn pd4(self) -> bool {
        self.0 & 0x04 != 0
    }

    /// State of input PD5 (bit 3).
    #[must_use]
    pub const fn pd5(self) -> bool {
        self.0 & 0x08 != 0
    }
}

// ============================================================================
// Decoded Sample
// ============================================================================

/// One decoded frame: ordered channel readings plus bookkeeping fields.
///
/// Channel values are the raw 10-bit ADC quantities (0-1023 from a
/// well-formed sender). No unit conversion, scaling, or inversion is
/// applied; calibration and display transforms are a consumer concern.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExgSample {
    /// Channel readings in payload order, channel 0 first.
    pub channels: [u16; CHANNEL_COUNT],
    /// Sender-side packet counter, wraps modulo 256.
    pub sequence: u8,
    /// Protocol version tag from the frame header.
    pub version: u8,
    /// Digital input states from the trailing frame byte.
    pub switches: SwitchStates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_bits() {
        let switches = SwitchStates::from_byte(0b0000_0101);
        assert!(switches.pd2());
        assert!(!switches.pd3());
        assert!(switches.pd4());
        assert!(!switches.pd5());
    }

    #[test]
    fn test_switch_raw_preserves_upper_bits() {
        let switches = SwitchStates::from_byte(0xF1);
        assert_eq!(switches.raw(), 0xF1);
        assert!(switches.pd2());
    }
}
