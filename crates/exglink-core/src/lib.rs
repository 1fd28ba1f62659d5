//! Exglink Core - `no_std` compatible wire protocol for the EXG shield
//!
//! This crate provides the frame layout, payload decoding, and error types
//! for the serial link between an EXG biosignal shield and host software.
//! It is designed to work in `no_std` environments as well as `std`
//! environments, so the same definitions serve firmware-side encoders and
//! host-side decoders.
//!
//! # Modules
//!
//! - [`protocol`]: Wire constants, the [`Frame`] type, and channel decoding
//! - [`types`]: Decoded sample and switch-state types
//! - [`error`]: Protocol error types
//!
//! # Features
//!
//! - `std`: Enable standard library support
//!
//! # Example
//!
//! ```rust
//! use exglink_core::{Frame, CHANNEL_COUNT};
//!
//! let bytes = [
//!     0xA5, 0x5A, 0x02, 0x00,
//!     0x00, 0x00, 0x00, 0x25, 0x00, 0xF7,
//!     0x01, 0x83, 0x01, 0xB0, 0x01, 0xFF,
//!     0x01,
//! ];
//!
//! let frame = Frame::from_bytes(&bytes).unwrap();
//! assert_eq!(frame.channels(), [0, 37, 247, 387, 432, 511]);
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod protocol;
pub mod types;

// Re-export commonly used items at crate root
pub use error::FrameError;
pub use protocol::{
    Frame, CHANNEL_COUNT, DEFAULT_BAUD_RATE, FRAME_LEN, HEADER_LEN, PROTOCOL_VERSION,
    SAMPLE_FREQUENCY_HZ, SYNC_0, SYNC_1,
};
pub use types::{ExgSample, SwitchStates};
