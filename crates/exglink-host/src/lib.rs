//! Exglink Host - framing and byte-source plumbing for the EXG shield
//!
//! This crate turns a continuous serial byte stream from an EXG biosignal
//! shield into discrete decoded samples, recovering frame alignment
//! whenever line noise or dropped bytes disturb it:
//!
//! - [`source`]: the [`ByteSource`] capability and its implementations
//!   (serial adapter behind the `serial` feature, deterministic mocks)
//! - [`sync`]: marker-based frame synchronization and recovery
//! - [`reader`]: background reader decoupling a blocking transport from a
//!   bounded-wait consumer
//! - [`stream`]: pull-based decoded-sample stream
//! - [`perf`]: advisory decode statistics
//!
//! # Execution shapes
//!
//! Two shapes are supported. Either the caller polls
//! [`FrameSynchronizer::next_frame`] (or [`ExgStream::next_sample`])
//! directly against the transport, sleeping between `Ok(None)` results as
//! it sees fit; or a [`NonBlockingReader`] drains the transport on a
//! background thread and the same synchronizer polls its byte queue - the
//! framing logic never knows the difference.
//!
//! # Example
//!
//! ```rust
//! use exglink_host::mock::{ByteArraySource, FrameGenerator};
//! use exglink_host::ExgStream;
//!
//! let mut generator = FrameGenerator::new();
//! let mut wire = vec![0x13, 0x37]; // line noise before the first frame
//! for _ in 0..3 {
//!     wire.extend_from_slice(generator.next_frame().as_bytes());
//! }
//!
//! let mut stream = ExgStream::new(ByteArraySource::new(wire));
//! let sample = stream.next_sample().unwrap().expect("frame buffered");
//! assert_eq!(sample.sequence, 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod perf;
pub mod reader;
pub mod source;
pub mod stream;
pub mod sync;

// Re-export key types
pub use error::{StreamError, StreamResult};
pub use perf::{DecodeRecorder, DecodeStats};
pub use reader::NonBlockingReader;
pub use source::mock;
pub use source::ByteSource;
pub use stream::ExgStream;
pub use sync::FrameSynchronizer;

#[cfg(feature = "serial")]
pub use source::serial::SerialSource;

// Re-export the protocol layer so consumers need only one dependency
pub use exglink_core::{
    ExgSample, Frame, FrameError, SwitchStates, CHANNEL_COUNT, DEFAULT_BAUD_RATE, FRAME_LEN,
    PROTOCOL_VERSION, SAMPLE_FREQUENCY_HZ,
};
