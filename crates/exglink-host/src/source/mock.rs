//! Deterministic byte sources and frame generation for tests and demos
//!
//! These doubles stand in for shield hardware: [`ByteArraySource`] replays
//! a recorded byte stream, [`TimedByteArraySource`] replays one at a
//! configured line rate, and [`FrameGenerator`] fabricates well-formed wire
//! frames with a wrapping sequence counter.

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use exglink_core::{Frame, CHANNEL_COUNT, FRAME_LEN, HEADER_LEN, PROTOCOL_VERSION, SYNC_0, SYNC_1};

use crate::error::{StreamError, StreamResult};
use crate::source::ByteSource;

// ============================================================================
// Byte Array Source
// ============================================================================

/// A [`ByteSource`] replaying an in-memory byte stream.
///
/// All bytes are available immediately. Once the buffer is drained,
/// reads signal end of stream; [`feed`](Self::feed) can append further
/// bytes to model data arriving between polls.
#[derive(Debug, Clone)]
pub struct ByteArraySource {
    buffer: Vec<u8>,
    pos: usize,
    closed: bool,
}

impl ByteArraySource {
    /// Create a source over the given bytes.
    #[must_use]
    pub fn new(buffer: impl Into<Vec<u8>>) -> Self {
        Self { buffer: buffer.into(), pos: 0, closed: false }
    }

    /// Append bytes to the stream, as if more data arrived on the wire.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }
}

impl ByteSource for ByteArraySource {
    fn available(&mut self) -> StreamResult<usize> {
        if self.closed {
            return Ok(0);
        }
        Ok(self.buffer.len() - self.pos)
    }

    fn read_one(&mut self) -> StreamResult<Option<u8>> {
        if self.closed {
            return Ok(None);
        }
        if self.pos == self.buffer.len() {
            return Err(StreamError::EndOfStream);
        }
        let byte = self.buffer[self.pos];
        self.pos += 1;
        Ok(Some(byte))
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

// ============================================================================
// Timed Byte Array Source
// ============================================================================

/// A [`ByteSource`] replaying an in-memory byte stream at a line rate.
///
/// Bytes become available as wall-clock time passes, modelling a serial
/// line that delivers at a fixed baud rate. A rate of zero models a
/// stalled line: nothing ever becomes available.
#[derive(Debug)]
pub struct TimedByteArraySource {
    buffer: Vec<u8>,
    pos: usize,
    started: Instant,
    bytes_per_second: u32,
    closed: bool,
}

impl TimedByteArraySource {
    /// Create a source releasing `bytes_per_second` bytes per second.
    #[must_use]
    pub fn new(buffer: impl Into<Vec<u8>>, bytes_per_second: u32) -> Self {
        Self {
            buffer: buffer.into(),
            pos: 0,
            started: Instant::now(),
            bytes_per_second,
            closed: false,
        }
    }

    /// Create a source paced like a serial line at `baud` (8N1: ten line
    /// bits per data byte).
    #[must_use]
    pub fn from_baud(buffer: impl Into<Vec<u8>>, baud: u32) -> Self {
        Self::new(buffer, baud / 10)
    }

    fn released(&self) -> usize {
        let elapsed = self.started.elapsed().as_secs_f64();
        let released = elapsed * f64::from(self.bytes_per_second);
        (released as usize).min(self.buffer.len())
    }
}

impl ByteSource for TimedByteArraySource {
    fn available(&mut self) -> StreamResult<usize> {
        if self.closed {
            return Ok(0);
        }
        Ok(self.released() - self.pos)
    }

    fn read_one(&mut self) -> StreamResult<Option<u8>> {
        if self.closed {
            return Ok(None);
        }
        if self.pos == self.buffer.len() {
            return Err(StreamError::EndOfStream);
        }
        if self.pos < self.released() {
            let byte = self.buffer[self.pos];
            self.pos += 1;
            return Ok(Some(byte));
        }
        Ok(None)
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

// ============================================================================
// Frame Generator
// ============================================================================

enum PayloadKind {
    Waveform,
    Random(SmallRng),
}

/// Generates well-formed wire frames with fake channel data.
///
/// The default payload is a deterministic per-channel sawtooth, which
/// keeps tests reproducible; [`random`](Self::random) produces 10-bit
/// random payloads like real noise-floor captures.
pub struct FrameGenerator {
    sequence: u8,
    tick: u64,
    payload: PayloadKind,
}

impl FrameGenerator {
    /// Generator with deterministic sawtooth channel data.
    #[must_use]
    pub fn new() -> Self {
        Self { sequence: 0, tick: 0, payload: PayloadKind::Waveform }
    }

    /// Generator with random channel data.
    #[must_use]
    pub fn random() -> Self {
        Self::random_seeded(rand::random())
    }

    /// Generator with random channel data from a fixed seed.
    #[must_use]
    pub fn random_seeded(seed: u64) -> Self {
        Self {
            sequence: 0,
            tick: 0,
            payload: PayloadKind::Random(SmallRng::seed_from_u64(seed)),
        }
    }

    fn channel_value(&mut self, channel: usize) -> u16 {
        match &mut self.payload {
            PayloadKind::Waveform => {
                ((self.tick * 8 + channel as u64 * 170) % 1024) as u16
            }
            PayloadKind::Random(rng) => rng.random_range(0..=1023),
        }
    }

    /// Produce the next frame, advancing the sequence counter.
    pub fn next_frame(&mut self) -> Frame {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = SYNC_0;
        bytes[1] = SYNC_1;
        bytes[2] = PROTOCOL_VERSION;
        bytes[3] = self.sequence;

        for channel in 0..CHANNEL_COUNT {
            let value = self.channel_value(channel);
            bytes[HEADER_LEN + channel * 2] = (value >> 8) as u8;
            bytes[HEADER_LEN + channel * 2 + 1] = value as u8;
        }

        bytes[FRAME_LEN - 1] = 0x01;

        self.sequence = self.sequence.wrapping_add(1);
        self.tick += 1;

        Frame::from_bytes(&bytes).expect("generator emits marker-aligned frames")
    }
}

impl Default for FrameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameGenerator {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        Some(self.next_frame())
    }
}

// ============================================================================
// Tests
// ============================================================================
