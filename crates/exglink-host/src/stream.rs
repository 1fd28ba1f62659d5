//! Pull-based decoded-sample stream
//!
//! [`ExgStream`] ties a [`ByteSource`], a [`FrameSynchronizer`], and the
//! frame decoder together behind one restartable poll operation. The
//! stream is effectively infinite, bounded only by the lifetime of the
//! byte source; every poll returns either a decoded sample or "nothing
//! yet".

use std::time::Instant;

use exglink_core::{ExgSample, Frame, FRAME_LEN};

use crate::error::{StreamError, StreamResult};
use crate::perf::DecodeRecorder;
use crate::source::ByteSource;
use crate::sync::FrameSynchronizer;

/// Decoded-sample stream over any [`ByteSource`].
pub struct ExgStream<S> {
    source: S,
    synchronizer: FrameSynchronizer,
    last_sequence: Option<u8>,
    sequence_gaps: u64,
    idle_polls: u32,
    idle_limit: Option<u32>,
    recorder: Option<DecodeRecorder>,
}

impl<S: ByteSource> ExgStream<S> {
    /// Wrap a byte source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            synchronizer: FrameSynchronizer::new(),
            last_sequence: None,
            sequence_gaps: 0,
            idle_polls: 0,
            idle_limit: None,
            recorder: None,
        }
    }

    /// Treat `limit` consecutive empty polls as end of stream.
    ///
    /// Off by default: a slow producer is normally just slow. Callers
    /// replaying a finite capture can opt in to get a terminal signal
    /// instead of polling forever.
    #[must_use]
    pub fn with_idle_limit(mut self, limit: u32) -> Self {
        self.idle_limit = Some(limit);
        self
    }

    /// Attach a statistics recorder to this stream.
    #[must_use]
    pub fn with_recorder(mut self, recorder: DecodeRecorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Poll for the next raw frame.
    ///
    /// Returns `Ok(None)` while the source has too little buffered to
    /// complete a frame; the call consumes nothing in that case and is
    /// safe to repeat. Sequence gaps between delivered frames are counted
    /// and logged, never treated as errors - the counter is advisory and
    /// the protocol has no way to recover lost frames anyway.
    ///
    /// # Errors
    ///
    /// Propagates source failures, and reports
    /// [`StreamError::EndOfStream`] once the idle limit (if configured)
    /// is exhausted.
    pub fn next_frame(&mut self) -> StreamResult<Option<Frame>> {
        let poll_started = Instant::now();

        match self.synchronizer.next_frame(&mut self.source)? {
            Some(frame) => {
                self.idle_polls = 0;

                if let Some(last) = self.last_sequence {
                    let expected = last.wrapping_add(1);
                    if frame.sequence() != expected {
                        self.sequence_gaps += 1;
                        tracing::warn!(
                            expected,
                            got = frame.sequence(),
                            "sequence gap: frames lost on the wire"
                        );
                    }
                }
                self.last_sequence = Some(frame.sequence());

                if let Some(recorder) = &mut self.recorder {
                    recorder.record_frame(poll_started.elapsed());
                }
                Ok(Some(frame))
            }
            None => {
                if let Some(recorder) = &mut self.recorder {
                    recorder.record_empty_poll();
                }

                self.idle_polls = self.idle_polls.saturating_add(1);
                if let Some(limit) = self.idle_limit {
                    if self.idle_polls >= limit {
                        tracing::debug!(limit, "idle limit reached, ending stream");
                        return Err(StreamError::EndOfStream);
                    }
                }
                Ok(None)
            }
        }
    }

    /// Poll for the next decoded sample.
    ///
    /// # Errors
    ///
    /// Same conditions as [`next_frame`](Self::next_frame).
    pub fn next_sample(&mut self) -> StreamResult<Option<ExgSample>> {
        Ok(self.next_frame()?.map(|frame| frame.sample()))
    }

    /// Whole frames currently buffered in the source.
    ///
    /// # Errors
    ///
    /// Propagates source failures.
    pub fn frames_in_waiting(&mut self) -> StreamResult<usize> {
        Ok(self.source.available()? / FRAME_LEN)
    }

    /// Sequence gaps observed between delivered frames.
    #[must_use]
    pub fn sequence_gaps(&self) -> u64 {
        self.sequence_gaps
    }

    /// The attached statistics recorder, if any.
    #[must_use]
    pub fn recorder(&self) -> Option<&DecodeRecorder> {
        self.recorder.as_ref()
    }

    /// Close the underlying byte source.
    pub fn close(&mut self) {
        self.source.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::mock::{ByteArraySource, FrameGenerator};

    fn wire_with_frames(generator: &mut FrameGenerator, count: usize) -> (Vec<u8>, Vec<Frame>) {
        let mut wire = vec![0xDE, 0xAD]; // noise
        let mut frames = Vec::new();
        for _ in 0..count {
            let frame = generator.next_frame();
            wire.extend_from_slice(frame.as_bytes());
            frames.push(frame);
        }
        (wire, frames)
    }

    #[test]
    fn test_stream_decodes_generated_frames() {
        let mut generator = FrameGenerator::random_seeded(11);
        let (wire, frames) = wire_with_frames(&mut generator, 3);

        let mut stream = ExgStream::new(ByteArraySource::new(wire));
        for frame in &frames {
            let sample = stream.next_sample().unwrap().expect("frame buffered");
            assert_eq!(sample, frame.sample());
        }
        assert!(stream.next_sample().unwrap().is_none());
    }

    #[test]
    fn test_sequence_gap_is_counted_not_fatal() {
        let mut generator = FrameGenerator::random_seeded(5);
        let first = generator.next_frame();
        let _dropped = generator.next_frame();
        let third = generator.next_frame();

        let mut wire = Vec::new();
        wire.extend_from_slice(first.as_bytes());
        wire.extend_from_slice(third.as_bytes());

        let mut stream = ExgStream::new(ByteArraySource::new(wire));
        assert_eq!(stream.next_frame().unwrap(), Some(first));
        assert_eq!(stream.next_frame().unwrap(), Some(third));
        assert_eq!(stream.sequence_gaps(), 1);
    }

    #[test]
    fn test_idle_limit_ends_stream() {
        // Too few bytes for a frame: every poll is empty.
        let source = ByteArraySource::new(vec![0x00; 3]);
        let mut stream = ExgStream::new(source).with_idle_limit(5);

        for _ in 0..4 {
            assert!(stream.next_frame().unwrap().is_none());
        }
        assert!(matches!(stream.next_frame(), Err(StreamError::EndOfStream)));
    }

    #[test]
    fn test_frames_in_waiting() {
        let mut generator = FrameGenerator::new();
        let mut wire = Vec::new();
        wire.extend_from_slice(generator.next_frame().as_bytes());
        wire.extend_from_slice(generator.next_frame().as_bytes());
        wire.extend_from_slice(&[0xAA; 6]); // partial third frame

        let mut stream = ExgStream::new(ByteArraySource::new(wire));
        assert_eq!(stream.frames_in_waiting().unwrap(), 2);
    }

    #[test]
    fn test_recorder_sees_frames_and_empty_polls() {
        let mut generator = FrameGenerator::random_seeded(9);
        let (wire, frames) = wire_with_frames(&mut generator, 2);

        let mut stream =
            ExgStream::new(ByteArraySource::new(wire)).with_recorder(DecodeRecorder::new());

        for _ in &frames {
            stream.next_frame().unwrap().expect("frame buffered");
        }
        stream.next_frame().unwrap();
        stream.next_frame().unwrap();

        let recorder = stream.recorder().unwrap();
        assert_eq!(recorder.frames(), 2);
        assert_eq!(recorder.empty_polls(), 2);
    }
}
