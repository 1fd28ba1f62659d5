//! Background reader decoupling a blocking transport from its consumer
//!
//! A [`NonBlockingReader`] owns one producer thread that drains a
//! [`ByteSource`] byte-by-byte into an unbounded FIFO channel. The
//! consumer side pops with a bounded wait instead of blocking on
//! transport I/O, and the reader itself implements [`ByteSource`], so a
//! [`crate::FrameSynchronizer`] polls the queue exactly as it would poll
//! the transport directly.
//!
//! The channel is deliberately unbounded: frames are 17 bytes at 125 Hz,
//! so a consumer would have to stall for a long time before memory growth
//! matters. A consumer that stops caring simply drops or closes the
//! reader; the producer observes the disconnect at its next delivery and
//! exits - there is no separate cancellation channel.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};

use crate::error::{StreamError, StreamResult};
use crate::source::ByteSource;

/// How long the producer sleeps when the source has nothing for it.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Queue-backed reader fed by a single background producer thread.
///
/// Ordering is strict FIFO: bytes come out in exactly the order the
/// producer read them, which frame alignment depends on. The queue is
/// confined to one producer and one consumer; no other state is shared.
pub struct NonBlockingReader {
    queue: Option<Receiver<u8>>,
}

impl NonBlockingReader {
    /// Take ownership of `source` and start draining it.
    ///
    /// The producer thread runs until the source signals end of stream,
    /// fails, or the consumer side is dropped; it closes the source on the
    /// way out.
    pub fn spawn<S>(mut source: S) -> Self
    where
        S: ByteSource + Send + 'static,
    {
        let (tx, rx) = crossbeam_channel::unbounded();

        thread::spawn(move || {
            loop {
                match source.read_one() {
                    Ok(Some(byte)) => {
                        if tx.send(byte).is_err() {
                            tracing::debug!("consumer gone, reader thread stopping");
                            break;
                        }
                    }
                    Ok(None) => thread::sleep(IDLE_POLL_INTERVAL),
                    Err(StreamError::EndOfStream) => {
                        tracing::debug!("byte source reached end of stream");
                        break;
                    }
                    Err(err) => {
                        tracing::warn!(%err, "byte source failed, ending stream");
                        break;
                    }
                }
            }
            source.close();
        });

        Self { queue: Some(rx) }
    }

    /// Pop one byte, waiting up to `timeout`.
    ///
    /// - `Some(t)` waits at most `t`; `Ok(None)` on expiry, which is a
    ///   retryable "no data yet", distinct from end of stream.
    /// - `Some(Duration::ZERO)` returns immediately.
    /// - `None` waits indefinitely.
    ///
    /// Once the producer has terminated, bytes already queued drain first;
    /// only then does this report end of stream.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::EndOfStream`] after the queue is closed and
    /// drained.
    pub fn read_byte(&mut self, timeout: Option<Duration>) -> StreamResult<Option<u8>> {
        let Some(queue) = &self.queue else {
            return Err(StreamError::EndOfStream);
        };

        match timeout {
            None => queue.recv().map(Some).map_err(|_| StreamError::EndOfStream),
            Some(t) if t.is_zero() => match queue.try_recv() {
                Ok(byte) => Ok(Some(byte)),
                Err(TryRecvError::Empty) => Ok(None),
                Err(TryRecvError::Disconnected) => Err(StreamError::EndOfStream),
            },
            Some(t) => match queue.recv_timeout(t) {
                Ok(byte) => Ok(Some(byte)),
                Err(RecvTimeoutError::Timeout) => Ok(None),
                Err(RecvTimeoutError::Disconnected) => Err(StreamError::EndOfStream),
            },
        }
    }
}

impl ByteSource for NonBlockingReader {
    fn available(&mut self) -> StreamResult<usize> {
        Ok(self.queue.as_ref().map_or(0, Receiver::len))
    }

    fn read_one(&mut self) -> StreamResult<Option<u8>> {
        self.read_byte(Some(Duration::ZERO))
    }

    fn close(&mut self) {
        // Dropping the receiver disconnects the channel; the producer
        // observes the failed send at its next delivery and exits.
        self.queue = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::mock::{ByteArraySource, FrameGenerator, TimedByteArraySource};
    use crate::sync::FrameSynchronizer;

    const WAIT: Option<Duration> = Some(Duration::from_secs(2));

    #[test]
    fn test_drains_exactly_n_bytes_then_end_of_stream() {
        let bytes: Vec<u8> = (0..10).collect();
        let mut reader = NonBlockingReader::spawn(ByteArraySource::new(bytes.clone()));

        for &expected in &bytes {
            assert_eq!(reader.read_byte(WAIT).unwrap(), Some(expected));
        }
        assert!(matches!(reader.read_byte(WAIT), Err(StreamError::EndOfStream)));
    }

    #[test]
    fn test_timeout_expiry_is_not_end_of_stream() {
        // A stalled line: the producer stays alive but never delivers.
        let mut reader =
            NonBlockingReader::spawn(TimedByteArraySource::new(vec![1, 2, 3], 0));

        let result = reader.read_byte(Some(Duration::from_millis(20))).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_zero_timeout_returns_immediately() {
        let mut reader =
            NonBlockingReader::spawn(TimedByteArraySource::new(vec![1, 2, 3], 0));

        assert_eq!(reader.read_byte(Some(Duration::ZERO)).unwrap(), None);
    }

    #[test]
    fn test_fifo_order_preserved() {
        let bytes: Vec<u8> = (0..=255).collect();
        let mut reader = NonBlockingReader::spawn(ByteArraySource::new(bytes.clone()));

        let mut drained = Vec::new();
        while let Ok(Some(byte)) = reader.read_byte(WAIT) {
            drained.push(byte);
        }
        assert_eq!(drained, bytes);
    }

    #[test]
    fn test_synchronizer_composes_with_queue_backed_source() {
        let mut generator = FrameGenerator::random_seeded(3);
        let frames = [generator.next_frame(), generator.next_frame()];

        let mut wire = vec![0xEE, 0x17]; // noise
        for frame in &frames {
            wire.extend_from_slice(frame.as_bytes());
        }

        let mut reader = NonBlockingReader::spawn(ByteArraySource::new(wire));
        let mut sync = FrameSynchronizer::new();

        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        let mut got = Vec::new();
        while got.len() < frames.len() {
            assert!(std::time::Instant::now() < deadline, "frames never arrived");
            match sync.next_frame(&mut reader).unwrap() {
                Some(frame) => got.push(frame),
                None => thread::sleep(Duration::from_millis(1)),
            }
        }
        assert_eq!(got, frames);
    }

    #[test]
    fn test_closed_reader_is_terminal() {
        let mut reader = NonBlockingReader::spawn(ByteArraySource::new(vec![1, 2, 3]));
        ByteSource::close(&mut reader);
        assert_eq!(reader.available().unwrap(), 0);
        assert!(matches!(reader.read_byte(WAIT), Err(StreamError::EndOfStream)));
    }
}
