//! Advisory decode statistics
//!
//! A [`DecodeRecorder`] is owned by whoever wants the numbers and updated
//! through explicit calls - never module-level state. It observes decode
//! latency and throughput without affecting decoding in any way.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Records frame decode latency and throughput for one stream.
#[derive(Debug, Clone)]
pub struct DecodeRecorder {
    started: Instant,
    frames: u64,
    empty_polls: u64,
    decode_time: Duration,
}

impl DecodeRecorder {
    /// Start recording now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            frames: 0,
            empty_polls: 0,
            decode_time: Duration::ZERO,
        }
    }

    /// Record one delivered frame and the time spent producing it.
    pub fn record_frame(&mut self, elapsed: Duration) {
        self.frames += 1;
        self.decode_time += elapsed;
    }

    /// Record a poll that found no complete frame.
    pub fn record_empty_poll(&mut self) {
        self.empty_polls += 1;
    }

    /// Frames delivered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Polls that returned without a frame.
    #[must_use]
    pub fn empty_polls(&self) -> u64 {
        self.empty_polls
    }

    /// Mean wall-clock time per delivered frame, if any were delivered.
    #[must_use]
    pub fn mean_frame_time(&self) -> Option<Duration> {
        if self.frames == 0 {
            return None;
        }
        Some(self.decode_time / self.frames as u32)
    }

    /// Frames per second since recording started.
    #[must_use]
    pub fn throughput_hz(&self) -> f64 {
        let elapsed = self.started.elapsed().as_secs_f64();
        if elapsed == 0.0 {
            return 0.0;
        }
        self.frames as f64 / elapsed
    }

    /// Snapshot the current statistics.
    #[must_use]
    pub fn stats(&self) -> DecodeStats {
        DecodeStats {
            frames: self.frames,
            empty_polls: self.empty_polls,
            elapsed_secs: self.started.elapsed().as_secs_f64(),
            throughput_hz: self.throughput_hz(),
            mean_frame_micros: self
                .mean_frame_time()
                .map(|d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX)),
        }
    }
}

impl Default for DecodeRecorder {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable snapshot of a [`DecodeRecorder`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecodeStats {
    /// Frames delivered.
    pub frames: u64,
    /// Polls that returned without a frame.
    pub empty_polls: u64,
    /// Seconds since recording started.
    pub elapsed_secs: f64,
    /// Frames per second since recording started.
    pub throughput_hz: f64,
    /// Mean time per delivered frame in microseconds, if any.
    pub mean_frame_micros: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_mean() {
        let mut recorder = DecodeRecorder::new();
        recorder.record_frame(Duration::from_micros(100));
        recorder.record_frame(Duration::from_micros(300));
        recorder.record_empty_poll();

        assert_eq!(recorder.frames(), 2);
        assert_eq!(recorder.empty_polls(), 1);
        assert_eq!(recorder.mean_frame_time(), Some(Duration::from_micros(200)));
    }

    #[test]
    fn test_no_frames_means_no_mean() {
        let recorder = DecodeRecorder::new();
        assert_eq!(recorder.mean_frame_time(), None);
        assert_eq!(recorder.stats().mean_frame_micros, None);
    }

    #[test]
    fn test_stats_snapshot_matches_counters() {
        let mut recorder = DecodeRecorder::new();
        recorder.record_frame(Duration::from_micros(50));
        let stats = recorder.stats();
        assert_eq!(stats.frames, 1);
        assert_eq!(stats.empty_polls, 0);
        assert_eq!(stats.mean_frame_micros, Some(50));
    }
}
