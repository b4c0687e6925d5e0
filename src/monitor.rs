//! Frame-rate sampling.
//!
//! The host calls into the arena once per rendered frame. [`FrameSampler`]
//! counts those calls and turns them into a frames-per-second value once per
//! sampling window. [`MonitorHandle`] is the owner's way to end the loop.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use instant::{Duration, Instant};

pub const SAMPLE_WINDOW: Duration = Duration::from_millis(1000);

#[derive(Debug)]
pub struct FrameSampler {
    frame_count: u32,
    last_time: Instant,
    window: Duration,
}

impl FrameSampler {
    pub fn new(start: Instant) -> Self {
        Self::with_window(start, SAMPLE_WINDOW)
    }

    pub fn with_window(start: Instant, window: Duration) -> Self {
        Self {
            frame_count: 0,
            last_time: start,
            window,
        }
    }

    /// Count one frame at `now`. Yields the rounded fps when a window closed.
    pub fn record(&mut self, now: Instant) -> Option<u32> {
        self.frame_count += 1;
        let elapsed = if now > self.last_time {
            now.duration_since(self.last_time)
        } else {
            Duration::ZERO
        };
        if elapsed < self.window {
            return None;
        }
        let fps = (self.frame_count as f64 / elapsed.as_secs_f64()).round() as u32;
        self.frame_count = 0;
        self.last_time = now;
        Some(fps)
    }
}

/// Stops a running performance monitor. Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct MonitorHandle {
    stopped: Arc<AtomicBool>,
}

impl MonitorHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// What the host scheduler should do after a frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule the callback again for the next frame.
    Continue,
    /// The monitor is not running; do not reschedule.
    Stopped,
}
