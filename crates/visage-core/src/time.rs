//! Time primitives for the visage engine
//!
//! Everything in the engine runs on one monotonic frame timeline:
//! alignment hints are anchored to it on arrival, the scheduler expires
//! against it, and the blender derives oscillator phase from it.

use std::ops::{Add, Sub};
use std::time::{Duration, Instant};

/// A point on the frame timeline, in microseconds since session start.
/// Monotonic and local-driven; never subject to wall-clock adjustment.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FrameTime(pub u64);

impl FrameTime {
    pub const ZERO: FrameTime = FrameTime(0);

    #[inline]
    pub fn from_micros(micros: u64) -> Self {
        FrameTime(micros)
    }

    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        FrameTime(millis * 1000)
    }

    #[inline]
    pub fn from_secs_f64(secs: f64) -> Self {
        FrameTime((secs * 1_000_000.0) as u64)
    }

    #[inline]
    pub fn as_micros(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0 / 1000
    }

    /// Fractional milliseconds, for phase math that must not quantize
    /// to whole frames.
    #[inline]
    pub fn as_millis_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        FrameTime(self.0.saturating_add(duration.as_micros() as u64))
    }
}

impl Add<Duration> for FrameTime {
    type Output = FrameTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        FrameTime(self.0 + rhs.as_micros() as u64)
    }
}

impl Sub<FrameTime> for FrameTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: FrameTime) -> Self::Output {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

impl std::fmt::Debug for FrameTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ft({:.3}ms)", self.as_millis_f64())
    }
}

/// Anchors the frame timeline to the OS monotonic clock.
///
/// The engine itself never samples a clock; whatever drives it (render
/// loop, session callback thread, test harness) stamps times with one of
/// these. Cloneable so a producer thread can stamp arrivals while the
/// frame loop stamps steps against the same epoch.
#[derive(Clone)]
pub struct FrameClock {
    epoch: Instant,
}

impl FrameClock {
    /// Create a clock whose timeline starts now.
    pub fn new() -> Self {
        FrameClock {
            epoch: Instant::now(),
        }
    }

    /// Current position on the frame timeline.
    pub fn now(&self) -> FrameTime {
        FrameTime::from_micros(self.epoch.elapsed().as_micros() as u64)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
