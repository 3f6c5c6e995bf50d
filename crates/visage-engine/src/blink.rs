//! Blink State Machine - autonomous eyelid cycle
//!
//! Runs every frame regardless of speaking state or connectivity; its
//! only input is elapsed frame time. A cycle waits a randomly sampled
//! interval, closes and reopens the lids along a half-sine envelope,
//! then resamples the next wait.

use std::f32::consts::PI;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Periodic eyelid closure generator.
///
/// `value` traces 0 -> 1 -> 0 across each blink (closed at the
/// midpoint) and stays 0 between blinks.
#[derive(Debug)]
pub struct BlinkCycle {
    /// Full lid close-and-open length.
    duration: Duration,
    /// Lower bound for the sampled wait, in seconds.
    interval_min: f32,
    /// Upper bound (exclusive) for the sampled wait, in seconds.
    interval_max: f32,
    /// Elapsed seconds since the current cycle began.
    phase_timer: f32,
    /// Wait before the lids start closing, resampled per cycle.
    next_blink_at: f32,
    /// Current closure in [0, 1].
    value: f32,
    rng: StdRng,
}

impl BlinkCycle {
    /// Create a cycle with an entropy-seeded wait sequence.
    pub fn new(duration: Duration, interval_min: f32, interval_max: f32) -> Self {
        Self::from_rng(duration, interval_min, interval_max, StdRng::from_entropy())
    }

    /// Create a cycle with a deterministic wait sequence.
    pub fn with_seed(duration: Duration, interval_min: f32, interval_max: f32, seed: u64) -> Self {
        Self::from_rng(
            duration,
            interval_min,
            interval_max,
            StdRng::seed_from_u64(seed),
        )
    }

    fn from_rng(duration: Duration, interval_min: f32, interval_max: f32, mut rng: StdRng) -> Self {
        let next_blink_at = sample_wait(&mut rng, interval_min, interval_max);
        BlinkCycle {
            duration,
            interval_min,
            interval_max,
            phase_timer: 0.0,
            next_blink_at,
            value: 0.0,
            rng,
        }
    }

    /// Advance by one frame's elapsed time and return the closure value.
    pub fn step(&mut self, delta: Duration) -> f32 {
        self.phase_timer += delta.as_secs_f32();
        let blink_secs = self.duration.as_secs_f32();

        self.value = if self.phase_timer > self.next_blink_at {
            let t = self.phase_timer - self.next_blink_at;
            if t < blink_secs {
                (PI * t / blink_secs).sin()
            } else {
                // Cycle complete: reopen and schedule the next one.
                self.phase_timer = 0.0;
                self.next_blink_at = sample_wait(&mut self.rng, self.interval_min, self.interval_max);
                0.0
            }
        } else {
            0.0
        };

        self.value
    }

    /// Current closure value without advancing.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// The wait the current cycle is (or was) holding for, in seconds.
    pub fn next_blink_at(&self) -> f32 {
        self.next_blink_at
    }
}

fn sample_wait(rng: &mut StdRng, min: f32, max: f32) -> f32 {
    // A degenerate interval collapses to its lower bound instead of
    // panicking inside gen_range.
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}
