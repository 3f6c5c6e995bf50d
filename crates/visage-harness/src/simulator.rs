//! Frame-loop simulator - scripted session playback against a real engine
//!
//! Simulates:
//! - A render loop with steady or jittery frame pacing
//! - Session traffic arriving at scripted points on the timeline
//! - Multi-second animation runs sampled frame by frame

use std::collections::VecDeque;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use visage_core::{channel, FrameTime, SessionEvent, SpeakingMode};
use visage_engine::{AvatarEngine, EngineConfig};

/// Nominal 60 fps frame interval.
pub const FRAME_INTERVAL_60HZ: Duration = Duration::from_micros(16_667);

/// Frame pacing model for the simulated render loop.
///
/// Real loops never tick at exactly the nominal rate; the uneven preset
/// reproduces the multi-millisecond wobble of a browser or game loop
/// under load.
pub struct FramePacing {
    /// Nominal frame interval.
    pub base: Duration,
    /// Random deviation per frame (microseconds).
    pub jitter_us: u32,
    rng: StdRng,
}

impl FramePacing {
    pub fn new(base: Duration, jitter_us: u32, seed: u64) -> Self {
        FramePacing {
            base,
            jitter_us,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Perfectly regular pacing.
    pub fn steady(base: Duration) -> Self {
        Self::new(base, 0, 0)
    }

    /// Pacing with heavy per-frame wobble.
    pub fn uneven(base: Duration, seed: u64) -> Self {
        Self::new(base, 4_000, seed)
    }

    /// Produce the next frame interval.
    pub fn next_interval(&mut self) -> Duration {
        let jitter = if self.jitter_us > 0 {
            self.rng
                .gen_range(-(self.jitter_us as i64)..=self.jitter_us as i64)
        } else {
            0
        };
        // Floor at 1us so a degenerate model cannot stall the run loop.
        let micros = (self.base.as_micros() as i64 + jitter).max(1) as u64;
        Duration::from_micros(micros)
    }
}

/// One session event pinned to a point on the simulated timeline.
#[derive(Clone, Debug)]
pub struct ScriptedEvent {
    /// Arrival time, relative to simulation start.
    pub at: Duration,
    /// The event the session layer would deliver.
    pub event: SessionEvent,
}

impl ScriptedEvent {
    pub fn mode(at: Duration, mode: SpeakingMode) -> Self {
        ScriptedEvent {
            at,
            event: SessionEvent::ModeChange(mode),
        }
    }

    pub fn alignment(at: Duration, batch: visage_core::AlignmentBatch) -> Self {
        ScriptedEvent {
            at,
            event: SessionEvent::Alignment(batch),
        }
    }
}

/// Scripted playback of a session against one engine.
pub struct FrameSimulator {
    engine: AvatarEngine,
    pacing: FramePacing,
    /// Pending script, ordered by arrival time.
    script: VecDeque<ScriptedEvent>,
    /// Simulated time elapsed so far.
    elapsed: Duration,
}

impl FrameSimulator {
    /// Deterministic simulator: seeded engine, steady 60 fps pacing.
    pub fn new() -> Self {
        Self::with_engine(
            AvatarEngine::with_seed(EngineConfig::default(), 0),
            FramePacing::steady(FRAME_INTERVAL_60HZ),
        )
    }

    pub fn with_engine(engine: AvatarEngine, pacing: FramePacing) -> Self {
        FrameSimulator {
            engine,
            pacing,
            script: VecDeque::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Add one scripted event, keeping the script ordered by arrival.
    pub fn schedule(&mut self, event: ScriptedEvent) {
        let idx = self.script.partition_point(|s| s.at <= event.at);
        self.script.insert(idx, event);
    }

    pub fn schedule_all(&mut self, events: Vec<ScriptedEvent>) {
        for event in events {
            self.schedule(event);
        }
    }

    /// Run the simulation for a duration, sampling every frame.
    pub fn run(&mut self, duration: Duration) -> SimulationTrace {
        let mut trace = SimulationTrace::default();
        let end = self.elapsed + duration;

        while self.elapsed < end {
            self.tick(&mut trace);
        }

        trace
    }

    /// Execute one simulated frame.
    fn tick(&mut self, trace: &mut SimulationTrace) {
        self.elapsed += self.pacing.next_interval();

        // Deliver session traffic stamped with its scripted arrival time,
        // not the frame boundary it lands on.
        while self.script.front().map_or(false, |s| s.at <= self.elapsed) {
            if let Some(scripted) = self.script.pop_front() {
                let received_at = FrameTime::from_micros(scripted.at.as_micros() as u64);
                self.engine.on_session_event(scripted.event, received_at);
            }
        }

        let now = FrameTime::from_micros(self.elapsed.as_micros() as u64);
        self.engine.step(now);
        trace.record(self.elapsed, &self.engine);
    }

    pub fn engine(&self) -> &AvatarEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AvatarEngine {
        &mut self.engine
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Scripted events not yet delivered.
    pub fn pending_script(&self) -> usize {
        self.script.len()
    }
}

impl Default for FrameSimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// One frame's worth of observable engine state.
#[derive(Clone, Copy, Debug)]
pub struct FrameSample {
    /// Simulated time of the frame.
    pub at: Duration,
    /// Smoothed talk value.
    pub talk: f32,
    /// Blink envelope value.
    pub blink: f32,
    /// Rendered jaw openness.
    pub jaw_open: f32,
    /// Rendered mouth openness.
    pub mouth_open: f32,
    /// Character of the active alignment event, if any.
    pub active: Option<char>,
    /// Queued alignment events still pending.
    pub pending: usize,
}

/// Frame-by-frame record of a simulation run.
#[derive(Debug, Default)]
pub struct SimulationTrace {
    pub samples: Vec<FrameSample>,
}

impl SimulationTrace {
    fn record(&mut self, at: Duration, engine: &AvatarEngine) {
        self.samples.push(FrameSample {
            at,
            talk: engine.talk_value(),
            blink: engine.blink_value(),
            jaw_open: engine.weights().get(channel::JAW_OPEN),
            mouth_open: engine.weights().get(channel::MOUTH_OPEN),
            active: engine.active_event().map(|event| event.character),
            pending: engine.pending(),
        });
    }

    pub fn frames(&self) -> usize {
        self.samples.len()
    }

    pub fn last(&self) -> Option<&FrameSample> {
        self.samples.last()
    }

    /// Samples at or after a point on the timeline.
    pub fn after(&self, at: Duration) -> impl Iterator<Item = &FrameSample> + '_ {
        self.samples.iter().filter(move |sample| sample.at >= at)
    }

    /// Min and max talk value over samples at or after `skip`.
    pub fn talk_bounds(&self, skip: Duration) -> (f32, f32) {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for sample in self.after(skip) {
            min = min.min(sample.talk);
            max = max.max(sample.talk);
        }
        if min > max {
            (0.0, 0.0)
        } else {
            (min, max)
        }
    }

    /// Count blink rises above a threshold (one per completed close).
    pub fn blink_peaks(&self, threshold: f32) -> usize {
        let mut peaks = 0;
        let mut above = false;
        for sample in &self.samples {
            if sample.blink > threshold {
                if !above {
                    peaks += 1;
                }
                above = true;
            } else {
                above = false;
            }
        }
        peaks
    }
}

/// Prebuilt session scripts.
pub mod scenarios {
    use super::*;
    use visage_core::AlignmentBatch;

    /// Greeting turn: aligned speech, then a clean return to idle.
    pub fn greeting() -> FrameSimulator {
        let mut sim = FrameSimulator::new();
        sim.schedule(ScriptedEvent::mode(
            Duration::from_millis(100),
            SpeakingMode::Speaking,
        ));
        sim.schedule(ScriptedEvent::alignment(
            Duration::from_millis(150),
            AlignmentBatch::from_text("hello there", Duration::from_millis(80)),
        ));
        sim.schedule(ScriptedEvent::mode(
            Duration::from_millis(2500),
            SpeakingMode::Idle,
        ));
        sim
    }

    /// Speaking turn that never receives alignment data.
    pub fn unaligned_speech() -> FrameSimulator {
        let mut sim = FrameSimulator::new();
        sim.schedule(ScriptedEvent::mode(
            Duration::from_millis(100),
            SpeakingMode::Speaking,
        ));
        sim.schedule(ScriptedEvent::mode(
            Duration::from_millis(5100),
            SpeakingMode::Idle,
        ));
        sim
    }

    /// Speech cut off mid-batch by an idle transition.
    pub fn interrupted() -> FrameSimulator {
        let mut sim = FrameSimulator::new();
        sim.schedule(ScriptedEvent::mode(
            Duration::from_millis(100),
            SpeakingMode::Speaking,
        ));
        sim.schedule(ScriptedEvent::alignment(
            Duration::from_millis(150),
            AlignmentBatch::from_text("this sentence never finishes", Duration::from_millis(90)),
        ));
        sim.schedule(ScriptedEvent::mode(
            Duration::from_millis(900),
            SpeakingMode::Idle,
        ));
        sim
    }

    /// Nothing arrives at all; only the blink cycle moves.
    pub fn long_idle() -> FrameSimulator {
        FrameSimulator::new()
    }
}
