//! Avatar Engine - the per-avatar animation context
//!
//! One engine owns one face: scheduler, blink cycle, blender, mode, and
//! the session inbox all live here, so a process can run any number of
//! independent avatars. The engine never samples a clock; the driver
//! passes explicit frame times into `step` and arrival times into
//! `ingest`, which keeps every test deterministic.

use std::time::Duration;

use visage_core::{AlignmentBatch, ChannelSink, ChannelWeights, FrameTime, SessionEvent, SpeakingMode};

use crate::blend::FrameBlender;
use crate::blink::BlinkCycle;
use crate::inbox::{SessionInbox, SessionSender};
use crate::schedule::{AlignmentEvent, VisemeScheduler};

// Clamp on per-frame deltas so a system sleep cannot fast-forward the
// blink cycle or the smoothing in one step.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Engine tuning parameters.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Forward buffer added to alignment timestamps on ingest, absorbing
    /// network and audio delivery latency before an event must fire.
    pub lookahead: Duration,
    /// Minimum visible hold for very short alignment hints.
    pub min_viseme_duration: Duration,
    /// Exponential approach rate for mouth openness, per second.
    pub smooth_rate: f32,
    /// Full eyelid close-and-open length.
    pub blink_duration: Duration,
    /// Lower bound of the sampled wait between blinks, seconds.
    pub blink_interval_min: f32,
    /// Upper bound (exclusive) of the sampled wait between blinks, seconds.
    pub blink_interval_max: f32,
    /// Session inbox capacity; events past this are dropped.
    pub inbox_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            lookahead: Duration::from_millis(100),
            min_viseme_duration: Duration::from_millis(50),
            smooth_rate: 20.0,
            blink_duration: Duration::from_millis(150),
            blink_interval_min: 2.0,
            blink_interval_max: 7.0,
            inbox_capacity: 256,
        }
    }
}

impl EngineConfig {
    /// Configuration for high-latency sessions (satellite, congested
    /// mobile): a longer lookahead rides out delivery jitter at the
    /// cost of lip-sync tightness.
    pub fn high_latency() -> Self {
        EngineConfig {
            lookahead: Duration::from_millis(250),
            ..Self::default()
        }
    }
}

/// Counters for observing a running engine.
#[derive(Clone, Debug, Default)]
pub struct EngineStats {
    pub frames: u64,
    pub batches_ingested: u64,
    pub events_scheduled: u64,
    pub events_expired: u64,
    pub mode_changes: u64,
    pub flushes: u64,
    pub inbox_dropped: u64,
}

/// The facial animation engine.
///
/// Drive it with `step(now)` once per rendered frame; feed it session
/// events either through a `SessionSender` (cross-thread) or directly
/// via `on_session_event` (same-thread embeddings). Both paths give the
/// same guarantee: a transition to idle flushes pending visemes before
/// the next frame renders anything.
pub struct AvatarEngine {
    mode: SpeakingMode,
    scheduler: VisemeScheduler,
    blink: BlinkCycle,
    blender: FrameBlender,
    weights: ChannelWeights,
    inbox: SessionInbox,
    last_step: Option<FrameTime>,
    last_active: Option<AlignmentEvent>,
    config: EngineConfig,
    stats: EngineStats,
}

impl AvatarEngine {
    /// Create an engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with custom configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        AvatarEngine {
            mode: SpeakingMode::Idle,
            scheduler: VisemeScheduler::new(config.min_viseme_duration),
            blink: BlinkCycle::new(
                config.blink_duration,
                config.blink_interval_min,
                config.blink_interval_max,
            ),
            blender: FrameBlender::new(config.smooth_rate),
            weights: ChannelWeights::new(),
            inbox: SessionInbox::new(config.inbox_capacity),
            last_step: None,
            last_active: None,
            stats: EngineStats::default(),
            config,
        }
    }

    /// Create an engine with a deterministic blink sequence.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        AvatarEngine {
            mode: SpeakingMode::Idle,
            scheduler: VisemeScheduler::new(config.min_viseme_duration),
            blink: BlinkCycle::with_seed(
                config.blink_duration,
                config.blink_interval_min,
                config.blink_interval_max,
                seed,
            ),
            blender: FrameBlender::new(config.smooth_rate),
            weights: ChannelWeights::new(),
            inbox: SessionInbox::new(config.inbox_capacity),
            last_step: None,
            last_active: None,
            stats: EngineStats::default(),
            config,
        }
    }

    /// Producer handle for feeding session events across threads.
    pub fn sender(&self) -> SessionSender {
        self.inbox.sender()
    }

    /// Apply one session event immediately (same-thread path).
    pub fn on_session_event(&mut self, event: SessionEvent, received_at: FrameTime) {
        match event {
            SessionEvent::ModeChange(mode) => self.set_mode(mode),
            SessionEvent::Alignment(batch) => self.ingest(&batch, received_at),
        }
    }

    /// Update the speaking mode. The transition into idle is the
    /// cancellation point: pending visemes are discarded here, before
    /// any later frame can render them.
    pub fn set_mode(&mut self, mode: SpeakingMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.stats.mode_changes += 1;

        if mode == SpeakingMode::Idle {
            let discarded = self.scheduler.len();
            self.scheduler.flush();
            self.stats.flushes += 1;
            if discarded > 0 {
                tracing::debug!("flushed {} pending visemes on idle", discarded);
            }
        }
    }

    /// Schedule an alignment batch received at `received_at`. Each hint
    /// fires at `received_at + lookahead + start_offset`.
    pub fn ingest(&mut self, batch: &AlignmentBatch, received_at: FrameTime) {
        for hint in &batch.entries {
            let start = received_at + self.config.lookahead + hint.start_offset;
            self.scheduler
                .push(AlignmentEvent::new(hint.character, start, hint.duration));
        }
        self.stats.batches_ingested += 1;
        self.stats.events_scheduled += batch.entries.len() as u64;
        tracing::debug!("scheduled {} alignment events", batch.entries.len());
    }

    /// Advance the face to `now` and return the frame's weight set.
    ///
    /// Order inside a step: drain the inbox (so a mode change or batch
    /// that arrived since the last frame applies first), then blink,
    /// then scheduler, then blend.
    pub fn step(&mut self, now: FrameTime) -> &ChannelWeights {
        for (event, received_at) in self.inbox.drain() {
            self.on_session_event(event, received_at);
        }

        let delta = match self.last_step {
            Some(prev) => (now - prev).min(MAX_FRAME_DELTA),
            None => Duration::ZERO,
        };
        self.last_step = Some(now);

        let blink = self.blink.step(delta);
        self.last_active = self.scheduler.step(now);
        self.blender
            .step(self.mode, self.last_active, blink, now, delta, &mut self.weights);

        self.stats.frames += 1;
        self.stats.events_expired = self.scheduler.expired();
        self.stats.inbox_dropped = self.inbox.dropped();
        &self.weights
    }

    /// Write the current weight set through a sink.
    pub fn apply_to(&self, sink: &mut dyn ChannelSink) {
        self.weights.apply_to(sink);
    }

    pub fn mode(&self) -> SpeakingMode {
        self.mode
    }

    /// The event articulating as of the last step, if any.
    pub fn active_event(&self) -> Option<AlignmentEvent> {
        self.last_active
    }

    /// Pending (unexpired, queued) alignment events.
    pub fn pending(&self) -> usize {
        self.scheduler.len()
    }

    pub fn talk_value(&self) -> f32 {
        self.blender.talk_value()
    }

    pub fn blink_value(&self) -> f32 {
        self.blink.value()
    }

    pub fn weights(&self) -> &ChannelWeights {
        &self.weights
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }
}

impl Default for AvatarEngine {
    fn default() -> Self {
        Self::new()
    }
}
