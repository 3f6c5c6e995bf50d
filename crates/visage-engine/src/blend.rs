//! Frame Blender - reconciles scheduler, mode, and blink into weights
//!
//! Once per frame this combines the active alignment event (if any),
//! the speaking mode, and the blink value into the channel weight set.
//! The talk value is smoothed exponentially so mouth openness never
//! snaps, and a procedural oscillation keeps the mouth moving through
//! speaking turns whose alignment data lags or never arrives.

use std::time::Duration;

use visage_core::{channel, ChannelWeights, FrameTime, SpeakingMode};

use crate::schedule::AlignmentEvent;
use crate::viseme::Viseme;

/// Mouth openness target while an alignment event is articulating.
const ACTIVE_OPEN: f32 = 0.5;

/// Base openness of the procedural speaking fallback.
const FALLBACK_BASE: f32 = 0.1;

/// Oscillation amplitude of the procedural speaking fallback.
const FALLBACK_SWING: f32 = 0.2;

/// Fallback oscillator rate, radians per millisecond of frame time.
const FALLBACK_RATE: f64 = 0.02;

/// Mouth channel scale relative to the jaw.
const MOUTH_SCALE: f32 = 0.4;

/// Viseme channel scale relative to the jaw.
const VISEME_SCALE: f32 = 0.7;

/// Below this the mouth is treated as closed and left at zero.
const TALK_EPSILON: f32 = 0.01;

/// Per-frame weight blender.
///
/// Holds the smoothed talk value across frames; everything else is
/// recomputed from that frame's inputs.
#[derive(Debug)]
pub struct FrameBlender {
    talk_value: f32,
    /// Exponential approach rate toward the openness target, per second.
    smooth_rate: f32,
}

impl FrameBlender {
    pub fn new(smooth_rate: f32) -> Self {
        FrameBlender {
            talk_value: 0.0,
            smooth_rate,
        }
    }

    /// Blend one frame into `weights`.
    ///
    /// Every viseme channel is zeroed before the active one is written,
    /// so a shape from the previous frame never lingers half-open.
    /// Blink channels are written unconditionally; the lids do not care
    /// whether anyone is talking.
    pub fn step(
        &mut self,
        mode: SpeakingMode,
        active: Option<AlignmentEvent>,
        blink: f32,
        now: FrameTime,
        delta: Duration,
        weights: &mut ChannelWeights,
    ) {
        let (target_open, target_viseme) = match active {
            Some(event) => (ACTIVE_OPEN, Some(Viseme::from_char(event.character))),
            None if mode.is_speaking() => {
                // Alignment is lagging or absent mid-turn; oscillate so
                // the face still reads as speaking.
                let phase = (now.as_millis_f64() * FALLBACK_RATE).sin().abs() as f32;
                (FALLBACK_BASE + FALLBACK_SWING * phase, Some(Viseme::AA))
            }
            None => (0.0, None),
        };

        let alpha = (delta.as_secs_f32() * self.smooth_rate).min(1.0);
        self.talk_value += (target_open - self.talk_value) * alpha;

        for viseme in Viseme::ALL {
            weights.set(viseme.channel_name(), 0.0);
        }

        if self.talk_value > TALK_EPSILON {
            weights.set(channel::JAW_OPEN, self.talk_value);
            weights.set(channel::MOUTH_OPEN, self.talk_value * MOUTH_SCALE);
            if let Some(viseme) = target_viseme {
                weights.set(viseme.channel_name(), self.talk_value * VISEME_SCALE);
            }
        } else {
            weights.set(channel::JAW_OPEN, 0.0);
            weights.set(channel::MOUTH_OPEN, 0.0);
        }

        for name in channel::BLINK_CHANNELS {
            weights.set(name, blink);
        }
    }

    /// Smoothed mouth openness carried across frames.
    pub fn talk_value(&self) -> f32 {
        self.talk_value
    }
}
