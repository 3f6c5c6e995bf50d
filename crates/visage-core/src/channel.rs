//! Expression channels - the engine's only output surface
//!
//! A frame step produces one weight per named expression channel. The
//! engine does not know which channels the loaded avatar actually has;
//! writing an unknown name is a silent no-op at the sink. That contract
//! is what lets one engine drive avatars with partial channel sets.

use std::collections::HashMap;

/// Jaw openness channel.
pub const JAW_OPEN: &str = "jawOpen";

/// Mouth openness channel.
pub const MOUTH_OPEN: &str = "mouthOpen";

/// Eyelid channels, written every frame. Covers ARKit-style names plus
/// the generic aliases used by avatars with other naming conventions.
pub const BLINK_CHANNELS: [&str; 5] = [
    "eyeBlinkLeft",
    "eyeBlinkRight",
    "blink",
    "blinkLeft",
    "blinkRight",
];

/// Destination for per-frame channel writes.
///
/// Implementors map channel names onto whatever the renderer exposes
/// (morph target dictionary, bone curves, a recording buffer). A name
/// the avatar does not carry MUST be ignored, not reported: the write
/// is a total function over all names.
pub trait ChannelSink {
    fn write_channel(&mut self, name: &str, value: f32);
}

/// The weight set produced by one frame step.
///
/// All stored weights lie in [0, 1]; `set` clamps on the way in so no
/// blend arithmetic can leak an out-of-range value to the renderer.
#[derive(Clone, Debug, Default)]
pub struct ChannelWeights {
    weights: HashMap<&'static str, f32>,
}

impl ChannelWeights {
    pub fn new() -> Self {
        ChannelWeights {
            weights: HashMap::new(),
        }
    }

    /// Set a channel weight, clamped to [0, 1].
    pub fn set(&mut self, name: &'static str, value: f32) {
        self.weights.insert(name, value.clamp(0.0, 1.0));
    }

    /// Current weight for a channel, zero if never written.
    pub fn get(&self, name: &str) -> f32 {
        self.weights.get(name).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        self.weights.iter().map(|(name, value)| (*name, *value))
    }

    /// Push every weight through a sink.
    pub fn apply_to(&self, sink: &mut dyn ChannelSink) {
        for (name, value) in self.iter() {
            sink.write_channel(name, value);
        }
    }
}
