//! Recording channel sink
//!
//! Models the renderer side of the channel contract. A real avatar mesh
//! carries only some of the names the engine writes; the rest must
//! disappear silently. The sink records what landed and counts what did
//! not, so tests can assert on both halves of that contract.

use std::collections::{HashMap, HashSet};

use visage_core::ChannelSink;

/// A `ChannelSink` backed by a plain map, optionally restricted to a
/// fixed set of channel names.
pub struct RecordingSink {
    channels: HashMap<String, f32>,
    /// When set, names outside this set are dropped like a mesh without
    /// those morph targets would drop them.
    known: Option<HashSet<String>>,
    writes: u64,
    ignored: u64,
}

impl RecordingSink {
    /// Sink that accepts every channel name.
    pub fn new() -> Self {
        RecordingSink {
            channels: HashMap::new(),
            known: None,
            writes: 0,
            ignored: 0,
        }
    }

    /// Sink that models an avatar carrying only the given channels.
    pub fn with_channels(names: &[&str]) -> Self {
        RecordingSink {
            channels: HashMap::new(),
            known: Some(names.iter().map(|name| name.to_string()).collect()),
            writes: 0,
            ignored: 0,
        }
    }

    /// Last value written to a channel, zero if none landed.
    pub fn get(&self, name: &str) -> f32 {
        self.channels.get(name).copied().unwrap_or(0.0)
    }

    /// Channels that have received at least one write.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Total writes attempted, landed or not.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Writes dropped because the avatar lacks the channel.
    pub fn ignored(&self) -> u64 {
        self.ignored
    }
}

impl ChannelSink for RecordingSink {
    fn write_channel(&mut self, name: &str, value: f32) {
        self.writes += 1;
        if let Some(known) = &self.known {
            if !known.contains(name) {
                self.ignored += 1;
                return;
            }
        }
        self.channels.insert(name.to_string(), value);
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visage_core::channel;

    #[test]
    fn test_open_sink_records_everything() {
        let mut sink = RecordingSink::new();
        sink.write_channel(channel::JAW_OPEN, 0.4);
        sink.write_channel("viseme_aa", 0.2);

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.get(channel::JAW_OPEN), 0.4);
        assert_eq!(sink.ignored(), 0);
    }

    #[test]
    fn test_restricted_sink_drops_unknown_names() {
        let mut sink = RecordingSink::with_channels(&[channel::JAW_OPEN, "blink"]);
        sink.write_channel(channel::JAW_OPEN, 0.5);
        sink.write_channel("viseme_PP", 0.3);
        sink.write_channel("blink", 0.9);

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.get("viseme_PP"), 0.0);
        assert_eq!(sink.writes(), 3);
        assert_eq!(sink.ignored(), 1);
    }

    #[test]
    fn test_rewrites_keep_last_value() {
        let mut sink = RecordingSink::new();
        sink.write_channel("blink", 0.1);
        sink.write_channel("blink", 0.8);

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.get("blink"), 0.8);
    }
}
