//! Session events consumed by the engine
//!
//! The session collaborator reduces everything it knows to two event
//! kinds: speaking-mode changes and alignment batches. The engine reacts
//! to nothing else; connection state, transcripts, and audio stay on the
//! session side.

use std::time::Duration;

/// Whether the remote voice is currently producing speech.
///
/// Set exclusively by session mode-change notifications. The engine does
/// not distinguish "disconnected" from "naturally silent"; both arrive
/// here as `Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpeakingMode {
    #[default]
    Idle,
    Speaking,
}

impl SpeakingMode {
    /// Map a session mode label. Anything but "speaking" is idle.
    pub fn from_label(label: &str) -> Self {
        if label == "speaking" {
            SpeakingMode::Speaking
        } else {
            SpeakingMode::Idle
        }
    }

    #[inline]
    pub fn is_speaking(self) -> bool {
        self == SpeakingMode::Speaking
    }
}

/// One character of speech timing, relative to its batch's emission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlignmentHint {
    /// The character being articulated.
    pub character: char,
    /// Offset from batch emission to articulation start.
    pub start_offset: Duration,
    /// How long the articulation lasts.
    pub duration: Duration,
}

impl AlignmentHint {
    pub fn new(character: char, start_offset: Duration, duration: Duration) -> Self {
        AlignmentHint {
            character,
            start_offset,
            duration,
        }
    }
}

/// A normalized batch of alignment hints, offsets non-decreasing in the
/// order the session emitted them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlignmentBatch {
    pub entries: Vec<AlignmentHint>,
}

impl AlignmentBatch {
    pub fn new(entries: Vec<AlignmentHint>) -> Self {
        AlignmentBatch { entries }
    }

    /// Evenly spaced batch covering `text`, one hint per character.
    pub fn from_text(text: &str, per_char: Duration) -> Self {
        let entries = text
            .chars()
            .enumerate()
            .map(|(i, character)| AlignmentHint {
                character,
                start_offset: per_char * i as u32,
                duration: per_char,
            })
            .collect();
        AlignmentBatch { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything the session layer can tell the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    ModeChange(SpeakingMode),
    Alignment(AlignmentBatch),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_label() {
        assert_eq!(SpeakingMode::from_label("speaking"), SpeakingMode::Speaking);
        assert_eq!(SpeakingMode::from_label("listening"), SpeakingMode::Idle);
        assert_eq!(SpeakingMode::from_label("idle"), SpeakingMode::Idle);
        assert_eq!(SpeakingMode::from_label(""), SpeakingMode::Idle);
        // No case folding: session labels are lowercase on the wire.
        assert_eq!(SpeakingMode::from_label("Speaking"), SpeakingMode::Idle);
    }

    #[test]
    fn test_batch_from_text() {
        let batch = AlignmentBatch::from_text("hey", Duration::from_millis(80));

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.entries[0].character, 'h');
        assert_eq!(batch.entries[0].start_offset, Duration::ZERO);
        assert_eq!(batch.entries[2].character, 'y');
        assert_eq!(batch.entries[2].start_offset, Duration::from_millis(160));
        assert_eq!(batch.entries[2].duration, Duration::from_millis(80));
    }

    #[test]
    fn test_empty_batch() {
        let batch = AlignmentBatch::from_text("", Duration::from_millis(80));
        assert!(batch.is_empty());
    }
}
