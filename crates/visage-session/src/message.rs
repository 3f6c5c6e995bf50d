//! Wire message decoding
//!
//! Session transports wrap everything in a typed JSON envelope. Only two
//! message kinds carry animation meaning: mode changes and alignment
//! batches (standalone, or embedded in an audio message when the
//! transport has no dedicated alignment event). Everything else decodes
//! to `None` so the caller can drop it without branching on type names.

use serde::Deserialize;
use visage_core::{SessionEvent, SpeakingMode, VisageError, VisageResult};

use crate::payload::AlignmentPayload;

/// The session envelope, tagged by `type`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionMessage {
    ModeChange {
        mode: String,
    },
    Alignment {
        #[serde(flatten)]
        payload: AlignmentPayload,
    },
    Audio {
        #[serde(default)]
        alignment: Option<AlignmentPayload>,
    },
    Ping,
    #[serde(other)]
    Unknown,
}

/// Decode one raw session message into an engine event.
///
/// `Ok(None)` means the message was valid but has no animation meaning
/// (pings, unknown types, audio without embedded alignment). Errors are
/// for the caller to log and drop; they never carry partial batches.
pub fn parse_session_message(raw: &str) -> VisageResult<Option<SessionEvent>> {
    let message: SessionMessage =
        serde_json::from_str(raw).map_err(|err| VisageError::MalformedMessage(err.to_string()))?;

    match message {
        SessionMessage::ModeChange { mode } => Ok(Some(SessionEvent::ModeChange(
            SpeakingMode::from_label(&mode),
        ))),
        SessionMessage::Alignment { payload } => {
            Ok(Some(SessionEvent::Alignment(payload.normalize()?)))
        }
        SessionMessage::Audio { alignment } => match alignment {
            Some(payload) => Ok(Some(SessionEvent::Alignment(payload.normalize()?))),
            None => Ok(None),
        },
        SessionMessage::Ping => Ok(None),
        SessionMessage::Unknown => {
            tracing::debug!("ignoring session message with unknown type");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use visage_core::AlignmentBatch;

    fn expect_batch(event: Option<SessionEvent>) -> AlignmentBatch {
        match event {
            Some(SessionEvent::Alignment(batch)) => batch,
            other => panic!("expected alignment event, got {other:?}"),
        }
    }

    #[test]
    fn test_mode_change_speaking() {
        let event = parse_session_message(r#"{"type": "mode_change", "mode": "speaking"}"#)
            .unwrap();
        assert_eq!(
            event,
            Some(SessionEvent::ModeChange(SpeakingMode::Speaking))
        );
    }

    #[test]
    fn test_mode_change_listening_is_idle() {
        let event = parse_session_message(r#"{"type": "mode_change", "mode": "listening"}"#)
            .unwrap();
        assert_eq!(event, Some(SessionEvent::ModeChange(SpeakingMode::Idle)));
    }

    #[test]
    fn test_alignment_message_snake_case() {
        let raw = r#"{
            "type": "alignment",
            "chars": ["n", "o"],
            "char_start_times_ms": [0, 110],
            "char_durations_ms": [110, 140]
        }"#;
        let batch = expect_batch(parse_session_message(raw).unwrap());

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.entries[1].character, 'o');
        assert_eq!(batch.entries[1].duration, Duration::from_millis(140));
    }

    #[test]
    fn test_audio_embedded_alignment_matches_standalone() {
        let standalone = r#"{
            "type": "alignment",
            "characters": ["g", "o"],
            "charStartTimesMs": [0, 90],
            "charDurationsMs": [90, 120]
        }"#;
        let embedded = r#"{
            "type": "audio",
            "alignment": {
                "characters": ["g", "o"],
                "charStartTimesMs": [0, 90],
                "charDurationsMs": [90, 120]
            }
        }"#;

        let from_standalone = expect_batch(parse_session_message(standalone).unwrap());
        let from_embedded = expect_batch(parse_session_message(embedded).unwrap());
        assert_eq!(from_standalone, from_embedded);
    }

    #[test]
    fn test_audio_without_alignment_is_meaningless() {
        let event = parse_session_message(r#"{"type": "audio"}"#).unwrap();
        assert_eq!(event, None);
    }

    #[test]
    fn test_ping_and_unknown_are_meaningless() {
        assert_eq!(parse_session_message(r#"{"type": "ping"}"#).unwrap(), None);
        assert_eq!(
            parse_session_message(r#"{"type": "transcript", "text": "hello"}"#).unwrap(),
            None
        );
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        assert!(matches!(
            parse_session_message("{not json"),
            Err(VisageError::MalformedMessage(_))
        ));
    }

    #[test]
    fn test_partial_alignment_is_an_error_not_a_batch() {
        let raw = r#"{
            "type": "alignment",
            "chars": ["a", "b"],
            "char_start_times_ms": [0]
        }"#;
        assert!(parse_session_message(raw).is_err());
    }
}
