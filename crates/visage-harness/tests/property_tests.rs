use std::time::Duration;

use proptest::prelude::*;
use visage_core::{AlignmentBatch, AlignmentHint, FrameTime, SpeakingMode};
use visage_engine::{AlignmentEvent, AvatarEngine, EngineConfig, VisemeScheduler};

const MIN_HOLD: Duration = Duration::from_millis(50);

/// Sequential speech timing: each hint starts after the previous one
/// ends, the shape real alignment batches have.
fn sequential_events(spans: &[(u64, u64)]) -> Vec<AlignmentEvent> {
    let mut start_ms = 0u64;
    let mut events = Vec::with_capacity(spans.len());
    for (gap_ms, dur_ms) in spans {
        start_ms += gap_ms;
        events.push(AlignmentEvent::new(
            'a',
            FrameTime::from_millis(start_ms),
            Duration::from_millis(*dur_ms),
        ));
        start_ms += dur_ms;
    }
    events
}

proptest! {
    #[test]
    fn test_stepped_queue_never_holds_expired(
        spans in prop::collection::vec((0u64..200, 0u64..150), 0..64),
        probes in prop::collection::vec(0u64..20_000, 1..32)
    ) {
        let mut scheduler = VisemeScheduler::new(MIN_HOLD);
        for event in sequential_events(&spans) {
            scheduler.push(event);
        }

        let mut probes = probes;
        probes.sort_unstable();

        for probe_ms in probes {
            let now = FrameTime::from_millis(probe_ms);
            let active = scheduler.step(now);

            for event in scheduler.iter() {
                let hold = event.duration.max(MIN_HOLD);
                prop_assert!(
                    event.start + hold >= now,
                    "expired event still queued at {probe_ms}ms"
                );
            }

            if let Some(active) = active {
                prop_assert!(active.start <= now);
                prop_assert!(active.start + active.duration.max(MIN_HOLD) >= now);
            }
        }
    }

    #[test]
    fn test_active_is_always_earliest_queued(
        spans in prop::collection::vec((0u64..200, 1u64..150), 1..32),
        probe_ms in 0u64..20_000
    ) {
        let mut scheduler = VisemeScheduler::new(MIN_HOLD);
        for event in sequential_events(&spans) {
            scheduler.push(event);
        }

        let now = FrameTime::from_millis(probe_ms);
        if let Some(active) = scheduler.step(now) {
            for event in scheduler.iter() {
                prop_assert!(event.start >= active.start);
            }
        }
    }

    #[test]
    fn test_weights_bounded_for_any_session(
        per_char_ms in 10u64..200,
        text in "[a-z ]{1,24}",
        mode_flip_frame in 1usize..100,
        frame_ms in 1u64..40
    ) {
        let mut engine = AvatarEngine::with_seed(EngineConfig::default(), 0);
        engine.set_mode(SpeakingMode::Speaking);
        engine.ingest(
            &AlignmentBatch::from_text(&text, Duration::from_millis(per_char_ms)),
            FrameTime::ZERO,
        );

        for frame in 0..200usize {
            if frame == mode_flip_frame {
                engine.set_mode(SpeakingMode::Idle);
            }
            let weights = engine.step(FrameTime::from_millis(frame as u64 * frame_ms));
            for (name, value) in weights.iter() {
                prop_assert!(
                    (0.0..=1.0).contains(&value),
                    "channel {name} out of bounds: {value}"
                );
            }
        }
    }

    #[test]
    fn test_flush_after_idle_holds_for_any_queue(
        per_char_ms in 10u64..200,
        text in "[a-z]{1,16}"
    ) {
        let mut engine = AvatarEngine::new();
        engine.set_mode(SpeakingMode::Speaking);
        engine.ingest(
            &AlignmentBatch::from_text(&text, Duration::from_millis(per_char_ms)),
            FrameTime::ZERO,
        );
        prop_assert!(engine.pending() > 0);

        engine.set_mode(SpeakingMode::Idle);
        engine.step(FrameTime::from_millis(1));
        prop_assert_eq!(engine.pending(), 0);
        prop_assert!(engine.active_event().is_none());
    }

    #[test]
    fn test_hint_normalization_keeps_order(
        cells in prop::collection::vec("[a-z]", 1..32),
        per_ms in 1u64..100
    ) {
        let entries: Vec<AlignmentHint> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| AlignmentHint::new(
                cell.chars().next().unwrap(),
                Duration::from_millis(i as u64 * per_ms),
                Duration::from_millis(per_ms),
            ))
            .collect();
        let batch = AlignmentBatch::new(entries);

        let mut engine = AvatarEngine::new();
        engine.ingest(&batch, FrameTime::ZERO);
        prop_assert_eq!(engine.pending(), batch.len());
    }
}
