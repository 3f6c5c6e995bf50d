//! Benchmarks for per-frame engine operations

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use visage_core::{AlignmentBatch, FrameTime, SpeakingMode};
use visage_engine::{AvatarEngine, EngineConfig};
use visage_session::parse_session_message;

fn bench_step_idle(c: &mut Criterion) {
    let mut engine = AvatarEngine::with_seed(EngineConfig::default(), 0);
    let mut now = FrameTime::ZERO;

    c.bench_function("engine_step_idle", |b| {
        b.iter(|| {
            now = now + Duration::from_micros(16_667);
            black_box(engine.step(now).len())
        })
    });
}

fn bench_step_fallback_speech(c: &mut Criterion) {
    let mut engine = AvatarEngine::with_seed(EngineConfig::default(), 0);
    engine.set_mode(SpeakingMode::Speaking);
    let mut now = FrameTime::ZERO;

    c.bench_function("engine_step_fallback_speech", |b| {
        b.iter(|| {
            now = now + Duration::from_micros(16_667);
            black_box(engine.step(now).len())
        })
    });
}

fn bench_step_aligned_speech(c: &mut Criterion) {
    let mut engine = AvatarEngine::with_seed(EngineConfig::default(), 0);
    engine.set_mode(SpeakingMode::Speaking);
    let mut now = FrameTime::ZERO;
    let batch = AlignmentBatch::from_text(
        "the quick brown fox jumps over the lazy dog",
        Duration::from_millis(60),
    );

    c.bench_function("engine_step_aligned_speech", |b| {
        let mut frame = 0u64;
        b.iter(|| {
            // Re-feed the batch as the previous one runs out.
            if frame % 128 == 0 {
                engine.ingest(&batch, now);
            }
            frame += 1;
            now = now + Duration::from_micros(16_667);
            black_box(engine.step(now).len())
        })
    });
}

fn bench_ingest_batch(c: &mut Criterion) {
    let mut engine = AvatarEngine::with_seed(EngineConfig::default(), 0);
    let batch = AlignmentBatch::from_text(
        "the quick brown fox jumps over the lazy dog",
        Duration::from_millis(60),
    );
    let mut now = FrameTime::ZERO;

    c.bench_function("engine_ingest_batch", |b| {
        b.iter(|| {
            engine.ingest(black_box(&batch), now);
            // Step far ahead so the queue drains instead of growing.
            now = now + Duration::from_secs(10);
            black_box(engine.step(now).len())
        })
    });
}

fn bench_parse_alignment_message(c: &mut Criterion) {
    let raw = r#"{
        "type": "alignment",
        "characters": ["h", "e", "l", "l", "o", " ", "t", "h", "e", "r", "e"],
        "charStartTimesMs": [0, 80, 160, 240, 320, 400, 480, 560, 640, 720, 800],
        "charDurationsMs": [80, 80, 80, 80, 80, 80, 80, 80, 80, 80, 80]
    }"#;

    c.bench_function("parse_alignment_message", |b| {
        b.iter(|| black_box(parse_session_message(black_box(raw))))
    });
}

criterion_group!(
    benches,
    bench_step_idle,
    bench_step_fallback_speech,
    bench_step_aligned_speech,
    bench_ingest_batch,
    bench_parse_alignment_message,
);
criterion_main!(benches);
