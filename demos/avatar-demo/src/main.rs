//! Visage Avatar Demo
//!
//! Plays a short canned conversation through the real wire path:
//! - A producer thread feeds raw session JSON, like a transport would
//! - The main loop steps the engine at 60 fps and draws weight bars
//! - Both casing variants of the alignment schema appear in the script,
//!   plus a malformed batch to show the silent-drop path

use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use visage_core::{ChannelSink, FrameClock};
use visage_engine::AvatarEngine;
use visage_session::parse_session_message;

/// The canned session: (milliseconds from start, raw wire message).
const SCRIPT: &[(u64, &str)] = &[
    (300, r#"{"type": "mode_change", "mode": "speaking"}"#),
    (
        500,
        r#"{
            "type": "alignment",
            "characters": ["H", "e", "y", " ", "t", "h", "e", "r", "e", "."],
            "charStartTimesMs": [0, 75, 150, 225, 300, 375, 450, 525, 600, 675],
            "charDurationsMs": [75, 75, 75, 75, 75, 75, 75, 75, 75, 75]
        }"#,
    ),
    (
        2200,
        r#"{
            "type": "audio",
            "alignment": {
                "chars": ["S", "e", "e", " ", "y", "o", "u", " ", "s", "o", "o", "n", "."],
                "char_start_times_ms": [0, 70, 140, 210, 280, 350, 420, 490, 560, 630, 700, 770, 840],
                "char_durations_ms": [70, 70, 70, 70, 70, 70, 70, 70, 70, 70, 70, 70, 70]
            }
        }"#,
    ),
    (3600, r#"{"type": "ping"}"#),
    (
        3700,
        r#"{
            "type": "alignment",
            "chars": ["o", "o", "p", "s", "!"],
            "char_start_times_ms": [0, 60, 120, 180, 240],
            "char_durations_ms": [60, 60, 60]
        }"#,
    ),
    (4200, r#"{"type": "mode_change", "mode": "listening"}"#),
    (5500, r#"{"type": "mode_change", "mode": "speaking"}"#),
    (8000, r#"{"type": "mode_change", "mode": "listening"}"#),
];

/// Stand-in for a renderer mesh: accepts every channel write and keeps
/// the handful the terminal view draws.
#[derive(Default)]
struct TerminalFace {
    channels: HashMap<String, f32>,
}

impl TerminalFace {
    fn get(&self, name: &str) -> f32 {
        self.channels.get(name).copied().unwrap_or(0.0)
    }

    /// Highest-weighted viseme channel this frame, if any is visible.
    fn top_viseme(&self) -> Option<(&str, f32)> {
        self.channels
            .iter()
            .filter(|(name, _)| name.starts_with("viseme_"))
            .filter(|(_, value)| **value > 0.01)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(name, value)| (name.as_str(), *value))
    }
}

impl ChannelSink for TerminalFace {
    fn write_channel(&mut self, name: &str, value: f32) {
        self.channels.insert(name.to_string(), value);
    }
}

fn bar(value: f32) -> String {
    let filled = (value.clamp(0.0, 1.0) * 10.0).round() as usize;
    format!("[{:<10}]", "#".repeat(filled))
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "avatar_demo=info,visage_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("==============================================");
    println!("  Visage Avatar Demo - canned voice session");
    println!("==============================================");
    println!();

    let clock = FrameClock::new();
    let mut engine = AvatarEngine::new();
    let sender = engine.sender();

    // Producer side: raw JSON in, stamped events out, exactly what a
    // websocket read loop would do.
    let producer_clock = clock.clone();
    let producer = thread::spawn(move || {
        let mut last_ms = 0u64;
        for (at_ms, raw) in SCRIPT {
            thread::sleep(Duration::from_millis(at_ms - last_ms));
            last_ms = *at_ms;

            match parse_session_message(raw) {
                Ok(Some(event)) => {
                    sender.send(event, producer_clock.now());
                }
                Ok(None) => {
                    tracing::debug!("session message with no animation meaning");
                }
                Err(err) => {
                    tracing::warn!("dropping session message: {}", err);
                }
            }
        }
    });

    let mut face = TerminalFace::default();
    let mut last_mode = engine.mode();

    // 10 seconds at 60 fps.
    for frame in 0u32..600 {
        thread::sleep(Duration::from_millis(16));
        let now = clock.now();
        engine.step(now);
        engine.apply_to(&mut face);

        let mode = engine.mode();
        if mode != last_mode {
            println!(
                "--- {}",
                if mode.is_speaking() {
                    "Assistant speaking"
                } else {
                    "Listening"
                }
            );
            last_mode = mode;
        }

        if frame % 15 == 0 {
            let viseme = face
                .top_viseme()
                .map(|(name, value)| format!("{name} {value:.2}"))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "[{:>6.2}s] jaw {} blink {} {}",
                now.as_secs_f64(),
                bar(face.get("jawOpen")),
                bar(face.get("blink")),
                viseme
            );
        }
    }

    if producer.join().is_err() {
        tracing::warn!("session producer thread panicked");
    }

    let stats = engine.stats();
    println!();
    println!("frames rendered:  {}", stats.frames);
    println!("batches ingested: {}", stats.batches_ingested);
    println!("events scheduled: {}", stats.events_scheduled);
    println!("events expired:   {}", stats.events_expired);
    println!("mode changes:     {}", stats.mode_changes);
}
