//! End-to-end scenarios: session wire traffic in, channel weights out
//!
//! The simulator module drives an engine from typed events; this module
//! closes the remaining gap on both ends. Raw JSON goes in through the
//! session decoder, and rendered weights come out through a recording
//! sink, the same shape a production embedding has.

use std::time::Duration;

use visage_core::FrameTime;
use visage_engine::AvatarEngine;
use visage_session::parse_session_message;

use crate::simulator::{scenarios, SimulationTrace};

// ============================================================================
// WIRE PLUMBING
// ============================================================================

/// Push one raw session message into an engine.
///
/// Anything that does not decode to an animation event is dropped here,
/// mirroring how a production driver treats pings, unknown types, and
/// malformed payloads. Returns whether an event was applied.
pub fn feed_wire(engine: &mut AvatarEngine, raw: &str, received_at: FrameTime) -> bool {
    match parse_session_message(raw) {
        Ok(Some(event)) => {
            engine.on_session_event(event, received_at);
            true
        }
        Ok(None) | Err(_) => false,
    }
}

// ============================================================================
// SCENARIO RUNNERS
// ============================================================================

/// Full greeting turn, 4 simulated seconds.
pub fn run_greeting() -> SimulationTrace {
    scenarios::greeting().run(Duration::from_secs(4))
}

/// Speaking with no alignment data, 6 simulated seconds.
pub fn run_unaligned_speech() -> SimulationTrace {
    scenarios::unaligned_speech().run(Duration::from_secs(6))
}

/// Speech interrupted mid-batch, 2 simulated seconds.
pub fn run_interrupted() -> SimulationTrace {
    scenarios::interrupted().run(Duration::from_secs(2))
}

/// Twenty seconds with no session traffic at all.
pub fn run_long_idle() -> SimulationTrace {
    scenarios::long_idle().run(Duration::from_secs(20))
}
