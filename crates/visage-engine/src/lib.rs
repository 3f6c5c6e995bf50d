//! Visage Engine - Real-time facial animation synchronization
//!
//! Face motion as STATE, not keyframes. The session layer delivers
//! coarse, asynchronous speech-timing hints; this engine turns them into
//! smooth per-frame expression weights. When alignment data lags or
//! never arrives, the face keeps moving anyway.
//!
//! Components:
//! - Character to viseme mapping
//! - Time-ordered viseme scheduler with arrival lookahead
//! - Autonomous eyelid blink cycle
//! - Per-frame weight blender with a procedural speaking fallback
//! - Bounded session inbox for cross-thread ingest

pub mod viseme;
pub mod schedule;
pub mod blink;
pub mod blend;
pub mod inbox;
pub mod engine;

pub use viseme::*;
pub use schedule::*;
pub use blink::*;
pub use blend::*;
pub use inbox::*;
pub use engine::*;
