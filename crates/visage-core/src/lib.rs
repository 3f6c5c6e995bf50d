//! Visage Core - Fundamental types for the facial animation engine
//!
//! This crate defines the core types used throughout the visage stack:
//! - Frame timeline primitives (FrameTime, FrameClock)
//! - Expression channel weights and the channel sink contract
//! - Session events (speaking mode, alignment batches)
//! - Error types

pub mod time;
pub mod channel;
pub mod event;
pub mod error;

pub use time::*;
pub use channel::*;
pub use event::*;
pub use error::*;
