//! Session message decoding for Visage
//!
//! The conversational transport (a WebSocket, a WebRTC data channel, an
//! SDK callback layer) delivers JSON messages. This crate turns the raw
//! text of those messages into [`visage_core::SessionEvent`] values the
//! engine can consume, and nothing else: no sockets, no reconnect
//! logic, no audio.
//!
//! Decoding rules:
//!
//! - Two field-naming schemes (snake_case and camelCase) are accepted
//!   for alignment payloads and normalize identically.
//! - An alignment batch embedded in a generic audio message decodes the
//!   same as a standalone alignment message.
//! - Malformed or partial payloads are errors for the caller to drop;
//!   messages without animation meaning decode to `None`.

pub mod message;
pub mod payload;

pub use message::*;
pub use payload::*;
