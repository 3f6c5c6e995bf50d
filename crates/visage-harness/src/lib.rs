//! Visage Harness - Simulation and scenario testing for the animation engine
//!
//! This crate provides:
//! - A scripted frame-loop simulator with configurable frame pacing
//! - A recording channel sink that models avatars with partial channel sets
//! - End-to-end session scenarios (greeting, unaligned speech, interruption)
//! - Wire-to-weights plumbing for driving an engine from raw session JSON

pub mod integration;
pub mod simulator;
pub mod sink;

pub use integration::*;
pub use simulator::*;
pub use sink::*;
