//! Alignment payload normalization
//!
//! Two schema variants arrive on real sessions, differing only in field
//! casing. Both carry three parallel arrays: the characters of the
//! spoken text, each character's start offset in milliseconds, and each
//! character's duration in milliseconds. Serde aliases fold the casing
//! variants into one struct; `normalize` checks the arrays and produces
//! the canonical batch.

use std::time::Duration;

use serde::Deserialize;
use visage_core::{AlignmentBatch, AlignmentHint, VisageError, VisageResult};

/// Raw alignment arrays as they appear on the wire.
///
/// All fields are optional at the decode stage so a partial payload
/// deserializes rather than erroring inside serde; `normalize` is where
/// incompleteness becomes a `VisageError`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AlignmentPayload {
    #[serde(alias = "characters")]
    pub chars: Option<Vec<String>>,
    #[serde(alias = "charStartTimesMs")]
    pub char_start_times_ms: Option<Vec<u64>>,
    #[serde(alias = "charDurationsMs")]
    pub char_durations_ms: Option<Vec<u64>>,
}

impl AlignmentPayload {
    /// Validate the parallel arrays and build the canonical batch.
    ///
    /// Empty character cells map to a space, which articulates as the
    /// neutral open-mouth viseme downstream.
    pub fn normalize(&self) -> VisageResult<AlignmentBatch> {
        let chars = self
            .chars
            .as_ref()
            .ok_or(VisageError::MissingField("chars"))?;
        let starts = self
            .char_start_times_ms
            .as_ref()
            .ok_or(VisageError::MissingField("char_start_times_ms"))?;
        let durations = self
            .char_durations_ms
            .as_ref()
            .ok_or(VisageError::MissingField("char_durations_ms"))?;

        if chars.len() != starts.len() || chars.len() != durations.len() {
            return Err(VisageError::LengthMismatch {
                chars: chars.len(),
                starts: starts.len(),
                durations: durations.len(),
            });
        }

        let entries = chars
            .iter()
            .zip(starts.iter().zip(durations.iter()))
            .map(|(cell, (start, duration))| {
                AlignmentHint::new(
                    cell.chars().next().unwrap_or(' '),
                    Duration::from_millis(*start),
                    Duration::from_millis(*duration),
                )
            })
            .collect();

        Ok(AlignmentBatch::new(entries))
    }
}
