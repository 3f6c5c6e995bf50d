//! Viseme Scheduler - time-ordered queue of pending mouth shapes
//!
//! Alignment hints arrive in batches ahead of the audio they describe;
//! the scheduler holds them until their start time passes, reports the
//! one that is currently articulating, and discards entries as they
//! expire. Expiry is purely time-based, never index-based, so batches
//! that arrive slightly out of order across ingest calls cannot make an
//! event fire out of order.

use std::collections::VecDeque;
use std::time::Duration;

use visage_core::FrameTime;

/// One scheduled mouth shape, anchored to the frame timeline.
/// Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlignmentEvent {
    /// The character being articulated.
    pub character: char,
    /// Absolute articulation start.
    pub start: FrameTime,
    /// Articulation length as delivered; the scheduler floors very
    /// short values at its configured minimum when expiring.
    pub duration: Duration,
}

impl AlignmentEvent {
    pub fn new(character: char, start: FrameTime, duration: Duration) -> Self {
        AlignmentEvent {
            character,
            start,
            duration,
        }
    }
}

/// Ordered queue of pending alignment events.
///
/// INVARIANT: entries are kept in non-decreasing `start` order, and
/// after any `step` no expired entry remains. At most one event is
/// active at an instant; it is always the earliest-start unexpired
/// entry.
#[derive(Debug)]
pub struct VisemeScheduler {
    queue: VecDeque<AlignmentEvent>,
    /// Floor applied to event durations so extremely brief hints stay
    /// visible for at least one animation tick.
    min_duration: Duration,
    expired: u64,
}

impl VisemeScheduler {
    pub fn new(min_duration: Duration) -> Self {
        VisemeScheduler {
            queue: VecDeque::new(),
            min_duration,
            expired: 0,
        }
    }

    /// Insert an event, preserving start order.
    ///
    /// Batches normally arrive monotonic, which makes this a pure
    /// append; an event that lands earlier than an already-queued one
    /// is placed before it instead. Equal starts keep arrival order.
    pub fn push(&mut self, event: AlignmentEvent) {
        let pos = self.queue.partition_point(|queued| queued.start <= event.start);
        if pos == self.queue.len() {
            self.queue.push_back(event);
        } else {
            self.queue.insert(pos, event);
        }
    }

    /// Advance to `now`: purge expired entries, then report the active
    /// event, if any.
    pub fn step(&mut self, now: FrameTime) -> Option<AlignmentEvent> {
        while let Some(head) = self.queue.front() {
            let hold = head.duration.max(self.min_duration);
            if head.start + hold < now {
                self.queue.pop_front();
                self.expired += 1;
            } else {
                break;
            }
        }

        match self.queue.front() {
            Some(head) if now >= head.start => Some(*head),
            _ => None,
        }
    }

    /// Discard every pending event. This is the cancellation point for
    /// the transition into idle; nothing queued here may render after.
    pub fn flush(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total events discarded by expiry (not by flush).
    pub fn expired(&self) -> u64 {
        self.expired
    }

    /// Remaining queue contents in start order.
    pub fn iter(&self) -> impl Iterator<Item = &AlignmentEvent> {
        self.queue.iter()
    }
}
