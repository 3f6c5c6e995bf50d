//! Session Inbox - bounded mailbox between session callbacks and frames
//!
//! The session client may run its callbacks on another thread; the
//! engine drains this queue at the start of every frame step, so queue
//! hand-off is the only point of contact between the two. A full inbox
//! drops new events instead of blocking the session layer.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use visage_core::{FrameTime, SessionEvent};

#[derive(Debug)]
struct Inner {
    queue: VecDeque<(SessionEvent, FrameTime)>,
    capacity: usize,
    pushed: u64,
    dropped: u64,
}

/// Consumer end, owned by the engine.
#[derive(Debug)]
pub struct SessionInbox {
    inner: Arc<Mutex<Inner>>,
}

/// Producer handle for session callbacks. Cheap to clone, safe to move
/// to another thread.
#[derive(Clone, Debug)]
pub struct SessionSender {
    inner: Arc<Mutex<Inner>>,
}

impl SessionInbox {
    pub fn new(capacity: usize) -> Self {
        SessionInbox {
            inner: Arc::new(Mutex::new(Inner {
                queue: VecDeque::new(),
                capacity,
                pushed: 0,
                dropped: 0,
            })),
        }
    }

    pub fn sender(&self) -> SessionSender {
        SessionSender {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Take every queued event, in arrival order.
    pub fn drain(&self) -> Vec<(SessionEvent, FrameTime)> {
        let mut inner = self.inner.lock();
        if inner.queue.is_empty() {
            return Vec::new();
        }
        inner.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().queue.is_empty()
    }

    /// Events accepted since creation.
    pub fn pushed(&self) -> u64 {
        self.inner.lock().pushed
    }

    /// Events discarded because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.inner.lock().dropped
    }
}

impl SessionSender {
    /// Queue an event stamped with its arrival time. Silently dropped
    /// (and counted) when the inbox is full.
    pub fn send(&self, event: SessionEvent, received_at: FrameTime) {
        let mut inner = self.inner.lock();
        if inner.queue.len() < inner.capacity {
            inner.queue.push_back((event, received_at));
            inner.pushed += 1;
        } else {
            inner.dropped += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visage_core::SpeakingMode;

    fn mode_event(mode: SpeakingMode) -> SessionEvent {
        SessionEvent::ModeChange(mode)
    }

    #[test]
    fn test_drain_preserves_order() {
        let inbox = SessionInbox::new(8);
        let sender = inbox.sender();

        sender.send(mode_event(SpeakingMode::Speaking), FrameTime::from_millis(1));
        sender.send(mode_event(SpeakingMode::Idle), FrameTime::from_millis(2));

        let drained = inbox.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].1, FrameTime::from_millis(1));
        assert_eq!(drained[1].1, FrameTime::from_millis(2));
        assert!(inbox.is_empty());
    }

    #[test]
    fn test_full_inbox_drops_and_counts() {
        let inbox = SessionInbox::new(2);
        let sender = inbox.sender();

        for i in 0..5 {
            sender.send(mode_event(SpeakingMode::Speaking), FrameTime::from_millis(i));
        }

        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox.pushed(), 2);
        assert_eq!(inbox.dropped(), 3);

        // Draining frees capacity again.
        inbox.drain();
        sender.send(mode_event(SpeakingMode::Idle), FrameTime::from_millis(9));
        assert_eq!(inbox.len(), 1);
    }

    #[test]
    fn test_send_from_another_thread() {
        let inbox = SessionInbox::new(16);
        let sender = inbox.sender();

        let handle = std::thread::spawn(move || {
            for i in 0..10 {
                sender.send(mode_event(SpeakingMode::Speaking), FrameTime::from_millis(i));
            }
        });
        handle.join().unwrap();

        assert_eq!(inbox.drain().len(), 10);
    }
}
