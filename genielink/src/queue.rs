//! Completed-frame queue.
//!
//! Decouples frame reception from consumption: the pump enqueues frames as
//! their checksum byte lands, the host drains them whenever it gets around
//! to it (typically from its event handler).

use heapless::Deque;

use genielink_protocol::Frame;

use crate::error::Error;

/// Fixed queue capacity
pub const MAX_EVENTS: usize = 16;

/// FIFO queue of received frames.
///
/// Nothing is dropped silently on the consumer side; the producer side
/// refuses new frames at capacity and the engine records the overflow.
#[derive(Debug, Default)]
pub struct EventQueue {
    frames: Deque<Frame, MAX_EVENTS>,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame, failing at capacity without touching existing
    /// entries
    pub fn try_enqueue(&mut self, frame: Frame) -> Result<(), Error> {
        self.frames
            .push_back(frame)
            .map_err(|_| Error::QueueOverflow)
    }

    /// Remove and return the oldest frame
    pub fn try_dequeue(&mut self) -> Option<Frame> {
        self.frames.pop_front()
    }

    /// Discard all queued frames
    pub fn flush(&mut self) {
        self.frames.clear();
    }

    /// Number of frames waiting
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True if no frames are waiting
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// True if another enqueue would fail
    pub fn is_full(&self) -> bool {
        self.frames.is_full()
    }
}
