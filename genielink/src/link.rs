//! Logical link state and the save/restore stack.
//!
//! The display may push an unsolicited event frame at any moment, including
//! in the middle of an ACK wait or before a report header arrives. The link
//! keeps a small FILO stack of states so the receive path can save what it
//! was doing, take the whole event frame, and resume exactly where it left
//! off.

use crate::error::Error;

/// Maximum link-state nesting, the bottom `Idle` sentinel included
pub const LINK_STACK_DEPTH: usize = 5;

/// Logical state of the link to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Nothing outstanding; only an event header is acceptable
    Idle,
    /// A write-class command is out; expecting ACK or NAK
    WaitAckNak,
    /// A read is out; expecting the first byte of a report frame
    WaitReportHeader,
    /// Accumulating the body of a report frame
    ReceivingReport,
    /// Accumulating the body of an event frame
    ReceivingEvent,
    /// Host-forced halt; all inbound bytes are discarded
    Shutdown,
}

impl LinkState {
    /// True while a frame body is being accumulated
    pub fn is_receiving(&self) -> bool {
        matches!(self, LinkState::ReceivingReport | LinkState::ReceivingEvent)
    }
}

/// Bounded FILO stack of link states.
///
/// The bottom entry is always present and starts as `Idle`; `pop` refuses
/// to remove it. `push` is fallible: nesting past the fixed depth is a
/// protocol violation, never silent corruption.
#[derive(Debug, Clone)]
pub struct LinkStack {
    states: [LinkState; LINK_STACK_DEPTH],
    top: usize,
}

impl Default for LinkStack {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkStack {
    /// Create a stack holding the single `Idle` sentinel
    pub fn new() -> Self {
        Self {
            states: [LinkState::Idle; LINK_STACK_DEPTH],
            top: 0,
        }
    }

    /// State on top of the stack
    pub fn current(&self) -> LinkState {
        self.states[self.top]
    }

    /// Overwrite the top state in place (no depth change)
    pub fn set(&mut self, state: LinkState) {
        self.states[self.top] = state;
    }

    /// Save the current state and make `state` current
    pub fn push(&mut self, state: LinkState) -> Result<(), Error> {
        if self.top + 1 >= LINK_STACK_DEPTH {
            return Err(Error::ProtocolViolation);
        }
        self.top += 1;
        self.states[self.top] = state;
        Ok(())
    }

    /// Restore the previously saved state. Popping the bottom sentinel is
    /// a no-op.
    pub fn pop(&mut self) {
        if self.top > 0 {
            self.top -= 1;
        }
    }

    /// Number of states on the stack, sentinel included
    pub fn depth(&self) -> usize {
        self.top + 1
    }

    /// Drop everything back to a single `Idle` entry
    pub fn reset(&mut self) {
        self.top = 0;
        self.states[0] = LinkState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let stack = LinkStack::new();
        assert_eq!(stack.current(), LinkState::Idle);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_push_pop_restores() {
        let mut stack = LinkStack::new();
        stack.push(LinkState::WaitAckNak).unwrap();
        stack.push(LinkState::ReceivingEvent).unwrap();
        assert_eq!(stack.current(), LinkState::ReceivingEvent);

        stack.pop();
        assert_eq!(stack.current(), LinkState::WaitAckNak);
        stack.pop();
        assert_eq!(stack.current(), LinkState::Idle);
    }

    #[test]
    fn test_pop_never_removes_sentinel() {
        let mut stack = LinkStack::new();
        stack.pop();
        stack.pop();
        assert_eq!(stack.current(), LinkState::Idle);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut stack = LinkStack::new();
        stack.push(LinkState::WaitReportHeader).unwrap();
        stack.set(LinkState::ReceivingReport);
        assert_eq!(stack.current(), LinkState::ReceivingReport);
        assert_eq!(stack.depth(), 2);

        stack.pop();
        assert_eq!(stack.current(), LinkState::Idle);
    }

    #[test]
    fn test_push_overflow_is_fallible() {
        let mut stack = LinkStack::new();
        for _ in 0..LINK_STACK_DEPTH - 1 {
            stack.push(LinkState::ReceivingEvent).unwrap();
        }
        assert_eq!(stack.depth(), LINK_STACK_DEPTH);
        assert_eq!(
            stack.push(LinkState::ReceivingEvent),
            Err(Error::ProtocolViolation)
        );
        // Failed push leaves the stack intact
        assert_eq!(stack.depth(), LINK_STACK_DEPTH);
        assert_eq!(stack.current(), LinkState::ReceivingEvent);
    }

    #[test]
    fn test_reset() {
        let mut stack = LinkStack::new();
        stack.push(LinkState::WaitAckNak).unwrap();
        stack.push(LinkState::ReceivingEvent).unwrap();
        stack.reset();
        assert_eq!(stack.current(), LinkState::Idle);
        assert_eq!(stack.depth(), 1);
    }
}
