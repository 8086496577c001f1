//! Link error model.
//!
//! Errors are recorded per engine instance and surfaced through return
//! values; nothing panics or aborts. A cumulative fatal counter tracks hard
//! failures so the host can decide when to force a resync, but crossing the
//! threshold never halts the engine on its own.

use genielink_protocol::FrameError;

/// Fatal-error count above which [`ErrorState::fatal_threshold_exceeded`]
/// reports escalation
pub const MAX_FATAL_ERRORS: u16 = 10;

/// Errors surfaced by the link engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A received frame's bytes did not XOR to zero
    BadChecksum,
    /// The display rejected a command
    Nak,
    /// The link did not go idle within the timeout budget
    Timeout,
    /// A frame arrived with no room left in the event queue
    QueueOverflow,
    /// A byte the current link state cannot accept, or link state nested
    /// deeper than the stack allows
    ProtocolViolation,
    /// String payload exceeds the protocol's one-byte length field
    StringTooLong,
}

impl From<FrameError> for Error {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::BadChecksum => Error::BadChecksum,
            FrameError::StringTooLong => Error::StringTooLong,
        }
    }
}

/// Last-error slot plus cumulative failure counters
#[derive(Debug, Clone, Default)]
pub struct ErrorState {
    last: Option<Error>,
    timeouts: u16,
    fatals: u16,
}

impl ErrorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error and bump the matching counter
    pub fn record(&mut self, error: Error) {
        self.last = Some(error);
        match error {
            Error::Timeout => self.timeouts = self.timeouts.saturating_add(1),
            Error::BadChecksum | Error::QueueOverflow | Error::ProtocolViolation => {
                self.fatals = self.fatals.saturating_add(1)
            }
            // NAK and oversized strings are the peer's / caller's doing,
            // not link faults
            Error::Nak | Error::StringTooLong => {}
        }
    }

    /// Clear the last-error slot at the start of a logical operation.
    /// Counters are cumulative and survive.
    pub fn clear_last(&mut self) {
        self.last = None;
    }

    /// Most recent error since the last clear
    pub fn last(&self) -> Option<Error> {
        self.last
    }

    /// Number of idle-wait timeouts since construction or resync
    pub fn timeout_count(&self) -> u16 {
        self.timeouts
    }

    /// Zeroed by a resync once the link is re-established
    pub fn reset_timeouts(&mut self) {
        self.timeouts = 0;
    }

    /// Number of hard failures since construction
    pub fn fatal_error_count(&self) -> u16 {
        self.fatals
    }

    /// Escalation signal for the host; the engine keeps running regardless
    pub fn fatal_threshold_exceeded(&self) -> bool {
        self.fatals > MAX_FATAL_ERRORS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_clear() {
        let mut state = ErrorState::new();
        assert_eq!(state.last(), None);

        state.record(Error::Nak);
        assert_eq!(state.last(), Some(Error::Nak));

        state.clear_last();
        assert_eq!(state.last(), None);
    }

    #[test]
    fn test_counters() {
        let mut state = ErrorState::new();
        state.record(Error::Timeout);
        state.record(Error::Timeout);
        state.record(Error::BadChecksum);
        state.record(Error::Nak);

        assert_eq!(state.timeout_count(), 2);
        assert_eq!(state.fatal_error_count(), 1);
    }

    #[test]
    fn test_fatal_threshold() {
        let mut state = ErrorState::new();
        for _ in 0..MAX_FATAL_ERRORS {
            state.record(Error::BadChecksum);
        }
        assert!(!state.fatal_threshold_exceeded());

        state.record(Error::QueueOverflow);
        assert!(state.fatal_threshold_exceeded());
    }

    #[test]
    fn test_reset_timeouts() {
        let mut state = ErrorState::new();
        state.record(Error::Timeout);
        state.record(Error::BadChecksum);
        state.reset_timeouts();

        assert_eq!(state.timeout_count(), 0);
        // Fatal count is not a resync casualty
        assert_eq!(state.fatal_error_count(), 1);
    }
}
