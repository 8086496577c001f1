//! The link engine.
//!
//! [`Genie`] is a single-stepped, cooperative state machine. The host calls
//! [`Genie::pump_once`] from its main loop; each call does at most one
//! byte's worth of work, and the link stack, frame accumulator and event
//! queue carry progress between calls. Three inbound message classes share
//! the wire with no delimiters: bare ACK/NAK bytes resolving an outstanding
//! write, 6-byte report frames answering a read, and unsolicited 6-byte
//! event frames the display pushes whenever an input object fires. The
//! current link state alone decides what a byte means.
//!
//! An event frame may interrupt an ACK wait or a report wait; the state
//! stack saves the interrupted state, the whole event frame is accumulated
//! and queued, and the interrupted wait resumes as if nothing happened.

use genielink_protocol::{
    Frame, FrameAccumulator, HostCommand, ACK, NAK, REPORT_EVENT, REPORT_OBJ,
};

use crate::channel::{ByteChannel, Clock};
use crate::error::{Error, ErrorState};
use crate::link::{LinkStack, LinkState};
use crate::queue::EventQueue;

/// Default idle-wait budget in milliseconds
pub const DEFAULT_TIMEOUT_MS: u32 = 1000;

/// Quiet period a resync waits out before flushing the link
pub const RESYNC_PERIOD_MS: u32 = 100;

/// Called during a pump when no byte is pending but frames are queued.
/// The handler is expected to drain the queue.
pub type EventHandler = fn(&mut EventQueue);

/// Outcome of one pump step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PumpStatus {
    /// No byte was pending
    NoActivity,
    /// One byte was read and processed, whatever the outcome
    ByteConsumed,
}

/// Host-side engine for one display link.
///
/// Owns all link state, so multiple independent displays are just multiple
/// `Genie` values. No internal synchronization: all calls must come from
/// one logical thread.
pub struct Genie<C: ByteChannel, K: Clock> {
    channel: C,
    clock: K,
    link: LinkStack,
    rx: FrameAccumulator,
    queue: EventQueue,
    errors: ErrorState,
    handler: Option<EventHandler>,
    timeout_ms: u32,
}

impl<C: ByteChannel, K: Clock> Genie<C, K> {
    /// Create an engine over the given transport and clock
    pub fn new(channel: C, clock: K) -> Self {
        Self {
            channel,
            clock,
            link: LinkStack::new(),
            rx: FrameAccumulator::new(),
            queue: EventQueue::new(),
            errors: ErrorState::new(),
            handler: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Configure the transport and reset the link to a clean idle state
    pub fn begin(&mut self, baudrate: u32) {
        self.channel.configure(baudrate);
        self.link.reset();
        self.rx.reset();
        self.queue.flush();
    }

    /// Attach the handler invoked when queued frames are waiting
    pub fn attach_event_handler(&mut self, handler: EventHandler) {
        self.handler = Some(handler);
    }

    /// Replace the idle-wait budget (default [`DEFAULT_TIMEOUT_MS`])
    pub fn set_timeout(&mut self, timeout_ms: u32) {
        self.timeout_ms = timeout_ms;
    }

    /// Current logical link state
    pub fn link_state(&self) -> LinkState {
        self.link.current()
    }

    /// Most recent error since the last command was issued
    pub fn last_error(&self) -> Option<Error> {
        self.errors.last()
    }

    /// Idle-wait timeouts since construction or resync
    pub fn timeout_count(&self) -> u16 {
        self.errors.timeout_count()
    }

    /// Hard failures since construction
    pub fn fatal_error_count(&self) -> u16 {
        self.errors.fatal_error_count()
    }

    /// True once enough hard failures have accumulated that the host
    /// should consider a [`Genie::resync`]
    pub fn fatal_threshold_exceeded(&self) -> bool {
        self.errors.fatal_threshold_exceeded()
    }

    /// Remove and return the oldest received frame
    pub fn dequeue_event(&mut self) -> Option<Frame> {
        self.queue.try_dequeue()
    }

    /// Number of received frames waiting to be dequeued
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Access the underlying transport
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Run the receive state machine for at most one byte.
    ///
    /// With no byte pending this invokes the event handler (once, if any
    /// frames are queued) and reports [`PumpStatus::NoActivity`].
    pub fn pump_once(&mut self) -> PumpStatus {
        let Some(byte) = self.channel.try_read_byte() else {
            if !self.queue.is_empty() {
                if let Some(handler) = self.handler {
                    handler(&mut self.queue);
                }
            }
            return PumpStatus::NoActivity;
        };

        let accumulate = match self.link.current() {
            LinkState::Idle => match byte {
                // Event frame out of the blue; the header byte is also the
                // first frame byte
                REPORT_EVENT => self.enter_event_frame(),
                _ => self.violation(),
            },
            LinkState::WaitAckNak => match byte {
                ACK => {
                    self.link.pop();
                    false
                }
                NAK => {
                    self.link.pop();
                    self.errors.record(Error::Nak);
                    false
                }
                // Event frame while waiting for the ACK; the wait resumes
                // after the frame completes
                REPORT_EVENT => self.enter_event_frame(),
                _ => self.violation(),
            },
            LinkState::WaitReportHeader => match byte {
                REPORT_EVENT => self.enter_event_frame(),
                REPORT_OBJ => {
                    // The report has started: swap the wait state for the
                    // receive state at the same stack depth
                    self.link.set(LinkState::ReceivingReport);
                    self.rx.reset();
                    true
                }
                _ => self.violation(),
            },
            // 2nd through Nth byte of a frame body
            LinkState::ReceivingReport | LinkState::ReceivingEvent => true,
            LinkState::Shutdown => false,
        };

        if accumulate {
            self.accumulate(byte);
        }
        PumpStatus::ByteConsumed
    }

    /// Busy-poll [`Genie::pump_once`] until the link goes idle.
    ///
    /// The wait is idle-debounced: every consumed byte extends the deadline
    /// by the full timeout, so it only gives up after a complete quiet
    /// period. A chatty peer can hold this open indefinitely, which is
    /// intended: a command must never be transmitted mid-frame.
    pub fn wait_for_idle(&mut self) -> Result<(), Error> {
        let mut last_activity = self.clock.now_millis();
        loop {
            if self.pump_once() == PumpStatus::ByteConsumed {
                last_activity = self.clock.now_millis();
            }
            if self.link.current() == LinkState::Idle {
                return Ok(());
            }
            if self.clock.now_millis().wrapping_sub(last_activity) >= self.timeout_ms {
                self.errors.record(Error::Timeout);
                return Err(Error::Timeout);
            }
        }
    }

    /// Ask for the current value of an object.
    ///
    /// Stale reply frames are flushed first; the report arrives through
    /// later pumps and lands in the event queue.
    pub fn read_object(&mut self, object: u8, index: u8) -> Result<(), Error> {
        self.queue.flush();
        self.send(HostCommand::ReadObject { object, index })
    }

    /// Write a 16-bit value to an object
    pub fn write_object(&mut self, object: u8, index: u8, value: u16) -> Result<(), Error> {
        self.send(HostCommand::WriteObject {
            object,
            index,
            value,
        })
    }

    /// Set the contrast / backlight level (0-15, panel dependent)
    pub fn write_contrast(&mut self, value: u8) -> Result<(), Error> {
        self.send(HostCommand::WriteContrast { value })
    }

    /// Write an ASCII string to string object `index`
    pub fn write_str(&mut self, index: u8, text: &str) -> Result<(), Error> {
        self.send(HostCommand::WriteStr { index, text })
    }

    /// Write a Unicode string to string object `index`
    pub fn write_str_unicode(&mut self, index: u8, text: &str) -> Result<(), Error> {
        self.send(HostCommand::WriteStrUnicode { index, text })
    }

    /// Force the link down; every subsequent inbound byte is discarded
    /// until a [`Genie::resync`]
    pub fn shutdown(&mut self) {
        self.link.set(LinkState::Shutdown);
    }

    /// Re-establish a clean link after errors.
    ///
    /// Sits out a quiet period so the display can finish talking, then
    /// drains the channel, flushes the queue, zeroes the timeout counter
    /// and drops the link back to idle.
    pub fn resync(&mut self) {
        let start = self.clock.now_millis();
        while self.clock.now_millis().wrapping_sub(start) < RESYNC_PERIOD_MS {}

        while self.channel.try_read_byte().is_some() {}
        self.queue.flush();
        self.rx.reset();
        self.errors.reset_timeouts();
        self.link.reset();
    }

    /// Transmit one encoded command and arm the matching wait state.
    ///
    /// Never blocks for the reply; resolution happens on later pumps. An
    /// idle-wait timeout aborts before anything is transmitted, keeping
    /// command bytes off a wire that still owes us a reply.
    fn send(&mut self, command: HostCommand<'_>) -> Result<(), Error> {
        let bytes = command.encode().map_err(Error::from)?;

        self.wait_for_idle()?;
        self.errors.clear_last();

        self.channel.write_all(&bytes);

        let wait = if command.expects_report() {
            LinkState::WaitReportHeader
        } else {
            LinkState::WaitAckNak
        };
        self.link.push(wait)
    }

    /// Begin accumulating an event frame, saving the interrupted state
    fn enter_event_frame(&mut self) -> bool {
        match self.link.push(LinkState::ReceivingEvent) {
            Ok(()) => {
                self.rx.reset();
                true
            }
            Err(err) => {
                self.errors.record(err);
                false
            }
        }
    }

    /// Record an unexpected byte and discard it, leaving state untouched
    fn violation(&mut self) -> bool {
        self.errors.record(Error::ProtocolViolation);
        false
    }

    /// Feed one byte of frame body; on the final byte either queue the
    /// frame or record the checksum failure, then restore the interrupted
    /// state either way (discard-and-resume recovery)
    fn accumulate(&mut self, byte: u8) {
        match self.rx.feed(byte) {
            Ok(Some(frame)) => {
                if let Err(err) = self.queue.try_enqueue(frame) {
                    self.errors.record(err);
                }
                self.link.pop();
            }
            Ok(None) => {}
            Err(_) => {
                self.errors.record(Error::BadChecksum);
                self.link.pop();
            }
        }
    }
}
