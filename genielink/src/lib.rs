//! Host-side link engine for ViSi-Genie smart displays
//!
//! The display shares one delimiter-free UART stream between three kinds
//! of inbound traffic: ACK/NAK bytes resolving host commands, report
//! frames answering read requests, and unsolicited event frames pushed
//! when the user touches an input object. This crate is the host's end of
//! that link: a polled, single-stepped state machine that sorts the three
//! apart, validates frame checksums, and queues completed frames for the
//! application.
//!
//! # Usage shape
//!
//! ```ignore
//! let mut genie = Genie::new(uart, clock);
//! genie.begin(9600);
//!
//! genie.write_object(Object::Led.to_u8(), 0, 1)?;
//! loop {
//!     genie.pump_once();
//!     while let Some(event) = genie.dequeue_event() {
//!         // react to button presses, slider moves, read reports ...
//!     }
//! }
//! ```
//!
//! The engine holds no internal synchronization; drive it from a single
//! logical thread, or serialize access externally.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod channel;
pub mod engine;
pub mod error;
pub mod link;
pub mod queue;

pub use channel::{ByteChannel, Clock};
pub use engine::{EventHandler, Genie, PumpStatus, DEFAULT_TIMEOUT_MS, RESYNC_PERIOD_MS};
pub use error::{Error, ErrorState, MAX_FATAL_ERRORS};
pub use link::{LinkStack, LinkState, LINK_STACK_DEPTH};
pub use queue::{EventQueue, MAX_EVENTS};

// Re-export the wire-format crate for convenience
pub use genielink_protocol as protocol;
pub use genielink_protocol::{Frame, HostCommand, Object};
