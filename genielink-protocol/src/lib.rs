//! ViSi-Genie wire protocol
//!
//! This crate defines the UART-based protocol between a host controller and
//! a Genie smart-display module. The display pushes unsolicited event frames
//! (button presses, slider moves) and answers read requests with report
//! frames; writes are answered with a bare ACK/NAK byte.
//!
//! # Frame format
//!
//! All multi-byte traffic uses one fixed 6-byte frame:
//! ```text
//! ┌─────┬────────┬───────┬──────────┬──────────┬──────────┐
//! │ CMD │ OBJECT │ INDEX │ DATA MSB │ DATA LSB │ CHECKSUM │
//! │ 1B  │ 1B     │ 1B    │ 1B       │ 1B       │ 1B       │
//! └─────┴────────┴───────┴──────────┴──────────┴──────────┘
//! ```
//!
//! The checksum is the XOR of the five preceding bytes, so every valid
//! frame XORs to zero. There is no start delimiter: the first byte of a
//! frame doubles as its command code, and the link layer decides from its
//! own state whether a given byte opens a frame or resolves a pending
//! command.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod command;
pub mod frame;
pub mod object;

pub use command::{HostCommand, MAX_COMMAND_SIZE};
pub use frame::{Frame, FrameAccumulator, FrameError, ACK, FRAME_SIZE, NAK, REPORT_EVENT, REPORT_OBJ};
pub use object::Object;
