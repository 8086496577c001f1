//! Frame representation and byte-at-a-time accumulation.
//!
//! Inbound report and event frames share one 6-byte layout:
//! `[cmd][object][index][data_msb][data_lsb][checksum]` where the checksum
//! is the XOR of the five payload bytes. Whether a completed frame is a
//! report reply or an unsolicited event is not encoded in the frame itself;
//! the link layer knows from the state that was active while the frame was
//! being received.

/// Positive acknowledgement of a host command
pub const ACK: u8 = 0x06;

/// Negative acknowledgement of a host command
pub const NAK: u8 = 0x15;

/// First byte of a report frame (reply to a read request)
pub const REPORT_OBJ: u8 = 0x05;

/// First byte of an event frame (unsolicited notification)
pub const REPORT_EVENT: u8 = 0x07;

/// Complete frame size on the wire, checksum included
pub const FRAME_SIZE: usize = 6;

/// Errors that can occur while accumulating or encoding frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Frame bytes did not XOR to zero
    BadChecksum,
    /// String payload exceeds the 255-byte length field
    StringTooLong,
}

/// A complete, checksum-validated frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Command code (`REPORT_OBJ` or `REPORT_EVENT` for inbound frames)
    pub cmd: u8,
    /// Object type the frame refers to
    pub object: u8,
    /// Object index (which instance of the object type)
    pub index: u8,
    /// High byte of the object value
    pub data_msb: u8,
    /// Low byte of the object value
    pub data_lsb: u8,
}

impl Frame {
    /// Create a frame from its payload fields
    pub fn new(cmd: u8, object: u8, index: u8, data_msb: u8, data_lsb: u8) -> Self {
        Self {
            cmd,
            object,
            index,
            data_msb,
            data_lsb,
        }
    }

    /// Combined object value.
    ///
    /// The display transmits the value big-endian; this folds the two data
    /// bytes back into a single `u16`.
    pub fn data(&self) -> u16 {
        (u16::from(self.data_msb) << 8) | u16::from(self.data_lsb)
    }

    /// True if the command, object and index fields all match.
    ///
    /// Event handlers use this to pick the frames they care about out of
    /// the queue.
    pub fn matches(&self, cmd: u8, object: u8, index: u8) -> bool {
        self.cmd == cmd && self.object == object && self.index == index
    }

    /// XOR checksum over the five payload bytes
    pub fn checksum(&self) -> u8 {
        self.cmd ^ self.object ^ self.index ^ self.data_msb ^ self.data_lsb
    }

    /// Encode this frame as it would appear on the wire
    pub fn encode(&self) -> [u8; FRAME_SIZE] {
        [
            self.cmd,
            self.object,
            self.index,
            self.data_msb,
            self.data_lsb,
            self.checksum(),
        ]
    }
}

/// Byte-at-a-time frame builder.
///
/// The link engine is polled one byte per call, so the accumulator has to
/// carry its progress across calls: buffered bytes, the write position and
/// the running XOR. Feeding the sixth byte either yields a validated
/// [`Frame`] or fails with [`FrameError::BadChecksum`]; both outcomes leave
/// the accumulator reset and ready for a fresh frame.
#[derive(Debug, Clone, Default)]
pub struct FrameAccumulator {
    buf: [u8; FRAME_SIZE],
    count: usize,
    checksum: u8,
}

impl FrameAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard any partial frame and start over
    pub fn reset(&mut self) {
        self.count = 0;
        self.checksum = 0;
    }

    /// Number of bytes accumulated so far
    pub fn len(&self) -> usize {
        self.count
    }

    /// True if no bytes have been accumulated
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Feed a single byte.
    ///
    /// Returns `Ok(Some(frame))` when the byte completes a valid frame,
    /// `Ok(None)` when more bytes are needed, or `Err(BadChecksum)` when
    /// the final byte fails validation.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        self.checksum = if self.count == 0 {
            byte
        } else {
            self.checksum ^ byte
        };
        self.buf[self.count] = byte;

        if self.count == FRAME_SIZE - 1 {
            let checksum = self.checksum;
            self.reset();
            if checksum == 0 {
                Ok(Some(Frame::new(
                    self.buf[0], self.buf[1], self.buf[2], self.buf[3], self.buf[4],
                )))
            } else {
                Err(FrameError::BadChecksum)
            }
        } else {
            self.count += 1;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_frame_data_big_endian() {
        let frame = Frame::new(REPORT_OBJ, 4, 0, 0xAB, 0xCD);
        assert_eq!(frame.data(), 0xABCD);
    }

    #[test]
    fn test_frame_matches() {
        let frame = Frame::new(REPORT_EVENT, 6, 2, 0, 1);
        assert!(frame.matches(REPORT_EVENT, 6, 2));
        assert!(!frame.matches(REPORT_OBJ, 6, 2));
        assert!(!frame.matches(REPORT_EVENT, 5, 2));
        assert!(!frame.matches(REPORT_EVENT, 6, 3));
    }

    #[test]
    fn test_encode_xors_to_zero() {
        let frame = Frame::new(REPORT_EVENT, 1, 2, 3, 4);
        let bytes = frame.encode();
        assert_eq!(bytes.iter().fold(0u8, |acc, b| acc ^ b), 0);
    }

    #[test]
    fn test_accumulator_valid_frame() {
        let frame = Frame::new(REPORT_EVENT, 6, 0, 0x01, 0x00);
        let bytes = frame.encode();

        let mut acc = FrameAccumulator::new();
        for &byte in &bytes[..FRAME_SIZE - 1] {
            assert_eq!(acc.feed(byte), Ok(None));
        }
        let parsed = acc.feed(bytes[FRAME_SIZE - 1]).unwrap().unwrap();
        assert_eq!(parsed, frame);
        assert!(acc.is_empty());
    }

    #[test]
    fn test_accumulator_bad_checksum() {
        let mut bytes = Frame::new(REPORT_EVENT, 6, 0, 0x01, 0x00).encode();
        bytes[FRAME_SIZE - 1] ^= 0xFF;

        let mut acc = FrameAccumulator::new();
        let mut result = Ok(None);
        for &byte in &bytes {
            result = acc.feed(byte);
        }
        assert_eq!(result, Err(FrameError::BadChecksum));
        // Failure leaves the accumulator reset, not stalled
        assert!(acc.is_empty());
    }

    #[test]
    fn test_accumulator_back_to_back_frames() {
        let first = Frame::new(REPORT_EVENT, 1, 0, 0, 5);
        let second = Frame::new(REPORT_OBJ, 4, 1, 0x12, 0x34);

        let mut acc = FrameAccumulator::new();
        let mut frames = [None, None];
        let mut n = 0;
        for &byte in first.encode().iter().chain(second.encode().iter()) {
            if let Some(frame) = acc.feed(byte).unwrap() {
                frames[n] = Some(frame);
                n += 1;
            }
        }
        assert_eq!(frames[0], Some(first));
        assert_eq!(frames[1], Some(second));
    }

    proptest! {
        #[test]
        fn accumulator_accepts_any_valid_frame(
            cmd in any::<u8>(),
            object in any::<u8>(),
            index in any::<u8>(),
            msb in any::<u8>(),
            lsb in any::<u8>(),
        ) {
            let frame = Frame::new(cmd, object, index, msb, lsb);
            let mut acc = FrameAccumulator::new();
            let mut out = None;
            for &byte in &frame.encode() {
                out = acc.feed(byte).unwrap();
            }
            prop_assert_eq!(out, Some(frame));
        }

        #[test]
        fn accumulator_rejects_corrupt_trailer(
            cmd in any::<u8>(),
            object in any::<u8>(),
            index in any::<u8>(),
            msb in any::<u8>(),
            lsb in any::<u8>(),
            flip in 1u8..=255,
        ) {
            let mut bytes = Frame::new(cmd, object, index, msb, lsb).encode();
            bytes[FRAME_SIZE - 1] ^= flip;

            let mut acc = FrameAccumulator::new();
            let mut result = Ok(None);
            for &byte in &bytes {
                result = acc.feed(byte);
            }
            prop_assert_eq!(result, Err(FrameError::BadChecksum));
        }
    }
}
