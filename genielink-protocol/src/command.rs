//! Outbound command encoding.
//!
//! Host-to-display commands are not fixed-size: reads are 4 bytes, writes
//! 6, and string writes carry a length byte plus up to 255 payload bytes.
//! Every command ends with the XOR checksum of everything before it.

use heapless::Vec;

use crate::frame::FrameError;

/// Read the current value of an object
pub const READ_OBJ: u8 = 0x00;

/// Write a 16-bit value to an object
pub const WRITE_OBJ: u8 = 0x01;

/// Write an ASCII string to a string object
pub const WRITE_STR: u8 = 0x02;

/// Write a Unicode string to a string object
pub const WRITE_STRU: u8 = 0x03;

/// Set the display contrast / backlight level
pub const WRITE_CONTRAST: u8 = 0x04;

/// Largest encoded command: string write with a full 255-byte payload
/// (opcode + index + length + payload + checksum)
pub const MAX_COMMAND_SIZE: usize = 3 + 255 + 1;

/// Longest string accepted by the one-byte length field
pub const MAX_STRING_LEN: usize = 255;

/// Commands the host can issue to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand<'a> {
    /// Request the current value of an object; the display answers with a
    /// report frame
    ReadObject { object: u8, index: u8 },
    /// Set an object's 16-bit value; the display answers ACK or NAK
    WriteObject { object: u8, index: u8, value: u16 },
    /// Set the contrast (0-15, panel dependent); answered ACK or NAK
    WriteContrast { value: u8 },
    /// Write an ASCII string to string object `index`; answered ACK or NAK
    WriteStr { index: u8, text: &'a str },
    /// Write a Unicode string to string object `index`; answered ACK or NAK.
    ///
    /// Same byte-wise payload as [`HostCommand::WriteStr`], only the opcode
    /// differs; the display interprets the bytes per its configured font.
    WriteStrUnicode { index: u8, text: &'a str },
}

impl<'a> HostCommand<'a> {
    /// True if the display answers this command with a report frame rather
    /// than a bare ACK/NAK byte
    pub fn expects_report(&self) -> bool {
        matches!(self, HostCommand::ReadObject { .. })
    }

    /// Encode this command, checksum trailer included.
    ///
    /// Fails with [`FrameError::StringTooLong`] before producing any bytes
    /// if a string payload exceeds the length field.
    pub fn encode(&self) -> Result<Vec<u8, MAX_COMMAND_SIZE>, FrameError> {
        let mut out = Vec::new();
        match *self {
            HostCommand::ReadObject { object, index } => {
                push_all(&mut out, &[READ_OBJ, object, index]);
            }
            HostCommand::WriteObject {
                object,
                index,
                value,
            } => {
                let [msb, lsb] = value.to_be_bytes();
                push_all(&mut out, &[WRITE_OBJ, object, index, msb, lsb]);
            }
            HostCommand::WriteContrast { value } => {
                push_all(&mut out, &[WRITE_CONTRAST, value]);
            }
            HostCommand::WriteStr { index, text } => {
                encode_string(&mut out, WRITE_STR, index, text)?;
            }
            HostCommand::WriteStrUnicode { index, text } => {
                encode_string(&mut out, WRITE_STRU, index, text)?;
            }
        }

        let checksum = out.iter().fold(0u8, |acc, b| acc ^ b);
        push_all(&mut out, &[checksum]);
        Ok(out)
    }
}

fn encode_string(
    out: &mut Vec<u8, MAX_COMMAND_SIZE>,
    opcode: u8,
    index: u8,
    text: &str,
) -> Result<(), FrameError> {
    let bytes = text.as_bytes();
    if bytes.len() > MAX_STRING_LEN {
        return Err(FrameError::StringTooLong);
    }
    push_all(out, &[opcode, index, bytes.len() as u8]);
    push_all(out, bytes);
    Ok(())
}

// Capacity is sized for the largest command, so pushes cannot fail
fn push_all(out: &mut Vec<u8, MAX_COMMAND_SIZE>, bytes: &[u8]) {
    let _ = out.extend_from_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_object_encoding() {
        let bytes = HostCommand::ReadObject { object: 6, index: 0 }
            .encode()
            .unwrap();
        assert_eq!(&bytes[..], &[READ_OBJ, 6, 0, READ_OBJ ^ 6 ^ 0]);
    }

    #[test]
    fn test_write_object_encoding() {
        let bytes = HostCommand::WriteObject {
            object: 3,
            index: 0,
            value: 0xABCD,
        }
        .encode()
        .unwrap();
        assert_eq!(
            &bytes[..],
            &[WRITE_OBJ, 3, 0, 0xAB, 0xCD, WRITE_OBJ ^ 3 ^ 0 ^ 0xAB ^ 0xCD]
        );
    }

    #[test]
    fn test_write_contrast_encoding() {
        let bytes = HostCommand::WriteContrast { value: 7 }.encode().unwrap();
        assert_eq!(&bytes[..], &[WRITE_CONTRAST, 7, WRITE_CONTRAST ^ 7]);
    }

    #[test]
    fn test_write_str_encoding() {
        let bytes = HostCommand::WriteStr { index: 1, text: "HI" }
            .encode()
            .unwrap();
        assert_eq!(
            &bytes[..],
            &[WRITE_STR, 1, 2, b'H', b'I', WRITE_STR ^ 1 ^ 2 ^ b'H' ^ b'I']
        );
    }

    #[test]
    fn test_write_str_unicode_uses_distinct_opcode() {
        let ascii = HostCommand::WriteStr { index: 0, text: "A" }
            .encode()
            .unwrap();
        let unicode = HostCommand::WriteStrUnicode { index: 0, text: "A" }
            .encode()
            .unwrap();
        assert_eq!(ascii[0], WRITE_STR);
        assert_eq!(unicode[0], WRITE_STRU);
        assert_eq!(&ascii[1..ascii.len() - 1], &unicode[1..unicode.len() - 1]);
    }

    #[test]
    fn test_string_too_long_rejected() {
        let long = core::str::from_utf8(&[b'x'; 256]).unwrap();
        let result = HostCommand::WriteStr { index: 0, text: long }.encode();
        assert_eq!(result, Err(FrameError::StringTooLong));
    }

    #[test]
    fn test_max_length_string_accepted() {
        let text = core::str::from_utf8(&[b'x'; 255]).unwrap();
        let bytes = HostCommand::WriteStr { index: 0, text }.encode().unwrap();
        assert_eq!(bytes.len(), MAX_COMMAND_SIZE);
        assert_eq!(bytes[2], 255);
        assert_eq!(bytes.iter().fold(0u8, |acc, b| acc ^ b), 0);
    }

    #[test]
    fn test_expects_report() {
        assert!(HostCommand::ReadObject { object: 0, index: 0 }.expects_report());
        assert!(!HostCommand::WriteContrast { value: 1 }.expects_report());
        assert!(!HostCommand::WriteStr { index: 0, text: "" }.expects_report());
    }
}
