//! Transport and time capabilities.
//!
//! The engine never touches hardware directly: the host supplies a byte
//! transport and a millisecond clock through these traits. Concrete UART
//! backends live with the host application or its HAL.

/// Non-blocking byte transport to the display.
///
/// Reads must never block; writes may block or buffer per the underlying
/// transport (the engine transmits at most one encoded command at a time).
pub trait ByteChannel {
    /// Read one pending byte, or `None` if nothing has arrived
    fn try_read_byte(&mut self) -> Option<u8>;

    /// Send one byte to the display
    fn write_byte(&mut self, byte: u8);

    /// Apply the link baud rate to the underlying transport
    fn configure(&mut self, baudrate: u32);

    /// Send a run of bytes in order
    fn write_all(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }
}

/// Monotonic millisecond time source.
///
/// The value wraps at the platform word size; all timeout arithmetic in
/// the engine uses wrapping subtraction and stays correct across the wrap.
pub trait Clock {
    /// Current time in milliseconds
    fn now_millis(&self) -> u32;
}

impl<T: ByteChannel + ?Sized> ByteChannel for &mut T {
    fn try_read_byte(&mut self) -> Option<u8> {
        (**self).try_read_byte()
    }

    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte)
    }

    fn configure(&mut self, baudrate: u32) {
        (**self).configure(baudrate)
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_millis(&self) -> u32 {
        (**self).now_millis()
    }
}
