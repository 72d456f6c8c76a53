//! Blocking serial console output

use fox_hal::{Backoff, UartError, UartRx, UartTx};

use crate::message::printable;

/// ANSI cursor-forward sequence
pub const CURSOR_RIGHT: &[u8] = b"\x1b[C";

/// Serial port plus the strategy used while waiting on it
///
/// Output errors are logged and swallowed: a glitch on the console must
/// never stop the beacon.
pub struct Console<S, B> {
    serial: S,
    backoff: B,
}

impl<S, B> Console<S, B>
where
    S: UartTx + UartRx,
    B: Backoff,
{
    pub fn new(serial: S, backoff: B) -> Self {
        Self { serial, backoff }
    }

    /// Send bytes as they are
    pub fn write(&mut self, bytes: &[u8]) {
        if let Err(e) = self.try_write(bytes) {
            warn!("console: write failed: {}", e);
        }
    }

    pub fn try_write(&mut self, bytes: &[u8]) -> Result<(), UartError> {
        self.serial.write_blocking(bytes, &mut self.backoff)
    }

    /// Send bytes with everything but symbols shown as spaces
    pub fn write_printable(&mut self, bytes: &[u8]) {
        self.write_mapped(bytes, printable);
    }

    /// Send bytes after passing each through `map`
    pub fn write_mapped(&mut self, bytes: &[u8], map: impl Fn(u8) -> u8) {
        let mut chunk = [0u8; 32];
        for part in bytes.chunks(chunk.len()) {
            for (dst, &src) in chunk.iter_mut().zip(part) {
                *dst = map(src);
            }
            self.write(&chunk[..part.len()]);
        }
    }

    pub fn serial(&self) -> &S {
        &self.serial
    }

    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    pub fn backoff(&self) -> &B {
        &self.backoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::INVALID_SYMBOL;
    use crate::sim::{CountingBackoff, SimSerial};

    #[test]
    fn test_printable_masks() {
        let mut console = Console::new(SimSerial::default(), CountingBackoff::default());
        console.write_printable(&[b'C', INVALID_SYMBOL, b'Q', 0x00]);
        assert_eq!(console.serial_mut().take_sent(), b"C Q ");
    }

    #[test]
    fn test_long_output_chunked() {
        let mut console = Console::new(SimSerial::default(), CountingBackoff::default());
        let text = [b'E'; 100];
        console.write_printable(&text);
        assert_eq!(console.serial_mut().take_sent(), text.to_vec());
    }

    #[test]
    fn test_waits_for_each_byte() {
        let mut serial = SimSerial::default();
        serial.tx_latency = 3;
        let mut console = Console::new(serial, CountingBackoff::default());
        console.write(b"OK");
        assert_eq!(console.backoff().snoozes, 6);
        assert_eq!(console.serial_mut().take_sent(), b"OK");
    }
}
