//! UART serial console abstractions
//!
//! The console is byte oriented. Transmission is synchronous: each byte is
//! handed to the peripheral and the caller waits for transmit-complete
//! before sending the next one. Reception is interrupt driven elsewhere;
//! the application only gates intake and discards stray input.

use crate::poll::{wait_until, Backoff};

/// Errors from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartError {
    /// Framing error
    Framing,
    /// Receiver overrun
    Overrun,
    /// Parity error
    Parity,
    /// Break condition on the line
    Break,
    /// Peripheral rejected the byte
    Other,
}

/// UART transmitter
pub trait UartTx {
    /// Hand one byte to the transmitter
    ///
    /// Does not wait for the byte to leave the wire.
    fn write_byte(&mut self, byte: u8) -> Result<(), UartError>;

    /// Whether the last byte has been shifted out
    fn is_transmit_complete(&mut self) -> bool;

    /// Write data to the UART
    ///
    /// Blocks until every byte has been transmitted. Between polls of the
    /// transmit-complete flag the `backoff` is invoked.
    fn write_blocking<B: Backoff>(&mut self, data: &[u8], backoff: &mut B) -> Result<(), UartError>
    where
        Self: Sized,
    {
        for &byte in data {
            self.write_byte(byte)?;
            wait_until(backoff, || self.is_transmit_complete());
        }
        Ok(())
    }
}

/// UART receiver control
pub trait UartRx {
    /// Enable intake of new characters
    fn listen(&mut self);

    /// Suppress intake; bytes arriving meanwhile are dropped
    fn unlisten(&mut self);

    /// Whether intake is enabled
    fn is_listening(&self) -> bool;

    /// Discard anything already received but not yet handled
    ///
    /// Returns the number of bytes thrown away.
    fn drain(&mut self) -> usize;
}

/// UART configuration
#[derive(Debug, Clone, Copy)]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl UartConfig {
    /// 8N1 at the given baud rate
    pub const fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::with_baudrate(9600)
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poll::Spin;

    /// Transmitter that needs `latency` polls per byte
    struct SlowTx {
        sent: [u8; 8],
        len: usize,
        latency: u8,
        pending: u8,
        polls: u32,
    }

    impl UartTx for SlowTx {
        fn write_byte(&mut self, byte: u8) -> Result<(), UartError> {
            if self.pending != 0 {
                return Err(UartError::Other);
            }
            self.sent[self.len] = byte;
            self.len += 1;
            self.pending = self.latency;
            Ok(())
        }

        fn is_transmit_complete(&mut self) -> bool {
            self.polls += 1;
            if self.pending == 0 {
                true
            } else {
                self.pending -= 1;
                false
            }
        }
    }

    #[test]
    fn test_write_blocking_waits_per_byte() {
        let mut tx = SlowTx {
            sent: [0; 8],
            len: 0,
            latency: 2,
            pending: 0,
            polls: 0,
        };

        tx.write_blocking(b"CQ", &mut Spin).unwrap();

        assert_eq!(&tx.sent[..tx.len], b"CQ");
        // Two failed polls and one successful poll per byte
        assert_eq!(tx.polls, 6);
    }

    #[test]
    fn test_default_config_is_8n1() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate, 9600);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
    }
}
