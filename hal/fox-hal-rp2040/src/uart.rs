//! Console transmitter
//!
//! Wraps the embassy-rp UART transmitter in the byte-at-a-time interface
//! the beacon uses. Each byte goes into the TX FIFO; transmit-complete is
//! the peripheral's busy flag dropping, i.e. the FIFO is empty and the
//! shift register idle.

use embassy_rp::uart::{self, Mode};
use fox_hal::uart::{DataBits, Parity, StopBits, UartConfig};
use fox_hal::{UartError, UartTx};

pub struct ConsoleTx<'d, M: Mode> {
    tx: uart::UartTx<'d, M>,
}

impl<'d, M: Mode> ConsoleTx<'d, M> {
    pub fn new(tx: uart::UartTx<'d, M>) -> Self {
        Self { tx }
    }

    /// Give back the embassy transmitter
    pub fn release(self) -> uart::UartTx<'d, M> {
        self.tx
    }
}

impl<M: Mode> UartTx for ConsoleTx<'_, M> {
    fn write_byte(&mut self, byte: u8) -> Result<(), UartError> {
        self.tx.blocking_write(&[byte]).map_err(map_error)
    }

    fn is_transmit_complete(&mut self) -> bool {
        !self.tx.busy()
    }
}

fn map_error(e: uart::Error) -> UartError {
    match e {
        uart::Error::Overrun => UartError::Overrun,
        uart::Error::Break => UartError::Break,
        uart::Error::Parity => UartError::Parity,
        uart::Error::Framing => UartError::Framing,
        _ => UartError::Other,
    }
}

/// Translate a console configuration into the embassy-rp one
pub fn embassy_config(config: &UartConfig) -> uart::Config {
    let mut cfg = uart::Config::default();
    cfg.baudrate = config.baudrate;
    cfg.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    cfg.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    cfg.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    cfg
}
