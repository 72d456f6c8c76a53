//! RP2040-specific HAL for the fox beacon firmware
//!
//! Implementations of the `fox-hal` traits on top of embassy-rp:
//!
//! - User-data flash sector (implements `fox_hal::NvRegion`)
//! - Blocking console transmitter (implements `fox_hal::UartTx`)
//! - Keying line over any `embedded-hal` output pin
//! - Cortex-M system reset

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;
pub mod system;
pub mod uart;

pub use flash::{user_region, UserRegion};
pub use gpio::KeyLine;
pub use system::CortexReset;
pub use uart::{embassy_config, ConsoleTx};
