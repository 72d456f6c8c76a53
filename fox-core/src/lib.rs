//! Board-agnostic core logic for the fox beacon firmware
//!
//! This crate contains all application logic that does not depend on a
//! specific microcontroller:
//!
//! - Morse symbol table and the tick-driven encoder state machine
//! - Log-structured message store over a raw NOR flash sector
//! - Line editor and command dispatcher for the serial console
//! - The beacon application context tying them together
//! - Configuration type definitions
//!
//! Hardware is reached only through the `fox-hal` traits, so everything
//! here runs in host tests against simulated devices.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

// Must come first so the logging macros are visible to later modules
#[macro_use]
mod fmt;

pub mod beacon;
pub mod config;
pub mod message;
pub mod morse;
pub mod store;

#[cfg(test)]
pub(crate) mod sim;

pub use beacon::{Beacon, Board, Event, Parts, PendingEvents};
pub use config::{BeaconConfig, ConfigError};
pub use message::{Message, INVALID_SYMBOL, MESSAGE_CAPACITY};
pub use morse::{Encoder, Level};
pub use store::{LogStore, StoreError, PAGE_COUNT, PAGE_SIZE};
