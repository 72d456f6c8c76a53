//! Fox Hardware Abstraction Layer
//!
//! This crate defines the platform traits the beacon logic needs from a
//! board. Chip-specific HALs (currently RP2040) implement them, and the
//! host test suites implement them with simulated devices.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  fox-firmware (embassy tasks, wiring)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  fox-core (encoder, store, editor)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  fox-hal (this crate - traits)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ fox-hal-rp2040│
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Keying output
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial console
//! - [`timer::Timer`] - Unit tick and idle-to-beacon timers
//! - [`flash::NvRegion`] - Raw non-volatile byte region
//! - [`system::SystemReset`] - Unconditional reset
//! - [`poll::Backoff`] - Strategy for busy-wait loops

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;
pub mod poll;
pub mod system;
pub mod timer;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use flash::{FlashError, NorRegion, NvRegion, ERASED};
pub use gpio::OutputPin;
pub use poll::{wait_until, Backoff, Spin};
pub use system::SystemReset;
pub use timer::Timer;
pub use uart::{UartError, UartRx, UartTx};
