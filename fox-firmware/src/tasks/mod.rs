//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod controller;
pub mod serial_rx;
pub mod timer;

pub use controller::controller_task;
pub use serial_rx::serial_rx_task;
pub use timer::{idle_task, tick_task};
