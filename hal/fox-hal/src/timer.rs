//! Periodic timer abstraction
//!
//! Two timers drive the beacon: the unit tick that clocks the Morse
//! encoder, and the longer idle timer that schedules the next beacon after
//! the keyboard goes quiet. Expiry is reported out of band (an interrupt or
//! a task raises an event); this trait only controls the counter.

/// Restartable periodic timer
pub trait Timer {
    /// Reset the counter to zero and start counting
    fn start(&mut self);

    /// Stop counting; no further expiries are reported
    fn stop(&mut self);

    /// Whether the timer is counting
    fn is_running(&self) -> bool;
}
