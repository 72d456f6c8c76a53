//! Busy-wait strategies
//!
//! Flash programming and UART transmission both end in a loop that polls a
//! hardware flag. The loop itself lives in the caller; what happens between
//! two polls is a [`Backoff`], so host tests can count polls instead of
//! burning time.

/// What to do while a polled condition is still false
pub trait Backoff {
    /// Called once per failed poll
    fn snooze(&mut self);
}

/// Spin with the processor's spin-loop hint
#[derive(Debug, Default, Clone, Copy)]
pub struct Spin;

impl Backoff for Spin {
    #[inline]
    fn snooze(&mut self) {
        core::hint::spin_loop();
    }
}

impl<B: Backoff + ?Sized> Backoff for &mut B {
    fn snooze(&mut self) {
        (**self).snooze();
    }
}

/// Block until `ready` returns true
///
/// Returns the number of times the backoff was invoked.
pub fn wait_until<B, F>(backoff: &mut B, mut ready: F) -> u32
where
    B: Backoff + ?Sized,
    F: FnMut() -> bool,
{
    let mut polls = 0u32;
    while !ready() {
        backoff.snooze();
        polls = polls.saturating_add(1);
    }
    polls
}
