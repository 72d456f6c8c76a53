//! System control

/// Unconditional system reset
///
/// Nothing is saved first; unsaved edits are lost.
pub trait SystemReset {
    fn reset(&mut self) -> !;
}
