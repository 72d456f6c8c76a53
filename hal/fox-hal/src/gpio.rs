//! Digital output abstraction
//!
//! The beacon drives exactly one output: the keying line of the
//! transmitter. High means carrier on (a mark), low means silence.

/// Digital output pin
pub trait OutputPin {
    /// Key the transmitter (logic 1)
    fn set_high(&mut self);

    /// Release the key (logic 0)
    fn set_low(&mut self);

    /// Invert the current level
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Drive the pin to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Last level written to the pin
    fn is_set_high(&self) -> bool;

    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}
