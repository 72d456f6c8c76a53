//! Keying line
//!
//! Adapts any infallible `embedded-hal` output pin, such as the RP2040
//! `Output`. The level last written is cached, so reading it back needs
//! neither `&mut` access nor a stateful pin.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin as HalOutputPin;
use fox_hal::OutputPin;

pub struct KeyLine<P> {
    pin: P,
    /// Logical level (true = carrier on)
    high: bool,
    /// Carrier on drives the pin low
    inverted: bool,
}

impl<P: HalOutputPin<Error = Infallible>> KeyLine<P> {
    /// Key line where a mark drives the pin high
    pub fn new(pin: P) -> Self {
        Self::with_polarity(pin, false)
    }

    /// Key line for transmitters keyed by pulling the line low
    pub fn active_low(pin: P) -> Self {
        Self::with_polarity(pin, true)
    }

    fn with_polarity(pin: P, inverted: bool) -> Self {
        let mut line = Self {
            pin,
            high: true,
            inverted,
        };
        line.set_low();
        line
    }

    fn drive(&mut self, high: bool) {
        self.high = high;
        let result = if high != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if let Err(never) = result {
            match never {}
        }
    }
}

impl<P: HalOutputPin<Error = Infallible>> OutputPin for KeyLine<P> {
    fn set_high(&mut self) {
        self.drive(true);
    }

    fn set_low(&mut self) {
        self.drive(false);
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType;

    #[derive(Default)]
    struct Pin {
        high: bool,
    }

    impl ErrorType for Pin {
        type Error = Infallible;
    }

    impl HalOutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn test_active_high() {
        let mut key = KeyLine::new(Pin::default());
        assert!(!key.is_set_high());
        assert!(!key.pin.high);

        key.set_high();
        assert!(key.is_set_high());
        assert!(key.pin.high);
    }

    #[test]
    fn test_active_low_starts_released() {
        let mut key = KeyLine::active_low(Pin::default());
        assert!(!key.is_set_high());
        assert!(key.pin.high);

        key.set_high();
        assert!(!key.pin.high);
    }
}
