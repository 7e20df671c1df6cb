//! GPIO pin abstractions
//!
//! The bit-banged protocols drive plain push-pull outputs and never read
//! them back from the wire, so only the output side is modelled.

/// Digital output pin
///
/// Writes are infallible: none of the wired devices can report a fault on
/// these lines.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

impl<P: OutputPin + ?Sized> OutputPin for &mut P {
    fn set_high(&mut self) {
        (**self).set_high();
    }

    fn set_low(&mut self) {
        (**self).set_low();
    }

    fn is_set_high(&self) -> bool {
        (**self).is_set_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Latch {
        high: bool,
    }

    impl OutputPin for Latch {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_set_state() {
        let mut pin = Latch { high: false };

        pin.set_state(true);
        assert!(pin.is_set_high());
        assert!(!pin.is_set_low());

        pin.set_state(false);
        assert!(pin.is_set_low());
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn drive<P: OutputPin>(mut pin: P) -> bool {
            pin.set_high();
            pin.is_set_high()
        }

        let mut pin = Latch { high: false };
        assert!(drive(&mut pin));
        assert!(pin.high);
    }
}
