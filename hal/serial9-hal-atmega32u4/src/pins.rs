//! `embedded-hal` pin wrapper
//!
//! Lets any `embedded_hal::digital::OutputPin` drive DE / RE_. The last
//! successfully written level is tracked locally since the bridge only
//! needs to know what it asked for.

use serial9_hal::OutputPin;

/// Wraps an `embedded-hal` 1.0 output pin
pub struct EhOutputPin<P> {
    pin: P,
    high: bool,
}

impl<P: embedded_hal::digital::OutputPin> EhOutputPin<P> {
    /// Wrap `pin`, driving it to `initial_high`
    pub fn new(mut pin: P, initial_high: bool) -> Self {
        let result = if initial_high {
            pin.set_high()
        } else {
            pin.set_low()
        };
        // A failed write leaves the level unknown; assume the opposite so
        // the next request is not skipped by callers that compare states
        let high = if result.is_ok() {
            initial_high
        } else {
            !initial_high
        };
        Self { pin, high }
    }

    /// Unwrap the inner pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: embedded_hal::digital::OutputPin> OutputPin for EhOutputPin<P> {
    fn set_high(&mut self) {
        match self.pin.set_high() {
            Ok(()) => self.high = true,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("direction pin set_high failed");
            }
        }
    }

    fn set_low(&mut self) {
        match self.pin.set_low() {
            Ok(()) => self.high = false,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("direction pin set_low failed");
            }
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
