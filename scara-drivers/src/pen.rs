//! Pen lift solenoid
//!
//! Powering the electromagnet pushes the pen onto the paper.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;

/// Pen actuator on a single GPIO
pub struct PenSolenoid<P> {
    pin: P,
    /// If true, pen down = pin LOW
    inverted: bool,
    down: bool,
}

impl<P: OutputPin<Error = Infallible>> PenSolenoid<P> {
    /// Create a pen actuator with active-high drive, pen lifted
    pub fn new(pin: P) -> Self {
        Self::with_polarity(pin, false)
    }

    /// Create a pen actuator whose drive is active-low, pen lifted
    pub fn new_active_low(pin: P) -> Self {
        Self::with_polarity(pin, true)
    }

    fn with_polarity(pin: P, inverted: bool) -> Self {
        let mut pen = Self {
            pin,
            inverted,
            down: false,
        };
        pen.set_down(false);
        pen
    }

    pub fn set_down(&mut self, down: bool) {
        let _ = if down != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        self.down = down;
    }

    pub fn is_down(&self) -> bool {
        self.down
    }
}
