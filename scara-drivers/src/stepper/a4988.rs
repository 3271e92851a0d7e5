//! A4988 style step/dir/enable stepper driver
//!
//! Three logic pins per motor:
//! - STEP: one rising edge per (micro)step
//! - DIR: sampled on the STEP edge
//! - ENABLE: active-low, drivers hold torque while low

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use scara_core::motion::Direction;

use super::StepAxis;

/// STEP pulse shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepTiming {
    /// Time STEP is held high, in µs (A4988 minimum is 1 µs)
    pub pulse_width_us: u32,
    /// Wait between a DIR change and the next STEP edge, in ns
    /// (A4988 needs 200 ns, DRV8825 650 ns)
    pub dir_setup_ns: u32,
}

impl Default for StepTiming {
    fn default() -> Self {
        Self {
            pulse_width_us: 1,
            dir_setup_ns: 1_000,
        }
    }
}

/// One stepper motor behind an A4988 (or DRV8825, TMC2208 in legacy mode)
pub struct StepDirDriver<STEP, DIR, EN> {
    step: STEP,
    dir: DIR,
    enable: EN,
    timing: StepTiming,
    /// DIR high means Negative
    inverted_dir: bool,
    /// Last direction written to DIR
    direction: Option<Direction>,
    enabled: bool,
}

impl<STEP, DIR, EN> StepDirDriver<STEP, DIR, EN>
where
    STEP: OutputPin<Error = Infallible>,
    DIR: OutputPin<Error = Infallible>,
    EN: OutputPin<Error = Infallible>,
{
    /// Create a driver with the motor released and STEP low
    pub fn new(step: STEP, dir: DIR, enable: EN, timing: StepTiming) -> Self {
        let mut driver = Self {
            step,
            dir,
            enable,
            timing,
            inverted_dir: false,
            direction: None,
            enabled: false,
        };
        let _ = driver.step.set_low();
        driver.set_enabled(false);
        driver
    }

    /// Drive DIR high for negative steps instead of positive ones
    pub fn invert_direction(mut self) -> Self {
        self.inverted_dir = true;
        self.direction = None;
        self
    }

    /// Last direction written to the DIR pin
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn timing(&self) -> StepTiming {
        self.timing
    }

    /// Write DIR if it changed; returns `true` if the pin was written
    fn set_direction(&mut self, direction: Direction) -> bool {
        if self.direction == Some(direction) {
            return false;
        }
        let high = (direction == Direction::Positive) != self.inverted_dir;
        let _ = if high {
            self.dir.set_high()
        } else {
            self.dir.set_low()
        };
        self.direction = Some(direction);
        true
    }
}

impl<STEP, DIR, EN> StepAxis for StepDirDriver<STEP, DIR, EN>
where
    STEP: OutputPin<Error = Infallible>,
    DIR: OutputPin<Error = Infallible>,
    EN: OutputPin<Error = Infallible>,
{
    fn pulse<D: DelayNs>(&mut self, direction: Direction, delay: &mut D) {
        if self.set_direction(direction) {
            delay.delay_ns(self.timing.dir_setup_ns);
        }
        let _ = self.step.set_high();
        delay.delay_us(self.timing.pulse_width_us);
        let _ = self.step.set_low();
    }

    fn set_enabled(&mut self, enabled: bool) {
        // Active-low
        let _ = if enabled {
            self.enable.set_low()
        } else {
            self.enable.set_high()
        };
        self.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockDelay, MockPin};

    fn driver() -> StepDirDriver<MockPin, MockPin, MockPin> {
        StepDirDriver::new(MockPin::new(), MockPin::new(), MockPin::new(), StepTiming::default())
    }

    #[test]
    fn test_starts_released() {
        let d = driver();
        assert!(!d.is_enabled());
        assert!(d.enable.high);
        assert!(!d.step.high);
        assert_eq!(d.direction(), None);
    }

    #[test]
    fn test_enable_is_active_low() {
        let mut d = driver();
        d.set_enabled(true);
        assert!(!d.enable.high);
        assert!(d.is_enabled());
        d.set_enabled(false);
        assert!(d.enable.high);
    }

    #[test]
    fn test_pulse_shape() {
        let mut d = driver();
        let mut delay = MockDelay::default();
        d.pulse(Direction::Positive, &mut delay);

        assert_eq!(d.step.rising_edges, 1);
        assert!(!d.step.high);
        // DIR setup for the first pulse, then the pulse width
        assert_eq!(delay.calls, 2);
        assert_eq!(delay.total_ns, 2_000);
        assert!(d.dir.high);
    }

    #[test]
    fn test_dir_written_only_on_change() {
        let mut d = driver();
        let mut delay = MockDelay::default();
        d.pulse(Direction::Negative, &mut delay);
        d.pulse(Direction::Negative, &mut delay);
        d.pulse(Direction::Negative, &mut delay);
        assert_eq!(d.dir.writes, 1);
        assert!(!d.dir.high);
        // One setup wait plus three pulse widths
        assert_eq!(delay.total_ns, 1_000 + 3 * 1_000);

        // Reversal waits out the setup time before STEP rises
        let before = delay.total_ns;
        let rising = d.step.rising_edges;
        d.pulse(Direction::Positive, &mut delay);
        assert_eq!(d.dir.writes, 2);
        assert_eq!(d.step.rising_edges, rising + 1);
        assert_eq!(delay.total_ns - before, 1_000 + 1_000);
        assert_eq!(d.step.rising_edges, 4);
    }

    #[test]
    fn test_dir_setup_comes_before_step_edge() {
        let timing = StepTiming {
            pulse_width_us: 2,
            dir_setup_ns: 650,
        };
        let mut d = StepDirDriver::new(MockPin::new(), MockPin::new(), MockPin::new(), timing);
        let mut delay = MockDelay::default();
        d.pulse(Direction::Negative, &mut delay);
        assert_eq!(delay.first_ns, Some(650));
        assert_eq!(delay.total_ns, 650 + 2_000);
    }

    #[test]
    fn test_inverted_direction() {
        let mut d = driver().invert_direction();
        let mut delay = MockDelay::default();
        d.pulse(Direction::Negative, &mut delay);
        assert!(d.dir.high);
        assert_eq!(d.direction(), Some(Direction::Negative));
    }
}
