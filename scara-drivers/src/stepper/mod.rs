//! Stepper driver implementations

pub mod a4988;

pub use a4988::{StepDirDriver, StepTiming};

use embedded_hal::delay::DelayNs;
use scara_core::motion::Direction;

/// A single stepper axis as seen by [`PinArm`](crate::arm::PinArm)
pub trait StepAxis {
    /// Issue one step, updating the direction first if needed
    fn pulse<D: DelayNs>(&mut self, direction: Direction, delay: &mut D);

    /// Energise or release the motor
    fn set_enabled(&mut self, enabled: bool);
}
