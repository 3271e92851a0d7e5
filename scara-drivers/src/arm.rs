//! Pin-level arm hardware
//!
//! Ties three stepper axes, the pen and a time source together behind
//! [`ArmHardware`].

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use scara_core::motion::{Direction, Joint};
use scara_core::traits::ArmHardware;

use crate::pen::PenSolenoid;
use crate::stepper::StepAxis;

/// The arm's three axes and pen wired to GPIO
///
/// `clock` returns monotonic milliseconds since boot.
pub struct PinArm<A, P, D, C> {
    upper: A,
    lower: A,
    vertical: A,
    pen: PenSolenoid<P>,
    delay: D,
    clock: C,
}

impl<A, P, D, C> PinArm<A, P, D, C>
where
    A: StepAxis,
    P: OutputPin<Error = Infallible>,
    D: DelayNs,
    C: Fn() -> u64,
{
    pub fn new(upper: A, lower: A, vertical: A, pen: PenSolenoid<P>, delay: D, clock: C) -> Self {
        Self {
            upper,
            lower,
            vertical,
            pen,
            delay,
            clock,
        }
    }

    fn axis(&mut self, joint: Joint) -> &mut A {
        match joint {
            Joint::Upper => &mut self.upper,
            Joint::Lower => &mut self.lower,
            Joint::Vertical => &mut self.vertical,
        }
    }

    pub fn pen(&self) -> &PenSolenoid<P> {
        &self.pen
    }
}

impl<A, P, D, C> ArmHardware for PinArm<A, P, D, C>
where
    A: StepAxis,
    P: OutputPin<Error = Infallible>,
    D: DelayNs,
    C: Fn() -> u64,
{
    fn step_joint(&mut self, joint: Joint, direction: Direction) {
        let Self {
            upper,
            lower,
            vertical,
            delay,
            ..
        } = self;
        let axis = match joint {
            Joint::Upper => upper,
            Joint::Lower => lower,
            Joint::Vertical => vertical,
        };
        axis.pulse(direction, delay);
    }

    fn set_joint_enable(&mut self, joint: Joint, enabled: bool) {
        self.axis(joint).set_enabled(enabled);
    }

    fn set_pen(&mut self, down: bool) {
        self.pen.set_down(down);
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn now_millis(&self) -> u64 {
        (self.clock)()
    }
}
