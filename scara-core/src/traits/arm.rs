//! Arm hardware trait
//!
//! Everything the motion and safety logic needs from the board: step
//! pulses, driver enables, the pen actuator and time.

use crate::motion::{Direction, Joint};

/// Trait for the arm's drive electronics
///
/// Implementations own the pins and timers. All calls are blocking;
/// `step_joint` returns once the pulse has been issued.
pub trait ArmHardware {
    /// Issue one step pulse on a joint
    ///
    /// The direction line is updated first if it differs from the last
    /// pulse on that joint.
    fn step_joint(&mut self, joint: Joint, direction: Direction);

    /// Energise or release one joint's motor driver
    fn set_joint_enable(&mut self, joint: Joint, enabled: bool);

    /// Lower or lift the pen
    fn set_pen(&mut self, down: bool);

    /// Busy-wait for `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Monotonic milliseconds since boot
    fn now_millis(&self) -> u64;

    /// Milliseconds elapsed since an earlier `now_millis` reading
    fn elapsed_millis(&self, since: u64) -> u64 {
        self.now_millis().saturating_sub(since)
    }
}
