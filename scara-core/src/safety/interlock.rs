//! Motor enable interlock
//!
//! Stepper drivers left energised hold torque and heat up. Every enable
//! carries a duration; `check_timeout` runs on each control loop tick and
//! releases the drivers once that duration has passed.

use crate::motion::Joint;
use crate::traits::ArmHardware;

/// Duration meaning "stay enabled until told otherwise"
pub const INDEFINITE: u32 = 0;

/// Interlock status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterlockStatus {
    /// Drivers released
    Disabled,
    /// Drivers energised until disabled
    Latched,
    /// Drivers energised with this many ms left
    Timed { remaining_ms: u64 },
}

/// Tracks motor driver power and its auto-off deadline
#[derive(Debug, Clone)]
pub struct MotorInterlock {
    enabled: bool,
    /// `now_millis` when last enabled
    enabled_at_ms: u64,
    /// 0 = indefinite
    enabled_for_ms: u32,
}

impl Default for MotorInterlock {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorInterlock {
    /// Create an interlock in the disabled state
    ///
    /// Does not touch the hardware; call [`disable`](Self::disable) at
    /// startup to put the drivers in a known state.
    pub fn new() -> Self {
        Self {
            enabled: false,
            enabled_at_ms: 0,
            enabled_for_ms: INDEFINITE,
        }
    }

    /// Energise all drivers for `for_ms` (0 = indefinite)
    ///
    /// Re-enabling restarts the timer.
    pub fn enable<H: ArmHardware>(&mut self, hardware: &mut H, for_ms: u32) {
        for joint in Joint::ALL {
            hardware.set_joint_enable(joint, true);
        }
        self.enabled = true;
        self.enabled_at_ms = hardware.now_millis();
        self.enabled_for_ms = for_ms;
    }

    /// Release all drivers
    ///
    /// Always writes the enable lines, even if already disabled.
    pub fn disable<H: ArmHardware>(&mut self, hardware: &mut H) {
        for joint in Joint::ALL {
            hardware.set_joint_enable(joint, false);
        }
        self.enabled = false;
    }

    /// Disable the drivers if the enable duration has run out
    ///
    /// Returns `true` if this call disabled them.
    pub fn check_timeout<H: ArmHardware>(&mut self, hardware: &mut H) -> bool {
        if !self.enabled || self.enabled_for_ms == INDEFINITE {
            return false;
        }
        if hardware.elapsed_millis(self.enabled_at_ms) > self.enabled_for_ms as u64 {
            #[cfg(feature = "defmt")]
            defmt::debug!("motor-on time of {} ms expired", self.enabled_for_ms);
            self.disable(hardware);
            return true;
        }
        false
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enabled_at_ms(&self) -> u64 {
        self.enabled_at_ms
    }

    pub fn enabled_for_ms(&self) -> u32 {
        self.enabled_for_ms
    }

    /// Current status at time `now_ms`
    pub fn status(&self, now_ms: u64) -> InterlockStatus {
        if !self.enabled {
            InterlockStatus::Disabled
        } else if self.enabled_for_ms == INDEFINITE {
            InterlockStatus::Latched
        } else {
            let deadline = self.enabled_at_ms + self.enabled_for_ms as u64;
            InterlockStatus::Timed {
                remaining_ms: deadline.saturating_sub(now_ms),
            }
        }
    }
}
