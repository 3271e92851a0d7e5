//! Recording arm hardware for host tests

use super::{ArmHardware, StatusDisplay};
use crate::motion::{Direction, Joint};

fn index(joint: Joint) -> usize {
    match joint {
        Joint::Upper => 0,
        Joint::Lower => 1,
        Joint::Vertical => 2,
    }
}

/// Arm that records every call instead of driving pins
#[derive(Debug, Default)]
pub struct RecordingArm {
    pub pulses: Vec<(Joint, Direction)>,
    pub enabled: [bool; 3],
    pub enable_calls: usize,
    pub pen_down: bool,
    pub delayed_us: u64,
    pub now: u64,
}

impl RecordingArm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, joint: Joint) -> bool {
        self.enabled[index(joint)]
    }

    pub fn all_enabled(&self) -> bool {
        self.enabled.iter().all(|e| *e)
    }

    pub fn none_enabled(&self) -> bool {
        self.enabled.iter().all(|e| !*e)
    }

    /// Net signed step count issued to one joint
    pub fn net_steps(&self, joint: Joint) -> i32 {
        self.pulses
            .iter()
            .filter(|(j, _)| *j == joint)
            .map(|(_, d)| d.sign())
            .sum()
    }

    pub fn count(&self, joint: Joint) -> usize {
        self.pulses.iter().filter(|(j, _)| *j == joint).count()
    }
}

impl ArmHardware for RecordingArm {
    fn step_joint(&mut self, joint: Joint, direction: Direction) {
        self.pulses.push((joint, direction));
    }

    fn set_joint_enable(&mut self, joint: Joint, enabled: bool) {
        self.enable_calls += 1;
        self.enabled[index(joint)] = enabled;
    }

    fn set_pen(&mut self, down: bool) {
        self.pen_down = down;
    }

    fn delay_us(&mut self, us: u32) {
        self.delayed_us += us as u64;
    }

    fn now_millis(&self) -> u64 {
        self.now
    }
}

/// Display keeping everything it was shown
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub shown: Vec<String>,
}

impl RecordingDisplay {
    pub fn last(&self) -> Option<&str> {
        self.shown.last().map(|s| s.as_str())
    }
}

impl StatusDisplay for RecordingDisplay {
    fn show_status(&mut self, text: &str) {
        self.shown.push(text.to_string());
    }
}
