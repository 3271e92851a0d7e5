//! Robot configuration type definitions
//!
//! A `RobotConfig` is built once at startup (the firmware compiles one in
//! from `robot.toml`) and never changes afterwards.

use crate::geometry::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Degrees per full step of a 1.8° stepper
pub const FULL_STEP_DEG: f64 = 1.8;

/// Microstepping used by the reference build
pub const MICROSTEPS: f64 = 16.0;

/// Pulley ratio of the reference build (motor teeth : joint teeth)
pub const DRIVE_RATIO: f64 = 20.0 / 62.0;

/// Motor steps per joint degree for a stepper, microstep and pulley setup
pub fn steps_per_degree(full_step_deg: f64, microsteps: f64, drive_ratio: f64) -> f64 {
    1.0 / ((full_step_deg / microsteps) * drive_ratio)
}

/// One rotary joint of the arm
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointConfig {
    /// Link length in mm
    pub arm_len: f64,
    /// Motor steps per degree of joint rotation
    pub steps_per_degree: f64,
    /// Travel limit either side of straight ahead, in degrees
    pub max_angle_deg: f64,
}

impl JointConfig {
    /// Step limit either side of home
    ///
    /// Kept fractional; a step count is in range while its magnitude does
    /// not exceed this value.
    pub fn step_limit(&self) -> f64 {
        self.max_angle_deg * self.steps_per_degree
    }

    /// Check an absolute step count against the travel limit
    pub fn in_range(&self, steps: i32) -> bool {
        let limit = self.step_limit();
        let steps = steps as f64;
        steps <= limit && steps >= -limit
    }

    /// Absolute step count for a joint angle, rounded half away from zero
    pub fn degrees_to_steps(&self, degrees: f64) -> i32 {
        libm::round(degrees * self.steps_per_degree) as i32
    }

    /// Joint angle for an absolute step count
    pub fn steps_to_degrees(&self, steps: i32) -> f64 {
        steps as f64 / self.steps_per_degree
    }
}

/// Vertical (pen height) axis
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VerticalConfig {
    /// Motor steps per mm of travel
    pub steps_per_mm: f64,
    /// Maximum travel above home in mm
    pub travel_max_mm: f64,
}

impl VerticalConfig {
    /// Absolute step count for a height, clamped to the travel range
    pub fn height_to_steps(&self, z_mm: f64) -> i32 {
        let z = libm::fmin(libm::fmax(z_mm, 0.0), self.travel_max_mm);
        libm::round(z * self.steps_per_mm) as i32
    }

    /// Height in mm for an absolute step count
    pub fn steps_to_height(&self, steps: i32) -> f64 {
        steps as f64 / self.steps_per_mm
    }
}

/// Complete robot description
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RobotConfig {
    /// Shoulder pivot position
    pub origin: Point,
    /// Shoulder joint (base to elbow)
    pub upper: JointConfig,
    /// Elbow joint (elbow to pen)
    pub lower: JointConfig,
    /// Pen height axis
    pub vertical: VerticalConfig,
    /// Lower joint correction per degree of upper joint rotation
    pub shoulder_gear_mismatch: f64,
    /// Motor-on time for implicit enables, 0 = until disabled
    pub default_motor_on_ms: u32,
    /// Pause after every step pulse in µs
    pub step_interval_us: u32,
}

impl Default for RobotConfig {
    fn default() -> Self {
        let steps = steps_per_degree(FULL_STEP_DEG, MICROSTEPS, DRIVE_RATIO);
        Self {
            origin: Point::new(0.0, 0.0),
            upper: JointConfig {
                arm_len: 100.0,
                steps_per_degree: steps,
                max_angle_deg: 90.0,
            },
            lower: JointConfig {
                arm_len: 100.0,
                steps_per_degree: steps,
                max_angle_deg: 160.0,
            },
            vertical: VerticalConfig {
                steps_per_mm: 1.0,
                travel_max_mm: 100.0,
            },
            // Shoulder gear has 60 teeth, elbow gear 62
            shoulder_gear_mismatch: 1.0 / 30.0,
            default_motor_on_ms: 60_000,
            step_interval_us: 300,
        }
    }
}

impl RobotConfig {
    /// Combined reach of both links
    pub fn reach(&self) -> f64 {
        self.upper.arm_len + self.lower.arm_len
    }

    /// Elbow position with both joints at zero
    pub fn home_elbow(&self) -> Point {
        Point::new(self.origin.x, self.origin.y + self.upper.arm_len)
    }

    /// Accepted range for Cartesian targets
    ///
    /// The box is relative to (0, 0), not to `origin`.
    pub fn bounds(&self) -> WorkspaceBounds {
        WorkspaceBounds {
            min_x: -self.reach(),
            max_x: self.reach(),
            min_y: -self.lower.arm_len,
            max_y: self.reach(),
            min_z: 0.0,
            max_z: self.vertical.travel_max_mm,
        }
    }
}

/// Inclusive coordinate ranges accepted for G0, V0 and path commands
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WorkspaceBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl WorkspaceBounds {
    /// Check a point against the x/y ranges
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}
