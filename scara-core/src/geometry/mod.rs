//! Plane geometry for the two-link arm
//!
//! Angles follow the arm's convention: measured from the +Y axis
//! (straight out from the base) toward +X, in degrees.

pub mod circle;
pub mod kinematics;
pub mod path;

pub use circle::{circle_intersection, Circle, IntersectionError};
pub use kinematics::{forward, solve, JointAngles, ReachError, Solution};
pub use path::{CirclePath, LinePath, CIRCLE_SEGMENTS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in the drawing plane (mm)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        libm::sqrt(dx * dx + dy * dy)
    }
}
