//! Inverse and forward kinematics for the two-link arm
//!
//! The elbow lies on the intersection of the shoulder circle (base pivot,
//! upper arm length) and the wrist circle (pen target, lower arm length).
//! Both joint angles are absolute bearings from +Y; the lower joint's
//! commanded angle carries the shoulder gear mismatch correction.

use super::circle::{circle_intersection, Circle, IntersectionError};
use super::Point;
use crate::config::RobotConfig;

/// Degrees to radians
pub const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;

/// Commanded joint angles in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JointAngles {
    pub upper_deg: f64,
    pub lower_deg: f64,
}

/// A solved arm pose for a target point
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Solution {
    /// Chosen elbow position
    pub elbow: Point,
    /// Joint angles reaching the target through that elbow
    pub angles: JointAngles,
}

/// Why a target point cannot be reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReachError {
    /// Shoulder and wrist circles do not intersect
    NoIntersection(IntersectionError),
    /// Both elbow candidates lie below the base line
    ElbowBelowBase,
}

impl From<IntersectionError> for ReachError {
    fn from(e: IntersectionError) -> Self {
        ReachError::NoIntersection(e)
    }
}

/// Bearing from `from` to `to` in degrees, measured from +Y toward +X
pub fn bearing_deg(from: Point, to: Point) -> f64 {
    libm::atan2(to.x - from.x, to.y - from.y) / DEG_TO_RAD
}

/// Pick between the two elbow candidates
///
/// An elbow below the base line is mechanically impossible. When both
/// candidates are usable the one needing the smaller swing from the
/// previous elbow position wins, which keeps the elbow from flipping
/// sides on short moves.
pub fn choose_elbow(p1: Point, p2: Point, previous: Point) -> Result<Point, ReachError> {
    if p1.y >= 0.0 && p2.y > 0.0 {
        let delta1 = libm::atan2(p1.x - previous.x, p1.y - previous.y);
        let delta2 = libm::atan2(p2.x - previous.x, p2.y - previous.y);
        if libm::fabs(delta2) < libm::fabs(delta1) {
            Ok(p2)
        } else {
            Ok(p1)
        }
    } else if p1.y < 0.0 && p2.y < 0.0 {
        Err(ReachError::ElbowBelowBase)
    } else if p1.y < 0.0 {
        Ok(p2)
    } else {
        Ok(p1)
    }
}

/// Solve joint angles that put the pen on `target`
pub fn solve(config: &RobotConfig, target: Point, previous_elbow: Point) -> Result<Solution, ReachError> {
    let shoulder = Circle {
        center: config.origin,
        radius: config.upper.arm_len,
    };
    let wrist = Circle {
        center: target,
        radius: config.lower.arm_len,
    };
    let (p1, p2) = circle_intersection(shoulder, wrist)?;
    let elbow = choose_elbow(p1, p2, previous_elbow)?;

    let upper_deg = bearing_deg(config.origin, elbow);
    let mut lower_deg = bearing_deg(elbow, target);
    lower_deg += upper_deg * config.shoulder_gear_mismatch;

    Ok(Solution {
        elbow,
        angles: JointAngles {
            upper_deg,
            lower_deg,
        },
    })
}

/// Elbow position for an upper joint angle
pub fn elbow_position(config: &RobotConfig, upper_deg: f64) -> Point {
    let upper = upper_deg * DEG_TO_RAD;
    Point::new(
        config.origin.x + config.upper.arm_len * libm::sin(upper),
        config.origin.y + config.upper.arm_len * libm::cos(upper),
    )
}

/// Pen position for commanded joint angles
///
/// Removes the gear mismatch correction before projecting the lower arm.
pub fn forward(config: &RobotConfig, angles: JointAngles) -> Point {
    let elbow = elbow_position(config, angles.upper_deg);
    let lower_actual = angles.lower_deg - angles.upper_deg * config.shoulder_gear_mismatch;
    let lower = lower_actual * DEG_TO_RAD;
    Point::new(
        elbow.x + config.lower.arm_len * libm::sin(lower),
        elbow.y + config.lower.arm_len * libm::cos(lower),
    )
}
