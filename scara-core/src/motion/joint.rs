//! Joint identifiers and position state

use crate::config::RobotConfig;
use crate::geometry::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Driven axes of the arm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Joint {
    /// Shoulder
    Upper,
    /// Elbow
    Lower,
    /// Pen height
    Vertical,
}

impl Joint {
    /// All joints, in enable/disable order
    pub const ALL: [Joint; 3] = [Joint::Upper, Joint::Lower, Joint::Vertical];

    /// Short lowercase name for status text
    pub fn name(self) -> &'static str {
        match self {
            Joint::Upper => "upper",
            Joint::Lower => "lower",
            Joint::Vertical => "vertical",
        }
    }
}

/// Step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Increasing step count
    Positive,
    /// Decreasing step count
    Negative,
}

impl Direction {
    /// Direction of a signed step delta (zero counts as positive)
    pub fn from_steps(steps: i32) -> Self {
        if steps < 0 {
            Direction::Negative
        } else {
            Direction::Positive
        }
    }

    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }

    /// Signed unit step
    pub fn sign(self) -> i32 {
        match self {
            Direction::Positive => 1,
            Direction::Negative => -1,
        }
    }
}

/// Where the arm is, counted in steps from the calibrated home pose
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JointState {
    pub upper_steps: i32,
    pub lower_steps: i32,
    pub vertical_steps: i32,
    /// Last chosen elbow position, used to pick between IK solutions
    pub elbow: Point,
}

impl JointState {
    /// All joints at zero with the elbow straight out
    pub fn home(config: &RobotConfig) -> Self {
        Self {
            upper_steps: 0,
            lower_steps: 0,
            vertical_steps: 0,
            elbow: config.home_elbow(),
        }
    }

    /// Step count of one joint
    pub fn steps(&self, joint: Joint) -> i32 {
        match joint {
            Joint::Upper => self.upper_steps,
            Joint::Lower => self.lower_steps,
            Joint::Vertical => self.vertical_steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_steps() {
        assert_eq!(Direction::from_steps(5), Direction::Positive);
        assert_eq!(Direction::from_steps(-1), Direction::Negative);
        assert_eq!(Direction::from_steps(0), Direction::Positive);
        assert_eq!(Direction::Negative.opposite(), Direction::Positive);
        assert_eq!(Direction::Negative.sign(), -1);
    }

    #[test]
    fn test_home_state() {
        let config = RobotConfig::default();
        let state = JointState::home(&config);
        for joint in Joint::ALL {
            assert_eq!(state.steps(joint), 0);
        }
        assert_eq!(state.elbow, Point::new(0.0, 100.0));
    }
}
