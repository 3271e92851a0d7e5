//! Motion manager
//!
//! Owns the joint position state and is the only code that changes it.
//! A move is fully validated before the first pulse goes out, so a
//! rejected move leaves both the arm and the state untouched.

use super::joint::{Direction, Joint, JointState};
use super::stepping::CoordinatedSteps;
use crate::config::RobotConfig;
use crate::geometry::{self, JointAngles, Point, ReachError, Solution};
use crate::traits::ArmHardware;

/// Why a move was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// No arm pose puts the pen on the target
    Unreachable(ReachError),
    /// The pose exists but a joint would pass its travel limit
    OutOfRange { joint: Joint },
}

impl From<ReachError> for MotionError {
    fn from(e: ReachError) -> Self {
        MotionError::Unreachable(e)
    }
}

/// Result of a successful move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveOutcome {
    /// Pulses were issued
    Moved,
    /// Already there
    NoMovementRequired,
}

/// A validated Cartesian move, not yet executed
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlannedMove {
    pub solution: Solution,
    pub upper_target: i32,
    pub lower_target: i32,
    pub upper_delta: i32,
    pub lower_delta: i32,
}

impl PlannedMove {
    /// Check if neither joint has to move
    pub fn is_empty(&self) -> bool {
        self.upper_delta == 0 && self.lower_delta == 0
    }
}

/// Tracks joint positions and drives coordinated moves
pub struct MotionManager<H: ArmHardware> {
    config: RobotConfig,
    state: JointState,
    hardware: H,
}

impl<H: ArmHardware> MotionManager<H> {
    /// Create a manager with the arm assumed to be at home
    pub fn new(config: RobotConfig, hardware: H) -> Self {
        Self {
            state: JointState::home(&config),
            config,
            hardware,
        }
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    pub fn state(&self) -> &JointState {
        &self.state
    }

    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hardware
    }

    /// Take the current physical pose as home
    pub fn calibrate(&mut self) {
        self.state = JointState::home(&self.config);
    }

    /// Take the current pen height as vertical zero
    pub fn home_vertical(&mut self) {
        self.state.vertical_steps = 0;
    }

    /// Commanded joint angles for the current step counts
    pub fn angles(&self) -> JointAngles {
        JointAngles {
            upper_deg: self.config.upper.steps_to_degrees(self.state.upper_steps),
            lower_deg: self.config.lower.steps_to_degrees(self.state.lower_steps),
        }
    }

    /// Pen position derived from the current step counts
    pub fn position(&self) -> Point {
        geometry::forward(&self.config, self.angles())
    }

    /// Pen height in mm
    pub fn height(&self) -> f64 {
        self.config.vertical.steps_to_height(self.state.vertical_steps)
    }

    /// Solve and validate a move without touching the arm
    pub fn plan_move(&self, target: Point) -> Result<PlannedMove, MotionError> {
        let solution = geometry::solve(&self.config, target, self.state.elbow)?;

        let upper_target = self.config.upper.degrees_to_steps(solution.angles.upper_deg);
        let lower_target = self.config.lower.degrees_to_steps(solution.angles.lower_deg);

        if !self.config.upper.in_range(upper_target) {
            return Err(MotionError::OutOfRange { joint: Joint::Upper });
        }
        if !self.config.lower.in_range(lower_target) {
            return Err(MotionError::OutOfRange { joint: Joint::Lower });
        }

        Ok(PlannedMove {
            solution,
            upper_target,
            lower_target,
            upper_delta: upper_target - self.state.upper_steps,
            lower_delta: lower_target - self.state.lower_steps,
        })
    }

    /// Move the pen to a Cartesian point
    pub fn move_to(&mut self, target: Point) -> Result<MoveOutcome, MotionError> {
        let plan = match self.plan_move(target) {
            Ok(plan) => plan,
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("move to ({}, {}) rejected: {}", target.x, target.y, e);
                return Err(e);
            }
        };

        if plan.is_empty() {
            return Ok(MoveOutcome::NoMovementRequired);
        }

        let upper_dir = Direction::from_steps(plan.upper_delta);
        let lower_dir = Direction::from_steps(plan.lower_delta);
        for joint in CoordinatedSteps::new(plan.upper_delta, plan.lower_delta) {
            let direction = match joint {
                Joint::Upper => upper_dir,
                _ => lower_dir,
            };
            self.pulse(joint, direction);
        }

        self.state.upper_steps = plan.upper_target;
        self.state.lower_steps = plan.lower_target;
        self.state.elbow = plan.solution.elbow;
        Ok(MoveOutcome::Moved)
    }

    /// Move the pen to a height, clamped to the axis travel
    pub fn move_vertical(&mut self, z_mm: f64) -> MoveOutcome {
        let target = self.config.vertical.height_to_steps(z_mm);
        let delta = target - self.state.vertical_steps;
        if delta == 0 {
            return MoveOutcome::NoMovementRequired;
        }

        let direction = Direction::from_steps(delta);
        for _ in 0..delta.unsigned_abs() {
            self.pulse(Joint::Vertical, direction);
        }
        self.state.vertical_steps = target;
        MoveOutcome::Moved
    }

    /// Pulse a joint without recording the motion
    ///
    /// Used to bring the arm to its physical home before calibrating.
    pub fn jog(&mut self, joint: Joint, steps: i32) {
        let direction = Direction::from_steps(steps);
        for _ in 0..steps.unsigned_abs() {
            self.pulse(joint, direction);
        }
    }

    fn pulse(&mut self, joint: Joint, direction: Direction) {
        self.hardware.step_joint(joint, direction);
        self.hardware.delay_us(self.config.step_interval_us);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::IntersectionError;
    use crate::traits::mock::RecordingArm;
    use proptest::prelude::*;

    fn manager() -> MotionManager<RecordingArm> {
        MotionManager::new(RobotConfig::default(), RecordingArm::new())
    }

    #[test]
    fn test_move_updates_state_and_pulses() {
        let mut m = manager();
        assert_eq!(m.move_to(Point::new(100.0, 100.0)), Ok(MoveOutcome::Moved));

        // Upper stays put, lower turns 90 degrees
        assert_eq!(m.state().upper_steps, 0);
        assert_eq!(m.state().lower_steps, 2480);
        assert_eq!(m.hardware().net_steps(Joint::Upper), 0);
        assert_eq!(m.hardware().net_steps(Joint::Lower), 2480);
        assert_eq!(m.hardware().delayed_us, 2480 * 300);
    }

    #[test]
    fn test_pulse_counts_match_state_deltas() {
        let mut m = manager();
        m.move_to(Point::new(-60.0, 140.0)).unwrap();
        let first = *m.state();
        m.move_to(Point::new(80.0, 60.0)).unwrap();
        let second = *m.state();

        let arm = m.hardware();
        assert_eq!(arm.net_steps(Joint::Upper), second.upper_steps);
        assert_eq!(arm.net_steps(Joint::Lower), second.lower_steps);
        assert_ne!(first, second);
    }

    #[test]
    fn test_repeat_move_needs_no_pulses() {
        let mut m = manager();
        m.move_to(Point::new(50.0, 150.0)).unwrap();
        let pulses = m.hardware().pulses.len();
        assert_eq!(
            m.move_to(Point::new(50.0, 150.0)),
            Ok(MoveOutcome::NoMovementRequired)
        );
        assert_eq!(m.hardware().pulses.len(), pulses);
    }

    #[test]
    fn test_unreachable_leaves_state() {
        let mut m = manager();
        m.move_to(Point::new(50.0, 150.0)).unwrap();
        let before = *m.state();
        let pulses = m.hardware().pulses.len();

        assert_eq!(
            m.move_to(Point::new(0.0, 250.0)),
            Err(MotionError::Unreachable(ReachError::NoIntersection(
                IntersectionError::TooFarApart
            )))
        );
        assert_eq!(
            m.move_to(Point::new(0.0, -150.0)),
            Err(MotionError::Unreachable(ReachError::ElbowBelowBase))
        );
        assert_eq!(*m.state(), before);
        assert_eq!(m.hardware().pulses.len(), pulses);
    }

    #[test]
    fn test_out_of_range_upper() {
        // Only solution puts the upper joint at about -41.6 degrees
        let mut tight = manager();
        tight.config.upper.max_angle_deg = 30.0;
        let before = *tight.state();
        assert_eq!(
            tight.move_to(Point::new(-150.0, 20.0)),
            Err(MotionError::OutOfRange { joint: Joint::Upper })
        );
        assert_eq!(*tight.state(), before);
        assert!(tight.hardware().pulses.is_empty());
    }

    #[test]
    fn test_out_of_range_lower() {
        let mut m = manager();
        m.config.lower.max_angle_deg = 45.0;
        assert_eq!(
            m.move_to(Point::new(100.0, 100.0)),
            Err(MotionError::OutOfRange { joint: Joint::Lower })
        );
        assert!(m.hardware().pulses.is_empty());
        assert_eq!(m.state().lower_steps, 0);
    }

    #[test]
    fn test_elbow_updated_after_move() {
        let mut m = manager();
        let plan = m.plan_move(Point::new(-60.0, 140.0)).unwrap();
        m.move_to(Point::new(-60.0, 140.0)).unwrap();
        assert_eq!(m.state().elbow, plan.solution.elbow);
    }

    #[test]
    fn test_calibrate_resets_state() {
        let mut m = manager();
        m.move_to(Point::new(-60.0, 140.0)).unwrap();
        m.move_vertical(20.0);
        m.calibrate();
        assert_eq!(*m.state(), JointState::home(m.config()));
    }

    #[test]
    fn test_vertical_move_clamps() {
        let mut m = manager();
        assert_eq!(m.move_vertical(30.0), MoveOutcome::Moved);
        assert_eq!(m.state().vertical_steps, 30);
        assert_eq!(m.hardware().net_steps(Joint::Vertical), 30);

        m.move_vertical(500.0);
        assert_eq!(m.state().vertical_steps, 100);
        m.move_vertical(-10.0);
        assert_eq!(m.state().vertical_steps, 0);
        assert_eq!(m.hardware().count(Joint::Vertical), 30 + 70 + 100);
        assert_eq!(m.move_vertical(0.0), MoveOutcome::NoMovementRequired);
    }

    #[test]
    fn test_home_vertical_only_touches_vertical() {
        let mut m = manager();
        m.move_to(Point::new(100.0, 100.0)).unwrap();
        m.move_vertical(40.0);
        m.home_vertical();
        assert_eq!(m.state().vertical_steps, 0);
        assert_eq!(m.state().lower_steps, 2480);
        assert_eq!(m.height(), 0.0);
    }

    #[test]
    fn test_jog_does_not_change_state() {
        let mut m = manager();
        m.jog(Joint::Upper, -25);
        assert_eq!(m.hardware().net_steps(Joint::Upper), -25);
        assert_eq!(*m.state(), JointState::home(m.config()));
    }

    #[test]
    fn test_position_after_move() {
        let mut m = manager();
        let home = m.position();
        assert!((home.x - 0.0).abs() < 1e-9 && (home.y - 200.0).abs() < 1e-9);

        m.move_to(Point::new(100.0, 100.0)).unwrap();
        let p = m.position();
        assert!((p.x - 100.0).abs() < 0.1);
        assert!((p.y - 100.0).abs() < 0.1);
    }

    proptest! {
        #[test]
        fn prop_move_lands_within_one_step(x in -190.0f64..190.0, y in 10.0f64..190.0) {
            let mut m = manager();
            if m.move_to(Point::new(x, y)).is_ok() {
                // One step is 1/27.5 degree; at 200 mm reach that is
                // about 0.13 mm per joint
                let p = m.position();
                prop_assert!(p.distance_to(Point::new(x, y)) < 0.3, "{:?} vs ({}, {})", p, x, y);
            }
            let s = m.state();
            prop_assert!(m.config().upper.in_range(s.upper_steps));
            prop_assert!(m.config().lower.in_range(s.lower_steps));
        }
    }
}
