//! Robot description compiled in from robot.toml
//!
//! build.rs validates robot.toml and writes `ROBOT_CONFIG`, `STEP_TIMING`
//! and the wiring flags into OUT_DIR. Edit robot.toml and rebuild to
//! retune the arm.

use scara_core::config::{JointConfig, RobotConfig, VerticalConfig};
use scara_core::geometry::Point;
use scara_drivers::StepTiming;

include!(concat!(env!("OUT_DIR"), "/robot_config.rs"));
