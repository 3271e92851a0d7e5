//! Configuration types
//!
//! Board-agnostic robot description. The firmware generates a `RobotConfig`
//! from its `robot.toml` at build time.

pub mod types;

pub use types::*;
