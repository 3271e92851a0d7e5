//! Joint state and coordinated motion

pub mod joint;
pub mod manager;
pub mod stepping;

pub use joint::{Direction, Joint, JointState};
pub use manager::{MotionError, MotionManager, MoveOutcome, PlannedMove};
pub use stepping::CoordinatedSteps;
