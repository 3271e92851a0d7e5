//! Safety interlocks
//!
//! Keeps the stepper drivers from staying energised indefinitely.

pub mod interlock;

pub use interlock::{InterlockStatus, MotorInterlock, INDEFINITE};
