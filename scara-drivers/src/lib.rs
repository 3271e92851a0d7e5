//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in scara-core on top of `embedded-hal` 1.0 pins and delays:
//!
//! - Stepper drivers (A4988 style step/dir/enable)
//! - Pen solenoid
//! - `PinArm`, the complete arm behind `ArmHardware`

#![no_std]
#![deny(unsafe_code)]

pub mod arm;
pub mod pen;
pub mod stepper;

#[cfg(test)]
mod testing;

pub use arm::PinArm;
pub use pen::PenSolenoid;
pub use stepper::{StepAxis, StepDirDriver, StepTiming};
