//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod arm;
pub mod display;

#[cfg(test)]
pub(crate) mod mock;

pub use arm::ArmHardware;
pub use display::{NullDisplay, StatusDisplay};
