//! Board-agnostic core logic for the SCARA arm firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Robot configuration types
//! - Geometry: circle intersection, inverse and forward kinematics, paths
//! - Motion manager with coordinated two-joint stepping
//! - Motor enable interlock
//! - Hardware abstraction traits
//! - Serial command interpreter

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod geometry;
pub mod interpreter;
pub mod motion;
pub mod safety;
pub mod traits;
