//! SCARA Serial Command Protocol
//!
//! This crate defines the line-oriented ASCII protocol spoken over the
//! controller's serial port. It is designed to be typed by hand into a
//! terminal program as easily as it is generated by a host script.
//!
//! # Protocol Overview
//!
//! One command per line, terminated by LF. CR is ignored, DEL erases the
//! last character. Tokens are whitespace separated; the first token is a
//! two-character opcode:
//! ```text
//! G0 <x> <y>              move pen to a Cartesian point
//! V0 <z>                  move vertical axis
//! S0 <steps> / S1 <steps> jog upper / lower joint
//! C0 / C1                 make current pose home / make current height home
//! P0 / P1                 pen up / pen down
//! E0 / E1 [ms]            motors off / motors on
//! D0 <ms>                 default motor-on time
//! Q0                      report position
//! L0 <x1> <y1> <x2> <y2>  draw a line
//! O0 <cx> <cy> <r>        draw a circle
//! ```
//!
//! Every byte except CR and DEL is echoed back so an interactive terminal
//! shows what was typed.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod args;
pub mod command;
pub mod line;

pub use args::{extract_int, extract_num, ParseError};
pub use command::{CommandLine, Opcode, MAX_TOKENS};
pub use line::{Echo, Line, LineAssembler, LineEvent, ERASE_SEQUENCE, MAX_LINE_LEN};
