//! Status text
//!
//! One short line per command, shown on the display and written back on
//! the serial channel.

use core::fmt::{self, Write};

use heapless::String;

/// Maximum status length in bytes
pub const STATUS_LEN: usize = 64;

/// Status line produced by a command
pub type Status = String<STATUS_LEN>;

/// Writer that drops whatever does not fit
struct Truncating<'a>(&'a mut Status);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Render a status, cutting it short at `STATUS_LEN`
pub fn format_status(args: fmt::Arguments<'_>) -> Status {
    let mut status = Status::new();
    let _ = Truncating(&mut status).write_fmt(args);
    status
}

macro_rules! status {
    ($($arg:tt)*) => {
        $crate::interpreter::status::format_status(format_args!($($arg)*))
    };
}

pub(crate) use status;
