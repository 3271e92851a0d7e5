//! Status display trait

/// Sink for the one-line status produced after each command
///
/// The text is for people; nothing should parse it.
pub trait StatusDisplay {
    /// Replace the shown status
    fn show_status(&mut self, text: &str);
}

/// Display that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDisplay;

impl StatusDisplay for NullDisplay {
    fn show_status(&mut self, _text: &str) {}
}
