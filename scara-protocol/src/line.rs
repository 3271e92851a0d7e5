//! Byte-oriented line assembly for the serial command channel.
//!
//! Byte handling:
//! - LF (0x0A): terminates the current line
//! - CR (0x0D): ignored, no echo
//! - DEL (0x7F): removes the last buffered character, echoes BS SP BS
//! - anything else: buffered and echoed verbatim
//!
//! A line longer than [`MAX_LINE_LEN`] is discarded whole at its LF.

use heapless::Vec;

/// Line terminator
pub const LF: u8 = 0x0A;

/// Carriage return, ignored
pub const CR: u8 = 0x0D;

/// Delete key as sent by most terminal programs
pub const DEL: u8 = 0x7F;

/// Erases one character on the remote terminal (backspace, space, backspace)
pub const ERASE_SEQUENCE: [u8; 3] = [0x08, 0x20, 0x08];

/// Maximum buffered line length in bytes
pub const MAX_LINE_LEN: usize = 96;

/// Bytes to write back to the terminal for one received byte
pub type Echo = Vec<u8, 3>;

/// A complete line received from the serial channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Line {
    bytes: Vec<u8, MAX_LINE_LEN>,
}

impl Line {
    /// Raw bytes of the line, without terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The line as text
    ///
    /// Returns `None` if the line contains bytes that are not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok()
    }

    /// Check if the line holds no bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Result of feeding one byte to the assembler
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineEvent {
    /// Byte consumed; write these bytes back to the terminal
    Echo(Echo),
    /// Byte consumed with nothing to write back
    Ignored,
    /// Line terminator received
    Complete(Line),
    /// Line terminator received after the buffer overflowed; the line is gone
    Overflow,
}

/// Accumulates bytes into lines
#[derive(Debug, Clone, Default)]
pub struct LineAssembler {
    pending: Line,
    /// Bytes were dropped since the last terminator
    overflowed: bool,
}

impl LineAssembler {
    /// Create an assembler with an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard any partially received line
    pub fn reset(&mut self) {
        self.pending.bytes.clear();
        self.overflowed = false;
    }

    /// Bytes received since the last terminator
    pub fn pending(&self) -> &[u8] {
        self.pending.as_bytes()
    }

    /// Feed a single byte
    pub fn feed(&mut self, byte: u8) -> LineEvent {
        match byte {
            LF => {
                let line = core::mem::take(&mut self.pending);
                if core::mem::take(&mut self.overflowed) {
                    LineEvent::Overflow
                } else {
                    LineEvent::Complete(line)
                }
            }
            CR => LineEvent::Ignored,
            DEL => {
                self.pending.bytes.pop();
                LineEvent::Echo(Vec::from_slice(&ERASE_SEQUENCE).unwrap_or_default())
            }
            _ => {
                if self.pending.bytes.push(byte).is_err() {
                    // Line full; no echo, and the line is thrown away at LF
                    self.overflowed = true;
                    return LineEvent::Ignored;
                }
                let mut echo = Echo::new();
                let _ = echo.push(byte);
                LineEvent::Echo(echo)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(assembler: &mut LineAssembler, bytes: &[u8]) -> Option<Line> {
        let mut line = None;
        for &b in bytes {
            if let LineEvent::Complete(l) = assembler.feed(b) {
                line = Some(l);
            }
        }
        line
    }

    #[test]
    fn test_plain_byte_is_buffered_and_echoed() {
        let mut asm = LineAssembler::new();
        assert_eq!(asm.feed(b'G'), LineEvent::Echo(Vec::from_slice(b"G").unwrap()));
        assert_eq!(asm.pending(), b"G");
    }

    #[test]
    fn test_linefeed_completes_and_clears() {
        let mut asm = LineAssembler::new();
        let line = feed_all(&mut asm, b"G0 10 20\n").unwrap();
        assert_eq!(line.as_str(), Some("G0 10 20"));
        assert!(asm.pending().is_empty());
    }

    #[test]
    fn test_carriage_return_ignored() {
        let mut asm = LineAssembler::new();
        assert_eq!(asm.feed(CR), LineEvent::Ignored);
        let line = feed_all(&mut asm, b"C0\r\n").unwrap();
        assert_eq!(line.as_str(), Some("C0"));
    }

    #[test]
    fn test_delete_removes_last_char() {
        let mut asm = LineAssembler::new();
        feed_all(&mut asm, b"P2");
        assert_eq!(
            asm.feed(DEL),
            LineEvent::Echo(Vec::from_slice(&ERASE_SEQUENCE).unwrap())
        );
        let line = feed_all(&mut asm, b"1\n").unwrap();
        assert_eq!(line.as_str(), Some("P1"));
    }

    #[test]
    fn test_delete_on_empty_buffer_still_echoes_erase() {
        let mut asm = LineAssembler::new();
        assert_eq!(
            asm.feed(DEL),
            LineEvent::Echo(Vec::from_slice(&ERASE_SEQUENCE).unwrap())
        );
        assert!(asm.pending().is_empty());
    }

    #[test]
    fn test_empty_line() {
        let mut asm = LineAssembler::new();
        let line = feed_all(&mut asm, b"\n").unwrap();
        assert!(line.is_empty());
    }

    #[test]
    fn test_overflow_drops_bytes_without_echo() {
        let mut asm = LineAssembler::new();
        for _ in 0..MAX_LINE_LEN {
            asm.feed(b'x');
        }
        assert_eq!(asm.feed(b'y'), LineEvent::Ignored);
        assert_eq!(asm.pending().len(), MAX_LINE_LEN);
        assert!(!asm.pending().contains(&b'y'));
    }

    #[test]
    fn test_overflowed_line_is_discarded() {
        let mut asm = LineAssembler::new();
        let mut text = b"G0 50".to_vec();
        text.resize(MAX_LINE_LEN - 2, b' ');
        text.extend_from_slice(b"150");
        let mut events = text.iter().map(|&b| asm.feed(b)).collect::<std::vec::Vec<_>>();
        events.push(asm.feed(LF));

        assert_eq!(events.last(), Some(&LineEvent::Overflow));
        assert!(!events.iter().any(|e| matches!(e, LineEvent::Complete(_))));
        assert!(asm.pending().is_empty());

        // Next line is unaffected
        let line = feed_all(&mut asm, b"E0\n").unwrap();
        assert_eq!(line.as_str(), Some("E0"));
    }

    #[test]
    fn test_line_of_exactly_max_len_completes() {
        let mut asm = LineAssembler::new();
        let mut text = [b'x'; MAX_LINE_LEN + 1];
        text[MAX_LINE_LEN] = LF;
        let line = feed_all(&mut asm, &text).unwrap();
        assert_eq!(line.as_bytes().len(), MAX_LINE_LEN);
    }

    #[test]
    fn test_reset_clears_overflow() {
        let mut asm = LineAssembler::new();
        for _ in 0..=MAX_LINE_LEN {
            asm.feed(b'x');
        }
        asm.reset();
        let line = feed_all(&mut asm, b"C0\n").unwrap();
        assert_eq!(line.as_str(), Some("C0"));
    }

    #[test]
    fn test_invalid_utf8_line() {
        let mut asm = LineAssembler::new();
        let line = feed_all(&mut asm, &[0xC3, b'\n']).unwrap();
        assert_eq!(line.as_str(), None);
    }

    #[test]
    fn test_reset_discards_partial_line() {
        let mut asm = LineAssembler::new();
        feed_all(&mut asm, b"G0 1");
        asm.reset();
        let line = feed_all(&mut asm, b"E0\n").unwrap();
        assert_eq!(line.as_str(), Some("E0"));
    }
}
