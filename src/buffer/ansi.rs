//! ANSI escape sequence filtering
//!
//! Output fed through a pseudo-terminal (see the unbuffer option) is often
//! decorated with colour and cursor sequences. The filter keeps its state
//! between chunks, so a sequence split across two reads is still removed.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Text,
    /// Saw ESC
    Escape,
    /// Inside `ESC [ ...`, ends at a byte in 0x40..=0x7E
    Csi,
    /// Inside `ESC ] ...`, ends at BEL or `ESC \`
    Osc,
    /// Saw ESC inside an OSC string
    OscEscape,
    /// `ESC (` / `ESC )`, one designator byte follows
    Charset,
}

/// Streaming ANSI stripper.
#[derive(Debug, Clone, Default)]
pub struct AnsiFilter {
    state: State,
}

impl AnsiFilter {
    /// Create a filter in plain-text state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the printable part of `data` to `out`.
    pub fn filter_into(&mut self, data: &[u8], out: &mut Vec<u8>) {
        for &byte in data {
            self.state = match (self.state, byte) {
                (State::Text, 0x1b) => State::Escape,
                (State::Text, _) => {
                    out.push(byte);
                    State::Text
                }
                (State::Escape, b'[') => State::Csi,
                (State::Escape, b']') => State::Osc,
                (State::Escape, b'(' | b')') => State::Charset,
                (State::Escape, _) => State::Text,
                (State::Csi, 0x40..=0x7e) => State::Text,
                (State::Csi, _) => State::Csi,
                (State::Osc, 0x07) => State::Text,
                (State::Osc, 0x1b) => State::OscEscape,
                (State::Osc, _) => State::Osc,
                (State::OscEscape, b'\\') => State::Text,
                (State::OscEscape, _) => State::Osc,
                (State::Charset, _) => State::Text,
            };
        }
    }
}

/// Strip ANSI escape sequences from a complete byte slice.
pub fn strip_ansi(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    AnsiFilter::new().filter_into(data, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_colour() {
        assert_eq!(strip_ansi(b"ok \x1b[1;32mPASS\x1b[0m done"), b"ok PASS done");
    }

    #[test]
    fn test_strip_title() {
        assert_eq!(strip_ansi(b"\x1b]0;my title\x07$ "), b"$ ");
        assert_eq!(strip_ansi(b"\x1b]2;t\x1b\\$ "), b"$ ");
    }

    #[test]
    fn test_strip_charset_and_short_escape() {
        assert_eq!(strip_ansi(b"\x1b(Bplain\x1b="), b"plain");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(strip_ansi(b"Password: "), b"Password: ");
    }

    #[test]
    fn test_sequence_split_across_chunks() {
        let mut filter = AnsiFilter::new();
        let mut out = Vec::new();
        filter.filter_into(b"he\x1b[3", &mut out);
        filter.filter_into(b"1mllo\x1b", &mut out);
        filter.filter_into(b"[0m", &mut out);
        assert_eq!(out, b"hello");
    }
}
