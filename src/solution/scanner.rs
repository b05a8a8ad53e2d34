//! Raw line access over solution file text.
//!
//! Section bodies round-trip verbatim, so lines are handed out with their
//! terminators still attached (`\n` or `\r\n`). End of input is a `None`,
//! never an error; the parser decides whether running out of lines is legal
//! for the construct it is in the middle of.

/// Sequential reader over solution text.
pub struct LineScanner<'a> {
    rest: &'a str,
}

impl<'a> LineScanner<'a> {
    /// Create a scanner over the full file text. A leading UTF-8 byte-order
    /// mark is stripped so the first line starts at real content.
    pub fn new(text: &'a str) -> Self {
        Self {
            rest: text.strip_prefix('\u{feff}').unwrap_or(text),
        }
    }

    /// The next raw line including its terminator, or `None` at end of input.
    pub fn next_line(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.find('\n') {
            Some(end) => {
                let (line, rest) = self.rest.split_at(end + 1);
                self.rest = rest;
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}
