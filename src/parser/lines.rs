//! Forward-only line source over a buffered reader

use std::io::{self, BufRead};

/// Yields lines from a reader one at a time, keeping each line's terminator.
///
/// The source always holds a "current" line that can be inspected before
/// advancing. Consumed lines are not retained.
pub struct LineSource<R> {
    reader: R,
    current: String,
    done: bool,
}

impl<R: BufRead> LineSource<R> {
    /// Creates a source and reads the first line
    pub fn new(reader: R) -> io::Result<Self> {
        let mut source = Self {
            reader,
            current: String::new(),
            done: false,
        };
        source.advance()?;
        Ok(source)
    }

    /// The current line including its terminator, or `None` at end of input
    pub fn current(&self) -> Option<&str> {
        if self.done {
            None
        } else {
            Some(&self.current)
        }
    }

    /// Moves to the next line. Returns false once input is exhausted.
    pub fn advance(&mut self) -> io::Result<bool> {
        if self.done {
            return Ok(false);
        }

        self.current.clear();
        if self.reader.read_line(&mut self.current)? == 0 {
            self.done = true;
        }

        Ok(!self.done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_lines_with_terminators() {
        let mut source = LineSource::new("one\ntwo\r\nthree".as_bytes()).unwrap();

        assert_eq!(source.current(), Some("one\n"));
        assert!(source.advance().unwrap());
        assert_eq!(source.current(), Some("two\r\n"));
        assert!(source.advance().unwrap());
        assert_eq!(source.current(), Some("three"));
        assert!(!source.advance().unwrap());
        assert_eq!(source.current(), None);
    }

    #[test]
    fn empty_input_has_no_current_line() {
        let mut source = LineSource::new("".as_bytes()).unwrap();
        assert_eq!(source.current(), None);
        assert!(!source.advance().unwrap());
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let bytes: &[u8] = &[b'o', b'k', b'\n', 0xff, 0xfe, b'\n'];
        let mut source = LineSource::new(bytes).unwrap();
        assert_eq!(source.current(), Some("ok\n"));

        let err = source.advance().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
