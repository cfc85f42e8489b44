//! Readers and writers for the plain-text files surrounding a viewpoint
//! computation.
//!
//! Three tab-separated formats are supported:
//!
//! - [`reference_point`]: the anchor loci to compute viewpoints for, one
//!   per line.
//! - [`interaction`]: the per-bin interaction records of a computed
//!   viewpoint, with one header line and a z-score column.
//! - [`background`]: a background model mapping relative positions to a
//!   mean and standard deviation.
//!
//! All readers operate over any [`BufRead`](std::io::BufRead), skip blank
//! lines and `#`-prefixed comment lines, and surface any other malformed
//! line as a parse error.

use std::io;
use std::io::BufRead;

pub mod background;
pub mod interaction;
pub mod reference_point;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// The prefix marking a comment line.
pub(crate) const COMMENT_PREFIX: char = '#';

/// Reads a line from a buffered reader, stripping the line terminator.
pub(crate) fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}

/// Returns whether a line carries no data.
pub(crate) fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with(COMMENT_PREFIX)
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_read_line() {
        let data = b"hello\r\nworld!";
        let mut cursor = io::Cursor::new(data);

        let mut buffer = String::new();
        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "hello");
        assert_eq!(len, 7);

        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "world!");
        assert_eq!(len, 6);

        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(len, 0);
    }

    #[test]
    fn test_is_skippable() {
        assert!(is_skippable(""));
        assert!(is_skippable("# a comment"));
        assert!(!is_skippable("chr1\t100"));
    }
}
