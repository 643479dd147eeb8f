//! Input helpers for interactive commands.

use std::io::{self, BufRead};

/// Reads a line of input from a buffered reader, blocking until available.
///
/// Returns the trimmed line, or `None` on EOF. Bytes that are not valid
/// UTF-8 are replaced rather than ending the input, so the caller can report
/// the line and keep reading.
///
/// # Errors
///
/// Propagates read failures from the underlying reader.
///
/// ```rust
/// use std::io::Cursor;
/// # use rochambeau_cli::io_utils::read_stdin_line;
///
/// let mut input = Cursor::new(&b"  rock \n\xff\nq\n"[..]);
/// assert_eq!(read_stdin_line(&mut input).unwrap().as_deref(), Some("rock"));
/// assert_eq!(read_stdin_line(&mut input).unwrap().as_deref(), Some("\u{FFFD}"));
/// assert_eq!(read_stdin_line(&mut input).unwrap().as_deref(), Some("q"));
/// assert_eq!(read_stdin_line(&mut input).unwrap(), None);
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if stdin.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("stdin closed unexpectedly"))
        }
    }

    #[test]
    fn invalid_utf8_line_is_returned_not_treated_as_eof() {
        let mut input = Cursor::new(b"\xff\xfe\npaper\n".to_vec());
        let first = read_stdin_line(&mut input).unwrap().expect("a line");
        assert!(first.contains('\u{FFFD}'));
        assert_eq!(read_stdin_line(&mut input).unwrap().as_deref(), Some("paper"));
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let mut input = Cursor::new(b"scissors".to_vec());
        assert_eq!(read_stdin_line(&mut input).unwrap().as_deref(), Some("scissors"));
        assert_eq!(read_stdin_line(&mut input).unwrap(), None);
    }

    #[test]
    fn read_failure_is_propagated() {
        let mut input = io::BufReader::new(FailingReader);
        assert!(read_stdin_line(&mut input).is_err());
    }
}
