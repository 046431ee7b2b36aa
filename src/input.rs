//! Reading line sources into numbered buffers

use crate::{
    error::DiffError,
    symbol::{SymbolId, SymbolTable},
};
use std::io::BufRead;

/// Which of the two files a line belongs to
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Old,
    New,
}

/// A line is blank when it holds nothing but spaces, tabs and carriage returns.
pub fn is_blank(line: &str) -> bool {
    line.chars().all(|c| matches!(c, ' ' | '\t' | '\r'))
}

/// Iterator over the lines of a string, terminators removed.
///
/// A line ends at `\n`, `\r\n` or a lone `\r`. A trailing terminator does not
/// start another (empty) line.
pub struct LineIter<'a>(&'a str);

impl<'a> LineIter<'a> {
    pub fn new(text: &'a str) -> Self {
        Self(text)
    }
}

impl<'a> Iterator for LineIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.0;
        if text.is_empty() {
            return None;
        }

        let (line, remaining) = match text.find(['\n', '\r']) {
            Some(idx) => {
                let skip = if text[idx..].starts_with("\r\n") { 2 } else { 1 };
                (&text[..idx], &text[idx + skip..])
            }
            None => (text, ""),
        };

        self.0 = remaining;
        Some(line)
    }
}

/// Lines of a buffered reader, with the same line rules as [`LineIter`]
pub(crate) fn reader_lines<R: BufRead>(
    mut reader: R,
) -> impl Iterator<Item = Result<String, DiffError>> {
    let mut done = false;
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        let mut buf = Vec::new();
        let read = match reader.read_until(b'\n', &mut buf) {
            Ok(read) => read,
            Err(e) => {
                done = true;
                return Some(Err(e.into()));
            }
        };
        if read == 0 {
            done = true;
            return None;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        Some(Ok(String::from_utf8_lossy(&buf).into_owned()))
    })
    .flat_map(|line| -> Vec<Result<String, DiffError>> {
        match line {
            Ok(line) if line.is_empty() => vec![Ok(line)],
            // a lone carriage return also ends a line
            Ok(line) => LineIter::new(&line).map(|l| Ok(l.to_owned())).collect(),
            Err(e) => vec![Err(e)],
        }
    })
}

/// The retained lines of one file plus its correspondence to the other file.
///
/// Line numbers are 1-based; positions `0` and `max_line + 1` are pseudo-lines
/// that always correspond to each other across the two files.
#[derive(Debug)]
pub struct FileBuffer {
    // symbols[0] is a placeholder for the leading pseudo-line
    symbols: Vec<Option<SymbolId>>,
    other: Vec<Option<usize>>,
}

impl FileBuffer {
    /// Read every non-blank line from `lines` into `table`.
    ///
    /// Fails as soon as more than `max_lines` lines would be retained; source
    /// errors are passed through untouched.
    pub fn read<I, S, E>(
        lines: I,
        side: Side,
        table: &mut SymbolTable,
        max_lines: usize,
    ) -> Result<Self, DiffError>
    where
        I: IntoIterator<Item = Result<S, E>>,
        S: AsRef<str>,
        E: Into<DiffError>,
    {
        let mut symbols = vec![None];

        for line in lines {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Err(e.into()),
            };
            let line = line.as_ref();
            if is_blank(line) {
                continue;
            }

            let line_number = symbols.len();
            if line_number > max_lines {
                return Err(DiffError::TooManyLines { limit: max_lines });
            }
            symbols.push(Some(table.intern(line, side, line_number)));
        }

        Ok(Self {
            symbols,
            other: Vec::new(),
        })
    }

    /// Number of real lines
    pub fn max_line(&self) -> usize {
        self.symbols.len() - 1
    }

    /// Size the correspondence array, everything unknown
    pub fn alloc(&mut self) {
        self.other = vec![None; self.max_line() + 2];
    }

    /// Symbol of real line `line`
    pub fn symbol(&self, line: usize) -> SymbolId {
        match self.symbols[line] {
            Some(id) => id,
            None => panic!("line {} is a pseudo-line", line),
        }
    }

    pub fn other(&self, line: usize) -> Option<usize> {
        self.other[line]
    }

    pub fn is_matched(&self, line: usize) -> bool {
        self.other[line].is_some()
    }

    pub fn set_other(&mut self, line: usize, other: usize) {
        self.other[line] = Some(other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{convert::Infallible, io};

    fn ok(lines: &[&'static str]) -> Vec<Result<&'static str, Infallible>> {
        lines.iter().copied().map(Ok).collect()
    }

    #[test]
    fn blank_lines() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\r "));
        assert!(!is_blank(" x "));
        // only space, tab and CR count
        assert!(!is_blank("\u{a0}"));
    }

    #[test]
    fn line_iter() {
        let lines: Vec<_> = LineIter::new("a\nb\r\nc\rd").collect();
        assert_eq!(lines, ["a", "b", "c", "d"]);

        let lines: Vec<_> = LineIter::new("a\n\nb\n").collect();
        assert_eq!(lines, ["a", "", "b"]);

        assert_eq!(LineIter::new("").count(), 0);
    }

    #[test]
    fn reader_lines_match_line_iter() {
        let text = "one\r\ntwo\rthree\n\nfour";
        let from_reader: Vec<String> = reader_lines(io::Cursor::new(text))
            .collect::<Result<_, _>>()
            .unwrap();
        let from_str: Vec<&str> = LineIter::new(text).collect();
        assert_eq!(from_reader, from_str);
    }

    #[test]
    fn numbering_skips_blank_lines() {
        let mut table = SymbolTable::new();
        let buffer = FileBuffer::read(ok(&["a", "", "  ", "b"]), Side::Old, &mut table, 10).unwrap();
        assert_eq!(buffer.max_line(), 2);
        assert_eq!(table.content(buffer.symbol(1)), "a");
        assert_eq!(table.content(buffer.symbol(2)), "b");
        assert_eq!(table.last_old_line(buffer.symbol(2)), Some(2));
    }

    #[test]
    fn too_many_lines() {
        let mut table = SymbolTable::new();
        let lines = ok(&["a", "", "b", "c"]);

        let buffer = FileBuffer::read(lines.clone(), Side::New, &mut table, 3).unwrap();
        assert_eq!(buffer.max_line(), 3);

        let err = FileBuffer::read(lines, Side::New, &mut table, 2).unwrap_err();
        assert!(matches!(err, DiffError::TooManyLines { limit: 2 }));
    }

    #[test]
    fn source_errors_propagate() {
        let mut table = SymbolTable::new();
        let lines = vec![
            Ok("a"),
            Err(io::Error::new(io::ErrorKind::Other, "boom")),
            Ok("b"),
        ];
        let err = FileBuffer::read(lines, Side::Old, &mut table, 10).unwrap_err();
        match err {
            DiffError::Io(e) => assert_eq!(e.to_string(), "boom"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn alloc_sizes_with_pseudo_lines() {
        let mut table = SymbolTable::new();
        let mut buffer = FileBuffer::read(ok(&["a", "b"]), Side::Old, &mut table, 10).unwrap();
        buffer.alloc();
        assert!((0..4).all(|line| buffer.other(line).is_none()));
        buffer.set_other(3, 1);
        assert_eq!(buffer.other(3), Some(1));
        assert!(buffer.is_matched(3));
    }
}
