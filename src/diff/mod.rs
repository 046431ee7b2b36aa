use crate::{
    error::DiffError,
    input::{FileBuffer, Side, reader_lines},
    report::{Block, Report},
    symbol::SymbolTable,
};
use log::{debug, trace};
use std::{
    convert::Infallible,
    io::{BufRead, Write},
};

mod printout;

use printout::Printout;

const DEFAULT_IDENTIFIER: &str = "Diff";
const DEFAULT_MAX_LINES: usize = 20000;

// Length recorded for the block that starts just past the end of the old
// file. Larger than any real block.
const UNREAL: isize = isize::MAX;

/// A collection of options for modifying the way a diff is performed
#[derive(Debug, Clone)]
pub struct DiffOptions {
    identifier: String,
    max_lines: usize,
}

impl DiffOptions {
    /// Construct a new `DiffOptions` with default settings
    ///
    /// ## Defaults
    /// * identifier = `"Diff"`
    /// * max_lines = 20000
    pub fn new() -> Self {
        Self {
            identifier: DEFAULT_IDENTIFIER.to_owned(),
            max_lines: DEFAULT_MAX_LINES,
        }
    }

    /// Set the label printed on the last line of a report
    pub fn set_identifier<S: Into<String>>(&mut self, identifier: S) -> &mut Self {
        self.identifier = identifier.into();
        self
    }

    /// Set the maximum number of non-blank lines accepted from either input
    pub fn set_max_lines(&mut self, max_lines: usize) -> &mut Self {
        self.max_lines = max_lines;
        self
    }

    /// Produce a [`Report`] describing how `old` turns into `new`
    pub fn create_report<O, N>(&self, old: O, new: N) -> Result<Report, DiffError>
    where
        O: IntoIterator,
        O::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        self.try_create_report(
            old.into_iter().map(Ok::<_, Infallible>),
            new.into_iter().map(Ok::<_, Infallible>),
        )
    }

    /// Produce a [`Report`] for two in-memory texts
    pub fn create_report_from_str(&self, old: &str, new: &str) -> Result<Report, DiffError> {
        self.create_report(crate::LineIter::new(old), crate::LineIter::new(new))
    }

    /// Produce a [`Report`] for two buffered readers
    ///
    /// The first read error aborts the diff and is returned as
    /// [`DiffError::Io`].
    pub fn create_report_from_reader<R1, R2>(&self, old: R1, new: R2) -> Result<Report, DiffError>
    where
        R1: BufRead,
        R2: BufRead,
    {
        self.try_create_report(reader_lines(old), reader_lines(new))
    }

    /// Diff two line sequences and write the textual report to `sink`
    ///
    /// Returns `true` if any difference was found.
    pub fn diff<O, N, W>(&self, old: O, new: N, sink: W) -> Result<bool, DiffError>
    where
        O: IntoIterator,
        O::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
        W: Write,
    {
        let report = self.create_report(old, new)?;
        write_report(&report, sink)
    }

    /// Diff two buffered readers and write the textual report to `sink`
    pub fn diff_readers<R1, R2, W>(&self, old: R1, new: R2, sink: W) -> Result<bool, DiffError>
    where
        R1: BufRead,
        R2: BufRead,
        W: Write,
    {
        let report = self.create_report_from_reader(old, new)?;
        write_report(&report, sink)
    }

    fn try_create_report<O, N, SO, SN, EO, EN>(&self, old: O, new: N) -> Result<Report, DiffError>
    where
        O: IntoIterator<Item = Result<SO, EO>>,
        N: IntoIterator<Item = Result<SN, EN>>,
        SO: AsRef<str>,
        SN: AsRef<str>,
        EO: Into<DiffError>,
        EN: Into<DiffError>,
    {
        let mut engine = Engine::read(old, new, self.max_lines)?;
        engine.transform();
        let blocks = engine.printout();
        Ok(Report::new(self.identifier.clone(), blocks))
    }
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn write_report<W: Write>(report: &Report, mut sink: W) -> Result<bool, DiffError> {
    write!(sink, "{}", report)?;
    sink.flush()?;
    Ok(report.has_differences())
}

/// Diff two line sequences with the default options, writing the report to `sink`
///
/// ```
/// let mut out = Vec::new();
/// let changed = blockdiff::diff(["a", "b"], ["a", "x", "b"], &mut out).unwrap();
///
/// assert!(changed);
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     ">>>> INSERT BEFORE 2\nx\n>>>> Diff: End of differences.\n"
/// );
/// ```
pub fn diff<O, N, W>(old: O, new: N, sink: W) -> Result<bool, DiffError>
where
    O: IntoIterator,
    O::Item: AsRef<str>,
    N: IntoIterator,
    N::Item: AsRef<str>,
    W: Write,
{
    DiffOptions::default().diff(old, new, sink)
}

/// Create a [`Report`] for two line sequences with the default options
pub fn create_report<O, N>(old: O, new: N) -> Result<Report, DiffError>
where
    O: IntoIterator,
    O::Item: AsRef<str>,
    N: IntoIterator,
    N::Item: AsRef<str>,
{
    DiffOptions::default().create_report(old, new)
}

/// Create a [`Report`] for two in-memory texts with the default options
pub fn create_report_from_str(old: &str, new: &str) -> Result<Report, DiffError> {
    DiffOptions::default().create_report_from_str(old, new)
}

/// Working state of a single diff.
///
/// `block_len` holds, for each old line that starts a block of matched lines,
/// the length of that block and 0 everywhere else. The printout stamps a block
/// with [`printout::PRINTED`] once it has been reported as a move.
#[derive(Debug)]
struct Engine {
    table: SymbolTable,
    old: FileBuffer,
    new: FileBuffer,
    block_len: Vec<isize>,
}

impl Engine {
    fn read<O, N, SO, SN, EO, EN>(old: O, new: N, max_lines: usize) -> Result<Self, DiffError>
    where
        O: IntoIterator<Item = Result<SO, EO>>,
        N: IntoIterator<Item = Result<SN, EN>>,
        SO: AsRef<str>,
        SN: AsRef<str>,
        EO: Into<DiffError>,
        EN: Into<DiffError>,
    {
        let mut table = SymbolTable::new();
        let mut old = FileBuffer::read(old, Side::Old, &mut table, max_lines)?;
        let mut new = FileBuffer::read(new, Side::New, &mut table, max_lines)?;
        old.alloc();
        new.alloc();
        debug!(
            "read {} old lines, {} new lines, {} distinct",
            old.max_line(),
            new.max_line(),
            table.len()
        );

        Ok(Self {
            table,
            old,
            new,
            block_len: Vec::new(),
        })
    }

    /// Fill in both correspondence arrays and the block lengths
    fn transform(&mut self) {
        self.scan_unique();
        self.scan_after();
        self.scan_before();
        self.scan_blocks();
    }

    fn record_match(&mut self, old_line: usize, new_line: usize) {
        self.new.set_other(new_line, old_line);
        self.old.set_other(old_line, new_line);
    }

    fn matched_lines(&self) -> usize {
        (1..=self.new.max_line())
            .filter(|&line| self.new.is_matched(line))
            .count()
    }

    // Anchor every line used exactly once in each file, and tie the
    // pseudo-lines at both ends to each other.
    fn scan_unique(&mut self) {
        let mut anchors = 0;
        for new_line in 1..=self.new.max_line() {
            let symbol = self.new.symbol(new_line);
            if !self.table.is_unique(symbol) {
                continue;
            }
            if let Some(old_line) = self.table.last_old_line(symbol) {
                self.record_match(old_line, new_line);
                anchors += 1;
            }
        }

        self.record_match(0, 0);
        self.record_match(self.old.max_line() + 1, self.new.max_line() + 1);
        debug!("found {} unique anchors", anchors);
    }

    // Grow each match forwards over lines that compare equal, as long as
    // neither side runs into a line that is already matched.
    fn scan_after(&mut self) {
        let old_max = self.old.max_line();
        let new_max = self.new.max_line();

        let mut new_line = 0;
        while new_line <= new_max {
            if let Some(mut old_line) = self.new.other(new_line) {
                loop {
                    old_line += 1;
                    if old_line > old_max || self.old.is_matched(old_line) {
                        break;
                    }
                    new_line += 1;
                    if new_line > new_max || self.new.is_matched(new_line) {
                        break;
                    }
                    if self.new.symbol(new_line) != self.old.symbol(old_line) {
                        break;
                    }
                    self.record_match(old_line, new_line);
                }
            }
            new_line += 1;
        }

        debug!("{} lines matched after scanning forwards", self.matched_lines());
    }

    // As `scan_after`, towards the front of both files.
    fn scan_before(&mut self) {
        let mut new_line = self.new.max_line() + 1;
        while new_line > 0 {
            if let Some(mut old_line) = self.new.other(new_line) {
                loop {
                    if old_line <= 1 {
                        break;
                    }
                    old_line -= 1;
                    if self.old.is_matched(old_line) {
                        break;
                    }
                    if new_line <= 1 {
                        break;
                    }
                    new_line -= 1;
                    if self.new.is_matched(new_line) {
                        break;
                    }
                    if self.new.symbol(new_line) != self.old.symbol(old_line) {
                        break;
                    }
                    self.record_match(old_line, new_line);
                }
            }
            new_line -= 1;
        }

        debug!("{} lines matched after scanning backwards", self.matched_lines());
    }

    // Find the front and length of every block of matches in the old file.
    fn scan_blocks(&mut self) {
        let old_max = self.old.max_line();
        self.block_len = vec![0; old_max + 2];
        self.block_len[old_max + 1] = UNREAL;

        let mut front = 0;
        let mut new_last: Option<usize> = None;
        let mut blocks = 0;
        for old_line in 1..=old_max {
            let other = self.old.other(old_line);
            match other {
                None => front = 0,
                Some(new_line) => {
                    if front == 0 || new_last.map(|last| last + 1) != Some(new_line) {
                        front = old_line;
                        blocks += 1;
                    }
                    self.block_len[front] += 1;
                }
            }
            new_last = other;
        }

        debug!("found {} blocks", blocks);
    }

    fn printout(&mut self) -> Vec<Block> {
        let printout = Printout::new(&self.table, &self.old, &self.new, &mut self.block_len);
        let blocks = printout.run();
        trace!("report has {} blocks", blocks.len());
        blocks
    }
}
