mod format;

pub use format::ReportFormatter;

use std::fmt;

const PREFIX: &str = ">>>>";

/// The outcome of diffing two files.
///
/// A `Report` is an ordered list of [`Block`]s describing how to turn the old
/// file into the new one. Every line number in it refers to the old file,
/// counting only non-blank lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    identifier: String,
    blocks: Vec<Block>,
}

impl Report {
    pub(crate) fn new(identifier: String, blocks: Vec<Block>) -> Self {
        Self { identifier, blocks }
    }

    /// Label printed on the final line of the report
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns `true` if anything was deleted, inserted, changed or moved
    pub fn has_differences(&self) -> bool {
        !self.blocks.is_empty()
    }

    pub fn is_identical(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ReportFormatter::new().fmt_report(self))
    }
}

/// A run of lines sharing one directive header
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// Old lines starting at `at` that have no counterpart in the new file
    Delete { at: usize, lines: Vec<String> },
    /// New lines to be inserted before old line `before`
    Insert { before: usize, lines: Vec<String> },
    /// Old lines starting at `at` replaced by the `to` lines
    Change {
        at: usize,
        from: Vec<String>,
        to: Vec<String>,
    },
    /// Old lines `first` through `last` that reappear before old line `before`
    Move {
        first: usize,
        last: usize,
        before: usize,
        lines: Vec<String>,
    },
}

impl Block {
    /// Append a line to the side of the block currently being written
    pub(crate) fn push(&mut self, line: &str) {
        let lines = match self {
            Block::Delete { lines, .. } | Block::Insert { lines, .. } | Block::Move { lines, .. } => {
                lines
            }
            Block::Change { from, to, .. } if to.is_empty() => from,
            Block::Change { to, .. } => to,
        };
        lines.push(line.to_owned());
    }

    /// Start the replacement half of a change
    pub(crate) fn push_changed_to(&mut self, line: &str) {
        match self {
            Block::Change { to, .. } => to.push(line.to_owned()),
            _ => panic!("changed-to lines require a change block"),
        }
    }
}
