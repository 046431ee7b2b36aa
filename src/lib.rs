//! Tools for finding the differences between two files, including blocks of
//! lines that were moved.
//!
//! ## Overview
//!
//! This library isolates the differences between two sequences of lines the
//! way the classic "unique line" technique does: every line that occurs
//! exactly once in each file is taken as a sure match, and runs of equal lines
//! are grown outwards from those anchors. Whatever remains is reported as
//! deleted, inserted or changed, and matched runs that appear in a different
//! order are reported as moves rather than as a deletion plus an insertion.
//!
//! Lines are compared after removing carriage returns and *all* whitespace,
//! ignoring case, and blank lines are dropped before numbering. As a
//! consequence `"a b"` and `"ab"` are considered the same line.
//!
//! ## Creating a Report
//!
//! ```
//! use blockdiff::create_report_from_str;
//!
//! let original = "\
//! Bridge four
//! Kaladin
//! Teft
//! Rock
//! Sigzil
//! ";
//!
//! let modified = "\
//! Bridge four
//! Teft
//! Rock
//! Sigzil
//! Kaladin
//! Lopen
//! ";
//!
//! let expected = "\
//! >>>> 2 THRU 2 MOVED TO BEFORE 6
//! Kaladin
//! >>>> INSERT BEFORE 6
//! Lopen
//! >>>> Diff: End of differences.
//! ";
//!
//! let report = create_report_from_str(original, modified).unwrap();
//! assert_eq!(report.to_string(), expected);
//! ```
//!
//! Line numbers in a report always refer to the old file, counting only its
//! non-blank lines.
//!
//! ## Options
//!
//! [`DiffOptions`] sets the label printed at the end of the report and the
//! ceiling on the number of lines accepted from each input:
//!
//! ```
//! use blockdiff::{DiffError, DiffOptions};
//!
//! let mut options = DiffOptions::new();
//! options.set_identifier("notes").set_max_lines(2);
//!
//! let report = options.create_report(["a", "b"], ["a", "b"]).unwrap();
//! assert_eq!(report.to_string(), ">>>> notes: Files are identical.\n");
//!
//! let err = options.create_report(["a", "b", "c"], ["a"]).unwrap_err();
//! assert!(matches!(err, DiffError::TooManyLines { limit: 2 }));
//! ```
//!
//! With the `color` feature a [`ReportFormatter`] can render the report with
//! ANSI colors.

mod diff;
mod error;
mod input;
mod report;
mod symbol;

pub use diff::{DiffOptions, create_report, create_report_from_str, diff};
pub use error::DiffError;
pub use input::{LineIter, Side, is_blank};
pub use report::{Block, Report, ReportFormatter};
pub use symbol::{LineRecord, OccurrenceState, SymbolId, SymbolTable, compact};
