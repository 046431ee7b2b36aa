//! Interning of lines shared by both files of a diff

use crate::input::Side;
use hashbrown::HashMap;

/// Handle to a [`LineRecord`] owned by a [`SymbolTable`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolId(usize);

/// How often, and in which files, a line has been seen.
///
/// Transitions only move forward; `Many` is terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OccurrenceState {
    Fresh,
    OldOnce,
    NewOnce,
    BothOnce,
    Many,
}

impl OccurrenceState {
    fn record(self, side: Side) -> Self {
        match (self, side) {
            (OccurrenceState::Fresh, Side::Old) => OccurrenceState::OldOnce,
            (OccurrenceState::Fresh, Side::New) => OccurrenceState::NewOnce,
            (OccurrenceState::OldOnce, Side::New) | (OccurrenceState::NewOnce, Side::Old) => {
                OccurrenceState::BothOnce
            }
            _ => OccurrenceState::Many,
        }
    }
}

/// One distinct line, after compaction and case folding
#[derive(Debug)]
pub struct LineRecord {
    // text of the first occurrence
    content: String,
    state: OccurrenceState,
    last_old_line: Option<usize>,
}

impl LineRecord {
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn state(&self) -> OccurrenceState {
        self.state
    }
}

/// Symbol table for a single diff invocation.
///
/// Lines are keyed by their compacted, case folded text so that `"A  b"` and
/// `"ab"` share a record. Records live in an arena and are addressed by
/// [`SymbolId`]; the table is never shared between diffs.
#[derive(Debug, Default)]
pub struct SymbolTable {
    records: Vec<LineRecord>,
    index: HashMap<String, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `line` in the file on `side`.
    ///
    /// `line_number` is remembered for old-file occurrences; a later occurrence
    /// in the old file overwrites an earlier one.
    pub fn intern(&mut self, line: &str, side: Side, line_number: usize) -> SymbolId {
        let key = comparison_key(line);
        let id = match self.index.get(&key) {
            Some(id) => *id,
            None => {
                let id = SymbolId(self.records.len());
                self.records.push(LineRecord {
                    content: line.to_owned(),
                    state: OccurrenceState::Fresh,
                    last_old_line: None,
                });
                self.index.insert(key, id);
                id
            }
        };

        let record = &mut self.records[id.0];
        record.state = record.state.record(side);
        if side == Side::Old {
            record.last_old_line = Some(line_number);
        }

        id
    }

    /// True when the line occurs exactly once in each file
    pub fn is_unique(&self, id: SymbolId) -> bool {
        self.records[id.0].state == OccurrenceState::BothOnce
    }

    /// Line number of the most recent occurrence in the old file, if any
    pub fn last_old_line(&self, id: SymbolId) -> Option<usize> {
        self.records[id.0].last_old_line
    }

    pub fn get(&self, id: SymbolId) -> &LineRecord {
        &self.records[id.0]
    }

    pub fn content(&self, id: SymbolId) -> &str {
        &self.records[id.0].content
    }

    pub fn state(&self, id: SymbolId) -> OccurrenceState {
        self.records[id.0].state
    }

    /// Number of distinct lines
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Strip carriage returns, trim, and delete every run of interior whitespace.
///
/// This is lossy: `"a b"` and `"ab"` compact to the same text.
pub fn compact(line: &str) -> String {
    line.trim()
        .chars()
        .filter(|c| !matches!(c, '\r' | ' ' | '\t' | '\n'))
        .collect()
}

fn comparison_key(line: &str) -> String {
    compact(line).chars().map(fold_case).collect()
}

// Upper then lower, keeping the original char when a mapping expands to more
// than one char.
fn fold_case(c: char) -> char {
    let upper = single(c.to_uppercase()).unwrap_or(c);
    single(upper.to_lowercase()).unwrap_or(upper)
}

fn single(mut chars: impl Iterator<Item = char>) -> Option<char> {
    let c = chars.next()?;
    match chars.next() {
        Some(_) => None,
        None => Some(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compaction() {
        assert_eq!(compact("  a b\t c  "), "abc");
        assert_eq!(compact("x\r"), "x");
        assert_eq!(compact("\r\ra\r\rb"), "ab");
        assert_eq!(compact(" \t "), "");
    }

    #[test]
    fn keys_ignore_case_and_whitespace() {
        let mut table = SymbolTable::new();
        let a = table.intern("Hello World", Side::Old, 1);
        let b = table.intern("helloworld", Side::New, 1);
        assert_eq!(a, b);
        assert_eq!(table.len(), 1);
        // the first occurrence's text is kept
        assert_eq!(table.content(a), "Hello World");
    }

    #[test]
    fn occurrence_states() {
        let mut table = SymbolTable::new();

        let both = table.intern("both", Side::Old, 1);
        assert_eq!(table.state(both), OccurrenceState::OldOnce);
        table.intern("both", Side::New, 1);
        assert_eq!(table.state(both), OccurrenceState::BothOnce);
        assert!(table.is_unique(both));

        let reverse = table.intern("reverse", Side::New, 2);
        assert_eq!(table.state(reverse), OccurrenceState::NewOnce);
        assert_eq!(table.last_old_line(reverse), None);
        table.intern("reverse", Side::Old, 7);
        assert!(table.is_unique(reverse));
        assert_eq!(table.last_old_line(reverse), Some(7));

        let twice_old = table.intern("twice", Side::Old, 2);
        table.intern("twice", Side::Old, 3);
        assert_eq!(table.state(twice_old), OccurrenceState::Many);

        // a third sighting collapses a unique line, and it never recovers
        table.intern("both", Side::New, 4);
        assert_eq!(table.state(both), OccurrenceState::Many);
        table.intern("both", Side::Old, 9);
        assert_eq!(table.state(both), OccurrenceState::Many);
        assert!(!table.is_unique(both));
    }

    #[test]
    fn last_old_occurrence_wins() {
        let mut table = SymbolTable::new();
        let id = table.intern("dup", Side::Old, 2);
        table.intern("dup", Side::New, 1);
        table.intern("dup", Side::Old, 5);
        assert_eq!(table.last_old_line(id), Some(5));
        assert!(!table.is_unique(id));
    }

    #[test]
    fn case_folding() {
        assert_eq!(fold_case('A'), 'a');
        assert_eq!(fold_case('a'), 'a');
        assert_eq!(fold_case('Ä'), 'ä');
        // expands to "SS" when upper-cased, so it is kept as is
        assert_eq!(fold_case('ß'), 'ß');
        assert_eq!(comparison_key("FOO bar"), "foobar");
    }
}
