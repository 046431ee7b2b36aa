//! Replaying the matches as a report, in one pass over both files

use super::Block;
use crate::{input::FileBuffer, symbol::SymbolTable};
use log::trace;

/// Block length stamped on a block once it has been reported as a move
pub(super) const PRINTED: isize = -1;

/// What kind of run was emitted last. A directive header is only written
/// when this changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Status {
    Idle,
    Delete,
    Insert,
    MoveNew,
    MoveOld,
    Same,
    Change,
}

pub(super) struct Printout<'a> {
    table: &'a SymbolTable,
    old: &'a FileBuffer,
    new: &'a FileBuffer,
    block_len: &'a mut [isize],

    status: Status,
    old_line: usize,
    new_line: usize,
    blocks: Vec<Block>,
}

impl<'a> Printout<'a> {
    pub(super) fn new(
        table: &'a SymbolTable,
        old: &'a FileBuffer,
        new: &'a FileBuffer,
        block_len: &'a mut [isize],
    ) -> Self {
        Self {
            table,
            old,
            new,
            block_len,
            status: Status::Idle,
            old_line: 1,
            new_line: 1,
            blocks: Vec::new(),
        }
    }

    pub(super) fn run(mut self) -> Vec<Block> {
        loop {
            if self.old_line > self.old.max_line() {
                self.new_consume();
                break;
            }
            if self.new_line > self.new.max_line() {
                self.old_consume();
                break;
            }

            if !self.new.is_matched(self.new_line) {
                if !self.old.is_matched(self.old_line) {
                    self.show_change();
                } else {
                    self.show_insert();
                }
            } else if !self.old.is_matched(self.old_line) {
                self.show_delete();
            } else if self.block_len[self.old_line] < 0 {
                self.skip_old();
            } else if self.old.other(self.old_line) == Some(self.new_line) {
                self.show_same();
            } else {
                self.show_move();
            }
        }

        self.blocks
    }

    // Out of old lines: the rest of the new file is inserts and moves.
    fn new_consume(&mut self) {
        while self.new_line <= self.new.max_line() {
            if self.new.is_matched(self.new_line) {
                self.show_move();
            } else {
                self.show_insert();
            }
        }
    }

    // Out of new lines: the rest of the old file is deletes and moves.
    fn old_consume(&mut self) {
        while self.old_line <= self.old.max_line() {
            match self.old.other(self.old_line) {
                None => self.show_delete(),
                Some(new_line) => {
                    self.new_line = new_line;
                    if self.block_len[self.old_line] < 0 {
                        self.skip_old();
                    } else {
                        self.show_move();
                    }
                }
            }
        }
    }

    fn old_text(&self) -> &'a str {
        self.table.content(self.old.symbol(self.old_line))
    }

    fn new_text(&self) -> &'a str {
        self.table.content(self.new.symbol(self.new_line))
    }

    fn push_line(&mut self, line: &str) {
        match self.blocks.last_mut() {
            Some(block) => block.push(line),
            None => unreachable!("line emitted before any directive"),
        }
    }

    fn show_delete(&mut self) {
        if self.status != Status::Delete {
            self.blocks.push(Block::Delete {
                at: self.old_line,
                lines: Vec::new(),
            });
        }
        self.status = Status::Delete;
        self.push_line(self.old_text());
        self.old_line += 1;
    }

    fn show_insert(&mut self) {
        let line = self.new_text();
        if self.status == Status::Change {
            // inserts right after a change are the replacement text
            match self.blocks.last_mut() {
                Some(block) => block.push_changed_to(line),
                None => unreachable!("change status without a change block"),
            }
        } else {
            if self.status != Status::Insert {
                self.blocks.push(Block::Insert {
                    before: self.old_line,
                    lines: Vec::new(),
                });
            }
            self.push_line(line);
        }
        self.status = Status::Insert;
        self.new_line += 1;
    }

    fn show_change(&mut self) {
        if self.status != Status::Change {
            self.blocks.push(Block::Change {
                at: self.old_line,
                from: Vec::new(),
                to: Vec::new(),
            });
        }
        self.status = Status::Change;
        self.push_line(self.old_text());
        self.old_line += 1;
    }

    // Skip an old block that has already been reported as a move.
    fn skip_old(&mut self) {
        self.status = Status::Idle;
        loop {
            self.old_line += 1;
            if self.old_line > self.old.max_line()
                || !self.old.is_matched(self.old_line)
                || self.block_len[self.old_line] != 0
            {
                break;
            }
        }
    }

    // Skip a new block that has already been reported as a move.
    fn skip_new(&mut self) {
        self.status = Status::Idle;
        loop {
            self.new_line += 1;
            if self.new_line > self.new.max_line() {
                break;
            }
            match self.new.other(self.new_line) {
                Some(old_line) if self.block_len[old_line] == 0 => {}
                _ => break,
            }
        }
    }

    fn show_same(&mut self) {
        self.status = Status::Same;
        assert_eq!(
            self.new.other(self.new_line),
            Some(self.old_line),
            "bug in line referencing"
        );
        let count = self.block_len[self.old_line] as usize;
        self.old_line += count;
        self.new_line += count;
    }

    // The blocks at the two cursors are different blocks. The longer one is
    // assumed to have stayed put; the shorter one is reported as moved.
    fn show_move(&mut self) {
        let old_block = self.block_len[self.old_line];
        let new_other = match self.new.other(self.new_line) {
            Some(line) => line,
            None => unreachable!("move from an unmatched line"),
        };
        let new_block = self.block_len[new_other];

        if new_block < 0 {
            trace!("new line {} already reported as moved", self.new_line);
            self.skip_new();
        } else if old_block >= new_block {
            self.block_len[new_other] = PRINTED;
            let len = new_block as usize;
            trace!(
                "old lines {}..={} moved before {}",
                new_other,
                new_other + len - 1,
                self.old_line
            );
            self.blocks.push(Block::Move {
                first: new_other,
                last: new_other + len - 1,
                before: self.old_line,
                lines: Vec::new(),
            });
            for _ in 0..len {
                self.push_line(self.new_text());
                self.new_line += 1;
            }
            self.status = Status::MoveNew;
        } else {
            // display later, once the new file reaches this block
            self.skip_old();
            self.status = Status::MoveOld;
        }
    }
}
