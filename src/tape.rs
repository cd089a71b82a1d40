//! The machine tape: a bi-infinite, integer-indexed array of symbols, almost
//! all blank, with a read/write head.
//!
//! The tape is represented as two persistent sequences growing outward from
//! the head: `right` holds the cells at and after the head position, `left`
//! holds the cells before it, nearest first. Head movement and writes at the
//! head are O(1), every update returns a new `Tape` value, and all untouched
//! cells are shared between versions. Range reads synthesize blanks for cells
//! that were never written, so the conceptually infinite tape is never
//! materialized.

use std::fmt;

use crate::sequence::Sequence;
use crate::types::{MachineError, Move, Symbol};

/// An immutable tape value. Position 1 is the conventional start of the
/// tape; [`Tape::new`] and [`Tape::with_input`] place the head there.
#[derive(Debug, Clone)]
pub struct Tape {
    blank: Symbol,
    /// Cells strictly left of the head: position `head - 1`, `head - 2`, ...
    left: Sequence<Symbol>,
    /// Cells at and right of the head: position `head`, `head + 1`, ...
    /// Holds at least the current cell at all times.
    right: Sequence<Symbol>,
    head: i64,
}

impl Tape {
    /// An empty tape over `blank`, with a single blank cell materialized
    /// under the head.
    pub fn new(blank: Symbol) -> Self {
        Tape {
            blank,
            left: Sequence::new(),
            right: Sequence::singleton(blank),
            head: 1,
        }
    }

    /// A tape initialized with `input` starting at position 1, head on the
    /// first input cell.
    pub fn with_input(blank: Symbol, input: impl IntoIterator<Item = Symbol>) -> Self {
        let right: Sequence<Symbol> = input.into_iter().collect();

        Tape {
            blank,
            left: Sequence::new(),
            right: right.pad(blank, 1),
            head: 1,
        }
    }

    /// A tape initialized from the characters of `input`.
    pub fn from_text(blank: Symbol, input: &str) -> Self {
        Self::with_input(blank, input.chars().map(Symbol::new))
    }

    pub fn blank(&self) -> Symbol {
        self.blank
    }

    /// The absolute position of the head.
    pub fn head_position(&self) -> i64 {
        self.head
    }

    /// The symbol under the head.
    pub fn current_symbol(&self) -> Symbol {
        // `right` is never empty, but staying total costs nothing.
        self.right.peek().copied().unwrap_or(self.blank)
    }

    /// Writes `new_symbol` over the current cell, then shifts the head per
    /// `direction`, returning the updated tape. The receiver is unchanged;
    /// both tapes share every cell not touched by this step.
    pub fn apply(&self, new_symbol: Symbol, direction: Move) -> Tape {
        let (left, right, head) = match direction {
            Move::Stay => (
                self.left.clone(),
                rest(&self.right).push(new_symbol),
                self.head,
            ),
            Move::Right => (self.left.push(new_symbol), rest(&self.right), self.head + 1),
            Move::Left => (
                rest(&self.left),
                rest(&self.right)
                    .push(new_symbol)
                    .push(self.left.peek().copied().unwrap_or(self.blank)),
                self.head - 1,
            ),
        };

        Tape {
            blank: self.blank,
            left,
            // A head cell must always exist; moving right off the written
            // portion materializes the next blank.
            right: right.pad(self.blank, 1),
            head,
        }
    }

    /// The symbols at absolute positions `[from, to)` in increasing position
    /// order, synthesizing `blank` for cells never written.
    pub fn read(&self, from: i64, to: i64) -> Result<Sequence<Symbol>, MachineError> {
        if to < from {
            return Err(MachineError::InvalidRange { from, to });
        }

        Ok(self.span(from, to))
    }

    /// The maximal run of non-blank symbols from position 1 rightward,
    /// stopping before the first blank. Independent of the head position.
    pub fn output(&self) -> Sequence<Symbol> {
        let end = self.head + self.right.len() as i64;

        if end <= 1 {
            // Nothing is materialized at or after position 1.
            return Sequence::new();
        }

        let cells = self.span(1, end);
        let run = cells.iter().take_while(|s| **s != self.blank).count();

        cells.truncate(run).unwrap_or_default()
    }

    /// Symbols at `[from, to)`. Callers guarantee `from <= to`.
    fn span(&self, from: i64, to: i64) -> Sequence<Symbol> {
        // Portion strictly left of the head. `left` stores these cells
        // nearest-first, so the requested window is reversed after cells
        // missing beyond the written end are filled with blanks.
        let left_part: Sequence<Symbol> = {
            let end = to.min(self.head);

            if from < end {
                let skip = (self.head - end) as usize;
                let take = (end - from) as usize;

                let mut cells: Vec<Symbol> =
                    self.left.iter().skip(skip).take(take).copied().collect();
                cells.resize(take, self.blank);
                cells.reverse();
                cells.into_iter().collect()
            } else {
                Sequence::new()
            }
        };

        // Portion at and right of the head, already in increasing order.
        let right_part: Sequence<Symbol> = {
            let start = from.max(self.head);

            if to > start {
                let skip = (start - self.head) as usize;
                let take = (to - start) as usize;

                let mut cells: Vec<Symbol> =
                    self.right.iter().skip(skip).take(take).copied().collect();
                cells.resize(take, self.blank);
                cells.into_iter().collect()
            } else {
                Sequence::new()
            }
        };

        right_part.concat(&left_part)
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lo = self.head - self.left.len() as i64;
        let hi = self.head + self.right.len() as i64;

        let cells: String = self.span(lo, hi).iter().map(|s| s.as_char()).collect();

        write!(f, "Tape [{cells}] head at {}", self.head)
    }
}

/// The sequence without its first element; empty stays empty.
fn rest(sequence: &Sequence<Symbol>) -> Sequence<Symbol> {
    sequence.pop().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLANK: Symbol = Symbol::BLANK;

    fn symbols(text: &str) -> Sequence<Symbol> {
        text.chars().map(Symbol::new).collect()
    }

    fn sym(c: char) -> Symbol {
        Symbol::new(c)
    }

    #[test]
    fn test_new_tape_has_one_blank_cell() {
        let tape = Tape::new(BLANK);

        assert_eq!(tape.head_position(), 1);
        assert_eq!(tape.current_symbol(), BLANK);
        assert_eq!(tape.read(1, 2).unwrap(), symbols("^"));
    }

    #[test]
    fn test_with_input_starts_at_position_one() {
        let tape = Tape::from_text(BLANK, "110");

        assert_eq!(tape.head_position(), 1);
        assert_eq!(tape.current_symbol(), sym('1'));
        assert_eq!(tape.read(1, 4).unwrap(), symbols("110"));
    }

    #[test]
    fn test_with_empty_input_materializes_the_head_cell() {
        let tape = Tape::from_text(BLANK, "");

        assert_eq!(tape.current_symbol(), BLANK);
        assert_eq!(tape.read(1, 2).unwrap(), symbols("^"));
    }

    #[test]
    fn test_apply_stay_overwrites_current_cell() {
        let tape = Tape::new(BLANK).apply(sym('0'), Move::Stay);

        assert_eq!(tape.head_position(), 1);
        assert_eq!(tape.read(1, 2).unwrap(), symbols("0"));
    }

    #[test]
    fn test_apply_does_not_mutate_the_receiver() {
        let tape = Tape::new(BLANK);
        let _updated = tape.apply(sym('0'), Move::Right);

        assert_eq!(tape.head_position(), 1);
        assert_eq!(tape.current_symbol(), BLANK);
    }

    #[test]
    fn test_read_with_to_less_than_from_fails() {
        let tape = Tape::new(BLANK);

        assert_eq!(
            tape.read(4, 3).unwrap_err(),
            MachineError::InvalidRange { from: 4, to: 3 }
        );
    }

    #[test]
    fn test_read_with_empty_range_returns_empty() {
        let tape = Tape::new(BLANK);

        assert!(tape.read(-3, -3).unwrap().is_empty());
    }

    #[test]
    fn test_read_pads_unvisited_cells_on_the_right() {
        let tape = Tape::new(BLANK).apply(sym('0'), Move::Stay);

        assert_eq!(tape.read(1, 4).unwrap(), symbols("0^^"));
    }

    #[test]
    fn test_read_pads_unvisited_cells_on_the_left() {
        let tape = Tape::new(BLANK).apply(sym('0'), Move::Stay);

        assert_eq!(tape.read(-1, 2).unwrap(), symbols("^^0"));
    }

    #[test]
    fn test_read_of_wholly_unvisited_ranges_returns_blanks() {
        let tape = Tape::new(BLANK);

        assert_eq!(tape.read(-3, -1).unwrap(), symbols("^^"));
        assert_eq!(tape.read(3, 5).unwrap(), symbols("^^"));
        assert_eq!(tape.read(-3, 3).unwrap(), symbols("^^^^^^"));
    }

    #[test]
    fn test_read_after_moving_left_adjusts_for_negative_positions() {
        let tape = Tape::new(BLANK).apply(sym('0'), Move::Left);

        assert_eq!(tape.head_position(), 0);
        assert_eq!(tape.read(1, 4).unwrap(), symbols("0^^"));
    }

    #[test]
    fn test_read_spanning_left_and_right_of_the_head() {
        // Walk right writing two 0s, then left writing 0,1,2,3, ending with
        // a 4 at position -1: cells -1..=3 hold 4,3,2,1,0 with a blank at 4.
        let tape = Tape::new(BLANK)
            .apply(sym('0'), Move::Right)
            .apply(sym('0'), Move::Right)
            .apply(sym('0'), Move::Left)
            .apply(sym('1'), Move::Left)
            .apply(sym('2'), Move::Left)
            .apply(sym('3'), Move::Left)
            .apply(sym('4'), Move::Stay);

        assert_eq!(tape.head_position(), -1);
        assert_eq!(tape.read(-2, 5).unwrap(), symbols("^43210^"));
    }

    #[test]
    fn test_left_then_right_returns_head_to_origin() {
        let tape = Tape::new(BLANK)
            .apply(sym('x'), Move::Left)
            .apply(sym('y'), Move::Right);

        assert_eq!(tape.head_position(), 1);
        // The LEFT step wrote 'x' at position 1, the RIGHT step 'y' at 0.
        assert_eq!(tape.read(0, 2).unwrap(), symbols("yx"));
        assert_eq!(tape.current_symbol(), sym('x'));
    }

    #[test]
    fn test_output_of_empty_tape_is_empty() {
        let tape = Tape::new(BLANK);

        assert!(tape.output().is_empty());
    }

    #[test]
    fn test_output_collects_cells_left_of_the_head() {
        let tape = Tape::new(BLANK)
            .apply(sym('0'), Move::Right)
            .apply(sym('1'), Move::Right)
            .apply(sym('2'), Move::Right)
            .apply(sym('3'), Move::Right)
            .apply(sym('4'), Move::Right);

        assert_eq!(tape.output(), symbols("01234"));
    }

    #[test]
    fn test_output_stops_before_the_first_blank() {
        // Positions 1..=3 hold 2, 1, ^ and the head finishes at -1.
        let tape = Tape::new(BLANK)
            .apply(sym('0'), Move::Right)
            .apply(sym('0'), Move::Right)
            .apply(BLANK, Move::Left)
            .apply(sym('1'), Move::Left)
            .apply(sym('2'), Move::Left)
            .apply(sym('3'), Move::Left)
            .apply(sym('4'), Move::Left);

        assert_eq!(tape.output(), symbols("21"));
    }

    #[test]
    fn test_output_ignores_cells_before_position_one() {
        // Head ends at position 0; only positions >= 1 are reported.
        let tape = Tape::new(BLANK)
            .apply(sym('0'), Move::Right)
            .apply(sym('1'), Move::Left)
            .apply(sym('2'), Move::Left)
            .apply(sym('3'), Move::Stay);

        assert_eq!(tape.head_position(), 0);
        assert_eq!(tape.output(), symbols("21"));
    }

    #[test]
    fn test_output_equals_input_up_to_first_blank() {
        let tape = Tape::from_text(BLANK, "01^10");

        assert_eq!(tape.output(), symbols("01"));

        let unbroken = Tape::from_text(BLANK, "0110");
        assert_eq!(unbroken.output(), symbols("0110"));
    }

    #[test]
    fn test_display_shows_materialized_cells_and_head() {
        let tape = Tape::from_text(BLANK, "01").apply(sym('1'), Move::Right);

        assert_eq!(tape.to_string(), "Tape [11] head at 2");
    }
}
