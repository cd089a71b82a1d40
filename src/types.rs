//! Core value types shared across the interpreter: tape symbols, machine
//! states, head moves, transition actions and the crate-wide error type.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::Rule;

/// The reserved blank symbol character, representing an unwritten tape cell.
pub const BLANK_CHAR: char = '^';
/// The number of transitions the engine applies before giving up by default.
pub const DEFAULT_MAX_STEPS: usize = 1000;

/// A single tape symbol.
///
/// Symbols are plain values with structural equality and a total order; no
/// interning or identity semantics. The designated blank symbol is
/// [`Symbol::BLANK`] and is excluded from every machine's input alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(char);

impl Symbol {
    /// The blank symbol, `'^'`.
    pub const BLANK: Symbol = Symbol(BLANK_CHAR);

    pub fn new(value: char) -> Self {
        Symbol(value)
    }

    pub fn as_char(self) -> char {
        self.0
    }

    pub fn is_blank(self) -> bool {
        self == Self::BLANK
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Symbol(value)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A machine state, identified by a non-negative integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct State(u32);

impl State {
    pub fn new(id: u32) -> Self {
        State(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

impl From<u32> for State {
    fn from(id: u32) -> Self {
        State(id)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A head movement applied after writing a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl Move {
    /// Resolves the single-character table code (`L`, `R` or `0`) for a move.
    pub fn from_code(code: char) -> Option<Move> {
        match code {
            'L' => Some(Move::Left),
            'R' => Some(Move::Right),
            '0' => Some(Move::Stay),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Move::Left => 'L',
            Move::Right => 'R',
            Move::Stay => '0',
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A transition rule: in `state`, reading `symbol` under the head, enter
/// `new_state`, write `new_symbol` over the current cell and move the head
/// in `direction`.
///
/// Actions are immutable 5-tuples. The derived order is lexicographic over
/// the fields in declaration order, each compared by its own order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Action {
    pub state: State,
    pub symbol: Symbol,
    pub new_state: State,
    pub new_symbol: Symbol,
    pub direction: Move,
}

impl Action {
    pub fn new(
        state: State,
        symbol: Symbol,
        new_state: State,
        new_symbol: Symbol,
        direction: Move,
    ) -> Self {
        Action {
            state,
            symbol,
            new_state,
            new_symbol,
            direction,
        }
    }

    /// Convenience constructor from raw state numbers and symbol characters.
    pub fn of(state: u32, symbol: char, new_state: u32, new_symbol: char, direction: Move) -> Self {
        Action::new(
            State::new(state),
            Symbol::new(symbol),
            State::new(new_state),
            Symbol::new(new_symbol),
            direction,
        )
    }

    /// The (state, symbol) pair this action is triggered by.
    pub fn key(&self) -> (State, Symbol) {
        (self.state, self.symbol)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}, {}]",
            self.state, self.symbol, self.new_state, self.new_symbol, self.direction
        )
    }
}

/// Errors produced while constructing or loading a machine.
///
/// Rejection and divergence are not errors; they are [`Outcome`] variants.
///
/// [`Outcome`]: crate::engine::Outcome
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    /// A machine construction invariant was violated.
    #[error("invalid machine: {0}")]
    Validation(String),
    /// Two distinct actions share a (state, symbol) key.
    #[error("state and symbol combination must be unique - multiple actions with state '{state}' and symbol '{symbol}'")]
    NonDeterministic { state: State, symbol: Symbol },
    /// A transition-table line failed to parse; the inner error locates it.
    #[error("table parsing error: {0}")]
    Parse(#[from] Box<pest::error::Error<Rule>>),
    /// A well-formed table that defines no actions.
    #[error("invalid program - no actions")]
    EmptyProgram,
    /// Reading the transition table from disk failed.
    #[error("file error: {0}")]
    File(String),
    /// A tape range read with `to` less than `from`.
    #[error("invalid range: 'to' ({to}) cannot be less than 'from' ({from})")]
    InvalidRange { from: i64, to: i64 },
    /// A sequence operation needed more elements than were present.
    #[error("empty collection: cannot {0}")]
    EmptyCollection(&'static str),
}
