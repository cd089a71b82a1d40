//! The validated machine aggregate: state sets, alphabets, the blank symbol
//! and the program, checked once at construction and immutable afterwards.

use std::collections::BTreeSet;
use std::fmt;

use crate::program::Program;
use crate::tape::Tape;
use crate::types::{Action, MachineError, State, Symbol};

/// A deterministic single-tape Turing machine definition.
///
/// All cross-field invariants are enforced by [`Machine::new`]; a `Machine`
/// value is well-formed for its whole lifetime and holds no mutable state,
/// so it can be shared freely between concurrent computations.
#[derive(Debug, Clone)]
pub struct Machine {
    states: BTreeSet<State>,
    final_states: BTreeSet<State>,
    initial_state: State,
    symbols: BTreeSet<Symbol>,
    input_symbols: BTreeSet<Symbol>,
    blank: Symbol,
    program: Program,
}

impl Machine {
    /// Builds a machine, validating each invariant in turn and failing with
    /// a message naming the first one violated.
    ///
    /// The program itself needs no check here: a [`Program`] value is
    /// deterministic by construction.
    pub fn new(
        states: BTreeSet<State>,
        final_states: BTreeSet<State>,
        initial_state: State,
        symbols: BTreeSet<Symbol>,
        input_symbols: BTreeSet<Symbol>,
        blank: Symbol,
        program: Program,
    ) -> Result<Self, MachineError> {
        check(!states.is_empty(), "states cannot be empty")?;
        check(
            final_states.is_subset(&states),
            "final states must all exist in states",
        )?;
        check(
            states.contains(&initial_state),
            "initial state must exist in states",
        )?;
        check(
            input_symbols.is_subset(&symbols),
            "input symbols must all exist in symbols",
        )?;
        check(
            symbols.contains(&blank),
            "blank symbol must exist in symbols",
        )?;
        check(
            !input_symbols.contains(&blank),
            "blank symbol must not exist in input symbols",
        )?;

        Ok(Machine {
            states,
            final_states,
            initial_state,
            symbols,
            input_symbols,
            blank,
            program,
        })
    }

    pub fn initial_state(&self) -> State {
        self.initial_state
    }

    pub fn blank(&self) -> Symbol {
        self.blank
    }

    pub fn is_final(&self, state: State) -> bool {
        self.final_states.contains(&state)
    }

    /// The action for `state` reading `symbol`, if the program defines one.
    pub fn find_action(&self, state: State, symbol: Symbol) -> Option<&Action> {
        self.program.find(state, symbol)
    }

    pub fn states(&self) -> &BTreeSet<State> {
        &self.states
    }

    pub fn final_states(&self) -> &BTreeSet<State> {
        &self.final_states
    }

    pub fn symbols(&self) -> &BTreeSet<Symbol> {
        &self.symbols
    }

    pub fn input_symbols(&self) -> &BTreeSet<Symbol> {
        &self.input_symbols
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Builds the initial tape for `input`, rejecting characters outside the
    /// machine's input alphabet.
    pub fn input_tape(&self, input: &str) -> Result<Tape, MachineError> {
        for c in input.chars() {
            let symbol = Symbol::new(c);

            if !self.input_symbols.contains(&symbol) {
                return Err(MachineError::Validation(format!(
                    "input symbol '{symbol}' is not in the input alphabet"
                )));
            }
        }

        Ok(Tape::from_text(self.blank, input))
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let finals = self
            .final_states
            .iter()
            .map(|state| state.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        write!(
            f,
            "Machine[initial state={}, final states={{{finals}}}, blank={}, program={}]",
            self.initial_state, self.blank, self.program
        )
    }
}

fn check(condition: bool, message: &str) -> Result<(), MachineError> {
    if condition {
        Ok(())
    } else {
        Err(MachineError::Validation(message.to_string()))
    }
}
