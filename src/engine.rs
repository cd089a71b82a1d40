//! The execution engine: a pure step loop folding one configuration into the
//! next until the machine accepts, rejects or exhausts its step bound.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::machine::Machine;
use crate::sequence::Sequence;
use crate::tape::Tape;
use crate::types::{State, Symbol, DEFAULT_MAX_STEPS};

/// One instant of a computation: the machine state together with the tape
/// content and head position. Cloning is cheap; successive configurations
/// share every tape cell the step between them did not touch.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub state: State,
    pub tape: Tape,
}

/// The result of running a machine to halting or to its step bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The machine reached a final state; carries the tape output.
    Accepted { output: Sequence<Symbol> },
    /// The machine halted in a non-final state with no applicable action.
    Rejected,
    /// The step bound was exhausted before the machine halted.
    Diverged { max_steps: usize },
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }

    /// The output of an accepting run.
    ///
    /// # Panics
    ///
    /// Panics if the machine did not accept. Callers that cannot rule out
    /// rejection or divergence must match on the outcome instead.
    pub fn output(&self) -> &Sequence<Symbol> {
        match self {
            Outcome::Accepted { output } => output,
            other => panic!("no output available: machine did not accept ({other})"),
        }
    }

    /// The output of an accepting run as a string.
    ///
    /// # Panics
    ///
    /// Panics if the machine did not accept, as [`Outcome::output`] does.
    pub fn output_text(&self) -> String {
        self.output().iter().map(|symbol| symbol.as_char()).collect()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Accepted { output } => {
                let text: String = output.iter().map(|symbol| symbol.as_char()).collect();
                write!(f, "accepted [{text}]")
            }
            Outcome::Rejected => write!(f, "rejected"),
            Outcome::Diverged { max_steps } => {
                write!(f, "did not halt after {max_steps} steps")
            }
        }
    }
}

/// Drives a [`Machine`] over an input tape.
///
/// The engine owns nothing mutable: `compute` is a pure function of the
/// machine, the input tape and the bound, and may be called concurrently
/// against the same machine from any number of threads.
pub struct Engine<'m> {
    machine: &'m Machine,
}

impl<'m> Engine<'m> {
    pub fn new(machine: &'m Machine) -> Self {
        Engine { machine }
    }

    /// Runs the machine with the default bound of [`DEFAULT_MAX_STEPS`]
    /// transitions.
    pub fn compute(&self, input: Tape) -> Outcome {
        self.compute_within(input, DEFAULT_MAX_STEPS)
    }

    /// Runs the machine, applying at most `max_steps` transitions.
    ///
    /// Bound convention: the run diverges only if the machine would need
    /// *more than* `max_steps` transitions. A machine halting in exactly
    /// `max_steps` transitions is still accepted or rejected normally.
    pub fn compute_within(&self, input: Tape, max_steps: usize) -> Outcome {
        let mut current = self.initial_configuration(input);
        let mut steps = 0;

        loop {
            if self.machine.is_final(current.state) {
                return Outcome::Accepted {
                    output: current.tape.output(),
                };
            }

            let symbol = current.tape.current_symbol();
            let Some(action) = self.machine.find_action(current.state, symbol) else {
                return Outcome::Rejected;
            };

            if steps == max_steps {
                return Outcome::Diverged { max_steps };
            }

            current = Configuration {
                state: action.new_state,
                tape: current.tape.apply(action.new_symbol, action.direction),
            };
            steps += 1;
        }
    }

    /// Like [`Engine::compute_within`], additionally returning every
    /// configuration of the run, newest first.
    ///
    /// Retaining the history costs O(1) per step: each entry shares all
    /// earlier nodes and all untouched tape cells with its predecessor.
    pub fn trace(&self, input: Tape, max_steps: usize) -> (Outcome, Sequence<Configuration>) {
        let mut current = self.initial_configuration(input);
        let mut history = Sequence::singleton(current.clone());
        let mut steps = 0;

        loop {
            if self.machine.is_final(current.state) {
                let output = current.tape.output();
                return (Outcome::Accepted { output }, history);
            }

            let symbol = current.tape.current_symbol();
            let Some(action) = self.machine.find_action(current.state, symbol) else {
                return (Outcome::Rejected, history);
            };

            if steps == max_steps {
                return (Outcome::Diverged { max_steps }, history);
            }

            current = Configuration {
                state: action.new_state,
                tape: current.tape.apply(action.new_symbol, action.direction),
            };
            history = history.push(current.clone());
            steps += 1;
        }
    }

    fn initial_configuration(&self, input: Tape) -> Configuration {
        Configuration {
            state: self.machine.initial_state(),
            tape: input,
        }
    }
}
