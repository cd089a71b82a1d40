//! A program: the finite, deterministic partial mapping from (state, symbol)
//! pairs to the action the machine performs.

use std::collections::BTreeMap;
use std::fmt;

use crate::types::{Action, MachineError, State, Symbol};

/// A validated transition table. At most one action exists per
/// (state, symbol) key; this is checked once at construction, so a `Program`
/// value is deterministic for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    actions: BTreeMap<(State, Symbol), Action>,
}

impl Program {
    /// Builds a program from a collection of actions.
    ///
    /// Identical duplicate actions collapse; two *distinct* actions sharing
    /// a (state, symbol) key fail with
    /// [`MachineError::NonDeterministic`], naming the pair.
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Result<Self, MachineError> {
        let mut map = BTreeMap::new();

        for action in actions {
            match map.get(&action.key()) {
                Some(existing) if *existing != action => {
                    return Err(MachineError::NonDeterministic {
                        state: action.state,
                        symbol: action.symbol,
                    });
                }
                _ => {
                    map.insert(action.key(), action);
                }
            }
        }

        Ok(Program { actions: map })
    }

    /// A program with no actions. Every lookup misses.
    pub fn empty() -> Self {
        Program {
            actions: BTreeMap::new(),
        }
    }

    /// Total, pure lookup of the action for `state` reading `symbol`.
    pub fn find(&self, state: State, symbol: Symbol) -> Option<&Action> {
        self.actions.get(&(state, symbol))
    }

    /// The actions in key order.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actions = self
            .actions
            .values()
            .map(|action| action.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        write!(f, "{{ {actions} }}")
    }
}
