//! This crate implements a deterministic single-tape Turing machine
//! interpreter. It provides a persistent, structurally shared tape, a
//! validated machine model, an execution engine producing a typed outcome,
//! a parser for the transition-table text format and a small library of
//! built-in machines.

pub mod engine;
pub mod library;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod program;
pub mod sequence;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the execution engine and its result types.
pub use engine::{Configuration, Engine, Outcome};
/// Re-exports the built-in machine registry.
pub use library::MachineLibrary;
/// Re-exports the `MachineLoader` struct from the loader module.
pub use loader::{MachineLoader, BUILTIN_PREFIX};
/// Re-exports the validated machine aggregate.
pub use machine::Machine;
/// Re-exports the `parse` function from the parser module.
pub use parser::{parse, parse_actions};
/// Re-exports the deterministic transition mapping.
pub use program::Program;
/// Re-exports the persistent sequence underlying the tape.
pub use sequence::Sequence;
/// Re-exports the persistent tape.
pub use tape::Tape;
/// Re-exports the core value types and the crate error.
pub use types::{Action, MachineError, Move, State, Symbol, DEFAULT_MAX_STEPS};
