//! Built-in machines embedded at compile time.

use std::sync::RwLock;

use crate::machine::Machine;
use crate::parser::parse;
use crate::types::MachineError;

// Default embedded transition tables
const TABLE_TEXTS: [(&str, &str); 2] = [
    ("cons0", include_str!("../machines/cons0.tm")),
    ("ones", include_str!("../machines/ones.tm")),
];

lazy_static::lazy_static! {
    static ref MACHINES: RwLock<Vec<(String, Machine)>> = RwLock::new(Vec::new());
}

/// Access to the machines bundled with the crate, parsed once and cached.
pub struct MachineLibrary;

impl MachineLibrary {
    /// Parses and caches the embedded tables, if not done already.
    fn load() -> Result<(), MachineError> {
        let mut cache = MACHINES
            .write()
            .map_err(|_| MachineError::File("failed to acquire write lock".to_string()))?;

        if !cache.is_empty() {
            return Ok(());
        }

        for (name, text) in TABLE_TEXTS {
            let machine = parse(text)?;
            cache.push((name.to_string(), machine));
        }

        Ok(())
    }

    /// The names of all built-in machines.
    pub fn names() -> Vec<String> {
        let _ = Self::load();

        MACHINES
            .read()
            .map(|cache| cache.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }

    /// The number of built-in machines.
    pub fn count() -> usize {
        let _ = Self::load();

        MACHINES.read().map(|cache| cache.len()).unwrap_or(0)
    }

    /// Looks up a built-in machine by name.
    pub fn find(name: &str) -> Result<Machine, MachineError> {
        Self::load()?;

        MACHINES
            .read()
            .map_err(|_| MachineError::File("failed to acquire read lock".to_string()))?
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, machine)| machine.clone())
            .ok_or_else(|| {
                MachineError::Validation(format!("built-in machine '{name}' not found"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::tape::Tape;
    use crate::types::{State, Symbol};

    #[test]
    fn test_every_embedded_table_parses() {
        assert_eq!(MachineLibrary::count(), TABLE_TEXTS.len());
        assert_eq!(MachineLibrary::names(), vec!["cons0", "ones"]);
    }

    #[test]
    fn test_find_unknown_name_fails() {
        let error = MachineLibrary::find("nope").unwrap_err();

        assert!(matches!(error, MachineError::Validation(_)));
        assert!(error.to_string().contains("nope"));
    }

    #[test]
    fn test_cons0_prepends_a_zero() {
        let machine = MachineLibrary::find("cons0").unwrap();
        let engine = Engine::new(&machine);

        let outcome = engine.compute(machine.input_tape("110").unwrap());
        assert_eq!(outcome.output_text(), "0110");

        let outcome = engine.compute(machine.input_tape("").unwrap());
        assert_eq!(outcome.output_text(), "0");
    }

    #[test]
    fn test_ones_writes_four_ones_from_a_blank_tape() {
        let machine = MachineLibrary::find("ones").unwrap();

        assert_eq!(machine.initial_state(), State::new(0));
        assert!(machine.is_final(State::new(4)));

        let outcome = Engine::new(&machine).compute(Tape::new(Symbol::BLANK));
        assert_eq!(outcome.output_text(), "1111");
    }
}
