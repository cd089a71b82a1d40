//! Parser for the transition-table text format, built on `pest`, and the
//! derivation of a full [`Machine`] from the parsed action list.

use pest::{
    error::{Error, ErrorVariant},
    iterators::{Pair, Pairs},
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use std::collections::BTreeSet;

use crate::machine::Machine;
use crate::program::Program;
use crate::types::{Action, MachineError, Move, State, Symbol};

/// Derives a `PestParser` for the transition-table grammar in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct TableParser;

/// Parses a transition table into a validated [`Machine`].
///
/// Everything beyond the action list is derived from it:
///
/// - `initial_state` is the state of the first action in table order;
/// - `final_states` are the states with no outgoing action; the machine
///   halts there, so they are taken to be accepting;
/// - `symbols` are all mentioned symbols plus the blank, `input_symbols`
///   all mentioned symbols minus the blank.
///
/// A malformed line fails with a [`MachineError::Parse`] locating it; a
/// table defining no actions fails with [`MachineError::EmptyProgram`].
pub fn parse(input: &str) -> Result<Machine, MachineError> {
    let actions = parse_actions(input)?;

    build_machine(actions)
}

/// Parses a transition table into its action list, in table order.
pub fn parse_actions(input: &str) -> Result<Vec<Action>, MachineError> {
    let table = TableParser::parse(Rule::table, input.trim())
        .map_err(|e| MachineError::Parse(Box::new(e)))?
        .next()
        .unwrap();

    table
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::action)
        .map(parse_action)
        .collect()
}

fn parse_action(pair: Pair<Rule>) -> Result<Action, MachineError> {
    let mut pairs = pair.into_inner();

    let state = parse_state(&mut pairs)?;
    let symbol = parse_symbol(&mut pairs);
    let new_state = parse_state(&mut pairs)?;
    let new_symbol = parse_symbol(&mut pairs);
    let direction = parse_direction(&mut pairs)?;

    Ok(Action::new(state, symbol, new_state, new_symbol, direction))
}

fn parse_state(pairs: &mut Pairs<Rule>) -> Result<State, MachineError> {
    let pair = pairs.next().unwrap();

    pair.as_str()
        .parse::<u32>()
        .map(State::new)
        .map_err(|_| parse_error("state number out of range", pair.as_span()))
}

fn parse_symbol(pairs: &mut Pairs<Rule>) -> Symbol {
    // The token is exactly '<char>'.
    pairs
        .next()
        .unwrap()
        .as_str()
        .chars()
        .nth(1)
        .map(Symbol::new)
        .unwrap_or(Symbol::BLANK)
}

fn parse_direction(pairs: &mut Pairs<Rule>) -> Result<Move, MachineError> {
    let pair = pairs.next().unwrap();
    let code = pair.as_str().chars().next().unwrap_or(' ');

    Move::from_code(code)
        .ok_or_else(|| parse_error(&format!("unsupported move: {code}"), pair.as_span()))
}

/// Creates a [`MachineError::Parse`] from a message and a `Span`.
fn parse_error(message: &str, span: Span) -> MachineError {
    MachineError::Parse(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: message.to_string(),
        },
        span,
    )))
}

/// Derives the machine fields from the action list and validates the result.
fn build_machine(actions: Vec<Action>) -> Result<Machine, MachineError> {
    if actions.is_empty() {
        return Err(MachineError::EmptyProgram);
    }

    let initial_state = actions[0].state;
    let blank = Symbol::BLANK;

    let mut states = BTreeSet::new();
    let mut sources = BTreeSet::new();
    let mut mentioned = BTreeSet::new();

    for action in &actions {
        states.insert(action.state);
        states.insert(action.new_state);
        sources.insert(action.state);
        mentioned.insert(action.symbol);
        mentioned.insert(action.new_symbol);
    }

    // A state with no outgoing action halts the machine, so it is inferred
    // to be accepting.
    let final_states: BTreeSet<State> = states.difference(&sources).copied().collect();

    let mut symbols = mentioned.clone();
    symbols.insert(blank);
    let input_symbols: BTreeSet<Symbol> =
        mentioned.into_iter().filter(|s| *s != blank).collect();

    let program = Program::new(actions)?;

    Machine::new(
        states,
        final_states,
        initial_state,
        symbols,
        input_symbols,
        blank,
        program,
    )
}
