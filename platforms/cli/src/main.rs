use clap::Parser;
use std::process::ExitCode;
use tmrun::{Engine, MachineLoader, Outcome, DEFAULT_MAX_STEPS};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The transition table to run: a file path or builtin:<name>
    table: String,

    /// The input written on the tape before the run
    input: String,

    /// Maximum number of transitions before the run is abandoned
    #[clap(short, long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Print every configuration of the run
    #[clap(short, long)]
    debug: bool,

    /// Print the outcome as JSON
    #[clap(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let machine = match MachineLoader::load(&cli.table) {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let tape = match machine.input_tape(&cli.input) {
        Ok(tape) => tape,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let engine = Engine::new(&machine);

    let outcome = if cli.debug {
        let (outcome, history) = engine.trace(tape, cli.max_steps);

        // The history is newest first; replay it in execution order.
        let mut configurations: Vec<_> = history.iter().cloned().collect();
        configurations.reverse();

        for (step, configuration) in configurations.iter().enumerate() {
            println!(
                "step {step}: state {} {}",
                configuration.state, configuration.tape
            );
        }
        println!();

        outcome
    } else {
        engine.compute_within(tape, cli.max_steps)
    };

    if cli.json {
        match serde_json::to_string(&outcome) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        }
        return exit_code(&outcome);
    }

    match &outcome {
        Outcome::Accepted { .. } => {
            println!("Input:\n{}\n", cli.input);
            println!("Output:\n{}", outcome.output_text());
        }
        Outcome::Rejected => eprintln!("Machine halted without accepting"),
        Outcome::Diverged { max_steps } => {
            eprintln!("Machine did not halt after {max_steps} steps")
        }
    }

    exit_code(&outcome)
}

fn exit_code(outcome: &Outcome) -> ExitCode {
    match outcome {
        Outcome::Accepted { .. } => ExitCode::SUCCESS,
        Outcome::Rejected => ExitCode::FAILURE,
        Outcome::Diverged { .. } => ExitCode::from(2),
    }
}
