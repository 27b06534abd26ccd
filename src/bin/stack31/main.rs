//! stack31 - Optimal play for a thirty-one stack solitaire deal
//!
//! Reads a deal as 52 card numbers (13 per pile, bottom card first, 0 for a
//! missing card) and prints the best line: one pile index per line, with `-`
//! after a move that clears the stack while play goes on.
//!
//! Usage: stack31 [FILE] [--seed N] [--scores] [--summary] [-v]

use clap::Parser;
use stack31_solver::{deal, Piles, Searcher, Solution, State};
use std::fs;
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stack31")]
#[command(about = "Exact solver for thirty-one stack solitaire")]
#[command(version)]
struct Args {
    /// Deal file in the 52-number format (reads stdin when omitted or `-`)
    input: Option<String>,

    /// Deal as rank letters, front card first, e.g. "A5K 9Q3 2T J4"
    #[arg(short = 'p', long = "piles", conflicts_with_all = ["input", "seed"])]
    piles: Option<String>,

    /// Solve a random deal from this seed instead of reading one
    #[arg(short = 's', long = "seed", conflicts_with = "input")]
    seed: Option<u64>,

    /// Append the running score to each move line
    #[arg(long = "scores")]
    scores: bool,

    /// Print the deal and final score to stderr
    #[arg(long = "summary")]
    summary: bool,

    /// Verbose output - log search progress
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let state = match load_state(&args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if args.summary {
        eprintln!("Deal: {}", state.piles());
    }

    let mut searcher = Searcher::new(state);
    let solution = match searcher.solve() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = io::stdout().write_all(solution.to_text(args.scores).as_bytes()) {
        eprintln!("Error writing output: {}", e);
        std::process::exit(1);
    }

    if args.summary {
        eprintln!("{}", summary(&solution, searcher.stats().nodes));
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Build the starting state from whichever source the arguments name
fn load_state(args: &Args) -> Result<State, String> {
    if let Some(text) = &args.piles {
        let piles = Piles::parse(text).map_err(|e| e.to_string())?;
        return State::new(piles).map_err(|e| e.to_string());
    }
    if let Some(seed) = args.seed {
        return State::new(deal::shuffled(seed)).map_err(|e| e.to_string());
    }
    let content = read_input(args.input.as_deref())?;
    deal::parse_state(&content).map_err(|e| e.to_string())
}

fn read_input(path: Option<&str>) -> Result<String, String> {
    match path {
        None | Some("-") => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| format!("reading stdin: {}", e))?;
            Ok(content)
        }
        Some(path) => {
            fs::read_to_string(path).map_err(|e| format!("reading input file '{}': {}", path, e))
        }
    }
}

fn summary(solution: &Solution, nodes: u64) -> String {
    let stacks = 1 + solution.steps.iter().filter(|s| s.new_stack).count();
    format!(
        "Score: {} ({} moves, {} stacks, {} nodes)",
        solution.score,
        solution.steps.len(),
        stacks,
        nodes
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("Should parse arguments")
    }

    #[test]
    fn test_load_from_piles() {
        let state = load_state(&args(&["stack31", "--piles", "A - - -"])).unwrap();
        assert_eq!(state.legal_moves(), vec![0]);
    }

    #[test]
    fn test_load_from_seed() {
        let state = load_state(&args(&["stack31", "--seed", "7"])).unwrap();
        assert_eq!(state.cards_remaining(), 52);
    }

    #[test]
    fn test_conflicting_sources() {
        assert!(Args::try_parse_from(["stack31", "deal.txt", "--seed", "1"]).is_err());
    }

    #[test]
    fn test_bad_piles_reported() {
        let err = load_state(&args(&["stack31", "--piles", "AX - - -"])).unwrap_err();
        assert!(err.contains('X'));
    }

    #[test]
    fn test_missing_file_reported() {
        let err = read_input(Some("/nonexistent/deal.txt")).unwrap_err();
        assert!(err.contains("/nonexistent/deal.txt"));
    }

    #[test]
    fn test_summary_counts_stacks() {
        let state = State::new(Piles::parse("KQ T A -").unwrap()).unwrap();
        let mut searcher = Searcher::new(state);
        let solution = searcher.solve().unwrap();
        let line = summary(&solution, searcher.stats().nodes);
        assert!(line.starts_with(&format!("Score: {} (4 moves, 1 stacks", solution.score)));
    }
}
