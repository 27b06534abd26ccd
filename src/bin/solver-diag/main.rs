//! Searcher diagnostics: solve a deal with and without the transposition
//! table and compare node counts, table usage and timing.
//!
//! Usage: solver-diag [FILE] [--seed N] [--per-pile N] [--count N]

use clap::Parser;
use stack31_solver::{
    deal, SearchConfig, SearchResult, SearchStats, Searcher, State, MAX_PILE_LEN,
};
use std::fs;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "solver-diag")]
#[command(about = "Compare search with and without the transposition table")]
struct Args {
    /// Deal file in the 52-number format
    #[arg(conflicts_with = "seed")]
    input: Option<String>,

    /// First seed for random deals
    #[arg(short = 's', long = "seed", default_value_t = 0)]
    seed: u64,

    /// Cards dealt to each pile for random deals
    #[arg(
        short = 'n',
        long = "per-pile",
        default_value_t = 5,
        value_parser = clap::value_parser!(u8).range(0..=MAX_PILE_LEN as i64)
    )]
    per_pile: u8,

    /// Number of random deals to run
    #[arg(short = 'c', long = "count", default_value_t = 1)]
    count: u64,

    /// Skip the run without the table
    #[arg(long = "table-only")]
    table_only: bool,
}

struct Run {
    config: SearchConfig,
    result: SearchResult,
    stats: SearchStats,
    elapsed: Duration,
}

fn main() {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let deals = match load_deals(&args) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut mismatches = 0;
    for (label, state) in &deals {
        println!("{} {}", label, state.piles());

        let cached = run(state.clone(), SearchConfig::default());
        print_run(&cached);

        if !args.table_only {
            let plain = run(
                state.clone(),
                SearchConfig {
                    use_table: false,
                    ..SearchConfig::default()
                },
            );
            print_run(&plain);

            let agree = cached.result.score == plain.result.score;
            if !agree {
                mismatches += 1;
            }
            println!(
                "  scores {}, node ratio {:.1}x",
                if agree { "agree" } else { "DIFFER" },
                plain.stats.nodes as f64 / cached.stats.nodes.max(1) as f64
            );
        }
    }

    if mismatches > 0 {
        eprintln!("{} of {} deals scored differently", mismatches, deals.len());
        std::process::exit(1);
    }
}

fn load_deals(args: &Args) -> Result<Vec<(String, State)>, String> {
    if let Some(path) = &args.input {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("reading input file '{}': {}", path, e))?;
        let state = deal::parse_state(&content).map_err(|e| e.to_string())?;
        return Ok(vec![(path.clone(), state)]);
    }

    let end = args
        .seed
        .checked_add(args.count)
        .ok_or_else(|| format!("seed {} plus count {} overflows", args.seed, args.count))?;
    (args.seed..end)
        .map(|seed| {
            let piles = deal::dealt(seed, usize::from(args.per_pile));
            let state = State::new(piles).map_err(|e| e.to_string())?;
            Ok((format!("seed {}", seed), state))
        })
        .collect()
}

fn run(state: State, config: SearchConfig) -> Run {
    let start = Instant::now();
    let mut searcher = Searcher::with_config(state, config);
    let result = searcher.best_move();
    Run {
        config: searcher.config(),
        result,
        stats: searcher.stats(),
        elapsed: start.elapsed(),
    }
}

fn print_run(run: &Run) {
    let name = if run.config.use_table { "table" } else { "plain" };
    let table = &run.stats.table;
    let hit_rate = if table.probes > 0 {
        100.0 * table.hits as f64 / table.probes as f64
    } else {
        0.0
    };
    println!(
        "  {:<5} best {:?} score {:>3}  nodes {:>10}  hits {:>9} ({:>5.1}%)  entries {:>9}  {:>9.2} ms",
        name,
        run.result.pile,
        run.result.score,
        run.stats.nodes,
        table.hits,
        hit_rate,
        run.stats.table_entries,
        run.elapsed.as_secs_f64() * 1000.0
    );
}
