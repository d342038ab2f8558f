use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use hanoi_search::search::{Bfs, BfsConfig, DedupPolicy, Outcome};
use hanoi_search::variants::Variant;

/// Shortest move count for a named Hanoi variant.
#[derive(Parser, Debug)]
#[command(name = "hanoi-search", version)]
#[command(about = "Shortest move counts for generalized Tower of Hanoi variants")]
#[command(after_help = "Variants: K13_01, K13_12, K13e_01, K13e_12, K13e_23, K13e_30, \
P4_01, P4_12, P4_23, P4_31, C4_01, C4_12, K4e_01, K4e_12, K4e_23")]
struct Args {
    /// Puzzle preset, e.g. K13e_01 (case-insensitive).
    #[arg(short, long)]
    variant: Variant,

    /// Number of discs.
    #[arg(short = 'n', long)]
    discs: u8,

    /// Worker threads (defaults to all cores).
    #[arg(short, long)]
    threads: Option<usize>,

    /// Deduplication history (defaults to the preset's recommendation).
    #[arg(long, value_enum)]
    dedup: Option<DedupArg>,

    /// Suppress the live status line.
    #[arg(short, long)]
    quiet: bool,

    /// Emit the result as one JSON object on stdout.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DedupArg {
    /// Keep every visited state (safe for any rule set).
    Visited,
    /// Keep only the previous level (lean, for two-colorable move graphs).
    LastLevel,
}

impl From<DedupArg> for DedupPolicy {
    fn from(arg: DedupArg) -> Self {
        match arg {
            DedupArg::Visited => DedupPolicy::FullVisited,
            DedupArg::LastLevel => DedupPolicy::PreviousFrontier,
        }
    }
}

#[derive(Serialize)]
struct RunRecord<'a> {
    variant: &'a str,
    discs: u8,
    threads: usize,
    dedup: &'a str,
    elapsed_s: f64,
    #[serde(flatten)]
    outcome: Outcome,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("building the worker pool")?;
    }

    let variant = args.variant;
    let space = variant.space(args.discs)?;
    let rules = variant.rules(args.discs);
    let (initial, target) = variant.endpoints(&space)?;
    let dedup = args.dedup.map_or_else(|| variant.recommended_dedup(), DedupPolicy::from);
    let bfs = Bfs::with_config(BfsConfig { dedup });

    let status = (!args.quiet && !args.json).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner} {elapsed_precise} | {msg}")
                .expect("static template")
                .tick_chars("⠁⠃⠇⠧⠷⠿⠻⠟⠯⠷⠧⠇⠃"),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    });

    let start = Instant::now();
    let outcome = bfs.search_observed(&space, &rules, initial, target, |report| {
        if let Some(pb) = &status {
            pb.set_message(format!(
                "distance {} | frontier {} | resident {} MB",
                report.distance,
                report.frontier,
                report.resident_bytes / 1_000_000
            ));
        }
    })?;
    let elapsed = start.elapsed();
    if let Some(pb) = status {
        pb.finish_and_clear();
    }

    if args.json {
        let record = RunRecord {
            variant: variant.name(),
            discs: args.discs,
            threads: rayon::current_num_threads(),
            dedup: dedup.name(),
            elapsed_s: elapsed.as_secs_f64(),
            outcome,
        };
        println!("{}", serde_json::to_string(&record)?);
        return Ok(());
    }

    match outcome {
        Outcome::Found { distance, stats } => {
            println!("{} with {} discs: {} moves", variant, args.discs, distance);
            println!(
                "time {:.3}s | peak frontier {} | peak resident {} MB",
                elapsed.as_secs_f64(),
                stats.peak_frontier,
                stats.peak_memory_bytes / 1_000_000
            );
        }
        Outcome::Exhausted { stats } => {
            println!(
                "{} with {} discs: target unreachable ({} levels searched)",
                variant, args.discs, stats.levels
            );
        }
    }
    Ok(())
}
