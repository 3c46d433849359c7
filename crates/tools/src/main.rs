use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use arena_core::{
    Arena, ArenaConfig, Cell, MergePolicy, Snapshot, find_nearest, hazard, plan_escape, plan_route,
};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the snapshot JSON file
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Optional arena TOML file; without it the arena is sized to the snapshot
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the hazard map
    Hazard,
    /// Print the nearest reachable safe cell
    Safe,
    /// Print the route to a goal cell given as `row,col`
    Path {
        #[arg(short, long, value_parser = parse_cell)]
        goal: Cell,
    },
    /// Print the full escape plan with host action codes
    Plan,
}

fn parse_cell(text: &str) -> Result<Cell, String> {
    let (row, col) =
        text.split_once(',').ok_or_else(|| format!("expected `row,col`, got `{text}`"))?;
    let row = row.trim().parse::<i32>().map_err(|e| format!("bad row `{row}`: {e}"))?;
    let col = col.trim().parse::<i32>().map_err(|e| format!("bad column `{col}`: {e}"))?;
    Ok(Cell { row, col })
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn load_arena(snapshot_path: &Path, config_path: Option<&Path>) -> Result<(Arena, MergePolicy)> {
    let text = fs::read_to_string(snapshot_path)
        .with_context(|| format!("Failed to read snapshot file: {}", snapshot_path.display()))?;
    let snapshot = Snapshot::from_json_str(&text).context("Failed to parse snapshot")?;

    let config = match config_path {
        Some(path) => ArenaConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => ArenaConfig::for_side(snapshot.side()),
    };
    let arena = snapshot.to_arena(&config).context("Snapshot does not fit the arena")?;
    info!(side = config.side, agent = %arena.agent, "snapshot loaded");
    Ok((arena, config.merge))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let (arena, merge) = load_arena(&args.snapshot, args.config.as_deref())?;

    match args.command {
        Command::Hazard => {
            let map = hazard::compute(&arena.board, &arena.timers, merge)?;
            print!("{map}");
            println!("Fingerprint: 0x{:016x}", map.fingerprint());
        }
        Command::Safe => {
            let map = hazard::compute(&arena.board, &arena.timers, merge)?;
            let safe = find_nearest(&arena.board, arena.agent, |cell| map.is_safe(cell))?;
            println!("Agent: {}", arena.agent);
            println!("Nearest safe cell: {safe}");
            if !map.is_safe(safe) {
                println!("No safe cell is reachable; staying put.");
            }
        }
        Command::Path { goal } => {
            let actions = plan_route(&arena, goal)?
                .ok_or_else(|| anyhow!("No route from {} to {goal}", arena.agent))?;
            let codes: Vec<String> = actions.iter().map(|a| a.code().to_string()).collect();
            println!("Actions: {actions:?}");
            println!("Codes: {}", codes.join(" "));
        }
        Command::Plan => {
            let plan = plan_escape(&arena, merge)?;
            print!("{}", plan.hazard);
            println!("Agent: {} (safe: {})", plan.start, plan.start_is_safe());
            println!("Target: {} (safe: {})", plan.target, plan.found_safe_cell());
            println!("Moves: {:?}", plan.path.as_deref().unwrap_or_default());
            let codes: Vec<String> = plan.actions().iter().map(|a| a.code().to_string()).collect();
            println!("Codes: {}", codes.join(" "));
        }
    }

    Ok(())
}
