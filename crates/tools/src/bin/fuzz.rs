use anyhow::{Result, bail};
use arena_core::{
    Arena, Board, Cell, HazardTimers, MergePolicy, PASSAGE, apply_path, find_path, plan_escape,
};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    arenas: u32,
    #[arg(long, default_value_t = 8)]
    side: usize,
}

const TERRAIN: [u8; 6] = [PASSAGE, PASSAGE, PASSAGE, 1, 2, 7];

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_cell(rng: &mut ChaCha8Rng, side: usize) -> Cell {
    let row = (rng.next_u64() as usize % side) as i32;
    let col = (rng.next_u64() as usize % side) as i32;
    Cell { row, col }
}

fn random_arena(rng: &mut ChaCha8Rng, side: usize) -> Result<Arena> {
    let mut board = Board::open(side, PASSAGE)?;
    let mut timers = HazardTimers::empty(side)?;
    for cell in board.topology().cells() {
        board.set_tile(cell, choose(rng, &TERRAIN));
    }
    for _ in 0..choose(rng, &[0, 1, 2, 3]) {
        let cell = random_cell(rng, side);
        timers.place_bomb(cell, choose(rng, &[1, 2, 5, 9]), choose(rng, &[1, 2, 3, 5]));
    }
    if choose(rng, &[false, true]) {
        timers.set_residual(random_cell(rng, side), 2);
    }
    let agent = random_cell(rng, side);
    board.set_tile(agent, 10);
    Ok(Arena { board, timers, agent })
}

fn check_arena(index: u32, arena: &Arena, goal: Cell) -> Result<()> {
    let plan = plan_escape(arena, MergePolicy::Max)?;
    if !plan.found_safe_cell() && plan.target != plan.start {
        bail!("Invariant failed: arena {index} chose unsafe target {}", plan.target);
    }
    let Some(path) = plan.path.as_deref() else {
        bail!("Invariant failed: arena {index} has no route to its own nearest cell");
    };
    let walked = apply_path(&arena.board, arena.agent, path)?;
    if walked.last().copied().unwrap_or(arena.agent) != plan.target {
        bail!("Invariant failed: arena {index} escape path misses its target");
    }

    if let Some(path) = find_path(&arena.board, arena.agent, goal)? {
        let walked = apply_path(&arena.board, arena.agent, &path)?;
        if walked.last().copied().unwrap_or(arena.agent) != goal {
            bail!("Invariant failed: arena {index} route misses goal {goal}");
        }
        if walked.iter().rev().skip(1).any(|cell| !arena.board.is_passable(*cell)) {
            bail!("Invariant failed: arena {index} route crosses an obstacle");
        }
        if (path.len() as u32) < arena.agent.manhattan(goal) {
            bail!("Invariant failed: arena {index} route shorter than Manhattan distance");
        }
    }
    debug!(index, target = %plan.target, "arena checked");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(seed = args.seed, arenas = args.arenas, side = args.side, "starting fuzz harness");
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for index in 0..args.arenas {
        let arena = random_arena(&mut rng, args.side)?;
        let goal = random_cell(&mut rng, args.side);
        check_arena(index, &arena, goal)?;
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
