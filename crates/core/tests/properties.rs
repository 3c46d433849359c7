use arena_core::{
    Arena, Board, Cell, HazardTimers, MergePolicy, PASSAGE, apply_path, find_nearest, find_path,
    hazard, plan_escape,
};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

const SIDE: usize = 8;
const OBSTACLES: [u8; 3] = [1, 2, 6];

fn pick(rng: &mut ChaCha8Rng, bound: u64) -> u64 {
    rng.next_u64() % bound
}

fn random_cell(rng: &mut ChaCha8Rng) -> Cell {
    Cell::new(pick(rng, SIDE as u64) as i32, pick(rng, SIDE as u64) as i32)
}

/// Roughly a third obstacles, a few bombs and flames, agent on a random cell.
fn random_arena(seed: u64) -> Arena {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut board = Board::open(SIDE, PASSAGE).expect("board");
    let mut timers = HazardTimers::empty(SIDE).expect("timers");
    for cell in board.topology().cells() {
        if pick(&mut rng, 3) == 0 {
            board.set_tile(cell, OBSTACLES[pick(&mut rng, 3) as usize]);
        }
    }
    for _ in 0..pick(&mut rng, 4) {
        let cell = random_cell(&mut rng);
        timers.place_bomb(cell, 1 + pick(&mut rng, 9) as u8, 1 + pick(&mut rng, 4) as u8);
    }
    for _ in 0..pick(&mut rng, 3) {
        timers.set_residual(random_cell(&mut rng), 1 + pick(&mut rng, 3) as u8);
    }
    let agent = random_cell(&mut rng);
    board.set_tile(agent, 10);
    Arena { board, timers, agent }
}

fn run_cases<F>(cases: u32, check: F)
where
    F: Fn(u64, u64) -> Result<(), String>,
{
    let mut runner = TestRunner::new(ProptestConfig::with_cases(cases));
    runner
        .run(&(any::<u64>(), any::<u64>()), |(first, second)| {
            check(first, second).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("property should hold for every generated arena");
}

#[test]
fn open_board_paths_have_manhattan_length() {
    run_cases(64, |seed, _| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let board = Board::open(SIDE, PASSAGE).expect("board");
        let (start, goal) = (random_cell(&mut rng), random_cell(&mut rng));
        let path = find_path(&board, start, goal)
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("no path {start} -> {goal} on an open board"))?;
        if path.len() as u32 != start.manhattan(goal) {
            return Err(format!("{start} -> {goal}: {} steps", path.len()));
        }
        Ok(())
    });
}

#[test]
fn paths_to_self_are_empty() {
    run_cases(32, |seed, _| {
        let arena = random_arena(seed);
        match find_path(&arena.board, arena.agent, arena.agent) {
            Ok(Some(path)) if path.is_empty() => Ok(()),
            other => Err(format!("expected empty path, got {other:?}")),
        }
    });
}

#[test]
fn found_paths_walk_only_passable_cells_and_end_at_goal() {
    run_cases(128, |seed, goal_seed| {
        let arena = random_arena(seed);
        let goal = random_cell(&mut ChaCha8Rng::seed_from_u64(goal_seed));
        let Some(path) = find_path(&arena.board, arena.agent, goal).map_err(|e| e.to_string())?
        else {
            return Ok(());
        };
        let cells = apply_path(&arena.board, arena.agent, &path).map_err(|e| e.to_string())?;
        if cells.last().copied().unwrap_or(arena.agent) != goal {
            return Err(format!("path from {} ends away from {goal}", arena.agent));
        }
        if let Some((_, intermediate)) = cells.split_last()
            && let Some(blocked) = intermediate.iter().find(|cell| !arena.board.is_passable(**cell))
        {
            return Err(format!("path crosses blocked cell {blocked}"));
        }
        if (path.len() as u32) < arena.agent.manhattan(goal) {
            return Err("path shorter than the Manhattan distance".to_string());
        }
        Ok(())
    });
}

#[test]
fn nearest_with_constant_predicates_returns_start() {
    run_cases(32, |seed, _| {
        let arena = random_arena(seed);
        for predicate in [true, false] {
            let found = find_nearest(&arena.board, arena.agent, |_| predicate)
                .map_err(|e| e.to_string())?;
            if found != arena.agent {
                return Err(format!("predicate {predicate} moved to {found}"));
            }
        }
        Ok(())
    });
}

#[test]
fn hazard_maps_are_pure_and_repeatable() {
    run_cases(64, |seed, _| {
        let arena = random_arena(seed);
        let before = arena.clone();
        for policy in [MergePolicy::Max, MergePolicy::Soonest, MergePolicy::Overwrite] {
            let first = hazard::compute(&arena.board, &arena.timers, policy)
                .map_err(|e| e.to_string())?;
            let second = hazard::compute(&arena.board, &arena.timers, policy)
                .map_err(|e| e.to_string())?;
            if first != second || first.fingerprint() != second.fingerprint() {
                return Err(format!("{policy:?} map differs between calls"));
            }
        }
        if arena != before {
            return Err("hazard computation mutated its inputs".to_string());
        }
        Ok(())
    });
}

#[test]
fn escape_targets_are_safe_or_the_start() {
    run_cases(128, |seed, _| {
        let arena = random_arena(seed);
        let plan = plan_escape(&arena, MergePolicy::Max).map_err(|e| e.to_string())?;
        if !plan.found_safe_cell() && plan.target != plan.start {
            return Err(format!("unsafe target {} chosen away from start", plan.target));
        }
        let path = plan.path.as_ref().ok_or("nearest cell must be routable")?;
        let cells = apply_path(&arena.board, arena.agent, path).map_err(|e| e.to_string())?;
        if cells.last().copied().unwrap_or(arena.agent) != plan.target {
            return Err("escape path does not end at the target".to_string());
        }
        Ok(())
    });
}
