use std::collections::BTreeSet;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use dungeon_core::{
    DungeonConfig, Game, GameState, PathingCost, PopulationType, TileType, TurnEvent,
};
use log::debug;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of independent runs, each seeded from the previous one
    #[arg(short, long, default_value_t = 20)]
    runs: u32,
    #[arg(short, long, default_value_t = 5)]
    levels: u32,
    #[arg(short, long, default_value_t = 200)]
    turns: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!(
        "Starting fuzz harness on seed {} for {} runs of {} levels x {} turns...",
        args.seed, args.runs, args.levels, args.turns
    );
    let mut seeds = ChaCha8Rng::seed_from_u64(args.seed);
    for run in 0..args.runs {
        let run_seed = seeds.next_u64();
        fuzz_run(&args, run_seed).with_context(|| format!("run {run} (seed {run_seed}) failed"))?;
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}

fn fuzz_run(args: &Args, run_seed: u64) -> Result<()> {
    let mut game = Game::new(DungeonConfig::default(), run_seed).context("default config")?;
    for level in 1..=args.levels {
        check_level(game.state()).with_context(|| format!("level {level} layout"))?;
        for turn in 1..=args.turns {
            let events = game.advance_turn().to_vec();
            check_turn(game.state(), &events)
                .with_context(|| format!("level {level}, turn {turn}"))?;
        }
        debug!("run {run_seed:x}: level {level} hash {:016x}", game.state().snapshot_hash());
        game.next_level();
    }
    Ok(())
}

fn check_level(state: &GameState) -> Result<()> {
    let grid = &state.level_data.grid;
    for pos in grid.positions() {
        let floor = grid.tile_at(pos) == TileType::Floor;
        let free = grid.cost_at(pos) == PathingCost::Free;
        ensure!(floor == free, "tile and cost disagree at {pos:?}");
        if grid.population_at(pos) != PopulationType::Unpopulated {
            ensure!(floor, "population marker on a wall at {pos:?}");
        }
    }
    ensure!(
        grid.population_at(state.player) == PopulationType::Entrance,
        "player does not start on the entrance"
    );
    Ok(())
}

fn check_turn(state: &GameState, events: &[TurnEvent]) -> Result<()> {
    let mut occupied = BTreeSet::from([state.player]);
    for (_, creature) in state.creatures.iter() {
        ensure!(state.path_grid.is_free(creature.pos), "creature inside a wall at {:?}", creature.pos);
        ensure!(occupied.insert(creature.pos), "two actors share {:?}", creature.pos);
    }
    for event in events {
        if let TurnEvent::Moved { from, to, .. } = event {
            ensure!(from.manhattan(*to) == 1, "non-cardinal move {from:?} -> {to:?}");
        }
    }
    Ok(())
}
