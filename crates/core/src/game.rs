//! Run-level driver: owns the generator, builds levels from per-level seeds,
//! and steps the patrol loop one turn at a time.

mod patrol;
#[cfg(test)]
mod test_support;

use std::hash::Hasher;

use log::debug;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use slotmap::SlotMap;
use xxhash_rust::xxh3::Xxh3;

use crate::config::{ConfigError, DungeonConfig, PatrolOffset};
use crate::mapgen::{
    BaselinePopulation, DungeonGenerator, LevelData, PopulationPolicy, derive_level_seed,
};
use crate::pathfinding::PathGrid;
use crate::types::{CreatureId, Pos, TurnEvent};

pub use patrol::{PatrollingCreature, simulate_turn};

/// Everything one turn of the patrol loop reads and writes.
#[derive(Clone, Debug)]
pub struct GameState {
    pub level: u32,
    pub turn: u64,
    pub level_data: LevelData,
    pub path_grid: PathGrid,
    pub player: Pos,
    pub creatures: SlotMap<CreatureId, PatrollingCreature>,
    pub log: Vec<TurnEvent>,
}

impl GameState {
    /// Puts the player on the entrance and a creature on every enemy marker,
    /// in row-major order.
    pub fn new(level: u32, level_data: LevelData, patrol_offset: PatrolOffset) -> Self {
        let path_grid = level_data.path_grid();
        let player = level_data.entrance;
        let mut state = Self {
            level,
            turn: 0,
            level_data,
            path_grid,
            player,
            creatures: SlotMap::with_key(),
            log: Vec::new(),
        };
        for spawn in state.level_data.enemy_spawns() {
            state.spawn_creature(spawn, patrol_offset);
        }
        state
    }

    pub fn spawn_creature(&mut self, spawn: Pos, patrol_offset: PatrolOffset) -> CreatureId {
        self.creatures.insert(PatrollingCreature::new(spawn, patrol_offset))
    }

    pub fn creature_at(&self, pos: Pos) -> Option<CreatureId> {
        self.creatures.iter().find(|(_, creature)| creature.pos == pos).map(|(id, _)| id)
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.player == pos || self.creature_at(pos).is_some()
    }

    /// True once the player stands on the exit marker.
    pub fn exit_reached(&self) -> bool {
        self.level_data.exit == Some(self.player)
    }

    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u32(self.level);
        hasher.write_u64(self.turn);
        hasher.write_u64(self.level_data.fingerprint());
        hasher.write_i32(self.player.x);
        hasher.write_i32(self.player.y);
        for creature in self.creatures.values() {
            hasher.write_i32(creature.pos.x);
            hasher.write_i32(creature.pos.y);
            hasher.write_u8(u8::from(creature.on_return_leg));
        }
        hasher.finish()
    }
}

pub struct Game<P = BaselinePopulation> {
    run_seed: u64,
    generator: DungeonGenerator<P>,
    state: GameState,
}

impl Game<BaselinePopulation> {
    pub fn new(config: DungeonConfig, run_seed: u64) -> Result<Self, ConfigError> {
        Self::with_policy(config, run_seed, BaselinePopulation)
    }
}

impl<P: PopulationPolicy> Game<P> {
    /// Validates `config` and builds level 1.
    pub fn with_policy(
        config: DungeonConfig,
        run_seed: u64,
        policy: P,
    ) -> Result<Self, ConfigError> {
        let generator = DungeonGenerator::with_policy(config, policy)?;
        let state = build_level(&generator, run_seed, 1);
        Ok(Self { run_seed, generator, state })
    }

    pub fn run_seed(&self) -> u64 {
        self.run_seed
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &DungeonConfig {
        self.generator.config()
    }

    /// Plays one turn and returns the events it produced.
    pub fn advance_turn(&mut self) -> &[TurnEvent] {
        let first_event = self.state.log.len();
        patrol::run_turn(&mut self.state);
        &self.state.log[first_event..]
    }

    /// Steps the player onto a cardinally adjacent free cell no creature holds.
    pub fn move_player(&mut self, to: Pos) -> bool {
        let state = &mut self.state;
        if state.player.manhattan(to) != 1
            || !state.path_grid.is_free(to)
            || state.creature_at(to).is_some()
        {
            return false;
        }
        state.player = to;
        true
    }

    /// Moves on to the next level when the player stands on the exit.
    pub fn descend_if_exit_reached(&mut self) -> bool {
        if !self.state.exit_reached() {
            return false;
        }
        debug!("exit reached on level {}", self.state.level);
        self.next_level();
        true
    }

    /// Replaces the current level with the next one, one step harder.
    pub fn next_level(&mut self) -> &GameState {
        let level = self.state.level.saturating_add(1);
        self.state = build_level(&self.generator, self.run_seed, level);
        &self.state
    }
}

/// Difficulty of `level`: the configured base on level 1, plus one per level after.
pub fn difficulty_for(config: &DungeonConfig, level: u32) -> u32 {
    config.difficulty.saturating_add(level.saturating_sub(1))
}

fn build_level<P: PopulationPolicy>(
    generator: &DungeonGenerator<P>,
    run_seed: u64,
    level: u32,
) -> GameState {
    let config = generator.config();
    let difficulty = difficulty_for(config, level);
    let mut rng = ChaCha8Rng::seed_from_u64(derive_level_seed(run_seed, level));
    let level_data = generator.generate_with_difficulty(&mut rng, difficulty);
    let state = GameState::new(level, level_data, config.patrol_offset);
    debug!(
        "level {level} ready: difficulty {difficulty}, {} creatures, player at {:?}",
        state.creatures.len(),
        state.player
    );
    state
}
