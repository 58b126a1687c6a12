pub mod config;
pub mod game;
pub mod mapgen;
pub mod pathfinding;
pub mod types;

pub use config::{ConfigError, DungeonConfig, IntRange, PatrolOffset};
pub use game::{Game, GameState, PatrollingCreature, simulate_turn};
pub use mapgen::{
    BaselinePopulation, DungeonGenerator, LevelData, PopulationPolicy, ScaledPopulation,
    generate_level,
};
pub use pathfinding::{PathGrid, find_path};
pub use types::*;
