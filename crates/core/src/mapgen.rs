//! Procedural level generation split into coherent submodules.

pub mod corridor;
pub mod grid;
pub mod model;
pub mod population;
pub mod room;

mod generator;
mod random;

use rand_chacha::rand_core::Rng;

use crate::config::{ConfigError, DungeonConfig};

pub use corridor::Corridor;
pub use generator::{DungeonGenerator, ENTRANCE_ROOM_INDEX};
pub use grid::TileGrid;
pub use model::LevelData;
pub use population::{BaselinePopulation, PopulationPolicy, ScaledPopulation, populate_room};
pub use random::derive_level_seed;
pub use room::Room;

/// Validates `config` and generates one level with the baseline population.
pub fn generate_level<R: Rng + ?Sized>(
    config: &DungeonConfig,
    rng: &mut R,
) -> Result<LevelData, ConfigError> {
    Ok(DungeonGenerator::new(config.clone())?.generate(rng))
}
