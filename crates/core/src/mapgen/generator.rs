//! Level assembly: the room/corridor chain, population, and stamping into the grid model.

use log::{debug, trace};
use rand_chacha::rand_core::Rng;

use crate::config::{ConfigError, DungeonConfig};
use crate::types::{PopulationType, Pos};

use super::corridor::Corridor;
use super::grid::TileGrid;
use super::model::LevelData;
use super::population::{BaselinePopulation, PopulationPolicy, populate_room};
use super::random::roll_range;
use super::room::{Room, RoomBounds};

/// Index of the room the player starts in.
pub const ENTRANCE_ROOM_INDEX: usize = 1;

pub struct DungeonGenerator<P = BaselinePopulation> {
    config: DungeonConfig,
    policy: P,
}

impl DungeonGenerator<BaselinePopulation> {
    pub fn new(config: DungeonConfig) -> Result<Self, ConfigError> {
        Self::with_policy(config, BaselinePopulation)
    }
}

impl<P: PopulationPolicy> DungeonGenerator<P> {
    pub fn with_policy(config: DungeonConfig, policy: P) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, policy })
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> LevelData {
        self.generate_with_difficulty(rng, self.config.difficulty)
    }

    pub fn generate_with_difficulty<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        difficulty: u32,
    ) -> LevelData {
        let config = &self.config;
        let bounds = RoomBounds::from_config(config);
        let room_count = roll_range(rng, config.room_count);

        let mut rooms: Vec<Room> = Vec::with_capacity(room_count);
        let mut corridors: Vec<Corridor> = Vec::with_capacity(room_count - 1);
        let mut entrance = Pos { y: 0, x: 0 };

        for index in 0..room_count {
            let mut room = match corridors.last() {
                None => Room::setup_first_room(rng, &bounds),
                Some(corridor) => Room::setup_room(rng, &bounds, corridor),
            };

            if index == ENTRANCE_ROOM_INDEX {
                entrance = room.origin();
                room.mark(entrance, PopulationType::Entrance);
            }
            if index == room_count - 1
                && let Some(exit) = farthest_cell_from(&room, entrance)
            {
                room.mark(exit, PopulationType::Exit);
            }
            let enemies = populate_room(&mut room, &self.policy, difficulty);
            trace!(
                "room {index}: {}x{} at ({}, {}), {enemies} enemies",
                room.width, room.height, room.x, room.y
            );

            if index + 1 < room_count {
                let corridor = Corridor::setup_corridor(
                    rng,
                    &room,
                    config.corridor_length,
                    &bounds,
                    index == 0,
                );
                trace!(
                    "corridor {index}: {:?} x{} from {:?}",
                    corridor.direction, corridor.length, corridor.start
                );
                corridors.push(corridor);
            }
            rooms.push(room);
        }

        let grid = TileGrid::from_chain(config.columns, config.rows, &rooms, &corridors);
        let exit = rooms
            .last()
            .and_then(|room| room.populated_cells().find(|&(_, kind)| kind == PopulationType::Exit))
            .map(|(pos, _)| pos);

        let level = LevelData { grid, rooms, corridors, entrance, exit };
        debug!(
            "generated {}x{} level: {} rooms, {} floor cells, {} enemies, fingerprint {:016x}",
            level.width(),
            level.height(),
            level.rooms.len(),
            level.grid.floor_count(),
            level.enemy_spawns().len(),
            level.fingerprint()
        );
        level
    }
}

/// Cell of `room` farthest from `from`, ties going to the larger `(y, x)`,
/// never `from` itself.
fn farthest_cell_from(room: &Room, from: Pos) -> Option<Pos> {
    room.cells().filter(|&cell| cell != from).max_by_key(|&cell| (cell.manhattan(from), cell))
}
