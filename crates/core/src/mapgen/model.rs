//! Public data model for a generated level.

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::pathfinding::PathGrid;
use crate::types::{Direction, PathingCost, PopulationType, Pos, TileType};

use super::corridor::Corridor;
use super::grid::TileGrid;
use super::room::Room;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LevelData {
    pub grid: TileGrid,
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    /// Player spawn: lower-left corner of the second room.
    pub entrance: Pos,
    pub exit: Option<Pos>,
}

impl LevelData {
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn tile_at(&self, pos: Pos) -> TileType {
        self.grid.tile_at(pos)
    }

    pub fn path_grid(&self) -> PathGrid {
        self.grid.path_grid()
    }

    /// Enemy markers in row-major order.
    pub fn enemy_spawns(&self) -> Vec<Pos> {
        self.cells_marked(PopulationType::Enemy)
    }

    pub fn item_spawns(&self) -> Vec<Pos> {
        self.cells_marked(PopulationType::Item)
    }

    fn cells_marked(&self, kind: PopulationType) -> Vec<Pos> {
        self.grid.positions().filter(|&pos| self.grid.population_at(pos) == kind).collect()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width() as u32).to_le_bytes());
        bytes.extend((self.height() as u32).to_le_bytes());
        for tile in self.grid.tiles() {
            bytes.push(match tile {
                TileType::Wall => 0,
                TileType::Floor => 1,
            });
        }
        for cost in self.grid.costs() {
            bytes.push(match cost {
                PathingCost::Blocked => 0,
                PathingCost::Free => 1,
            });
        }
        for kind in self.grid.population() {
            bytes.push(match kind {
                PopulationType::Unpopulated => 0,
                PopulationType::Enemy => 1,
                PopulationType::Item => 2,
                PopulationType::Exit => 3,
                PopulationType::Entrance => 4,
            });
        }

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            for value in [room.x, room.y, room.width, room.height] {
                bytes.extend((value as u32).to_le_bytes());
            }
        }

        bytes.extend((self.corridors.len() as u32).to_le_bytes());
        for corridor in &self.corridors {
            bytes.extend(corridor.start.y.to_le_bytes());
            bytes.extend(corridor.start.x.to_le_bytes());
            bytes.push(match corridor.direction {
                Direction::North => 0,
                Direction::East => 1,
                Direction::South => 2,
                Direction::West => 3,
            });
            bytes.extend((corridor.length as u32).to_le_bytes());
        }

        bytes.extend(self.entrance.y.to_le_bytes());
        bytes.extend(self.entrance.x.to_le_bytes());
        if let Some(exit) = self.exit {
            bytes.push(1);
            bytes.extend(exit.y.to_le_bytes());
            bytes.extend(exit.x.to_le_bytes());
        } else {
            bytes.push(0);
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
