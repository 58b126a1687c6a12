//! Flat row-major grid model holding tile type, pathing cost, and population per cell.

use log::trace;
use serde::Serialize;

use crate::pathfinding::PathGrid;
use crate::types::{PathingCost, PopulationType, Pos, TileType};

use super::corridor::Corridor;
use super::room::Room;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileType>,
    costs: Vec<PathingCost>,
    population: Vec<PopulationType>,
}

impl TileGrid {
    /// All walls, all blocked, nothing populated.
    pub fn new(width: usize, height: usize) -> Self {
        let cells = width * height;
        Self {
            width,
            height,
            tiles: vec![TileType::Wall; cells],
            costs: vec![PathingCost::Blocked; cells],
            population: vec![PopulationType::Unpopulated; cells],
        }
    }

    /// Stamps every room and corridor cell as floor, then copies each room's
    /// population markers in at the room's offset.
    pub fn from_chain(columns: usize, rows: usize, rooms: &[Room], corridors: &[Corridor]) -> Self {
        let mut grid = Self::new(columns, rows);
        for room in rooms {
            for cell in room.cells() {
                grid.carve_floor(cell);
            }
        }
        for corridor in corridors {
            for cell in corridor.cells() {
                if !grid.carve_floor(cell) {
                    trace!("corridor cell {cell:?} falls outside the grid");
                }
            }
        }
        for room in rooms {
            for (cell, kind) in room.populated_cells() {
                grid.merge_population(cell, kind);
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        in_bounds(self.width, self.height, pos)
    }

    /// `y * width + x`, or `None` outside the grid.
    pub fn index(&self, pos: Pos) -> Option<usize> {
        self.in_bounds(pos).then(|| cell_index(self.width, pos))
    }

    pub fn tile_at(&self, pos: Pos) -> TileType {
        self.index(pos).map_or(TileType::Wall, |index| self.tiles[index])
    }

    pub fn cost_at(&self, pos: Pos) -> PathingCost {
        self.index(pos).map_or(PathingCost::Blocked, |index| self.costs[index])
    }

    pub fn population_at(&self, pos: Pos) -> PopulationType {
        self.index(pos).map_or(PopulationType::Unpopulated, |index| self.population[index])
    }

    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    pub fn costs(&self) -> &[PathingCost] {
        &self.costs
    }

    pub fn population(&self) -> &[PopulationType] {
        &self.population
    }

    /// Every cell in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| Pos { y, x }))
    }

    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|&&tile| tile == TileType::Floor).count()
    }

    /// Marks a cell as floor and free to path through. Cells outside the grid
    /// are left alone and reported with `false`.
    pub(crate) fn carve_floor(&mut self, pos: Pos) -> bool {
        let Some(index) = self.index(pos) else {
            return false;
        };
        self.tiles[index] = TileType::Floor;
        self.costs[index] = PathingCost::Free;
        true
    }

    /// Records a population marker. Where overlapping rooms both mark a cell
    /// the higher-ranked marker stays (entrance, exit, item, enemy).
    pub(crate) fn merge_population(&mut self, pos: Pos, kind: PopulationType) -> bool {
        let Some(index) = self.index(pos) else {
            return false;
        };
        self.population[index] = self.population[index].max(kind);
        true
    }

    pub fn path_grid(&self) -> PathGrid {
        PathGrid::new(self.width, self.height, self.costs.clone())
    }
}

pub(crate) fn in_bounds(width: usize, height: usize, pos: Pos) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
}

pub(crate) fn cell_index(width: usize, pos: Pos) -> usize {
    (pos.y as usize) * width + (pos.x as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn fresh_grid_is_all_wall_and_blocked() {
        let grid = TileGrid::new(4, 3);
        assert_eq!(grid.tiles().len(), 12);
        assert!(grid.tiles().iter().all(|&tile| tile == TileType::Wall));
        assert!(grid.costs().iter().all(|&cost| cost == PathingCost::Blocked));
        assert!(grid.population().iter().all(|&kind| kind == PopulationType::Unpopulated));
    }

    #[test]
    fn index_is_row_major_and_bounds_checked() {
        let grid = TileGrid::new(5, 4);
        assert_eq!(grid.index(Pos { y: 0, x: 0 }), Some(0));
        assert_eq!(grid.index(Pos { y: 2, x: 3 }), Some(13));
        assert_eq!(grid.index(Pos { y: 4, x: 0 }), None);
        assert_eq!(grid.index(Pos { y: 0, x: -1 }), None);
    }

    #[test]
    fn carving_keeps_tile_and_cost_in_step() {
        let mut grid = TileGrid::new(3, 3);
        assert!(grid.carve_floor(Pos { y: 1, x: 2 }));
        assert!(!grid.carve_floor(Pos { y: 3, x: 0 }));

        assert_eq!(grid.tile_at(Pos { y: 1, x: 2 }), TileType::Floor);
        assert_eq!(grid.cost_at(Pos { y: 1, x: 2 }), PathingCost::Free);
        assert_eq!(grid.floor_count(), 1);
        assert_eq!(grid.tile_at(Pos { y: 3, x: 0 }), TileType::Wall);
        assert_eq!(grid.cost_at(Pos { y: -1, x: 0 }), PathingCost::Blocked);
    }

    #[test]
    fn overlapping_markers_keep_the_entrance() {
        let mut grid = TileGrid::new(3, 3);
        let cell = Pos { y: 1, x: 1 };
        grid.merge_population(cell, PopulationType::Entrance);
        grid.merge_population(cell, PopulationType::Enemy);
        assert_eq!(grid.population_at(cell), PopulationType::Entrance);

        grid.merge_population(Pos { y: 0, x: 0 }, PopulationType::Enemy);
        grid.merge_population(Pos { y: 0, x: 0 }, PopulationType::Item);
        assert_eq!(grid.population_at(Pos { y: 0, x: 0 }), PopulationType::Item);
    }

    #[test]
    fn chain_stamping_carves_rooms_and_corridors() {
        let room = Room::new(1, 1, 2, 2);
        let corridor =
            Corridor { start: Pos { y: 1, x: 2 }, direction: Direction::East, length: 2 };
        let grid = TileGrid::from_chain(6, 4, &[room], &[corridor]);

        assert_eq!(grid.floor_count(), 6);
        assert_eq!(grid.tile_at(Pos { y: 1, x: 4 }), TileType::Floor);
        assert_eq!(grid.tile_at(Pos { y: 2, x: 3 }), TileType::Wall);
        assert_eq!(grid.cost_at(Pos { y: 2, x: 2 }), PathingCost::Free);
    }

    #[test]
    fn positions_walk_rows_bottom_up() {
        let grid = TileGrid::new(2, 2);
        let positions: Vec<Pos> = grid.positions().collect();
        assert_eq!(
            positions,
            vec![Pos { y: 0, x: 0 }, Pos { y: 0, x: 1 }, Pos { y: 1, x: 0 }, Pos { y: 1, x: 1 }]
        );
    }
}
