//! Rectangular rooms: placement of the first room and of rooms anchored to a corridor.

use rand_chacha::rand_core::Rng;
use serde::Serialize;

use crate::config::{DungeonConfig, IntRange};
use crate::types::{Direction, PopulationType, Pos};

use super::corridor::Corridor;
use super::random::{roll, roll_range};

/// Size ranges for rooms together with the grid they must fit in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RoomBounds {
    pub(crate) widths: IntRange,
    pub(crate) heights: IntRange,
    pub(crate) columns: usize,
    pub(crate) rows: usize,
}

impl RoomBounds {
    pub(crate) fn from_config(config: &DungeonConfig) -> Self {
        Self {
            widths: config.room_width,
            heights: config.room_height,
            columns: config.columns,
            rows: config.rows,
        }
    }

    fn sample_size<R: Rng + ?Sized>(&self, rng: &mut R) -> (usize, usize) {
        let width = roll_range(rng, self.widths).min(self.columns);
        let height = roll_range(rng, self.heights).min(self.rows);
        (width, height)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    /// Direction of the corridor that led into this room.
    pub entering: Option<Direction>,
    population: Vec<PopulationType>,
}

impl Room {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self::with_entry(x, y, width, height, None)
    }

    fn with_entry(
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        entering: Option<Direction>,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            entering,
            population: vec![PopulationType::Unpopulated; width * height],
        }
    }

    pub(super) fn setup_first_room<R: Rng + ?Sized>(rng: &mut R, bounds: &RoomBounds) -> Self {
        let (width, height) = bounds.sample_size(rng);
        let x = roll(rng, 0, bounds.columns - width);
        let y = roll(rng, 0, bounds.rows - height);
        Self::new(x, y, width, height)
    }

    /// Places a room past the end of `corridor`, covering the corridor's
    /// terminus on the perpendicular axis, clamped to the grid.
    pub(super) fn setup_room<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: &RoomBounds,
        corridor: &Corridor,
    ) -> Self {
        let RoomBounds { columns, rows, .. } = *bounds;
        let (mut width, mut height) = bounds.sample_size(rng);
        let end = corridor.end();
        let anchor = end.step(corridor.direction, 1);

        let (x, y) = match corridor.direction {
            Direction::North => {
                height = height.min(space_from(anchor.y, rows)).max(1);
                let x = end.x - roll(rng, 0, width - 1) as i32;
                (x, anchor.y)
            }
            Direction::South => {
                height = height.min(space_to(anchor.y, rows)).max(1);
                let x = end.x - roll(rng, 0, width - 1) as i32;
                (x, anchor.y - height as i32 + 1)
            }
            Direction::East => {
                width = width.min(space_from(anchor.x, columns)).max(1);
                let y = end.y - roll(rng, 0, height - 1) as i32;
                (anchor.x, y)
            }
            Direction::West => {
                width = width.min(space_to(anchor.x, columns)).max(1);
                let y = end.y - roll(rng, 0, height - 1) as i32;
                (anchor.x - width as i32 + 1, y)
            }
        };

        Self::with_entry(
            clamp_origin(x, width, columns),
            clamp_origin(y, height, rows),
            width,
            height,
            Some(corridor.direction),
        )
    }

    pub fn right(&self) -> usize {
        self.x + self.width - 1
    }

    pub fn top(&self) -> usize {
        self.y + self.height - 1
    }

    pub fn origin(&self) -> Pos {
        Pos { y: self.y as i32, x: self.x as i32 }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.x as i32
            && pos.y >= self.y as i32
            && pos.x <= self.right() as i32
            && pos.y <= self.top() as i32
    }

    /// Cells of the room in row-major order, in grid coordinates.
    pub fn cells(&self) -> impl Iterator<Item = Pos> + use<> {
        let (x0, y0) = (self.x as i32, self.y as i32);
        let (width, height) = (self.width as i32, self.height as i32);
        (y0..y0 + height).flat_map(move |y| (x0..x0 + width).map(move |x| Pos { y, x }))
    }

    pub fn population_at(&self, pos: Pos) -> PopulationType {
        self.local_index(pos).map_or(PopulationType::Unpopulated, |index| self.population[index])
    }

    pub(crate) fn mark(&mut self, pos: Pos, kind: PopulationType) -> bool {
        let Some(index) = self.local_index(pos) else {
            return false;
        };
        self.population[index] = kind;
        true
    }

    pub fn populated_cells(&self) -> impl Iterator<Item = (Pos, PopulationType)> + '_ {
        self.cells()
            .zip(self.population.iter().copied())
            .filter(|&(_, kind)| kind != PopulationType::Unpopulated)
    }

    pub fn count_of(&self, kind: PopulationType) -> usize {
        self.population.iter().filter(|&&cell| cell == kind).count()
    }

    pub fn enemy_count(&self) -> usize {
        self.count_of(PopulationType::Enemy)
    }

    fn local_index(&self, pos: Pos) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        let local_x = pos.x as usize - self.x;
        let local_y = pos.y as usize - self.y;
        Some(local_y * self.width + local_x)
    }
}

/// Cells from `start` up to the far edge of an axis of length `limit`.
fn space_from(start: i32, limit: usize) -> usize {
    (limit as i64 - i64::from(start)).max(0) as usize
}

/// Cells from the near edge up to and including `end`.
fn space_to(end: i32, limit: usize) -> usize {
    (i64::from(end) + 1).clamp(0, limit as i64) as usize
}

fn clamp_origin(origin: i32, extent: usize, limit: usize) -> usize {
    let max_origin = limit.saturating_sub(extent) as i64;
    i64::from(origin).clamp(0, max_origin) as usize
}
