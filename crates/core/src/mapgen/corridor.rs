//! Straight one-cell-wide corridors leaving a room through one of its edges.

use log::warn;
use rand_chacha::rand_core::Rng;
use serde::Serialize;

use crate::config::IntRange;
use crate::types::{Direction, Pos};

use super::random::{pick, roll, roll_range};
use super::room::{Room, RoomBounds};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Corridor {
    /// Cell on the facing edge of the room the corridor leaves from.
    pub start: Pos,
    pub direction: Direction,
    pub length: usize,
}

impl Corridor {
    pub fn end(&self) -> Pos {
        self.start.step(self.direction, self.length as i32)
    }

    /// Cells covered by the corridor, nearest to the origin room first.
    pub fn cells(&self) -> impl Iterator<Item = Pos> + use<> {
        let Self { start, direction, length } = *self;
        (1..=length as i32).map(move |distance| start.step(direction, distance))
    }

    pub(super) fn setup_corridor<R: Rng + ?Sized>(
        rng: &mut R,
        origin: &Room,
        lengths: IntRange,
        bounds: &RoomBounds,
        is_first: bool,
    ) -> Self {
        let viable: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&direction| max_length(bounds, origin, direction) >= 1)
            .collect();
        let backtrack = origin.entering.filter(|_| !is_first).map(Direction::opposite);
        let forward: Vec<Direction> =
            viable.iter().copied().filter(|&direction| Some(direction) != backtrack).collect();

        let direction = if let Some(direction) = pick(rng, &forward) {
            direction
        } else if let Some(direction) = pick(rng, &viable) {
            warn!("corridor from room at ({}, {}) can only backtrack", origin.x, origin.y);
            direction
        } else {
            warn!("no corridor fits beside room at ({}, {})", origin.x, origin.y);
            widest_direction(bounds, origin)
        };

        let limit = max_length(bounds, origin, direction);
        let length = roll_range(rng, lengths)
            .clamp(1, limit.max(1))
            .min(space_beyond(bounds, origin, direction));
        let start = edge_start(rng, origin, direction, is_first);

        Self { start, direction, length }
    }
}

/// Cells between the room's edge and the grid edge in `direction`.
fn space_beyond(bounds: &RoomBounds, room: &Room, direction: Direction) -> usize {
    match direction {
        Direction::North => bounds.rows.saturating_sub(room.y + room.height),
        Direction::East => bounds.columns.saturating_sub(room.x + room.width),
        Direction::South => room.y,
        Direction::West => room.x,
    }
}

/// Longest corridor that still leaves space for a minimum-sized room.
fn max_length(bounds: &RoomBounds, room: &Room, direction: Direction) -> usize {
    let min_extent = if direction.is_vertical() { bounds.heights.min } else { bounds.widths.min };
    space_beyond(bounds, room, direction).saturating_sub(min_extent)
}

fn widest_direction(bounds: &RoomBounds, room: &Room) -> Direction {
    Direction::ALL
        .into_iter()
        .max_by_key(|&direction| space_beyond(bounds, room, direction))
        .unwrap_or(Direction::North)
}

fn edge_start<R: Rng + ?Sized>(
    rng: &mut R,
    room: &Room,
    direction: Direction,
    is_first: bool,
) -> Pos {
    let along_edge = |rng: &mut R, low: usize, high: usize| {
        let offset = if is_first { low } else { roll(rng, low, high) };
        offset as i32
    };

    match direction {
        Direction::North => {
            Pos { y: room.top() as i32, x: along_edge(rng, room.x, room.right()) }
        }
        Direction::South => Pos { y: room.y as i32, x: along_edge(rng, room.x, room.right()) },
        Direction::East => Pos { y: along_edge(rng, room.y, room.top()), x: room.right() as i32 },
        Direction::West => Pos { y: along_edge(rng, room.y, room.top()), x: room.x as i32 },
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    fn bounds(columns: usize, rows: usize) -> RoomBounds {
        RoomBounds { widths: IntRange::new(2, 4), heights: IntRange::new(2, 4), columns, rows }
    }

    #[test]
    fn cells_run_from_beside_the_start_to_the_terminus() {
        let corridor =
            Corridor { start: Pos { y: 3, x: 5 }, direction: Direction::East, length: 3 };
        let cells: Vec<Pos> = corridor.cells().collect();
        assert_eq!(cells, vec![Pos { y: 3, x: 6 }, Pos { y: 3, x: 7 }, Pos { y: 3, x: 8 }]);
        assert_eq!(corridor.end(), Pos { y: 3, x: 8 });
    }

    #[test]
    fn first_corridor_starts_on_the_room_position_line() {
        let room = Room::new(4, 4, 3, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            let corridor = Corridor::setup_corridor(
                &mut rng,
                &room,
                IntRange::new(1, 3),
                &bounds(20, 20),
                true,
            );
            let expected = match corridor.direction {
                Direction::North => Pos { y: 6, x: 4 },
                Direction::South => Pos { y: 4, x: 4 },
                Direction::East => Pos { y: 4, x: 6 },
                Direction::West => Pos { y: 4, x: 4 },
            };
            assert_eq!(corridor.start, expected);
        }
    }

    #[test]
    fn corridor_in_a_corner_room_only_heads_inward_and_leaves_room_for_the_next() {
        let room = Room::new(0, 0, 3, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..200 {
            let corridor = Corridor::setup_corridor(
                &mut rng,
                &room,
                IntRange::new(4, 30),
                &bounds(12, 12),
                false,
            );
            assert!(matches!(corridor.direction, Direction::North | Direction::East));
            assert!(corridor.length >= 1);
            // 9 cells beyond the room, minus the minimum room extent of 2.
            assert!(corridor.length <= 7);
            assert!(corridor.cells().all(|cell| cell.x < 12 && cell.y < 12));
            assert!(room.contains(corridor.start));
        }
    }

    #[test]
    fn corridor_does_not_double_back_into_the_entering_corridor() {
        let mut room = Room::new(8, 8, 3, 3);
        room.entering = Some(Direction::East);
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..200 {
            let corridor = Corridor::setup_corridor(
                &mut rng,
                &room,
                IntRange::new(1, 3),
                &bounds(20, 20),
                false,
            );
            assert_ne!(corridor.direction, Direction::West);
        }
    }

    #[test]
    fn backtracking_is_allowed_when_it_is_the_only_way_out() {
        let mut room = Room::new(0, 0, 5, 9);
        room.entering = Some(Direction::West);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let corridor =
            Corridor::setup_corridor(&mut rng, &room, IntRange::new(6, 8), &bounds(10, 9), false);
        assert_eq!(corridor.direction, Direction::East);
        assert_eq!(corridor.length, 3);
    }
}
