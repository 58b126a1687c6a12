use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct CreatureId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn step(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.offset();
        Self { y: self.y + dy * distance, x: self.x + dx * distance }
    }

    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn neighbors(self) -> [Self; 4] {
        Direction::ALL.map(|direction| self.step(direction, 1))
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TileType {
    #[default]
    Wall,
    Floor,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum PathingCost {
    #[default]
    Blocked,
    Free,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum PopulationType {
    #[default]
    Unpopulated,
    Enemy,
    Item,
    Exit,
    Entrance,
}

/// Cardinal directions. North points toward increasing `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Unit vector as `(dx, dy)`.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WaitReason {
    NoPath,
    Occupied(Pos),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnEvent {
    Moved { creature: CreatureId, from: Pos, to: Pos },
    Waited { creature: CreatureId, reason: WaitReason },
    PatrolLegCompleted { creature: CreatureId, at: Pos },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_north_increases_y() {
        let origin = Pos { y: 3, x: 5 };
        assert_eq!(origin.step(Direction::North, 2), Pos { y: 5, x: 5 });
        assert_eq!(origin.step(Direction::West, 5), Pos { y: 3, x: 0 });
    }

    #[test]
    fn opposite_directions_cancel_out() {
        let origin = Pos { y: 4, x: 4 };
        for direction in Direction::ALL {
            assert_eq!(origin.step(direction, 3).step(direction.opposite(), 3), origin);
            assert_eq!(direction.is_vertical(), direction.opposite().is_vertical());
        }
    }
}
