//! Per-room population policies deciding where enemies and items start.

use crate::types::{PopulationType, Pos};

use super::room::Room;

/// Strategy consulted by [`populate_room`]. Targets come from the difficulty
/// level; predicates are asked cell by cell in row-major scan order.
pub trait PopulationPolicy {
    fn enemy_target(&self, difficulty: u32) -> usize;

    fn should_place_enemy(&self, room: &Room, cell: Pos) -> bool;

    fn item_target(&self, _difficulty: u32) -> usize {
        0
    }

    fn should_place_item(&self, _room: &Room, _cell: Pos) -> bool {
        false
    }
}

/// One enemy per room on the first scanned cell, no items, whatever the
/// difficulty. See [`ScaledPopulation`] for a policy that scales.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BaselinePopulation;

impl PopulationPolicy for BaselinePopulation {
    fn enemy_target(&self, _difficulty: u32) -> usize {
        1
    }

    fn should_place_enemy(&self, _room: &Room, _cell: Pos) -> bool {
        true
    }
}

/// Enemy count grows with difficulty up to a cap; enemies are spread over
/// every `spacing`-th cell of the room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaledPopulation {
    pub enemies_per_level: usize,
    pub max_enemies: usize,
    pub spacing: usize,
    pub items_per_room: usize,
}

impl Default for ScaledPopulation {
    fn default() -> Self {
        Self { enemies_per_level: 1, max_enemies: 4, spacing: 3, items_per_room: 1 }
    }
}

impl PopulationPolicy for ScaledPopulation {
    fn enemy_target(&self, difficulty: u32) -> usize {
        (difficulty as usize).saturating_mul(self.enemies_per_level).min(self.max_enemies)
    }

    fn should_place_enemy(&self, room: &Room, cell: Pos) -> bool {
        scan_index(room, cell) % self.spacing.max(1) == 0
    }

    fn item_target(&self, _difficulty: u32) -> usize {
        self.items_per_room
    }

    fn should_place_item(&self, _room: &Room, _cell: Pos) -> bool {
        true
    }
}

/// Marks enemies then items on the room's still unpopulated cells, scanning
/// row-major and stopping once each target is met. Returns enemies placed.
pub fn populate_room<P: PopulationPolicy + ?Sized>(
    room: &mut Room,
    policy: &P,
    difficulty: u32,
) -> usize {
    let enemies = fill(room, PopulationType::Enemy, policy.enemy_target(difficulty), |room, cell| {
        policy.should_place_enemy(room, cell)
    });
    fill(room, PopulationType::Item, policy.item_target(difficulty), |room, cell| {
        policy.should_place_item(room, cell)
    });
    enemies
}

fn fill(
    room: &mut Room,
    kind: PopulationType,
    target: usize,
    mut should_place: impl FnMut(&Room, Pos) -> bool,
) -> usize {
    let mut placed = 0;
    for cell in room.cells() {
        if placed == target {
            break;
        }
        if room.population_at(cell) != PopulationType::Unpopulated {
            continue;
        }
        if should_place(room, cell) {
            room.mark(cell, kind);
            placed += 1;
        }
    }
    placed
}

fn scan_index(room: &Room, cell: Pos) -> usize {
    let local_x = (cell.x as usize).saturating_sub(room.x);
    let local_y = (cell.y as usize).saturating_sub(room.y);
    local_y * room.width + local_x
}
