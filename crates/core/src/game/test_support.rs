//! Shared fixtures for the `game` test suites.

use super::*;
use crate::mapgen::{Room, TileGrid};

/// A single open row `width` cells long at `y = 0`, with the player parked in
/// a one-cell alcove above its west end.
pub(super) fn strip_state(width: usize) -> GameState {
    let strip = Room::new(0, 0, width, 1);
    let alcove = Room::new(0, 1, 1, 1);
    let player = alcove.origin();
    let rooms = vec![strip, alcove];
    let level = LevelData {
        grid: TileGrid::from_chain(width, 2, &rooms, &[]),
        rooms,
        corridors: Vec::new(),
        entrance: player,
        exit: None,
    };
    GameState::new(1, level, PatrolOffset { x: 0, y: 0 })
}
