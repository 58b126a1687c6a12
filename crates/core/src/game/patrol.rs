//! Patrolling creatures and the per-turn movement step.
//! Creatures act one after another in spawn order, so a creature that moves
//! early in a turn can block one that acts later.

use log::trace;

use crate::config::PatrolOffset;
use crate::pathfinding::find_path;
use crate::types::{CreatureId, Pos, TurnEvent, WaitReason};

use super::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatrollingCreature {
    pub pos: Pos,
    pub patrol_start: Pos,
    pub patrol_end: Pos,
    pub on_return_leg: bool,
}

impl PatrollingCreature {
    /// Patrols between `spawn` and `spawn + offset`, heading out first. An end
    /// past the edge of the grid leaves the creature waiting for a path.
    pub fn new(spawn: Pos, offset: PatrolOffset) -> Self {
        Self {
            pos: spawn,
            patrol_start: spawn,
            patrol_end: Pos {
                y: spawn.y.saturating_add(offset.y),
                x: spawn.x.saturating_add(offset.x),
            },
            on_return_leg: false,
        }
    }

    pub fn target(&self) -> Pos {
        if self.on_return_leg { self.patrol_start } else { self.patrol_end }
    }

    fn flip_leg(&mut self) {
        self.on_return_leg = !self.on_return_leg;
    }
}

/// Advances the world by one turn.
pub fn simulate_turn(mut state: GameState) -> GameState {
    run_turn(&mut state);
    state
}

pub(super) fn run_turn(state: &mut GameState) {
    state.turn += 1;
    let order: Vec<CreatureId> = state.creatures.keys().collect();
    for id in order {
        step_creature(state, id);
    }
}

fn step_creature(state: &mut GameState, id: CreatureId) {
    let mut creature = state.creatures[id];
    if creature.pos == creature.target() {
        creature.flip_leg();
    }
    let target = creature.target();

    let next = find_path(&state.path_grid, creature.pos, target)
        .and_then(|path| path.first().copied());
    match next {
        None => record(state, TurnEvent::Waited { creature: id, reason: WaitReason::NoPath }),
        Some(next) if state.is_occupied(next) => record(
            state,
            TurnEvent::Waited { creature: id, reason: WaitReason::Occupied(next) },
        ),
        Some(next) => {
            record(state, TurnEvent::Moved { creature: id, from: creature.pos, to: next });
            creature.pos = next;
            if next == target {
                creature.flip_leg();
                record(state, TurnEvent::PatrolLegCompleted { creature: id, at: next });
            }
        }
    }
    state.creatures[id] = creature;
}

fn record(state: &mut GameState, event: TurnEvent) {
    trace!("turn {}: {event:?}", state.turn);
    state.log.push(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::strip_state;

    fn offset(x: i32, y: i32) -> PatrolOffset {
        PatrolOffset { x, y }
    }

    #[test]
    fn creature_walks_out_and_turns_back_at_the_end_of_its_patrol() {
        let mut state = strip_state(8);
        let id = state.spawn_creature(Pos { y: 0, x: 0 }, offset(3, 0));

        for expected_x in 1..=3 {
            state = simulate_turn(state);
            assert_eq!(state.creatures[id].pos, Pos { y: 0, x: expected_x });
        }
        assert!(state.creatures[id].on_return_leg);
        assert_eq!(
            state.log.last(),
            Some(&TurnEvent::PatrolLegCompleted { creature: id, at: Pos { y: 0, x: 3 } })
        );

        state = simulate_turn(state);
        assert_eq!(state.creatures[id].pos, Pos { y: 0, x: 2 });
        assert_eq!(state.turn, 4);
    }

    #[test]
    fn patrol_end_inside_a_wall_leaves_the_creature_waiting() {
        let mut state = strip_state(4);
        let id = state.spawn_creature(Pos { y: 0, x: 1 }, offset(0, 2));

        state = simulate_turn(state);
        assert_eq!(state.creatures[id].pos, Pos { y: 0, x: 1 });
        assert_eq!(
            state.log,
            vec![TurnEvent::Waited { creature: id, reason: WaitReason::NoPath }]
        );
    }

    #[test]
    fn extreme_offsets_saturate_and_wait_for_a_path() {
        let mut state = strip_state(4);
        let id = state.spawn_creature(Pos { y: 0, x: 1 }, offset(i32::MAX, i32::MIN));
        assert_eq!(state.creatures[id].patrol_end, Pos { y: i32::MIN, x: i32::MAX });

        state = simulate_turn(state);
        assert_eq!(state.creatures[id].pos, Pos { y: 0, x: 1 });
        assert_eq!(
            state.log,
            vec![TurnEvent::Waited { creature: id, reason: WaitReason::NoPath }]
        );
    }

    #[test]
    fn creature_does_not_step_onto_the_player() {
        let mut state = strip_state(6);
        state.player = Pos { y: 0, x: 2 };
        let id = state.spawn_creature(Pos { y: 0, x: 1 }, offset(3, 0));

        state = simulate_turn(state);
        assert_eq!(state.creatures[id].pos, Pos { y: 0, x: 1 });
        assert_eq!(
            state.log,
            vec![TurnEvent::Waited {
                creature: id,
                reason: WaitReason::Occupied(Pos { y: 0, x: 2 }),
            }]
        );
    }

    #[test]
    fn earlier_spawn_waits_behind_a_creature_that_has_not_moved_yet() {
        let mut state = strip_state(8);
        let first = state.spawn_creature(Pos { y: 0, x: 0 }, offset(4, 0));
        let second = state.spawn_creature(Pos { y: 0, x: 1 }, offset(4, 0));

        state = simulate_turn(state);
        assert_eq!(state.creatures[first].pos, Pos { y: 0, x: 0 });
        assert_eq!(state.creatures[second].pos, Pos { y: 0, x: 2 });

        state = simulate_turn(state);
        assert_eq!(state.creatures[first].pos, Pos { y: 0, x: 1 });
        assert_eq!(state.creatures[second].pos, Pos { y: 0, x: 3 });
    }

    #[test]
    fn same_state_always_plays_out_the_same_turn() {
        let mut state = strip_state(10);
        state.spawn_creature(Pos { y: 0, x: 0 }, offset(5, 0));
        state.spawn_creature(Pos { y: 0, x: 9 }, offset(-5, 0));

        let left = simulate_turn(simulate_turn(state.clone()));
        let right = simulate_turn(simulate_turn(state));
        assert_eq!(left.log, right.log);
        assert_eq!(left.snapshot_hash(), right.snapshot_hash());
    }

    #[test]
    fn zero_offset_patrol_stands_still() {
        let mut state = strip_state(5);
        let id = state.spawn_creature(Pos { y: 0, x: 2 }, offset(0, 0));

        for _ in 0..3 {
            state = simulate_turn(state);
        }
        assert_eq!(state.creatures[id].pos, Pos { y: 0, x: 2 });
        assert!(
            state
                .log
                .iter()
                .all(|event| *event == TurnEvent::Waited { creature: id, reason: WaitReason::NoPath })
        );
    }
}
