//! Shortest paths over an immutable Free/Blocked cost grid.
//! Cardinal moves only, unit step cost, Manhattan heuristic. The open set is
//! ordered on `(f, h, y, x)` so equal-cost ties always resolve the same way.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::mapgen::grid::{cell_index, in_bounds};
use crate::types::{PathingCost, Pos};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PathGrid {
    width: usize,
    height: usize,
    costs: Vec<PathingCost>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

impl PathGrid {
    /// Missing trailing cells are treated as blocked; extra cells are dropped.
    pub fn new(width: usize, height: usize, mut costs: Vec<PathingCost>) -> Self {
        costs.resize(width * height, PathingCost::Blocked);
        Self { width, height, costs }
    }

    pub fn from_fn(width: usize, height: usize, mut cost: impl FnMut(Pos) -> PathingCost) -> Self {
        let mut costs = Vec::with_capacity(width * height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                costs.push(cost(Pos { y, x }));
            }
        }
        Self { width, height, costs }
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

    pub fn cost_at(&self, pos: Pos) -> PathingCost {
        if !self.in_bounds(pos) {
            return PathingCost::Blocked;
        }
        self.costs[cell_index(self.width, pos)]
    }

    pub fn is_free(&self, pos: Pos) -> bool {
        self.cost_at(pos) == PathingCost::Free
    }
}

/// Cells from the one next to `start` up to and including `goal`.
/// `Some(vec![])` when already there, `None` when no route exists.
pub fn find_path(grid: &PathGrid, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    if !grid.in_bounds(start) || !grid.is_free(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![]);
    }

    let mut open_set = BTreeSet::new();
    let mut g_score: BTreeMap<Pos, u32> = BTreeMap::new();
    let mut came_from: BTreeMap<Pos, Pos> = BTreeMap::new();

    let start_h = start.manhattan(goal);
    open_set.insert(OpenNode { f: start_h, h: start_h, y: start.y, x: start.x });
    g_score.insert(start, 0);

    while let Some(current_node) = open_set.pop_first() {
        let current = Pos { y: current_node.y, x: current_node.x };
        if current == goal {
            return reconstruct_path(&came_from, start, goal);
        }

        let Some(&current_g) = g_score.get(&current) else {
            continue;
        };
        // Stale entry left behind by a later improvement.
        if current_node.f != current_g + current_node.h {
            continue;
        }

        for neighbor in current.neighbors() {
            if !grid.is_free(neighbor) {
                continue;
            }
            let tentative_g = current_g + 1;
            if tentative_g >= g_score.get(&neighbor).copied().unwrap_or(u32::MAX) {
                continue;
            }
            came_from.insert(neighbor, current);
            g_score.insert(neighbor, tentative_g);
            let h = neighbor.manhattan(goal);
            open_set.insert(OpenNode { f: tentative_g + h, h, y: neighbor.y, x: neighbor.x });
        }
    }
    None
}

fn reconstruct_path(came_from: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = *came_from.get(&current)?;
        path.push(current);
    }
    path.pop();
    path.reverse();
    Some(path)
}
