#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first route planner used to steer zombies toward players.
//!
//! Routes are shortest in four-neighbour steps. Among routes of equal length
//! the planner prefers the one whose earliest diverging step comes first in
//! [`Direction::EVALUATION_ORDER`], so identical boards always yield identical
//! routes.

use std::collections::VecDeque;

use dead_grid_board::{Board, Navigator};
use dead_grid_core::{Direction, Position};
use log::trace;

/// Reasons a route cannot be produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The starting cell lies outside the grid.
    #[error("start {0} is outside the grid")]
    StartOutOfBounds(Position),
    /// The goal cell lies outside the grid.
    #[error("goal {0} is outside the grid")]
    GoalOutOfBounds(Position),
    /// Every route from start to goal is walled off.
    #[error("no route from {from} to {to}")]
    NoPath {
        /// Cell the search started from.
        from: Position,
        /// Cell the search tried to reach.
        to: Position,
    },
}

/// Reusable breadth-first search workspace.
///
/// Buffers are kept between searches so repeated planning on the same board
/// size does not allocate.
#[derive(Clone, Debug, Default)]
pub struct Pathfinder {
    visited: Vec<bool>,
    came_from: Vec<Option<Direction>>,
    queue: VecDeque<usize>,
}

impl Pathfinder {
    /// Creates a pathfinder with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a shortest route from `start` to `goal` on a `width` by `height` grid.
    ///
    /// `is_blocked` is consulted for every cell except the goal, which is
    /// always enterable. An empty route means `start` already equals `goal`.
    pub fn find_path<F>(
        &mut self,
        width: u32,
        height: u32,
        start: Position,
        goal: Position,
        mut is_blocked: F,
    ) -> Result<Vec<Direction>, PathError>
    where
        F: FnMut(Position) -> bool,
    {
        let start_index =
            index(width, height, start).ok_or(PathError::StartOutOfBounds(start))?;
        let goal_index = index(width, height, goal).ok_or(PathError::GoalOutOfBounds(goal))?;

        if start_index == goal_index {
            return Ok(Vec::new());
        }

        self.reset(width, height);
        self.visited[start_index] = true;
        self.queue.push_back(start_index);

        let columns = usize::try_from(width).unwrap_or(0);
        let mut reached = false;

        'search: while let Some(current) = self.queue.pop_front() {
            let cell = position(columns, current);
            for direction in Direction::EVALUATION_ORDER {
                let neighbour = cell.step(direction);
                let Some(next) = index(width, height, neighbour) else {
                    continue;
                };
                if self.visited[next] {
                    continue;
                }
                if next != goal_index && is_blocked(neighbour) {
                    continue;
                }

                self.visited[next] = true;
                self.came_from[next] = Some(direction);
                if next == goal_index {
                    reached = true;
                    break 'search;
                }
                self.queue.push_back(next);
            }
        }

        if !reached {
            return Err(PathError::NoPath {
                from: start,
                to: goal,
            });
        }

        let route = self.trace_back(columns, width, height, goal_index);
        trace!("route {start} -> {goal}: {} steps", route.len());
        Ok(route)
    }

    /// Finds a shortest route across `board`, treating indestructible entities as walls.
    pub fn find_path_on(
        &mut self,
        board: &Board,
        start: Position,
        goal: Position,
    ) -> Result<Vec<Direction>, PathError> {
        self.find_path(board.width(), board.height(), start, goal, |cell| {
            board.blocks_navigation(cell)
        })
    }

    fn reset(&mut self, width: u32, height: u32) {
        let cells = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        self.visited.clear();
        self.visited.resize(cells, false);
        self.came_from.clear();
        self.came_from.resize(cells, None);
        self.queue.clear();
    }

    fn trace_back(&self, columns: usize, width: u32, height: u32, goal: usize) -> Vec<Direction> {
        let mut route = Vec::new();
        let mut current = goal;
        while let Some(direction) = self.came_from[current] {
            route.push(direction);
            let (dx, dy) = direction.offset();
            let cell = position(columns, current);
            let previous = Position::new(cell.x() - dx, cell.y() - dy);
            match index(width, height, previous) {
                Some(previous) => current = previous,
                None => break,
            }
        }
        route.reverse();
        route
    }
}

impl Navigator for Pathfinder {
    fn next_direction(&mut self, board: &Board, from: Position, to: Position) -> Option<Direction> {
        self.find_path_on(board, from, to)
            .ok()
            .and_then(|route| route.first().copied())
    }
}

fn index(width: u32, height: u32, cell: Position) -> Option<usize> {
    let column = u32::try_from(cell.x()).ok().filter(|x| *x < width)?;
    let row = u32::try_from(cell.y()).ok().filter(|y| *y < height)?;
    let offset = u64::from(row) * u64::from(width) + u64::from(column);
    usize::try_from(offset).ok()
}

fn position(columns: usize, index: usize) -> Position {
    let column = index % columns.max(1);
    let row = index / columns.max(1);
    Position::new(
        i32::try_from(column).unwrap_or(i32::MAX),
        i32::try_from(row).unwrap_or(i32::MAX),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(_: Position) -> bool {
        false
    }

    #[test]
    fn diagonal_route_prefers_down_first() {
        let mut pathfinder = Pathfinder::new();
        let route = pathfinder
            .find_path(2, 2, Position::new(0, 0), Position::new(1, 1), open)
            .expect("route exists");

        assert_eq!(route, vec![Direction::Down, Direction::Right]);
    }

    #[test]
    fn start_equal_to_goal_yields_empty_route() {
        let mut pathfinder = Pathfinder::new();
        let route = pathfinder
            .find_path(3, 3, Position::new(1, 1), Position::new(1, 1), open)
            .expect("trivial route");

        assert!(route.is_empty());
    }

    #[test]
    fn goal_is_enterable_even_when_blocked() {
        let mut pathfinder = Pathfinder::new();
        let goal = Position::new(2, 0);
        let route = pathfinder
            .find_path(3, 1, Position::new(0, 0), goal, |cell| cell == goal)
            .expect("goal always enterable");

        assert_eq!(route, vec![Direction::Right, Direction::Right]);
    }

    #[test]
    fn walls_force_a_detour() {
        let wall = [Position::new(1, 0), Position::new(1, 1)];
        let mut pathfinder = Pathfinder::new();
        let route = pathfinder
            .find_path(3, 3, Position::new(0, 0), Position::new(2, 0), |cell| {
                wall.contains(&cell)
            })
            .expect("detour exists");

        assert_eq!(
            route,
            vec![
                Direction::Down,
                Direction::Down,
                Direction::Right,
                Direction::Right,
                Direction::Up,
                Direction::Up,
            ]
        );
    }

    #[test]
    fn enclosed_start_reports_no_path() {
        let mut pathfinder = Pathfinder::new();
        let from = Position::new(0, 0);
        let to = Position::new(2, 0);
        let error = pathfinder
            .find_path(3, 1, from, to, |cell| cell == Position::new(1, 0))
            .expect_err("walled in");

        assert_eq!(error, PathError::NoPath { from, to });
    }

    #[test]
    fn out_of_bounds_endpoints_are_rejected() {
        let mut pathfinder = Pathfinder::new();
        assert_eq!(
            pathfinder.find_path(2, 2, Position::new(-1, 0), Position::new(1, 1), open),
            Err(PathError::StartOutOfBounds(Position::new(-1, 0)))
        );
        assert_eq!(
            pathfinder.find_path(2, 2, Position::new(0, 0), Position::new(2, 1), open),
            Err(PathError::GoalOutOfBounds(Position::new(2, 1)))
        );
    }

    #[test]
    fn buffers_are_reused_across_sizes() {
        let mut pathfinder = Pathfinder::new();
        let first = pathfinder
            .find_path(5, 5, Position::new(0, 0), Position::new(4, 4), open)
            .expect("route exists");
        let second = pathfinder
            .find_path(2, 1, Position::new(1, 0), Position::new(0, 0), open)
            .expect("route exists");

        assert_eq!(first.len(), 8);
        assert_eq!(second, vec![Direction::Left]);
    }
}
