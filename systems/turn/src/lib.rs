#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn orchestration: players shoot, then zombies advance.
//!
//! The engine never mutates the board directly. Every change it makes goes
//! through [`dead_grid_board::apply`] and is appended to the caller's action
//! log, so replaying that log on a fresh board reproduces the game.

use dead_grid_board::{self as board, ActionError, Board, QueryError};
use dead_grid_core::Action;
use dead_grid_system_pathfinding::Pathfinder;
use log::{debug, info};

/// Reasons a turn could not be completed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    /// An action the engine produced was rejected by the board.
    #[error(transparent)]
    Action(#[from] ActionError),
    /// A player could not pick a target.
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Result of a single call to [`TurnEngine::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The game was already over; nothing happened.
    Idle,
    /// A turn was played.
    Advanced {
        /// Whether the game ended during this turn.
        finished: bool,
    },
}

/// Summary of [`TurnEngine::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Turns played during the run.
    pub turns: u32,
    /// Whether the game is over.
    pub finished: bool,
    /// Whether at least one player survived a finished game.
    pub won: bool,
}

/// Drives turns on a board and records the actions it applies.
#[derive(Clone, Debug, Default)]
pub struct TurnEngine {
    pathfinder: Pathfinder,
    turns: u32,
}

impl TurnEngine {
    /// Creates an engine that has played no turns yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of turns advanced so far.
    #[must_use]
    pub const fn turns(&self) -> u32 {
        self.turns
    }

    /// Mutable access to the pathfinder, for applying recorded actions
    /// that require navigation.
    pub fn pathfinder_mut(&mut self) -> &mut Pathfinder {
        &mut self.pathfinder
    }

    /// Plays one turn.
    ///
    /// Every living player shoots the closest living zombie, in player order,
    /// then all zombies step toward their closest player. Play stops as soon
    /// as the game is decided.
    pub fn step(
        &mut self,
        board: &mut Board,
        out: &mut Vec<Action>,
    ) -> Result<StepOutcome, TurnError> {
        if board.finished() {
            return Ok(StepOutcome::Idle);
        }

        self.commit(board, Action::BeginTurn, out)?;

        let players = board.player_ids().to_vec();
        for player in players {
            if board.finished() {
                break;
            }
            let Some(origin) = board
                .entity(player)
                .filter(|entity| entity.alive())
                .map(|entity| entity.position())
            else {
                continue;
            };

            let zombie = board.closest_zombie(origin)?;
            let Some(target) = board.entity(zombie).map(|entity| entity.position()) else {
                continue;
            };
            debug!("player at {origin} shoots zombie {} at {target}", zombie.get());
            self.commit(board, Action::PlayerShoot { target }, out)?;
        }

        if !board.finished() {
            self.commit(board, Action::ZombieStepAll, out)?;
        }

        self.turns += 1;
        let finished = board.finished();
        if finished {
            if board.is_won() {
                info!("players survived after {} turns", self.turns);
            } else {
                info!("all players fell after {} turns", self.turns);
            }
        }

        Ok(StepOutcome::Advanced { finished })
    }

    /// Plays turns until the game is over or `max_turns` turns have been played.
    pub fn run(
        &mut self,
        board: &mut Board,
        max_turns: u32,
        out: &mut Vec<Action>,
    ) -> Result<RunSummary, TurnError> {
        let mut turns = 0;
        while turns < max_turns {
            match self.step(board, out)? {
                StepOutcome::Idle => break,
                StepOutcome::Advanced { finished } => {
                    turns += 1;
                    if finished {
                        break;
                    }
                }
            }
        }

        Ok(RunSummary {
            turns,
            finished: board.finished(),
            won: board.is_won(),
        })
    }

    fn commit(
        &mut self,
        board: &mut Board,
        action: Action,
        out: &mut Vec<Action>,
    ) -> Result<(), TurnError> {
        board::apply(board, &action, &mut self.pathfinder)?;
        out.push(action);
        Ok(())
    }
}
