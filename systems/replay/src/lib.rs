#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Action log replay and the persisted game record.

use dead_grid_board::{self as board, ActionError, Board, BoardError, Navigator};
use dead_grid_core::{Action, RulesConfig};
use dead_grid_system_pathfinding::Pathfinder;
use log::debug;
use serde::{Deserialize, Serialize};

/// Failures while rebuilding a board from its history.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// The recorded grid does not describe a valid board.
    #[error("recorded grid is invalid: {0}")]
    Board(#[from] BoardError),
    /// A recorded action was rejected.
    #[error("action #{index} ({action:?}) failed: {source}")]
    Action {
        /// Zero-based position of the action in the log.
        index: usize,
        /// The rejected action.
        action: Action,
        /// Why the board rejected it.
        source: ActionError,
    },
    /// The record could not be encoded or decoded as JSON.
    #[error("malformed game record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Applies `actions` to `board` in order, stopping at the first failure.
///
/// The board is consumed and returned so a failed replay never hands back a
/// half-applied state.
pub fn replay<N>(
    mut board: Board,
    actions: &[Action],
    navigator: &mut N,
) -> Result<Board, ReplayError>
where
    N: Navigator + ?Sized,
{
    for (index, action) in actions.iter().enumerate() {
        board::apply(&mut board, action, navigator).map_err(|source| ReplayError::Action {
            index,
            action: action.clone(),
            source,
        })?;
    }
    debug!("replayed {} actions", actions.len());
    Ok(board)
}

/// Starting grid plus every action applied to it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Grid the board was built from, in the constructor's token format.
    pub grid: Vec<Vec<String>>,
    /// Actions in the order they were applied.
    pub actions: Vec<Action>,
}

impl GameRecord {
    /// Creates a record from a starting grid and its action log.
    #[must_use]
    pub fn new(grid: Vec<Vec<String>>, actions: Vec<Action>) -> Self {
        Self { grid, actions }
    }

    /// Parses a record from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialises the record as compact JSON.
    pub fn to_json(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rebuilds the board the record describes.
    pub fn replay(&self, config: RulesConfig) -> Result<Board, ReplayError> {
        let board = Board::with_config(self.grid.as_slice(), config)?;
        replay(board, &self.actions, &mut Pathfinder::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dead_grid_core::Position;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| (*cell).to_owned()).collect())
            .collect()
    }

    #[test]
    fn record_json_shape_is_stable() {
        let record = GameRecord::new(
            grid(&[&["Z", "P"]]),
            vec![
                Action::BeginTurn,
                Action::PlayerShoot {
                    target: Position::new(0, 0),
                },
            ],
        );

        let json = record.to_json().expect("serialises");
        assert_eq!(
            json,
            r#"{"grid":[["Z","P"]],"actions":["BeginTurn",{"PlayerShoot":{"target":{"x":0,"y":0}}}]}"#
        );
        assert_eq!(GameRecord::from_json(&json).expect("parses"), record);
    }

    #[test]
    fn failing_action_reports_its_index() {
        let record = GameRecord::new(
            grid(&[&["Z", " ", "P"]]),
            vec![
                Action::BeginTurn,
                Action::PlayerShoot {
                    target: Position::new(0, 0),
                },
                Action::PlayerShoot {
                    target: Position::new(1, 0),
                },
            ],
        );

        let error = record
            .replay(RulesConfig::default())
            .expect_err("nothing at (1, 0)");
        match error {
            ReplayError::Action {
                index,
                action,
                source,
            } => {
                assert_eq!(index, 2);
                assert_eq!(
                    action,
                    Action::PlayerShoot {
                        target: Position::new(1, 0),
                    }
                );
                assert_eq!(source, ActionError::NoZombieAt(Position::new(1, 0)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_grid_is_reported() {
        let record = GameRecord::new(grid(&[&["P", " "]]), Vec::new());
        assert!(matches!(
            record.replay(RulesConfig::default()),
            Err(ReplayError::Board(BoardError::MissingZombie))
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            GameRecord::from_json("{\"grid\": 3}"),
            Err(ReplayError::Json(_))
        ));
    }
}
