//! Error types reported by board construction, queries and actions.

use dead_grid_core::{PlayerToken, Position};

/// Reasons a grid cannot be turned into a board.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The grid has no rows or its first row has no cells.
    #[error("grid is empty")]
    EmptyGrid,
    /// A row's length differs from the first row's length.
    #[error("row {row} has {found} cells but the first row has {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A cell holds a token that names no entity.
    #[error("unrecognised token `{token}` at {position}")]
    InvalidToken {
        /// Cell holding the token.
        position: Position,
        /// Token as written in the grid.
        token: String,
    },
    /// A zombie token carries a health suffix that is not a positive integer.
    #[error("zombie at {position} has invalid health suffix `{token}`")]
    InvalidZombieHealth {
        /// Cell holding the zombie.
        position: Position,
        /// Token as written in the grid.
        token: String,
    },
    /// The grid mixes the single-player `P` token with numbered seats.
    #[error("grid mixes single-player and multiplayer player tokens")]
    MixedPlayerTokens,
    /// The same player token appears more than once.
    #[error("player `{0}` appears more than once")]
    DuplicatePlayer(PlayerToken),
    /// The grid is too large to address with board coordinates.
    #[error("grid dimensions exceed the coordinate range")]
    TooLarge,
    /// A single-player grid has no player.
    #[error("grid contains no player")]
    MissingPlayer,
    /// A single-player grid has no zombie.
    #[error("single-player grid contains no zombie")]
    MissingZombie,
}

/// Failures of lookups that require a living entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Every candidate is dead, or there were none.
    #[error("no living candidate to choose from")]
    NoLivingCandidate,
}

/// Reasons an action cannot be applied to a board.
///
/// A failed action never leaves partial changes behind.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// No living zombie occupies the referenced cell.
    #[error("no living zombie at {0}")]
    NoZombieAt(Position),
    /// No player with the referenced token exists.
    #[error("no player `{0}` on this board")]
    UnknownPlayer(PlayerToken),
    /// The referenced player is already dead.
    #[error("player `{0}` is dead")]
    PlayerDead(PlayerToken),
    /// The destination lies outside the board.
    #[error("{0} is outside the board")]
    OutOfBounds(Position),
    /// The destination already holds an entity.
    #[error("{0} is already occupied")]
    Occupied(Position),
    /// A zombie has no route to any living player.
    #[error("zombie at {from} cannot reach any player; the nearest is at {to}")]
    Unreachable {
        /// Cell of the enclosed zombie.
        from: Position,
        /// Cell of the nearest living player.
        to: Position,
    },
    /// The board already holds as many entities as identifiers can address.
    #[error("no entity identifiers left")]
    TooManyEntities,
}
