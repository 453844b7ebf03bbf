#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Dead Grid simulator.
//!
//! This crate defines the vocabulary that connects the authoritative board,
//! the pure systems and the adapters. Drivers submit [`Action`] values
//! describing desired mutations, the board executes them through its `apply`
//! entry point, and entities accumulate [`EntityEvent`] records during a turn
//! so renderers can animate what happened. Nothing here carries behaviour
//! beyond small value helpers; the board owns all mutation.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Delimiter placed between rows of a compact board snapshot.
pub const SNAPSHOT_ROW_DELIMITER: char = '|';

/// Canonical cell token for an unoccupied cell.
pub const EMPTY_TOKEN: &str = " ";

/// Location of a single grid cell expressed as column (`x`) and row (`y`).
///
/// Positions carry no validity of their own; whether a position lies on a
/// board is decided by that board's dimensions.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position from a column and a row.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the neighbouring position one unit away in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Squared straight-line distance to `other`.
    ///
    /// Ordering by this value is identical to ordering by Euclidean distance
    /// while staying in integer arithmetic, so ties compare exactly.
    #[must_use]
    pub fn distance_squared(self, other: Position) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    #[serde(rename = "U")]
    Up,
    /// Movement toward increasing row indices.
    #[serde(rename = "D")]
    Down,
    /// Movement toward decreasing column indices.
    #[serde(rename = "L")]
    Left,
    /// Movement toward increasing column indices.
    #[serde(rename = "R")]
    Right,
}

impl Direction {
    /// Order in which directions are evaluated whenever several are considered.
    ///
    /// Pathfinding ties resolve in this order, so it must never change.
    pub const EVALUATION_ORDER: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Up,
    ];

    /// Unit column and row delta applied by a move in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Canonical short code used in action logs.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Up => "U",
            Self::Down => "D",
            Self::Left => "L",
            Self::Right => "R",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "U" | "UP" => Ok(Self::Up),
            "D" | "DOWN" => Ok(Self::Down),
            "L" | "LEFT" => Ok(Self::Left),
            "R" | "RIGHT" => Ok(Self::Right),
            _ => Err(ParseDirectionError(value.to_owned())),
        }
    }
}

/// Error returned when a direction code cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction code `{0}`")]
pub struct ParseDirectionError(String);

/// Remaining hit points of an entity.
///
/// Zero means dead. Indestructible entities carry a negative sentinel that
/// damage never touches.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Health(i32);

impl Health {
    /// Sentinel health carried by indestructible entities.
    pub const INDESTRUCTIBLE: Health = Health(-1);

    /// Creates a health value with the provided number of hit points.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Retrieves the raw hit point count.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Reports whether no hit points remain.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Health after absorbing a single point of damage, never below zero.
    #[must_use]
    pub const fn damaged(self) -> Self {
        if self.0 > 0 {
            Self(self.0 - 1)
        } else {
            self
        }
    }
}

/// Unique identifier of an entity inside a board's arena.
///
/// Two entities may share a token but never an identifier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identity of a player cell token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PlayerToken {
    /// The lone player of a single-player board, written `P`.
    Solo,
    /// A numbered seat of a multiplayer board, written `1` through `6`.
    Seat(u8),
}

impl PlayerToken {
    /// Highest seat number accepted on a multiplayer board.
    pub const MAX_SEAT: u8 = 6;

    /// Parses a cell token such as `"P"` or `"3"`.
    pub fn parse(value: &str) -> Result<Self, ParseTokenError> {
        let mut chars = value.trim().chars();
        let (Some(first), None) = (chars.next(), chars.next()) else {
            return Err(ParseTokenError(value.to_owned()));
        };

        match first {
            'p' | 'P' => Ok(Self::Solo),
            digit => match digit.to_digit(10) {
                Some(seat) if (1..=u32::from(Self::MAX_SEAT)).contains(&seat) => {
                    Ok(Self::Seat(seat as u8))
                }
                _ => Err(ParseTokenError(value.to_owned())),
            },
        }
    }

    /// Canonical cell token for the player.
    #[must_use]
    pub fn token(self) -> String {
        match self {
            Self::Solo => "P".to_owned(),
            Self::Seat(seat) => seat.to_string(),
        }
    }
}

impl fmt::Display for PlayerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

impl TryFrom<String> for PlayerToken {
    type Error = ParseTokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PlayerToken> for String {
    fn from(token: PlayerToken) -> Self {
        token.token()
    }
}

/// Error returned when a player token cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a player token")]
pub struct ParseTokenError(String);

/// Kinds of entities that can occupy a board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Indestructible wall.
    Rock,
    /// Destructible crate that zombies can smash.
    Box,
    /// Trap that kills the first zombie that steps onto it.
    Landmine,
    /// Hostile walker that hunts the nearest player.
    Zombie,
    /// Human survivor identified by its token.
    Player(PlayerToken),
}

impl EntityKind {
    /// Reports whether damage can ever be applied to this kind.
    #[must_use]
    pub const fn destructible(self) -> bool {
        !matches!(self, Self::Rock)
    }
}

/// Something that happened to an entity during the current turn.
///
/// Events exist purely for observers such as animation layers; simulation
/// rules never branch on their content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityEvent {
    /// The entity absorbed damage and survived.
    Hit,
    /// The entity lost its last hit point.
    Killed,
    /// The entity moved between two cells.
    Walking {
        /// Cell occupied before the move.
        from: Position,
        /// Cell occupied after the move.
        to: Position,
    },
}

/// Discrete mutation that can be recorded, persisted and replayed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Clears every entity's per-turn event log; marks the start of a turn.
    BeginTurn,
    /// A player shot lands on the living zombie at `target`.
    PlayerShoot {
        /// Cell of the zombie receiving the hit.
        target: Position,
    },
    /// The player carrying `player` relocates to `destination`.
    PlayerWalk {
        /// Token identifying the walking player.
        player: PlayerToken,
        /// Cell the player moves to.
        destination: Position,
    },
    /// A new zombie appears at `position`.
    ZombieSpawn {
        /// Cell the zombie spawns into.
        position: Position,
    },
    /// The living zombie at `from` resolves one move in an explicit direction.
    ZombieWalk {
        /// Cell occupied by the zombie before acting.
        from: Position,
        /// Direction of the attempted move.
        direction: Direction,
    },
    /// Every living zombie resolves one pathfinding step toward its nearest player.
    ZombieStepAll,
}

/// Immutable representation of a single entity used for rendering and queries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Identifier of the entity inside its board.
    pub id: EntityId,
    /// Kind of entity.
    pub kind: EntityKind,
    /// Cell currently occupied.
    pub position: Position,
    /// Remaining hit points.
    pub health: Health,
    /// Whether damage applies to the entity.
    pub destructible: bool,
    /// Events recorded for the entity during the current turn.
    pub events: Vec<EntityEvent>,
}

/// Read-only snapshot describing the renderable entities of a board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityView {
    snapshots: Vec<EntitySnapshot>,
}

impl EntityView {
    /// Creates a new entity view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EntitySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no snapshots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EntitySnapshot> {
        self.snapshots
    }
}

/// Starting health values applied when entities are created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    zombie_health: Health,
    player_health: Health,
    box_health: Health,
    landmine_health: Health,
}

impl RulesConfig {
    /// Creates a configuration with explicit starting health values.
    #[must_use]
    pub const fn new(
        zombie_health: Health,
        player_health: Health,
        box_health: Health,
        landmine_health: Health,
    ) -> Self {
        Self {
            zombie_health,
            player_health,
            box_health,
            landmine_health,
        }
    }

    /// Overrides the default zombie health.
    #[must_use]
    pub const fn with_zombie_health(mut self, health: Health) -> Self {
        self.zombie_health = health;
        self
    }

    /// Health of zombies created without an explicit suffix or by spawning.
    #[must_use]
    pub const fn zombie_health(&self) -> Health {
        self.zombie_health
    }

    /// Starting health of players.
    #[must_use]
    pub const fn player_health(&self) -> Health {
        self.player_health
    }

    /// Starting health of boxes.
    #[must_use]
    pub const fn box_health(&self) -> Health {
        self.box_health
    }

    /// Starting health of landmines.
    #[must_use]
    pub const fn landmine_health(&self) -> Health {
        self.landmine_health
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new(Health::new(2), Health::new(1), Health::new(1), Health::new(1))
    }
}
