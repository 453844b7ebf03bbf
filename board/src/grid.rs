//! Parsing of the textual grid format into entity seeds.

use std::collections::BTreeSet;

use dead_grid_core::{EntityKind, Health, PlayerToken, Position, RulesConfig};

use crate::{BoardError, BoardMode};

/// Entity description extracted from a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EntitySeed {
    pub(crate) kind: EntityKind,
    pub(crate) position: Position,
    pub(crate) health: Health,
}

/// Validated contents of a grid, ready to populate a board.
#[derive(Clone, Debug)]
pub(crate) struct ParsedGrid {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) mode: BoardMode,
    pub(crate) seeds: Vec<EntitySeed>,
}

/// Parses rows of cell tokens, scanning cells in row-major order.
pub(crate) fn parse<R, C>(grid: &[R], config: &RulesConfig) -> Result<ParsedGrid, BoardError>
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let expected = grid.first().map_or(0, |row| row.as_ref().len());
    if expected == 0 {
        return Err(BoardError::EmptyGrid);
    }

    let mut seeds = Vec::new();
    let mut players = BTreeSet::new();
    let mut solo_seen = false;
    let mut seat_seen = false;
    let mut zombie_count = 0usize;

    for (row_index, row) in grid.iter().enumerate() {
        let cells = row.as_ref();
        if cells.len() != expected {
            return Err(BoardError::RaggedRow {
                row: row_index,
                expected,
                found: cells.len(),
            });
        }

        for (column_index, cell) in cells.iter().enumerate() {
            let position = Position::new(to_coord(column_index)?, to_coord(row_index)?);
            let Some(seed) = parse_cell(cell.as_ref(), position, config)? else {
                continue;
            };

            match seed.kind {
                EntityKind::Zombie => zombie_count += 1,
                EntityKind::Player(token) => {
                    match token {
                        PlayerToken::Solo => solo_seen = true,
                        PlayerToken::Seat(_) => seat_seen = true,
                    }
                    if solo_seen && seat_seen {
                        return Err(BoardError::MixedPlayerTokens);
                    }
                    if !players.insert(token) {
                        return Err(BoardError::DuplicatePlayer(token));
                    }
                }
                _ => {}
            }

            seeds.push(seed);
        }
    }

    let mode = if seat_seen {
        BoardMode::Multiplayer
    } else {
        BoardMode::SinglePlayer
    };

    if mode == BoardMode::SinglePlayer {
        if players.is_empty() {
            return Err(BoardError::MissingPlayer);
        }
        if zombie_count == 0 {
            return Err(BoardError::MissingZombie);
        }
    }

    Ok(ParsedGrid {
        width: to_dimension(expected)?,
        height: to_dimension(grid.len())?,
        mode,
        seeds,
    })
}

fn parse_cell(
    token: &str,
    position: Position,
    config: &RulesConfig,
) -> Result<Option<EntitySeed>, BoardError> {
    let trimmed = token.trim();
    let Some(first) = trimmed.chars().next() else {
        return Ok(None);
    };

    let (kind, health) = match first.to_ascii_lowercase() {
        'b' => (EntityKind::Box, config.box_health()),
        'l' => (EntityKind::Landmine, config.landmine_health()),
        'r' => (EntityKind::Rock, Health::INDESTRUCTIBLE),
        'z' => (
            EntityKind::Zombie,
            zombie_health(&trimmed[first.len_utf8()..], token, position, config)?,
        ),
        'p' | '1'..='6' => {
            let player = PlayerToken::parse(&first.to_string()).map_err(|_| {
                BoardError::InvalidToken {
                    position,
                    token: token.to_owned(),
                }
            })?;
            (EntityKind::Player(player), config.player_health())
        }
        _ => {
            return Err(BoardError::InvalidToken {
                position,
                token: token.to_owned(),
            })
        }
    };

    Ok(Some(EntitySeed {
        kind,
        position,
        health,
    }))
}

fn zombie_health(
    suffix: &str,
    token: &str,
    position: Position,
    config: &RulesConfig,
) -> Result<Health, BoardError> {
    if suffix.is_empty() {
        return Ok(config.zombie_health());
    }

    let invalid = || BoardError::InvalidZombieHealth {
        position,
        token: token.to_owned(),
    };
    let value = suffix
        .strip_prefix(':')
        .ok_or_else(invalid)?
        .trim()
        .parse::<i32>()
        .map_err(|_| invalid())?;
    if value < 1 {
        return Err(invalid());
    }
    Ok(Health::new(value))
}

fn to_coord(index: usize) -> Result<i32, BoardError> {
    i32::try_from(index).map_err(|_| BoardError::TooLarge)
}

fn to_dimension(length: usize) -> Result<u32, BoardError> {
    u32::try_from(length).map_err(|_| BoardError::TooLarge)
}
