#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state management for Dead Grid.
//!
//! A [`Board`] is built once from a textual grid and then mutated exclusively
//! through [`apply`]. Read access goes through the methods on [`Board`] and
//! the [`query`] module. Pathfinding is not owned by the board; zombie
//! navigation is delegated to a [`Navigator`] supplied by the caller.

mod entity;
mod error;
mod grid;

use dead_grid_core::{
    Action, Direction, EntityId, EntityKind, Health, PlayerToken, Position, RulesConfig,
};
use log::{debug, trace};

pub use entity::Entity;
pub use error::{ActionError, BoardError, QueryError};

/// Describes how players are identified on a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoardMode {
    /// Exactly one player written `P`; at least one zombie is required.
    SinglePlayer,
    /// One or more numbered seats; zombies may arrive later through spawning.
    Multiplayer,
}

/// Chooses the direction a zombie should take toward its target.
pub trait Navigator {
    /// Returns the first direction of a route from `from` to `to`, or `None`
    /// when no route exists.
    fn next_direction(&mut self, board: &Board, from: Position, to: Position)
        -> Option<Direction>;
}

/// Represents the authoritative state of a single game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: u32,
    height: u32,
    mode: BoardMode,
    config: RulesConfig,
    entities: Vec<Entity>,
    obstacles: Vec<EntityId>,
    zombies: Vec<EntityId>,
    players: Vec<EntityId>,
}

impl Board {
    /// Builds a board from rows of cell tokens using the default rules.
    pub fn parse<R, C>(grid: &[R]) -> Result<Self, BoardError>
    where
        R: AsRef<[C]>,
        C: AsRef<str>,
    {
        Self::with_config(grid, RulesConfig::default())
    }

    /// Builds a board from rows of cell tokens using the provided rules.
    pub fn with_config<R, C>(grid: &[R], config: RulesConfig) -> Result<Self, BoardError>
    where
        R: AsRef<[C]>,
        C: AsRef<str>,
    {
        let parsed = grid::parse(grid, &config)?;
        let mut board = Self {
            width: parsed.width,
            height: parsed.height,
            mode: parsed.mode,
            config,
            entities: Vec::with_capacity(parsed.seeds.len()),
            obstacles: Vec::new(),
            zombies: Vec::new(),
            players: Vec::new(),
        };

        for seed in parsed.seeds {
            let _ = board
                .insert(seed.kind, seed.position, seed.health)
                .ok_or(BoardError::TooLarge)?;
        }

        debug!(
            "board {}x{} ready: {} obstacles, {} zombies, {} players",
            board.width,
            board.height,
            board.obstacles.len(),
            board.zombies.len(),
            board.players.len()
        );
        Ok(board)
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Player identification mode detected at construction.
    #[must_use]
    pub const fn mode(&self) -> BoardMode {
        self.mode
    }

    /// Rules the board was built with.
    #[must_use]
    pub const fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Retrieves an entity by identifier.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        usize::try_from(id.get())
            .ok()
            .and_then(|index| self.entities.get(index))
    }

    /// All entities ever created on the board, dead ones included, in identifier order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Identifiers of rocks, boxes and landmines in creation order.
    #[must_use]
    pub fn obstacle_ids(&self) -> &[EntityId] {
        &self.obstacles
    }

    /// Identifiers of zombies in the order they act.
    #[must_use]
    pub fn zombie_ids(&self) -> &[EntityId] {
        &self.zombies
    }

    /// Identifiers of players in the order they act.
    #[must_use]
    pub fn player_ids(&self) -> &[EntityId] {
        &self.players
    }

    /// Iterator over zombies in the order they act.
    pub fn zombies(&self) -> impl Iterator<Item = &Entity> {
        self.zombies.iter().filter_map(|id| self.entity(*id))
    }

    /// Iterator over players in the order they act.
    pub fn players(&self) -> impl Iterator<Item = &Entity> {
        self.players.iter().filter_map(|id| self.entity(*id))
    }

    /// Finds the player carrying `token`, dead or alive.
    #[must_use]
    pub fn player(&self, token: PlayerToken) -> Option<&Entity> {
        self.players()
            .find(|player| player.player_token() == Some(token))
    }

    /// Returns the entity occupying `position`, if any.
    ///
    /// Living entities take precedence. A dead entity still counts as the
    /// occupant while it carries events from the current turn, so a corpse
    /// blocks its cell until the next turn starts.
    #[must_use]
    pub fn entity_at(&self, position: Position) -> Option<&Entity> {
        let mut lingering = None;
        for entity in &self.entities {
            if entity.position() != position {
                continue;
            }
            if entity.alive() {
                return Some(entity);
            }
            if lingering.is_none() && entity.is_present() {
                lingering = Some(entity);
            }
        }
        lingering
    }

    /// Reports whether `position` lies on the board.
    #[must_use]
    pub fn is_valid_position(&self, position: Position) -> bool {
        let column_fits = u32::try_from(position.x()).is_ok_and(|x| x < self.width);
        let row_fits = u32::try_from(position.y()).is_ok_and(|y| y < self.height);
        column_fits && row_fits
    }

    /// Reports whether no entity, dead or alive, occupies `position`.
    ///
    /// Stricter than [`Board::entity_at`]; used for placing spawned zombies
    /// and walking players.
    #[must_use]
    pub fn is_position_empty(&self, position: Position) -> bool {
        !self
            .entities
            .iter()
            .any(|entity| entity.position() == position)
    }

    /// Reports whether an indestructible entity walls off `position`.
    #[must_use]
    pub fn blocks_navigation(&self, position: Position) -> bool {
        self.obstacle_ids()
            .iter()
            .filter_map(|id| self.entity(*id))
            .any(|entity| entity.position() == position && !entity.destructible())
    }

    /// Picks the living candidate nearest to `from` by straight-line distance.
    ///
    /// Ties go to the candidate listed first.
    pub fn closest_entity(
        &self,
        from: Position,
        candidates: &[EntityId],
    ) -> Result<EntityId, QueryError> {
        let mut best: Option<(i64, EntityId)> = None;
        for entity in candidates.iter().filter_map(|id| self.entity(*id)) {
            if entity.dead() {
                continue;
            }
            let distance = from.distance_squared(entity.position());
            if best.map_or(true, |(best_distance, _)| distance < best_distance) {
                best = Some((distance, entity.id()));
            }
        }
        best.map(|(_, id)| id).ok_or(QueryError::NoLivingCandidate)
    }

    /// Picks the living zombie nearest to `from`.
    pub fn closest_zombie(&self, from: Position) -> Result<EntityId, QueryError> {
        self.closest_entity(from, &self.zombies)
    }

    /// Picks the living player nearest to `from`, or `None` once all players are dead.
    #[must_use]
    pub fn closest_player(&self, from: Position) -> Option<EntityId> {
        self.closest_entity(from, &self.players).ok()
    }

    /// Positions of living players ordered nearest first from `from`.
    ///
    /// Equal distances keep player order, matching [`Board::closest_player`].
    fn player_positions_by_distance(&self, from: Position) -> Vec<Position> {
        let mut positions: Vec<Position> = self
            .players()
            .filter(|player| player.alive())
            .map(Entity::position)
            .collect();
        positions.sort_by_key(|position| from.distance_squared(*position));
        positions
    }

    /// Reports whether every player is dead.
    #[must_use]
    pub fn all_players_dead(&self) -> bool {
        self.players().all(Entity::dead)
    }

    /// Reports whether every zombie is dead. A board without zombies counts.
    #[must_use]
    pub fn all_zombies_dead(&self) -> bool {
        self.zombies().all(Entity::dead)
    }

    /// Reports whether the game is over.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.all_players_dead() || self.all_zombies_dead()
    }

    /// Reports whether the game ended with at least one player standing.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.finished() && !self.all_players_dead()
    }

    /// Adds an entity, or returns `None` once identifiers are exhausted.
    fn insert(
        &mut self,
        kind: EntityKind,
        position: Position,
        health: Health,
    ) -> Option<EntityId> {
        let id = entity_id(self.entities.len())?;
        self.entities.push(Entity::new(id, kind, position, health));
        match kind {
            EntityKind::Zombie => self.zombies.push(id),
            EntityKind::Player(_) => self.players.push(id),
            EntityKind::Rock | EntityKind::Box | EntityKind::Landmine => self.obstacles.push(id),
        }
        Some(id)
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        usize::try_from(id.get())
            .ok()
            .and_then(|index| self.entities.get_mut(index))
    }

    fn living_zombie_at(&self, position: Position) -> Option<EntityId> {
        self.zombies()
            .find(|zombie| zombie.alive() && zombie.position() == position)
            .map(Entity::id)
    }

    fn clear_events(&mut self) {
        for entity in &mut self.entities {
            entity.clear_events();
        }
    }

    fn shoot(&mut self, target: Position) -> Result<(), ActionError> {
        let zombie = self
            .living_zombie_at(target)
            .ok_or(ActionError::NoZombieAt(target))?;
        if let Some(entity) = self.entity_mut(zombie) {
            let _ = entity.hit();
            debug!(
                "zombie {} at {target} shot, {} health left",
                zombie.get(),
                entity.health().get()
            );
        }
        Ok(())
    }

    fn walk_player(&mut self, token: PlayerToken, destination: Position) -> Result<(), ActionError> {
        let player = self.player(token).ok_or(ActionError::UnknownPlayer(token))?;
        if player.dead() {
            return Err(ActionError::PlayerDead(token));
        }
        let id = player.id();
        if !self.is_valid_position(destination) {
            return Err(ActionError::OutOfBounds(destination));
        }
        if !self.is_position_empty(destination) {
            return Err(ActionError::Occupied(destination));
        }

        if let Some(entity) = self.entity_mut(id) {
            entity.move_to(destination);
        }
        trace!("player {token} walked to {destination}");
        Ok(())
    }

    fn spawn_zombie(&mut self, position: Position) -> Result<(), ActionError> {
        if !self.is_valid_position(position) {
            return Err(ActionError::OutOfBounds(position));
        }
        if !self.is_position_empty(position) {
            return Err(ActionError::Occupied(position));
        }

        let id = self
            .insert(EntityKind::Zombie, position, self.config.zombie_health())
            .ok_or(ActionError::TooManyEntities)?;
        debug!("zombie {} spawned at {position}", id.get());
        Ok(())
    }

    /// Resolves one zombie move: detonate, attack, or walk.
    ///
    /// Attacking never relocates the zombie within the same action.
    fn resolve_zombie_move(
        &mut self,
        zombie: EntityId,
        direction: Direction,
    ) -> Result<(), ActionError> {
        let Some(from) = self.entity(zombie).map(Entity::position) else {
            return Ok(());
        };
        let destination = from.step(direction);
        if !self.is_valid_position(destination) {
            return Err(ActionError::OutOfBounds(destination));
        }

        let occupant = self
            .entity_at(destination)
            .map(|entity| (entity.id(), entity.kind()));

        match occupant {
            Some((_, EntityKind::Landmine)) => {
                if let Some(entity) = self.entity_mut(zombie) {
                    entity.kill();
                }
                debug!("zombie {} stepped on the landmine at {destination}", zombie.get());
            }
            Some((_, EntityKind::Zombie)) => {
                trace!("zombie {} blocked by another zombie at {destination}", zombie.get());
            }
            Some((target, _)) => {
                if let Some(entity) = self.entity_mut(target) {
                    if entity.hit() {
                        debug!(
                            "zombie {} hit {:?} at {destination}, {} health left",
                            zombie.get(),
                            entity.kind(),
                            entity.health().get()
                        );
                    }
                }
            }
            None => {
                if let Some(entity) = self.entity_mut(zombie) {
                    entity.move_to(destination);
                }
                trace!("zombie {} walked {direction} to {destination}", zombie.get());
            }
        }

        Ok(())
    }

    fn walk_zombie(&mut self, from: Position, direction: Direction) -> Result<(), ActionError> {
        let zombie = self
            .living_zombie_at(from)
            .ok_or(ActionError::NoZombieAt(from))?;
        self.resolve_zombie_move(zombie, direction)
    }

    fn step_all_zombies<N>(&mut self, navigator: &mut N) -> Result<(), ActionError>
    where
        N: Navigator + ?Sized,
    {
        let order = self.zombies.clone();
        for zombie in order {
            if self.finished() {
                break;
            }

            let Some(from) = self
                .entity(zombie)
                .filter(|entity| entity.alive())
                .map(Entity::position)
            else {
                continue;
            };
            // Fall back to farther players when the nearest one is walled off.
            let targets = self.player_positions_by_distance(from);
            let Some(&nearest) = targets.first() else {
                break;
            };
            let direction = targets
                .iter()
                .find_map(|to| navigator.next_direction(self, from, *to))
                .ok_or(ActionError::Unreachable { from, to: nearest })?;
            self.resolve_zombie_move(zombie, direction)?;
        }
        Ok(())
    }
}

fn entity_id(index: usize) -> Option<EntityId> {
    u32::try_from(index).ok().map(EntityId::new)
}

/// Applies the provided action to the board, mutating state deterministically.
///
/// Each action either applies completely or fails without touching the board.
pub fn apply<N>(board: &mut Board, action: &Action, navigator: &mut N) -> Result<(), ActionError>
where
    N: Navigator + ?Sized,
{
    match action {
        Action::BeginTurn => {
            board.clear_events();
            Ok(())
        }
        Action::PlayerShoot { target } => board.shoot(*target),
        Action::PlayerWalk {
            player,
            destination,
        } => board.walk_player(*player, *destination),
        Action::ZombieSpawn { position } => board.spawn_zombie(*position),
        Action::ZombieWalk { from, direction } => board.walk_zombie(*from, *direction),
        Action::ZombieStepAll => {
            let mut staged = board.clone();
            staged.step_all_zombies(navigator)?;
            *board = staged;
            Ok(())
        }
    }
}

/// Query functions that provide read-only access to the board state.
pub mod query {
    use dead_grid_core::{EntityView, Position, EMPTY_TOKEN, SNAPSHOT_ROW_DELIMITER};

    use super::Board;

    /// Provides the board dimensions as `(width, height)`.
    #[must_use]
    pub fn dimensions(board: &Board) -> (u32, u32) {
        (board.width, board.height)
    }

    /// Regenerates the grid format the board was built from.
    ///
    /// Only living entities appear, so the result parses back into an
    /// equivalent board.
    #[must_use]
    pub fn state(board: &Board) -> Vec<Vec<String>> {
        let width = usize::try_from(board.width).unwrap_or(0);
        let height = usize::try_from(board.height).unwrap_or(0);
        let mut rows = vec![vec![EMPTY_TOKEN.to_owned(); width]; height];
        let default_health = board.config.zombie_health();

        for entity in board.entities.iter().filter(|entity| entity.alive()) {
            let position = entity.position();
            let (Ok(column), Ok(row)) = (usize::try_from(position.x()), usize::try_from(position.y()))
            else {
                continue;
            };
            if let Some(cell) = rows.get_mut(row).and_then(|cells| cells.get_mut(column)) {
                *cell = entity.token(default_health);
            }
        }

        rows
    }

    /// Joins [`state`] into a single comparable string, one delimiter per row.
    #[must_use]
    pub fn compact_snapshot(board: &Board) -> String {
        let mut snapshot = String::new();
        for (index, row) in state(board).into_iter().enumerate() {
            if index > 0 {
                snapshot.push(SNAPSHOT_ROW_DELIMITER);
            }
            for cell in row {
                snapshot.push_str(&cell);
            }
        }
        snapshot
    }

    /// Captures the entities a renderer should draw this turn.
    ///
    /// Includes every living entity plus dead ones that still carry events,
    /// such as a zombie killed during the current turn.
    #[must_use]
    pub fn entity_view(board: &Board) -> EntityView {
        EntityView::from_snapshots(
            board
                .entities
                .iter()
                .filter(|entity| entity.is_present())
                .map(|entity| entity.snapshot())
                .collect(),
        )
    }

    /// Enumerates empty border cells where a zombie may spawn, in row-major order.
    #[must_use]
    pub fn spawn_candidates(board: &Board) -> Vec<Position> {
        let width = i32::try_from(board.width).unwrap_or(i32::MAX);
        let height = i32::try_from(board.height).unwrap_or(i32::MAX);

        (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
            .filter(|cell| {
                cell.x() == 0 || cell.y() == 0 || cell.x() == width - 1 || cell.y() == height - 1
            })
            .filter(|cell| board.is_position_empty(*cell))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dead_grid_core::EntityEvent;

    /// Navigator that replays a fixed direction for every request.
    struct Always(Direction);

    impl Navigator for Always {
        fn next_direction(&mut self, _: &Board, _: Position, _: Position) -> Option<Direction> {
            Some(self.0)
        }
    }

    /// Navigator that never finds a route.
    struct Lost;

    impl Navigator for Lost {
        fn next_direction(&mut self, _: &Board, _: Position, _: Position) -> Option<Direction> {
            None
        }
    }

    fn try_board(grid: &[&[&str]]) -> Result<Board, BoardError> {
        Board::parse(grid)
    }

    fn board(grid: &[&[&str]]) -> Board {
        try_board(grid).expect("valid grid")
    }

    #[test]
    fn construction_rejects_invalid_rosters() {
        assert_eq!(try_board(&[&["P", " "]]), Err(BoardError::MissingZombie));
        assert_eq!(
            try_board(&[&["P", "Z", "p"]]),
            Err(BoardError::DuplicatePlayer(PlayerToken::Solo))
        );
        assert_eq!(try_board(&[&["Z", " "]]), Err(BoardError::MissingPlayer));
        assert_eq!(
            try_board(&[&["P", "Z", "2"]]),
            Err(BoardError::MixedPlayerTokens)
        );
        assert_eq!(try_board(&[]), Err(BoardError::EmptyGrid));
    }

    #[test]
    fn dimensions_follow_first_row_and_row_count() {
        let board = board(&[&["Z", " ", "R"], &[" ", "P", " "]]);
        assert_eq!(query::dimensions(&board), (3, 2));
        assert!(board.is_valid_position(Position::new(2, 1)));
        assert!(!board.is_valid_position(Position::new(3, 0)));
        assert!(!board.is_valid_position(Position::new(0, -1)));
    }

    #[test]
    fn state_round_trips_input_grid() {
        let grid: &[&[&str]] = &[&["Z:3", "B", "R"], &["L", "P", "Z"]];
        let board = board(grid);
        assert_eq!(query::state(&board), grid);
        assert_eq!(query::compact_snapshot(&board), "Z:3BR|LPZ");
    }

    #[test]
    fn closest_entity_breaks_ties_by_order() {
        let board = board(&[&["Z", " ", "Z"], &[" ", "P", " "]]);
        let player = board.player(PlayerToken::Solo).expect("player").position();

        let nearest = board.closest_zombie(player).expect("living zombie");
        assert_eq!(nearest, board.zombie_ids()[0]);
    }

    #[test]
    fn closest_player_prefers_distance_over_seat_order() {
        let board = board(&[&["1", " ", " ", "Z", "2"]]);
        let zombie = Position::new(3, 0);

        assert_eq!(board.mode(), BoardMode::Multiplayer);
        let nearest = board.closest_player(zombie).expect("living player");
        assert_eq!(nearest, board.player_ids()[1]);
        assert_eq!(
            board.player_positions_by_distance(zombie),
            vec![Position::new(4, 0), Position::new(0, 0)]
        );
    }

    #[test]
    fn only_rocks_block_navigation() {
        let board = board(&[&["R", "B", "L"], &["Z", " ", "P"]]);

        assert_eq!(board.mode(), BoardMode::SinglePlayer);
        assert_eq!(board.obstacle_ids().len(), 3);
        assert!(board.blocks_navigation(Position::new(0, 0)));
        assert!(!board.blocks_navigation(Position::new(1, 0)));
        assert!(!board.blocks_navigation(Position::new(2, 0)));
        assert!(!board.blocks_navigation(Position::new(1, 1)));
    }

    #[test]
    fn entity_ids_stop_at_the_identifier_range() {
        assert_eq!(entity_id(7), Some(EntityId::new(7)));
        assert_eq!(entity_id(u32::MAX as usize), Some(EntityId::new(u32::MAX)));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn entity_ids_beyond_u32_are_refused() {
        assert_eq!(entity_id(u32::MAX as usize + 1), None);
    }

    #[test]
    fn closest_entity_fails_without_living_candidates() {
        let mut board = board(&[&["Z:1", "P"]]);
        apply(
            &mut board,
            &Action::PlayerShoot {
                target: Position::new(0, 0),
            },
            &mut Lost,
        )
        .expect("shot lands");

        assert_eq!(
            board.closest_zombie(Position::new(1, 0)),
            Err(QueryError::NoLivingCandidate)
        );
        assert!(board.finished());
        assert!(board.is_won());
    }

    #[test]
    fn corpse_occupies_cell_until_next_turn() {
        let mut board = board(&[&["Z:1", "P"]]);
        let cell = Position::new(0, 0);
        apply(&mut board, &Action::PlayerShoot { target: cell }, &mut Lost).expect("shot lands");

        assert!(board.entity_at(cell).is_some());
        assert!(!board.is_position_empty(cell));
        assert_eq!(query::entity_view(&board).len(), 2);

        apply(&mut board, &Action::BeginTurn, &mut Lost).expect("turn starts");

        assert!(board.entity_at(cell).is_none());
        assert!(!board.is_position_empty(cell));
        assert_eq!(query::entity_view(&board).len(), 1);
    }

    #[test]
    fn zombie_attack_does_not_relocate() {
        let mut board = board(&[&["Z", "B", "P"]]);
        let from = Position::new(0, 0);

        apply(
            &mut board,
            &Action::ZombieWalk {
                from,
                direction: Direction::Right,
            },
            &mut Lost,
        )
        .expect("attack resolves");

        let zombie = board.zombies().next().expect("zombie");
        assert_eq!(zombie.position(), from);
        let crate_entity = board.entity_at(Position::new(1, 0)).expect("box remains");
        assert!(crate_entity.dead());
        assert_eq!(crate_entity.events(), &[EntityEvent::Killed]);
    }

    #[test]
    fn landmine_kills_zombie_in_place() {
        let mut board = board(&[&["Z", "L", "P"]]);

        apply(&mut board, &Action::ZombieStepAll, &mut Always(Direction::Right))
            .expect("step resolves");

        let zombie = board.zombies().next().expect("zombie");
        assert!(zombie.dead());
        assert_eq!(zombie.position(), Position::new(0, 0));
        let mine = board.entity_at(Position::new(1, 0)).expect("landmine");
        assert_eq!(mine.health(), Health::new(1));
        assert!(mine.events().is_empty());
    }

    #[test]
    fn unreachable_player_leaves_board_untouched() {
        let mut board = board(&[&["Z", " ", "P"], &["Z", " ", " "]]);
        let before = board.clone();

        let error = apply(&mut board, &Action::ZombieStepAll, &mut Lost).expect_err("walled in");

        assert_eq!(
            error,
            ActionError::Unreachable {
                from: Position::new(0, 0),
                to: Position::new(2, 0),
            }
        );
        assert_eq!(board, before);
    }

    #[test]
    fn unreachable_reports_nearest_player_when_every_route_fails() {
        let mut board = board(&[&["1", " ", "Z", " ", " ", "2"]]);

        let error = apply(&mut board, &Action::ZombieStepAll, &mut Lost).expect_err("walled in");

        assert_eq!(
            error,
            ActionError::Unreachable {
                from: Position::new(2, 0),
                to: Position::new(0, 0),
            }
        );
    }

    #[test]
    fn zombies_stop_once_players_are_dead() {
        let mut board = board(&[&["Z", "P", "Z"]]);

        apply(&mut board, &Action::ZombieStepAll, &mut Always(Direction::Right))
            .expect("step resolves");

        assert!(board.all_players_dead());
        let second = board.zombies().nth(1).expect("second zombie");
        assert!(second.events().is_empty());
        assert!(board.finished());
        assert!(!board.is_won());
    }

    #[test]
    fn player_walk_and_spawn_require_empty_cells() {
        let mut board = board(&[&["1", " ", "Z"], &[" ", "2", " "]]);
        let occupied = Position::new(1, 1);

        assert_eq!(
            apply(
                &mut board,
                &Action::PlayerWalk {
                    player: PlayerToken::Seat(1),
                    destination: occupied,
                },
                &mut Lost,
            ),
            Err(ActionError::Occupied(occupied))
        );
        assert_eq!(
            apply(
                &mut board,
                &Action::PlayerWalk {
                    player: PlayerToken::Seat(4),
                    destination: Position::new(1, 0),
                },
                &mut Lost,
            ),
            Err(ActionError::UnknownPlayer(PlayerToken::Seat(4)))
        );
        apply(
            &mut board,
            &Action::PlayerWalk {
                player: PlayerToken::Seat(1),
                destination: Position::new(1, 0),
            },
            &mut Lost,
        )
        .expect("walk succeeds");
        apply(
            &mut board,
            &Action::ZombieSpawn {
                position: Position::new(0, 0),
            },
            &mut Lost,
        )
        .expect("spawn succeeds");

        assert_eq!(board.zombie_ids().len(), 2);
        assert_eq!(
            query::state(&board),
            vec![vec!["Z", "1", "Z"], vec![" ", "2", " "]]
        );
    }

    #[test]
    fn spawn_candidates_cover_empty_border_cells() {
        let board = board(&[&["Z", " ", " "], &[" ", " ", " "], &["R", " ", "P"]]);

        assert_eq!(
            query::spawn_candidates(&board),
            vec![
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(0, 1),
                Position::new(2, 1),
                Position::new(1, 2),
            ]
        );
    }
}
