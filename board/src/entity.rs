//! Entities stored in the board's arena.

use dead_grid_core::{
    EntityEvent, EntityId, EntityKind, EntitySnapshot, Health, PlayerToken, Position,
};

/// Single occupant of the board: obstacle, zombie or player.
///
/// Entities never leave the arena. Dead ones stay behind as inert
/// placeholders so identifiers remain stable for the lifetime of the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    id: EntityId,
    kind: EntityKind,
    position: Position,
    health: Health,
    events: Vec<EntityEvent>,
}

impl Entity {
    pub(crate) fn new(id: EntityId, kind: EntityKind, position: Position, health: Health) -> Self {
        let health = if kind.destructible() {
            health
        } else {
            Health::INDESTRUCTIBLE
        };
        Self {
            id,
            kind,
            position,
            health,
            events: Vec::new(),
        }
    }

    /// Identifier of the entity inside its board.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Kind of the entity.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Cell currently occupied.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Remaining hit points.
    #[must_use]
    pub const fn health(&self) -> Health {
        self.health
    }

    /// Whether [`Entity::hit`] can ever change this entity.
    #[must_use]
    pub const fn destructible(&self) -> bool {
        self.kind.destructible()
    }

    /// Events recorded during the current turn, oldest first.
    #[must_use]
    pub fn events(&self) -> &[EntityEvent] {
        &self.events
    }

    /// Reports whether the entity has no hit points left.
    #[must_use]
    pub const fn dead(&self) -> bool {
        self.health.is_zero()
    }

    /// Reports whether the entity is still in play.
    #[must_use]
    pub const fn alive(&self) -> bool {
        !self.dead()
    }

    /// Reports whether the entity still occupies its cell.
    ///
    /// Living entities always do; dead ones linger only while they carry
    /// events from the current turn.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.alive() || !self.events.is_empty()
    }

    /// Token of the player, if the entity is one.
    #[must_use]
    pub const fn player_token(&self) -> Option<PlayerToken> {
        match self.kind {
            EntityKind::Player(token) => Some(token),
            _ => None,
        }
    }

    /// Canonical cell token for the entity.
    ///
    /// Zombies whose health differs from `default_zombie_health` carry a
    /// `:<health>` suffix so the token round-trips through board parsing.
    #[must_use]
    pub fn token(&self, default_zombie_health: Health) -> String {
        match self.kind {
            EntityKind::Rock => "R".to_owned(),
            EntityKind::Box => "B".to_owned(),
            EntityKind::Landmine => "L".to_owned(),
            EntityKind::Zombie if self.health == default_zombie_health => "Z".to_owned(),
            EntityKind::Zombie => format!("Z:{}", self.health.get()),
            EntityKind::Player(token) => token.token(),
        }
    }

    /// Applies one point of damage.
    ///
    /// Indestructible and already dead entities ignore the hit. Exactly one
    /// of [`EntityEvent::Hit`] or [`EntityEvent::Killed`] is recorded when
    /// damage lands. Returns whether the entity took damage.
    pub fn hit(&mut self) -> bool {
        if !self.destructible() || self.dead() {
            return false;
        }

        self.health = self.health.damaged();
        if self.dead() {
            self.events.push(EntityEvent::Killed);
        } else {
            self.events.push(EntityEvent::Hit);
        }
        true
    }

    /// Kills the entity outright, bypassing the damage rules.
    pub(crate) fn kill(&mut self) {
        if self.dead() {
            return;
        }
        self.health = Health::new(0);
        self.events.push(EntityEvent::Killed);
    }

    /// Relocates the entity and records the walk for animation.
    pub(crate) fn move_to(&mut self, to: Position) {
        let from = self.position;
        self.position = to;
        self.events.push(EntityEvent::Walking { from, to });
    }

    pub(crate) fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Captures an immutable snapshot of the entity.
    #[must_use]
    pub fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            health: self.health,
            destructible: self.destructible(),
            events: self.events.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zombie(health: i32) -> Entity {
        Entity::new(
            EntityId::new(0),
            EntityKind::Zombie,
            Position::new(0, 0),
            Health::new(health),
        )
    }

    #[test]
    fn hit_records_hit_then_killed() {
        let mut entity = zombie(2);

        assert!(entity.hit());
        assert_eq!(entity.events(), &[EntityEvent::Hit]);
        assert!(entity.alive());

        assert!(entity.hit());
        assert_eq!(entity.events(), &[EntityEvent::Hit, EntityEvent::Killed]);
        assert!(entity.dead());

        assert!(!entity.hit());
        assert_eq!(entity.events().len(), 2);
    }

    #[test]
    fn rocks_ignore_damage() {
        let mut rock = Entity::new(
            EntityId::new(3),
            EntityKind::Rock,
            Position::new(1, 1),
            Health::new(5),
        );

        assert_eq!(rock.health(), Health::INDESTRUCTIBLE);
        assert!(!rock.hit());
        assert!(rock.events().is_empty());
        assert!(rock.alive());
    }

    #[test]
    fn dead_entities_linger_only_with_events() {
        let mut entity = zombie(1);
        entity.kill();
        assert!(entity.is_present());

        entity.clear_events();
        assert!(!entity.is_present());
    }

    #[test]
    fn zombie_token_carries_non_default_health() {
        let default = Health::new(2);
        assert_eq!(zombie(2).token(default), "Z");
        assert_eq!(zombie(3).token(default), "Z:3");
    }

    #[test]
    fn move_to_records_walking_event() {
        let mut entity = zombie(2);
        entity.move_to(Position::new(0, 1));

        assert_eq!(entity.position(), Position::new(0, 1));
        assert_eq!(
            entity.events(),
            &[EntityEvent::Walking {
                from: Position::new(0, 0),
                to: Position::new(0, 1),
            }]
        );
    }
}
