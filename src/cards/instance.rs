//! Card instances - runtime card state.
//!
//! A `CardInstance` is one physical card in the duel. It records where
//! the card is and what has happened to it (position, buffs, attached
//! materials and equipment). Instances are owned by the central store in
//! `GameState`; every other structure refers to them by `EntityId`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::attributes::{Location, Position, SummonType};
use super::definition::CardId;
use crate::core::{EntityId, TurnStamp};

/// Additive attack/defense/level modifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Buff {
    pub attack: i32,
    pub defense: i32,
    pub level: i32,
}

impl Buff {
    #[must_use]
    pub const fn new(attack: i32, defense: i32, level: i32) -> Self {
        Self { attack, defense, level }
    }

    /// Component-wise sum.
    #[must_use]
    pub const fn plus(self, other: Buff) -> Buff {
        Buff {
            attack: self.attack + other.attack,
            defense: self.defense + other.defense,
            level: self.level + other.level,
        }
    }
}

/// A card instance in a duel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique entity ID for this instance.
    pub id: EntityId,

    /// Reference to the card definition.
    pub card_id: CardId,

    /// Container currently holding the card.
    pub location: Location,

    /// Placement position; `None` off the field.
    pub position: Option<Position>,

    /// Accumulated stat modifiers. Reset when the card leaves the field.
    pub buf: Buff,

    /// Xyz materials attached to this monster.
    pub materials: SmallVec<[EntityId; 4]>,

    /// Equip cards attached to this monster.
    pub equipment: SmallVec<[EntityId; 2]>,

    /// How the monster arrived on the field.
    pub summoned_by: Option<SummonType>,

    /// Tokens leave the game instead of entering the graveyard.
    pub is_token: bool,

    /// When the card was set face-down.
    pub set_turn: Option<TurnStamp>,

    /// A spell/trap whose activation is still resolving.
    pub is_activating: bool,
}

impl CardInstance {
    /// Create an instance in the given location.
    #[must_use]
    pub fn new(id: EntityId, card_id: CardId, location: Location) -> Self {
        Self {
            id,
            card_id,
            location,
            position: None,
            buf: Buff::default(),
            materials: SmallVec::new(),
            equipment: SmallVec::new(),
            summoned_by: None,
            is_token: false,
            set_turn: None,
            is_activating: false,
        }
    }

    /// Create a token instance.
    #[must_use]
    pub fn token(id: EntityId, card_id: CardId) -> Self {
        Self {
            is_token: true,
            ..Self::new(id, card_id, Location::MonsterField)
        }
    }

    /// Whether the card is face-up on the field.
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.position.is_some_and(Position::is_face_up)
    }

    /// Clear everything that only makes sense while on the field.
    pub(crate) fn reset_field_state(&mut self) {
        self.position = None;
        self.buf = Buff::default();
        self.summoned_by = None;
        self.set_turn = None;
        self.is_activating = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_instance_is_clean() {
        let card = CardInstance::new(EntityId(3), CardId::new(1), Location::Deck);
        assert_eq!(card.location, Location::Deck);
        assert!(card.position.is_none());
        assert!(card.materials.is_empty());
        assert!(card.equipment.is_empty());
        assert!(!card.is_token);
        assert!(!card.is_face_up());
    }

    #[test]
    fn test_buff_accumulates() {
        let total = Buff::new(500, 0, 1).plus(Buff::new(-200, 300, 1));
        assert_eq!(total, Buff::new(300, 300, 2));
    }

    #[test]
    fn test_reset_field_state() {
        let mut card = CardInstance::new(EntityId(1), CardId::new(1), Location::MonsterField);
        card.position = Some(Position::Attack);
        card.buf = Buff::new(1000, 0, 0);
        card.summoned_by = Some(SummonType::Special);
        card.reset_field_state();
        assert_eq!(card.position, None);
        assert_eq!(card.buf, Buff::default());
        assert_eq!(card.summoned_by, None);
    }
}
