//! Card attribute enums.
//!
//! Small closed vocabularies shared by definitions and instances:
//! - `Element` / `Race`: monster typing used by material and search filters
//! - `LinkArrow`: link marker directions, with their zone-grid offsets
//! - `Position`: battle position / face-down state of a placed card
//! - `SummonType`: how a monster arrived on the field
//! - `Location`: which container currently holds an instance

use serde::{Deserialize, Serialize};

/// Monster attribute (属性).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Light,
    Dark,
    Fire,
    Water,
    Wind,
    Earth,
    Divine,
}

/// Monster type (種族).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    Spellcaster,
    Machine,
    WingedBeast,
    Fiend,
    Fairy,
    Warrior,
    Cyberse,
    Rock,
    Dragon,
    Beast,
}

/// Link marker direction.
///
/// Directions are relative to the owner looking at their own field: `Up`
/// points from the main monster zones toward the extra monster zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkArrow {
    Up,
    UpperRight,
    Right,
    LowerRight,
    Down,
    LowerLeft,
    Left,
    UpperLeft,
}

impl LinkArrow {
    /// All eight directions.
    pub const ALL: [LinkArrow; 8] = [
        LinkArrow::Up,
        LinkArrow::UpperRight,
        LinkArrow::Right,
        LinkArrow::LowerRight,
        LinkArrow::Down,
        LinkArrow::LowerLeft,
        LinkArrow::Left,
        LinkArrow::UpperLeft,
    ];

    /// Grid offset as `(row, column)`; rows grow upward.
    #[must_use]
    pub const fn offset(self) -> (i8, i8) {
        match self {
            LinkArrow::Up => (1, 0),
            LinkArrow::UpperRight => (1, 1),
            LinkArrow::Right => (0, 1),
            LinkArrow::LowerRight => (-1, 1),
            LinkArrow::Down => (-1, 0),
            LinkArrow::LowerLeft => (-1, -1),
            LinkArrow::Left => (0, -1),
            LinkArrow::UpperLeft => (1, -1),
        }
    }
}

/// Position of a placed card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Face-up attack position (also used for face-up spells/traps).
    Attack,
    /// Face-up defense position.
    Defense,
    /// Face-down spell/trap.
    Back,
    /// Face-down defense monster.
    BackDefense,
}

impl Position {
    /// Whether the card's face is visible.
    #[must_use]
    pub const fn is_face_up(self) -> bool {
        matches!(self, Position::Attack | Position::Defense)
    }
}

/// How a monster was summoned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummonType {
    Normal,
    Special,
    Ritual,
    Fusion,
    Synchro,
    Xyz,
    Link,
}

/// Container currently holding a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Hand,
    Deck,
    Graveyard,
    /// Banished.
    Exclusion,
    ExtraDeck,
    MonsterField,
    SpellField,
    FieldZone,
    /// Attached to a monster as Xyz material.
    Material,
    /// Attached to a monster as an equip card.
    Equipment,
    /// The opponent's field zone.
    OpponentField,
}

impl Location {
    /// Whether a card here is on the player's field.
    #[must_use]
    pub const fn is_field(self) -> bool {
        matches!(
            self,
            Location::MonsterField | Location::SpellField | Location::FieldZone | Location::Equipment
        )
    }
}
