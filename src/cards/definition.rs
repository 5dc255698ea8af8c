//! Card definitions - static card data.
//!
//! `CardDefinition` is the immutable template of a card: its name, its
//! kind (monster / spell / trap with sub-kinds), monster stats, and the
//! bag of effect hooks. Runtime state (location, position, buffs,
//! materials) lives in `CardInstance`.
//!
//! ```
//! use exodia_drytron::cards::{CardDefinition, CardId, Element, MonsterStats, MonsterType, Race};
//!
//! let arm = CardDefinition::monster(
//!     CardId::new(2),
//!     "封印されし者の右腕",
//!     MonsterStats::new(MonsterType::Normal, Element::Dark, Race::Spellcaster, 1, 200, 300),
//! );
//! assert_eq!(arm.level(), Some(1));
//! assert!(arm.can_normal_summon());
//! ```

use serde::{Deserialize, Serialize};

use super::attributes::{Element, LinkArrow, Race};
use crate::core::{EntityId, GameState};
use crate::effects::CardEffects;

/// Unique identifier for a card definition.
///
/// This identifies the "type" of card (e.g. "ワン・フォー・ワン"),
/// not a specific copy in a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Monster sub-kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterType {
    Normal,
    Effect,
    Ritual,
    Fusion,
    Synchro,
    Xyz,
    Link,
}

impl MonsterType {
    /// Whether monsters of this kind start in the extra deck.
    #[must_use]
    pub const fn is_extra_deck(self) -> bool {
        matches!(
            self,
            MonsterType::Fusion | MonsterType::Synchro | MonsterType::Xyz | MonsterType::Link
        )
    }
}

/// Spell sub-kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellKind {
    Normal,
    QuickPlay,
    Continuous,
    Field,
    Equip,
    Ritual,
}

impl SpellKind {
    /// Whether the card stays on the field after resolving.
    #[must_use]
    pub const fn stays_on_field(self) -> bool {
        matches!(self, SpellKind::Continuous | SpellKind::Field | SpellKind::Equip)
    }
}

/// Trap sub-kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapKind {
    Normal,
    Continuous,
    Counter,
}

/// Per-candidate material filter.
pub type MaterialFilter = fn(&GameState, EntityId) -> bool;

/// Predicate over a whole candidate material set.
pub type MaterialCondition = fn(&GameState, &[EntityId]) -> bool;

/// Summon legality for extra deck monsters.
#[derive(Clone, Copy, Debug)]
pub struct MaterialRules {
    /// Which field monsters may be offered as material at all.
    pub filter: MaterialFilter,
    /// Whether a candidate set is a legal material set.
    pub condition: MaterialCondition,
}

/// Static monster data.
#[derive(Clone, Debug)]
pub struct MonsterStats {
    pub monster_type: MonsterType,
    pub element: Element,
    pub race: Race,
    pub attack: i32,
    pub defense: Option<i32>,
    pub level: Option<u8>,
    pub rank: Option<u8>,
    /// Link markers; the link rating is their count.
    pub link_arrows: Vec<LinkArrow>,
    pub tuner: bool,
    pub can_normal_summon: bool,
    pub materials: Option<MaterialRules>,
}

impl MonsterStats {
    /// Levelled monster (normal, effect, ritual, fusion, synchro).
    #[must_use]
    pub fn new(
        monster_type: MonsterType,
        element: Element,
        race: Race,
        level: u8,
        attack: i32,
        defense: i32,
    ) -> Self {
        Self {
            monster_type,
            element,
            race,
            attack,
            defense: Some(defense),
            level: Some(level),
            rank: None,
            link_arrows: Vec::new(),
            tuner: false,
            can_normal_summon: matches!(monster_type, MonsterType::Normal | MonsterType::Effect),
            materials: None,
        }
    }

    /// Xyz monster of the given rank.
    #[must_use]
    pub fn xyz(element: Element, race: Race, rank: u8, attack: i32, defense: i32) -> Self {
        Self {
            monster_type: MonsterType::Xyz,
            element,
            race,
            attack,
            defense: Some(defense),
            level: None,
            rank: Some(rank),
            link_arrows: Vec::new(),
            tuner: false,
            can_normal_summon: false,
            materials: None,
        }
    }

    /// Link monster; the rating is the number of arrows.
    #[must_use]
    pub fn link(element: Element, race: Race, attack: i32, arrows: &[LinkArrow]) -> Self {
        Self {
            monster_type: MonsterType::Link,
            element,
            race,
            attack,
            defense: None,
            level: None,
            rank: None,
            link_arrows: arrows.to_vec(),
            tuner: false,
            can_normal_summon: false,
            materials: None,
        }
    }

    /// Mark as a tuner.
    #[must_use]
    pub fn tuner(mut self) -> Self {
        self.tuner = true;
        self
    }

    /// Forbid normal summoning.
    #[must_use]
    pub fn special_summon_only(mut self) -> Self {
        self.can_normal_summon = false;
        self
    }

    /// Attach extra deck material rules.
    #[must_use]
    pub fn with_materials(mut self, filter: MaterialFilter, condition: MaterialCondition) -> Self {
        self.materials = Some(MaterialRules { filter, condition });
        self
    }

    /// Link rating, or `None` for non-link monsters.
    #[must_use]
    pub fn link_rating(&self) -> Option<u8> {
        if self.monster_type == MonsterType::Link {
            Some(self.link_arrows.len() as u8)
        } else {
            None
        }
    }
}

/// What a card is.
#[derive(Clone, Debug)]
pub enum CardKind {
    Monster(MonsterStats),
    Spell(SpellKind),
    Trap(TrapKind),
}

/// Static card definition.
#[derive(Clone, Debug)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name; also the default once-per-turn key.
    pub name: String,

    /// Rules text (display only).
    pub text: String,

    pub kind: CardKind,

    pub effects: CardEffects,
}

impl CardDefinition {
    /// Create a monster definition.
    #[must_use]
    pub fn monster(id: CardId, name: impl Into<String>, stats: MonsterStats) -> Self {
        Self::with_kind(id, name, CardKind::Monster(stats))
    }

    /// Create a spell definition.
    #[must_use]
    pub fn spell(id: CardId, name: impl Into<String>, kind: SpellKind) -> Self {
        Self::with_kind(id, name, CardKind::Spell(kind))
    }

    /// Create a trap definition.
    #[must_use]
    pub fn trap(id: CardId, name: impl Into<String>, kind: TrapKind) -> Self {
        Self::with_kind(id, name, CardKind::Trap(kind))
    }

    fn with_kind(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            text: String::new(),
            kind,
            effects: CardEffects::default(),
        }
    }

    /// Set the rules text (builder pattern).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the effect hooks (builder pattern).
    #[must_use]
    pub fn with_effects(mut self, effects: CardEffects) -> Self {
        self.effects = effects;
        self
    }

    // === Kind queries ===

    #[must_use]
    pub fn monster_stats(&self) -> Option<&MonsterStats> {
        match &self.kind {
            CardKind::Monster(stats) => Some(stats),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_monster(&self) -> bool {
        matches!(self.kind, CardKind::Monster(_))
    }

    #[must_use]
    pub fn spell_kind(&self) -> Option<SpellKind> {
        match self.kind {
            CardKind::Spell(kind) => Some(kind),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_spell(&self) -> bool {
        matches!(self.kind, CardKind::Spell(_))
    }

    #[must_use]
    pub fn is_trap(&self) -> bool {
        matches!(self.kind, CardKind::Trap(_))
    }

    #[must_use]
    pub fn monster_type(&self) -> Option<MonsterType> {
        self.monster_stats().map(|s| s.monster_type)
    }

    /// Printed level, `None` for xyz/link monsters and non-monsters.
    #[must_use]
    pub fn level(&self) -> Option<u8> {
        self.monster_stats().and_then(|s| s.level)
    }

    #[must_use]
    pub fn is_link(&self) -> bool {
        self.monster_type() == Some(MonsterType::Link)
    }

    #[must_use]
    pub fn is_xyz(&self) -> bool {
        self.monster_type() == Some(MonsterType::Xyz)
    }

    #[must_use]
    pub fn is_ritual_monster(&self) -> bool {
        self.monster_type() == Some(MonsterType::Ritual)
    }

    #[must_use]
    pub fn is_normal_monster(&self) -> bool {
        self.monster_type() == Some(MonsterType::Normal)
    }

    #[must_use]
    pub fn is_extra_deck(&self) -> bool {
        self.monster_type().is_some_and(MonsterType::is_extra_deck)
    }

    #[must_use]
    pub fn can_normal_summon(&self) -> bool {
        self.monster_stats().is_some_and(|s| s.can_normal_summon)
    }

    #[must_use]
    pub fn material_rules(&self) -> Option<MaterialRules> {
        self.monster_stats().and_then(|s| s.materials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_summon_flags_by_type() {
        let normal = MonsterStats::new(MonsterType::Normal, Element::Earth, Race::Warrior, 4, 1800, 1200);
        let ritual = MonsterStats::new(MonsterType::Ritual, Element::Light, Race::Fairy, 6, 1800, 1500);
        let sealed = MonsterStats::new(MonsterType::Effect, Element::Light, Race::Machine, 1, 2000, 0)
            .special_summon_only();
        assert!(normal.can_normal_summon);
        assert!(!ritual.can_normal_summon);
        assert!(!sealed.can_normal_summon);
    }

    #[test]
    fn test_link_rating_counts_arrows() {
        let stats = MonsterStats::link(Element::Dark, Race::Machine, 1000, &[LinkArrow::Left, LinkArrow::Down]);
        assert_eq!(stats.link_rating(), Some(2));
        assert_eq!(stats.level, None);
    }

    #[test]
    fn test_kind_queries() {
        let spell = CardDefinition::spell(CardId::new(1), "おろかな埋葬", SpellKind::Normal);
        assert!(spell.is_spell());
        assert!(!spell.is_monster());
        assert_eq!(spell.level(), None);
        assert!(!SpellKind::Normal.stays_on_field());
        assert!(SpellKind::Field.stays_on_field());

        let xyz = CardDefinition::monster(
            CardId::new(2),
            "永遠の淑女 ベアトリーチェ",
            MonsterStats::xyz(Element::Light, Race::Fairy, 6, 2500, 2800),
        );
        assert!(xyz.is_xyz());
        assert!(xyz.is_extra_deck());
        assert!(!xyz.can_normal_summon());
    }
}
