//! Live candidate queries.
//!
//! `CardSelector` gathers card ids from the requested containers of the
//! current state and narrows them with chained filters. Candidate pools
//! handed to `with_user_select_card` are built with it, so they are
//! re-evaluated against live state every time the step is rendered or
//! resolved.
//!
//! ```
//! use exodia_drytron::cards::CardRegistry;
//! use exodia_drytron::core::{DuelConfig, GameState};
//! use exodia_drytron::effects::CardSelector;
//!
//! let state = GameState::new(DuelConfig::default(), CardRegistry::new(), 1);
//! let pool = CardSelector::new(&state).hand().deck().monster().level(1).get();
//! assert!(pool.is_empty());
//! ```

use crate::cards::{CardDefinition, SpellKind};
use crate::core::{EntityId, GameState};

/// Builder over card ids drawn from live state.
#[derive(Clone, Debug)]
pub struct CardSelector<'a> {
    state: &'a GameState,
    cards: Vec<EntityId>,
}

impl<'a> CardSelector<'a> {
    /// Start with an empty selection.
    #[must_use]
    pub fn new(state: &'a GameState) -> Self {
        Self {
            state,
            cards: Vec::new(),
        }
    }

    fn extend(mut self, cards: impl IntoIterator<Item = EntityId>) -> Self {
        self.cards.extend(cards);
        self
    }

    // === Sources ===

    #[must_use]
    pub fn hand(self) -> Self {
        let cards: Vec<_> = self.state.zones.hand.iter().copied().collect();
        self.extend(cards)
    }

    #[must_use]
    pub fn deck(self) -> Self {
        let cards: Vec<_> = self.state.zones.deck.iter().copied().collect();
        self.extend(cards)
    }

    #[must_use]
    pub fn graveyard(self) -> Self {
        let cards: Vec<_> = self.state.zones.graveyard.iter().copied().collect();
        self.extend(cards)
    }

    #[must_use]
    pub fn banished(self) -> Self {
        let cards: Vec<_> = self.state.zones.banished.iter().copied().collect();
        self.extend(cards)
    }

    #[must_use]
    pub fn extra_deck(self) -> Self {
        let cards: Vec<_> = self.state.zones.extra_deck.iter().copied().collect();
        self.extend(cards)
    }

    /// Monsters in the main monster zones.
    #[must_use]
    pub fn main_monsters(self) -> Self {
        let cards: Vec<_> = self.state.zones.field.monster_zones.iter().flatten().copied().collect();
        self.extend(cards)
    }

    /// Monsters in the extra monster zones.
    #[must_use]
    pub fn extra_monsters(self) -> Self {
        let cards: Vec<_> = self
            .state
            .zones
            .field
            .extra_monster_zones
            .iter()
            .flatten()
            .copied()
            .collect();
        self.extend(cards)
    }

    /// Every monster on the player's field.
    #[must_use]
    pub fn field_monsters(self) -> Self {
        let cards: Vec<_> = self.state.zones.field.monsters().collect();
        self.extend(cards)
    }

    /// Xyz materials attached to field monsters.
    #[must_use]
    pub fn materials(self) -> Self {
        let state = self.state;
        let cards: Vec<_> = state
            .zones
            .field
            .monsters()
            .filter_map(|m| state.card(m))
            .flat_map(|m| m.materials.iter().copied())
            .collect();
        self.extend(cards)
    }

    #[must_use]
    pub fn spell_traps(self) -> Self {
        let cards: Vec<_> = self.state.zones.field.spell_traps().collect();
        self.extend(cards)
    }

    #[must_use]
    pub fn field_zone(self) -> Self {
        let card = self.state.zones.field.field_zone;
        self.extend(card)
    }

    #[must_use]
    pub fn opponent_field_zone(self) -> Self {
        let card = self.state.zones.opponent_field.field_zone;
        self.extend(card)
    }

    // === Filters ===

    /// Keep cards whose definition passes `predicate`.
    #[must_use]
    pub fn definition(mut self, predicate: impl Fn(&CardDefinition) -> bool) -> Self {
        let state = self.state;
        self.cards.retain(|c| state.definition(*c).is_some_and(&predicate));
        self
    }

    /// Keep cards passing an arbitrary predicate over live state.
    #[must_use]
    pub fn filter(mut self, predicate: impl Fn(&GameState, EntityId) -> bool) -> Self {
        let state = self.state;
        self.cards.retain(|c| predicate(state, *c));
        self
    }

    #[must_use]
    pub fn monster(self) -> Self {
        self.definition(CardDefinition::is_monster)
    }

    #[must_use]
    pub fn normal_monster(self) -> Self {
        self.definition(CardDefinition::is_normal_monster)
    }

    #[must_use]
    pub fn ritual_monster(self) -> Self {
        self.definition(CardDefinition::is_ritual_monster)
    }

    #[must_use]
    pub fn spell(self) -> Self {
        self.definition(CardDefinition::is_spell)
    }

    #[must_use]
    pub fn trap(self) -> Self {
        self.definition(CardDefinition::is_trap)
    }

    #[must_use]
    pub fn spell_kind(self, kind: SpellKind) -> Self {
        self.definition(move |d| d.spell_kind() == Some(kind))
    }

    #[must_use]
    pub fn can_normal_summon(self) -> Self {
        self.definition(CardDefinition::can_normal_summon)
    }

    /// Current level (buffs included) equals `level`.
    #[must_use]
    pub fn level(self, level: i32) -> Self {
        self.filter(move |s, c| s.level_of(c) == Some(level))
    }

    #[must_use]
    pub fn level_at_least(self, level: i32) -> Self {
        self.filter(move |s, c| s.level_of(c).is_some_and(|l| l >= level))
    }

    #[must_use]
    pub fn level_at_most(self, level: i32) -> Self {
        self.filter(move |s, c| s.level_of(c).is_some_and(|l| l <= level))
    }

    #[must_use]
    pub fn attack_at_most(self, attack: i32) -> Self {
        self.filter(move |s, c| s.attack_of(c).is_some_and(|a| a <= attack))
    }

    /// Exact card name.
    #[must_use]
    pub fn named(self, name: &str) -> Self {
        self.filter(|s, c| s.name_of(c) == Some(name))
    }

    /// Card name contains `part` (archetype match).
    #[must_use]
    pub fn name_contains(self, part: &str) -> Self {
        self.filter(|s, c| s.name_of(c).is_some_and(|n| n.contains(part)))
    }

    /// Face-up cards only.
    #[must_use]
    pub fn face_up(self) -> Self {
        self.filter(|s, c| s.card(c).is_some_and(|i| i.is_face_up()))
    }

    #[must_use]
    pub fn excluding(mut self, card: EntityId) -> Self {
        self.cards.retain(|c| *c != card);
        self
    }

    // === Results ===

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn get(self) -> Vec<EntityId> {
        self.cards
    }
}

/// Sum of current levels; cards without a level count as 0.
#[must_use]
pub fn sum_level(state: &GameState, cards: &[EntityId]) -> i32 {
    cards.iter().filter_map(|c| state.level_of(*c)).sum()
}

/// Link material value: a link monster counts as its rating, anything
/// else as 1.
#[must_use]
pub fn sum_link(state: &GameState, cards: &[EntityId]) -> i32 {
    cards
        .iter()
        .map(|c| {
            state
                .definition(*c)
                .and_then(|d| d.monster_stats())
                .and_then(|s| s.link_rating())
                .map_or(1, i32::from)
        })
        .sum()
}
