//! Ordered piles and the two fields.
//!
//! `Zones` holds every container a card id can sit in:
//! - five ordered piles (hand, deck, graveyard, banished, extra deck)
//! - the player's `Field` and the mirrored opponent `Field`
//!
//! Pile index 0 is the top; drawing takes the front of the deck. Piles
//! are `im::Vector`s so a whole board can be snapshotted cheaply for the
//! presentation layer.
//!
//! Materials and equipment are attached to `CardInstance`s, not stored
//! here; `movement::exclude_from_anywhere` covers both.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::field::{Field, FieldSlot};
use crate::core::EntityId;

/// Position for inserting a card into a pile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Put on top (front) of the pile.
    Top,
    /// Put at the bottom (back) of the pile.
    #[default]
    Bottom,
    /// Insert at specific index (0 = top).
    Index(usize),
}

/// The ordered piles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pile {
    Hand,
    Deck,
    Graveyard,
    Banished,
    ExtraDeck,
}

impl Pile {
    pub const ALL: [Pile; 5] = [Pile::Hand, Pile::Deck, Pile::Graveyard, Pile::Banished, Pile::ExtraDeck];
}

/// Where a card was before it was removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    Pile(Pile, usize),
    Field(FieldSlot),
    OpponentField(FieldSlot),
    /// Attached as material to the given host.
    Material(EntityId),
    /// Attached as equipment to the given host.
    Equipment(EntityId),
}

/// Every container on the board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zones {
    pub hand: Vector<EntityId>,
    pub deck: Vector<EntityId>,
    pub graveyard: Vector<EntityId>,
    pub banished: Vector<EntityId>,
    pub extra_deck: Vector<EntityId>,
    pub field: Field,
    pub opponent_field: Field,
}

impl Zones {
    /// Create empty zones.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow a pile.
    #[must_use]
    pub fn pile(&self, pile: Pile) -> &Vector<EntityId> {
        match pile {
            Pile::Hand => &self.hand,
            Pile::Deck => &self.deck,
            Pile::Graveyard => &self.graveyard,
            Pile::Banished => &self.banished,
            Pile::ExtraDeck => &self.extra_deck,
        }
    }

    fn pile_mut(&mut self, pile: Pile) -> &mut Vector<EntityId> {
        match pile {
            Pile::Hand => &mut self.hand,
            Pile::Deck => &mut self.deck,
            Pile::Graveyard => &mut self.graveyard,
            Pile::Banished => &mut self.banished,
            Pile::ExtraDeck => &mut self.extra_deck,
        }
    }

    /// Insert a card into a pile.
    pub fn insert(&mut self, pile: Pile, card: EntityId, position: ZonePosition) {
        let cards = self.pile_mut(pile);
        match position {
            ZonePosition::Top => cards.push_front(card),
            ZonePosition::Bottom => cards.push_back(card),
            ZonePosition::Index(i) => {
                let idx = i.min(cards.len());
                cards.insert(idx, card);
            }
        }
    }

    /// Take the top card of a pile.
    pub fn pop_top(&mut self, pile: Pile) -> Option<EntityId> {
        self.pile_mut(pile).pop_front()
    }

    /// Replace a pile's order (e.g. after a shuffle).
    pub fn reorder(&mut self, pile: Pile, order: Vec<EntityId>) {
        *self.pile_mut(pile) = order.into_iter().collect();
    }

    /// Remove `card` from every pile and both fields.
    ///
    /// Returns the first container it was found in.
    pub fn remove(&mut self, card: EntityId) -> Option<Origin> {
        let mut origin = None;
        for pile in Pile::ALL {
            let cards = self.pile_mut(pile);
            while let Some(idx) = cards.index_of(&card) {
                cards.remove(idx);
                origin.get_or_insert(Origin::Pile(pile, idx));
            }
        }
        if let Some(slot) = self.field.remove(card) {
            origin.get_or_insert(Origin::Field(slot));
        }
        if let Some(slot) = self.opponent_field.remove(card) {
            origin.get_or_insert(Origin::OpponentField(slot));
        }
        origin
    }

    /// Number of pile/field containers holding `card`.
    #[must_use]
    pub fn occurrences(&self, card: EntityId) -> usize {
        let in_piles: usize = Pile::ALL
            .iter()
            .map(|&p| self.pile(p).iter().filter(|c| **c == card).count())
            .sum();
        in_piles + self.field.occurrences(card) + self.opponent_field.occurrences(card)
    }

    /// Which pile holds `card`, if any.
    #[must_use]
    pub fn pile_of(&self, card: EntityId) -> Option<Pile> {
        Pile::ALL.into_iter().find(|&p| self.pile(p).contains(&card))
    }
}
