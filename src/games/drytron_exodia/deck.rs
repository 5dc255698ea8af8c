//! Deck lists.

use serde::{Deserialize, Serialize};

use super::{cards, extra, spells};
use crate::cards::CardId;

/// One line of a deck list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: CardId,
    pub quantity: usize,
}

impl DeckEntry {
    #[must_use]
    pub const fn new(card: CardId, quantity: usize) -> Self {
        Self { card, quantity }
    }
}

/// Main and extra deck of a duel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckList {
    pub name: String,
    pub main: Vec<DeckEntry>,
    pub extra: Vec<DeckEntry>,
}

impl DeckList {
    /// Expand the main deck into one id per copy, in list order.
    #[must_use]
    pub fn main_cards(&self) -> Vec<CardId> {
        expand(&self.main)
    }

    /// Expand the extra deck into one id per copy, in list order.
    #[must_use]
    pub fn extra_cards(&self) -> Vec<CardId> {
        expand(&self.extra)
    }

    /// Number of cards in the main deck.
    #[must_use]
    pub fn main_len(&self) -> usize {
        self.main.iter().map(|e| e.quantity).sum()
    }
}

fn expand(entries: &[DeckEntry]) -> Vec<CardId> {
    entries
        .iter()
        .flat_map(|e| std::iter::repeat(e.card).take(e.quantity))
        .collect()
}

/// The Exodia deck built around Drytron ritual plays.
#[must_use]
pub fn exodia_deck() -> DeckList {
    DeckList {
        name: "エクゾディアデッキ".to_string(),
        main: vec![
            DeckEntry::new(cards::EXODIA, 1),
            DeckEntry::new(cards::RIGHT_ARM, 1),
            DeckEntry::new(cards::LEFT_ARM, 1),
            DeckEntry::new(cards::RIGHT_LEG, 1),
            DeckEntry::new(cards::LEFT_LEG, 1),
            DeckEntry::new(cards::GENEX_CONTROLLER, 2),
            DeckEntry::new(cards::CANNON_DARUMA, 2),
            DeckEntry::new(cards::HERALD_PRIESTESS, 3),
            DeckEntry::new(cards::BAN_ALPHA, 3),
            DeckEntry::new(cards::BENTEN, 3),
            DeckEntry::new(spells::ONE_FOR_ONE, 1),
            DeckEntry::new(spells::FOOLISH_BURIAL, 1),
            DeckEntry::new(spells::CHICKEN_GAME, 1),
            DeckEntry::new(spells::SPELL_ECONOMICS, 1),
            DeckEntry::new(spells::HIGH_RITUAL_ART, 1),
            DeckEntry::new(spells::BACKUP_SOLDIER, 3),
        ],
        extra: vec![
            DeckEntry::new(extra::HERALD_OF_THE_ARC_LIGHT, 1),
            DeckEntry::new(extra::BEATRICE, 2),
            DeckEntry::new(extra::BARRICADEBORG, 1),
            DeckEntry::new(extra::LINKURIBOH, 1),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_respects_quantities() {
        let deck = exodia_deck();
        assert_eq!(deck.main_cards().len(), deck.main_len());
        assert_eq!(deck.main_cards().iter().filter(|c| **c == cards::BENTEN).count(), 3);
        assert_eq!(deck.extra_cards().len(), 5);
    }
}
