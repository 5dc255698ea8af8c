//! Exodia / Drytron duel.
//!
//! Registers the card catalog and builds a ready-to-play duel from a deck
//! list:
//! - `cards`: main deck monsters
//! - `spells`: spells and traps
//! - `extra`: extra deck monsters
//! - `deck`: deck lists
//!
//! ```
//! use exodia_drytron::games::drytron_exodia::DuelBuilder;
//!
//! let mut state = DuelBuilder::new().build(42).unwrap();
//! state.settle().unwrap();
//! assert_eq!(state.zones.hand.len(), 5);
//! ```

pub mod cards;
pub mod deck;
pub mod extra;
pub mod spells;

pub use deck::{exodia_deck, DeckEntry, DeckList};

use tracing::info;

use crate::cards::CardRegistry;
use crate::core::{DuelConfig, GameState};
use crate::error::DuelError;
use crate::rules::initialize_game;
use crate::zones::Pile;

/// Registry holding every card of the catalog.
pub fn card_registry() -> Result<CardRegistry, DuelError> {
    let mut registry = CardRegistry::new();
    cards::register(&mut registry)?;
    spells::register(&mut registry)?;
    extra::register(&mut registry)?;
    Ok(registry)
}

/// Builder for a duel with the catalog registered.
#[derive(Clone, Debug)]
pub struct DuelBuilder {
    config: DuelConfig,
    deck: DeckList,
}

impl Default for DuelBuilder {
    fn default() -> Self {
        Self {
            config: DuelConfig::default(),
            deck: exodia_deck(),
        }
    }
}

impl DuelBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: DuelConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn deck(mut self, deck: DeckList) -> Self {
        self.deck = deck;
        self
    }

    /// Build the duel: spawn the decks and queue the opening hand.
    ///
    /// The opening draws are pending steps; `GameState::settle` runs them.
    pub fn build(self, seed: u64) -> Result<GameState, DuelError> {
        let mut state = self.build_unstarted(seed)?;
        initialize_game(&mut state)?;
        Ok(state)
    }

    /// Spawn the decks without shuffling or drawing.
    pub fn build_unstarted(self, seed: u64) -> Result<GameState, DuelError> {
        let mut state = GameState::new(self.config, card_registry()?, seed);
        for card in self.deck.main_cards() {
            state.spawn(card, Pile::Deck)?;
        }
        for card in self.deck.extra_cards() {
            state.spawn(card, Pile::ExtraDeck)?;
        }
        info!(deck = %self.deck.name, main = state.zones.deck.len(), extra = state.zones.extra_deck.len(), "duel built");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let registry = card_registry().unwrap();
        assert_eq!(registry.len(), 20);
        assert!(registry.id_by_name("高等儀式術").is_some());
    }

    #[test]
    fn test_same_seed_same_hand() {
        let mut a = DuelBuilder::new().build(7).unwrap();
        let mut b = DuelBuilder::new().build(7).unwrap();
        a.settle().unwrap();
        b.settle().unwrap();
        let names = |s: &GameState| -> Vec<String> {
            s.zones
                .hand
                .iter()
                .filter_map(|c| s.name_of(*c).map(str::to_string))
                .collect()
        };
        assert_eq!(names(&a), names(&b));
    }

    #[test]
    fn test_unstarted_keeps_list_order() {
        let state = DuelBuilder::new().build_unstarted(1).unwrap();
        let deck = exodia_deck();
        assert_eq!(state.zones.deck.len(), deck.main_len());
        assert_eq!(state.name_of(state.zones.deck[0]), Some("封印されしエクゾディア"));
    }
}
