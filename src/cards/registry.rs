//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores every card definition a duel can reference.
//! It provides lookup by `CardId` and by card name.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};
use crate::error::DuelError;

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use exodia_drytron::cards::{CardDefinition, CardId, CardRegistry, SpellKind};
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(CardDefinition::spell(CardId::new(1), "おろかな埋葬", SpellKind::Normal))
///     .unwrap();
///
/// assert_eq!(registry.get(CardId::new(1)).unwrap().name, "おろかな埋葬");
/// assert_eq!(registry.id_by_name("おろかな埋葬"), Some(CardId::new(1)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
    by_name: FxHashMap<String, CardId>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Fails if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition) -> Result<(), DuelError> {
        if self.cards.contains_key(&card.id) {
            return Err(DuelError::DuplicateCard(card.id));
        }
        self.by_name.insert(card.name.clone(), card.id);
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Look up a definition id by card name.
    #[must_use]
    pub fn id_by_name(&self, name: &str) -> Option<CardId> {
        self.by_name.get(name).copied()
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
