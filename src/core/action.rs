//! Player-facing card actions.
//!
//! `get_card_actions` reports which of these a card currently offers; the
//! presentation layer shows them as buttons and calls the matching entry
//! point in `rules::actions`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::EntityId;

/// An action a card in hand or on the field can offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardAction {
    /// Normal summon from hand.
    Summon,
    /// Activate a spell from hand or a set spell/trap.
    Activate,
    /// Set a spell or trap face-down.
    Set,
    /// Activate an ignition effect.
    Effect,
}

impl CardAction {
    /// Stable lowercase name, matching what a UI would label the button.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardAction::Summon => "summon",
            CardAction::Activate => "activate",
            CardAction::Set => "set",
            CardAction::Effect => "effect",
        }
    }
}

/// Actions offered by one card. Rarely more than two.
pub type CardActions = SmallVec<[CardAction; 4]>;

/// A committed action, kept in the duel log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Turn the action was taken on.
    pub turn: u32,
    /// Whether it was taken during the opponent's turn.
    pub opponent_turn: bool,
    /// What was done.
    pub action: CardAction,
    /// The card that did it.
    pub card: EntityId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names() {
        assert_eq!(CardAction::Summon.name(), "summon");
        assert_eq!(CardAction::Activate.name(), "activate");
        assert_eq!(CardAction::Set.name(), "set");
        assert_eq!(CardAction::Effect.name(), "effect");
    }
}
