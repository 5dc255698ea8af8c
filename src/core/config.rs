//! Duel configuration and turn phases.
//!
//! - `Phase`: the four phases a turn cycles through
//! - `DeckRule`: deck-level rule switches
//! - `DuelConfig`: starting values and engine switches
//!
//! ```
//! use exodia_drytron::core::{DeckRule, DuelConfig};
//!
//! let config = DuelConfig::default().with_rule(DeckRule::StartSixHand);
//! assert_eq!(config.opening_hand_size(), 6);
//! assert_eq!(config.starting_life, 8000);
//! ```

use serde::{Deserialize, Serialize};

/// Turn phase.
///
/// Turns cycle `Draw -> Standby -> Main1 -> End`. The opponent's turn is
/// entered at `Main1` and leaves straight into the player's `Draw`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Draw,
    Standby,
    Main1,
    End,
}

impl Phase {
    /// The phase that follows within the same turn, or `None` after `End`.
    #[must_use]
    pub const fn next(self) -> Option<Phase> {
        match self {
            Phase::Draw => Some(Phase::Standby),
            Phase::Standby => Some(Phase::Main1),
            Phase::Main1 => Some(Phase::End),
            Phase::End => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Draw => "draw",
            Phase::Standby => "standby",
            Phase::Main1 => "main1",
            Phase::End => "end",
        };
        f.write_str(name)
    }
}

/// Deck-level rule switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckRule {
    /// Open with six cards instead of five.
    StartSixHand,
}

/// Starting values and engine switches for a duel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelConfig {
    /// Life points at the start of the duel.
    pub starting_life: i64,

    /// Opening hand size before deck rules are applied.
    pub opening_hand: usize,

    /// Summon without a zone prompt whenever a default zone exists.
    pub auto_summon: bool,

    /// Shuffle the deck during setup.
    pub shuffle_deck: bool,

    /// Active deck rules.
    #[serde(default)]
    pub rules: Vec<DeckRule>,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            starting_life: 8000,
            opening_hand: 5,
            auto_summon: false,
            shuffle_deck: true,
            rules: Vec::new(),
        }
    }
}

impl DuelConfig {
    /// Set starting life points.
    #[must_use]
    pub fn with_starting_life(mut self, life: i64) -> Self {
        self.starting_life = life;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_opening_hand(mut self, size: usize) -> Self {
        self.opening_hand = size;
        self
    }

    /// Enable or disable auto-summon.
    #[must_use]
    pub fn with_auto_summon(mut self, enabled: bool) -> Self {
        self.auto_summon = enabled;
        self
    }

    /// Enable or disable the setup shuffle.
    #[must_use]
    pub fn with_shuffle(mut self, enabled: bool) -> Self {
        self.shuffle_deck = enabled;
        self
    }

    /// Add a deck rule.
    #[must_use]
    pub fn with_rule(mut self, rule: DeckRule) -> Self {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
        self
    }

    /// Check whether a deck rule is active.
    #[must_use]
    pub fn has_rule(&self, rule: DeckRule) -> bool {
        self.rules.contains(&rule)
    }

    /// Number of cards drawn into the opening hand.
    #[must_use]
    pub fn opening_hand_size(&self) -> usize {
        if self.has_rule(DeckRule::StartSixHand) {
            6
        } else {
            self.opening_hand
        }
    }
}
