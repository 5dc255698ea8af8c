//! The card effect contract.
//!
//! Every card definition carries a `CardEffects` bag of optional hooks.
//! Hooks are plain `fn` pointers: they receive the live `GameState` and
//! the id of the card they belong to, and express multi-step behaviour
//! by calling the combinators in `effects::combinators`.
//!
//! ## Hook timing
//!
//! | Hook | Fired by |
//! |---|---|
//! | `on_spell` | `activate_spell` (condition gates the "activate" action) |
//! | `on_ignition` | `activate_effect` (condition gates the "effect" action) |
//! | `on_summon` | `summon`, after placement, face-up positions only |
//! | `on_release` | `release_card`, after the card reaches the graveyard |
//! | `on_field_to_graveyard` | `send_card`, monster/field zone/equipment to graveyard |
//! | `on_anywhere_to_graveyard` | `send_card`, any origin to graveyard |
//! | `on_destroy_by_battle` / `on_destroy_by_effect` | the destroy primitives, before the move |
//! | `on_chain` | `with_chain_check`, when another card is activated |
//! | `on_pay_life_cost` | `pay_life_cost`, may rewrite the amount |

use crate::core::{EntityId, GameState};
use crate::error::EffectResult;

/// Hook receiving the card's own id.
pub type CardHook = fn(&mut GameState, EntityId) -> EffectResult;

/// Predicate over the card's own id.
pub type CardCondition = fn(&GameState, EntityId) -> bool;

/// Chain hook: `(state, responder, activated)`.
pub type ChainHook = fn(&mut GameState, EntityId, EntityId) -> EffectResult;

/// Chain predicate: `(state, responder, activated)`.
pub type ChainCondition = fn(&GameState, EntityId, EntityId) -> bool;

/// Life cost rewrite: `(state, modifier, paying card, amount) -> amount`.
pub type LifeCostHook = fn(&GameState, EntityId, EntityId, i64) -> i64;

/// A gated activation: `condition` decides availability, `effect` runs
/// once the player commits.
#[derive(Clone, Copy, Debug)]
pub struct Activation {
    pub condition: CardCondition,
    pub effect: CardHook,
}

impl Activation {
    #[must_use]
    pub const fn new(condition: CardCondition, effect: CardHook) -> Self {
        Self { condition, effect }
    }
}

/// A response offered while another card is being activated.
#[derive(Clone, Copy, Debug)]
pub struct ChainResponse {
    pub condition: ChainCondition,
    pub effect: ChainHook,
}

/// Bag of optional effect hooks.
///
/// ```
/// use exodia_drytron::effects::{Activation, CardEffects};
///
/// let effects = CardEffects::new()
///     .with_spell(Activation::new(|_, _| true, |_, _| Ok(())));
/// assert!(effects.on_spell.is_some());
/// assert!(effects.on_summon.is_none());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct CardEffects {
    pub on_spell: Option<Activation>,
    pub on_ignition: Option<Activation>,
    pub on_summon: Option<CardHook>,
    pub on_release: Option<CardHook>,
    pub on_field_to_graveyard: Option<CardHook>,
    pub on_anywhere_to_graveyard: Option<CardHook>,
    pub on_destroy_by_battle: Option<CardHook>,
    pub on_destroy_by_effect: Option<CardHook>,
    pub on_chain: Option<ChainResponse>,
    pub on_pay_life_cost: Option<LifeCostHook>,
}

impl CardEffects {
    /// An empty bag (vanilla card).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_spell(mut self, activation: Activation) -> Self {
        self.on_spell = Some(activation);
        self
    }

    #[must_use]
    pub fn with_ignition(mut self, activation: Activation) -> Self {
        self.on_ignition = Some(activation);
        self
    }

    #[must_use]
    pub fn on_summon(mut self, hook: CardHook) -> Self {
        self.on_summon = Some(hook);
        self
    }

    #[must_use]
    pub fn on_release(mut self, hook: CardHook) -> Self {
        self.on_release = Some(hook);
        self
    }

    #[must_use]
    pub fn on_field_to_graveyard(mut self, hook: CardHook) -> Self {
        self.on_field_to_graveyard = Some(hook);
        self
    }

    #[must_use]
    pub fn on_anywhere_to_graveyard(mut self, hook: CardHook) -> Self {
        self.on_anywhere_to_graveyard = Some(hook);
        self
    }

    #[must_use]
    pub fn on_destroy_by_battle(mut self, hook: CardHook) -> Self {
        self.on_destroy_by_battle = Some(hook);
        self
    }

    #[must_use]
    pub fn on_destroy_by_effect(mut self, hook: CardHook) -> Self {
        self.on_destroy_by_effect = Some(hook);
        self
    }

    #[must_use]
    pub fn with_chain(mut self, condition: ChainCondition, effect: ChainHook) -> Self {
        self.on_chain = Some(ChainResponse { condition, effect });
        self
    }

    #[must_use]
    pub fn on_pay_life_cost(mut self, hook: LifeCostHook) -> Self {
        self.on_pay_life_cost = Some(hook);
        self
    }
}
