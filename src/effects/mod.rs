//! Effect system for card abilities.
//!
//! - `CardEffects`: the bag of optional hooks every card definition carries
//! - `CardSelector`: live candidate queries over the board
//! - combinators: push queue steps carrying the rest of an effect
//!
//! ## Writing an effect
//!
//! A hook reads like straight-line code but suspends at every combinator
//! call. The combinator pushes a step and returns; the closure passed to
//! it runs later, when the presentation layer answers the step.
//!
//! ```
//! use exodia_drytron::cards::CardRegistry;
//! use exodia_drytron::core::{DuelConfig, EntityId, GameState};
//! use exodia_drytron::effects::{with_user_confirm, StepOptions};
//! use exodia_drytron::stack::Resolution;
//!
//! let mut state = GameState::new(DuelConfig::default(), CardRegistry::new(), 9);
//! with_user_confirm(&mut state, EntityId(0), StepOptions::default(), |state, _| {
//!     state.opponent_life_points -= 1000;
//!     Ok(())
//! });
//! assert_eq!(state.opponent_life_points, 8000);
//!
//! state.process_queue_top(Resolution::Confirm).unwrap();
//! assert_eq!(state.opponent_life_points, 7000);
//! ```

mod combinators;
mod hooks;
mod selector;

pub use combinators::{
    chain_responders, is_at, life_cost, pay_life_cost, with_chain_check, with_delay, with_delay_recursive,
    with_life_change, with_notification, with_option, with_turn_at_once_condition, with_turn_at_once_effect,
    with_user_confirm, with_user_select_card, with_user_summon, DelayOptions, OptionChoice, SelectOptions,
    StepOptions, SummonOptions,
};
pub use hooks::{
    Activation, CardCondition, CardEffects, CardHook, ChainCondition, ChainHook, ChainResponse, LifeCostHook,
};
pub use selector::{sum_level, sum_link, CardSelector};
