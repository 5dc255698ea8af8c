//! Core engine types: entity ids, RNG, configuration, actions, state.

pub mod entity;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use entity::EntityId;
pub use rng::GameRng;
pub use config::{DeckRule, DuelConfig, Phase};
pub use action::{ActionRecord, CardAction, CardActions};
pub use state::{GameState, TurnStamp, TurnState};
