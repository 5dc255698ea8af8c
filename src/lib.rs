//! # exodia-drytron
//!
//! Effect resolution engine for a single-player Exodia / Drytron duel
//! simulator.
//!
//! ## Design Principles
//!
//! 1. **Effects never block**: every point where a card effect needs input
//!    becomes a queued step carrying its continuation. The presentation
//!    layer answers the front step; the engine resumes the effect.
//!
//! 2. **One owner per card**: instances live in a single store inside
//!    `GameState`. Zones, attachments and continuations hold `EntityId`s,
//!    and the movement primitives keep every id in exactly one container.
//!
//! 3. **Cards are data**: a card is a definition plus a bag of `fn` hooks
//!    written against the combinator API.
//!
//! ## Modules
//!
//! - `core`: entity ids, RNG, configuration, actions, state
//! - `cards`: card definitions, instances and the registry
//! - `zones`: field slots, piles and the movement primitives
//! - `effects`: hook contract, candidate selectors and combinators
//! - `stack`: the effect queue and its resolution
//! - `rules`: action surface, summon legality, combination search, turns
//! - `games`: the card catalog and duel setup

pub mod cards;
pub mod core;
pub mod effects;
pub mod error;
pub mod games;
pub mod rules;
pub mod stack;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{CardAction, DuelConfig, EntityId, GameRng, GameState, Phase, TurnStamp};

pub use crate::cards::{CardDefinition, CardId, CardInstance, CardRegistry, Location, Position};

pub use crate::error::{DuelError, EffectResult, PlacementError};

pub use crate::rules::GameResult;

pub use crate::stack::{QueueStatus, Resolution, StepKind};

pub use crate::zones::{Destination, Pile};
