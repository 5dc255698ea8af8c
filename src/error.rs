//! Error types.
//!
//! - `PlacementError`: a movement primitive refused to place a card
//! - `DuelError`: anything that can go wrong while driving a duel
//!
//! Card hooks and queued continuations return `EffectResult`, so a failed
//! placement deep inside an effect chain surfaces from `process_queue_top`.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::EntityId;
use crate::stack::StepKind;

/// Rejected card placement.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The requested slot already holds a card.
    #[error("zone {zone} is already occupied")]
    ZoneOccupied { zone: usize },

    /// The requested slot does not exist.
    #[error("zone index {zone} is out of range")]
    InvalidZoneIndex { zone: usize },

    /// No card with this id is tracked.
    #[error("{0} is not tracked by this duel")]
    CardNotFound(EntityId),

    /// Every slot of the named zone row is full.
    #[error("no empty {0} zone")]
    NoEmptyZone(&'static str),

    /// The card cannot be placed on the monster field this way.
    #[error("{0} is not a monster")]
    NotAMonster(EntityId),
}

/// Errors raised while driving a duel.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DuelError {
    #[error(transparent)]
    Placement(#[from] PlacementError),

    /// `process_queue_top` or `pop_queue` was called with nothing pending.
    #[error("effect queue is empty")]
    EmptyQueue,

    /// The resolution does not fit the front step.
    #[error("front step expects {expected:?}, got {got}")]
    ResolutionMismatch { expected: StepKind, got: &'static str },

    /// The selection is not allowed by the front step.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// The front step cannot be cancelled.
    #[error("front step cannot be cancelled")]
    NotCancellable,

    /// The card does not offer this action right now.
    #[error("{card} cannot {action} now")]
    IllegalAction { card: EntityId, action: &'static str },

    /// A card definition id was registered twice.
    #[error("card definition {0} registered twice")]
    DuplicateCard(CardId),

    /// A card definition id is unknown to the registry.
    #[error("card definition {0} is not registered")]
    UnknownCard(CardId),

    /// Steps are still pending; the action needs an idle queue.
    #[error("effect queue is busy")]
    QueueBusy,

    /// The duel has already been decided.
    #[error("the duel is over")]
    GameOver,
}

/// Result of running a card hook or continuation.
pub type EffectResult = Result<(), DuelError>;
