//! Effect queue and resolution.
//!
//! Card effects never block. Every point where an effect needs input is
//! pushed onto the `EffectQueue` as a `Step` carrying its continuation;
//! the presentation layer renders the front item and answers it with a
//! `Resolution` through `GameState::process_queue_top`, or cancels it
//! with `GameState::pop_queue`.
//!
//! ## Example Usage
//!
//! ```
//! use exodia_drytron::cards::CardRegistry;
//! use exodia_drytron::core::{DuelConfig, EntityId, GameState};
//! use exodia_drytron::effects::with_delay;
//! use exodia_drytron::stack::{QueueStatus, Resolution};
//!
//! let mut state = GameState::new(DuelConfig::default(), CardRegistry::new(), 42);
//! with_delay(&mut state, EntityId(0), Default::default(), |state, _| {
//!     state.life_points -= 100;
//!     Ok(())
//! });
//! assert_eq!(state.queue_status(), QueueStatus::Processing);
//!
//! let status = state.process_queue_top(Resolution::Delay).unwrap();
//! assert_eq!(status, QueueStatus::Complete);
//! assert_eq!(state.life_points, 7900);
//! ```

mod queue;
mod resolve;

pub use queue::{
    CandidateFn, ChainContinuation, Continuation, EffectOption, EffectQueue, LifeChange, Notice,
    OptionContinuation, PendingStep, QueueItem, QueueItemId, SelectContinuation, SelectMode,
    SelectionCondition, Step, StepKind, SummonContinuation, DEFAULT_ORDER,
};

use serde::{Deserialize, Serialize};

use crate::cards::Position;
use crate::core::EntityId;

/// Status of the effect queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueStatus {
    /// Nothing pending.
    Complete,

    /// The front step needs player input of this kind.
    WaitingForInput(StepKind),

    /// The front step is a notify step; resolve it with `Resolution::Delay`
    /// (or call `settle`) after any animation.
    Processing,
}

/// Input answering the front step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Cards chosen for a select / multiselect step.
    Cards(Vec<EntityId>),
    /// Value of the chosen option.
    Option(String),
    /// Confirm a confirm step.
    Confirm,
    /// Zone and position for a summon step.
    Summon { zone: usize, position: Position },
    /// Acknowledge a notify step.
    Delay,
    /// Chain responder picked at a chain check, or `None` to decline.
    Chain(Option<EntityId>),
}

impl Resolution {
    /// Short name for error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Resolution::Cards(_) => "cards",
            Resolution::Option(_) => "option",
            Resolution::Confirm => "confirm",
            Resolution::Summon { .. } => "summon",
            Resolution::Delay => "delay",
            Resolution::Chain(_) => "chain",
        }
    }
}
