//! The effect queue and its step variants.
//!
//! Each pending user interaction is a `QueueItem` whose `step` is one of a
//! closed set of variants. A step owns the continuation that resumes the
//! suspended effect. Continuations receive the live `GameState` plus the
//! source card id, and capture only ids, never instance data.
//!
//! Items are kept sorted ascending by `order`; equal orders keep
//! insertion order.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cards::{Position, SummonType};
use crate::core::{EntityId, GameState};
use crate::error::EffectResult;

/// Default sort key for queued steps.
pub const DEFAULT_ORDER: i32 = 1;

/// Unique identifier for a queue item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueueItemId(pub u32);

impl QueueItemId {
    /// Create a new queue item ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for QueueItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "QueueItem({})", self.0)
    }
}

/// Resume with no input.
pub type Continuation = Box<dyn FnOnce(&mut GameState, EntityId) -> EffectResult>;
/// Resume with the selected cards.
pub type SelectContinuation = Box<dyn FnOnce(&mut GameState, EntityId, Vec<EntityId>) -> EffectResult>;
/// Resume with the chosen option name.
pub type OptionContinuation = Box<dyn FnOnce(&mut GameState, EntityId, String) -> EffectResult>;
/// Resume after the monster was placed; receives `(state, source, monster)`.
pub type SummonContinuation = Box<dyn FnOnce(&mut GameState, EntityId, EntityId) -> EffectResult>;
/// Resume with the chosen chain responder, if any.
pub type ChainContinuation = Box<dyn FnOnce(&mut GameState, EntityId, Option<EntityId>) -> EffectResult>;
/// Candidate pool, evaluated against live state.
pub type CandidateFn = Box<dyn Fn(&GameState) -> Vec<EntityId>>;
/// Validates a prospective selection.
pub type SelectionCondition = Box<dyn Fn(&GameState, &[EntityId]) -> bool>;

/// Single or multi selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectMode {
    Single,
    Multi,
}

/// A named choice offered by an option step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectOption {
    pub name: String,
    pub value: String,
}

/// Direction of a life point change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeChange {
    Increase,
    Decrease,
}

/// What a notify step shows while it paces the queue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// Pure pacing, nothing shown.
    Delay,
    /// A message toast.
    Message { text: String, duration_ms: u32 },
    /// Life points change, applied when the step resolves.
    Life { amount: i64, change: LifeChange },
}

/// Discriminant of a step, for dispatch and error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    Select,
    MultiSelect,
    Option,
    Confirm,
    Summon,
    Notify,
    ChainCheck,
}

/// A pending step and its continuation.
pub enum Step {
    Select {
        mode: SelectMode,
        candidates: CandidateFn,
        condition: SelectionCondition,
        then: SelectContinuation,
    },
    Option {
        options: Vec<EffectOption>,
        then: OptionContinuation,
    },
    Confirm {
        then: Continuation,
    },
    Summon {
        monster: EntityId,
        positions: Vec<Position>,
        can_select_position: bool,
        summon_type: SummonType,
        then: SummonContinuation,
    },
    Notify {
        notice: Notice,
        delay_ms: u32,
        then: Option<Continuation>,
    },
    ChainCheck {
        chain: Vec<EntityId>,
        then: ChainContinuation,
    },
}

impl Step {
    #[must_use]
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Select { mode: SelectMode::Single, .. } => StepKind::Select,
            Step::Select { mode: SelectMode::Multi, .. } => StepKind::MultiSelect,
            Step::Option { .. } => StepKind::Option,
            Step::Confirm { .. } => StepKind::Confirm,
            Step::Summon { .. } => StepKind::Summon,
            Step::Notify { .. } => StepKind::Notify,
            Step::ChainCheck { .. } => StepKind::ChainCheck,
        }
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Select { mode, .. } => f.debug_struct("Select").field("mode", mode).finish_non_exhaustive(),
            Step::Option { options, .. } => f.debug_struct("Option").field("options", options).finish_non_exhaustive(),
            Step::Confirm { .. } => f.debug_struct("Confirm").finish_non_exhaustive(),
            Step::Summon {
                monster,
                positions,
                summon_type,
                ..
            } => f
                .debug_struct("Summon")
                .field("monster", monster)
                .field("positions", positions)
                .field("summon_type", summon_type)
                .finish_non_exhaustive(),
            Step::Notify { notice, delay_ms, .. } => f
                .debug_struct("Notify")
                .field("notice", notice)
                .field("delay_ms", delay_ms)
                .finish_non_exhaustive(),
            Step::ChainCheck { chain, .. } => f.debug_struct("ChainCheck").field("chain", chain).finish_non_exhaustive(),
        }
    }
}

/// One entry of the effect queue.
#[derive(Debug)]
pub struct QueueItem {
    pub id: QueueItemId,
    /// Sort key; lower resolves first.
    pub order: i32,
    /// Card whose effect produced this step.
    pub source: EntityId,
    /// Label shown by the presentation layer.
    pub label: String,
    pub can_cancel: bool,
    pub step: Step,
}

impl QueueItem {
    #[must_use]
    pub fn kind(&self) -> StepKind {
        self.step.kind()
    }
}

/// A step waiting to be pushed; `EffectQueue::push` assigns the id.
pub struct PendingStep {
    pub order: i32,
    pub source: EntityId,
    pub label: String,
    pub can_cancel: bool,
    pub step: Step,
}

impl PendingStep {
    #[must_use]
    pub fn new(source: EntityId, label: impl Into<String>, step: Step) -> Self {
        Self {
            order: DEFAULT_ORDER,
            source,
            label: label.into(),
            can_cancel: false,
            step,
        }
    }

    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn cancellable(mut self, can_cancel: bool) -> Self {
        self.can_cancel = can_cancel;
        self
    }
}

/// Stably ordered queue of pending steps.
#[derive(Debug, Default)]
pub struct EffectQueue {
    items: Vec<QueueItem>,
    next_id: u32,
}

impl EffectQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a step after every item with `order <= step.order`, so
    /// steps of equal order run in insertion order.
    pub fn push(&mut self, pending: PendingStep) -> QueueItemId {
        let id = QueueItemId::new(self.next_id);
        self.next_id += 1;
        let at = self.items.partition_point(|item| item.order <= pending.order);
        trace!(%id, order = pending.order, kind = ?pending.step.kind(), at, "queued step");
        self.items.insert(
            at,
            QueueItem {
                id,
                order: pending.order,
                source: pending.source,
                label: pending.label,
                can_cancel: pending.can_cancel,
                step: pending.step,
            },
        );
        id
    }

    /// The interactable item.
    #[must_use]
    pub fn front(&self) -> Option<&QueueItem> {
        self.items.first()
    }

    /// Remove and return the front item.
    pub fn pop_front(&mut self) -> Option<QueueItem> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &QueueItem> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delay(order: i32, label: &str) -> PendingStep {
        PendingStep::new(
            EntityId(0),
            label,
            Step::Notify {
                notice: Notice::Delay,
                delay_ms: 0,
                then: None,
            },
        )
        .with_order(order)
    }

    #[test]
    fn test_push_sorts_by_order_stably() {
        let mut queue = EffectQueue::new();
        queue.push(delay(1, "a"));
        queue.push(delay(999, "cleanup"));
        queue.push(delay(1, "b"));
        queue.push(delay(-1, "first"));
        queue.push(delay(1, "c"));

        let labels: Vec<_> = queue.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "a", "b", "c", "cleanup"]);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut queue = EffectQueue::new();
        let a = queue.push(delay(1, "a"));
        let b = queue.push(delay(1, "b"));
        assert_ne!(a, b);
        assert_eq!(queue.pop_front().map(|i| i.id), Some(a));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_kind_of_select_modes() {
        let single = Step::Select {
            mode: SelectMode::Single,
            candidates: Box::new(|_| Vec::new()),
            condition: Box::new(|_, s| s.len() == 1),
            then: Box::new(|_, _, _| Ok(())),
        };
        assert_eq!(single.kind(), StepKind::Select);
        let multi = Step::Select {
            mode: SelectMode::Multi,
            candidates: Box::new(|_| Vec::new()),
            condition: Box::new(|_, s| !s.is_empty()),
            then: Box::new(|_, _, _| Ok(())),
        };
        assert_eq!(multi.kind(), StepKind::MultiSelect);
    }
}
