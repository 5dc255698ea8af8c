//! Queue processing entry points on `GameState`.
//!
//! A resolution is validated against the front item *before* the item is
//! removed, so a rejected resolution leaves the queue untouched. After
//! the continuation runs, the win conditions are re-evaluated.

use tracing::{debug, warn};

use super::queue::{LifeChange, Notice, QueueItem, QueueItemId, Step};
use super::{QueueStatus, Resolution};
use crate::core::{EntityId, GameState};
use crate::error::DuelError;
use crate::rules::{judge_win, summonable_zones};
use crate::zones::summon;

impl GameState {
    /// Current queue status.
    #[must_use]
    pub fn queue_status(&self) -> QueueStatus {
        match self.queue.front() {
            None => QueueStatus::Complete,
            Some(item) if matches!(item.step, Step::Notify { .. }) => QueueStatus::Processing,
            Some(item) => QueueStatus::WaitingForInput(item.kind()),
        }
    }

    /// Cards the front step currently offers.
    ///
    /// Select steps evaluate their candidate pool against live state, so
    /// the pool reflects every change made since the step was queued.
    #[must_use]
    pub fn front_candidates(&self) -> Vec<EntityId> {
        match self.queue.front().map(|item| &item.step) {
            Some(Step::Select { candidates, .. }) => candidates(self),
            Some(Step::ChainCheck { chain, .. }) => chain.clone(),
            _ => Vec::new(),
        }
    }

    /// Answer the front step and run its continuation.
    pub fn process_queue_top(&mut self, resolution: Resolution) -> Result<QueueStatus, DuelError> {
        let front = self.queue.front().ok_or(DuelError::EmptyQueue)?;
        validate(self, front, &resolution)?;
        let item = self.queue.pop_front().ok_or(DuelError::EmptyQueue)?;
        debug!(id = %item.id, kind = ?item.kind(), source = %item.source, "resolving step");

        let source = item.source;
        match (item.step, resolution) {
            (Step::Select { then, .. }, Resolution::Cards(selected)) => then(self, source, selected)?,
            (Step::Option { then, .. }, Resolution::Option(value)) => then(self, source, value)?,
            (Step::Confirm { then }, Resolution::Confirm) => then(self, source)?,
            (
                Step::Summon {
                    monster,
                    summon_type,
                    then,
                    ..
                },
                Resolution::Summon { zone, position },
            ) => {
                summon(self, monster, zone, position, summon_type)?;
                then(self, source, monster)?;
            }
            (Step::Notify { notice, then, .. }, Resolution::Delay) => {
                if let Notice::Life { amount, change } = notice {
                    match change {
                        LifeChange::Increase => self.life_points += amount,
                        LifeChange::Decrease => self.life_points -= amount,
                    }
                }
                if let Some(then) = then {
                    then(self, source)?;
                }
            }
            (Step::ChainCheck { then, .. }, Resolution::Chain(responder)) => then(self, source, responder)?,
            // validate() rejects every other pairing
            _ => {}
        }

        judge_win(self);
        Ok(self.queue_status())
    }

    /// Cancel the front step, discarding its continuation.
    ///
    /// Side effects already applied by earlier steps of the same effect
    /// chain stay in place.
    pub fn pop_queue(&mut self) -> Result<QueueItemId, DuelError> {
        let front = self.queue.front().ok_or(DuelError::EmptyQueue)?;
        if !front.can_cancel {
            warn!(id = %front.id, kind = ?front.kind(), "refused to cancel step");
            return Err(DuelError::NotCancellable);
        }
        let item = self.queue.pop_front().ok_or(DuelError::EmptyQueue)?;
        debug!(id = %item.id, source = %item.source, "cancelled step");
        Ok(item.id)
    }

    /// Drop every pending step.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    /// Resolve consecutive notify steps at the front of the queue.
    ///
    /// Stops at the first step that needs input.
    pub fn settle(&mut self) -> Result<QueueStatus, DuelError> {
        while self.queue_status() == QueueStatus::Processing {
            self.process_queue_top(Resolution::Delay)?;
        }
        Ok(self.queue_status())
    }
}

fn validate(state: &GameState, item: &QueueItem, resolution: &Resolution) -> Result<(), DuelError> {
    let mismatch = || DuelError::ResolutionMismatch {
        expected: item.kind(),
        got: resolution.name(),
    };

    match (&item.step, resolution) {
        (
            Step::Select {
                candidates, condition, ..
            },
            Resolution::Cards(selected),
        ) => {
            let pool = candidates(state);
            if let Some(missing) = selected.iter().find(|id| !pool.contains(id)) {
                return Err(DuelError::InvalidSelection(format!("{missing} is not a candidate")));
            }
            let mut unique = selected.clone();
            unique.sort();
            unique.dedup();
            if unique.len() != selected.len() {
                return Err(DuelError::InvalidSelection("duplicate card in selection".into()));
            }
            if !condition(state, selected) {
                return Err(DuelError::InvalidSelection("selection does not satisfy the condition".into()));
            }
            Ok(())
        }
        (Step::Option { options, .. }, Resolution::Option(value)) => {
            if options.iter().any(|o| &o.value == value) {
                Ok(())
            } else {
                Err(DuelError::InvalidSelection(format!("unknown option {value}")))
            }
        }
        (Step::Confirm { .. }, Resolution::Confirm) | (Step::Notify { .. }, Resolution::Delay) => Ok(()),
        (
            Step::Summon {
                monster, positions, ..
            },
            Resolution::Summon { zone, position },
        ) => {
            if !positions.contains(position) {
                return Err(DuelError::InvalidSelection(format!("position {position:?} not offered")));
            }
            if !summonable_zones(state, *monster).contains(zone) {
                return Err(DuelError::InvalidSelection(format!("zone {zone} is not available")));
            }
            Ok(())
        }
        (Step::ChainCheck { chain, .. }, Resolution::Chain(responder)) => match responder {
            Some(card) if !chain.contains(card) => {
                Err(DuelError::InvalidSelection(format!("{card} cannot respond")))
            }
            _ => Ok(()),
        },
        _ => Err(mismatch()),
    }
}
