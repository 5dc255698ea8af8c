//! Continuation combinators.
//!
//! Card hooks express multi-step behaviour by calling these functions.
//! Each one pushes a `Step` carrying the rest of the effect as a boxed
//! continuation and returns immediately; the continuation runs when the
//! front step is answered through `GameState::process_queue_top`.
//!
//! Continuations capture entity ids only. Anything read from an instance
//! must be re-fetched from the state passed to the continuation.
//!
//! ## Cancellation
//!
//! Cancelling a step (`GameState::pop_queue`) drops its continuation and
//! nothing else: side effects applied by earlier steps stay applied.
//! Steps are therefore only marked cancellable when no cost has been
//! paid yet, i.e. at the first selection of an effect (release targets
//! of `with_user_summon`, confirm gates, optional searches).

use tracing::{debug, trace};

use crate::cards::{Location, Position, SummonType};
use crate::core::{EntityId, GameState};
use crate::error::{DuelError, EffectResult};
use crate::rules::default_summon_zone;
use crate::stack::{
    EffectOption, LifeChange, Notice, PendingStep, QueueItemId, SelectMode, SelectionCondition, Step,
    DEFAULT_ORDER,
};
use crate::zones::{release_card, summon};

use super::selector::CardSelector;

/// Display name used in step labels.
fn label(state: &GameState, source: EntityId, suffix: &str) -> String {
    match state.name_of(source) {
        Some(name) => format!("{name} ({suffix})"),
        None => suffix.to_string(),
    }
}

// === Card selection ===

/// Settings for `with_user_select_card`.
pub struct SelectOptions {
    pub mode: SelectMode,
    /// Validates a prospective selection. Defaults to "exactly one" for
    /// single selects and "at least one" for multi selects.
    pub condition: Option<SelectionCondition>,
    pub order: i32,
    pub message: Option<String>,
    pub can_cancel: bool,
}

impl SelectOptions {
    #[must_use]
    pub fn single() -> Self {
        Self {
            mode: SelectMode::Single,
            condition: None,
            order: DEFAULT_ORDER,
            message: None,
            can_cancel: false,
        }
    }

    #[must_use]
    pub fn multi() -> Self {
        Self {
            mode: SelectMode::Multi,
            ..Self::single()
        }
    }

    #[must_use]
    pub fn with_condition(mut self, condition: impl Fn(&GameState, &[EntityId]) -> bool + 'static) -> Self {
        self.condition = Some(Box::new(condition));
        self
    }

    /// Require exactly `count` cards.
    #[must_use]
    pub fn exactly(self, count: usize) -> Self {
        self.with_condition(move |_, selected| selected.len() == count)
    }

    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn cancellable(mut self) -> Self {
        self.can_cancel = true;
        self
    }
}

/// Ask the player to pick cards from a live candidate pool.
///
/// The pool is re-evaluated whenever the step is rendered or resolved.
/// A step is pushed even when the pool is currently empty; check the pool
/// first when that matters.
pub fn with_user_select_card<C, F>(
    state: &mut GameState,
    source: EntityId,
    candidates: C,
    options: SelectOptions,
    then: F,
) -> QueueItemId
where
    C: Fn(&GameState) -> Vec<EntityId> + 'static,
    F: FnOnce(&mut GameState, EntityId, Vec<EntityId>) -> EffectResult + 'static,
{
    let mode = options.mode;
    let condition: SelectionCondition = match (options.condition, mode) {
        (Some(condition), _) => condition,
        (None, SelectMode::Single) => Box::new(|_, selected| selected.len() == 1),
        (None, SelectMode::Multi) => Box::new(|_, selected| !selected.is_empty()),
    };
    let name = options.message.unwrap_or_else(|| label(state, source, "select cards"));
    state.queue.push(
        PendingStep::new(
            source,
            name,
            Step::Select {
                mode,
                candidates: Box::new(candidates),
                condition,
                then: Box::new(then),
            },
        )
        .with_order(options.order)
        .cancellable(options.can_cancel),
    )
}

// === Options and confirmation ===

/// A named branch offered by `with_option`.
pub struct OptionChoice {
    pub name: String,
    pub condition: Box<dyn Fn(&GameState, EntityId) -> bool>,
}

impl OptionChoice {
    #[must_use]
    pub fn new(name: impl Into<String>, condition: impl Fn(&GameState, EntityId) -> bool + 'static) -> Self {
        Self {
            name: name.into(),
            condition: Box::new(condition),
        }
    }

    /// A branch that is always available.
    #[must_use]
    pub fn always(name: impl Into<String>) -> Self {
        Self::new(name, |_, _| true)
    }
}

/// Offer the branches whose condition holds right now.
///
/// Pushes nothing and returns `None` when no branch qualifies.
pub fn with_option<F>(
    state: &mut GameState,
    source: EntityId,
    choices: Vec<OptionChoice>,
    can_cancel: bool,
    then: F,
) -> Option<QueueItemId>
where
    F: FnOnce(&mut GameState, EntityId, String) -> EffectResult + 'static,
{
    let options: Vec<EffectOption> = choices
        .into_iter()
        .filter(|c| (c.condition)(state, source))
        .map(|c| EffectOption {
            value: c.name.clone(),
            name: c.name,
        })
        .collect();
    if options.is_empty() {
        trace!(card = %source, "no option available");
        return None;
    }
    let name = label(state, source, "choose");
    Some(
        state.queue.push(
            PendingStep::new(
                source,
                name,
                Step::Option {
                    options,
                    then: Box::new(then),
                },
            )
            .cancellable(can_cancel),
        ),
    )
}

/// Settings shared by the simple gate and pacing steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOptions {
    pub order: i32,
    pub message: Option<String>,
}

impl Default for StepOptions {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
            message: None,
        }
    }
}

impl StepOptions {
    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// A cancellable yes-gate; `then` runs only on confirmation.
pub fn with_user_confirm<F>(state: &mut GameState, source: EntityId, options: StepOptions, then: F) -> QueueItemId
where
    F: FnOnce(&mut GameState, EntityId) -> EffectResult + 'static,
{
    let name = options.message.unwrap_or_else(|| label(state, source, "confirm"));
    state.queue.push(
        PendingStep::new(source, name, Step::Confirm { then: Box::new(then) })
            .with_order(options.order)
            .cancellable(true),
    )
}

// === Summon ===

/// Settings for `with_user_summon`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummonOptions {
    /// Positions the player may choose from; the first is the default.
    pub positions: Vec<Position>,
    pub can_select_position: bool,
    /// Field monsters to release before the summon.
    pub need_release: usize,
    pub summon_type: SummonType,
    pub order: i32,
}

impl Default for SummonOptions {
    fn default() -> Self {
        Self {
            positions: vec![Position::Attack, Position::Defense],
            can_select_position: true,
            need_release: 0,
            summon_type: SummonType::Special,
            order: DEFAULT_ORDER,
        }
    }
}

impl SummonOptions {
    /// Summon in a fixed position.
    #[must_use]
    pub fn in_position(mut self, position: Position) -> Self {
        self.positions = vec![position];
        self.can_select_position = false;
        self
    }

    #[must_use]
    pub fn with_release(mut self, count: usize) -> Self {
        self.need_release = count;
        self
    }

    #[must_use]
    pub fn with_summon_type(mut self, summon_type: SummonType) -> Self {
        self.summon_type = summon_type;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }
}

fn push_summon_step<F>(state: &mut GameState, source: EntityId, monster: EntityId, options: SummonOptions, then: F)
where
    F: FnOnce(&mut GameState, EntityId, EntityId) -> EffectResult + 'static,
{
    let name = label(state, monster, "summon");
    state.queue.push(
        PendingStep::new(
            source,
            name,
            Step::Summon {
                monster,
                positions: options.positions,
                can_select_position: options.can_select_position,
                summon_type: options.summon_type,
                then: Box::new(then),
            },
        )
        .with_order(options.order),
    );
}

/// Summon `monster`, asking for zone and position.
///
/// With `need_release > 0` the player first picks exactly that many
/// field monsters (cancellable); they are released one step at a time
/// before the summon step is pushed. With auto-summon enabled and nothing
/// to release, the monster is placed at once in the default zone and
/// position. `then` receives `(state, source, monster)` after placement.
pub fn with_user_summon<F>(
    state: &mut GameState,
    source: EntityId,
    monster: EntityId,
    options: SummonOptions,
    then: F,
) -> EffectResult
where
    F: FnOnce(&mut GameState, EntityId, EntityId) -> EffectResult + 'static,
{
    if options.need_release > 0 {
        let count = options.need_release;
        with_user_select_card(
            state,
            source,
            move |state| CardSelector::new(state).field_monsters().excluding(monster).get(),
            SelectOptions::multi()
                .exactly(count)
                .with_message("select monsters to release")
                .cancellable(),
            move |state, source, selected| {
                let released = selected.clone();
                with_delay_recursive(
                    state,
                    source,
                    DelayOptions::default(),
                    selected.len(),
                    move |state, _, depth| release_card(state, released[depth - 1]),
                    move |state, source| {
                        push_summon_step(state, source, monster, options, then);
                        Ok(())
                    },
                )
            },
        );
        return Ok(());
    }

    if state.config.auto_summon {
        if let (Some(zone), Some(&position)) = (default_summon_zone(state, monster), options.positions.first()) {
            debug!(card = %monster, zone, "auto summon");
            summon(state, monster, zone, position, options.summon_type)?;
            return then(state, source, monster);
        }
    }
    push_summon_step(state, source, monster, options, then);
    Ok(())
}

// === Pacing ===

/// Settings for `with_delay`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelayOptions {
    /// Pause the presentation layer should insert, in milliseconds.
    pub delay_ms: u32,
    pub order: i32,
}

impl Default for DelayOptions {
    fn default() -> Self {
        Self {
            delay_ms: 100,
            order: DEFAULT_ORDER,
        }
    }
}

impl DelayOptions {
    #[must_use]
    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }
}

/// Push a pacing step; `then` runs when it resolves.
pub fn with_delay<F>(state: &mut GameState, source: EntityId, options: DelayOptions, then: F) -> QueueItemId
where
    F: FnOnce(&mut GameState, EntityId) -> EffectResult + 'static,
{
    state.queue.push(
        PendingStep::new(
            source,
            "delay",
            Step::Notify {
                notice: Notice::Delay,
                delay_ms: options.delay_ms,
                then: Some(Box::new(then)),
            },
        )
        .with_order(options.order),
    )
}

/// Run `per_step(state, source, depth)` for `depth, depth - 1, ..., 1`,
/// one delay step each, then `finally`.
///
/// With `depth == 0`, `finally` runs immediately.
pub fn with_delay_recursive<P, G>(
    state: &mut GameState,
    source: EntityId,
    options: DelayOptions,
    depth: usize,
    per_step: P,
    finally: G,
) -> EffectResult
where
    P: FnMut(&mut GameState, EntityId, usize) -> EffectResult + 'static,
    G: FnOnce(&mut GameState, EntityId) -> EffectResult + 'static,
{
    if depth == 0 {
        return finally(state, source);
    }
    with_delay(state, source, options, move |state, source| {
        let mut per_step = per_step;
        per_step(state, source, depth)?;
        with_delay_recursive(state, source, options, depth - 1, per_step, finally)
    });
    Ok(())
}

/// Show a message toast. `duration_ms` defaults to 2000.
pub fn with_notification(
    state: &mut GameState,
    source: EntityId,
    text: impl Into<String>,
    duration_ms: Option<u32>,
) -> QueueItemId {
    let duration_ms = duration_ms.unwrap_or(2000);
    state.queue.push(PendingStep::new(
        source,
        "notification",
        Step::Notify {
            notice: Notice::Message {
                text: text.into(),
                duration_ms,
            },
            delay_ms: duration_ms,
            then: None,
        },
    ))
}

/// Queue a life point change; applied when the step resolves.
pub fn with_life_change(state: &mut GameState, source: EntityId, amount: i64, change: LifeChange) -> QueueItemId {
    state.queue.push(PendingStep::new(
        source,
        "life change",
        Step::Notify {
            notice: Notice::Life { amount, change },
            delay_ms: 0,
            then: None,
        },
    ))
}

/// Life cost `payer` actually pays after every face-up modifier on the
/// field has rewritten `amount`.
#[must_use]
pub fn life_cost(state: &GameState, payer: EntityId, amount: i64) -> i64 {
    let field = &state.zones.field;
    field
        .monsters()
        .chain(field.spell_traps())
        .chain(field.field_zone)
        .filter(|c| state.card(*c).is_some_and(|i| i.is_face_up()))
        .filter_map(|c| state.definition(c).and_then(|d| d.effects.on_pay_life_cost).map(|h| (c, h)))
        .fold(amount, |cost, (modifier, hook)| hook(state, modifier, payer, cost))
}

/// Pay a life cost for `payer`; returns the amount actually queued.
pub fn pay_life_cost(state: &mut GameState, payer: EntityId, amount: i64) -> i64 {
    let cost = life_cost(state, payer, amount);
    if cost > 0 {
        with_life_change(state, payer, cost, LifeChange::Decrease);
    }
    debug!(card = %payer, requested = amount, cost, "life cost");
    cost
}

// === Chains ===

/// Cards able to respond to `activated` right now.
#[must_use]
pub fn chain_responders(state: &GameState, activated: EntityId) -> Vec<EntityId> {
    CardSelector::new(state)
        .field_monsters()
        .spell_traps()
        .hand()
        .excluding(activated)
        .filter(|s, c| {
            s.definition(c)
                .and_then(|d| d.effects.on_chain)
                .is_some_and(|r| (r.condition)(s, c, activated))
        })
        .get()
}

/// Offer a response window for `activated`.
///
/// When some card could respond, a chain-check step is pushed; answering
/// it with a responder runs that card's chain effect before `then`.
/// Otherwise `then(state, activated, None)` runs immediately.
pub fn with_chain_check<F>(state: &mut GameState, activated: EntityId, then: F) -> EffectResult
where
    F: FnOnce(&mut GameState, EntityId, Option<EntityId>) -> EffectResult + 'static,
{
    let chain = chain_responders(state, activated);
    if chain.is_empty() {
        return then(state, activated, None);
    }
    debug!(card = %activated, responders = chain.len(), "chain window");
    let name = label(state, activated, "chain");
    state.queue.push(PendingStep::new(
        activated,
        name,
        Step::ChainCheck {
            chain,
            then: Box::new(move |state, activated, responder| {
                if let Some(responder) = responder {
                    let response = state.definition(responder).and_then(|d| d.effects.on_chain);
                    if let Some(response) = response {
                        (response.effect)(state, responder, activated)?;
                    }
                }
                then(state, activated, responder)
            }),
        },
    ));
    Ok(())
}

// === Once per turn ===

fn once_key(state: &GameState, source: EntityId, key: Option<&str>) -> String {
    match (key, state.name_of(source)) {
        (Some(key), _) => key.to_string(),
        (None, Some(name)) => name.to_string(),
        (None, None) => source.to_string(),
    }
}

/// Evaluate `condition` unless the once-per-turn key is spent.
///
/// The key is `key` or, by default, the source card's name.
pub fn with_turn_at_once_condition(
    state: &GameState,
    source: EntityId,
    key: Option<&str>,
    condition: impl FnOnce(&GameState, EntityId) -> bool,
) -> bool {
    !state.is_turn_once_used(&once_key(state, source, key)) && condition(state, source)
}

/// Spend the once-per-turn key and run `effect`.
///
/// The key is marked before `effect` runs, so anything `effect` queues
/// already sees it spent. Returns `Ok(false)` without running `effect`
/// when the key was already spent this turn.
pub fn with_turn_at_once_effect(
    state: &mut GameState,
    source: EntityId,
    key: Option<&str>,
    effect: impl FnOnce(&mut GameState, EntityId) -> EffectResult,
) -> Result<bool, DuelError> {
    let key = once_key(state, source, key);
    if state.is_turn_once_used(&key) {
        debug!(card = %source, %key, "once-per-turn effect already used");
        return Ok(false);
    }
    state.mark_turn_once_used(key);
    effect(state, source)?;
    Ok(true)
}

/// Whether `card` is still where a continuation expects it.
#[must_use]
pub fn is_at(state: &GameState, card: EntityId, location: Location) -> bool {
    state.location_of(card) == Some(location)
}
