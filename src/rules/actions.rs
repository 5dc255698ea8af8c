//! Player action surface.
//!
//! `get_card_actions` decides which buttons a card shows; the entry
//! points below re-check the same availability before committing, so a
//! stale UI cannot perform an action the rules no longer allow.
//!
//! ## Activation
//!
//! Activating a spell or trap places it face-up, pushes it onto the
//! activation chain and opens a chain window. If a responder answers the
//! window, the activation is negated and the card destroyed. Otherwise
//! its effect runs, and a cleanup step at order 999 (`resolve_spell`)
//! sends spells and traps that do not stay on the field to the graveyard
//! once everything the effect queued has resolved.

use tracing::{debug, info, warn};

use super::combination::{
    is_valid_material_set, material_candidates, search_combination_link_summon, search_combination_synchro_summon,
    search_combination_xyz_summon,
};
use super::summon::{can_normal_summon, can_set_spell_trap, find_empty_spell_trap_zone, tribute_count};
use crate::cards::{CardKind, Location, MonsterType, Position, SpellKind, SummonType, TrapKind};
use crate::core::{CardAction, CardActions, EntityId, GameState, Phase};
use crate::effects::{
    with_chain_check, with_delay, with_delay_recursive, with_user_select_card, with_user_summon, DelayOptions,
    SelectOptions, SummonOptions,
};
use crate::error::{DuelError, EffectResult};
use crate::zones::{attach_material, destroy_by_effect, send_card, Destination, SendOptions};

/// Order of the cleanup step that retires a resolved spell.
pub const SPELL_END_ORDER: i32 = 999;
/// Order of the material selection step of extra deck summons.
pub const MATERIAL_SELECT_ORDER: i32 = 0;
/// Order of the summon step of extra deck summons.
pub const EXTRA_SUMMON_ORDER: i32 = 5;

/// Actions `card` offers, ignoring whether the queue is busy.
#[must_use]
pub fn available_actions(state: &GameState, card: EntityId) -> CardActions {
    let mut actions = CardActions::new();
    let (Some(instance), Some(definition)) = (state.card(card), state.definition(card)) else {
        return actions;
    };
    let main_phase = state.turn.phase == Phase::Main1 && !state.turn.is_opponent_turn;

    if definition.is_monster() && can_normal_summon(state, card) {
        actions.push(CardAction::Summon);
    }

    let spell_condition = definition.effects.on_spell.is_some_and(|a| (a.condition)(state, card));
    let activatable = match definition.kind {
        CardKind::Spell(kind) => {
            let set_here = matches!(instance.location, Location::SpellField | Location::FieldZone)
                && instance.position == Some(Position::Back);
            let room = set_here || kind == SpellKind::Field || find_empty_spell_trap_zone(state).is_some();
            spell_condition
                && room
                && instance.position != Some(Position::Attack)
                && matches!(instance.location, Location::Hand | Location::SpellField | Location::FieldZone)
                && !(kind == SpellKind::Field && state.turn.is_field_spell_activation_prohibited)
                && main_phase
        }
        CardKind::Trap(_) => {
            spell_condition
                && instance.location == Location::SpellField
                && instance.position == Some(Position::Back)
                && instance.set_turn.is_some_and(|set| set < state.turn.stamp())
        }
        CardKind::Monster(_) => false,
    };
    if activatable {
        actions.push(CardAction::Activate);
    }

    if can_set_spell_trap(state, card) {
        actions.push(CardAction::Set);
    }

    let ignition = definition.effects.on_ignition.is_some_and(|a| (a.condition)(state, card));
    if ignition && main_phase {
        actions.push(CardAction::Effect);
    }
    actions
}

/// Actions `card` offers right now; empty while steps are pending or
/// once the duel is over.
#[must_use]
pub fn get_card_actions(state: &GameState, card: EntityId) -> CardActions {
    if !state.queue.is_empty() || state.is_over() {
        return CardActions::new();
    }
    available_actions(state, card)
}

fn require(state: &GameState, card: EntityId, action: CardAction) -> EffectResult {
    if state.is_over() {
        return Err(DuelError::GameOver);
    }
    if !state.queue.is_empty() {
        return Err(DuelError::QueueBusy);
    }
    if !available_actions(state, card).contains(&action) {
        warn!(card = %card, action = action.name(), "action not available");
        return Err(DuelError::IllegalAction {
            card,
            action: action.name(),
        });
    }
    Ok(())
}

/// Normal summon `card` from the hand, releasing monsters for level 5+.
pub fn normal_summon(state: &mut GameState, card: EntityId) -> EffectResult {
    require(state, card, CardAction::Summon)?;
    state.record_action(CardAction::Summon, card);
    let tributes = tribute_count(state.level_of(card).unwrap_or(0));
    info!(card = %card, tributes, "normal summon");
    let mut options = SummonOptions::default()
        .with_release(tributes)
        .with_summon_type(SummonType::Normal);
    options.positions = vec![Position::Attack, Position::BackDefense];
    with_user_summon(state, card, card, options, |_, _, _| Ok(()))
}

/// Set a spell or trap face-down, remembering when it was set.
pub fn set_card(state: &mut GameState, card: EntityId) -> EffectResult {
    require(state, card, CardAction::Set)?;
    state.record_action(CardAction::Set, card);
    let to = match state.definition(card).and_then(|d| d.spell_kind()) {
        Some(SpellKind::Field) => Destination::FieldZone,
        _ => Destination::SpellField,
    };
    send_card(state, card, to, SendOptions::face_down())?;
    let stamp = state.turn.stamp();
    if let Some(c) = state.card_mut(card) {
        c.set_turn = Some(stamp);
    }
    info!(card = %card, turn = stamp.turn, "set");
    Ok(())
}

/// Activate a spell from the hand or a set spell/trap.
pub fn activate_spell(state: &mut GameState, card: EntityId) -> EffectResult {
    require(state, card, CardAction::Activate)?;
    run_activation(state, card)
}

/// Activate `card` without re-checking availability.
pub(crate) fn run_activation(state: &mut GameState, card: EntityId) -> EffectResult {
    let definition = state.definition(card).ok_or(DuelError::IllegalAction {
        card,
        action: CardAction::Activate.name(),
    })?;
    let activation = definition.effects.on_spell.ok_or(DuelError::IllegalAction {
        card,
        action: CardAction::Activate.name(),
    })?;
    let is_field_spell = definition.spell_kind() == Some(SpellKind::Field);

    state.record_action(CardAction::Activate, card);
    match state.location_of(card) {
        Some(Location::Hand) if is_field_spell => {
            send_card(state, card, Destination::FieldZone, SendOptions::default())?;
        }
        Some(Location::Hand) => send_card(state, card, Destination::SpellField, SendOptions::default())?,
        _ => {
            if let Some(c) = state.card_mut(card) {
                c.position = Some(Position::Attack);
            }
        }
    }
    if let Some(c) = state.card_mut(card) {
        c.is_activating = true;
    }
    state.card_chain.push(card);
    info!(card = %card, "activated");

    with_chain_check(state, card, move |state, card, responder| {
        if let Some(responder) = responder {
            return negate(state, card, responder);
        }
        (activation.effect)(state, card)?;
        with_delay(
            state,
            card,
            DelayOptions::default().with_order(SPELL_END_ORDER),
            |state, card| resolve_spell(state, card),
        );
        Ok(())
    })
}

fn negate(state: &mut GameState, card: EntityId, responder: EntityId) -> EffectResult {
    info!(card = %card, responder = %responder, "activation negated");
    state.card_chain.retain(|c| *c != card);
    if let Some(c) = state.card_mut(card) {
        c.is_activating = false;
    }
    let on_board = state
        .location_of(card)
        .is_some_and(|l| l.is_field() || l == Location::Hand);
    if on_board {
        destroy_by_effect(state, card, Destination::Graveyard)?;
    }
    Ok(())
}

/// Finish an activation: drop the card from the chain and send it to the
/// graveyard unless it is a continuous, field or equip spell or a
/// continuous trap.
pub fn resolve_spell(state: &mut GameState, card: EntityId) -> EffectResult {
    state.card_chain.retain(|c| *c != card);
    let stays = match state.definition(card).map(|d| &d.kind) {
        Some(CardKind::Spell(kind)) => kind.stays_on_field(),
        Some(CardKind::Trap(kind)) => *kind == TrapKind::Continuous,
        _ => true,
    };
    if let Some(c) = state.card_mut(card) {
        c.is_activating = false;
    }
    if !stays && state.location_of(card) == Some(Location::SpellField) {
        debug!(card = %card, "spell resolved");
        send_card(state, card, Destination::Graveyard, SendOptions::default())?;
    }
    Ok(())
}

/// Activate the ignition effect of `card`.
pub fn activate_effect(state: &mut GameState, card: EntityId) -> EffectResult {
    require(state, card, CardAction::Effect)?;
    let activation = state
        .definition(card)
        .and_then(|d| d.effects.on_ignition)
        .ok_or(DuelError::IllegalAction {
            card,
            action: CardAction::Effect.name(),
        })?;
    state.record_action(CardAction::Effect, card);
    info!(card = %card, "effect activated");
    with_chain_check(state, card, move |state, card, responder| match responder {
        Some(responder) => negate(state, card, responder),
        None => (activation.effect)(state, card),
    })
}

// === Extra deck summons ===

fn extra_summon_ready(state: &GameState, monster: EntityId, found: bool) -> bool {
    found
        && state.turn.phase == Phase::Main1
        && !state.turn.is_opponent_turn
        && state.location_of(monster) == Some(Location::ExtraDeck)
}

fn require_extra_summon(state: &GameState, monster: EntityId, found: Option<Vec<EntityId>>) -> EffectResult {
    if state.is_over() {
        return Err(DuelError::GameOver);
    }
    if !state.queue.is_empty() {
        return Err(DuelError::QueueBusy);
    }
    if !extra_summon_ready(state, monster, found.is_some()) {
        warn!(card = %monster, "extra deck summon not available");
        return Err(DuelError::IllegalAction {
            card: monster,
            action: "be summoned from the extra deck",
        });
    }
    Ok(())
}

fn select_materials<F>(state: &mut GameState, monster: EntityId, then: F)
where
    F: FnOnce(&mut GameState, EntityId, Vec<EntityId>) -> EffectResult + 'static,
{
    let message = match state.name_of(monster) {
        Some(name) => format!("{name}の素材を選択してください"),
        None => "素材を選択してください".to_string(),
    };
    with_user_select_card(
        state,
        monster,
        move |state| material_candidates(state, monster),
        SelectOptions::multi()
            .with_condition(move |state, selected| is_valid_material_set(state, monster, selected))
            .with_order(MATERIAL_SELECT_ORDER)
            .with_message(message)
            .cancellable(),
        then,
    );
}

/// Send the materials to the graveyard one step at a time, then summon
/// in attack position.
fn summon_over_graveyard_materials(
    state: &mut GameState,
    monster: EntityId,
    materials: Vec<EntityId>,
    summon_type: SummonType,
) -> EffectResult {
    let count = materials.len();
    with_delay_recursive(
        state,
        monster,
        DelayOptions::default(),
        count,
        move |state, _, depth| send_card(state, materials[depth - 1], Destination::Graveyard, SendOptions::default()),
        move |state, monster| {
            with_user_summon(
                state,
                monster,
                monster,
                SummonOptions::default()
                    .in_position(Position::Attack)
                    .with_summon_type(summon_type)
                    .with_order(EXTRA_SUMMON_ORDER),
                |_, _, _| Ok(()),
            )
        },
    )
}

/// Link summon `link` from the extra deck.
pub fn start_link_summon(state: &mut GameState, link: EntityId) -> EffectResult {
    let found = search_combination_link_summon(state, link);
    require_extra_summon(state, link, found)?;
    info!(card = %link, "link summon");
    select_materials(state, link, |state, link, materials| {
        summon_over_graveyard_materials(state, link, materials, SummonType::Link)
    });
    Ok(())
}

/// Synchro summon `synchro` from the extra deck.
pub fn start_synchro_summon(state: &mut GameState, synchro: EntityId) -> EffectResult {
    let found = search_combination_synchro_summon(state, synchro);
    require_extra_summon(state, synchro, found)?;
    info!(card = %synchro, "synchro summon");
    select_materials(state, synchro, |state, synchro, materials| {
        summon_over_graveyard_materials(state, synchro, materials, SummonType::Synchro)
    });
    Ok(())
}

/// Xyz summon `xyz` from the extra deck. The chosen materials are
/// attached to it before it is placed.
pub fn start_xyz_summon(state: &mut GameState, xyz: EntityId) -> EffectResult {
    let found = search_combination_xyz_summon(state, xyz);
    require_extra_summon(state, xyz, found)?;
    info!(card = %xyz, "xyz summon");
    select_materials(state, xyz, |state, xyz, materials| {
        for material in materials {
            attach_material(state, xyz, material)?;
        }
        with_user_summon(
            state,
            xyz,
            xyz,
            SummonOptions::default()
                .with_summon_type(SummonType::Xyz)
                .with_order(EXTRA_SUMMON_ORDER),
            |_, _, _| Ok(()),
        )
    });
    Ok(())
}

/// Whether `monster` can currently be summoned from the extra deck by
/// its own summon procedure.
#[must_use]
pub fn can_extra_summon(state: &GameState, monster: EntityId) -> bool {
    let found = match state.definition(monster).and_then(|d| d.monster_type()) {
        Some(MonsterType::Link) => search_combination_link_summon(state, monster),
        Some(MonsterType::Xyz) => search_combination_xyz_summon(state, monster),
        Some(MonsterType::Synchro) => search_combination_synchro_summon(state, monster),
        _ => None,
    };
    state.queue.is_empty() && !state.is_over() && extra_summon_ready(state, monster, found.is_some())
}
