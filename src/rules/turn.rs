//! Turn and phase progression.
//!
//! The player's turn runs `Draw -> Standby -> Main1 -> End`. Leaving
//! `End` enters the opponent's turn at `Main1`; leaving the opponent's
//! turn starts the next player turn at `Draw`, clears every per-turn
//! restriction and draws a card.

use tracing::{debug, info};

use super::actions::{available_actions, run_activation};
use super::victory::{end_duel, judge_win, GameResult};
use crate::cards::Location;
use crate::core::{CardAction, EntityId, GameState, Phase};
use crate::effects::{with_delay_recursive, with_user_confirm, DelayOptions, StepOptions};
use crate::error::{DuelError, EffectResult};
use crate::zones::{send_card, Destination, Pile, SendOptions};

/// Draw the top card of the deck.
///
/// Drawing from an empty deck ends the duel with `GameResult::DeckOut`.
pub fn draw(state: &mut GameState) -> EffectResult {
    let Some(top) = state.zones.deck.front().copied() else {
        end_duel(state, GameResult::DeckOut);
        return Ok(());
    };
    send_card(state, top, Destination::Hand, SendOptions::default())?;
    debug!(card = %top, "drew");
    judge_win(state);
    Ok(())
}

/// Draw `count` cards by a card effect.
pub fn draw_by_effect(state: &mut GameState, count: usize) -> EffectResult {
    state.turn.has_drawn_by_effect = true;
    for _ in 0..count {
        draw(state)?;
        if state.is_over() {
            break;
        }
    }
    Ok(())
}

/// Set up a fresh duel: reset life points, shuffle the deck and queue the
/// opening hand one card per delay step. The duel opens in `Main1`.
pub fn initialize_game(state: &mut GameState) -> EffectResult {
    state.life_points = state.config.starting_life;
    state.opponent_life_points = state.config.starting_life;
    state.turn.turn = 1;
    state.turn.phase = Phase::Main1;
    state.turn.is_opponent_turn = false;
    state.result = None;
    state.reset_turn_restrictions();

    if state.config.shuffle_deck {
        let mut deck: Vec<EntityId> = state.zones.deck.iter().copied().collect();
        state.rng_mut().shuffle(&mut deck);
        state.zones.reorder(Pile::Deck, deck);
    }

    let hand = state.config.opening_hand_size();
    let seed = state.rng_mut().seed();
    info!(seed, hand, deck = state.zones.deck.len(), extra = state.zones.extra_deck.len(), "duel started");
    with_delay_recursive(
        state,
        EntityId::SYSTEM,
        DelayOptions::default(),
        hand,
        |state, _, _| draw(state),
        |_, _| Ok(()),
    )
}

/// Advance to the next phase.
///
/// Refused while steps are pending or after the duel has ended.
pub fn next_phase(state: &mut GameState) -> EffectResult {
    if state.is_over() {
        return Err(DuelError::GameOver);
    }
    if !state.queue.is_empty() {
        return Err(DuelError::QueueBusy);
    }

    if state.turn.is_opponent_turn {
        state.turn.is_opponent_turn = false;
        state.turn.turn += 1;
        state.turn.phase = Phase::Draw;
        state.reset_turn_restrictions();
        info!(turn = state.turn.turn, "player turn");
        return draw(state);
    }

    match state.turn.phase.next() {
        Some(phase) => {
            state.turn.phase = phase;
            info!(turn = state.turn.turn, %phase, "phase");
        }
        None => {
            state.turn.is_opponent_turn = true;
            state.turn.phase = Phase::Main1;
            info!(turn = state.turn.turn, "opponent turn");
            offer_pending_traps(state);
        }
    }
    Ok(())
}

/// Set traps that could be activated right now.
#[must_use]
pub fn pending_traps(state: &GameState) -> Vec<EntityId> {
    state
        .zones
        .field
        .spell_traps()
        .filter(|c| state.definition(*c).is_some_and(|d| d.is_trap()))
        .filter(|c| state.location_of(*c) == Some(Location::SpellField))
        .filter(|c| available_actions(state, *c).contains(&CardAction::Activate))
        .collect()
}

/// Offer each activatable set trap through a confirm step.
///
/// All confirms are queued up front at the same order, so a confirmed
/// trap's own steps wait behind the confirms still pending for later traps.
fn offer_pending_traps(state: &mut GameState) {
    for trap in pending_traps(state) {
        let message = match state.name_of(trap) {
            Some(name) => format!("{name}を発動しますか？"),
            None => "発動しますか？".to_string(),
        };
        with_user_confirm(state, trap, StepOptions::default().with_message(message), |state, trap| {
            // an earlier trap may have changed the board
            if available_actions(state, trap).contains(&CardAction::Activate) {
                run_activation(state, trap)
            } else {
                debug!(card = %trap, "trap no longer activatable");
                Ok(())
            }
        });
    }
}
