//! Turn and phase integration tests.
//!
//! These tests walk the phase machine, the per-turn resets and the
//! offer of set traps when the opponent's turn begins.

use exodia_drytron::cards::{Location, Position};
use exodia_drytron::core::{CardAction, DuelConfig, EntityId, GameState, Phase};
use exodia_drytron::error::DuelError;
use exodia_drytron::games::drytron_exodia::{card_registry, cards, spells};
use exodia_drytron::rules::{get_card_actions, next_phase, pending_traps, set_card, GameResult};
use exodia_drytron::stack::{QueueStatus, Resolution, StepKind};
use exodia_drytron::zones::Pile;

fn state() -> GameState {
    let mut state = GameState::new(DuelConfig::default(), card_registry().unwrap(), 13);
    state.turn.phase = Phase::Main1;
    state
}

/// Five graveyard monsters, two of them able to come back with 補充要員.
fn stocked_graveyard(state: &mut GameState) -> Vec<EntityId> {
    let mut returnable = Vec::new();
    for _ in 0..2 {
        returnable.push(state.spawn(cards::GENEX_CONTROLLER, Pile::Graveyard).unwrap());
    }
    for _ in 0..3 {
        state.spawn(cards::BAN_ALPHA, Pile::Graveyard).unwrap();
    }
    returnable
}

// =============================================================================
// Phase Machine
// =============================================================================

#[test]
fn test_full_round_resets_the_turn() {
    let mut state = state();
    for _ in 0..3 {
        state.spawn(cards::CANNON_DARUMA, Pile::Deck).unwrap();
    }
    state.turn.has_normal_summoned = true;
    state.turn.is_link_summon_prohibited = true;
    state.mark_turn_once_used("高等儀式術");

    next_phase(&mut state).unwrap();
    assert_eq!(state.turn.phase, Phase::End);
    next_phase(&mut state).unwrap();
    assert!(state.turn.is_opponent_turn);
    assert_eq!(state.turn.phase, Phase::Main1);

    next_phase(&mut state).unwrap();
    assert_eq!(state.turn.turn, 2);
    assert_eq!(state.turn.phase, Phase::Draw);
    assert!(!state.turn.is_opponent_turn);
    assert!(!state.turn.has_normal_summoned);
    assert!(!state.turn.is_link_summon_prohibited);
    assert!(!state.is_turn_once_used("高等儀式術"));
    assert_eq!(state.zones.hand.len(), 1);

    next_phase(&mut state).unwrap();
    assert_eq!(state.turn.phase, Phase::Standby);
    next_phase(&mut state).unwrap();
    assert_eq!(state.turn.phase, Phase::Main1);
}

#[test]
fn test_turn_start_draw_from_empty_deck_loses() {
    let mut state = state();
    state.turn.is_opponent_turn = true;
    next_phase(&mut state).unwrap();
    assert_eq!(state.result, Some(GameResult::DeckOut));
    assert_eq!(next_phase(&mut state), Err(DuelError::GameOver));
}

#[test]
fn test_nothing_offered_without_set_traps() {
    let mut state = state();
    state.turn.phase = Phase::End;
    next_phase(&mut state).unwrap();
    assert!(state.turn.is_opponent_turn);
    assert_eq!(state.queue_status(), QueueStatus::Complete);
}

// =============================================================================
// Set Traps
// =============================================================================

#[test]
fn test_trap_cannot_be_activated_the_turn_it_is_set() {
    let mut state = state();
    stocked_graveyard(&mut state);
    let trap = state.spawn(spells::BACKUP_SOLDIER, Pile::Hand).unwrap();
    assert!(get_card_actions(&state, trap).contains(&CardAction::Set));
    assert!(!get_card_actions(&state, trap).contains(&CardAction::Activate));

    set_card(&mut state, trap).unwrap();
    assert_eq!(state.location_of(trap), Some(Location::SpellField));
    assert_eq!(state.card(trap).unwrap().position, Some(Position::Back));
    assert!(!get_card_actions(&state, trap).contains(&CardAction::Activate));
    assert!(pending_traps(&state).is_empty());
}

#[test]
fn test_set_trap_is_offered_in_the_opponent_turn() {
    let mut state = state();
    let returnable = stocked_graveyard(&mut state);
    let trap = state.spawn(spells::BACKUP_SOLDIER, Pile::Hand).unwrap();
    set_card(&mut state, trap).unwrap();

    state.turn.phase = Phase::End;
    next_phase(&mut state).unwrap();
    assert_eq!(state.queue_status(), QueueStatus::WaitingForInput(StepKind::Confirm));
    assert!(state.queue.front().unwrap().label.contains("補充要員"));

    state.process_queue_top(Resolution::Confirm).unwrap();
    assert_eq!(state.card(trap).unwrap().position, Some(Position::Attack));
    assert_eq!(state.queue_status(), QueueStatus::WaitingForInput(StepKind::MultiSelect));
    let mut offered = state.front_candidates();
    offered.sort();
    assert_eq!(offered, returnable);

    state.process_queue_top(Resolution::Cards(returnable.clone())).unwrap();
    state.settle().unwrap();
    for card in &returnable {
        assert_eq!(state.location_of(*card), Some(Location::Hand));
    }
    assert_eq!(state.location_of(trap), Some(Location::Graveyard));
    assert!(state.queue.is_empty());
}

#[test]
fn test_second_trap_is_offered_before_the_first_resolves() {
    let mut state = state();
    let returnable = stocked_graveyard(&mut state);
    for _ in 0..2 {
        let trap = state.spawn(spells::BACKUP_SOLDIER, Pile::Hand).unwrap();
        set_card(&mut state, trap).unwrap();
    }

    state.turn.phase = Phase::End;
    next_phase(&mut state).unwrap();
    let offered: Vec<EntityId> = state.queue.iter().map(|item| item.source).collect();
    assert_eq!(offered.len(), 2);
    let (first, second) = (offered[0], offered[1]);

    state.process_queue_top(Resolution::Confirm).unwrap();
    assert_eq!(state.card(first).unwrap().position, Some(Position::Attack));
    let front = state.queue.front().unwrap();
    assert_eq!(front.kind(), StepKind::Confirm);
    assert_eq!(front.source, second);
    let steps: Vec<(StepKind, EntityId)> = state.queue.iter().map(|item| (item.kind(), item.source)).collect();
    let pending_confirm = steps.iter().position(|s| *s == (StepKind::Confirm, second));
    let first_select = steps.iter().position(|s| *s == (StepKind::MultiSelect, first));
    assert!(pending_confirm.unwrap() < first_select.unwrap());

    state.process_queue_top(Resolution::Confirm).unwrap();
    assert_eq!(state.queue_status(), QueueStatus::WaitingForInput(StepKind::MultiSelect));
    assert_eq!(state.queue.front().unwrap().source, first);

    state.process_queue_top(Resolution::Cards(vec![returnable[0]])).unwrap();
    assert_eq!(state.settle().unwrap(), QueueStatus::WaitingForInput(StepKind::MultiSelect));
    assert_eq!(state.queue.front().unwrap().source, second);
    state.process_queue_top(Resolution::Cards(vec![returnable[1]])).unwrap();
    state.settle().unwrap();

    for card in &returnable {
        assert_eq!(state.location_of(*card), Some(Location::Hand));
    }
    assert_eq!(state.location_of(first), Some(Location::Graveyard));
    assert_eq!(state.location_of(second), Some(Location::Graveyard));
    assert!(state.queue.is_empty());
}

#[test]
fn test_declined_trap_stays_set_and_can_be_activated_later() {
    let mut state = state();
    stocked_graveyard(&mut state);
    let trap = state.spawn(spells::BACKUP_SOLDIER, Pile::Hand).unwrap();
    set_card(&mut state, trap).unwrap();

    state.turn.phase = Phase::End;
    next_phase(&mut state).unwrap();
    state.pop_queue().unwrap();
    assert_eq!(state.card(trap).unwrap().position, Some(Position::Back));
    assert!(get_card_actions(&state, trap).contains(&CardAction::Activate));

    exodia_drytron::rules::activate_spell(&mut state, trap).unwrap();
    assert_eq!(state.queue_status(), QueueStatus::WaitingForInput(StepKind::MultiSelect));
}

#[test]
fn test_trap_selection_is_limited_to_three() {
    let mut state = state();
    let mut returnable = Vec::new();
    for _ in 0..5 {
        returnable.push(state.spawn(cards::CANNON_DARUMA, Pile::Graveyard).unwrap());
    }
    let trap = state.spawn(spells::BACKUP_SOLDIER, Pile::Hand).unwrap();
    set_card(&mut state, trap).unwrap();
    state.turn.phase = Phase::End;
    next_phase(&mut state).unwrap();
    state.process_queue_top(Resolution::Confirm).unwrap();

    let four = state.process_queue_top(Resolution::Cards(returnable[..4].to_vec()));
    assert!(matches!(four, Err(DuelError::InvalidSelection(_))));
    state.process_queue_top(Resolution::Cards(returnable[..3].to_vec())).unwrap();
    state.settle().unwrap();
    assert_eq!(state.zones.hand.len(), 3);
    assert_eq!(state.zones.graveyard.len(), 3);
}
