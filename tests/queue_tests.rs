//! Effect queue integration tests.
//!
//! These tests verify ordering, validation, cancellation and the
//! once-per-turn memo as seen through `process_queue_top` / `pop_queue`.

use std::cell::RefCell;
use std::rc::Rc;

use exodia_drytron::cards::{Location, Position};
use exodia_drytron::core::{DuelConfig, EntityId, GameState, Phase};
use exodia_drytron::effects::{
    with_delay, with_notification, with_option, with_turn_at_once_effect, with_user_confirm,
    with_user_select_card, CardSelector, DelayOptions, OptionChoice, SelectOptions, StepOptions,
};
use exodia_drytron::error::DuelError;
use exodia_drytron::games::drytron_exodia::{card_registry, cards};
use exodia_drytron::stack::{Notice, QueueStatus, Resolution, Step, StepKind};
use exodia_drytron::zones::Pile;

fn state() -> GameState {
    let mut state = GameState::new(DuelConfig::default(), card_registry().unwrap(), 21);
    state.turn.phase = Phase::Main1;
    state
}

type Trace = Rc<RefCell<Vec<i32>>>;

fn traced_delay(state: &mut GameState, trace: &Trace, order: i32, mark: i32) {
    let trace = Rc::clone(trace);
    with_delay(state, EntityId::SYSTEM, DelayOptions::default().with_order(order), move |_, _| {
        trace.borrow_mut().push(mark);
        Ok(())
    });
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn test_lower_order_resolves_first() {
    let mut state = state();
    let trace = Trace::default();
    traced_delay(&mut state, &trace, 999, 3);
    traced_delay(&mut state, &trace, 1, 2);
    traced_delay(&mut state, &trace, -1, 1);

    let orders: Vec<i32> = state.queue.iter().map(|item| item.order).collect();
    assert_eq!(orders, vec![-1, 1, 999]);
    state.settle().unwrap();
    assert_eq!(*trace.borrow(), vec![1, 2, 3]);
}

#[test]
fn test_equal_orders_keep_insertion_order() {
    let mut state = state();
    let trace = Trace::default();
    for mark in 1..=4 {
        traced_delay(&mut state, &trace, 1, mark);
    }
    state.settle().unwrap();
    assert_eq!(*trace.borrow(), vec![1, 2, 3, 4]);
}

#[test]
fn test_continuation_steps_join_by_order() {
    let mut state = state();
    let trace = Trace::default();
    let inner = Rc::clone(&trace);
    with_delay(&mut state, EntityId::SYSTEM, DelayOptions::default(), move |state, _| {
        inner.borrow_mut().push(1);
        traced_delay(state, &inner, 0, 2);
        Ok(())
    });
    traced_delay(&mut state, &trace, 1, 3);

    state.settle().unwrap();
    assert_eq!(*trace.borrow(), vec![1, 2, 3]);
}

#[test]
fn test_settle_stops_at_input() {
    let mut state = state();
    let trace = Trace::default();
    traced_delay(&mut state, &trace, 1, 1);
    with_user_confirm(&mut state, EntityId::SYSTEM, StepOptions::default(), |_, _| Ok(()));
    traced_delay(&mut state, &trace, 1, 2);

    let status = state.settle().unwrap();
    assert_eq!(status, QueueStatus::WaitingForInput(StepKind::Confirm));
    assert_eq!(*trace.borrow(), vec![1]);
    assert_eq!(state.queue.len(), 2);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_invalid_resolution_leaves_front_in_place() {
    let mut state = state();
    let a = state.spawn(cards::GENEX_CONTROLLER, Pile::Hand).unwrap();
    let deck_card = state.spawn(cards::GENEX_CONTROLLER, Pile::Deck).unwrap();
    with_user_select_card(
        &mut state,
        a,
        |s| CardSelector::new(s).hand().get(),
        SelectOptions::single(),
        |state, _, selected| {
            state.turn.set_flag("picked", i64::from(selected[0].raw()));
            Ok(())
        },
    );

    let wrong_kind = state.process_queue_top(Resolution::Confirm);
    assert!(matches!(wrong_kind, Err(DuelError::ResolutionMismatch { .. })));
    let not_candidate = state.process_queue_top(Resolution::Cards(vec![deck_card]));
    assert!(matches!(not_candidate, Err(DuelError::InvalidSelection(_))));
    let too_many = state.process_queue_top(Resolution::Cards(vec![a, a]));
    assert!(matches!(too_many, Err(DuelError::InvalidSelection(_))));
    assert_eq!(state.queue.len(), 1);

    state.process_queue_top(Resolution::Cards(vec![a])).unwrap();
    assert_eq!(state.turn.get_flag("picked", -1), i64::from(a.raw()));
    assert!(state.queue.is_empty());
}

#[test]
fn test_summon_step_rejects_unavailable_zone() {
    let mut state = state();
    let monster = state.spawn(cards::GENEX_CONTROLLER, Pile::Hand).unwrap();
    exodia_drytron::effects::with_user_summon(
        &mut state,
        monster,
        monster,
        exodia_drytron::effects::SummonOptions::default(),
        |_, _, _| Ok(()),
    )
    .unwrap();

    let extra_zone = state.process_queue_top(Resolution::Summon {
        zone: 5,
        position: Position::Attack,
    });
    assert!(matches!(extra_zone, Err(DuelError::InvalidSelection(_))));
    let face_down = state.process_queue_top(Resolution::Summon {
        zone: 0,
        position: Position::Back,
    });
    assert!(matches!(face_down, Err(DuelError::InvalidSelection(_))));

    state
        .process_queue_top(Resolution::Summon {
            zone: 0,
            position: Position::Defense,
        })
        .unwrap();
    assert_eq!(state.location_of(monster), Some(Location::MonsterField));
}

#[test]
fn test_empty_queue_errors() {
    let mut state = state();
    assert_eq!(state.process_queue_top(Resolution::Delay), Err(DuelError::EmptyQueue));
    assert_eq!(state.pop_queue(), Err(DuelError::EmptyQueue));
    assert_eq!(state.queue_status(), QueueStatus::Complete);
}

// =============================================================================
// Cancellation
// =============================================================================

#[test]
fn test_only_cancellable_steps_pop() {
    let mut state = state();
    with_delay(&mut state, EntityId::SYSTEM, DelayOptions::default(), |_, _| Ok(()));
    assert_eq!(state.pop_queue(), Err(DuelError::NotCancellable));
    assert_eq!(state.queue.len(), 1);

    state.clear_queue();
    with_user_select_card(
        &mut state,
        EntityId::SYSTEM,
        |_| Vec::new(),
        SelectOptions::single().cancellable(),
        |state, _, _| {
            state.life_points = 0;
            Ok(())
        },
    );
    state.pop_queue().unwrap();
    assert!(state.queue.is_empty());
    assert_eq!(state.life_points, 8000);
}

#[test]
fn test_cancel_keeps_paid_costs() {
    let mut state = state();
    let cost = state.spawn(cards::CANNON_DARUMA, Pile::Hand).unwrap();
    with_user_select_card(
        &mut state,
        EntityId::SYSTEM,
        |s| CardSelector::new(s).hand().get(),
        SelectOptions::single(),
        |state, source, selected| {
            for card in selected {
                exodia_drytron::zones::send_card(
                    state,
                    card,
                    exodia_drytron::zones::Destination::Graveyard,
                    Default::default(),
                )?;
            }
            with_user_confirm(state, source, StepOptions::default(), |state, _| {
                state.opponent_life_points = 0;
                Ok(())
            });
            Ok(())
        },
    );
    state.process_queue_top(Resolution::Cards(vec![cost])).unwrap();
    state.pop_queue().unwrap();

    assert_eq!(state.location_of(cost), Some(Location::Graveyard));
    assert_eq!(state.opponent_life_points, 8000);
}

// =============================================================================
// Options, Notices and Once Per Turn
// =============================================================================

#[test]
fn test_option_step_passes_chosen_value() {
    let mut state = state();
    with_option(
        &mut state,
        EntityId::SYSTEM,
        vec![OptionChoice::always("heal"), OptionChoice::always("burn")],
        true,
        |state, _, chosen| {
            if chosen == "burn" {
                state.opponent_life_points -= 500;
            }
            Ok(())
        },
    );
    match &state.queue.front().unwrap().step {
        Step::Option { options, .. } => assert_eq!(options.len(), 2),
        other => panic!("unexpected step {:?}", other.kind()),
    }
    state.process_queue_top(Resolution::Option("burn".into())).unwrap();
    assert_eq!(state.opponent_life_points, 7500);
}

#[test]
fn test_notification_carries_text() {
    let mut state = state();
    with_notification(&mut state, EntityId::SYSTEM, "エクゾディア!", None);
    match &state.queue.front().unwrap().step {
        Step::Notify {
            notice: Notice::Message { text, duration_ms },
            ..
        } => {
            assert_eq!(text, "エクゾディア!");
            assert_eq!(*duration_ms, 2000);
        }
        other => panic!("unexpected step {:?}", other.kind()),
    }
    assert_eq!(state.settle().unwrap(), QueueStatus::Complete);
}

#[test]
fn test_once_per_turn_is_marked_before_queued_steps_run() {
    let mut state = state();
    let card = state.spawn(cards::BAN_ALPHA, Pile::Hand).unwrap();
    let ran = with_turn_at_once_effect(&mut state, card, None, |state, card| {
        with_user_confirm(state, card, StepOptions::default(), |_, _| Ok(()));
        Ok(())
    })
    .unwrap();
    assert!(ran);
    assert!(state.is_turn_once_used("竜輝巧－バンα"));

    let again = with_turn_at_once_effect(&mut state, card, None, |_, _| Ok(())).unwrap();
    assert!(!again);
    assert_eq!(state.queue.len(), 1);

    // cancelling the queued step does not give the use back
    state.pop_queue().unwrap();
    assert!(state.is_turn_once_used("竜輝巧－バンα"));
}
