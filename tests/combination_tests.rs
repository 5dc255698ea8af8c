//! Extra deck material search integration tests.
//!
//! These tests verify which material sets the combination search finds
//! for link, synchro and Xyz monsters, and the summon procedures built on
//! top of it.

use exodia_drytron::cards::{
    CardDefinition, CardId, Element, LinkArrow, Location, MonsterStats, MonsterType, Position, Race, SummonType,
};
use exodia_drytron::core::{DuelConfig, EntityId, GameState, Phase};
use exodia_drytron::error::DuelError;
use exodia_drytron::games::drytron_exodia::{card_registry, cards, extra};
use exodia_drytron::rules::{
    activate_effect, can_extra_summon, is_valid_material_set, pointed_zones, search_combination_link_summon,
    search_combination_synchro_summon, search_combination_xyz_summon, start_link_summon, start_xyz_summon,
    MATERIAL_SELECT_ORDER,
};
use exodia_drytron::stack::{QueueStatus, Resolution, StepKind};
use exodia_drytron::zones::{summon, Pile};

fn state() -> GameState {
    let mut state = GameState::new(DuelConfig::default(), card_registry().unwrap(), 5);
    state.turn.phase = Phase::Main1;
    state
}

const WARRIOR: CardId = CardId(900);
const TWO_MONSTERS_LINK: CardId = CardId(901);
const TWO_LEVEL_FOUR_LINK: CardId = CardId(902);

fn any_monster(state: &GameState, card: EntityId) -> bool {
    state.definition(card).is_some_and(|d| d.is_monster())
}

fn level_four(state: &GameState, card: EntityId) -> bool {
    state.level_of(card) == Some(4)
}

fn two_monsters(_: &GameState, materials: &[EntityId]) -> bool {
    materials.len() == 2
}

/// The duel registry plus a level 4 vanilla and two plain link-2 monsters.
fn generic_state() -> GameState {
    let mut registry = card_registry().unwrap();
    registry
        .register(CardDefinition::monster(
            WARRIOR,
            "切り込み隊長",
            MonsterStats::new(MonsterType::Normal, Element::Earth, Race::Warrior, 4, 1200, 400),
        ))
        .unwrap();
    registry
        .register(CardDefinition::monster(
            TWO_MONSTERS_LINK,
            "モンスター２体",
            MonsterStats::link(Element::Earth, Race::Warrior, 1600, &[LinkArrow::Left, LinkArrow::Right])
                .with_materials(any_monster, two_monsters),
        ))
        .unwrap();
    registry
        .register(CardDefinition::monster(
            TWO_LEVEL_FOUR_LINK,
            "レベル４モンスター２体",
            MonsterStats::link(Element::Earth, Race::Warrior, 1600, &[LinkArrow::Left, LinkArrow::Right])
                .with_materials(level_four, two_monsters),
        ))
        .unwrap();
    let mut state = GameState::new(DuelConfig::default(), registry, 5);
    state.turn.phase = Phase::Main1;
    state
}

/// Spawn `card` in the hand and special summon it face-up to `zone`.
fn on_field(state: &mut GameState, card: CardId, zone: usize) -> EntityId {
    let id = state.spawn(card, Pile::Hand).unwrap();
    summon(state, id, zone, Position::Attack, SummonType::Special).unwrap();
    id
}

// =============================================================================
// Link
// =============================================================================

#[test]
fn test_barricadeborg_takes_two_different_names() {
    let mut state = state();
    let borg = state.spawn(extra::BARRICADEBORG, Pile::ExtraDeck).unwrap();
    let controller = on_field(&mut state, cards::GENEX_CONTROLLER, 0);
    let daruma = on_field(&mut state, cards::CANNON_DARUMA, 1);

    assert_eq!(search_combination_link_summon(&state, borg), Some(vec![controller, daruma]));
    assert!(can_extra_summon(&state, borg));
}

#[test]
fn test_same_names_are_not_enough() {
    let mut state = state();
    let borg = state.spawn(extra::BARRICADEBORG, Pile::ExtraDeck).unwrap();
    on_field(&mut state, cards::CANNON_DARUMA, 0);
    on_field(&mut state, cards::CANNON_DARUMA, 1);

    assert_eq!(search_combination_link_summon(&state, borg), None);
    assert!(!can_extra_summon(&state, borg));
}

#[test]
fn test_linkuriboh_needs_level_one() {
    let mut state = state();
    let linkuriboh = state.spawn(extra::LINKURIBOH, Pile::ExtraDeck).unwrap();
    on_field(&mut state, cards::CANNON_DARUMA, 0);
    assert_eq!(search_combination_link_summon(&state, linkuriboh), None);

    let arm = on_field(&mut state, cards::RIGHT_ARM, 1);
    assert_eq!(search_combination_link_summon(&state, linkuriboh), Some(vec![arm]));
}

#[test]
fn test_prohibited_link_summon_finds_nothing() {
    let mut state = state();
    let linkuriboh = state.spawn(extra::LINKURIBOH, Pile::ExtraDeck).unwrap();
    on_field(&mut state, cards::RIGHT_ARM, 0);
    state.turn.is_link_summon_prohibited = true;

    assert_eq!(search_combination_link_summon(&state, linkuriboh), None);
    assert!(!can_extra_summon(&state, linkuriboh));
}

#[test]
fn test_link_arrows_decide_the_zone() {
    let mut state = state();
    let borg = state.spawn(extra::BARRICADEBORG, Pile::ExtraDeck).unwrap();
    let linkuriboh = state.spawn(extra::LINKURIBOH, Pile::ExtraDeck).unwrap();
    summon(&mut state, linkuriboh, 5, Position::Attack, SummonType::Link).unwrap();
    let controller = on_field(&mut state, cards::GENEX_CONTROLLER, 1);
    let daruma = on_field(&mut state, cards::CANNON_DARUMA, 3);
    let arm = on_field(&mut state, cards::RIGHT_ARM, 4);

    assert_eq!(pointed_zones(&state, &state.zones.field.monster_grid()), vec![1]);
    // the only pointed zone stays occupied
    assert!(!is_valid_material_set(&state, borg, &[daruma, arm]));
    // releasing the occupant frees the pointed zone
    assert!(is_valid_material_set(&state, borg, &[controller, daruma]));
    assert_eq!(search_combination_link_summon(&state, borg), Some(vec![controller, daruma]));
}

#[test]
fn test_two_level_four_monsters_make_a_link_two() {
    let mut state = generic_state();
    let link = state.spawn(TWO_MONSTERS_LINK, Pile::ExtraDeck).unwrap();
    let first = on_field(&mut state, WARRIOR, 0);
    let second = on_field(&mut state, WARRIOR, 1);

    assert_eq!(search_combination_link_summon(&state, link), Some(vec![first, second]));
    assert!(can_extra_summon(&state, link));
}

#[test]
fn test_no_link_summon_when_materials_leave_no_pointed_zone() {
    let mut state = generic_state();
    let strict = state.spawn(TWO_LEVEL_FOUR_LINK, Pile::ExtraDeck).unwrap();
    let generic = state.spawn(TWO_MONSTERS_LINK, Pile::ExtraDeck).unwrap();
    let linkuriboh = state.spawn(extra::LINKURIBOH, Pile::ExtraDeck).unwrap();
    summon(&mut state, linkuriboh, 5, Position::Attack, SummonType::Link).unwrap();
    let daruma = on_field(&mut state, cards::CANNON_DARUMA, 1);
    let w3 = on_field(&mut state, WARRIOR, 3);
    let w4 = on_field(&mut state, WARRIOR, 4);

    // zone 1 is the only pointed zone and the extra monster zone is in use
    assert_eq!(pointed_zones(&state, &state.zones.field.monster_grid()), vec![1]);
    assert!(!is_valid_material_set(&state, strict, &[w3, w4]));
    assert_eq!(search_combination_link_summon(&state, strict), None);
    assert!(!can_extra_summon(&state, strict));

    // releasing the zone 1 occupant opens it
    assert_eq!(search_combination_link_summon(&state, generic), Some(vec![daruma, w3]));
}

#[test]
fn test_link_summon_flow() {
    let mut state = state();
    let borg = state.spawn(extra::BARRICADEBORG, Pile::ExtraDeck).unwrap();
    let controller = on_field(&mut state, cards::GENEX_CONTROLLER, 0);
    let daruma = on_field(&mut state, cards::CANNON_DARUMA, 1);

    start_link_summon(&mut state, borg).unwrap();
    assert_eq!(state.queue_status(), QueueStatus::WaitingForInput(StepKind::MultiSelect));
    assert_eq!(state.queue.front().unwrap().order, MATERIAL_SELECT_ORDER);
    assert!(state.queue.front().unwrap().can_cancel);

    let too_few = state.process_queue_top(Resolution::Cards(vec![controller]));
    assert!(matches!(too_few, Err(DuelError::InvalidSelection(_))));

    state.process_queue_top(Resolution::Cards(vec![controller, daruma])).unwrap();
    assert_eq!(state.settle().unwrap(), QueueStatus::WaitingForInput(StepKind::Summon));
    assert_eq!(state.location_of(controller), Some(Location::Graveyard));
    assert_eq!(state.location_of(daruma), Some(Location::Graveyard));

    // no link arrows on the field: only the extra monster zones are open
    let main_zone = state.process_queue_top(Resolution::Summon {
        zone: 0,
        position: Position::Attack,
    });
    assert!(matches!(main_zone, Err(DuelError::InvalidSelection(_))));
    state
        .process_queue_top(Resolution::Summon {
            zone: 5,
            position: Position::Attack,
        })
        .unwrap();
    assert_eq!(state.zones.field.extra_monster_zones[0], Some(borg));
    assert_eq!(state.card(borg).unwrap().summoned_by, Some(SummonType::Link));
}

#[test]
fn test_link_summon_without_materials_is_illegal() {
    let mut state = state();
    let borg = state.spawn(extra::BARRICADEBORG, Pile::ExtraDeck).unwrap();
    let result = start_link_summon(&mut state, borg);
    assert!(matches!(result, Err(DuelError::IllegalAction { .. })));
    assert!(state.queue.is_empty());
}

// =============================================================================
// Synchro
// =============================================================================

#[test]
fn test_synchro_needs_tuner_and_non_tuner() {
    let mut state = state();
    let herald = state.spawn(extra::HERALD_OF_THE_ARC_LIGHT, Pile::ExtraDeck).unwrap();
    let priestess = on_field(&mut state, cards::HERALD_PRIESTESS, 0);
    state.clear_queue();
    assert_eq!(search_combination_synchro_summon(&state, herald), None);

    let daruma = on_field(&mut state, cards::CANNON_DARUMA, 1);
    assert_eq!(search_combination_synchro_summon(&state, herald), Some(vec![priestess, daruma]));
    assert!(can_extra_summon(&state, herald));
}

#[test]
fn test_searches_only_match_their_own_type() {
    let mut state = state();
    let beatrice = state.spawn(extra::BEATRICE, Pile::ExtraDeck).unwrap();
    let linkuriboh = state.spawn(extra::LINKURIBOH, Pile::ExtraDeck).unwrap();
    on_field(&mut state, cards::BENTEN, 0);
    on_field(&mut state, cards::BENTEN, 1);
    on_field(&mut state, cards::RIGHT_ARM, 2);

    assert_eq!(search_combination_synchro_summon(&state, beatrice), None);
    assert_eq!(search_combination_link_summon(&state, beatrice), None);
    assert_eq!(search_combination_xyz_summon(&state, linkuriboh), None);
}

// =============================================================================
// Xyz
// =============================================================================

#[test]
fn test_xyz_needs_two_level_six() {
    let mut state = state();
    let beatrice = state.spawn(extra::BEATRICE, Pile::ExtraDeck).unwrap();
    let a = on_field(&mut state, cards::BENTEN, 0);
    on_field(&mut state, cards::GENEX_CONTROLLER, 1);
    assert_eq!(search_combination_xyz_summon(&state, beatrice), None);

    let b = on_field(&mut state, cards::BENTEN, 2);
    assert_eq!(search_combination_xyz_summon(&state, beatrice), Some(vec![a, b]));
}

#[test]
fn test_xyz_summon_attaches_materials_and_detaches_for_effect() {
    let mut state = state();
    let beatrice = state.spawn(extra::BEATRICE, Pile::ExtraDeck).unwrap();
    let a = on_field(&mut state, cards::BENTEN, 0);
    let b = on_field(&mut state, cards::BENTEN, 1);
    let buried = state.spawn(cards::CANNON_DARUMA, Pile::Deck).unwrap();

    start_xyz_summon(&mut state, beatrice).unwrap();
    state.process_queue_top(Resolution::Cards(vec![a, b])).unwrap();
    assert_eq!(state.queue_status(), QueueStatus::WaitingForInput(StepKind::Summon));
    assert_eq!(state.location_of(a), Some(Location::Material));
    assert_eq!(state.zones.field.monster_count(), 0);

    state
        .process_queue_top(Resolution::Summon {
            zone: 0,
            position: Position::Defense,
        })
        .unwrap();
    assert_eq!(state.location_of(beatrice), Some(Location::MonsterField));
    assert_eq!(state.card(beatrice).unwrap().materials.len(), 2);

    activate_effect(&mut state, beatrice).unwrap();
    assert_eq!(state.queue_status(), QueueStatus::WaitingForInput(StepKind::Select));
    state.process_queue_top(Resolution::Cards(vec![a])).unwrap();
    assert_eq!(state.location_of(a), Some(Location::Graveyard));
    assert_eq!(state.card(beatrice).unwrap().materials.len(), 1);

    state.process_queue_top(Resolution::Cards(vec![buried])).unwrap();
    assert_eq!(state.location_of(buried), Some(Location::Graveyard));
    assert!(state.queue.is_empty());

    // once per turn
    let again = activate_effect(&mut state, beatrice);
    assert!(matches!(again, Err(DuelError::IllegalAction { .. })));
}
