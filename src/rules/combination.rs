//! Material combination search for extra deck summons.
//!
//! Candidate materials are the field monsters the target's material
//! filter accepts. Subsets are tried smallest first, and within a size in
//! field order; the first subset that satisfies the material condition
//! and leaves the monster somewhere to go wins. Seven monster zones make
//! the exhaustive search at most 127 subsets.

use tracing::trace;

use super::link::{can_link_summon_after_release, grid_without};
use super::summon::summonable_zones_on;
use crate::cards::MonsterType;
use crate::core::{EntityId, GameState};
use crate::effects::CardSelector;

/// Face-up field monsters `monster` accepts as material, in field order.
#[must_use]
pub fn material_candidates(state: &GameState, monster: EntityId) -> Vec<EntityId> {
    let Some(rules) = state.definition(monster).and_then(|d| d.material_rules()) else {
        return Vec::new();
    };
    CardSelector::new(state)
        .field_monsters()
        .face_up()
        .excluding(monster)
        .filter(|s, c| (rules.filter)(s, c))
        .get()
}

/// Every subset of `items`, smallest first.
fn subsets_by_size(items: &[EntityId]) -> impl Iterator<Item = Vec<EntityId>> + '_ {
    let n = items.len();
    (1..=n).flat_map(move |size| {
        (1u32..(1 << n))
            .filter(move |mask| mask.count_ones() as usize == size)
            .map(move |mask| {
                items
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, c)| *c)
                    .collect::<Vec<_>>()
            })
    })
}

/// Whether `materials` is a legal material set for `monster` and leaves
/// it a zone once they are gone.
#[must_use]
pub fn is_valid_material_set(state: &GameState, monster: EntityId, materials: &[EntityId]) -> bool {
    let Some(definition) = state.definition(monster) else {
        return false;
    };
    let Some(rules) = definition.material_rules() else {
        return false;
    };
    if !(rules.condition)(state, materials) {
        return false;
    }
    if definition.is_link() {
        can_link_summon_after_release(state, materials)
    } else {
        !summonable_zones_on(state, monster, &grid_without(state, materials)).is_empty()
    }
}

/// First material set that summons `monster`, if any.
#[must_use]
pub fn search_combination(state: &GameState, monster: EntityId) -> Option<Vec<EntityId>> {
    let candidates = material_candidates(state, monster);
    let found = subsets_by_size(&candidates).find(|subset| is_valid_material_set(state, monster, subset));
    trace!(card = %monster, candidates = candidates.len(), found = found.is_some(), "combination search");
    found
}

/// Material set for a link summon of `link`.
///
/// Always `None` while link summons are prohibited this turn.
#[must_use]
pub fn search_combination_link_summon(state: &GameState, link: EntityId) -> Option<Vec<EntityId>> {
    if state.turn.is_link_summon_prohibited || !state.definition(link).is_some_and(|d| d.is_link()) {
        return None;
    }
    search_combination(state, link)
}

/// Material set for an Xyz summon of `xyz`.
#[must_use]
pub fn search_combination_xyz_summon(state: &GameState, xyz: EntityId) -> Option<Vec<EntityId>> {
    if !state.definition(xyz).is_some_and(|d| d.is_xyz()) {
        return None;
    }
    search_combination(state, xyz)
}

/// Material set for a synchro summon of `synchro`.
#[must_use]
pub fn search_combination_synchro_summon(state: &GameState, synchro: EntityId) -> Option<Vec<EntityId>> {
    let is_synchro = state
        .definition(synchro)
        .is_some_and(|d| d.monster_type() == Some(MonsterType::Synchro));
    if !is_synchro {
        return None;
    }
    search_combination(state, synchro)
}
