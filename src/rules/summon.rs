//! Summon legality and zone availability.

use super::link::{extra_zone_used, link_summonable_zones};
use crate::cards::{Location, SpellKind};
use crate::core::{EntityId, GameState, Phase};
use crate::zones::{MonsterGrid, MAIN_MONSTER_ZONES, MONSTER_ZONE_PRIORITY};

/// Monsters that must be released to normal summon a monster of `level`.
#[must_use]
pub const fn tribute_count(level: i32) -> usize {
    if level >= 7 {
        2
    } else if level >= 5 {
        1
    } else {
        0
    }
}

/// Whether `card` can be normal summoned right now.
///
/// One normal summon per turn, from the hand, during the player's main
/// phase. Monsters needing tributes need that many monsters on the field;
/// the rest need an empty main monster zone.
#[must_use]
pub fn can_normal_summon(state: &GameState, card: EntityId) -> bool {
    let Some(definition) = state.definition(card) else {
        return false;
    };
    if !definition.can_normal_summon()
        || state.location_of(card) != Some(Location::Hand)
        || state.turn.phase != Phase::Main1
        || state.turn.is_opponent_turn
        || state.turn.has_normal_summoned
    {
        return false;
    }
    let tributes = tribute_count(state.level_of(card).unwrap_or(0));
    if tributes > 0 {
        state.zones.field.monster_count() >= tributes
    } else {
        find_empty_monster_zone(state).is_some()
    }
}

/// First empty main monster zone, left to right.
#[must_use]
pub fn find_empty_monster_zone(state: &GameState) -> Option<usize> {
    state.zones.field.empty_monster_zones().first().copied()
}

/// First empty spell/trap zone, left to right.
#[must_use]
pub fn find_empty_spell_trap_zone(state: &GameState) -> Option<usize> {
    state.zones.field.empty_spell_trap_zones().first().copied()
}

/// Whether `card` can be set face-down right now.
///
/// Traps and every spell except field spells can be set from the hand
/// during the player's main phase while a spell/trap zone is free.
#[must_use]
pub fn can_set_spell_trap(state: &GameState, card: EntityId) -> bool {
    let Some(definition) = state.definition(card) else {
        return false;
    };
    let settable = definition.is_trap() || definition.spell_kind().is_some_and(|k| k != SpellKind::Field);
    settable
        && state.location_of(card) == Some(Location::Hand)
        && state.turn.phase == Phase::Main1
        && !state.turn.is_opponent_turn
        && find_empty_spell_trap_zone(state).is_some()
}

/// Zones `monster` could be summoned to on `grid`, ascending.
#[must_use]
pub fn summonable_zones_on(state: &GameState, monster: EntityId, grid: &MonsterGrid) -> Vec<usize> {
    let Some(definition) = state.definition(monster) else {
        return Vec::new();
    };
    if !definition.is_monster() {
        return Vec::new();
    }
    if definition.is_link() {
        return link_summonable_zones(state, grid);
    }
    let mut zones: Vec<usize> = (0..MAIN_MONSTER_ZONES).filter(|&z| grid[z].is_none()).collect();
    if definition.is_extra_deck() && !extra_zone_used(grid) {
        zones.extend([5, 6]);
    }
    zones
}

/// Zones `monster` could be summoned to on the current field.
#[must_use]
pub fn summonable_zones(state: &GameState, monster: EntityId) -> Vec<usize> {
    summonable_zones_on(state, monster, &state.zones.field.monster_grid())
}

/// The zone auto-summon picks: the first summonable zone by placement
/// priority.
#[must_use]
pub fn default_summon_zone(state: &GameState, monster: EntityId) -> Option<usize> {
    let zones = summonable_zones(state, monster);
    MONSTER_ZONE_PRIORITY.into_iter().find(|z| zones.contains(z))
}
