//! Link-arrow topology.
//!
//! Logical monster zones are projected onto a two-row grid:
//!
//! ```text
//! row 1:        [5]       [6]
//! row 0:  [0]   [1]   [2]   [3]   [4]
//! ```
//!
//! Zone 5 sits above column 1 and zone 6 above column 3. A link monster
//! points at the zone its arrow offset lands on, if any.

use crate::core::{EntityId, GameState};
use crate::zones::{MonsterGrid, MONSTER_ZONES};

/// Grid coordinate `(row, column)` of a logical monster zone.
#[must_use]
pub const fn zone_coord(zone: usize) -> Option<(i8, i8)> {
    match zone {
        0..=4 => Some((0, zone as i8)),
        5 => Some((1, 1)),
        6 => Some((1, 3)),
        _ => None,
    }
}

/// Logical monster zone at a grid coordinate.
#[must_use]
pub const fn zone_at(row: i8, column: i8) -> Option<usize> {
    match (row, column) {
        (0, 0..=4) => Some(column as usize),
        (1, 1) => Some(5),
        (1, 3) => Some(6),
        _ => None,
    }
}

/// Zones pointed at by the link monsters on `grid`, sorted.
#[must_use]
pub fn pointed_zones(state: &GameState, grid: &MonsterGrid) -> Vec<usize> {
    let mut pointed = Vec::new();
    for (zone, slot) in grid.iter().enumerate() {
        let Some(card) = slot else { continue };
        let Some((row, column)) = zone_coord(zone) else { continue };
        let Some(stats) = state.definition(*card).and_then(|d| d.monster_stats()) else {
            continue;
        };
        for arrow in &stats.link_arrows {
            let (dr, dc) = arrow.offset();
            if let Some(target) = zone_at(row + dr, column + dc) {
                pointed.push(target);
            }
        }
    }
    pointed.sort_unstable();
    pointed.dedup();
    pointed
}

/// Whether either extra monster zone is occupied.
#[must_use]
pub fn extra_zone_used(grid: &MonsterGrid) -> bool {
    grid[5].is_some() || grid[6].is_some()
}

/// Zones a link monster could be placed in on `grid`.
///
/// Link monsters go to an empty zone pointed at by a link arrow, or to
/// an empty extra monster zone while neither is occupied.
#[must_use]
pub fn link_summonable_zones(state: &GameState, grid: &MonsterGrid) -> Vec<usize> {
    let pointed = pointed_zones(state, grid);
    let free_extra = !extra_zone_used(grid);
    (0..MONSTER_ZONES)
        .filter(|&zone| grid[zone].is_none())
        .filter(|&zone| pointed.contains(&zone) || (free_extra && zone >= 5))
        .collect()
}

/// Link placement zones on the current field.
#[must_use]
pub fn get_link_monster_summonable(state: &GameState) -> Vec<usize> {
    link_summonable_zones(state, &state.zones.field.monster_grid())
}

/// Copy of the current grid with `released` cleared.
#[must_use]
pub fn grid_without(state: &GameState, released: &[EntityId]) -> MonsterGrid {
    let mut grid = state.zones.field.monster_grid();
    for slot in &mut grid {
        if slot.is_some_and(|c| released.contains(&c)) {
            *slot = None;
        }
    }
    grid
}

/// Whether a link monster would still have a zone after `released`
/// leave the field.
#[must_use]
pub fn can_link_summon_after_release(state: &GameState, released: &[EntityId]) -> bool {
    !link_summonable_zones(state, &grid_without(state, released)).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{
        CardDefinition, CardId, CardRegistry, Element, LinkArrow, MonsterStats, MonsterType, Position, Race,
        SummonType,
    };
    use crate::core::DuelConfig;
    use crate::zones::{summon, Pile};

    fn state() -> GameState {
        let mut registry = CardRegistry::new();
        registry
            .register(CardDefinition::monster(
                CardId::new(1),
                "リンクリボー",
                MonsterStats::link(Element::Dark, Race::Cyberse, 300, &[LinkArrow::Down]),
            ))
            .unwrap();
        registry
            .register(CardDefinition::monster(
                CardId::new(2),
                "ジェネクス・コントローラー",
                MonsterStats::new(MonsterType::Normal, Element::Dark, Race::Machine, 3, 1400, 1200),
            ))
            .unwrap();
        GameState::new(DuelConfig::default(), registry, 8)
    }

    #[test]
    fn test_coordinates_round_trip() {
        for zone in 0..MONSTER_ZONES {
            let (row, column) = zone_coord(zone).unwrap();
            assert_eq!(zone_at(row, column), Some(zone));
        }
        assert_eq!(zone_at(1, 2), None);
        assert_eq!(zone_at(-1, 0), None);
        assert_eq!(zone_coord(7), None);
    }

    #[test]
    fn test_empty_field_offers_both_extra_zones() {
        let state = state();
        assert_eq!(get_link_monster_summonable(&state), vec![5, 6]);
    }

    #[test]
    fn test_occupied_extra_zone_restricts_to_arrows() {
        let mut state = state();
        let link = state.spawn(CardId::new(1), Pile::ExtraDeck).unwrap();
        summon(&mut state, link, 5, Position::Attack, SummonType::Link).unwrap();
        // Down from (1, 1) lands on zone 1.
        assert_eq!(pointed_zones(&state, &state.zones.field.monster_grid()), vec![1]);
        assert_eq!(get_link_monster_summonable(&state), vec![1]);

        let blocker = state.spawn(CardId::new(2), Pile::Hand).unwrap();
        summon(&mut state, blocker, 1, Position::Attack, SummonType::Special).unwrap();
        assert!(get_link_monster_summonable(&state).is_empty());
        assert!(can_link_summon_after_release(&state, &[blocker]));
        assert!(can_link_summon_after_release(&state, &[link]));
    }
}
