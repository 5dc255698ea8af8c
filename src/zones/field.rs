//! Fixed-slot field layout.
//!
//! Monster zones are addressed by *logical* index throughout the engine:
//! `0..=4` are the main monster zones, `5` and `6` are the two extra
//! monster zones. Spell/trap zones are `0..=4`; the field zone is a
//! single slot.

use serde::{Deserialize, Serialize};

use crate::core::EntityId;
use crate::error::PlacementError;

/// Number of main monster zones.
pub const MAIN_MONSTER_ZONES: usize = 5;
/// Number of logical monster zones (main + extra).
pub const MONSTER_ZONES: usize = 7;
/// Number of spell/trap zones.
pub const SPELL_TRAP_ZONES: usize = 5;

/// Order in which free monster zones are taken: center outward, then
/// the extra monster zones.
pub const MONSTER_ZONE_PRIORITY: [usize; MONSTER_ZONES] = [2, 1, 3, 0, 4, 5, 6];
/// Order in which free spell/trap zones are taken.
pub const SPELL_TRAP_PRIORITY: [usize; SPELL_TRAP_ZONES] = [2, 1, 3, 0, 4];

/// Logical monster-zone snapshot, indexed `0..=6`.
pub type MonsterGrid = [Option<EntityId>; MONSTER_ZONES];

/// Where on the field a card sat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldSlot {
    Monster(usize),
    SpellTrap(usize),
    FieldZone,
}

/// One side of the field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub monster_zones: [Option<EntityId>; MAIN_MONSTER_ZONES],
    pub extra_monster_zones: [Option<EntityId>; 2],
    pub spell_trap_zones: [Option<EntityId>; SPELL_TRAP_ZONES],
    pub field_zone: Option<EntityId>,
}

impl Field {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupant of a logical monster zone.
    pub fn monster_slot(&self, zone: usize) -> Result<Option<EntityId>, PlacementError> {
        match zone {
            0..=4 => Ok(self.monster_zones[zone]),
            5 | 6 => Ok(self.extra_monster_zones[zone - 5]),
            _ => Err(PlacementError::InvalidZoneIndex { zone }),
        }
    }

    /// Place a card into an empty logical monster zone.
    pub fn place_monster(&mut self, zone: usize, card: EntityId) -> Result<(), PlacementError> {
        let slot = match zone {
            0..=4 => &mut self.monster_zones[zone],
            5 | 6 => &mut self.extra_monster_zones[zone - 5],
            _ => return Err(PlacementError::InvalidZoneIndex { zone }),
        };
        if slot.is_some() {
            return Err(PlacementError::ZoneOccupied { zone });
        }
        *slot = Some(card);
        Ok(())
    }

    /// Place a card into an empty spell/trap zone.
    pub fn place_spell_trap(&mut self, zone: usize, card: EntityId) -> Result<(), PlacementError> {
        let slot = self
            .spell_trap_zones
            .get_mut(zone)
            .ok_or(PlacementError::InvalidZoneIndex { zone })?;
        if slot.is_some() {
            return Err(PlacementError::ZoneOccupied { zone });
        }
        *slot = Some(card);
        Ok(())
    }

    /// All seven logical monster zones.
    #[must_use]
    pub fn monster_grid(&self) -> MonsterGrid {
        let mut grid = [None; MONSTER_ZONES];
        grid[..MAIN_MONSTER_ZONES].copy_from_slice(&self.monster_zones);
        grid[5] = self.extra_monster_zones[0];
        grid[6] = self.extra_monster_zones[1];
        grid
    }

    /// Monsters on the field in logical zone order.
    pub fn monsters(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.monster_zones
            .iter()
            .chain(self.extra_monster_zones.iter())
            .filter_map(|slot| *slot)
    }

    /// Cards in the spell/trap zones, left to right.
    pub fn spell_traps(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.spell_trap_zones.iter().filter_map(|slot| *slot)
    }

    /// Empty main monster zones (`0..=4`).
    #[must_use]
    pub fn empty_monster_zones(&self) -> Vec<usize> {
        (0..MAIN_MONSTER_ZONES)
            .filter(|&i| self.monster_zones[i].is_none())
            .collect()
    }

    /// Empty spell/trap zones.
    #[must_use]
    pub fn empty_spell_trap_zones(&self) -> Vec<usize> {
        (0..SPELL_TRAP_ZONES)
            .filter(|&i| self.spell_trap_zones[i].is_none())
            .collect()
    }

    /// Number of occupied logical monster zones.
    #[must_use]
    pub fn monster_count(&self) -> usize {
        self.monsters().count()
    }

    /// Find which slot holds `card`.
    #[must_use]
    pub fn slot_of(&self, card: EntityId) -> Option<FieldSlot> {
        if let Some(i) = self.monster_grid().iter().position(|s| *s == Some(card)) {
            return Some(FieldSlot::Monster(i));
        }
        if let Some(i) = self.spell_trap_zones.iter().position(|s| *s == Some(card)) {
            return Some(FieldSlot::SpellTrap(i));
        }
        if self.field_zone == Some(card) {
            return Some(FieldSlot::FieldZone);
        }
        None
    }

    /// Clear every slot holding `card`; returns the first slot found.
    pub fn remove(&mut self, card: EntityId) -> Option<FieldSlot> {
        let found = self.slot_of(card);
        for slot in self
            .monster_zones
            .iter_mut()
            .chain(self.extra_monster_zones.iter_mut())
            .chain(self.spell_trap_zones.iter_mut())
            .chain(std::iter::once(&mut self.field_zone))
        {
            if *slot == Some(card) {
                *slot = None;
            }
        }
        found
    }

    /// Number of slots holding `card` (0 or 1 when invariants hold).
    #[must_use]
    pub fn occurrences(&self, card: EntityId) -> usize {
        self.monster_zones
            .iter()
            .chain(self.extra_monster_zones.iter())
            .chain(self.spell_trap_zones.iter())
            .chain(std::iter::once(&self.field_zone))
            .filter(|slot| **slot == Some(card))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_zone_addressing() {
        let mut field = Field::new();
        field.place_monster(2, EntityId(1)).unwrap();
        field.place_monster(6, EntityId(2)).unwrap();

        assert_eq!(field.monster_slot(2).unwrap(), Some(EntityId(1)));
        assert_eq!(field.extra_monster_zones[1], Some(EntityId(2)));
        assert_eq!(field.monster_grid()[6], Some(EntityId(2)));
        assert_eq!(field.monsters().collect::<Vec<_>>(), vec![EntityId(1), EntityId(2)]);
    }

    #[test]
    fn test_place_rejects_occupied_and_out_of_range() {
        let mut field = Field::new();
        field.place_monster(0, EntityId(1)).unwrap();
        assert_eq!(
            field.place_monster(0, EntityId(2)),
            Err(PlacementError::ZoneOccupied { zone: 0 })
        );
        assert_eq!(
            field.place_monster(7, EntityId(2)),
            Err(PlacementError::InvalidZoneIndex { zone: 7 })
        );
        assert_eq!(
            field.place_spell_trap(5, EntityId(2)),
            Err(PlacementError::InvalidZoneIndex { zone: 5 })
        );
    }

    #[test]
    fn test_remove_reports_slot() {
        let mut field = Field::new();
        field.place_spell_trap(3, EntityId(9)).unwrap();
        assert_eq!(field.remove(EntityId(9)), Some(FieldSlot::SpellTrap(3)));
        assert_eq!(field.remove(EntityId(9)), None);
        assert_eq!(field.empty_spell_trap_zones().len(), SPELL_TRAP_ZONES);
    }
}
