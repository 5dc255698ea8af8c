//! Zone system for card locations.
//!
//! ## Key Types
//!
//! - `Field`: fixed monster / spell-trap / field-zone slots
//! - `Zones`: ordered piles plus both fields
//! - `ZonePosition`: position specifier for ordered piles
//! - `Destination` / `SendOptions`: targets of `send_card`
//!
//! The movement primitives (`send_card`, `summon`, `release_card`,
//! `banish`, ...) are the only code that moves cards between containers.

pub mod field;
pub mod manager;
pub mod movement;

pub use field::{
    Field, FieldSlot, MonsterGrid, MAIN_MONSTER_ZONES, MONSTER_ZONES, MONSTER_ZONE_PRIORITY, SPELL_TRAP_PRIORITY,
    SPELL_TRAP_ZONES,
};
pub use manager::{Origin, Pile, ZonePosition, Zones};
pub use movement::{
    add_buf, attach_material, banish, banish_random_from_extra_deck, destroy_by_battle, destroy_by_effect,
    equip_card, exclude_from_anywhere, occurrences, release_card, send_card, summon, Destination, SendOptions,
};
