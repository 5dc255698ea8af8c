//! Duel rules.
//!
//! Everything that decides what is legal and when the duel ends:
//! - `actions`: which actions a card offers, and the entry points that
//!   perform them
//! - `summon`: normal summon legality, free zones, summonable zones
//! - `link`: link-arrow topology over the logical zone grid
//! - `combination`: material search for extra deck summons
//! - `turn`: phase machine, draws, duel setup
//! - `victory`: win judgement
//!
//! Rules read and write `GameState` directly; card-specific behaviour
//! stays in the card hooks.

pub mod actions;
pub mod combination;
pub mod link;
pub mod summon;
pub mod turn;
pub mod victory;

pub use actions::{
    activate_effect, activate_spell, available_actions, can_extra_summon, get_card_actions, normal_summon,
    resolve_spell, set_card, start_link_summon, start_synchro_summon, start_xyz_summon, EXTRA_SUMMON_ORDER,
    MATERIAL_SELECT_ORDER, SPELL_END_ORDER,
};
pub use combination::{
    is_valid_material_set, material_candidates, search_combination, search_combination_link_summon,
    search_combination_synchro_summon, search_combination_xyz_summon,
};
pub use link::{
    can_link_summon_after_release, get_link_monster_summonable, link_summonable_zones, pointed_zones, zone_at,
    zone_coord,
};
pub use summon::{
    can_normal_summon, can_set_spell_trap, default_summon_zone, find_empty_monster_zone, find_empty_spell_trap_zone,
    summonable_zones, summonable_zones_on, tribute_count,
};
pub use turn::{draw, draw_by_effect, initialize_game, next_phase, pending_traps};
pub use victory::{check_exodia_win, judge_win, GameResult, EXODIA_PIECES};
