//! Game state: the single explicit store every operation borrows.
//!
//! ## TurnState
//!
//! Turn counter, phase, whose turn it is, and the per-turn flags that
//! are cleared whenever the player's turn begins.
//!
//! ## GameState
//!
//! Complete duel state:
//! - Configuration and card registry
//! - The instance store (`EntityId -> CardInstance`)
//! - Zones (piles, field, opponent field)
//! - The effect queue and activation chain
//! - Life points, once-per-turn memo, result, RNG

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::action::{ActionRecord, CardAction};
use super::config::{DuelConfig, Phase};
use super::entity::EntityId;
use super::rng::GameRng;
use crate::cards::{CardDefinition, CardId, CardInstance, CardRegistry, Location};
use crate::error::DuelError;
use crate::rules::GameResult;
use crate::stack::EffectQueue;
use crate::zones::{Pile, ZonePosition, Zones};

/// A point in the duel's turn sequence.
///
/// The opponent's turn shares the player's turn number, so the flag is
/// needed to tell the two apart (e.g. "set on a previous turn").
///
/// Stamps order chronologically: the opponent's half of a turn comes
/// after the player's half.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TurnStamp {
    pub turn: u32,
    pub opponent: bool,
}

/// Turn progression and per-turn flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Turn number (starts at 1).
    pub turn: u32,

    pub phase: Phase,

    pub is_opponent_turn: bool,

    pub has_normal_summoned: bool,
    pub has_special_summoned: bool,
    pub has_drawn_by_effect: bool,
    pub is_link_summon_prohibited: bool,
    pub is_field_spell_activation_prohibited: bool,

    /// Per-card values that only last for the current turn.
    pub flags: FxHashMap<String, i64>,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            turn: 1,
            phase: Phase::Draw,
            is_opponent_turn: false,
            has_normal_summoned: false,
            has_special_summoned: false,
            has_drawn_by_effect: false,
            is_link_summon_prohibited: false,
            is_field_spell_activation_prohibited: false,
            flags: FxHashMap::default(),
        }
    }
}

impl TurnState {
    /// Current position in the turn sequence.
    #[must_use]
    pub fn stamp(&self) -> TurnStamp {
        TurnStamp {
            turn: self.turn,
            opponent: self.is_opponent_turn,
        }
    }

    /// Get a per-turn flag value with default.
    #[must_use]
    pub fn get_flag(&self, key: &str, default: i64) -> i64 {
        self.flags.get(key).copied().unwrap_or(default)
    }

    /// Set a per-turn flag value.
    pub fn set_flag(&mut self, key: impl Into<String>, value: i64) {
        self.flags.insert(key.into(), value);
    }

    /// Clear every per-turn restriction.
    pub fn reset_flags(&mut self) {
        self.has_normal_summoned = false;
        self.has_special_summoned = false;
        self.has_drawn_by_effect = false;
        self.is_link_summon_prohibited = false;
        self.is_field_spell_activation_prohibited = false;
        self.flags.clear();
    }
}

/// Complete duel state.
///
/// Every engine operation takes `&GameState` or `&mut GameState`
/// explicitly; nothing is global.
#[derive(Debug)]
pub struct GameState {
    pub config: DuelConfig,
    pub registry: CardRegistry,
    pub zones: Zones,
    pub turn: TurnState,
    pub life_points: i64,
    pub opponent_life_points: i64,
    /// Pending effect steps; only the front is interactable.
    pub queue: EffectQueue,
    /// Cards currently being activated, oldest first.
    pub card_chain: Vec<EntityId>,
    /// Set once the duel is decided.
    pub result: Option<GameResult>,
    pub history: Vec<ActionRecord>,
    cards: FxHashMap<EntityId, CardInstance>,
    turn_once_used: FxHashSet<String>,
    rng: GameRng,
    next_entity: u32,
}

impl GameState {
    /// Create an empty duel.
    #[must_use]
    pub fn new(config: DuelConfig, registry: CardRegistry, seed: u64) -> Self {
        let life = config.starting_life;
        Self {
            config,
            registry,
            zones: Zones::new(),
            turn: TurnState::default(),
            life_points: life,
            opponent_life_points: life,
            queue: EffectQueue::new(),
            card_chain: Vec::new(),
            result: None,
            history: Vec::new(),
            cards: FxHashMap::default(),
            turn_once_used: FxHashSet::default(),
            rng: GameRng::new(seed),
            next_entity: 0,
        }
    }

    fn alloc_entity(&mut self) -> EntityId {
        let id = EntityId::new(self.next_entity);
        self.next_entity += 1;
        id
    }

    // === Instance store ===

    /// Create a new instance of `card_id` at the bottom of `pile`.
    pub fn spawn(&mut self, card_id: CardId, pile: Pile) -> Result<EntityId, DuelError> {
        if !self.registry.contains(card_id) {
            return Err(DuelError::UnknownCard(card_id));
        }
        let id = self.alloc_entity();
        let location = match pile {
            Pile::Hand => Location::Hand,
            Pile::Deck => Location::Deck,
            Pile::Graveyard => Location::Graveyard,
            Pile::Banished => Location::Exclusion,
            Pile::ExtraDeck => Location::ExtraDeck,
        };
        self.cards.insert(id, CardInstance::new(id, card_id, location));
        self.zones.insert(pile, id, ZonePosition::Bottom);
        trace!(card = %id, ?pile, "spawned");
        Ok(id)
    }

    /// Create a token instance that is not yet placed anywhere.
    ///
    /// Place it with `zones::summon`.
    pub fn spawn_token(&mut self, card_id: CardId) -> Result<EntityId, DuelError> {
        if !self.registry.contains(card_id) {
            return Err(DuelError::UnknownCard(card_id));
        }
        let id = self.alloc_entity();
        self.cards.insert(id, CardInstance::token(id, card_id));
        Ok(id)
    }

    /// Get a live card instance.
    #[must_use]
    pub fn card(&self, id: EntityId) -> Option<&CardInstance> {
        self.cards.get(&id)
    }

    /// Get a live card instance mutably.
    pub fn card_mut(&mut self, id: EntityId) -> Option<&mut CardInstance> {
        self.cards.get_mut(&id)
    }

    /// Drop an instance from the store (tokens leaving the field).
    pub(crate) fn forget_card(&mut self, id: EntityId) -> Option<CardInstance> {
        self.cards.remove(&id)
    }

    /// Every live instance, in no particular order.
    pub fn instances(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.values()
    }

    pub(crate) fn instances_mut(&mut self) -> impl Iterator<Item = &mut CardInstance> {
        self.cards.values_mut()
    }

    /// All tracked instance ids, sorted.
    #[must_use]
    pub fn card_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<_> = self.cards.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Definition of a live instance.
    #[must_use]
    pub fn definition(&self, id: EntityId) -> Option<&CardDefinition> {
        self.card(id).and_then(|c| self.registry.get(c.card_id))
    }

    /// Card name of a live instance.
    #[must_use]
    pub fn name_of(&self, id: EntityId) -> Option<&str> {
        self.definition(id).map(|d| d.name.as_str())
    }

    /// Current level including buffs; `None` for cards without a level.
    #[must_use]
    pub fn level_of(&self, id: EntityId) -> Option<i32> {
        let card = self.card(id)?;
        let level = self.registry.get(card.card_id)?.level()?;
        Some(i32::from(level) + card.buf.level)
    }

    /// Current attack including buffs.
    #[must_use]
    pub fn attack_of(&self, id: EntityId) -> Option<i32> {
        let card = self.card(id)?;
        let stats = self.registry.get(card.card_id)?.monster_stats()?;
        Some(stats.attack + card.buf.attack)
    }

    /// Location of a live instance.
    #[must_use]
    pub fn location_of(&self, id: EntityId) -> Option<Location> {
        self.card(id).map(|c| c.location)
    }

    // === Once-per-turn memo ===

    /// Whether a once-per-turn key has been consumed this turn.
    #[must_use]
    pub fn is_turn_once_used(&self, key: &str) -> bool {
        self.turn_once_used.contains(key)
    }

    /// Consume a once-per-turn key.
    pub fn mark_turn_once_used(&mut self, key: impl Into<String>) {
        let key = key.into();
        debug!(%key, "once-per-turn effect used");
        self.turn_once_used.insert(key);
    }

    /// Clear the memo and every per-turn flag.
    pub fn reset_turn_restrictions(&mut self) {
        self.turn_once_used.clear();
        self.turn.reset_flags();
    }

    // === Misc ===

    /// Deterministic RNG.
    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// Whether the duel has been decided.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Append to the action log.
    pub fn record_action(&mut self, action: CardAction, card: EntityId) {
        let stamp = self.turn.stamp();
        self.history.push(ActionRecord {
            turn: stamp.turn,
            opponent_turn: stamp.opponent,
            action,
            card,
        });
    }

    /// Cheap copy of the board for presentation.
    #[must_use]
    pub fn snapshot(&self) -> Zones {
        self.zones.clone()
    }
}
