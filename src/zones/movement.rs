//! Movement primitives.
//!
//! Every transfer of a card between containers goes through this module.
//! Each primitive first removes the card from every container it could
//! be in (`exclude_from_anywhere`) and only then places it, so an id is
//! never held by two containers at once.
//!
//! Placement is validated before anything moves: a rejected call returns
//! a `PlacementError` and leaves the board untouched.

use tracing::debug;

use super::field::{FieldSlot, SPELL_TRAP_PRIORITY, SPELL_TRAP_ZONES};
use super::manager::{Origin, Pile, ZonePosition};
use crate::cards::{Buff, Location, Position, SummonType};
use crate::core::{EntityId, GameState};
use crate::effects::{CardEffects, CardHook};
use crate::error::{DuelError, EffectResult, PlacementError};

/// Where `send_card` puts a card.
///
/// The monster field is not a destination; monsters enter it through
/// `summon`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Destination {
    Hand,
    Deck,
    Graveyard,
    Exclusion,
    ExtraDeck,
    SpellField,
    FieldZone,
    OpponentField,
}

impl Destination {
    /// Whether the destination is on the player's field.
    #[must_use]
    pub const fn is_field(self) -> bool {
        matches!(self, Destination::SpellField | Destination::FieldZone)
    }

    const fn location(self) -> Location {
        match self {
            Destination::Hand => Location::Hand,
            Destination::Deck => Location::Deck,
            Destination::Graveyard => Location::Graveyard,
            Destination::Exclusion => Location::Exclusion,
            Destination::ExtraDeck => Location::ExtraDeck,
            Destination::SpellField => Location::SpellField,
            Destination::FieldZone => Location::FieldZone,
            Destination::OpponentField => Location::OpponentField,
        }
    }
}

/// Options for `send_card`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SendOptions {
    /// Place face-down.
    pub face_down: bool,
    /// Explicit spell/trap zone; the first free zone by priority otherwise.
    pub spell_zone: Option<usize>,
    /// Where a card sent to the deck lands.
    pub deck_position: ZonePosition,
}

impl SendOptions {
    #[must_use]
    pub fn face_down() -> Self {
        Self {
            face_down: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn in_spell_zone(mut self, zone: usize) -> Self {
        self.spell_zone = Some(zone);
        self
    }

    #[must_use]
    pub fn deck_position(mut self, position: ZonePosition) -> Self {
        self.deck_position = position;
        self
    }
}

fn hook_of(state: &GameState, card: EntityId, pick: fn(&CardEffects) -> Option<CardHook>) -> Option<CardHook> {
    state.definition(card).and_then(|d| pick(&d.effects))
}

fn fire(state: &mut GameState, card: EntityId, hook: Option<CardHook>) -> EffectResult {
    match hook {
        Some(hook) => hook(state, card),
        None => Ok(()),
    }
}

/// Remove `card` from every container: piles, both fields, and the
/// material/equipment lists of every other instance.
///
/// Returns the first container it was found in.
pub fn exclude_from_anywhere(state: &mut GameState, card: EntityId) -> Option<Origin> {
    let mut origin = state.zones.remove(card);
    for host in state.instances_mut() {
        if let Some(i) = host.materials.iter().position(|m| *m == card) {
            host.materials.remove(i);
            origin.get_or_insert(Origin::Material(host.id));
        }
        if let Some(i) = host.equipment.iter().position(|e| *e == card) {
            host.equipment.remove(i);
            origin.get_or_insert(Origin::Equipment(host.id));
        }
    }
    origin
}

/// Number of containers (piles, field slots, attachment lists) holding
/// `card`. Zero or one while the board is consistent.
#[must_use]
pub fn occurrences(state: &GameState, card: EntityId) -> usize {
    let attached: usize = state
        .instances()
        .map(|host| {
            host.materials.iter().filter(|m| **m == card).count()
                + host.equipment.iter().filter(|e| **e == card).count()
        })
        .sum();
    state.zones.occurrences(card) + attached
}

/// Spell/trap zone `card` would land in.
fn spell_zone_for(state: &GameState, card: EntityId, requested: Option<usize>) -> Result<usize, PlacementError> {
    let zones = &state.zones.field.spell_trap_zones;
    let free = |i: usize| zones[i].is_none() || zones[i] == Some(card);
    match requested {
        Some(zone) if zone >= SPELL_TRAP_ZONES => Err(PlacementError::InvalidZoneIndex { zone }),
        Some(zone) if !free(zone) => Err(PlacementError::ZoneOccupied { zone }),
        Some(zone) => Ok(zone),
        None => SPELL_TRAP_PRIORITY
            .into_iter()
            .find(|&i| free(i))
            .ok_or(PlacementError::NoEmptyZone("spell/trap")),
    }
}

/// Send `card`'s equipment and materials to the graveyard.
///
/// Attachments only live on a monster in a monster zone (or an Xyz
/// monster whose summon is pending), so every move sheds them.
fn shed_attachments(state: &mut GameState, card: EntityId) -> EffectResult {
    let attached: Vec<EntityId> = match state.card(card) {
        Some(c) => c.equipment.iter().chain(c.materials.iter()).copied().collect(),
        None => Vec::new(),
    };
    for attached in attached {
        send_card(state, attached, Destination::Graveyard, SendOptions::default())?;
    }
    Ok(())
}

/// Move `card` to `to`.
///
/// The card's equipment and materials go to the graveyard first. A token sent to the graveyard
/// leaves the duel instead. Sending to an occupied field zone sends the
/// occupant to the graveyard first.
///
/// After placement, `on_field_to_graveyard` fires for cards that left
/// the monster field, the field zone or an equipment slot for the
/// graveyard, and `on_anywhere_to_graveyard` fires for every card that
/// reached the graveyard.
pub fn send_card(state: &mut GameState, card: EntityId, to: Destination, options: SendOptions) -> EffectResult {
    let instance = state.card(card).ok_or(PlacementError::CardNotFound(card))?;
    let from = instance.location;
    let is_token = instance.is_token;

    let spell_zone = if to == Destination::SpellField {
        Some(spell_zone_for(state, card, options.spell_zone)?)
    } else {
        None
    };
    if to == Destination::OpponentField {
        if let Some(other) = state.zones.opponent_field.field_zone.filter(|o| *o != card) {
            debug!(card = %card, occupant = %other, "opponent field zone occupied");
            return Err(PlacementError::ZoneOccupied { zone: 0 }.into());
        }
    }

    shed_attachments(state, card)?;

    let origin = exclude_from_anywhere(state, card);

    if is_token && to == Destination::Graveyard {
        state.forget_card(card);
        debug!(card = %card, ?origin, "token left the duel");
        return Ok(());
    }

    if to == Destination::FieldZone {
        if let Some(occupant) = state.zones.field.field_zone {
            send_card(state, occupant, Destination::Graveyard, SendOptions::default())?;
        }
    }

    let position = match (to, options.face_down) {
        (_, true) => Some(Position::Back),
        (Destination::SpellField | Destination::FieldZone | Destination::OpponentField, false) => {
            Some(Position::Attack)
        }
        _ => None,
    };
    if let Some(c) = state.card_mut(card) {
        c.reset_field_state();
        c.location = to.location();
        c.position = position;
    }

    match to {
        Destination::Hand => state.zones.insert(Pile::Hand, card, ZonePosition::Bottom),
        Destination::Deck => state.zones.insert(Pile::Deck, card, options.deck_position),
        Destination::Graveyard => state.zones.insert(Pile::Graveyard, card, ZonePosition::Bottom),
        Destination::Exclusion => state.zones.insert(Pile::Banished, card, ZonePosition::Bottom),
        Destination::ExtraDeck => state.zones.insert(Pile::ExtraDeck, card, ZonePosition::Bottom),
        Destination::SpellField => {
            if let Some(zone) = spell_zone {
                state.zones.field.place_spell_trap(zone, card)?;
            }
        }
        Destination::FieldZone => state.zones.field.field_zone = Some(card),
        Destination::OpponentField => state.zones.opponent_field.field_zone = Some(card),
    }
    debug!(card = %card, ?from, ?to, ?origin, "sent card");

    if to == Destination::Graveyard {
        if matches!(from, Location::MonsterField | Location::FieldZone | Location::Equipment) {
            let hook = hook_of(state, card, |e| e.on_field_to_graveyard);
            fire(state, card, hook)?;
        }
        let hook = hook_of(state, card, |e| e.on_anywhere_to_graveyard);
        fire(state, card, hook)?;
    }
    Ok(())
}

/// Place a monster in a logical monster zone (`0..=4` main, `5`/`6`
/// extra monster zones).
///
/// Fires `on_summon` when the monster lands face-up.
pub fn summon(
    state: &mut GameState,
    monster: EntityId,
    zone: usize,
    position: Position,
    summon_type: SummonType,
) -> Result<EntityId, DuelError> {
    let occupant = state.zones.field.monster_slot(zone)?;
    if occupant.is_some_and(|o| o != monster) {
        return Err(PlacementError::ZoneOccupied { zone }.into());
    }
    let definition = state.definition(monster).ok_or(PlacementError::CardNotFound(monster))?;
    if !definition.is_monster() {
        return Err(PlacementError::NotAMonster(monster).into());
    }

    let origin = exclude_from_anywhere(state, monster);
    state.zones.field.place_monster(zone, monster)?;
    if let Some(c) = state.card_mut(monster) {
        c.reset_field_state();
        c.location = Location::MonsterField;
        c.position = Some(position);
        c.summoned_by = Some(summon_type);
    }
    match summon_type {
        SummonType::Normal => state.turn.has_normal_summoned = true,
        _ => state.turn.has_special_summoned = true,
    }
    debug!(card = %monster, zone, ?position, ?summon_type, ?origin, "summoned");

    if position.is_face_up() {
        let hook = hook_of(state, monster, |e| e.on_summon);
        fire(state, monster, hook)?;
    }
    Ok(monster)
}

/// Send a card to the graveyard as a release, then fire `on_release`.
pub fn release_card(state: &mut GameState, card: EntityId) -> EffectResult {
    let hook = hook_of(state, card, |e| e.on_release);
    send_card(state, card, Destination::Graveyard, SendOptions::default())?;
    if state.card(card).is_some() {
        fire(state, card, hook)?;
    }
    Ok(())
}

/// Banish a card face-up.
pub fn banish(state: &mut GameState, card: EntityId) -> EffectResult {
    send_card(state, card, Destination::Exclusion, SendOptions::default())
}

/// Banish `count` random cards from the extra deck.
///
/// Returns the banished ids; fewer when the extra deck is smaller.
pub fn banish_random_from_extra_deck(state: &mut GameState, count: usize) -> Result<Vec<EntityId>, DuelError> {
    let mut pool: Vec<EntityId> = state.zones.extra_deck.iter().copied().collect();
    state.rng_mut().shuffle(&mut pool);
    pool.truncate(count);
    for &card in &pool {
        banish(state, card)?;
    }
    Ok(pool)
}

/// Fire `on_destroy_by_battle`, then move the card.
pub fn destroy_by_battle(state: &mut GameState, card: EntityId, to: Destination) -> EffectResult {
    let hook = hook_of(state, card, |e| e.on_destroy_by_battle);
    fire(state, card, hook)?;
    send_card(state, card, to, SendOptions::default())
}

/// Fire `on_destroy_by_effect`, then move the card.
pub fn destroy_by_effect(state: &mut GameState, card: EntityId, to: Destination) -> EffectResult {
    let hook = hook_of(state, card, |e| e.on_destroy_by_effect);
    fire(state, card, hook)?;
    send_card(state, card, to, SendOptions::default())
}

/// Attach `equip` to a monster on the field.
pub fn equip_card(state: &mut GameState, host: EntityId, equip: EntityId) -> EffectResult {
    if !matches!(state.zones.field.slot_of(host), Some(FieldSlot::Monster(_))) {
        return Err(DuelError::IllegalAction {
            card: host,
            action: "be equipped",
        });
    }
    if host == equip {
        return Err(DuelError::IllegalAction {
            card: host,
            action: "equip itself",
        });
    }
    if state.card(equip).is_none() {
        return Err(PlacementError::CardNotFound(equip).into());
    }
    shed_attachments(state, equip)?;
    exclude_from_anywhere(state, equip);
    if let Some(c) = state.card_mut(equip) {
        c.reset_field_state();
        c.location = Location::Equipment;
        c.position = Some(Position::Attack);
    }
    if let Some(h) = state.card_mut(host) {
        h.equipment.push(equip);
    }
    debug!(host = %host, card = %equip, "equipped");
    Ok(())
}

/// Attach `material` to a monster as Xyz material.
///
/// The host is a monster on the field, or an Xyz monster still in the
/// extra deck whose summon is pending.
pub fn attach_material(state: &mut GameState, host: EntityId, material: EntityId) -> EffectResult {
    let on_field = matches!(state.zones.field.slot_of(host), Some(FieldSlot::Monster(_)));
    if !on_field && state.location_of(host) != Some(Location::ExtraDeck) {
        return Err(DuelError::IllegalAction {
            card: host,
            action: "take materials",
        });
    }
    if host == material {
        return Err(DuelError::IllegalAction {
            card: host,
            action: "take itself as material",
        });
    }
    if state.card(material).is_none() {
        return Err(PlacementError::CardNotFound(material).into());
    }
    shed_attachments(state, material)?;
    exclude_from_anywhere(state, material);
    if let Some(c) = state.card_mut(material) {
        c.reset_field_state();
        c.location = Location::Material;
    }
    if let Some(h) = state.card_mut(host) {
        h.materials.push(material);
    }
    debug!(host = %host, card = %material, "attached material");
    Ok(())
}

/// Add a stat modifier to a monster on the field; no-op elsewhere.
pub fn add_buf(state: &mut GameState, card: EntityId, buf: Buff) -> EffectResult {
    let instance = state.card_mut(card).ok_or(PlacementError::CardNotFound(card))?;
    if instance.location == Location::MonsterField {
        instance.buf = instance.buf.plus(buf);
        debug!(card = %card, ?buf, "buffed");
    }
    Ok(())
}
