//! Main deck monsters.

use crate::cards::{
    Buff, CardDefinition, CardId, CardRegistry, Element, Location, MonsterStats, MonsterType, Position, Race,
};
use crate::core::{EntityId, GameState};
use crate::effects::{
    is_at, with_turn_at_once_condition, with_turn_at_once_effect, with_user_select_card, with_user_summon,
    Activation, CardEffects, CardSelector, SelectOptions, SummonOptions,
};
use crate::error::{DuelError, EffectResult};
use crate::rules::find_empty_monster_zone;
use crate::zones::{add_buf, release_card, send_card, Destination, SendOptions};

pub const EXODIA: CardId = CardId(1);
pub const RIGHT_ARM: CardId = CardId(2);
pub const LEFT_ARM: CardId = CardId(3);
pub const RIGHT_LEG: CardId = CardId(4);
pub const LEFT_LEG: CardId = CardId(5);
pub const GENEX_CONTROLLER: CardId = CardId(6);
pub const CANNON_DARUMA: CardId = CardId(7);
pub const HERALD_PRIESTESS: CardId = CardId(8);
pub const BAN_ALPHA: CardId = CardId(9);
pub const BENTEN: CardId = CardId(10);

/// Archetype marker shared by the Drytron cards.
const DRYTRON: &str = "竜輝巧";

const HERALD_SUMMON_KEY: &str = "宣告者の神巫_effect1";

pub fn register(registry: &mut CardRegistry) -> Result<(), DuelError> {
    let exodia = [
        (EXODIA, "封印されしエクゾディア", 3, 1000, 1000),
        (RIGHT_ARM, "封印されし者の右腕", 1, 200, 300),
        (LEFT_ARM, "封印されし者の左腕", 1, 200, 300),
        (RIGHT_LEG, "封印されし者の右足", 1, 200, 300),
        (LEFT_LEG, "封印されし者の左足", 1, 200, 300),
    ];
    for (id, name, level, attack, defense) in exodia {
        registry.register(CardDefinition::monster(
            id,
            name,
            MonsterStats::new(MonsterType::Normal, Element::Dark, Race::Spellcaster, level, attack, defense),
        ))?;
    }

    registry.register(
        CardDefinition::monster(
            GENEX_CONTROLLER,
            "ジェネクス・コントローラー",
            MonsterStats::new(MonsterType::Normal, Element::Dark, Race::Machine, 3, 1400, 1200),
        )
        .with_text("仲間達と心を通わせる事ができる、数少ないジェネクスのひとり。"),
    )?;
    registry.register(
        CardDefinition::monster(
            CANNON_DARUMA,
            "大砲だるま",
            MonsterStats::new(MonsterType::Normal, Element::Dark, Race::Machine, 2, 900, 500),
        )
        .with_text("大砲で埋め尽くされているメカだるま。ねらいは外さない。"),
    )?;

    registry.register(
        CardDefinition::monster(
            HERALD_PRIESTESS,
            "宣告者の神巫",
            MonsterStats::new(MonsterType::Effect, Element::Light, Race::Fairy, 2, 500, 300).tuner(),
        )
        .with_text(
            "①：このカードが召喚・特殊召喚に成功した場合に発動できる。デッキ・EXデッキから天使族モンスター1体を墓地へ送る。このカードのレベルはターン終了時まで、そのモンスターのレベル分だけ上がる。",
        )
        .with_effects(CardEffects::new().on_summon(herald_priestess_on_summon)),
    )?;

    registry.register(
        CardDefinition::monster(
            BAN_ALPHA,
            "竜輝巧－バンα",
            MonsterStats::new(MonsterType::Effect, Element::Light, Race::Machine, 1, 2000, 0).special_summon_only(),
        )
        .with_text(
            "このカードは通常召喚できない。①：自分の手札・フィールドから、このカード以外の「ドライトロン」モンスターまたは儀式モンスター１体をリリースして発動できる。手札・墓地のこのカードを守備表示で特殊召喚する。その後、デッキから儀式モンスター１体を手札に加える事ができる。",
        )
        .with_effects(CardEffects::new().with_ignition(Activation::new(ban_alpha_condition, ban_alpha_effect))),
    )?;

    registry.register(
        CardDefinition::monster(
            BENTEN,
            "サイバー・エンジェル－弁天－",
            MonsterStats::new(MonsterType::Ritual, Element::Light, Race::Fairy, 6, 1800, 1500),
        )
        .with_text("「機械天使の儀式」により降臨。②：このカードがリリースされた場合に発動できる。デッキから天使族・光属性モンスター１体を手札に加える。")
        .with_effects(CardEffects::new().on_release(benten_on_release)),
    )?;
    Ok(())
}

// === 宣告者の神巫 ===

fn fairy_in_deck_or_extra(state: &GameState) -> Vec<EntityId> {
    CardSelector::new(state)
        .deck()
        .extra_deck()
        .monster()
        .definition(|d| d.monster_stats().is_some_and(|s| s.race == Race::Fairy))
        .get()
}

fn herald_priestess_on_summon(state: &mut GameState, card: EntityId) -> EffectResult {
    if !with_turn_at_once_condition(state, card, Some(HERALD_SUMMON_KEY), |s, _| !fairy_in_deck_or_extra(s).is_empty())
    {
        return Ok(());
    }
    with_turn_at_once_effect(state, card, Some(HERALD_SUMMON_KEY), |state, card| {
        with_user_select_card(
            state,
            card,
            fairy_in_deck_or_extra,
            SelectOptions::single()
                .with_message("墓地へ送る天使族モンスターを選択してください")
                .cancellable(),
            |state, card, selected| {
                for sent in selected {
                    let level = state.definition(sent).and_then(|d| d.level()).map_or(0, i32::from);
                    send_card(state, sent, Destination::Graveyard, SendOptions::default())?;
                    add_buf(state, card, Buff::new(0, 0, level))?;
                }
                Ok(())
            },
        );
        Ok(())
    })?;
    Ok(())
}

// === 竜輝巧－バンα ===

/// Drytron or ritual monsters in hand or on the field, other than any
/// バンα.
fn ban_alpha_release_targets(state: &GameState, card: EntityId) -> Vec<EntityId> {
    let own_name = state.name_of(card).unwrap_or_default().to_string();
    CardSelector::new(state)
        .hand()
        .field_monsters()
        .monster()
        .excluding(card)
        .filter(|s, c| {
            s.definition(c)
                .is_some_and(|d| d.name != own_name && (d.name.contains(DRYTRON) || d.is_ritual_monster()))
        })
        .get()
}

fn ban_alpha_condition(state: &GameState, card: EntityId) -> bool {
    let from_hand_or_graveyard = matches!(state.location_of(card), Some(Location::Hand | Location::Graveyard));
    from_hand_or_graveyard
        && with_turn_at_once_condition(state, card, None, |s, c| {
            let targets = ban_alpha_release_targets(s, c);
            let frees_zone = targets.iter().any(|t| is_at(s, *t, Location::MonsterField));
            !targets.is_empty() && (frees_zone || find_empty_monster_zone(s).is_some())
        })
}

fn ban_alpha_effect(state: &mut GameState, card: EntityId) -> EffectResult {
    with_turn_at_once_effect(state, card, None, |state, card| {
        with_user_select_card(
            state,
            card,
            move |s| ban_alpha_release_targets(s, card),
            SelectOptions::single().with_message("リリースするモンスターを選択してください"),
            |state, card, selected| {
                for target in selected {
                    release_card(state, target)?;
                }
                if !matches!(state.location_of(card), Some(Location::Hand | Location::Graveyard)) {
                    return Ok(());
                }
                with_user_summon(
                    state,
                    card,
                    card,
                    SummonOptions::default().in_position(Position::Defense),
                    |state, card, _| {
                        if CardSelector::new(state).deck().ritual_monster().is_empty() {
                            return Ok(());
                        }
                        with_user_select_card(
                            state,
                            card,
                            |s| CardSelector::new(s).deck().ritual_monster().get(),
                            SelectOptions::single()
                                .with_message("手札に加える儀式モンスターを選択してください")
                                .cancellable(),
                            |state, _, selected| {
                                for searched in selected {
                                    send_card(state, searched, Destination::Hand, SendOptions::default())?;
                                }
                                Ok(())
                            },
                        );
                        Ok(())
                    },
                )
            },
        );
        Ok(())
    })?;
    Ok(())
}

// === サイバー・エンジェル－弁天－ ===

fn light_fairy_in_deck(state: &GameState) -> Vec<EntityId> {
    CardSelector::new(state)
        .deck()
        .monster()
        .definition(|d| {
            d.monster_stats()
                .is_some_and(|s| s.race == Race::Fairy && s.element == Element::Light)
        })
        .get()
}

fn benten_on_release(state: &mut GameState, card: EntityId) -> EffectResult {
    if light_fairy_in_deck(state).is_empty() {
        return Ok(());
    }
    with_user_select_card(
        state,
        card,
        light_fairy_in_deck,
        SelectOptions::single()
            .with_order(999)
            .with_message("手札に加える天使族・光属性モンスターを選択してください")
            .cancellable(),
        |state, _, selected| {
            for searched in selected {
                send_card(state, searched, Destination::Hand, SendOptions::default())?;
            }
            Ok(())
        },
    );
    Ok(())
}
