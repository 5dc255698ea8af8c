//! Extra deck monsters.

use crate::cards::{
    CardDefinition, CardId, CardRegistry, Element, LinkArrow, Location, MonsterStats, MonsterType, Race, SpellKind,
    SummonType,
};
use crate::core::{EntityId, GameState};
use crate::effects::{
    is_at, sum_level, sum_link, with_turn_at_once_condition, with_turn_at_once_effect, with_user_select_card,
    Activation, CardEffects, CardSelector, SelectOptions,
};
use crate::error::{DuelError, EffectResult};
use crate::zones::{release_card, send_card, Destination, SendOptions};

pub const HERALD_OF_THE_ARC_LIGHT: CardId = CardId(201);
pub const LINKURIBOH: CardId = CardId(202);
pub const BARRICADEBORG: CardId = CardId(203);
pub const BEATRICE: CardId = CardId(204);

pub fn register(registry: &mut CardRegistry) -> Result<(), DuelError> {
    registry.register(
        CardDefinition::monster(
            HERALD_OF_THE_ARC_LIGHT,
            "虹光の宣告者",
            MonsterStats::new(MonsterType::Synchro, Element::Light, Race::Fairy, 4, 600, 1000)
                .with_materials(any_monster, herald_materials),
        )
        .with_text("チューナー＋チューナー以外のモンスター１体以上\n(2)：モンスターの効果・魔法・罠カードが発動した時、このカードをリリースして発動できる。その発動を無効にし破壊する。\n(3)：このカードが墓地へ送られた場合に発動できる。デッキから儀式モンスター１体または儀式魔法カード１枚を手札に加える。")
        .with_effects(
            CardEffects::new()
                .with_chain(herald_can_negate, herald_negate)
                .on_anywhere_to_graveyard(herald_search),
        ),
    )?;
    registry.register(
        CardDefinition::monster(
            LINKURIBOH,
            "リンクリボー",
            MonsterStats::link(Element::Dark, Race::Cyberse, 300, &[LinkArrow::Down])
                .with_materials(has_level, linkuriboh_materials),
        )
        .with_text("レベル1モンスター1体\n①このカードがリンク召喚に成功した時に発動できる。デッキからレベル1モンスター1体を墓地へ送る。")
        .with_effects(CardEffects::new().on_summon(linkuriboh_on_summon)),
    )?;
    registry.register(
        CardDefinition::monster(
            BARRICADEBORG,
            "警衛バリケイドベルグ",
            MonsterStats::link(Element::Dark, Race::Machine, 1000, &[LinkArrow::Left, LinkArrow::Down])
                .with_materials(any_monster, barricadeborg_materials),
        )
        .with_text("カード名が異なるモンスター２体"),
    )?;
    registry.register(
        CardDefinition::monster(
            BEATRICE,
            "永遠の淑女 ベアトリーチェ",
            MonsterStats::xyz(Element::Light, Race::Fairy, 6, 2500, 2800).with_materials(has_level, beatrice_materials),
        )
        .with_text("レベル６モンスター×２\n①1ターンに1度、このカードのX素材を1つ取り除いて発動できる。デッキからカード1枚を選んで墓地へ送る。")
        .with_effects(CardEffects::new().with_ignition(Activation::new(beatrice_condition, beatrice_effect))),
    )?;
    Ok(())
}

fn any_monster(state: &GameState, card: EntityId) -> bool {
    state.definition(card).is_some_and(|d| d.is_monster())
}

fn has_level(state: &GameState, card: EntityId) -> bool {
    state.level_of(card).is_some()
}

fn is_tuner(state: &GameState, card: EntityId) -> bool {
    state
        .definition(card)
        .and_then(|d| d.monster_stats())
        .is_some_and(|s| s.tuner)
}

// === 虹光の宣告者 ===

fn herald_materials(state: &GameState, materials: &[EntityId]) -> bool {
    sum_level(state, materials) == 4
        && materials.iter().any(|m| is_tuner(state, *m))
        && materials.iter().any(|m| !is_tuner(state, *m))
}

fn herald_can_negate(state: &GameState, responder: EntityId, activated: EntityId) -> bool {
    responder != activated
        && is_at(state, responder, Location::MonsterField)
        && state.card(responder).is_some_and(|c| c.is_face_up())
}

fn herald_negate(state: &mut GameState, responder: EntityId, _activated: EntityId) -> EffectResult {
    release_card(state, responder)
}

fn ritual_cards_in_deck(state: &GameState) -> Vec<EntityId> {
    CardSelector::new(state)
        .deck()
        .definition(|d| d.is_ritual_monster() || d.spell_kind() == Some(SpellKind::Ritual))
        .get()
}

fn herald_search(state: &mut GameState, card: EntityId) -> EffectResult {
    if ritual_cards_in_deck(state).is_empty() {
        return Ok(());
    }
    with_user_select_card(
        state,
        card,
        ritual_cards_in_deck,
        SelectOptions::single()
            .with_message("デッキから儀式モンスターまたは儀式魔法カードを1枚選んでください")
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

// === リンクリボー ===

fn linkuriboh_materials(state: &GameState, materials: &[EntityId]) -> bool {
    matches!(materials, [only] if state.level_of(*only) == Some(1)) && sum_link(state, materials) == 1
}

fn linkuriboh_on_summon(state: &mut GameState, card: EntityId) -> EffectResult {
    let link_summoned = state.card(card).is_some_and(|c| c.summoned_by == Some(SummonType::Link));
    if !link_summoned || CardSelector::new(state).deck().monster().level(1).is_empty() {
        return Ok(());
    }
    with_user_select_card(
        state,
        card,
        |s| CardSelector::new(s).deck().monster().level(1).get(),
        SelectOptions::single()
            .with_message("墓地へ送るレベル1モンスターを選択してください")
            .cancellable(),
        |state, _, selected| {
            for sent in selected {
                send_card(state, sent, Destination::Graveyard, SendOptions::default())?;
            }
            Ok(())
        },
    );
    Ok(())
}

// === 警衛バリケイドベルグ ===

fn barricadeborg_materials(state: &GameState, materials: &[EntityId]) -> bool {
    match materials {
        [a, b] => state.name_of(*a) != state.name_of(*b) && sum_link(state, materials) == 2,
        _ => false,
    }
}

// === 永遠の淑女 ベアトリーチェ ===

fn beatrice_materials(state: &GameState, materials: &[EntityId]) -> bool {
    materials.len() == 2 && materials.iter().all(|m| state.level_of(*m) == Some(6))
}

fn beatrice_condition(state: &GameState, card: EntityId) -> bool {
    is_at(state, card, Location::MonsterField)
        && state.card(card).is_some_and(|c| !c.materials.is_empty())
        && !state.zones.deck.is_empty()
        && with_turn_at_once_condition(state, card, None, |_, _| true)
}

fn beatrice_effect(state: &mut GameState, card: EntityId) -> EffectResult {
    with_turn_at_once_effect(state, card, None, |state, card| {
        with_user_select_card(
            state,
            card,
            move |s| s.card(card).map(|c| c.materials.to_vec()).unwrap_or_default(),
            SelectOptions::single().with_message("取り除くX素材を選択してください"),
            |state, card, selected| {
                for material in selected {
                    send_card(state, material, Destination::Graveyard, SendOptions::default())?;
                }
                with_user_select_card(
                    state,
                    card,
                    |s| CardSelector::new(s).deck().get(),
                    SelectOptions::single().with_message("墓地へ送るカードを選択してください"),
                    |state, _, selected| {
                        for sent in selected {
                            send_card(state, sent, Destination::Graveyard, SendOptions::default())?;
                        }
                        Ok(())
                    },
                );
                Ok(())
            },
        );
        Ok(())
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DuelConfig;
    use crate::games::drytron_exodia::cards;
    use crate::zones::Pile;

    fn state() -> GameState {
        let mut registry = CardRegistry::new();
        cards::register(&mut registry).unwrap();
        register(&mut registry).unwrap();
        GameState::new(DuelConfig::default(), registry, 8)
    }

    #[test]
    fn test_herald_needs_tuner_and_non_tuner() {
        let mut state = state();
        let priestess = state.spawn(cards::HERALD_PRIESTESS, Pile::Hand).unwrap();
        let daruma = state.spawn(cards::CANNON_DARUMA, Pile::Hand).unwrap();
        let other_priestess = state.spawn(cards::HERALD_PRIESTESS, Pile::Hand).unwrap();
        let controller = state.spawn(cards::GENEX_CONTROLLER, Pile::Hand).unwrap();

        assert!(herald_materials(&state, &[priestess, daruma]));
        assert!(!herald_materials(&state, &[priestess, other_priestess]));
        assert!(!herald_materials(&state, &[priestess, controller]));
    }

    #[test]
    fn test_link_material_rules() {
        let mut state = state();
        let arm = state.spawn(cards::RIGHT_ARM, Pile::Hand).unwrap();
        let leg = state.spawn(cards::LEFT_LEG, Pile::Hand).unwrap();
        let daruma = state.spawn(cards::CANNON_DARUMA, Pile::Hand).unwrap();
        let other_daruma = state.spawn(cards::CANNON_DARUMA, Pile::Hand).unwrap();

        assert!(linkuriboh_materials(&state, &[arm]));
        assert!(!linkuriboh_materials(&state, &[daruma]));
        assert!(!linkuriboh_materials(&state, &[arm, leg]));

        assert!(barricadeborg_materials(&state, &[arm, daruma]));
        assert!(!barricadeborg_materials(&state, &[daruma, other_daruma]));
        assert!(!barricadeborg_materials(&state, &[arm]));
    }

    #[test]
    fn test_beatrice_needs_two_level_six() {
        let mut state = state();
        let a = state.spawn(cards::BENTEN, Pile::Hand).unwrap();
        let b = state.spawn(cards::BENTEN, Pile::Hand).unwrap();
        let c = state.spawn(cards::GENEX_CONTROLLER, Pile::Hand).unwrap();
        assert!(beatrice_materials(&state, &[a, b]));
        assert!(!beatrice_materials(&state, &[a, c]));
        assert!(!beatrice_materials(&state, &[a]));
    }
}
