//! Spells and traps.

use crate::cards::{CardDefinition, CardId, CardRegistry, Location, SpellKind, SummonType, TrapKind};
use crate::core::{EntityId, GameState};
use crate::effects::{
    is_at, pay_life_cost, sum_level, with_delay_recursive, with_option, with_turn_at_once_condition,
    with_turn_at_once_effect, with_user_select_card, with_user_summon, Activation, CardEffects, CardSelector,
    DelayOptions, OptionChoice, SelectOptions, SummonOptions,
};
use crate::error::{DuelError, EffectResult};
use crate::rules::{draw_by_effect, find_empty_monster_zone};
use crate::zones::{send_card, Destination, SendOptions};

pub const HIGH_RITUAL_ART: CardId = CardId(101);
pub const ONE_FOR_ONE: CardId = CardId(102);
pub const FOOLISH_BURIAL: CardId = CardId(103);
pub const CHICKEN_GAME: CardId = CardId(104);
pub const SPELL_ECONOMICS: CardId = CardId(105);
pub const BACKUP_SOLDIER: CardId = CardId(106);

const CHICKEN_GAME_COST: i64 = 1000;
const CHICKEN_GAME_DRAW: &str = "デッキから１枚ドローする";
const CHICKEN_GAME_DESTROY: &str = "このカードを破壊する";
const CHICKEN_GAME_HEAL: &str = "相手は１０００ＬＰ回復する";

/// Graveyard monsters 補充要員 needs before it can be activated.
const BACKUP_SOLDIER_GRAVEYARD: usize = 5;

fn always(_: &GameState, _: EntityId) -> bool {
    true
}

fn no_effect(_: &mut GameState, _: EntityId) -> EffectResult {
    Ok(())
}

fn add_to_hand(state: &mut GameState, _: EntityId, cards: Vec<EntityId>) -> EffectResult {
    for card in cards {
        send_card(state, card, Destination::Hand, SendOptions::default())?;
    }
    Ok(())
}

pub fn register(registry: &mut CardRegistry) -> Result<(), DuelError> {
    registry.register(
        CardDefinition::spell(HIGH_RITUAL_ART, "高等儀式術", SpellKind::Ritual)
            .with_text("儀式モンスターの降臨に必要。①：レベルの合計が儀式召喚するモンスターと同じになるように、デッキから通常モンスターを墓地へ送り、手札から儀式モンスター１体を儀式召喚する。")
            .with_effects(CardEffects::new().with_spell(Activation::new(high_ritual_art_condition, high_ritual_art_effect))),
    )?;
    registry.register(
        CardDefinition::spell(ONE_FOR_ONE, "ワン・フォー・ワン", SpellKind::Normal)
            .with_text("①：手札からモンスター１体を墓地へ送って発動できる。手札・デッキからレベル１モンスター１体を特殊召喚する。")
            .with_effects(CardEffects::new().with_spell(Activation::new(one_for_one_condition, one_for_one_effect))),
    )?;
    registry.register(
        CardDefinition::spell(FOOLISH_BURIAL, "おろかな埋葬", SpellKind::Normal)
            .with_text("①：デッキからモンスター１体を墓地へ送る。")
            .with_effects(
                CardEffects::new().with_spell(Activation::new(foolish_burial_condition, foolish_burial_effect)),
            ),
    )?;
    registry.register(
        CardDefinition::spell(CHICKEN_GAME, "チキンレース", SpellKind::Field)
            .with_text("①：相手よりLPが少ないプレイヤーが受ける全てのダメージは０になる。②：お互いのプレイヤーは１ターンに１度、自分メインフェイズに１０００LPを払って以下の効果から１つを選択して発動できる。")
            .with_effects(
                CardEffects::new()
                    .with_spell(Activation::new(always, no_effect))
                    .with_ignition(Activation::new(chicken_game_condition, chicken_game_effect)),
            ),
    )?;
    registry.register(
        CardDefinition::spell(SPELL_ECONOMICS, "魔力倹約術", SpellKind::Continuous)
            .with_text("①：魔法カードを発動するために払うLPが必要なくなる。")
            .with_effects(
                CardEffects::new()
                    .with_spell(Activation::new(always, no_effect))
                    .on_pay_life_cost(spell_economics_cost),
            ),
    )?;
    registry.register(
        CardDefinition::trap(BACKUP_SOLDIER, "補充要員", TrapKind::Normal)
            .with_text("①：自分の墓地のモンスターが５体以上の場合、その内の攻撃力１５００以下の効果モンスター以外のモンスターを３体まで選択して発動できる。そのモンスターを手札に加える。")
            .with_effects(
                CardEffects::new().with_spell(Activation::new(backup_soldier_condition, backup_soldier_effect)),
            ),
    )?;
    Ok(())
}

// === 高等儀式術 ===

/// Whether some subset of `levels` sums to exactly `target`.
fn level_sum_reachable(levels: &[i32], target: i32) -> bool {
    let Ok(target) = usize::try_from(target) else {
        return false;
    };
    if target == 0 {
        return false;
    }
    let mut reachable = vec![false; target + 1];
    reachable[0] = true;
    for level in levels.iter().filter_map(|l| usize::try_from(*l).ok()).filter(|l| *l > 0) {
        for sum in (level..=target).rev() {
            if reachable[sum - level] {
                reachable[sum] = true;
            }
        }
    }
    reachable[target]
}

fn ritual_material_pool(state: &GameState) -> Vec<EntityId> {
    CardSelector::new(state).deck().normal_monster().get()
}

/// Ritual monsters in hand whose level the deck's normal monsters can
/// match.
fn high_ritual_art_targets(state: &GameState) -> Vec<EntityId> {
    let pool = ritual_material_pool(state);
    let levels: Vec<i32> = pool.iter().filter_map(|c| state.level_of(*c)).collect();
    CardSelector::new(state)
        .hand()
        .ritual_monster()
        .filter(|s, c| s.level_of(c).is_some_and(|l| level_sum_reachable(&levels, l)))
        .get()
}

fn high_ritual_art_condition(state: &GameState, card: EntityId) -> bool {
    with_turn_at_once_condition(state, card, None, |s, _| {
        !high_ritual_art_targets(s).is_empty() && find_empty_monster_zone(s).is_some()
    })
}

fn high_ritual_art_effect(state: &mut GameState, card: EntityId) -> EffectResult {
    with_turn_at_once_effect(state, card, None, |state, card| {
        with_user_select_card(
            state,
            card,
            high_ritual_art_targets,
            SelectOptions::single().with_message("儀式召喚するモンスターを選択してください"),
            |state, card, selected| {
                let Some(&ritual) = selected.first() else {
                    return Ok(());
                };
                let level = state.level_of(ritual).unwrap_or(0);
                with_user_select_card(
                    state,
                    card,
                    ritual_material_pool,
                    SelectOptions::multi()
                        .with_condition(move |s, chosen| sum_level(s, chosen) == level)
                        .with_message("墓地へ送る通常モンスターを選択してください"),
                    move |state, card, materials| {
                        let sent = materials.clone();
                        with_delay_recursive(
                            state,
                            card,
                            DelayOptions::default(),
                            materials.len(),
                            move |state, _, depth| {
                                send_card(state, sent[depth - 1], Destination::Graveyard, SendOptions::default())
                            },
                            move |state, card| {
                                with_user_summon(
                                    state,
                                    card,
                                    ritual,
                                    SummonOptions::default().with_summon_type(SummonType::Ritual),
                                    |_, _, _| Ok(()),
                                )
                            },
                        )
                    },
                );
                Ok(())
            },
        );
        Ok(())
    })?;
    Ok(())
}

// === ワン・フォー・ワン ===

fn level_one_targets(state: &GameState) -> Vec<EntityId> {
    CardSelector::new(state).hand().deck().monster().level(1).get()
}

/// Hand monsters that may be sent as the cost; the only level 1 target
/// left cannot pay for itself.
fn one_for_one_costs(state: &GameState) -> Vec<EntityId> {
    let targets = level_one_targets(state);
    let reserved = match targets.as_slice() {
        [only] => Some(*only),
        _ => None,
    };
    CardSelector::new(state)
        .hand()
        .monster()
        .filter(|_, c| Some(c) != reserved)
        .get()
}

fn one_for_one_condition(state: &GameState, _card: EntityId) -> bool {
    !one_for_one_costs(state).is_empty()
        && !level_one_targets(state).is_empty()
        && find_empty_monster_zone(state).is_some()
}

fn one_for_one_effect(state: &mut GameState, card: EntityId) -> EffectResult {
    with_user_select_card(
        state,
        card,
        one_for_one_costs,
        SelectOptions::single().with_message("墓地へ送るモンスターを選択してください"),
        |state, card, selected| {
            for cost in selected {
                send_card(state, cost, Destination::Graveyard, SendOptions::default())?;
            }
            with_user_select_card(
                state,
                card,
                level_one_targets,
                SelectOptions::single().with_message("特殊召喚するレベル１モンスターを選択してください"),
                |state, card, selected| match selected.first() {
                    Some(&target) => with_user_summon(state, card, target, SummonOptions::default(), |_, _, _| Ok(())),
                    None => Ok(()),
                },
            );
            Ok(())
        },
    );
    Ok(())
}

// === おろかな埋葬 ===

fn foolish_burial_condition(state: &GameState, _card: EntityId) -> bool {
    !CardSelector::new(state).deck().monster().is_empty()
}

fn foolish_burial_effect(state: &mut GameState, card: EntityId) -> EffectResult {
    with_user_select_card(
        state,
        card,
        |s| CardSelector::new(s).deck().monster().get(),
        SelectOptions::single().with_message("墓地へ送るモンスターを選択してください"),
        |state, _, selected| {
            for sent in selected {
                send_card(state, sent, Destination::Graveyard, SendOptions::default())?;
            }
            Ok(())
        },
    );
    Ok(())
}

// === チキンレース ===

fn chicken_game_condition(state: &GameState, card: EntityId) -> bool {
    is_at(state, card, Location::FieldZone)
        && state.card(card).is_some_and(|c| c.is_face_up())
        && state.life_points >= CHICKEN_GAME_COST
        && with_turn_at_once_condition(state, card, None, |_, _| true)
}

fn chicken_game_effect(state: &mut GameState, card: EntityId) -> EffectResult {
    with_turn_at_once_effect(state, card, None, |state, card| {
        pay_life_cost(state, card, CHICKEN_GAME_COST);
        with_option(
            state,
            card,
            vec![
                OptionChoice::new(CHICKEN_GAME_DRAW, |s, _| !s.zones.deck.is_empty()),
                OptionChoice::always(CHICKEN_GAME_DESTROY),
                OptionChoice::always(CHICKEN_GAME_HEAL),
            ],
            false,
            |state, card, chosen| match chosen.as_str() {
                CHICKEN_GAME_DRAW => draw_by_effect(state, 1),
                CHICKEN_GAME_DESTROY => send_card(state, card, Destination::Graveyard, SendOptions::default()),
                _ => {
                    state.opponent_life_points += CHICKEN_GAME_COST;
                    Ok(())
                }
            },
        );
        Ok(())
    })?;
    Ok(())
}

// === 魔力倹約術 ===

/// Spells cost no life points while this card is face-up on the field.
fn spell_economics_cost(state: &GameState, modifier: EntityId, payer: EntityId, amount: i64) -> i64 {
    let active = is_at(state, modifier, Location::SpellField);
    let paying_spell = state.definition(payer).is_some_and(|d| d.is_spell());
    if active && paying_spell {
        0
    } else {
        amount
    }
}

// === 補充要員 ===

fn backup_soldier_targets(state: &GameState) -> Vec<EntityId> {
    CardSelector::new(state)
        .graveyard()
        .normal_monster()
        .attack_at_most(1500)
        .get()
}

fn backup_soldier_condition(state: &GameState, _card: EntityId) -> bool {
    CardSelector::new(state).graveyard().monster().len() >= BACKUP_SOLDIER_GRAVEYARD
        && !backup_soldier_targets(state).is_empty()
}

fn backup_soldier_effect(state: &mut GameState, card: EntityId) -> EffectResult {
    with_user_select_card(
        state,
        card,
        backup_soldier_targets,
        SelectOptions::multi()
            .with_condition(|_, chosen| (1..=3).contains(&chosen.len()))
            .with_message("手札に加えるモンスターを３体まで選択してください"),
        |state, card, selected| {
            let returned = selected.clone();
            with_delay_recursive(
                state,
                card,
                DelayOptions::default().with_order(-1),
                selected.len(),
                move |state, card, depth| add_to_hand(state, card, vec![returned[depth - 1]]),
                |_, _| Ok(()),
            )
        },
    );
    Ok(())
}
