//! Win judgement.
//!
//! The duel is one-sided: only the player acts, and the opponent exists
//! as a life total and a field zone. `judge_win` runs after every queue
//! resolution and after every draw; the first result found sticks.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::GameState;

/// The five pieces that win the duel when all are in hand.
pub const EXODIA_PIECES: [&str; 5] = [
    "封印されしエクゾディア",
    "封印されし者の右腕",
    "封印されし者の左腕",
    "封印されし者の右足",
    "封印されし者の左足",
];

/// How the duel ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// All five Exodia pieces were assembled in hand.
    Exodia,
    /// The opponent's life points reached zero.
    OpponentDefeated,
    /// The player had to draw from an empty deck.
    DeckOut,
    /// The player's life points reached zero.
    LifeZero,
}

impl GameResult {
    /// Whether the player won.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, GameResult::Exodia | GameResult::OpponentDefeated)
    }
}

/// Whether every Exodia piece is in hand.
#[must_use]
pub fn check_exodia_win(state: &GameState) -> bool {
    EXODIA_PIECES.iter().all(|piece| {
        state
            .zones
            .hand
            .iter()
            .any(|card| state.name_of(*card) == Some(*piece))
    })
}

/// Record the result if the duel has just been decided.
///
/// Returns the result, old or new.
pub fn judge_win(state: &mut GameState) -> Option<GameResult> {
    if state.result.is_some() {
        return state.result;
    }
    let result = if check_exodia_win(state) {
        Some(GameResult::Exodia)
    } else if state.opponent_life_points <= 0 {
        Some(GameResult::OpponentDefeated)
    } else if state.life_points <= 0 {
        Some(GameResult::LifeZero)
    } else {
        None
    };
    if let Some(result) = result {
        info!(?result, turn = state.turn.turn, "duel decided");
        state.result = Some(result);
    }
    result
}

/// End the duel with `result` unless it is already decided.
pub(crate) fn end_duel(state: &mut GameState, result: GameResult) {
    if state.result.is_none() {
        info!(?result, turn = state.turn.turn, "duel decided");
        state.result = Some(result);
    }
}
