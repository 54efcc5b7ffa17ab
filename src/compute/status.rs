//! Whether a round is still on after this tick.

use crate::entities::{GameStatus, Round};

/// End-of-tick verdict.  Checks run in a fixed order: exhausted lives beat
/// a cleared field, which beats invaders reaching the player's row.
pub fn evaluate(state: &Round) -> GameStatus {
    if state.lives == 0 {
        return GameStatus::GameOver;
    }
    if state.invaders.is_empty() {
        return GameStatus::Win;
    }
    if invaders_landed(state) {
        return GameStatus::GameOver;
    }
    GameStatus::Playing
}

/// Any invader's bottom edge at or below the player's top edge.
pub fn invaders_landed(state: &Round) -> bool {
    let height = state.config.invader_height;
    state
        .invaders
        .iter()
        .any(|inv| inv.y + height >= state.player.y)
}
