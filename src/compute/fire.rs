//! Who shoots this tick.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;

use super::spawn::{invader_bullet, player_bullet};
use crate::config::{FireGate, GameConfig};
use crate::entities::{BulletOwner, Invader, Round};

/// Grid column an invader currently belongs to, relative to the spawn grid.
pub fn column_of(invader: &Invader, config: &GameConfig) -> i64 {
    ((invader.x - config.invader_start_x) / config.column_pitch()).round() as i64
}

/// The furthest-advanced invader of every column.
///
/// Invaders are examined in slice order (ascending id for a live round) and
/// a later one only takes over when it is strictly lower, so on equal `y`
/// the lowest id keeps the column.
pub fn column_leaders<'a>(
    invaders: &'a [Invader],
    config: &GameConfig,
) -> BTreeMap<i64, &'a Invader> {
    let mut leaders: BTreeMap<i64, &Invader> = BTreeMap::new();
    for inv in invaders {
        let col = column_of(inv, config);
        let takes_over = match leaders.get(&col) {
            Some(current) => inv.y > current.y,
            None => true,
        };
        if takes_over {
            leaders.insert(col, inv);
        }
    }
    leaders
}

/// One independent Bernoulli draw per column leader, columns visited left
/// to right.  Returns how many bullets were fired.
pub fn invader_fire(state: &mut Round, rng: &mut impl Rng) -> usize {
    let config = &state.config;
    let shooters: Vec<Invader> = column_leaders(&state.invaders, config)
        .into_values()
        .filter(|_| rng.gen_bool(config.invader_fire_chance))
        .cloned()
        .collect();

    for inv in &shooters {
        let bullet = invader_bullet(state.next_bullet_id, inv, &state.config);
        state.next_bullet_id += 1;
        state.bullets.push(bullet);
    }
    shooters.len()
}

/// Whether the fire gate lets the player shoot on the current tick.
pub fn player_can_fire(state: &Round) -> bool {
    match state.config.fire_gate {
        FireGate::Cooldown { ticks } => match state.last_player_shot {
            Some(last) => state.tick.saturating_sub(last) >= ticks,
            None => true,
        },
        FireGate::SingleLiveBullet => !state
            .bullets
            .iter()
            .any(|b| b.owner == BulletOwner::Player),
    }
}

/// Handle a fire press.  Returns `false` when the gate refused the shot.
pub fn player_fire(state: &mut Round) -> bool {
    if !player_can_fire(state) {
        return false;
    }
    let bullet = player_bullet(state.next_bullet_id, &state.player, &state.config);
    debug!(id = bullet.id, x = bullet.x, tick = state.tick, "player fired");
    state.next_bullet_id += 1;
    state.last_player_shot = Some(state.tick);
    state.bullets.push(bullet);
    true
}
