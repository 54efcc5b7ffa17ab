//! Per-tick movement of the player, bullets and the formation.

use crate::config::{GameConfig, SweepProfile};
use crate::entities::{Bullet, BulletOwner, Direction, Invader, Player, TickInput};

/// Move the player by the held keys; left and right together cancel out.
pub fn move_player(player: &Player, input: &TickInput, config: &GameConfig) -> Player {
    let mut dx = 0.0;
    if input.left {
        dx -= config.player_speed;
    }
    if input.right {
        dx += config.player_speed;
    }
    let max_x = config.field_width - config.player_width;
    Player {
        x: (player.x + dx).clamp(0.0, max_x),
        ..player.clone()
    }
}

/// Move every bullet one step along its owner's heading.  Out-of-bounds
/// bullets are kept here; they are dropped after collision resolution.
pub fn advance_bullets(bullets: &[Bullet], config: &GameConfig) -> Vec<Bullet> {
    bullets
        .iter()
        .map(|b| {
            let y = match b.owner {
                BulletOwner::Player => b.y - config.player_bullet_speed,
                BulletOwner::Invader => b.y + config.invader_bullet_speed,
            };
            Bullet { y, ..b.clone() }
        })
        .collect()
}

pub fn is_out_of_bounds(bullet: &Bullet, config: &GameConfig) -> bool {
    match bullet.owner {
        BulletOwner::Player => bullet.y < 0.0,
        BulletOwner::Invader => bullet.y > config.field_height,
    }
}

/// Horizontal formation speed for the given number of live invaders.
pub fn sweep_speed(config: &GameConfig, live: usize) -> f32 {
    match config.sweep_profile {
        SweepProfile::Constant => config.sweep_speed,
        SweepProfile::Ramped => {
            let total = config.grid_size() as f32;
            let destroyed = (total - live as f32).max(0.0);
            config.sweep_speed * (1.0 + destroyed / total)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sweep {
    pub invaders: Vec<Invader>,
    pub direction: Direction,
    pub wall_hit: bool,
}

/// Slide the formation sideways.  The wall test uses the post-slide x, so
/// an invader can end a tick slightly past a wall; the flip and one descent
/// step apply to the whole formation at most once per tick.
pub fn sweep_formation(
    invaders: &[Invader],
    direction: Direction,
    speed: f32,
    config: &GameConfig,
) -> Sweep {
    let dx = speed * direction.sign();
    let right_wall = config.field_width - config.invader_width;

    let mut moved: Vec<Invader> = invaders
        .iter()
        .map(|inv| Invader { x: inv.x + dx, ..inv.clone() })
        .collect();

    let wall_hit = moved.iter().any(|inv| inv.x <= 0.0 || inv.x >= right_wall);
    if !wall_hit {
        return Sweep { invaders: moved, direction, wall_hit };
    }

    for inv in &mut moved {
        inv.y += config.descend_step;
    }
    Sweep {
        invaders: moved,
        direction: direction.flipped(),
        wall_hit,
    }
}
