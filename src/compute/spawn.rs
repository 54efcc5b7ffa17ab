//! Round construction and projectile creation.

use crate::config::GameConfig;
use crate::entities::{Bullet, BulletOwner, Invader, InvaderKind, Player};

/// Top row is worth the most, the two rows below it are the middle tier,
/// everything further down is the bottom tier.
pub fn kind_for_row(row: u32) -> InvaderKind {
    match row {
        0 => InvaderKind::Elite,
        1 | 2 => InvaderKind::Guard,
        _ => InvaderKind::Grunt,
    }
}

/// Player centred horizontally on its fixed row.
pub fn spawn_player(config: &GameConfig) -> Player {
    Player {
        x: (config.field_width - config.player_width) / 2.0,
        y: config.player_y(),
    }
}

/// Lay out the full grid, ids assigned row-major starting at 0.
pub fn spawn_formation(config: &GameConfig) -> Vec<Invader> {
    let mut invaders = Vec::with_capacity(config.grid_size() as usize);
    let mut id = 0;
    for row in 0..config.grid_rows {
        for col in 0..config.grid_cols {
            invaders.push(Invader {
                id,
                x: config.invader_start_x + col as f32 * config.column_pitch(),
                y: config.invader_start_y
                    + row as f32 * (config.invader_height + config.invader_spacing_y),
                kind: kind_for_row(row),
            });
            id += 1;
        }
    }
    invaders
}

/// A player bullet leaves from the middle of the ship's top edge.
pub fn player_bullet(id: u32, player: &Player, config: &GameConfig) -> Bullet {
    Bullet {
        id,
        x: player.x + config.player_width / 2.0 - config.player_bullet_width / 2.0,
        y: player.y,
        owner: BulletOwner::Player,
    }
}

/// An invader bullet drops from the middle of the invader's bottom edge.
pub fn invader_bullet(id: u32, invader: &Invader, config: &GameConfig) -> Bullet {
    Bullet {
        id,
        x: invader.x + config.invader_width / 2.0 - config.invader_bullet_width / 2.0,
        y: invader.y + config.invader_height,
        owner: BulletOwner::Invader,
    }
}
