//! Hit detection.
//!
//! Resolution runs against one consistent snapshot and only reports what
//! was hit; [`apply`] performs every removal afterwards in one go.

use crate::config::GameConfig;
use crate::entities::{Bullet, BulletOwner, Invader, InvaderKind, Player, Round};

/// Axis-aligned box in field coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Strict overlap: boxes that only share an edge do not touch.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

pub fn player_rect(player: &Player, config: &GameConfig) -> Rect {
    Rect {
        x: player.x,
        y: player.y,
        w: config.player_width,
        h: config.player_height,
    }
}

pub fn invader_rect(invader: &Invader, config: &GameConfig) -> Rect {
    Rect {
        x: invader.x,
        y: invader.y,
        w: config.invader_width,
        h: config.invader_height,
    }
}

pub fn bullet_rect(bullet: &Bullet, config: &GameConfig) -> Rect {
    let (w, h) = match bullet.owner {
        BulletOwner::Player => (config.player_bullet_width, config.player_bullet_height),
        BulletOwner::Invader => (config.invader_bullet_width, config.invader_bullet_height),
    };
    Rect { x: bullet.x, y: bullet.y, w, h }
}

/// Score awarded per invader destroyed.
pub fn points_for(kind: InvaderKind) -> u32 {
    match kind {
        InvaderKind::Grunt => 10,
        InvaderKind::Guard => 20,
        InvaderKind::Elite => 30,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Bullets of either owner consumed by a hit.
    pub spent_bullets: Vec<u32>,
    pub destroyed_invaders: Vec<u32>,
    pub score_gain: u32,
    /// One per invader bullet that struck the player.
    pub player_hits: u32,
}

impl CollisionOutcome {
    pub fn is_empty(&self) -> bool {
        self.spent_bullets.is_empty()
    }
}

/// Find every hit among the given entities.
///
/// Each player bullet takes the first overlapping invader in slice order
/// that no earlier bullet already claimed.  Every overlapping invader bullet
/// counts as a separate hit on the player.
pub fn resolve(
    player: &Player,
    invaders: &[Invader],
    bullets: &[Bullet],
    config: &GameConfig,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    // ── Player bullets ↔ invaders ──────────────────────────────────────────
    for bullet in bullets.iter().filter(|b| b.owner == BulletOwner::Player) {
        let hitbox = bullet_rect(bullet, config);
        let target = invaders.iter().find(|inv| {
            !outcome.destroyed_invaders.contains(&inv.id)
                && hitbox.overlaps(&invader_rect(inv, config))
        });
        if let Some(inv) = target {
            outcome.spent_bullets.push(bullet.id);
            outcome.destroyed_invaders.push(inv.id);
            outcome.score_gain += points_for(inv.kind);
        }
    }

    // ── Invader bullets ↔ player ───────────────────────────────────────────
    let ship = player_rect(player, config);
    for bullet in bullets.iter().filter(|b| b.owner == BulletOwner::Invader) {
        if bullet_rect(bullet, config).overlaps(&ship) {
            outcome.spent_bullets.push(bullet.id);
            outcome.player_hits += 1;
        }
    }

    outcome
}

/// Remove everything the outcome names and settle score and lives.
pub fn apply(state: &mut Round, outcome: &CollisionOutcome) {
    if outcome.is_empty() {
        return;
    }
    state
        .bullets
        .retain(|b| !outcome.spent_bullets.contains(&b.id));
    state
        .invaders
        .retain(|inv| !outcome.destroyed_invaders.contains(&inv.id));
    state.score += outcome.score_gain;
    state.lives = state.lives.saturating_sub(outcome.player_hits);
}
