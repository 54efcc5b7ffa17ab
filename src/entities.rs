//! All game entity types — pure data, no logic.
//!
//! Positions are field coordinates (pixels of the 800×600 playfield by
//! default) with the origin in the top-left corner and `y` growing down.

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InvaderKind {
    Grunt,
    Guard,
    Elite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    StartScreen,
    Playing,
    GameOver,
    Win,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::Win)
    }
}

/// Shared horizontal heading of the whole formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Invader,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    /// Unique for the lifetime of the round.
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub owner: BulletOwner,
}

// ── Player & invaders ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    /// Fixed for the whole round.
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Invader {
    /// Assigned row-major at spawn, stable for the round.
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub kind: InvaderKind,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Read-only snapshot of the controls, taken once at the start of a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Press edge of the fire key, not its held state.
    pub fire: bool,
}

// ── Round state ───────────────────────────────────────────────────────────────

/// The entire state of one play-through.  Cloneable so the pure update
/// functions can return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    pub config: GameConfig,
    pub player: Player,
    /// Live invaders in ascending id order.
    pub invaders: Vec<Invader>,
    /// Live bullets of both owners, in creation order.
    pub bullets: Vec<Bullet>,
    pub direction: Direction,
    pub score: u32,
    pub lives: u32,
    pub status: GameStatus,
    pub tick: u64,
    /// Tick on which the player last fired, if ever.
    pub last_player_shot: Option<u64>,
    pub next_bullet_id: u32,
}
