//! Pure game-logic functions.
//!
//! Every public entry point takes an immutable reference to the current
//! `Round` (and, where needed, an RNG handle) and returns a brand-new
//! `Round`.  Side effects are limited to the injected RNG and log events.

pub mod collision;
pub mod fire;
pub mod motion;
pub mod spawn;
pub mod status;

use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{Direction, GameStatus, Round, TickInput};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh round, ready to play.
pub fn init_state(config: GameConfig) -> Round {
    let state = fresh_round(config, GameStatus::Playing);
    info!(invaders = state.invaders.len(), lives = state.lives, "round started");
    state
}

/// A full formation waiting behind the title screen.  `tick` leaves it
/// frozen until [`begin`] is called.
pub fn title_round(config: GameConfig) -> Round {
    fresh_round(config, GameStatus::StartScreen)
}

/// Leave the title screen.  Any other status is returned unchanged.
pub fn begin(state: &Round) -> Round {
    let mut next = state.clone();
    if state.status == GameStatus::StartScreen {
        next.status = GameStatus::Playing;
        info!(invaders = next.invaders.len(), lives = next.lives, "round started");
    }
    next
}

/// Throw the round away and start over with the same configuration.
pub fn restart(state: &Round) -> Round {
    init_state(state.config.clone())
}

fn fresh_round(config: GameConfig, status: GameStatus) -> Round {
    let player = spawn::spawn_player(&config);
    let invaders = spawn::spawn_formation(&config);
    Round {
        lives: config.initial_lives,
        player,
        invaders,
        bullets: Vec::new(),
        direction: Direction::Right,
        score: 0,
        status,
        tick: 0,
        last_player_shot: None,
        next_bullet_id: 0,
        config,
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A round that is no longer `Playing` is returned unchanged.
pub fn tick(state: &Round, input: &TickInput, rng: &mut impl Rng) -> Round {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let config = &state.config;
    let mut next = state.clone();
    next.tick = state.tick + 1;

    // ── 1. Motion ────────────────────────────────────────────────────────────
    next.player = motion::move_player(&state.player, input, config);
    next.bullets = motion::advance_bullets(&state.bullets, config);

    let speed = motion::sweep_speed(config, state.invaders.len());
    let sweep = motion::sweep_formation(&state.invaders, state.direction, speed, config);
    if sweep.wall_hit {
        debug!(tick = next.tick, direction = ?sweep.direction, "formation hit a wall");
    }
    next.invaders = sweep.invaders;
    next.direction = sweep.direction;

    // ── 2. Fire ──────────────────────────────────────────────────────────────
    fire::invader_fire(&mut next, rng);
    if input.fire {
        fire::player_fire(&mut next);
    }

    // ── 3. Collisions ────────────────────────────────────────────────────────
    let outcome = collision::resolve(&next.player, &next.invaders, &next.bullets, config);
    collision::apply(&mut next, &outcome);

    // Bullets that left the field go in one pass after collisions
    next.bullets.retain(|b| !motion::is_out_of_bounds(b, config));

    // ── 4. Status ────────────────────────────────────────────────────────────
    next.status = status::evaluate(&next);
    if next.status != GameStatus::Playing {
        info!(
            tick = next.tick,
            status = ?next.status,
            score = next.score,
            lives = next.lives,
            "round finished"
        );
    }

    next
}
