//! Playfield geometry and tuning.
//!
//! Every value has a built-in default; a JSON file can override any subset
//! of them (`#[serde(default)]`).  Loaded values are validated before a
//! round may be built from them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 300 ms at the 60 Hz display rate the loop runs at.
pub const DEFAULT_FIRE_COOLDOWN_TICKS: u64 = 18;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// How repeated player fire is limited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FireGate {
    /// At least `ticks` ticks must pass between two shots.
    Cooldown { ticks: u64 },
    /// A new shot is refused while a player bullet is still live.
    SingleLiveBullet,
}

/// Horizontal speed of the formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepProfile {
    /// Always `sweep_speed`, whatever the live count.  The component-based
    /// variant of the game moved its formation at 1.0 per tick; set
    /// `sweep_speed` to 1.0 alongside this profile to reproduce it.
    Constant,
    /// `sweep_speed × (1 + destroyed / total)`: the fewer invaders left,
    /// the faster they move.
    Ramped,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,

    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    /// Gap between the player's bottom edge and the bottom of the field.
    pub player_bottom_margin: f32,

    pub player_bullet_width: f32,
    pub player_bullet_height: f32,
    pub player_bullet_speed: f32,
    pub fire_gate: FireGate,

    pub invader_bullet_width: f32,
    pub invader_bullet_height: f32,
    pub invader_bullet_speed: f32,
    /// Per-tick probability that a column's lowest invader fires.
    pub invader_fire_chance: f64,

    pub grid_rows: u32,
    pub grid_cols: u32,
    pub invader_width: f32,
    pub invader_height: f32,
    pub invader_spacing_x: f32,
    pub invader_spacing_y: f32,
    pub invader_start_x: f32,
    pub invader_start_y: f32,
    pub sweep_speed: f32,
    pub sweep_profile: SweepProfile,
    pub descend_step: f32,

    pub initial_lives: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,

            player_width: 50.0,
            player_height: 25.0,
            player_speed: 8.0,
            player_bottom_margin: 20.0,

            player_bullet_width: 5.0,
            player_bullet_height: 15.0,
            player_bullet_speed: 10.0,
            fire_gate: FireGate::Cooldown {
                ticks: DEFAULT_FIRE_COOLDOWN_TICKS,
            },

            invader_bullet_width: 5.0,
            invader_bullet_height: 10.0,
            invader_bullet_speed: 5.0,
            invader_fire_chance: 0.01,

            grid_rows: 5,
            grid_cols: 11,
            invader_width: 40.0,
            invader_height: 30.0,
            invader_spacing_x: 20.0,
            invader_spacing_y: 20.0,
            invader_start_x: 50.0,
            invader_start_y: 50.0,
            sweep_speed: 0.5,
            sweep_profile: SweepProfile::Ramped,
            descend_step: 20.0,

            initial_lives: 3,
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a positive number, got {}", value)))
    }
}

impl GameConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let dimensions = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("player_bullet_width", self.player_bullet_width),
            ("player_bullet_height", self.player_bullet_height),
            ("player_bullet_speed", self.player_bullet_speed),
            ("invader_bullet_width", self.invader_bullet_width),
            ("invader_bullet_height", self.invader_bullet_height),
            ("invader_bullet_speed", self.invader_bullet_speed),
            ("invader_width", self.invader_width),
            ("invader_height", self.invader_height),
            ("sweep_speed", self.sweep_speed),
            ("descend_step", self.descend_step),
        ];
        for (field, value) in dimensions {
            require_positive(field, value)?;
        }

        if self.player_width > self.field_width {
            return Err(invalid("player_width", "wider than the field"));
        }
        if self.player_bottom_margin < 0.0
            || self.player_bottom_margin + self.player_height > self.field_height
        {
            return Err(invalid(
                "player_bottom_margin",
                "player would not fit inside the field",
            ));
        }
        if self.grid_rows == 0 {
            return Err(invalid("grid_rows", "must be at least 1"));
        }
        if self.grid_cols == 0 {
            return Err(invalid("grid_cols", "must be at least 1"));
        }
        if self.column_pitch() <= 0.0 {
            return Err(invalid(
                "invader_spacing_x",
                format!("column pitch must be positive, got {}", self.column_pitch()),
            ));
        }
        if self.invader_spacing_y < 0.0 {
            return Err(invalid("invader_spacing_y", "must not be negative"));
        }
        if self.invader_start_x < 0.0 {
            return Err(invalid("invader_start_x", "must not be negative"));
        }
        let grid_right = self.invader_start_x
            + (self.grid_cols - 1) as f32 * self.column_pitch()
            + self.invader_width;
        if grid_right >= self.field_width {
            return Err(invalid(
                "grid_cols",
                format!(
                    "formation right edge {} must stay below the field width {}",
                    grid_right, self.field_width
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.invader_fire_chance) {
            return Err(invalid(
                "invader_fire_chance",
                format!("must be within [0, 1], got {}", self.invader_fire_chance),
            ));
        }
        if self.initial_lives == 0 {
            return Err(invalid("initial_lives", "must be at least 1"));
        }
        if let FireGate::Cooldown { ticks: 0 } = self.fire_gate {
            return Err(invalid("fire_gate", "cooldown must be at least one tick"));
        }
        Ok(())
    }

    /// Fixed y of the player's top edge.
    pub fn player_y(&self) -> f32 {
        self.field_height - self.player_height - self.player_bottom_margin
    }

    /// Horizontal distance between the left edges of two neighbouring columns.
    pub fn column_pitch(&self) -> f32 {
        self.invader_width + self.invader_spacing_x
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_rows * self.grid_cols
    }
}
