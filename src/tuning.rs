//! Data-driven game balance
//!
//! Every gameplay constant lives here so balance can be tweaked from a JSON
//! file without recompiling. Missing fields fall back to [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure to load a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,

    pub actor_radius: f32,
    pub actor_margin: f32,
    pub actor_min_y_fraction: f32,
    pub actor_start_offset: f32,

    pub obstacle_interval: f32,
    pub obstacle_radius: (f32, f32),
    pub obstacle_speed: (f32, f32),
    pub obstacle_spawn_margin: f32,
    pub obstacle_spawn_offset: f32,

    pub projectile_interval: f32,
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    pub projectile_spawn_offset: f32,

    pub cull_margin: f32,
    pub points_per_hit: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            actor_radius: ACTOR_RADIUS,
            actor_margin: ACTOR_MARGIN,
            actor_min_y_fraction: ACTOR_MIN_Y_FRACTION,
            actor_start_offset: ACTOR_START_OFFSET,

            obstacle_interval: OBSTACLE_INTERVAL,
            obstacle_radius: (OBSTACLE_MIN_RADIUS, OBSTACLE_MAX_RADIUS),
            obstacle_speed: (OBSTACLE_MIN_SPEED, OBSTACLE_MAX_SPEED),
            obstacle_spawn_margin: OBSTACLE_SPAWN_MARGIN,
            obstacle_spawn_offset: OBSTACLE_SPAWN_OFFSET,

            projectile_interval: PROJECTILE_INTERVAL,
            projectile_speed: PROJECTILE_SPEED,
            projectile_radius: PROJECTILE_RADIUS,
            projectile_spawn_offset: PROJECTILE_SPAWN_OFFSET,

            cull_margin: CULL_MARGIN,
            points_per_hit: POINTS_PER_HIT,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load tuning from a JSON file on disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Repair values that would make the simulation misbehave
    ///
    /// Inverted ranges are swapped, non-finite or non-positive sizes and
    /// intervals fall back to defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        fn positive(value: f32, fallback: f32) -> f32 {
            if value.is_finite() && value > 0.0 { value } else { fallback }
        }
        fn non_negative(value: f32, fallback: f32) -> f32 {
            if value.is_finite() && value >= 0.0 { value } else { fallback }
        }
        fn ordered((lo, hi): (f32, f32), fallback: (f32, f32)) -> (f32, f32) {
            if !lo.is_finite() || !hi.is_finite() {
                return fallback;
            }
            if lo <= hi { (lo, hi) } else { (hi, lo) }
        }

        self.field_width = positive(self.field_width, defaults.field_width);
        self.field_height = positive(self.field_height, defaults.field_height);
        self.actor_radius = positive(self.actor_radius, defaults.actor_radius);
        self.actor_margin = non_negative(self.actor_margin, defaults.actor_margin)
            .min(self.field_width / 2.0)
            .min(self.field_height / 2.0);
        self.actor_min_y_fraction = if (0.0..=1.0).contains(&self.actor_min_y_fraction) {
            self.actor_min_y_fraction
        } else {
            defaults.actor_min_y_fraction
        };
        self.actor_start_offset =
            non_negative(self.actor_start_offset, defaults.actor_start_offset);

        self.obstacle_interval = positive(self.obstacle_interval, defaults.obstacle_interval);
        self.obstacle_radius = ordered(self.obstacle_radius, defaults.obstacle_radius);
        self.obstacle_speed = ordered(self.obstacle_speed, defaults.obstacle_speed);
        self.obstacle_spawn_margin =
            non_negative(self.obstacle_spawn_margin, defaults.obstacle_spawn_margin)
                .min(self.field_width / 2.0);
        self.obstacle_spawn_offset =
            non_negative(self.obstacle_spawn_offset, defaults.obstacle_spawn_offset);

        self.projectile_interval =
            positive(self.projectile_interval, defaults.projectile_interval);
        self.projectile_speed = non_negative(self.projectile_speed, defaults.projectile_speed);
        self.projectile_radius = non_negative(self.projectile_radius, defaults.projectile_radius);
        self.projectile_spawn_offset =
            non_negative(self.projectile_spawn_offset, defaults.projectile_spawn_offset);

        self.cull_margin = non_negative(self.cull_margin, defaults.cull_margin);
        self
    }

    /// Logical playfield size
    pub fn field_size(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// Where the ship sits when a session is created
    pub fn actor_start(&self) -> Vec2 {
        Vec2::new(
            self.field_width / 2.0,
            self.field_height - self.actor_start_offset,
        )
    }
}
