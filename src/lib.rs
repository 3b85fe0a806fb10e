//! Space Shot - a falling-meteor arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (spawning, physics, collisions, session state)
//! - `arcade`: Session + durable best score, the handle a UI owns
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Pointer mapping and frame timing
//! - `persistence`: Key-value storage backends
//! - `tuning`: Data-driven game balance

pub mod arcade;
pub mod best_score;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use arcade::Arcade;
pub use best_score::BestScore;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Logical playfield size, independent of the display resolution
    pub const FIELD_WIDTH: f32 = 700.0;
    pub const FIELD_HEIGHT: f32 = 420.0;

    /// Ship defaults
    pub const ACTOR_RADIUS: f32 = 16.0;
    /// Distance the ship keeps from the left, right and bottom edges
    pub const ACTOR_MARGIN: f32 = 20.0;
    /// Ship may not climb above this fraction of the field height
    pub const ACTOR_MIN_Y_FRACTION: f32 = 0.4;
    /// Ship starts this far above the bottom edge
    pub const ACTOR_START_OFFSET: f32 = 60.0;

    /// Meteor cadence (seconds)
    pub const OBSTACLE_INTERVAL: f32 = 0.7;
    pub const OBSTACLE_MIN_RADIUS: f32 = 12.0;
    pub const OBSTACLE_MAX_RADIUS: f32 = 26.0;
    /// Fall speed range (units/s)
    pub const OBSTACLE_MIN_SPEED: f32 = 60.0;
    pub const OBSTACLE_MAX_SPEED: f32 = 120.0;
    /// Meteors spawn this far from the side edges
    pub const OBSTACLE_SPAWN_MARGIN: f32 = 20.0;
    /// Meteors spawn at y = -OBSTACLE_SPAWN_OFFSET (just above the top edge)
    pub const OBSTACLE_SPAWN_OFFSET: f32 = 20.0;

    /// Auto-fire cadence (seconds)
    pub const PROJECTILE_INTERVAL: f32 = 0.24;
    /// Upward speed (units/s)
    pub const PROJECTILE_SPEED: f32 = 320.0;
    /// Collision radius used against meteors
    pub const PROJECTILE_RADIUS: f32 = 6.0;
    /// Shots leave the ship this far above its center
    pub const PROJECTILE_SPAWN_OFFSET: f32 = 20.0;

    /// Entities are culled once this far outside the field
    pub const CULL_MARGIN: f32 = 30.0;

    /// Points per destroyed meteor
    pub const POINTS_PER_HIT: u64 = 10;
}
