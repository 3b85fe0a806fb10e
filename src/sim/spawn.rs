//! Cadence timers for meteor and shot spawning
//!
//! Timers accumulate simulated time rather than counting frames, so cadence
//! holds at any tick rate. A long gap fires a timer once, never a burst.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::Playfield;
use crate::tuning::Tuning;

/// Fixed-interval trigger
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CadenceTimer {
    /// Seconds between fires
    pub interval: f32,
    since_last: f32,
}

impl CadenceTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            since_last: 0.0,
        }
    }

    /// Add elapsed time; true if the timer fired (and reset)
    pub fn advance(&mut self, dt: f32) -> bool {
        self.since_last += dt.max(0.0);
        if self.since_last >= self.interval {
            self.since_last = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.since_last = 0.0;
    }

    /// Seconds since the last fire (or reset)
    pub fn since_last(&self) -> f32 {
        self.since_last
    }
}

/// Which spawns are due this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnDue {
    pub obstacle: bool,
    pub projectile: bool,
}

/// Both spawn timers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnScheduler {
    pub obstacles: CadenceTimer,
    pub projectiles: CadenceTimer,
}

impl SpawnScheduler {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacles: CadenceTimer::new(tuning.obstacle_interval),
            projectiles: CadenceTimer::new(tuning.projectile_interval),
        }
    }

    pub fn advance(&mut self, dt: f32) -> SpawnDue {
        SpawnDue {
            obstacle: self.obstacles.advance(dt),
            projectile: self.projectiles.advance(dt),
        }
    }

    pub fn reset(&mut self) {
        self.obstacles.reset();
        self.projectiles.reset();
    }
}

/// Uniform draw from `[lo, hi]`; a collapsed range yields `lo`
fn uniform(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..=hi) } else { lo }
}

/// Drop a meteor in at a random x just above the top edge
pub fn spawn_obstacle(field: &mut Playfield, tuning: &Tuning, rng: &mut Pcg32) -> u32 {
    let margin = tuning.obstacle_spawn_margin;
    let x = uniform(rng, margin, field.size.x - margin);
    let (r_lo, r_hi) = tuning.obstacle_radius;
    let radius = uniform(rng, r_lo, r_hi);
    let (v_lo, v_hi) = tuning.obstacle_speed;
    let speed = uniform(rng, v_lo, v_hi);

    let id = field.spawn_obstacle(
        Vec2::new(x, -tuning.obstacle_spawn_offset),
        radius,
        speed,
    );
    log::debug!("Meteor {} at x={:.1} r={:.1} v={:.1}", id, x, radius, speed);
    id
}

/// Fire a shot from just above the ship
pub fn spawn_projectile(field: &mut Playfield, tuning: &Tuning) -> u32 {
    let pos = field.actor.pos - Vec2::new(0.0, tuning.projectile_spawn_offset);
    field.spawn_projectile(pos, tuning.projectile_speed)
}
