//! Entity and session state types
//!
//! Everything the renderer reads lives in [`Playfield`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use crate::tuning::Tuning;

/// Run state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No run in progress, waiting for the start trigger
    #[default]
    Idle,
    /// Entities simulate and score accumulates
    Running,
    /// Run just finished; the best score has not been reconciled yet
    Ended,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// A meteor reached the ship
    Collision { obstacle: u32 },
    /// Stopped from outside the simulation
    Stopped,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { id: u32 },
    ProjectileFired { id: u32 },
    /// A shot destroyed a meteor; `score` is the total after the hit
    ObstacleDestroyed {
        obstacle: u32,
        projectile: u32,
        score: u64,
    },
    /// A meteor reached the ship; the run is over
    ActorHit { obstacle: u32 },
}

/// The player's ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    pub radius: f32,
}

/// An upward-moving shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// A falling meteor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// Anything the physics step moves
pub trait Moving {
    fn pos_mut(&mut self) -> &mut Vec2;
    fn vel(&self) -> Vec2;
}

impl Moving for Projectile {
    fn pos_mut(&mut self) -> &mut Vec2 {
        &mut self.pos
    }

    fn vel(&self) -> Vec2 {
        self.vel
    }
}

impl Moving for Obstacle {
    fn pos_mut(&mut self) -> &mut Vec2 {
        &mut self.pos
    }

    fn vel(&self) -> Vec2 {
        self.vel
    }
}

/// Rectangle the ship's center is confined to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl TravelBounds {
    /// Keeps the ship `actor_margin` away from the side and bottom edges and
    /// in the lower part of the field
    pub fn from_tuning(tuning: &Tuning) -> Self {
        let margin = tuning.actor_margin;
        let min_y = (tuning.field_height * tuning.actor_min_y_fraction)
            .min(tuning.field_height - margin);
        Self {
            min: Vec2::new(margin, min_y),
            max: Vec2::new(tuning.field_width - margin, tuning.field_height - margin),
        }
    }

    /// Clamp a point into the rectangle. Non-finite components fall back to
    /// the matching component of `previous`.
    pub fn clamp(&self, pos: Vec2, previous: Vec2) -> Vec2 {
        let x = if pos.x.is_finite() { pos.x } else { previous.x };
        let y = if pos.y.is_finite() { pos.y } else { previous.y };
        Vec2::new(x, y).clamp(self.min, self.max)
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.cmpge(self.min).all() && pos.cmple(self.max).all()
    }
}

/// Entity store for one session
#[derive(Debug, Clone)]
pub struct Playfield {
    /// Logical size (width, height)
    pub size: Vec2,
    pub actor: Actor,
    pub projectiles: Arena<Projectile>,
    pub obstacles: Arena<Obstacle>,
    next_id: u32,
}

impl Playfield {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            size: tuning.field_size(),
            actor: Actor {
                pos: tuning.actor_start(),
                radius: tuning.actor_radius,
            },
            projectiles: Arena::new(),
            obstacles: Arena::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a meteor, returning its id
    pub fn spawn_obstacle(&mut self, pos: Vec2, radius: f32, fall_speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.insert(Obstacle {
            id,
            pos,
            vel: Vec2::new(0.0, fall_speed),
            radius,
        });
        id
    }

    /// Add a shot, returning its id
    pub fn spawn_projectile(&mut self, pos: Vec2, speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.insert(Projectile {
            id,
            pos,
            vel: Vec2::new(0.0, -speed),
        });
        id
    }

    /// Drop all shots and meteors; the ship stays where it is
    pub fn clear_entities(&mut self) {
        self.projectiles.clear();
        self.obstacles.clear();
        self.next_id = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_shared_and_increasing() {
        let mut field = Playfield::new(&Tuning::default());
        let a = field.spawn_obstacle(Vec2::new(10.0, 0.0), 12.0, 60.0);
        let b = field.spawn_projectile(Vec2::new(10.0, 300.0), 320.0);
        let c = field.spawn_obstacle(Vec2::new(20.0, 0.0), 12.0, 60.0);
        assert_eq!((a, b, c), (1, 2, 3));
    }

    #[test]
    fn test_spawned_velocities() {
        let mut field = Playfield::new(&Tuning::default());
        field.spawn_obstacle(Vec2::ZERO, 20.0, 80.0);
        field.spawn_projectile(Vec2::ZERO, 320.0);
        let obstacle = field.obstacles.values().next().unwrap();
        let projectile = field.projectiles.values().next().unwrap();
        assert_eq!(obstacle.vel, Vec2::new(0.0, 80.0));
        assert_eq!(projectile.vel, Vec2::new(0.0, -320.0));
    }

    #[test]
    fn test_travel_bounds_default_layout() {
        let bounds = TravelBounds::from_tuning(&Tuning::default());
        assert_eq!(bounds.min, Vec2::new(20.0, 168.0));
        assert_eq!(bounds.max, Vec2::new(680.0, 400.0));
        assert!(bounds.contains(Tuning::default().actor_start()));
    }

    #[test]
    fn test_travel_bounds_non_finite_keeps_previous() {
        let bounds = TravelBounds::from_tuning(&Tuning::default());
        let previous = Vec2::new(300.0, 350.0);
        let clamped = bounds.clamp(Vec2::new(f32::NAN, 1.0e9), previous);
        assert_eq!(clamped, Vec2::new(300.0, 400.0));
    }

    #[test]
    fn test_clear_entities_keeps_actor() {
        let mut field = Playfield::new(&Tuning::default());
        field.actor.pos = Vec2::new(100.0, 300.0);
        field.spawn_obstacle(Vec2::ZERO, 20.0, 80.0);
        field.clear_entities();
        assert!(field.obstacles.is_empty());
        assert_eq!(field.actor.pos, Vec2::new(100.0, 300.0));
        assert_eq!(field.next_entity_id(), 1);
    }
}
