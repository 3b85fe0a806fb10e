//! Overlap detection between circles
//!
//! Shots, meteors and the ship are all treated as circles. There is no
//! collision response: a shot/meteor overlap destroys both, a ship/meteor
//! overlap ends the run.

use glam::Vec2;

use super::arena::Arena;
use super::state::{Actor, Obstacle, Projectile};

/// A shot that destroyed a meteor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub obstacle: Obstacle,
    pub projectile: Projectile,
}

/// Strict circle overlap: touching circles do not collide
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) < reach * reach
}

/// Pair up shots and meteors that overlap, removing both of each pair
///
/// Meteors are scanned from the highest slot down; for each one the shots
/// are scanned the same way and the first overlapping shot takes it. This is
/// first-match, not nearest-match: when several shots overlap one meteor
/// the one in the highest slot wins, which is not necessarily the closest.
/// Each meteor and each shot is consumed at most once per call.
///
/// Slot order is not spawn order: freed slots are reused, so a new shot can
/// sit below older ones and lose to them.
pub fn resolve_projectile_hits(
    obstacles: &mut Arena<Obstacle>,
    projectiles: &mut Arena<Projectile>,
    projectile_radius: f32,
) -> Vec<Hit> {
    let mut hits = Vec::new();
    if projectiles.is_empty() {
        return hits;
    }

    for o_index in (0..obstacles.slot_count()).rev() {
        let Some(&obstacle) = obstacles.get(o_index) else {
            continue;
        };

        let shooter = (0..projectiles.slot_count()).rev().find(|&p_index| {
            projectiles.get(p_index).is_some_and(|p| {
                circles_overlap(obstacle.pos, obstacle.radius, p.pos, projectile_radius)
            })
        });

        if let Some(p_index) = shooter {
            obstacles.remove(o_index);
            if let Some(projectile) = projectiles.remove(p_index) {
                hits.push(Hit {
                    obstacle,
                    projectile,
                });
            }
            if projectiles.is_empty() {
                break;
            }
        }
    }

    hits
}

/// First meteor (lowest slot) touching the ship, if any
pub fn actor_hit(actor: &Actor, obstacles: &Arena<Obstacle>) -> Option<Obstacle> {
    obstacles
        .values()
        .find(|o| circles_overlap(actor.pos, actor.radius, o.pos, o.radius))
        .copied()
}
