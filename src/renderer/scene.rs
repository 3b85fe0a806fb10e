//! Scene assembly
//!
//! Builds one frame's triangle list from the entity store. Only shared
//! references go in, so drawing can never feed back into the simulation.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::Playfield;

/// Spacing of the background grid (logical units)
pub const GRID_SPACING: f32 = 28.0;
/// Drawn shot radius (smaller than its collision radius)
pub const SHOT_DRAW_RADIUS: f32 = 3.0;
/// Ship triangle half extents
pub const SHIP_HALF_WIDTH: f32 = 14.0;
pub const SHIP_HALF_HEIGHT: f32 = 18.0;
/// Star drift speed (logical units per millisecond)
const STAR_DRIFT: f64 = 0.02;
const STAR_SIZE: f32 = 2.0;

/// Build the vertices for a frame at `time_ms`
pub fn build_frame(field: &Playfield, settings: &Settings, time_ms: f64) -> Vec<Vertex> {
    let size = field.size;
    let segments = settings.quality.circle_segments();
    let mut vertices = Vec::with_capacity(
        2048 + (field.obstacles.len() + field.projectiles.len()) * segments as usize * 9,
    );

    vertices.extend(shapes::rect(Vec2::ZERO, size, colors::BACKGROUND));

    if settings.show_grid {
        let mut x = 0.0;
        while x < size.x {
            vertices.extend(shapes::line(
                Vec2::new(x, 0.0),
                Vec2::new(x, size.y),
                1.0,
                colors::GRID,
            ));
            x += GRID_SPACING;
        }
        let mut y = 0.0;
        while y < size.y {
            vertices.extend(shapes::line(
                Vec2::new(0.0, y),
                Vec2::new(size.x, y),
                1.0,
                colors::GRID,
            ));
            y += GRID_SPACING;
        }
    }

    let drift = if settings.reduced_motion {
        0.0
    } else {
        time_ms * STAR_DRIFT
    };
    for star in 0..settings.quality.star_count() {
        let pos = star_position(star, drift, size);
        vertices.extend(shapes::rect(
            pos,
            pos + Vec2::splat(STAR_SIZE),
            colors::STAR,
        ));
    }

    vertices.extend(shapes::ship(
        field.actor.pos,
        SHIP_HALF_WIDTH,
        SHIP_HALF_HEIGHT,
        colors::SHIP_NOSE,
        colors::SHIP_TAIL,
    ));

    for shot in field.projectiles.values() {
        vertices.extend(shapes::circle(
            shot.pos,
            SHOT_DRAW_RADIUS,
            colors::SHOT,
            segments / 2,
        ));
    }

    for meteor in field.obstacles.values() {
        vertices.extend(shapes::circle(
            meteor.pos,
            meteor.radius,
            colors::METEOR,
            segments,
        ));
        if settings.quality.meteor_outline() {
            vertices.extend(shapes::ring(
                meteor.pos,
                meteor.radius,
                meteor.radius + 1.0,
                colors::METEOR_OUTLINE,
                segments,
            ));
        }
    }

    vertices
}

/// Deterministic star placement, scrolling down with `drift`
fn star_position(index: usize, drift: f64, size: Vec2) -> Vec2 {
    let i = index as f64;
    let x = (i * 37.0).rem_euclid(f64::from(size.x));
    let y = (i * 97.0 + drift).rem_euclid(f64::from(size.y));
    Vec2::new(x as f32, y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;
    use crate::sim::Session;
    use crate::tuning::Tuning;

    fn busy_session() -> Session {
        let mut session = Session::new(Tuning::default(), 5);
        session.start();
        for _ in 0..90 {
            session.advance(1.0 / 30.0);
        }
        session
    }

    #[test]
    fn test_build_frame_leaves_state_alone() {
        let session = busy_session();
        let before = session.clone();
        let vertices = build_frame(session.playfield(), &Settings::default(), 1234.0);

        assert!(!vertices.is_empty());
        assert_eq!(vertices.len() % 3, 0);
        assert_eq!(session.score(), before.score());
        let now: Vec<_> = session.playfield().obstacles.values().copied().collect();
        let then: Vec<_> = before.playfield().obstacles.values().copied().collect();
        assert_eq!(now, then);
    }

    #[test]
    fn test_entity_count_changes_vertex_count() {
        let settings = Settings {
            quality: QualityPreset::Low,
            show_grid: false,
            ..Settings::default()
        };
        let mut session = Session::new(Tuning::default(), 5);
        let empty = build_frame(session.playfield(), &settings, 0.0).len();

        session
            .playfield_mut()
            .spawn_obstacle(Vec2::new(100.0, 100.0), 20.0, 80.0);
        let one = build_frame(session.playfield(), &settings, 0.0).len();
        assert_eq!(one - empty, settings.quality.circle_segments() as usize * 3);
    }

    #[test]
    fn test_reduced_motion_freezes_stars() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let session = Session::new(Tuning::default(), 5);
        let a = build_frame(session.playfield(), &settings, 0.0);
        let b = build_frame(session.playfield(), &settings, 90_000.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_stars_stay_in_field() {
        let size = Vec2::new(700.0, 420.0);
        for i in 0..120 {
            let pos = star_position(i, 12_345.6, size);
            assert!(pos.x >= 0.0 && pos.x < 700.0);
            assert!(pos.y >= 0.0 && pos.y < 420.0);
        }
    }
}
