//! Kinematics and off-field culling

use super::arena::Arena;
use super::state::{Moving, Playfield};

/// Move every entity by `vel * dt`
pub fn integrate<T: Moving>(arena: &mut Arena<T>, dt: f32) {
    let dt = dt.max(0.0);
    for (_, entity) in arena.iter_mut() {
        let vel = entity.vel();
        *entity.pos_mut() += vel * dt;
    }
}

/// Advance all shots and meteors, then drop the ones that left the field.
/// Returns (shots culled, meteors culled).
pub fn step(field: &mut Playfield, dt: f32, cull_margin: f32) -> (usize, usize) {
    integrate(&mut field.projectiles, dt);
    integrate(&mut field.obstacles, dt);

    let bottom = field.size.y + cull_margin;
    let shots = field.projectiles.retain(|p| p.pos.y > -cull_margin);
    let meteors = field.obstacles.retain(|o| o.pos.y < bottom);
    (shots, meteors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    #[test]
    fn test_obstacle_falls_speed_times_dt() {
        let mut field = Playfield::new(&Tuning::default());
        field.spawn_obstacle(Vec2::new(300.0, 0.0), 20.0, 100.0);
        step(&mut field, 1.0, 30.0);
        let obstacle = field.obstacles.values().next().unwrap();
        assert_eq!(obstacle.pos, Vec2::new(300.0, 100.0));
    }

    #[test]
    fn test_zero_dt_moves_nothing() {
        let mut field = Playfield::new(&Tuning::default());
        field.spawn_projectile(Vec2::new(50.0, 200.0), 320.0);
        step(&mut field, 0.0, 30.0);
        assert_eq!(
            field.projectiles.values().next().unwrap().pos,
            Vec2::new(50.0, 200.0)
        );
    }

    #[test]
    fn test_culls_past_margins() {
        let mut field = Playfield::new(&Tuning::default());
        field.spawn_projectile(Vec2::new(50.0, -25.0), 320.0);
        field.spawn_projectile(Vec2::new(60.0, 200.0), 320.0);
        field.spawn_obstacle(Vec2::new(50.0, 445.0), 20.0, 100.0);
        field.spawn_obstacle(Vec2::new(60.0, 100.0), 20.0, 100.0);

        let culled = step(&mut field, 0.1, 30.0);
        assert_eq!(culled, (1, 1));
        assert_eq!(field.projectiles.len(), 1);
        assert_eq!(field.obstacles.len(), 1);
    }

    #[test]
    fn test_empty_store_is_noop() {
        let mut field = Playfield::new(&Tuning::default());
        assert_eq!(step(&mut field, 0.5, 30.0), (0, 0));
    }

    proptest! {
        #[test]
        fn prop_position_is_linear_in_dt(
            x in 0.0f32..700.0,
            y in 0.0f32..420.0,
            speed in 0.0f32..400.0,
            dt in 0.0f32..0.5,
        ) {
            let mut arena = Arena::new();
            let mut field = Playfield::new(&Tuning::default());
            let id = field.next_entity_id();
            let obstacle = crate::sim::state::Obstacle {
                id,
                pos: Vec2::new(x, y),
                vel: Vec2::new(0.0, speed),
                radius: 12.0,
            };
            let index = arena.insert(obstacle);
            integrate(&mut arena, dt);
            let moved = arena.get(index).unwrap();
            prop_assert_eq!(moved.pos, obstacle.pos + obstacle.vel * dt);
        }
    }
}
