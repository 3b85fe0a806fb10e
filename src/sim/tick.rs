//! Simulation tick
//!
//! Order within a tick: spawn -> move/cull -> shot hits -> ship hit.
//! A tick always runs to completion before the next one starts.

use super::collision::{actor_hit, resolve_projectile_hits};
use super::physics;
use super::session::Session;
use super::spawn::{spawn_obstacle, spawn_projectile};
use super::state::{EndReason, GameEvent, SessionPhase};

/// What a tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
    /// Set on the tick that ended the run
    pub ended: Option<EndReason>,
}

impl TickReport {
    /// Meteors destroyed this tick
    pub fn hits(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstacleDestroyed { .. }))
            .count()
    }
}

/// Advance a running session by `dt` seconds
pub fn tick(session: &mut Session, dt: f32) -> TickReport {
    let mut report = TickReport::default();

    // A stopped session ignores any tick still queued behind the stop
    if session.phase != SessionPhase::Running {
        return report;
    }

    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    session.elapsed += f64::from(dt);
    session.time_ticks += 1;

    let due = session.scheduler.advance(dt);
    if due.obstacle {
        let id = spawn_obstacle(&mut session.playfield, &session.tuning, &mut session.rng);
        report.events.push(GameEvent::ObstacleSpawned { id });
    }
    if due.projectile {
        let id = spawn_projectile(&mut session.playfield, &session.tuning);
        report.events.push(GameEvent::ProjectileFired { id });
    }

    physics::step(&mut session.playfield, dt, session.tuning.cull_margin);

    let field = &mut session.playfield;
    let hits = resolve_projectile_hits(
        &mut field.obstacles,
        &mut field.projectiles,
        session.tuning.projectile_radius,
    );
    for hit in hits {
        session.score = session.score.saturating_add(session.tuning.points_per_hit);
        log::debug!(
            "Shot {} destroyed meteor {} (score {})",
            hit.projectile.id,
            hit.obstacle.id,
            session.score
        );
        report.events.push(GameEvent::ObstacleDestroyed {
            obstacle: hit.obstacle.id,
            projectile: hit.projectile.id,
            score: session.score,
        });
    }

    if let Some(obstacle) = actor_hit(&session.playfield.actor, &session.playfield.obstacles) {
        let reason = EndReason::Collision {
            obstacle: obstacle.id,
        };
        session.phase = SessionPhase::Ended;
        session.end_reason = Some(reason);
        report.events.push(GameEvent::ActorHit {
            obstacle: obstacle.id,
        });
        report.ended = Some(reason);
        log::info!(
            "Ship hit by meteor {} after {:.1}s, score {}",
            obstacle.id,
            session.elapsed,
            session.score
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn running_session(seed: u64) -> Session {
        let mut session = Session::new(Tuning::default(), seed);
        session.start();
        session
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut session = Session::new(Tuning::default(), 1);
        let report = session.advance(1.0);
        assert_eq!(report, TickReport::default());
        assert_eq!(session.time_ticks(), 0);
        assert!(session.playfield().obstacles.is_empty());
    }

    #[test]
    fn test_tick_after_stop_is_noop() {
        let mut session = running_session(1);
        session.advance(0.5);
        session.stop();
        let before = session.playfield().clone();
        let report = session.advance(0.5);
        assert!(report.events.is_empty());
        assert_eq!(
            session.playfield().projectiles.len(),
            before.projectiles.len()
        );
        let positions: Vec<_> = session.playfield().projectiles.values().map(|p| p.pos).collect();
        let before_positions: Vec<_> = before.projectiles.values().map(|p| p.pos).collect();
        assert_eq!(positions, before_positions);
    }

    #[test]
    fn test_obstacle_moves_exactly_speed_times_dt() {
        let mut session = running_session(3);
        let id = session
            .playfield_mut()
            .spawn_obstacle(Vec2::new(600.0, 0.0), 20.0, 100.0);

        let report = session.advance(1.0);
        assert_eq!(report.ended, None);
        let obstacle = session
            .playfield()
            .obstacles
            .values()
            .find(|o| o.id == id)
            .unwrap();
        assert_eq!(obstacle.pos, Vec2::new(600.0, 100.0));
    }

    #[test]
    fn test_projectile_hit_scores_ten() {
        let mut session = running_session(1);
        let field = session.playfield_mut();
        let shot = field.spawn_projectile(Vec2::new(100.0, 100.0), 320.0);
        let meteor = field.spawn_obstacle(Vec2::new(103.0, 104.0), 20.0, 100.0);

        let report = session.advance(0.0);
        assert_eq!(session.score(), 10);
        assert_eq!(
            report.events,
            vec![GameEvent::ObstacleDestroyed {
                obstacle: meteor,
                projectile: shot,
                score: 10,
            }]
        );
        assert!(session.playfield().projectiles.is_empty());
        assert!(session.playfield().obstacles.is_empty());
    }

    #[test]
    fn test_score_saturates_instead_of_overflowing() {
        let tuning = Tuning::from_json(r#"{"points_per_hit":18446744073709551615}"#).unwrap();
        let mut session = Session::new(tuning, 1);
        session.start();
        let field = session.playfield_mut();
        for x in [100.0, 300.0] {
            field.spawn_projectile(Vec2::new(x, 100.0), 320.0);
            field.spawn_obstacle(Vec2::new(x, 100.0), 20.0, 100.0);
        }

        let report = session.advance(0.0);
        assert_eq!(report.hits(), 2);
        assert_eq!(session.score(), u64::MAX);
    }

    #[test]
    fn test_actor_collision_ends_run_regardless_of_score() {
        let mut session = running_session(1);
        let field = session.playfield_mut();
        field.spawn_projectile(Vec2::new(100.0, 100.0), 320.0);
        field.spawn_obstacle(Vec2::new(103.0, 104.0), 20.0, 100.0);
        let meteor = field.spawn_obstacle(Vec2::new(355.0, 365.0), 20.0, 100.0);

        let report = session.advance(0.0);
        assert_eq!(session.phase(), SessionPhase::Ended);
        assert_eq!(report.ended, Some(EndReason::Collision { obstacle: meteor }));
        assert_eq!(report.hits(), 1);
        assert_eq!(session.summary().map(|s| s.score), Some(10));
    }

    #[test]
    fn test_culled_entities_skip_collision() {
        let mut session = running_session(1);
        let field = session.playfield_mut();
        // Both end up above the cull line after this tick
        field.spawn_projectile(Vec2::new(100.0, -10.0), 320.0);
        field.spawn_obstacle(Vec2::new(100.0, -60.0), 26.0, 0.0);

        let report = session.advance(0.1);
        assert_eq!(report.hits(), 0);
        assert_eq!(session.score(), 0);
        assert!(session.playfield().projectiles.is_empty());
    }

    #[test]
    fn test_spawn_cadence_at_any_tick_rate() {
        for tps in [30.0f32, 120.0] {
            let mut session = running_session(11);
            let dt = 1.0 / tps;
            let mut spawn_times = Vec::new();
            for i in 1..=((2.5 * tps) as u32) {
                let report = session.advance(dt);
                if report
                    .events
                    .iter()
                    .any(|e| matches!(e, GameEvent::ObstacleSpawned { .. }))
                {
                    spawn_times.push(i as f32 * dt);
                }
            }
            assert_eq!(session.phase(), SessionPhase::Running);
            assert_eq!(spawn_times.len(), 3, "at {} tps", tps);

            let granularity = dt + 1e-3;
            let mut previous = 0.0;
            for t in spawn_times {
                assert!((t - previous - 0.7).abs() <= granularity, "at {} tps", tps);
                previous = t;
            }
        }
    }

    #[test]
    fn test_auto_fire_follows_ship() {
        let mut session = running_session(1);
        session.steer(Vec2::new(200.0, 300.0));
        let report = session.advance(0.24);
        assert!(report.events.contains(&GameEvent::ProjectileFired { id: 1 }));
        let shot = session.playfield().projectiles.values().next().unwrap();
        // Spawned at the nose, then moved by this tick's dt
        assert_eq!(shot.pos.x, 200.0);
        assert!((shot.pos.y - (280.0 - 320.0 * 0.24)).abs() < 1e-3);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs produce identical runs
        let mut a = running_session(99999);
        let mut b = running_session(99999);

        for i in 0..600 {
            let target = Vec2::new(100.0 + (i % 500) as f32, 350.0);
            a.steer(target);
            b.steer(target);
            let ra = a.advance(1.0 / 60.0);
            let rb = b.advance(1.0 / 60.0);
            assert_eq!(ra, rb);
        }

        assert_eq!(a.score(), b.score());
        assert_eq!(a.phase(), b.phase());
        let pa: Vec<_> = a.playfield().obstacles.values().copied().collect();
        let pb: Vec<_> = b.playfield().obstacles.values().copied().collect();
        assert_eq!(pa, pb);
    }
}
