//! Session state machine
//!
//! `Idle -> Running -> Ended -> Idle`. A `Session` is an ordinary value owned
//! by whoever drives it; nothing here is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::spawn::SpawnScheduler;
use super::state::{EndReason, Playfield, SessionPhase, TravelBounds};
use super::tick::{TickReport, tick};
use crate::tuning::Tuning;

/// Outcome of a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub score: u64,
    /// Simulated seconds the run lasted
    pub elapsed: f64,
    pub reason: EndReason,
}

/// One player's run of the game
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) tuning: Tuning,
    pub(super) bounds: TravelBounds,
    pub(super) phase: SessionPhase,
    pub(super) score: u64,
    /// Simulated seconds since `start`
    pub(super) elapsed: f64,
    pub(super) time_ticks: u64,
    pub(super) scheduler: SpawnScheduler,
    pub(super) playfield: Playfield,
    pub(super) rng: Pcg32,
    pub(super) end_reason: Option<EndReason>,
}

impl Session {
    /// Create an idle session. The seed drives meteor placement.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let tuning = tuning.sanitized();
        Self {
            bounds: TravelBounds::from_tuning(&tuning),
            phase: SessionPhase::Idle,
            score: 0,
            elapsed: 0.0,
            time_ticks: 0,
            scheduler: SpawnScheduler::new(&tuning),
            playfield: Playfield::new(&tuning),
            rng: Pcg32::seed_from_u64(seed),
            end_reason: None,
            tuning,
        }
    }

    /// Begin a run. Returns false if one is already running.
    pub fn start(&mut self) -> bool {
        if self.phase == SessionPhase::Running {
            return false;
        }
        self.playfield.clear_entities();
        self.score = 0;
        self.elapsed = 0.0;
        self.time_ticks = 0;
        self.scheduler.reset();
        self.end_reason = None;
        self.phase = SessionPhase::Running;
        log::info!("Session started");
        true
    }

    /// Move the ship. The whole position is replaced at once.
    pub fn steer(&mut self, pos: Vec2) {
        let actor = &mut self.playfield.actor;
        actor.pos = self.bounds.clamp(pos, actor.pos);
    }

    /// Advance the simulation by `dt` seconds. Does nothing unless running.
    pub fn advance(&mut self, dt: f32) -> TickReport {
        tick(self, dt)
    }

    /// End the run from outside the simulation
    pub fn stop(&mut self) -> Option<SessionSummary> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        self.phase = SessionPhase::Ended;
        self.end_reason = Some(EndReason::Stopped);
        log::info!("Session stopped with score {}", self.score);
        self.summary()
    }

    /// Leave `Ended`, discarding shots and meteors. Returns false from any
    /// other phase.
    pub fn reset_to_idle(&mut self) -> bool {
        if self.phase != SessionPhase::Ended {
            return false;
        }
        self.playfield.clear_entities();
        self.phase = SessionPhase::Idle;
        true
    }

    /// How the last run ended, while in `Ended`
    pub fn summary(&self) -> Option<SessionSummary> {
        if self.phase != SessionPhase::Ended {
            return None;
        }
        self.end_reason.map(|reason| SessionSummary {
            score: self.score,
            elapsed: self.elapsed,
            reason,
        })
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn bounds(&self) -> TravelBounds {
        self.bounds
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    /// Direct access to the entity store, for scripted setups and tests
    pub fn playfield_mut(&mut self) -> &mut Playfield {
        &mut self.playfield
    }
}
