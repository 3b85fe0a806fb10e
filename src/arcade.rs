//! Session + durable best score
//!
//! `Arcade` is the handle a UI owns: it feeds pointer input and frame
//! timestamps into a [`Session`], reconciles the best score when a run ends
//! and writes it to the store before the next run can start.

use glam::Vec2;

use crate::best_score::BestScore;
use crate::persistence::KeyValueStore;
use crate::platform::{FrameClock, PointerMapper, SurfaceRect};
use crate::sim::{Session, SessionPhase, SessionSummary, TickReport};
use crate::tuning::Tuning;

/// One playable game with its persistent best score
pub struct Arcade<S: KeyValueStore> {
    session: Session,
    best: BestScore,
    store: S,
    clock: FrameClock,
    mapper: PointerMapper,
    last_run: Option<SessionSummary>,
}

impl<S: KeyValueStore> Arcade<S> {
    /// Create an idle game, reading the best score from `store`
    pub fn new(store: S, tuning: Tuning, seed: u64) -> Self {
        let session = Session::new(tuning, seed);
        let mapper = PointerMapper::new(session.tuning());
        let best = BestScore::load(&store);
        Self {
            session,
            best,
            store,
            clock: FrameClock::new(),
            mapper,
            last_run: None,
        }
    }

    /// Start trigger. Returns false if a run is already in progress.
    pub fn start(&mut self) -> bool {
        if !self.session.start() {
            return false;
        }
        self.clock.reset();
        true
    }

    /// Steer the ship from a pointer/touch position in display space
    pub fn pointer_moved(&mut self, client: Vec2, surface: &SurfaceRect) {
        self.session.steer(self.mapper.map(client, surface));
    }

    /// Run one tick for a frame presented at `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> TickReport {
        if !self.session.is_running() {
            return TickReport::default();
        }
        let dt = self.clock.delta(now_ms);
        let report = self.session.advance(dt);
        if report.ended.is_some() {
            self.finish();
        }
        report
    }

    /// End the current run from outside the simulation
    pub fn stop(&mut self) -> Option<SessionSummary> {
        self.session.stop()?;
        self.finish()
    }

    /// Ended -> Idle: fold the score into the best and persist it
    fn finish(&mut self) -> Option<SessionSummary> {
        let summary = self.session.summary()?;
        if self.best.record(summary.score) {
            log::info!("New best score: {}", summary.score);
        }
        if let Err(e) = self.best.save(&mut self.store) {
            log::warn!("Failed to persist best score: {}", e);
        }
        self.session.reset_to_idle();
        self.last_run = Some(summary);
        Some(summary)
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn score(&self) -> u64 {
        self.session.score()
    }

    pub fn best_score(&self) -> u64 {
        self.best.value()
    }

    /// Outcome of the most recent finished run
    pub fn last_run(&self) -> Option<SessionSummary> {
        self.last_run
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
