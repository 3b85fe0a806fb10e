//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Time enters only through `Session::advance(dt)`
//! - Seeded RNG only
//! - Stable iteration order (by arena slot)

pub mod arena;
pub mod collision;
pub mod physics;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use collision::{Hit, actor_hit, circles_overlap, resolve_projectile_hits};
pub use session::{Session, SessionSummary};
pub use spawn::{CadenceTimer, SpawnDue, SpawnScheduler};
pub use state::{
    Actor, EndReason, GameEvent, Obstacle, Playfield, Projectile, SessionPhase, TravelBounds,
};
pub use tick::{TickReport, tick};
