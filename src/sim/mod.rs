//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Entity populations mutate only between sweeps
//! - No rendering, audio, or input-device dependencies; collaborators
//!   observe the game through snapshots and drained events

pub mod collision;
pub mod events;
pub mod state;
pub mod tick;
pub mod wrap;

pub use collision::{Body, EntityKind, Response, bounce_directions, collided, response_for};
pub use events::{EffectTimer, GameEvent};
pub use state::{
    Craft, DriftHeading, GameState, Obstacle, Projectile, SessionPhase, Snapshot, Tier,
};
pub use tick::{TickInput, spawn_wave, tick};
pub use wrap::wrap_position;
