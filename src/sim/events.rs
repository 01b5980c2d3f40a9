//! Discrete events and effect timers
//!
//! The core emits events as facts about the frame; external layers map them
//! to sound and animation and the simulation never waits on them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Tier;

/// Events emitted during a tick, drained by the embedder
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    /// A projectile left the muzzle
    ProjectileFired,
    /// An obstacle dropped one tier and spawned an offspring of the new tier
    ObstacleSplit { pos: Vec2, tier: Tier },
    /// A smallest-tier obstacle was removed from the field
    ObstacleDestroyed { pos: Vec2 },
    /// The craft collided with an obstacle
    CraftHit { pos: Vec2 },
    /// The obstacle population reached zero
    LevelCompleted { level: u32 },
    /// Lives ran out
    SessionEnded { score: u32 },
}

/// Playback frames in an explosion strip
const EXPLOSION_FRAMES: f32 = 64.0;
/// Frames advanced per update
const EXPLOSION_SPEED: f32 = 0.6;

/// Fixed-budget timer for a transient visual effect.
///
/// `frame` advances by `speed` per update; the effect completes once the
/// next advance would run past the frame budget. The completion predicate
/// is pure state, usable on its own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EffectTimer {
    pub pos: Vec2,
    frame: f32,
    speed: f32,
    budget: f32,
}

impl EffectTimer {
    pub fn explosion(pos: Vec2) -> Self {
        Self {
            pos,
            frame: 0.0,
            speed: EXPLOSION_SPEED,
            budget: EXPLOSION_FRAMES,
        }
    }

    pub fn advance(&mut self) {
        self.frame += self.speed;
    }

    pub fn is_finished(&self) -> bool {
        self.frame + self.speed >= self.budget
    }

    /// Current playback frame, for the presentation layer
    pub fn frame(&self) -> f32 {
        self.frame
    }
}
