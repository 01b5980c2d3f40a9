//! AstroDrift - a toroidal-field asteroid arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, wrapping, collisions, game state)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 2880.0;
    pub const FIELD_HEIGHT: f32 = 1800.0;

    /// Craft defaults
    pub const CRAFT_RADIUS: f32 = 55.0;
    pub const CRAFT_MAX_SPEED: f32 = 500.0;
    /// Drift speed lost per frame once all directional intents release
    pub const DRIFT_DECAY_STEP: f32 = 4.0;
    /// Post-respawn grace period, seconds
    pub const INVINCIBILITY_SECS: f32 = 2.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 15.0;
    pub const PROJECTILE_SPEED: f32 = 500.0;
    /// Time a projectile survives after leaving the muzzle, seconds
    pub const PROJECTILE_LIFETIME_SECS: f32 = 3.0;
    /// Distance from craft center to the muzzle, along the aim vector
    pub const MUZZLE_OFFSET: f32 = 80.0;

    /// Obstacle tier radii
    pub const SMALL_RADIUS: f32 = 35.0;
    pub const MEDIUM_RADIUS: f32 = 55.0;
    pub const LARGE_RADIUS: f32 = 85.0;

    /// Obstacle speed shared by the whole population
    pub const BASE_OBSTACLE_SPEED: f32 = 250.0;
    /// Speed gained on level-up
    pub const LEVEL_SPEED_BONUS: f32 = 50.0;
    /// Speed gained on the manual next-wave trigger
    pub const SURGE_SPEED_BONUS: f32 = 100.0;

    /// Obstacles per wave
    pub const WAVE_SIZE: usize = 12;

    /// Starting lives
    pub const STARTING_LIVES: i32 = 3;
}

/// Unit vector from `from` toward `to`, or `fallback` when the two coincide
#[inline]
pub fn unit_toward(from: Vec2, to: Vec2, fallback: Vec2) -> Vec2 {
    let sep = to - from;
    if sep.length_squared() > f32::EPSILON {
        sep.normalize()
    } else {
        fallback
    }
}
