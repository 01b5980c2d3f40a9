//! Data-driven game balance
//!
//! Every knob the simulation consults lives here so tests and embedders can
//! shrink the field or slow the obstacles without recompiling. Defaults
//! mirror the `consts` module.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay balance values, owned by the game state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,
    pub craft_radius: f32,
    pub craft_max_speed: f32,
    pub drift_decay_step: f32,
    pub invincibility_secs: f32,
    pub projectile_radius: f32,
    pub projectile_speed: f32,
    pub projectile_lifetime_secs: f32,
    pub muzzle_offset: f32,
    pub small_radius: f32,
    pub medium_radius: f32,
    pub large_radius: f32,
    pub base_obstacle_speed: f32,
    pub level_speed_bonus: f32,
    pub surge_speed_bonus: f32,
    pub wave_size: usize,
    pub starting_lives: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            craft_radius: CRAFT_RADIUS,
            craft_max_speed: CRAFT_MAX_SPEED,
            drift_decay_step: DRIFT_DECAY_STEP,
            invincibility_secs: INVINCIBILITY_SECS,
            projectile_radius: PROJECTILE_RADIUS,
            projectile_speed: PROJECTILE_SPEED,
            projectile_lifetime_secs: PROJECTILE_LIFETIME_SECS,
            muzzle_offset: MUZZLE_OFFSET,
            small_radius: SMALL_RADIUS,
            medium_radius: MEDIUM_RADIUS,
            large_radius: LARGE_RADIUS,
            base_obstacle_speed: BASE_OBSTACLE_SPEED,
            level_speed_bonus: LEVEL_SPEED_BONUS,
            surge_speed_bonus: SURGE_SPEED_BONUS,
            wave_size: WAVE_SIZE,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl Tuning {
    /// Center of the field, where the craft spawns and respawns
    pub fn field_center(&self) -> Vec2 {
        Vec2::new(self.field_width / 2.0, self.field_height / 2.0)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
