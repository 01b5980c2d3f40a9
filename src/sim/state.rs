//! Game state and core simulation types
//!
//! All state the orchestrator advances lives here, owned by one
//! [`GameState`] value so components can be tested in isolation.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Body, EntityKind};
use super::events::{EffectTimer, GameEvent};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Title screen, waiting for a start intent
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen mid-session
    Paused,
    /// Lives ran out
    GameOver,
    /// Terminal; the embedder should tear the session down
    Exiting,
}

/// Obstacle size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Small,
    Medium,
    Large,
}

impl Tier {
    pub fn radius(self, tuning: &Tuning) -> f32 {
        match self {
            Tier::Small => tuning.small_radius,
            Tier::Medium => tuning.medium_radius,
            Tier::Large => tuning.large_radius,
        }
    }

    /// Next-smaller tier after a projectile hit; `None` at the smallest
    pub fn shrunk(self) -> Option<Tier> {
        match self {
            Tier::Large => Some(Tier::Medium),
            Tier::Medium => Some(Tier::Small),
            Tier::Small => None,
        }
    }
}

/// Compound directional state, recomputed each frame from held intents.
///
/// North is screen-up (negative y). Opposing intents cancel; two adjacent
/// intents combine into a diagonal that moves at half speed on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DriftHeading {
    #[default]
    Idle,
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl DriftHeading {
    /// Combine currently-held intents into a compound heading
    pub fn from_intents(north: bool, south: bool, west: bool, east: bool) -> Self {
        let vertical = match (north, south) {
            (true, false) => -1i8,
            (false, true) => 1,
            _ => 0,
        };
        let horizontal = match (west, east) {
            (true, false) => -1i8,
            (false, true) => 1,
            _ => 0,
        };
        match (horizontal, vertical) {
            (0, -1) => DriftHeading::North,
            (0, 1) => DriftHeading::South,
            (1, 0) => DriftHeading::East,
            (-1, 0) => DriftHeading::West,
            (1, -1) => DriftHeading::NorthEast,
            (-1, -1) => DriftHeading::NorthWest,
            (1, 1) => DriftHeading::SouthEast,
            (-1, 1) => DriftHeading::SouthWest,
            _ => DriftHeading::Idle,
        }
    }

    /// Per-axis displacement factors; diagonals move at half speed per axis
    pub fn axis_factors(self) -> Vec2 {
        match self {
            DriftHeading::Idle => Vec2::ZERO,
            DriftHeading::North => Vec2::new(0.0, -1.0),
            DriftHeading::South => Vec2::new(0.0, 1.0),
            DriftHeading::East => Vec2::new(1.0, 0.0),
            DriftHeading::West => Vec2::new(-1.0, 0.0),
            DriftHeading::NorthEast => Vec2::new(0.5, -0.5),
            DriftHeading::NorthWest => Vec2::new(-0.5, -0.5),
            DriftHeading::SouthEast => Vec2::new(0.5, 0.5),
            DriftHeading::SouthWest => Vec2::new(-0.5, 0.5),
        }
    }
}

/// Entity id reserved for the craft
pub const CRAFT_ID: u32 = 0;

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Craft {
    pub pos: Vec2,
    /// Unit aim vector, updated from the pointer target each frame
    pub heading: Vec2,
    pub radius: f32,
    /// Last compound directional state; drives drift after release
    pub drift: DriftHeading,
    /// Current drift speed, decays linearly once intents release
    pub drift_speed: f32,
    /// Remaining grace period, seconds
    pub invincible_secs: f32,
}

impl Craft {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.field_center(),
            heading: Vec2::new(0.0, -1.0),
            radius: tuning.craft_radius,
            drift: DriftHeading::Idle,
            drift_speed: 0.0,
            invincible_secs: 0.0,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_secs > 0.0
    }

    /// Reposition at `center` and kill any residual drift
    pub fn recenter(&mut self, center: Vec2) {
        self.pos = center;
        self.drift = DriftHeading::Idle;
        self.drift_speed = 0.0;
    }
}

impl Body for Craft {
    fn id(&self) -> u32 {
        CRAFT_ID
    }
    fn kind(&self) -> EntityKind {
        EntityKind::Craft
    }
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A fired projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Fixed at creation from the aim vector
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
    /// Seconds since spawn, advanced by the raw frame delta
    pub age_secs: f32,
}

impl Projectile {
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.dir * self.speed * dt;
    }

    pub fn expired(&self, lifetime_secs: f32) -> bool {
        self.age_secs >= lifetime_secs
    }
}

impl Body for Projectile {
    fn id(&self) -> u32 {
        self.id
    }
    fn kind(&self) -> EntityKind {
        EntityKind::Projectile
    }
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A drifting obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    /// Unit heading, reassigned on bounce and on split
    pub dir: Vec2,
    pub tier: Tier,
    pub radius: f32,
}

impl Obstacle {
    /// Obstacles share one global speed, owned by the session
    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.pos += self.dir * speed * dt;
    }
}

impl Body for Obstacle {
    fn id(&self) -> u32 {
        self.id
    }
    fn kind(&self) -> EntityKind {
        EntityKind::Obstacle
    }
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// A fresh generator for the next wave; each call advances the stream
    /// so successive waves differ while the whole run stays reproducible.
    pub fn wave_rng(&mut self) -> Pcg32 {
        self.stream += 1;
        Pcg32::seed_from_u64(
            self.seed
                .wrapping_add(self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)),
        )
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub phase: SessionPhase,
    pub score: u32,
    pub lives: i32,
    pub level: u32,
    /// Speed shared by every obstacle; raised on level-up and wave surge
    pub obstacle_speed: f32,
    pub craft: Craft,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    /// Explosion timers, visual only
    pub effects: Vec<EffectTimer>,
    /// Events emitted since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Session clock, sum of raw frame deltas
    pub elapsed_secs: f32,
    pub time_ticks: u64,
    pub tuning: Tuning,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            phase: SessionPhase::Menu,
            score: 0,
            lives: tuning.starting_lives,
            level: 1,
            obstacle_speed: tuning.base_obstacle_speed,
            craft: Craft::new(&tuning),
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            effects: Vec::new(),
            events: Vec::new(),
            elapsed_secs: 0.0,
            time_ticks: 0,
            tuning,
            next_id: CRAFT_ID + 1,
        };
        super::tick::spawn_wave(&mut state);
        state
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Hand the buffered events to the caller and start a fresh buffer
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start a fresh run: counters, speed, populations, craft
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.level = 1;
        self.obstacle_speed = self.tuning.base_obstacle_speed;
        self.projectiles.clear();
        self.obstacles.clear();
        self.effects.clear();
        self.craft.recenter(self.tuning.field_center());
        self.craft.invincible_secs = self.tuning.invincibility_secs;
        super::tick::spawn_wave(self);
        self.phase = SessionPhase::Playing;
        log::info!("session restarted");
    }

    /// The craft was destroyed: clear projectiles, recenter, grant grace.
    /// Score, level, and the obstacle population survive.
    pub fn respawn(&mut self) {
        self.projectiles.clear();
        self.craft.recenter(self.tuning.field_center());
        self.craft.invincible_secs = self.tuning.invincibility_secs;
        log::debug!("craft respawned, {} lives left", self.lives);
    }

    /// The obstacle population reached zero: next level, faster wave
    pub fn level_up(&mut self) {
        self.level += 1;
        self.obstacle_speed += self.tuning.level_speed_bonus;
        self.projectiles.clear();
        self.obstacles.clear();
        self.effects.clear();
        super::tick::spawn_wave(self);
        self.craft.recenter(self.tuning.field_center());
        self.events.push(GameEvent::LevelCompleted { level: self.level });
        log::info!(
            "level {} reached, obstacle speed {}",
            self.level,
            self.obstacle_speed
        );
    }

    /// Manual next-wave trigger: a faster wave mid-level
    pub fn surge_wave(&mut self) {
        self.obstacle_speed += self.tuning.surge_speed_bonus;
        self.projectiles.clear();
        self.obstacles.clear();
        super::tick::spawn_wave(self);
        self.craft.recenter(self.tuning.field_center());
        log::info!("wave surge, obstacle speed {}", self.obstacle_speed);
    }

    /// Read-only copy for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            level: self.level,
            craft_pos: self.craft.pos,
            craft_heading: self.craft.heading,
            craft_radius: self.craft.radius,
            craft_invincible: self.craft.is_invincible(),
            projectiles: self
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    pos: p.pos,
                    radius: p.radius,
                })
                .collect(),
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    pos: o.pos,
                    radius: o.radius,
                    tier: o.tier,
                })
                .collect(),
            effects: self
                .effects
                .iter()
                .map(|e| EffectView {
                    pos: e.pos,
                    frame: e.frame(),
                })
                .collect(),
        }
    }
}

/// Per-frame view of everything the presentation layer draws
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub score: u32,
    pub lives: i32,
    pub level: u32,
    pub craft_pos: Vec2,
    pub craft_heading: Vec2,
    pub craft_radius: f32,
    pub craft_invincible: bool,
    pub projectiles: Vec<ProjectileView>,
    pub obstacles: Vec<ObstacleView>,
    pub effects: Vec<EffectView>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ObstacleView {
    pub pos: Vec2,
    pub radius: f32,
    pub tier: Tier,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EffectView {
    pub pos: Vec2,
    pub frame: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn new_state_starts_in_menu_with_a_wave() {
        let state = GameState::new(7);
        assert_eq!(state.phase, SessionPhase::Menu);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.obstacles.len(), WAVE_SIZE);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.craft.pos, state.tuning.field_center());
    }

    #[test]
    fn same_seed_spawns_the_same_wave() {
        let a = GameState::new(99);
        let b = GameState::new(99);
        for (oa, ob) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(oa.pos, ob.pos);
            assert_eq!(oa.tier, ob.tier);
        }
    }

    #[test]
    fn restart_resets_counters_and_speed() {
        let mut state = GameState::new(7);
        state.score = 40;
        state.lives = 1;
        state.level = 5;
        state.obstacle_speed = 600.0;
        state.phase = SessionPhase::GameOver;

        state.restart();

        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.obstacle_speed, BASE_OBSTACLE_SPEED);
        assert_eq!(state.obstacles.len(), WAVE_SIZE);
        assert_eq!(state.phase, SessionPhase::Playing);
    }

    #[test]
    fn respawn_clears_projectiles_and_preserves_progress() {
        let mut state = GameState::new(7);
        state.score = 12;
        state.level = 3;
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: Vec2::new(10.0, 10.0),
            dir: Vec2::X,
            speed: PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
            age_secs: 0.0,
        });
        state.craft.pos = Vec2::new(5.0, 5.0);

        state.respawn();

        assert!(state.projectiles.is_empty());
        assert_eq!(state.craft.pos, state.tuning.field_center());
        assert!(state.craft.is_invincible());
        assert_eq!(state.score, 12);
        assert_eq!(state.level, 3);
        assert_eq!(state.obstacles.len(), WAVE_SIZE);
    }

    #[test]
    fn level_up_preserves_score_and_lives() {
        let mut state = GameState::new(7);
        state.score = 11;
        state.lives = 2;
        state.obstacles.clear();

        state.level_up();

        assert_eq!(state.score, 11);
        assert_eq!(state.lives, 2);
        assert_eq!(state.level, 2);
        assert_eq!(state.obstacle_speed, BASE_OBSTACLE_SPEED + LEVEL_SPEED_BONUS);
        assert_eq!(state.obstacles.len(), WAVE_SIZE);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::LevelCompleted { level: 2 }))
        );
    }

    #[test]
    fn surge_wave_uses_the_larger_increment() {
        let mut state = GameState::new(7);
        state.surge_wave();
        assert_eq!(state.obstacle_speed, BASE_OBSTACLE_SPEED + SURGE_SPEED_BONUS);
        assert_eq!(state.obstacles.len(), WAVE_SIZE);
    }

    #[test]
    fn tier_shrinks_one_step_at_a_time() {
        assert_eq!(Tier::Large.shrunk(), Some(Tier::Medium));
        assert_eq!(Tier::Medium.shrunk(), Some(Tier::Small));
        assert_eq!(Tier::Small.shrunk(), None);
    }

    #[test]
    fn opposing_intents_cancel() {
        assert_eq!(
            DriftHeading::from_intents(true, true, false, false),
            DriftHeading::Idle
        );
        assert_eq!(
            DriftHeading::from_intents(true, true, true, false),
            DriftHeading::West
        );
    }

    #[test]
    fn adjacent_intents_combine_into_diagonals() {
        assert_eq!(
            DriftHeading::from_intents(true, false, false, true),
            DriftHeading::NorthEast
        );
        assert_eq!(
            DriftHeading::from_intents(false, true, true, false),
            DriftHeading::SouthWest
        );
        // Diagonals move at half speed per axis
        assert_eq!(
            DriftHeading::NorthEast.axis_factors(),
            Vec2::new(0.5, -0.5)
        );
    }

    #[test]
    fn take_events_drains_the_buffer() {
        let mut state = GameState::new(7);
        state.events.push(GameEvent::ProjectileFired);
        let drained = state.take_events();
        assert_eq!(drained.len(), 1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn snapshot_mirrors_populations() {
        let state = GameState::new(7);
        let snap = state.snapshot();
        assert_eq!(snap.obstacles.len(), state.obstacles.len());
        assert_eq!(snap.projectiles.len(), 0);
        assert_eq!(snap.craft_pos, state.craft.pos);
        assert_eq!(snap.lives, state.lives);
    }
}
