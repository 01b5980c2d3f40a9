//! Per-frame simulation tick
//!
//! One call advances the session by a variable frame delta: intents apply,
//! entities move and wrap, the collision sweep resolves hits, and level
//! progression runs last. Population changes land only between sweeps.

use std::f32::consts::{FRAC_1_SQRT_2, TAU};

use glam::Vec2;
use rand::Rng;

use super::collision::{Body, Response, bounce_directions, collided, response_for};
use super::events::{EffectTimer, GameEvent};
use super::state::{Craft, DriftHeading, GameState, Obstacle, Projectile, SessionPhase, Tier};
use super::wrap::wrap_position;
use crate::tuning::Tuning;
use crate::unit_toward;

/// Heading taken by the shrunk survivor of a split
const SPLIT_SURVIVOR_DIR: Vec2 = Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2);
/// Heading taken by the offspring of a split
const SPLIT_OFFSPRING_DIR: Vec2 = Vec2::X;

/// Input intents for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held directional intents; north is screen-up
    pub north: bool,
    pub south: bool,
    pub west: bool,
    pub east: bool,
    /// Fire intent; a projectile leaves the muzzle every frame it is held
    pub fire: bool,
    /// Aim target point in field coordinates (pointer position)
    pub aim: Vec2,
    /// Leave the menu and start playing
    pub start: bool,
    /// Freeze the session
    pub pause: bool,
    /// Unfreeze a paused session
    pub resume: bool,
    /// Begin a fresh run from pause or game over
    pub restart: bool,
    /// Tear the session down
    pub quit: bool,
    /// Force the next wave early (debug/testing)
    pub surge_wave: bool,
    /// Grace-period cheat (debug/testing)
    pub invincible: bool,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        SessionPhase::Menu => {
            if input.quit {
                state.phase = SessionPhase::Exiting;
            } else if input.start {
                state.phase = SessionPhase::Playing;
                log::info!("session started");
            }
            return;
        }
        SessionPhase::Paused => {
            if input.quit {
                state.phase = SessionPhase::Exiting;
            } else if input.restart {
                state.restart();
            } else if input.resume {
                state.phase = SessionPhase::Playing;
            }
            return;
        }
        SessionPhase::GameOver => {
            if input.quit {
                state.phase = SessionPhase::Exiting;
            } else if input.restart {
                state.restart();
            }
            return;
        }
        SessionPhase::Exiting => return,
        SessionPhase::Playing => {}
    }

    if input.pause {
        state.phase = SessionPhase::Paused;
        return;
    }

    state.time_ticks += 1;
    // The session clock follows the raw frame delta, so projectile ages
    // track wall time.
    state.elapsed_secs += dt;

    if input.invincible {
        state.craft.invincible_secs = state.tuning.invincibility_secs;
    }
    if input.surge_wave {
        state.surge_wave();
        return;
    }

    state.craft.invincible_secs = (state.craft.invincible_secs - dt).max(0.0);

    // 1. Craft intents: steer, aim, fire
    steer_craft(state, input, dt);
    state.craft.heading = unit_toward(state.craft.pos, input.aim, state.craft.heading);
    if input.fire {
        fire_projectile(state);
    }

    // 2. Projectiles: drop expired ones before moving, wrap survivors
    let (w, h) = (state.tuning.field_width, state.tuning.field_height);
    let lifetime = state.tuning.projectile_lifetime_secs;
    for i in (0..state.projectiles.len()).rev() {
        state.projectiles[i].age_secs += dt;
        if state.projectiles[i].expired(lifetime) {
            state.projectiles.remove(i);
            continue;
        }
        let projectile = &mut state.projectiles[i];
        projectile.advance(dt);
        projectile.pos = wrap_position(projectile.pos, projectile.radius, w, h);
    }

    // 3. Obstacles: wrap on the pre-move position, then move
    let speed = state.obstacle_speed;
    for obstacle in &mut state.obstacles {
        obstacle.pos = wrap_position(obstacle.pos, obstacle.radius, w, h);
        obstacle.advance(speed, dt);
    }

    // 4. Collision and lifecycle sweep
    sweep_collisions(state);

    // 5. Level progression
    if state.phase == SessionPhase::Playing && state.obstacles.is_empty() {
        state.level_up();
    }

    // 6. Age out visual-effect timers
    for i in (0..state.effects.len()).rev() {
        if state.effects[i].is_finished() {
            state.effects.remove(i);
        } else {
            state.effects[i].advance();
        }
    }
}

/// Apply directional intents, or let the craft drift on its last heading.
///
/// Holding any intent snaps the drift speed to the maximum; on release the
/// speed decays by a fixed step each frame until the craft stops.
fn steer_craft(state: &mut GameState, input: &TickInput, dt: f32) {
    let heading = DriftHeading::from_intents(input.north, input.south, input.west, input.east);
    let max_speed = state.tuning.craft_max_speed;
    let decay = state.tuning.drift_decay_step;
    let craft = &mut state.craft;

    if heading != DriftHeading::Idle {
        craft.drift = heading;
        craft.drift_speed = max_speed;
        craft.pos += heading.axis_factors() * max_speed * dt;
        wrap_craft(craft, input, &state.tuning);
    } else if craft.drift != DriftHeading::Idle {
        craft.drift_speed = (craft.drift_speed - decay).max(0.0);
        if craft.drift_speed == 0.0 {
            craft.drift = DriftHeading::Idle;
        } else {
            craft.pos += craft.drift.axis_factors() * craft.drift_speed * dt;
        }
    }
}

/// The craft wraps only while the matching directional intent is held;
/// parked at an edge it stays put.
fn wrap_craft(craft: &mut Craft, input: &TickInput, tuning: &Tuning) {
    let r = craft.radius;
    let (w, h) = (tuning.field_width, tuning.field_height);
    if craft.pos.y + r <= 0.0 && input.north {
        craft.pos.y = h - r;
    } else if craft.pos.y + r >= h && input.south {
        craft.pos.y = -r;
    } else if craft.pos.x + r <= 0.0 && input.west {
        craft.pos.x = w - r;
    } else if craft.pos.x + r >= w && input.east {
        craft.pos.x = -r;
    }
}

fn fire_projectile(state: &mut GameState) {
    let dir = state.craft.heading;
    let pos = state.craft.pos + dir * state.tuning.muzzle_offset;
    let speed = state.tuning.projectile_speed;
    let radius = state.tuning.projectile_radius;
    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos,
        dir,
        speed,
        radius,
        age_secs: 0.0,
    });
    state.events.push(GameEvent::ProjectileFired);
}

/// Resolve every pairwise interaction for this frame.
///
/// Obstacles are visited in reverse index order so in-place removal keeps
/// the remaining indices valid. The response to each contact comes from the
/// kind-pair lookup; offspring from splits are buffered and merged only
/// after the sweep.
fn sweep_collisions(state: &mut GameState) {
    let mut offspring: Vec<Obstacle> = Vec::new();

    for i in (0..state.obstacles.len()).rev() {
        if !state.craft.is_invincible()
            && collided(&state.obstacles[i], &state.craft)
            && response_for(state.obstacles[i].kind(), state.craft.kind()) == Response::LoseLife
        {
            let pos = state.craft.pos;
            state.effects.push(EffectTimer::explosion(pos));
            state.events.push(GameEvent::CraftHit { pos });
            state.lives -= 1;
            if state.lives <= 0 {
                state.events.push(GameEvent::SessionEnded { score: state.score });
                state.phase = SessionPhase::GameOver;
                log::info!("session over, final score {}", state.score);
            } else {
                state.respawn();
            }
            // The craft was recentered and the projectile list cleared;
            // the rest of this sweep would act on stale state.
            break;
        }

        for k in 0..state.obstacles.len() {
            if collided(&state.obstacles[i], &state.obstacles[k])
                && response_for(state.obstacles[i].kind(), state.obstacles[k].kind())
                    == Response::Bounce
            {
                let (di, dk) = bounce_directions(state.obstacles[i].pos, state.obstacles[k].pos);
                state.obstacles[i].dir = di;
                state.obstacles[k].dir = dk;
            }
        }

        for j in (0..state.projectiles.len()).rev() {
            if collided(&state.obstacles[i], &state.projectiles[j])
                && response_for(state.obstacles[i].kind(), state.projectiles[j].kind())
                    == Response::Split
            {
                state.projectiles.remove(j);
                split_obstacle(state, i, &mut offspring);
                break;
            }
        }
    }

    state.obstacles.append(&mut offspring);
}

/// Apply the split rule to the obstacle at `index` after a projectile hit.
///
/// Larger tiers shrink one step and leave one offspring of the new tier at
/// the same position; the smallest tier is removed and scores a point.
fn split_obstacle(state: &mut GameState, index: usize, offspring: &mut Vec<Obstacle>) {
    let pos = state.obstacles[index].pos;
    state.effects.push(EffectTimer::explosion(pos));

    match state.obstacles[index].tier.shrunk() {
        Some(tier) => {
            let radius = tier.radius(&state.tuning);
            let survivor = &mut state.obstacles[index];
            survivor.tier = tier;
            survivor.radius = radius;
            survivor.dir = SPLIT_SURVIVOR_DIR;

            let id = state.next_entity_id();
            offspring.push(Obstacle {
                id,
                pos,
                dir: SPLIT_OFFSPRING_DIR,
                tier,
                radius,
            });
            state.events.push(GameEvent::ObstacleSplit { pos, tier });
        }
        None => {
            state.obstacles.remove(index);
            state.score += 1;
            state.events.push(GameEvent::ObstacleDestroyed { pos });
        }
    }
}

/// Populate a fresh wave of obstacles at the field edges.
///
/// Placement is quadrant-biased: three obstacles along the top edge, four
/// along the bottom, two on the left, and the rest on the right (spawn
/// index 7 falls through to the right edge). Tier and heading are drawn
/// from the seeded wave stream.
pub fn spawn_wave(state: &mut GameState) {
    let mut rng = state.rng_state.wave_rng();
    let (w, h) = (state.tuning.field_width, state.tuning.field_height);
    let wave_size = state.tuning.wave_size;
    log::info!(
        "spawning {} obstacles at level {}, speed {}",
        wave_size,
        state.level,
        state.obstacle_speed
    );

    for i in 0..wave_size {
        let tier = match rng.random_range(0..3u8) {
            0 => Tier::Small,
            1 => Tier::Medium,
            _ => Tier::Large,
        };
        let angle = rng.random_range(0.0..TAU);
        let dir = Vec2::new(angle.sin(), angle.cos());
        let pos = if i < 3 {
            Vec2::new(rng.random_range(0.0..w), 1.0)
        } else if i < 7 {
            Vec2::new(rng.random_range(0.0..w), h - 1.0)
        } else if i > 7 && i < 10 {
            Vec2::new(1.0, rng.random_range(0.0..h))
        } else {
            Vec2::new(w - 1.0, rng.random_range(0.0..h))
        };
        let radius = tier.radius(&state.tuning);
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos,
            dir,
            tier,
            radius,
        });
    }
}
