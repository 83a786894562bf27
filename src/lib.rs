//! Squad Siege - hold the deck until extraction
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `config`: Validated run configuration
//! - `arena`: Static deck layout used for background rendering
//! - `hud`: Status values derived from a snapshot
//! - `scheduler`: Fixed-step driver and presentation hook

pub mod arena;
pub mod config;
pub mod hud;
pub mod scheduler;
pub mod sim;

pub use config::{ConfigError, SimConfig};
pub use hud::HudStatus;

use glam::Vec2;

/// Game configuration constants
///
/// Distances are pixels, speeds are pixels per tick, times are ticks unless
/// the name says otherwise.
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the scheduler accepts (seconds); must cover more
    /// than `MAX_SUBSTEPS` ticks for the cap to apply
    pub const MAX_FRAME_DT: f32 = 0.25;
    const _: () = assert!(MAX_FRAME_DT > MAX_SUBSTEPS as f32 * SIM_DT);

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    pub const TILE_SIZE: f32 = 32.0;

    /// Squad defaults
    pub const SQUAD_SIZE: usize = 4;
    pub const FORMATION_SPACING: f32 = 30.0;
    pub const UNIT_SIZE: f32 = 24.0;
    pub const UNIT_SPEED: f32 = 2.0;
    pub const UNIT_MAX_HEALTH: f32 = 100.0;
    pub const INITIAL_AMMO: u32 = 50;
    pub const FIRE_COOLDOWN_MS: u32 = 500;
    pub const FIRING_RANGE: f32 = 150.0;
    /// Speed multiplier is rolled in [MIN, MIN + SPREAD)
    pub const SPEED_VARIATION_MIN: f32 = 0.5;
    pub const SPEED_VARIATION_SPREAD: f32 = 0.5;
    /// Jitter offset is rolled per axis in [-JITTER/2, JITTER/2)
    pub const POSITION_JITTER: f32 = 20.0;

    /// Hostile defaults
    pub const HOSTILE_SIZE: f32 = 20.0;
    pub const HOSTILE_SPEED: f32 = 1.0;
    pub const HOSTILE_MAX_HEALTH: f32 = 100.0;
    /// Sustained contact damage applied every tick while touching a unit
    pub const CONTACT_DAMAGE: f32 = 0.5;
    pub const DEATH_PROGRESS_STEP: f32 = 0.1;

    /// Projectile defaults
    pub const PROJECTILE_SIZE: f32 = 3.0;
    pub const PROJECTILE_SPEED: f32 = 5.0;
    pub const PROJECTILE_DAMAGE: f32 = 25.0;
    /// Hit threshold (not sprite-accurate)
    pub const PROJECTILE_HIT_RADIUS: f32 = HOSTILE_SIZE;

    /// Pickup defaults
    pub const PICKUP_SIZE: f32 = 10.0;
    pub const PICKUP_SPAWN_CHANCE: f32 = 0.8;
    pub const MIN_PICKUP_INTERVAL_MS: u32 = 3000;
    pub const HEALTH_PICKUP_AMOUNT: f32 = 30.0;
    pub const AMMO_PICKUP_AMOUNT: u32 = 30;
    pub const PULSE_STEP: f32 = 0.1;

    /// Run timing
    pub const GAME_DURATION_SECS: u32 = 180;
    pub const SPAWN_INTERVAL_MS: u32 = 3000;

    /// HUD cutoffs
    pub const LOW_HEALTH_PERCENT: u32 = 30;
    pub const LOW_AMMO: u32 = 10;
}

/// Convert a millisecond interval to whole simulation ticks (rounded)
#[inline]
pub fn ms_to_ticks(ms: u32) -> u64 {
    (ms as u64 * consts::TICKS_PER_SECOND as u64 + 500) / 1000
}

/// Move `from` toward `to`.
///
/// If the remaining distance exceeds `speed`, advances `speed * scale` along
/// the direction; otherwise stays put.
#[inline]
pub fn step_toward(from: Vec2, to: Vec2, speed: f32, scale: f32) -> Vec2 {
    let delta = to - from;
    let distance = delta.length();
    if distance > speed {
        from + delta / distance * speed * scale
    } else {
        from
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Clamp a point into the arena rectangle `[0, width] x [0, height]`
#[inline]
pub fn clamp_to_arena(point: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(point.x.clamp(0.0, width), point.y.clamp(0.0, height))
}
