//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected random source only
//! - Stable iteration order (collection order, first match wins)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rng;
pub mod snapshot;
pub mod squad;
pub mod state;
pub mod tick;

pub use collision::{first_within, nearest, out_of_bounds};
pub use rng::{ConstantRng, RandomSource, ScriptedRng, SeededRng};
pub use snapshot::Snapshot;
pub use squad::Squad;
pub use state::{
    FireOrder, GameState, Hostile, HostileState, Outcome, Pickup, PickupKind, Projectile,
    ProjectileEvent, Unit,
};
pub use tick::{TickInput, tick};
