//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. The phase
//! order inside a tick is fixed: squad, hostiles, projectiles, pickups,
//! spawning, roster cleanup. A hostile killed by a projectile in this tick
//! is only advanced (and possibly removed) on the next one.

use glam::Vec2;

use super::snapshot::Snapshot;
use super::state::{GameState, Outcome, ProjectileEvent};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Regroup the squad around this arena-local point
    pub move_order: Option<Vec2>,
}

/// Advance the game state by one fixed timestep and publish a snapshot
pub fn tick(state: &mut GameState, input: &TickInput) -> Snapshot {
    // Finished runs stay frozen
    if state.outcome.is_over() {
        return Snapshot::capture(state);
    }

    if let Some(target) = input.move_order {
        state.issue_move_order(target);
    }

    // --- COUNTDOWN ---
    if state.countdown_ticks == 0 {
        state.finish(Outcome::Victory);
        return Snapshot::capture(state);
    }
    state.countdown_ticks -= 1;
    state.time_ticks += 1;
    let now = state.time_ticks;

    // --- SQUAD ---
    let shots = state.squad.update(&state.hostiles, now, &state.config);
    for shot in shots {
        state.spawn_projectile(shot);
    }

    // --- HOSTILES ---
    let units = &mut state.squad.units;
    let config = &state.config;
    state.hostiles.retain_mut(|hostile| !hostile.update(units, config));

    // --- PROJECTILES ---
    // Kills are collected and rolled for pickups afterwards (borrow split)
    let mut kills: Vec<Vec2> = Vec::new();
    let hostiles = &mut state.hostiles;
    state.projectiles.retain_mut(|projectile| {
        let event = projectile.update(hostiles, config);
        if let ProjectileEvent::Hit { kill: Some(pos) } = event {
            kills.push(pos);
        }
        !event.should_remove()
    });
    for pos in kills {
        state.on_hostile_killed(pos);
    }

    // --- PICKUPS ---
    let units = &mut state.squad.units;
    let config = &state.config;
    state.pickups.retain_mut(|pickup| !pickup.update(units, config));

    // --- SPAWNING ---
    let spawn_due = state
        .last_spawn_tick
        .is_none_or(|last| now - last > state.config.spawn_interval_ticks());
    if spawn_due {
        state.spawn_hostile_at_edge();
        state.last_spawn_tick = Some(now);
    }

    // --- ROSTER ---
    let fallen = state.squad.remove_fallen();
    if fallen > 0 {
        log::debug!("{} unit(s) down, {} remaining", fallen, state.squad.len());
    }
    if state.squad.is_empty() {
        state.finish(Outcome::Defeat);
    }

    // Clock ran out on this tick; a defeat above takes precedence
    if state.countdown_ticks == 0 {
        state.finish(Outcome::Victory);
    }

    Snapshot::capture(state)
}
