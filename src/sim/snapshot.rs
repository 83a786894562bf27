//! Read-only view published after every tick
//!
//! Presentation and HUD consume this; nothing in it feeds back into the
//! simulation.

use serde::Serialize;

use super::state::{GameState, Hostile, Outcome, Pickup, Projectile, Unit};

/// Everything a renderer or status display needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub countdown_secs: f32,
    pub outcome: Outcome,
    pub units: Vec<Unit>,
    pub hostiles: Vec<Hostile>,
    pub projectiles: Vec<Projectile>,
    pub pickups: Vec<Pickup>,
    /// Squad health over the original roster, 0..=1
    pub squad_health: f32,
    /// Rounded percentage of the same
    pub squad_health_percent: u32,
    pub total_ammo: u32,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            tick: state.time_ticks,
            countdown_secs: state.countdown_secs(),
            outcome: state.outcome,
            units: state.squad.units.clone(),
            hostiles: state.hostiles.clone(),
            projectiles: state.projectiles.clone(),
            pickups: state.pickups.clone(),
            squad_health: state.squad.health_fraction(),
            squad_health_percent: state.squad.health_percent(),
            total_ammo: state.squad.total_ammo(),
        }
    }

    /// Serialize for an out-of-process presentation layer
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use glam::Vec2;

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = GameState::seeded(SimConfig::default(), 11).expect("valid config");
        state.spawn_hostile_at(Vec2::new(10.0, 10.0));
        let snap = Snapshot::capture(&state);
        assert_eq!(snap.units.len(), 4);
        assert_eq!(snap.hostiles.len(), 1);
        assert_eq!(snap.squad_health_percent, 100);
        assert_eq!(snap.total_ammo, 200);
        assert!((snap.countdown_secs - 180.0).abs() < 1e-3);
        assert_eq!(snap.outcome, Outcome::InProgress);
    }

    #[test]
    fn test_json_has_entities() {
        let state = GameState::seeded(SimConfig::default(), 11).expect("valid config");
        let json = Snapshot::capture(&state).to_json().expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["units"].as_array().map(|u| u.len()), Some(4));
        assert_eq!(value["outcome"], "InProgress");
    }
}
