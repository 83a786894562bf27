//! The player's squad: roster, formation and aggregate stats

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::state::{FireOrder, Hostile, Unit};
use crate::config::SimConfig;
use crate::polar_to_cartesian;

/// Ordered roster of units with a fixed starting size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Squad {
    pub units: Vec<Unit>,
    /// Ring radius of the formation around a move order
    pub spacing: f32,
    /// Roster size at formation; the denominator for squad health
    original_size: usize,
}

impl Squad {
    /// Form the starting squad in a two-column block around the arena centre
    pub fn form(config: &SimConfig, rng: &mut dyn RandomSource) -> Self {
        let center = Vec2::new(config.arena_width / 2.0, config.arena_height / 2.0);
        let spacing = config.formation_spacing;
        let units = (0..config.squad_size)
            .map(|slot| {
                let pos = center + Vec2::new((slot % 2) as f32, (slot / 2) as f32) * spacing;
                Unit::new(slot as u32, slot, pos, config, &mut *rng)
            })
            .collect();

        Self {
            units,
            spacing,
            original_size: config.squad_size,
        }
    }

    pub fn original_size(&self) -> usize {
        self.original_size
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Spread the squad on a ring around `target`.
    ///
    /// Each unit's angle comes from its fixed slot, not its current position,
    /// so units may cross paths while converging.
    pub fn issue_move_order(&mut self, target: Vec2) {
        let slots = self.original_size as f32;
        for unit in &mut self.units {
            let angle = unit.slot as f32 / slots * std::f32::consts::TAU;
            unit.target = target + polar_to_cartesian(self.spacing, angle);
        }
    }

    /// Advance every unit, collecting the shots fired this tick
    pub fn update(&mut self, hostiles: &[Hostile], now: u64, config: &SimConfig) -> Vec<FireOrder> {
        self.units
            .iter_mut()
            .filter_map(|unit| unit.update(hostiles, now, config))
            .collect()
    }

    /// Drop fallen units. Returns how many were removed.
    pub fn remove_fallen(&mut self) -> usize {
        let before = self.units.len();
        self.units.retain(|u| u.is_alive());
        before - self.units.len()
    }

    /// Summed health over the *original* roster size, as a 0..=1 fraction
    pub fn health_fraction(&self) -> f32 {
        let total: f32 = self.units.iter().map(|u| u.health).sum();
        total / (self.original_size as f32 * crate::consts::UNIT_MAX_HEALTH)
    }

    /// Squad health as a rounded percentage (0 with nobody left)
    pub fn health_percent(&self) -> u32 {
        if self.units.is_empty() {
            return 0;
        }
        let total: f32 = self.units.iter().map(|u| u.health).sum();
        (total / self.original_size as f32).round() as u32
    }

    pub fn total_ammo(&self) -> u32 {
        self.units.iter().map(|u| u.ammo).sum()
    }
}
