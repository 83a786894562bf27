//! HUD status values
//!
//! Derived purely from a published snapshot. Styling thresholds live in
//! `consts` so any front end applies the same cutoffs.

use std::fmt;

use serde::Serialize;

use crate::consts::{LOW_AMMO, LOW_HEALTH_PERCENT};
use crate::sim::{Outcome, Snapshot};

/// What the status bar shows for one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HudStatus {
    pub health_percent: u32,
    pub total_ammo: u32,
    /// Countdown as `m:ss`
    pub countdown: String,
    pub low_health: bool,
    pub low_ammo: bool,
    pub outcome: Outcome,
}

impl HudStatus {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            health_percent: snapshot.squad_health_percent,
            total_ammo: snapshot.total_ammo,
            countdown: format_countdown(snapshot.countdown_secs),
            low_health: snapshot.squad_health_percent < LOW_HEALTH_PERCENT,
            low_ammo: snapshot.total_ammo < LOW_AMMO,
            outcome: snapshot.outcome,
        }
    }
}

impl fmt::Display for HudStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}% - {} | ammo {}",
            self.health_percent, self.countdown, self.total_ammo
        )?;
        if self.low_health {
            write!(f, " [LOW HEALTH]")?;
        }
        if self.low_ammo {
            write!(f, " [LOW AMMO]")?;
        }
        Ok(())
    }
}

/// Format whole seconds remaining as `m:ss`
pub fn format_countdown(secs: f32) -> String {
    let total = secs.max(0.0).floor() as u32;
    format!("{}:{:02}", total / 60, total % 60)
}
