//! Squad Siege entry point
//!
//! Runs a headless session: a scripted patrol stands in for player clicks and
//! a logging presenter stands in for the renderer.
//!
//! Usage: `squad-siege [config.json] [seed]`

use glam::Vec2;

use squad_siege::arena::{ArenaLayout, CellKind};
use squad_siege::consts::{SIM_DT, TICKS_PER_SECOND};
use squad_siege::scheduler::{FixedStepScheduler, Presenter};
use squad_siege::sim::{GameState, Snapshot};
use squad_siege::{HudStatus, SimConfig};

/// Patrol waypoints as fractions of the arena
const PATROL: [(f32, f32); 4] = [(0.25, 0.3), (0.75, 0.3), (0.75, 0.7), (0.25, 0.7)];
/// Seconds between patrol orders
const PATROL_INTERVAL_SECS: u64 = 8;

/// Logs the HUD once per simulated second
struct LogPresenter {
    deck: ArenaLayout,
    last: Option<Snapshot>,
}

impl LogPresenter {
    /// Count units currently standing in a doorway
    fn units_in_doors(&self, snapshot: &Snapshot) -> usize {
        snapshot
            .units
            .iter()
            .filter(|u| self.deck.cell_at(u.pos) == Some(CellKind::Door))
            .count()
    }
}

impl Presenter for LogPresenter {
    fn render(&mut self, snapshot: &Snapshot) {
        if snapshot.tick % TICKS_PER_SECOND as u64 == 0 {
            log::info!(
                "{} | hostiles {} | shots {} | pickups {} | in doors {}",
                HudStatus::from_snapshot(snapshot),
                snapshot.hostiles.len(),
                snapshot.projectiles.len(),
                snapshot.pickups.len(),
                self.units_in_doors(snapshot)
            );
        }
        self.last = Some(snapshot.clone());
    }
}

fn load_config(path: Option<&str>) -> Result<SimConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            let config = SimConfig::from_json(&json)?;
            log::info!("Loaded config from {}", path);
            Ok(config)
        }
        None => Ok(SimConfig::default()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Squad Siege (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match load_config(args.first().map(String::as_str)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Bad config: {}", e);
            std::process::exit(1);
        }
    };
    let seed = args
        .get(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);

    let mut state = match GameState::seeded(config, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Bad config: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Game initialized with seed: {}", seed);

    let mut scheduler = FixedStepScheduler::new();
    let deck = ArenaLayout::default();
    log::info!("Deck layout: {}x{} tiles", deck.columns, deck.rows);
    let mut presenter = LogPresenter { deck, last: None };
    let (width, height) = (state.config.arena_width, state.config.arena_height);
    let mut waypoint = 0;
    let mut last_order_tick = None;

    while !scheduler.is_stopped() {
        let secs = state.time_ticks / TICKS_PER_SECOND as u64;
        let order_due = state.time_ticks % (PATROL_INTERVAL_SECS * TICKS_PER_SECOND as u64) == 0;
        if order_due && last_order_tick != Some(state.time_ticks) {
            last_order_tick = Some(state.time_ticks);
            let (fx, fy) = PATROL[waypoint % PATROL.len()];
            log::debug!("Patrol order {} at {}s", waypoint, secs);
            scheduler.queue_move_order(&state, Vec2::new(fx * width, fy * height));
            waypoint += 1;
        }
        scheduler.advance(&mut state, SIM_DT, &mut presenter);
    }

    if let Some(last) = presenter.last {
        println!("{}", HudStatus::from_snapshot(&last));
        println!("{}", last.outcome.message().unwrap_or("Run interrupted"));
    }
}
