//! Game state and core simulation types
//!
//! The simulation owns every entity collection; entities never hold
//! references to each other; targets are looked up fresh each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{first_within, nearest, out_of_bounds};
use super::rng::{RandomSource, SeededRng};
use super::squad::Squad;
use crate::config::{ConfigError, SimConfig};
use crate::consts::*;
use crate::step_toward;

/// Terminal state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// Run still going
    #[default]
    InProgress,
    /// Countdown expired with at least one unit standing
    Victory,
    /// Every unit fell
    Defeat,
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        *self != Outcome::InProgress
    }

    /// End-of-run message for the collaborator layer
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Outcome::InProgress => None,
            Outcome::Victory => Some("Mission Accomplished! The squad survived!"),
            Outcome::Defeat => Some("Mission Failed! The squad was eliminated!"),
        }
    }
}

/// Projectile request produced by a unit that fired this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireOrder {
    pub origin: Vec2,
    pub vel: Vec2,
}

/// A squad member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: u32,
    /// Fixed position in the squad; drives the formation angle
    pub slot: usize,
    pub pos: Vec2,
    pub target: Vec2,
    /// 0..=100
    pub health: f32,
    pub ammo: u32,
    /// Facing angle (radians) toward the last engaged hostile
    pub facing: f32,
    /// Rolled once at creation
    pub speed_variation: f32,
    /// Rolled once at creation, added to the target
    pub offset: Vec2,
    pub last_fire_tick: Option<u64>,
    pub fire_cooldown_ticks: u64,
}

impl Unit {
    pub fn new(
        id: u32,
        slot: usize,
        pos: Vec2,
        config: &SimConfig,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let speed_variation = SPEED_VARIATION_MIN + rng.next_unit() * SPEED_VARIATION_SPREAD;
        let offset = Vec2::new(
            (rng.next_unit() - 0.5) * POSITION_JITTER,
            (rng.next_unit() - 0.5) * POSITION_JITTER,
        );
        Self {
            id,
            slot,
            pos,
            target: pos,
            health: UNIT_MAX_HEALTH,
            ammo: config.initial_ammo,
            facing: 0.0,
            speed_variation,
            offset,
            last_fire_tick: None,
            fire_cooldown_ticks: config.fire_cooldown_ticks(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Whether ammo and cooldown allow a shot at tick `now`
    pub fn can_fire(&self, now: u64) -> bool {
        self.ammo > 0
            && self
                .last_fire_tick
                .is_none_or(|last| now.saturating_sub(last) > self.fire_cooldown_ticks)
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, UNIT_MAX_HEALTH);
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(UNIT_MAX_HEALTH);
    }

    /// Engage the nearest living hostile in range, then walk toward the
    /// formation target. Returns the shot fired, if any.
    pub fn update(&mut self, hostiles: &[Hostile], now: u64, config: &SimConfig) -> Option<FireOrder> {
        let mut shot = None;

        if self.can_fire(now) {
            let living = hostiles
                .iter()
                .filter(|h| !h.is_dying())
                .map(|h| (h.pos, h.pos));
            if let Some((enemy_pos, _)) = nearest(self.pos, living, config.firing_range) {
                let to_enemy = enemy_pos - self.pos;
                self.facing = to_enemy.y.atan2(to_enemy.x);
                shot = Some(FireOrder {
                    origin: self.pos,
                    vel: Vec2::from_angle(self.facing) * config.projectile_speed,
                });
                self.ammo -= 1;
                self.last_fire_tick = Some(now);
            }
        }

        self.pos = step_toward(
            self.pos,
            self.target + self.offset,
            config.unit_speed,
            self.speed_variation,
        );

        shot
    }
}

/// Hostile lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HostileState {
    /// Seeking and damaging units
    Alive,
    /// Frozen in place while the death animation plays out (0..1)
    Dying { progress: f32 },
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub id: u32,
    pub pos: Vec2,
    /// 0..=100
    pub health: f32,
    pub size: f32,
    pub state: HostileState,
}

impl Hostile {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            health: HOSTILE_MAX_HEALTH,
            size: HOSTILE_SIZE,
            state: HostileState::Alive,
        }
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.state, HostileState::Dying { .. })
    }

    pub fn death_progress(&self) -> f32 {
        match self.state {
            HostileState::Alive => 0.0,
            HostileState::Dying { progress } => progress,
        }
    }

    /// Apply projectile damage. Returns true if this hit started the death.
    pub fn take_hit(&mut self, damage: f32) -> bool {
        if self.is_dying() {
            return false;
        }
        self.health = (self.health - damage).max(0.0);
        if self.health <= 0.0 {
            self.state = HostileState::Dying { progress: 0.0 };
            return true;
        }
        false
    }

    /// Advance one tick. Returns true when the hostile should be removed.
    pub fn update(&mut self, units: &mut [Unit], config: &SimConfig) -> bool {
        if let HostileState::Dying { ref mut progress } = self.state {
            *progress += DEATH_PROGRESS_STEP;
            return *progress >= 1.0;
        }

        let candidates = units.iter().enumerate().map(|(i, u)| (i, u.pos));
        if let Some((idx, distance)) = nearest(self.pos, candidates, f32::INFINITY) {
            let unit = &mut units[idx];
            self.pos = step_toward(self.pos, unit.pos, config.hostile_speed, 1.0);

            // Contact is judged on the pre-move distance
            if distance < UNIT_SIZE + self.size {
                unit.take_damage(config.contact_damage);
            }
        }

        false
    }
}

/// What happened to a projectile this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileEvent {
    /// Still in flight
    Flying,
    /// Struck a hostile; `kill` is the position if the hit was lethal
    Hit { kill: Option<Vec2> },
    /// Left the arena
    OutOfBounds,
}

impl ProjectileEvent {
    pub fn should_remove(&self) -> bool {
        !matches!(self, ProjectileEvent::Flying)
    }
}

/// A shot fired by a unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            vel,
            size: PROJECTILE_SIZE,
        }
    }

    /// Move, then strike the first living hostile in scan order within the
    /// hit radius.
    pub fn update(&mut self, hostiles: &mut [Hostile], config: &SimConfig) -> ProjectileEvent {
        self.pos += self.vel;

        let living = hostiles
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.is_dying())
            .map(|(i, h)| (i, h.pos));
        if let Some(idx) = first_within(self.pos, living, PROJECTILE_HIT_RADIUS) {
            let hostile = &mut hostiles[idx];
            let kill = hostile
                .take_hit(config.projectile_damage)
                .then_some(hostile.pos);
            return ProjectileEvent::Hit { kill };
        }

        if out_of_bounds(self.pos, config.arena_width, config.arena_height) {
            return ProjectileEvent::OutOfBounds;
        }
        ProjectileEvent::Flying
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Health,
    Ammo,
}

/// A supply drop left behind by a killed hostile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub size: f32,
    /// Cosmetic pulse, owned here so snapshots stay deterministic
    pub pulse_phase: f32,
}

impl Pickup {
    pub fn new(id: u32, kind: PickupKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size: PICKUP_SIZE,
            pulse_phase: 0.0,
        }
    }

    /// Give the effect to the first unit in range. Returns true if collected.
    pub fn update(&mut self, units: &mut [Unit], config: &SimConfig) -> bool {
        self.pulse_phase += PULSE_STEP;

        let candidates = units.iter().enumerate().map(|(i, u)| (i, u.pos));
        let Some(idx) = first_within(self.pos, candidates, UNIT_SIZE + self.size) else {
            return false;
        };

        let unit = &mut units[idx];
        match self.kind {
            PickupKind::Health => unit.heal(config.health_pickup_amount),
            PickupKind::Ammo => unit.ammo += config.ammo_pickup_amount,
        }
        true
    }
}

/// Complete simulation state
#[derive(Debug)]
pub struct GameState {
    pub config: SimConfig,
    /// Random source for spawns, pickups and unit jitter
    rng: Box<dyn RandomSource>,
    /// Simulation tick counter; the simulation clock
    pub time_ticks: u64,
    /// Ticks left before extraction
    pub countdown_ticks: u64,
    pub squad: Squad,
    pub hostiles: Vec<Hostile>,
    pub projectiles: Vec<Projectile>,
    pub pickups: Vec<Pickup>,
    /// Tick of the last hostile spawn (`None` = never)
    pub last_spawn_tick: Option<u64>,
    /// Tick of the last pickup spawn (`None` = never)
    pub last_pickup_tick: Option<u64>,
    pub outcome: Outcome,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Validate the config and build a fresh run
    pub fn new(config: SimConfig, rng: impl RandomSource + 'static) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng: Box<dyn RandomSource> = Box::new(rng);
        let squad = Squad::form(&config, rng.as_mut());
        let next_id = squad.original_size() as u32;

        log::info!(
            "Run ready: squad of {}, {}s on the clock",
            squad.original_size(),
            config.duration_secs
        );

        Ok(Self {
            countdown_ticks: config.duration_ticks(),
            config,
            rng,
            time_ticks: 0,
            squad,
            hostiles: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            last_spawn_tick: None,
            last_pickup_tick: None,
            outcome: Outcome::InProgress,
            next_id,
        })
    }

    /// Build a run driven by a seeded PCG generator
    pub fn seeded(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, SeededRng::new(seed))
    }

    /// Start over with the same config and random source
    pub fn reset(&mut self) {
        self.squad = Squad::form(&self.config, self.rng.as_mut());
        self.next_id = self.squad.original_size() as u32;
        self.time_ticks = 0;
        self.countdown_ticks = self.config.duration_ticks();
        self.hostiles.clear();
        self.projectiles.clear();
        self.pickups.clear();
        self.last_spawn_tick = None;
        self.last_pickup_tick = None;
        self.outcome = Outcome::InProgress;
        log::info!("Run reset");
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Player command: regroup the squad around `target`
    pub fn issue_move_order(&mut self, target: Vec2) {
        self.squad.issue_move_order(target);
    }

    /// Roll a uniform value from the injected random source
    pub fn roll(&mut self) -> f32 {
        self.rng.next_unit()
    }

    /// Place a hostile at an explicit position
    pub fn spawn_hostile_at(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.hostiles.push(Hostile::new(id, pos));
        id
    }

    /// Place a hostile just outside a random arena edge
    pub fn spawn_hostile_at_edge(&mut self) -> u32 {
        let (w, h) = (self.config.arena_width, self.config.arena_height);
        let side = ((self.roll() * 4.0) as u32).min(3);
        let along = self.roll();
        let pos = match side {
            0 => Vec2::new(along * w, -HOSTILE_SIZE),    // Top
            1 => Vec2::new(w + HOSTILE_SIZE, along * h), // Right
            2 => Vec2::new(along * w, h + HOSTILE_SIZE), // Bottom
            _ => Vec2::new(-HOSTILE_SIZE, along * h),    // Left
        };
        let id = self.spawn_hostile_at(pos);
        log::debug!("Hostile {} spawned at ({:.0}, {:.0})", id, pos.x, pos.y);
        id
    }

    pub fn spawn_projectile(&mut self, order: FireOrder) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::new(id, order.origin, order.vel));
        id
    }

    /// A projectile killed a hostile at `pos`: roll the drop attempt, then
    /// hand it to [`Self::try_spawn_pickup`].
    pub fn on_hostile_killed(&mut self, pos: Vec2) -> Option<u32> {
        log::debug!("Hostile down at ({:.0}, {:.0})", pos.x, pos.y);
        if self.roll() >= self.config.pickup_chance {
            return None;
        }
        self.try_spawn_pickup(pos)
    }

    /// Attempt a supply drop.
    ///
    /// Subject to the global pickup cooldown; once it has elapsed the chance
    /// is rolled again before the kind is picked.
    pub fn try_spawn_pickup(&mut self, pos: Vec2) -> Option<u32> {
        let now = self.time_ticks;
        let cooled = self
            .last_pickup_tick
            .is_none_or(|last| now.saturating_sub(last) > self.config.min_pickup_interval_ticks());
        if !cooled || self.roll() >= self.config.pickup_chance {
            return None;
        }

        let kind = if self.roll() < 0.5 {
            PickupKind::Health
        } else {
            PickupKind::Ammo
        };
        let id = self.next_entity_id();
        self.pickups.push(Pickup::new(id, kind, pos));
        self.last_pickup_tick = Some(now);
        log::debug!("{:?} pickup {} dropped", kind, id);
        Some(id)
    }

    /// Seconds left on the clock
    pub fn countdown_secs(&self) -> f32 {
        self.countdown_ticks as f32 / TICKS_PER_SECOND as f32
    }

    /// Seal the run with a terminal outcome
    pub fn finish(&mut self, outcome: Outcome) {
        if self.outcome.is_over() {
            return;
        }
        self.outcome = outcome;
        log::info!(
            "Run over at tick {}: {}",
            self.time_ticks,
            outcome.message().unwrap_or_default()
        );
    }
}
