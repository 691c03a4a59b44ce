//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::Body;
use super::timers::TaskId;
use crate::consts::*;

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneKind {
    /// Title screen, waiting for a tap
    Menu,
    /// Active gameplay
    Play,
    /// "Missions Coming Soon" placeholder
    MissionBoard,
}

/// Health, score and inventory carried by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// 0..=MAX_HEALTH
    pub health: u32,
    pub score: u64,
    pub ammo: u32,
    /// 0.0..=MAX_FUEL
    pub fuel: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            health: MAX_HEALTH,
            score: 0,
            ammo: START_AMMO,
            fuel: MAX_FUEL,
        }
    }
}

impl PlayerStats {
    /// Apply damage, flooring health at zero
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Add fuel up to the tank limit, returning how much was actually added
    pub fn add_fuel(&mut self, amount: f32) -> f32 {
        let before = self.fuel;
        self.fuel = (self.fuel + amount).min(MAX_FUEL);
        self.fuel - before
    }

    /// Burn fuel, flooring at zero
    pub fn drain_fuel(&mut self, amount: f32) {
        self.fuel = (self.fuel - amount).max(0.0);
    }

    /// Spend one round. False (and no change) when empty.
    pub fn use_ammo(&mut self) -> bool {
        if self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        true
    }
}

/// The player's car
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    /// Facing angle (radians, screen space)
    pub rotation: f32,
    /// Remaining time input is ignored after a knockback (ms)
    pub knockback_ms: f64,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            rotation: 0.0,
            knockback_ms: 0.0,
        }
    }
}

/// A hostile wandering enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: Body,
    pub health: i32,
}

/// A projectile in flight
#[derive(Debug, Clone)]
pub struct Bullet {
    pub body: Body,
    pub rotation: f32,
    /// Lifetime task; cancelled if the bullet goes away first
    pub expiry: TaskId,
}

/// A fuel canister sitting on the road
#[derive(Debug, Clone)]
pub struct FuelPickup {
    pub body: Body,
}

impl FuelPickup {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(FUEL_SIZE)),
        }
    }
}

/// Mission objective types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionKind {
    /// Destroy `target` enemies
    Kill,
}

/// The single active mission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub kind: MissionKind,
    pub target: u32,
    pub progress: u32,
}

impl Mission {
    pub fn kill(target: u32) -> Self {
        Self {
            kind: MissionKind::Kill,
            target,
            progress: 0,
        }
    }

    /// Count a kill toward the mission (only kill missions care)
    pub fn record_kill(&mut self) {
        if self.kind == MissionKind::Kill {
            self.progress += 1;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.target
    }
}

/// Things that happened during a tick, for audio/haptics/logging
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The session moved to another scene
    SceneChanged(SceneKind),
    /// A bullet left the car
    Shot { pos: Vec2, rotation: f32 },
    /// An enemy took a bullet but survived
    EnemyHit { health: i32 },
    /// An enemy was destroyed
    EnemyKilled { pos: Vec2 },
    /// An enemy rammed the player
    PlayerHit { damage: u32 },
    /// A fuel pickup was collected
    FuelCollected { gained: f32 },
    /// Fuel dropped to the warning level
    LowFuel,
    MissionStarted { target: u32 },
    MissionCompleted,
    /// Health hit zero; stats were reset
    PlayerDied,
}
