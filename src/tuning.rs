//! Data-driven game balance
//!
//! Every gameplay number the simulation uses lives here so the page config can
//! override individual values without a rebuild.

use serde::{Deserialize, Serialize};

use crate::settings::SettingsError;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Movement ===
    /// Keyboard movement speed per axis (pixels/s)
    pub keyboard_speed: f32,
    /// Joystick speed at full deflection per axis (pixels/s)
    pub joystick_speed: f32,

    // === Shooting ===
    /// Bullet speed (pixels/s)
    pub bullet_speed: f32,
    /// Bullet lifetime before automatic removal (ms)
    pub bullet_lifetime_ms: f64,
    /// Damage a bullet deals to an enemy
    pub bullet_damage: i32,

    // === Enemies ===
    /// Live enemies kept in the world
    pub enemy_count: usize,
    /// Starting enemy health
    pub enemy_health: i32,
    /// Spawn velocity range per axis (pixels/s, symmetric)
    pub enemy_spawn_speed: i32,
    /// Wander velocity range per axis (pixels/s, symmetric)
    pub wander_speed: i32,
    /// Chase speed toward the player (pixels/s)
    pub chase_speed: f32,
    /// Behavior fires when a roll in 0..=1000 exceeds this
    pub behavior_roll_threshold: u32,
    /// Distance kept from the world edge when spawning (pixels)
    pub enemy_spawn_margin: f32,

    // === Player damage ===
    /// Health lost per enemy contact
    pub contact_damage: u32,
    /// Knockback speed on enemy contact (pixels/s)
    pub knockback_speed: f32,
    /// How long knockback overrides steering (ms)
    pub knockback_ms: f64,

    // === Fuel ===
    /// Pickups present at scene start
    pub fuel_count: usize,
    /// Fuel granted per pickup
    pub fuel_pickup_amount: f32,
    /// Delay before a collected pickup is replaced (ms)
    pub fuel_respawn_ms: f64,
    /// Distance kept from the world edge when spawning pickups (pixels)
    pub fuel_spawn_margin: f32,
    /// Drain interval (ms)
    pub fuel_drain_interval_ms: f64,
    /// Fuel lost per interval while moving
    pub fuel_drain_moving: f32,
    /// Fuel lost per interval while idle
    pub fuel_drain_idle: f32,
    /// Fuel level that triggers the warning
    pub low_fuel_threshold: f32,
    /// How long the warning stays up (ms)
    pub low_fuel_warning_ms: f64,

    // === Missions ===
    /// Kills required per mission
    pub mission_target: u32,
    /// Score granted per kill
    pub kill_score: u64,
    /// Score granted per completed mission
    pub mission_score: u64,
    /// Ammo granted per completed mission
    pub mission_ammo: u32,
    /// Delay before the next mission starts (ms)
    pub mission_restart_ms: f64,

    // === Scenery ===
    /// Decorative buildings per scene
    pub building_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            keyboard_speed: 200.0,
            joystick_speed: 220.0,

            bullet_speed: 420.0,
            bullet_lifetime_ms: 2000.0,
            bullet_damage: 25,

            enemy_count: 5,
            enemy_health: 50,
            enemy_spawn_speed: 100,
            wander_speed: 120,
            chase_speed: 90.0,
            behavior_roll_threshold: 995,
            enemy_spawn_margin: 50.0,

            contact_damage: 12,
            knockback_speed: 200.0,
            knockback_ms: 150.0,

            fuel_count: 3,
            fuel_pickup_amount: 30.0,
            fuel_respawn_ms: 6000.0,
            fuel_spawn_margin: 40.0,
            fuel_drain_interval_ms: 1000.0,
            fuel_drain_moving: 1.0,
            fuel_drain_idle: 0.2,
            low_fuel_threshold: 20.0,
            low_fuel_warning_ms: 1500.0,

            mission_target: 3,
            kill_score: 100,
            mission_score: 500,
            mission_ammo: 6,
            mission_restart_ms: 2500.0,

            building_count: 25,
        }
    }
}

impl Tuning {
    /// Reject values the simulation cannot run with: negative speeds, spawn
    /// ranges, margins and delays, and non-positive damage, health and targets.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let non_negative = [
            ("tuning.keyboard_speed", self.keyboard_speed as f64),
            ("tuning.joystick_speed", self.joystick_speed as f64),
            ("tuning.bullet_speed", self.bullet_speed as f64),
            ("tuning.bullet_lifetime_ms", self.bullet_lifetime_ms),
            ("tuning.enemy_spawn_speed", self.enemy_spawn_speed as f64),
            ("tuning.wander_speed", self.wander_speed as f64),
            ("tuning.chase_speed", self.chase_speed as f64),
            ("tuning.enemy_spawn_margin", self.enemy_spawn_margin as f64),
            ("tuning.knockback_speed", self.knockback_speed as f64),
            ("tuning.knockback_ms", self.knockback_ms),
            ("tuning.fuel_pickup_amount", self.fuel_pickup_amount as f64),
            ("tuning.fuel_respawn_ms", self.fuel_respawn_ms),
            ("tuning.fuel_spawn_margin", self.fuel_spawn_margin as f64),
            ("tuning.fuel_drain_interval_ms", self.fuel_drain_interval_ms),
            ("tuning.fuel_drain_moving", self.fuel_drain_moving as f64),
            ("tuning.fuel_drain_idle", self.fuel_drain_idle as f64),
            ("tuning.low_fuel_warning_ms", self.low_fuel_warning_ms),
            ("tuning.mission_restart_ms", self.mission_restart_ms),
        ];
        // NaN fails both checks
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(SettingsError::OutOfRange {
                    field,
                    value,
                    range: ">= 0",
                });
            }
        }

        let positive = [
            ("tuning.bullet_damage", self.bullet_damage as f64),
            ("tuning.enemy_health", self.enemy_health as f64),
            ("tuning.mission_target", self.mission_target as f64),
        ];
        for (field, value) in positive {
            if !(value >= 1.0) {
                return Err(SettingsError::OutOfRange {
                    field,
                    value,
                    range: ">= 1",
                });
            }
        }
        Ok(())
    }
}
