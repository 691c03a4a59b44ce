//! Demo mode - drives the car with synthetic joystick input
//!
//! Hunts the nearest enemy, fires when lined up, detours for fuel when the
//! tank runs low and keeps its distance once out of ammo.

use glam::Vec2;

use super::input::TickInput;
use super::play::PlayScene;

/// Go refuel below this level
const REFUEL_LEVEL: f32 = 35.0;
/// Stop closing in on a target inside this distance
const ENGAGE_RANGE: f32 = 220.0;
/// Back off from enemies inside this distance
const PANIC_RANGE: f32 = 70.0;
/// Ticks between trigger pulls
const FIRE_INTERVAL: u64 = 20;
/// Stick deflection used to turn in place
const CREEP: f32 = 0.05;

fn nearest(from: Vec2, points: impl Iterator<Item = Vec2>) -> Option<Vec2> {
    points.min_by(|a, b| from.distance_squared(*a).total_cmp(&from.distance_squared(*b)))
}

/// Build this tick's input for the scene
pub fn drive(scene: &PlayScene) -> TickInput {
    let pos = scene.player.body.pos;
    let mut input = TickInput::default();

    if scene.stats.fuel < REFUEL_LEVEL {
        if let Some(fuel) = nearest(pos, scene.fuels.values().map(|f| f.body.pos)) {
            input.joystick = Some((fuel - pos).normalize_or_zero());
            return input;
        }
    }

    let Some(enemy) = nearest(pos, scene.enemies.values().map(|e| e.body.pos)) else {
        return input;
    };
    let to_enemy = enemy - pos;
    let dist = to_enemy.length();

    if scene.stats.ammo == 0 || dist < PANIC_RANGE {
        input.joystick = Some(-to_enemy.normalize_or_zero());
        return input;
    }

    let dir = to_enemy.normalize_or_zero();
    let force = if dist > ENGAGE_RANGE { 1.0 } else { CREEP };
    input.joystick = Some(dir * force);

    // The on-screen button fires along last tick's heading, which this stick
    // already pointed at the target
    input.shoot_button = dist <= ENGAGE_RANGE && scene.time_ticks % FIRE_INTERVAL == 0;

    input
}
