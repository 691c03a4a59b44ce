//! Enemy behavior: random wandering with the occasional lunge at the player

use glam::Vec2;
use rand::Rng;

use super::physics::{Body, velocity_toward};
use crate::tuning::Tuning;

/// What an enemy decided this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Behavior {
    pub wandered: bool,
    pub chased: bool,
}

/// Roll 0..=1000 and compare against the threshold
fn roll<R: Rng>(rng: &mut R, threshold: u32) -> bool {
    rng.random_range(0..=1000u32) > threshold
}

/// Run one tick of behavior for a single enemy.
///
/// Wander and chase are rolled independently; when both fire, chase is applied
/// second and wins.
pub fn update_enemy<R: Rng>(
    body: &mut Body,
    player_pos: Vec2,
    rng: &mut R,
    tuning: &Tuning,
) -> Behavior {
    let mut behavior = Behavior::default();

    if roll(rng, tuning.behavior_roll_threshold) {
        let range = tuning.wander_speed;
        body.vel = Vec2::new(
            rng.random_range(-range..=range) as f32,
            rng.random_range(-range..=range) as f32,
        );
        behavior.wandered = true;
    }

    if roll(rng, tuning.behavior_roll_threshold) {
        body.vel = velocity_toward(body.pos, player_pos, tuning.chase_speed);
        behavior.chased = true;
    }

    behavior
}
