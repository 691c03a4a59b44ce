//! The play scene: one round of driving, shooting and collecting
//!
//! Each step runs in a fixed order:
//! 1. due timers fire
//! 2. bodies integrate and meet the world bounds
//! 3. collision rules apply (enemy/enemy, player/enemy, bullet/enemy, player/fuel)
//! 4. the scene update: steering, shooting, missions, fuel, enemy AI, death

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ai;
use super::arena::{Arena, EntityId};
use super::input::{MoveSource, TickInput, map_movement};
use super::physics::{
    self, Body, bounce_pair, box_collision, limit_velocity, outside_world, reflect_velocity,
    separate,
};
use super::state::{Bullet, Enemy, FuelPickup, GameEvent, Mission, Player, PlayerStats};
use super::timers::{Scheduler, TaskId, TaskKind};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::velocity_from_rotation;

/// Result of a play step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    /// Health ran out this step
    Died,
}

/// Everything alive in one round of play
#[derive(Debug, Clone)]
pub struct PlayScene {
    /// World (and camera) size in pixels
    pub world: Vec2,
    pub tuning: Tuning,
    pub stats: PlayerStats,
    pub player: Player,
    pub enemies: Arena<Enemy>,
    pub bullets: Arena<Bullet>,
    pub fuels: Arena<FuelPickup>,
    /// Decorative building positions
    pub buildings: Vec<Vec2>,
    pub mission: Option<Mission>,
    /// Target of the most recently announced mission
    pub mission_banner: Option<u32>,
    /// "Mission Complete!" is showing
    pub completion_banner: bool,
    /// Dismissal task of the visible low-fuel warning
    pub low_fuel_warning: Option<TaskId>,
    pub timers: Scheduler,
    /// Steps since the scene started
    pub time_ticks: u64,
    fuel_accumulator_ms: f64,
    rng: Pcg32,
    next_id: u32,
}

impl PlayScene {
    /// Build a fresh scene around the given stats
    pub fn new(
        stats: PlayerStats,
        world: Vec2,
        tuning: Tuning,
        seed: u64,
        events: &mut Vec<GameEvent>,
    ) -> Self {
        let mut scene = Self {
            world,
            tuning,
            stats,
            player: Player::new(world / 2.0),
            enemies: Arena::new(),
            bullets: Arena::new(),
            fuels: Arena::new(),
            buildings: Vec::new(),
            mission: None,
            mission_banner: None,
            completion_banner: false,
            low_fuel_warning: None,
            timers: Scheduler::new(),
            time_ticks: 0,
            fuel_accumulator_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        for _ in 0..scene.tuning.building_count {
            let pos = scene.random_point(0.0);
            scene.buildings.push(pos);
        }
        for _ in 0..scene.tuning.enemy_count {
            scene.spawn_enemy();
        }
        for _ in 0..scene.tuning.fuel_count {
            scene.spawn_fuel();
        }
        scene.start_mission(events);

        log::debug!(
            "Play scene ready: {} enemies, {} fuel, world {}x{}",
            scene.enemies.len(),
            scene.fuels.len(),
            world.x,
            world.y
        );
        scene
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Random whole-pixel point at least `margin` from every edge
    fn random_point(&mut self, margin: f32) -> Vec2 {
        let mut axis = |size: f32| {
            let lo = margin.round() as i32;
            let hi = ((size - margin).round() as i32).max(lo);
            self.rng.random_range(lo..=hi) as f32
        };
        let x = axis(self.world.x);
        let y = axis(self.world.y);
        Vec2::new(x, y)
    }

    /// Spawn one enemy at a random spot with a random drift
    pub fn spawn_enemy(&mut self) -> EntityId {
        let pos = self.random_point(self.tuning.enemy_spawn_margin);
        let range = self.tuning.enemy_spawn_speed;
        let vel = Vec2::new(
            self.rng.random_range(-range..=range) as f32,
            self.rng.random_range(-range..=range) as f32,
        );
        let id = self.next_entity_id();
        self.enemies.spawn(
            id,
            Enemy {
                body: Body::new(pos, Vec2::splat(ENEMY_SIZE)).with_velocity(vel),
                health: self.tuning.enemy_health,
            },
        );
        id
    }

    /// Spawn one fuel pickup at a random spot
    pub fn spawn_fuel(&mut self) -> EntityId {
        let pos = self.random_point(self.tuning.fuel_spawn_margin);
        let id = self.next_entity_id();
        self.fuels.spawn(id, FuelPickup::new(pos));
        id
    }

    /// Fire one bullet along the car's facing. No-op without ammo.
    pub fn shoot(&mut self, events: &mut Vec<GameEvent>) -> Option<EntityId> {
        if !self.stats.use_ammo() {
            return None;
        }

        let pos = self.player.body.pos;
        let rotation = self.player.rotation;
        let id = self.next_entity_id();
        let expiry = self
            .timers
            .schedule(self.tuning.bullet_lifetime_ms, TaskKind::ExpireBullet(id));
        self.bullets.spawn(
            id,
            Bullet {
                body: Body::new(pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
                    .with_velocity(velocity_from_rotation(rotation, self.tuning.bullet_speed)),
                rotation,
                expiry,
            },
        );
        events.push(GameEvent::Shot { pos, rotation });
        Some(id)
    }

    /// Remove a bullet before its lifetime ends
    fn remove_bullet(&mut self, id: EntityId) {
        if let Some(bullet) = self.bullets.despawn(id) {
            self.timers.cancel(bullet.expiry);
        }
    }

    /// Announce a new kill mission
    pub fn start_mission(&mut self, events: &mut Vec<GameEvent>) {
        let mission = Mission::kill(self.tuning.mission_target);
        log::info!("Mission started: kill {} enemies", mission.target);
        events.push(GameEvent::MissionStarted {
            target: mission.target,
        });
        self.mission_banner = Some(mission.target);
        self.completion_banner = false;
        self.mission = Some(mission);
    }

    /// Pay out the active mission and queue the next one
    fn complete_mission(&mut self, events: &mut Vec<GameEvent>) {
        if self.mission.take().is_none() {
            return;
        }
        self.stats.score += self.tuning.mission_score;
        self.stats.ammo += self.tuning.mission_ammo;
        self.completion_banner = true;
        self.timers
            .schedule(self.tuning.mission_restart_ms, TaskKind::StartMission);
        log::info!("Mission complete (score {})", self.stats.score);
        events.push(GameEvent::MissionCompleted);
    }

    /// Advance the scene by one fixed step
    pub fn step(
        &mut self,
        input: &TickInput,
        dt: f32,
        events: &mut Vec<GameEvent>,
    ) -> StepOutcome {
        let dt_ms = dt as f64 * 1000.0;
        self.time_ticks += 1;

        self.run_timers(dt_ms, events);
        self.integrate(dt);
        self.resolve_collisions(events);
        self.update(input, dt_ms, events)
    }

    fn run_timers(&mut self, dt_ms: f64, events: &mut Vec<GameEvent>) {
        for task in self.timers.advance(dt_ms) {
            match task {
                TaskKind::ExpireBullet(id) => {
                    if self.bullets.despawn(id).is_some() {
                        log::trace!("Bullet {:?} expired", id);
                    }
                }
                TaskKind::SpawnFuel => {
                    self.spawn_fuel();
                }
                TaskKind::StartMission => self.start_mission(events),
                TaskKind::DismissLowFuel => self.low_fuel_warning = None,
            }
        }
    }

    fn integrate(&mut self, dt: f32) {
        let world = self.world;

        let body = &mut self.player.body;
        body.vel = limit_velocity(body.vel, PLAYER_MAX_SPEED);
        body.integrate(dt);
        physics::clamp_to_world(body, world);

        for (_, enemy) in self.enemies.iter_mut() {
            enemy.body.integrate(dt);
            physics::bounce_off_world(&mut enemy.body, world);
        }

        for (_, bullet) in self.bullets.iter_mut() {
            bullet.body.integrate(dt);
        }
        self.cull_bullets();
    }

    /// Bullets touching the world edge are gone
    fn cull_bullets(&mut self) {
        let world = self.world;
        let gone: Vec<EntityId> = self
            .bullets
            .iter()
            .filter(|(_, b)| outside_world(&b.body, world))
            .map(|(id, _)| id)
            .collect();
        for id in gone {
            self.remove_bullet(id);
        }
    }

    fn resolve_collisions(&mut self, events: &mut Vec<GameEvent>) {
        self.collide_enemies();
        self.collide_player_enemies(events);
        self.collide_bullets_enemies(events);
        self.collect_fuel(events);
    }

    /// Enemies bounce off each other without damage
    fn collide_enemies(&mut self) {
        let ids = self.enemies.ids();
        for (i, &a_id) in ids.iter().enumerate() {
            for &b_id in &ids[i + 1..] {
                let (Some(a), Some(b)) = (self.enemies.get(a_id), self.enemies.get(b_id)) else {
                    continue;
                };
                let (mut a_body, mut b_body) = (a.body, b.body);
                let hit = box_collision(&a_body, &b_body);
                if !hit.hit {
                    continue;
                }
                separate(&mut a_body, &mut b_body, &hit);
                bounce_pair(&mut a_body, &mut b_body, hit.normal);
                if let Some(a) = self.enemies.get_mut(a_id) {
                    a.body = a_body;
                }
                if let Some(b) = self.enemies.get_mut(b_id) {
                    b.body = b_body;
                }
            }
        }
    }

    /// Ramming an enemy hurts and knocks the car back. While a knockback is
    /// still running, contacts only push the bodies apart.
    fn collide_player_enemies(&mut self, events: &mut Vec<GameEvent>) {
        let recovering = self.player.knockback_ms > 0.0;
        for (_, enemy) in self.enemies.iter_mut() {
            let hit = box_collision(&self.player.body, &enemy.body);
            if !hit.hit {
                continue;
            }

            if !recovering {
                let damage = self.tuning.contact_damage;
                self.stats.take_damage(damage);
                events.push(GameEvent::PlayerHit { damage });

                self.player.body.vel = velocity_from_rotation(
                    self.player.rotation + std::f32::consts::PI,
                    self.tuning.knockback_speed,
                );
                self.player.knockback_ms = self.tuning.knockback_ms;
            }

            separate(&mut self.player.body, &mut enemy.body, &hit);
            // Normal points at the player; an enemy moving along it bounces off
            if enemy.body.vel.dot(hit.normal) > 0.0 {
                enemy.body.vel = reflect_velocity(enemy.body.vel, hit.normal);
            }
        }
    }

    /// Each bullet stops at the first enemy it touches
    fn collide_bullets_enemies(&mut self, events: &mut Vec<GameEvent>) {
        for bullet_id in self.bullets.ids() {
            let Some(bullet_body) = self.bullets.get(bullet_id).map(|b| b.body) else {
                continue;
            };
            let target = self
                .enemies
                .iter()
                .find(|(_, e)| bullet_body.overlaps(&e.body))
                .map(|(id, _)| id);
            if let Some(enemy_id) = target {
                self.remove_bullet(bullet_id);
                self.damage_enemy(enemy_id, events);
            }
        }
    }

    /// Apply one bullet's damage; a kill scores, counts toward the mission
    /// and brings in exactly one replacement.
    pub fn damage_enemy(&mut self, enemy_id: EntityId, events: &mut Vec<GameEvent>) {
        let damage = self.tuning.bullet_damage;
        let Some(enemy) = self.enemies.get_mut(enemy_id) else {
            return;
        };
        enemy.health -= damage;
        if enemy.health > 0 {
            events.push(GameEvent::EnemyHit {
                health: enemy.health,
            });
            return;
        }

        let pos = enemy.body.pos;
        self.enemies.despawn(enemy_id);
        self.stats.score += self.tuning.kill_score;
        if let Some(mission) = self.mission.as_mut() {
            mission.record_kill();
        }
        events.push(GameEvent::EnemyKilled { pos });
        self.spawn_enemy();
    }

    /// Driving over a canister refuels and queues its replacement
    fn collect_fuel(&mut self, events: &mut Vec<GameEvent>) {
        let player = self.player.body;
        let touched = self.fuels.retain(|_, f| !player.overlaps(&f.body));
        for _ in touched {
            let gained = self.stats.add_fuel(self.tuning.fuel_pickup_amount);
            self.timers
                .schedule(self.tuning.fuel_respawn_ms, TaskKind::SpawnFuel);
            events.push(GameEvent::FuelCollected { gained });
        }
    }

    fn update(
        &mut self,
        input: &TickInput,
        dt_ms: f64,
        events: &mut Vec<GameEvent>,
    ) -> StepOutcome {
        // Pointer press on the button lands before this step's steering
        if input.shoot_button {
            self.shoot(events);
        }

        let command = map_movement(input, &self.tuning);
        if let Some(facing) = command.facing {
            self.player.rotation = facing;
        }
        // The fire key belongs to keyboard driving
        if input.fire && command.source == MoveSource::Keyboard {
            self.shoot(events);
        }

        if self.player.knockback_ms > 0.0 {
            self.player.knockback_ms = (self.player.knockback_ms - dt_ms).max(0.0);
        }
        // Steering returns on the step the knockback runs out
        if self.player.knockback_ms <= 0.0 {
            self.player.body.vel = command.vel;
        }

        if self.mission.as_ref().is_some_and(Mission::is_complete) {
            self.complete_mission(events);
        }

        self.drain_fuel(command.is_moving(), dt_ms);
        self.check_low_fuel(events);
        self.cull_bullets();

        let player_pos = self.player.body.pos;
        for (_, enemy) in self.enemies.iter_mut() {
            ai::update_enemy(&mut enemy.body, player_pos, &mut self.rng, &self.tuning);
        }

        if self.stats.is_dead() {
            StepOutcome::Died
        } else {
            StepOutcome::Continue
        }
    }

    /// Burn fuel once per drain interval
    fn drain_fuel(&mut self, moving: bool, dt_ms: f64) {
        self.fuel_accumulator_ms += dt_ms;
        if self.fuel_accumulator_ms >= self.tuning.fuel_drain_interval_ms {
            let amount = if moving {
                self.tuning.fuel_drain_moving
            } else {
                self.tuning.fuel_drain_idle
            };
            self.stats.drain_fuel(amount);
            self.fuel_accumulator_ms = 0.0;
        }
    }

    /// Raise the warning if fuel is low and none is showing
    fn check_low_fuel(&mut self, events: &mut Vec<GameEvent>) {
        if self.stats.fuel <= self.tuning.low_fuel_threshold && self.low_fuel_warning.is_none() {
            let task = self
                .timers
                .schedule(self.tuning.low_fuel_warning_ms, TaskKind::DismissLowFuel);
            self.low_fuel_warning = Some(task);
            events.push(GameEvent::LowFuel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn scene() -> (PlayScene, Vec<GameEvent>) {
        let mut events = Vec::new();
        let scene = PlayScene::new(
            PlayerStats::default(),
            Vec2::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT),
            Tuning::default(),
            1234,
            &mut events,
        );
        (scene, events)
    }

    /// Scene with nothing that moves or rolls dice near the player
    fn quiet_scene() -> (PlayScene, Vec<GameEvent>) {
        let (mut scene, events) = scene();
        scene.tuning.behavior_roll_threshold = 1000;
        for (_, enemy) in scene.enemies.iter_mut() {
            enemy.body.pos = Vec2::new(60.0, 60.0);
            enemy.body.vel = Vec2::ZERO;
        }
        // Spread them so they do not bounce each other around
        for (i, (_, enemy)) in scene.enemies.iter_mut().enumerate() {
            enemy.body.pos.x += i as f32 * 100.0;
        }
        for (_, fuel) in scene.fuels.iter_mut() {
            fuel.body.pos = Vec2::new(900.0, 600.0);
        }
        (scene, events)
    }

    fn place_enemy(scene: &mut PlayScene, pos: Vec2) -> EntityId {
        let id = scene.next_entity_id();
        scene.enemies.spawn(
            id,
            Enemy {
                body: Body::new(pos, Vec2::splat(ENEMY_SIZE)),
                health: scene.tuning.enemy_health,
            },
        );
        id
    }

    #[test]
    fn test_new_scene_population() {
        let (scene, events) = scene();
        assert_eq!(scene.enemies.len(), 5);
        assert_eq!(scene.fuels.len(), 3);
        assert_eq!(scene.buildings.len(), 25);
        assert_eq!(scene.mission, Some(Mission::kill(3)));
        assert_eq!(events, vec![GameEvent::MissionStarted { target: 3 }]);
        for enemy in scene.enemies.values() {
            assert_eq!(enemy.health, 50);
            let p = enemy.body.pos;
            assert!(p.x >= 50.0 && p.x <= DEFAULT_WORLD_WIDTH - 50.0);
            assert!(p.y >= 50.0 && p.y <= DEFAULT_WORLD_HEIGHT - 50.0);
            assert!(enemy.body.vel.x.abs() <= 100.0 && enemy.body.vel.y.abs() <= 100.0);
        }
    }

    #[test]
    fn test_shoot_spawns_bullet_along_facing() {
        let (mut scene, mut events) = scene();
        scene.player.rotation = std::f32::consts::FRAC_PI_2;

        let id = scene.shoot(&mut events).unwrap();
        assert_eq!(scene.stats.ammo, 9);
        assert_eq!(scene.bullets.len(), 1);

        let bullet = scene.bullets.get(id).unwrap();
        assert!((bullet.body.vel.length() - 420.0).abs() < 1e-3);
        assert!(bullet.body.vel.x.abs() < 1e-3 && bullet.body.vel.y > 0.0);
        assert_eq!(bullet.body.pos, scene.player.body.pos);
        assert!(scene.timers.is_pending(bullet.expiry));
    }

    #[test]
    fn test_shoot_without_ammo_is_noop() {
        let (mut scene, mut events) = scene();
        scene.stats.ammo = 0;
        events.clear();

        assert!(scene.shoot(&mut events).is_none());
        assert_eq!(scene.stats.ammo, 0);
        assert!(scene.bullets.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn test_bullet_expires_after_lifetime() {
        let (mut scene, mut events) = quiet_scene();
        // Fire straight down from the middle, nothing in the way for 2s
        scene.player.rotation = std::f32::consts::FRAC_PI_2;
        scene.player.body.pos = Vec2::new(480.0, 20.0);
        scene.tuning.bullet_speed = 100.0;
        let id = scene.shoot(&mut events).unwrap();

        let input = TickInput::default();
        for _ in 0..119 {
            scene.step(&input, SIM_DT, &mut events);
        }
        assert!(scene.bullets.contains(id));
        for _ in 0..2 {
            scene.step(&input, SIM_DT, &mut events);
        }
        assert!(!scene.bullets.contains(id));
    }

    #[test]
    fn test_kill_awards_score_and_replaces_enemy() {
        let (mut scene, mut events) = scene();
        let enemy = *scene.enemies.ids().first().unwrap();

        scene.damage_enemy(enemy, &mut events);
        assert_eq!(scene.enemies.get(enemy).unwrap().health, 25);
        assert_eq!(scene.stats.score, 0);

        scene.damage_enemy(enemy, &mut events);
        assert!(!scene.enemies.contains(enemy));
        assert_eq!(scene.enemies.len(), 5);
        assert_eq!(scene.stats.score, 100);
        assert_eq!(scene.mission.as_ref().unwrap().progress, 1);
    }

    #[test]
    fn test_bullet_hit_cancels_expiry() {
        let (mut scene, mut events) = quiet_scene();
        scene.player.body.pos = Vec2::new(300.0, 400.0);
        scene.player.rotation = 0.0;
        let target = place_enemy(&mut scene, Vec2::new(340.0, 400.0));

        let bullet = scene.shoot(&mut events).unwrap();
        let expiry = scene.bullets.get(bullet).unwrap().expiry;

        let input = TickInput::default();
        for _ in 0..10 {
            scene.step(&input, SIM_DT, &mut events);
        }
        assert!(!scene.bullets.contains(bullet));
        assert!(!scene.timers.is_pending(expiry));
        assert_eq!(scene.timers.pending_for(bullet), 0);
        assert_eq!(scene.enemies.get(target).unwrap().health, 25);
    }

    #[test]
    fn test_mission_completes_once() {
        let (mut scene, mut events) = quiet_scene();
        scene.stats.ammo = 0;
        events.clear();

        for _ in 0..3 {
            let id = *scene.enemies.ids().first().unwrap();
            scene.damage_enemy(id, &mut events);
            scene.damage_enemy(id, &mut events);
        }
        assert_eq!(scene.stats.score, 300);

        let input = TickInput::default();
        scene.step(&input, SIM_DT, &mut events);
        assert_eq!(scene.stats.score, 800);
        assert_eq!(scene.stats.ammo, 6);
        assert!(scene.mission.is_none());
        assert!(scene.completion_banner);

        // Kills between missions do not count toward anything
        let id = *scene.enemies.ids().first().unwrap();
        scene.damage_enemy(id, &mut events);
        scene.damage_enemy(id, &mut events);
        scene.step(&input, SIM_DT, &mut events);
        assert_eq!(scene.stats.score, 900);

        let completions = events
            .iter()
            .filter(|e| **e == GameEvent::MissionCompleted)
            .count();
        assert_eq!(completions, 1);

        // Next mission 2.5s later
        for _ in 0..150 {
            scene.step(&input, SIM_DT, &mut events);
        }
        assert_eq!(scene.mission, Some(Mission::kill(3)));
        assert!(!scene.completion_banner);
    }

    #[test]
    fn test_fuel_pickup_caps_and_respawns() {
        let (mut scene, mut events) = quiet_scene();
        scene.stats.fuel = 90.0;
        let pickup = *scene.fuels.ids().first().unwrap();
        scene.fuels.get_mut(pickup).unwrap().body.pos = scene.player.body.pos;

        let input = TickInput::default();
        scene.step(&input, SIM_DT, &mut events);
        assert_eq!(scene.stats.fuel, 100.0);
        assert!(!scene.fuels.contains(pickup));
        assert_eq!(scene.fuels.len(), 2);
        assert!(events.contains(&GameEvent::FuelCollected { gained: 10.0 }));

        // 6000 ms = 360 steps; replacement arrives on schedule
        for _ in 0..358 {
            scene.step(&input, SIM_DT, &mut events);
        }
        assert_eq!(scene.fuels.len(), 2);
        for _ in 0..3 {
            scene.step(&input, SIM_DT, &mut events);
        }
        assert_eq!(scene.fuels.len(), 3);
    }

    #[test]
    fn test_enemy_contact_damages_and_knocks_back() {
        let (mut scene, mut events) = quiet_scene();
        scene.player.rotation = 0.0;
        let pos = scene.player.body.pos;
        place_enemy(&mut scene, pos + Vec2::new(20.0, 0.0));

        scene.step(&TickInput::default(), SIM_DT, &mut events);
        assert_eq!(scene.stats.health, 88);
        assert!(events.contains(&GameEvent::PlayerHit { damage: 12 }));
        // Facing +x, pushed toward -x and steering ignored for a moment
        assert!(scene.player.body.vel.x < -199.0);
        assert!(scene.player.knockback_ms > 0.0);
    }

    #[test]
    fn test_lethal_hit_reports_death() {
        let (mut scene, mut events) = quiet_scene();
        scene.stats.health = 5;
        let pos = scene.player.body.pos;
        place_enemy(&mut scene, pos);

        let outcome = scene.step(&TickInput::default(), SIM_DT, &mut events);
        assert_eq!(outcome, StepOutcome::Died);
        assert_eq!(scene.stats.health, 0);
    }

    #[test]
    fn test_fuel_drain_moving_and_idle() {
        let (mut scene, mut events) = quiet_scene();
        let idle = TickInput::default();
        for _ in 0..60 {
            scene.step(&idle, SIM_DT, &mut events);
        }
        assert!((scene.stats.fuel - 99.8).abs() < 1e-4);

        let moving = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..60 {
            scene.step(&moving, SIM_DT, &mut events);
        }
        assert!((scene.stats.fuel - 98.8).abs() < 1e-4);
    }

    #[test]
    fn test_low_fuel_warning_does_not_duplicate() {
        let (mut scene, mut events) = quiet_scene();
        scene.stats.fuel = 20.1;
        events.clear();

        let idle = TickInput::default();
        let mut warnings = 0;
        // Fuel crosses 20 at the first drain (step 60), warning stays 90 steps
        for _ in 0..72 {
            scene.step(&idle, SIM_DT, &mut events);
            warnings += events.drain(..).filter(|e| *e == GameEvent::LowFuel).count();
        }
        assert_eq!(warnings, 1);
        assert!(scene.low_fuel_warning.is_some());

        // Once dismissed it may come back while fuel is still low
        for _ in 0..100 {
            scene.step(&idle, SIM_DT, &mut events);
            warnings += events.drain(..).filter(|e| *e == GameEvent::LowFuel).count();
        }
        assert_eq!(warnings, 2);
    }

    #[test]
    fn test_fire_key_uses_new_facing() {
        let (mut scene, mut events) = quiet_scene();
        let input = TickInput {
            up: true,
            fire: true,
            ..Default::default()
        };
        scene.step(&input, SIM_DT, &mut events);
        let bullet = scene.bullets.values().next().unwrap();
        assert!(bullet.body.vel.y < -419.0);
    }

    #[test]
    fn test_contact_from_behind_does_not_trap_the_car() {
        let (mut scene, mut events) = quiet_scene();
        scene.player.rotation = 0.0;
        let start = scene.player.body.pos;
        place_enemy(&mut scene, start - Vec2::new(20.0, 0.0));
        events.clear();

        // Knockback shoves the car back into the enemy; driving away must win
        let away = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..30 {
            scene.step(&away, SIM_DT, &mut events);
        }

        let hits = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerHit { .. }))
            .count();
        assert_eq!(hits, 1);
        assert_eq!(scene.stats.health, 88);
        assert_eq!(scene.player.knockback_ms, 0.0);
        assert!(scene.player.body.vel.x > 199.0);
        assert!(scene.player.body.pos.x > start.x);
    }

    #[test]
    fn test_enemies_bounce_apart_without_damage() {
        let (mut scene, mut events) = quiet_scene();
        let a = place_enemy(&mut scene, Vec2::new(200.0, 400.0));
        let b = place_enemy(&mut scene, Vec2::new(220.0, 400.0));
        scene.enemies.get_mut(a).unwrap().body.vel = Vec2::new(50.0, 0.0);
        scene.enemies.get_mut(b).unwrap().body.vel = Vec2::new(-50.0, 0.0);
        let stats = scene.stats.clone();
        events.clear();

        scene.step(&TickInput::default(), SIM_DT, &mut events);

        let (a, b) = (scene.enemies.get(a).unwrap(), scene.enemies.get(b).unwrap());
        assert!(b.body.pos.x - a.body.pos.x >= ENEMY_SIZE - 1e-3);
        assert!((a.body.vel - Vec2::new(-50.0, 0.0)).length() < 1e-3);
        assert!((b.body.vel - Vec2::new(50.0, 0.0)).length() < 1e-3);
        assert_eq!((a.health, b.health), (50, 50));
        assert_eq!(scene.stats, stats);
        assert!(events.is_empty());
    }

    #[test]
    fn test_fire_key_ignored_while_joystick_drives() {
        let (mut scene, mut events) = quiet_scene();
        let stick = TickInput {
            joystick: Some(Vec2::new(1.0, 0.0)),
            fire: true,
            ..Default::default()
        };
        scene.step(&stick, SIM_DT, &mut events);
        assert!(scene.bullets.is_empty());
        assert_eq!(scene.stats.ammo, 10);

        // The on-screen button still fires under the stick
        let button = TickInput {
            joystick: Some(Vec2::new(1.0, 0.0)),
            shoot_button: true,
            ..Default::default()
        };
        scene.step(&button, SIM_DT, &mut events);
        assert_eq!(scene.bullets.len(), 1);
        assert_eq!(scene.stats.ammo, 9);
    }
}
