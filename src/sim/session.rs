//! The session: scene stack plus the stats that outlive a single scene

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::play::PlayScene;
use super::state::{GameEvent, PlayerStats, SceneKind};
use crate::tuning::Tuning;

/// The active screen
#[derive(Debug, Clone)]
pub enum Scene {
    Menu,
    Play(Box<PlayScene>),
    MissionBoard,
}

impl Scene {
    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::Menu => SceneKind::Menu,
            Scene::Play(_) => SceneKind::Play,
            Scene::MissionBoard => SceneKind::MissionBoard,
        }
    }
}

/// Complete game session (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct Session {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Stats handed to the next play scene
    pub stats: PlayerStats,
    pub scene: Scene,
    pub paused: bool,
    /// World size for new play scenes
    pub world: Vec2,
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl Session {
    /// Create a new session on the menu screen
    pub fn new(seed: u64, world: Vec2, tuning: Tuning) -> Self {
        Self {
            seed,
            stats: PlayerStats::default(),
            scene: Scene::Menu,
            paused: false,
            world,
            tuning,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn scene_kind(&self) -> SceneKind {
        self.scene.kind()
    }

    /// The running play scene, if any
    pub fn play(&self) -> Option<&PlayScene> {
        match &self.scene {
            Scene::Play(play) => Some(play),
            _ => None,
        }
    }

    pub fn play_mut(&mut self) -> Option<&mut PlayScene> {
        match &mut self.scene {
            Scene::Play(play) => Some(play),
            _ => None,
        }
    }

    /// Stats to display: the live scene's while playing
    pub fn current_stats(&self) -> &PlayerStats {
        self.play().map(|p| &p.stats).unwrap_or(&self.stats)
    }

    /// Resize the world used by the next play scene
    pub fn set_world_size(&mut self, width: f32, height: f32) {
        self.world = Vec2::new(width.max(1.0), height.max(1.0));
    }

    /// Take everything that happened since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn switch_to(&mut self, scene: Scene) {
        let kind = scene.kind();
        log::info!("Scene: {:?} -> {:?}", self.scene.kind(), kind);
        self.scene = scene;
        self.paused = false;
        self.events.push(GameEvent::SceneChanged(kind));
    }

    /// Leave the menu and start a fresh round with the carried stats
    pub fn start_play(&mut self) {
        let seed = self.rng.random::<u64>();
        let mut events = Vec::new();
        let play = PlayScene::new(
            self.stats.clone(),
            self.world,
            self.tuning.clone(),
            seed,
            &mut events,
        );
        self.switch_to(Scene::Play(Box::new(play)));
        self.events.append(&mut events);
    }

    pub fn open_mission_board(&mut self) {
        self.switch_to(Scene::MissionBoard);
    }

    pub fn return_to_menu(&mut self) {
        self.switch_to(Scene::Menu);
    }

    /// Health ran out: drop the round, reset stats, back to the menu
    pub fn player_died(&mut self) {
        let score = self.current_stats().score;
        log::info!("Player died (score {score}); resetting");
        self.stats = PlayerStats::default();
        self.events.push(GameEvent::PlayerDied);
        self.switch_to(Scene::Menu);
    }

    /// Pause toggle; only a running round can pause
    pub fn toggle_pause(&mut self) {
        if matches!(self.scene, Scene::Play(_)) {
            self.paused = !self.paused;
            log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
        }
    }
}
