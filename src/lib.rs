//! City Lite - A top-down arcade driving and shooting game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, scenes, gameplay rules)
//! - `renderer`: WebGPU rendering pipeline
//! - `ui`: HUD text and on-screen control layout
//! - `settings` / `tuning`: Page-supplied configuration and game balance
//! - `audio`: Synthesized sound effects (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::{Settings, SettingsError};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one step per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World size used when no canvas is available (native demo)
    pub const DEFAULT_WORLD_WIDTH: f32 = 960.0;
    pub const DEFAULT_WORLD_HEIGHT: f32 = 640.0;

    /// Player stat limits and defaults
    pub const MAX_HEALTH: u32 = 100;
    pub const MAX_FUEL: f32 = 100.0;
    pub const START_AMMO: u32 = 10;

    /// Player car body (pixels)
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 28.0;
    /// Velocity cap on the player body
    pub const PLAYER_MAX_SPEED: f32 = 250.0;

    /// Enemy body (square, pixels)
    pub const ENEMY_SIZE: f32 = 28.0;
    /// Bullet body (pixels)
    pub const BULLET_WIDTH: f32 = 8.0;
    pub const BULLET_HEIGHT: f32 = 4.0;
    /// Fuel pickup body (square, pixels)
    pub const FUEL_SIZE: f32 = 20.0;
    /// Background building tile (square, pixels)
    pub const BUILDING_SIZE: f32 = 64.0;
}

/// Unit vector pointing along `angle` (screen space, y down)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Velocity of magnitude `speed` along `angle`
#[inline]
pub fn velocity_from_rotation(angle: f32, speed: f32) -> Vec2 {
    heading(angle) * speed
}
