//! HUD text and on-screen control layout
//!
//! Pure view model: the wasm front end copies these strings into DOM
//! elements, the renderer uses the layout to draw the touch controls.

use glam::Vec2;

use crate::sim::{SceneKind, Session};

pub const MENU_TITLE: &str = "City Lite";
pub const MENU_PROMPT: &str = "Tap to Start";
pub const MENU_HELP: &str = "Arrows / joystick to drive, Space / button to shoot, M for missions";
pub const MISSION_BOARD_TEXT: &str = "Missions Coming Soon";
pub const MISSION_BOARD_HINT: &str = "Tap to return";
pub const MISSION_COMPLETE_TEXT: &str = "Mission Complete!";
pub const LOW_FUEL_TEXT: &str = "Low Fuel!";
pub const PAUSED_TEXT: &str = "Paused";

pub fn health_text(health: u32) -> String {
    format!("Health: {health}")
}

pub fn score_text(score: u64) -> String {
    format!("Score: {score}")
}

/// Ammo and fuel share one line; fuel shows whole units only
pub fn inventory_text(ammo: u32, fuel: f32) -> String {
    format!("Ammo: {ammo} Fuel: {}", fuel.floor() as i64)
}

pub fn mission_text(target: u32) -> String {
    format!("Mission: Kill {target} Enemies")
}

/// Centered full-screen text block (menu, mission board, pause)
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub title: &'static str,
    pub lines: Vec<&'static str>,
}

/// Everything the DOM HUD shows for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    /// Stat lines are only shown during play
    pub show_stats: bool,
    pub health: String,
    pub score: String,
    pub inventory: String,
    pub mission_banner: Option<String>,
    pub completion_banner: Option<&'static str>,
    pub low_fuel: Option<&'static str>,
    pub overlay: Option<Overlay>,
}

impl HudView {
    pub fn from_session(session: &Session) -> Self {
        let stats = session.current_stats();
        let mut view = Self {
            show_stats: false,
            health: health_text(stats.health),
            score: score_text(stats.score),
            inventory: inventory_text(stats.ammo, stats.fuel),
            mission_banner: None,
            completion_banner: None,
            low_fuel: None,
            overlay: None,
        };

        match session.scene_kind() {
            SceneKind::Menu => {
                view.overlay = Some(Overlay {
                    title: MENU_TITLE,
                    lines: vec![MENU_PROMPT, MENU_HELP],
                });
            }
            SceneKind::MissionBoard => {
                view.overlay = Some(Overlay {
                    title: MISSION_BOARD_TEXT,
                    lines: vec![MISSION_BOARD_HINT],
                });
            }
            SceneKind::Play => {
                view.show_stats = true;
                if let Some(play) = session.play() {
                    if play.completion_banner {
                        view.completion_banner = Some(MISSION_COMPLETE_TEXT);
                    } else {
                        view.mission_banner = play.mission_banner.map(mission_text);
                    }
                    if play.low_fuel_warning.is_some() {
                        view.low_fuel = Some(LOW_FUEL_TEXT);
                    }
                }
                if session.paused {
                    view.overlay = Some(Overlay {
                        title: PAUSED_TEXT,
                        lines: vec!["Press Escape to resume"],
                    });
                }
            }
        }
        view
    }
}

/// Joystick base radius
pub const JOYSTICK_RADIUS: f32 = 60.0;
/// Joystick base inset from the bottom-left corner
pub const JOYSTICK_INSET: f32 = 90.0;
pub const SHOOT_BUTTON_RADIUS: f32 = 40.0;
/// Shoot button inset from the bottom-right corner
pub const SHOOT_BUTTON_INSET: f32 = 80.0;

/// Screen placement of the touch controls for a viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlLayout {
    pub joystick_center: Vec2,
    pub joystick_radius: f32,
    pub shoot_center: Vec2,
    pub shoot_radius: f32,
}

impl ControlLayout {
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self {
            joystick_center: Vec2::new(JOYSTICK_INSET, height - JOYSTICK_INSET),
            joystick_radius: JOYSTICK_RADIUS,
            shoot_center: Vec2::new(width - SHOOT_BUTTON_INSET, height - SHOOT_BUTTON_INSET),
            shoot_radius: SHOOT_BUTTON_RADIUS,
        }
    }

    pub fn hits_shoot_button(&self, point: Vec2) -> bool {
        point.distance(self.shoot_center) <= self.shoot_radius
    }
}
