//! Player input: per-tick commands and their mapping to car velocity

use glam::Vec2;

use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Virtual joystick force, each axis in [-1, 1] (None when no joystick)
    pub joystick: Option<Vec2>,
    /// Held direction keys
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire key went down since the last tick
    pub fire: bool,
    /// On-screen shoot button was pressed since the last tick
    pub shoot_button: bool,
    /// Tap/click anywhere (menu screens)
    pub tap: bool,
    /// Open the mission board from the menu
    pub open_missions: bool,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - autopilot drives the car
    pub autopilot: bool,
}

impl TickInput {
    /// Clear the edge-triggered flags once a tick has consumed them
    pub fn clear_one_shots(&mut self) {
        self.fire = false;
        self.shoot_button = false;
        self.tap = false;
        self.open_missions = false;
        self.pause = false;
    }
}

/// Where this tick's movement came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Joystick,
    Keyboard,
}

/// Desired car motion for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveCommand {
    pub vel: Vec2,
    /// New facing angle, if the car is being steered
    pub facing: Option<f32>,
    pub source: MoveSource,
}

impl MoveCommand {
    /// Counts as "moving" for fuel drain
    pub fn is_moving(&self) -> bool {
        self.vel.x.abs() > 1.0 || self.vel.y.abs() > 1.0
    }
}

/// Map raw input to a velocity. A deflected joystick overrides the keyboard
/// entirely; the keyboard checks left before right and up before down.
pub fn map_movement(input: &TickInput, tuning: &Tuning) -> MoveCommand {
    if let Some(force) = input.joystick.filter(|f| *f != Vec2::ZERO) {
        return MoveCommand {
            vel: force * tuning.joystick_speed,
            facing: Some(force.y.atan2(force.x)),
            source: MoveSource::Joystick,
        };
    }

    let speed = tuning.keyboard_speed;
    let vx = if input.left {
        -speed
    } else if input.right {
        speed
    } else {
        0.0
    };
    let vy = if input.up {
        -speed
    } else if input.down {
        speed
    } else {
        0.0
    };

    let facing = (vx != 0.0 || vy != 0.0).then(|| vy.atan2(vx));
    MoveCommand {
        vel: Vec2::new(vx, vy),
        facing,
        source: MoveSource::Keyboard,
    }
}

/// Pointer-driven thumbstick
#[derive(Debug, Clone)]
pub struct VirtualJoystick {
    pub center: Vec2,
    pub radius: f32,
    /// Pointer currently dragging the stick
    active_pointer: Option<i32>,
    force: Vec2,
}

impl VirtualJoystick {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius,
            active_pointer: None,
            force: Vec2::ZERO,
        }
    }

    /// Move the stick base (viewport resize)
    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    /// Whether a screen point lies on the stick base
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance(self.center) <= self.radius
    }

    /// Start dragging if the pointer landed on the base. Returns true if captured.
    pub fn press(&mut self, pointer_id: i32, point: Vec2) -> bool {
        if self.active_pointer.is_some() || !self.contains(point) {
            return false;
        }
        self.active_pointer = Some(pointer_id);
        self.update_force(point);
        true
    }

    /// Track a captured pointer
    pub fn drag(&mut self, pointer_id: i32, point: Vec2) {
        if self.active_pointer == Some(pointer_id) {
            self.update_force(point);
        }
    }

    /// Let go; force snaps back to zero
    pub fn release(&mut self, pointer_id: i32) {
        if self.active_pointer == Some(pointer_id) {
            self.active_pointer = None;
            self.force = Vec2::ZERO;
        }
    }

    pub fn is_held(&self) -> bool {
        self.active_pointer.is_some()
    }

    /// Current force, length at most 1
    pub fn force(&self) -> Vec2 {
        self.force
    }

    fn update_force(&mut self, point: Vec2) {
        self.force = ((point - self.center) / self.radius).clamp_length_max(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_keyboard_left_beats_right() {
        let input = TickInput {
            left: true,
            right: true,
            down: true,
            ..Default::default()
        };
        let cmd = map_movement(&input, &Tuning::default());
        assert_eq!(cmd.vel, Vec2::new(-200.0, 200.0));
        assert_eq!(cmd.source, MoveSource::Keyboard);
        assert!((cmd.facing.unwrap() - 3.0 * PI / 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_idle_keyboard_keeps_facing() {
        let cmd = map_movement(&TickInput::default(), &Tuning::default());
        assert_eq!(cmd.vel, Vec2::ZERO);
        assert_eq!(cmd.facing, None);
        assert!(!cmd.is_moving());
    }

    #[test]
    fn test_joystick_overrides_keyboard() {
        let input = TickInput {
            joystick: Some(Vec2::new(0.0, 1.0)),
            left: true,
            ..Default::default()
        };
        let cmd = map_movement(&input, &Tuning::default());
        assert_eq!(cmd.source, MoveSource::Joystick);
        assert_eq!(cmd.vel, Vec2::new(0.0, 220.0));
        assert!((cmd.facing.unwrap() - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_centered_joystick_falls_back_to_keyboard() {
        let input = TickInput {
            joystick: Some(Vec2::ZERO),
            up: true,
            ..Default::default()
        };
        let cmd = map_movement(&input, &Tuning::default());
        assert_eq!(cmd.source, MoveSource::Keyboard);
        assert_eq!(cmd.vel, Vec2::new(0.0, -200.0));
    }

    #[test]
    fn test_virtual_joystick_clamps_and_releases() {
        let mut stick = VirtualJoystick::new(Vec2::new(90.0, 500.0), 60.0);

        assert!(!stick.press(1, Vec2::new(300.0, 300.0)));
        assert!(stick.press(1, Vec2::new(120.0, 500.0)));
        assert!((stick.force() - Vec2::new(0.5, 0.0)).length() < 1e-5);

        // Dragging past the rim saturates at length 1
        stick.drag(1, Vec2::new(90.0, 800.0));
        assert!((stick.force() - Vec2::new(0.0, 1.0)).length() < 1e-5);

        // Other pointers are ignored
        stick.drag(2, Vec2::new(0.0, 500.0));
        stick.release(2);
        assert!(stick.is_held());

        stick.release(1);
        assert_eq!(stick.force(), Vec2::ZERO);
    }
}
