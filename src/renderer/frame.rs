//! Per-frame geometry: turns the session into one triangle list
//!
//! Draw order is back to front: buildings, fuel, enemies, bullets, the car,
//! then the touch controls on top.

use glam::Vec2;

use super::shapes::{circle, rect, ring, rotated_rect};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{PlayScene, Session, VirtualJoystick};
use crate::ui::ControlLayout;

/// Roof inset on each building tile
const ROOF_INSET: f32 = 8.0;
const CIRCLE_SEGMENTS: u32 = 32;

fn draw_scene(play: &PlayScene, out: &mut Vec<Vertex>) {
    for &pos in &play.buildings {
        out.extend(rect(pos, Vec2::splat(BUILDING_SIZE), colors::BUILDING));
        out.extend(rect(
            pos,
            Vec2::splat(BUILDING_SIZE - 2.0 * ROOF_INSET),
            colors::BUILDING_ROOF,
        ));
    }

    for fuel in play.fuels.values() {
        out.extend(rect(fuel.body.pos, Vec2::splat(FUEL_SIZE), colors::FUEL));
        let cap = fuel.body.pos - Vec2::new(0.0, FUEL_SIZE / 2.0);
        out.extend(rect(cap, Vec2::new(FUEL_SIZE / 2.0, 4.0), colors::FUEL_CAP));
    }

    for enemy in play.enemies.values() {
        out.extend(rect(enemy.body.pos, Vec2::splat(ENEMY_SIZE), colors::ENEMY));
    }

    for bullet in play.bullets.values() {
        out.extend(rotated_rect(
            bullet.body.pos,
            Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            bullet.rotation,
            colors::BULLET,
        ));
    }

    let car = &play.player;
    out.extend(rotated_rect(
        car.body.pos,
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        car.rotation,
        colors::CAR,
    ));
    // Stripe across the front third
    let front = car.body.pos + crate::heading(car.rotation) * (PLAYER_WIDTH / 4.0);
    out.extend(rotated_rect(
        front,
        Vec2::new(6.0, PLAYER_HEIGHT - 6.0),
        car.rotation,
        colors::CAR_FRONT,
    ));
}

fn draw_controls(layout: &ControlLayout, joystick: &VirtualJoystick, out: &mut Vec<Vertex>) {
    out.extend(circle(
        joystick.center,
        joystick.radius,
        colors::JOYSTICK_BASE,
        CIRCLE_SEGMENTS,
    ));
    let knob = joystick.center + joystick.force() * joystick.radius;
    out.extend(circle(
        knob,
        joystick.radius * 0.4,
        colors::JOYSTICK_KNOB,
        CIRCLE_SEGMENTS,
    ));

    out.extend(circle(
        layout.shoot_center,
        layout.shoot_radius,
        colors::SHOOT_BUTTON,
        CIRCLE_SEGMENTS,
    ));
    out.extend(ring(
        layout.shoot_center,
        layout.shoot_radius - 3.0,
        layout.shoot_radius,
        colors::SHOOT_BUTTON_RIM,
        CIRCLE_SEGMENTS,
    ));
}

/// Build the frame's vertices in pixel coordinates
pub fn build_vertices(
    session: &Session,
    layout: &ControlLayout,
    joystick: &VirtualJoystick,
    viewport: Vec2,
) -> Vec<Vertex> {
    let mut out = Vec::new();

    if let Some(play) = session.play() {
        draw_scene(play, &mut out);
        draw_controls(layout, joystick, &mut out);
        if session.paused {
            out.extend(rect(viewport / 2.0, viewport, colors::SHADE));
        }
    }

    out
}
