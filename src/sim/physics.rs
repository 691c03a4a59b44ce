//! Arcade physics for axis-aligned boxes
//!
//! Bodies never rotate for collision purposes: a car facing 45° still collides
//! as its unrotated 48x28 box. Good enough for an arcade game and keeps every
//! test a pair of interval checks.

use glam::Vec2;

/// A moving axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    /// Half extents
    pub half: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            half: size / 2.0,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Move by velocity over `dt` seconds
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.half
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Body) -> bool {
        let d = (self.pos - other.pos).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }
}

/// Result of a box-box collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Separation axis, pointing from the second body toward the first
    pub normal: Vec2,
    /// Overlap along `normal` (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between two boxes, resolving along the axis of least
/// penetration.
pub fn box_collision(a: &Body, b: &Body) -> CollisionResult {
    if !a.overlaps(b) {
        return CollisionResult::miss();
    }

    let delta = a.pos - b.pos;
    let reach = a.half + b.half;
    let pen_x = reach.x - delta.x.abs();
    let pen_y = reach.y - delta.y.abs();

    // Coincident centers have no preferred side; push along +x / +y
    let sign = |v: f32| if v < 0.0 { -1.0 } else { 1.0 };

    if pen_x < pen_y {
        CollisionResult {
            hit: true,
            normal: Vec2::new(sign(delta.x), 0.0),
            penetration: pen_x,
        }
    } else {
        CollisionResult {
            hit: true,
            normal: Vec2::new(0.0, sign(delta.y)),
            penetration: pen_y,
        }
    }
}

/// Push two movable bodies apart, half the overlap each
pub fn separate(a: &mut Body, b: &mut Body, hit: &CollisionResult) {
    if !hit.hit {
        return;
    }
    let push = hit.normal * (hit.penetration / 2.0);
    a.pos += push;
    b.pos -= push;
}

/// Exchange velocity along the contact normal (equal masses, restitution 1).
/// Bodies already moving apart are left alone.
pub fn bounce_pair(a: &mut Body, b: &mut Body, normal: Vec2) {
    let va = a.vel.dot(normal);
    let vb = b.vel.dot(normal);
    if va - vb >= 0.0 {
        return;
    }
    a.vel += normal * (vb - va);
    b.vel += normal * (va - vb);
}

/// Reflect velocity off a surface with given normal
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Clamp each velocity axis to `max` (arcade max-velocity semantics)
#[inline]
pub fn limit_velocity(vel: Vec2, max: f32) -> Vec2 {
    vel.clamp(Vec2::splat(-max), Vec2::splat(max))
}

/// Velocity of magnitude `speed` from `from` toward `to` (zero if coincident)
pub fn velocity_toward(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    (to - from).normalize_or_zero() * speed
}

/// Whether any part of the body is outside the world rectangle
pub fn outside_world(body: &Body, world: Vec2) -> bool {
    let min = body.min();
    let max = body.max();
    min.x < 0.0 || min.y < 0.0 || max.x > world.x || max.y > world.y
}

/// Keep a body inside the world; velocity into a wall is zeroed
pub fn clamp_to_world(body: &mut Body, world: Vec2) -> bool {
    let mut hit = false;
    for axis in 0..2 {
        let lo = body.half[axis];
        let hi = (world[axis] - body.half[axis]).max(lo);
        if body.pos[axis] < lo {
            body.pos[axis] = lo;
            body.vel[axis] = body.vel[axis].max(0.0);
            hit = true;
        } else if body.pos[axis] > hi {
            body.pos[axis] = hi;
            body.vel[axis] = body.vel[axis].min(0.0);
            hit = true;
        }
    }
    hit
}

/// Keep a body inside the world, reflecting velocity off the walls
pub fn bounce_off_world(body: &mut Body, world: Vec2) -> bool {
    let mut hit = false;
    for axis in 0..2 {
        let lo = body.half[axis];
        let hi = (world[axis] - body.half[axis]).max(lo);
        if body.pos[axis] < lo {
            body.pos[axis] = lo;
            body.vel[axis] = body.vel[axis].abs();
            hit = true;
        } else if body.pos[axis] > hi {
            body.pos[axis] = hi;
            body.vel[axis] = -body.vel[axis].abs();
            hit = true;
        }
    }
    hit
}
