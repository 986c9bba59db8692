//! Minimal arcade-style body used by the headless scene: fixed-step velocity
//! integration, linear horizontal drag and a flat floor.

use glam::Vec2;

use super::{Body, Hitbox};

/// Axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArcadeBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Horizontal deceleration (units/s²) applied while not accelerating.
    pub drag: f32,
    pub max_velocity_x: Option<f32>,
    pub hitbox: Hitbox,
    pub on_floor: bool,
    pub allow_gravity: bool,
}

impl ArcadeBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            drag: 0.0,
            max_velocity_x: None,
            hitbox: Hitbox::new(size, Vec2::ZERO),
            on_floor: false,
            allow_gravity: true,
        }
    }

    pub fn bounds(&self) -> Aabb {
        let min = self.position + self.hitbox.offset;
        Aabb { min, max: min + self.hitbox.size }
    }

    /// Semi-implicit Euler step: velocity first, then position.
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        let mut v = self.velocity;
        if self.allow_gravity {
            v.y += gravity * dt;
        }
        v += self.acceleration * dt;

        if self.acceleration.x == 0.0 && self.drag > 0.0 {
            let d = self.drag * dt;
            v.x = if v.x > d {
                v.x - d
            } else if v.x < -d {
                v.x + d
            } else {
                0.0
            };
        }

        if let Some(max) = self.max_velocity_x {
            v.x = v.x.clamp(-max, max);
        }

        self.velocity = v;
        self.position += v * dt;
    }

    /// Push the body out of the floor plane at `floor_y` and refresh `on_floor`.
    pub fn settle_on_floor(&mut self, floor_y: f32) {
        let bottom = self.bounds().max.y;
        if bottom >= floor_y && self.velocity.y >= 0.0 {
            self.position.y -= bottom - floor_y;
            self.velocity.y = 0.0;
            self.on_floor = true;
        } else {
            self.on_floor = false;
        }
    }
}

impl Body for ArcadeBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    fn set_acceleration(&mut self, acceleration: Vec2) {
        self.acceleration = acceleration;
    }

    fn drag(&self) -> f32 {
        self.drag
    }

    fn set_drag(&mut self, drag: f32) {
        self.drag = drag;
    }

    fn hitbox(&self) -> Hitbox {
        self.hitbox
    }

    fn set_hitbox(&mut self, hitbox: Hitbox) {
        self.hitbox = hitbox;
    }

    fn on_floor(&self) -> bool {
        self.on_floor
    }

    fn allows_gravity(&self) -> bool {
        self.allow_gravity
    }

    fn set_allow_gravity(&mut self, allow: bool) {
        self.allow_gravity = allow;
    }
}
