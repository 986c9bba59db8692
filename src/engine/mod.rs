//! Capabilities the game core consumes from the engine layer.
//!
//! States only ever talk to bodies, sprites, health and projectile groups
//! through these traits. [`arcade`] and [`animation`] provide the small
//! reference implementations the headless scene runs on.

pub mod animation;
pub mod arcade;
pub mod input;
pub mod script;

use glam::Vec2;
use hecs::Entity;

/// Rectangular collision extent, relative to the owner's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub size: Vec2,
    pub offset: Vec2,
}

impl Hitbox {
    pub const fn new(size: Vec2, offset: Vec2) -> Self {
        Self { size, offset }
    }

    /// Grow (or shrink, for negative components) the size and shift the offset.
    pub fn resized(self, size_delta: Vec2, offset: Vec2) -> Self {
        Self {
            size: self.size + size_delta,
            offset,
        }
    }
}

/// A physics body under the engine's integration.
pub trait Body {
    /// Top-left corner of the owning sprite.
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);

    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);

    fn acceleration(&self) -> Vec2;
    fn set_acceleration(&mut self, acceleration: Vec2);

    fn drag(&self) -> f32;
    fn set_drag(&mut self, drag: f32);

    fn hitbox(&self) -> Hitbox;
    fn set_hitbox(&mut self, hitbox: Hitbox);

    /// Set by the engine after each collision pass.
    fn on_floor(&self) -> bool;

    fn allows_gravity(&self) -> bool;
    fn set_allow_gravity(&mut self, allow: bool);

    fn set_velocity_x(&mut self, x: f32) {
        let v = self.velocity();
        self.set_velocity(Vec2::new(x, v.y));
    }

    fn set_velocity_y(&mut self, y: f32) {
        let v = self.velocity();
        self.set_velocity(Vec2::new(v.x, y));
    }

    fn set_acceleration_x(&mut self, x: f32) {
        let a = self.acceleration();
        self.set_acceleration(Vec2::new(x, a.y));
    }

    /// Centre of the hitbox in world space.
    fn center(&self) -> Vec2 {
        let hitbox = self.hitbox();
        self.position() + hitbox.offset + hitbox.size * 0.5
    }

    /// Zero velocity and acceleration.
    fn stop(&mut self) {
        self.set_velocity(Vec2::ZERO);
        self.set_acceleration(Vec2::ZERO);
    }
}

/// Frame-based sprite animation and facing.
pub trait Sprite {
    /// Start the clip `key`. With `ignore_if_playing`, a clip that is already
    /// running is left alone instead of restarting.
    fn play(&mut self, key: &str, ignore_if_playing: bool);
    fn stop(&mut self);
    /// Show a specific frame directly, stopping any clip.
    fn set_frame(&mut self, frame: &str);
    fn frame_name(&self) -> &str;
    fn current_clip(&self) -> Option<&str>;
    fn flip_x(&self) -> bool;
    fn set_flip_x(&mut self, flip: bool);
}

/// Player health sink.
pub trait Health {
    fn health(&self) -> u32;
    fn alive(&self) -> bool;
    /// Negative amounts heal. Ignored while hurt or dead.
    fn reduce(&mut self, amount: i32);
    fn is_hurt(&self) -> bool;
    fn set_hurt(&mut self, hurt: bool);
}

/// Who fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Player,
    Enemy,
}

/// A named group projectiles are spawned into.
pub trait ProjectileSink {
    /// Spawn a gravity-exempt projectile whose hitbox is centred on `center`.
    fn spawn(&mut self, center: Vec2, velocity: Vec2, owner: Owner) -> Entity;
    fn last_spawned(&self) -> Option<Entity>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
