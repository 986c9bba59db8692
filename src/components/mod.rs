mod health;

pub use health::Vitality;

use glam::Vec2;

use crate::engine::Owner;

/// Attached to every bullet entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub owner: Owner,
}

/// Patrol enemy that lobs shots while pacing between two bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Lobber {
    pub left_bound: f32,
    pub right_bound: f32,
    /// Re-armed once per animation cycle; cleared when the shot leaves.
    pub shoot_armed: bool,
}

impl Lobber {
    /// Bounds are derived from the spawn x alone, `range` units either side.
    pub fn new(spawn_x: f32, range: f32) -> Self {
        Self {
            left_bound: spawn_x - range,
            right_bound: spawn_x + range,
            shoot_armed: true,
        }
    }
}

/// Body sizes the lobber cycles through as it winds up a shot.
pub mod lobber_boxes {
    use glam::Vec2;

    pub const REST: Vec2 = Vec2::new(32.0, 17.0);
    pub const WIND_UP: Vec2 = Vec2::new(32.0, 26.0);
    pub const FIRE: Vec2 = Vec2::new(32.0, 30.0);
    pub const ARM_OFFSET: Vec2 = Vec2::new(0.0, 2.0);
    pub const FIRE_OFFSET: Vec2 = Vec2::new(0.0, 3.0);
}

/// Per-frame hit the collision pass hands to the scene glue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerHit {
    /// An enemy bullet struck the player.
    Shot { at: Vec2 },
    /// The player ran into an enemy body.
    Contact { at: Vec2 },
}
