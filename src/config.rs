use std::path::Path;

use glam::Vec2;
use serde::Deserialize;

use crate::engine::Hitbox;
use crate::error::{GameError, Result};

/// Fixed simulation step, 60 Hz.
pub const FRAME_DT: f32 = 1.0 / 60.0;

/// Gameplay tuning for the player and projectiles.
///
/// One immutable value per scene; states read it through the context rather
/// than redeclaring their own constants.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal speed cap for Walk, WalkShoot and Drift acceleration.
    pub max_speed: f32,
    pub walk_accel: f32,
    pub ground_drag: f32,

    pub jump_velocity: f32,
    pub drift_drag: f32,
    pub drift_accel: f32,
    /// Upward speed applied while the jump key stays held early in a drift.
    pub drift_lift: f32,
    pub drift_max_loops: u32,
    /// Added to the standing hitbox while airborne.
    pub drift_hitbox_delta: Vec2,
    pub drift_offset_delta: Vec2,

    pub slide_drag: f32,
    pub slide_max_speed: f32,
    pub slide_boost: f32,
    /// Below this horizontal speed a slide ends on its own.
    pub slide_min_speed: f32,
    pub slide_hitbox_delta: Vec2,
    pub slide_offset: Vec2,

    pub idle_fidget_frames: u32,
    /// Fidget counter value right after an idle shot.
    pub idle_shot_counter: u32,

    pub bullet_speed: f32,
    /// Muzzle offset from the body centre, x mirrored by facing.
    pub bullet_offset: Vec2,
    pub bullet_size: Vec2,
    /// Bullets farther than this from the player horizontally are culled.
    pub cull_distance: f32,

    pub hit_damage: i32,
    pub max_health: u32,

    pub gravity: f32,
    pub standing_hitbox: Vec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_speed: 220.0,
            walk_accel: 600.0,
            ground_drag: 1000.0,
            jump_velocity: 220.0,
            drift_drag: 200.0,
            drift_accel: 150.0,
            drift_lift: 300.0,
            drift_max_loops: 15,
            drift_hitbox_delta: Vec2::new(0.0, -4.0),
            drift_offset_delta: Vec2::new(0.0, 2.0),
            slide_drag: 250.0,
            slide_max_speed: 300.0,
            slide_boost: 100.0,
            slide_min_speed: 10.0,
            slide_hitbox_delta: Vec2::new(3.0, -17.0),
            slide_offset: Vec2::new(6.0, 6.0),
            idle_fidget_frames: 500,
            idle_shot_counter: 300,
            bullet_speed: 350.0,
            bullet_offset: Vec2::new(20.0, -5.0),
            bullet_size: Vec2::new(8.0, 6.0),
            cull_distance: 800.0,
            hit_damage: 1,
            max_health: 15,
            gravity: 1200.0,
            standing_hitbox: Vec2::new(37.0, 40.0),
        }
    }
}

impl Tuning {
    pub fn standing_box(&self) -> Hitbox {
        Hitbox::new(self.standing_hitbox, Vec2::ZERO)
    }
}

/// Patrol enemy tuning.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LobberTuning {
    /// Half-width of the patrol range around the spawn x.
    pub patrol_range: f32,
    pub speed: f32,
    pub bullet_speed: f32,
    pub muzzle_offset: Vec2,
}

impl Default for LobberTuning {
    fn default() -> Self {
        Self {
            patrol_range: 150.0,
            speed: 80.0,
            bullet_speed: 350.0,
            muzzle_offset: Vec2::new(10.0, -9.0),
        }
    }
}

/// Level layout for the headless test stage.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct StageConfig {
    pub floor_y: f32,
    pub player_spawn: Vec2,
    pub lobbers: Vec<Vec2>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            floor_y: 400.0,
            player_spawn: Vec2::new(100.0, 100.0),
            lobbers: vec![Vec2::new(400.0, 100.0)],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub tuning: Tuning,
    pub lobber: LobberTuning,
    pub stage: StageConfig,
}

impl GameConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }
}
