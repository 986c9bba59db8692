pub mod prefabs;
pub mod test_scene;

use std::sync::Arc;

use hecs::World;

use crate::components::Vitality;
use crate::config::{GameConfig, Tuning};
use crate::engine::animation::{AnimationLibrary, SpriteState};
use crate::engine::arcade::ArcadeBody;
use crate::engine::input::InputSnapshot;
use crate::engine::{Body, Health, ProjectileSink, Sprite};
use crate::player::PlayerStage;
use crate::systems::projectiles::BulletGroup;

/// The player's body, sprite and health.
pub struct PlayerActor {
    pub body: ArcadeBody,
    pub sprite: SpriteState,
    pub vitality: Vitality,
}

/// Everything one level owns. Serves as the context the player FSM runs on.
pub struct Scene {
    pub input: InputSnapshot,
    pub config: GameConfig,
    pub animations: Arc<AnimationLibrary>,
    pub player: PlayerActor,
    /// Patrol enemies.
    pub enemies: World,
    /// `None` when the level was built without a bullet group; shooting then fails.
    pub bullets: Option<BulletGroup>,
}

impl Scene {
    /// A level with the player at its spawn point, a bullet group and no enemies.
    pub fn new(config: GameConfig) -> Self {
        let animations = Arc::new(AnimationLibrary::standard());
        let player = prefabs::spawn_player(&config, &animations);
        let bullets = BulletGroup::with_bullet_size(config.tuning.bullet_size);
        Self {
            input: InputSnapshot::new(),
            config,
            animations,
            player,
            enemies: World::new(),
            bullets: Some(bullets),
        }
    }

    pub fn without_bullets(mut self) -> Self {
        self.bullets = None;
        self
    }
}

impl PlayerStage for Scene {
    fn input(&self) -> &InputSnapshot {
        &self.input
    }

    fn tuning(&self) -> &Tuning {
        &self.config.tuning
    }

    fn body(&self) -> &dyn Body {
        &self.player.body
    }

    fn body_mut(&mut self) -> &mut dyn Body {
        &mut self.player.body
    }

    fn sprite(&self) -> &dyn Sprite {
        &self.player.sprite
    }

    fn sprite_mut(&mut self) -> &mut dyn Sprite {
        &mut self.player.sprite
    }

    fn health(&self) -> &dyn Health {
        &self.player.vitality
    }

    fn health_mut(&mut self) -> &mut dyn Health {
        &mut self.player.vitality
    }

    fn projectiles(&mut self) -> Option<&mut dyn ProjectileSink> {
        self.bullets.as_mut().map(|b| b as &mut dyn ProjectileSink)
    }
}
