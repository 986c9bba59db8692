use std::sync::Arc;

use glam::Vec2;
use hecs::{Entity, World};

use super::PlayerActor;
use crate::components::{lobber_boxes, Lobber, Vitality};
use crate::config::{GameConfig, LobberTuning};
use crate::engine::animation::{frames, AnimationLibrary, SpriteState};
use crate::engine::arcade::ArcadeBody;

/// Player at the stage spawn point, standing hitbox, full health.
pub fn spawn_player(config: &GameConfig, animations: &Arc<AnimationLibrary>) -> PlayerActor {
    let tuning = &config.tuning;
    let mut body = ArcadeBody::new(config.stage.player_spawn, tuning.standing_hitbox);
    body.max_velocity_x = Some(tuning.slide_max_speed);
    body.drag = tuning.ground_drag;

    PlayerActor {
        body,
        sprite: SpriteState::new(Arc::clone(animations), frames::STAND),
        vitality: Vitality::new(tuning.max_health),
    }
}

/// Lobber patrolling `patrol_range` either side of `position.x`, already
/// walking left.
pub fn spawn_lobber(
    world: &mut World,
    animations: &Arc<AnimationLibrary>,
    position: Vec2,
    tuning: &LobberTuning,
) -> Entity {
    let mut body = ArcadeBody::new(position, lobber_boxes::REST);
    body.velocity.x = -tuning.speed;

    world.spawn((
        body,
        SpriteState::new(Arc::clone(animations), frames::LOBBER_REST),
        Lobber::new(position.x, tuning.patrol_range),
    ))
}
