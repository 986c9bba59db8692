use glam::Vec2;
use hecs::World;
use tracing::debug;

use crate::components::{lobber_boxes, Lobber};
use crate::config::LobberTuning;
use crate::engine::animation::{clips, frames, SpriteState};
use crate::engine::arcade::ArcadeBody;
use crate::engine::{Owner, ProjectileSink, Sprite};
use crate::error::{GameError, Result};
use crate::systems::projectiles::BulletGroup;

/// Patrol, reshape and fire for every lobber. Returns the number of shots
/// spawned this frame.
///
/// A lobber turns around at its bounds and restarts the lob clip. The clip
/// re-arms it on `lobber002` and releases one shot on `lobber006`, so each
/// cycle fires at most once no matter how many frames the fire pose is held.
pub fn lobber_system(
    enemies: &mut World,
    bullets: Option<&mut BulletGroup>,
    tuning: &LobberTuning,
) -> Result<usize> {
    let mut shots: Vec<(Vec2, Vec2)> = Vec::new();

    for (_entity, (body, sprite, lobber)) in
        enemies.query_mut::<(&mut ArcadeBody, &mut SpriteState, &mut Lobber)>()
    {
        if body.position.x <= lobber.left_bound {
            sprite.set_flip_x(true);
            body.velocity.x = tuning.speed;
            sprite.play(clips::LOB, true);
        } else if body.position.x >= lobber.right_bound {
            sprite.set_flip_x(false);
            body.velocity.x = -tuning.speed;
            sprite.play(clips::LOB, true);
        }

        match sprite.frame_name() {
            frames::LOBBER_ARM => {
                body.hitbox.offset = lobber_boxes::ARM_OFFSET;
                lobber.shoot_armed = true;
            }
            frames::LOBBER_WIND_UP => {
                body.hitbox.size = lobber_boxes::WIND_UP;
            }
            frames::LOBBER_FIRE => {
                body.hitbox.size = lobber_boxes::FIRE;
                body.hitbox.offset = lobber_boxes::FIRE_OFFSET;
                if lobber.shoot_armed {
                    lobber.shoot_armed = false;
                    shots.push(muzzle(body, sprite.flip_x(), tuning));
                }
            }
            _ => {
                body.hitbox.size = lobber_boxes::REST;
            }
        }
    }

    if shots.is_empty() {
        return Ok(0);
    }
    let sink = bullets.ok_or_else(|| {
        GameError::Configuration("lobber fired but the scene has no bullet group".into())
    })?;
    for &(origin, velocity) in &shots {
        sink.spawn(origin, velocity, Owner::Enemy);
        debug!(?origin, vx = velocity.x, "lobber shot");
    }
    Ok(shots.len())
}

/// Shot origin and velocity. Facing right when flipped.
fn muzzle(body: &ArcadeBody, flipped: bool, tuning: &LobberTuning) -> (Vec2, Vec2) {
    let center_y = body.bounds().min.y + body.hitbox.size.y / 2.0;
    let (dx, dy) = (tuning.muzzle_offset.x, tuning.muzzle_offset.y);
    if flipped {
        (
            Vec2::new(body.position.x + dx, center_y + dy),
            Vec2::new(tuning.bullet_speed, 0.0),
        )
    } else {
        (
            Vec2::new(body.position.x - dx, center_y + dy),
            Vec2::new(-tuning.bullet_speed, 0.0),
        )
    }
}
