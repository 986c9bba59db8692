use hecs::World;

use crate::engine::arcade::ArcadeBody;
use crate::systems::projectiles::BulletGroup;

/// Everything the integrator needs that isn't a body.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsParams {
    pub gravity: f32,
    pub floor_y: f32,
    pub dt: f32,
}

/// One fixed step for every body in the level.
///
/// The player and enemies fall and land on the floor; bullets fly straight
/// (they are spawned with gravity off) and are left for the collision pass.
pub fn physics_step(
    player: &mut ArcadeBody,
    enemies: &mut World,
    bullets: Option<&mut BulletGroup>,
    params: PhysicsParams,
) {
    player.integrate(params.gravity, params.dt);
    player.settle_on_floor(params.floor_y);

    for (_entity, body) in enemies.query_mut::<&mut ArcadeBody>() {
        body.integrate(params.gravity, params.dt);
        body.settle_on_floor(params.floor_y);
    }

    if let Some(bullets) = bullets {
        for (_entity, body) in bullets.world_mut().query_mut::<&mut ArcadeBody>() {
            body.integrate(params.gravity, params.dt);
        }
    }
}
