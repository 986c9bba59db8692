use glam::Vec2;
use hecs::{Entity, World};
use tracing::debug;

use crate::components::Projectile;
use crate::engine::arcade::ArcadeBody;
use crate::engine::{Body, Owner, ProjectileSink, Sprite};
use crate::error::{GameError, Result};
use crate::player::PlayerStage;

const BULLET_SIZE: Vec2 = Vec2::new(8.0, 6.0);

/// Sprite-group style container for live bullets.
pub struct BulletGroup {
    world: World,
    last: Option<Entity>,
    size: Vec2,
}

impl BulletGroup {
    pub fn new() -> Self {
        Self::with_bullet_size(BULLET_SIZE)
    }

    pub fn with_bullet_size(size: Vec2) -> Self {
        Self {
            world: World::new(),
            last: None,
            size,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    pub fn despawn(&mut self, entity: Entity) {
        let _ = self.world.despawn(entity);
    }

    pub fn count_owned_by(&self, owner: Owner) -> usize {
        self.world
            .query::<&Projectile>()
            .iter()
            .filter(|(_, p)| p.owner == owner)
            .count()
    }

    /// Velocity of `entity`, if it is still alive.
    pub fn velocity_of(&self, entity: Entity) -> Option<Vec2> {
        self.world.get::<&ArcadeBody>(entity).ok().map(|b| b.velocity)
    }
}

impl Default for BulletGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectileSink for BulletGroup {
    fn spawn(&mut self, center: Vec2, velocity: Vec2, owner: Owner) -> Entity {
        let mut body = ArcadeBody::new(center - self.size * 0.5, self.size);
        body.set_allow_gravity(false);
        body.set_velocity(velocity);
        let entity = self.world.spawn((body, Projectile { owner }));
        self.last = Some(entity);
        entity
    }

    fn last_spawned(&self) -> Option<Entity> {
        self.last.filter(|&e| self.world.contains(e))
    }

    fn len(&self) -> usize {
        self.world.len() as usize
    }
}

/// Fire one player bullet from the body centre in the facing direction.
///
/// Fails if the scene never created a bullet group.
pub fn shoot_bullet<S: PlayerStage + ?Sized>(ctx: &mut S) -> Result<Entity> {
    let center = ctx.body().center();
    let facing_left = ctx.sprite().flip_x();
    let (speed, offset) = {
        let tuning = ctx.tuning();
        (tuning.bullet_speed, tuning.bullet_offset)
    };

    let sign = if facing_left { -1.0 } else { 1.0 };
    let origin = center + Vec2::new(sign * offset.x, offset.y);
    let velocity = Vec2::new(sign * speed, 0.0);

    let sink = ctx.projectiles().ok_or_else(|| {
        GameError::Configuration("scene has no bullet group to shoot into".into())
    })?;
    let bullet = sink.spawn(origin, velocity, Owner::Player);
    debug!(?origin, vx = velocity.x, "player shot");
    Ok(bullet)
}

/// Remove bullets whose horizontal distance from `player_x` exceeds `threshold`.
/// Returns how many were removed.
pub fn cull_projectiles(bullets: &mut BulletGroup, player_x: f32, threshold: f32) -> usize {
    let stale: Vec<Entity> = bullets
        .world
        .query::<&ArcadeBody>()
        .with::<&Projectile>()
        .iter()
        .filter(|(_, body)| (body.position.x - player_x).abs() > threshold)
        .map(|(e, _)| e)
        .collect();

    for &entity in &stale {
        let _ = bullets.world.despawn(entity);
    }
    stale.len()
}
