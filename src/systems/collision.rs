use hecs::{Entity, World};
use tracing::trace;

use crate::components::{Lobber, PlayerHit, Projectile};
use crate::engine::arcade::ArcadeBody;
use crate::engine::{Body, Owner};
use crate::systems::projectiles::BulletGroup;

/// Overlap tests for the frame. Returns the hits the player took, in order.
///
/// Enemy bullets that reach the player are consumed. Any bullet that touches
/// the floor is removed. Touching a lobber is reported every frame the boxes
/// overlap; the player FSM decides whether it can react.
pub fn collision_system(
    player: &ArcadeBody,
    enemies: &World,
    bullets: Option<&mut BulletGroup>,
    floor_y: f32,
) -> Vec<PlayerHit> {
    let mut hits = Vec::new();
    let player_box = player.bounds();

    if let Some(bullets) = bullets {
        let mut spent: Vec<Entity> = Vec::new();
        for (entity, (body, projectile)) in bullets.world().query::<(&ArcadeBody, &Projectile)>().iter() {
            let bounds = body.bounds();
            if projectile.owner == Owner::Enemy && bounds.overlaps(&player_box) {
                hits.push(PlayerHit::Shot { at: body.center() });
                spent.push(entity);
            } else if bounds.max.y >= floor_y {
                spent.push(entity);
            }
        }
        for entity in spent {
            trace!(?entity, "bullet spent");
            bullets.despawn(entity);
        }
    }

    for (_entity, body) in enemies.query::<&ArcadeBody>().with::<&Lobber>().iter() {
        if body.bounds().overlaps(&player_box) {
            hits.push(PlayerHit::Contact { at: body.center() });
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::engine::ProjectileSink;

    fn player() -> ArcadeBody {
        ArcadeBody::new(Vec2::new(100.0, 100.0), Vec2::new(37.0, 40.0))
    }

    #[test]
    fn enemy_bullet_hits_player_and_is_consumed() {
        let mut bullets = BulletGroup::new();
        let enemy_shot = bullets.spawn(Vec2::new(110.0, 120.0), Vec2::new(-350.0, 0.0), Owner::Enemy);
        let own_shot = bullets.spawn(Vec2::new(115.0, 120.0), Vec2::new(350.0, 0.0), Owner::Player);

        let hits = collision_system(&player(), &World::new(), Some(&mut bullets), 400.0);

        assert_eq!(hits, vec![PlayerHit::Shot { at: Vec2::new(110.0, 120.0) }]);
        assert!(!bullets.contains(enemy_shot));
        assert!(bullets.contains(own_shot));
    }

    #[test]
    fn bullets_touching_the_floor_are_removed() {
        let mut bullets = BulletGroup::new();
        let grounded = bullets.spawn(Vec2::new(500.0, 399.0), Vec2::ZERO, Owner::Player);
        let flying = bullets.spawn(Vec2::new(500.0, 300.0), Vec2::ZERO, Owner::Player);

        let hits = collision_system(&player(), &World::new(), Some(&mut bullets), 400.0);

        assert!(hits.is_empty());
        assert!(!bullets.contains(grounded));
        assert!(bullets.contains(flying));
    }

    #[test]
    fn touching_a_lobber_is_a_contact_hit() {
        let mut enemies = World::new();
        let body = ArcadeBody::new(Vec2::new(120.0, 110.0), Vec2::new(32.0, 17.0));
        enemies.spawn((body, Lobber::new(120.0, 150.0)));
        enemies.spawn((ArcadeBody::new(Vec2::new(600.0, 110.0), Vec2::new(32.0, 17.0)), Lobber::new(600.0, 150.0)));

        let hits = collision_system(&player(), &enemies, None, 400.0);

        assert_eq!(hits.len(), 1);
        assert!(matches!(hits[0], PlayerHit::Contact { .. }));
    }
}
