use hecs::World;

use crate::engine::animation::SpriteState;

/// Advance the player's sprite and every enemy sprite by `dt`.
///
/// Returns the player clips that completed this tick. Enemy completions
/// are dropped; lobbers read frame names instead of listening for them.
pub fn animation_system(player: &mut SpriteState, enemies: &mut World, dt: f32) -> Vec<String> {
    let completed: Vec<String> = player.tick(dt).into_iter().collect();

    for (_entity, sprite) in enemies.query_mut::<&mut SpriteState>() {
        sprite.tick(dt);
    }

    completed
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::engine::animation::{clips, frames, AnimationLibrary};
    use crate::engine::Sprite;

    #[test]
    fn reports_player_clip_completion_once() {
        let library = Arc::new(AnimationLibrary::standard());
        let mut player = SpriteState::new(Arc::clone(&library), frames::STAND);
        let mut enemies = World::new();
        let lobber = enemies.spawn((SpriteState::new(library, frames::LOBBER_REST),));
        enemies.get::<&mut SpriteState>(lobber).unwrap().play(clips::LOB, false);
        player.play(clips::SHOOT, false);

        let mut done = Vec::new();
        for _ in 0..30 {
            done.extend(animation_system(&mut player, &mut enemies, 1.0 / 60.0));
        }

        assert_eq!(done, vec![clips::SHOOT.to_string()]);
        assert_ne!(enemies.get::<&SpriteState>(lobber).unwrap().frame_name(), frames::LOBBER_REST);
    }
}
