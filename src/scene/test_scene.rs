use tracing::info;

use super::prefabs::spawn_lobber;
use super::Scene;
use crate::config::GameConfig;

/// Build the test level: player, floor, and the configured lobbers.
pub fn load_test_scene(config: GameConfig) -> Scene {
    let mut scene = Scene::new(config);

    let spawns = scene.config.stage.lobbers.clone();
    for position in spawns {
        spawn_lobber(&mut scene.enemies, &scene.animations, position, &scene.config.lobber);
    }

    info!(
        lobbers = scene.enemies.len(),
        floor_y = scene.config.stage.floor_y,
        "test scene loaded"
    );
    scene
}
