#![allow(dead_code)]

use buster::config::GameConfig;
use buster::engine::input::{Action, InputSnapshot};
use buster::player::{player_fsm_from, PlayerStateId};
use buster::scene::Scene;
use buster::{FrameReport, GameApp};

pub fn quiet_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.stage.lobbers.clear();
    config
}

/// Empty stage with the player standing on the floor.
pub fn grounded_scene() -> Scene {
    let mut scene = Scene::new(quiet_config());
    let floor_y = scene.config.stage.floor_y;
    let body = &mut scene.player.body;
    body.position.y = floor_y - body.hitbox.size.y;
    body.on_floor = true;
    scene
}

/// Grounded player whose FSM skips the beam-in and starts in `state`.
pub fn grounded_app(state: PlayerStateId) -> GameApp {
    GameApp::with_fsm(grounded_scene(), player_fsm_from(state))
}

pub fn held(actions: &[Action]) -> InputSnapshot {
    InputSnapshot::from_actions(actions.iter().copied())
}

pub fn none() -> InputSnapshot {
    InputSnapshot::new()
}

/// Feed `input` for `frames` frames and return the last report.
pub fn hold(app: &mut GameApp, input: &InputSnapshot, frames: u32) -> FrameReport {
    let mut last = None;
    for _ in 0..frames {
        last = Some(app.update(input.clone()).expect("frame update"));
    }
    last.expect("at least one frame")
}

/// Feed `input` until the player reaches `state`. Returns the number of
/// frames it took, or `None` if it never got there within `limit`.
pub fn run_until(
    app: &mut GameApp,
    input: &InputSnapshot,
    state: PlayerStateId,
    limit: u32,
) -> Option<u32> {
    (1..=limit).find(|_| {
        let report = app.update(input.clone()).expect("frame update");
        report.state == Some(state)
    })
}
