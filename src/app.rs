use glam::Vec2;
use tracing::{debug, info, trace};

use crate::components::PlayerHit;
use crate::config::FRAME_DT;
use crate::engine::input::InputSnapshot;
use crate::engine::script::InputScript;
use crate::engine::{Body, Health, ProjectileSink};
use crate::error::Result;
use crate::player::{damage_state_for, player_fsm, Entry, PlayerEvent, PlayerFsm, PlayerStateId};
use crate::scene::Scene;
use crate::systems::{
    animation_system, collision_system, cull_projectiles, lobber_system, physics_step,
    PhysicsParams,
};

/// What one call to [`GameApp::update`] left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub state: Option<PlayerStateId>,
    pub position: Vec2,
    pub health: u32,
    pub alive: bool,
    pub live_bullets: usize,
    pub hits: usize,
}

/// Owns a level and the player FSM and runs them one fixed frame at a time.
pub struct GameApp {
    scene: Scene,
    fsm: PlayerFsm<Scene>,
    frame: u64,
}

impl GameApp {
    /// Player starts in Teleport.
    pub fn new(scene: Scene) -> Self {
        Self::with_fsm(scene, player_fsm())
    }

    pub fn with_fsm(scene: Scene, fsm: PlayerFsm<Scene>) -> Self {
        Self { scene, fsm, frame: 0 }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn fsm(&self) -> &PlayerFsm<Scene> {
        &self.fsm
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Run one frame with `input` held.
    ///
    /// Order: player FSM, enemies, bullet culling, physics, animation
    /// (completions are queued for the next FSM step), then collisions,
    /// which may force the FSM into a damage state.
    pub fn update(&mut self, input: InputSnapshot) -> Result<FrameReport> {
        self.scene.input = input;
        self.fsm.step(&mut self.scene)?;

        let scene = &mut self.scene;
        lobber_system(&mut scene.enemies, scene.bullets.as_mut(), &scene.config.lobber)?;

        if let Some(bullets) = scene.bullets.as_mut() {
            let culled = cull_projectiles(
                bullets,
                scene.player.body.position.x,
                scene.config.tuning.cull_distance,
            );
            if culled > 0 {
                trace!(culled, "bullets culled");
            }
        }

        let params = PhysicsParams {
            gravity: scene.config.tuning.gravity,
            floor_y: scene.config.stage.floor_y,
            dt: FRAME_DT,
        };
        physics_step(&mut scene.player.body, &mut scene.enemies, scene.bullets.as_mut(), params);

        for clip in animation_system(&mut scene.player.sprite, &mut scene.enemies, FRAME_DT) {
            self.fsm.post(PlayerEvent::AnimationComplete(clip));
        }

        let hits = collision_system(
            &self.scene.player.body,
            &self.scene.enemies,
            self.scene.bullets.as_mut(),
            self.scene.config.stage.floor_y,
        );
        for hit in &hits {
            self.apply_hit(*hit)?;
        }

        self.frame += 1;
        Ok(self.report(hits.len()))
    }

    /// Play `frames` frames of `script`, stopping early once the player is
    /// defeated. Returns the last report, or `None` if nothing ran.
    pub fn run_script(&mut self, script: &InputScript, frames: u32) -> Result<Option<FrameReport>> {
        let mut last: Option<FrameReport> = None;
        for frame in 0..frames {
            let report = self.update(script.at(frame))?;
            let previous = last.as_ref().and_then(|r| r.state);
            if report.state != previous {
                info!(frame, state = ?report.state, position = ?report.position, "player state");
            }
            if frame % 60 == 0 {
                debug!(frame, health = report.health, bullets = report.live_bullets, "tick");
            }
            let defeated = report.state == Some(PlayerStateId::Defeated);
            last = Some(report);
            if defeated {
                break;
            }
        }
        Ok(last)
    }

    /// Route a hit into the damage state matching the current one. Hits
    /// landing in states with no damage reaction are ignored.
    fn apply_hit(&mut self, hit: PlayerHit) -> Result<()> {
        let Some(current) = self.fsm.current() else {
            return Ok(());
        };
        let Some(target) = damage_state_for(current) else {
            trace!(?current, ?hit, "hit ignored");
            return Ok(());
        };

        if let PlayerHit::Contact { .. } = hit {
            self.scene.player.body.stop();
        }
        debug!(from = ?current, to = ?target, ?hit, "player hit");
        let damage = self.scene.config.tuning.hit_damage;
        self.fsm.transition_with(target, &mut self.scene, Entry::Hit { damage })
    }

    fn report(&self, hits: usize) -> FrameReport {
        let player = &self.scene.player;
        FrameReport {
            frame: self.frame,
            state: self.fsm.current(),
            position: player.body.position,
            health: player.vitality.health(),
            alive: player.vitality.alive(),
            live_bullets: self.scene.bullets.as_ref().map_or(0, |b| b.len()),
            hits,
        }
    }
}
