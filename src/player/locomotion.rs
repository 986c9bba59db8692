use glam::Vec2;

use super::{stand_up, EdgeArm, Entry, PlayerEvent, PlayerStage, PlayerStateId as Id, PlayerTransition};
use crate::engine::animation::{clips, frames};
use crate::engine::input::Action;
use crate::engine::{Body, Hitbox, Sprite};
use crate::error::Result;
use crate::fsm::{State, Transition};
use crate::systems::projectiles::shoot_bullet;

// ---------------------------------------------------------------------------
// Teleport
// ---------------------------------------------------------------------------

/// Beam-in animation; hands over to Idle once it has played.
#[derive(Debug, Default)]
pub struct Teleport;

impl<S: PlayerStage + ?Sized> State<Id, S, Entry, PlayerEvent> for Teleport {
    fn enter(&mut self, ctx: &mut S, _args: Entry) -> Result<()> {
        ctx.sprite_mut().play(clips::TELEPORT, false);
        Ok(())
    }

    fn execute(&mut self, _ctx: &mut S) -> Result<PlayerTransition> {
        Ok(Transition::Stay)
    }

    fn on_event(&mut self, _ctx: &mut S, event: &PlayerEvent) -> Result<PlayerTransition> {
        let PlayerEvent::AnimationComplete(clip) = event;
        Ok(if clip == clips::TELEPORT {
            Transition::Go(Id::Idle)
        } else {
            Transition::Stay
        })
    }
}

// ---------------------------------------------------------------------------
// Idle
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Idle {
    /// Frames until the fidget animation plays.
    fidget: u32,
    jump: EdgeArm,
    shoot: EdgeArm,
    /// A shot whose bullet leaves when the `shoot` clip completes, or when
    /// Idle is left first.
    shot_pending: bool,
}

impl<S: PlayerStage + ?Sized> State<Id, S, Entry, PlayerEvent> for Idle {
    fn enter(&mut self, ctx: &mut S, _args: Entry) -> Result<()> {
        let drag = ctx.tuning().ground_drag;
        let body = ctx.body_mut();
        body.set_drag(drag);
        body.set_acceleration_x(0.0);
        ctx.sprite_mut().set_frame(frames::STAND);

        self.fidget = 0;
        self.shot_pending = false;
        self.jump.reset(ctx.input().is_down(Action::Up));
        self.shoot.reset(ctx.input().is_down(Action::Fire));
        Ok(())
    }

    fn execute(&mut self, ctx: &mut S) -> Result<PlayerTransition> {
        let input = ctx.input();
        let up = input.is_down(Action::Up);
        let fire = input.is_down(Action::Fire);
        let lateral = input.any_down(&[Action::Left, Action::Right]);

        self.jump.observe(up);
        self.shoot.observe(fire);

        if self.shoot.ready(fire) {
            self.shoot.consume();
            self.shot_pending = true;
            self.fidget = ctx.tuning().idle_shot_counter;
            ctx.sprite_mut().play(clips::SHOOT, true);
            return Ok(Transition::Stay);
        }

        if self.jump.ready(up) && ctx.body().on_floor() {
            return Ok(Transition::Go(Id::Jump));
        }

        if lateral {
            return Ok(Transition::Go(Id::Walk));
        }

        self.fidget += 1;
        if self.fidget >= ctx.tuning().idle_fidget_frames {
            ctx.sprite_mut().play(clips::STANDING, true);
            self.fidget = 0;
        }
        Ok(Transition::Stay)
    }

    /// A shot still waiting on the `shoot` clip leaves now, so every press
    /// made in Idle produces exactly one bullet.
    fn exit(&mut self, ctx: &mut S) -> Result<()> {
        if std::mem::take(&mut self.shot_pending) {
            shoot_bullet(ctx)?;
        }
        Ok(())
    }

    fn on_event(&mut self, ctx: &mut S, event: &PlayerEvent) -> Result<PlayerTransition> {
        let PlayerEvent::AnimationComplete(clip) = event;
        if clip == clips::SHOOT && std::mem::take(&mut self.shot_pending) {
            shoot_bullet(ctx)?;
            ctx.sprite_mut().set_frame(frames::STAND);
        }
        Ok(Transition::Stay)
    }
}

// ---------------------------------------------------------------------------
// Jump
// ---------------------------------------------------------------------------

/// Launch. Hands straight over to Drift while any steering key is held.
#[derive(Debug, Default)]
pub struct Jump;

impl<S: PlayerStage + ?Sized> State<Id, S, Entry, PlayerEvent> for Jump {
    fn enter(&mut self, ctx: &mut S, _args: Entry) -> Result<()> {
        let tuning = ctx.tuning();
        let (drag, jump_velocity) = (tuning.drift_drag, tuning.jump_velocity);
        let body = ctx.body_mut();
        body.set_acceleration_x(0.0);
        body.set_drag(drag);
        body.set_velocity_y(-jump_velocity);
        Ok(())
    }

    fn execute(&mut self, ctx: &mut S) -> Result<PlayerTransition> {
        if ctx.input().any_down(&[Action::Left, Action::Right, Action::Up]) {
            return Ok(Transition::Go(Id::Drift));
        }
        if ctx.body().on_floor() {
            return Ok(Transition::Go(Id::Idle));
        }
        Ok(Transition::Stay)
    }
}

// ---------------------------------------------------------------------------
// Drift
// ---------------------------------------------------------------------------

/// Airborne steering. Holding jump keeps lifting for the first few frames,
/// so jump height follows how long the key is held.
#[derive(Debug, Default)]
pub struct Drift {
    loops: u32,
    shoot: EdgeArm,
    saved_hitbox: Option<Hitbox>,
}

impl<S: PlayerStage + ?Sized> State<Id, S, Entry, PlayerEvent> for Drift {
    fn enter(&mut self, ctx: &mut S, _args: Entry) -> Result<()> {
        let tuning = ctx.tuning();
        let (drag, size_delta, offset_delta) =
            (tuning.drift_drag, tuning.drift_hitbox_delta, tuning.drift_offset_delta);

        self.loops = 0;
        self.shoot.reset(ctx.input().is_down(Action::Fire));

        let body = ctx.body_mut();
        body.set_drag(drag);
        let standing = body.hitbox();
        body.set_hitbox(standing.resized(size_delta, standing.offset + offset_delta));
        self.saved_hitbox = Some(standing);

        ctx.sprite_mut().play(clips::JUMP, true);
        Ok(())
    }

    fn execute(&mut self, ctx: &mut S) -> Result<PlayerTransition> {
        self.loops += 1;
        ctx.body_mut().set_acceleration(Vec2::ZERO);

        let input = ctx.input();
        let fire = input.is_down(Action::Fire);
        let up = input.is_down(Action::Up);
        let left = input.is_down(Action::Left);
        let right = input.is_down(Action::Right);

        self.shoot.observe(fire);
        if self.shoot.ready(fire) {
            self.shoot.consume();
            ctx.sprite_mut().set_frame(frames::AIR_SHOT);
            shoot_bullet(ctx)?;
            return Ok(Transition::Stay);
        }

        if ctx.body().on_floor() {
            return Ok(Transition::Go(Id::Idle));
        }

        let tuning = ctx.tuning();
        let (lift, max_loops, accel, max_speed) = (
            tuning.drift_lift,
            tuning.drift_max_loops,
            tuning.drift_accel,
            tuning.max_speed,
        );

        if up && self.loops <= max_loops {
            ctx.body_mut().set_velocity_y(-lift);
        }

        let under_cap = ctx.body().velocity().x.abs() < max_speed;
        if left {
            ctx.sprite_mut().set_flip_x(true);
            if under_cap {
                ctx.body_mut().set_acceleration_x(-accel);
            }
        } else if right {
            ctx.sprite_mut().set_flip_x(false);
            if under_cap {
                ctx.body_mut().set_acceleration_x(accel);
            }
        }
        Ok(Transition::Stay)
    }

    fn exit(&mut self, ctx: &mut S) -> Result<()> {
        if let Some(standing) = self.saved_hitbox.take() {
            ctx.body_mut().set_hitbox(standing);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Walk
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Walk {
    jump: EdgeArm,
    shoot: EdgeArm,
}

impl<S: PlayerStage + ?Sized> State<Id, S, Entry, PlayerEvent> for Walk {
    fn enter(&mut self, ctx: &mut S, _args: Entry) -> Result<()> {
        let input = ctx.input();
        self.jump.reset(input.is_down(Action::Up));
        self.shoot.reset(input.is_down(Action::Fire));
        Ok(())
    }

    fn execute(&mut self, ctx: &mut S) -> Result<PlayerTransition> {
        ctx.body_mut().set_acceleration_x(0.0);
        ctx.sprite_mut().play(clips::RUNNING, true);

        let input = ctx.input();
        let left = input.is_down(Action::Left);
        let right = input.is_down(Action::Right);
        let up = input.is_down(Action::Up);
        let down = input.is_down(Action::Down);
        let fire = input.is_down(Action::Fire);

        self.jump.observe(up);
        self.shoot.observe(fire);

        let tuning = ctx.tuning();
        let (accel, max_speed) = (tuning.walk_accel, tuning.max_speed);
        let under_cap = ctx.body().velocity().x.abs() < max_speed;

        if left {
            ctx.sprite_mut().set_flip_x(true);
            if under_cap {
                ctx.body_mut().set_acceleration_x(-accel);
            }
        }
        if right {
            ctx.sprite_mut().set_flip_x(false);
            if under_cap {
                ctx.body_mut().set_acceleration_x(accel);
            }
        }

        if !left && !right && !up {
            return Ok(Transition::Go(Id::Idle));
        }
        if self.jump.ready(up) {
            return Ok(Transition::Go(Id::Jump));
        }
        if down && ctx.body().velocity().x.abs() > ctx.tuning().slide_min_speed {
            return Ok(Transition::Go(Id::Slide));
        }
        if (left || right) && self.shoot.ready(fire) {
            return Ok(Transition::Go(Id::WalkShoot));
        }
        Ok(Transition::Stay)
    }
}

// ---------------------------------------------------------------------------
// WalkShoot
// ---------------------------------------------------------------------------

/// Running shot: the bullet leaves on a specific frame of `run_shoot`.
#[derive(Debug, Default)]
pub struct WalkShoot;

impl<S: PlayerStage + ?Sized> State<Id, S, Entry, PlayerEvent> for WalkShoot {
    fn enter(&mut self, ctx: &mut S, _args: Entry) -> Result<()> {
        let drag = ctx.tuning().ground_drag;
        let body = ctx.body_mut();
        body.set_acceleration(Vec2::ZERO);
        body.set_drag(drag);
        ctx.sprite_mut().play(clips::RUN_SHOOT, true);
        Ok(())
    }

    fn execute(&mut self, ctx: &mut S) -> Result<PlayerTransition> {
        ctx.body_mut().set_acceleration_x(0.0);

        let input = ctx.input();
        let wants_left = if input.is_down(Action::Left) {
            true
        } else if input.is_down(Action::Right) {
            false
        } else {
            return Ok(Transition::Go(Id::Idle));
        };

        if wants_left != ctx.sprite().flip_x() {
            ctx.sprite_mut().stop();
            return Ok(Transition::Go(Id::Walk));
        }

        ctx.sprite_mut().play(clips::RUN_SHOOT, true);

        let tuning = ctx.tuning();
        let (accel, max_speed) = (tuning.walk_accel, tuning.max_speed);
        if ctx.body().velocity().x.abs() < max_speed {
            let sign = if wants_left { -1.0 } else { 1.0 };
            ctx.body_mut().set_acceleration_x(sign * accel);
        }

        if ctx.sprite().frame_name() == frames::RUN_SHOT_FIRE {
            shoot_bullet(ctx)?;
            return Ok(Transition::Go(Id::Idle));
        }
        Ok(Transition::Stay)
    }
}

// ---------------------------------------------------------------------------
// Slide
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Slide {
    saved_hitbox: Option<Hitbox>,
}

impl<S: PlayerStage + ?Sized> State<Id, S, Entry, PlayerEvent> for Slide {
    fn enter(&mut self, ctx: &mut S, _args: Entry) -> Result<()> {
        let tuning = ctx.tuning();
        let (drag, size_delta, offset, max_speed, boost) = (
            tuning.slide_drag,
            tuning.slide_hitbox_delta,
            tuning.slide_offset,
            tuning.slide_max_speed,
            tuning.slide_boost,
        );

        let body = ctx.body_mut();
        body.set_acceleration(Vec2::ZERO);
        body.set_drag(drag);

        // Crouched silhouette.
        let standing = body.hitbox();
        body.set_hitbox(standing.resized(size_delta, offset));
        self.saved_hitbox = Some(standing);

        let vx = body.velocity().x;
        if vx != 0.0 && vx.abs() < max_speed {
            body.set_velocity_x(vx + vx.signum() * boost);
        }

        ctx.sprite_mut().play(clips::SLIDE, true);
        Ok(())
    }

    fn execute(&mut self, ctx: &mut S) -> Result<PlayerTransition> {
        let input = ctx.input();
        if input.is_down(Action::Up) {
            return Ok(Transition::Go(Id::Jump));
        }

        let stalled = ctx.body().velocity().x.abs() <= ctx.tuning().slide_min_speed;
        if ctx.input().is_up(Action::Down) || stalled {
            return Ok(Transition::Go(Id::Idle));
        }
        Ok(Transition::Stay)
    }

    fn exit(&mut self, ctx: &mut S) -> Result<()> {
        if let Some(standing) = self.saved_hitbox.take() {
            stand_up(ctx.body_mut(), standing);
        }
        Ok(())
    }
}
