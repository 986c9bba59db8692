use glam::Vec2;
use tracing::{debug, info};

use super::{stand_up, Entry, PlayerEvent, PlayerStage, PlayerStateId as Id, PlayerTransition};
use crate::engine::animation::{clips, frames};
use crate::engine::{Body, Health, Hitbox, Sprite};
use crate::error::Result;
use crate::fsm::{State, Transition};

fn take_hit<S: PlayerStage + ?Sized>(ctx: &mut S, args: Entry) {
    let damage = match args {
        Entry::Hit { damage } => damage,
        Entry::Normal => ctx.tuning().hit_damage,
    };
    ctx.body_mut().set_acceleration(Vec2::ZERO);

    let health = ctx.health_mut();
    health.reduce(damage);
    health.set_hurt(true);
    debug!(damage, health = health.health(), alive = health.alive(), "player hit");
}

/// Close the hurt window and pick where the reaction hands over to.
fn recover<S: PlayerStage + ?Sized>(ctx: &mut S, to: Id) -> PlayerTransition {
    let health = ctx.health_mut();
    health.set_hurt(false);
    if health.alive() {
        Transition::Go(to)
    } else {
        Transition::Go(Id::Defeated)
    }
}

fn completed(event: &PlayerEvent, clip: &str) -> bool {
    let PlayerEvent::AnimationComplete(done) = event;
    done == clip
}

// ---------------------------------------------------------------------------

/// Knocked back while standing or running: pinned in place until the clip ends.
#[derive(Debug, Default)]
pub struct GroundDamage;

impl<S: PlayerStage + ?Sized> State<Id, S, Entry, PlayerEvent> for GroundDamage {
    fn enter(&mut self, ctx: &mut S, args: Entry) -> Result<()> {
        ctx.body_mut().set_velocity_x(0.0);
        take_hit(ctx, args);
        ctx.sprite_mut().play(clips::GROUND_DAMAGE, false);
        Ok(())
    }

    fn execute(&mut self, ctx: &mut S) -> Result<PlayerTransition> {
        ctx.body_mut().set_velocity_x(0.0);
        Ok(Transition::Stay)
    }

    fn on_event(&mut self, ctx: &mut S, event: &PlayerEvent) -> Result<PlayerTransition> {
        Ok(if completed(event, clips::GROUND_DAMAGE) {
            recover(ctx, Id::Idle)
        } else {
            Transition::Stay
        })
    }
}

/// Hit mid-slide. Keeps the crouched box until the player is back on
/// their feet in the clip.
#[derive(Debug, Default)]
pub struct SlideDamage {
    saved_hitbox: Option<Hitbox>,
}

impl SlideDamage {
    fn rise<S: PlayerStage + ?Sized>(&mut self, ctx: &mut S) {
        if let Some(standing) = self.saved_hitbox.take() {
            stand_up(ctx.body_mut(), standing);
        }
    }
}

impl<S: PlayerStage + ?Sized> State<Id, S, Entry, PlayerEvent> for SlideDamage {
    fn enter(&mut self, ctx: &mut S, args: Entry) -> Result<()> {
        take_hit(ctx, args);

        let tuning = ctx.tuning();
        let (size_delta, offset) = (tuning.slide_hitbox_delta, tuning.slide_offset);
        let body = ctx.body_mut();
        let standing = body.hitbox();
        body.set_hitbox(standing.resized(size_delta, offset));
        self.saved_hitbox = Some(standing);

        ctx.sprite_mut().play(clips::SLIDE_DAMAGE, false);
        Ok(())
    }

    fn execute(&mut self, ctx: &mut S) -> Result<PlayerTransition> {
        if ctx.sprite().frame_name() == frames::SLIDE_DAMAGE_RISE {
            self.rise(ctx);
        }
        Ok(Transition::Stay)
    }

    fn exit(&mut self, ctx: &mut S) -> Result<()> {
        self.rise(ctx);
        Ok(())
    }

    fn on_event(&mut self, ctx: &mut S, event: &PlayerEvent) -> Result<PlayerTransition> {
        Ok(if completed(event, clips::SLIDE_DAMAGE) {
            recover(ctx, Id::Idle)
        } else {
            Transition::Stay
        })
    }
}

/// Hit while airborne; falls back into Drift so the player keeps steering.
#[derive(Debug, Default)]
pub struct AirDamage;

impl<S: PlayerStage + ?Sized> State<Id, S, Entry, PlayerEvent> for AirDamage {
    fn enter(&mut self, ctx: &mut S, args: Entry) -> Result<()> {
        take_hit(ctx, args);
        ctx.sprite_mut().play(clips::AIR_DAMAGE, false);
        Ok(())
    }

    fn execute(&mut self, _ctx: &mut S) -> Result<PlayerTransition> {
        Ok(Transition::Stay)
    }

    fn on_event(&mut self, ctx: &mut S, event: &PlayerEvent) -> Result<PlayerTransition> {
        Ok(if completed(event, clips::AIR_DAMAGE) {
            recover(ctx, Id::Drift)
        } else {
            Transition::Stay
        })
    }
}

/// Terminal state once health is gone. Ignores input and further hits.
#[derive(Debug, Default)]
pub struct Defeated;

impl<S: PlayerStage + ?Sized> State<Id, S, Entry, PlayerEvent> for Defeated {
    fn enter(&mut self, ctx: &mut S, _args: Entry) -> Result<()> {
        ctx.body_mut().stop();
        ctx.sprite_mut().set_frame(frames::DEFEATED);
        info!(position = ?ctx.body().position(), "player defeated");
        Ok(())
    }

    fn execute(&mut self, ctx: &mut S) -> Result<PlayerTransition> {
        ctx.body_mut().set_velocity_x(0.0);
        Ok(Transition::Stay)
    }
}
