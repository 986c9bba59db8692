//! The player's state set and the context it runs against.
//!
//! Every state is a small struct owning its transient fields; `enter`
//! re-initialises them each activation. Hitbox changes made on `enter` are
//! undone in `exit`, so no state ever cleans up after another.

mod damage;
mod locomotion;

pub use damage::{AirDamage, Defeated, GroundDamage, SlideDamage};
pub use locomotion::{Drift, Idle, Jump, Slide, Teleport, Walk, WalkShoot};

use glam::Vec2;

use crate::config::Tuning;
use crate::engine::input::InputSnapshot;
use crate::engine::{Body, Health, Hitbox, ProjectileSink, Sprite};
use crate::fsm::{StateMachine, Transition};

/// All discrete states the player can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerStateId {
    /// Beam-in at scene start.
    Teleport,
    Idle,
    Walk,
    /// First frame(s) after leaving the ground.
    Jump,
    /// Airborne with lateral control and a short lift window.
    Drift,
    Slide,
    WalkShoot,
    GroundDamage,
    SlideDamage,
    AirDamage,
    /// Terminal: health reached zero.
    Defeated,
}

/// Which damage reaction a hit triggers from `state`.
///
/// `None` means the hit is ignored: the player is already reacting to one,
/// is still beaming in, or is defeated.
pub fn damage_state_for(state: PlayerStateId) -> Option<PlayerStateId> {
    use PlayerStateId::*;
    match state {
        Idle | Walk | WalkShoot => Some(GroundDamage),
        Slide => Some(SlideDamage),
        Jump | Drift => Some(AirDamage),
        Teleport | GroundDamage | SlideDamage | AirDamage | Defeated => None,
    }
}

/// Extra arguments handed to a state's `enter`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Entry {
    #[default]
    Normal,
    /// Entering a damage reaction; `damage` is taken off health.
    Hit { damage: i32 },
}

/// Events delivered to the active state at the start of a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    AnimationComplete(String),
}

/// Everything a player state may touch during a frame.
pub trait PlayerStage {
    fn input(&self) -> &InputSnapshot;
    fn tuning(&self) -> &Tuning;

    fn body(&self) -> &dyn Body;
    fn body_mut(&mut self) -> &mut dyn Body;

    fn sprite(&self) -> &dyn Sprite;
    fn sprite_mut(&mut self) -> &mut dyn Sprite;

    fn health(&self) -> &dyn Health;
    fn health_mut(&mut self) -> &mut dyn Health;

    /// The group player bullets spawn into, if the scene made one.
    fn projectiles(&mut self) -> Option<&mut dyn ProjectileSink>;
}

pub type PlayerTransition = Transition<PlayerStateId, Entry>;

/// FSM driving the player.
pub type PlayerFsm<S> = StateMachine<PlayerStateId, S, Entry, PlayerEvent>;

/// Player machine starting with the teleport beam-in.
pub fn player_fsm<S: PlayerStage + ?Sized>() -> PlayerFsm<S> {
    player_fsm_from(PlayerStateId::Teleport)
}

/// Player machine with every state registered, starting in `initial`.
pub fn player_fsm_from<S: PlayerStage + ?Sized>(initial: PlayerStateId) -> PlayerFsm<S> {
    use PlayerStateId as Id;
    StateMachine::new(initial)
        .with_state(Id::Teleport, Teleport)
        .with_state(Id::Idle, Idle::default())
        .with_state(Id::Walk, Walk::default())
        .with_state(Id::Jump, Jump)
        .with_state(Id::Drift, Drift::default())
        .with_state(Id::Slide, Slide::default())
        .with_state(Id::WalkShoot, WalkShoot)
        .with_state(Id::GroundDamage, GroundDamage)
        .with_state(Id::SlideDamage, SlideDamage::default())
        .with_state(Id::AirDamage, AirDamage)
        .with_state(Id::Defeated, Defeated)
}

/// Put the standing box back. A grounded body is raised by however much
/// lower the standing box reaches, so it ends up on the floor, not in it.
fn stand_up(body: &mut dyn Body, standing: Hitbox) {
    let current = body.hitbox();
    body.set_hitbox(standing);
    if !body.on_floor() {
        return;
    }
    let reach = (standing.offset.y + standing.size.y) - (current.offset.y + current.size.y);
    if reach > 0.0 {
        let position = body.position();
        body.set_position(position - Vec2::new(0.0, reach));
    }
}

/// Single-press detector over a level-triggered key: arms when the key is
/// seen up, fires once when it is then seen down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeArm {
    armed: bool,
}

impl EdgeArm {
    /// Re-initialise on state entry; armed only if the key is currently up.
    pub fn reset(&mut self, key_down: bool) {
        self.armed = !key_down;
    }

    pub fn observe(&mut self, key_down: bool) {
        if !key_down {
            self.armed = true;
        }
    }

    pub fn ready(&self, key_down: bool) -> bool {
        self.armed && key_down
    }

    pub fn consume(&mut self) {
        self.armed = false;
    }
}
