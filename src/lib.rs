//! Platformer player core: a table-driven state machine for the player,
//! a patrol enemy and the headless scene that runs them at a fixed 60 Hz.

pub mod app;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod fsm;
pub mod player;
pub mod scene;
pub mod systems;

pub use app::{FrameReport, GameApp};
pub use config::GameConfig;
pub use error::{GameError, Result};
