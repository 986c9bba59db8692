mod animation;
mod collision;
mod enemy;
mod physics;
pub mod projectiles;

pub use animation::animation_system;
pub use collision::collision_system;
pub use enemy::lobber_system;
pub use physics::{physics_step, PhysicsParams};
pub use projectiles::{cull_projectiles, shoot_bullet, BulletGroup};
