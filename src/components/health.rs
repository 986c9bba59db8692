use crate::engine::Health;
use crate::error::{GameError, Result};

/// Player health, mirrored onto the HUD bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vitality {
    health: u32,
    max: u32,
    alive: bool,
    /// Set while a damage reaction is playing; hits are ignored meanwhile.
    hurt: bool,
}

impl Vitality {
    pub fn new(max: u32) -> Self {
        Self {
            health: max,
            max,
            alive: max > 0,
            hurt: false,
        }
    }

    /// Overwrite health directly. Only `1..=max` is accepted, and only while
    /// alive; a defeated actor stays at zero.
    pub fn set_health(&mut self, value: i32) -> Result<()> {
        match u32::try_from(value) {
            Ok(v) if self.alive && (1..=self.max).contains(&v) => {
                self.health = v;
                Ok(())
            }
            _ => Err(GameError::InvalidHealthValue { value, max: self.max }),
        }
    }

    /// Frame name of the health bar sprite for the current value.
    pub fn bar_frame(&self) -> String {
        format!("hbar{}", self.health)
    }
}

impl Health for Vitality {
    fn health(&self) -> u32 {
        self.health
    }

    fn alive(&self) -> bool {
        self.alive
    }

    fn reduce(&mut self, amount: i32) {
        if self.hurt || !self.alive {
            return;
        }

        let next = i64::from(self.health) - i64::from(amount);
        if next <= 0 {
            self.health = 0;
            self.alive = false;
        } else {
            self.health = next.min(i64::from(self.max)) as u32;
        }
    }

    fn is_hurt(&self) -> bool {
        self.hurt
    }

    fn set_hurt(&mut self, hurt: bool) {
        self.hurt = hurt;
    }
}
