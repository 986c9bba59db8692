use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "sdl")]
use sdl2::keyboard::Scancode;

/// The five game actions the player states react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    /// Jump.
    Up,
    /// Crouch / slide.
    Down,
    Fire,
}

impl Action {
    pub const ALL: [Action; 5] = [Action::Left, Action::Right, Action::Up, Action::Down, Action::Fire];

    pub fn name(self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Right => "right",
            Action::Up => "up",
            Action::Down => "down",
            Action::Fire => "fire",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown action `{s}`"))
    }
}

/// Level-triggered key state for one frame.
///
/// States derive edges themselves (arming on an "up" observation) so a held
/// key never fires twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: HashSet<Action>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, action: Action) -> Self {
        self.held.insert(action);
        self
    }

    pub fn from_actions(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            held: actions.into_iter().collect(),
        }
    }

    pub fn press(&mut self, action: Action) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    pub fn is_down(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    pub fn is_up(&self, action: Action) -> bool {
        !self.is_down(action)
    }

    pub fn any_down(&self, actions: &[Action]) -> bool {
        actions.iter().any(|&a| self.is_down(a))
    }

    /// Map held SDL scancodes (arrow keys + space) onto actions.
    #[cfg(feature = "sdl")]
    pub fn from_scancodes(keys: &HashSet<Scancode>) -> Self {
        let held = keys
            .iter()
            .filter_map(|sc| match sc {
                Scancode::Left => Some(Action::Left),
                Scancode::Right => Some(Action::Right),
                Scancode::Up => Some(Action::Up),
                Scancode::Down => Some(Action::Down),
                Scancode::Space => Some(Action::Fire),
                _ => None,
            })
            .collect();
        Self { held }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_tracks_held_actions() {
        let mut input = InputSnapshot::new().with(Action::Right);
        assert!(input.is_down(Action::Right));
        assert!(input.is_up(Action::Left));

        input.press(Action::Fire);
        input.release(Action::Right);
        assert!(input.any_down(&[Action::Left, Action::Fire]));
        assert!(!input.any_down(&[Action::Left, Action::Right]));
    }

    #[test]
    fn actions_parse_case_insensitively() {
        assert_eq!("FIRE".parse::<Action>(), Ok(Action::Fire));
        assert_eq!("left".parse::<Action>(), Ok(Action::Left));
        assert!("jump".parse::<Action>().is_err());
    }

    #[cfg(feature = "sdl")]
    #[test]
    fn scancodes_map_to_actions() {
        let keys: HashSet<Scancode> = [Scancode::Left, Scancode::Space, Scancode::W].into_iter().collect();
        let input = InputSnapshot::from_scancodes(&keys);
        assert_eq!(input, InputSnapshot::from_actions([Action::Left, Action::Fire]));
    }
}
