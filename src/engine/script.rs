//! Scripted input for headless runs.
//!
//! A script is a comma-separated list of segments. Each segment is a
//! `+`-joined set of actions (or `-` for no keys), optionally followed by
//! `*N` to hold it for `N` frames:
//!
//! ```text
//! -*70, right*30, right+fire*2, right*10, up*20, -*60
//! ```

use std::str::FromStr;

use super::input::{Action, InputSnapshot};
use crate::error::GameError;

#[derive(Debug, Clone, PartialEq)]
pub struct InputScript {
    segments: Vec<(InputSnapshot, u32)>,
}

impl InputScript {
    /// Total frames covered by the script.
    pub fn len(&self) -> u32 {
        self.segments.iter().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Input for `frame`; past the end nothing is held.
    pub fn at(&self, frame: u32) -> InputSnapshot {
        let mut remaining = frame;
        for (snapshot, count) in &self.segments {
            if remaining < *count {
                return snapshot.clone();
            }
            remaining -= count;
        }
        InputSnapshot::new()
    }

    /// One snapshot per frame.
    pub fn frames(&self) -> impl Iterator<Item = InputSnapshot> + '_ {
        self.segments
            .iter()
            .flat_map(|(snapshot, count)| std::iter::repeat(snapshot.clone()).take(*count as usize))
    }
}

impl FromStr for InputScript {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = Vec::new();
        for raw in s.split(',').map(str::trim).filter(|seg| !seg.is_empty()) {
            let (keys, count) = match raw.split_once('*') {
                Some((keys, count)) => {
                    let count = count.trim().parse::<u32>().map_err(|_| {
                        GameError::Script(format!("bad repeat count in `{raw}`"))
                    })?;
                    (keys.trim(), count)
                }
                None => (raw, 1),
            };

            let snapshot = if keys == "-" {
                InputSnapshot::new()
            } else {
                let actions = keys
                    .split('+')
                    .map(|name| name.trim().parse::<Action>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(GameError::Script)?;
                InputSnapshot::from_actions(actions)
            };
            segments.push((snapshot, count));
        }
        Ok(Self { segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_expand_to_frames() {
        let script: InputScript = "-*2, right+fire*3, up".parse().unwrap();
        assert_eq!(script.len(), 6);

        let frames: Vec<_> = script.frames().collect();
        assert_eq!(frames.len(), 6);
        assert_eq!(frames[0], InputSnapshot::new());
        assert!(frames[2].is_down(Action::Right) && frames[2].is_down(Action::Fire));
        assert_eq!(frames[5], InputSnapshot::new().with(Action::Up));
    }

    #[test]
    fn at_returns_empty_input_past_the_end() {
        let script: InputScript = "left*2".parse().unwrap();
        assert!(script.at(1).is_down(Action::Left));
        assert_eq!(script.at(2), InputSnapshot::new());
    }

    #[test]
    fn empty_script_has_no_frames() {
        let script: InputScript = "".parse().unwrap();
        assert!(script.is_empty());
    }

    #[test]
    fn malformed_segments_are_rejected() {
        assert!(matches!("left*x".parse::<InputScript>(), Err(GameError::Script(_))));
        assert!(matches!("left+kick".parse::<InputScript>(), Err(GameError::Script(_))));
    }
}
