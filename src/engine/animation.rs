use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use super::Sprite;

// ---------------------------------------------------------------------------
// Clip keys and notable frames
// ---------------------------------------------------------------------------

pub mod clips {
    pub const RUNNING: &str = "running";
    pub const STANDING: &str = "standing";
    pub const TELEPORT: &str = "teleport";
    pub const JUMP: &str = "jump";
    pub const SLIDE: &str = "slide";
    pub const SHOOT: &str = "shoot";
    pub const RUN_SHOOT: &str = "run_shoot";
    pub const GROUND_DAMAGE: &str = "ground_damage";
    pub const SLIDE_DAMAGE: &str = "slide_damage";
    pub const AIR_DAMAGE: &str = "air_damage";
    pub const LOB: &str = "lob";
}

pub mod frames {
    pub const STAND: &str = "stand001";
    pub const AIR_SHOT: &str = "jump006";
    /// The frame of `run_shoot` on which the shot leaves the cannon.
    pub const RUN_SHOT_FIRE: &str = "shoot007";
    /// The frame of `slide_damage` where the player is back on their feet.
    pub const SLIDE_DAMAGE_RISE: &str = "dam010";
    pub const DEFEATED: &str = "dam014";
    pub const LOBBER_REST: &str = "lobber001";
    pub const LOBBER_ARM: &str = "lobber002";
    pub const LOBBER_WIND_UP: &str = "lobber005";
    pub const LOBBER_FIRE: &str = "lobber006";
}

// ---------------------------------------------------------------------------
// Clips
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub frames: Vec<String>,
    pub frame_rate: f32,
    pub repeat: bool,
}

impl Clip {
    /// Frames named `prefix` + index zero-padded to three digits, inclusive.
    pub fn numbered(prefix: &str, start: u32, end: u32, frame_rate: f32) -> Self {
        Self {
            frames: (start..=end).map(|i| format!("{prefix}{i:03}")).collect(),
            frame_rate,
            repeat: false,
        }
    }

    pub fn looping(mut self) -> Self {
        self.repeat = true;
        self
    }

    fn frame_duration(&self) -> f32 {
        1.0 / self.frame_rate
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnimationLibrary {
    clips: HashMap<String, Clip>,
}

impl AnimationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clip(mut self, key: &str, clip: Clip) -> Self {
        self.clips.insert(key.to_string(), clip);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Clip> {
        self.clips.get(key)
    }

    /// Every clip the player and the lobber use.
    pub fn standard() -> Self {
        use clips::*;
        Self::new()
            .with_clip(RUNNING, Clip::numbered("run", 1, 12, 20.0))
            .with_clip(STANDING, Clip::numbered("stand", 1, 8, 8.0))
            .with_clip(TELEPORT, Clip::numbered("tel", 1, 13, 12.0))
            .with_clip(JUMP, Clip::numbered("jump", 1, 4, 12.0))
            .with_clip(SLIDE, Clip::numbered("slide", 1, 3, 8.0))
            .with_clip(SHOOT, Clip::numbered("shoot", 1, 3, 40.0))
            .with_clip(RUN_SHOOT, Clip::numbered("shoot", 4, 7, 18.0))
            .with_clip(GROUND_DAMAGE, Clip::numbered("dam", 1, 5, 10.0))
            .with_clip(SLIDE_DAMAGE, Clip::numbered("dam", 6, 10, 10.0))
            .with_clip(AIR_DAMAGE, Clip::numbered("dam", 11, 14, 10.0))
            .with_clip(LOB, Clip::numbered("lobber", 1, 7, 8.0))
    }
}

// ---------------------------------------------------------------------------
// SpriteState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Playback {
    key: String,
    index: usize,
    elapsed: f32,
}

/// Animation playhead plus facing for one sprite.
#[derive(Debug, Clone)]
pub struct SpriteState {
    library: Arc<AnimationLibrary>,
    playing: Option<Playback>,
    frame: String,
    flip_x: bool,
}

impl SpriteState {
    pub fn new(library: Arc<AnimationLibrary>, frame: &str) -> Self {
        Self {
            library,
            playing: None,
            frame: frame.to_string(),
            flip_x: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing.is_some()
    }

    /// Advance the playhead. Returns the key of a clip that finished during
    /// this tick; the last frame stays on screen afterwards.
    pub fn tick(&mut self, dt: f32) -> Option<String> {
        let playback = self.playing.as_mut()?;
        let Some(clip) = self.library.get(&playback.key) else {
            self.playing = None;
            return None;
        };

        playback.elapsed += dt;
        let step = clip.frame_duration();
        while playback.elapsed >= step {
            playback.elapsed -= step;
            playback.index += 1;
            if playback.index >= clip.frames.len() {
                if clip.repeat {
                    playback.index = 0;
                } else {
                    let done = playback.key.clone();
                    self.playing = None;
                    return Some(done);
                }
            }
            self.frame.clone_from(&clip.frames[playback.index]);
        }
        None
    }
}

impl Sprite for SpriteState {
    fn play(&mut self, key: &str, ignore_if_playing: bool) {
        if ignore_if_playing && self.current_clip() == Some(key) {
            return;
        }
        let Some(first) = self.library.get(key).and_then(|clip| clip.frames.first()) else {
            warn!(clip = key, "unknown animation clip");
            return;
        };
        self.frame.clone_from(first);
        self.playing = Some(Playback {
            key: key.to_string(),
            index: 0,
            elapsed: 0.0,
        });
    }

    fn stop(&mut self) {
        self.playing = None;
    }

    fn set_frame(&mut self, frame: &str) {
        self.playing = None;
        self.frame = frame.to_string();
    }

    fn frame_name(&self) -> &str {
        &self.frame
    }

    fn current_clip(&self) -> Option<&str> {
        self.playing.as_ref().map(|p| p.key.as_str())
    }

    fn flip_x(&self) -> bool {
        self.flip_x
    }

    fn set_flip_x(&mut self, flip: bool) {
        self.flip_x = flip;
    }
}
