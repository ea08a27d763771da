use serde::{Deserialize, Serialize};

/// Effects the table plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    Draw,
    Flip,
    Win,
    Lose,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::Draw,
        SoundEffect::Flip,
        SoundEffect::Win,
        SoundEffect::Lose,
    ];

    /// Resource name the effect is loaded from
    pub fn resource(&self) -> &'static str {
        match self {
            SoundEffect::Draw => "draw",
            SoundEffect::Flip => "flip_card",
            SoundEffect::Win => "success_sound",
            SoundEffect::Lose => "fail_sound",
        }
    }
}

/// Native sound playback. Calls are fire-and-forget: implementations log
/// their own failures and never report them back.
pub trait SoundPlayer {
    fn load_sound(&mut self, key: &str, resource: &str);

    fn play_sound(&mut self, key: &str);

    fn unload_sound(&mut self, key: &str);

    fn load_effects(&mut self) {
        for effect in SoundEffect::ALL {
            self.load_sound(effect.resource(), effect.resource());
        }
    }

    fn unload_effects(&mut self) {
        for effect in SoundEffect::ALL {
            self.unload_sound(effect.resource());
        }
    }

    fn play(&mut self, effect: SoundEffect) {
        self.play_sound(effect.resource());
    }
}

/// Plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn load_sound(&mut self, _key: &str, _resource: &str) {}

    fn play_sound(&mut self, _key: &str) {}

    fn unload_sound(&mut self, _key: &str) {}
}

/// Remembers every played key; used by tests
#[derive(Debug, Clone, Default)]
pub struct RecordingSound {
    pub played: Vec<String>,
}

impl RecordingSound {
    pub fn count(&self, effect: SoundEffect) -> usize {
        self.played.iter().filter(|k| *k == effect.resource()).count()
    }
}

impl SoundPlayer for RecordingSound {
    fn load_sound(&mut self, _key: &str, _resource: &str) {}

    fn play_sound(&mut self, key: &str) {
        self.played.push(key.to_string());
    }

    fn unload_sound(&mut self, _key: &str) {}
}
