use blackjack::{SoundEffect, SoundPlayer};
use std::collections::HashMap;
use std::io::Write;

/// Terminal stand-in for the native sound module.
///
/// Loaded keys map to their resource name. Playing logs the effect and, with
/// the bell enabled, rings the terminal bell for a win.
#[derive(Debug, Default)]
pub struct TerminalSound {
    loaded: HashMap<String, String>,
    bell: bool,
}

impl TerminalSound {
    pub fn new(bell: bool) -> Self {
        Self {
            loaded: HashMap::new(),
            bell,
        }
    }

    fn ring(&self) {
        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
            log::debug!("Bell failed: {e}");
        }
    }
}

impl SoundPlayer for TerminalSound {
    fn load_sound(&mut self, key: &str, resource: &str) {
        log::debug!("Loaded sound {key} from {resource}");
        self.loaded.insert(key.to_string(), resource.to_string());
    }

    fn play_sound(&mut self, key: &str) {
        let Some(resource) = self.loaded.get(key) else {
            log::warn!("Sound {key} is not loaded");
            return;
        };
        log::trace!("Playing {resource}");
        if self.bell && key == SoundEffect::Win.resource() {
            self.ring();
        }
    }

    fn unload_sound(&mut self, key: &str) {
        if self.loaded.remove(key).is_some() {
            log::debug!("Unloaded sound {key}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effects_load_and_unload() {
        let mut sound = TerminalSound::new(false);
        sound.load_effects();
        for effect in SoundEffect::ALL {
            assert!(sound.loaded.contains_key(effect.resource()));
        }
        sound.play(SoundEffect::Flip);

        sound.unload_effects();
        assert!(sound.loaded.is_empty());
        // Playing an unloaded key is ignored
        sound.play(SoundEffect::Flip);
    }
}
