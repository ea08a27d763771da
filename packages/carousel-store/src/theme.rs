use crate::persist::{load_state, save_state};
use crate::storage::Storage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    LightTheme,
    DarkTheme,
}

impl Theme {
    /// Guess from the terminal's `COLORFGBG` ("fg;bg"); dark unless the
    /// background is a light color.
    pub fn from_env() -> Self {
        Self::from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
    }

    pub fn from_colorfgbg(value: Option<&str>) -> Self {
        let background = value
            .and_then(|v| v.rsplit(';').next())
            .and_then(|bg| bg.trim().parse::<u8>().ok());
        match background {
            Some(7) | Some(15) => Theme::LightTheme,
            _ => Theme::DarkTheme,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::LightTheme => Theme::DarkTheme,
            Theme::DarkTheme => Theme::LightTheme,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::LightTheme => "Light",
            Theme::DarkTheme => "Dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ThemeState {
    theme: Theme,
}

#[derive(Debug)]
pub struct ThemeStore<S: Storage> {
    state: ThemeState,
    storage: S,
}

impl<S: Storage> ThemeStore<S> {
    pub const KEY: &'static str = "themeStore";

    /// Saved theme, or the terminal's own scheme on first launch
    pub fn load(storage: S) -> Self {
        Self::load_or(storage, Theme::from_env())
    }

    pub fn load_or(storage: S, initial: Theme) -> Self {
        let state = load_state(&storage, Self::KEY).unwrap_or(ThemeState { theme: initial });
        Self { state, storage }
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
        self.save();
    }

    pub fn toggle(&mut self) -> Theme {
        self.set_theme(self.state.theme.toggled());
        self.state.theme
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn save(&mut self) {
        save_state(&mut self.storage, Self::KEY, &self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    #[test]
    fn test_colorfgbg_detection() {
        assert_eq!(Theme::from_colorfgbg(Some("0;15")), Theme::LightTheme);
        assert_eq!(Theme::from_colorfgbg(Some("0;7")), Theme::LightTheme);
        assert_eq!(Theme::from_colorfgbg(Some("15;0")), Theme::DarkTheme);
        assert_eq!(Theme::from_colorfgbg(Some("15;default;0")), Theme::DarkTheme);
        assert_eq!(Theme::from_colorfgbg(Some("garbage")), Theme::DarkTheme);
        assert_eq!(Theme::from_colorfgbg(None), Theme::DarkTheme);
    }

    #[test]
    fn test_initial_theme_used_until_saved() {
        let store = ThemeStore::load_or(MemoryStorage::new(), Theme::LightTheme);
        assert_eq!(store.theme(), Theme::LightTheme);
    }

    #[test]
    fn test_saved_theme_wins_over_initial() {
        let mut store = ThemeStore::load_or(MemoryStorage::new(), Theme::LightTheme);
        assert_eq!(store.toggle(), Theme::DarkTheme);

        let reloaded = ThemeStore::load_or(store.into_storage(), Theme::LightTheme);
        assert_eq!(reloaded.theme(), Theme::DarkTheme);
    }

    #[test]
    fn test_set_theme() {
        let mut store = ThemeStore::load_or(MemoryStorage::new(), Theme::DarkTheme);
        store.set_theme(Theme::LightTheme);
        assert_eq!(store.theme(), Theme::LightTheme);
        store.set_theme(Theme::LightTheme);
        assert_eq!(store.theme(), Theme::LightTheme);
    }
}
