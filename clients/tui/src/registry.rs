use std::collections::BTreeMap;

/// Every game shown in the carousel, playable or not
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GameId {
    Snake,
    RockPaperScissor,
    MathQuiz,
    Blackjack,
}

impl GameId {
    pub const ALL: [GameId; 4] = [
        GameId::Blackjack,
        GameId::Snake,
        GameId::RockPaperScissor,
        GameId::MathQuiz,
    ];

    /// Key used by the score store
    pub fn as_str(&self) -> &'static str {
        match self {
            GameId::Snake => "snake",
            GameId::RockPaperScissor => "rockpaperscissor",
            GameId::MathQuiz => "mathquiz",
            GameId::Blackjack => "blackjack",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GameId::Snake => "Snake",
            GameId::RockPaperScissor => "Rock Paper Scissors",
            GameId::MathQuiz => "Math Quiz",
            GameId::Blackjack => "BlackJack",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameId::Snake => "Steer the snake, eat and grow without biting your own tail.",
            GameId::RockPaperScissor => "Pick a hand, the house picks one at random, a winner is declared.",
            GameId::MathQuiz => "Quick random sums and differences against the clock.",
            GameId::Blackjack => {
                "Get closer to 21 than the dealer without going over. Bets come from your coins."
            }
        }
    }
}

/// Screens of the hub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Blackjack,
    Rankings,
    Settings,
}

impl Screen {
    /// Screens reachable from the tab bar
    pub const TABS: [Screen; 3] = [Screen::Home, Screen::Rankings, Screen::Settings];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Blackjack => "BlackJack",
            Screen::Rankings => "Rankings",
            Screen::Settings => "Settings",
        }
    }
}

pub trait Navigator {
    fn navigate(&mut self, screen: Screen);
}

/// A game the hub can launch
pub trait Game {
    fn id(&self) -> GameId;

    fn name(&self) -> &str;

    fn start(&self, navigator: &mut dyn Navigator);

    fn stop(&self);
}

pub struct BlackjackGame;

impl Game for BlackjackGame {
    fn id(&self) -> GameId {
        GameId::Blackjack
    }

    fn name(&self) -> &str {
        "BlackJack"
    }

    fn start(&self, navigator: &mut dyn Navigator) {
        navigator.navigate(Screen::Blackjack);
    }

    fn stop(&self) {
        log::info!("{} stopped", self.name());
    }
}

/// The games that can actually be played, by id
#[derive(Default)]
pub struct GameRegistry {
    games: BTreeMap<GameId, Box<dyn Game>>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every game this client ships
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(BlackjackGame));
        registry
    }

    pub fn register(&mut self, game: Box<dyn Game>) {
        self.games.insert(game.id(), game);
    }

    pub fn is_playable(&self, id: GameId) -> bool {
        self.games.contains_key(&id)
    }

    /// Launch a game. Unknown ids are logged and ignored.
    pub fn start_game(&self, id: GameId, navigator: &mut dyn Navigator) -> bool {
        match self.games.get(&id) {
            Some(game) => {
                log::info!("Starting {}", game.name());
                game.start(navigator);
                true
            }
            None => {
                log::warn!(
                    "The game with ID \"{}\" was not found in the list of playable games",
                    id.as_str()
                );
                false
            }
        }
    }

    pub fn stop_game(&self, id: GameId) {
        if let Some(game) = self.games.get(&id) {
            game.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        visited: Vec<Screen>,
    }

    impl Navigator for Recorder {
        fn navigate(&mut self, screen: Screen) {
            self.visited.push(screen);
        }
    }

    #[test]
    fn test_blackjack_is_playable() {
        let registry = GameRegistry::with_defaults();
        let mut nav = Recorder::default();

        assert!(registry.is_playable(GameId::Blackjack));
        assert!(registry.start_game(GameId::Blackjack, &mut nav));
        assert_eq!(nav.visited, vec![Screen::Blackjack]);
    }

    #[test]
    fn test_unregistered_game_does_not_navigate() {
        let registry = GameRegistry::with_defaults();
        let mut nav = Recorder::default();

        assert!(!registry.is_playable(GameId::Snake));
        assert!(!registry.start_game(GameId::Snake, &mut nav));
        assert!(nav.visited.is_empty());
    }

    #[test]
    fn test_empty_registry() {
        let registry = GameRegistry::new();
        let mut nav = Recorder::default();
        assert!(!registry.start_game(GameId::Blackjack, &mut nav));
    }

    #[test]
    fn test_score_keys() {
        assert_eq!(GameId::RockPaperScissor.as_str(), "rockpaperscissor");
        assert_eq!(GameId::Blackjack.as_str(), "blackjack");
    }
}
