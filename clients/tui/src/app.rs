use crate::registry::{GameId, GameRegistry, Navigator, Screen};
use crate::sound::TerminalSound;
use blackjack::{ActionError, RoundPhase, SoundPlayer, Table};
use carousel_store::{CoinStore, ScoreStore, Storage, ThemeStore};
use crossterm::event::KeyCode;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Log lines shown in the log pane
const MAX_LOGS: usize = 50;

pub type BlackjackTable<S> = Table<CoinStore<S>, TerminalSound>;

pub struct App<S: Storage> {
    pub screen: Screen,
    /// Index into `GameId::ALL` of the game under the carousel cursor
    pub selected_game: usize,
    registry: GameRegistry,
    pub table: BlackjackTable<S>,
    pub scores: ScoreStore<S>,
    pub theme: ThemeStore<S>,
    pub chip_index: usize,
    pub status: String,
    pub logs: Vec<String>,
    log_buffer: Arc<Mutex<Vec<String>>>,
    pub log_visible: bool,
    /// When the next queued table step becomes due
    next_step_at: Option<Instant>,
    /// The finished round was already written to the score store
    round_recorded: bool,
    pub should_quit: bool,
}

impl<S: Storage> App<S> {
    pub fn new(
        registry: GameRegistry,
        table: BlackjackTable<S>,
        scores: ScoreStore<S>,
        theme: ThemeStore<S>,
        log_buffer: Arc<Mutex<Vec<String>>>,
    ) -> Self {
        App {
            screen: Screen::Home,
            selected_game: 0,
            registry,
            table,
            scores,
            theme,
            chip_index: 0,
            status: home_hint().to_string(),
            logs: vec!["Welcome to Game Carousel!".to_string()],
            log_buffer,
            log_visible: true,
            next_step_at: None,
            round_recorded: false,
            should_quit: false,
        }
    }

    pub fn sync_logs(&mut self) {
        let messages: Vec<String> = if let Ok(mut buffer) = self.log_buffer.lock() {
            buffer.drain(..).collect()
        } else {
            Vec::new()
        };

        for msg in messages {
            self.add_log(msg);
        }
    }

    pub fn add_log(&mut self, message: String) {
        self.logs.push(message);
        if self.logs.len() > MAX_LOGS {
            self.logs.remove(0);
        }
    }

    pub fn selected_game(&self) -> GameId {
        GameId::ALL[self.selected_game % GameId::ALL.len()]
    }

    pub fn is_playable(&self, id: GameId) -> bool {
        self.registry.is_playable(id)
    }

    pub fn chips(&self) -> &[u64] {
        &self.table.rules().chips
    }

    pub fn selected_chip(&self) -> Option<u64> {
        self.chips().get(self.chip_index).copied()
    }

    // ── Input ──

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('l') => {
                self.log_visible = !self.log_visible;
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Home => self.handle_home_key(code),
            Screen::Blackjack => self.handle_table_key(code),
            Screen::Rankings => self.handle_rankings_key(code),
            Screen::Settings => self.handle_settings_key(code),
        }
    }

    fn handle_home_key(&mut self, code: KeyCode) {
        let count = GameId::ALL.len();
        match code {
            KeyCode::Left => self.selected_game = (self.selected_game + count - 1) % count,
            KeyCode::Right => self.selected_game = (self.selected_game + 1) % count,
            KeyCode::Enter => self.start_selected_game(),
            KeyCode::Tab => self.next_tab(),
            _ => {}
        }
    }

    fn handle_rankings_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Tab => self.next_tab(),
            KeyCode::Esc => self.navigate(Screen::Home),
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Tab => self.next_tab(),
            KeyCode::Esc => self.navigate(Screen::Home),
            KeyCode::Char('t') => {
                let theme = self.theme.toggle();
                self.status = format!("{} theme", theme.name());
            }
            KeyCode::Char('c') => {
                self.table.ledger_mut().reset_coins();
                log::info!("Coins reset");
                self.status = "Coins reset to 0".to_string();
            }
            KeyCode::Char('s') => {
                self.scores.reset_all_scores();
                log::info!("Best scores cleared");
                self.status = "Best scores cleared".to_string();
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, code: KeyCode) {
        if code == KeyCode::Esc {
            self.navigate(Screen::Home);
            return;
        }

        let result = match (self.table.phase(), code) {
            (RoundPhase::Betting, KeyCode::Left) => {
                self.chip_index = self.chip_index.saturating_sub(1);
                Ok(())
            }
            (RoundPhase::Betting, KeyCode::Right) => {
                if self.chip_index + 1 < self.chips().len() {
                    self.chip_index += 1;
                }
                Ok(())
            }
            (RoundPhase::Betting, KeyCode::Enter | KeyCode::Char(' ')) => match self.selected_chip() {
                Some(chip) => self.table.place_bet(chip),
                None => Ok(()),
            },
            (RoundPhase::Betting, KeyCode::Backspace) => match self.selected_chip() {
                Some(chip) => self.table.remove_bet(chip.min(self.table.current_bet())),
                None => Ok(()),
            },
            (RoundPhase::Betting, KeyCode::Char('c')) => self.table.clear_bet(),
            (RoundPhase::Betting, KeyCode::Char('r')) => self.table.rebet(),
            (RoundPhase::Betting, KeyCode::Char('d')) => self.deal(),
            (RoundPhase::Playing, KeyCode::Char('h') | KeyCode::Up) => self.hit(),
            (RoundPhase::Playing, KeyCode::Char('s') | KeyCode::Down) => self.stand(),
            (RoundPhase::Playing, KeyCode::Char('x') | KeyCode::Right) => self.table.double_down(),
            (RoundPhase::Playing, KeyCode::Char('p') | KeyCode::Left) => self.table.split(),
            (RoundPhase::Finished, KeyCode::Enter | KeyCode::Char('n')) => {
                self.new_round();
                Ok(())
            }
            _ => Ok(()),
        };

        match result {
            Ok(()) => self.status = self.table_hint(),
            Err(e) => self.status = e.to_string(),
        }
    }

    fn deal(&mut self) -> Result<(), ActionError> {
        self.table.start_round()?;
        self.round_recorded = false;
        Ok(())
    }

    fn hit(&mut self) -> Result<(), ActionError> {
        if self.table.round().is_split() {
            self.table.hit_split_hand()
        } else {
            self.table.hit()
        }
    }

    fn stand(&mut self) -> Result<(), ActionError> {
        if self.table.round().is_split() {
            self.table.stand_split_hand()
        } else {
            self.table.stand()
        }
    }

    fn new_round(&mut self) {
        self.table.reset();
        self.next_step_at = None;
        self.round_recorded = false;
    }

    fn start_selected_game(&mut self) {
        let id = self.selected_game();
        let registry = std::mem::take(&mut self.registry);
        let started = registry.start_game(id, self);
        self.registry = registry;
        if !started {
            self.status = format!("{} is coming soon", id.title());
        }
    }

    fn next_tab(&mut self) {
        let current = Screen::TABS.iter().position(|s| *s == self.screen).unwrap_or(0);
        let next = Screen::TABS[(current + 1) % Screen::TABS.len()];
        self.navigate(next);
    }

    // ── Time ──

    /// When the step waiting at the front of the table's queue falls due
    pub fn next_step_at(&self) -> Option<Instant> {
        self.next_step_at
    }

    /// Apply every table step that is due at `now`
    pub fn tick(&mut self, now: Instant) {
        while let Some(delay) = self.table.next_step_delay() {
            let due = *self.next_step_at.get_or_insert(now + delay);
            if now < due {
                break;
            }
            self.table.advance();
            self.next_step_at = None;
        }
        if self.table.is_busy() {
            return;
        }
        self.next_step_at = None;
        self.record_finished_round();
    }

    fn record_finished_round(&mut self) {
        if self.table.phase() != RoundPhase::Finished || self.round_recorded {
            return;
        }
        self.round_recorded = true;
        let balance = self.table.balance();
        self.scores.set_best_score(GameId::Blackjack.as_str(), balance);
        self.status = self.table_hint();
    }

    /// Leave the hub cleanly
    pub fn shutdown(&mut self) {
        if self.screen == Screen::Blackjack {
            self.navigate(Screen::Home);
        }
        self.table.sound_mut().unload_effects();
    }

    // ── Hints ──

    pub fn table_hint(&self) -> String {
        match self.table.phase() {
            RoundPhase::Betting => {
                "←/→ chip  Enter add  Backspace remove  [c]lear  [r]ebet  [d]eal  Esc leave".to_string()
            }
            RoundPhase::Playing if self.table.round().is_split() => {
                "[h]it  [s]tand on the active hand".to_string()
            }
            RoundPhase::Playing => {
                let mut hint = "[h]it  [s]tand".to_string();
                if self.table.can_double() {
                    hint.push_str("  [x] double");
                }
                if self.table.can_split() {
                    hint.push_str("  [p] split");
                }
                hint
            }
            RoundPhase::Dealer => "Dealer plays...".to_string(),
            RoundPhase::Finished => match self.table.result() {
                Some(result) => format!("{}  [n]ew round", result.message()),
                None => "[n]ew round".to_string(),
            },
        }
    }
}

fn home_hint() -> &'static str {
    "←/→ choose a game  Enter play  Tab switch tab  [l]og  [q]uit"
}

impl<S: Storage> Navigator for App<S> {
    fn navigate(&mut self, screen: Screen) {
        if self.screen == screen {
            return;
        }
        log::debug!("Navigating to {}", screen.title());
        if self.screen == Screen::Blackjack {
            self.registry.stop_game(GameId::Blackjack);
            self.new_round();
        }
        self.screen = screen;
        self.status = match screen {
            Screen::Home => home_hint().to_string(),
            Screen::Blackjack => self.table_hint(),
            Screen::Rankings => "Tab switch tab  Esc home".to_string(),
            Screen::Settings => "[t]heme  [c] reset coins  [s] reset scores  Esc home".to_string(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack::{Card, Rank, Shoe, Suit, TableRules};
    use carousel_store::{MemoryStorage, Theme};
    use std::time::Duration;

    fn app_with(rules: TableRules, deal: &[Rank]) -> App<MemoryStorage> {
        let cards = deal
            .iter()
            .rev()
            .map(|rank| Card::new(*rank, Suit::Clubs))
            .collect();
        let table = Table::new(
            rules,
            Shoe::stacked(cards, 1),
            CoinStore::load(MemoryStorage::new()),
            TerminalSound::new(false),
        );
        App::new(
            GameRegistry::with_defaults(),
            table,
            ScoreStore::load(MemoryStorage::new()),
            ThemeStore::load_or(MemoryStorage::new(), Theme::DarkTheme),
            Arc::new(Mutex::new(Vec::new())),
        )
    }

    fn press(app: &mut App<MemoryStorage>, codes: &[KeyCode]) {
        for code in codes {
            app.handle_key(*code);
        }
    }

    #[test]
    fn test_carousel_wraps() {
        let mut app = app_with(TableRules::instant(), &[]);
        assert_eq!(app.selected_game(), GameId::Blackjack);
        press(&mut app, &[KeyCode::Left]);
        assert_eq!(app.selected_game(), GameId::MathQuiz);
        press(&mut app, &[KeyCode::Right, KeyCode::Right]);
        assert_eq!(app.selected_game(), GameId::Snake);
    }

    #[test]
    fn test_start_game_from_carousel() {
        let mut app = app_with(TableRules::instant(), &[]);
        press(&mut app, &[KeyCode::Right, KeyCode::Enter]);
        assert_eq!(app.screen, Screen::Home);
        assert!(app.status.contains("coming soon"));

        press(&mut app, &[KeyCode::Left, KeyCode::Enter]);
        assert_eq!(app.screen, Screen::Blackjack);
    }

    #[test]
    fn test_tabs_cycle() {
        let mut app = app_with(TableRules::instant(), &[]);
        press(&mut app, &[KeyCode::Tab]);
        assert_eq!(app.screen, Screen::Rankings);
        press(&mut app, &[KeyCode::Tab]);
        assert_eq!(app.screen, Screen::Settings);
        press(&mut app, &[KeyCode::Tab]);
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn test_round_played_from_keys_records_best_score() {
        let mut app = app_with(
            TableRules::instant(),
            &[Rank::Ace, Rank::Nine, Rank::King, Rank::Seven],
        );
        press(&mut app, &[KeyCode::Enter]);
        // 50 chip
        press(&mut app, &[KeyCode::Right, KeyCode::Right, KeyCode::Enter]);
        assert_eq!(app.table.current_bet(), 50);

        press(&mut app, &[KeyCode::Char('d')]);
        assert_eq!(app.table.balance(), 50);
        app.tick(Instant::now());

        assert_eq!(app.table.phase(), RoundPhase::Finished);
        assert_eq!(app.table.balance(), 150);
        assert_eq!(app.scores.get_best_score("blackjack"), 150);
        assert!(app.status.starts_with("Won +50"));

        press(&mut app, &[KeyCode::Char('n')]);
        assert_eq!(app.table.phase(), RoundPhase::Betting);
    }

    #[test]
    fn test_steps_wait_for_their_delay() {
        let mut app = app_with(
            TableRules::default(),
            &[Rank::Ten, Rank::Nine, Rank::Four, Rank::Seven],
        );
        press(&mut app, &[KeyCode::Enter, KeyCode::Enter, KeyCode::Char('d')]);

        let start = Instant::now();
        app.tick(start);
        assert_eq!(app.table.round().single().unwrap().hand.len(), 1);
        assert!(app.table.round().dealer.is_empty());

        assert_eq!(app.next_step_at(), Some(start + Duration::from_millis(600)));

        app.tick(start + Duration::from_millis(300));
        assert!(app.table.round().dealer.is_empty());

        app.tick(start + Duration::from_millis(600));
        assert_eq!(app.table.round().dealer.len(), 1);

        while let Some(due) = app.next_step_at() {
            app.tick(due);
        }
        assert!(!app.table.is_busy());
        assert_eq!(app.next_step_at(), None);
    }

    #[test]
    fn test_leaving_the_table_cancels_the_round() {
        let mut app = app_with(
            TableRules::default(),
            &[Rank::Ten, Rank::Nine, Rank::Four, Rank::Seven],
        );
        press(&mut app, &[KeyCode::Enter, KeyCode::Enter, KeyCode::Char('d')]);
        app.tick(Instant::now());
        assert!(app.table.is_busy());

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.screen, Screen::Home);
        assert!(!app.table.is_busy());
        assert_eq!(app.table.phase(), RoundPhase::Betting);
        assert_eq!(app.table.balance(), 90);
    }

    #[test]
    fn test_rejected_action_shows_reason() {
        let mut app = app_with(TableRules::instant(), &[]);
        press(&mut app, &[KeyCode::Enter, KeyCode::Char('d')]);
        assert_eq!(app.status, "Invalid bet amount: 0");
    }

    #[test]
    fn test_settings_reset_coins_and_scores() {
        let mut app = app_with(TableRules::instant(), &[]);
        app.scores.set_best_score("blackjack", 120);
        press(&mut app, &[KeyCode::Tab, KeyCode::Tab]);
        assert_eq!(app.screen, Screen::Settings);

        press(&mut app, &[KeyCode::Char('c'), KeyCode::Char('s'), KeyCode::Char('t')]);
        assert_eq!(app.table.balance(), 0);
        assert_eq!(app.scores.get_best_score("blackjack"), 0);
        assert_eq!(app.theme.theme(), Theme::LightTheme);
    }
}
