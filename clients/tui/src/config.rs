use blackjack::{Shoe, TableRules};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "game-carousel", about = "Terminal mini-game hub with a blackjack table")]
pub struct Cli {
    /// Directory the coin, score and theme stores are kept in
    #[arg(long, env = "GAME_CAROUSEL_DATA_DIR", default_value = ".game-carousel")]
    pub data_dir: PathBuf,

    /// Delay between dealt cards in milliseconds
    #[arg(long, env = "GAME_CAROUSEL_PACE_MS", default_value_t = 600)]
    pub pace_ms: u64,

    /// Decks in the shoe
    #[arg(long, env = "GAME_CAROUSEL_DECKS", default_value_t = 1)]
    pub decks: u8,

    /// Shuffle seed; random when omitted
    #[arg(long, env = "GAME_CAROUSEL_SEED")]
    pub seed: Option<u64>,

    #[arg(long, env = "GAME_CAROUSEL_LOG_LEVEL", default_value = "info")]
    pub log_level: LevelFilter,

    /// Ring the terminal bell on a win
    #[arg(long, env = "GAME_CAROUSEL_BELL")]
    pub bell: bool,
}

impl Cli {
    pub fn table_rules(&self) -> TableRules {
        TableRules::default()
            .with_pace(self.pace_ms)
            .with_decks(self.decks)
    }

    pub fn shoe(&self, rules: &TableRules) -> Shoe {
        match self.seed {
            Some(seed) => Shoe::new(rules.num_decks, seed),
            None => Shoe::from_entropy(rules.num_decks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["game-carousel"]).unwrap();
        assert_eq!(cli.pace_ms, 600);
        assert_eq!(cli.decks, 1);
        assert_eq!(cli.log_level, LevelFilter::Info);
        assert!(!cli.bell);
        assert_eq!(cli.table_rules(), TableRules::default());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "game-carousel",
            "--pace-ms",
            "0",
            "--decks",
            "0",
            "--seed",
            "42",
            "--log-level",
            "debug",
            "--data-dir",
            "/tmp/carousel",
        ])
        .unwrap();

        let rules = cli.table_rules();
        assert_eq!(rules.pace_ms, 0);
        assert_eq!(rules.num_decks, 1);
        assert_eq!(cli.log_level, LevelFilter::Debug);
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/carousel"));

        let a = cli.shoe(&rules);
        let b = cli.shoe(&rules);
        assert_eq!(a.len(), 52);
        assert_eq!(a.peek().map(|c| (c.rank, c.suit)), b.peek().map(|c| (c.rank, c.suit)));
    }

    #[test]
    fn test_rejects_bad_level() {
        assert!(Cli::try_parse_from(["game-carousel", "--log-level", "loud"]).is_err());
    }
}
