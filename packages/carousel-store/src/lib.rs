//! Persistent stores shared by every game in the carousel.
//!
//! Each store is a small serde value kept under one storage key and written
//! back after every mutation. Storage failures are logged and never reach the
//! caller; the in-memory value stays authoritative.

mod coins;
mod error;
mod persist;
mod scores;
mod storage;
mod theme;

pub use coins::{CoinStore, DEFAULT_COINS};
pub use error::StoreError;
pub use scores::ScoreStore;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use theme::{Theme, ThemeStore};
