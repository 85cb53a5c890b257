//! The progression core: player state, quests, reward draws and training
//! logs, plus the storage and orchestration around them.
//!
//! Engines in this module are plain functions over owned state. They take a
//! [`notify::Notifier`] for user-facing messages and never perform IO; the
//! [`app::Game`] layer owns persistence.

pub mod app;
pub mod backend;
pub mod catalog;
pub mod clock;
pub mod dungeon;
pub mod errors;
pub mod gacha;
pub mod history;
pub mod notify;
pub mod profile;
pub mod progression;
pub mod quest;
pub mod reveal;
pub mod rng;
pub mod roster;
pub mod state;
pub mod storage;
pub mod types;

pub use app::Game;
pub use backend::{BackendKind, JsonDirStore, KeyValueStore, MemoryStore, SledStore};
pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::GameError;
pub use gacha::{DrawCurrency, DrawOutcome};
pub use notify::{NotificationLog, Notifier};
pub use rng::{RandomSource, ScriptedRandom, StdRandom};
pub use state::GameState;
pub use storage::{GameStore, GameStoreBuilder};
pub use types::{
    DungeonLog, Exercise, HistoryEntry, InventoryItem, ItemKind, LoggedSet, Player, Quest,
    QuestKind, Rank, Rarity, StatKind, Stats, WorkoutPlan,
};
