//! # Arise - habit and workout progression engine
//!
//! Arise turns daily habits and strength training into an RPG-style
//! progression loop: completing quests and logging workouts earns XP, XP
//! drives levels, ranks and stat points, and gold or essence stones buy draws
//! from a catalog of cosmetic rewards.
//!
//! ## Features
//!
//! - **Progression**: super-linear XP curve, cascading level-ups, rank tiers and essence milestones.
//! - **Quests**: daily reset, protected mandatory quest, custom habits and a per-day history ledger.
//! - **Reward draws**: two currencies with their own rarity ladders; duplicates convert to XP.
//! - **Training log**: session volume, volume-based XP and editable archives that never re-grant XP.
//! - **Storage**: sled (bincode) or a JSON directory (fs2 locked), behind one key-value trait.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use arise::game::{Game, GameStoreBuilder, StdRandom, SystemClock};
//!
//! fn main() -> Result<(), arise::game::GameError> {
//!     let store = GameStoreBuilder::new("./data").open()?;
//!     let mut game = Game::open(
//!         store,
//!         Box::new(SystemClock),
//!         Box::new(StdRandom::from_entropy()),
//!         "Hunter",
//!     )?;
//!     game.complete_quest("daily-force");
//!     for message in game.drain_notifications() {
//!         println!("{}", message);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - engines, state, storage and the [`game::Game`] orchestrator
//! - [`config`] - TOML configuration for the binary
//! - [`validation`] - name, title and set-spec validation
//! - [`logutil`] - single-line escaping for user text in logs

pub mod config;
pub mod game;
pub mod logutil;
pub mod validation;
