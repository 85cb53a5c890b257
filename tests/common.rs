//! Test utilities & fixtures shared by the integration tests.

use chrono::NaiveDate;
use tempfile::TempDir;

use arise::game::{
    BackendKind, FixedClock, Game, GameStore, GameStoreBuilder, ScriptedRandom,
};

/// The day most tests play on.
#[allow(dead_code)]
pub fn day_one() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
}

/// Open a throwaway on-disk store of the given kind. Keep the `TempDir`
/// alive for as long as the store is used.
#[allow(dead_code)]
pub fn temp_store(kind: BackendKind) -> (GameStore, TempDir) {
    let dir = TempDir::new().expect("tempdir");
    let store = GameStoreBuilder::new(dir.path())
        .backend(kind)
        .open()
        .expect("store");
    (store, dir)
}

/// Reopen a store directory created by [`temp_store`].
#[allow(dead_code)]
pub fn reopen(dir: &TempDir, kind: BackendKind) -> GameStore {
    GameStoreBuilder::new(dir.path())
        .backend(kind)
        .open()
        .expect("reopen store")
}

/// Open a game on `date` with a scripted random source.
#[allow(dead_code)]
pub fn game_on(store: GameStore, date: NaiveDate, rolls: &[f64]) -> Game {
    Game::open(
        store,
        Box::new(FixedClock::on(date)),
        Box::new(ScriptedRandom::new(rolls.iter().copied())),
        "Hunter",
    )
    .expect("open game")
}

/// In-memory game on [`day_one`].
#[allow(dead_code)]
pub fn fresh_game(rolls: &[f64]) -> Game {
    game_on(GameStore::in_memory(), day_one(), rolls)
}
