use std::path::PathBuf;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::game::backend::{BackendKind, JsonDirStore, KeyValueStore, MemoryStore, SledStore};
use crate::game::errors::GameError;
use crate::game::state::{default_exercises, default_workout_plans, seed_quests, GameState};
use crate::game::types::{
    Exercise, InventoryItem, Player, Quest, WorkoutPlan, EXERCISE_SCHEMA_VERSION,
    INVENTORY_SCHEMA_VERSION, PLAN_SCHEMA_VERSION, PLAYER_SCHEMA_VERSION, QUEST_SCHEMA_VERSION,
};

pub const KEY_PLAYER: &str = "arise_player";
pub const KEY_QUESTS: &str = "arise_quests";
pub const KEY_INVENTORY: &str = "arise_inventory";
pub const KEY_EXERCISES: &str = "arise_exercises";
pub const KEY_WORKOUT_PLANS: &str = "arise_workout_plans";

/// Versioned envelope around every stored record.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot<T> {
    schema_version: u8,
    data: T,
}

/// Helper builder so tests can easily create throwaway stores with custom paths.
pub struct GameStoreBuilder {
    path: PathBuf,
    backend: BackendKind,
}

impl GameStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backend: BackendKind::default(),
        }
    }

    pub fn backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn open(self) -> Result<GameStore, GameError> {
        let backend: Box<dyn KeyValueStore> = match self.backend {
            BackendKind::Sled => Box::new(SledStore::open(&self.path)?),
            BackendKind::Json => Box::new(JsonDirStore::open(&self.path)?),
        };
        log::debug!("opened {:?} store at {}", self.backend, self.path.display());
        Ok(GameStore::new(backend))
    }
}

/// Typed access to the five game records on top of any backend.
pub struct GameStore {
    backend: Box<dyn KeyValueStore>,
}

impl GameStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    fn load_record<T: DeserializeOwned>(
        &self,
        key: &str,
        entity: &'static str,
        expected: u8,
    ) -> Result<Option<T>, GameError> {
        let Some(bytes) = self.backend.load(key)? else {
            return Ok(None);
        };
        let snapshot: Snapshot<T> = self.backend.codec().decode(&bytes)?;
        if snapshot.schema_version != expected {
            return Err(GameError::SchemaMismatch {
                entity,
                expected,
                found: snapshot.schema_version,
            });
        }
        Ok(Some(snapshot.data))
    }

    fn save_record<T: Serialize>(&self, key: &str, version: u8, data: &T) -> Result<(), GameError> {
        let snapshot = Snapshot {
            schema_version: version,
            data,
        };
        let bytes = self.backend.codec().encode(&snapshot)?;
        self.backend.save(key, &bytes)
    }

    pub fn load_player(&self) -> Result<Option<Player>, GameError> {
        self.load_record(KEY_PLAYER, "player", PLAYER_SCHEMA_VERSION)
    }

    pub fn load_quests(&self) -> Result<Option<Vec<Quest>>, GameError> {
        self.load_record(KEY_QUESTS, "quests", QUEST_SCHEMA_VERSION)
    }

    pub fn load_inventory(&self) -> Result<Option<Vec<InventoryItem>>, GameError> {
        self.load_record(KEY_INVENTORY, "inventory", INVENTORY_SCHEMA_VERSION)
    }

    pub fn load_exercises(&self) -> Result<Option<Vec<Exercise>>, GameError> {
        self.load_record(KEY_EXERCISES, "exercises", EXERCISE_SCHEMA_VERSION)
    }

    pub fn load_workout_plans(&self) -> Result<Option<Vec<WorkoutPlan>>, GameError> {
        self.load_record(KEY_WORKOUT_PLANS, "workout plans", PLAN_SCHEMA_VERSION)
    }

    /// Load every record, falling back to first-run values for the ones
    /// that were never saved.
    pub fn load_state(&self, default_username: &str, today: NaiveDate) -> Result<GameState, GameError> {
        let player = match self.load_player()? {
            Some(player) => player,
            None => {
                log::info!("no saved player, starting fresh");
                Player::new(default_username, today)
            }
        };
        Ok(GameState {
            player,
            quests: self.load_quests()?.unwrap_or_else(seed_quests),
            inventory: self.load_inventory()?.unwrap_or_default(),
            exercises: self.load_exercises()?.unwrap_or_else(default_exercises),
            workout_plans: self.load_workout_plans()?.unwrap_or_else(default_workout_plans),
        })
    }

    pub fn save_player(&self, player: &Player) -> Result<(), GameError> {
        self.save_record(KEY_PLAYER, PLAYER_SCHEMA_VERSION, player)
    }

    pub fn save_quests(&self, quests: &[Quest]) -> Result<(), GameError> {
        self.save_record(KEY_QUESTS, QUEST_SCHEMA_VERSION, &quests)
    }

    pub fn save_inventory(&self, inventory: &[InventoryItem]) -> Result<(), GameError> {
        self.save_record(KEY_INVENTORY, INVENTORY_SCHEMA_VERSION, &inventory)
    }

    pub fn save_exercises(&self, exercises: &[Exercise]) -> Result<(), GameError> {
        self.save_record(KEY_EXERCISES, EXERCISE_SCHEMA_VERSION, &exercises)
    }

    pub fn save_workout_plans(&self, plans: &[WorkoutPlan]) -> Result<(), GameError> {
        self.save_record(KEY_WORKOUT_PLANS, PLAN_SCHEMA_VERSION, &plans)
    }

    pub fn save_state(&self, state: &GameState) -> Result<(), GameError> {
        self.save_player(&state.player)?;
        self.save_quests(&state.quests)?;
        self.save_inventory(&state.inventory)?;
        self.save_exercises(&state.exercises)?;
        self.save_workout_plans(&state.workout_plans)
    }
}
