//! Orchestration layer: owns the game state, routes user actions to the
//! engines and rewrites the affected records after every mutation.
//!
//! A failed write is logged and otherwise ignored; in-memory state stays
//! authoritative for the rest of the run.

use uuid::Uuid;

use crate::game::clock::Clock;
use crate::game::dungeon::{ArchiveEditor, RaidReport, SetEdit, TrainingSession};
use crate::game::errors::GameError;
use crate::game::gacha::{self, DrawCurrency, DrawOutcome};
use crate::game::history::{self, LedgerContext, PeriodSummary};
use crate::game::notify::{NotificationLog, Notifier};
use crate::game::profile;
use crate::game::progression;
use crate::game::quest::{self, QuestCompletion};
use crate::game::rng::RandomSource;
use crate::game::roster;
use crate::game::state::GameState;
use crate::game::storage::GameStore;
use crate::game::types::{
    DungeonLog, Exercise, InventoryItem, LoggedSet, Player, Quest, StatKind, WorkoutPlan,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Record {
    Player,
    Quests,
    Inventory,
    Exercises,
    WorkoutPlans,
}

pub struct Game {
    state: GameState,
    store: GameStore,
    clock: Box<dyn Clock>,
    rng: Box<dyn RandomSource>,
    notifications: NotificationLog,
    session: TrainingSession,
    editor: ArchiveEditor,
}

impl Game {
    /// Load saved state (seeding whatever is missing) and apply the daily
    /// reset if the calendar day changed since the last visit.
    pub fn open(
        store: GameStore,
        clock: Box<dyn Clock>,
        rng: Box<dyn RandomSource>,
        default_username: &str,
    ) -> Result<Self, GameError> {
        let state = store.load_state(default_username, clock.today())?;
        let mut game = Self {
            state,
            store,
            clock,
            rng,
            notifications: NotificationLog::new(),
            session: TrainingSession::new(),
            editor: ArchiveEditor::new(),
        };
        game.refresh_day();
        Ok(game)
    }

    /// Run the daily reset against the clock's current day.
    pub fn refresh_day(&mut self) -> bool {
        let today = self.clock.today();
        let reset = quest::reset_if_new_day(
            &mut self.state.player,
            &mut self.state.quests,
            today,
            &mut self.notifications,
        );
        if reset {
            self.persist(&[Record::Player, Record::Quests]);
        }
        reset
    }

    fn ledger(&self) -> LedgerContext {
        LedgerContext::new(self.clock.today(), self.state.quests.len())
    }

    fn persist(&self, records: &[Record]) {
        for record in records {
            let result = match record {
                Record::Player => self.store.save_player(&self.state.player),
                Record::Quests => self.store.save_quests(&self.state.quests),
                Record::Inventory => self.store.save_inventory(&self.state.inventory),
                Record::Exercises => self.store.save_exercises(&self.state.exercises),
                Record::WorkoutPlans => self.store.save_workout_plans(&self.state.workout_plans),
            };
            if let Err(e) = result {
                log::warn!("failed to save {:?}: {}", record, e);
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn quests(&self) -> &[Quest] {
        &self.state.quests
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.state.inventory
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.state.exercises
    }

    pub fn workout_plans(&self) -> &[WorkoutPlan] {
        &self.state.workout_plans
    }

    /// Pending notifications, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<String> {
        self.notifications.drain()
    }

    pub fn into_store(self) -> GameStore {
        self.store
    }

    // ------------------------------------------------------------------
    // Quests and progression
    // ------------------------------------------------------------------

    pub fn complete_quest(&mut self, quest_id: &str) -> Option<QuestCompletion> {
        let done = quest::complete_quest(
            &mut self.state.quests,
            &mut self.state.player,
            quest_id,
            self.clock.today(),
            &mut self.notifications,
        )?;
        self.persist(&[Record::Player, Record::Quests]);
        Some(done)
    }

    /// Returns the new quest's id.
    pub fn add_quest(&mut self, title: &str, description: &str) -> Result<String, GameError> {
        let id = quest::add_custom_quest(
            &mut self.state.quests,
            title,
            description,
            &mut self.notifications,
        )?
        .id
        .clone();
        self.persist(&[Record::Quests]);
        Ok(id)
    }

    pub fn remove_quest(&mut self, quest_id: &str) -> Result<Option<Quest>, GameError> {
        let removed = quest::remove_quest(&mut self.state.quests, quest_id, &mut self.notifications)?;
        if removed.is_some() {
            self.persist(&[Record::Quests]);
        }
        Ok(removed)
    }

    pub fn invest_stat(&mut self, stat: StatKind) -> bool {
        let spent = progression::invest_stat(&mut self.state.player, stat);
        if spent {
            self.persist(&[Record::Player]);
        }
        spent
    }

    pub fn summary(&self, days: i64) -> PeriodSummary {
        history::summarize(&self.state.player.history, self.clock.today(), days)
    }

    pub fn xp_series(&self, days: u32) -> Vec<(chrono::NaiveDate, u64)> {
        history::daily_xp_series(&self.state.player.history, self.clock.today(), days)
    }

    // ------------------------------------------------------------------
    // Rewards and profile
    // ------------------------------------------------------------------

    pub fn draw(&mut self, count: u32, currency: DrawCurrency) -> Result<DrawOutcome, GameError> {
        let ctx = self.ledger();
        let outcome = gacha::draw(
            &mut self.state.player,
            &mut self.state.inventory,
            count,
            currency,
            self.rng.as_mut(),
            &ctx,
            &mut self.notifications,
        )?;
        self.persist(&[Record::Player, Record::Inventory]);
        Ok(outcome)
    }

    pub fn equip(&mut self, instance_id: Uuid) -> Result<Option<Uuid>, GameError> {
        let equipped = profile::equip_item(
            &mut self.state.player,
            &self.state.inventory,
            instance_id,
            &mut self.notifications,
        )?;
        self.persist(&[Record::Player]);
        Ok(equipped)
    }

    pub fn update_profile(&mut self, name: &str, avatar: &str) -> Result<(), GameError> {
        profile::update_profile(&mut self.state.player, name, avatar, &mut self.notifications)?;
        self.persist(&[Record::Player]);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Roster
    // ------------------------------------------------------------------

    /// Returns the new exercise's id.
    pub fn add_exercise(&mut self, name: &str, muscle_target: &str) -> Result<String, GameError> {
        let id = roster::add_exercise(
            &mut self.state.exercises,
            name,
            muscle_target,
            &mut self.notifications,
        )?
        .id
        .clone();
        self.persist(&[Record::Exercises]);
        Ok(id)
    }

    /// Returns the new plan's id.
    pub fn add_workout_plan(&mut self, name: &str, exercise_ids: &[String]) -> Result<String, GameError> {
        let id = roster::add_workout_plan(
            &mut self.state.workout_plans,
            name,
            exercise_ids,
            &mut self.notifications,
        )?
        .id
        .clone();
        self.persist(&[Record::WorkoutPlans]);
        Ok(id)
    }

    pub fn plan_exercises(&self, plan_id: &str) -> Vec<&Exercise> {
        roster::plan_exercises(&self.state.workout_plans, &self.state.exercises, plan_id)
    }

    // ------------------------------------------------------------------
    // Training
    // ------------------------------------------------------------------

    pub fn session(&self) -> &TrainingSession {
        &self.session
    }

    pub fn start_session(&mut self, plan_id: &str) -> Result<(), GameError> {
        let Some(plan) = roster::find_plan(&self.state.workout_plans, plan_id) else {
            self.notifications.post("Raid Plan Not Found");
            return Err(GameError::NotFound(format!("workout plan {}", plan_id)));
        };
        self.session.start(plan, &mut self.notifications)
    }

    pub fn log_set(&mut self, exercise_id: &str, weight: f64, reps: u32) -> Result<LoggedSet, GameError> {
        let exercise = roster::find_exercise(&self.state.exercises, exercise_id);
        if exercise.is_none() {
            log::debug!("logging set for unknown exercise {}", exercise_id);
        }
        self.session
            .log_set(exercise, weight, reps, &mut self.notifications)
            .cloned()
    }

    pub fn finish_session(&mut self) -> Result<RaidReport, GameError> {
        let ctx = self.ledger();
        let report = self.session.finish(
            &mut self.state.player,
            &self.state.workout_plans,
            &ctx,
            self.clock.now(),
            &mut self.notifications,
        )?;
        self.persist(&[Record::Player]);
        Ok(report)
    }

    /// Start editing an archived log.
    pub fn open_log(&mut self, log_id: Uuid) -> Result<DungeonLog, GameError> {
        self.editor
            .open(&self.state.player, log_id, &mut self.notifications)
            .cloned()
    }

    pub fn edit_log_set(&mut self, set_id: Uuid, edit: SetEdit) -> Result<bool, GameError> {
        self.editor.edit(set_id, edit, &mut self.notifications)
    }

    pub fn commit_log_edit(&mut self) -> Result<DungeonLog, GameError> {
        let log = self
            .editor
            .commit(&mut self.state.player, &mut self.notifications)?;
        self.persist(&[Record::Player]);
        Ok(log)
    }

    pub fn discard_log_edit(&mut self) {
        self.editor.discard();
    }
}
