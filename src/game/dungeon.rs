//! Training sessions ("dungeon raids") and edits to their archived logs.
//!
//! A session moves `Idle -> Active -> Idle`. Finishing commits a
//! [`DungeonLog`] whose `xp_earned` is fixed at that moment. Archived logs
//! go through a separate `Reviewing -> Editing -> Reviewing` cycle where
//! weights and reps may change and volume is recomputed, but XP never is.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::game::errors::GameError;
use crate::game::history::LedgerContext;
use crate::game::notify::Notifier;
use crate::game::progression::{grant_xp, LevelUpSummary};
use crate::game::types::{DungeonLog, Exercise, LoggedSet, Player, WorkoutPlan};
use crate::validation::validate_weight;

/// Volume units per point of XP.
pub const VOLUME_PER_XP: f64 = 50.0;
pub const UNKNOWN_PLAN_NAME: &str = "Unknown Raid";
pub const UNKNOWN_EXERCISE_NAME: &str = "Unknown";

const NO_RAID_MESSAGE: &str = "No raid in progress.";
const INVALID_WEIGHT_MESSAGE: &str = "Invalid Weight";
const LOG_MISSING_MESSAGE: &str = "Log not found in archives.";
const NOT_EDITING_MESSAGE: &str = "No log open for editing.";

/// Σ weight × reps.
pub fn total_volume(sets: &[LoggedSet]) -> f64 {
    sets.iter().map(LoggedSet::volume).sum()
}

/// `floor(volume / 50)`.
pub fn xp_for_volume(volume: f64) -> u64 {
    if volume <= 0.0 {
        return 0;
    }
    (volume / VOLUME_PER_XP).floor() as u64
}

#[derive(Debug, Clone, PartialEq, Default)]
enum SessionState {
    #[default]
    Idle,
    Active {
        plan_id: String,
        sets: Vec<LoggedSet>,
    },
}

/// Live training session.
#[derive(Debug, Clone, Default)]
pub struct TrainingSession {
    state: SessionState,
}

/// What finishing a session produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RaidReport {
    pub log: DungeonLog,
    pub level_up: LevelUpSummary,
}

impl RaidReport {
    pub fn cleared(&self) -> bool {
        self.log.xp_earned > 0
    }
}

impl TrainingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    pub fn sets(&self) -> &[LoggedSet] {
        match &self.state {
            SessionState::Active { sets, .. } => sets,
            SessionState::Idle => &[],
        }
    }

    /// Volume logged so far in the active session.
    pub fn running_volume(&self) -> f64 {
        total_volume(self.sets())
    }

    pub fn start(&mut self, plan: &WorkoutPlan, notifier: &mut dyn Notifier) -> Result<(), GameError> {
        if self.is_active() {
            notifier.post("A raid is already in progress.");
            return Err(GameError::SessionAlreadyActive);
        }
        self.state = SessionState::Active {
            plan_id: plan.id.clone(),
            sets: Vec::new(),
        };
        notifier.post(&format!("ENTERING {}...", plan.name));
        Ok(())
    }

    /// Append a completed set. The exercise name is captured now.
    pub fn log_set(
        &mut self,
        exercise: Option<&Exercise>,
        weight: f64,
        reps: u32,
        notifier: &mut dyn Notifier,
    ) -> Result<&LoggedSet, GameError> {
        let SessionState::Active { sets, .. } = &mut self.state else {
            notifier.post(NO_RAID_MESSAGE);
            return Err(GameError::NoActiveSession);
        };
        if !validate_weight(weight) {
            notifier.post(INVALID_WEIGHT_MESSAGE);
            return Err(GameError::InvalidInput(format!("weight {}", weight)));
        }
        sets.push(LoggedSet {
            id: Uuid::new_v4(),
            exercise_name: exercise
                .map(|e| e.name.clone())
                .unwrap_or_else(|| UNKNOWN_EXERCISE_NAME.to_string()),
            reps,
            weight,
            completed: true,
        });
        notifier.post("HIT!");
        Ok(&sets[sets.len() - 1])
    }

    /// Commit the session to the player's archive and pay out its XP.
    ///
    /// The log is committed even when no work was done; the set list is
    /// discarded either way.
    pub fn finish(
        &mut self,
        player: &mut Player,
        plans: &[WorkoutPlan],
        ctx: &LedgerContext,
        now: DateTime<Utc>,
        notifier: &mut dyn Notifier,
    ) -> Result<RaidReport, GameError> {
        let SessionState::Active { plan_id, sets } = std::mem::take(&mut self.state) else {
            notifier.post(NO_RAID_MESSAGE);
            return Err(GameError::NoActiveSession);
        };

        let volume = total_volume(&sets);
        let xp = xp_for_volume(volume);
        let plan_name = plans
            .iter()
            .find(|p| p.id == plan_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| UNKNOWN_PLAN_NAME.to_string());

        let log = DungeonLog {
            id: Uuid::new_v4(),
            recorded_at: now,
            plan_name,
            sets,
            total_volume: volume,
            xp_earned: xp,
        };
        player.dungeon_logs.insert(0, log.clone());

        let mut level_up = LevelUpSummary::default();
        if xp > 0 {
            level_up = grant_xp(player, xp, ctx, notifier);
            notifier.post(&format!(
                "DUNGEON CLEARED. TOTAL LOAD: {}kg. GAINED {} XP.",
                volume, xp
            ));
        } else {
            notifier.post("DUNGEON FAILED. NO WORK DONE.");
        }
        log::debug!("raid {} committed: volume {} xp {}", log.id, volume, xp);

        Ok(RaidReport { log, level_up })
    }
}

/// A change to one archived set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetEdit {
    Weight(f64),
    Reps(u32),
}

/// Apply `edit` to set `set_id` of a held log copy. Returns false if the set
/// is not in the log.
pub fn edit_set(
    log: &mut DungeonLog,
    set_id: Uuid,
    edit: SetEdit,
    notifier: &mut dyn Notifier,
) -> Result<bool, GameError> {
    let Some(set) = log.sets.iter_mut().find(|s| s.id == set_id) else {
        return Ok(false);
    };
    match edit {
        SetEdit::Weight(weight) => {
            if !validate_weight(weight) {
                notifier.post(INVALID_WEIGHT_MESSAGE);
                return Err(GameError::InvalidInput(format!("weight {}", weight)));
            }
            set.weight = weight;
        }
        SetEdit::Reps(reps) => set.reps = reps,
    }
    Ok(true)
}

/// Recompute volume and write the log back over the archived one with the
/// same id. `xp_earned` is carried over from the archive untouched.
pub fn commit_edit(
    player: &mut Player,
    mut log: DungeonLog,
    notifier: &mut dyn Notifier,
) -> Result<DungeonLog, GameError> {
    let Some(slot) = player.dungeon_logs.iter_mut().find(|l| l.id == log.id) else {
        notifier.post(LOG_MISSING_MESSAGE);
        return Err(GameError::NotFound(format!("dungeon log {}", log.id)));
    };
    log.total_volume = total_volume(&log.sets);
    log.xp_earned = slot.xp_earned;
    *slot = log.clone();
    notifier.post("Archives Updated.");
    Ok(log)
}

/// Review/edit cycle over the archive.
#[derive(Debug, Clone, Default)]
pub struct ArchiveEditor {
    editing: Option<DungeonLog>,
}

impl ArchiveEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Take a working copy of an archived log.
    pub fn open(
        &mut self,
        player: &Player,
        log_id: Uuid,
        notifier: &mut dyn Notifier,
    ) -> Result<&DungeonLog, GameError> {
        let Some(log) = player.find_log(log_id).cloned() else {
            notifier.post(LOG_MISSING_MESSAGE);
            return Err(GameError::NotFound(format!("dungeon log {}", log_id)));
        };
        Ok(&*self.editing.insert(log))
    }

    pub fn edit(&mut self, set_id: Uuid, edit: SetEdit, notifier: &mut dyn Notifier) -> Result<bool, GameError> {
        let Some(log) = self.editing.as_mut() else {
            notifier.post(NOT_EDITING_MESSAGE);
            return Err(GameError::NotEditing);
        };
        edit_set(log, set_id, edit, notifier)
    }

    pub fn commit(&mut self, player: &mut Player, notifier: &mut dyn Notifier) -> Result<DungeonLog, GameError> {
        let Some(log) = self.editing.take() else {
            notifier.post(NOT_EDITING_MESSAGE);
            return Err(GameError::NotEditing);
        };
        commit_edit(player, log, notifier)
    }

    /// Drop the working copy without saving.
    pub fn discard(&mut self) {
        self.editing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::notify::NotificationLog;
    use crate::game::state::{default_exercises, default_workout_plans};
    use chrono::{NaiveDate, TimeZone};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 20).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 20, 18, 30, 0).unwrap()
    }

    fn ctx() -> LedgerContext {
        LedgerContext::new(today(), 3)
    }

    #[test]
    fn volume_and_xp_from_sets() {
        let plans = default_workout_plans();
        let exercises = default_exercises();
        let mut player = Player::new("Jin", today());
        let mut session = TrainingSession::new();
        let mut notes = NotificationLog::new();

        session.start(&plans[0], &mut notes).unwrap();
        session.log_set(exercises.first(), 20.0, 10, &mut notes).unwrap();
        session.log_set(exercises.get(1), 30.0, 5, &mut notes).unwrap();
        assert_eq!(session.running_volume(), 350.0);

        let report = session
            .finish(&mut player, &plans, &ctx(), now(), &mut notes)
            .unwrap();
        assert_eq!(report.log.total_volume, 350.0);
        assert_eq!(report.log.xp_earned, 7);
        assert_eq!(report.log.plan_name, "Standard Raid");
        assert_eq!(report.log.sets[0].exercise_name, "Push Up");
        assert_eq!(player.xp, 7);
        assert!(!session.is_active());
        assert!(notes.contains("TOTAL LOAD: 350kg. GAINED 7 XP."));
    }

    #[test]
    fn empty_session_commits_failed_log() {
        let plans = default_workout_plans();
        let mut player = Player::new("Jin", today());
        let mut session = TrainingSession::new();
        let mut notes = NotificationLog::new();

        session.start(&plans[0], &mut notes).unwrap();
        let report = session
            .finish(&mut player, &plans, &ctx(), now(), &mut notes)
            .unwrap();
        assert!(!report.cleared());
        assert_eq!(player.dungeon_logs.len(), 1);
        assert_eq!(player.xp, 0);
        assert!(player.history.is_empty());
        assert!(notes.contains("DUNGEON FAILED. NO WORK DONE."));
    }

    #[test]
    fn logs_are_newest_first() {
        let plans = default_workout_plans();
        let mut player = Player::new("Jin", today());
        let mut session = TrainingSession::new();
        let mut notes = NotificationLog::new();

        session.start(&plans[0], &mut notes).unwrap();
        let first = session.finish(&mut player, &plans, &ctx(), now(), &mut notes).unwrap();
        session.start(&plans[0], &mut notes).unwrap();
        let second = session.finish(&mut player, &plans, &ctx(), now(), &mut notes).unwrap();
        assert_eq!(player.dungeon_logs[0].id, second.log.id);
        assert_eq!(player.dungeon_logs[1].id, first.log.id);
    }

    #[test]
    fn session_transitions_are_guarded() {
        let plans = default_workout_plans();
        let mut player = Player::new("Jin", today());
        let mut session = TrainingSession::new();
        let mut notes = NotificationLog::new();

        assert!(matches!(
            session.log_set(None, 10.0, 1, &mut notes),
            Err(GameError::NoActiveSession)
        ));
        assert!(matches!(
            session.finish(&mut player, &plans, &ctx(), now(), &mut notes),
            Err(GameError::NoActiveSession)
        ));
        session.start(&plans[0], &mut notes).unwrap();
        assert!(matches!(
            session.start(&plans[0], &mut notes),
            Err(GameError::SessionAlreadyActive)
        ));
        assert!(session.log_set(None, -1.0, 5, &mut notes).is_err());
        assert!(session.sets().is_empty());
        assert_eq!(
            notes.messages(),
            [
                NO_RAID_MESSAGE,
                NO_RAID_MESSAGE,
                "ENTERING Standard Raid...",
                "A raid is already in progress.",
                INVALID_WEIGHT_MESSAGE,
            ]
        );
    }

    #[test]
    fn missing_plan_and_exercise_fall_back() {
        let plans = default_workout_plans();
        let mut player = Player::new("Jin", today());
        let mut session = TrainingSession::new();
        let mut notes = NotificationLog::new();

        session.start(&plans[0], &mut notes).unwrap();
        session.log_set(None, 100.0, 1, &mut notes).unwrap();
        let report = session.finish(&mut player, &[], &ctx(), now(), &mut notes).unwrap();
        assert_eq!(report.log.plan_name, UNKNOWN_PLAN_NAME);
        assert_eq!(report.log.sets[0].exercise_name, UNKNOWN_EXERCISE_NAME);
        assert_eq!(report.log.xp_earned, 2);
    }

    #[test]
    fn edits_recompute_volume_but_not_xp() {
        let plans = default_workout_plans();
        let mut player = Player::new("Jin", today());
        let mut session = TrainingSession::new();
        let mut notes = NotificationLog::new();

        session.start(&plans[0], &mut notes).unwrap();
        session.log_set(None, 20.0, 10, &mut notes).unwrap();
        session.log_set(None, 30.0, 5, &mut notes).unwrap();
        let report = session.finish(&mut player, &plans, &ctx(), now(), &mut notes).unwrap();
        let set_id = report.log.sets[0].id;

        let mut editor = ArchiveEditor::new();
        editor.open(&player, report.log.id, &mut notes).unwrap();
        assert!(editor.edit(set_id, SetEdit::Weight(100.0), &mut notes).unwrap());
        assert!(editor.edit(set_id, SetEdit::Reps(20), &mut notes).unwrap());
        assert!(!editor.edit(Uuid::new_v4(), SetEdit::Reps(1), &mut notes).unwrap());

        // Archive is untouched until commit
        assert_eq!(player.dungeon_logs[0].total_volume, 350.0);

        let saved = editor.commit(&mut player, &mut notes).unwrap();
        assert_eq!(saved.total_volume, 2150.0);
        assert_eq!(saved.xp_earned, 7);
        assert_eq!(player.dungeon_logs[0].total_volume, 2150.0);
        assert_eq!(player.dungeon_logs[0].xp_earned, 7);
        assert_eq!(player.xp, 7);
        assert!(!editor.is_editing());
        assert!(notes.contains("Archives Updated."));
    }

    #[test]
    fn editor_requires_open_log() {
        let mut player = Player::new("Jin", today());
        let mut editor = ArchiveEditor::new();
        let mut notes = NotificationLog::new();
        assert!(matches!(
            editor.edit(Uuid::new_v4(), SetEdit::Reps(3), &mut notes),
            Err(GameError::NotEditing)
        ));
        assert!(matches!(
            editor.commit(&mut player, &mut notes),
            Err(GameError::NotEditing)
        ));
        assert!(matches!(
            editor.open(&player, Uuid::new_v4(), &mut notes),
            Err(GameError::NotFound(_))
        ));
        assert_eq!(
            notes.messages(),
            [NOT_EDITING_MESSAGE, NOT_EDITING_MESSAGE, LOG_MISSING_MESSAGE]
        );
    }

    #[test]
    fn log_removed_while_editing_is_reported() {
        let plans = default_workout_plans();
        let mut player = Player::new("Jin", today());
        let mut session = TrainingSession::new();
        let mut notes = NotificationLog::new();
        session.start(&plans[0], &mut notes).unwrap();
        session.log_set(None, 10.0, 10, &mut notes).unwrap();
        let report = session.finish(&mut player, &plans, &ctx(), now(), &mut notes).unwrap();

        let mut editor = ArchiveEditor::new();
        editor.open(&player, report.log.id, &mut notes).unwrap();
        let err = editor
            .edit(report.log.sets[0].id, SetEdit::Weight(f64::NAN), &mut notes)
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidInput(_)));
        player.dungeon_logs.clear();
        assert!(matches!(
            editor.commit(&mut player, &mut notes),
            Err(GameError::NotFound(_))
        ));
        let tail: Vec<_> = notes.messages().iter().rev().take(2).rev().cloned().collect();
        assert_eq!(tail, [INVALID_WEIGHT_MESSAGE, LOG_MISSING_MESSAGE]);
    }

    #[test]
    fn xp_floors_partial_volume() {
        assert_eq!(xp_for_volume(0.0), 0);
        assert_eq!(xp_for_volume(49.9), 0);
        assert_eq!(xp_for_volume(50.0), 1);
        assert_eq!(xp_for_volume(2000.0), 40);
    }
}
