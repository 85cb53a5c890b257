/// Quest list management: daily reset, completion, and user-defined habits.
///
/// Quests are owned by the caller and passed in together with the player;
/// every function here mutates in place and reports what happened.
use chrono::NaiveDate;
use uuid::Uuid;

use crate::game::errors::GameError;
use crate::game::history::{record_event, LedgerContext};
use crate::game::notify::Notifier;
use crate::game::progression::{grant_xp, LevelUpSummary};
use crate::game::types::{Player, Quest, QuestKind};
use crate::logutil::escape_log;
use crate::validation::{sanitize_text, sanitize_title};

/// The daily quest that can never be removed.
pub const MANDATORY_QUEST_ID: &str = "daily-force";
pub const CUSTOM_QUEST_XP: u64 = 10;
pub const CUSTOM_QUEST_GOLD: u64 = 5;

/// Rewards paid out by a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestCompletion {
    pub xp: u64,
    pub gold: u64,
    pub level_up: LevelUpSummary,
}

/// Clear every completion flag the first time a new calendar day is seen.
/// Returns true when a reset happened.
pub fn reset_if_new_day(
    player: &mut Player,
    quests: &mut [Quest],
    today: NaiveDate,
    notifier: &mut dyn Notifier,
) -> bool {
    if player.last_login_date == today {
        return false;
    }
    for quest in quests.iter_mut() {
        quest.completed = false;
    }
    log::debug!(
        "daily reset: {} -> {}, {} quests cleared",
        player.last_login_date,
        today,
        quests.len()
    );
    player.last_login_date = today;
    notifier.post("SYSTEM NOTICE: Daily Quests have been reset.");
    true
}

/// Complete a quest and pay its rewards.
///
/// Unknown or already-completed quests are a silent no-op (`None`).
pub fn complete_quest(
    quests: &mut [Quest],
    player: &mut Player,
    quest_id: &str,
    today: NaiveDate,
    notifier: &mut dyn Notifier,
) -> Option<QuestCompletion> {
    let ctx = LedgerContext::new(today, quests.len());
    let quest = quests
        .iter_mut()
        .find(|q| q.id == quest_id && !q.completed)?;

    quest.completed = true;
    let level_up = grant_xp(player, quest.xp_reward, &ctx, notifier);
    record_event(&mut player.history, &ctx, 0, true);
    player.gold = player.gold.saturating_add(quest.gold_reward);
    notifier.post(&format!("Quest Complete: {}", quest.title));

    Some(QuestCompletion {
        xp: quest.xp_reward,
        gold: quest.gold_reward,
        level_up,
    })
}

/// Remove a quest from the list. The mandatory quest is protected.
///
/// Returns the removed quest, or `None` when no quest has that id.
pub fn remove_quest(
    quests: &mut Vec<Quest>,
    quest_id: &str,
    notifier: &mut dyn Notifier,
) -> Result<Option<Quest>, GameError> {
    if quest_id == MANDATORY_QUEST_ID {
        notifier.post("SYSTEM ERROR: Cannot delete Mandatory System Quest.");
        return Err(GameError::ProtectedQuest(quest_id.to_string()));
    }
    let Some(idx) = quests.iter().position(|q| q.id == quest_id) else {
        return Ok(None);
    };
    let removed = quests.remove(idx);
    notifier.post("Quest removed from log.");
    Ok(Some(removed))
}

/// Append a user-defined NORMAL quest with the fixed custom rewards.
pub fn add_custom_quest<'a>(
    quests: &'a mut Vec<Quest>,
    title: &str,
    description: &str,
    notifier: &mut dyn Notifier,
) -> Result<&'a Quest, GameError> {
    let Some(title) = sanitize_title(title) else {
        notifier.post("Invalid Quest Title");
        return Err(GameError::InvalidInput("quest title is empty".to_string()));
    };
    let description = sanitize_text(description);

    let quest = Quest::new(
        &format!("custom-{}", Uuid::new_v4().simple()),
        &title,
        &description,
        QuestKind::Normal,
    )
    .with_rewards(CUSTOM_QUEST_XP, CUSTOM_QUEST_GOLD);
    log::debug!("custom quest {} added: {}", quest.id, escape_log(&quest.title));
    quests.push(quest);
    notifier.post("New Habit Created");
    Ok(&quests[quests.len() - 1])
}

/// One-line listing used by the CLI.
pub fn format_quest_list(quests: &[Quest]) -> String {
    if quests.is_empty() {
        return "No quests.".to_string();
    }
    quests
        .iter()
        .map(|q| {
            format!(
                "[{}] {} - {} (+{} XP, +{} G){}",
                if q.completed { "x" } else { " " },
                q.id,
                q.title,
                q.xp_reward,
                q.gold_reward,
                if q.penalty { " !" } else { "" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
