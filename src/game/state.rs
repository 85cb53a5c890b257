use chrono::NaiveDate;

use crate::game::types::{Exercise, InventoryItem, Player, Quest, QuestKind, WorkoutPlan};

/// Id of the plan every fresh roster starts with.
pub const DEFAULT_PLAN_ID: &str = "default-full";

/// Quests a fresh player starts with.
pub fn seed_quests() -> Vec<Quest> {
    vec![
        Quest::new(
            "daily-force",
            "PREPARE TO BECOME POWERFUL",
            "20 Push-ups, 20 Sit-ups, 20 Squats, 2km Run",
            QuestKind::Daily,
        )
        .with_rewards(100, 50)
        .with_penalty(),
        Quest::new(
            "habit-read",
            "Mental Sharpening",
            "Read 20 pages of a book",
            QuestKind::Normal,
        )
        .with_rewards(20, 10),
        Quest::new(
            "habit-water",
            "Elixir Consumption",
            "Drink 3L of water",
            QuestKind::Normal,
        )
        .with_rewards(15, 5),
    ]
}

fn exercise(id: &str, name: &str, dungeon_name: &str, muscle_target: &str) -> Exercise {
    Exercise {
        id: id.to_string(),
        name: name.to_string(),
        dungeon_name: dungeon_name.to_string(),
        muscle_target: muscle_target.to_string(),
    }
}

pub fn default_exercises() -> Vec<Exercise> {
    vec![
        exercise("e1", "Push Up", "Earth Push", "Chest"),
        exercise("e2", "Squat", "Titan Stand", "Legs"),
        exercise("e3", "Pull Up", "Sky Reach", "Back"),
        exercise("e4", "Bench Press", "Iron Press", "Chest"),
        exercise("e5", "Deadlift", "Shadow Lift", "Back"),
    ]
}

pub fn default_workout_plans() -> Vec<WorkoutPlan> {
    vec![WorkoutPlan {
        id: DEFAULT_PLAN_ID.to_string(),
        name: "Standard Raid".to_string(),
        exercise_ids: default_exercises().into_iter().map(|e| e.id).collect(),
    }]
}

/// Everything that is persisted, one field per stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub quests: Vec<Quest>,
    pub inventory: Vec<InventoryItem>,
    pub exercises: Vec<Exercise>,
    pub workout_plans: Vec<WorkoutPlan>,
}

impl GameState {
    /// First-run state.
    pub fn seeded(username: &str, today: NaiveDate) -> Self {
        Self {
            player: Player::new(username, today),
            quests: seed_quests(),
            inventory: Vec::new(),
            exercises: default_exercises(),
            workout_plans: default_workout_plans(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_state_matches_first_run() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let state = GameState::seeded("Hunter", today);
        assert_eq!(state.player.essence_stones, 3);
        assert_eq!(state.quests.len(), 3);
        assert!(state.quests[0].penalty);
        assert!(state.inventory.is_empty());
        assert_eq!(state.exercises.len(), 5);
        assert_eq!(state.workout_plans[0].exercise_ids, ["e1", "e2", "e3", "e4", "e5"]);
    }
}
