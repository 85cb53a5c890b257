//! Exercise and workout plan definitions.

use uuid::Uuid;

use crate::game::errors::GameError;
use crate::game::notify::Notifier;
use crate::game::types::{Exercise, WorkoutPlan};
use crate::logutil::escape_log;
use crate::validation::sanitize_title;

/// Register a new exercise. Its in-session name is `Shadow <name>`.
pub fn add_exercise<'a>(
    exercises: &'a mut Vec<Exercise>,
    name: &str,
    muscle_target: &str,
    notifier: &mut dyn Notifier,
) -> Result<&'a Exercise, GameError> {
    let Some(name) = sanitize_title(name) else {
        notifier.post("Invalid Technique Name");
        return Err(GameError::InvalidInput("exercise name is empty".to_string()));
    };
    let muscle_target = sanitize_title(muscle_target).unwrap_or_default();

    exercises.push(Exercise {
        id: format!("ex-{}", Uuid::new_v4().simple()),
        dungeon_name: format!("Shadow {}", name),
        name,
        muscle_target,
    });
    notifier.post("New Technique Added to Database");
    Ok(&exercises[exercises.len() - 1])
}

/// Define a plan. Needs a name and at least one exercise.
pub fn add_workout_plan<'a>(
    plans: &'a mut Vec<WorkoutPlan>,
    name: &str,
    exercise_ids: &[String],
    notifier: &mut dyn Notifier,
) -> Result<&'a WorkoutPlan, GameError> {
    let Some(name) = sanitize_title(name) else {
        notifier.post("Invalid Raid Name");
        return Err(GameError::InvalidInput("plan name is empty".to_string()));
    };
    if exercise_ids.is_empty() {
        notifier.post("Select at least one exercise.");
        return Err(GameError::InvalidInput(format!(
            "plan '{}' has no exercises",
            escape_log(&name)
        )));
    }

    plans.push(WorkoutPlan {
        id: format!("plan-{}", Uuid::new_v4().simple()),
        name,
        exercise_ids: exercise_ids.to_vec(),
    });
    notifier.post("New Raid Plan Configured");
    Ok(&plans[plans.len() - 1])
}

pub fn find_exercise<'a>(exercises: &'a [Exercise], id: &str) -> Option<&'a Exercise> {
    exercises.iter().find(|e| e.id == id)
}

pub fn find_plan<'a>(plans: &'a [WorkoutPlan], id: &str) -> Option<&'a WorkoutPlan> {
    plans.iter().find(|p| p.id == id)
}

/// Exercises a plan offers, in plan order. An unknown plan offers everything.
/// Ids that no longer resolve are skipped.
pub fn plan_exercises<'a>(
    plans: &[WorkoutPlan],
    exercises: &'a [Exercise],
    plan_id: &str,
) -> Vec<&'a Exercise> {
    match find_plan(plans, plan_id) {
        Some(plan) => plan
            .exercise_ids
            .iter()
            .filter_map(|id| find_exercise(exercises, id))
            .collect(),
        None => exercises.iter().collect(),
    }
}
