/// Training sessions, archive edits and roster changes through the game API.
mod common;

use arise::game::dungeon::{SetEdit, UNKNOWN_EXERCISE_NAME};
use arise::game::GameError;

use common::fresh_game;

#[test]
fn volume_drives_xp() {
    let mut game = fresh_game(&[]);
    game.start_session("default-full").unwrap();
    game.log_set("e2", 20.0, 10).unwrap();
    game.log_set("e4", 30.0, 5).unwrap();
    assert_eq!(game.session().running_volume(), 350.0);

    let report = game.finish_session().unwrap();
    assert!(report.cleared());
    assert_eq!(report.log.total_volume, 350.0);
    assert_eq!(report.log.xp_earned, 7);
    assert_eq!(report.log.plan_name, "Standard Raid");
    assert_eq!(game.player().xp, 7);
    assert!(!game.session().is_active());

    let notes = game.drain_notifications();
    assert_eq!(notes.first().map(String::as_str), Some("ENTERING Standard Raid..."));
    assert!(notes.contains(&"DUNGEON CLEARED. TOTAL LOAD: 350kg. GAINED 7 XP.".to_string()));
}

#[test]
fn empty_session_still_commits() {
    let mut game = fresh_game(&[]);
    game.start_session("default-full").unwrap();
    let report = game.finish_session().unwrap();
    assert_eq!(report.log.xp_earned, 0);
    assert!(report.log.sets.is_empty());
    assert_eq!(game.player().dungeon_logs.len(), 1);
    assert!(game
        .drain_notifications()
        .contains(&"DUNGEON FAILED. NO WORK DONE.".to_string()));
    assert!(game.player().history.is_empty());
}

#[test]
fn logs_are_newest_first() {
    let mut game = fresh_game(&[]);
    for weight in [10.0, 20.0] {
        game.start_session("default-full").unwrap();
        game.log_set("e1", weight, 10).unwrap();
        game.finish_session().unwrap();
    }
    let volumes: Vec<_> = game
        .player()
        .dungeon_logs
        .iter()
        .map(|l| l.total_volume)
        .collect();
    assert_eq!(volumes, [200.0, 100.0]);
}

#[test]
fn edits_never_touch_xp() {
    let mut game = fresh_game(&[]);
    game.start_session("default-full").unwrap();
    let set = game.log_set("e5", 100.0, 5).unwrap();
    let log = game.finish_session().unwrap().log;
    let xp_before = game.player().xp;

    game.open_log(log.id).unwrap();
    game.edit_log_set(set.id, SetEdit::Weight(140.0)).unwrap();
    game.edit_log_set(set.id, SetEdit::Reps(8)).unwrap();
    let updated = game.commit_log_edit().unwrap();

    assert_eq!(updated.total_volume, 1120.0);
    assert_eq!(updated.xp_earned, log.xp_earned);
    assert_eq!(game.player().xp, xp_before);
    assert_eq!(game.player().dungeon_logs.len(), 1);
    assert_eq!(game.player().dungeon_logs[0].sets[0].weight, 140.0);
    assert!(game.drain_notifications().contains(&"Archives Updated.".to_string()));
}

#[test]
fn discarded_edit_leaves_archive_alone() {
    let mut game = fresh_game(&[]);
    game.start_session("default-full").unwrap();
    let set = game.log_set("e1", 0.0, 20).unwrap();
    let log = game.finish_session().unwrap().log;

    game.open_log(log.id).unwrap();
    game.edit_log_set(set.id, SetEdit::Reps(50)).unwrap();
    game.discard_log_edit();
    assert_eq!(game.player().dungeon_logs[0], log);
    assert!(matches!(game.edit_log_set(set.id, SetEdit::Reps(1)), Err(GameError::NotEditing)));
}

#[test]
fn session_state_is_enforced() {
    let mut game = fresh_game(&[]);
    assert!(matches!(game.log_set("e1", 10.0, 1), Err(GameError::NoActiveSession)));
    assert!(matches!(game.finish_session(), Err(GameError::NoActiveSession)));
    game.start_session("default-full").unwrap();
    assert!(matches!(
        game.start_session("default-full"),
        Err(GameError::SessionAlreadyActive)
    ));
    assert!(game.log_set("e1", -5.0, 1).is_err());
}

#[test]
fn unknown_exercise_and_new_plans() {
    let mut game = fresh_game(&[]);
    let lunge = game.add_exercise("Lunge", "Legs").unwrap();
    let plan = game
        .add_workout_plan("Leg Day", &[lunge.clone(), "e2".to_string()])
        .unwrap();
    let offered: Vec<_> = game
        .plan_exercises(&plan)
        .iter()
        .map(|e| e.dungeon_name.clone())
        .collect();
    assert_eq!(offered, ["Shadow Lunge", "Titan Stand"]);

    game.start_session(&plan).unwrap();
    let set = game.log_set("retired", 10.0, 10).unwrap();
    assert_eq!(set.exercise_name, UNKNOWN_EXERCISE_NAME);
    let report = game.finish_session().unwrap();
    assert_eq!(report.log.plan_name, "Leg Day");
}
