//! End-to-end play through a session, including reloading saved records.

use gitquest::achievements::AchievementId;
use gitquest::catalog::builtin;
use gitquest::evaluator::{Correctness, Response};
use gitquest::persistence::{FileStore, KeyValueStore, MemoryStore};
use gitquest::settings::Theme;
use gitquest::{GameConfig, LevelStatus, Session};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn completing_level_one_unlocks_and_recommends_level_two() {
    let mut session =
        Session::open(builtin().unwrap(), GameConfig::default(), MemoryStore::new()).unwrap();

    let unlocked = session.complete_level("level-1");

    assert_eq!(unlocked, vec![AchievementId::FirstLevelComplete]);
    assert_eq!(session.status_of("level-2"), Some(LevelStatus::Unlocked));
    assert_eq!(
        session.progress().current_recommended_level_id.as_deref(),
        Some("level-2")
    );
}

#[test]
fn three_correct_answers_unlock_combo_once() {
    let mut session =
        Session::open(builtin().unwrap(), GameConfig::default(), MemoryStore::new()).unwrap();
    let catalog = builtin().unwrap();
    let mut run = gitquest::play::LevelRun::new(catalog.get("level-4").unwrap());

    let mut earned = Vec::new();
    for (question, answer) in [("q4-1", 1), ("q4-2", 1)] {
        let verdict = run.submit(question, &Response::Choice(answer)).unwrap();
        assert_eq!(verdict, Correctness::Complete);
        earned.extend(session.record_answer(verdict.is_correct()));
    }
    let verdict = run
        .submit("q4-3", &Response::Text("git  log   --oneline".to_string()))
        .unwrap();
    earned.extend(session.record_answer(verdict.is_correct()));
    earned.extend(session.record_answer(true));

    assert_eq!(
        earned,
        vec![AchievementId::FirstCorrect, AchievementId::ThreeCombo]
    );
    assert!(run.is_complete());
}

#[test]
fn records_survive_a_reload() {
    let config = GameConfig::default();
    let mut session = Session::open(builtin().unwrap(), config.clone(), MemoryStore::new()).unwrap();
    session.complete_level("level-1");
    session.complete_level("level-2");
    session.change_theme(Theme::Minimal);
    let unlocked_at = session
        .achievements()
        .unlocked_at(AchievementId::FirstLevelComplete);

    let store = session.into_store();
    let reopened = Session::open(builtin().unwrap(), config, store).unwrap();

    assert!(reopened.progress().is_completed("level-2"));
    assert_eq!(reopened.status_of("level-3"), Some(LevelStatus::Unlocked));
    assert_eq!(reopened.settings().theme, Theme::Minimal);
    assert_eq!(
        reopened
            .achievements()
            .unlocked_at(AchievementId::FirstLevelComplete),
        unlocked_at
    );
    assert!(reopened.achievements().is_unlocked(AchievementId::ThemeSwitcher));
}

#[test]
fn file_store_session_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = GameConfig::default();

    let mut session =
        Session::open(builtin().unwrap(), config.clone(), FileStore::new(dir.path())).unwrap();
    session.complete_level("level-1");
    drop(session);

    let reopened = Session::open(builtin().unwrap(), config, FileStore::new(dir.path())).unwrap();
    assert!(reopened.progress().is_completed("level-1"));
    assert!(dir.path().join("gitGame_progress.json").exists());
}

#[test]
fn corrupt_records_fall_back_to_first_run() {
    let mut store = MemoryStore::new();
    store.set("gitGame:progress", "not json").unwrap();
    store.set("gitGame:achievements", "[").unwrap();

    let session = Session::open(builtin().unwrap(), GameConfig::default(), store).unwrap();

    assert_eq!(session.status_of("level-1"), Some(LevelStatus::Unlocked));
    assert_eq!(session.achievements().unlocked_ids().count(), 0);
    let saved = session.store().get("gitGame:progress").unwrap().unwrap();
    assert!(saved.contains("level-1"));
}

#[test]
fn challenge_flow_scores_and_finishes() {
    let mut session =
        Session::open(builtin().unwrap(), GameConfig::default(), MemoryStore::new()).unwrap();
    let mut challenge = session.start_challenge(&mut StdRng::seed_from_u64(5));
    let size = challenge.questions().len();

    let mut answered = 0;
    while !challenge.is_finished() {
        session.record_challenge_answer(&mut challenge, false);
        answered += 1;
    }

    let summary = challenge.summary();
    assert_eq!(answered, size);
    assert_eq!(summary.wrong, size);
    assert!(!summary.full_clear);
    assert!(!session.achievements().is_unlocked(AchievementId::FirstCorrect));
}

#[test]
fn namespace_changes_storage_keys() {
    let config = GameConfig::from_json_str(r#"{"storageNamespace":"demo"}"#).unwrap();
    let session = Session::open(builtin().unwrap(), config, MemoryStore::new()).unwrap();

    assert!(session.store().get("demo:progress").unwrap().is_some());
    assert!(session.store().get("gitGame:progress").unwrap().is_none());
}
