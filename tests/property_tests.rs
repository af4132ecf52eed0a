//! Property-based tests for the simulator, progression, achievements and
//! scoring.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use chrono::{TimeZone, Utc};
use gitquest::achievements::{AchievementId, AchievementState};
use gitquest::catalog::{builtin, LevelBuilder, LevelCatalog};
use gitquest::evaluator::normalize_command;
use gitquest::progress::{ProgressState, ProgressionEngine};
use gitquest::repo::{apply_command_with, GitRepoState};
use gitquest::scoring::Scoreboard;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

prop_compose! {
    fn arbitrary_command()(variant in 0..9u8, file in 1..4u8, msg in "[a-z ]{0,12}") -> String {
        match variant {
            0 => "git init".to_string(),
            1 => format!("modify file{file}"),
            2 => "git add .".to_string(),
            3 => "git add -A".to_string(),
            4 => format!("git add file{file}"),
            5 => "git add README.md".to_string(),
            6 => format!("git commit -m '{msg}'"),
            7 => "git commit".to_string(),
            _ => msg,
        }
    }
}

fn chain_catalog(len: usize) -> LevelCatalog {
    let levels = (0..len)
        .map(|i| {
            let builder = LevelBuilder::new(format!("level-{i}"))
                .title(format!("Level {i}"))
                .order(i as i32);
            let builder = if i > 0 {
                builder.prerequisite(format!("level-{}", i - 1))
            } else {
                builder
            };
            builder.build().unwrap()
        })
        .collect();
    LevelCatalog::new(levels).unwrap()
}

/// Level `i` requires every earlier level `j` with `masks[i][j]` set, so
/// some later levels have no prerequisites and some have several.
fn dag_catalog(len: usize, masks: &[Vec<bool>]) -> LevelCatalog {
    let levels = (0..len)
        .map(|i| {
            (0..i)
                .filter(|&j| masks[i][j])
                .fold(
                    LevelBuilder::new(format!("level-{i}"))
                        .title(format!("Level {i}"))
                        .order(i as i32),
                    |builder, j| builder.prerequisite(format!("level-{j}")),
                )
                .build()
                .unwrap()
        })
        .collect();
    LevelCatalog::new(levels).unwrap()
}

fn replay(commands: &[String], seed: u64) -> Vec<GitRepoState> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut states = vec![GitRepoState::empty()];
    for command in commands {
        let next = apply_command_with(states.last().unwrap(), command, &mut rng);
        states.push(next);
    }
    states
}

proptest! {
    #[test]
    fn simulator_keeps_at_most_one_head(
        commands in prop::collection::vec(arbitrary_command(), 0..30),
        seed in any::<u64>(),
    ) {
        for state in replay(&commands, seed) {
            let heads = state.commits.iter().filter(|c| c.is_head).count();
            prop_assert!(heads <= 1);
            if !state.commits.is_empty() {
                prop_assert_eq!(heads, 1);
                prop_assert!(state.commits.last().unwrap().is_head);
            }
        }
    }

    #[test]
    fn simulator_accepts_any_input(input in ".{0,40}", seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let state = GitRepoState::example();
        let next = apply_command_with(&state, &input, &mut rng);
        prop_assert!(next.commits.len() <= 1);
    }

    #[test]
    fn init_always_resets(
        commands in prop::collection::vec(arbitrary_command(), 0..20),
        seed in any::<u64>(),
    ) {
        let states = replay(&commands, seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let reset = apply_command_with(states.last().unwrap(), "git init", &mut rng);
        prop_assert_eq!(reset, GitRepoState::empty());
    }

    #[test]
    fn simulation_is_deterministic_for_a_seed(
        commands in prop::collection::vec(arbitrary_command(), 0..20),
        seed in any::<u64>(),
    ) {
        prop_assert_eq!(replay(&commands, seed), replay(&commands, seed));
    }

    #[test]
    fn unlock_level_is_idempotent(len in 1..8usize, pick in 0..8usize) {
        let catalog = chain_catalog(len);
        let engine = ProgressionEngine::new(&catalog);
        let id = format!("level-{}", pick % len);

        let once = engine.unlock_level(&engine.fresh(), &id);
        prop_assert_eq!(engine.unlock_level(&once, &id), once.clone());
        prop_assert!(once.is_unlocked(&id));
    }

    #[test]
    fn completions_only_grow_and_respect_prerequisites(
        len in 1..8usize,
        picks in prop::collection::vec(0..10usize, 0..20),
    ) {
        let catalog = chain_catalog(len);
        let engine = ProgressionEngine::new(&catalog);
        let mut state = engine.initialize(&ProgressState::default());

        for pick in picks {
            let before = state.clone();
            state = engine.complete_level(&state, &format!("level-{pick}"));

            prop_assert!(before.completed_level_ids.is_subset(&state.completed_level_ids));
            prop_assert!(before.unlocked_level_ids.is_subset(&state.unlocked_level_ids));
            prop_assert!(state.completed_level_ids.is_subset(&state.unlocked_level_ids));
        }

        // Every level unlocked beyond the first has its prerequisites completed,
        // unless it was completed directly.
        for level in catalog.levels().iter().skip(1) {
            if state.is_unlocked(&level.id) && !state.is_completed(&level.id) {
                prop_assert!(level.prerequisites_met(&state.completed_level_ids));
            }
        }
    }

    #[test]
    fn unlocked_exactly_when_prerequisites_are_completed(
        len in 1..8usize,
        masks in prop::collection::vec(prop::collection::vec(any::<bool>(), 7), 7),
        picks in prop::collection::vec(0..10usize, 1..20),
    ) {
        let catalog = dag_catalog(len, &masks);
        let engine = ProgressionEngine::new(&catalog);
        let mut state = engine.initialize(&ProgressState::default());

        for pick in picks {
            state = engine.complete_level(&state, &format!("level-{pick}"));
            prop_assert!(state.completed_level_ids.is_subset(&state.unlocked_level_ids));
            if state.completed_level_ids.is_empty() {
                continue;
            }

            for level in catalog.levels().iter().skip(1) {
                let met = level.prerequisites_met(&state.completed_level_ids);
                if met {
                    prop_assert!(state.is_unlocked(&level.id), "{} should be unlocked", level.id);
                }
                if state.is_unlocked(&level.id) && !state.is_completed(&level.id) {
                    prop_assert!(met, "{} unlocked without its prerequisites", level.id);
                }
            }
        }
    }

    #[test]
    fn reset_returns_to_first_level_only(
        picks in prop::collection::vec(0..4usize, 0..10),
    ) {
        let catalog = builtin().unwrap();
        let engine = ProgressionEngine::new(&catalog);
        let played = picks
            .iter()
            .fold(engine.fresh(), |s, p| engine.complete_level(&s, &format!("level-{}", p + 1)));
        prop_assert!(!played.unlocked_level_ids.is_empty());

        let reset = engine.reset_progress();
        prop_assert_eq!(reset.unlocked_level_ids.len(), 1);
        prop_assert!(reset.is_unlocked("level-1"));
        prop_assert!(reset.completed_level_ids.is_empty());
    }

    #[test]
    fn achievement_unlock_keeps_first_timestamp(
        first in 0..1_000_000i64,
        later in prop::collection::vec(0..1_000_000i64, 1..5),
        which in 0..5usize,
    ) {
        let id = AchievementId::ALL[which];
        let at = |s: i64| Utc.timestamp_opt(s, 0).unwrap();
        let (mut state, newly) = AchievementState::new().unlock(id, at(first));
        prop_assert!(newly);

        for t in later {
            let (next, newly) = state.unlock(id, at(t));
            prop_assert!(!newly);
            state = next;
        }
        prop_assert_eq!(state.unlocked_at(id), Some(at(first)));
    }

    #[test]
    fn wrong_answer_always_resets_combo(answers in prop::collection::vec(any::<bool>(), 0..30)) {
        let mut score = Scoreboard::new();
        let mut streak = 0u32;
        for correct in answers {
            score = score.record(correct);
            streak = if correct { streak + 1 } else { 0 };
            prop_assert_eq!(score.combo, streak);
        }
    }

    #[test]
    fn normalization_is_idempotent(input in "[ \\ta-z.-]{0,30}") {
        let once = normalize_command(&input);
        prop_assert_eq!(normalize_command(&once), once.clone());
        prop_assert!(!once.starts_with(' ') && !once.ends_with(' '));
        prop_assert!(!once.contains("  "));
    }
}
