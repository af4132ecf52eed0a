//! Whole-catalog validation using `Validation`.
//!
//! Every check runs and every violation is collected, so a curriculum author
//! sees all problems in one pass instead of fixing them one at a time.

use crate::catalog::error::CatalogViolation;
use crate::catalog::{Level, Question};
use crate::evaluator::normalize_command;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a single validation check.
pub type CatalogCheck = Validation<(), NonEmptyVec<CatalogViolation>>;

fn require(ok: bool, violation: impl FnOnce() -> CatalogViolation) -> CatalogCheck {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

/// Validate a list of levels, accumulating ALL violations.
///
/// ```rust
/// use gitquest::catalog::{validate, LevelBuilder};
///
/// let levels = vec![
///     LevelBuilder::new("a").title("A").order(1).prerequisite("missing").build().unwrap(),
///     LevelBuilder::new("a").title("A again").order(2).build().unwrap(),
/// ];
///
/// let result = validate(&levels);
/// assert!(result.is_failure());
/// ```
pub fn validate(levels: &[Level]) -> CatalogCheck {
    let mut checks: Vec<CatalogCheck> = Vec::new();

    let known: HashSet<&str> = levels.iter().map(|l| l.id.as_str()).collect();
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();

    for level in levels {
        let id = level.id.as_str();
        let first_sighting = seen.insert(id);
        if !first_sighting && reported.insert(id) {
            checks.push(Validation::fail(CatalogViolation::DuplicateLevel(
                id.to_string(),
            )));
        }

        for prerequisite in &level.prerequisites {
            checks.push(require(prerequisite != &level.id, || {
                CatalogViolation::SelfPrerequisite(level.id.clone())
            }));
            checks.push(require(known.contains(prerequisite.as_str()), || {
                CatalogViolation::UnknownPrerequisite {
                    level: level.id.clone(),
                    prerequisite: prerequisite.clone(),
                }
            }));
        }

        checks.extend(check_question_ids(level));
        checks.extend(level.questions.iter().map(check_question));
    }

    Validation::all_vec(checks).map(|_| ())
}

fn check_question_ids(level: &Level) -> Vec<CatalogCheck> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    level
        .questions
        .iter()
        .map(|q| q.id())
        .filter(|id| !seen.insert(*id) && reported.insert(*id))
        .map(|id| {
            Validation::fail(CatalogViolation::DuplicateQuestion {
                level: level.id.clone(),
                question: id.to_string(),
            })
        })
        .collect()
}

fn check_question(question: &Question) -> CatalogCheck {
    match question {
        Question::SingleChoice(q) => require(q.correct_answer < q.options.len(), || {
            CatalogViolation::AnswerOutOfRange {
                question: q.id.clone(),
                index: q.correct_answer,
                options: q.options.len(),
            }
        }),
        Question::Ordering(q) => {
            let distinct: HashSet<usize> = q.correct_order.iter().copied().collect();
            let valid = !q.correct_order.is_empty()
                && distinct.len() == q.correct_order.len()
                && q.correct_order.iter().all(|&i| i < q.steps.len());
            require(valid, || CatalogViolation::InvalidOrdering {
                question: q.id.clone(),
                steps: q.steps.len(),
            })
        }
        Question::ButtonFlow(q) => {
            let checks: Vec<CatalogCheck> = q
                .expected_sequence
                .iter()
                .map(|button| {
                    require(q.button(button).is_some(), || {
                        CatalogViolation::UnknownButton {
                            question: q.id.clone(),
                            button: button.clone(),
                        }
                    })
                })
                .collect();
            Validation::all_vec(checks).map(|_| ())
        }
        Question::InputCommand(q) => {
            let usable = q
                .correct_answers
                .iter()
                .any(|a| !normalize_command(a).is_empty());
            require(usable, || CatalogViolation::NoAcceptedAnswer(q.id.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        ButtonFlowQuestion, ButtonSpec, InputCommandQuestion, LevelBuilder, OrderingQuestion,
        SingleChoiceQuestion,
    };

    fn violations(levels: &[Level]) -> Vec<CatalogViolation> {
        match validate(levels) {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    fn choice(id: &str, options: usize, correct: usize) -> Question {
        Question::SingleChoice(SingleChoiceQuestion {
            id: id.to_string(),
            title: id.to_string(),
            description: None,
            prompt: "?".to_string(),
            options: (0..options).map(|i| format!("option {i}")).collect(),
            correct_answer: correct,
            explanation: None,
        })
    }

    #[test]
    fn valid_catalog_passes() {
        let levels = vec![
            LevelBuilder::new("a")
                .title("A")
                .order(1)
                .question(choice("q1", 3, 2))
                .build()
                .unwrap(),
            LevelBuilder::new("b")
                .title("B")
                .order(2)
                .prerequisite("a")
                .build()
                .unwrap(),
        ];

        assert!(validate(&levels).is_success());
    }

    #[test]
    fn empty_catalog_is_valid() {
        assert!(validate(&[]).is_success());
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let levels = vec![
            LevelBuilder::new("a")
                .title("A")
                .order(1)
                .prerequisite("a")
                .prerequisite("ghost")
                .question(choice("q1", 2, 5))
                .question(choice("q1", 2, 0))
                .build()
                .unwrap(),
            LevelBuilder::new("a").title("A2").order(2).build().unwrap(),
        ];

        let found = violations(&levels);

        assert_eq!(found.len(), 5);
        assert!(found.contains(&CatalogViolation::DuplicateLevel("a".to_string())));
        assert!(found.contains(&CatalogViolation::SelfPrerequisite("a".to_string())));
        assert!(found.contains(&CatalogViolation::UnknownPrerequisite {
            level: "a".to_string(),
            prerequisite: "ghost".to_string(),
        }));
        assert!(found.contains(&CatalogViolation::DuplicateQuestion {
            level: "a".to_string(),
            question: "q1".to_string(),
        }));
        assert!(found.contains(&CatalogViolation::AnswerOutOfRange {
            question: "q1".to_string(),
            index: 5,
            options: 2,
        }));
    }

    #[test]
    fn duplicate_level_reported_once() {
        let levels: Vec<Level> = (0..3)
            .map(|i| LevelBuilder::new("dup").title("D").order(i).build().unwrap())
            .collect();

        assert_eq!(
            violations(&levels),
            vec![CatalogViolation::DuplicateLevel("dup".to_string())]
        );
    }

    #[test]
    fn ordering_must_use_distinct_in_range_indices() {
        let ordering = |id: &str, order: Vec<usize>| {
            Question::Ordering(OrderingQuestion {
                id: id.to_string(),
                title: id.to_string(),
                description: None,
                steps: vec!["a".into(), "b".into(), "c".into()],
                correct_order: order,
            })
        };
        let level = LevelBuilder::new("l")
            .title("L")
            .order(1)
            .question(ordering("ok", vec![2, 0, 1]))
            .question(ordering("subset", vec![1, 0]))
            .question(ordering("repeat", vec![0, 0, 1]))
            .question(ordering("range", vec![0, 3]))
            .question(ordering("empty", vec![]))
            .build()
            .unwrap();

        let bad: Vec<String> = violations(&[level])
            .into_iter()
            .map(|v| match v {
                CatalogViolation::InvalidOrdering { question, .. } => question,
                other => panic!("unexpected violation {other:?}"),
            })
            .collect();
        assert_eq!(bad, vec!["repeat", "range", "empty"]);
    }

    #[test]
    fn button_flow_sequence_must_name_known_buttons() {
        let level = LevelBuilder::new("l")
            .title("L")
            .order(1)
            .question(Question::ButtonFlow(ButtonFlowQuestion {
                id: "flow".to_string(),
                title: "Flow".to_string(),
                description: None,
                expected_sequence: vec!["modify".into(), "push".into(), "pull".into()],
                buttons: vec![ButtonSpec::new("modify", "Modify", "Edit a file")],
            }))
            .build()
            .unwrap();

        assert_eq!(violations(&[level]).len(), 2);
    }

    #[test]
    fn input_question_needs_a_usable_answer() {
        let level = LevelBuilder::new("l")
            .title("L")
            .order(1)
            .question(Question::InputCommand(InputCommandQuestion {
                id: "blank".to_string(),
                title: "Blank".to_string(),
                description: None,
                prompt: "type".to_string(),
                correct_answers: vec!["   ".to_string()],
                hint: None,
            }))
            .build()
            .unwrap();

        assert_eq!(
            violations(&[level]),
            vec![CatalogViolation::NoAcceptedAnswer("blank".to_string())]
        );
    }
}
