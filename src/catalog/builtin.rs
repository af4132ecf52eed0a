//! The built-in curriculum: init and status, staging, committing, history.

use crate::catalog::error::CatalogError;
use crate::catalog::{
    ButtonFlowQuestion, ButtonSpec, InputCommandQuestion, LevelBuilder, LevelCatalog, Question,
    SingleChoiceQuestion,
};
use crate::repo::GitRepoState;

fn flow(id: &str, title: &str, description: &str, expected: &[&str], buttons: Vec<ButtonSpec>) -> Question {
    Question::ButtonFlow(ButtonFlowQuestion {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        expected_sequence: expected.iter().map(|s| s.to_string()).collect(),
        buttons,
    })
}

fn choice(
    id: &str,
    title: &str,
    prompt: &str,
    options: &[&str],
    correct_answer: usize,
    explanation: &str,
) -> Question {
    Question::SingleChoice(SingleChoiceQuestion {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        prompt: prompt.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        correct_answer,
        explanation: Some(explanation.to_string()),
    })
}

fn input(id: &str, title: &str, prompt: &str, answers: &[&str], hint: &str) -> Question {
    Question::InputCommand(InputCommandQuestion {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        prompt: prompt.to_string(),
        correct_answers: answers.iter().map(|s| s.to_string()).collect(),
        hint: Some(hint.to_string()),
    })
}

/// Build the four built-in levels.
///
/// ```rust
/// let catalog = gitquest::catalog::builtin().unwrap();
/// assert_eq!(catalog.len(), 4);
/// assert_eq!(catalog.first().map(|l| l.id.as_str()), Some("level-1"));
/// ```
pub fn builtin() -> Result<LevelCatalog, CatalogError> {
    let init = LevelBuilder::new("level-1")
        .title("Initializing a repository and checking status")
        .description("Learn to create a Git repository and inspect it with git status")
        .order(1)
        .tag("basics")
        .tag("init")
        .tag("status")
        .question(flow(
            "q1-1",
            "Initialize a Git repository",
            "Run the actions in the right order to initialize a repository",
            &["init"],
            vec![
                ButtonSpec::new("init", "git init", "Initialize a Git repository").runs("git init"),
                ButtonSpec::new("status", "git status", "Show the repository status"),
            ],
        ))
        .question(choice(
            "q1-2",
            "What git status does",
            "What is the main purpose of git status?",
            &[
                "Show the commit history of the current branch",
                "Show the state of the working tree and the staging area",
                "Switch to another branch",
                "Commit changes to the repository",
            ],
            1,
            "git status lists which files are modified and which are staged.",
        ))
        .question(input(
            "q1-3",
            "Type the init command",
            "Type the command that initializes a Git repository named 'my-project'",
            &["git init", "git  init"],
            "Use the git init command",
        ))
        .build()?;

    let staging = LevelBuilder::new("level-2")
        .title("Staging files")
        .description("Learn to move changes into the staging area with git add")
        .order(2)
        .prerequisite("level-1")
        .tag("basics")
        .tag("add")
        .tag("staging")
        .question(flow(
            "q2-1",
            "Stage a file",
            "Walk through modifying a file and staging it",
            &["modify", "add"],
            vec![
                ButtonSpec::new("modify", "Modify file", "Edit README.md").runs("modify file1"),
                ButtonSpec::new("add", "git add README.md", "Stage the file")
                    .runs("git add README.md"),
                ButtonSpec::new("add-all", "git add .", "Stage every change").runs("git add ."),
            ],
        ))
        .question(choice(
            "q2-2",
            "Using git add",
            "Which command stages every modified file?",
            &["git add -a", "git add .", "git add *", "git add all"],
            1,
            "git add . stages every change under the current directory.",
        ))
        .question(input(
            "q2-3",
            "Stage a specific file",
            "Type the command that stages 'src/App.tsx'",
            &[
                "git add src/App.tsx",
                "git add ./src/App.tsx",
                "git  add  src/App.tsx",
            ],
            "Use git add followed by the file path",
        ))
        .build()?;

    let commit = LevelBuilder::new("level-3")
        .title("Committing changes")
        .description("Learn to record changes with git commit, including the -m and -v options")
        .order(3)
        .prerequisite("level-2")
        .tag("basics")
        .tag("commit")
        .initial_repo(GitRepoState::example())
        .question(flow(
            "q3-1",
            "The full commit workflow",
            "From editing a file to committing it",
            &["modify", "add", "commit"],
            vec![
                ButtonSpec::new("modify", "Modify file", "Edit the code").runs("modify file1"),
                ButtonSpec::new("add", "git add .", "Stage the changes").runs("git add ."),
                ButtonSpec::new("commit", "git commit -m", "Commit the changes")
                    .runs("git commit -m 'Update README'"),
            ],
        ))
        .question(choice(
            "q3-2",
            "What -m does",
            "What does the -m flag do in git commit -m 'message'?",
            &[
                "Sets the commit author",
                "Supplies the commit message without opening an editor",
                "Amends the previous commit",
                "Shows the commit history",
            ],
            1,
            "-m passes the commit message on the command line so no editor opens.",
        ))
        .question(choice(
            "q3-3",
            "What -v does",
            "What does the -v flag do in git commit -v?",
            &[
                "Prints detailed version information",
                "Shows the diff being committed in the editor",
                "Validates the commit message format",
                "Shows the commit history",
            ],
            1,
            "-v adds the full diff of the staged changes to the commit message editor.",
        ))
        .question(input(
            "q3-4",
            "Commit the changes",
            "Type the command that commits with the message 'Add new feature'",
            &[
                "git commit -m 'Add new feature'",
                "git commit -m \"Add new feature\"",
                "git commit -m Add new feature",
            ],
            "Use git commit -m followed by the message",
        ))
        .build()?;

    let history = LevelBuilder::new("level-4")
        .title("Browsing history")
        .description("Learn to read the commit history with git log, including --oneline")
        .order(4)
        .prerequisite("level-3")
        .tag("basics")
        .tag("log")
        .tag("history")
        .question(choice(
            "q4-1",
            "What git log does",
            "What is the main purpose of git log?",
            &[
                "Show the working tree status",
                "Show the commit history",
                "Show the staging area contents",
                "List branches",
            ],
            1,
            "git log prints the commit history of the current branch.",
        ))
        .question(choice(
            "q4-2",
            "git log --oneline",
            "What does git log --oneline do?",
            &[
                "Shows only the latest commit",
                "Shows the history one compact line per commit",
                "Shows commits from every branch",
                "Sorts commits oldest first",
            ],
            1,
            "--oneline prints each commit as its 7-character hash and message.",
        ))
        .question(input(
            "q4-3",
            "Compact history",
            "Type the command that shows the history one line per commit",
            &["git log --oneline", "git log --oneline ", "git  log  --oneline"],
            "Use git log --oneline",
        ))
        .build()?;

    LevelCatalog::new(vec![init, staging, commit, history])
}
