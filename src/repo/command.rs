//! Pseudo-command grammar understood by the simulator.

/// Message used when a commit command carries no quoted message.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update files";

/// A parsed pseudo-command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RepoCommand {
    /// `git init`
    Init,
    /// `modify <fileId>`
    Modify { file_id: String },
    /// `git add .`, `git add --all`, `git add -A`
    AddAll,
    /// `git add <path>`, matched against file id or file name
    AddPath { path: String },
    /// `git commit [-m] '<message>'`
    Commit { message: String },
    /// Anything else. Applying it leaves the repository unchanged.
    Unrecognized,
}

impl RepoCommand {
    /// Parse a command string. Never fails; unknown input is
    /// [`RepoCommand::Unrecognized`].
    ///
    /// ```rust
    /// use gitquest::repo::RepoCommand;
    ///
    /// assert_eq!(RepoCommand::parse("git add -A"), RepoCommand::AddAll);
    /// assert_eq!(
    ///     RepoCommand::parse("git commit -m \"Fix typo\""),
    ///     RepoCommand::Commit { message: "Fix typo".to_string() }
    /// );
    /// assert_eq!(RepoCommand::parse("git push"), RepoCommand::Unrecognized);
    /// ```
    pub fn parse(input: &str) -> Self {
        if let Some(rest) = input.strip_prefix("modify ") {
            let file_id = rest.trim();
            if file_id.is_empty() {
                return Self::Unrecognized;
            }
            return Self::Modify {
                file_id: file_id.to_string(),
            };
        }

        if let Some(rest) = input.strip_prefix("git add ") {
            return match rest.trim() {
                "." | "--all" | "-A" => Self::AddAll,
                path => Self::AddPath {
                    path: path.to_string(),
                },
            };
        }

        if let Some(rest) = input.strip_prefix("git commit") {
            if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
                return Self::Unrecognized;
            }
            let message = quoted_message(rest).unwrap_or(DEFAULT_COMMIT_MESSAGE);
            return Self::Commit {
                message: message.to_string(),
            };
        }

        if input == "git init" {
            return Self::Init;
        }

        Self::Unrecognized
    }
}

fn is_quote(c: char) -> bool {
    c == '\'' || c == '"'
}

/// Text between the opening quote and the last quote of the command.
///
/// `rest` is whatever follows `git commit`; an optional ` -m` and exactly one
/// space must precede the opening quote.
fn quoted_message(rest: &str) -> Option<&str> {
    let rest = rest.strip_prefix(" -m").unwrap_or(rest);
    let rest = rest.strip_prefix(' ')?;
    let body = rest.strip_prefix(is_quote)?;
    let end = body.rfind(is_quote)?;
    Some(&body[..end])
}
