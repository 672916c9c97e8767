use std::fmt;

/// Why `git switch` did not move HEAD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchError {
    /// Git resolved the name to the branch that is already checked out
    AlreadyOn(String),
    Failed(String),
}

impl fmt::Display for SwitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyOn(branch) => write!(f, "already on branch '{branch}'"),
            Self::Failed(output) => write!(f, "error switching branch: {output}"),
        }
    }
}

impl std::error::Error for SwitchError {}

/// Why `git branch --delete` refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteError {
    /// The branch has commits not merged into HEAD or its upstream; a force delete
    /// would discard them
    Unmerged { branch: String, message: String },
    Failed(String),
}

impl fmt::Display for DeleteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmerged { message, .. } | Self::Failed(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for DeleteError {}
