use std::fmt;

/// How a session, interactive or direct, ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Switched(String),
    /// Switched through the direct path after resolving a unique fuzzy match
    FuzzySwitched(String),
    AlreadyOnBranch(String),
    Deleted(String),
    Cancelled,
    Failed(String),
}

impl SessionOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The one-line message printed after the UI is gone. `None` for a cancel.
    pub fn final_message(&self) -> Option<String> {
        match self {
            Self::Cancelled => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Switched(branch) => write!(f, "▶ Switched to branch '{branch}'"),
            Self::FuzzySwitched(branch) => {
                write!(f, "▶ Fuzzy match found; switched to branch '{branch}'")
            }
            Self::AlreadyOnBranch(branch) => write!(f, "▶ Already on branch '{branch}'"),
            Self::Deleted(branch) => write!(f, "Branch '{branch}' deleted successfully"),
            Self::Cancelled => Ok(()),
            Self::Failed(detail) => write!(f, "Error: {detail}"),
        }
    }
}
