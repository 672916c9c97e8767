pub mod cli;
pub mod error;
pub mod mock;
pub mod provider;

pub use cli::CliGitProvider;
pub use error::{DeleteError, SwitchError};
pub use provider::GitProvider;

use crate::constants::{CURRENT_BRANCH_MARKER, DETACHED_HEAD_PREFIX};

/// Local branches in listing order, plus the checked-out one (if any).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchListing {
    pub names: Vec<String>,
    pub current: Option<String>,
}

impl BranchListing {
    pub fn new(names: Vec<String>, current: Option<String>) -> Self {
        Self { names, current }
    }

    pub fn is_current(&self, name: &str) -> bool {
        self.current.as_deref() == Some(name)
    }
}

/// Parse `git branch --format=%(HEAD)%(refname:short)` output.
///
/// Each line is the HEAD marker (`*` or a space) followed by the branch name.
/// Detached-HEAD pseudo entries such as `(HEAD detached at 1a2b3c)` are skipped,
/// which leaves `current` unset.
pub fn parse_branch_list(output: &str) -> BranchListing {
    let mut listing = BranchListing::default();

    for line in output.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let (is_current, name) = match line.strip_prefix(CURRENT_BRANCH_MARKER) {
            Some(rest) => (true, rest.trim()),
            None => (false, line.trim()),
        };
        if name.is_empty() || name.starts_with(DETACHED_HEAD_PREFIX) {
            continue;
        }
        if is_current {
            listing.current = Some(name.to_string());
        }
        listing.names.push(name.to_string());
    }

    listing
}
