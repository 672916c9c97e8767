use crate::{
    fuzzy,
    git::{BranchListing, GitProvider, SwitchError},
    outcome::SessionOutcome,
};

/// Result of trying to act on a command-line branch argument without the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectSwitch {
    Done(SessionOutcome),
    /// Nothing resolved unambiguously, or switching to the match failed; open the
    /// picker with this query and show `error` inline
    Interactive {
        initial_query: String,
        error: Option<String>,
    },
}

/// Resolve `arg` to a branch and switch to it.
///
/// An exact name is handed to `git switch` first, so anything git accepts
/// (including names it would create from a remote) works. If that fails and
/// exactly one local branch fuzzy-matches, switch to that one instead. When
/// that switch fails too, the picker opens with git's error shown.
pub fn try_direct_switch(
    git: &dyn GitProvider,
    listing: &BranchListing,
    arg: &str,
) -> DirectSwitch {
    if listing.is_current(arg) {
        return DirectSwitch::Done(SessionOutcome::AlreadyOnBranch(arg.to_string()));
    }

    match git.switch_to(arg) {
        Ok(()) => return DirectSwitch::Done(SessionOutcome::Switched(arg.to_string())),
        Err(SwitchError::AlreadyOn(branch)) => {
            return DirectSwitch::Done(SessionOutcome::AlreadyOnBranch(branch));
        }
        Err(SwitchError::Failed(output)) => {
            log::debug!("direct switch to '{arg}' failed, trying fuzzy match: {output}");
        }
    }

    let candidates = fuzzy::filter(&listing.names, arg);
    let [branch] = candidates.as_slice() else {
        log::debug!(
            "'{arg}' fuzzy-matches {} branches, opening picker",
            candidates.len()
        );
        return DirectSwitch::Interactive {
            initial_query: arg.to_string(),
            error: None,
        };
    };

    if listing.is_current(branch) {
        return DirectSwitch::Done(SessionOutcome::AlreadyOnBranch((*branch).to_string()));
    }

    match git.switch_to(branch) {
        Ok(()) => DirectSwitch::Done(SessionOutcome::FuzzySwitched((*branch).to_string())),
        Err(SwitchError::AlreadyOn(name)) => {
            DirectSwitch::Done(SessionOutcome::AlreadyOnBranch(name))
        }
        Err(e @ SwitchError::Failed(_)) => {
            log::warn!("switch to fuzzy match '{branch}' failed: {e}");
            DirectSwitch::Interactive {
                initial_query: arg.to_string(),
                error: Some(e.to_string()),
            }
        }
    }
}
