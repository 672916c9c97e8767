use super::{BranchListing, DeleteError, SwitchError, provider::GitProvider};
use anyhow::Result;
use std::{cell::RefCell, collections::HashMap};

/// A call made against [`MockGitProvider`], recorded in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    ListBranches,
    SwitchTo(String),
    DeleteSafe(String),
    DeleteForce(String),
}

/// In-memory provider. Results are looked up per branch name and default to `Ok`.
#[derive(Default)]
pub struct MockGitProvider {
    pub listing: BranchListing,
    pub list_error: Option<String>,
    pub switch_results: RefCell<HashMap<String, Result<(), SwitchError>>>,
    pub delete_results: RefCell<HashMap<String, Result<(), DeleteError>>>,
    pub force_delete_results: RefCell<HashMap<String, Result<(), DeleteError>>>,
    pub calls: RefCell<Vec<GitCall>>,
}

impl MockGitProvider {
    pub fn with_branches(names: &[&str], current: Option<&str>) -> Self {
        Self {
            listing: BranchListing::new(
                names.iter().map(ToString::to_string).collect(),
                current.map(ToString::to_string),
            ),
            ..Self::default()
        }
    }

    pub fn fail_switch(&self, branch: &str, error: SwitchError) {
        self.switch_results
            .borrow_mut()
            .insert(branch.to_string(), Err(error));
    }

    pub fn fail_delete(&self, branch: &str, error: DeleteError) {
        self.delete_results
            .borrow_mut()
            .insert(branch.to_string(), Err(error));
    }

    pub fn fail_force_delete(&self, branch: &str, error: DeleteError) {
        self.force_delete_results
            .borrow_mut()
            .insert(branch.to_string(), Err(error));
    }

    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.borrow().clone()
    }

    /// Calls other than listing, i.e. the ones that change the repository.
    pub fn mutating_calls(&self) -> Vec<GitCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| **call != GitCall::ListBranches)
            .cloned()
            .collect()
    }
}

impl GitProvider for MockGitProvider {
    fn list_branches(&self) -> Result<BranchListing> {
        self.calls.borrow_mut().push(GitCall::ListBranches);
        if let Some(error) = &self.list_error {
            anyhow::bail!("{error}");
        }
        Ok(self.listing.clone())
    }

    fn switch_to(&self, branch: &str) -> Result<(), SwitchError> {
        self.calls
            .borrow_mut()
            .push(GitCall::SwitchTo(branch.to_string()));
        self.switch_results
            .borrow()
            .get(branch)
            .cloned()
            .unwrap_or(Ok(()))
    }

    fn delete_safe(&self, branch: &str) -> Result<(), DeleteError> {
        self.calls
            .borrow_mut()
            .push(GitCall::DeleteSafe(branch.to_string()));
        self.delete_results
            .borrow()
            .get(branch)
            .cloned()
            .unwrap_or(Ok(()))
    }

    fn delete_force(&self, branch: &str) -> Result<(), DeleteError> {
        self.calls
            .borrow_mut()
            .push(GitCall::DeleteForce(branch.to_string()));
        self.force_delete_results
            .borrow()
            .get(branch)
            .cloned()
            .unwrap_or(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_error_is_returned_and_recorded() {
        let git = MockGitProvider {
            list_error: Some("fatal: not a git repository".to_string()),
            ..MockGitProvider::with_branches(&["main"], Some("main"))
        };

        let err = git.list_branches().unwrap_err();
        assert_eq!(err.to_string(), "fatal: not a git repository");
        assert_eq!(git.calls(), vec![GitCall::ListBranches]);
        assert!(git.mutating_calls().is_empty());
    }

    #[test]
    fn test_listing_without_error_returns_branches() {
        let git = MockGitProvider::with_branches(&["main", "feature/x"], Some("main"));

        let listing = git.list_branches().unwrap();
        assert_eq!(listing, git.listing);
        assert_eq!(git.calls(), vec![GitCall::ListBranches]);
    }
}
