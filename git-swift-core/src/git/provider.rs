use super::{BranchListing, DeleteError, SwitchError};
use anyhow::Result;

/// The version-control operations the branch switcher depends on.
pub trait GitProvider {
    /// Local branches in the order git reports them, plus the checked-out branch.
    fn list_branches(&self) -> Result<BranchListing>;
    fn switch_to(&self, branch: &str) -> Result<(), SwitchError>;
    /// Delete only if fully merged; unmerged history is reported as
    /// [`DeleteError::Unmerged`].
    fn delete_safe(&self, branch: &str) -> Result<(), DeleteError>;
    fn delete_force(&self, branch: &str) -> Result<(), DeleteError>;
}
