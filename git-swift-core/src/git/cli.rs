use super::{BranchListing, DeleteError, SwitchError, parse_branch_list, provider::GitProvider};
use crate::constants::{ALREADY_ON_MARKER, BRANCH_LIST_FORMAT, UNMERGED_MARKERS};
use anyhow::{Context, Result};
use std::{
    path::PathBuf,
    process::{Command, Output},
};

/// Runs the `git` binary. Without a directory, commands run in the process CWD.
#[derive(Debug, Clone, Default)]
pub struct CliGitProvider {
    dir: Option<PathBuf>,
}

impl CliGitProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    fn git(&self, args: &[&str]) -> std::io::Result<Output> {
        log::debug!("running git {}", args.join(" "));
        let mut command = Command::new("git");
        command.args(args);
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }
        command.output()
    }

    fn dir_display(&self) -> String {
        self.dir
            .as_deref()
            .map_or_else(|| ".".to_string(), |d| d.display().to_string())
    }
}

/// Stdout and stderr joined, trimmed. Git writes most diagnostics to stderr.
fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text.trim().to_string()
}

pub(crate) fn is_already_on(output: &str) -> bool {
    output.to_lowercase().contains(ALREADY_ON_MARKER)
}

pub(crate) fn is_unmerged(output: &str) -> bool {
    UNMERGED_MARKERS.iter().any(|marker| output.contains(marker))
}

impl GitProvider for CliGitProvider {
    fn list_branches(&self) -> Result<BranchListing> {
        let output = self
            .git(&["branch", "--list", BRANCH_LIST_FORMAT])
            .context("failed to run git")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("error getting branches: {}", stderr.trim());
        }

        let listing = parse_branch_list(&String::from_utf8_lossy(&output.stdout));
        log::debug!(
            "listed {} branches in {} (current: {:?})",
            listing.names.len(),
            self.dir_display(),
            listing.current
        );
        Ok(listing)
    }

    fn switch_to(&self, branch: &str) -> Result<(), SwitchError> {
        let output = self
            .git(&["switch", branch])
            .map_err(|e| SwitchError::Failed(e.to_string()))?;
        let text = combined_output(&output);

        // `git switch` exits 0 when already on the target, so check the text first
        if is_already_on(&text) {
            return Err(SwitchError::AlreadyOn(branch.to_string()));
        }
        if !output.status.success() {
            log::warn!("git switch {branch} failed: {text}");
            return Err(SwitchError::Failed(text));
        }
        Ok(())
    }

    fn delete_safe(&self, branch: &str) -> Result<(), DeleteError> {
        let output = self
            .git(&["branch", "--delete", branch])
            .map_err(|e| DeleteError::Failed(e.to_string()))?;

        if output.status.success() {
            return Ok(());
        }

        let text = combined_output(&output);
        if is_unmerged(&text) {
            log::info!("branch {branch} has unmerged changes");
            return Err(DeleteError::Unmerged {
                branch: branch.to_string(),
                message: text,
            });
        }
        log::warn!("git branch --delete {branch} failed: {text}");
        Err(DeleteError::Failed(text))
    }

    fn delete_force(&self, branch: &str) -> Result<(), DeleteError> {
        let output = self
            .git(&["branch", "--delete", "--force", branch])
            .map_err(|e| DeleteError::Failed(e.to_string()))?;

        if output.status.success() {
            return Ok(());
        }

        let text = combined_output(&output);
        log::warn!("git branch --delete --force {branch} failed: {text}");
        Err(DeleteError::Failed(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::Path};

    fn git(dir: &Path, args: &[&str]) {
        Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
    }

    fn init_test_repo(dir: &Path) {
        git(dir, &["init", "--initial-branch=main"]);
        git(dir, &["config", "user.email", "test@test.com"]);
        git(dir, &["config", "user.name", "Test"]);
        git(dir, &["config", "commit.gpgsign", "false"]);
        fs::write(dir.join("README.md"), "# test").unwrap();
        git(dir, &["add", "."]);
        git(dir, &["commit", "-m", "init"]);
    }

    fn current_branch(dir: &Path) -> String {
        let output = Command::new("git")
            .args(["rev-parse", "--abbrev-ref", "HEAD"])
            .current_dir(dir)
            .output()
            .unwrap();
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Create `branch` with one commit that is not on main, then go back to main.
    fn add_unmerged_branch(dir: &Path, branch: &str) {
        git(dir, &["switch", "-c", branch]);
        fs::write(dir.join("extra.txt"), branch).unwrap();
        git(dir, &["add", "."]);
        git(dir, &["commit", "-m", "extra"]);
        git(dir, &["switch", "main"]);
    }

    #[test]
    fn test_already_on_detection() {
        assert!(is_already_on("Already on 'main'"));
        assert!(is_already_on("ALREADY ON 'main'"));
        assert!(!is_already_on("Switched to branch 'dev'"));
    }

    #[test]
    fn test_unmerged_detection() {
        assert!(is_unmerged("error: the branch 'x' is not fully merged."));
        assert!(is_unmerged("error: The branch 'x' is not merged"));
        assert!(!is_unmerged("error: branch 'x' not found."));
    }

    #[test]
    fn test_list_branches() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());
        git(tmp.path(), &["branch", "feature/x"]);
        git(tmp.path(), &["branch", "feature/y"]);

        let provider = CliGitProvider::in_dir(tmp.path());
        let listing = provider.list_branches().unwrap();
        assert_eq!(listing.names, vec!["feature/x", "feature/y", "main"]);
        assert_eq!(listing.current.as_deref(), Some("main"));
    }

    #[test]
    fn test_list_branches_outside_repo_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = CliGitProvider::in_dir(tmp.path());
        assert!(provider.list_branches().is_err());
    }

    #[test]
    fn test_switch_to_branch() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());
        git(tmp.path(), &["branch", "dev"]);

        let provider = CliGitProvider::in_dir(tmp.path());
        provider.switch_to("dev").unwrap();
        assert_eq!(current_branch(tmp.path()), "dev");
    }

    #[test]
    fn test_switch_to_current_reports_already_on() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());

        let provider = CliGitProvider::in_dir(tmp.path());
        assert_eq!(
            provider.switch_to("main"),
            Err(SwitchError::AlreadyOn("main".to_string()))
        );
    }

    #[test]
    fn test_switch_to_missing_branch_fails() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());

        let provider = CliGitProvider::in_dir(tmp.path());
        let result = provider.switch_to("does-not-exist");
        assert!(matches!(result, Err(SwitchError::Failed(_))));
    }

    #[test]
    fn test_delete_merged_branch() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());
        git(tmp.path(), &["branch", "merged"]);

        let provider = CliGitProvider::in_dir(tmp.path());
        provider.delete_safe("merged").unwrap();
        let listing = provider.list_branches().unwrap();
        assert_eq!(listing.names, vec!["main"]);
    }

    #[test]
    fn test_delete_unmerged_branch_then_force() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());
        add_unmerged_branch(tmp.path(), "wip");

        let provider = CliGitProvider::in_dir(tmp.path());
        let err = provider.delete_safe("wip").unwrap_err();
        assert!(
            matches!(err, DeleteError::Unmerged { .. }),
            "expected unmerged, got: {err:?}"
        );
        assert!(provider.list_branches().unwrap().names.contains(&"wip".to_string()));

        provider.delete_force("wip").unwrap();
        assert!(!provider.list_branches().unwrap().names.contains(&"wip".to_string()));
    }

    #[test]
    fn test_delete_missing_branch_is_plain_failure() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());

        let provider = CliGitProvider::in_dir(tmp.path());
        let err = provider.delete_safe("nope").unwrap_err();
        assert!(matches!(err, DeleteError::Failed(_)), "got: {err:?}");
        assert!(provider.delete_force("nope").is_err());
    }
}
