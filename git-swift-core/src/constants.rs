pub const APP_NAME: &str = "git-swift";

/// `%(HEAD)` prints `*` for the checked-out branch and a space otherwise
pub const BRANCH_LIST_FORMAT: &str = "--format=%(HEAD)%(refname:short)";
pub const CURRENT_BRANCH_MARKER: char = '*';
pub const DETACHED_HEAD_PREFIX: &str = "(";

/// Lower-cased; matched against lower-cased `git switch` output
pub const ALREADY_ON_MARKER: &str = "already on";
pub const UNMERGED_MARKERS: &[&str] = &["not fully merged", "not merged"];

/// Rows that get a quick-switch number (Alt+0 to Alt+9)
pub const QUICK_SWITCH_SLOTS: usize = 10;
