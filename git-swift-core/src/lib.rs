pub mod action;
pub mod config;
pub mod constants;
pub mod direct;
pub mod fuzzy;
pub mod git;
pub mod keyboard;
pub mod outcome;
pub mod session;
pub mod state;

// Re-export commonly used types at crate root
pub use action::Action;
pub use config::Config;
pub use direct::{DirectSwitch, try_direct_switch};
pub use git::{BranchListing, CliGitProvider, GitProvider};
pub use keyboard::KeyEvent;
pub use outcome::SessionOutcome;
pub use session::{DeleteChoice, DeleteConfirmState, Mode, Session};
