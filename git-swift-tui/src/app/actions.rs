use git_swift_core::{git::GitProvider, session::Session};

pub(super) fn handle_switch_branch(session: &mut Session, git: &dyn GitProvider) {
    if let Some(branch) = session.selected_branch() {
        log::debug!("switching to {branch}");
    }
    session.confirm_selection(git);
}

/// Alt+digit: select the numbered row, then switch to it. Rows that do not exist are ignored.
pub(super) fn handle_quick_switch(session: &mut Session, git: &dyn GitProvider, digit: u8) {
    if !session.quick_select(digit) {
        log::debug!("quick switch {digit}: no such row");
        return;
    }
    handle_switch_branch(session, git);
}

pub(super) fn handle_delete_branch(session: &mut Session, git: &dyn GitProvider) {
    if let Some(branch) = session.selected_branch() {
        log::debug!("deleting {branch}");
    }
    session.request_delete(git);
}

pub(super) fn handle_confirm_delete(session: &mut Session, git: &dyn GitProvider) {
    session.resolve(git);
}
