use crate::{
    git::{BranchListing, DeleteError, GitProvider, SwitchError},
    outcome::SessionOutcome,
    state::SearchableList,
};

/// Which button the delete dialog has focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteChoice {
    Force,
    Cancel,
}

impl DeleteChoice {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Force => Self::Cancel,
            Self::Cancel => Self::Force,
        }
    }
}

/// A safe delete was refused because of unmerged commits; waiting on the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmState {
    pub branch: String,
    /// Git's own explanation, shown verbatim
    pub message: String,
    pub choice: DeleteChoice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Listing,
    ConfirmingDelete(DeleteConfirmState),
    Terminated(SessionOutcome),
}

impl Mode {
    pub fn supports_text_edit(&self) -> bool {
        matches!(self, Mode::Listing)
    }

    pub fn supports_list_navigation(&self) -> bool {
        matches!(self, Mode::Listing)
    }

    pub fn supports_branch_select_actions(&self) -> bool {
        matches!(self, Mode::Listing)
    }

    pub fn supports_confirm_delete_actions(&self) -> bool {
        matches!(self, Mode::ConfirmingDelete(_))
    }
}

/// The selection engine: branch list, query, filtered view, cursor and mode.
///
/// Every operation is a no-op in a mode where it does not apply. The
/// presentation layer only reads from a session, apart from
/// [`Session::set_rendered_lines`].
#[derive(Debug, Clone)]
pub struct Session {
    listing: BranchListing,
    list: SearchableList,
    mode: Mode,
    error: Option<String>,
    rendered_lines: u16,
}

impl Session {
    pub fn new(listing: BranchListing, initial_query: &str) -> Self {
        let list = SearchableList::new(listing.names.len());
        let mut session = Self {
            listing,
            list,
            mode: Mode::Listing,
            error: None,
            rendered_lines: 0,
        };
        if !initial_query.is_empty() {
            session.set_query(initial_query);
        }
        session
    }

    /// Start with `error` shown inline, e.g. a direct switch that failed before the picker opened.
    #[must_use]
    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    pub fn listing(&self) -> &BranchListing {
        &self.listing
    }

    pub fn list(&self) -> &SearchableList {
        &self.list
    }

    pub fn query(&self) -> &str {
        &self.list.search
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Inline error from the last failed switch
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn outcome(&self) -> Option<&SessionOutcome> {
        match &self.mode {
            Mode::Terminated(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.mode, Mode::Terminated(_))
    }

    /// Branch names in the filtered view, in listing order.
    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.list
            .filtered
            .iter()
            .map(|&i| self.listing.names[i].as_str())
    }

    pub fn visible_len(&self) -> usize {
        self.list.filtered.len()
    }

    /// Row of the cursor within the filtered view
    pub fn cursor(&self) -> Option<usize> {
        self.list.selected
    }

    pub fn selected_branch(&self) -> Option<&str> {
        self.list
            .selected_item()
            .map(|i| self.listing.names[i].as_str())
    }

    pub fn rendered_lines(&self) -> u16 {
        self.rendered_lines
    }

    pub fn set_rendered_lines(&mut self, lines: u16) {
        self.rendered_lines = lines;
    }

    fn terminate(&mut self, outcome: SessionOutcome) {
        log::info!("session ended: {outcome:?}");
        self.mode = Mode::Terminated(outcome);
    }

    fn refilter(&mut self) {
        self.error = None;
        self.list.apply_filter(&self.listing.names);
    }

    /// Replace the query and recompute the view.
    pub fn set_query(&mut self, text: &str) {
        if !self.mode.supports_text_edit() {
            return;
        }
        self.list.set_search(text);
        self.refilter();
    }

    pub fn insert_char(&mut self, c: char) {
        if !self.mode.supports_text_edit() {
            return;
        }
        self.list.insert_char(c);
        self.refilter();
    }

    pub fn backspace(&mut self) {
        if self.mode.supports_text_edit() && self.list.backspace() {
            self.refilter();
        }
    }

    pub fn delete_word(&mut self) {
        if self.mode.supports_text_edit() && self.list.delete_word() {
            self.refilter();
        }
    }

    pub fn delete_to_start(&mut self) {
        if self.mode.supports_text_edit() && self.list.delete_to_start() {
            self.refilter();
        }
    }

    pub fn cursor_left(&mut self) {
        if self.mode.supports_text_edit() {
            self.list.cursor_left();
        }
    }

    pub fn cursor_right(&mut self) {
        if self.mode.supports_text_edit() {
            self.list.cursor_right();
        }
    }

    pub fn cursor_start(&mut self) {
        if self.mode.supports_text_edit() {
            self.list.cursor_start();
        }
    }

    pub fn cursor_end(&mut self) {
        if self.mode.supports_text_edit() {
            self.list.cursor_end();
        }
    }

    /// Move the cursor by `delta` rows, clamped to the view.
    pub fn move_cursor(&mut self, delta: i32) {
        if self.mode.supports_list_navigation() {
            self.list.move_selection(delta);
        }
    }

    /// Put the cursor on row `digit` (0-9). Returns `false` if there is no such row.
    pub fn quick_select(&mut self, digit: u8) -> bool {
        if !self.mode.supports_list_navigation() || digit > 9 {
            return false;
        }
        self.list.select_row(usize::from(digit))
    }

    /// Switch to the branch under the cursor.
    ///
    /// Picking the current branch ends the session without touching git. A failed
    /// switch stays in `Listing` with the error kept for display.
    pub fn confirm_selection(&mut self, git: &dyn GitProvider) {
        if !self.mode.supports_branch_select_actions() {
            return;
        }
        let Some(branch) = self.selected_branch().map(ToString::to_string) else {
            return;
        };

        if self.listing.is_current(&branch) {
            self.terminate(SessionOutcome::AlreadyOnBranch(branch));
            return;
        }

        match git.switch_to(&branch) {
            Ok(()) => self.terminate(SessionOutcome::Switched(branch)),
            Err(SwitchError::AlreadyOn(name)) => {
                self.terminate(SessionOutcome::AlreadyOnBranch(name));
            }
            Err(e @ SwitchError::Failed(_)) => {
                self.error = Some(e.to_string());
            }
        }
    }

    /// Safely delete the branch under the cursor, asking for confirmation when
    /// git refuses because of unmerged commits.
    pub fn request_delete(&mut self, git: &dyn GitProvider) {
        if !self.mode.supports_branch_select_actions() {
            return;
        }
        let Some(branch) = self.selected_branch().map(ToString::to_string) else {
            return;
        };

        if self.listing.is_current(&branch) {
            self.terminate(SessionOutcome::Failed(format!(
                "Cannot delete the current branch '{branch}'"
            )));
            return;
        }

        match git.delete_safe(&branch) {
            Ok(()) => self.terminate(SessionOutcome::Deleted(branch)),
            Err(DeleteError::Unmerged { branch, message }) => {
                self.mode = Mode::ConfirmingDelete(DeleteConfirmState {
                    branch,
                    message,
                    choice: DeleteChoice::Cancel,
                });
            }
            Err(DeleteError::Failed(message)) => {
                self.terminate(SessionOutcome::Failed(message));
            }
        }
    }

    pub fn toggle_choice(&mut self) {
        if let Mode::ConfirmingDelete(confirm) = &mut self.mode {
            confirm.choice = confirm.choice.toggled();
        }
    }

    /// Act on the focused dialog button.
    pub fn resolve(&mut self, git: &dyn GitProvider) {
        let Mode::ConfirmingDelete(confirm) = &self.mode else {
            return;
        };
        let branch = confirm.branch.clone();
        match confirm.choice {
            DeleteChoice::Cancel => self.mode = Mode::Listing,
            DeleteChoice::Force => {
                match git.delete_force(&branch) {
                    Ok(()) => self.terminate(SessionOutcome::Deleted(branch)),
                    Err(e) => self.terminate(SessionOutcome::Failed(format!(
                        "failed to force delete: {e}"
                    ))),
                }
            }
        }
    }

    /// Quit from the list, or back out of the delete dialog.
    pub fn cancel(&mut self) {
        match self.mode {
            Mode::Listing => self.terminate(SessionOutcome::Cancelled),
            Mode::ConfirmingDelete(_) => self.mode = Mode::Listing,
            Mode::Terminated(_) => {}
        }
    }
}
