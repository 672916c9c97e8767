mod actions;

use crate::{
    components::{
        branch_list, delete_confirm, error_bar,
        search_bar::{self, SearchBarStyle},
    },
    keymap,
    theme::Theme,
};
use actions::{
    handle_confirm_delete, handle_delete_branch, handle_quick_switch, handle_switch_branch,
};
use crossterm::event::{self, Event, KeyEventKind};
use git_swift_core::{
    action::Action,
    config::KeysConfig,
    git::GitProvider,
    outcome::SessionOutcome,
    session::{Mode, Session},
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
};

const PROMPT: &str = "❯ ";
const PLACEHOLDER: &str = "Search branches";
const LIST_HINT: &str = "↑↓ navigate • Alt+n quick switch ";
/// Rows reserved so the delete dialog fits without scrolling.
const DIALOG_ROWS: u16 = 12;

/// Inline viewport rows: the search bar, every branch and an error line, capped at `max_height`.
pub fn viewport_height(session: &Session, max_height: u16) -> u16 {
    let branches = u16::try_from(session.listing().names.len().max(1)).unwrap_or(u16::MAX);
    branches
        .saturating_add(2)
        .max(DIALOG_ROWS)
        .min(max_height.max(1))
}

/// Drive the session until it terminates, then erase the rendered area.
pub fn run(
    terminal: &mut DefaultTerminal,
    session: &mut Session,
    git: &dyn GitProvider,
    theme: &Theme,
    keys: &KeysConfig,
) -> anyhow::Result<SessionOutcome> {
    while !session.is_terminated() {
        terminal.draw(|f| draw(f, session, theme, keys))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = keymap::resolve_action(key, session.mode(), keys) {
                process_action(action, session, git);
            }
        }
    }

    if session.rendered_lines() > 0 {
        terminal.clear()?;
    }
    Ok(session
        .outcome()
        .cloned()
        .unwrap_or(SessionOutcome::Cancelled))
}

fn draw(f: &mut Frame, session: &mut Session, theme: &Theme, keys: &KeysConfig) {
    let area = f.area();
    let rows = match session.mode() {
        Mode::Listing => draw_listing(f, area, session, theme),
        Mode::ConfirmingDelete(confirm) => {
            let lines = delete_confirm::lines(confirm, theme, keys);
            let height = delete_confirm::height(&lines, area.width).min(area.height);
            delete_confirm::draw(f, Rect { height, ..area }, lines);
            height
        }
        Mode::Terminated(_) => 0,
    };
    session.set_rendered_lines(rows);
}

fn draw_listing(f: &mut Frame, area: Rect, session: &Session, theme: &Theme) -> u16 {
    let list_rows = u16::try_from(branch_list::content_height(session)).unwrap_or(u16::MAX);
    let error_rows = u16::from(session.error().is_some());
    let height = list_rows
        .saturating_add(1 + error_rows)
        .min(area.height);
    let area = Rect { height, ..area };

    let [search_area, list_area, error_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(error_rows),
    ])
    .areas(area);

    let style = SearchBarStyle {
        prompt: PROMPT,
        placeholder: PLACEHOLDER,
        hint: (session.visible_len() > 0).then_some(LIST_HINT),
        prompt_color: theme.prompt,
        muted_color: theme.muted,
    };
    search_bar::draw(f, search_area, &style, session.query(), session.list().cursor);
    branch_list::draw(f, list_area, session, theme);
    if let Some(message) = session.error() {
        error_bar::draw(f, error_area, message, theme);
    }
    height
}

fn process_action(action: Action, session: &mut Session, git: &dyn GitProvider) {
    match action {
        Action::Cancel => session.cancel(),
        Action::SwitchBranch => handle_switch_branch(session, git),
        Action::DeleteBranch => handle_delete_branch(session, git),
        Action::QuickSwitch(digit) => handle_quick_switch(session, git, digit),
        Action::MoveSelection(delta) => session.move_cursor(delta),

        Action::SearchPush(c) => session.insert_char(c),
        Action::SearchPop => session.backspace(),
        Action::SearchDeleteWord => session.delete_word(),
        Action::SearchDeleteToStart => session.delete_to_start(),
        Action::CursorLeft => session.cursor_left(),
        Action::CursorRight => session.cursor_right(),
        Action::CursorStart => session.cursor_start(),
        Action::CursorEnd => session.cursor_end(),

        Action::ToggleChoice => session.toggle_choice(),
        Action::Confirm => handle_confirm_delete(session, git),
    }
}
