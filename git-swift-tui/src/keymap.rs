use git_swift_core::{
    action::Action,
    config::{Command, KeysConfig},
    keyboard::KeyEvent,
    session::Mode,
};

/// Resolve a terminal key event into an Action for the current mode.
///
/// Bound keys win; otherwise a printable char typed while the query is editable
/// becomes a `SearchPush`.
pub fn resolve_action(
    key: crossterm::event::KeyEvent,
    mode: &Mode,
    keys: &KeysConfig,
) -> Option<Action> {
    let key = KeyEvent::from_crossterm(key)?;
    let keymap = keys.keymap_for_mode(mode);

    if let Some(command) = keymap.get(&key) {
        return command_to_action(*command);
    }

    if mode.supports_text_edit() {
        return key.typed_char().map(Action::SearchPush);
    }
    None
}

fn command_to_action(command: Command) -> Option<Action> {
    let action = match command {
        Command::Noop => return None,
        Command::Cancel => Action::Cancel,
        Command::SwitchBranch => Action::SwitchBranch,
        Command::DeleteBranch => Action::DeleteBranch,
        Command::QuickSwitch(n) => Action::QuickSwitch(n),
        Command::MoveUp => Action::MoveSelection(-1),
        Command::MoveDown => Action::MoveSelection(1),
        Command::DeleteBackwardChar => Action::SearchPop,
        Command::DeleteBackwardWord => Action::SearchDeleteWord,
        Command::DeleteToStart => Action::SearchDeleteToStart,
        Command::MoveCursorLeft => Action::CursorLeft,
        Command::MoveCursorRight => Action::CursorRight,
        Command::MoveCursorStart => Action::CursorStart,
        Command::MoveCursorEnd => Action::CursorEnd,
        Command::ToggleChoice => Action::ToggleChoice,
        Command::Confirm => Action::Confirm,
    };
    Some(action)
}
