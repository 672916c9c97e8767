use crate::theme::Theme;
use git_swift_core::{
    config::{Command, KeysConfig, keys::KeyMap},
    keyboard::{KeyCode, KeyEvent},
    session::{DeleteChoice, DeleteConfirmState, Mode},
};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

const FORCE_LABEL: &str = " Force Delete ";
const CANCEL_LABEL: &str = " Cancel ";

/// Build the dialog body for an unmerged branch.
pub fn lines<'a>(
    confirm: &'a DeleteConfirmState,
    theme: &Theme,
    keys: &KeysConfig,
) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(vec![
            Span::raw(" Delete Branch: "),
            Span::styled(
                confirm.branch.as_str(),
                Style::default()
                    .fg(theme.prompt)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::raw(""),
    ];
    lines.extend(confirm.message.lines().map(|line| {
        Line::from(Span::styled(
            format!(" {line}"),
            Style::default().fg(theme.error),
        ))
    }));
    lines.extend([
        Line::raw(""),
        Line::from(Span::styled(
            " This branch has unmerged changes!",
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(" Force delete will permanently remove all unmerged commits."),
        Line::raw(""),
        buttons(confirm.choice, theme),
        Line::raw(""),
        Line::from(Span::styled(
            hint(keys, &Mode::ConfirmingDelete(confirm.clone())),
            Style::default().fg(theme.muted),
        )),
    ]);
    lines
}

fn buttons(choice: DeleteChoice, theme: &Theme) -> Line<'static> {
    let unfocused = Style::default().fg(theme.muted);
    let (force, cancel) = match choice {
        DeleteChoice::Force => (
            Style::default()
                .bg(theme.error)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            unfocused,
        ),
        DeleteChoice::Cancel => (
            unfocused,
            Style::default()
                .bg(theme.selected)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
    };
    Line::from(vec![
        Span::raw(" "),
        Span::styled(FORCE_LABEL, force),
        Span::raw("  "),
        Span::styled(CANCEL_LABEL, cancel),
    ])
}

fn key_label(key: KeyEvent) -> String {
    if !key.modifiers.is_empty() {
        return key.to_string();
    }
    match key.code {
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        _ => key.to_string(),
    }
}

fn keys_for(keymap: &KeyMap, command: Command) -> Vec<KeyEvent> {
    let mut found: Vec<KeyEvent> = keymap
        .iter()
        .filter(|(_, cmd)| **cmd == command)
        .map(|(key, _)| *key)
        .collect();
    found.sort();
    found
}

/// Key hint line built from the active bindings, e.g. `← → navigate • Enter select • Esc cancel`.
fn hint(keys: &KeysConfig, mode: &Mode) -> String {
    let keymap = keys.keymap_for_mode(mode);

    let toggle = keys_for(&keymap, Command::ToggleChoice);
    let arrows: Vec<KeyEvent> = toggle
        .iter()
        .copied()
        .filter(|k| matches!(k.code, KeyCode::Left | KeyCode::Right))
        .collect();
    let navigate = if arrows.is_empty() { toggle } else { arrows };
    let navigate = navigate
        .into_iter()
        .map(key_label)
        .collect::<Vec<_>>()
        .join(" ");

    let mut parts = Vec::new();
    if !navigate.is_empty() {
        parts.push(format!("{navigate} navigate"));
    }
    if let Some(key) = KeysConfig::find_key(&keymap, Command::Confirm) {
        parts.push(format!("{} select", key_label(key)));
    }
    if let Some(key) = KeysConfig::find_key(&keymap, Command::Cancel) {
        parts.push(format!("{} cancel", key_label(key)));
    }
    format!(" {}", parts.join(" • "))
}

/// Estimate visual line count when a `Line` is word-wrapped to `max_width` columns.
/// Uses byte length as a width proxy, which is exact for ASCII and a safe overestimate
/// for multi-byte UTF-8.
pub fn word_wrapped_line_count(line: &Line, max_width: u16) -> u16 {
    let max_w = usize::from(max_width);
    if max_w == 0 {
        return 1;
    }

    let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
    if text.is_empty() {
        return 1;
    }

    let mut lines: u16 = 1;
    let mut col: usize = 0;

    for (i, word) in text.split(' ').enumerate() {
        let w = word.len();
        let needed = if i == 0 || col == 0 { w } else { w + 1 };

        if col + needed <= max_w {
            col += needed;
        } else if w <= max_w {
            lines += 1;
            col = w;
        } else {
            if col > 0 {
                lines += 1;
            }
            col = w;
            while col > max_w {
                lines += 1;
                col -= max_w;
            }
        }
    }

    lines
}

/// Rows the dialog needs at `width` columns.
pub fn height(lines: &[Line], width: u16) -> u16 {
    lines
        .iter()
        .map(|line| word_wrapped_line_count(line, width))
        .sum()
}

pub fn draw(f: &mut Frame, area: Rect, lines: Vec<Line>) {
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
