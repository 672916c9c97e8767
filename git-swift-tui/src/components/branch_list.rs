use crate::theme::Theme;
use git_swift_core::{constants::QUICK_SWITCH_SLOTS, fuzzy, session::Session};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

const NO_MATCHES: &str = " No matching branches";
const CURRENT_SUFFIX: &str = " *";

/// Rows needed to show every visible branch, or the empty-state line.
pub fn content_height(session: &Session) -> usize {
    session.visible_len().max(1)
}

pub fn draw(f: &mut Frame, area: Rect, session: &Session, theme: &Theme) {
    if session.visible_len() == 0 {
        f.render_widget(
            Paragraph::new(Span::styled(NO_MATCHES, Style::default().fg(theme.muted))),
            area,
        );
        return;
    }

    let cursor = session.cursor();
    let items: Vec<ListItem> = session
        .visible()
        .enumerate()
        .map(|(row, name)| {
            let is_selected = cursor == Some(row);
            let is_current = session.listing().is_current(name);
            ListItem::new(branch_line(
                row,
                name,
                session.query(),
                is_selected,
                is_current,
                theme,
            ))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(cursor);
    f.render_stateful_widget(List::new(items), area, &mut list_state);
}

fn branch_line<'a>(
    row: usize,
    name: &'a str,
    query: &str,
    is_selected: bool,
    is_current: bool,
    theme: &Theme,
) -> Line<'a> {
    let number = if row < QUICK_SWITCH_SLOTS {
        format!(" {row} ")
    } else {
        "   ".to_string()
    };

    let base = if is_selected {
        Style::default()
            .fg(theme.selected)
            .add_modifier(Modifier::BOLD)
    } else if is_current {
        Style::default().fg(theme.current)
    } else {
        Style::default().fg(theme.muted)
    };
    let number_style = if is_selected {
        base
    } else {
        Style::default().fg(theme.muted)
    };
    let matched = base.fg(theme.matched);

    let mut spans = vec![Span::styled(number, number_style)];
    spans.extend(highlighted(name, query, base, matched));
    if is_current {
        spans.push(Span::styled(CURRENT_SUFFIX, base));
    }
    Line::from(spans)
}

/// Split `name` into spans, styling the chars the query matched.
fn highlighted<'a>(name: &'a str, query: &str, base: Style, matched: Style) -> Vec<Span<'a>> {
    let positions = fuzzy::match_positions(name, query).unwrap_or_default();
    if positions.is_empty() {
        return vec![Span::styled(name, base)];
    }

    let mut spans = Vec::new();
    let mut run_start = 0;
    let mut run_matched = false;
    let mut next = positions.iter().peekable();

    for (char_idx, (byte_idx, _)) in name.char_indices().enumerate() {
        let is_match = next.peek().is_some_and(|&&p| p == char_idx);
        if is_match {
            next.next();
        }
        if byte_idx > 0 && is_match != run_matched {
            let style = if run_matched { matched } else { base };
            spans.push(Span::styled(&name[run_start..byte_idx], style));
            run_start = byte_idx;
        }
        run_matched = is_match;
    }
    let style = if run_matched { matched } else { base };
    spans.push(Span::styled(&name[run_start..], style));
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use git_swift_core::{config::ThemeConfig, git::BranchListing};
    use ratatui::{Terminal, backend::TestBackend, style::Color};

    fn test_theme() -> Theme {
        Theme::from_config(&ThemeConfig::default())
    }

    fn session(names: &[&str], current: Option<&str>, query: &str) -> Session {
        let listing = BranchListing::new(
            names.iter().map(ToString::to_string).collect(),
            current.map(ToString::to_string),
        );
        Session::new(listing, query)
    }

    fn render(session: &Session, width: u16, height: u16) -> Vec<String> {
        let theme = test_theme();
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| draw(f, f.area(), session, &theme))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_rows_are_numbered_with_current_marker() {
        let s = session(&["main", "feature/x", "feature/y"], Some("main"), "");
        let lines = render(&s, 30, 3);
        assert_eq!(lines, vec![" 0 main *", " 1 feature/x", " 2 feature/y"]);
    }

    #[test]
    fn test_rows_beyond_ten_have_no_number() {
        let names: Vec<String> = (0..12).map(|i| format!("b{i:02}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let s = session(&refs, None, "");
        let lines = render(&s, 20, 12);
        assert_eq!(lines[9], " 9 b09");
        assert_eq!(lines[10], "   b10");
        assert_eq!(lines[11], "   b11");
    }

    #[test]
    fn test_empty_view_shows_no_matches() {
        let s = session(&["main"], Some("main"), "zzz");
        let lines = render(&s, 30, 2);
        assert_eq!(lines[0], NO_MATCHES);
        assert_eq!(content_height(&s), 1);
    }

    #[test]
    fn test_list_scrolls_to_keep_cursor_visible() {
        let names: Vec<String> = (0..6).map(|i| format!("b{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut s = session(&refs, None, "");
        s.move_cursor(5);
        let lines = render(&s, 20, 3);
        assert!(lines.iter().any(|l| l.contains("b5")), "got: {lines:?}");
    }

    #[test]
    fn test_highlighted_splits_runs() {
        let base = Style::default();
        let matched = Style::default().fg(Color::Cyan);
        let spans = highlighted("feature/x", "fx", base, matched);
        let parts: Vec<(&str, Style)> = spans
            .iter()
            .map(|s| (s.content.as_ref(), s.style))
            .collect();
        assert_eq!(
            parts,
            vec![
                ("f", matched),
                ("eature/", base),
                ("x", matched),
            ]
        );
    }

    #[test]
    fn test_highlighted_without_query_is_one_span() {
        let spans = highlighted("main", "", Style::default(), Style::default());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "main");
    }

    #[test]
    fn test_highlighted_multibyte() {
        let base = Style::default();
        let matched = Style::default().fg(Color::Cyan);
        let spans = highlighted("café-x", "éx", base, matched);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "café-x");
        assert_eq!(spans[1].content, "é");
        assert_eq!(spans[1].style, matched);
    }
}
