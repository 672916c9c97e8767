use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
};

pub fn draw(f: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let error_line = Paragraph::new(Span::styled(
        format!(" Error: {message}"),
        Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
    ));
    f.render_widget(error_line, area);
}
