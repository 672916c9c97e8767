use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub struct SearchBarStyle<'a> {
    pub prompt: &'a str,
    pub placeholder: &'a str,
    /// Right-aligned key hint; hidden when `None` or when it does not fit
    pub hint: Option<&'a str>,
    pub prompt_color: Color,
    pub muted_color: Color,
}

const MIN_INPUT_WIDTH: u16 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct VisibleSlice {
    start: usize,
    end: usize,
    cursor_col: u16,
}

fn visible_slice(text: &str, cursor_pos: usize, max_width: u16) -> VisibleSlice {
    if max_width == 0 || text.is_empty() {
        return VisibleSlice {
            start: 0,
            end: 0,
            cursor_col: 0,
        };
    }

    let graphemes: Vec<(usize, &str)> = text.grapheme_indices(true).collect();
    let mut boundaries: Vec<usize> = graphemes.iter().map(|(i, _)| *i).collect();
    boundaries.push(text.len());

    let cursor = cursor_pos.min(text.len());
    let boundary_idx = match boundaries.binary_search(&cursor) {
        Ok(idx) => idx,
        Err(idx) => idx.saturating_sub(1),
    };

    let mut prefix_widths = Vec::with_capacity(boundaries.len());
    let mut width = 0;
    prefix_widths.push(0);
    for (_, grapheme) in &graphemes {
        width += grapheme.width();
        prefix_widths.push(width);
    }

    let cursor_col = prefix_widths[boundary_idx];
    let max_width = max_width as usize;
    let max_cursor_col = max_width.saturating_sub(1);
    let scroll_col = cursor_col.saturating_sub(max_cursor_col);

    let mut start_index = 0;
    for (idx, &col) in prefix_widths.iter().enumerate() {
        if col > scroll_col {
            break;
        }
        start_index = idx;
    }
    if start_index >= graphemes.len() {
        start_index = graphemes.len().saturating_sub(1);
    }

    let start_byte = boundaries[start_index];
    let mut end_index = start_index;
    let mut visible_width = 0;
    while end_index < graphemes.len() {
        let g_width = graphemes[end_index].1.width();
        if visible_width + g_width > max_width {
            break;
        }
        visible_width += g_width;
        end_index += 1;
    }
    let end_byte = boundaries[end_index];

    let cursor_col = cursor_col
        .saturating_sub(prefix_widths[start_index])
        .min(max_cursor_col);
    let cursor_col = u16::try_from(cursor_col).unwrap_or(u16::MAX);

    VisibleSlice {
        start: start_byte,
        end: end_byte,
        cursor_col,
    }
}

/// Render the single-line query input with a terminal cursor indicator
pub fn draw(
    f: &mut Frame,
    area: Rect,
    style: &SearchBarStyle<'_>,
    search_text: &str,
    cursor_pos: usize,
) {
    let prompt_width = u16::try_from(style.prompt.width()).unwrap_or(u16::MAX);
    let hint_width = style
        .hint
        .map_or(0, |hint| u16::try_from(hint.width()).unwrap_or(u16::MAX));

    // Keep at least a few columns for typing before giving room to the hint
    let show_hint = hint_width > 0 && area.width >= prompt_width + hint_width + MIN_INPUT_WIDTH;
    let [prompt_area, input_area, hint_area] = Layout::horizontal([
        Constraint::Length(prompt_width),
        Constraint::Fill(1),
        Constraint::Length(if show_hint { hint_width } else { 0 }),
    ])
    .areas(area);

    f.render_widget(
        Paragraph::new(Span::styled(
            style.prompt,
            Style::default().fg(style.prompt_color),
        )),
        prompt_area,
    );

    if let Some(hint) = style.hint
        && show_hint
    {
        f.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(style.muted_color))),
            hint_area,
        );
    }

    if input_area.width == 0 || input_area.height == 0 {
        return;
    }

    if search_text.is_empty() {
        let content = Line::from(Span::styled(
            style.placeholder,
            Style::default().fg(style.muted_color),
        ));
        f.render_widget(Paragraph::new(content), input_area);
        f.set_cursor_position((input_area.x, input_area.y));
    } else {
        let slice = visible_slice(search_text, cursor_pos, input_area.width);
        let content = Line::from(Span::raw(&search_text[slice.start..slice.end]));
        f.render_widget(Paragraph::new(content), input_area);

        let cursor_x = input_area.x.saturating_add(slice.cursor_col);
        f.set_cursor_position((cursor_x, input_area.y));
    }
}
