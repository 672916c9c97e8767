use crate::fuzzy;
use unicode_segmentation::UnicodeSegmentation;

/// Query buffer plus the filtered view it produces over a fixed list of names.
///
/// `filtered` holds indices into the names slice in listing order. `selected`
/// indexes into `filtered` and is `None` exactly when the view is empty.
#[derive(Debug, Clone)]
pub struct SearchableList {
    pub search: String,
    /// Byte offset of the text cursor, always on a grapheme boundary after an edit
    pub cursor: usize,
    pub filtered: Vec<usize>,
    pub selected: Option<usize>,
}

#[derive(Clone, Copy)]
struct GraphemeSpan {
    start: usize,
    end: usize,
    is_whitespace: bool,
}

impl SearchableList {
    fn grapheme_spans(&self) -> Vec<GraphemeSpan> {
        self.search
            .grapheme_indices(true)
            .map(|(start, grapheme)| GraphemeSpan {
                start,
                end: start + grapheme.len(),
                is_whitespace: grapheme.chars().all(char::is_whitespace),
            })
            .collect()
    }

    fn grapheme_boundaries(&self) -> Vec<usize> {
        let mut boundaries: Vec<usize> =
            self.search.grapheme_indices(true).map(|(i, _)| i).collect();
        boundaries.push(self.search.len());
        boundaries
    }

    fn boundary_index_at_or_before(boundaries: &[usize], cursor: usize) -> usize {
        match boundaries.binary_search(&cursor) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        }
    }

    fn clamp_cursor_to_boundary(&mut self, boundaries: &[usize]) -> usize {
        let cursor = self.cursor.min(self.search.len());
        let idx = Self::boundary_index_at_or_before(boundaries, cursor);
        self.cursor = boundaries.get(idx).copied().unwrap_or(0);
        idx
    }

    /// Start of the word before `from`: skip whitespace, then non-whitespace.
    fn prev_word_boundary(&self, from: usize) -> usize {
        let spans = self.grapheme_spans();
        let mut boundaries: Vec<usize> = spans.iter().map(|span| span.start).collect();
        boundaries.push(self.search.len());

        let cursor = from.min(self.search.len());
        let mut idx = Self::boundary_index_at_or_before(&boundaries, cursor);

        while idx > 0 && spans[idx - 1].is_whitespace {
            idx -= 1;
        }
        while idx > 0 {
            if spans[idx - 1].is_whitespace {
                return spans[idx - 1].end;
            }
            idx -= 1;
        }
        0
    }

    pub fn new(item_count: usize) -> Self {
        Self {
            search: String::new(),
            cursor: 0,
            filtered: (0..item_count).collect(),
            selected: if item_count > 0 { Some(0) } else { None },
        }
    }

    /// Recompute `filtered` from the current query, keeping the selection
    /// where it was unless the view shrank below it.
    pub fn apply_filter(&mut self, names: &[String]) {
        self.filtered = names
            .iter()
            .enumerate()
            .filter(|(_, name)| fuzzy::matches(name, &self.search))
            .map(|(i, _)| i)
            .collect();
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        self.selected = match self.filtered.len() {
            0 => None,
            len => Some(self.selected.unwrap_or(0).min(len - 1)),
        };
    }

    /// Index into the names slice of the selected row.
    pub fn selected_item(&self) -> Option<usize> {
        self.selected.and_then(|i| self.filtered.get(i).copied())
    }

    /// Move selection by delta, clamping to bounds
    pub fn move_selection(&mut self, delta: i32) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        let current = self.selected.unwrap_or(0);
        if delta > 0 {
            self.selected = Some(
                current
                    .saturating_add(delta.unsigned_abs() as usize)
                    .min(len - 1),
            );
        } else {
            self.selected = Some(current.saturating_sub(delta.unsigned_abs() as usize));
        }
    }

    /// Select a row by its position in the view. Out of range leaves the selection alone.
    pub fn select_row(&mut self, row: usize) -> bool {
        if row < self.filtered.len() {
            self.selected = Some(row);
            true
        } else {
            false
        }
    }

    /// Move cursor left by one grapheme cluster (UTF-8 safe)
    pub fn cursor_left(&mut self) {
        let boundaries = self.grapheme_boundaries();
        let idx = self.clamp_cursor_to_boundary(&boundaries);
        if idx > 0 {
            self.cursor = boundaries[idx - 1];
        }
    }

    /// Move cursor right by one grapheme cluster (UTF-8 safe)
    pub fn cursor_right(&mut self) {
        let boundaries = self.grapheme_boundaries();
        let idx = self.clamp_cursor_to_boundary(&boundaries);
        if idx + 1 < boundaries.len() {
            self.cursor = boundaries[idx + 1];
        }
    }

    pub fn cursor_start(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.search.len();
    }

    /// Insert a character at the current cursor position
    pub fn insert_char(&mut self, c: char) {
        let boundaries = self.grapheme_boundaries();
        self.clamp_cursor_to_boundary(&boundaries);
        self.search.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Remove the grapheme cluster before the cursor (UTF-8 safe)
    pub fn backspace(&mut self) -> bool {
        let boundaries = self.grapheme_boundaries();
        let idx = self.clamp_cursor_to_boundary(&boundaries);
        if idx == 0 {
            return false;
        }
        let prev = boundaries[idx - 1];
        self.search.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    /// Delete word backwards from cursor position
    pub fn delete_word(&mut self) -> bool {
        if self.search.is_empty() || self.cursor == 0 {
            return false;
        }
        let boundaries = self.grapheme_boundaries();
        self.clamp_cursor_to_boundary(&boundaries);
        let new_cursor = self.prev_word_boundary(self.cursor);

        self.search.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
        true
    }

    pub fn delete_to_start(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let boundaries = self.grapheme_boundaries();
        self.clamp_cursor_to_boundary(&boundaries);
        self.search.drain(..self.cursor);
        self.cursor = 0;
        true
    }

    /// Replace the whole query, leaving the text cursor at the end.
    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
        self.cursor = self.search.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_new_selects_first_row() {
        let list = SearchableList::new(3);
        assert_eq!(list.filtered, vec![0, 1, 2]);
        assert_eq!(list.selected, Some(0));

        let empty = SearchableList::new(0);
        assert!(empty.filtered.is_empty());
        assert_eq!(empty.selected, None);
    }

    #[test]
    fn test_apply_filter_keeps_listing_order() {
        let items = names(&["main", "feature/x", "feature/y"]);
        let mut list = SearchableList::new(items.len());
        list.set_search("feat");
        list.apply_filter(&items);
        assert_eq!(list.filtered, vec![1, 2]);
        assert_eq!(list.selected_item(), Some(1));
    }

    #[test]
    fn test_apply_filter_clamps_selection_when_view_shrinks() {
        let items = names(&["main", "feature/x", "feature/y"]);
        let mut list = SearchableList::new(items.len());
        list.move_selection(2);
        assert_eq!(list.selected, Some(2));

        list.set_search("fx");
        list.apply_filter(&items);
        assert_eq!(list.filtered, vec![1]);
        assert_eq!(list.selected, Some(0));
    }

    #[test]
    fn test_apply_filter_empty_view_clears_selection() {
        let items = names(&["main", "dev"]);
        let mut list = SearchableList::new(items.len());
        list.set_search("zzz");
        list.apply_filter(&items);
        assert!(list.filtered.is_empty());
        assert_eq!(list.selected, None);
        assert_eq!(list.selected_item(), None);

        list.set_search("");
        list.apply_filter(&items);
        assert_eq!(list.selected, Some(0));
    }

    #[test]
    fn test_move_selection_clamps_without_wrapping() {
        let mut list = SearchableList::new(3);
        list.move_selection(-1);
        assert_eq!(list.selected, Some(0));
        list.move_selection(10);
        assert_eq!(list.selected, Some(2));
        list.move_selection(1);
        assert_eq!(list.selected, Some(2));
    }

    #[test]
    fn test_move_selection_on_empty_view_is_noop() {
        let mut list = SearchableList::new(0);
        list.move_selection(1);
        assert_eq!(list.selected, None);
    }

    #[test]
    fn test_select_row_out_of_range() {
        let mut list = SearchableList::new(3);
        assert!(list.select_row(2));
        assert_eq!(list.selected, Some(2));
        assert!(!list.select_row(3));
        assert_eq!(list.selected, Some(2));
    }

    #[test]
    fn test_cursor_grapheme_combining_mark() {
        let mut list = SearchableList::new(0);
        list.search = "e\u{0301}".to_string();
        list.cursor_end();

        list.cursor_left();
        assert_eq!(list.cursor, 0);

        list.cursor_right();
        assert_eq!(list.cursor, list.search.len());

        list.cursor_end();
        assert!(list.backspace());
        assert_eq!(list.search, "");
        assert_eq!(list.cursor, 0);
    }

    #[test]
    fn test_cursor_clamps_inside_grapheme() {
        let mut list = SearchableList::new(0);
        list.search = "café".to_string();
        list.cursor = 4;

        list.cursor_left();
        assert_eq!(list.cursor, 2);

        list.cursor = 4;
        list.cursor_right();
        assert_eq!(list.cursor, 5);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut list = SearchableList::new(0);
        list.set_search("fx");
        list.cursor_left();
        list.insert_char('/');
        assert_eq!(list.search, "f/x");
        assert_eq!(list.cursor, 2);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut list = SearchableList::new(0);
        list.set_search("ab");
        list.cursor_start();
        assert!(!list.backspace());
        assert_eq!(list.search, "ab");
    }

    #[test]
    fn test_delete_word_respects_whitespace() {
        let mut list = SearchableList::new(0);
        list.set_search("alpha  beta");

        assert!(list.delete_word());
        assert_eq!(list.search, "alpha  ");
        assert_eq!(list.cursor, "alpha  ".len());

        assert!(list.delete_word());
        assert_eq!(list.search, "");
        assert!(!list.delete_word());
    }

    #[test]
    fn test_delete_to_start_clamps_cursor() {
        let mut list = SearchableList::new(0);
        list.search = "café".to_string();
        list.cursor = 4;

        assert!(list.delete_to_start());
        assert_eq!(list.search, "é");
        assert_eq!(list.cursor, 0);
    }
}
