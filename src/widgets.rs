//! Reusable clickable building block for render code.
//!
//! [`ClickableList`] pairs rendered lines with click actions so the row math
//! for target registration lives in one place instead of being repeated in
//! every panel. Targets track their line: inserting a header above a button
//! moves the button's hit region automatically.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;
use ratzilla::ratatui::widgets::{Paragraph, Wrap};

use crate::input::ClickState;

pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line index, action)` pairs.
    actions: Vec<(usize, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a non-clickable line.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a clickable line bound to a semantic action ID.
    pub fn push_clickable(&mut self, line: Line<'a>, action: u16) {
        self.actions.push((self.lines.len(), action));
        self.lines.push(line);
    }

    /// Consume the builder, returning the lines for rendering.
    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Visual rows one line occupies when wrapped to `width` columns.
    fn visual_height(line: &Line, width: u16) -> u16 {
        Paragraph::new(line.clone())
            .wrap(Wrap { trim: false })
            .line_count(width) as u16
    }

    /// Register click targets for every clickable line.
    ///
    /// `top_offset` / `bottom_offset` are the border rows of `area`.
    /// `wrap_width` is the inner content width when the paragraph renders
    /// with `Wrap`; pass `None` for unwrapped content, where one logical line
    /// is exactly one visual row. Rows clipped by the area are skipped.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        wrap_width: Option<u16>,
    ) {
        let content_y = area.y + top_offset;
        let content_end = (area.y + area.height).saturating_sub(bottom_offset);

        match wrap_width {
            None => {
                for &(idx, action) in &self.actions {
                    let row = content_y + idx as u16;
                    if row < content_end {
                        cs.add_row_target(area, row, action);
                    }
                }
            }
            Some(width) => {
                let width = width.max(1);
                let mut starts = Vec::with_capacity(self.lines.len());
                let mut cursor: u16 = 0;
                for line in &self.lines {
                    starts.push(cursor);
                    cursor += Self::visual_height(line, width);
                }
                for &(idx, action) in &self.actions {
                    let line = match self.lines.get(idx) {
                        Some(line) => line,
                        None => continue,
                    };
                    // A wrapped line is clickable on every visual row it spans.
                    for offset in 0..Self::visual_height(line, width) {
                        let row = content_y + starts[idx] + offset;
                        if row < content_end {
                            cs.add_row_target(area, row, action);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_land_on_their_rows() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("header"));
        cl.push_clickable(Line::from("buy A"), 10);
        cl.push_clickable(Line::from("buy B"), 11);
        cl.push(Line::from("footer"));

        // Bordered area: content starts one row in.
        let area = Rect::new(0, 5, 80, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, None);

        assert_eq!(cs.hit_test(10, 6), None); // header
        assert_eq!(cs.hit_test(10, 7), Some(10));
        assert_eq!(cs.hit_test(10, 8), Some(11));
        assert_eq!(cs.hit_test(10, 9), None); // footer
    }

    #[test]
    fn inserted_header_shifts_targets() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("header 1"));
        cl.push(Line::from("header 2"));
        cl.push_clickable(Line::from("buy"), 42);

        let area = Rect::new(0, 0, 80, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, None);

        assert_eq!(cs.hit_test(10, 3), Some(42));
        assert_eq!(cs.hit_test(10, 2), None);
    }

    #[test]
    fn rows_clipped_by_area_are_skipped() {
        let mut cl = ClickableList::new();
        for i in 0..20 {
            cl.push_clickable(Line::from(format!("row {i}")), 50 + i as u16);
        }

        // Only 3 content rows fit between the borders.
        let area = Rect::new(0, 0, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, None);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(10, 1), Some(50));
        assert_eq!(cs.hit_test(10, 3), Some(52));
        assert_eq!(cs.hit_test(10, 4), None);
    }

    #[test]
    fn empty_list_registers_nothing() {
        let cl = ClickableList::new();
        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 80, 10), &mut cs, 1, 1, None);
        assert!(cs.targets.is_empty());
    }

    #[test]
    fn wrapped_lines_push_later_targets_down() {
        let mut cl = ClickableList::new();
        // 20 chars in a 10-wide area: two visual rows.
        cl.push(Line::from("12345678901234567890"));
        cl.push_clickable(Line::from("buy"), 10);

        let area = Rect::new(0, 0, 10, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, Some(10));

        assert_eq!(cs.hit_test(5, 0), None);
        assert_eq!(cs.hit_test(5, 1), None);
        assert_eq!(cs.hit_test(5, 2), Some(10));
    }

    #[test]
    fn wrapped_clickable_covers_all_its_rows() {
        let mut cl = ClickableList::new();
        // 30 chars in a 10-wide area: three visual rows, all clickable.
        cl.push_clickable(Line::from("123456789012345678901234567890"), 42);

        let area = Rect::new(0, 0, 10, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, Some(10));

        for row in 0..3 {
            assert_eq!(cs.hit_test(5, row), Some(42));
        }
        assert_eq!(cs.hit_test(5, 3), None);
    }
}
