//! Click-target registry and pixel-to-cell conversion for the browser shell.
//!
//! Rendering registers rectangular targets tagged with semantic action IDs
//! (see [`crate::actions`]); the mouse handler converts DOM pixel coordinates
//! into a terminal cell and hit-tests it here. Pure logic, unit tested
//! without a DOM.

use ratzilla::ratatui::layout::Rect;

/// A rectangular screen region that triggers an action when clicked.
#[derive(Clone, Debug)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action: u16,
}

/// Shared between the render loop (which rewrites targets every frame) and
/// the mouse handler (which reads them).
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub cols: u16,
    pub rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            cols: 0,
            rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_target(&mut self, rect: Rect, action: u16) {
        self.targets.push(ClickTarget { rect, action });
    }

    /// Convenience: one full-width row inside `area`. Rows outside the area
    /// are ignored (e.g. content clipped behind a border).
    pub fn add_row_target(&mut self, area: Rect, row: u16, action: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_target(Rect::new(area.x, row, area.width, 1), action);
        }
    }

    /// Hit-test a terminal cell. Targets registered later are drawn on top,
    /// so they shadow earlier ones.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            if col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height {
                Some(t.action)
            } else {
                None
            }
        })
    }
}

/// Convert DOM pixel coordinates (relative to the grid container's top-left
/// corner) into a terminal cell. `None` when the click lands outside the
/// grid or the grid is degenerate.
pub fn pixel_to_cell(
    x: f64,
    y: f64,
    grid_width: f64,
    grid_height: f64,
    cols: u16,
    rows: u16,
) -> Option<(u16, u16)> {
    if grid_width <= 0.0 || grid_height <= 0.0 || cols == 0 || rows == 0 {
        return None;
    }
    if x < 0.0 || y < 0.0 {
        return None;
    }

    let col = (x / (grid_width / cols as f64)) as u16;
    let row = (y / (grid_height / rows as f64)) as u16;
    if col >= cols || row >= rows {
        return None;
    }
    Some((col, row))
}

/// Below this many columns the layout stacks panels instead of splitting.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 70
}
