//! Page geometry.
//!
//! Controllers work in logical units; the terminal works in cells. [`Scale`]
//! converts between the two and [`PageLayout`] places every section of the
//! page in page space (row 0 is the top of the page, not of the screen).

use ratatui::layout::{Position, Rect};

/// Logical units covered by one terminal cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub unit_width: f32,
    pub unit_height: f32,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            unit_width: 8.0,
            unit_height: 16.0,
        }
    }
}

impl Scale {
    pub fn cols_to_units(&self, cols: u16) -> f32 {
        cols as f32 * self.unit_width
    }

    pub fn rows_to_units(&self, rows: u16) -> f32 {
        rows as f32 * self.unit_height
    }

    pub fn units_to_cols(&self, units: f32) -> i32 {
        (units / self.unit_width).floor() as i32
    }

    pub fn units_to_rows(&self, units: f32) -> i32 {
        (units / self.unit_height).floor() as i32
    }

    /// Cell span `(start, len)` covered by `len` units starting at `start`
    pub fn col_span(&self, start: f32, len: f32) -> (i32, i32) {
        let a = self.units_to_cols(start);
        let b = self.units_to_cols(start + len);
        (a, (b - a).max(1))
    }

    pub fn row_span(&self, start: f32, len: f32) -> (i32, i32) {
        let a = self.units_to_rows(start);
        let b = self.units_to_rows(start + len);
        (a, (b - a).max(1))
    }
}

pub const PADDING: f32 = 32.0;
pub const SPACER: f32 = 16.0;
pub const TITLE_HEIGHT: f32 = 32.0;
pub const SUBTITLE_HEIGHT: f32 = 16.0;
pub const CAROUSEL_HEIGHT: f32 = 96.0;
pub const VERSIONS_HEADER_HEIGHT: f32 = 48.0;
pub const GRID_HEIGHT: f32 = 1024.0;
pub const SEARCH_WIDTH: f32 = 256.0;

pub const ADD_BUTTON_LABEL: &str = "+ Add new installation";
pub const VIEW_ALL_LABEL: &str = "View all";
pub const VIEW_MORE_LABEL: &str = "View more";
pub const FILTER_BUTTON_LABEL: &str = "[≡]";

/// Section rectangles in page space
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub width: u16,
    pub total_rows: u16,
    pub title: Rect,
    pub add_button: Rect,
    pub recent_header: Rect,
    pub installations_header: Rect,
    pub view_all: Rect,
    pub installations: Rect,
    pub installations_bar: Rect,
    pub newly_added_header: Rect,
    pub view_more: Rect,
    pub newly_added: Rect,
    pub newly_added_bar: Rect,
    pub versions_header: Rect,
    pub search_box: Rect,
    pub filter_button: Rect,
    pub grid: Rect,
    pub total_units: f32,
}

struct Cursor<'a> {
    scale: &'a Scale,
    y: f32,
    x: u16,
    width: u16,
}

impl Cursor<'_> {
    fn take(&mut self, height: f32) -> Rect {
        let (row, rows) = self.scale.row_span(self.y, height);
        self.y += height;
        Rect::new(self.x, to_u16(row), self.width, to_u16(rows))
    }

    fn skip(&mut self, height: f32) {
        self.y += height;
    }
}

fn to_u16(v: i32) -> u16 {
    v.clamp(0, u16::MAX as i32) as u16
}

/// Rect of `width` cells right-aligned inside `row`, on its first line
fn right_aligned(row: Rect, width: u16, trailing: u16) -> Rect {
    let width = width.min(row.width);
    let x = (row.right().saturating_sub(trailing)).saturating_sub(width).max(row.x);
    Rect::new(x, row.y, width, 1.min(row.height))
}

impl PageLayout {
    /// Lay the page out for a page-buffer `width` in cells
    pub fn compute(width: u16, scale: &Scale) -> Self {
        let pad_cols = to_u16(scale.units_to_cols(PADDING));
        let content_width = width.saturating_sub(pad_cols * 2).max(1);
        let mut cursor = Cursor {
            scale,
            y: 0.0,
            x: pad_cols.min(width.saturating_sub(1)),
            width: content_width,
        };

        cursor.skip(PADDING);
        let title = cursor.take(TITLE_HEIGHT);
        cursor.skip(SPACER);
        let recent_header = cursor.take(SUBTITLE_HEIGHT);
        cursor.skip(SPACER);
        let installations_header = cursor.take(SUBTITLE_HEIGHT);
        cursor.skip(SPACER);
        let installations = cursor.take(CAROUSEL_HEIGHT);
        let installations_bar = cursor.take(SPACER);
        let newly_added_header = cursor.take(SUBTITLE_HEIGHT);
        cursor.skip(SPACER);
        let newly_added = cursor.take(CAROUSEL_HEIGHT);
        let newly_added_bar = cursor.take(SPACER);
        let versions_header = cursor.take(VERSIONS_HEADER_HEIGHT);
        cursor.skip(SPACER);
        let grid = cursor.take(GRID_HEIGHT);
        cursor.skip(PADDING);

        let total_units = cursor.y;
        let total_rows = to_u16((total_units / scale.unit_height).ceil() as i32);

        let add_button = right_aligned(title, label_width(ADD_BUTTON_LABEL) + 2, 0);
        // room for the chevron revealed on hover
        let view_all = right_aligned(installations_header, label_width(VIEW_ALL_LABEL) + 2, 0);
        let view_more = right_aligned(newly_added_header, label_width(VIEW_MORE_LABEL) + 2, 0);

        let filter_width = label_width(FILTER_BUTTON_LABEL) + 2;
        let filter_button = Rect::new(
            versions_header.right().saturating_sub(filter_width).max(versions_header.x),
            versions_header.y,
            filter_width.min(versions_header.width),
            versions_header.height,
        );
        let gap = to_u16(scale.units_to_cols(8.0)).max(1);
        let search_cols = to_u16(scale.units_to_cols(SEARCH_WIDTH));
        let search_right = filter_button.x.saturating_sub(gap);
        let search_x = search_right.saturating_sub(search_cols).max(versions_header.x);
        let search_box = Rect::new(
            search_x,
            versions_header.y,
            search_right.saturating_sub(search_x),
            versions_header.height,
        );

        Self {
            width,
            total_rows,
            title,
            add_button,
            recent_header,
            installations_header,
            view_all,
            installations,
            installations_bar,
            newly_added_header,
            view_more,
            newly_added,
            newly_added_bar,
            versions_header,
            search_box,
            filter_button,
            grid,
            total_units,
        }
    }

    /// Grid viewport, leaving the right-most column for its scroll bar
    pub fn grid_viewport(&self) -> Rect {
        Rect::new(self.grid.x, self.grid.y, self.grid.width.saturating_sub(1), self.grid.height)
    }
}

pub fn label_width(label: &str) -> u16 {
    label.chars().count().min(u16::MAX as usize) as u16
}

/// Page-space position for a screen cell, given the page scroll in rows
pub fn to_page_space(col: u16, row: u16, page_row_offset: u16) -> Position {
    Position::new(col, row.saturating_add(page_row_offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_stack_in_order() {
        let layout = PageLayout::compute(120, &Scale::default());
        assert_eq!(layout.title.y, 2);
        assert_eq!(layout.title.height, 2);
        assert!(layout.recent_header.y > layout.title.bottom());
        assert!(layout.installations.y > layout.installations_header.y);
        assert_eq!(layout.installations.height, 6);
        assert!(layout.newly_added.y > layout.installations_bar.y);
        assert!(layout.grid.y > layout.versions_header.bottom());
        assert_eq!(layout.grid.height, 64);
        assert_eq!(layout.total_units, 1520.0);
        assert_eq!(layout.total_rows, 95);
    }

    #[test]
    fn horizontal_padding_and_controls() {
        let layout = PageLayout::compute(120, &Scale::default());
        assert_eq!(layout.installations.x, 4);
        assert_eq!(layout.installations.width, 112);
        assert_eq!(layout.add_button.right(), layout.title.right());
        assert_eq!(layout.filter_button.right(), layout.versions_header.right());
        assert_eq!(layout.search_box.width, 32);
        assert!(layout.search_box.right() < layout.filter_button.x);
    }

    #[test]
    fn tiny_width_does_not_underflow() {
        let layout = PageLayout::compute(3, &Scale::default());
        assert!(layout.installations.width >= 1);
        assert!(layout.search_box.width <= layout.versions_header.width);
    }

    #[test]
    fn spans_cover_at_least_one_cell() {
        let scale = Scale::default();
        assert_eq!(scale.col_span(0.0, 204.0), (0, 25));
        assert_eq!(scale.col_span(212.0, 204.0), (26, 26));
        assert_eq!(scale.row_span(0.0, 2.0), (0, 1));
        assert_eq!(scale.units_to_cols(-4.0), -1);
    }
}
