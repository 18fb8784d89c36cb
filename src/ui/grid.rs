use std::ops::Range;
use std::time::Instant;

use super::fade::EdgeFade;
use super::scroll::{Axis, ScrollPosition};

#[derive(Debug, Clone, Copy)]
pub struct GridConfig {
    pub min_card_width: f32,
    pub card_height: f32,
    pub row_spacing: f32,
    pub prefetch_rows_above: usize,
    pub prefetch_rows_below: usize,
    /// Units scrolled per wheel notch
    pub wheel_step: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_card_width: 172.0,
            card_height: 172.0,
            row_spacing: 8.0,
            prefetch_rows_above: 1,
            prefetch_rows_below: 2,
            wheel_step: 90.0,
        }
    }
}

/// Column layout for a given viewport width.
///
/// Width left over after the cards is spread around every column: a full
/// gap between neighbours and half a gap at each outer edge, which keeps
/// the grid centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub columns: usize,
    pub card_width: f32,
    pub gap: f32,
    pub margin: f32,
}

impl GridMetrics {
    pub fn compute(viewport_width: f32, min_card_width: f32) -> Self {
        let min_card_width = min_card_width.max(1.0);
        let viewport_width = viewport_width.max(0.0);
        let columns = ((viewport_width / min_card_width).floor() as usize).max(1);
        let leftover = (viewport_width - columns as f32 * min_card_width).max(0.0);
        let gap = leftover / columns as f32;
        Self {
            columns,
            card_width: min_card_width,
            gap,
            margin: gap / 2.0,
        }
    }

    pub fn column_x(&self, column: usize) -> f32 {
        self.margin + column as f32 * (self.card_width + self.gap)
    }

    #[cfg(test)]
    pub fn leftover(&self) -> f32 {
        self.gap * self.columns as f32
    }
}

/// Placement of one realized card relative to the grid viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct VersionGrid {
    config: GridConfig,
    metrics: GridMetrics,
    position: ScrollPosition,
    item_count: usize,
    fade: EdgeFade,
}

impl VersionGrid {
    pub fn new(config: GridConfig, now: Instant) -> Self {
        Self {
            config,
            metrics: GridMetrics::compute(0.0, config.min_card_width),
            position: ScrollPosition::new(Axis::Vertical),
            item_count: 0,
            fade: EdgeFade::new(now),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    pub fn position(&self) -> &ScrollPosition {
        &self.position
    }

    pub fn fade(&self) -> &EdgeFade {
        &self.fade
    }

    pub fn row_stride(&self) -> f32 {
        self.config.card_height + self.config.row_spacing
    }

    pub fn total_rows(&self) -> usize {
        self.item_count.div_ceil(self.metrics.columns)
    }

    fn content_height(&self) -> f32 {
        let rows = self.total_rows();
        if rows == 0 {
            return 0.0;
        }
        rows as f32 * self.config.card_height + (rows - 1) as f32 * self.config.row_spacing
    }

    pub fn set_extents(&mut self, item_count: usize, viewport_width: f32, viewport_height: f32, now: Instant) {
        let metrics = GridMetrics::compute(viewport_width, self.config.min_card_width);
        if metrics.columns != self.metrics.columns {
            tracing::debug!(
                from = self.metrics.columns,
                to = metrics.columns,
                width = viewport_width,
                "Grid columns changed"
            );
        }
        self.metrics = metrics;
        self.item_count = item_count;
        let content = self.content_height();
        self.position.set_extents(content, viewport_height);
        self.fade.observe_position(&self.position, now);
    }

    /// Rows intersecting the viewport, widened by the prefetch margins
    pub fn realized_rows(&self) -> Range<usize> {
        let rows = self.total_rows();
        let visible = self.position.visible_range(self.row_stride(), rows, 0);
        if visible.is_empty() {
            return 0..0;
        }
        let start = visible.start.saturating_sub(self.config.prefetch_rows_above);
        let end = (visible.end + self.config.prefetch_rows_below).min(rows);
        start..end
    }

    /// Item indices (into the filtered subset) to realize this frame
    pub fn realized_range(&self) -> Range<usize> {
        let rows = self.realized_rows();
        let columns = self.metrics.columns;
        let start = (rows.start * columns).min(self.item_count);
        let end = (rows.end * columns).min(self.item_count);
        start..end
    }

    pub fn cell(&self, index: usize) -> GridCell {
        let columns = self.metrics.columns;
        let row = index / columns;
        let column = index % columns;
        GridCell {
            index,
            x: self.metrics.column_x(column),
            y: row as f32 * self.row_stride() - self.position.offset(),
            width: self.metrics.card_width,
            height: self.config.card_height,
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.realized_range().map(|i| self.cell(i))
    }

    pub fn scroll_by(&mut self, delta: f32, now: Instant) -> f32 {
        let moved = self.position.scroll_by(delta);
        self.fade.observe_position(&self.position, now);
        moved
    }

    /// Scroll by `notches` wheel steps. Returns the units actually moved.
    pub fn wheel(&mut self, notches: f32, now: Instant) -> f32 {
        self.scroll_by(notches * self.config.wheel_step, now)
    }

    /// Jump back to the first row, used when the filtered subset changes
    pub fn scroll_to_top(&mut self, now: Instant) {
        self.position.scroll_to(0.0);
        self.fade.observe_position(&self.position, now);
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.fade.observe_position(&self.position, now);
        self.fade.is_animating(now)
    }
}
