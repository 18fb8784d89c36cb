use std::collections::BTreeSet;
use std::ops::Range;

use super::page::RegionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Single-axis scroll state in logical units.
///
/// Only the offset and the two extents are stored. The boundary flags are
/// derived on every read, and the offset is re-clamped whenever either
/// extent changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollPosition {
    axis: Axis,
    offset: f32,
    content: f32,
    viewport: f32,
}

impl ScrollPosition {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            offset: 0.0,
            content: 0.0,
            viewport: 0.0,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn viewport(&self) -> f32 {
        self.viewport
    }

    pub fn max_offset(&self) -> f32 {
        (self.content - self.viewport).max(0.0)
    }

    pub fn can_scroll_backward(&self) -> bool {
        self.offset > 0.0
    }

    pub fn can_scroll_forward(&self) -> bool {
        self.offset < self.max_offset()
    }

    pub fn set_extents(&mut self, content: f32, viewport: f32) {
        self.content = content.max(0.0);
        self.viewport = viewport.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    pub fn scroll_to(&mut self, offset: f32) {
        // Infinities clamp to the nearest end; only NaN has no direction
        let offset = if offset.is_nan() { 0.0 } else { offset };
        self.offset = offset.clamp(0.0, self.max_offset());
    }

    /// Move by `delta` units. Returns the distance actually travelled.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        let before = self.offset;
        self.scroll_to(before + delta);
        self.offset - before
    }

    /// Indices of fixed-stride items intersecting the viewport, widened by
    /// `overscan` on both sides and clamped to `count`
    pub fn visible_range(&self, stride: f32, count: usize, overscan: usize) -> Range<usize> {
        if count == 0 || stride <= 0.0 || self.viewport <= 0.0 {
            return 0..0;
        }
        let first = (self.offset / stride).floor() as usize;
        let last = ((self.offset + self.viewport - 1e-3) / stride).floor() as usize;
        let start = first.saturating_sub(overscan).min(count);
        let end = (last + 1 + overscan).min(count);
        start..end.max(start)
    }

    /// Index of the first item whose stride slot contains the offset
    pub fn first_visible_index(&self, stride: f32) -> usize {
        if stride <= 0.0 {
            return 0;
        }
        (self.offset / stride).floor() as usize
    }

    /// Scroll bar thumb as (start, length) fractions of the track
    pub fn thumb(&self) -> Option<(f32, f32)> {
        if self.content <= self.viewport || self.content <= 0.0 {
            return None;
        }
        let len = self.viewport / self.content;
        let start = self.offset / self.content;
        Some((start, len))
    }
}

/// Regions currently asking their ancestor scroll region to stand still.
///
/// The page reads [`ScrollSuppression::scroll_enabled`] before applying its
/// own wheel input; nested regions only add or remove themselves.
#[derive(Debug, Clone, Default)]
pub struct ScrollSuppression {
    holders: BTreeSet<RegionId>,
}

impl ScrollSuppression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&mut self, region: RegionId) -> bool {
        self.holders.insert(region)
    }

    pub fn release(&mut self, region: RegionId) -> bool {
        self.holders.remove(&region)
    }

    pub fn scroll_enabled(&self) -> bool {
        self.holders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_flags(pos: &ScrollPosition) {
        assert_eq!(pos.can_scroll_backward(), pos.offset() > 0.0);
        assert_eq!(pos.can_scroll_forward(), pos.offset() < pos.max_offset());
    }

    #[test]
    fn flags_track_offset_through_every_operation() {
        let mut pos = ScrollPosition::new(Axis::Horizontal);
        assert_flags(&pos);

        pos.set_extents(1000.0, 300.0);
        assert_flags(&pos);
        assert!(pos.can_scroll_forward());
        assert!(!pos.can_scroll_backward());

        pos.scroll_by(250.0);
        assert_flags(&pos);
        pos.scroll_by(10_000.0);
        assert_flags(&pos);
        assert_eq!(pos.offset(), 700.0);
        assert!(!pos.can_scroll_forward());

        // Growing the viewport re-clamps the offset
        pos.set_extents(1000.0, 900.0);
        assert_eq!(pos.offset(), 100.0);
        assert_flags(&pos);

        pos.set_extents(200.0, 900.0);
        assert_eq!(pos.offset(), 0.0);
        assert_flags(&pos);
        assert!(!pos.can_scroll_forward());

        pos.scroll_by(-50.0);
        assert_flags(&pos);
    }

    #[test]
    fn nan_resets_and_infinities_clamp() {
        let mut pos = ScrollPosition::new(Axis::Vertical);
        pos.set_extents(500.0, 100.0);
        pos.scroll_to(f32::INFINITY);
        assert_eq!(pos.offset(), 400.0);
        assert!(!pos.can_scroll_forward());
        pos.scroll_to(f32::NAN);
        assert_eq!(pos.offset(), 0.0);
        pos.scroll_to(200.0);
        pos.scroll_to(f32::NEG_INFINITY);
        assert_eq!(pos.offset(), 0.0);
        assert_eq!(pos.axis(), Axis::Vertical);
    }

    #[test]
    fn scroll_by_reports_travel() {
        let mut pos = ScrollPosition::new(Axis::Vertical);
        pos.set_extents(500.0, 100.0);
        assert_eq!(pos.scroll_by(-20.0), 0.0);
        assert_eq!(pos.scroll_by(450.0), 400.0);
    }

    #[test]
    fn visible_range_with_overscan() {
        let mut pos = ScrollPosition::new(Axis::Horizontal);
        pos.set_extents(212.0 * 20.0, 500.0);
        assert_eq!(pos.visible_range(212.0, 20, 0), 0..3);
        pos.scroll_to(212.0 * 5.0);
        assert_eq!(pos.visible_range(212.0, 20, 1), 4..9);
        assert_eq!(pos.first_visible_index(212.0), 5);
        assert_eq!(pos.visible_range(212.0, 0, 1), 0..0);
    }

    #[test]
    fn thumb_only_when_overflowing() {
        let mut pos = ScrollPosition::new(Axis::Vertical);
        pos.set_extents(100.0, 200.0);
        assert!(pos.thumb().is_none());
        pos.set_extents(400.0, 100.0);
        pos.scroll_to(100.0);
        assert_eq!(pos.thumb(), Some((0.25, 0.25)));
    }

    #[test]
    fn suppression_enables_only_when_empty() {
        let mut s = ScrollSuppression::new();
        assert!(s.scroll_enabled());
        s.acquire(RegionId::Installations);
        s.acquire(RegionId::NewlyAdded);
        s.release(RegionId::Installations);
        assert!(!s.scroll_enabled());
        s.release(RegionId::NewlyAdded);
        assert!(s.scroll_enabled());
    }
}
