//! Horizontal card carousel: drag, wheel stepping, animated scroll-to-index,
//! hover suppression of the page scroll, and windowed realization.

use std::ops::Range;
use std::time::{Duration, Instant};

use super::fade::EdgeFade;
use super::page::RegionId;
use super::scroll::{Axis, ScrollPosition, ScrollSuppression};
use super::tween::{Easing, Tween};

#[derive(Debug, Clone, Copy)]
pub struct CarouselConfig {
    pub card_width: f32,
    pub card_height: f32,
    pub spacing: f32,
    /// Cards realized beyond each side of the viewport
    pub overscan: usize,
    pub scroll_duration: Duration,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            card_width: 204.0,
            card_height: 96.0,
            spacing: 8.0,
            overscan: 1,
            scroll_duration: Duration::from_millis(200),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Carousel {
    region: RegionId,
    config: CarouselConfig,
    position: ScrollPosition,
    item_count: usize,
    animation: Option<Tween>,
    last_wheel_target: Option<usize>,
    hovered: bool,
    fade: EdgeFade,
}

impl Carousel {
    pub fn new(region: RegionId, config: CarouselConfig, now: Instant) -> Self {
        Self {
            region,
            config,
            position: ScrollPosition::new(Axis::Horizontal),
            item_count: 0,
            animation: None,
            last_wheel_target: None,
            hovered: false,
            fade: EdgeFade::new(now),
        }
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn position(&self) -> &ScrollPosition {
        &self.position
    }

    pub fn fade(&self) -> &EdgeFade {
        &self.fade
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn stride(&self) -> f32 {
        (self.config.card_width + self.config.spacing).max(1.0)
    }

    fn content_width(&self) -> f32 {
        if self.item_count == 0 {
            return 0.0;
        }
        let n = self.item_count as f32;
        n * self.config.card_width + (n - 1.0) * self.config.spacing
    }

    /// Update item count and viewport width, re-clamping the offset
    pub fn set_extents(&mut self, item_count: usize, viewport_width: f32, now: Instant) {
        self.item_count = item_count;
        let content = self.content_width();
        self.position.set_extents(content, viewport_width);
        if let Some(last) = self.last_wheel_target {
            if item_count == 0 || last >= item_count {
                self.last_wheel_target = None;
            }
        }
        self.fade.observe_position(&self.position, now);
    }

    pub fn first_visible_index(&self) -> usize {
        self.position.first_visible_index(self.stride())
    }

    /// Indices to realize this frame
    pub fn visible_range(&self) -> Range<usize> {
        self.position
            .visible_range(self.stride(), self.item_count, self.config.overscan)
    }

    /// Left edge of card `index` relative to the viewport start
    pub fn card_offset(&self, index: usize) -> f32 {
        index as f32 * self.stride() - self.position.offset()
    }

    /// Apply one drag update. Dragging right moves the offset back.
    pub fn drag(&mut self, delta: f32, now: Instant) {
        if self.animation.take().is_some() {
            tracing::trace!(region = ?self.region, "Drag interrupted scroll animation");
        }
        self.position.scroll_by(-delta);
        self.fade.observe_position(&self.position, now);
    }

    /// Translate a wheel delta into a target index and animate to it.
    ///
    /// Positive deltas advance. A single +1 step from the very start of the
    /// list targets index 0 first unless the previous wheel target already
    /// was 0, which absorbs the duplicate event some wheels emit per notch.
    pub fn wheel(&mut self, delta: f32, now: Instant) -> Option<usize> {
        if self.item_count == 0 || !delta.is_finite() {
            return None;
        }
        let rounded = delta.round() as i64;
        if rounded == 0 {
            return None;
        }

        let first = self.first_visible_index() as i64;
        let computed = first.saturating_add(rounded);
        let target = if first == 0
            && computed == 1
            && rounded == 1
            && self.last_wheel_target != Some(0)
        {
            0
        } else {
            computed.clamp(0, self.item_count as i64 - 1) as usize
        };

        self.last_wheel_target = Some(target);
        self.animate_to_index(target, now);
        Some(target)
    }

    /// Animate so that card `index` is the first visible one. Out-of-range
    /// indices clamp; a newer request replaces any animation in flight.
    pub fn animate_to_index(&mut self, index: usize, now: Instant) {
        if self.item_count == 0 {
            return;
        }
        let index = index.min(self.item_count - 1);
        let target = (index as f32 * self.stride()).min(self.position.max_offset());
        let current = self.position.offset();

        match self.animation.as_mut() {
            Some(tween) => tween.retarget(target, now, self.config.scroll_duration, Easing::EaseOut),
            None => {
                self.animation = Some(Tween::new(
                    current,
                    target,
                    now,
                    self.config.scroll_duration,
                    Easing::EaseOut,
                ))
            }
        }
        tracing::debug!(region = ?self.region, index, target, "Carousel scroll requested");
    }

    /// Advance the animation. Returns true while anything is still moving.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(tween) = &self.animation {
            self.position.scroll_to(tween.value(now));
            if tween.is_finished(now) {
                self.animation = None;
            }
        }
        self.fade.observe_position(&self.position, now);
        self.animation.is_some() || self.fade.is_animating(now)
    }

    /// Pointer entered (`inside`) or left the carousel. While hovered the
    /// carousel holds the page scroll suppressed.
    pub fn set_hovered(&mut self, inside: bool, suppression: &mut ScrollSuppression) -> bool {
        if inside == self.hovered {
            return false;
        }
        self.hovered = inside;
        if inside {
            suppression.acquire(self.region);
        } else {
            suppression.release(self.region);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(count: usize, viewport: f32) -> (Carousel, Instant) {
        let now = Instant::now();
        let mut c = Carousel::new(RegionId::Installations, CarouselConfig::default(), now);
        c.set_extents(count, viewport, now);
        (c, now)
    }

    fn settle(c: &mut Carousel, now: Instant) -> Instant {
        let later = now + Duration::from_secs(1);
        c.tick(later);
        later
    }

    #[test]
    fn empty_carousel_realizes_nothing_and_is_open() {
        let (mut c, now) = carousel(0, 800.0);
        assert_eq!(c.visible_range(), 0..0);
        assert!(!c.position().can_scroll_backward());
        assert!(!c.position().can_scroll_forward());
        assert!(c.fade().is_open(now));
        assert_eq!(c.wheel(1.0, now), None);
    }

    #[test]
    fn single_narrow_card_is_open() {
        let (c, now) = carousel(1, 800.0);
        assert_eq!(c.visible_range(), 0..1);
        assert!(!c.position().can_scroll_forward());
        assert!(c.fade().is_open(now));
    }

    #[test]
    fn duplicate_first_wheel_step_is_absorbed() {
        let (mut c, now) = carousel(12, 640.0);
        let first = c.wheel(1.0, now);
        let now = settle(&mut c, now);
        let second = c.wheel(1.0, now);
        assert_eq!([first, second], [Some(0), Some(1)]);

        let now = settle(&mut c, now);
        assert_eq!(c.first_visible_index(), 1);
        assert_eq!(c.wheel(1.0, now), Some(2));
    }

    #[test]
    fn wheel_back_to_start_then_forward_steps_normally() {
        let (mut c, now) = carousel(12, 640.0);
        c.animate_to_index(3, now);
        let now = settle(&mut c, now);
        assert_eq!(c.wheel(-3.0, now), Some(0));
        let now = settle(&mut c, now);
        assert_eq!(c.wheel(1.0, now), Some(1));
    }

    #[test]
    fn wheel_targets_clamp_into_range() {
        let (mut c, now) = carousel(5, 300.0);
        assert_eq!(c.wheel(-4.0, now), Some(0));
        assert_eq!(c.wheel(40.0, now), Some(4));
    }

    #[test]
    fn non_finite_wheel_deltas_are_ignored() {
        let (mut c, now) = carousel(8, 300.0);
        c.animate_to_index(2, now);
        let now = settle(&mut c, now);
        let offset = c.position().offset();

        assert_eq!(c.wheel(f32::INFINITY, now), None);
        assert_eq!(c.wheel(f32::NEG_INFINITY, now), None);
        assert_eq!(c.wheel(f32::NAN, now), None);
        assert!(!c.is_animating());
        assert_eq!(c.position().offset(), offset);

        assert_eq!(c.wheel(f32::MAX, now), Some(7));
        assert_eq!(c.wheel(-f32::MAX, now), Some(0));
    }

    #[test]
    fn animate_to_out_of_range_index_clamps() {
        let (mut c, now) = carousel(10, 640.0);
        c.animate_to_index(999, now);
        settle(&mut c, now);
        assert_eq!(c.position().offset(), c.position().max_offset());
        assert!(!c.position().can_scroll_forward());
    }

    #[test]
    fn newer_target_replaces_animation_in_flight() {
        let (mut c, now) = carousel(20, 640.0);
        c.animate_to_index(10, now);
        let mid = now + Duration::from_millis(100);
        c.tick(mid);
        let partway = c.position().offset();
        assert!(partway > 0.0 && partway < 10.0 * c.stride());

        c.animate_to_index(2, mid);
        c.tick(mid);
        assert!((c.position().offset() - partway).abs() < 1e-3);

        settle(&mut c, mid);
        assert_eq!(c.position().offset(), 2.0 * c.stride());
    }

    #[test]
    fn drag_inverts_sign_and_cancels_animation() {
        let (mut c, now) = carousel(20, 640.0);
        c.drag(-300.0, now);
        assert_eq!(c.position().offset(), 300.0);
        c.animate_to_index(8, now);
        c.drag(100.0, now);
        assert!(!c.is_animating());
        assert_eq!(c.position().offset(), 200.0);
    }

    #[test]
    fn drag_updates_fades() {
        let (mut c, now) = carousel(20, 640.0);
        c.drag(-50.0, now);
        let later = now + Duration::from_millis(30);
        assert_eq!(c.fade().start_opacity(later), 0.0);
        assert_eq!(c.fade().end_opacity(later), 0.0);
    }

    #[test]
    fn hover_toggles_page_suppression() {
        let (mut c, _) = carousel(3, 640.0);
        let mut suppression = ScrollSuppression::new();
        assert!(c.set_hovered(true, &mut suppression));
        assert!(!suppression.scroll_enabled());
        assert!(!c.set_hovered(true, &mut suppression));
        assert!(c.set_hovered(false, &mut suppression));
        assert!(suppression.scroll_enabled());
    }

    #[test]
    fn visible_range_follows_offset() {
        let (mut c, now) = carousel(30, 640.0);
        assert_eq!(c.visible_range(), 0..5);
        c.drag(-(c.stride() * 10.0), now);
        assert_eq!(c.first_visible_index(), 10);
        assert_eq!(c.visible_range(), 9..15);
        assert_eq!(c.card_offset(10), 0.0);
    }
}
