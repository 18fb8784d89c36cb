//! Edge fades for scrollable regions.
//!
//! Each edge is fully visible while its region cannot scroll further in that
//! direction and masked while more content lies beyond it. The two channels
//! animate independently: quickly when an edge becomes blocked, a little
//! slower when it opens up.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier};
use std::time::{Duration, Instant};

use super::scroll::{Axis, ScrollPosition};
use super::tween::{Easing, Tween};

pub const INTO_BLOCKED: Duration = Duration::from_millis(10);
pub const INTO_SCROLLABLE: Duration = Duration::from_millis(25);

/// Full-opacity stops between the two animated edge stops
const SOLID_STOPS: usize = 7;

pub const VISIBLE: f32 = 1.0;
pub const MASKED: f32 = 0.0;

#[derive(Debug, Clone)]
struct FadeChannel {
    blocked: bool,
    opacity: Tween,
}

impl FadeChannel {
    fn new(blocked: bool, now: Instant) -> Self {
        Self {
            blocked,
            opacity: Tween::settled(Self::target_for(blocked), now),
        }
    }

    fn target_for(blocked: bool) -> f32 {
        if blocked {
            VISIBLE
        } else {
            MASKED
        }
    }

    fn observe(&mut self, can_scroll: bool, now: Instant) -> bool {
        let blocked = !can_scroll;
        if blocked == self.blocked {
            return false;
        }
        self.blocked = blocked;
        let duration = if blocked { INTO_BLOCKED } else { INTO_SCROLLABLE };
        self.opacity
            .retarget(Self::target_for(blocked), now, duration, Easing::FastOutSlowIn);
        true
    }
}

#[derive(Debug, Clone)]
pub struct EdgeFade {
    start: FadeChannel,
    end: FadeChannel,
}

impl EdgeFade {
    /// Fully open on both edges: the state of a region with nothing to scroll
    pub fn new(now: Instant) -> Self {
        Self {
            start: FadeChannel::new(true, now),
            end: FadeChannel::new(true, now),
        }
    }

    pub fn observe(&mut self, can_scroll_backward: bool, can_scroll_forward: bool, now: Instant) -> bool {
        let start = self.start.observe(can_scroll_backward, now);
        let end = self.end.observe(can_scroll_forward, now);
        start || end
    }

    pub fn observe_position(&mut self, position: &ScrollPosition, now: Instant) -> bool {
        self.observe(position.can_scroll_backward(), position.can_scroll_forward(), now)
    }

    pub fn start_opacity(&self, now: Instant) -> f32 {
        self.start.opacity.value(now)
    }

    pub fn end_opacity(&self, now: Instant) -> f32 {
        self.end.opacity.value(now)
    }

    /// Both edges unmasked and at rest
    pub fn is_open(&self, now: Instant) -> bool {
        self.start.blocked
            && self.end.blocked
            && self.start_opacity(now) >= VISIBLE
            && self.end_opacity(now) >= VISIBLE
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        !self.start.opacity.is_finished(now) || !self.end.opacity.is_finished(now)
    }

    pub fn mask(&self, now: Instant) -> FadeMask {
        FadeMask::new(self.start_opacity(now), self.end_opacity(now))
    }
}

/// Gradient of opacity stops laid evenly along an axis
#[derive(Debug, Clone, PartialEq)]
pub struct FadeMask {
    stops: Vec<f32>,
}

impl FadeMask {
    pub fn new(start: f32, end: f32) -> Self {
        let mut stops = Vec::with_capacity(SOLID_STOPS + 2);
        stops.push(start.clamp(0.0, 1.0));
        stops.extend(std::iter::repeat(VISIBLE).take(SOLID_STOPS));
        stops.push(end.clamp(0.0, 1.0));
        Self { stops }
    }

    #[cfg(test)]
    pub fn stops(&self) -> &[f32] {
        &self.stops
    }

    /// Opacity at fraction `t` of the axis, linearly interpolated
    pub fn alpha_at(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let segments = (self.stops.len() - 1) as f32;
        let pos = t * segments;
        let i = (pos.floor() as usize).min(self.stops.len() - 2);
        let local = pos - i as f32;
        self.stops[i] + (self.stops[i + 1] - self.stops[i]) * local
    }

    /// Multiply already-drawn content in `area` by the mask (destination-in).
    /// Cells fade toward `background`.
    pub fn apply(&self, buf: &mut Buffer, area: Rect, axis: Axis, background: Color) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        let span = match axis {
            Axis::Horizontal => area.width,
            Axis::Vertical => area.height,
        };
        let denom = span.saturating_sub(1).max(1) as f32;

        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let step = match axis {
                    Axis::Horizontal => x - area.x,
                    Axis::Vertical => y - area.y,
                };
                let alpha = self.alpha_at(step as f32 / denom);
                if alpha >= 0.999 {
                    continue;
                }
                if let Some(cell) = buf.cell_mut((x, y)) {
                    fade_cell(cell, alpha, background);
                }
            }
        }
    }
}

fn fade_cell(cell: &mut ratatui::buffer::Cell, alpha: f32, background: Color) {
    match (cell.fg, background) {
        (Color::Rgb(..), Color::Rgb(..)) => {
            cell.fg = blend(cell.fg, background, alpha);
            if let Color::Rgb(..) = cell.bg {
                cell.bg = blend(cell.bg, background, alpha);
            }
            if alpha < 0.05 {
                cell.set_symbol(" ");
            }
        }
        _ => {
            if alpha < 0.35 {
                cell.set_symbol(" ");
                cell.bg = background;
            } else if alpha < 0.75 {
                cell.modifier.insert(Modifier::DIM);
            }
        }
    }
}

fn blend(color: Color, background: Color, alpha: f32) -> Color {
    match (color, background) {
        (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
            let mix = |c: u8, base: u8| {
                (base as f32 + (c as f32 - base as f32) * alpha).round().clamp(0.0, 255.0) as u8
            };
            Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
        }
        _ => color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn starts_open() {
        let t0 = Instant::now();
        let fade = EdgeFade::new(t0);
        assert!(fade.is_open(t0));
        assert_eq!(fade.start_opacity(t0), VISIBLE);
        assert_eq!(fade.end_opacity(t0), VISIBLE);
    }

    #[test]
    fn opening_edge_takes_longer_than_closing() {
        let t0 = Instant::now();
        let mut fade = EdgeFade::new(t0);

        // More content ahead: end edge starts masking over 25ms
        assert!(fade.observe(false, true, t0));
        assert!(fade.end_opacity(t0 + ms(10)) > MASKED);
        assert_eq!(fade.end_opacity(t0 + ms(25)), MASKED);
        assert_eq!(fade.start_opacity(t0 + ms(25)), VISIBLE);

        // Reached the end: edge becomes visible again within 10ms
        let t1 = t0 + ms(100);
        assert!(fade.observe(true, false, t1));
        assert_eq!(fade.end_opacity(t1 + ms(10)), VISIBLE);
        assert_eq!(fade.start_opacity(t1 + ms(25)), MASKED);
    }

    #[test]
    fn repeated_observation_does_not_restart() {
        let t0 = Instant::now();
        let mut fade = EdgeFade::new(t0);
        fade.observe(false, true, t0);
        assert!(!fade.observe(false, true, t0 + ms(5)));
        assert_eq!(fade.end_opacity(t0 + ms(25)), MASKED);
    }

    #[test]
    fn mask_holds_full_opacity_in_the_middle() {
        let mask = FadeMask::new(0.0, 0.0);
        assert_eq!(mask.stops().len(), 9);
        assert_eq!(mask.alpha_at(0.0), 0.0);
        assert_eq!(mask.alpha_at(1.0), 0.0);
        assert_eq!(mask.alpha_at(0.5), 1.0);
        assert!((mask.alpha_at(1.0 / 16.0) - 0.5).abs() < 1e-4);
        assert!(mask.stops()[1..8].iter().all(|s| *s == VISIBLE));
    }

    #[test]
    fn apply_fades_only_the_edges() {
        let area = Rect::new(0, 0, 17, 1);
        let mut buf = Buffer::empty(area);
        for x in 0..17 {
            buf[(x, 0)].set_symbol("#").set_fg(Color::Rgb(200, 200, 200));
        }
        FadeMask::new(0.0, 1.0).apply(&mut buf, area, Axis::Horizontal, Color::Rgb(0, 0, 0));

        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(8, 0)].fg, Color::Rgb(200, 200, 200));
        assert_eq!(buf[(16, 0)].fg, Color::Rgb(200, 200, 200));
        assert_eq!(buf[(1, 0)].fg, Color::Rgb(100, 100, 100));
    }

    #[test]
    fn apply_dims_indexed_colors() {
        let area = Rect::new(0, 0, 1, 9);
        let mut buf = Buffer::empty(area);
        for y in 0..9 {
            buf[(0, y)].set_symbol("x").set_fg(Color::White);
        }
        FadeMask::new(0.5, 0.0).apply(&mut buf, area, Axis::Vertical, Color::Black);
        assert!(buf[(0, 0)].modifier.contains(Modifier::DIM));
        assert_eq!(buf[(0, 8)].symbol(), " ");
        assert_eq!(buf[(0, 4)].symbol(), "x");
    }
}
