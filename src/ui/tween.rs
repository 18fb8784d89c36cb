//! Time-based interpolation values.
//!
//! A [`Tween`] is evaluated against an explicit `now`, so animation state is
//! plain data: the frame clock passes the current instant in and the tween
//! reports where it is. Re-targeting mid-flight starts from the current
//! value, so the last request always wins without a jump.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseOut,
    /// Standard material curve, cubic-bezier(0.4, 0.0, 0.2, 1.0)
    FastOutSlowIn,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
        }
    }
}

/// Solve y for x on a unit cubic bezier with control points (x1,y1), (x2,y2)
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    let sample = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };
    let slope = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
    };

    let mut s = x;
    for _ in 0..8 {
        let err = sample(x1, x2, s) - x;
        if err.abs() < 1e-5 {
            break;
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s = (s - err / d).clamp(0.0, 1.0);
    }
    sample(y1, y2, s)
}

#[derive(Debug, Clone)]
pub struct Tween {
    start: f32,
    target: f32,
    started_at: Instant,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    /// A tween resting at `value`
    pub fn settled(value: f32, now: Instant) -> Self {
        Self {
            start: value,
            target: value,
            started_at: now,
            duration: Duration::ZERO,
            easing: Easing::Linear,
        }
    }

    pub fn new(start: f32, target: f32, now: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            start,
            target,
            started_at: now,
            duration,
            easing,
        }
    }

    pub fn value(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return self.target;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.duration {
            return self.target;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.start + (self.target - self.start) * self.easing.apply(t)
    }

    #[cfg(test)]
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }

    /// Animate from wherever the tween currently is toward `target`
    pub fn retarget(&mut self, target: f32, now: Instant, duration: Duration, easing: Easing) {
        let current = self.value(now);
        *self = Self::new(current, target, now, duration, easing);
    }

    /// Jump to `value` with no animation
    pub fn snap(&mut self, value: f32, now: Instant) {
        *self = Self::settled(value, now);
    }
}
