//! Easing functions and time-based fades.
//!
//! Time is passed in explicitly as a [`Duration`] since an arbitrary host
//! epoch, so transitions can be sampled deterministically.

use std::time::Duration;

/// Standard easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing)
    Linear,
    /// Ease in (slow start)
    EaseIn,
    /// Ease out (slow end)
    EaseOut,
    /// Cubic ease in
    CubicIn,
    /// Cubic ease out
    CubicOut,
    /// Cubic ease in and out, the usual transition default
    #[default]
    CubicInOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::CubicIn => t * t * t,
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// An opacity transition between two values over a time window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    from: f32,
    to: f32,
    start: Duration,
    duration: Duration,
    easing: Easing,
}

impl Fade {
    /// Start a fade at `start` lasting `duration`.
    #[must_use]
    pub fn new(from: f32, to: f32, start: Duration, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing: Easing::default(),
        }
    }

    /// A fade that has already settled at `value`.
    #[must_use]
    pub fn settled(value: f32) -> Self {
        Self::new(value, value, Duration::ZERO, Duration::ZERO)
    }

    /// Set easing function.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Progress from 0.0 to 1.0 at `now`.
    #[must_use]
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Value at `now`.
    #[must_use]
    pub fn value_at(&self, now: Duration) -> f32 {
        let eased = self.easing.apply(self.progress(now)) as f32;
        (self.to - self.from).mul_add(eased, self.from)
    }

    /// Whether the fade has reached its target at `now`.
    #[must_use]
    pub fn is_complete(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }

    /// Value the fade ends at.
    #[must_use]
    pub const fn target(&self) -> f32 {
        self.to
    }

    /// Length of the fade.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::CubicIn,
            Easing::CubicOut,
            Easing::CubicInOut,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-9, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_easing_clamps_input() {
        assert!((Easing::Linear.apply(-0.5) - 0.0).abs() < 0.001);
        assert!((Easing::Linear.apply(1.5) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cubic_in_out_midpoint() {
        assert!((Easing::CubicInOut.apply(0.5) - 0.5).abs() < 1e-9);
        assert!(Easing::CubicInOut.apply(0.25) < 0.25);
        assert!(Easing::CubicInOut.apply(0.75) > 0.75);
    }

    #[test]
    fn test_fade_samples() {
        let fade = Fade::new(
            0.0,
            1.0,
            Duration::from_millis(100),
            Duration::from_millis(250),
        )
        .with_easing(Easing::Linear);
        assert_eq!(fade.value_at(Duration::ZERO), 0.0);
        assert_eq!(fade.value_at(Duration::from_millis(100)), 0.0);
        assert!((fade.value_at(Duration::from_millis(225)) - 0.5).abs() < 1e-6);
        assert_eq!(fade.value_at(Duration::from_millis(350)), 1.0);
        assert!(fade.is_complete(Duration::from_millis(350)));
        assert!(!fade.is_complete(Duration::from_millis(349)));
    }

    #[test]
    fn test_fade_settled() {
        let fade = Fade::settled(0.0);
        assert_eq!(fade.value_at(Duration::from_secs(5)), 0.0);
        assert!(fade.is_complete(Duration::ZERO));
        assert_eq!(fade.target(), 0.0);
        assert_eq!(fade.duration(), Duration::ZERO);
    }

    #[test]
    fn test_fade_out_monotonic() {
        let fade = Fade::new(1.0, 0.0, Duration::ZERO, Duration::from_millis(500));
        let mut last = f32::INFINITY;
        for ms in (0..=500).step_by(50) {
            let v = fade.value_at(Duration::from_millis(ms));
            assert!(v <= last);
            last = v;
        }
        assert_eq!(last, 0.0);
    }
}
