//! Opacity transition of the whole surface.

use std::time::{Duration, Instant};

use amefuri_core::constants::FADE_DURATION;

/// An ease-in-out opacity transition between two levels.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

impl Fade {
    /// A fade that already sits at `opacity`.
    pub fn settled(opacity: f32, now: Instant) -> Self {
        Self {
            from: opacity,
            to: opacity,
            started: now,
            duration: FADE_DURATION,
        }
    }

    /// Begin a new transition toward `to` from wherever this one is at `now`.
    pub fn retarget(&self, to: f32, now: Instant) -> Self {
        Self {
            from: self.opacity_at(now),
            to,
            started: now,
            duration: self.duration,
        }
    }

    /// Opacity this fade is heading to.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Opacity at `now`.
    pub fn opacity_at(&self, now: Instant) -> f32 {
        self.from + (self.to - self.from) * ease_in_out(self.progress(now))
    }

    /// Whether the transition has finished at `now`.
    pub fn is_settled(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

/// Cubic ease-in-out over `0.0..=1.0`.
fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settled_fade_is_constant() {
        let now = Instant::now();
        let fade = Fade::settled(1.0, now);
        assert_eq!(fade.opacity_at(now), 1.0);
        assert_eq!(fade.opacity_at(now + Duration::from_secs(3)), 1.0);
    }

    #[test]
    fn test_fade_reaches_target_after_duration() {
        let now = Instant::now();
        let fade = Fade::settled(1.0, now).retarget(0.0, now);
        assert_eq!(fade.opacity_at(now), 1.0);
        assert!(!fade.is_settled(now + Duration::from_millis(250)));
        assert_eq!(fade.opacity_at(now + FADE_DURATION), 0.0);
        assert!(fade.is_settled(now + FADE_DURATION));
    }

    #[test]
    fn test_fade_is_monotonic() {
        let now = Instant::now();
        let fade = Fade::settled(0.0, now).retarget(1.0, now);
        let mut last = 0.0;
        for ms in (0..=500).step_by(10) {
            let o = fade.opacity_at(now + Duration::from_millis(ms));
            assert!(o >= last, "{o} < {last} at {ms}ms");
            last = o;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn test_retarget_starts_from_current_opacity() {
        let now = Instant::now();
        let fade = Fade::settled(0.0, now).retarget(1.0, now);
        let mid = now + Duration::from_millis(250);
        let halfway = fade.opacity_at(mid);
        let back = fade.retarget(0.0, mid);
        assert_eq!(back.opacity_at(mid), halfway);
        assert_eq!(back.target(), 0.0);
    }

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_in_out(1.0), 1.0);
    }
}
