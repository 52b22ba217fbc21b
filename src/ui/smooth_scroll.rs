//! Horizontal smooth scroll with exponential ease-out, for the slider.
//!
//! Arrow presses move the target by a fixed step; each tick the displayed
//! offset closes a fixed fraction of the remaining distance, so the track
//! glides and decelerates into place.

/// Pixel-offset smooth scroll animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Displayed offset in CSS pixels.
    offset: f64,
    /// Where the offset is heading.
    target: f64,
    /// Largest reachable offset.
    max: f64,
    /// Fraction of the remaining distance covered each tick.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            offset: 0.0,
            target: 0.0,
            max: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Update the scrollable extent, pulling both offsets back inside it.
    pub fn set_max(&mut self, max: f64) {
        self.max = max.max(0.0);
        self.target = self.target.clamp(0.0, self.max);
        self.offset = self.offset.clamp(0.0, self.max);
    }

    /// Move the target by `delta` pixels (negative scrolls back).
    pub fn scroll_by(&mut self, delta: f64) {
        self.target = (self.target + delta).clamp(0.0, self.max);
    }

    /// Close part of the gap toward the target.  Call once per frame.
    pub fn tick(&mut self) {
        let gap = self.target - self.offset;
        if gap.abs() < 0.5 {
            self.offset = self.target;
        } else {
            self.offset += gap * self.speed;
        }
    }

    pub fn offset_px(&self) -> f64 {
        self.offset
    }

    pub fn target_px(&self) -> f64 {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_on_the_target() {
        let mut s = SmoothScroll::new(0.25);
        s.set_max(1000.0);
        s.scroll_by(360.0);
        assert_eq!(s.target_px(), 360.0);
        s.tick();
        assert!(s.offset_px() > 0.0 && s.offset_px() < 360.0);
        for _ in 0..100 {
            s.tick();
        }
        assert_eq!(s.offset_px(), 360.0);
    }

    #[test]
    fn target_is_clamped_to_the_track() {
        let mut s = SmoothScroll::new(0.25);
        s.set_max(500.0);
        s.scroll_by(360.0);
        s.scroll_by(360.0);
        assert_eq!(s.target_px(), 500.0);
        s.scroll_by(-2000.0);
        assert_eq!(s.target_px(), 0.0);
    }

    #[test]
    fn shrinking_the_track_pulls_offsets_back() {
        let mut s = SmoothScroll::new(0.5);
        s.set_max(1000.0);
        s.scroll_by(900.0);
        for _ in 0..50 {
            s.tick();
        }
        s.set_max(200.0);
        assert_eq!(s.offset_px(), 200.0);
        assert_eq!(s.target_px(), 200.0);
    }
}
