//! Scroll progress: sampling, spring easing, and frame selection.
//!
//! Scroll events only ever move the *target*.  The animation clock moves the
//! *current* value toward it with a damped velocity term, and the discrete
//! frame index is always derived from the eased value.

use super::math::clamp;

/// Fraction of the remaining distance covered directly each tick.
pub const EASE: f64 = 0.08;
/// Impulse fed into the velocity term each tick.
pub const VELOCITY_EASE: f64 = 0.12;
/// Velocity retained from one tick to the next.
pub const VELOCITY_DAMPING: f64 = 0.85;
/// Nominal tick length the velocity term is normalised against.
pub const NOMINAL_FRAME_MS: f64 = 16.0;

/// Scroll distance over which the header logo crossfades.
pub const LOGO_SWAP_DISTANCE: f64 = 40.0;
/// The header turns solid once the page is scrolled past this offset.
pub const NAV_SOLID_OFFSET: f64 = 12.0;

/// Placement of the scroll-driven section within the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionGeometry {
    /// Document offset of the section's top edge.
    pub top: f64,
    /// Full height of the section.
    pub height: f64,
    /// Height of the viewport the section scrolls through.
    pub viewport_height: f64,
}

impl SectionGeometry {
    /// Normalised progress through the section for a document scroll offset.
    ///
    /// When the section is no taller than the viewport there is no range to
    /// scrub through: anything at or above the top reads as 0, anything past
    /// it as 1.
    pub fn progress_at(&self, scroll_y: f64) -> f64 {
        let scroll_y = finite_or_zero(scroll_y);
        let start = self.top;
        let end = start + self.height - self.viewport_height;
        let range = end - start;
        if range.is_nan() || range <= 0.0 {
            return if scroll_y <= start { 0.0 } else { 1.0 };
        }
        clamp((scroll_y - start) / range, 0.0, 1.0)
    }
}

/// Header restyling derived from the raw scroll offset (never eased).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeaderSignal {
    /// 0 → dark logo, 1 → light logo.
    pub logo_swap_ratio: f64,
    /// Whether the header draws a solid background.
    pub nav_solid: bool,
}

impl HeaderSignal {
    pub fn from_scroll(scroll_y: f64) -> Self {
        let scroll_y = finite_or_zero(scroll_y);
        Self {
            logo_swap_ratio: clamp(scroll_y / LOGO_SWAP_DISTANCE, 0.0, 1.0),
            nav_solid: scroll_y > NAV_SOLID_OFFSET,
        }
    }
}

/// Mutable animation state, created at mount and threaded through every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub target_progress: f64,
    pub current_progress: f64,
    pub velocity: f64,
    /// Last frame index handed to the renderer, `-1` before the first draw.
    pub last_frame_index: i64,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            target_progress: 0.0,
            current_progress: 0.0,
            velocity: 0.0,
            last_frame_index: -1,
        }
    }
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_target(&mut self, progress: f64) {
        self.target_progress = clamp(progress, 0.0, 1.0);
    }

    /// Advance the eased progress by one tick of `delta_ms` milliseconds and
    /// return the new current value.
    ///
    /// The impulse is added before damping: `v += d·0.12; v *= 0.85`.
    pub fn advance(&mut self, delta_ms: f64) -> f64 {
        let delta_ms = finite_or_zero(delta_ms).max(0.0);
        let diff = self.target_progress - self.current_progress;
        self.velocity += diff * VELOCITY_EASE;
        self.velocity *= VELOCITY_DAMPING;
        self.current_progress = clamp(
            self.current_progress + diff * EASE + self.velocity * (delta_ms / NOMINAL_FRAME_MS),
            0.0,
            1.0,
        );
        self.current_progress
    }

    /// The frame that should be on screen, if it differs from the last one
    /// drawn.  Records it as drawn when it does.
    pub fn take_frame_change(&mut self, total_frames: usize) -> Option<usize> {
        if total_frames == 0 {
            return None;
        }
        let index = frame_index(self.current_progress, total_frames);
        if index as i64 == self.last_frame_index {
            return None;
        }
        self.last_frame_index = index as i64;
        Some(index)
    }

    /// Forget the last drawn frame so the next tick repaints.
    pub fn invalidate_frame(&mut self) {
        self.last_frame_index = -1;
    }
}

/// `round(progress · (N − 1))`, clamped into the frame range.
pub fn frame_index(progress: f64, total_frames: usize) -> usize {
    if total_frames == 0 {
        return 0;
    }
    let last = (total_frames - 1) as f64;
    (clamp(progress, 0.0, 1.0) * last).round() as usize
}

/// Non-finite inputs (NaN, ±∞) read as 0.
pub fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero(top: f64, height: f64, viewport: f64) -> SectionGeometry {
        SectionGeometry {
            top,
            height,
            viewport_height: viewport,
        }
    }

    #[test]
    fn progress_spans_section_minus_one_viewport() {
        let g = hero(0.0, 4000.0, 1000.0);
        assert_eq!(g.progress_at(0.0), 0.0);
        assert_eq!(g.progress_at(1500.0), 0.5);
        assert_eq!(g.progress_at(3000.0), 1.0);
        assert_eq!(g.progress_at(9000.0), 1.0);
        assert_eq!(g.progress_at(-50.0), 0.0);
    }

    #[test]
    fn progress_respects_section_offset() {
        let g = hero(200.0, 3000.0, 1000.0);
        assert_eq!(g.progress_at(100.0), 0.0);
        assert_eq!(g.progress_at(1200.0), 0.5);
    }

    #[test]
    fn degenerate_range_never_produces_nan() {
        let g = hero(0.0, 800.0, 800.0);
        for y in [-10.0, 0.0, 0.5, 12.0, 5000.0, f64::NAN, f64::INFINITY] {
            let p = g.progress_at(y);
            assert!(!p.is_nan());
            assert!((0.0..=1.0).contains(&p));
        }
        assert_eq!(g.progress_at(0.0), 0.0);
        assert_eq!(g.progress_at(1.0), 1.0);

        // Shorter than the viewport behaves the same way.
        let short = hero(0.0, 300.0, 800.0);
        assert_eq!(short.progress_at(0.0), 0.0);
        assert_eq!(short.progress_at(40.0), 1.0);
    }

    #[test]
    fn logo_swap_ratio_reaches_one_after_forty() {
        assert_eq!(HeaderSignal::from_scroll(0.0).logo_swap_ratio, 0.0);
        assert_eq!(HeaderSignal::from_scroll(20.0).logo_swap_ratio, 0.5);
        assert_eq!(HeaderSignal::from_scroll(40.0).logo_swap_ratio, 1.0);
        assert_eq!(HeaderSignal::from_scroll(400.0).logo_swap_ratio, 1.0);
    }

    #[test]
    fn nav_turns_solid_strictly_after_twelve() {
        assert!(!HeaderSignal::from_scroll(12.0).nav_solid);
        assert!(HeaderSignal::from_scroll(13.0).nav_solid);
        assert!(!HeaderSignal::from_scroll(0.0).nav_solid);
    }

    #[test]
    fn first_tick_follows_the_exact_update_order() {
        let mut s = ScrollState::new();
        s.set_target(1.0);
        let p = s.advance(16.0);
        // v = (0 + 1·0.12)·0.85 = 0.102 ; p = 0 + 0.08 + 0.102
        assert!((s.velocity - 0.102).abs() < 1e-12);
        assert!((p - 0.182).abs() < 1e-12);
    }

    #[test]
    fn velocity_term_scales_with_frame_delta() {
        let mut a = ScrollState::new();
        let mut b = ScrollState::new();
        a.set_target(0.5);
        b.set_target(0.5);
        let pa = a.advance(8.0);
        let pb = b.advance(32.0);
        assert!(pb > pa);
    }

    #[test]
    fn progress_converges_and_stays_in_range() {
        let mut s = ScrollState::new();
        s.set_target(1.0);
        for _ in 0..600 {
            let p = s.advance(16.0);
            assert!((0.0..=1.0).contains(&p));
        }
        assert!((s.current_progress - 1.0).abs() < 1e-6);

        s.set_target(0.0);
        for _ in 0..600 {
            let p = s.advance(100.0);
            assert!((0.0..=1.0).contains(&p));
        }
        assert!(s.current_progress < 1e-6);
    }

    #[test]
    fn bad_deltas_do_not_poison_state() {
        let mut s = ScrollState::new();
        s.set_target(f64::NAN);
        assert_eq!(s.target_progress, 0.0);
        s.set_target(0.7);
        s.advance(f64::NAN);
        s.advance(-30.0);
        assert!(!s.current_progress.is_nan());
        assert!((0.0..=1.0).contains(&s.current_progress));
    }

    #[test]
    fn frame_index_rounds_across_the_sequence() {
        assert_eq!(frame_index(0.5, 120), 60);
        assert_eq!(frame_index(0.0, 120), 0);
        assert_eq!(frame_index(1.0, 120), 119);
        assert_eq!(frame_index(1.0, 180), 179);
        assert_eq!(frame_index(0.3, 1), 0);
        assert_eq!(frame_index(0.3, 0), 0);
    }

    #[test]
    fn frame_change_is_reported_once() {
        let mut s = ScrollState::new();
        s.current_progress = 0.5;
        assert_eq!(s.take_frame_change(120), Some(60));
        assert_eq!(s.take_frame_change(120), None);
        assert_eq!(s.take_frame_change(120), None);
        s.invalidate_frame();
        assert_eq!(s.take_frame_change(120), Some(60));
        assert_eq!(s.take_frame_change(0), None);
    }
}
