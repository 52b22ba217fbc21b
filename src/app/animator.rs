//! The scroll animator.
//!
//! Owns the eased progress, a handle on the frame cache, and the drawing
//! surface.  Scroll samples move the target and notify the page shell;
//! clock ticks ease toward it, repaint the surface when the frame index
//! changes, and recompute panel visuals.
//!
//! Nothing here can fail.  A missing surface, a missing section, or a frame
//! that never loaded just skips the step that needed it.

use std::sync::Arc;
use std::time::Instant;

use crate::core::{
    frames::FrameSet,
    panels::{panel_visuals, PanelDescriptor, PanelVisual},
    progress::{HeaderSignal, ScrollState, SectionGeometry},
    surface::{contain, Rgb, Surface},
};

/// Fixed animator settings, read once at mount.
#[derive(Debug, Clone)]
pub struct AnimatorConfig {
    pub total_frames: usize,
    pub background: Rgb,
    /// Freeze the bitmap; panels and header keep tracking the scroll.
    pub reduced_motion: bool,
    pub device_pixel_ratio: f64,
}

/// Callback invoked with the header signals on every scroll sample.
pub type ScrollListener = Box<dyn FnMut(HeaderSignal) + Send>;

pub struct ScrollAnimator<S> {
    config: AnimatorConfig,
    state: ScrollState,
    frames: Arc<FrameSet>,
    panels: Vec<PanelDescriptor>,
    visuals: Vec<PanelVisual>,
    surface: Option<S>,
    listener: Option<ScrollListener>,
    last_tick: Instant,
    /// Frame actually painted on the surface, as opposed to the last one
    /// selected (which may not have been loaded yet).
    painted: Option<usize>,
    redraws: u64,
}

impl<S: Surface> ScrollAnimator<S> {
    pub fn new(
        config: AnimatorConfig,
        frames: Arc<FrameSet>,
        panels: Vec<PanelDescriptor>,
        surface: Option<S>,
    ) -> Self {
        if surface.is_none() {
            tracing::debug!("no drawing surface; hero frames will not be painted");
        }
        let visuals = panel_visuals(&panels, 0.0);
        Self {
            config,
            state: ScrollState::new(),
            frames,
            panels,
            visuals,
            surface,
            listener: None,
            last_tick: Instant::now(),
            painted: None,
            redraws: 0,
        }
    }

    /// Register the page shell's header callback.
    pub fn with_listener(mut self, listener: impl FnMut(HeaderSignal) + Send + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    // ── events ──────────────────────────────────────────────────

    /// Resize the surface to the viewport (CSS pixels).  The backing store
    /// is discarded, so the current frame is repainted on the next tick.
    pub fn resize(&mut self, css_width: f64, css_height: f64) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.resize(css_width, css_height, self.config.device_pixel_ratio);
        self.state.invalidate_frame();
        self.painted = None;
        tracing::debug!(css_width, css_height, "hero surface resized");
    }

    /// Sample a scroll offset.  Moves the target progress and pushes the
    /// header signals to the listener.  Without a section there is nothing
    /// to sample against and the call is a no-op.
    pub fn on_scroll(
        &mut self,
        scroll_y: f64,
        section: Option<SectionGeometry>,
    ) -> Option<HeaderSignal> {
        let section = section?;
        self.state.set_target(section.progress_at(scroll_y));
        let signal = HeaderSignal::from_scroll(scroll_y);
        if let Some(listener) = self.listener.as_mut() {
            listener(signal);
        }
        Some(signal)
    }

    /// Animation-clock tick at `now`.
    pub fn tick(&mut self, now: Instant) -> &[PanelVisual] {
        let delta_ms = now.saturating_duration_since(self.last_tick).as_secs_f64() * 1000.0;
        self.last_tick = now;
        self.tick_by(delta_ms)
    }

    /// One update step with an explicit frame delta.
    pub fn tick_by(&mut self, delta_ms: f64) -> &[PanelVisual] {
        let progress = self.state.advance(delta_ms);

        if !self.config.reduced_motion {
            if let Some(index) = self.state.take_frame_change(self.config.total_frames) {
                self.render_frame(index);
            }
        }

        self.visuals = panel_visuals(&self.panels, progress);
        &self.visuals
    }

    /// A frame slot settled.  If it is the selected frame and it never got
    /// painted, repaint on the next tick.
    pub fn frame_settled(&mut self, index: usize) {
        if self.state.last_frame_index == index as i64 && self.painted != Some(index) {
            self.state.invalidate_frame();
        }
    }

    // ── rendering ───────────────────────────────────────────────

    fn render_frame(&mut self, index: usize) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let Some(image) = self.frames.get(index) else {
            return;
        };
        let (w, h) = surface.css_size();
        let Some(rect) = contain(w, h, image.width() as f64, image.height() as f64) else {
            return;
        };
        surface.clear();
        surface.fill(self.config.background);
        surface.draw_image(&image, rect);
        self.painted = Some(index);
        self.redraws += 1;
    }

    // ── accessors ───────────────────────────────────────────────

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn progress(&self) -> f64 {
        self.state.current_progress
    }

    pub fn panels(&self) -> &[PanelDescriptor] {
        &self.panels
    }

    pub fn panel_visuals(&self) -> &[PanelVisual] {
        &self.visuals
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn painted_frame(&self) -> Option<usize> {
        self.painted
    }

    /// Number of times the surface has been repainted.
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::PANELS;
    use crate::core::frames::FrameLoadError;
    use crate::core::progress::frame_index;
    use crate::core::surface::{DrawRect, PixelSurface};
    use image::RgbaImage;
    use std::sync::Mutex;

    /// Records draw calls instead of painting.
    #[derive(Default)]
    struct CountingSurface {
        size: (f64, f64),
        draws: Vec<DrawRect>,
        fills: usize,
    }

    impl Surface for CountingSurface {
        fn resize(&mut self, w: f64, h: f64, _dpr: f64) {
            self.size = (w, h);
        }
        fn css_size(&self) -> (f64, f64) {
            self.size
        }
        fn clear(&mut self) {}
        fn fill(&mut self, _color: Rgb) {
            self.fills += 1;
        }
        fn draw_image(&mut self, _image: &RgbaImage, rect: DrawRect) {
            self.draws.push(rect);
        }
    }

    fn config(total_frames: usize) -> AnimatorConfig {
        AnimatorConfig {
            total_frames,
            background: Rgb(0xf5, 0xf5, 0xf5),
            reduced_motion: false,
            device_pixel_ratio: 1.0,
        }
    }

    fn loaded_frames(n: usize, failing: &[usize]) -> Arc<FrameSet> {
        let frames = FrameSet::new(n);
        for i in 0..n {
            let outcome = if failing.contains(&i) {
                Err(FrameLoadError::NotFound(format!("WB{i:03}")))
            } else {
                Ok(RgbaImage::new(16, 9))
            };
            frames.settle(i, outcome);
        }
        Arc::new(frames)
    }

    fn geometry() -> SectionGeometry {
        SectionGeometry {
            top: 0.0,
            height: 4000.0,
            viewport_height: 1000.0,
        }
    }

    fn animator(n: usize, failing: &[usize]) -> ScrollAnimator<CountingSurface> {
        let mut a = ScrollAnimator::new(
            config(n),
            loaded_frames(n, failing),
            PANELS.to_vec(),
            Some(CountingSurface::default()),
        );
        a.resize(160.0, 90.0);
        a
    }

    fn settle<S: Surface>(a: &mut ScrollAnimator<S>) {
        for _ in 0..400 {
            a.tick_by(16.0);
        }
    }

    #[test]
    fn eased_progress_selects_the_rounded_frame() {
        let mut a = animator(120, &[]);
        a.on_scroll(750.0, Some(geometry()));
        assert_eq!(a.state().target_progress, 0.25);
        settle(&mut a);
        assert!((a.progress() - 0.25).abs() < 1e-6);
        assert_eq!(a.painted_frame(), Some(frame_index(0.25, 120)));
        assert_eq!(a.painted_frame(), Some(30));
    }

    #[test]
    fn unchanged_frame_index_skips_redraw() {
        let mut a = animator(120, &[]);
        a.on_scroll(1200.0, Some(geometry()));
        settle(&mut a);
        let before = a.redraw_count();
        assert!(before > 0);
        for _ in 0..50 {
            a.tick_by(16.0);
        }
        assert_eq!(a.redraw_count(), before);
        assert_eq!(a.surface().map(|s| s.draws.len() as u64), Some(before));
    }

    #[test]
    fn frames_are_letterboxed_into_the_surface() {
        let mut a = animator(10, &[]);
        a.tick_by(16.0);
        let surface = a.surface().unwrap();
        assert_eq!(surface.fills, 1);
        assert_eq!(
            surface.draws[0],
            DrawRect {
                x: 0.0,
                y: 0.0,
                width: 160.0,
                height: 90.0
            }
        );
    }

    #[test]
    fn failed_frame_is_skipped_without_crashing() {
        let mut a = animator(10, &[5]);
        // progress 5/9 selects frame 5
        let target = 5.0 / 9.0;
        a.on_scroll(target * 3000.0, Some(geometry()));
        settle(&mut a);
        assert_eq!(a.state().last_frame_index, 5);
        assert_ne!(a.painted_frame(), Some(5));

        a.on_scroll(3000.0, Some(geometry()));
        settle(&mut a);
        assert_eq!(a.painted_frame(), Some(9));
    }

    #[test]
    fn reduced_motion_freezes_bitmap_but_not_panels() {
        let mut cfg = config(120);
        cfg.reduced_motion = true;
        let mut a = ScrollAnimator::new(
            cfg,
            loaded_frames(120, &[]),
            PANELS.to_vec(),
            Some(CountingSurface::default()),
        );
        a.resize(100.0, 100.0);
        a.on_scroll(0.22 * 3000.0, Some(geometry()));
        settle(&mut a);
        assert_eq!(a.redraw_count(), 0);
        assert!(a.panel_visuals()[0].opacity > 0.99);
    }

    #[test]
    fn missing_surface_still_tracks_panels() {
        let mut a: ScrollAnimator<PixelSurface> =
            ScrollAnimator::new(config(120), loaded_frames(120, &[]), PANELS.to_vec(), None);
        a.resize(100.0, 100.0);
        a.on_scroll(0.14 * 3000.0, Some(geometry()));
        settle(&mut a);
        assert_eq!(a.redraw_count(), 0);
        assert!(a.panel_visuals()[0].visible);
    }

    #[test]
    fn header_signal_reaches_the_listener_unchanged() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut a = animator(10, &[]).with_listener(move |sig| {
            if let Ok(mut v) = sink.lock() {
                v.push(sig);
            }
        });
        a.on_scroll(20.0, Some(geometry()));
        a.on_scroll(13.0, Some(geometry()));
        assert_eq!(a.on_scroll(5.0, None), None);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].logo_swap_ratio, 0.5);
        assert!(seen[0].nav_solid);
        assert!(seen[1].nav_solid);
    }

    #[test]
    fn missing_section_leaves_target_alone() {
        let mut a = animator(10, &[]);
        a.on_scroll(1500.0, Some(geometry()));
        a.on_scroll(0.0, None);
        assert_eq!(a.state().target_progress, 0.5);
    }

    #[test]
    fn resize_forces_a_repaint() {
        let mut a = animator(10, &[]);
        a.tick_by(16.0);
        assert_eq!(a.redraw_count(), 1);
        a.tick_by(16.0);
        assert_eq!(a.redraw_count(), 1);
        a.resize(320.0, 180.0);
        a.tick_by(16.0);
        assert_eq!(a.redraw_count(), 2);
        assert_eq!(a.surface().unwrap().draws[1].width, 320.0);
    }

    #[test]
    fn late_frame_is_painted_once_it_settles() {
        let frames = Arc::new(FrameSet::new(4));
        let mut a = ScrollAnimator::new(
            config(4),
            Arc::clone(&frames),
            PANELS.to_vec(),
            Some(CountingSurface::default()),
        );
        a.resize(10.0, 10.0);
        a.tick_by(16.0);
        assert_eq!(a.state().last_frame_index, 0);
        assert_eq!(a.redraw_count(), 0);

        frames.settle(0, Ok(RgbaImage::new(2, 2)));
        a.frame_settled(0);
        a.tick_by(16.0);
        assert_eq!(a.redraw_count(), 1);
        assert_eq!(a.painted_frame(), Some(0));

        // Other frames settling does not disturb the painted one.
        frames.settle(1, Ok(RgbaImage::new(2, 2)));
        a.frame_settled(1);
        a.tick_by(16.0);
        assert_eq!(a.redraw_count(), 1);
    }

    #[test]
    fn pixel_surface_receives_background_and_frame() {
        let frames = FrameSet::new(1);
        frames.settle(0, Ok(RgbaImage::from_pixel(2, 1, image::Rgba([0, 0, 0, 255]))));
        let mut a = ScrollAnimator::new(
            config(1),
            Arc::new(frames),
            Vec::new(),
            Some(PixelSurface::default()),
        );
        a.resize(4.0, 4.0);
        a.tick_by(16.0);
        let px = a.surface().unwrap().pixels();
        // 2:1 frame in a 4×4 surface → rows 1..3 black, rows 0 and 3 background.
        assert_eq!(px.get_pixel(0, 0), &image::Rgba([0xf5, 0xf5, 0xf5, 255]));
        assert_eq!(px.get_pixel(0, 3), &image::Rgba([0xf5, 0xf5, 0xf5, 255]));
        assert_eq!(px.get_pixel(2, 1)[3], 255);
        assert!(a.panel_visuals().is_empty());
    }
}
