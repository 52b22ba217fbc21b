//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::Rect;
use tokio::sync::watch;

use super::animator::ScrollAnimator;
use super::frame_runtime::LoadProgress;
use crate::config::AppConfig;
use crate::core::{
    content::{FAQ_ITEMS, SLIDER_STEP_PX},
    document::{DocumentLayout, SectionKind},
    loader::LoadEvent,
    progress::{finite_or_zero, HeaderSignal},
    surface::PixelSurface,
};
use crate::ui::{
    layout::AppLayout,
    sections::{self, PageContent},
    smooth_scroll::SmoothScroll,
};

/// Per-tick fraction of the remaining slider distance covered.
const SLIDER_EASE: f64 = 0.2;

/// FAQ accordion: independent disclosures plus a keyboard cursor.
#[derive(Debug, Clone)]
pub struct FaqState {
    pub open: Vec<bool>,
    pub cursor: usize,
}

impl Default for FaqState {
    fn default() -> Self {
        Self {
            open: vec![false; FAQ_ITEMS.len()],
            cursor: 0,
        }
    }
}

impl FaqState {
    pub fn toggle(&mut self, index: usize) {
        if let Some(open) = self.open.get_mut(index) {
            *open = !*open;
        }
    }

    pub fn next(&mut self) {
        if self.cursor + 1 < self.open.len() {
            self.cursor += 1;
        }
    }

    pub fn prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}

/// Top-level application state.
pub struct AppState {
    pub config: AppConfig,
    /// Scroll/frame/panel engine for the hero.
    pub animator: ScrollAnimator<PixelSurface>,
    /// Latest header signals published by the animator.
    pub header: watch::Receiver<HeaderSignal>,
    /// Vertical page layout in CSS pixels.
    pub document: DocumentLayout,
    /// Full terminal area from the last resize.
    pub terminal_area: Rect,
    /// Document scroll offset in CSS pixels.
    pub scroll_y: f64,
    /// Set when `scroll_y` moved and the animator has not sampled it yet.
    pub scroll_dirty: bool,
    pub faq: FaqState,
    pub slider: SmoothScroll,
    pub load: LoadProgress,
    /// Monotonic frame-clock counter (drives the spinner).
    pub tick: u64,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Shown in the bottom bar instead of the key hint until the next key.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        animator: ScrollAnimator<PixelSurface>,
        header: watch::Receiver<HeaderSignal>,
    ) -> Self {
        let load = LoadProgress::new(config.total_frames);
        Self {
            config,
            animator,
            header,
            document: DocumentLayout::default(),
            terminal_area: Rect::default(),
            scroll_y: 0.0,
            scroll_dirty: true,
            faq: FaqState::default(),
            slider: SmoothScroll::new(SLIDER_EASE),
            load,
            tick: 0,
            should_quit: false,
            status_message: None,
        }
    }

    /// Horizontal CSS pixels per column.  Cells are about twice as tall as
    /// they are wide.
    pub fn px_per_col(&self) -> f64 {
        self.config.px_per_row / 2.0
    }

    pub fn page_content(&self) -> PageContent<'_> {
        PageContent {
            faq_open: &self.faq.open,
            faq_cursor: self.faq.cursor,
            slider_offset_px: self.slider.offset_px(),
            px_per_col: self.px_per_col(),
        }
    }

    /// Page scroll in whole rows.
    pub fn scroll_row(&self) -> i64 {
        (self.scroll_y / self.config.px_per_row).round() as i64
    }

    /// Recompute everything that depends on the terminal size.
    pub fn resize(&mut self, area: Rect) {
        self.terminal_area = area;
        let page = AppLayout::from_area(area).page_area;
        self.animator
            .resize(page.width as f64, page.height as f64 * 2.0);
        self.slider
            .set_max(sections::slider_max_offset_px(page.width, self.px_per_col()));
        self.relayout();
    }

    /// Re-stack the document (after a resize or when a section changes
    /// height) and keep the scroll offset in range.
    pub fn relayout(&mut self) {
        let page = AppLayout::from_area(self.terminal_area).page_area;
        let ppr = self.config.px_per_row;
        let content = self.page_content();
        let heights: Vec<(SectionKind, f64)> = SectionKind::ALL
            .iter()
            .map(|&kind| (kind, content.height(kind, page.width) as f64 * ppr))
            .collect();
        self.document = DocumentLayout::build(page.height as f64 * ppr, &heights);
        self.scroll_to(self.scroll_y);
        self.scroll_dirty = true;
    }

    /// Set the scroll offset, clamped to the document.
    pub fn scroll_to(&mut self, y: f64) {
        let y = finite_or_zero(y).clamp(0.0, self.document.max_scroll());
        if y != self.scroll_y {
            self.scroll_y = y;
            self.scroll_dirty = true;
        }
    }

    pub fn scroll_by_rows(&mut self, rows: f64) {
        self.scroll_to(self.scroll_y + rows * self.config.px_per_row);
    }

    pub fn page_rows(&self) -> u16 {
        AppLayout::from_area(self.terminal_area).page_area.height
    }

    pub fn slider_step(&mut self, direction: f64) {
        self.slider.scroll_by(direction * SLIDER_STEP_PX);
    }

    pub fn toggle_faq(&mut self, index: usize) {
        self.faq.toggle(index);
        self.relayout();
    }

    /// Feed a pending scroll sample to the animator.
    pub fn sync_scroll(&mut self) {
        if !self.scroll_dirty {
            return;
        }
        self.scroll_dirty = false;
        let geometry = self.document.hero_geometry();
        self.animator.on_scroll(self.scroll_y, geometry);
    }

    /// Fold one loader event into the page.  Frames that settle go to the
    /// animator; a finished run with failures leaves a note in the status bar.
    pub fn apply_load_event(&mut self, event: LoadEvent) {
        if let Some(index) = self.load.apply(event) {
            self.animator.frame_settled(index);
        }
        if let LoadEvent::Finished { loaded, failed } = event {
            tracing::info!(loaded, failed, "hero sequence ready");
            if failed > 0 {
                self.status_message = Some(format!(
                    "{failed} of {} hero frames unavailable",
                    self.load.counts.total
                ));
            }
        }
    }

    /// One animation-clock step.
    pub fn on_frame(&mut self, now: std::time::Instant) {
        self.sync_scroll();
        self.animator.tick(now);
        self.slider.tick();
        self.tick = self.tick.wrapping_add(1);
    }
}
