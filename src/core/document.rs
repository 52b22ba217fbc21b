//! Vertical layout of the page, in CSS pixels.
//!
//! Sections stack top to bottom.  The hero is `HERO_SCROLL_VH` viewports
//! tall and its canvas sticks to the top of the viewport while the page
//! scrolls through it.

use super::progress::SectionGeometry;

/// Hero height in viewport heights.
pub const HERO_SCROLL_VH: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    Features,
    Slider,
    Faq,
    Cta,
    Footer,
}

impl SectionKind {
    /// Page order.
    pub const ALL: &[SectionKind] = &[
        SectionKind::Hero,
        SectionKind::Features,
        SectionKind::Slider,
        SectionKind::Faq,
        SectionKind::Cta,
        SectionKind::Footer,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSpan {
    pub kind: SectionKind,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentLayout {
    sections: Vec<SectionSpan>,
    viewport_height: f64,
}

impl DocumentLayout {
    /// Stack `sections` in order.  The hero height is always derived from
    /// the viewport; any height supplied for it is ignored.
    pub fn build(viewport_height: f64, sections: &[(SectionKind, f64)]) -> Self {
        let viewport_height = viewport_height.max(0.0);
        let mut top = 0.0;
        let spans = sections
            .iter()
            .map(|&(kind, height)| {
                let height = if kind == SectionKind::Hero {
                    viewport_height * HERO_SCROLL_VH
                } else {
                    height.max(0.0)
                };
                let span = SectionSpan { kind, top, height };
                top += height;
                span
            })
            .collect();
        Self {
            sections: spans,
            viewport_height,
        }
    }

    pub fn sections(&self) -> &[SectionSpan] {
        &self.sections
    }

    pub fn section(&self, kind: SectionKind) -> Option<&SectionSpan> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn total_height(&self) -> f64 {
        self.sections.last().map_or(0.0, SectionSpan::bottom)
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.total_height() - self.viewport_height).max(0.0)
    }

    /// Geometry the animator samples progress against.
    pub fn hero_geometry(&self) -> Option<SectionGeometry> {
        self.section(SectionKind::Hero).map(|s| SectionGeometry {
            top: s.top,
            height: s.height,
            viewport_height: self.viewport_height,
        })
    }

    /// Viewport-relative top of the sticky hero canvas at `scroll_y`.
    ///
    /// Pinned at 0 while the hero is being scrubbed, then carried up with
    /// the section's bottom edge.
    pub fn sticky_canvas_top(&self, scroll_y: f64) -> Option<f64> {
        let hero = self.section(SectionKind::Hero)?;
        let natural = hero.top - scroll_y;
        let release = hero.bottom() - self.viewport_height - scroll_y;
        Some(natural.max(release.min(0.0)))
    }

    /// Section containing document offset `y`.
    pub fn section_at(&self, y: f64) -> Option<&SectionSpan> {
        self.sections.iter().find(|s| y >= s.top && y < s.bottom())
    }
}
