//! Text panels overlaid on the hero: descriptors and the visibility math.
//!
//! Visibility is a pure function of the panel list and the eased progress:
//! one panel is *active* at a time and only it may fade in.

use super::math::smoothstep;

/// Vertical travel of a panel while fading, in CSS pixels.
pub const PANEL_TRAVEL_PX: f64 = 28.0;
/// At or below this opacity the panel is hidden outright.
pub const VISIBILITY_THRESHOLD: f64 = 0.02;

/// Horizontal placement of a panel inside the hero viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAlign {
    Left,
    Right,
    Center,
}

/// A static text overlay tied to a sub-range of the hero progress.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelDescriptor {
    pub id: &'static str,
    pub align: PanelAlign,
    /// Progress range over which the panel fades in.
    pub fade_in: [f64; 2],
    /// Progress range over which the panel fades out.
    pub fade_out: [f64; 2],
    /// Top edge as a fraction of the viewport height.
    pub anchor: f64,
    pub title: &'static str,
    pub body: Option<&'static str>,
    pub bullets: &'static [&'static str],
    /// Render the call-to-action button pair under the text.
    pub cta: bool,
}

/// Presentation values for one panel on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelVisual {
    pub opacity: f64,
    /// Downward offset in CSS pixels (0 when fully shown).
    pub offset_px: f64,
    pub visible: bool,
}

impl PanelVisual {
    pub fn from_opacity(opacity: f64) -> Self {
        Self {
            opacity,
            offset_px: PANEL_TRAVEL_PX * (1.0 - opacity),
            visible: opacity > VISIBILITY_THRESHOLD,
        }
    }
}

/// Index of the first panel whose fade-out has not finished by `progress`,
/// falling back to the last panel.  `None` only for an empty list.
pub fn active_index(panels: &[PanelDescriptor], progress: f64) -> Option<usize> {
    if panels.is_empty() {
        return None;
    }
    Some(
        panels
            .iter()
            .position(|p| p.fade_out[1] >= progress)
            .unwrap_or(panels.len() - 1),
    )
}

/// Opacity of `panel` at `progress`, ignoring which panel is active.
pub fn panel_opacity(panel: &PanelDescriptor, progress: f64) -> f64 {
    let fade_in = smoothstep(panel.fade_in[0], panel.fade_in[1], progress);
    let fade_out = smoothstep(panel.fade_out[0], panel.fade_out[1], progress);
    fade_in * (1.0 - fade_out)
}

/// One visual per panel, in list order.
pub fn panel_visuals(panels: &[PanelDescriptor], progress: f64) -> Vec<PanelVisual> {
    let active = active_index(panels, progress);
    panels
        .iter()
        .enumerate()
        .map(|(i, panel)| {
            let opacity = if Some(i) == active {
                panel_opacity(panel, progress)
            } else {
                0.0
            };
            PanelVisual::from_opacity(opacity)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::PANELS;

    fn panel(fade_in: [f64; 2], fade_out: [f64; 2]) -> PanelDescriptor {
        PanelDescriptor {
            id: "t",
            align: PanelAlign::Left,
            fade_in,
            fade_out,
            anchor: 0.2,
            title: "t",
            body: None,
            bullets: &[],
            cta: false,
        }
    }

    #[test]
    fn half_faded_in_at_midpoint() {
        let p = panel([0.12, 0.16], [0.28, 0.32]);
        let v = panel_visuals(std::slice::from_ref(&p), 0.14);
        assert!((v[0].opacity - 0.5).abs() < 1e-9);
        assert!((v[0].offset_px - 14.0).abs() < 1e-6);
        assert!(v[0].visible);
    }

    #[test]
    fn active_is_first_unfinished_else_last() {
        assert_eq!(active_index(&[], 0.5), None);
        assert_eq!(active_index(PANELS, 0.0), Some(0));
        assert_eq!(active_index(PANELS, 0.32), Some(0));
        assert_eq!(active_index(PANELS, 0.33), Some(1));
        assert_eq!(active_index(PANELS, 0.6), Some(2));
        assert_eq!(active_index(PANELS, 0.9), Some(3));
        assert_eq!(active_index(PANELS, 1.0), Some(3));

        let early = [panel([0.0, 0.1], [0.2, 0.3])];
        assert_eq!(active_index(&early, 0.9), Some(0));
    }

    #[test]
    fn exactly_one_panel_shows_inside_its_window() {
        for (owner, p) in PANELS.iter().enumerate() {
            let (lo, hi) = (p.fade_in[0], p.fade_out[1]);
            for step in 1..100 {
                let progress = lo + (hi - lo) * (step as f64 / 100.0);
                let visuals = panel_visuals(PANELS, progress);
                let lit: Vec<usize> = visuals
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.opacity > 0.0)
                    .map(|(i, _)| i)
                    .collect();
                assert_eq!(lit, vec![owner], "progress {progress}");
            }
        }
    }

    #[test]
    fn nothing_shows_before_the_first_fade_in() {
        let visuals = panel_visuals(PANELS, 0.05);
        assert!(visuals.iter().all(|v| v.opacity == 0.0 && !v.visible));
        assert!(visuals.iter().all(|v| v.offset_px == PANEL_TRAVEL_PX));
    }

    #[test]
    fn faint_panels_are_hidden() {
        assert!(!PanelVisual::from_opacity(0.02).visible);
        assert!(PanelVisual::from_opacity(0.021).visible);
        assert!(PanelVisual::from_opacity(1.0).visible);
        assert_eq!(PanelVisual::from_opacity(1.0).offset_px, 0.0);
    }

    #[test]
    fn fully_shown_between_fades() {
        let v = panel_visuals(PANELS, 0.22);
        assert_eq!(v[0].opacity, 1.0);
        assert_eq!(v[0].offset_px, 0.0);
    }
}
