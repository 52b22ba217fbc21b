//! Colour palette and text styles used across the page.

use ratatui::style::{Color, Modifier, Style};

use crate::core::surface::Rgb;

pub const INK: Rgb = Rgb(0x13, 0x13, 0x13);
pub const BRAND_BLUE: Rgb = Rgb(0x00, 0x50, 0xff);
pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
pub const MUTED: Rgb = Rgb(0x6b, 0x6b, 0x6b);
pub const SLIDER_BG: Rgb = Rgb(0xf5, 0xf5, 0xf7);

pub fn color(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── page sections ──────────────────────────────────────────
    pub fn section_style() -> Style {
        Style::default().bg(color(WHITE)).fg(color(INK))
    }

    pub fn heading_style() -> Style {
        Style::default()
            .fg(color(INK))
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted_style() -> Style {
        Style::default().fg(color(MUTED))
    }

    pub fn link_style() -> Style {
        Style::default()
            .fg(color(BRAND_BLUE))
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn card_style() -> Style {
        Style::default().bg(color(SLIDER_BG)).fg(color(INK))
    }

    pub fn focused_style() -> Style {
        Style::default()
            .fg(color(BRAND_BLUE))
            .add_modifier(Modifier::BOLD)
    }

    pub fn dark_band_style() -> Style {
        Style::default().bg(color(INK)).fg(color(WHITE))
    }

    // ── buttons ────────────────────────────────────────────────
    pub fn primary_button(bg: Rgb) -> Style {
        Style::default()
            .bg(color(bg))
            .fg(color(WHITE))
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn spinner_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}
