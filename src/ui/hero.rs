//! Sticky hero: the animator's surface blitted as half-block pixels, with
//! the text panels drawn on top.

use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use super::layout::wrap;
use super::theme::{color, Theme, BRAND_BLUE, INK, WHITE};
use crate::core::content::{HERO_CTA_PRIMARY, HERO_CTA_SECONDARY};
use crate::core::panels::{PanelAlign, PanelDescriptor, PanelVisual};
use crate::core::surface::Rgb;

pub struct HeroWidget<'a> {
    /// Device pixels of the hero surface, `None` when there is no surface.
    pub pixels: Option<&'a RgbaImage>,
    pub panels: &'a [PanelDescriptor],
    pub visuals: &'a [PanelVisual],
    pub background: Rgb,
    /// CSS pixels per row, to turn panel offsets into rows.
    pub px_per_row: f64,
}

impl Widget for HeroWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, Style::default().bg(color(self.background)));
        if let Some(pixels) = self.pixels {
            render_halfblocks(pixels, area, self.background, buf);
        }
        for (panel, visual) in self.panels.iter().zip(self.visuals) {
            if visual.visible {
                render_panel(panel, visual, area, self.background, self.px_per_row, buf);
            }
        }
    }
}

/// Blit `pixels` into `area`: each cell is one pixel wide and two tall,
/// drawn as `▀` with the top pixel as foreground and the bottom one as
/// background.  Larger images are scaled down to fit and centred.
fn render_halfblocks(pixels: &RgbaImage, area: Rect, background: Rgb, buf: &mut Buffer) {
    use image::imageops::FilterType;

    if pixels.width() == 0 || pixels.height() == 0 {
        return;
    }

    let max_px_w = area.width as f64;
    let max_px_h = (area.height as f64) * 2.0;
    let src_w = pixels.width() as f64;
    let src_h = pixels.height() as f64;

    let scale = (max_px_w / src_w).min(max_px_h / src_h).min(1.0);
    let fit_w = (src_w * scale).round().max(1.0) as u32;
    let fit_h = (src_h * scale).round().max(1.0) as u32;

    let scaled;
    let rgba = if fit_w == pixels.width() && fit_h == pixels.height() {
        pixels
    } else {
        scaled = image::imageops::resize(pixels, fit_w, fit_h, FilterType::Triangle);
        &scaled
    };
    let (iw, ih) = (rgba.width(), rgba.height());

    let col_offset = area.width.saturating_sub(iw as u16) / 2;
    let row_offset = (area.height.saturating_sub(ih.div_ceil(2) as u16)) / 2;

    for row in 0..area.height.saturating_sub(row_offset) {
        let yt = (row as u32) * 2;
        let yb = yt + 1;
        if yt >= ih {
            break;
        }
        for col in 0..iw.min(area.width as u32) {
            let t = rgba.get_pixel(col, yt);
            let fg = Color::Rgb(t[0], t[1], t[2]);
            let bg = if yb < ih {
                let b = rgba.get_pixel(col, yb);
                Color::Rgb(b[0], b[1], b[2])
            } else {
                color(background)
            };
            let pos = Position::new(area.x + col_offset + col as u16, area.y + row_offset + row);
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_char('▀').set_fg(fg).set_bg(bg);
            }
        }
    }
}

/// One line of a panel, before placement.
enum PanelLine {
    Title(String),
    Body(String),
    Blank,
    Buttons,
}

fn panel_lines(panel: &PanelDescriptor, width: u16) -> Vec<PanelLine> {
    let mut lines: Vec<PanelLine> = wrap(panel.title, width).into_iter().map(PanelLine::Title).collect();
    if let Some(body) = panel.body {
        lines.push(PanelLine::Blank);
        lines.extend(wrap(body, width).into_iter().map(PanelLine::Body));
    }
    if !panel.bullets.is_empty() {
        lines.push(PanelLine::Blank);
        for bullet in panel.bullets {
            let text = format!("• {bullet}");
            lines.extend(wrap(&text, width).into_iter().map(PanelLine::Body));
        }
    }
    if panel.cta {
        if !lines.is_empty() {
            lines.push(PanelLine::Blank);
        }
        lines.push(PanelLine::Buttons);
    }
    lines
}

fn render_panel(
    panel: &PanelDescriptor,
    visual: &PanelVisual,
    area: Rect,
    background: Rgb,
    px_per_row: f64,
    buf: &mut Buffer,
) {
    let margin = area.width / 12;
    let width = match panel.align {
        PanelAlign::Left | PanelAlign::Right => (area.width * 2 / 5).max(20),
        PanelAlign::Center => (area.width * 3 / 5).max(20),
    }
    .min(area.width);
    let x = match panel.align {
        PanelAlign::Left => area.x + margin.min(area.width - width),
        PanelAlign::Right => area.right() - width - margin.min(area.width - width),
        PanelAlign::Center => area.x + (area.width - width) / 2,
    };

    let offset_rows = if px_per_row > 0.0 {
        (visual.offset_px / px_per_row).round() as i32
    } else {
        0
    };
    let top = area.y as i32 + (panel.anchor * area.height as f64).round() as i32 + offset_rows;

    // Text fades from the frame background toward ink.
    let ink = background.mix(INK, visual.opacity);
    let title_style = Style::default().fg(color(ink)).add_modifier(Modifier::BOLD);
    let body_style = Style::default().fg(color(ink));

    for (i, line) in panel_lines(panel, width).iter().enumerate() {
        let y = top + i as i32;
        if y < area.y as i32 || y >= area.bottom() as i32 {
            continue;
        }
        let y = y as u16;
        match line {
            PanelLine::Title(text) => put_line(buf, x, y, width, text, panel.align, title_style),
            PanelLine::Body(text) => put_line(buf, x, y, width, text, panel.align, body_style),
            PanelLine::Blank => {}
            PanelLine::Buttons => render_buttons(buf, x, y, width, background, visual.opacity),
        }
    }
}

fn put_line(buf: &mut Buffer, x: u16, y: u16, width: u16, text: &str, align: PanelAlign, style: Style) {
    let len = text.chars().count() as u16;
    let x = match align {
        PanelAlign::Center => x + width.saturating_sub(len) / 2,
        PanelAlign::Right => x + width.saturating_sub(len),
        PanelAlign::Left => x,
    };
    buf.set_stringn(x, y, text, width as usize, style);
}

fn render_buttons(buf: &mut Buffer, x: u16, y: u16, width: u16, background: Rgb, opacity: f64) {
    let primary = format!("  {HERO_CTA_PRIMARY}  ");
    let secondary = format!("  {HERO_CTA_SECONDARY}  ");
    let total = (primary.chars().count() + 2 + secondary.chars().count()) as u16;
    if total > width {
        return;
    }
    let fg = background.mix(WHITE, opacity);
    let primary_style = Theme::primary_button(background.mix(BRAND_BLUE, opacity)).fg(color(fg));
    let secondary_style = Theme::primary_button(background.mix(INK, opacity)).fg(color(fg));

    let start = x + (width - total) / 2;
    let (end, _) = buf.set_stringn(start, y, &primary, usize::MAX, primary_style);
    buf.set_stringn(end + 2, y, &secondary, usize::MAX, secondary_style);
}
