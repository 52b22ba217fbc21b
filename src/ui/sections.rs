//! The presentational page sections below the hero.
//!
//! Every section knows its height in rows for a given width, so the
//! document can be laid out before anything is drawn.  Sections render into
//! an area exactly that tall; the page composer clips them to the viewport.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Widget},
};

use super::layout::{centered_columns, wrap};
use super::theme::Theme;
use crate::core::content::{
    BRAND_NAME, CONTACTS, CONTACT_HEADING, COPYRIGHT, CTA_BODY, CTA_HEADING, FAQ_HEADING,
    FAQ_INTRO, FAQ_ITEMS, FEATURES, FEATURES_HEADING, FEATURES_LINK, FOOTER_SECTIONS,
    SLIDER_HEADING, SLIDES, SLIDE_CARD_PX, SOCIAL_LINKS,
};
use crate::core::document::SectionKind;

const MAX_CONTENT_WIDTH: u16 = 100;
const FEATURE_CARD_MIN_WIDTH: u16 = 28;
const FEATURE_CARD_HEIGHT: u16 = 5;
const SLIDE_GAP_COLS: u16 = 2;
const SLIDE_HEIGHT: u16 = 7;
const FOOTER_COLUMN_WIDTH: u16 = 36;

/// Row of the slider heading (and its arrows), relative to the section.
pub const SLIDER_ARROW_ROW: u16 = 1;

/// Mutable bits of the page the sections read.
#[derive(Debug, Clone, Copy)]
pub struct PageContent<'a> {
    pub faq_open: &'a [bool],
    pub faq_cursor: usize,
    pub slider_offset_px: f64,
    /// Horizontal CSS pixels per column.
    pub px_per_col: f64,
}

impl PageContent<'_> {
    /// Height in rows of `kind` at `width` columns.  The hero is sized by
    /// the document, not here, and reports 0.
    pub fn height(&self, kind: SectionKind, width: u16) -> u16 {
        let content = content_width(width);
        match kind {
            SectionKind::Hero => 0,
            SectionKind::Features => features_height(content),
            SectionKind::Slider => 4 + SLIDE_HEIGHT,
            SectionKind::Faq => faq_layout(self.faq_open, content).height,
            SectionKind::Cta => cta_height(content),
            SectionKind::Footer => footer_height(content),
        }
    }

    pub fn render(&self, kind: SectionKind, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        match kind {
            SectionKind::Hero => {}
            SectionKind::Features => render_features(area, buf),
            SectionKind::Slider => render_slider(area, buf, self.slider_offset_px, self.px_per_col),
            SectionKind::Faq => render_faq(area, buf, self.faq_open, self.faq_cursor),
            SectionKind::Cta => render_cta(area, buf),
            SectionKind::Footer => render_footer(area, buf),
        }
    }
}

fn content_width(width: u16) -> u16 {
    width.saturating_sub(4).clamp(1, MAX_CONTENT_WIDTH)
}

fn content_area(area: Rect) -> Rect {
    centered_columns(area, content_width(area.width))
}

/// Write `text` starting at column `x` (which may lie left of `clip`),
/// dropping every character outside `clip`.
fn put_clipped(buf: &mut Buffer, x: i32, y: u16, text: &str, clip: Rect, style: Style) {
    if y < clip.y || y >= clip.bottom() {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let cx = x + i as i32;
        if cx < clip.x as i32 {
            continue;
        }
        if cx >= clip.right() as i32 {
            break;
        }
        if let Some(cell) = buf.cell_mut((cx as u16, y)) {
            cell.set_char(ch).set_style(style);
        }
    }
}

fn put_lines(buf: &mut Buffer, area: Rect, y: u16, lines: &[String], style: Style, centred: bool) -> u16 {
    let mut row = y;
    for line in lines {
        let x = if centred {
            area.x + area.width.saturating_sub(line.chars().count() as u16) / 2
        } else {
            area.x
        };
        put_clipped(buf, x as i32, row, line, area, style);
        row += 1;
    }
    row
}

// ── features ──────────────────────────────────────────────────

fn feature_columns(content: u16) -> u16 {
    (content / FEATURE_CARD_MIN_WIDTH).clamp(1, FEATURES.len() as u16)
}

fn features_height(content: u16) -> u16 {
    let heading = wrap(FEATURES_HEADING, content).len() as u16;
    let cols = feature_columns(content) as usize;
    let rows = FEATURES.len().div_ceil(cols) as u16;
    // padding, heading, link, gap, cards (+1 gap each), padding
    1 + heading + 1 + 1 + rows * (FEATURE_CARD_HEIGHT + 1) + 1
}

fn render_features(area: Rect, buf: &mut Buffer) {
    buf.set_style(area, Theme::section_style());
    let content = content_area(area);
    let heading = wrap(FEATURES_HEADING, content.width);
    let mut y = put_lines(buf, content, area.y + 1, &heading, Theme::heading_style(), false);
    put_clipped(buf, content.x as i32, y, FEATURES_LINK, content, Theme::link_style());
    y += 2;

    let cols = feature_columns(content.width);
    let card_w = content.width / cols;
    for (i, card) in FEATURES.iter().enumerate() {
        let col = i as u16 % cols;
        let row = i as u16 / cols;
        let rect = Rect::new(
            content.x + col * card_w,
            y + row * (FEATURE_CARD_HEIGHT + 1),
            card_w.saturating_sub(1),
            FEATURE_CARD_HEIGHT,
        )
        .intersection(area);
        if rect.is_empty() {
            continue;
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::muted_style());
        let inner = block.inner(rect);
        block.render(rect, buf);
        let lines: Vec<String> = wrap(card.title, inner.width)
            .into_iter()
            .take(inner.height as usize)
            .collect();
        put_lines(buf, inner, inner.y, &lines, Theme::heading_style(), false);
    }
}

// ── slider ────────────────────────────────────────────────────

fn slide_columns(px_per_col: f64) -> u16 {
    if px_per_col > 0.0 {
        ((SLIDE_CARD_PX / px_per_col).round() as u16).max(12)
    } else {
        12
    }
}

/// Scrollable extent of the slider track at `width`, in CSS pixels.
pub fn slider_max_offset_px(width: u16, px_per_col: f64) -> f64 {
    let n = SLIDES.len() as f64;
    let card = slide_columns(px_per_col) as f64;
    let track_cols = n * card + (n - 1.0).max(0.0) * SLIDE_GAP_COLS as f64;
    ((track_cols - content_width(width) as f64) * px_per_col).max(0.0)
}

/// Columns of the previous/next arrows, relative to the section's left edge.
pub fn slider_arrow_cols(width: u16) -> (u16, u16) {
    let content = content_area(Rect::new(0, 0, width, 1));
    let right = content.right();
    (right.saturating_sub(7), right.saturating_sub(3))
}

fn render_slider(area: Rect, buf: &mut Buffer, offset_px: f64, px_per_col: f64) {
    buf.set_style(area, Theme::card_style());
    let content = content_area(area);
    let y = area.y + SLIDER_ARROW_ROW;
    put_clipped(buf, content.x as i32, y, SLIDER_HEADING, content, Theme::heading_style());

    let (prev, next) = slider_arrow_cols(area.width);
    let arrow = Style::default().add_modifier(Modifier::BOLD);
    put_clipped(buf, (area.x + prev) as i32, y, " ‹ ", area, arrow.add_modifier(Modifier::REVERSED));
    put_clipped(buf, (area.x + next) as i32, y, " › ", area, arrow.add_modifier(Modifier::REVERSED));

    let card_w = slide_columns(px_per_col);
    let offset_cols = if px_per_col > 0.0 {
        (offset_px / px_per_col).round() as i32
    } else {
        0
    };
    let track_top = y + 2;
    let card_style = Theme::section_style();
    for (i, slide) in SLIDES.iter().enumerate() {
        let left = content.x as i32 + i as i32 * (card_w + SLIDE_GAP_COLS) as i32 - offset_cols;
        if left >= content.right() as i32 || left + card_w as i32 <= content.x as i32 {
            continue;
        }
        let blank = " ".repeat(card_w as usize);
        for r in 0..SLIDE_HEIGHT {
            put_clipped(buf, left, track_top + r, &blank, content, card_style);
        }
        let number = format!(" {:02}", i + 1);
        put_clipped(buf, left, track_top + 1, &number, content, Theme::muted_style());
        for (j, line) in wrap(slide.title, card_w.saturating_sub(2)).iter().take(4).enumerate() {
            put_clipped(buf, left + 1, track_top + 3 + j as u16, line, content, Theme::heading_style());
        }
    }
}

// ── faq ───────────────────────────────────────────────────────

struct FaqLayout {
    /// Row of each question, relative to the section top.
    question_rows: Vec<u16>,
    height: u16,
}

fn faq_layout(open: &[bool], content: u16) -> FaqLayout {
    let mut y = 1 + wrap(FAQ_HEADING, content).len() as u16;
    y += wrap(FAQ_INTRO, content).len() as u16 + 1;
    let mut question_rows = Vec::with_capacity(FAQ_ITEMS.len());
    for (i, item) in FAQ_ITEMS.iter().enumerate() {
        question_rows.push(y);
        y += 1;
        if open.get(i).copied().unwrap_or(false) {
            y += wrap(item.answer, content.saturating_sub(4)).len() as u16;
        }
        y += 1;
    }
    FaqLayout {
        question_rows,
        height: y + 1,
    }
}

/// Row of each FAQ question relative to the section top, for click mapping.
pub fn faq_question_rows(open: &[bool], width: u16) -> Vec<u16> {
    faq_layout(open, content_width(width)).question_rows
}

fn render_faq(area: Rect, buf: &mut Buffer, open: &[bool], cursor: usize) {
    buf.set_style(area, Theme::section_style());
    let content = content_area(area);
    let layout = faq_layout(open, content.width);

    let heading = wrap(FAQ_HEADING, content.width);
    let y = put_lines(buf, content, area.y + 1, &heading, Theme::heading_style(), false);
    put_lines(buf, content, y, &wrap(FAQ_INTRO, content.width), Theme::muted_style(), false);

    for (i, (item, &row)) in FAQ_ITEMS.iter().zip(&layout.question_rows).enumerate() {
        let is_open = open.get(i).copied().unwrap_or(false);
        let marker = if is_open { "−" } else { "+" };
        let style = if i == cursor {
            Theme::focused_style()
        } else {
            Theme::heading_style()
        };
        let y = area.y + row;
        put_clipped(buf, content.x as i32, y, &format!("{marker} {}", item.question), content, style);
        if is_open {
            let answer = wrap(item.answer, content.width.saturating_sub(4));
            let indented = Rect {
                x: content.x + 4,
                width: content.width.saturating_sub(4),
                ..content
            };
            put_lines(buf, indented, y + 1, &answer, Theme::muted_style(), false);
        }
    }
}

// ── cta band ──────────────────────────────────────────────────

fn cta_height(content: u16) -> u16 {
    2 + wrap(CTA_HEADING, content).len() as u16 + 1 + wrap(CTA_BODY, content).len() as u16 + 2
}

fn render_cta(area: Rect, buf: &mut Buffer) {
    buf.set_style(area, Theme::dark_band_style());
    let content = content_area(area);
    let heading = wrap(CTA_HEADING, content.width);
    let y = put_lines(
        buf,
        content,
        area.y + 2,
        &heading,
        Theme::dark_band_style().add_modifier(Modifier::BOLD),
        true,
    );
    put_lines(buf, content, y + 1, &wrap(CTA_BODY, content.width), Theme::dark_band_style(), true);
}

// ── footer ────────────────────────────────────────────────────

struct FooterColumn {
    title: &'static str,
    lines: Vec<(String, Style)>,
}

fn footer_columns() -> Vec<FooterColumn> {
    let mut columns: Vec<FooterColumn> = FOOTER_SECTIONS
        .iter()
        .map(|s| FooterColumn {
            title: s.title,
            lines: s
                .links
                .iter()
                .map(|l| (l.to_string(), Theme::dark_band_style()))
                .collect(),
        })
        .collect();

    let mut contact = Vec::new();
    for block in CONTACTS {
        if !contact.is_empty() {
            contact.push((String::new(), Theme::dark_band_style()));
        }
        contact.push((
            block.label.to_string(),
            Theme::dark_band_style().add_modifier(Modifier::BOLD),
        ));
        contact.extend(block.lines.iter().map(|l| (l.to_string(), Theme::dark_band_style())));
    }
    columns.push(FooterColumn {
        title: CONTACT_HEADING,
        lines: contact,
    });
    columns
}

fn footer_grid(content: u16) -> usize {
    (content / FOOTER_COLUMN_WIDTH).max(1) as usize
}

fn footer_height(content: u16) -> u16 {
    let columns = footer_columns();
    let per_row = footer_grid(content);
    let grid: u16 = columns
        .chunks(per_row)
        .map(|row| row.iter().map(|c| 2 + c.lines.len() as u16).max().unwrap_or(0) + 1)
        .sum();
    // padding, brand, gap, grid, socials, copyright, padding
    1 + 1 + 1 + grid + 1 + 1 + 1
}

fn render_footer(area: Rect, buf: &mut Buffer) {
    let band = Theme::dark_band_style();
    buf.set_style(area, band);
    let content = content_area(area);
    put_clipped(buf, content.x as i32, area.y + 1, BRAND_NAME, content, band.add_modifier(Modifier::BOLD));

    let columns = footer_columns();
    let per_row = footer_grid(content.width);
    let col_w = content.width / per_row as u16;
    let mut y = area.y + 3;
    for row in columns.chunks(per_row) {
        let mut tallest = 0;
        for (i, column) in row.iter().enumerate() {
            let cell = Rect {
                x: content.x + i as u16 * col_w,
                width: col_w.saturating_sub(2),
                ..content
            };
            put_clipped(
                buf,
                cell.x as i32,
                y,
                column.title,
                cell,
                band.add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            );
            for (j, (line, style)) in column.lines.iter().enumerate() {
                put_clipped(buf, cell.x as i32, y + 2 + j as u16, line, cell, *style);
            }
            tallest = tallest.max(2 + column.lines.len() as u16);
        }
        y += tallest + 1;
    }

    let socials: Vec<&str> = SOCIAL_LINKS.iter().map(|s| s.name).collect();
    put_clipped(buf, content.x as i32, y, &socials.join(" · "), content, band);
    put_clipped(buf, content.x as i32, y + 1, COPYRIGHT, content, band.add_modifier(Modifier::DIM));
}
