//! Fixed page header: logo, nav items, and the account/shop buttons.
//!
//! Restyled from the animator's header signal: the logo crossfades from
//! blue to white, the nav text flips to white past the halfway point, and
//! the bar only paints a background once `nav_solid` is set.  Until then it
//! draws foreground only, so the hero shows through.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::theme::{color, Theme, BRAND_BLUE, INK, WHITE};
use crate::core::content::{BRAND_NAME, NAV_ITEMS, NAV_LOGIN, NAV_SHOP};
use crate::core::progress::HeaderSignal;
use crate::core::surface::Rgb;

const HEADER_BG: Rgb = Rgb(0, 0, 0);
const NAV_GAP: u16 = 3;

pub struct HeaderWidget {
    pub signal: HeaderSignal,
}

impl HeaderWidget {
    pub fn logo_color(&self) -> Rgb {
        BRAND_BLUE.mix(WHITE, self.signal.logo_swap_ratio)
    }

    pub fn nav_color(&self) -> Rgb {
        if self.signal.logo_swap_ratio > 0.5 {
            WHITE
        } else {
            INK
        }
    }
}

impl Widget for HeaderWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let row = Rect { height: 1, ..area };
        if self.signal.nav_solid {
            buf.set_style(row, Style::default().bg(color(HEADER_BG)));
        }

        let logo_style = Style::default()
            .fg(color(self.logo_color()))
            .add_modifier(Modifier::BOLD);
        let (logo_end, _) = buf.set_stringn(
            row.x + 1,
            row.y,
            BRAND_NAME,
            row.width.saturating_sub(1) as usize,
            logo_style,
        );

        // Buttons, right-aligned.
        let login = format!(" {NAV_LOGIN} ");
        let shop = format!(" {NAV_SHOP} ");
        let buttons_w = (login.chars().count() + 1 + shop.chars().count() + 1) as u16;
        let buttons_x = row.right().saturating_sub(buttons_w);
        if buttons_x > logo_end + 1 {
            let nav_style = Style::default().fg(color(self.nav_color()));
            let (after_login, _) = buf.set_stringn(buttons_x, row.y, &login, usize::MAX, nav_style);
            buf.set_string(after_login + 1, row.y, &shop, Theme::primary_button(BRAND_BLUE));
        }

        // Nav items, centred, only when they fit between logo and buttons.
        let nav_w: u16 = NAV_ITEMS
            .iter()
            .map(|s| s.chars().count() as u16)
            .sum::<u16>()
            + NAV_GAP * (NAV_ITEMS.len() as u16).saturating_sub(1);
        let mut x = row.x + row.width.saturating_sub(nav_w) / 2;
        if x > logo_end + 1 && x + nav_w + 1 < buttons_x {
            let nav_style = Style::default().fg(color(self.nav_color()));
            for item in NAV_ITEMS {
                let (end, _) = buf.set_stringn(x, row.y, item, usize::MAX, nav_style);
                x = end + NAV_GAP;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn render(signal: HeaderSignal, width: u16) -> Buffer {
        let area = Rect::new(0, 0, width, 2);
        let mut buf = Buffer::empty(area);
        // Something to show through.
        buf.set_style(area, Style::default().bg(Color::Rgb(1, 2, 3)));
        HeaderWidget { signal }.render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer) -> String {
        (0..buf.area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn top_of_page_is_transparent_with_blue_logo() {
        let buf = render(HeaderSignal::from_scroll(0.0), 120);
        assert_eq!(buf[(1, 0)].symbol(), "T");
        assert_eq!(buf[(1, 0)].fg, Color::Rgb(0x00, 0x50, 0xff));
        assert_eq!(buf[(1, 0)].bg, Color::Rgb(1, 2, 3));
        let text = row_text(&buf);
        assert!(text.contains("Devices ▾"));
        assert!(text.contains("Shop Now"));
    }

    #[test]
    fn scrolled_header_is_solid_with_white_text() {
        let buf = render(HeaderSignal::from_scroll(100.0), 120);
        assert_eq!(buf[(1, 0)].fg, Color::Rgb(0xff, 0xff, 0xff));
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(0, 0, 0));
        // Second row is untouched.
        assert_eq!(buf[(0, 1)].bg, Color::Rgb(1, 2, 3));
    }

    #[test]
    fn logo_crossfades_halfway() {
        let w = HeaderWidget {
            signal: HeaderSignal::from_scroll(20.0),
        };
        assert_eq!(w.logo_color(), BRAND_BLUE.mix(WHITE, 0.5));
        assert_eq!(w.nav_color(), INK);
    }

    #[test]
    fn narrow_terminals_drop_the_nav() {
        let text = row_text(&render(HeaderSignal::default(), 40));
        assert!(text.contains("Teachmint X"));
        assert!(!text.contains("Devices"));
    }
}
