//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* and *app* state and turns it into cells on
//! the terminal.  No I/O happens here.

pub mod header;
pub mod hero;
pub mod layout;
pub mod sections;
pub mod smooth_scroll;
pub mod spinner;
pub mod theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Paragraph, Widget},
    Frame,
};

use crate::app::state::AppState;
use crate::core::document::SectionKind;
use header::HeaderWidget;
use hero::HeroWidget;
use layout::AppLayout;
use spinner::LoadIndicator;
use theme::Theme;

/// Draw the whole screen.
pub fn draw(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());
    render_page(state, layout.page_area, frame.buffer_mut());

    let hint = state.config.status_bar_hint();
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        layout.status_area,
    );
    frame.render_widget(
        LoadIndicator {
            visible: state.load.is_loading(),
            tick: state.tick,
            counts: state.load.counts,
        },
        layout.status_area,
    );
}

/// Compose the visible slice of the document into `area`, then the fixed
/// header on top.
pub fn render_page(state: &AppState, area: Rect, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let ppr = state.config.px_per_row;
    let to_rows = |px: f64| (px / ppr).round() as i64;
    let scroll_row = state.scroll_row();
    let content = state.page_content();

    for span in state.document.sections() {
        let top = to_rows(span.top) - scroll_row;
        let height = to_rows(span.height);
        if top >= area.height as i64 || top + height <= 0 {
            continue;
        }

        if span.kind == SectionKind::Hero {
            let Some(canvas_top) = state.document.sticky_canvas_top(state.scroll_y) else {
                continue;
            };
            let mut canvas = Buffer::empty(Rect::new(0, 0, area.width, area.height));
            let animator = &state.animator;
            // Nothing painted yet means the surface holds no frame.
            let pixels = animator
                .painted_frame()
                .and(animator.surface())
                .map(|s| s.pixels());
            HeroWidget {
                pixels,
                panels: animator.panels(),
                visuals: animator.panel_visuals(),
                background: state.config.frame_bg,
                px_per_row: ppr,
            }
            .render(canvas.area, &mut canvas);
            blit(&canvas, area, to_rows(canvas_top), buf);
            continue;
        }

        let Ok(rows) = u16::try_from(height) else {
            continue;
        };
        let mut section = Buffer::empty(Rect::new(0, 0, area.width, rows));
        content.render(span.kind, section.area, &mut section);
        blit(&section, area, top, buf);
    }

    let signal = *state.header.borrow();
    HeaderWidget { signal }.render(area, buf);
}

/// Copy `src` into `dst` with its first row landing `top` rows below the
/// top of `dst`.  Rows outside `dst` are dropped.
fn blit(src: &Buffer, dst: Rect, top: i64, buf: &mut Buffer) {
    for r in 0..src.area.height {
        let y = top + r as i64;
        if y < 0 {
            continue;
        }
        if y >= dst.height as i64 {
            break;
        }
        for x in 0..src.area.width.min(dst.width) {
            if let Some(cell) = buf.cell_mut((dst.x + x, dst.y + y as u16)) {
                *cell = src[(x, r)].clone();
            }
        }
    }
}
