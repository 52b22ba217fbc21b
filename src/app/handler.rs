//! Input handling: maps key and mouse events onto page actions.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use super::state::AppState;
use crate::config::Action;
use crate::core::document::SectionKind;
use crate::ui::layout::AppLayout;
use crate::ui::sections::{self, SLIDER_ARROW_ROW};

/// Rows moved by one scroll step (key or wheel notch).
const LINE_STEP_ROWS: f64 = 3.0;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    state.status_message = None;

    if let Some(action) = state.config.match_key(key) {
        apply(state, action);
    }
}

/// Carry out one bound action.
pub fn apply(state: &mut AppState, action: Action) {
    let page_rows = state.page_rows().saturating_sub(2).max(1) as f64;
    match action {
        Action::ScrollDown => state.scroll_by_rows(LINE_STEP_ROWS),
        Action::ScrollUp => state.scroll_by_rows(-LINE_STEP_ROWS),
        Action::PageDown => state.scroll_by_rows(page_rows),
        Action::PageUp => state.scroll_by_rows(-page_rows),
        Action::Top => state.scroll_to(0.0),
        Action::Bottom => state.scroll_to(state.document.max_scroll()),
        Action::SliderPrev => state.slider_step(-1.0),
        Action::SliderNext => state.slider_step(1.0),
        Action::FaqNext => {
            state.faq.next();
            reveal_faq_cursor(state);
        }
        Action::FaqPrev => {
            state.faq.prev();
            reveal_faq_cursor(state);
        }
        Action::FaqToggle => {
            let cursor = state.faq.cursor;
            state.toggle_faq(cursor);
            reveal_faq_cursor(state);
        }
        Action::Quit => state.should_quit = true,
    }
}

/// Scroll just far enough that the focused FAQ question is on screen.
fn reveal_faq_cursor(state: &mut AppState) {
    let Some(doc_row) = faq_question_doc_row(state, state.faq.cursor) else {
        return;
    };
    let page_rows = state.page_rows() as i64;
    let top = state.scroll_row();
    // Leave the header row clear.
    if doc_row < top + 1 {
        state.scroll_to((doc_row - 1) as f64 * state.config.px_per_row);
    } else if doc_row >= top + page_rows {
        state.scroll_to((doc_row - page_rows + 1) as f64 * state.config.px_per_row);
    }
}

/// Document row of FAQ question `index`.
fn faq_question_doc_row(state: &AppState, index: usize) -> Option<i64> {
    let section = state.document.section(SectionKind::Faq)?;
    let width = page_area(state).width;
    let rows = sections::faq_question_rows(&state.faq.open, width);
    let top = (section.top / state.config.px_per_row).round() as i64;
    rows.get(index).map(|&r| top + r as i64)
}

fn page_area(state: &AppState) -> Rect {
    AppLayout::from_area(state.terminal_area).page_area
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let page = page_area(state);
    if !point_in_rect(page, mouse.column, mouse.row) {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => state.scroll_by_rows(LINE_STEP_ROWS),
        MouseEventKind::ScrollUp => state.scroll_by_rows(-LINE_STEP_ROWS),
        MouseEventKind::Down(MouseButton::Left) => {
            let doc_row = state.scroll_row() + (mouse.row - page.y) as i64;
            let col = mouse.column - page.x;
            handle_click(state, doc_row, col, page.width);
        }
        _ => {}
    }
}

fn handle_click(state: &mut AppState, doc_row: i64, col: u16, width: u16) {
    let ppr = state.config.px_per_row;
    let Some(section) = state.document.section_at(doc_row as f64 * ppr).copied() else {
        return;
    };
    let row_in_section = doc_row - (section.top / ppr).round() as i64;

    match section.kind {
        SectionKind::Slider if row_in_section == SLIDER_ARROW_ROW as i64 => {
            let (prev, next) = sections::slider_arrow_cols(width);
            if (prev..prev + 3).contains(&col) {
                state.slider_step(-1.0);
            } else if (next..next + 3).contains(&col) {
                state.slider_step(1.0);
            }
        }
        SectionKind::Faq => {
            let rows = sections::faq_question_rows(&state.faq.open, width);
            if let Some(index) = rows.iter().position(|&r| r as i64 == row_in_section) {
                state.faq.cursor = index;
                state.toggle_faq(index);
            }
        }
        _ => {}
    }
}

fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::state;
    use crate::core::loader::LoadEvent;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Scroll so `kind` starts on the first page row.
    fn scroll_to_section(s: &mut AppState, kind: SectionKind) -> f64 {
        let top = s.document.section(kind).unwrap().top;
        s.scroll_to(top);
        top
    }

    #[test]
    fn keys_scroll_the_page() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Char('j')));
        assert_eq!(s.scroll_y, 3.0 * 16.0);
        handle_key(&mut s, press(KeyCode::PageDown));
        assert_eq!(s.scroll_y, (3.0 + 22.0) * 16.0);
        handle_key(&mut s, press(KeyCode::End));
        assert_eq!(s.scroll_y, s.document.max_scroll());
        handle_key(&mut s, press(KeyCode::Home));
        assert_eq!(s.scroll_y, 0.0);
        handle_key(&mut s, press(KeyCode::Up));
        assert_eq!(s.scroll_y, 0.0);
    }

    #[test]
    fn next_key_press_dismisses_the_load_note() {
        let mut s = state();
        s.apply_load_event(LoadEvent::Finished {
            loaded: 119,
            failed: 1,
        });
        assert!(s.status_message.is_some());
        handle_key(&mut s, press(KeyCode::Char('j')));
        assert!(s.status_message.is_none());
    }

    #[test]
    fn quit_keys() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Char('q')));
        assert!(s.should_quit);

        let mut s = state();
        handle_key(
            &mut s,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(s.should_quit);
    }

    #[test]
    fn releases_are_ignored() {
        let mut s = state();
        let mut key = press(KeyCode::Char('j'));
        key.kind = KeyEventKind::Release;
        handle_key(&mut s, key);
        assert_eq!(s.scroll_y, 0.0);
    }

    #[test]
    fn wheel_scrolls_inside_the_page_only() {
        let mut s = state();
        handle_mouse(&mut s, mouse(MouseEventKind::ScrollDown, 10, 10));
        assert_eq!(s.scroll_y, 48.0);
        // Status bar row.
        handle_mouse(&mut s, mouse(MouseEventKind::ScrollDown, 10, 24));
        assert_eq!(s.scroll_y, 48.0);
    }

    #[test]
    fn faq_keys_move_toggle_and_reveal() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Tab));
        assert_eq!(s.faq.cursor, 1);
        handle_key(&mut s, press(KeyCode::Enter));
        assert!(s.faq.open[1]);
        let row = faq_question_doc_row(&s, 1).unwrap();
        let top = s.scroll_row();
        assert!(row > top && row < top + s.page_rows() as i64);
    }

    #[test]
    fn clicking_a_question_toggles_it() {
        let mut s = state();
        scroll_to_section(&mut s, SectionKind::Faq);
        let rows = sections::faq_question_rows(&s.faq.open, 80);
        handle_mouse(
            &mut s,
            mouse(MouseEventKind::Down(MouseButton::Left), 5, rows[2]),
        );
        assert!(s.faq.open[2]);
        assert_eq!(s.faq.cursor, 2);
        // Clicking elsewhere in the section does nothing.
        handle_mouse(
            &mut s,
            mouse(MouseEventKind::Down(MouseButton::Left), 5, rows[0] - 1),
        );
        assert_eq!(s.faq.open.iter().filter(|o| **o).count(), 1);
    }

    #[test]
    fn slider_arrows_and_keys_step_the_track() {
        let mut s = state();
        handle_key(&mut s, press(KeyCode::Right));
        assert_eq!(s.slider.target_px(), 360.0);
        handle_key(&mut s, press(KeyCode::Left));
        assert_eq!(s.slider.target_px(), 0.0);

        scroll_to_section(&mut s, SectionKind::Slider);
        let (_, next) = sections::slider_arrow_cols(80);
        handle_mouse(
            &mut s,
            mouse(MouseEventKind::Down(MouseButton::Left), next + 1, SLIDER_ARROW_ROW),
        );
        assert_eq!(s.slider.target_px(), 360.0);
    }
}
