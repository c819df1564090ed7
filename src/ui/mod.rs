//! Rendering. One `draw` entry point splits the screen into the list pane,
//! the detail pane, and a one-line footer, then layers any open modal on top.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::state::AppState;
use crate::theme::theme;

mod detail;
mod list;
mod modals;

/// What: Render the whole frame from the current state.
pub fn draw(frame: &mut Frame, app: &mut AppState) {
    let t = theme();
    let area = frame.area();
    frame.render_widget(
        ratatui::widgets::Block::default().style(Style::default().bg(t.base)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let list_pct = app.settings.layout_list_pct.clamp(20, 80);
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(list_pct),
            Constraint::Percentage(100 - list_pct),
        ])
        .split(rows[0]);

    list::draw(frame, app, panes[0]);
    detail::draw(frame, app, panes[1]);
    draw_footer(frame, app, rows[1]);
    modals::draw(frame, app, area);
}

/// One-line key hint footer.
fn draw_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let t = theme();
    let hints = if app.modal.is_open() {
        "Esc close  Enter confirm  Space toggle"
    } else {
        "/ search  f filters  s sort  c clear  n/p page  Tab view  [ ] history  ? help  q quit"
    };
    let line = Line::from(vec![Span::styled(
        hints,
        Style::default().fg(t.subtext).bg(t.mantle),
    )]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(t.mantle)), area);
}

/// Centered sub-rectangle used by modal overlays.
fn centered_rect(pct_x: u16, pct_y: u16, area: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - pct_y) / 2),
            Constraint::Percentage(pct_y),
            Constraint::Percentage((100 - pct_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - pct_x) / 2),
            Constraint::Percentage(pct_x),
            Constraint::Percentage((100 - pct_x) / 2),
        ])
        .split(vert[1])[1]
}
