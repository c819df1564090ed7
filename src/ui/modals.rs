//! Modal overlays: help, alerts, the filter menu, and the sort menu.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::state::{AppState, Modal};
use crate::theme::theme;
use crate::ui::centered_rect;

/// What: Render the open modal, if any, on top of the frame.
pub fn draw(frame: &mut Frame, app: &AppState, area: Rect) {
    match &app.modal {
        Modal::None => {}
        Modal::Help => draw_help(frame, area),
        Modal::Alert { message } => draw_alert(frame, message, area),
        Modal::Filters { cursor } => draw_filters(frame, app, *cursor, area),
        Modal::Sort { cursor } => draw_sort(frame, app, *cursor, area),
    }
}

/// Bordered, cleared overlay block.
fn overlay(frame: &mut Frame, title: &str, pct_x: u16, pct_y: u16, area: Rect) -> Rect {
    let t = theme();
    let rect = centered_rect(pct_x, pct_y, area);
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.accent))
        .style(Style::default().bg(t.mantle))
        .title(Span::styled(title.to_owned(), Style::default().fg(t.heading)));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    inner
}

/// The keybinding help overlay.
fn draw_help(frame: &mut Frame, area: Rect) {
    let t = theme();
    let inner = overlay(frame, " Help ", 60, 70, area);
    let rows = [
        ("/", "focus search (Enter applies, typing never does)"),
        ("f", "filter menu: status and fund selection"),
        ("s", "sort menu (picking the current field flips direction)"),
        ("c", "clear search, filters, and sort in one step"),
        ("n / p", "next / previous page"),
        ("Enter", "open the highlighted record"),
        ("1-9", "browse a campaign listed in an open fund detail"),
        ("Esc", "close detail / discard menu edits"),
        ("Tab", "cycle funds → projects → ideas → leaderboards"),
        ("[ / ]", "history back / forward"),
        ("r", "retry a failed request"),
        ("q", "quit"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("{key:>7}  "), Style::default().fg(t.accent)),
                Span::styled(*what, Style::default().fg(t.text)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// A blocking message dismissed by any key.
fn draw_alert(frame: &mut Frame, message: &str, area: Rect) {
    let t = theme();
    let inner = overlay(frame, " Notice ", 50, 30, area);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(message.to_owned(), Style::default().fg(t.text))),
            Line::default(),
            Line::from(Span::styled("press any key", Style::default().fg(t.subtext))),
        ])
        .wrap(Wrap { trim: false }),
        inner,
    );
}

/// The filter menu: status radio rows, then fund checkbox rows.
fn draw_filters(frame: &mut Frame, app: &AppState, cursor: usize, area: Rect) {
    let t = theme();
    let inner = overlay(frame, " Filters ", 50, 60, area);
    let pending = app.list.pending();
    let statuses = app.list.options().statuses;

    let mut lines: Vec<Line> = Vec::new();
    for (i, status) in statuses.iter().enumerate() {
        let marker = if pending.status == *status { "(•)" } else { "( )" };
        let label = if i == 0 { "All statuses" } else { status };
        lines.push(menu_line(i == cursor, &format!("{marker} {label}")));
    }
    if !app.fund_choices.is_empty() {
        lines.push(Line::from(Span::styled("Funds", Style::default().fg(t.heading))));
    }
    for (i, (id, name)) in app.fund_choices.iter().enumerate() {
        let marker = if pending.ids.contains(id) { "[x]" } else { "[ ]" };
        // heading row above is not selectable, so cursor indexes skip it
        lines.push(menu_line(
            statuses.len() + i == cursor,
            &format!("{marker} {name}"),
        ));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Space toggle · Enter apply · r reset · Esc discard",
        Style::default().fg(t.subtext),
    )));
    frame.render_widget(Paragraph::new(lines), inner);
}

/// The sort menu over the view's legal fields.
fn draw_sort(frame: &mut Frame, app: &AppState, cursor: usize, area: Rect) {
    let t = theme();
    let inner = overlay(frame, " Sort ", 40, 50, area);
    let applied = app.list.state(&app.location);

    let mut lines: Vec<Line> = app
        .list
        .options()
        .sort_fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let current = applied.order_by == field.value;
            let marker = if current {
                format!("{} {}", field.label, applied.order_dir.as_str())
            } else {
                field.label.to_owned()
            };
            menu_line(i == cursor, &marker)
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Enter apply · Esc close",
        Style::default().fg(t.subtext),
    )));
    frame.render_widget(Paragraph::new(lines), inner);
}

/// One selectable menu row.
fn menu_line(selected: bool, text: &str) -> Line<'static> {
    let t = theme();
    if selected {
        Line::from(Span::styled(
            format!("> {text}"),
            Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(format!("  {text}"), Style::default().fg(t.text)))
    }
}
