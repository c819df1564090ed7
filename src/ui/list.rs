//! The list pane: search bar, header line, and the results list with its
//! loading / error / empty states.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::state::AppState;
use crate::state::types::Focus;
use crate::theme::theme;

/// Trim a string to a display width, appending an ellipsis when cut.
fn fit(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// What: Render the list pane into `area`.
pub fn draw(frame: &mut Frame, app: &mut AppState, area: Rect) {
    let show_search = app.list.options().supports_search;
    let constraints = if show_search {
        vec![Constraint::Length(3), Constraint::Min(1)]
    } else {
        vec![Constraint::Min(1)]
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    if show_search {
        draw_search(frame, app, rows[0]);
    }
    let list_area = if show_search { rows[1] } else { rows[0] };
    draw_results(frame, app, list_area);
}

/// The search input with an unsubmitted-edit marker.
fn draw_search(frame: &mut Frame, app: &AppState, area: Rect) {
    let t = theme();
    let applied = app.list.state(&app.location).search;
    let dirty = app.input.trim() != applied;
    let focused = app.focus == Focus::Search;

    let border = if focused { t.accent } else { t.overlay };
    let title = if dirty { " Search (Enter to apply) " } else { " Search " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(title, Style::default().fg(t.heading)));
    frame.render_widget(
        Paragraph::new(app.input.as_str()).style(Style::default().fg(t.text)).block(block),
        area,
    );

    if focused {
        let x = area.x + 1 + u16::try_from(app.input[..byte_caret(app)].width()).unwrap_or(0);
        frame.set_cursor_position((x.min(area.x + area.width.saturating_sub(2)), area.y + 1));
    }
}

/// Byte offset of the caret.
fn byte_caret(app: &AppState) -> usize {
    app.input
        .char_indices()
        .nth(app.caret)
        .map_or(app.input.len(), |(i, _)| i)
}

/// Header line: title, sort, filter count, page position.
fn header_line(app: &AppState) -> String {
    let st = app.list.state(&app.location);
    let filters = app.list.active_filters_count(&app.location);
    let mut s = format!(" {} · {} {}", app.view().title(), st.order_by, st.order_dir.as_str());
    if filters > 0 {
        s.push_str(&format!(" · {filters} filter(s)"));
    }
    if app.list.has_unapplied_changes(&app.location) {
        s.push_str(" · pending edits");
    }
    if let Some(campaign) = app.campaign_scope {
        s.push_str(&format!(" · campaign {campaign}"));
    }
    if let Some(page) = &app.binding.data {
        s.push_str(&format!(" · page {}/{} of {}", page.page, page.total_pages, page.total_items));
    }
    s.push(' ');
    s
}

/// The results list with its loading, error, and empty states.
fn draw_results(frame: &mut Frame, app: &mut AppState, area: Rect) {
    let t = theme();
    let focused = app.focus == Focus::Results;
    let border = if focused { t.accent } else { t.overlay };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(header_line(app), Style::default().fg(t.heading)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut list_area = inner;
    if let Some(error) = &app.binding.error {
        let mut lines = vec![
            Line::from(Span::styled(format!("error: {error}"), Style::default().fg(t.red))),
            Line::from(Span::styled("press r to retry", Style::default().fg(t.subtext))),
        ];
        if app.binding.data.is_some() {
            lines.push(Line::from(Span::styled(
                "showing previous results",
                Style::default().fg(t.yellow),
            )));
        }
        let h = u16::try_from(lines.len()).unwrap_or(3);
        frame.render_widget(Paragraph::new(lines), slice_top(inner, h));
        if app.binding.data.is_none() {
            return;
        }
        list_area = Rect {
            y: inner.y + h.min(inner.height),
            height: inner.height.saturating_sub(h),
            ..inner
        };
    } else if app.binding.loading && app.binding.data.is_none() {
        frame.render_widget(
            Paragraph::new(Span::styled("loading…", Style::default().fg(t.subtext))),
            inner,
        );
        return;
    }

    let Some(page) = &app.binding.data else {
        return;
    };
    if page.items.is_empty() {
        let hint = if app.list.active_filters_count(&app.location) > 0 {
            "no results · press c to clear all filters"
        } else {
            "no results"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(t.subtext))),
            inner,
        );
        return;
    }

    let width = usize::from(list_area.width);
    let items: Vec<ListItem> = page
        .items
        .iter()
        .map(|row| {
            let badge_style = match row.badge.as_str() {
                "Funded" => Style::default().fg(t.green),
                "NotFunded" => Style::default().fg(t.red),
                _ => Style::default().fg(t.yellow),
            };
            let title_width = width.saturating_sub(row.badge.width() + 3);
            let mut lines = vec![Line::from(vec![
                Span::styled(fit(&row.title, title_width), Style::default().fg(t.text).add_modifier(Modifier::BOLD)),
                Span::raw(" "),
                Span::styled(row.badge.clone(), badge_style),
            ])];
            let mut sub = String::new();
            if !row.subtitle.is_empty() {
                sub.push_str(&row.subtitle);
            }
            if !row.date.is_empty() {
                if !sub.is_empty() {
                    sub.push_str(" · ");
                }
                sub.push_str(&row.date);
            }
            if !row.submitter.is_empty() {
                if !sub.is_empty() {
                    sub.push_str(" · ");
                }
                sub.push_str(&row.submitter);
            }
            if !sub.is_empty() {
                lines.push(Line::from(Span::styled(
                    fit(&sub, width),
                    Style::default().fg(t.subtext),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    app.list_state.select(Some(app.selected.min(page.items.len().saturating_sub(1))));
    let list = List::new(items)
        .highlight_style(Style::default().bg(t.surface).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(list, list_area, &mut app.list_state);
}

/// Top `h` rows of a rect.
fn slice_top(area: Rect, h: u16) -> Rect {
    Rect {
        height: h.min(area.height),
        ..area
    }
}
