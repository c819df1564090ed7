//! The detail pane: the opened record, or a placeholder when nothing is
//! selected.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::state::AppState;
use crate::theme::theme;

/// What: Render the detail pane into `area`.
pub fn draw(frame: &mut Frame, app: &AppState, area: Rect) {
    let t = theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.overlay))
        .title(Span::styled(" Detail ", Style::default().fg(t.heading)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.detail.loading {
        frame.render_widget(
            Paragraph::new(Span::styled("loading…", Style::default().fg(t.subtext))),
            inner,
        );
        return;
    }
    if let Some(error) = &app.detail.error {
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(format!("error: {error}"), Style::default().fg(t.red))),
                Line::from(Span::styled("Esc to close", Style::default().fg(t.subtext))),
            ]),
            inner,
        );
        return;
    }
    let Some(record) = &app.detail.record else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Enter opens the highlighted record",
                Style::default().fg(t.subtext),
            )),
            inner,
        );
        return;
    };

    let mut lines = vec![Line::from(Span::styled(
        record.title.clone(),
        Style::default().fg(t.text).add_modifier(Modifier::BOLD),
    ))];
    if !record.status.is_empty() {
        let color = match record.status.as_str() {
            "Funded" => t.green,
            "NotFunded" => t.red,
            _ => t.yellow,
        };
        lines.push(Line::from(Span::styled(record.status.clone(), Style::default().fg(color))));
    }
    let mut context = String::new();
    if !record.fund.is_empty() {
        context.push_str(&record.fund);
    }
    if !record.campaign.is_empty() {
        if !context.is_empty() {
            context.push_str(" / ");
        }
        context.push_str(&record.campaign);
    }
    if !context.is_empty() {
        lines.push(Line::from(Span::styled(context, Style::default().fg(t.subtext))));
    }
    if !record.date.is_empty() {
        lines.push(Line::from(Span::styled(record.date.clone(), Style::default().fg(t.subtext))));
    }
    lines.push(Line::default());
    if !record.description.is_empty() {
        lines.push(Line::from(Span::styled(
            record.description.clone(),
            Style::default().fg(t.text),
        )));
        lines.push(Line::default());
    }
    for (label, value) in &record.extra {
        lines.push(Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(t.accent)),
            Span::styled(value.clone(), Style::default().fg(t.text)),
        ]));
    }
    if !record.campaigns.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Campaigns",
            Style::default().fg(t.heading),
        )));
        for (i, (_, name)) in record.campaigns.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("{}. ", i + 1), Style::default().fg(t.accent)),
                Span::styled(name.clone(), Style::default().fg(t.text)),
            ]));
        }
        lines.push(Line::from(Span::styled(
            "press a digit to browse that campaign's projects",
            Style::default().fg(t.subtext),
        )));
    }
    if !record.website.is_empty() {
        lines.push(Line::from(Span::styled(
            record.website.clone(),
            Style::default().fg(t.accent),
        )));
    }
    lines.push(Line::from(Span::styled(
        record.link.clone(),
        Style::default().fg(t.subtext),
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
