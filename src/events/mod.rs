//! Keyboard and terminal event handling.
//!
//! Handlers mutate [`AppState`] and return [`Effect`]s describing the fetch
//! work the runtime must dispatch to background workers. They never perform
//! I/O themselves, which keeps every key binding unit-testable.

use crossterm::event::{Event, KeyEvent, KeyEventKind};

use crate::state::types::{DetailQuery, Focus, PageQuery};
use crate::state::{AppState, Modal};

pub mod filters;
pub mod navigate;
pub mod search;

/// Fetch work produced by an event handler.
#[derive(Debug)]
pub enum Effect {
    /// Request a list page.
    Page(PageQuery),
    /// Request a detail record.
    Detail(DetailQuery),
}

/// What: Request the page for the current applied state, deduplicated
/// against an identical in-flight request.
pub fn refresh(app: &mut AppState) -> Option<Effect> {
    let view = app.view();
    let state = app.list.state(&app.location);
    app.binding
        .request(view, &state, app.campaign_scope)
        .map(Effect::Page)
}

/// What: Route one terminal event to the focused handler.
///
/// Details:
/// - Focus regain re-fetches the current page on views that opt in, so a
///   stale list refreshes when the user returns to the terminal.
pub fn handle_event(app: &mut AppState, event: &Event) -> Vec<Effect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::FocusGained
            if app.settings.revalidate_lists_on_focus && app.list.options().revalidate_on_focus =>
        {
            refresh(app).into_iter().collect()
        }
        _ => Vec::new(),
    }
}

/// What: Route one key press: modal first, then the focused pane.
pub fn handle_key(app: &mut AppState, key: &KeyEvent) -> Vec<Effect> {
    if key.kind != KeyEventKind::Press {
        return Vec::new();
    }
    if app.modal.is_open() {
        return filters::handle_modal_key(app, key);
    }
    match app.focus {
        Focus::Search => search::handle_key(app, key),
        Focus::Results => navigate::handle_key(app, key),
    }
}

/// Open the help overlay.
pub fn open_help(app: &mut AppState) {
    app.modal = Modal::Help;
}
