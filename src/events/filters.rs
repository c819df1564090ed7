//! Modal key handling: the filter menu, the sort menu, help, and alerts.
//!
//! The filter menu edits only the pending selection. Nothing reaches the
//! location until Enter commits the whole selection in one write; Esc
//! discards every pending edit at once.

use crossterm::event::{KeyCode, KeyEvent};

use crate::events::{Effect, refresh};
use crate::state::{AppState, Modal};

/// Number of rows in the filter menu: one per status, one per known fund.
fn filter_rows(app: &AppState) -> usize {
    app.list.options().statuses.len() + app.fund_choices.len()
}

/// What: Handle a key press while a modal overlay is open.
pub fn handle_modal_key(app: &mut AppState, key: &KeyEvent) -> Vec<Effect> {
    match app.modal {
        Modal::Filters { cursor } => filter_menu_key(app, cursor, key),
        Modal::Sort { cursor } => sort_menu_key(app, cursor, key),
        // help and alerts dismiss on any key
        Modal::Help | Modal::Alert { .. } => {
            app.modal = Modal::None;
            Vec::new()
        }
        Modal::None => Vec::new(),
    }
}

/// Filter menu: move, toggle, apply, reset, discard.
fn filter_menu_key(app: &mut AppState, cursor: usize, key: &KeyEvent) -> Vec<Effect> {
    let rows = filter_rows(app);
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.modal = Modal::Filters {
                cursor: cursor.saturating_sub(1),
            };
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.modal = Modal::Filters {
                cursor: (cursor + 1).min(rows.saturating_sub(1)),
            };
        }
        KeyCode::Char(' ') => toggle_row(app, cursor),
        KeyCode::Enter => {
            app.list.apply_filters(&mut app.location);
            app.modal = Modal::None;
            app.selected = 0;
            return refresh(app).into_iter().collect();
        }
        KeyCode::Char('r') => app.list.reset_pending(&app.location),
        KeyCode::Esc => {
            app.list.reset_pending(&app.location);
            app.modal = Modal::None;
        }
        _ => {}
    }
    Vec::new()
}

/// Toggle the row under the cursor: status rows select, fund rows toggle.
fn toggle_row(app: &mut AppState, cursor: usize) {
    let statuses = app.list.options().statuses;
    if cursor < statuses.len() {
        app.list.edit_status(statuses[cursor]);
    } else if let Some((id, _)) = app.fund_choices.get(cursor - statuses.len()) {
        app.list.toggle_id(*id);
    }
}

/// Sort menu: move, pick a field (applies immediately), dismiss.
fn sort_menu_key(app: &mut AppState, cursor: usize, key: &KeyEvent) -> Vec<Effect> {
    let fields = app.list.options().sort_fields;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.modal = Modal::Sort {
                cursor: cursor.saturating_sub(1),
            };
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.modal = Modal::Sort {
                cursor: (cursor + 1).min(fields.len().saturating_sub(1)),
            };
        }
        KeyCode::Enter => {
            if let Some(field) = fields.get(cursor) {
                app.list.change_sort(field.value, &mut app.location);
                app.selected = 0;
            }
            app.modal = Modal::None;
            return refresh(app).into_iter().collect();
        }
        KeyCode::Esc => app.modal = Modal::None,
        _ => {}
    }
    Vec::new()
}
