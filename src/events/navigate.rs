//! Results-pane key handling: selection, pagination, view switching,
//! history, detail opening, and the clear-all shortcut.

use crossterm::event::{KeyCode, KeyEvent};

use crate::events::{Effect, open_help, refresh};
use crate::query::codec::RawParams;
use crate::query::params::View;
use crate::state::types::Focus;
use crate::state::{AppState, Modal};

/// Number of rows currently listed.
fn row_count(app: &AppState) -> usize {
    app.binding.data.as_ref().map_or(0, |p| p.items.len())
}

/// Move the highlighted row by `delta`, clamped to the listed rows.
fn move_selection(app: &mut AppState, delta: i64) {
    let rows = row_count(app);
    if rows == 0 {
        return;
    }
    let max = rows - 1;
    let next = i64::try_from(app.selected).unwrap_or(0) + delta;
    app.selected = usize::try_from(next.clamp(0, i64::try_from(max).unwrap_or(0))).unwrap_or(0);
}

/// What: Open the detail pane for the highlighted row, serving from the
/// cache when possible.
fn open_detail(app: &mut AppState) -> Option<Effect> {
    let row = app
        .binding
        .data
        .as_ref()
        .and_then(|p| p.items.get(app.selected))?;
    let view = app.view();
    let id = row.id;
    if let Some(record) = app.detail_cache.get(&(view, id)).cloned() {
        app.detail.open_cached(view, id, record);
        return None;
    }
    Some(Effect::Detail(app.detail.open(view, id)))
}

/// Step to an adjacent page when one exists.
fn change_page(app: &mut AppState, forward: bool) -> Option<Effect> {
    let state = app.list.state(&app.location);
    let next = if forward {
        let total = app.binding.data.as_ref().map_or(u32::MAX, |p| p.total_pages);
        if state.page >= total {
            return None;
        }
        state.page + 1
    } else {
        if state.page <= 1 {
            return None;
        }
        state.page - 1
    };
    app.list.change_page(next, &mut app.location);
    app.selected = 0;
    refresh(app)
}

/// Switch to `visit`ing the next view in the cycle with a fresh query.
fn cycle_view(app: &mut AppState) -> Option<Effect> {
    let next = app.view().next();
    app.location.visit(next, RawParams::new());
    app.remount_list();
    refresh(app)
}

/// What: Jump into the project list of the `index`-th campaign (1-based)
/// shown in an open fund detail.
///
/// Details:
/// - The scope travels as the location's `campaign` param, so history
///   navigation restores it like any other query state.
fn drill_into_campaign(app: &mut AppState, index: usize) -> Option<Effect> {
    let campaign_id = {
        let record = app.detail.record.as_ref()?;
        record.campaigns.get(index.checked_sub(1)?)?.0
    };
    let mut params = RawParams::new();
    params.set("campaign", campaign_id.to_string());
    app.detail.close();
    app.location.visit(View::Projects, params);
    app.remount_list();
    refresh(app)
}

/// Walk history one step and resync everything derived from the location.
fn walk_history(app: &mut AppState, back: bool) -> Option<Effect> {
    let moved = if back {
        app.location.back()
    } else {
        app.location.forward()
    };
    if !moved {
        return None;
    }
    app.remount_list();
    refresh(app)
}

/// What: Handle a key press while the results list has focus.
pub fn handle_key(app: &mut AppState, key: &KeyEvent) -> Vec<Effect> {
    let effect = match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            None
        }
        KeyCode::Char('/') if app.list.options().supports_search => {
            app.focus = Focus::Search;
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            move_selection(app, -1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            move_selection(app, 1);
            None
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.selected = 0;
            None
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.selected = row_count(app).saturating_sub(1);
            None
        }
        KeyCode::Enter => open_detail(app),
        KeyCode::Esc => {
            app.detail.close();
            None
        }
        KeyCode::Right | KeyCode::Char('n') => change_page(app, true),
        KeyCode::Left | KeyCode::Char('p') => change_page(app, false),
        KeyCode::Char('f') => {
            app.modal = Modal::Filters { cursor: 0 };
            None
        }
        KeyCode::Char('s') => {
            app.modal = Modal::Sort { cursor: 0 };
            None
        }
        KeyCode::Char('c') => {
            app.list.clear_all(&mut app.location);
            app.input.clear();
            app.caret = 0;
            app.selected = 0;
            refresh(app)
        }
        KeyCode::Char('r') => {
            let view = app.view();
            let state = app.list.state(&app.location);
            app.binding
                .retry(view, &state, app.campaign_scope)
                .map(Effect::Page)
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c
                .to_digit(10)
                .and_then(|d| usize::try_from(d).ok())
                .unwrap_or(0);
            drill_into_campaign(app, index)
        }
        KeyCode::Tab | KeyCode::Char('t') => cycle_view(app),
        KeyCode::Char('[') => walk_history(app, true),
        KeyCode::Char(']') => walk_history(app, false),
        KeyCode::Char('?') => {
            open_help(app);
            None
        }
        _ => None,
    };
    effect.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::tests::press;
    use crate::query::location::LocationPort;
    use crate::state::types::{Page, Row};

    fn app_with_page(page: u32, total_pages: u32) -> AppState {
        let mut app = AppState::default();
        if page > 1 {
            app.list.change_page(page, &mut app.location);
        }
        app.binding.data = Some(Page {
            items: (0..3)
                .map(|i| Row {
                    id: i + 1,
                    ..Row::default()
                })
                .collect(),
            total_items: u64::from(total_pages) * 3,
            total_pages,
            page,
        });
        app
    }

    /// What: Pagination keys step within server-reported bounds
    ///
    /// - Input: Page 2 of 3, next then prev; prev at page 1
    /// - Output: Effects issued inside bounds, none outside
    #[test]
    fn navigate_page_bounds() {
        let mut app = app_with_page(2, 3);
        assert_eq!(handle_key(&mut app, &press(KeyCode::Char('n'))).len(), 1);
        assert_eq!(app.list.state(&app.location).page, 3);
        assert!(handle_key(&mut app, &press(KeyCode::Char('n'))).is_empty());

        let mut app = app_with_page(1, 3);
        assert!(handle_key(&mut app, &press(KeyCode::Char('p'))).is_empty());
        assert_eq!(app.list.state(&app.location).page, 1);
    }

    /// What: Clear-all wipes filters, buffer, and selection in one write
    ///
    /// - Input: Filters + typed buffer, then 'c'
    /// - Output: One history entry, empty buffer, fetch issued
    #[test]
    fn navigate_clear_all() {
        let mut app = app_with_page(1, 1);
        app.list.submit_search("dao", &mut app.location);
        app.input = "dao".into();
        let before = app.location.history_len();

        let effects = handle_key(&mut app, &press(KeyCode::Char('c')));
        assert!(matches!(effects.as_slice(), [Effect::Page(_)]));
        assert_eq!(app.location.history_len(), before + 1);
        assert!(app.input.is_empty());
        assert!(app.list.state(&app.location).search.is_empty());
    }

    /// What: History keys remount the list and re-fetch
    ///
    /// - Input: Two searches, then '[' back
    /// - Output: Previous search restored in buffer and state
    #[test]
    fn navigate_history_back() {
        let mut app = app_with_page(1, 1);
        app.list.submit_search("first", &mut app.location);
        app.list.submit_search("second", &mut app.location);

        let effects = handle_key(&mut app, &press(KeyCode::Char('[')));
        assert_eq!(effects.len(), 1);
        assert_eq!(app.list.state(&app.location).search, "first");
        assert_eq!(app.input, "first");
    }

    /// What: Opening a cached detail issues no fetch
    ///
    /// - Input: Record in the cache, Enter on its row
    /// - Output: Detail shown immediately, no effect
    #[test]
    fn navigate_detail_cache_hit() {
        let mut app = app_with_page(1, 1);
        app.detail_cache.put(
            (app.view(), 1),
            crate::state::types::DetailRecord {
                id: 1,
                ..Default::default()
            },
        );
        let effects = handle_key(&mut app, &press(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(app.detail.record.as_ref().map(|r| r.id), Some(1));
        assert!(!app.detail.loading);

        // uncached row does fetch
        handle_key(&mut app, &press(KeyCode::Char('j')));
        let effects = handle_key(&mut app, &press(KeyCode::Enter));
        assert!(matches!(effects.as_slice(), [Effect::Detail(_)]));
    }

    /// What: Digit keys drill from a fund detail into a campaign's projects
    ///
    /// - Input: Fund detail with two campaigns open, press '2'; then '['
    /// - Output: Projects view scoped to that campaign; back restores funds
    #[test]
    fn navigate_campaign_drilldown() {
        let mut app = AppState::default();
        app.location.visit(View::Funds, RawParams::new());
        app.remount_list();
        app.detail.open_cached(
            View::Funds,
            1,
            crate::state::types::DetailRecord {
                id: 1,
                campaigns: vec![(5, "Round A".into()), (7, "Round B".into())],
                ..Default::default()
            },
        );

        let effects = handle_key(&mut app, &press(KeyCode::Char('2')));
        assert!(matches!(effects.as_slice(), [Effect::Page(q)] if q.campaign == Some(7)));
        assert_eq!(app.view(), View::Projects);
        assert_eq!(app.campaign_scope, Some(7));
        assert!(app.detail.record.is_none());

        // digits past the campaign list are a no-op
        app.detail.open_cached(
            View::Funds,
            1,
            crate::state::types::DetailRecord {
                id: 1,
                campaigns: vec![(5, "Round A".into())],
                ..Default::default()
            },
        );
        assert!(handle_key(&mut app, &press(KeyCode::Char('9'))).is_empty());

        app.detail.close();
        assert_eq!(handle_key(&mut app, &press(KeyCode::Char('['))).len(), 1);
        assert_eq!(app.view(), View::Funds);
        assert_eq!(app.campaign_scope, None);
    }

    /// What: View cycling visits a fresh query and remounts
    ///
    /// - Input: Tab from projects
    /// - Output: Ideas view, empty params, fetch issued
    #[test]
    fn navigate_view_cycle() {
        let mut app = app_with_page(1, 1);
        app.list.submit_search("dao", &mut app.location);
        let effects = handle_key(&mut app, &press(KeyCode::Tab));
        assert_eq!(effects.len(), 1);
        assert_eq!(app.view(), crate::query::params::View::Ideas);
        assert!(app.location.params().is_empty());
        assert!(app.input.is_empty());
    }
}
