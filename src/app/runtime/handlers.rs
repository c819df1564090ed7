//! Event-loop message handlers: apply worker responses to state and forward
//! the fetch effects produced by key handlers.

use tokio::sync::mpsc;

use crate::events::Effect;
use crate::state::AppState;
use crate::state::types::{DetailOutcome, DetailQuery, PageOutcome, PageQuery};

/// What: Forward fetch effects to the workers.
pub fn dispatch_effects(
    effects: Vec<Effect>,
    page_req_tx: &mpsc::UnboundedSender<PageQuery>,
    detail_req_tx: &mpsc::UnboundedSender<DetailQuery>,
) {
    for effect in effects {
        match effect {
            Effect::Page(query) => {
                let _ = page_req_tx.send(query);
            }
            Effect::Detail(query) => {
                let _ = detail_req_tx.send(query);
            }
        }
    }
}

/// What: Apply a page response, clamping the selection to the new rows.
pub fn handle_page_outcome(app: &mut AppState, outcome: PageOutcome) {
    if !app.binding.accept(outcome) {
        return;
    }
    if let Some(page) = &app.binding.data {
        app.selected = app.selected.min(page.items.len().saturating_sub(1));
    }
}

/// What: Apply a detail response and remember successful records.
pub fn handle_detail_outcome(app: &mut AppState, outcome: DetailOutcome) {
    let target = app.detail.target;
    if !app.detail.accept(outcome) {
        return;
    }
    if let (Some(key), Some(record)) = (target, app.detail.record.clone()) {
        app.detail_cache.put(key, record);
    }
}

/// What: Install the fund listing used by the filter menu.
pub fn handle_fund_choices(app: &mut AppState, choices: Vec<(u64, String)>) {
    tracing::debug!(count = choices.len(), "fund choices loaded");
    app.fund_choices = choices;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::params::View;
    use crate::state::types::{DetailRecord, Page, Row};

    /// What: Applied pages clamp the selection; stale pages change nothing
    ///
    /// - Input: Selection past the end of a freshly applied page
    /// - Output: Selection clamped to the last row
    #[test]
    fn handlers_page_outcome_clamps_selection() {
        let mut app = AppState::default();
        app.selected = 9;
        let query = app
            .binding
            .request(View::Projects, &app.list.state(&app.location), None)
            .expect("query");
        handle_page_outcome(
            &mut app,
            PageOutcome {
                id: query.id,
                key: query.key,
                result: Ok(Page {
                    items: vec![Row::default(), Row::default()],
                    total_items: 2,
                    total_pages: 1,
                    page: 1,
                }),
            },
        );
        assert_eq!(app.selected, 1);
    }

    /// What: Successful detail responses land in the cache
    ///
    /// - Input: Open a record, apply its response
    /// - Output: Cache holds the record under (view, id)
    #[test]
    fn handlers_detail_outcome_caches() {
        let mut app = AppState::default();
        let query = app.detail.open(View::Projects, 7);
        handle_detail_outcome(
            &mut app,
            DetailOutcome {
                id: query.id,
                result: Ok(DetailRecord {
                    id: 7,
                    title: "Seven".into(),
                    ..DetailRecord::default()
                }),
            },
        );
        assert_eq!(
            app.detail_cache
                .get(&(View::Projects, 7))
                .map(|r| r.title.as_str()),
            Some("Seven")
        );
    }
}
