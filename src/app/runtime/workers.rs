//! Background workers: the blocking terminal reader thread and the async
//! fetch workers.
//!
//! Fetch workers spawn one task per request and echo the request's
//! correlation id back with the result. Responses can therefore arrive out
//! of order; the bindings on the event-loop side discard whatever is stale.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::query::codec::{RawParams, decode};
use crate::query::params::View;
use crate::sources;
use crate::state::types::{DetailOutcome, DetailQuery, PageOutcome, PageQuery};

/// What: Spawn the worker resolving list-page requests.
pub fn spawn_page_worker(
    base_url: String,
    mut req_rx: mpsc::UnboundedReceiver<PageQuery>,
    res_tx: mpsc::UnboundedSender<PageOutcome>,
) {
    tokio::spawn(async move {
        while let Some(query) = req_rx.recv().await {
            let base = base_url.clone();
            let tx = res_tx.clone();
            tokio::spawn(async move {
                let result = sources::fetch_page(&base, &query)
                    .await
                    .map_err(|e| e.to_string());
                if let Err(ref msg) = result {
                    tracing::warn!(key = %query.key, error = %msg, "page fetch failed");
                }
                let _ = tx.send(PageOutcome {
                    id: query.id,
                    key: query.key,
                    result,
                });
            });
        }
    });
}

/// What: Spawn the worker resolving detail requests.
pub fn spawn_detail_worker(
    base_url: String,
    mut req_rx: mpsc::UnboundedReceiver<DetailQuery>,
    res_tx: mpsc::UnboundedSender<DetailOutcome>,
) {
    tokio::spawn(async move {
        while let Some(query) = req_rx.recv().await {
            let base = base_url.clone();
            let tx = res_tx.clone();
            tokio::spawn(async move {
                let result = sources::fetch_detail(&base, query.view, query.record_id)
                    .await
                    .map_err(|e| e.to_string());
                if let Err(ref msg) = result {
                    tracing::warn!(id = query.record_id, error = %msg, "detail fetch failed");
                }
                let _ = tx.send(DetailOutcome {
                    id: query.id,
                    result,
                });
            });
        }
    });
}

/// What: Spawn the one-shot task listing funds for the filter menu.
///
/// Details:
/// - Failure is non-fatal: the menu simply offers no fund rows.
pub fn spawn_fund_seed(base_url: String, funds_tx: mpsc::UnboundedSender<Vec<(u64, String)>>) {
    tokio::spawn(async move {
        let opts = View::Funds.options();
        let state = decode(&RawParams::from_query_string("limit=100"), opts);
        let key = crate::fetch::request_key(View::Funds, &state, None);
        let query = PageQuery {
            id: 0,
            view: View::Funds,
            state,
            campaign: None,
            key,
        };
        match sources::fetch_page(&base_url, &query).await {
            Ok(page) => {
                let choices = page
                    .items
                    .into_iter()
                    .map(|row| (row.id, row.title))
                    .collect();
                let _ = funds_tx.send(choices);
            }
            Err(e) => tracing::warn!(error = %e, "fund listing unavailable"),
        }
    });
}

/// What: Spawn the blocking thread reading terminal events.
///
/// Details:
/// - Polls with a 50ms timeout so the cancellation flag is honored promptly
///   and the thread never blocks past shutdown.
pub fn spawn_event_thread(
    headless: bool,
    event_tx: mpsc::UnboundedSender<CEvent>,
    cancelled: Arc<AtomicBool>,
) {
    if headless {
        return;
    }
    std::thread::spawn(move || {
        loop {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            match crossterm::event::poll(std::time::Duration::from_millis(50)) {
                Ok(true) => match crossterm::event::read() {
                    Ok(ev) => {
                        if cancelled.load(Ordering::Relaxed) || event_tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        // transient read errors are ignored
                    }
                },
                Ok(false) => {}
                Err(_) => break,
            }
        }
    });
}
