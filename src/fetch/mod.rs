//! Paginated fetch binding: request keys, in-flight de-duplication, and
//! stale-response discard.
//!
//! The binding never touches the network itself. It hands out correlation
//! ids with each [`PageQuery`] / [`DetailQuery`] and applies only the
//! response whose id matches the latest issued one, so a slow earlier
//! response can never overwrite a newer, faster one. Cancellation is
//! logical: superseded responses are discarded on arrival, not aborted.

use crate::query::params::{QueryState, View};
use crate::query::to_api_params;
use crate::state::types::{DetailOutcome, DetailQuery, DetailRecord, Page, PageOutcome, PageQuery, Row};

/// What: Canonical request key for a list page.
///
/// Inputs:
/// - `view`: The list view (selects endpoint path and backend param names).
/// - `state`: Applied query state.
/// - `campaign`: Optional parent campaign scope.
///
/// Output:
/// - Deterministic `path?params` string; equal logical states always yield
///   byte-equal keys, which is what de-duplication and stale discard key on.
#[must_use]
pub fn request_key(view: View, state: &QueryState, campaign: Option<u64>) -> String {
    let mut params = to_api_params(state, view.options());
    if let Some(c) = campaign {
        params.set("campaign_id", c.to_string());
    }
    format!("{}?{}", view.path(), params.to_query_string())
}

/// Fetch state for one list view: the latest page, its loading flag, and the
/// last transport error (stale-while-error keeps previous data visible).
#[derive(Debug, Default)]
pub struct PageBinding {
    /// Next request id to allocate.
    next_id: u64,
    /// Id of the most recently issued request; only its response is applied.
    latest_id: u64,
    /// Key currently in flight, for de-duplication.
    in_flight: Option<String>,
    /// Key of the last applied or issued request (what `retry` re-issues).
    last_key: Option<String>,
    /// Most recent successful page; retained across errors.
    pub data: Option<Page<Row>>,
    /// Whether a request is outstanding.
    pub loading: bool,
    /// Human-readable transport error, cleared on the next success.
    pub error: Option<String>,
}

impl PageBinding {
    /// Fresh binding with no data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Issue a request for the given state, unless the identical key is
    /// already in flight.
    ///
    /// Output:
    /// - `Some(PageQuery)` to send to the fetch worker, or `None` when an
    ///   equal request is outstanding (de-duplication).
    pub fn request(
        &mut self,
        view: View,
        state: &QueryState,
        campaign: Option<u64>,
    ) -> Option<PageQuery> {
        let key = request_key(view, state, campaign);
        if self.loading && self.in_flight.as_deref() == Some(key.as_str()) {
            return None;
        }
        self.next_id += 1;
        self.latest_id = self.next_id;
        self.in_flight = Some(key.clone());
        self.last_key = Some(key.clone());
        self.loading = true;
        Some(PageQuery {
            id: self.latest_id,
            view,
            state: state.clone(),
            campaign,
            key,
        })
    }

    /// What: Re-issue the last request after a failure.
    ///
    /// Details:
    /// - Same key, fresh id; bypasses de-duplication so a hung request can
    ///   be superseded.
    pub fn retry(
        &mut self,
        view: View,
        state: &QueryState,
        campaign: Option<u64>,
    ) -> Option<PageQuery> {
        self.in_flight = None;
        self.loading = false;
        self.request(view, state, campaign)
    }

    /// What: Apply a worker response if it is still current.
    ///
    /// Output:
    /// - `true` when the outcome was applied; `false` when discarded as
    ///   stale (its id no longer matches the latest issued request).
    pub fn accept(&mut self, outcome: PageOutcome) -> bool {
        if outcome.id != self.latest_id {
            tracing::debug!(id = outcome.id, latest = self.latest_id, "discarding stale page");
            return false;
        }
        self.loading = false;
        self.in_flight = None;
        match outcome.result {
            Ok(page) => {
                self.data = Some(page);
                self.error = None;
            }
            Err(msg) => {
                // keep previous data visible alongside the error
                self.error = Some(msg);
            }
        }
        true
    }

    /// Key of the last issued request, when any.
    #[must_use]
    pub fn last_key(&self) -> Option<&str> {
        self.last_key.as_deref()
    }
}

/// Fetch state for a single-resource detail pane, correlated the same way
/// as [`PageBinding`].
#[derive(Debug, Default)]
pub struct DetailBinding {
    /// Next request id to allocate.
    next_id: u64,
    /// Id of the most recently issued request.
    latest_id: u64,
    /// The record the pane is currently showing or loading.
    pub target: Option<(View, u64)>,
    /// Loaded record.
    pub record: Option<DetailRecord>,
    /// Whether a request is outstanding.
    pub loading: bool,
    /// Transport error, if the last request failed.
    pub error: Option<String>,
}

impl DetailBinding {
    /// Fresh binding with no target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Open a detail target, issuing a correlated request.
    pub fn open(&mut self, view: View, record_id: u64) -> DetailQuery {
        self.next_id += 1;
        self.latest_id = self.next_id;
        self.target = Some((view, record_id));
        self.record = None;
        self.error = None;
        self.loading = true;
        DetailQuery {
            id: self.latest_id,
            view,
            record_id,
        }
    }

    /// What: Show an already-cached record without any request.
    pub fn open_cached(&mut self, view: View, record_id: u64, record: DetailRecord) {
        // Invalidate any in-flight request for a previous target.
        self.next_id += 1;
        self.latest_id = self.next_id;
        self.target = Some((view, record_id));
        self.record = Some(record);
        self.error = None;
        self.loading = false;
    }

    /// What: Close the pane, logically cancelling any outstanding request.
    pub fn close(&mut self) {
        self.next_id += 1;
        self.latest_id = self.next_id;
        self.target = None;
        self.record = None;
        self.error = None;
        self.loading = false;
    }

    /// What: Apply a worker response if still current; stale ids discard.
    pub fn accept(&mut self, outcome: DetailOutcome) -> bool {
        if outcome.id != self.latest_id {
            return false;
        }
        self.loading = false;
        match outcome.result {
            Ok(record) => {
                self.record = Some(record);
                self.error = None;
            }
            Err(msg) => self.error = Some(msg),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::codec::{RawParams, decode};
    use crate::query::params::View;

    fn state(qs: &str) -> QueryState {
        decode(&RawParams::from_query_string(qs), View::Projects.options())
    }

    fn page(n: u32) -> Page<Row> {
        Page {
            items: vec![Row {
                id: u64::from(n),
                title: format!("project {n}"),
                ..Row::default()
            }],
            total_items: 40,
            total_pages: 4,
            page: n,
        }
    }

    /// What: Request keys are pure and include scope and filters
    ///
    /// - Input: Equal states, differing states, a campaign scope
    /// - Output: Equal keys iff equal inputs
    #[test]
    fn fetch_request_key_determinism() {
        let a = request_key(View::Projects, &state("page=2&search=sun"), None);
        let b = request_key(View::Projects, &state("search=sun&page=2"), None);
        assert_eq!(a, b);
        assert_ne!(a, request_key(View::Projects, &state("page=3&search=sun"), None));
        assert_ne!(a, request_key(View::Projects, &state("page=2&search=sun"), Some(9)));
        assert!(a.starts_with("projects?"));
    }

    /// What: An identical in-flight key is not re-issued
    ///
    /// - Input: Two requests for the same state back to back
    /// - Output: Second returns `None`; a different state issues again
    #[test]
    fn fetch_deduplicates_in_flight() {
        let mut b = PageBinding::new();
        let st = state("page=1");
        assert!(b.request(View::Projects, &st, None).is_some());
        assert!(b.request(View::Projects, &st, None).is_none());
        assert!(b.request(View::Projects, &state("page=2"), None).is_some());
    }

    /// What: Only the latest response is applied (rapid pagination race)
    ///
    /// - Input: Request page 1 then page 2; page 1's response arrives last
    /// - Output: Page 2's data wins; page 1's late response is discarded
    #[test]
    fn fetch_stale_response_discard() {
        let mut b = PageBinding::new();
        let q1 = b.request(View::Projects, &state("page=1"), None).expect("q1");
        let q2 = b.request(View::Projects, &state("page=2"), None).expect("q2");

        // fast page-2 response lands first and is applied
        assert!(b.accept(PageOutcome {
            id: q2.id,
            key: q2.key.clone(),
            result: Ok(page(2)),
        }));
        assert_eq!(b.data.as_ref().map(|p| p.page), Some(2));
        assert!(!b.loading);

        // slow page-1 response arrives afterwards and is dropped
        assert!(!b.accept(PageOutcome {
            id: q1.id,
            key: q1.key,
            result: Ok(page(1)),
        }));
        assert_eq!(b.data.as_ref().map(|p| p.page), Some(2));
    }

    /// What: Errors keep previous data and retry re-issues the same key
    ///
    /// - Input: Success, then a failing request, then retry
    /// - Output: Stale-while-error data retained; retry key equals failed key
    #[test]
    fn fetch_stale_while_error_and_retry() {
        let mut b = PageBinding::new();
        let st1 = state("page=1");
        let q1 = b.request(View::Projects, &st1, None).expect("q1");
        assert!(b.accept(PageOutcome {
            id: q1.id,
            key: q1.key,
            result: Ok(page(1)),
        }));

        let st2 = state("page=2");
        let q2 = b.request(View::Projects, &st2, None).expect("q2");
        assert!(b.accept(PageOutcome {
            id: q2.id,
            key: q2.key.clone(),
            result: Err("connection refused".into()),
        }));
        assert_eq!(b.error.as_deref(), Some("connection refused"));
        assert_eq!(b.data.as_ref().map(|p| p.page), Some(1));
        assert!(!b.loading);

        let rq = b.retry(View::Projects, &st2, None).expect("retry");
        assert_eq!(rq.key, q2.key);
        assert!(rq.id > q2.id);
    }

    /// What: Detail binding discards responses for closed/superseded targets
    ///
    /// - Input: Open detail A, then open detail B; A's response arrives late
    /// - Output: A discarded, B applied; close cancels logically
    #[test]
    fn fetch_detail_discard_and_close() {
        let mut d = DetailBinding::new();
        let qa = d.open(View::Projects, 10);
        let qb = d.open(View::Projects, 11);

        assert!(!d.accept(DetailOutcome {
            id: qa.id,
            result: Ok(DetailRecord {
                id: 10,
                ..DetailRecord::default()
            }),
        }));
        assert!(d.accept(DetailOutcome {
            id: qb.id,
            result: Ok(DetailRecord {
                id: 11,
                ..DetailRecord::default()
            }),
        }));
        assert_eq!(d.record.as_ref().map(|r| r.id), Some(11));

        let qc = d.open(View::Projects, 12);
        d.close();
        assert!(!d.accept(DetailOutcome {
            id: qc.id,
            result: Ok(DetailRecord::default()),
        }));
        assert!(d.record.is_none());
    }
}
