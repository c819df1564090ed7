//! Core value types shared by the query, fetch, UI, and event layers.

use crate::query::params::{QueryState, View};

/// One fetched page of display records plus the server-reported totals.
///
/// Totals and page counts are echoed from the backend envelope, never
/// recomputed client-side.
#[derive(Debug, Clone, Default)]
pub struct Page<T> {
    /// Display records in server order.
    pub items: Vec<T>,
    /// Total matching records across all pages.
    pub total_items: u64,
    /// Total page count.
    pub total_pages: u32,
    /// The page number the server actually returned.
    pub page: u32,
}

/// Display-ready summary of one catalog record, produced by the
/// presentation mapper. Compact enough for list rows in any view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// Backend identifier.
    pub id: u64,
    /// Primary line (project/idea title, fund name, ...).
    pub title: String,
    /// Secondary line (campaign / fund context, rank, ...).
    pub subtitle: String,
    /// Sanitized, truncated description.
    pub description: String,
    /// Submitter display name ("Anonymous" when absent).
    pub submitter: String,
    /// Formatted date ("Unknown date" when absent).
    pub date: String,
    /// Short status/score/kudos marker rendered on the right.
    pub badge: String,
    /// Canonical detail-page link, e.g. `/projects/42`.
    pub link: String,
}

/// Full record for the detail pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailRecord {
    /// Backend identifier.
    pub id: u64,
    /// Title line.
    pub title: String,
    /// Sanitized long description.
    pub description: String,
    /// Owning fund name.
    pub fund: String,
    /// Owning campaign name.
    pub campaign: String,
    /// Status display string.
    pub status: String,
    /// Upstream website, may be empty.
    pub website: String,
    /// Formatted creation date.
    pub date: String,
    /// Canonical link of the record.
    pub link: String,
    /// Additional labeled lines (funding figures, metrics, team).
    pub extra: Vec<(String, String)>,
    /// Campaigns under a fund as (id, name), offered for drill-down.
    pub campaigns: Vec<(u64, String)>,
}

/// A list-page request sent to the background fetch worker.
///
/// The `id` is monotonic and lets the binding discard stale responses.
#[derive(Debug, Clone)]
pub struct PageQuery {
    /// Correlation id allocated by the binding.
    pub id: u64,
    /// Which view's endpoint to hit.
    pub view: View,
    /// Applied query state to serialize into the request.
    pub state: QueryState,
    /// Optional parent campaign scope.
    pub campaign: Option<u64>,
    /// Canonical request key (also the cache key).
    pub key: String,
}

/// Worker response corresponding to a prior [`PageQuery`].
#[derive(Debug)]
pub struct PageOutcome {
    /// Echoed correlation id.
    pub id: u64,
    /// Echoed request key.
    pub key: String,
    /// The fetched page, or a human-readable transport error.
    pub result: Result<Page<Row>, String>,
}

/// A detail-record request sent to the background fetch worker.
#[derive(Debug, Clone, Copy)]
pub struct DetailQuery {
    /// Correlation id allocated by the binding.
    pub id: u64,
    /// View that owns the record (selects the collection path).
    pub view: View,
    /// Record identifier.
    pub record_id: u64,
}

/// Worker response corresponding to a prior [`DetailQuery`].
#[derive(Debug)]
pub struct DetailOutcome {
    /// Echoed correlation id.
    pub id: u64,
    /// The fetched record, or a human-readable transport error.
    pub result: Result<DetailRecord, String>,
}

/// Which pane currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Search input at the top of the list pane.
    Search,
    /// Results list.
    Results,
}
