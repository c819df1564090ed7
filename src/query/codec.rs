//! Bidirectional mapping between [`QueryState`] and the location's raw query
//! parameters.
//!
//! `decode` is total: malformed or out-of-range input falls back to the
//! view's defaults and never errors. `encode` owns the omission rules (empty
//! search, the `all` sentinel, empty ID sets are deleted, not written) and
//! the page-reset side effect: when a reset-triggering field actually changes
//! value, `page` is forced back to `1` regardless of what the patch said.

use std::collections::{BTreeMap, BTreeSet};

use crate::query::params::{QueryState, STATUS_ALL, SortDirection, ViewOptions};
use crate::util::{percent_decode, percent_encode};

/// Query-string keys whose value change forces `page` back to 1.
pub const RESET_KEYS: &[&str] = &["search", "status", "ids", "order_by", "order_dir"];

/// Upper bound accepted for `limit` before falling back to the view default.
const LIMIT_MAX: u32 = 100;

/// Flat ordered string-to-string parameter map backing a location.
///
/// Ordering (by key) keeps serialization stable so equal logical states
/// always produce byte-equal query strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams(BTreeMap<String, String>);

impl RawParams {
    /// Empty parameter map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Insert or replace `key`.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_owned(), value.into());
    }

    /// Remove `key` if present.
    pub fn delete(&mut self, key: &str) {
        self.0.remove(key);
    }

    /// Whether no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// What: Parse a query string (`a=1&b=two`, leading `?` tolerated).
    ///
    /// Details:
    /// - Pairs without `=` become keys with empty values and are dropped on
    ///   re-serialization; duplicate keys keep the last occurrence.
    #[must_use]
    pub fn from_query_string(raw: &str) -> Self {
        let mut map = BTreeMap::new();
        let trimmed = raw.trim_start_matches('?');
        for pair in trimmed.split('&').filter(|p| !p.is_empty()) {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            map.insert(percent_decode(k), percent_decode(v));
        }
        Self(map)
    }

    /// What: Serialize to a query string without the leading `?`.
    ///
    /// Output:
    /// - `""` when empty; otherwise `k=v` pairs joined by `&` in key order,
    ///   values percent-encoded. Empty values are omitted entirely.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (k, v) in &self.0 {
            if v.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('&');
            }
            out.push_str(&percent_encode(k));
            out.push('=');
            out.push_str(&percent_encode(v));
        }
        out
    }
}

/// A partial update to one or more [`QueryState`] fields.
///
/// `None` leaves a field untouched; `Some` of a sentinel value (empty search,
/// `all`, empty set) deletes the key from the encoded location.
#[derive(Debug, Clone, Default)]
pub struct QueryPatch {
    /// Explicit page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Sort field.
    pub order_by: Option<String>,
    /// Sort direction.
    pub order_dir: Option<SortDirection>,
    /// Applied search text (empty deletes).
    pub search: Option<String>,
    /// Status filter (`all` deletes).
    pub status: Option<String>,
    /// Fund-ID selection (empty deletes).
    pub ids: Option<BTreeSet<u64>>,
}

impl QueryPatch {
    /// Patch that clears search, status, IDs, and sort back to defaults.
    #[must_use]
    pub fn clear_all() -> Self {
        Self {
            search: Some(String::new()),
            status: Some(STATUS_ALL.to_owned()),
            ids: Some(BTreeSet::new()),
            order_by: None,
            order_dir: None,
            page: Some(1),
            limit: None,
        }
    }
}

/// Read a positive integer parameter, falling back on anything unusable.
fn positive_u32(params: &RawParams, key: &str, default: u32) -> u32 {
    params
        .get(key)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(default)
}

/// Parse a comma-separated ID list, discarding non-positive and junk entries.
///
/// Duplicates collapse and ordering is normalized by the set itself.
fn parse_ids(raw: &str) -> BTreeSet<u64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<u64>().ok())
        .filter(|n| *n >= 1)
        .collect()
}

/// Serialize an ID set as stable, sorted, comma-joined integers.
fn join_ids(ids: &BTreeSet<u64>) -> String {
    let mut out = String::new();
    for id in ids {
        if !out.is_empty() {
            out.push(',');
        }
        out.push_str(&id.to_string());
    }
    out
}

/// What: Decode raw location params into a fully-populated [`QueryState`].
///
/// Inputs:
/// - `params`: Raw query parameters from the location.
/// - `opts`: The view's options record supplying defaults and vocabularies.
///
/// Output:
/// - A complete `QueryState`; this function cannot fail. Missing keys,
///   non-numeric pages, unknown sort fields or statuses, and out-of-range
///   limits all fall back to the view defaults.
#[must_use]
pub fn decode(params: &RawParams, opts: &ViewOptions) -> QueryState {
    let page = positive_u32(params, "page", 1);
    let limit = match positive_u32(params, "limit", opts.default_limit) {
        n if n <= LIMIT_MAX => n,
        _ => opts.default_limit,
    };
    let order_by = params
        .get("order_by")
        .filter(|f| opts.is_sort_field(f))
        .unwrap_or(opts.default_order_by)
        .to_owned();
    let order_dir = params
        .get("order_dir")
        .and_then(SortDirection::from_str_opt)
        .unwrap_or(opts.default_order_dir);
    let search = params.get("search").unwrap_or_default().to_owned();
    let status = params
        .get("status")
        .filter(|st| opts.is_status(st))
        .unwrap_or(STATUS_ALL)
        .to_owned();
    let ids = params.get("ids").map(parse_ids).unwrap_or_default();

    QueryState {
        page,
        limit,
        order_by,
        order_dir,
        search,
        status,
        ids,
    }
}

/// Canonical serialized form of a key's current value: absent and sentinel
/// values both normalize to `""`, ID lists normalize to sorted form, and
/// absent sort keys normalize to the view defaults, so "changed" means a real
/// logical change rather than a textual one.
fn canonical_current(params: &RawParams, key: &str, opts: &ViewOptions) -> String {
    let raw = params.get(key).unwrap_or_default();
    match key {
        "status" if raw == STATUS_ALL => String::new(),
        "ids" => join_ids(&parse_ids(raw)),
        "order_by" if raw.is_empty() => opts.default_order_by.to_owned(),
        "order_dir" if raw.is_empty() => opts.default_order_dir.as_str().to_owned(),
        _ => raw.to_owned(),
    }
}

/// Serialized form of a patch value; `None` when the field is untouched.
/// Sentinels serialize to `""`, matching [`canonical_current`].
fn patch_value(patch: &QueryPatch, key: &str) -> Option<String> {
    match key {
        "search" => patch.search.clone(),
        "status" => patch
            .status
            .clone()
            .map(|st| if st == STATUS_ALL { String::new() } else { st }),
        "ids" => patch.ids.as_ref().map(join_ids),
        "order_by" => patch.order_by.clone(),
        "order_dir" => patch.order_dir.map(|d| d.as_str().to_owned()),
        _ => None,
    }
}

/// What: Apply a partial update to the current raw params, producing the next
/// location value.
///
/// Inputs:
/// - `patch`: Field changes; `None` fields are untouched.
/// - `current`: The location's current raw parameters.
/// - `opts`: View options supplying the defaults absent keys canonicalize to.
///
/// Output:
/// - New `RawParams`. Sentinel values delete their key. If any key in
///   [`RESET_KEYS`] actually changed value, `page` is forced to `1` even when
///   the patch carried an explicit page. Re-stating a view default against an
///   absent key is not a change.
#[must_use]
pub fn encode(patch: &QueryPatch, current: &RawParams, opts: &ViewOptions) -> RawParams {
    let mut next = current.clone();
    let mut reset_page = false;

    for key in RESET_KEYS {
        if let Some(new_val) = patch_value(patch, key)
            && new_val != canonical_current(current, key, opts)
        {
            reset_page = true;
        }
    }

    if let Some(search) = &patch.search {
        if search.is_empty() {
            next.delete("search");
        } else {
            next.set("search", search.clone());
        }
    }
    if let Some(status) = &patch.status {
        if status == STATUS_ALL {
            next.delete("status");
        } else {
            next.set("status", status.clone());
        }
    }
    if let Some(ids) = &patch.ids {
        if ids.is_empty() {
            next.delete("ids");
        } else {
            next.set("ids", join_ids(ids));
        }
    }
    if let Some(order_by) = &patch.order_by {
        next.set("order_by", order_by.clone());
    }
    if let Some(order_dir) = patch.order_dir {
        next.set("order_dir", order_dir.as_str());
    }
    if let Some(limit) = patch.limit {
        next.set("limit", limit.to_string());
    }
    if let Some(page) = patch.page {
        next.set("page", page.to_string());
    }

    if reset_page {
        next.set("page", "1");
    }
    next
}

/// What: Build the backend request parameters for a query state.
///
/// Inputs:
/// - `state`: Applied query state.
/// - `opts`: View options supplying backend parameter names.
///
/// Output:
/// - `RawParams` with `page`, `limit`, `order_by`, `order_dir` always set and
///   the optional filters included only when active, under the view's
///   backend names (`funding_status`, `fund_ids`, ...).
#[must_use]
pub fn to_api_params(state: &QueryState, opts: &ViewOptions) -> RawParams {
    let mut params = RawParams::new();
    params.set("page", state.page.to_string());
    params.set("limit", state.limit.to_string());
    params.set("order_by", state.order_by.clone());
    params.set("order_dir", state.order_dir.as_str());
    if !state.search.is_empty() {
        params.set("search", state.search.clone());
    }
    if state.status != STATUS_ALL {
        params.set(opts.status_param, state.status.clone());
    }
    if !state.ids.is_empty() {
        params.set(opts.ids_param, join_ids(&state.ids));
    }
    params
}
