//! Result presentation mapping: pure projections from raw backend JSON into
//! display-ready rows and detail records.
//!
//! Rich-text fields arrive as HTML and are reduced to plain text before they
//! ever reach a widget; long text is truncated with an ellipsis marker;
//! absent optional fields get fixed fallback strings. Everything here is
//! deterministic and side-effect free.

use scraper::Html;
use serde_json::Value;

use crate::query::params::View;
use crate::state::types::{DetailRecord, Row};
use crate::util::{iso_date, s, ss, truncate_chars, u64_of};

/// Display length bound for list-row descriptions.
const ROW_DESCRIPTION_MAX: usize = 200;
/// Display length bound for detail descriptions.
const DETAIL_DESCRIPTION_MAX: usize = 500;
/// Fallback shown when a submitter has no name.
const ANONYMOUS: &str = "Anonymous";
/// Fallback shown when a timestamp is missing or unparseable.
const UNKNOWN_DATE: &str = "Unknown date";

/// What: Strip HTML down to its text content and collapse whitespace.
///
/// Inputs:
/// - `html`: Possibly-rich text from the backend.
///
/// Output:
/// - Plain text with tags removed and runs of whitespace collapsed to single
///   spaces. Plain input passes through unchanged.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: Vec<&str> = fragment.root_element().text().collect();
    text.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// What: Sanitize a rich-text field and truncate it for display.
#[must_use]
pub fn sanitize_and_truncate(html: &str, max: usize) -> String {
    truncate_chars(&strip_html(html), max)
}

/// What: Canonical detail link for a record, e.g. `/projects/42`.
#[must_use]
pub fn detail_link(view: View, id: u64) -> String {
    let segment = match view {
        View::Funds => "funds",
        View::Ideas => "ideas",
        // metrics rows link to the underlying project
        View::Projects | View::Uniqueness | View::SocialImpact | View::EnvironmentalImpact
        | View::Sdg => "projects",
    };
    format!("/{segment}/{id}")
}

/// Formatted date with the documented fallback.
fn display_date(raw: &str) -> String {
    iso_date(raw).unwrap_or_else(|| UNKNOWN_DATE.to_owned())
}

/// Submitter display name with the documented fallback.
fn display_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        ANONYMOUS.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// First submitter name from a `submitters: [{name}, ...]` array.
fn first_submitter(item: &Value) -> String {
    let raw = item
        .get("submitters")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
        .map_or_else(String::new, |m| s(m, "name"));
    display_name(&raw)
}

/// Fund/campaign context line, skipping absent parts.
fn context_line(item: &Value) -> String {
    let fund = s(item, "fund_name");
    let campaign = s(item, "campaign_name");
    match (fund.is_empty(), campaign.is_empty()) {
        (false, false) => format!("{fund} / {campaign}"),
        (false, true) => fund,
        (true, false) => campaign,
        (true, true) => String::new(),
    }
}

/// What: Map one raw project record into a display row.
#[must_use]
pub fn project_row(item: &Value) -> Row {
    let id = u64_of(item, &["id"]).unwrap_or_default();
    Row {
        id,
        title: strip_html(&s(item, "title")),
        subtitle: context_line(item),
        description: sanitize_and_truncate(&s(item, "description"), ROW_DESCRIPTION_MAX),
        submitter: first_submitter(item),
        date: display_date(&s(item, "created_at")),
        badge: ss(item, &["funding_status", "project_status"]).unwrap_or_default(),
        link: detail_link(View::Projects, id),
    }
}

/// What: Map one raw idea record into a display row.
#[must_use]
pub fn idea_row(item: &Value) -> Row {
    let id = u64_of(item, &["id"]).unwrap_or_default();
    let kudos = u64_of(item, &["kudo_count"]).unwrap_or(0);
    Row {
        id,
        title: strip_html(&s(item, "title")),
        subtitle: context_line(item),
        description: sanitize_and_truncate(&s(item, "description"), ROW_DESCRIPTION_MAX),
        submitter: display_name(&s(item, "submitter_name")),
        date: display_date(&s(item, "created_at")),
        badge: format!("{kudos} kudos"),
        link: detail_link(View::Ideas, id),
    }
}

/// What: Map one raw fund record into a display row.
#[must_use]
pub fn fund_row(item: &Value) -> Row {
    let id = u64_of(item, &["id"]).unwrap_or_default();
    let total = u64_of(item, &["total"]);
    Row {
        id,
        title: strip_html(&s(item, "name")),
        subtitle: String::new(),
        description: String::new(),
        submitter: String::new(),
        date: display_date(&s(item, "created_at")),
        badge: total.map_or_else(String::new, |t| format!("{t} funded")),
        link: detail_link(View::Funds, id),
    }
}

/// What: Map one leaderboard record into a display row.
///
/// Details:
/// - `score_key` is the view's ranking field (`uniqueness_score`, ...).
#[must_use]
pub fn metric_row(item: &Value, score_key: &str) -> Row {
    let id = u64_of(item, &["project_id", "id"]).unwrap_or_default();
    let rank = u64_of(item, &["rank"]);
    let score = item.get(score_key).and_then(Value::as_f64);
    Row {
        id,
        title: strip_html(&s(item, "title")),
        subtitle: rank.map_or_else(String::new, |r| format!("Rank #{r}")),
        description: String::new(),
        submitter: String::new(),
        date: String::new(),
        badge: score.map_or_else(String::new, |v| format!("{v:.2}")),
        link: detail_link(View::Projects, id),
    }
}

/// Row mapper for a view.
#[must_use]
pub fn row_for(view: View, item: &Value) -> Row {
    match view {
        View::Funds => fund_row(item),
        View::Projects => project_row(item),
        View::Ideas => idea_row(item),
        View::Uniqueness | View::SocialImpact | View::EnvironmentalImpact | View::Sdg => {
            metric_row(item, view.options().default_order_by)
        }
    }
}

/// Push a labeled line when the value is non-empty.
fn push_extra(extra: &mut Vec<(String, String)>, label: &str, value: String) {
    if !value.is_empty() {
        extra.push((label.to_owned(), value));
    }
}

/// What: Map a project detail envelope (`data.project` + related entities)
/// into a [`DetailRecord`].
#[must_use]
pub fn project_detail(data: &Value) -> DetailRecord {
    let project = data.get("project").unwrap_or(data);
    let id = u64_of(project, &["id"]).unwrap_or_default();
    let mut extra = Vec::new();
    push_extra(&mut extra, "Submitter", first_submitter(project));
    if let Some(funding) = data.get("funding") {
        if let Some(v) = u64_of(funding, &["requested"]) {
            push_extra(&mut extra, "Requested", v.to_string());
        }
        if let Some(v) = u64_of(funding, &["distributed_to_date"]) {
            push_extra(&mut extra, "Distributed", v.to_string());
        }
    }
    if let Some(metrics) = data.get("metrics") {
        if let Some(u) = metrics.get("uniqueness")
            && let Some(v) = u.get("value").and_then(Value::as_f64)
        {
            push_extra(&mut extra, "Uniqueness", format!("{v:.2}"));
        }
        if let Some(i) = metrics.get("social_and_environmental_impact") {
            push_extra(&mut extra, "Impact", s(i, "has_impact"));
        }
    }
    push_extra(&mut extra, "Country", s(project, "country"));
    push_extra(&mut extra, "Horizon", s(project, "horizon_group"));

    DetailRecord {
        id,
        title: strip_html(&s(project, "title")),
        description: sanitize_and_truncate(
            &ss(project, &["full_detail", "summary", "description"]).unwrap_or_default(),
            DETAIL_DESCRIPTION_MAX,
        ),
        fund: data.get("fund").map_or_else(String::new, |f| s(f, "name")),
        campaign: data
            .get("campaign")
            .map_or_else(String::new, |c| s(c, "name")),
        status: ss(project, &["funding_status", "project_status"]).unwrap_or_default(),
        website: s(project, "website"),
        date: display_date(&s(project, "created_at")),
        link: detail_link(View::Projects, id),
        extra,
        campaigns: Vec::new(),
    }
}

/// What: Map a fund detail envelope into a [`DetailRecord`].
///
/// Details:
/// - Campaigns under the fund are kept as (id, name) pairs so the detail
///   pane can offer per-campaign drill-down.
#[must_use]
pub fn fund_detail(data: &Value) -> DetailRecord {
    let fund = data.get("fund").unwrap_or(data);
    let id = u64_of(fund, &["id"]).unwrap_or_default();
    let mut extra = Vec::new();
    if let Some(v) = u64_of(fund, &["total"]) {
        push_extra(&mut extra, "Funded projects", v.to_string());
    }
    let campaigns = data
        .get("campaigns")
        .or_else(|| fund.get("campaigns"))
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|c| u64_of(c, &["id"]).map(|cid| (cid, strip_html(&s(c, "name")))))
                .collect()
        })
        .unwrap_or_default();

    DetailRecord {
        id,
        title: strip_html(&s(fund, "name")),
        description: sanitize_and_truncate(&s(fund, "description"), DETAIL_DESCRIPTION_MAX),
        fund: String::new(),
        campaign: String::new(),
        status: String::new(),
        website: s(fund, "website"),
        date: display_date(&s(fund, "created_at")),
        link: detail_link(View::Funds, id),
        extra,
        campaigns,
    }
}

/// What: Map an idea detail envelope (`data.idea` + related entities) into a
/// [`DetailRecord`].
#[must_use]
pub fn idea_detail(data: &Value) -> DetailRecord {
    let idea = data.get("idea").unwrap_or(data);
    let id = u64_of(idea, &["id"]).unwrap_or_default();
    let mut extra = Vec::new();
    push_extra(&mut extra, "Submitter", display_name(&s(idea, "submitter_name")));
    if let Some(n) = u64_of(idea, &["idea_number"]) {
        push_extra(&mut extra, "Idea #", n.to_string());
    }
    if let Some(k) = u64_of(idea, &["kudo_count"]) {
        push_extra(&mut extra, "Kudos", k.to_string());
    }

    DetailRecord {
        id,
        title: strip_html(&s(idea, "title")),
        description: sanitize_and_truncate(&s(idea, "description"), DETAIL_DESCRIPTION_MAX),
        fund: data.get("fund").map_or_else(String::new, |f| s(f, "name")),
        campaign: data
            .get("campaign")
            .map_or_else(String::new, |c| s(c, "name")),
        status: String::new(),
        website: s(idea, "website"),
        date: display_date(&s(idea, "created_at")),
        link: detail_link(View::Ideas, id),
        extra,
        campaigns: Vec::new(),
    }
}
