//! Backend access: the shared HTTP client, envelope parsing, and the fetch
//! entry points called by the background workers.
//!
//! Every list endpoint answers with the same envelope shape:
//! `{ "data": { "items": [...], "total_items", "total_pages", "page",
//! "limit" } }`; detail endpoints answer `{ "data": { ... } }`. Totals are
//! taken from the envelope as reported, never recomputed here.

use std::sync::OnceLock;
use std::time::Duration;

use serde_json::Value;

use crate::present;
use crate::query::params::View;
use crate::state::types::{DetailRecord, Page, PageQuery, Row};
use crate::util::u64_of;

/// Convenient alias for fallible backend operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Request timeout applied to every backend call.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared HTTP client, built once.
fn http() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("fundsea/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default()
    })
}

/// What: GET a URL and parse the response body as JSON.
///
/// Inputs:
/// - `url`: Fully-formed request URL.
///
/// Output:
/// - Parsed body on 2xx; an error carrying the status or transport failure
///   otherwise.
async fn get_json(url: &str) -> Result<Value> {
    tracing::debug!(url, "GET");
    let resp = http().get(url).send().await?.error_for_status()?;
    Ok(resp.json::<Value>().await?)
}

/// What: Parse a list envelope into a typed page of display rows.
///
/// Inputs:
/// - `view`: Selects the per-record presentation mapper.
/// - `body`: Full response body.
///
/// Output:
/// - A [`Page`] with server-reported totals; an error when the envelope is
///   missing its `items` array.
pub fn parse_page(view: View, body: &Value) -> Result<Page<Row>> {
    let data = body.get("data").unwrap_or(body);
    let Some(items) = data.get("items").and_then(Value::as_array) else {
        return Err("malformed response: missing items".into());
    };
    let rows = items.iter().map(|it| present::row_for(view, it)).collect();
    Ok(Page {
        items: rows,
        total_items: u64_of(data, &["total_items", "total"]).unwrap_or_default(),
        total_pages: u32::try_from(u64_of(data, &["total_pages"]).unwrap_or(1)).unwrap_or(1),
        page: u32::try_from(u64_of(data, &["page", "current_page"]).unwrap_or(1)).unwrap_or(1),
    })
}

/// What: Fetch one list page described by a [`PageQuery`].
///
/// Details:
/// - The query's precomputed key is already `path?params`, so the URL is
///   just the base joined with it.
pub async fn fetch_page(base_url: &str, query: &PageQuery) -> Result<Page<Row>> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), query.key);
    let body = get_json(&url).await?;
    parse_page(query.view, &body)
}

/// What: Fetch one detail record for a view.
pub async fn fetch_detail(base_url: &str, view: View, record_id: u64) -> Result<DetailRecord> {
    let url = format!(
        "{}/{}/{record_id}",
        base_url.trim_end_matches('/'),
        detail_path(view)
    );
    let body = get_json(&url).await?;
    let data = body.get("data").unwrap_or(&body);
    Ok(map_detail(view, data))
}

/// Collection path owning a view's detail records. Leaderboard rows resolve
/// to the underlying project.
const fn detail_path(view: View) -> &'static str {
    match view {
        View::Funds => "funds",
        View::Ideas => "ideas",
        View::Projects
        | View::Uniqueness
        | View::SocialImpact
        | View::EnvironmentalImpact
        | View::Sdg => "projects",
    }
}

/// Detail mapper for a view.
fn map_detail(view: View, data: &Value) -> DetailRecord {
    match view {
        View::Funds => present::fund_detail(data),
        View::Ideas => present::idea_detail(data),
        View::Projects
        | View::Uniqueness
        | View::SocialImpact
        | View::EnvironmentalImpact
        | View::Sdg => present::project_detail(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// What: The standard list envelope parses into a typed page
    ///
    /// - Input: `data.items` with two projects plus totals
    /// - Output: Mapped rows and echoed totals
    #[test]
    fn sources_parse_page_envelope() {
        let body = serde_json::json!({
            "data": {
                "items": [
                    {"id": 1, "title": "One", "funding_status": "Funded"},
                    {"id": 2, "title": "Two"},
                ],
                "total_items": 23,
                "total_pages": 3,
                "page": 2,
                "limit": 10,
            }
        });
        let page = parse_page(View::Projects, &body).expect("page");
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title, "One");
        assert_eq!(page.items[0].badge, "Funded");
        assert_eq!(page.total_items, 23);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 2);
    }

    /// What: A body without an items array is rejected, not defaulted
    ///
    /// - Input: Envelope lacking `items`
    /// - Output: Error mentioning the missing field
    #[test]
    fn sources_parse_page_missing_items() {
        let body = serde_json::json!({"data": {"total_items": 0}});
        let err = parse_page(View::Projects, &body).expect_err("must fail");
        assert!(err.to_string().contains("items"));
    }

    /// What: Envelope totals tolerate an un-nested body and absent counts
    ///
    /// - Input: Items at the top level, no totals
    /// - Output: Page 1 of 1, zero total items
    #[test]
    fn sources_parse_page_lenient_shape() {
        let body = serde_json::json!({"items": [{"id": 5, "name": "Fund 5"}]});
        let page = parse_page(View::Funds, &body).expect("page");
        assert_eq!(page.items[0].title, "Fund 5");
        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
    }

    /// What: Leaderboard detail requests resolve to the project collection
    ///
    /// - Input: Each view
    /// - Output: `projects` for metric views, own path otherwise
    #[test]
    fn sources_detail_paths() {
        assert_eq!(detail_path(View::Uniqueness), "projects");
        assert_eq!(detail_path(View::Sdg), "projects");
        assert_eq!(detail_path(View::Ideas), "ideas");
        assert_eq!(detail_path(View::Funds), "funds");
    }
}
