//! Async race tests for the paginated fetch binding: workers answering out
//! of order must never let an older response overwrite a newer one.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;

use fundsea::fetch::PageBinding;
use fundsea::query::codec::{RawParams, decode};
use fundsea::query::params::{QueryState, View};
use fundsea::state::types::{Page, PageOutcome, PageQuery, Row};

fn state(qs: &str) -> QueryState {
    decode(&RawParams::from_query_string(qs), View::Projects.options())
}

fn page(n: u32) -> Page<Row> {
    Page {
        items: vec![Row {
            id: u64::from(n),
            ..Row::default()
        }],
        total_items: 30,
        total_pages: 3,
        page: n,
    }
}

/// Worker stub answering each request after a per-page delay.
fn spawn_stub_worker(
    mut req_rx: mpsc::UnboundedReceiver<(PageQuery, Duration)>,
    res_tx: mpsc::UnboundedSender<PageOutcome>,
) {
    tokio::spawn(async move {
        while let Some((query, delay)) = req_rx.recv().await {
            let tx = res_tx.clone();
            tokio::spawn(async move {
                sleep(delay).await;
                let _ = tx.send(PageOutcome {
                    id: query.id,
                    key: query.key,
                    result: Ok(page(query.state.page)),
                });
            });
        }
    });
}

/// What: A slow page-1 response never overwrites a fast page-2 response
///
/// - Input: Request page 1 (500ms), immediately request page 2 (50ms)
/// - Output: Page 2 applied; page 1 arrives later and is discarded
#[tokio::test(start_paused = true)]
async fn slow_earlier_response_is_discarded() {
    let (req_tx, req_rx) = mpsc::unbounded_channel();
    let (res_tx, mut res_rx) = mpsc::unbounded_channel();
    spawn_stub_worker(req_rx, res_tx);

    let mut binding = PageBinding::new();
    let q1 = binding
        .request(View::Projects, &state("page=1"), None)
        .expect("q1");
    req_tx.send((q1, Duration::from_millis(500))).expect("send q1");
    let q2 = binding
        .request(View::Projects, &state("page=2"), None)
        .expect("q2");
    req_tx.send((q2, Duration::from_millis(50))).expect("send q2");

    // fast page-2 response
    let first = res_rx.recv().await.expect("first response");
    assert!(binding.accept(first));
    assert_eq!(binding.data.as_ref().map(|p| p.page), Some(2));
    assert!(!binding.loading);

    // slow page-1 response arrives afterwards
    let second = res_rx.recv().await.expect("second response");
    assert!(!binding.accept(second));
    assert_eq!(binding.data.as_ref().map(|p| p.page), Some(2));
}

/// What: A burst of pagination clicks settles on the last page requested
///
/// - Input: Pages 1, 2, 3 requested back to back with shuffled latencies
/// - Output: Only page 3's response is applied
#[tokio::test(start_paused = true)]
async fn rapid_pagination_settles_on_latest() {
    let (req_tx, req_rx) = mpsc::unbounded_channel();
    let (res_tx, mut res_rx) = mpsc::unbounded_channel();
    spawn_stub_worker(req_rx, res_tx);

    let mut binding = PageBinding::new();
    for (n, delay_ms) in [(1u32, 300u64), (2, 100), (3, 200)] {
        let q = binding
            .request(View::Projects, &state(&format!("page={n}")), None)
            .expect("request");
        req_tx
            .send((q, Duration::from_millis(delay_ms)))
            .expect("send");
    }

    let mut applied = Vec::new();
    for _ in 0..3 {
        let outcome = res_rx.recv().await.expect("response");
        let page_no = outcome.result.as_ref().map_or(0, |p| p.page);
        if binding.accept(outcome) {
            applied.push(page_no);
        }
    }
    assert_eq!(applied, vec![3]);
    assert_eq!(binding.data.as_ref().map(|p| p.page), Some(3));
    assert!(!binding.loading);
}
