//! Channel plumbing between the event loop and background workers.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::state::types::{DetailOutcome, DetailQuery, PageOutcome, PageQuery};

/// All channel endpoints the event loop holds.
///
/// Request receivers are moved into the workers at construction; the loop
/// keeps request senders and response receivers.
pub struct Channels {
    /// Terminal events from the blocking reader thread. Held so the event
    /// arm stays pending rather than closing in headless mode.
    #[allow(dead_code)]
    pub event_tx: mpsc::UnboundedSender<CEvent>,
    /// Receiving side of the terminal event stream.
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    /// Tells the reader thread to stop polling.
    pub event_thread_cancelled: Arc<AtomicBool>,
    /// List-page requests to the page worker.
    pub page_req_tx: mpsc::UnboundedSender<PageQuery>,
    /// List-page responses.
    pub page_res_rx: mpsc::UnboundedReceiver<PageOutcome>,
    /// Detail requests to the detail worker.
    pub detail_req_tx: mpsc::UnboundedSender<DetailQuery>,
    /// Detail responses.
    pub detail_res_rx: mpsc::UnboundedReceiver<DetailOutcome>,
    /// One-shot fund (id, name) listing for the filter menu.
    pub funds_rx: mpsc::UnboundedReceiver<Vec<(u64, String)>>,
}

impl Channels {
    /// What: Create every channel and spawn the attached workers.
    ///
    /// Inputs:
    /// - `base_url`: Backend root passed to the fetch workers.
    /// - `headless`: Skips the terminal reader thread and the fund seed
    ///   request so tests stay off the network and the TTY.
    #[must_use]
    pub fn start(base_url: &str, headless: bool) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (page_req_tx, page_req_rx) = mpsc::unbounded_channel();
        let (page_res_tx, page_res_rx) = mpsc::unbounded_channel();
        let (detail_req_tx, detail_req_rx) = mpsc::unbounded_channel();
        let (detail_res_tx, detail_res_rx) = mpsc::unbounded_channel();
        let (funds_tx, funds_rx) = mpsc::unbounded_channel();
        let event_thread_cancelled = Arc::new(AtomicBool::new(false));

        super::workers::spawn_page_worker(base_url.to_owned(), page_req_rx, page_res_tx);
        super::workers::spawn_detail_worker(base_url.to_owned(), detail_req_rx, detail_res_tx);
        if !headless {
            super::workers::spawn_fund_seed(base_url.to_owned(), funds_tx);
        }
        super::workers::spawn_event_thread(
            headless,
            event_tx.clone(),
            event_thread_cancelled.clone(),
        );

        Self {
            event_tx,
            event_rx,
            event_thread_cancelled,
            page_req_tx,
            page_res_rx,
            detail_req_tx,
            detail_res_rx,
            funds_rx,
        }
    }
}
