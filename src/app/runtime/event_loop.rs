//! One iteration of the event loop's message handling.

use tokio::select;

use crate::state::AppState;

use super::channels::Channels;
use super::handlers::{
    dispatch_effects, handle_detail_outcome, handle_fund_choices, handle_page_outcome,
};

/// What: Wait for and process one message from any channel.
///
/// Output:
/// - `true` when the loop should exit (quit key, or every channel closed).
pub async fn process_messages(app: &mut AppState, channels: &mut Channels) -> bool {
    select! {
        Some(ev) = channels.event_rx.recv() => {
            let effects = crate::events::handle_event(app, &ev);
            dispatch_effects(effects, &channels.page_req_tx, &channels.detail_req_tx);
            app.should_quit
        }
        Some(outcome) = channels.page_res_rx.recv() => {
            handle_page_outcome(app, outcome);
            false
        }
        Some(outcome) = channels.detail_res_rx.recv() => {
            handle_detail_outcome(app, outcome);
            false
        }
        Some(choices) = channels.funds_rx.recv() => {
            handle_fund_choices(app, choices);
            false
        }
        else => true,
    }
}
