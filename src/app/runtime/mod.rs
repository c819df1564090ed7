//! The runtime: wires settings, state, channels, and workers together and
//! drives the render/handle loop until quit.

use std::sync::atomic::Ordering;

use ratatui::{Terminal, backend::CrosstermBackend};

use crate::args::Args;
use crate::config;
use crate::events;
use crate::state::AppState;
use crate::ui;

use super::terminal::{restore_terminal, setup_terminal};

mod channels;
mod event_loop;
mod handlers;
mod workers;

use channels::Channels;
use event_loop::process_messages;
use handlers::dispatch_effects;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Run the Fundsea TUI end-to-end: set up the terminal, load settings,
/// spawn the fetch workers and the event reader, drive the event loop, and
/// restore the terminal on exit.
///
/// Inputs:
/// - `args`: Parsed command line (start view and base URL override).
///
/// Output:
/// - `Ok(())` on clean exit; `Err` on unrecoverable terminal errors.
///
/// Details:
/// - `FUNDSEA_TEST_HEADLESS=1` bypasses the TTY and skips the startup
///   requests so the runtime can be exercised from tests.
pub async fn run(args: Args) -> Result<()> {
    let headless = std::env::var("FUNDSEA_TEST_HEADLESS").ok().as_deref() == Some("1");
    if !headless {
        setup_terminal()?;
    }
    let mut terminal = if headless {
        None
    } else {
        Some(Terminal::new(CrosstermBackend::new(std::io::stdout()))?)
    };

    let mut settings = config::settings();
    if let Some(url) = args.base_url {
        settings.base_url = url;
    }
    let mut app = AppState::new(args.view.into(), settings);
    let mut channels = Channels::start(&app.settings.base_url, headless);

    if !headless {
        let effects = events::refresh(&mut app).into_iter().collect();
        dispatch_effects(effects, &channels.page_req_tx, &channels.detail_req_tx);
    }

    loop {
        if let Some(t) = terminal.as_mut() {
            let _ = t.draw(|f| ui::draw(f, &mut app));
        }
        if process_messages(&mut app, &mut channels).await || app.should_quit {
            break;
        }
    }

    channels.event_thread_cancelled.store(true, Ordering::Relaxed);
    if !headless {
        restore_terminal()?;
    }
    Ok(())
}
