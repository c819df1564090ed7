//! Central [`AppState`] container mutated by the event loop.

use std::num::NonZeroUsize;

use lru::LruCache;
use ratatui::widgets::ListState;

use crate::config::Settings;
use crate::fetch::{DetailBinding, PageBinding};
use crate::query::location::{LocationPort, MemoryLocation};
use crate::query::manager::ListQuery;
use crate::query::params::View;
use crate::state::modal::Modal;
use crate::state::types::{DetailRecord, Focus};

/// Capacity of the detail-record cache.
const DETAIL_CACHE_CAP: usize = 64;

/// Global application state shared by the event, networking, and UI layers.
///
/// Mutated only on the event loop; background workers communicate through
/// channels and never touch this directly.
pub struct AppState {
    /// The navigable location: single source of truth for list query state.
    pub location: MemoryLocation,
    /// Controller for the currently mounted list view.
    pub list: ListQuery,
    /// Fetch state of the current list page.
    pub binding: PageBinding,
    /// Fetch state of the detail pane.
    pub detail: DetailBinding,
    /// Cache of detail records keyed by (view, id).
    pub detail_cache: LruCache<(View, u64), DetailRecord>,

    /// Search input buffer (applied only on explicit submit).
    pub input: String,
    /// Caret position in characters within `input`.
    pub caret: usize,
    /// Which pane has keyboard focus.
    pub focus: Focus,
    /// Highlighted row index in the results list.
    pub selected: usize,
    /// ratatui selection state for the results list.
    pub list_state: ListState,
    /// Active modal overlay.
    pub modal: Modal,

    /// Known funds (id, name) for the filter menu's cross-filter choices.
    pub fund_choices: Vec<(u64, String)>,
    /// Parent campaign scope, derived from the location's `campaign` param
    /// on every remount so history navigation restores it.
    pub campaign_scope: Option<u64>,
    /// User settings loaded at startup.
    pub settings: Settings,
    /// Set when the user asked to quit.
    pub should_quit: bool,
}

impl AppState {
    /// What: Build the initial state for `view` with the given settings.
    #[must_use]
    pub fn new(view: View, settings: Settings) -> Self {
        let location = MemoryLocation::new(view);
        let list = ListQuery::mount(view.options(), &location);
        Self {
            location,
            list,
            binding: PageBinding::new(),
            detail: DetailBinding::new(),
            detail_cache: LruCache::new(
                NonZeroUsize::new(DETAIL_CACHE_CAP).unwrap_or(NonZeroUsize::MIN),
            ),
            input: String::new(),
            caret: 0,
            focus: Focus::Search,
            selected: 0,
            list_state: ListState::default(),
            modal: Modal::None,
            fund_choices: Vec::new(),
            campaign_scope: None,
            settings,
            should_quit: false,
        }
    }

    /// What: Remount the list controller after the location's view changed
    /// (view switch or history navigation), resyncing pending filters and
    /// the search buffer to the now-current location.
    pub fn remount_list(&mut self) {
        let view = self.location.view();
        self.list = ListQuery::mount(view.options(), &self.location);
        let applied = self.list.state(&self.location);
        self.input = applied.search.clone();
        self.caret = self.input.chars().count();
        self.selected = 0;
        self.list_state = ListState::default();
        self.campaign_scope = self
            .location
            .params()
            .get("campaign")
            .and_then(|v| v.parse().ok());
    }

    /// Currently mounted view.
    #[must_use]
    pub fn view(&self) -> View {
        self.location.view()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(View::Projects, Settings::default())
    }
}
