//! The per-view list query controller.
//!
//! [`ListQuery`] binds UI controls to the applied [`QueryState`] through the
//! codec and an injected [`LocationPort`], and owns the pending (not yet
//! applied) filter edits. It performs no I/O and cannot fail: invalid input
//! is clamped by the codec, never thrown.
//!
//! Gating rules:
//! - status / fund-ID edits are **pending** until `apply_filters`;
//! - sort changes and search submits apply **immediately**;
//! - explicit page changes bypass the page-reset logic entirely.

use std::collections::BTreeSet;

use crate::query::codec::{QueryPatch, decode, encode};
use crate::query::location::LocationPort;
use crate::query::params::{PendingFilterState, QueryState, STATUS_ALL, ViewOptions};

/// List query controller for one mounted view.
#[derive(Debug)]
pub struct ListQuery {
    /// The view's declarative configuration.
    opts: &'static ViewOptions,
    /// Working copy of the confirmation-gated filters.
    pending: PendingFilterState,
}

impl ListQuery {
    /// What: Mount a controller for a view, seeding pending filters from the
    /// current location.
    #[must_use]
    pub fn mount(opts: &'static ViewOptions, location: &dyn LocationPort) -> Self {
        let pending = decode(location.params(), opts).filter_projection();
        Self { opts, pending }
    }

    /// The view options this controller was mounted with.
    #[must_use]
    pub const fn options(&self) -> &'static ViewOptions {
        self.opts
    }

    /// Pending filter edits, for rendering the filter menu.
    #[must_use]
    pub const fn pending(&self) -> &PendingFilterState {
        &self.pending
    }

    /// Applied query state, derived fresh from the location.
    #[must_use]
    pub fn state(&self, location: &dyn LocationPort) -> QueryState {
        decode(location.params(), self.opts)
    }

    /// What: Edit the pending status selection. No navigation happens.
    pub fn edit_status(&mut self, status: &str) {
        if self.opts.is_status(status) {
            self.pending.status = status.to_owned();
        }
    }

    /// What: Toggle a fund ID in the pending selection. No navigation.
    pub fn toggle_id(&mut self, id: u64) {
        if id == 0 {
            return;
        }
        if !self.pending.ids.remove(&id) {
            self.pending.ids.insert(id);
        }
    }

    /// What: Commit pending filters into the location in one write.
    ///
    /// Details:
    /// - The codec resets the page iff status or IDs actually changed.
    /// - A no-op apply (pending equals applied) still writes once; the codec
    ///   leaves the page alone in that case.
    pub fn apply_filters(&mut self, location: &mut dyn LocationPort) {
        let patch = QueryPatch {
            status: Some(self.pending.status.clone()),
            ids: Some(self.pending.ids.clone()),
            ..QueryPatch::default()
        };
        let next = encode(&patch, location.params(), self.opts);
        location.navigate(next);
    }

    /// What: Discard pending edits, resyncing them to the applied state.
    /// No navigation or location change.
    pub fn reset_pending(&mut self, location: &dyn LocationPort) {
        self.pending = self.state(location).filter_projection();
    }

    /// What: Clear search, status, IDs, and sort in one atomic write.
    ///
    /// Details:
    /// - Exactly one navigation event regardless of how many filters were
    ///   active; sort falls back to the view default by key deletion.
    pub fn clear_all(&mut self, location: &mut dyn LocationPort) {
        let mut next = encode(&QueryPatch::clear_all(), location.params(), self.opts);
        // Sort keys revert to defaults by absence rather than by literal value.
        next.delete("order_by");
        next.delete("order_dir");
        location.navigate(next);
        self.pending = PendingFilterState::default();
    }

    /// What: Change the sort field, applying immediately.
    ///
    /// Details:
    /// - Selecting the current field flips the direction; selecting a new
    ///   field adopts that field's natural direction.
    /// - Sort is in the reset-triggering set, so the page returns to 1.
    /// - Unknown fields are ignored (the codec would discard them anyway).
    pub fn change_sort(&mut self, field: &str, location: &mut dyn LocationPort) {
        if !self.opts.is_sort_field(field) {
            return;
        }
        let current = self.state(location);
        let dir = if current.order_by == field {
            current.order_dir.flipped()
        } else {
            self.opts.natural_dir(field)
        };
        let patch = QueryPatch {
            order_by: Some(field.to_owned()),
            order_dir: Some(dir),
            ..QueryPatch::default()
        };
        let next = encode(&patch, location.params(), self.opts);
        location.navigate(next);
    }

    /// What: Apply submitted search text immediately.
    ///
    /// Details:
    /// - Callers keep their own keystroke buffer; this runs only on explicit
    ///   submit. Empty text clears the search key.
    pub fn submit_search(&self, text: &str, location: &mut dyn LocationPort) {
        let patch = QueryPatch {
            search: Some(text.trim().to_owned()),
            ..QueryPatch::default()
        };
        let next = encode(&patch, location.params(), self.opts);
        location.navigate(next);
    }

    /// What: Navigate to an explicit page, bypassing reset logic.
    pub fn change_page(&self, page: u32, location: &mut dyn LocationPort) {
        let patch = QueryPatch {
            page: Some(page.max(1)),
            ..QueryPatch::default()
        };
        let next = encode(&patch, location.params(), self.opts);
        location.navigate(next);
    }

    /// What: Whether pending filters differ from the applied state, compared
    /// set-wise for IDs.
    #[must_use]
    pub fn has_unapplied_changes(&self, location: &dyn LocationPort) -> bool {
        self.pending != self.state(location).filter_projection()
    }

    /// What: Count of active applied filters (search, status, IDs).
    #[must_use]
    pub fn active_filters_count(&self, location: &dyn LocationPort) -> usize {
        self.state(location).active_filters_count()
    }

    /// Pending status vs the sentinel, for rendering the menu.
    #[must_use]
    pub fn pending_status_is_all(&self) -> bool {
        self.pending.status == STATUS_ALL
    }

    /// Replace the pending ID set wholesale (used by select-none shortcuts).
    pub fn set_pending_ids(&mut self, ids: BTreeSet<u64>) {
        self.pending.ids = ids;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::codec::RawParams;
    use crate::query::location::MemoryLocation;
    use crate::query::params::{SortDirection, View};

    fn mounted(qs: &str) -> (ListQuery, MemoryLocation) {
        let mut loc = MemoryLocation::new(View::Projects);
        loc.replace(RawParams::from_query_string(qs));
        let lq = ListQuery::mount(View::Projects.options(), &loc);
        (lq, loc)
    }

    /// What: Pending edits flip the unapplied flag; reset clears it
    ///
    /// - Input: Edit status, then reset_pending
    /// - Output: Flag true after edit, false after reset, no navigation
    #[test]
    fn manager_unapplied_flag_and_reset() {
        let (mut lq, loc) = mounted("status=Funded&ids=2");
        assert!(!lq.has_unapplied_changes(&loc));

        lq.edit_status(STATUS_ALL);
        assert!(lq.has_unapplied_changes(&loc));
        lq.toggle_id(5);
        assert!(lq.has_unapplied_changes(&loc));

        let before = loc.history_len();
        lq.reset_pending(&loc);
        assert!(!lq.has_unapplied_changes(&loc));
        assert_eq!(loc.history_len(), before);
        assert_eq!(lq.pending().status, "Funded");
        assert_eq!(lq.pending().ids, BTreeSet::from([2]));
    }

    /// What: ID comparison is set-wise, not order-sensitive
    ///
    /// - Input: Location `ids=3,1,7`; pending rebuilt in another order
    /// - Output: No unapplied changes reported
    #[test]
    fn manager_id_comparison_ignores_order() {
        let (mut lq, loc) = mounted("ids=3,1,7");
        lq.set_pending_ids(BTreeSet::from([7, 3, 1]));
        assert!(!lq.has_unapplied_changes(&loc));
    }

    /// What: Applying filters is one write and resets the page
    ///
    /// - Input: Page 5 with a pending status change
    /// - Output: One new history entry, status applied, page 1
    #[test]
    fn manager_apply_filters_commits_once() {
        let (mut lq, mut loc) = mounted("page=5");
        lq.edit_status("Funded");
        lq.toggle_id(3);
        let before = loc.history_len();

        lq.apply_filters(&mut loc);

        assert_eq!(loc.history_len(), before + 1);
        let st = lq.state(&loc);
        assert_eq!(st.status, "Funded");
        assert_eq!(st.ids, BTreeSet::from([3]));
        assert_eq!(st.page, 1);
        assert!(!lq.has_unapplied_changes(&loc));
    }

    /// What: Sort toggles direction on repeat and adopts natural defaults
    ///
    /// - Input: change_sort twice on one field, then a different field
    /// - Output: desc → asc on repeat; new field back at its natural dir
    #[test]
    fn manager_sort_toggle_and_adopt() {
        let (mut lq, mut loc) = mounted("");
        lq.change_sort("created_at", &mut loc);
        let st = lq.state(&loc);
        assert_eq!(st.order_by, "created_at");
        assert_eq!(st.order_dir, SortDirection::Descending);

        lq.change_sort("created_at", &mut loc);
        assert_eq!(lq.state(&loc).order_dir, SortDirection::Ascending);

        lq.change_sort("title", &mut loc);
        let st = lq.state(&loc);
        assert_eq!(st.order_by, "title");
        assert_eq!(st.order_dir, SortDirection::Ascending);

        // unknown fields are ignored entirely
        let before = loc.history_len();
        lq.change_sort("bogus", &mut loc);
        assert_eq!(loc.history_len(), before);
    }

    /// What: Sort changes reset the page
    ///
    /// - Input: Page 4, then change_sort
    /// - Output: Page 1
    #[test]
    fn manager_sort_resets_page() {
        let (mut lq, mut loc) = mounted("page=4");
        lq.change_sort("title", &mut loc);
        assert_eq!(lq.state(&loc).page, 1);
    }

    /// What: Search applies on submit and resets the page
    ///
    /// - Input: submit_search("cardano") from page 3
    /// - Output: Search applied, page 1; empty submit clears the key
    #[test]
    fn manager_submit_search() {
        let (lq, mut loc) = mounted("page=3");
        lq.submit_search("cardano", &mut loc);
        let st = lq.state(&loc);
        assert_eq!(st.search, "cardano");
        assert_eq!(st.page, 1);

        lq.submit_search("  ", &mut loc);
        assert!(lq.state(&loc).search.is_empty());
        assert_eq!(loc.params().get("search"), None);
    }

    /// What: Explicit page changes do not loop back to 1
    ///
    /// - Input: change_page(7) with filters active
    /// - Output: Page 7 with filters untouched
    #[test]
    fn manager_change_page_bypasses_reset() {
        let (lq, mut loc) = mounted("search=dao&status=Funded");
        lq.change_page(7, &mut loc);
        let st = lq.state(&loc);
        assert_eq!(st.page, 7);
        assert_eq!(st.search, "dao");
        assert_eq!(st.status, "Funded");

        lq.change_page(0, &mut loc);
        assert_eq!(lq.state(&loc).page, 1);
    }

    /// What: Clear-all is a single atomic write back to defaults
    ///
    /// - Input: search + status + ids + page=5, then clear_all
    /// - Output: One history entry, empty query string
    #[test]
    fn manager_clear_all_atomicity() {
        let (mut lq, mut loc) = mounted("search=x&status=Funded&ids=2&page=5&order_by=title");
        let before = loc.history_len();
        lq.clear_all(&mut loc);
        assert_eq!(loc.history_len(), before + 1);
        // page=1 is the only surviving key and serializes away as default-implied
        let st = lq.state(&loc);
        assert_eq!(st.page, 1);
        assert!(st.search.is_empty());
        assert_eq!(st.status, STATUS_ALL);
        assert!(st.ids.is_empty());
        assert_eq!(st.order_by, "id");
        assert_eq!(lq.active_filters_count(&loc), 0);
        assert!(!lq.has_unapplied_changes(&loc));
    }

    /// What: Active filter count reflects the applied location only
    ///
    /// - Input: Applied search+ids, one pending (unapplied) status edit
    /// - Output: Count 2 before apply, 3 after
    #[test]
    fn manager_active_count_tracks_applied() {
        let (mut lq, mut loc) = mounted("search=sun&ids=1");
        assert_eq!(lq.active_filters_count(&loc), 2);
        lq.edit_status("Funded");
        assert_eq!(lq.active_filters_count(&loc), 2);
        lq.apply_filters(&mut loc);
        assert_eq!(lq.active_filters_count(&loc), 3);
    }
}
