//! The navigable location: the single shared descriptor of "where the user
//! is", made explicit as an injected port so the query manager can be tested
//! without a terminal or a real router.
//!
//! A location is a [`View`] plus its [`RawParams`]. [`MemoryLocation`] keeps
//! a linear history of visited locations with a cursor, giving back/forward
//! semantics: every logical user action performs exactly one write.

use crate::query::codec::RawParams;
use crate::query::params::View;

/// One history entry: a view and its query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// The view this entry points at.
    pub view: View,
    /// Query parameters of the entry.
    pub params: RawParams,
}

impl Location {
    /// Location for `view` with no parameters.
    #[must_use]
    pub const fn bare(view: View) -> Self {
        Self {
            view,
            params: RawParams::new(),
        }
    }

    /// Shareable descriptor of this entry, e.g. `/projects?page=2`.
    #[must_use]
    pub fn descriptor(&self) -> String {
        let qs = self.params.to_query_string();
        if qs.is_empty() {
            format!("/{}", self.view.path())
        } else {
            format!("/{}?{qs}", self.view.path())
        }
    }
}

/// Write access to the current location, injected into the query manager.
///
/// All writes are atomic: one call per logical user action, never a partial
/// multi-write.
pub trait LocationPort {
    /// Current query parameters.
    fn params(&self) -> &RawParams;
    /// Current view.
    fn view(&self) -> View;
    /// Push a new history entry with the same view and `next` parameters.
    fn navigate(&mut self, next: RawParams);
    /// Replace the current entry's parameters without growing history.
    fn replace(&mut self, next: RawParams);
}

/// In-memory location with browser-like history.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    /// Visited entries, oldest first.
    entries: Vec<Location>,
    /// Index of the current entry.
    cursor: usize,
}

impl MemoryLocation {
    /// Start at `view` with empty parameters.
    #[must_use]
    pub fn new(view: View) -> Self {
        Self {
            entries: vec![Location::bare(view)],
            cursor: 0,
        }
    }

    /// Current entry.
    #[must_use]
    pub fn current(&self) -> &Location {
        &self.entries[self.cursor]
    }

    /// Number of history entries (used to assert write atomicity in tests).
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    /// What: Visit a different view, optionally carrying parameters.
    ///
    /// Details:
    /// - Pushes a fresh entry and truncates any forward history, exactly like
    ///   a browser navigation after going back.
    pub fn visit(&mut self, view: View, params: RawParams) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(Location { view, params });
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry; returns `true` when the cursor moved.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one entry; returns `true` when the cursor moved.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

impl LocationPort for MemoryLocation {
    fn params(&self) -> &RawParams {
        &self.current().params
    }

    fn view(&self) -> View {
        self.current().view
    }

    fn navigate(&mut self, next: RawParams) {
        let view = self.view();
        self.visit(view, next);
    }

    fn replace(&mut self, next: RawParams) {
        self.entries[self.cursor].params = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// What: Navigation pushes entries and back/forward walk them
    ///
    /// - Input: Two navigations then back, back, forward
    /// - Output: Cursor moves within bounds and params follow
    #[test]
    fn location_history_walk() {
        let mut loc = MemoryLocation::new(View::Projects);
        let mut p1 = RawParams::new();
        p1.set("page", "2");
        loc.navigate(p1.clone());
        let mut p2 = RawParams::new();
        p2.set("page", "3");
        loc.navigate(p2.clone());

        assert_eq!(loc.params(), &p2);
        assert!(loc.back());
        assert_eq!(loc.params(), &p1);
        assert!(loc.back());
        assert!(loc.params().is_empty());
        assert!(!loc.back());
        assert!(loc.forward());
        assert_eq!(loc.params(), &p1);
    }

    /// What: Navigating after going back truncates forward history
    ///
    /// - Input: Navigate, back, navigate elsewhere, forward
    /// - Output: Old forward entry unreachable
    #[test]
    fn location_truncates_forward_on_navigate() {
        let mut loc = MemoryLocation::new(View::Projects);
        let mut p1 = RawParams::new();
        p1.set("page", "2");
        loc.navigate(p1);
        assert!(loc.back());
        let mut p3 = RawParams::new();
        p3.set("search", "ocean");
        loc.navigate(p3.clone());
        assert!(!loc.forward());
        assert_eq!(loc.params(), &p3);
        assert_eq!(loc.history_len(), 2);
    }

    /// What: Replace rewrites in place without growing history
    ///
    /// - Input: One replace on a fresh location
    /// - Output: history_len stays 1
    #[test]
    fn location_replace_in_place() {
        let mut loc = MemoryLocation::new(View::Ideas);
        let mut p = RawParams::new();
        p.set("page", "4");
        loc.replace(p.clone());
        assert_eq!(loc.history_len(), 1);
        assert_eq!(loc.params(), &p);
    }

    /// What: Descriptors render as shareable path + query strings
    ///
    /// - Input: Bare and parameterized locations
    /// - Output: `/projects` and `/projects?page=2` shapes
    #[test]
    fn location_descriptor_shapes() {
        let loc = Location::bare(View::Projects);
        assert_eq!(loc.descriptor(), "/projects");
        let mut p = RawParams::new();
        p.set("page", "2");
        let loc = Location {
            view: View::Projects,
            params: p,
        };
        assert_eq!(loc.descriptor(), "/projects?page=2");
    }

    /// What: Visiting a new view carries its own parameter space
    ///
    /// - Input: Visit ideas from projects with params
    /// - Output: View and params both switch; back restores both
    #[test]
    fn location_visit_switches_view() {
        let mut loc = MemoryLocation::new(View::Projects);
        let mut p = RawParams::new();
        p.set("page", "2");
        loc.navigate(p);
        loc.visit(View::Ideas, RawParams::new());
        assert_eq!(loc.view(), View::Ideas);
        assert!(loc.params().is_empty());
        assert!(loc.back());
        assert_eq!(loc.view(), View::Projects);
        assert_eq!(loc.params().get("page"), Some("2"));
    }
}
