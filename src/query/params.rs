//! Typed list-query state and the per-view options records that configure it.
//!
//! Every list view (funds, projects, ideas, metrics leaderboards) shares one
//! [`QueryState`] shape; what differs per view — default sort, legal sort
//! fields, status vocabulary, backend parameter names — is captured in a
//! [`ViewOptions`] record instead of being re-implemented per page.

use std::collections::BTreeSet;

/// Sentinel status meaning "no filter applied".
pub const STATUS_ALL: &str = "all";

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending (`asc` on the wire).
    Ascending,
    /// Descending (`desc` on the wire).
    Descending,
}

impl SortDirection {
    /// Return the wire/query-string form of this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Parse a direction from its wire form; unknown input yields `None`.
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Some(Self::Ascending),
            "desc" => Some(Self::Descending),
            _ => None,
        }
    }

    /// Return the opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// One legal sort field of a view.
#[derive(Debug, Clone, Copy)]
pub struct SortField {
    /// Query-string and backend value (e.g. `created_at`).
    pub value: &'static str,
    /// Human-readable menu label.
    pub label: &'static str,
    /// Direction adopted when this field is newly selected.
    pub natural_dir: SortDirection,
}

/// Declarative per-view configuration for the list query machinery.
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    /// Default sort field when the location carries none.
    pub default_order_by: &'static str,
    /// Default sort direction when the location carries none.
    pub default_order_dir: SortDirection,
    /// Default page size.
    pub default_limit: u32,
    /// Legal sort fields; membership is validated on decode.
    pub sort_fields: &'static [SortField],
    /// Legal status values including the leading [`STATUS_ALL`] sentinel.
    pub statuses: &'static [&'static str],
    /// Backend name of the status parameter (`funding_status` for projects).
    pub status_param: &'static str,
    /// Backend name of the ID-set parameter (`fund_ids` for projects).
    pub ids_param: &'static str,
    /// Whether the view exposes a free-text search box.
    pub supports_search: bool,
    /// Whether the view re-fetches the current page on terminal focus.
    pub revalidate_on_focus: bool,
}

impl ViewOptions {
    /// Whether `field` is a legal sort field for this view.
    #[must_use]
    pub fn is_sort_field(&self, field: &str) -> bool {
        self.sort_fields.iter().any(|f| f.value == field)
    }

    /// Natural direction for `field`, or the view default when unknown.
    #[must_use]
    pub fn natural_dir(&self, field: &str) -> SortDirection {
        self.sort_fields
            .iter()
            .find(|f| f.value == field)
            .map_or(self.default_order_dir, |f| f.natural_dir)
    }

    /// Whether `status` belongs to this view's vocabulary.
    #[must_use]
    pub fn is_status(&self, status: &str) -> bool {
        self.statuses.iter().any(|s| *s == status)
    }
}

/// The browsable views of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Top-level funds with their campaigns.
    Funds,
    /// Paginated project list (optionally scoped to a campaign).
    Projects,
    /// Paginated idea list (optionally scoped to a campaign).
    Ideas,
    /// Uniqueness-score leaderboard.
    Uniqueness,
    /// Social-impact leaderboard.
    SocialImpact,
    /// Environmental-impact leaderboard.
    EnvironmentalImpact,
    /// SDG-alignment leaderboard.
    Sdg,
}

/// Sort fields for the projects view.
const PROJECT_SORTS: &[SortField] = &[
    SortField {
        value: "id",
        label: "ID",
        natural_dir: SortDirection::Descending,
    },
    SortField {
        value: "title",
        label: "Title",
        natural_dir: SortDirection::Ascending,
    },
    SortField {
        value: "created_at",
        label: "Date Created",
        natural_dir: SortDirection::Descending,
    },
    SortField {
        value: "updated_at",
        label: "Last Updated",
        natural_dir: SortDirection::Descending,
    },
    SortField {
        value: "requested_fund",
        label: "Funding Amount",
        natural_dir: SortDirection::Descending,
    },
];

/// Sort fields for the ideas view.
const IDEA_SORTS: &[SortField] = &[
    SortField {
        value: "id",
        label: "ID",
        natural_dir: SortDirection::Ascending,
    },
    SortField {
        value: "title",
        label: "Title",
        natural_dir: SortDirection::Ascending,
    },
    SortField {
        value: "created_at",
        label: "Date Created",
        natural_dir: SortDirection::Descending,
    },
    SortField {
        value: "kudo_count",
        label: "Kudos",
        natural_dir: SortDirection::Descending,
    },
];

/// Sort fields for the funds view.
const FUND_SORTS: &[SortField] = &[
    SortField {
        value: "name",
        label: "Name",
        natural_dir: SortDirection::Ascending,
    },
    SortField {
        value: "created_at",
        label: "Date Created",
        natural_dir: SortDirection::Descending,
    },
    SortField {
        value: "total",
        label: "Total Funding",
        natural_dir: SortDirection::Descending,
    },
];

/// Single-field sort set used by each metrics leaderboard.
const fn metric_sorts(value: &'static str, label: &'static str) -> [SortField; 2] {
    [
        SortField {
            value,
            label,
            natural_dir: SortDirection::Descending,
        },
        SortField {
            value: "title",
            label: "Title",
            natural_dir: SortDirection::Ascending,
        },
    ]
}

/// Sort fields for the uniqueness leaderboard.
const UNIQUENESS_SORTS: [SortField; 2] = metric_sorts("uniqueness_score", "Uniqueness");
/// Sort fields for the social-impact leaderboard.
const SOCIAL_SORTS: [SortField; 2] = metric_sorts("social_impact", "Social Impact");
/// Sort fields for the environmental-impact leaderboard.
const ENVIRONMENTAL_SORTS: [SortField; 2] =
    metric_sorts("environmental_impact", "Environmental Impact");
/// Sort fields for the SDG leaderboard.
const SDG_SORTS: [SortField; 2] = metric_sorts("sdg_confidence", "SDG Confidence");

/// Funding statuses accepted by the projects view.
const PROJECT_STATUSES: &[&str] = &[STATUS_ALL, "Funded", "NotFunded"];
/// Views without a status filter still carry the sentinel.
const NO_STATUSES: &[&str] = &[STATUS_ALL];

/// Shared options for the four metrics leaderboards.
const fn metric_options(sorts: &'static [SortField]) -> ViewOptions {
    ViewOptions {
        default_order_by: sorts[0].value,
        default_order_dir: SortDirection::Descending,
        default_limit: 10,
        sort_fields: sorts,
        statuses: NO_STATUSES,
        status_param: "status",
        ids_param: "ids",
        supports_search: false,
        revalidate_on_focus: false,
    }
}

/// Options record for the projects view.
pub const PROJECTS_OPTIONS: ViewOptions = ViewOptions {
    default_order_by: "id",
    default_order_dir: SortDirection::Descending,
    default_limit: 10,
    sort_fields: PROJECT_SORTS,
    statuses: PROJECT_STATUSES,
    status_param: "funding_status",
    ids_param: "fund_ids",
    supports_search: true,
    revalidate_on_focus: true,
};

/// Options record for the ideas view.
pub const IDEAS_OPTIONS: ViewOptions = ViewOptions {
    default_order_by: "id",
    default_order_dir: SortDirection::Ascending,
    default_limit: 10,
    sort_fields: IDEA_SORTS,
    statuses: NO_STATUSES,
    status_param: "status",
    ids_param: "fund_ids",
    supports_search: true,
    revalidate_on_focus: true,
};

/// Options record for the funds view.
pub const FUNDS_OPTIONS: ViewOptions = ViewOptions {
    default_order_by: "name",
    default_order_dir: SortDirection::Ascending,
    default_limit: 5,
    sort_fields: FUND_SORTS,
    statuses: NO_STATUSES,
    status_param: "status",
    ids_param: "ids",
    supports_search: false,
    revalidate_on_focus: true,
};

impl View {
    /// Options record configuring the list machinery for this view.
    #[must_use]
    pub const fn options(self) -> &'static ViewOptions {
        match self {
            Self::Funds => &FUNDS_OPTIONS,
            Self::Projects => &PROJECTS_OPTIONS,
            Self::Ideas => &IDEAS_OPTIONS,
            Self::Uniqueness => {
                const OPTS: ViewOptions = metric_options(&UNIQUENESS_SORTS);
                &OPTS
            }
            Self::SocialImpact => {
                const OPTS: ViewOptions = metric_options(&SOCIAL_SORTS);
                &OPTS
            }
            Self::EnvironmentalImpact => {
                const OPTS: ViewOptions = metric_options(&ENVIRONMENTAL_SORTS);
                &OPTS
            }
            Self::Sdg => {
                const OPTS: ViewOptions = metric_options(&SDG_SORTS);
                &OPTS
            }
        }
    }

    /// Display title for pane headers and breadcrumbs.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Funds => "Funds",
            Self::Projects => "Projects",
            Self::Ideas => "Ideas",
            Self::Uniqueness => "Uniqueness",
            Self::SocialImpact => "Social Impact",
            Self::EnvironmentalImpact => "Environmental Impact",
            Self::Sdg => "SDG Alignment",
        }
    }

    /// Backend collection path segment.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Funds => "funds",
            Self::Projects => "projects",
            Self::Ideas => "ideas",
            Self::Uniqueness => "metrics/uniqueness",
            Self::SocialImpact => "metrics/social-impact",
            Self::EnvironmentalImpact => "metrics/environmental-impact",
            Self::Sdg => "metrics/sdg",
        }
    }

    /// Cycle order used by the view-switch key.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Funds => Self::Projects,
            Self::Projects => Self::Ideas,
            Self::Ideas => Self::Uniqueness,
            Self::Uniqueness => Self::SocialImpact,
            Self::SocialImpact => Self::EnvironmentalImpact,
            Self::EnvironmentalImpact => Self::Sdg,
            Self::Sdg => Self::Funds,
        }
    }
}

/// The applied, navigable state of a list view, derived fresh from the
/// location on every read. Never mutated in place; changes go through the
/// codec's `encode` and a location write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    /// Current page, always >= 1.
    pub page: u32,
    /// Page size, always >= 1.
    pub limit: u32,
    /// Validated sort field.
    pub order_by: String,
    /// Sort direction.
    pub order_dir: SortDirection,
    /// Free-text search; empty means absent.
    pub search: String,
    /// Status filter; [`STATUS_ALL`] means absent.
    pub status: String,
    /// Selected fund IDs for cross-filtering; empty means absent.
    pub ids: BTreeSet<u64>,
}

impl QueryState {
    /// The filter-relevant projection compared against pending edits.
    #[must_use]
    pub fn filter_projection(&self) -> PendingFilterState {
        PendingFilterState {
            status: self.status.clone(),
            ids: self.ids.clone(),
        }
    }

    /// Count of active filters: search present, status not "all", IDs chosen.
    #[must_use]
    pub fn active_filters_count(&self) -> usize {
        usize::from(!self.search.is_empty())
            + usize::from(self.status != STATUS_ALL)
            + usize::from(!self.ids.is_empty())
    }
}

/// Working copy of the confirmation-gated filters (status + fund IDs).
///
/// Seeded from the applied [`QueryState`] when a list view mounts, edited
/// freely by the filter menu, and either committed via apply or discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFilterState {
    /// Pending status selection.
    pub status: String,
    /// Pending fund-ID selection.
    pub ids: BTreeSet<u64>,
}

impl Default for PendingFilterState {
    fn default() -> Self {
        Self {
            status: STATUS_ALL.to_owned(),
            ids: BTreeSet::new(),
        }
    }
}
