//! List-query state: the typed [`params::QueryState`], the location
//! [`codec`], the injected [`location`] port, and the per-view
//! [`manager::ListQuery`] controller.
//!
//! This module is pure (no I/O, no terminal, no network) and is the single
//! home of the pagination/sort/search/filter rules every list view shares.

pub mod codec;
pub mod location;
pub mod manager;
pub mod params;

pub use codec::{QueryPatch, RawParams, decode, encode, to_api_params};
pub use location::{Location, LocationPort, MemoryLocation};
pub use manager::ListQuery;
pub use params::{
    PendingFilterState, QueryState, STATUS_ALL, SortDirection, SortField, View, ViewOptions,
};
