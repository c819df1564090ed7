//! Application state: the central container, value types, and modal enum.

mod app_state;
pub mod modal;
pub mod types;

pub use app_state::AppState;
pub use modal::Modal;
pub use types::{
    DetailOutcome, DetailQuery, DetailRecord, Focus, Page, PageOutcome, PageQuery, Row,
};
