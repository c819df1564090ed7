//! Library entry for Fundsea exposing core logic for integration tests.

pub mod app;
pub mod args;
pub mod config;
pub mod events;
pub mod fetch;
pub mod present;
pub mod query;
pub mod sources;
pub mod state;
pub mod theme;
pub mod ui;
pub mod util;
