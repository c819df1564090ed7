//! Application runtime: terminal lifecycle, background workers, and the
//! event loop.

mod runtime;
mod terminal;

pub use runtime::run;
