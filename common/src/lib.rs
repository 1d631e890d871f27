//! Shared models and helpers for the compass workspace.
//!
//! * [`company`]: the `Company` record returned by the AI service.
//! * [`query`]: what the user is searching for (industry, location, statuses).
//! * [`config`]: run-wide presentation switches.

pub mod company;
pub mod config;
pub mod query;

mod macros;

#[doc(hidden)]
pub use tracing;
