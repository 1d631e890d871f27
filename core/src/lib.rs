//! # Compass Core
//!
//! Everything between a [`SearchQuery`](compass_common::query::SearchQuery) and a
//! list of [`Company`](compass_common::company::Company) records:
//!
//! * [`prompt`]: turns a query and the names already shown into model instructions.
//! * [`provider`]: the abstraction over the AI service, plus the Gemini client.
//! * [`parser`]: cleans up and decodes the model's JSON answer.
//! * [`session`]: accumulates pages of results and tracks exhaustion.
//! * [`export`]: CSV serialization of the accumulated list.

pub mod error;
pub mod export;
pub mod parser;
pub mod prompt;
pub mod provider;
pub mod session;
