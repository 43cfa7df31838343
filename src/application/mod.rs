// Application layer - use cases and orchestration.
// The service drives the ledger through the add/delete protocol so that
// totals, budget and percentages are always refreshed together.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
