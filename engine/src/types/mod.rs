//! Data carriers exchanged with the calculator
//!
//! - `post` - social post records fed in by the ingestion side
//! - `params` - per-run stat label and date range
//! - `stats` - immutable result tree

mod params;
mod post;
mod stats;

pub use params::CalculationParameters;
pub use post::PostRecord;
pub use stats::StatisticsNode;
