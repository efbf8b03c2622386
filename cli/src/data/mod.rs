//! Data plumbing around the calculator
//!
//! - `reader` - JSON Lines post ingestion
//! - `output` - JSON rendering of result trees

pub mod output;
pub mod reader;

pub use output::write_result;
pub use reader::{ReadSummary, open_input, read_posts};
