//! Command line front end for `post-stats`
//!
//! Reads JSON Lines post records, runs the per-author counting calculator and
//! prints the resulting statistics tree as JSON.

mod app;
pub mod core;
pub mod data;
pub mod utils;
