//! Utility functions shared by the engine

pub mod time;
