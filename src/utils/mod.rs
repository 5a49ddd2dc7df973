//! Utility functions and helpers
//!
//! Application paths and the logging setup shared by both front-ends.

pub mod app_paths;
pub mod dual_logging;
pub mod logging;
