//! Configuration module
//!
//! Settings are read from a TOML file in the user's config directory.

pub mod config;

pub use config::Config;
