//! Database models and runtime configuration.

pub mod client;
#[cfg(feature = "server")]
pub mod config;
pub mod demo_seed;
pub mod task;
