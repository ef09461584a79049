//! Domain entities and the pure reporting engines of the CRM.

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod filter;
pub mod seed;
pub mod task;
pub mod types;
