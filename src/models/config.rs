//! Configuration model loaded from external sources.

use chrono_tz::Tz;
use serde::Deserialize;

use crate::dates::DEFAULT_TIMEZONE;
use crate::export::ExportDelimiter;

/// Settings shared across handlers.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    /// HS256 secret shared with the auth service; also keys the cookies.
    pub secret: String,
    pub auth_service_url: String,
    /// Where unauthenticated visitors are sent.
    pub signin_url: String,
    /// Civil timezone anchoring "today" for due-date triage.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    #[serde(default)]
    pub export_delimiter: ExportDelimiter,
    /// Enables `POST /seed`.
    #[serde(default)]
    pub demo_mode: bool,
}

fn default_timezone() -> Tz {
    DEFAULT_TIMEZONE
}
