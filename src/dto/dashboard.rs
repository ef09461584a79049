use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::dashboard::Dashboard;

/// Data required to render the dashboard template.
#[derive(Debug, Serialize)]
pub struct DashboardPageData {
    /// Bucketing date the highlights were computed against.
    pub today: NaiveDate,
    /// `None` when the clients could not be loaded.
    pub dashboard: Option<Dashboard>,
    /// Load failure to show next to whatever could still be computed.
    pub error: Option<String>,
}
