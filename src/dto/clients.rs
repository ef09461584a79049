use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::filter::{ClientFilter, StatusFilter};
use crate::domain::types::ClientStatus;

/// Query parameters shared by the listing and the export.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ClientsQuery {
    /// Free-text search over name and company.
    pub q: Option<String>,
    /// Status label or `all`.
    pub status: Option<String>,
}

impl ClientsQuery {
    pub fn filter(&self) -> ClientFilter {
        ClientFilter::from_params(self.q.as_deref(), self.status.as_deref())
    }
}

/// Data required to render the clients listing.
#[derive(Debug, Serialize)]
pub struct ClientsPageData {
    pub clients: Vec<Client>,
    /// Search text echoed back to the form.
    pub search: Option<String>,
    pub status: StatusFilter,
    pub statuses: [ClientStatus; 5],
    pub error: Option<String>,
}

/// CSV download produced by the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub body: Vec<u8>,
}
