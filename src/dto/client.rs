use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::task::Task;
use crate::domain::types::ClientStatus;

/// Data required to render a client's detail page.
#[derive(Debug, Serialize)]
pub struct ClientPageData {
    /// `None` when the client is missing or could not be loaded.
    pub client: Option<Client>,
    /// Newest first.
    pub tasks: Vec<Task>,
    pub statuses: [ClientStatus; 5],
    pub today: NaiveDate,
    pub error: Option<String>,
}
