use chrono::NaiveDate;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::dashboard::Dashboard;
use crate::domain::types::ClientId;
use crate::dto::dashboard::DashboardPageData;
use crate::repository::{ClientListQuery, ClientReader, TaskReader};
use crate::services::{ServiceResult, tenant};

pub const CLIENTS_LOAD_ERROR: &str = "Impossible de charger les clients.";
pub const TASKS_LOAD_ERROR: &str = "Impossible de charger les tâches.";

/// Builds the dashboard for the signed-in tenant.
///
/// Storage failures do not fail the page: without clients no snapshot is
/// produced, and without tasks the snapshot is computed from clients alone.
/// Either way the error message is returned with the data.
pub fn load_dashboard<R>(
    repo: &R,
    user: &AuthenticatedUser,
    today: NaiveDate,
) -> ServiceResult<DashboardPageData>
where
    R: ClientReader + TaskReader + ?Sized,
{
    let owner_id = tenant(user)?;

    let clients = match repo.list_clients(ClientListQuery::new(owner_id.clone())) {
        Ok(clients) => clients,
        Err(err) => {
            log::error!("Failed to load clients for the dashboard: {err}");
            return Ok(DashboardPageData {
                today,
                dashboard: None,
                error: Some(CLIENTS_LOAD_ERROR.to_string()),
            });
        }
    };

    let client_ids: Vec<ClientId> = clients.iter().map(|c| c.id).collect();
    let (tasks, error) = if client_ids.is_empty() {
        (Vec::new(), None)
    } else {
        match repo.list_tasks_for_clients(&owner_id, &client_ids) {
            Ok(tasks) => (tasks, None),
            Err(err) => {
                log::error!("Failed to load tasks for the dashboard: {err}");
                (Vec::new(), Some(TASKS_LOAD_ERROR.to_string()))
            }
        }
    };

    Ok(DashboardPageData {
        today,
        dashboard: Some(Dashboard::compute(&clients, &tasks, today)),
        error,
    })
}
