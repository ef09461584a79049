//! Client listing, export and client-level mutations.

use chrono::NaiveDate;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::client::Client;
use crate::domain::types::ClientStatus;
use crate::dto::clients::{ClientsPageData, ClientsQuery, ExportFile};
use crate::export::{ExportDelimiter, clients_to_csv, export_filename};
use crate::forms::clients::{ClientForm, ClientPayload, StatusForm};
use crate::repository::{ClientListQuery, ClientReader, ClientWriter, TaskWriter};
use crate::services::{ServiceError, ServiceResult, client_id, tenant};

pub const LIST_LOAD_ERROR: &str = "Impossible de charger la liste des clients.";

/// Loads the filtered client listing, newest first.
///
/// A storage failure is reported on the page with an empty list.
pub fn load_clients_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ClientsQuery,
) -> ServiceResult<ClientsPageData>
where
    R: ClientReader + ?Sized,
{
    let owner_id = tenant(user)?;
    let filter = query.filter();
    let search = filter.search().map(str::to_string);
    let status = filter.status();

    let (clients, error) = match repo.list_clients(ClientListQuery::new(owner_id).filter(filter)) {
        Ok(clients) => (clients, None),
        Err(err) => {
            log::error!("Failed to list clients: {err}");
            (Vec::new(), Some(LIST_LOAD_ERROR.to_string()))
        }
    };

    Ok(ClientsPageData {
        clients,
        search,
        status,
        statuses: ClientStatus::ALL,
        error,
    })
}

pub fn create_client<R>(repo: &R, user: &AuthenticatedUser, form: ClientForm) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let owner_id = tenant(user)?;
    let payload = ClientPayload::try_from(form)?;

    repo.create_client(&payload.into_new_client(owner_id))
        .map_err(|err| {
            log::error!("Failed to create a client: {err}");
            ServiceError::from(err)
        })
}

pub fn update_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id_raw: i32,
    form: ClientForm,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let owner_id = tenant(user)?;
    let id = client_id(client_id_raw)?;
    let payload = ClientPayload::try_from(form)?;

    repo.update_client(&owner_id, id, &payload.into_update())
        .map_err(|err| {
            log::error!("Failed to update client {id}: {err}");
            ServiceError::from(err)
        })
}

/// Moves a client to another pipeline stage; unknown labels mean `Nouveau`.
pub fn change_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id_raw: i32,
    form: &StatusForm,
) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let owner_id = tenant(user)?;
    let id = client_id(client_id_raw)?;

    repo.update_client_status(&owner_id, id, form.status())
        .map_err(|err| {
            log::error!("Failed to change status of client {id}: {err}");
            ServiceError::from(err)
        })
}

/// Deletes the client's tasks, then the client.
///
/// The two steps are not atomic; the client is kept when task removal fails.
pub fn delete_client<R>(repo: &R, user: &AuthenticatedUser, client_id_raw: i32) -> ServiceResult<()>
where
    R: ClientWriter + TaskWriter + ?Sized,
{
    let owner_id = tenant(user)?;
    let id = client_id(client_id_raw)?;

    let removed = repo.delete_client_tasks(&owner_id, id).map_err(|err| {
        log::error!("Failed to delete tasks of client {id}: {err}");
        ServiceError::from(err)
    })?;
    log::debug!("Removed {removed} tasks of client {id}");

    repo.delete_client(&owner_id, id).map_err(|err| {
        log::error!("Failed to delete client {id}: {err}");
        ServiceError::from(err)
    })
}

/// Serializes the filtered listing for download.
pub fn export_clients<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: &ClientsQuery,
    delimiter: ExportDelimiter,
    today: NaiveDate,
) -> ServiceResult<ExportFile>
where
    R: ClientReader + ?Sized,
{
    let owner_id = tenant(user)?;

    let clients = repo
        .list_clients(ClientListQuery::new(owner_id).filter(query.filter()))
        .map_err(|err| {
            log::error!("Failed to load clients for export: {err}");
            ServiceError::from(err)
        })?;

    let body = clients_to_csv(&clients, delimiter).map_err(|err| {
        log::error!("Failed to serialize clients: {err}");
        ServiceError::Internal(err.to_string())
    })?;

    Ok(ExportFile {
        filename: export_filename(today),
        body,
    })
}
