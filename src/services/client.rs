//! Client detail page and the tasks attached to a client.

use chrono::NaiveDate;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::task::Task;
use crate::domain::types::{ClientId, ClientStatus, OwnerId};
use crate::dto::client::ClientPageData;
use crate::forms::tasks::{AddTaskForm, TaskIdForm, TaskPayload, ToggleTaskForm};
use crate::repository::{ClientReader, TaskReader, TaskWriter};
use crate::services::{ServiceError, ServiceResult, client_id, tenant};

pub const CLIENT_NOT_FOUND: &str = "Client introuvable.";
pub const CLIENT_LOAD_ERROR: &str = "Impossible de charger le client.";
pub const TASKS_LOAD_ERROR: &str = "Impossible de charger les tâches du client.";

/// Loads a client with its tasks, newest first.
///
/// Missing clients and storage failures are reported on the page rather
/// than as errors.
pub fn load_client_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id_raw: i32,
    today: NaiveDate,
) -> ServiceResult<ClientPageData>
where
    R: ClientReader + TaskReader + ?Sized,
{
    let owner_id = tenant(user)?;
    let mut page = ClientPageData {
        client: None,
        tasks: Vec::new(),
        statuses: ClientStatus::ALL,
        today,
        error: None,
    };

    let Ok(id) = ClientId::new(client_id_raw) else {
        page.error = Some(CLIENT_NOT_FOUND.to_string());
        return Ok(page);
    };

    match repo.get_client(&owner_id, id) {
        Ok(Some(client)) => page.client = Some(client),
        Ok(None) => {
            page.error = Some(CLIENT_NOT_FOUND.to_string());
            return Ok(page);
        }
        Err(err) => {
            log::error!("Failed to load client {id}: {err}");
            page.error = Some(CLIENT_LOAD_ERROR.to_string());
            return Ok(page);
        }
    }

    match repo.list_client_tasks(&owner_id, id) {
        Ok(tasks) => page.tasks = tasks,
        Err(err) => {
            log::error!("Failed to load tasks of client {id}: {err}");
            page.error = Some(TASKS_LOAD_ERROR.to_string());
        }
    }

    Ok(page)
}

/// Resolves the client from the URL, making sure the tenant owns it.
fn owned_client<R>(repo: &R, owner_id: &OwnerId, client_id_raw: i32) -> ServiceResult<ClientId>
where
    R: ClientReader + ?Sized,
{
    let id = client_id(client_id_raw)?;
    match repo.get_client(owner_id, id) {
        Ok(Some(client)) => Ok(client.id),
        Ok(None) => Err(ServiceError::NotFound),
        Err(err) => {
            log::error!("Failed to load client {id}: {err}");
            Err(err.into())
        }
    }
}

pub fn add_task<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id_raw: i32,
    form: AddTaskForm,
) -> ServiceResult<Task>
where
    R: ClientReader + TaskWriter + ?Sized,
{
    let owner_id = tenant(user)?;
    let payload = TaskPayload::try_from(form)?;
    let id = owned_client(repo, &owner_id, client_id_raw)?;

    repo.create_task(&payload.into_new_task(owner_id, id))
        .map_err(|err| {
            log::error!("Failed to add a task to client {id}: {err}");
            ServiceError::from(err)
        })
}

pub fn toggle_task<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id_raw: i32,
    form: &ToggleTaskForm,
) -> ServiceResult<Task>
where
    R: TaskWriter + ?Sized,
{
    let owner_id = tenant(user)?;
    let id = client_id(client_id_raw)?;
    let task_id = form.task_id()?;

    repo.set_task_done(&owner_id, id, task_id, form.done)
        .map_err(|err| {
            log::error!("Failed to update task {task_id}: {err}");
            ServiceError::from(err)
        })
}

pub fn delete_task<R>(
    repo: &R,
    user: &AuthenticatedUser,
    client_id_raw: i32,
    form: &TaskIdForm,
) -> ServiceResult<()>
where
    R: TaskWriter + ?Sized,
{
    let owner_id = tenant(user)?;
    let id = client_id(client_id_raw)?;
    let task_id = form.task_id()?;

    repo.delete_task(&owner_id, id, task_id).map_err(|err| {
        log::error!("Failed to delete task {task_id}: {err}");
        ServiceError::from(err)
    })
}
