//! Storage access for clients, tasks and the demo dataset marker.
//!
//! Every read and write takes the tenant's [`OwnerId`]; no method accepts a
//! bare record id, so a caller cannot reach rows belonging to another tenant.

use crate::db::{DbConnection, DbPool};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::filter::{ClientFilter, StatusFilter};
use crate::domain::seed::DemoDataset;
use crate::domain::task::{NewTask, Task};
use crate::domain::types::{ClientId, ClientStatus, OwnerId, TaskId};
use crate::repository::errors::RepositoryResult;

pub mod client;
pub mod demo_seed;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod task;

/// Tenant-scoped client listing request.
///
/// Results are always ordered newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientListQuery {
    pub owner_id: OwnerId,
    pub filter: ClientFilter,
}

impl ClientListQuery {
    pub fn new(owner_id: OwnerId) -> Self {
        Self {
            owner_id,
            filter: ClientFilter::default(),
        }
    }

    pub fn filter(mut self, filter: ClientFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Status to push down into the storage query, if any.
    pub fn status(&self) -> Option<ClientStatus> {
        match self.filter.status() {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(status),
        }
    }
}

pub trait ClientReader {
    fn get_client(&self, owner_id: &OwnerId, id: ClientId) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Vec<Client>>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(
        &self,
        owner_id: &OwnerId,
        id: ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client>;
    fn update_client_status(
        &self,
        owner_id: &OwnerId,
        id: ClientId,
        status: ClientStatus,
    ) -> RepositoryResult<Client>;
    /// Removes the client row only; its tasks must already be gone.
    fn delete_client(&self, owner_id: &OwnerId, id: ClientId) -> RepositoryResult<()>;
}

pub trait TaskReader {
    fn list_tasks_for_clients(
        &self,
        owner_id: &OwnerId,
        client_ids: &[ClientId],
    ) -> RepositoryResult<Vec<Task>>;
    fn list_client_tasks(
        &self,
        owner_id: &OwnerId,
        client_id: ClientId,
    ) -> RepositoryResult<Vec<Task>>;
}

pub trait TaskWriter {
    fn create_task(&self, new_task: &NewTask) -> RepositoryResult<Task>;
    fn set_task_done(
        &self,
        owner_id: &OwnerId,
        client_id: ClientId,
        id: TaskId,
        done: bool,
    ) -> RepositoryResult<Task>;
    fn delete_task(
        &self,
        owner_id: &OwnerId,
        client_id: ClientId,
        id: TaskId,
    ) -> RepositoryResult<()>;
    /// Returns the number of removed tasks.
    fn delete_client_tasks(&self, owner_id: &OwnerId, client_id: ClientId)
    -> RepositoryResult<usize>;
}

pub trait DemoSeedReader {
    fn is_demo_seeded(&self, owner_id: &OwnerId) -> RepositoryResult<bool>;
}

/// Row counts written by a successful demo seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCounts {
    pub clients: usize,
    pub tasks: usize,
}

pub trait DemoSeedWriter {
    /// Stores the dataset and marks the tenant as seeded in one transaction.
    ///
    /// Returns `None` without writing anything when the tenant was already
    /// seeded.
    fn seed_demo_data(&self, dataset: &DemoDataset) -> RepositoryResult<Option<SeedCounts>>;
}

/// Diesel-backed repository shared by all handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}
