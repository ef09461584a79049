//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::seed::DemoDataset;
use crate::domain::task::{NewTask, Task};
use crate::domain::types::{ClientId, ClientStatus, OwnerId, TaskId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClientListQuery, ClientReader, ClientWriter, DemoSeedReader, DemoSeedWriter, SeedCounts,
    TaskReader, TaskWriter,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client(&self, owner_id: &OwnerId, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Vec<Client>>;
    }

    impl ClientWriter for Repository {
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
        fn delete_client(&self, owner_id: &OwnerId, id: ClientId) -> RepositoryResult<()>;
    }

    impl TaskReader for Repository {
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

    impl TaskWriter for Repository {
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
        fn delete_client_tasks(
            &self,
            owner_id: &OwnerId,
            client_id: ClientId,
        ) -> RepositoryResult<usize>;
    }

    impl DemoSeedReader for Repository {
        fn is_demo_seeded(&self, owner_id: &OwnerId) -> RepositoryResult<bool>;
    }

    impl DemoSeedWriter for Repository {
        fn seed_demo_data(&self, dataset: &DemoDataset) -> RepositoryResult<Option<SeedCounts>>;
    }
}
