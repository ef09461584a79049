use diesel::prelude::*;

use crate::domain::task::{NewTask, Task};
use crate::domain::types::{ClientId, OwnerId, TaskId};
use crate::models::task::{NewTask as DbNewTask, Task as DbTask};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, TaskReader, TaskWriter};
use crate::schema::client_tasks;

/// Client ids bound per query; stays well under SQLite's variable limit.
const MAX_BOUND_IDS: usize = 500;

fn into_domain(rows: Vec<DbTask>) -> RepositoryResult<Vec<Task>> {
    Ok(rows
        .into_iter()
        .map(Task::try_from)
        .collect::<Result<Vec<_>, _>>()?)
}

impl TaskReader for DieselRepository {
    fn list_tasks_for_clients(
        &self,
        owner_id: &OwnerId,
        client_ids: &[ClientId],
    ) -> RepositoryResult<Vec<Task>> {
        if client_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let ids: Vec<i32> = client_ids.iter().map(|id| id.get()).collect();

        let mut rows = Vec::new();
        for chunk in ids.chunks(MAX_BOUND_IDS) {
            rows.extend(
                client_tasks::table
                    .filter(client_tasks::owner_id.eq(owner_id.as_str()))
                    .filter(client_tasks::client_id.eq_any(chunk.to_vec()))
                    .load::<DbTask>(&mut conn)?,
            );
        }
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        into_domain(rows)
    }

    fn list_client_tasks(
        &self,
        owner_id: &OwnerId,
        client_id: ClientId,
    ) -> RepositoryResult<Vec<Task>> {
        let mut conn = self.conn()?;

        let rows = client_tasks::table
            .filter(client_tasks::owner_id.eq(owner_id.as_str()))
            .filter(client_tasks::client_id.eq(client_id.get()))
            .order((client_tasks::created_at.desc(), client_tasks::id.desc()))
            .load::<DbTask>(&mut conn)?;

        into_domain(rows)
    }
}

impl TaskWriter for DieselRepository {
    fn create_task(&self, new_task: &NewTask) -> RepositoryResult<Task> {
        let mut conn = self.conn()?;

        let created = diesel::insert_into(client_tasks::table)
            .values(&DbNewTask::from(new_task))
            .get_result::<DbTask>(&mut conn)?;

        Ok(Task::try_from(created)?)
    }

    fn set_task_done(
        &self,
        owner_id: &OwnerId,
        client_id: ClientId,
        id: TaskId,
        done: bool,
    ) -> RepositoryResult<Task> {
        let mut conn = self.conn()?;

        let target = client_tasks::table
            .filter(client_tasks::id.eq(id.get()))
            .filter(client_tasks::client_id.eq(client_id.get()))
            .filter(client_tasks::owner_id.eq(owner_id.as_str()));

        let updated = diesel::update(target)
            .set(client_tasks::done.eq(done))
            .get_result::<DbTask>(&mut conn)?;

        Ok(Task::try_from(updated)?)
    }

    fn delete_task(
        &self,
        owner_id: &OwnerId,
        client_id: ClientId,
        id: TaskId,
    ) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            client_tasks::table
                .filter(client_tasks::id.eq(id.get()))
                .filter(client_tasks::client_id.eq(client_id.get()))
                .filter(client_tasks::owner_id.eq(owner_id.as_str())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn delete_client_tasks(
        &self,
        owner_id: &OwnerId,
        client_id: ClientId,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            client_tasks::table
                .filter(client_tasks::client_id.eq(client_id.get()))
                .filter(client_tasks::owner_id.eq(owner_id.as_str())),
        )
        .execute(&mut conn)?;

        Ok(deleted)
    }
}
