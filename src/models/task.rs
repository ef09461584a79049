use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::task::{NewTask as DomainNewTask, Task as DomainTask};
use crate::domain::types::{ClientId, OwnerId, TaskId, TaskTitle, TypeConstraintError};
use crate::models::client::Client;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(table_name = crate::schema::client_tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::task::Task`].
pub struct Task {
    pub id: i32,
    pub owner_id: String,
    pub client_id: i32,
    pub title: String,
    pub done: bool,
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::client_tasks)]
pub struct NewTask<'a> {
    pub owner_id: &'a str,
    pub client_id: i32,
    pub title: &'a str,
    pub done: bool,
    pub due_date: Option<NaiveDate>,
}

impl TryFrom<Task> for DomainTask {
    type Error = TypeConstraintError;

    fn try_from(task: Task) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TaskId::try_from(task.id)?,
            owner_id: OwnerId::new(task.owner_id)?,
            client_id: ClientId::try_from(task.client_id)?,
            title: TaskTitle::new(task.title)?,
            done: task.done,
            due_date: task.due_date,
            created_at: task.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewTask> for NewTask<'a> {
    fn from(task: &'a DomainNewTask) -> Self {
        Self {
            owner_id: task.owner_id.as_str(),
            client_id: task.client_id.get(),
            title: task.title.as_str(),
            done: task.done,
            due_date: task.due_date,
        }
    }
}
