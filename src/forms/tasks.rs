//! Forms for the follow-up tasks attached to a client.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::dates::parse_date;
use crate::domain::task::NewTask;
use crate::domain::types::{ClientId, OwnerId, TaskId, TaskTitle};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct AddTaskForm {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    /// `YYYY-MM-DD`; blank leaves the task undated.
    #[serde(default)]
    pub due_date: String,
}

/// Validated task fields, not yet bound to a client.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskPayload {
    pub title: TaskTitle,
    pub due_date: Option<NaiveDate>,
}

impl TryFrom<AddTaskForm> for TaskPayload {
    type Error = FormError;

    fn try_from(form: AddTaskForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let title = TaskTitle::new(form.title).map_err(|_| FormError::InvalidTitle)?;
        let due_date = match form.due_date.trim() {
            "" => None,
            raw => Some(parse_date(raw).map_err(|_| FormError::InvalidDueDate)?),
        };

        Ok(Self { title, due_date })
    }
}

impl TaskPayload {
    pub fn into_new_task(self, owner_id: OwnerId, client_id: ClientId) -> NewTask {
        NewTask::new(owner_id, client_id, self.title, self.due_date)
    }
}

/// Checkbox toggle; an absent `done` field means unchecked.
#[derive(Debug, Deserialize)]
pub struct ToggleTaskForm {
    pub id: i32,
    #[serde(default)]
    pub done: bool,
}

impl ToggleTaskForm {
    pub fn task_id(&self) -> Result<TaskId, FormError> {
        TaskId::new(self.id).map_err(|_| FormError::InvalidTaskId)
    }
}

#[derive(Debug, Deserialize)]
pub struct TaskIdForm {
    pub id: i32,
}

impl TaskIdForm {
    pub fn task_id(&self) -> Result<TaskId, FormError> {
        TaskId::new(self.id).map_err(|_| FormError::InvalidTaskId)
    }
}
