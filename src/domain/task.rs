use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, OwnerId, TaskId, TaskTitle};

/// A follow-up item attached to a client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub owner_id: OwnerId,
    pub client_id: ClientId,
    pub title: TaskTitle,
    pub done: bool,
    /// Calendar due date without a time component.
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewTask {
    pub owner_id: OwnerId,
    pub client_id: ClientId,
    pub title: TaskTitle,
    pub done: bool,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    #[must_use]
    pub fn new(
        owner_id: OwnerId,
        client_id: ClientId,
        title: TaskTitle,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            owner_id,
            client_id,
            title,
            done: false,
            due_date,
        }
    }

    #[must_use]
    pub fn completed(mut self) -> Self {
        self.done = true;
        self
    }
}
