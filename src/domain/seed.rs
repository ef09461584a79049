//! Fixed demo dataset covering every pipeline status and task bucket.

use chrono::NaiveDate;

use crate::dates::add_days;
use crate::domain::client::NewClient;
use crate::domain::task::NewTask;
use crate::domain::types::{
    ClientId, ClientName, ClientStatus, CompanyName, OwnerId, TaskTitle, TypeConstraintError,
};

struct DemoClient {
    name: &'static str,
    company: Option<&'static str>,
    status: ClientStatus,
    value: f64,
}

struct DemoTask {
    /// Index into [`DEMO_CLIENTS`].
    client: usize,
    title: &'static str,
    done: bool,
    /// Offset from today; `None` leaves the due date unset.
    due_in_days: Option<i64>,
}

const DEMO_CLIENTS: [DemoClient; 5] = [
    DemoClient {
        name: "Marc Tremblay",
        company: Some("Logia Inc."),
        status: ClientStatus::Qualified,
        value: 12000.0,
    },
    DemoClient {
        name: "Sarah Nguyen",
        company: Some("Nordik Studio"),
        status: ClientStatus::Proposed,
        value: 18500.0,
    },
    DemoClient {
        name: "Jean Dupont",
        company: Some("BorealTech"),
        status: ClientStatus::New,
        value: 5000.0,
    },
    DemoClient {
        name: "Amina Diallo",
        company: Some("Maple Retail"),
        status: ClientStatus::Won,
        value: 24000.0,
    },
    DemoClient {
        name: "Olivier Roy",
        company: None,
        status: ClientStatus::Lost,
        value: 8000.0,
    },
];

const DEMO_TASKS: [DemoTask; 5] = [
    DemoTask {
        client: 0,
        title: "Relancer par email",
        done: false,
        due_in_days: Some(0),
    },
    DemoTask {
        client: 1,
        title: "Préparer le devis",
        done: false,
        due_in_days: Some(1),
    },
    DemoTask {
        client: 2,
        title: "Appel découverte",
        done: false,
        due_in_days: Some(-1),
    },
    DemoTask {
        client: 0,
        title: "Renseigner les besoins",
        done: true,
        due_in_days: None,
    },
    DemoTask {
        client: 3,
        title: "Planifier kick-off",
        done: false,
        due_in_days: None,
    },
];

/// Demo task waiting for its client to be stored.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedTask {
    /// Index into [`DemoDataset::clients`].
    pub client_index: usize,
    pub title: TaskTitle,
    pub done: bool,
    pub due_date: Option<NaiveDate>,
}

/// The complete demo dataset for one tenant.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoDataset {
    pub owner_id: OwnerId,
    /// Clients in insertion order.
    pub clients: Vec<NewClient>,
    pub tasks: Vec<PlannedTask>,
}

impl DemoDataset {
    /// Builds the dataset with due dates relative to `today`.
    pub fn build(owner_id: &OwnerId, today: NaiveDate) -> Result<Self, TypeConstraintError> {
        let clients = DEMO_CLIENTS
            .iter()
            .map(|demo| {
                Ok(NewClient::new(
                    owner_id.clone(),
                    ClientName::new(demo.name)?,
                    demo.company.map(CompanyName::new).transpose()?,
                    demo.status,
                    Some(demo.value),
                ))
            })
            .collect::<Result<Vec<_>, TypeConstraintError>>()?;

        let tasks = DEMO_TASKS
            .iter()
            .map(|demo| {
                Ok(PlannedTask {
                    client_index: demo.client,
                    title: TaskTitle::new(demo.title)?,
                    done: demo.done,
                    due_date: demo.due_in_days.map(|days| add_days(today, days)),
                })
            })
            .collect::<Result<Vec<_>, TypeConstraintError>>()?;

        Ok(Self {
            owner_id: owner_id.clone(),
            clients,
            tasks,
        })
    }

    /// Attaches the planned tasks to the stored client ids.
    ///
    /// `client_ids` must follow the order of [`DemoDataset::clients`]; tasks
    /// pointing past the end fall back to the first client.
    pub fn tasks_for(&self, client_ids: &[ClientId]) -> Vec<NewTask> {
        let Some(first) = client_ids.first() else {
            return Vec::new();
        };

        self.tasks
            .iter()
            .map(|planned| {
                let client_id = client_ids.get(planned.client_index).unwrap_or(first);
                let task = NewTask::new(
                    self.owner_id.clone(),
                    *client_id,
                    planned.title.clone(),
                    planned.due_date,
                );
                if planned.done { task.completed() } else { task }
            })
            .collect()
    }
}
