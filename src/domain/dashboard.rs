//! Dashboard aggregation over a tenant's clients and tasks.
//!
//! Everything here is a pure function of its inputs: callers fetch rows already
//! scoped to the tenant and pass them in together with the bucketing date.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::task::Task;
use crate::domain::types::{ClientStatus, effective_value};

/// Number of highest-value clients shown on the dashboard.
pub const TOP_CLIENTS_LIMIT: usize = 5;
/// Number of newest clients shown on the dashboard.
pub const RECENT_CLIENTS_LIMIT: usize = 6;
/// Number of tasks listed per highlight bucket.
pub const HIGHLIGHT_LIMIT: usize = 5;

/// Headline figures of the dashboard.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub total_clients: usize,
    pub total_value: f64,
    pub open_value: f64,
    pub won_value: f64,
    pub lost_value: f64,
    /// Percentage of decided deals that were won, `0` when none is decided.
    pub win_rate: u8,
    pub open_tasks: usize,
    pub overdue_tasks: usize,
    pub due_today_tasks: usize,
}

/// Count and value of the clients sharing one status.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PipelineRow {
    pub status: ClientStatus,
    pub count: usize,
    pub value: f64,
}

/// Urgency partition of an open task relative to the bucketing date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskBucket {
    Overdue,
    DueToday,
    NoDueDate,
    Upcoming,
}

impl TaskBucket {
    /// Classifies a task; completed tasks belong to no bucket.
    pub fn of(task: &Task, today: NaiveDate) -> Option<Self> {
        if task.done {
            return None;
        }
        Some(match task.due_date {
            None => TaskBucket::NoDueDate,
            Some(due) if due < today => TaskBucket::Overdue,
            Some(due) if due == today => TaskBucket::DueToday,
            Some(_) => TaskBucket::Upcoming,
        })
    }
}

/// Open tasks needing attention, truncated for display.
///
/// The `*_count` fields hold the untruncated bucket sizes.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TaskHighlights {
    pub overdue: Vec<Task>,
    pub due_today: Vec<Task>,
    pub no_due: Vec<Task>,
    pub overdue_count: usize,
    pub due_today_count: usize,
    pub no_due_count: usize,
}

impl TaskHighlights {
    fn push(&mut self, bucket: TaskBucket, task: &Task) {
        let (list, count) = match bucket {
            TaskBucket::Overdue => (&mut self.overdue, &mut self.overdue_count),
            TaskBucket::DueToday => (&mut self.due_today, &mut self.due_today_count),
            TaskBucket::NoDueDate => (&mut self.no_due, &mut self.no_due_count),
            TaskBucket::Upcoming => return,
        };
        *count += 1;
        if list.len() < HIGHLIGHT_LIMIT {
            list.push(task.clone());
        }
    }
}

/// Complete dashboard snapshot, recomputed on every request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dashboard {
    pub kpis: Kpis,
    /// One row per status, in pipeline display order.
    pub pipeline: [PipelineRow; 5],
    pub top_clients: Vec<Client>,
    pub recent_clients: Vec<Client>,
    pub highlights: TaskHighlights,
}

impl Dashboard {
    /// Folds the tenant's rows into a snapshot.
    ///
    /// `clients` must be ordered newest first; `tasks` are expected to belong
    /// to those clients. Ownership is not re-checked here.
    pub fn compute(clients: &[Client], tasks: &[Task], today: NaiveDate) -> Self {
        let mut counts = [0usize; 5];
        let mut values = [0f64; 5];
        let mut kpis = Kpis {
            total_clients: clients.len(),
            ..Kpis::default()
        };

        for client in clients {
            let value = effective_value(client.value);
            let slot = client.status.index();
            counts[slot] += 1;
            values[slot] += value;
            kpis.total_value += value;
            match client.status {
                status if status.is_open() => kpis.open_value += value,
                ClientStatus::Won => kpis.won_value += value,
                _ => kpis.lost_value += value,
            }
        }

        kpis.win_rate = win_rate(
            counts[ClientStatus::Won.index()],
            counts[ClientStatus::Lost.index()],
        );

        let mut highlights = TaskHighlights::default();
        for task in tasks {
            if let Some(bucket) = TaskBucket::of(task, today) {
                kpis.open_tasks += 1;
                highlights.push(bucket, task);
            }
        }
        kpis.overdue_tasks = highlights.overdue_count;
        kpis.due_today_tasks = highlights.due_today_count;

        let pipeline = ClientStatus::ALL.map(|status| PipelineRow {
            status,
            count: counts[status.index()],
            value: values[status.index()],
        });

        Self {
            kpis,
            pipeline,
            top_clients: top_clients(clients, TOP_CLIENTS_LIMIT),
            recent_clients: clients.iter().take(RECENT_CLIENTS_LIMIT).cloned().collect(),
            highlights,
        }
    }
}

/// Rounded percentage of won deals among decided ones.
///
/// Defined as `0` when no deal is decided yet.
pub fn win_rate(won: usize, lost: usize) -> u8 {
    let decided = won + lost;
    if decided == 0 {
        return 0;
    }
    let rate = (won as f64 / decided as f64 * 100.0).round();
    rate.clamp(0.0, 100.0) as u8
}

/// Highest-value clients; equal values keep their input order.
pub fn top_clients(clients: &[Client], limit: usize) -> Vec<Client> {
    let mut ranked: Vec<&Client> = clients.iter().collect();
    ranked.sort_by(|a, b| effective_value(b.value).total_cmp(&effective_value(a.value)));
    ranked.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::dates::add_days;
    use crate::domain::types::{ClientId, ClientName, OwnerId, TaskId, TaskTitle};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
    }

    fn created(seconds: u32) -> NaiveDateTime {
        today().and_hms_opt(8, 0, seconds).unwrap()
    }

    fn client(id: i32, status: ClientStatus, value: Option<f64>) -> Client {
        Client {
            id: ClientId::new(id).unwrap(),
            owner_id: OwnerId::new("owner").unwrap(),
            name: ClientName::new(format!("Client {id}")).unwrap(),
            company: None,
            status,
            value,
            created_at: created(id as u32),
        }
    }

    fn task(id: i32, done: bool, due_date: Option<NaiveDate>) -> Task {
        Task {
            id: TaskId::new(id).unwrap(),
            owner_id: OwnerId::new("owner").unwrap(),
            client_id: ClientId::new(1).unwrap(),
            title: TaskTitle::new(format!("Task {id}")).unwrap(),
            done,
            due_date,
            created_at: created(id as u32),
        }
    }

    fn ids(clients: &[Client]) -> Vec<i32> {
        clients.iter().map(|c| c.id.get()).collect()
    }

    #[test]
    fn won_lost_open_scenario() {
        let clients = vec![
            client(1, ClientStatus::Won, Some(100.0)),
            client(2, ClientStatus::Lost, Some(50.0)),
            client(3, ClientStatus::New, Some(10.0)),
        ];

        let dashboard = Dashboard::compute(&clients, &[], today());

        assert_eq!(dashboard.kpis.total_clients, 3);
        assert_eq!(dashboard.kpis.total_value, 160.0);
        assert_eq!(dashboard.kpis.won_value, 100.0);
        assert_eq!(dashboard.kpis.lost_value, 50.0);
        assert_eq!(dashboard.kpis.open_value, 10.0);
        assert_eq!(dashboard.kpis.win_rate, 50);
    }

    #[test]
    fn pipeline_always_lists_every_status_in_order() {
        let clients = vec![
            client(1, ClientStatus::Proposed, Some(20.0)),
            client(2, ClientStatus::Proposed, Some(5.0)),
            client(3, ClientStatus::Lost, None),
        ];

        let dashboard = Dashboard::compute(&clients, &[], today());

        let statuses: Vec<_> = dashboard.pipeline.iter().map(|row| row.status).collect();
        assert_eq!(statuses, ClientStatus::ALL.to_vec());
        let counts: Vec<_> = dashboard.pipeline.iter().map(|row| row.count).collect();
        assert_eq!(counts, vec![0, 0, 2, 0, 1]);
        assert_eq!(dashboard.pipeline[2].value, 25.0);
        assert_eq!(
            dashboard.pipeline.iter().map(|row| row.count).sum::<usize>(),
            clients.len()
        );
    }

    #[test]
    fn empty_input_yields_zeroed_snapshot() {
        let dashboard = Dashboard::compute(&[], &[], today());

        assert_eq!(dashboard.kpis, Kpis::default());
        assert_eq!(dashboard.pipeline.len(), 5);
        assert!(dashboard.pipeline.iter().all(|row| row.count == 0));
        assert!(dashboard.top_clients.is_empty());
        assert!(dashboard.recent_clients.is_empty());
        assert_eq!(dashboard.highlights, TaskHighlights::default());
    }

    #[test]
    fn malformed_values_contribute_zero() {
        let clients = vec![
            client(1, ClientStatus::Won, Some(f64::NAN)),
            client(2, ClientStatus::Won, Some(f64::INFINITY)),
            client(3, ClientStatus::New, Some(f64::NEG_INFINITY)),
            client(4, ClientStatus::New, None),
            client(5, ClientStatus::Qualified, Some(7.5)),
        ];

        let dashboard = Dashboard::compute(&clients, &[], today());

        assert_eq!(dashboard.kpis.total_clients, 5);
        assert_eq!(dashboard.kpis.total_value, 7.5);
        assert_eq!(dashboard.kpis.won_value, 0.0);
        assert_eq!(dashboard.kpis.open_value, 7.5);
        assert_eq!(dashboard.pipeline[3].count, 2);
        assert_eq!(dashboard.pipeline[3].value, 0.0);
    }

    #[test]
    fn win_rate_policy() {
        assert_eq!(win_rate(0, 0), 0);
        assert_eq!(win_rate(0, 4), 0);
        assert_eq!(win_rate(3, 0), 100);
        assert_eq!(win_rate(1, 2), 33);
        assert_eq!(win_rate(2, 1), 67);
        assert_eq!(win_rate(1, 7), 13);
    }

    #[test]
    fn only_open_deals_without_decisions_have_zero_win_rate() {
        let clients = vec![
            client(1, ClientStatus::New, Some(1.0)),
            client(2, ClientStatus::Proposed, Some(1.0)),
        ];
        assert_eq!(Dashboard::compute(&clients, &[], today()).kpis.win_rate, 0);
    }

    #[test]
    fn tasks_are_triaged_against_today() {
        let yesterday = add_days(today(), -1);
        let tomorrow = add_days(today(), 1);
        let tasks = vec![
            task(1, false, Some(yesterday)),
            task(2, false, Some(today())),
            task(3, false, None),
            task(4, false, Some(tomorrow)),
            task(5, true, Some(yesterday)),
            task(6, true, None),
        ];

        let dashboard = Dashboard::compute(&[], &tasks, today());
        let highlights = &dashboard.highlights;

        assert_eq!(highlights.overdue.iter().map(|t| t.id.get()).collect::<Vec<_>>(), [1]);
        assert_eq!(highlights.due_today.iter().map(|t| t.id.get()).collect::<Vec<_>>(), [2]);
        assert_eq!(highlights.no_due.iter().map(|t| t.id.get()).collect::<Vec<_>>(), [3]);
        assert_eq!(dashboard.kpis.open_tasks, 4);
        assert_eq!(dashboard.kpis.overdue_tasks, 1);
        assert_eq!(dashboard.kpis.due_today_tasks, 1);
    }

    #[test]
    fn task_buckets_are_disjoint_and_cover_open_tasks() {
        let tasks: Vec<Task> = (1..=40)
            .map(|id| {
                let due = match id % 4 {
                    0 => None,
                    n => Some(add_days(today(), i64::from(n) - 2)),
                };
                task(id, id % 7 == 0, due)
            })
            .collect();

        let open = tasks.iter().filter(|t| !t.done).count();
        let upcoming = tasks
            .iter()
            .filter(|t| TaskBucket::of(t, today()) == Some(TaskBucket::Upcoming))
            .count();
        let dashboard = Dashboard::compute(&[], &tasks, today());
        let h = &dashboard.highlights;

        assert_eq!(dashboard.kpis.open_tasks, open);
        assert_eq!(
            h.overdue_count + h.due_today_count + h.no_due_count + upcoming,
            open
        );
        for task in &tasks {
            let buckets = [
                TaskBucket::Overdue,
                TaskBucket::DueToday,
                TaskBucket::NoDueDate,
                TaskBucket::Upcoming,
            ];
            let hits = buckets
                .iter()
                .filter(|b| TaskBucket::of(task, today()) == Some(**b))
                .count();
            assert_eq!(hits, usize::from(!task.done));
        }
    }

    #[test]
    fn highlights_truncate_but_counts_do_not() {
        let overdue = add_days(today(), -3);
        let tasks: Vec<Task> = (1..=8).map(|id| task(id, false, Some(overdue))).collect();

        let dashboard = Dashboard::compute(&[], &tasks, today());

        assert_eq!(dashboard.highlights.overdue.len(), HIGHLIGHT_LIMIT);
        assert_eq!(dashboard.highlights.overdue_count, 8);
        assert_eq!(dashboard.kpis.overdue_tasks, 8);
        let shown: Vec<_> = dashboard.highlights.overdue.iter().map(|t| t.id.get()).collect();
        assert_eq!(shown, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn top_clients_sort_descending_and_keep_ties_stable() {
        let clients = vec![
            client(1, ClientStatus::New, Some(10.0)),
            client(2, ClientStatus::New, Some(50.0)),
            client(3, ClientStatus::New, None),
            client(4, ClientStatus::New, Some(10.0)),
            client(5, ClientStatus::New, Some(50.0)),
            client(6, ClientStatus::New, Some(f64::NAN)),
            client(7, ClientStatus::New, Some(99.0)),
        ];

        let dashboard = Dashboard::compute(&clients, &[], today());

        assert_eq!(ids(&dashboard.top_clients), vec![7, 2, 5, 1, 4]);
        assert_eq!(ids(&top_clients(&clients, 10)), vec![7, 2, 5, 1, 4, 3, 6]);
    }

    #[test]
    fn recent_clients_keep_caller_order() {
        let clients: Vec<Client> = (1..=9)
            .rev()
            .map(|id| client(id, ClientStatus::New, None))
            .collect();

        let dashboard = Dashboard::compute(&clients, &[], today());

        assert_eq!(ids(&dashboard.recent_clients), vec![9, 8, 7, 6, 5, 4]);
    }
}
