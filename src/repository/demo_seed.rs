use diesel::prelude::*;

use crate::domain::seed::DemoDataset;
use crate::domain::types::{ClientId, OwnerId};
use crate::models::client::{Client as DbClient, NewClient as DbNewClient};
use crate::models::demo_seed::NewDemoSeed;
use crate::models::task::NewTask as DbNewTask;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DemoSeedReader, DemoSeedWriter, DieselRepository, SeedCounts};
use crate::schema::{client_tasks, clients, demo_seeds};

impl DemoSeedReader for DieselRepository {
    fn is_demo_seeded(&self, owner_id: &OwnerId) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;

        let seeded = diesel::select(diesel::dsl::exists(
            demo_seeds::table.filter(demo_seeds::owner_id.eq(owner_id.as_str())),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(seeded)
    }
}

impl DemoSeedWriter for DieselRepository {
    fn seed_demo_data(&self, dataset: &DemoDataset) -> RepositoryResult<Option<SeedCounts>> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            // The marker row is claimed first so concurrent seeds cannot both win.
            let claimed = diesel::insert_or_ignore_into(demo_seeds::table)
                .values(&NewDemoSeed {
                    owner_id: dataset.owner_id.as_str(),
                })
                .execute(conn)?;
            if claimed == 0 {
                return Ok(None);
            }

            let mut client_ids = Vec::with_capacity(dataset.clients.len());
            for new_client in &dataset.clients {
                let stored = diesel::insert_into(clients::table)
                    .values(&DbNewClient::from(new_client))
                    .get_result::<DbClient>(conn)?;
                client_ids.push(ClientId::try_from(stored.id)?);
            }

            let tasks = dataset.tasks_for(&client_ids);
            let insertables: Vec<DbNewTask> = tasks.iter().map(DbNewTask::from).collect();
            let inserted_tasks = diesel::insert_into(client_tasks::table)
                .values(&insertables)
                .execute(conn)?;

            Ok(Some(SeedCounts {
                clients: client_ids.len(),
                tasks: inserted_tasks,
            }))
        })
    }
}
