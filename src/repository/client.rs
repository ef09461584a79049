use diesel::prelude::*;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::{ClientId, ClientStatus, OwnerId};
use crate::models::client::{
    Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientListQuery, ClientReader, ClientWriter, DieselRepository};
use crate::schema::clients;

impl ClientReader for DieselRepository {
    fn get_client(&self, owner_id: &OwnerId, id: ClientId) -> RepositoryResult<Option<Client>> {
        let mut conn = self.conn()?;

        let client = clients::table
            .filter(clients::id.eq(id.get()))
            .filter(clients::owner_id.eq(owner_id.as_str()))
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Client::try_from).transpose()?)
    }

    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Vec<Client>> {
        let mut conn = self.conn()?;

        let mut items = clients::table
            .filter(clients::owner_id.eq(query.owner_id.as_str()))
            .into_boxed();

        if let Some(status) = query.status() {
            items = items.filter(clients::status.eq(status.as_str()));
        }

        let clients = items
            .order((clients::created_at.desc(), clients::id.desc()))
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(Client::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        // Text search runs in memory to get Unicode case folding.
        Ok(query.filter.apply(clients))
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;

        let created = diesel::insert_into(clients::table)
            .values(&DbNewClient::from(new_client))
            .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(created)?)
    }

    fn update_client(
        &self,
        owner_id: &OwnerId,
        id: ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;

        let target = clients::table
            .filter(clients::id.eq(id.get()))
            .filter(clients::owner_id.eq(owner_id.as_str()));

        let updated = diesel::update(target)
            .set(&DbUpdateClient::from(updates))
            .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(updated)?)
    }

    fn update_client_status(
        &self,
        owner_id: &OwnerId,
        id: ClientId,
        status: ClientStatus,
    ) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;

        let target = clients::table
            .filter(clients::id.eq(id.get()))
            .filter(clients::owner_id.eq(owner_id.as_str()));

        let updated = diesel::update(target)
            .set(clients::status.eq(status.as_str()))
            .get_result::<DbClient>(&mut conn)?;

        Ok(Client::try_from(updated)?)
    }

    fn delete_client(&self, owner_id: &OwnerId, id: ClientId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            clients::table
                .filter(clients::id.eq(id.get()))
                .filter(clients::owner_id.eq(owner_id.as_str())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
