use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, NewClient as DomainNewClient, UpdateClient as DomainUpdateClient,
};
use crate::domain::types::{
    ClientId, ClientName, ClientStatus, CompanyName, OwnerId, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub owner_id: String,
    pub name: String,
    pub company: Option<String>,
    pub status: String,
    pub value: Option<f64>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub owner_id: &'a str,
    pub name: &'a str,
    pub company: Option<&'a str>,
    pub status: &'a str,
    pub value: Option<f64>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Client`] record; `None` clears the column.
pub struct UpdateClient<'a> {
    pub name: &'a str,
    pub company: Option<&'a str>,
    pub status: &'a str,
    pub value: Option<f64>,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::try_from(client.id)?,
            owner_id: OwnerId::new(client.owner_id)?,
            name: ClientName::new(client.name)?,
            company: client.company.and_then(|c| CompanyName::new(c).ok()),
            status: ClientStatus::parse_or_default(&client.status),
            value: client.value,
            created_at: client.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            owner_id: client.owner_id.as_str(),
            name: client.name.as_str(),
            company: client.company.as_deref(),
            status: client.status.as_str(),
            value: client.value,
        }
    }
}

impl<'a> From<&'a DomainUpdateClient> for UpdateClient<'a> {
    fn from(client: &'a DomainUpdateClient) -> Self {
        Self {
            name: client.name.as_str(),
            company: client.company.as_deref(),
            status: client.status.as_str(),
            value: client.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn db_client(status: &str, company: Option<&str>) -> Client {
        Client {
            id: 1,
            owner_id: "owner-1".to_string(),
            name: "Jean Dupont".to_string(),
            company: company.map(str::to_string),
            status: status.to_string(),
            value: Some(5000.0),
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn from_domain_new_creates_newclient() {
        let domain = DomainNewClient::new(
            OwnerId::new("owner-1").unwrap(),
            ClientName::new("John").unwrap(),
            Some(CompanyName::new("Acme").unwrap()),
            ClientStatus::Proposed,
            Some(10.0),
        );
        let new: NewClient = (&domain).into();
        assert_eq!(new.owner_id, "owner-1");
        assert_eq!(new.name, "John");
        assert_eq!(new.company, Some("Acme"));
        assert_eq!(new.status, "Proposé");
        assert_eq!(new.value, Some(10.0));
    }

    #[test]
    fn from_domain_update_keeps_cleared_fields_as_none() {
        let domain = DomainUpdateClient::new(
            ClientName::new("Jane").unwrap(),
            None,
            ClientStatus::Won,
            None,
        );
        let update: UpdateClient = (&domain).into();
        assert_eq!(update.name, "Jane");
        assert_eq!(update.company, None);
        assert_eq!(update.status, "Gagné");
        assert_eq!(update.value, None);
    }

    #[test]
    fn client_into_domain() {
        let db = db_client("Qualifié", Some("Logia"));
        let created_at = db.created_at;
        let domain = DomainClient::try_from(db).unwrap();
        assert_eq!(domain.id.get(), 1);
        assert_eq!(domain.owner_id.as_str(), "owner-1");
        assert_eq!(domain.company.as_deref(), Some("Logia"));
        assert_eq!(domain.status, ClientStatus::Qualified);
        assert_eq!(domain.created_at, created_at);
    }

    #[test]
    fn unknown_stored_status_is_coerced_to_default() {
        let domain = DomainClient::try_from(db_client("Archived", None)).unwrap();
        assert_eq!(domain.status, ClientStatus::New);
    }

    #[test]
    fn blank_company_reads_as_none() {
        let domain = DomainClient::try_from(db_client("Perdu", Some("  "))).unwrap();
        assert_eq!(domain.company, None);
    }
}
