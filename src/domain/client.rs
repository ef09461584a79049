use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, ClientName, ClientStatus, CompanyName, OwnerId};

/// A deal tracked in a tenant's sales pipeline.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub owner_id: OwnerId,
    pub name: ClientName,
    pub company: Option<CompanyName>,
    pub status: ClientStatus,
    /// Expected deal amount; `None` when not estimated yet.
    pub value: Option<f64>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewClient {
    pub owner_id: OwnerId,
    pub name: ClientName,
    pub company: Option<CompanyName>,
    pub status: ClientStatus,
    pub value: Option<f64>,
}

impl NewClient {
    #[must_use]
    pub fn new(
        owner_id: OwnerId,
        name: ClientName,
        company: Option<CompanyName>,
        status: ClientStatus,
        value: Option<f64>,
    ) -> Self {
        Self {
            owner_id,
            name,
            company,
            status,
            value: value.filter(|v| v.is_finite() && *v >= 0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateClient {
    pub name: ClientName,
    pub company: Option<CompanyName>,
    pub status: ClientStatus,
    pub value: Option<f64>,
}

impl UpdateClient {
    #[must_use]
    pub fn new(
        name: ClientName,
        company: Option<CompanyName>,
        status: ClientStatus,
        value: Option<f64>,
    ) -> Self {
        Self {
            name,
            company,
            status,
            value: value.filter(|v| v.is_finite() && *v >= 0.0),
        }
    }
}
