//! Forms for creating, editing and re-staging clients.

use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::types::{
    ClientName, ClientStatus, CompanyName, OwnerId, parse_deal_value,
};
use crate::forms::FormError;

/// Create and edit form for a client.
///
/// Only the name is mandatory; the other fields degrade to safe defaults.
#[derive(Debug, Deserialize, Validate)]
pub struct ClientForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub company: String,
    #[serde(default)]
    pub status: String,
    /// Free-form amount; `,` is accepted as decimal separator.
    #[serde(default)]
    pub value: String,
}

/// Validated client fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientPayload {
    pub name: ClientName,
    pub company: Option<CompanyName>,
    pub status: ClientStatus,
    pub value: Option<f64>,
}

impl TryFrom<ClientForm> for ClientPayload {
    type Error = FormError;

    fn try_from(form: ClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = ClientName::new(form.name).map_err(|_| FormError::InvalidName)?;
        let company = CompanyName::new(form.company).ok();
        let status = ClientStatus::parse_or_default(&form.status);
        let value = parse_deal_value(&form.value);
        if value.is_none() && !form.value.trim().is_empty() {
            log::warn!("Discarding unusable deal value {:?}", form.value);
        }

        Ok(Self {
            name,
            company,
            status,
            value,
        })
    }
}

impl ClientPayload {
    pub fn into_new_client(self, owner_id: OwnerId) -> NewClient {
        NewClient::new(owner_id, self.name, self.company, self.status, self.value)
    }

    pub fn into_update(self) -> UpdateClient {
        UpdateClient::new(self.name, self.company, self.status, self.value)
    }
}

/// Quick pipeline move from the listing or detail page.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub status: String,
}

impl StatusForm {
    /// Unknown labels fall back to the first pipeline stage.
    pub fn status(&self) -> ClientStatus {
        ClientStatus::parse_or_default(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, company: &str, status: &str, value: &str) -> ClientForm {
        ClientForm {
            name: name.to_string(),
            company: company.to_string(),
            status: status.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn full_form_is_converted() {
        let payload =
            ClientPayload::try_from(form(" Marc Tremblay ", "Logia Inc.", "Qualifié", "12 000"))
                .unwrap();
        assert_eq!(payload.name.as_str(), "Marc Tremblay");
        assert_eq!(payload.company.as_deref(), Some("Logia Inc."));
        assert_eq!(payload.status, ClientStatus::Qualified);
        // "12 000" is not a number.
        assert_eq!(payload.value, None);
    }

    #[test]
    fn comma_decimal_separator_is_accepted() {
        let payload = ClientPayload::try_from(form("Jean", "", "", "1234,5")).unwrap();
        assert_eq!(payload.value, Some(1234.5));
        assert_eq!(payload.company, None);
        assert_eq!(payload.status, ClientStatus::New);
    }

    #[test]
    fn negative_or_non_finite_values_become_none() {
        for raw in ["-5", "inf", "NaN", "abc"] {
            let payload = ClientPayload::try_from(form("Jean", "", "Gagné", raw)).unwrap();
            assert_eq!(payload.value, None, "{raw}");
        }
    }

    #[test]
    fn unknown_status_is_coerced() {
        let payload = ClientPayload::try_from(form("Jean", "", "Archivé", "")).unwrap();
        assert_eq!(payload.status, ClientStatus::New);
        let quick = StatusForm {
            status: "bogus".into(),
        };
        assert_eq!(quick.status(), ClientStatus::New);
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            ClientPayload::try_from(form("", "Acme", "", "")),
            Err(FormError::Validation(_))
        ));
        assert!(matches!(
            ClientPayload::try_from(form("   ", "Acme", "", "")),
            Err(FormError::InvalidName)
        ));
    }

    #[test]
    fn payload_builds_domain_values() {
        let owner = OwnerId::new("owner-1").unwrap();
        let payload = ClientPayload::try_from(form("Amina", "Maple", "Gagné", "24000")).unwrap();
        let new_client = payload.clone().into_new_client(owner.clone());
        assert_eq!(new_client.owner_id, owner);
        assert_eq!(new_client.value, Some(24000.0));
        let update = payload.into_update();
        assert_eq!(update.status, ClientStatus::Won);
    }
}
