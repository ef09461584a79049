//! Listing and export filter over a tenant's clients.

use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::types::ClientStatus;

/// Sentinel accepted in query strings to disable the status filter.
pub const ALL_STATUSES: &str = "all";

/// Status restriction applied to a client listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ClientStatus),
}

impl StatusFilter {
    /// Blank, `all` and unknown labels disable the filter.
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() || raw == ALL_STATUSES {
            return StatusFilter::All;
        }
        match raw.parse::<ClientStatus>() {
            Ok(status) => StatusFilter::Only(status),
            Err(err) => {
                log::warn!("Ignoring status filter: {err}");
                StatusFilter::All
            }
        }
    }

    pub fn matches(self, status: ClientStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => expected == status,
        }
    }

    /// Value echoed back to the listing form.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => ALL_STATUSES,
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Free-text search combined with a status restriction.
///
/// A client matches when the search is empty or its name or company contains
/// the search text (case-insensitive), and its status passes the status
/// filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientFilter {
    search: Option<String>,
    needle: Option<String>,
    status: StatusFilter,
}

impl ClientFilter {
    pub fn new(search: Option<&str>, status: StatusFilter) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let needle = search.as_deref().map(str::to_lowercase);
        Self {
            search,
            needle,
            status,
        }
    }

    /// Builds a filter from raw query string parameters.
    pub fn from_params(search: Option<&str>, status: Option<&str>) -> Self {
        Self::new(search, StatusFilter::parse(status))
    }

    /// Trimmed search text, if any.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    pub fn is_noop(&self) -> bool {
        self.needle.is_none() && self.status == StatusFilter::All
    }

    pub fn matches(&self, client: &Client) -> bool {
        self.status.matches(client.status) && self.matches_text(client)
    }

    fn matches_text(&self, client: &Client) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        client.name.to_lowercase().contains(needle)
            || client
                .company
                .as_ref()
                .is_some_and(|company| company.to_lowercase().contains(needle))
    }

    /// Keeps matching clients, preserving their order.
    pub fn apply(&self, mut clients: Vec<Client>) -> Vec<Client> {
        if !self.is_noop() {
            clients.retain(|client| self.matches(client));
        }
        clients
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::types::{ClientId, ClientName, CompanyName, OwnerId};

    fn client(id: i32, name: &str, company: Option<&str>, status: ClientStatus) -> Client {
        Client {
            id: ClientId::new(id).unwrap(),
            owner_id: OwnerId::new("owner-1").unwrap(),
            name: ClientName::new(name).unwrap(),
            company: company.map(|c| CompanyName::new(c).unwrap()),
            status,
            value: None,
            created_at: NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, id as u32)
                .unwrap(),
        }
    }

    fn sample() -> Vec<Client> {
        vec![
            client(3, "Marc Tremblay", Some("Logia Inc."), ClientStatus::Qualified),
            client(2, "Sarah Nguyen", Some("Nordik Studio"), ClientStatus::Proposed),
            client(1, "Olivier Roy", None, ClientStatus::Lost),
        ]
    }

    fn ids(clients: &[Client]) -> Vec<i32> {
        clients.iter().map(|c| c.id.get()).collect()
    }

    #[test]
    fn empty_query_and_all_status_is_noop() {
        let filter = ClientFilter::from_params(Some("   "), Some("all"));
        assert!(filter.is_noop());
        assert_eq!(filter.apply(sample()), sample());

        let filter = ClientFilter::from_params(None, None);
        assert_eq!(filter.apply(sample()), sample());
    }

    #[test]
    fn search_matches_name_or_company_case_insensitively() {
        let by_name = ClientFilter::from_params(Some("SARAH"), None);
        assert_eq!(ids(&by_name.apply(sample())), vec![2]);

        let by_company = ClientFilter::from_params(Some("logia"), None);
        assert_eq!(ids(&by_company.apply(sample())), vec![3]);

        let substring = ClientFilter::from_params(Some("r"), None);
        assert_eq!(ids(&substring.apply(sample())), vec![3, 2, 1]);
    }

    #[test]
    fn search_folds_non_ascii_case() {
        let clients = vec![client(1, "Émilie Côté", Some("ÉCOLE"), ClientStatus::New)];
        let filter = ClientFilter::from_params(Some("école"), None);
        assert_eq!(filter.apply(clients).len(), 1);
    }

    #[test]
    fn missing_company_never_matches_search() {
        let filter = ClientFilter::from_params(Some("inc"), None);
        assert!(!filter.matches(&sample()[2]));
    }

    #[test]
    fn status_filter_is_and_combined_with_search() {
        let filter = ClientFilter::from_params(Some("r"), Some("Proposé"));
        assert_eq!(ids(&filter.apply(sample())), vec![2]);

        let filter = ClientFilter::from_params(None, Some("Gagné"));
        assert!(filter.apply(sample()).is_empty());
    }

    #[test]
    fn unknown_status_filter_is_ignored() {
        assert_eq!(StatusFilter::parse(Some("Closed")), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse(Some("Perdu")),
            StatusFilter::Only(ClientStatus::Lost)
        );
        assert_eq!(StatusFilter::parse(Some("Perdu")).as_str(), "Perdu");
    }
}
