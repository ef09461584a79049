//! Claims of the signed-in user as issued by the external auth service.

use serde::{Deserialize, Serialize};

use crate::domain::types::{OwnerId, TypeConstraintError};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Stable user identifier; doubles as the tenant key.
    pub sub: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Tenant identifier every storage call is scoped to.
    pub fn owner_id(&self) -> Result<OwnerId, TypeConstraintError> {
        OwnerId::new(self.sub.as_str())
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
