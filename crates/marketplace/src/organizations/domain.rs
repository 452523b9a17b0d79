use serde::{Deserialize, Serialize};
use std::fmt;

use crate::users::UserRef;

/// Identifier wrapper for vendor organizations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationId(pub String);

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Organization reference carried on proposals and affiliations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRef {
    pub id: OrganizationId,
    pub legal_name: String,
}

/// List projection of an organization. `owner` is only populated for viewers
/// allowed to see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSlim {
    pub id: OrganizationId,
    pub legal_name: String,
    #[serde(default)]
    pub owner: Option<UserRef>,
}
