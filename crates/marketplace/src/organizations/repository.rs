use super::domain::OrganizationSlim;

/// Read access to the organization directory of the upstream API.
pub trait OrganizationRepository: Send + Sync {
    fn list_organizations(&self) -> Result<Vec<OrganizationSlim>, OrganizationRepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OrganizationRepositoryError {
    #[error("organization directory unavailable: {0}")]
    Unavailable(String),
}
