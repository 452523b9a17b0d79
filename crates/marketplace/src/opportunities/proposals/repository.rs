use serde::{Deserialize, Serialize};

use super::super::domain::{OpportunityId, ProposalId, SwuOpportunity, SwuProposalSlim};

/// Read/award access to the upstream marketplace API.
pub trait OpportunityRepository: Send + Sync {
    fn fetch_opportunity(
        &self,
        id: &OpportunityId,
    ) -> Result<Option<SwuOpportunity>, RepositoryError>;
    fn list_proposals(&self, id: &OpportunityId) -> Result<Vec<SwuProposalSlim>, RepositoryError>;
    fn award_proposal(&self, id: &ProposalId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("upstream rejected the request: {0}")]
    Rejected(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook announcing an award to subscribers and proponents.
pub trait AwardNotifier: Send + Sync {
    fn publish(&self, notice: AwardNotice) -> Result<(), NotificationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardNotice {
    pub opportunity_id: OpportunityId,
    pub opportunity_title: String,
    pub proposal_id: ProposalId,
    pub proponent_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
