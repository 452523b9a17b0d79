use super::domain::{SwuOpportunity, SwuOpportunityStatus, SwuProposalSlim, SwuProposalStatus};
use serde::Serialize;

/// Only an opportunity whose team scenario evaluation has completed can be awarded.
pub fn can_opportunity_be_awarded(opportunity: &SwuOpportunity) -> bool {
    opportunity.status == SwuOpportunityStatus::EvaluationTeamScenario
}

pub fn can_proposal_be_awarded(proposal: &SwuProposalSlim) -> bool {
    matches!(
        proposal.status,
        SwuProposalStatus::EvaluatedTeamScenario | SwuProposalStatus::NotAwarded
    )
}

/// Award availability for a proposal list, computed once per load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AwardGate {
    pub opportunity_awardable: bool,
    pub any_proposal_awardable: bool,
}

impl AwardGate {
    pub fn evaluate(opportunity: &SwuOpportunity, proposals: &[SwuProposalSlim]) -> Self {
        Self {
            opportunity_awardable: can_opportunity_be_awarded(opportunity),
            any_proposal_awardable: proposals.iter().any(can_proposal_be_awarded),
        }
    }

    pub const fn is_open(&self) -> bool {
        self.opportunity_awardable && self.any_proposal_awardable
    }

    /// Per-row check: the list gate must be open and the row itself eligible.
    pub fn allows(&self, proposal: &SwuProposalSlim) -> bool {
        self.is_open() && can_proposal_be_awarded(proposal)
    }
}

pub fn can_proposals_be_awarded(opportunity: &SwuOpportunity, proposals: &[SwuProposalSlim]) -> bool {
    AwardGate::evaluate(opportunity, proposals).is_open()
}

/// Why an award request was refused before reaching the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AwardRejection {
    #[error("opportunity in status {0:?} cannot be awarded")]
    OpportunityNotAwardable(SwuOpportunityStatus),
    #[error("proposal in status {0:?} cannot be awarded")]
    ProposalNotAwardable(SwuProposalStatus),
    #[error("proposal belongs to a different opportunity")]
    OpportunityMismatch,
}

pub fn check_award(
    opportunity: &SwuOpportunity,
    proposal: &SwuProposalSlim,
) -> Result<(), AwardRejection> {
    if proposal.opportunity_id != opportunity.id {
        return Err(AwardRejection::OpportunityMismatch);
    }
    if !can_opportunity_be_awarded(opportunity) {
        return Err(AwardRejection::OpportunityNotAwardable(opportunity.status));
    }
    if !can_proposal_be_awarded(proposal) {
        return Err(AwardRejection::ProposalNotAwardable(proposal.status));
    }
    Ok(())
}
