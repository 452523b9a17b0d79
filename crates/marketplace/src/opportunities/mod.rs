pub mod award;
pub mod domain;
pub mod ordering;
pub mod presentation;
pub mod proposals;
pub mod report;
pub mod scores;

pub use award::{
    can_opportunity_be_awarded, can_proposal_be_awarded, can_proposals_be_awarded, check_award,
    AwardGate, AwardRejection,
};
pub use domain::{
    OpportunityId, OpportunityReporting, OrganizationId, OrganizationRef, Proponent, ProposalId,
    ScoreInvariantViolation, ScoreKey, SwuOpportunity, SwuOpportunityStatus, SwuProposalSlim,
    SwuProposalStatus, UnknownStatus,
};
pub use ordering::{compare_proposals_for_public_sector, sort_proposals_for_public_sector};
pub use presentation::{
    swu_opportunity_status_to_color, swu_opportunity_status_to_title_case,
    swu_proposal_status_to_color, swu_proposal_status_to_title_case, StatusBadge, ThemeColor,
};
pub use report::{aggregate, score_statistics, ReportCard, ReportCardSummary, ScoreStatistics};
pub use scores::{round_score, ScoreDisplay};
