use std::sync::Arc;

use tracing::{info, warn};

use super::super::award::{check_award, AwardRejection};
use super::super::domain::{
    OpportunityId, ProposalId, ScoreInvariantViolation, SwuOpportunity, SwuProposalSlim,
};
use super::super::report::{aggregate, ReportCardSummary};
use super::super::scores::ScoreDisplay;
use super::export::{proposals_csv, ExportError};
use super::repository::{AwardNotice, AwardNotifier, OpportunityRepository, RepositoryError};
use super::tab::{update, AwardResult, ProposalsTabMsg, ProposalsTabState, TabCommand, Toast};
use super::views::ProposalsTabView;
use crate::users::UserType;

/// Service composing the upstream repository, the award engine, and the tab state machine.
pub struct ProposalReviewService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    display: ScoreDisplay,
}

/// Result of an award attempt, already folded back into the tab.
#[derive(Debug, Clone)]
pub struct AwardOutcome {
    pub awarded: bool,
    pub state: ProposalsTabState,
    pub toasts: Vec<Toast>,
}

impl<R, N> ProposalReviewService<R, N>
where
    R: OpportunityRepository + 'static,
    N: AwardNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, display: ScoreDisplay) -> Self {
        Self {
            repository,
            notifier,
            display,
        }
    }

    pub fn display(&self) -> &ScoreDisplay {
        &self.display
    }

    /// Fetches a fresh opportunity snapshot and, when viewable, its proposals.
    fn snapshot(
        &self,
        opportunity_id: &OpportunityId,
    ) -> Result<(SwuOpportunity, Vec<SwuProposalSlim>), ProposalServiceError> {
        let opportunity = self
            .repository
            .fetch_opportunity(opportunity_id)?
            .ok_or(ProposalServiceError::OpportunityNotFound)?;

        let proposals = if opportunity.can_view_proposals() {
            self.repository.list_proposals(opportunity_id)?
        } else {
            Vec::new()
        };

        for proposal in &proposals {
            if let Err(violation) = proposal.check_scores() {
                warn!(proposal = %proposal.id, %violation, "rejecting proposal snapshot");
                return Err(violation.into());
            }
        }

        Ok((opportunity, proposals))
    }

    pub fn load_tab(
        &self,
        opportunity_id: &OpportunityId,
        viewer: UserType,
    ) -> Result<ProposalsTabState, ProposalServiceError> {
        if !viewer.is_public_sector() {
            return Err(ProposalServiceError::Forbidden);
        }
        let (opportunity, proposals) = self.snapshot(opportunity_id)?;
        Ok(ProposalsTabState::init(opportunity, viewer, proposals))
    }

    pub fn view(
        &self,
        opportunity_id: &OpportunityId,
        viewer: UserType,
    ) -> Result<ProposalsTabView, ProposalServiceError> {
        let state = self.load_tab(opportunity_id, viewer)?;
        Ok(ProposalsTabView::build(&state, &self.display))
    }

    pub fn report_card(
        &self,
        opportunity_id: &OpportunityId,
    ) -> Result<ReportCardSummary, ProposalServiceError> {
        let (opportunity, proposals) = self.snapshot(opportunity_id)?;
        Ok(aggregate(&opportunity, &proposals).rounded(self.display.decimals))
    }

    /// Awards `proposal_id` and returns the tab rebuilt from a re-fetched snapshot.
    pub fn award(
        &self,
        opportunity_id: &OpportunityId,
        proposal_id: &ProposalId,
        viewer: UserType,
    ) -> Result<AwardOutcome, ProposalServiceError> {
        let state = self.load_tab(opportunity_id, viewer)?;
        let proposal = state
            .proposal(proposal_id)
            .ok_or(ProposalServiceError::ProposalNotFound)?;
        check_award(&state.opportunity, proposal)?;

        let (mut state, commands) = update(state, ProposalsTabMsg::Award(proposal_id.clone()));
        let mut toasts = Vec::new();
        let mut awarded = false;

        for command in commands {
            match command {
                TabCommand::SubmitAward(id) => {
                    let result = self.submit_award(&state, &id);
                    awarded = matches!(result, AwardResult::Awarded { .. });
                    let (next, follow_up) =
                        update(state, ProposalsTabMsg::AwardCompleted(result));
                    state = next;
                    toasts.extend(follow_up.into_iter().filter_map(|command| match command {
                        TabCommand::Toast(toast) => Some(toast),
                        TabCommand::SubmitAward(_) => None,
                    }));
                }
                TabCommand::Toast(toast) => toasts.push(toast),
            }
        }

        Ok(AwardOutcome {
            awarded,
            state,
            toasts,
        })
    }

    /// Once the upstream award succeeds the outcome is `Awarded`, even when the
    /// re-fetch fails and the pre-award snapshot has to stand in.
    fn submit_award(&self, state: &ProposalsTabState, proposal_id: &ProposalId) -> AwardResult {
        let opportunity = &state.opportunity;
        if let Err(err) = self.repository.award_proposal(proposal_id) {
            warn!(
                opportunity = %opportunity.id,
                proposal = %proposal_id,
                error = %err,
                "award rejected upstream"
            );
            return AwardResult::Failed;
        }
        info!(opportunity = %opportunity.id, proposal = %proposal_id, "proposal awarded");

        let (fresh_opportunity, fresh_proposals) = match self.snapshot(&opportunity.id) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(
                    opportunity = %opportunity.id,
                    error = %err,
                    "re-fetch after award failed, keeping pre-award snapshot"
                );
                (opportunity.clone(), state.proposals.clone())
            }
        };

        let proponent_name = state
            .proposal(proposal_id)
            .map(|proposal| proposal.proponent_name().to_string())
            .unwrap_or_default();
        let notice = AwardNotice {
            opportunity_id: opportunity.id.clone(),
            opportunity_title: opportunity.title.clone(),
            proposal_id: proposal_id.clone(),
            proponent_name,
        };
        if let Err(err) = self.notifier.publish(notice) {
            warn!(opportunity = %opportunity.id, error = %err, "award notification not delivered");
        }

        AwardResult::Awarded {
            opportunity: fresh_opportunity,
            proposals: fresh_proposals,
        }
    }

    /// CSV of all proposals, offered once the code challenge has passed.
    pub fn export_csv(
        &self,
        opportunity_id: &OpportunityId,
        viewer: UserType,
        anonymous: bool,
    ) -> Result<String, ProposalServiceError> {
        let state = self.load_tab(opportunity_id, viewer)?;
        if !state.shows_export_link() {
            return Err(ProposalServiceError::ExportUnavailable);
        }
        Ok(proposals_csv(&state.proposals, &self.display, anonymous)?)
    }
}

/// Error raised by the proposal review service.
#[derive(Debug, thiserror::Error)]
pub enum ProposalServiceError {
    #[error("opportunity not found")]
    OpportunityNotFound,
    #[error("proposal not found on this opportunity")]
    ProposalNotFound,
    #[error("viewer is not permitted to review proposals")]
    Forbidden,
    #[error("proposals cannot be exported yet")]
    ExportUnavailable,
    #[error(transparent)]
    Rejected(#[from] AwardRejection),
    #[error("invalid proposal snapshot: {0}")]
    InvalidSnapshot(#[from] ScoreInvariantViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
