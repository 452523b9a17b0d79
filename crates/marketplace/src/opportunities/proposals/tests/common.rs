use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::opportunities::domain::{
    OpportunityId, OpportunityReporting, OrganizationId, OrganizationRef, Proponent, ProposalId,
    SwuOpportunity, SwuOpportunityStatus, SwuProposalSlim, SwuProposalStatus,
};
use crate::opportunities::proposals::repository::{
    AwardNotice, AwardNotifier, NotificationError, OpportunityRepository, RepositoryError,
};
use crate::opportunities::proposals::{proposal_router, ProposalReviewService};
use crate::opportunities::scores::ScoreDisplay;

pub(super) const OPPORTUNITY_ID: &str = "swu-001";

pub(super) fn opportunity(status: SwuOpportunityStatus) -> SwuOpportunity {
    SwuOpportunity {
        id: OpportunityId(OPPORTUNITY_ID.to_string()),
        title: "Digital Permitting Platform".to_string(),
        status,
        reporting: Some(OpportunityReporting {
            num_proposals: Some(4),
        }),
        proposal_deadline: None,
    }
}

pub(super) fn proposal(
    id: &str,
    organization: &str,
    status: SwuProposalStatus,
    total: Option<f64>,
) -> SwuProposalSlim {
    let stage = total.map(|_| 75.0);
    SwuProposalSlim {
        id: ProposalId(id.to_string()),
        opportunity_id: OpportunityId(OPPORTUNITY_ID.to_string()),
        status,
        proponent: Proponent::Organization(OrganizationRef {
            id: OrganizationId(format!("org-{id}")),
            legal_name: organization.to_string(),
        }),
        anonymous_proponent_name: format!("Proponent {id}"),
        questions_score: stage,
        challenge_score: stage,
        scenario_score: stage,
        price_score: stage,
        total_score: total,
        submitted_at: None,
    }
}

pub(super) fn individual(id: &str, name: &str, total: Option<f64>) -> SwuProposalSlim {
    let mut proposal = proposal(id, name, SwuProposalStatus::EvaluatedTeamScenario, total);
    proposal.proponent = Proponent::Individual {
        name: name.to_string(),
    };
    proposal
}

/// Three evaluated proposals plus one still under review, in fetch order.
pub(super) fn evaluated_proposals() -> Vec<SwuProposalSlim> {
    vec![
        proposal(
            "p-1",
            "Cascade Labs",
            SwuProposalStatus::EvaluatedTeamScenario,
            Some(77.0),
        ),
        proposal(
            "p-2",
            "Aurora Systems",
            SwuProposalStatus::EvaluatedTeamScenario,
            Some(92.345),
        ),
        proposal(
            "p-3",
            "Birch Consulting",
            SwuProposalStatus::UnderReviewTeamScenario,
            None,
        ),
        proposal(
            "p-4",
            "Delta Works",
            SwuProposalStatus::Disqualified,
            None,
        ),
    ]
}

pub(super) fn display() -> ScoreDisplay {
    ScoreDisplay {
        decimals: 2,
        placeholder: "-".to_string(),
    }
}

/// Mimics the upstream API: awarding flips the winner to Awarded, other
/// awardable proposals to NotAwarded, and the opportunity to Awarded.
#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    opportunities: Arc<Mutex<HashMap<OpportunityId, SwuOpportunity>>>,
    proposals: Arc<Mutex<Vec<SwuProposalSlim>>>,
}

impl MemoryRepository {
    pub(super) fn seeded(status: SwuOpportunityStatus, proposals: Vec<SwuProposalSlim>) -> Self {
        let repository = Self::default();
        let opportunity = opportunity(status);
        repository
            .opportunities
            .lock()
            .expect("opportunity mutex poisoned")
            .insert(opportunity.id.clone(), opportunity);
        *repository.proposals.lock().expect("proposal mutex poisoned") = proposals;
        repository
    }

    pub(super) fn opportunity_status(&self) -> SwuOpportunityStatus {
        self.opportunities
            .lock()
            .expect("opportunity mutex poisoned")
            .get(&OpportunityId(OPPORTUNITY_ID.to_string()))
            .map(|opportunity| opportunity.status)
            .expect("seeded opportunity")
    }
}

impl OpportunityRepository for MemoryRepository {
    fn fetch_opportunity(
        &self,
        id: &OpportunityId,
    ) -> Result<Option<SwuOpportunity>, RepositoryError> {
        let guard = self.opportunities.lock().expect("opportunity mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_proposals(&self, id: &OpportunityId) -> Result<Vec<SwuProposalSlim>, RepositoryError> {
        let guard = self.proposals.lock().expect("proposal mutex poisoned");
        Ok(guard
            .iter()
            .filter(|proposal| &proposal.opportunity_id == id)
            .cloned()
            .collect())
    }

    fn award_proposal(&self, id: &ProposalId) -> Result<(), RepositoryError> {
        let mut proposals = self.proposals.lock().expect("proposal mutex poisoned");
        let opportunity_id = proposals
            .iter()
            .find(|proposal| &proposal.id == id)
            .map(|proposal| proposal.opportunity_id.clone())
            .ok_or(RepositoryError::NotFound)?;

        for proposal in proposals.iter_mut() {
            if &proposal.id == id {
                proposal.status = SwuProposalStatus::Awarded;
            } else if proposal.status == SwuProposalStatus::EvaluatedTeamScenario {
                proposal.status = SwuProposalStatus::NotAwarded;
            }
        }

        let mut opportunities = self.opportunities.lock().expect("opportunity mutex poisoned");
        if let Some(opportunity) = opportunities.get_mut(&opportunity_id) {
            opportunity.status = SwuOpportunityStatus::Awarded;
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    notices: Arc<Mutex<Vec<AwardNotice>>>,
}

impl MemoryNotifier {
    pub(super) fn notices(&self) -> Vec<AwardNotice> {
        self.notices.lock().expect("notice mutex poisoned").clone()
    }
}

impl AwardNotifier for MemoryNotifier {
    fn publish(&self, notice: AwardNotice) -> Result<(), NotificationError> {
        self.notices
            .lock()
            .expect("notice mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl AwardNotifier for FailingNotifier {
    fn publish(&self, _notice: AwardNotice) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("smtp offline".to_string()))
    }
}

/// Serves reads from a seeded repository but refuses every award.
pub(super) struct RejectingRepository(pub(super) MemoryRepository);

impl OpportunityRepository for RejectingRepository {
    fn fetch_opportunity(
        &self,
        id: &OpportunityId,
    ) -> Result<Option<SwuOpportunity>, RepositoryError> {
        self.0.fetch_opportunity(id)
    }

    fn list_proposals(&self, id: &OpportunityId) -> Result<Vec<SwuProposalSlim>, RepositoryError> {
        self.0.list_proposals(id)
    }

    fn award_proposal(&self, _id: &ProposalId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Rejected("award window closed".to_string()))
    }
}

/// Accepts awards, then times out on every read that follows.
pub(super) struct ReadsFailAfterAward {
    pub(super) inner: MemoryRepository,
    awarded: AtomicBool,
}

impl ReadsFailAfterAward {
    pub(super) fn new(inner: MemoryRepository) -> Self {
        Self {
            inner,
            awarded: AtomicBool::new(false),
        }
    }

    fn check_reads(&self) -> Result<(), RepositoryError> {
        if self.awarded.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("timeout".to_string()));
        }
        Ok(())
    }
}

impl OpportunityRepository for ReadsFailAfterAward {
    fn fetch_opportunity(
        &self,
        id: &OpportunityId,
    ) -> Result<Option<SwuOpportunity>, RepositoryError> {
        self.check_reads()?;
        self.inner.fetch_opportunity(id)
    }

    fn list_proposals(&self, id: &OpportunityId) -> Result<Vec<SwuProposalSlim>, RepositoryError> {
        self.check_reads()?;
        self.inner.list_proposals(id)
    }

    fn award_proposal(&self, id: &ProposalId) -> Result<(), RepositoryError> {
        self.inner.award_proposal(id)?;
        self.awarded.store(true, Ordering::SeqCst);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl OpportunityRepository for UnavailableRepository {
    fn fetch_opportunity(
        &self,
        _id: &OpportunityId,
    ) -> Result<Option<SwuOpportunity>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance".to_string()))
    }

    fn list_proposals(&self, _id: &OpportunityId) -> Result<Vec<SwuProposalSlim>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance".to_string()))
    }

    fn award_proposal(&self, _id: &ProposalId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance".to_string()))
    }
}

/// Upstream answers every lookup with a missing-record error.
pub(super) struct MissingRecordRepository;

impl OpportunityRepository for MissingRecordRepository {
    fn fetch_opportunity(
        &self,
        _id: &OpportunityId,
    ) -> Result<Option<SwuOpportunity>, RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    fn list_proposals(&self, _id: &OpportunityId) -> Result<Vec<SwuProposalSlim>, RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    fn award_proposal(&self, _id: &ProposalId) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound)
    }
}

pub(super) fn build_service(
    status: SwuOpportunityStatus,
    proposals: Vec<SwuProposalSlim>,
) -> (
    ProposalReviewService<MemoryRepository, MemoryNotifier>,
    MemoryRepository,
    MemoryNotifier,
) {
    let repository = MemoryRepository::seeded(status, proposals);
    let notifier = MemoryNotifier::default();
    let service = ProposalReviewService::new(
        Arc::new(repository.clone()),
        Arc::new(notifier.clone()),
        display(),
    );
    (service, repository, notifier)
}

pub(super) fn proposal_router_with_service(
    service: ProposalReviewService<MemoryRepository, MemoryNotifier>,
) -> axum::Router {
    proposal_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
