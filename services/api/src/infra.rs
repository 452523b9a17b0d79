use chrono::{Duration, Utc};
use marketplace::error::AppError;
use marketplace::opportunities::proposals::{
    AwardNotice, AwardNotifier, NotificationError, OpportunityRepository, RepositoryError,
};
use marketplace::opportunities::{
    OpportunityId, OpportunityReporting, OrganizationId, OrganizationRef, Proponent, ProposalId,
    SwuOpportunity, SwuOpportunityStatus, SwuProposalSlim, SwuProposalStatus,
};
use marketplace::organizations::{
    OrganizationRepository, OrganizationRepositoryError, OrganizationSlim,
};
use marketplace::users::{UserId, UserRef};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// One opportunity with its proposals, as exported from the upstream API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Snapshot {
    pub(crate) opportunity: SwuOpportunity,
    #[serde(default)]
    pub(crate) proposals: Vec<SwuProposalSlim>,
}

pub(crate) fn load_snapshot(path: &Path) -> Result<Snapshot, AppError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryOpportunityRepository {
    opportunities: Arc<Mutex<HashMap<OpportunityId, SwuOpportunity>>>,
    proposals: Arc<Mutex<Vec<SwuProposalSlim>>>,
}

impl InMemoryOpportunityRepository {
    pub(crate) fn from_snapshot(snapshot: Snapshot) -> Self {
        let repository = Self::default();
        repository.load(snapshot);
        repository
    }

    pub(crate) fn load(&self, snapshot: Snapshot) {
        let Snapshot {
            opportunity,
            proposals,
        } = snapshot;
        self.opportunities
            .lock()
            .expect("repository mutex poisoned")
            .insert(opportunity.id.clone(), opportunity);
        self.proposals
            .lock()
            .expect("repository mutex poisoned")
            .extend(proposals);
    }
}

impl OpportunityRepository for InMemoryOpportunityRepository {
    fn fetch_opportunity(
        &self,
        id: &OpportunityId,
    ) -> Result<Option<SwuOpportunity>, RepositoryError> {
        let guard = self.opportunities.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_proposals(&self, id: &OpportunityId) -> Result<Vec<SwuProposalSlim>, RepositoryError> {
        let guard = self.proposals.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|proposal| &proposal.opportunity_id == id)
            .cloned()
            .collect())
    }

    /// Marks the winner Awarded, its evaluated rivals NotAwarded, and the
    /// opportunity Awarded, the way the upstream API does.
    fn award_proposal(&self, id: &ProposalId) -> Result<(), RepositoryError> {
        let mut proposals = self.proposals.lock().expect("repository mutex poisoned");
        let opportunity_id = proposals
            .iter()
            .find(|proposal| &proposal.id == id)
            .map(|proposal| proposal.opportunity_id.clone())
            .ok_or(RepositoryError::NotFound)?;

        let mut opportunities = self.opportunities.lock().expect("repository mutex poisoned");
        let opportunity = opportunities
            .get_mut(&opportunity_id)
            .ok_or(RepositoryError::NotFound)?;
        if !opportunity
            .status
            .can_transition_to(SwuOpportunityStatus::Awarded)
        {
            return Err(RepositoryError::Rejected(format!(
                "opportunity is {}",
                opportunity.status.as_str()
            )));
        }
        opportunity.status = SwuOpportunityStatus::Awarded;

        for proposal in proposals
            .iter_mut()
            .filter(|proposal| proposal.opportunity_id == opportunity_id)
        {
            if &proposal.id == id {
                proposal.status = SwuProposalStatus::Awarded;
            } else if proposal.status == SwuProposalStatus::EvaluatedTeamScenario {
                proposal.status = SwuProposalStatus::NotAwarded;
            }
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAwardNotifier {
    notices: Arc<Mutex<Vec<AwardNotice>>>,
}

impl AwardNotifier for InMemoryAwardNotifier {
    fn publish(&self, notice: AwardNotice) -> Result<(), NotificationError> {
        info!(
            opportunity = %notice.opportunity_id,
            proposal = %notice.proposal_id,
            "award notice queued"
        );
        let mut guard = self.notices.lock().expect("notice mutex poisoned");
        guard.push(notice);
        Ok(())
    }
}

impl InMemoryAwardNotifier {
    pub(crate) fn notices(&self) -> Vec<AwardNotice> {
        self.notices.lock().expect("notice mutex poisoned").clone()
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryOrganizationRepository {
    organizations: Arc<Vec<OrganizationSlim>>,
}

impl InMemoryOrganizationRepository {
    pub(crate) fn new(organizations: Vec<OrganizationSlim>) -> Self {
        Self {
            organizations: Arc::new(organizations),
        }
    }
}

impl OrganizationRepository for InMemoryOrganizationRepository {
    fn list_organizations(&self) -> Result<Vec<OrganizationSlim>, OrganizationRepositoryError> {
        Ok(self.organizations.as_ref().clone())
    }
}

pub(crate) const SEED_OPPORTUNITY_ID: &str = "swu-2041";

fn seed_organization(id: &str, legal_name: &str) -> OrganizationRef {
    OrganizationRef {
        id: OrganizationId(id.to_string()),
        legal_name: legal_name.to_string(),
    }
}

fn seed_proposal(
    id: &str,
    anonymous: &str,
    proponent: Proponent,
    status: SwuProposalStatus,
    scores: Option<[f64; 5]>,
) -> SwuProposalSlim {
    let score = |index: usize| scores.map(|values| values[index]);
    SwuProposalSlim {
        id: ProposalId(id.to_string()),
        opportunity_id: OpportunityId(SEED_OPPORTUNITY_ID.to_string()),
        status,
        proponent,
        anonymous_proponent_name: anonymous.to_string(),
        questions_score: score(0),
        challenge_score: score(1),
        scenario_score: score(2),
        price_score: score(3),
        total_score: score(4),
        submitted_at: Some(Utc::now() - Duration::days(21)),
    }
}

/// Demo opportunity whose team scenario evaluation is complete.
pub(crate) fn seed_snapshot() -> Snapshot {
    let opportunity = SwuOpportunity {
        id: OpportunityId(SEED_OPPORTUNITY_ID.to_string()),
        title: "Permitting Modernization Sprint".to_string(),
        status: SwuOpportunityStatus::EvaluationTeamScenario,
        reporting: Some(OpportunityReporting {
            num_proposals: Some(4),
        }),
        proposal_deadline: Some(Utc::now() - Duration::days(14)),
    };

    let proposals = vec![
        seed_proposal(
            "prop-101",
            "Proponent 1",
            Proponent::Organization(seed_organization("org-11", "Fraser Valley Digital")),
            SwuProposalStatus::EvaluatedTeamScenario,
            Some([82.0, 91.5, 88.0, 74.25, 84.345]),
        ),
        seed_proposal(
            "prop-102",
            "Proponent 2",
            Proponent::Organization(seed_organization("org-12", "Kootenay Code Co")),
            SwuProposalStatus::EvaluatedTeamScenario,
            Some([78.0, 80.0, 76.5, 90.0, 79.8]),
        ),
        seed_proposal(
            "prop-103",
            "Proponent 3",
            Proponent::Individual {
                name: "Avery Lindqvist".to_string(),
            },
            SwuProposalStatus::UnderReviewTeamScenario,
            None,
        ),
        seed_proposal(
            "prop-104",
            "Proponent 4",
            Proponent::Organization(seed_organization("org-14", "Skeena Systems")),
            SwuProposalStatus::Disqualified,
            None,
        ),
    ];

    Snapshot {
        opportunity,
        proposals,
    }
}

pub(crate) fn seed_organizations() -> Vec<OrganizationSlim> {
    let owner = |id: &str, name: &str| {
        Some(UserRef {
            id: UserId(id.to_string()),
            name: name.to_string(),
        })
    };
    vec![
        OrganizationSlim {
            id: OrganizationId("org-11".to_string()),
            legal_name: "Fraser Valley Digital".to_string(),
            owner: owner("u-31", "Priya Natarajan"),
        },
        OrganizationSlim {
            id: OrganizationId("org-12".to_string()),
            legal_name: "Kootenay Code Co".to_string(),
            owner: owner("u-32", "Tomás Ibarra"),
        },
        OrganizationSlim {
            id: OrganizationId("org-14".to_string()),
            legal_name: "Skeena Systems".to_string(),
            owner: None,
        },
    ]
}
