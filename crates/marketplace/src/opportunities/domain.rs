use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use crate::organizations::{OrganizationId, OrganizationRef};

/// Identifier wrapper for posted opportunities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpportunityId(pub String);

/// Identifier wrapper for submitted proposals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposalId(pub String);

impl fmt::Display for OpportunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a Sprint With Us opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwuOpportunityStatus {
    Draft,
    UnderReview,
    Published,
    EvaluationTeamQuestions,
    EvaluationCodeChallenge,
    EvaluationTeamScenario,
    Awarded,
    Suspended,
    Canceled,
}

impl SwuOpportunityStatus {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Draft,
            Self::UnderReview,
            Self::Published,
            Self::EvaluationTeamQuestions,
            Self::EvaluationCodeChallenge,
            Self::EvaluationTeamScenario,
            Self::Awarded,
            Self::Suspended,
            Self::Canceled,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::UnderReview => "UNDER_REVIEW",
            Self::Published => "PUBLISHED",
            Self::EvaluationTeamQuestions => "EVALUATION_TEAM_QUESTIONS",
            Self::EvaluationCodeChallenge => "EVALUATION_CODE_CHALLENGE",
            Self::EvaluationTeamScenario => "EVALUATION_TEAM_SCENARIO",
            Self::Awarded => "AWARDED",
            Self::Suspended => "SUSPENDED",
            Self::Canceled => "CANCELED",
        }
    }

    /// Forward-only lifecycle edges. Awarded and Canceled have none.
    pub const fn can_transition_to(self, next: Self) -> bool {
        use SwuOpportunityStatus::*;
        matches!(
            (self, next),
            (Draft, UnderReview | Published | Canceled)
                | (UnderReview, Published | Canceled)
                | (Published, EvaluationTeamQuestions | Suspended | Canceled)
                | (EvaluationTeamQuestions, EvaluationCodeChallenge | Suspended | Canceled)
                | (EvaluationCodeChallenge, EvaluationTeamScenario | Suspended | Canceled)
                | (EvaluationTeamScenario, Awarded | Suspended | Canceled)
                | (Suspended, Published | Canceled)
        )
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Awarded | Self::Canceled)
    }

    pub const fn is_evaluation(self) -> bool {
        matches!(
            self,
            Self::EvaluationTeamQuestions
                | Self::EvaluationCodeChallenge
                | Self::EvaluationTeamScenario
        )
    }
}

/// Lifecycle of a Sprint With Us proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwuProposalStatus {
    Draft,
    Submitted,
    UnderReviewTeamQuestions,
    EvaluatedTeamQuestions,
    UnderReviewCodeChallenge,
    EvaluatedCodeChallenge,
    UnderReviewTeamScenario,
    EvaluatedTeamScenario,
    Awarded,
    NotAwarded,
    Disqualified,
    Withdrawn,
}

impl SwuProposalStatus {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::Draft,
            Self::Submitted,
            Self::UnderReviewTeamQuestions,
            Self::EvaluatedTeamQuestions,
            Self::UnderReviewCodeChallenge,
            Self::EvaluatedCodeChallenge,
            Self::UnderReviewTeamScenario,
            Self::EvaluatedTeamScenario,
            Self::Awarded,
            Self::NotAwarded,
            Self::Disqualified,
            Self::Withdrawn,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Submitted => "SUBMITTED",
            Self::UnderReviewTeamQuestions => "UNDER_REVIEW_TEAM_QUESTIONS",
            Self::EvaluatedTeamQuestions => "EVALUATED_TEAM_QUESTIONS",
            Self::UnderReviewCodeChallenge => "UNDER_REVIEW_CODE_CHALLENGE",
            Self::EvaluatedCodeChallenge => "EVALUATED_CODE_CHALLENGE",
            Self::UnderReviewTeamScenario => "UNDER_REVIEW_TEAM_SCENARIO",
            Self::EvaluatedTeamScenario => "EVALUATED_TEAM_SCENARIO",
            Self::Awarded => "AWARDED",
            Self::NotAwarded => "NOT_AWARDED",
            Self::Disqualified => "DISQUALIFIED",
            Self::Withdrawn => "WITHDRAWN",
        }
    }
}

/// Raised when a status string from the wire matches no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for SwuOpportunityStatus {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| UnknownStatus(raw.to_string()))
    }
}

impl FromStr for SwuProposalStatus {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| UnknownStatus(raw.to_string()))
    }
}

/// Aggregate counters the upstream API reports for an opportunity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpportunityReporting {
    #[serde(default)]
    pub num_proposals: Option<u32>,
}

/// Snapshot of a Sprint With Us opportunity as fetched from the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwuOpportunity {
    pub id: OpportunityId,
    pub title: String,
    pub status: SwuOpportunityStatus,
    #[serde(default)]
    pub reporting: Option<OpportunityReporting>,
    #[serde(default)]
    pub proposal_deadline: Option<DateTime<Utc>>,
}

impl SwuOpportunity {
    /// True proposal count as reported upstream, independent of what the viewer can see.
    pub fn reported_num_proposals(&self) -> u32 {
        self.reporting
            .as_ref()
            .and_then(|reporting| reporting.num_proposals)
            .unwrap_or(0)
    }

    pub fn is_accepting_proposals(&self) -> bool {
        self.status == SwuOpportunityStatus::Published
    }

    pub fn can_view_proposals(&self) -> bool {
        self.status.is_evaluation() || self.status == SwuOpportunityStatus::Awarded
    }

    pub fn has_passed_code_challenge(&self) -> bool {
        matches!(
            self.status,
            SwuOpportunityStatus::EvaluationTeamScenario | SwuOpportunityStatus::Awarded
        )
    }
}

/// Who submitted a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Proponent {
    Individual { name: String },
    Organization(OrganizationRef),
}

/// Score columns a proposal list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKey {
    Questions,
    Challenge,
    Scenario,
    Price,
    #[default]
    Total,
}

impl ScoreKey {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Questions,
            Self::Challenge,
            Self::Scenario,
            Self::Price,
            Self::Total,
        ]
    }

    /// Column abbreviation used on the scoresheet.
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Questions => "TQ",
            Self::Challenge => "CC",
            Self::Scenario => "TS",
            Self::Price => "Price",
            Self::Total => "Total",
        }
    }
}

/// Reduced-field projection of a proposal used in list and table contexts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwuProposalSlim {
    pub id: ProposalId,
    pub opportunity_id: OpportunityId,
    pub status: SwuProposalStatus,
    pub proponent: Proponent,
    pub anonymous_proponent_name: String,
    #[serde(default)]
    pub questions_score: Option<f64>,
    #[serde(default)]
    pub challenge_score: Option<f64>,
    #[serde(default)]
    pub scenario_score: Option<f64>,
    #[serde(default)]
    pub price_score: Option<f64>,
    #[serde(default)]
    pub total_score: Option<f64>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl SwuProposalSlim {
    pub fn score(&self, key: ScoreKey) -> Option<f64> {
        match key {
            ScoreKey::Questions => self.questions_score,
            ScoreKey::Challenge => self.challenge_score,
            ScoreKey::Scenario => self.scenario_score,
            ScoreKey::Price => self.price_score,
            ScoreKey::Total => self.total_score,
        }
    }

    pub fn organization(&self) -> Option<&OrganizationRef> {
        match &self.proponent {
            Proponent::Organization(organization) => Some(organization),
            Proponent::Individual { .. } => None,
        }
    }

    pub fn proponent_name(&self) -> &str {
        match &self.proponent {
            Proponent::Individual { name } => name,
            Proponent::Organization(organization) => &organization.legal_name,
        }
    }

    /// Anonymous label shown beneath the name; only organizations carry one.
    pub fn anonymous_name(&self) -> Option<&str> {
        self.organization()
            .map(|_| self.anonymous_proponent_name.as_str())
    }

    /// Checks the score fields of an API snapshot before it enters the engine.
    pub fn check_scores(&self) -> Result<(), ScoreInvariantViolation> {
        for key in ScoreKey::ordered() {
            if let Some(value) = self.score(key) {
                if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                    return Err(ScoreInvariantViolation::OutOfRange { key, value });
                }
            }
        }

        if self.total_score.is_some() {
            let missing = [
                ScoreKey::Questions,
                ScoreKey::Challenge,
                ScoreKey::Scenario,
                ScoreKey::Price,
            ]
            .into_iter()
            .find(|key| self.score(*key).is_none());
            if let Some(key) = missing {
                return Err(ScoreInvariantViolation::IncompleteTotal { missing: key });
            }
        }

        Ok(())
    }
}

/// Snapshot score fields that break the evaluation invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreInvariantViolation {
    #[error("{key:?} score {value} is outside 0-100")]
    OutOfRange { key: ScoreKey, value: f64 },
    #[error("total score present while {missing:?} score is missing")]
    IncompleteTotal { missing: ScoreKey },
}
