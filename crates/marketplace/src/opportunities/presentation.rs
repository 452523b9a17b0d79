//! Status labels and badge colors keyed by `(status, viewer role)`.
//!
//! Vendors see coarse labels so internal evaluation stage names never leak to
//! proponents. Every mapping is an exhaustive match, so adding a status or a
//! role fails to compile until it is labeled.

use super::domain::{SwuOpportunityStatus, SwuProposalStatus};
use crate::config::AppEnvironment;
use crate::users::UserType;
use serde::Serialize;

/// Theme color tokens understood by the badge component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeColor {
    Primary,
    Secondary,
    Success,
    Warning,
    Danger,
    Info,
}

impl ThemeColor {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub text: &'static str,
    pub color: ThemeColor,
}

pub const UNKNOWN_STATUS_BADGE: StatusBadge = StatusBadge {
    text: "Unknown",
    color: ThemeColor::Secondary,
};

pub const fn swu_proposal_status_to_title_case(
    status: SwuProposalStatus,
    viewer: UserType,
) -> &'static str {
    use SwuProposalStatus::*;
    match (status, viewer) {
        (Draft, _) => "Draft",
        (Submitted, _) => "Submitted",
        (
            UnderReviewTeamQuestions
            | EvaluatedTeamQuestions
            | UnderReviewCodeChallenge
            | EvaluatedCodeChallenge
            | UnderReviewTeamScenario
            | EvaluatedTeamScenario,
            UserType::Vendor,
        ) => "Under Review",
        (UnderReviewTeamQuestions, UserType::Government | UserType::Admin) => "Under Review (TQ)",
        (EvaluatedTeamQuestions, UserType::Government | UserType::Admin) => "Evaluated (TQ)",
        (UnderReviewCodeChallenge, UserType::Government | UserType::Admin) => "Under Review (CC)",
        (EvaluatedCodeChallenge, UserType::Government | UserType::Admin) => "Evaluated (CC)",
        (UnderReviewTeamScenario, UserType::Government | UserType::Admin) => "Under Review (TS)",
        (EvaluatedTeamScenario, UserType::Government | UserType::Admin) => "Evaluated (TS)",
        (Awarded, _) => "Awarded",
        (NotAwarded, _) => "Not Awarded",
        (Disqualified, _) => "Disqualified",
        (Withdrawn, _) => "Withdrawn",
    }
}

pub const fn swu_proposal_status_to_color(
    status: SwuProposalStatus,
    viewer: UserType,
) -> ThemeColor {
    use SwuProposalStatus::*;
    match (status, viewer) {
        (Draft, _) => ThemeColor::Secondary,
        (Submitted, _) => ThemeColor::Success,
        (
            UnderReviewTeamQuestions
            | EvaluatedTeamQuestions
            | UnderReviewCodeChallenge
            | EvaluatedCodeChallenge
            | UnderReviewTeamScenario
            | EvaluatedTeamScenario,
            UserType::Vendor,
        ) => ThemeColor::Warning,
        (
            UnderReviewTeamQuestions | UnderReviewCodeChallenge | UnderReviewTeamScenario,
            UserType::Government | UserType::Admin,
        ) => ThemeColor::Warning,
        (
            EvaluatedTeamQuestions | EvaluatedCodeChallenge | EvaluatedTeamScenario,
            UserType::Government | UserType::Admin,
        ) => ThemeColor::Primary,
        (Awarded, _) => ThemeColor::Success,
        (NotAwarded, _) => ThemeColor::Info,
        (Disqualified | Withdrawn, _) => ThemeColor::Danger,
    }
}

pub const fn swu_opportunity_status_to_title_case(
    status: SwuOpportunityStatus,
    viewer: UserType,
) -> &'static str {
    use SwuOpportunityStatus::*;
    match (status, viewer) {
        (Draft, _) => "Draft",
        (UnderReview, _) => "Under Review",
        (Published, _) => "Published",
        (
            EvaluationTeamQuestions | EvaluationCodeChallenge | EvaluationTeamScenario,
            UserType::Vendor,
        ) => "Evaluation",
        (EvaluationTeamQuestions, UserType::Government | UserType::Admin) => "Team Questions",
        (EvaluationCodeChallenge, UserType::Government | UserType::Admin) => "Code Challenge",
        (EvaluationTeamScenario, UserType::Government | UserType::Admin) => "Team Scenario",
        (Awarded, _) => "Awarded",
        (Suspended, _) => "Suspended",
        (Canceled, _) => "Cancelled",
    }
}

pub const fn swu_opportunity_status_to_color(
    status: SwuOpportunityStatus,
    viewer: UserType,
) -> ThemeColor {
    use SwuOpportunityStatus::*;
    match (status, viewer) {
        (Draft, _) => ThemeColor::Secondary,
        (UnderReview, _) => ThemeColor::Warning,
        (Published, _) => ThemeColor::Success,
        (EvaluationTeamQuestions | EvaluationCodeChallenge | EvaluationTeamScenario, _) => {
            ThemeColor::Warning
        }
        (Awarded, _) => ThemeColor::Success,
        (Suspended, _) => ThemeColor::Secondary,
        (Canceled, _) => ThemeColor::Danger,
    }
}

pub const fn proposal_status_badge(status: SwuProposalStatus, viewer: UserType) -> StatusBadge {
    StatusBadge {
        text: swu_proposal_status_to_title_case(status, viewer),
        color: swu_proposal_status_to_color(status, viewer),
    }
}

pub const fn opportunity_status_badge(
    status: SwuOpportunityStatus,
    viewer: UserType,
) -> StatusBadge {
    StatusBadge {
        text: swu_opportunity_status_to_title_case(status, viewer),
        color: swu_opportunity_status_to_color(status, viewer),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresentationError {
    #[error("no badge mapping for status '{0}'")]
    UnknownStatus(String),
}

/// Badge for a status string straight off the wire.
///
/// Outside production an unknown status is an error the caller must surface;
/// in production it is logged and rendered with a neutral fallback badge.
pub fn badge_for_raw_proposal_status(
    raw: &str,
    viewer: UserType,
    environment: AppEnvironment,
) -> Result<StatusBadge, PresentationError> {
    match raw.parse::<SwuProposalStatus>() {
        Ok(status) => Ok(proposal_status_badge(status, viewer)),
        Err(_) if environment.is_strict() => Err(PresentationError::UnknownStatus(raw.to_string())),
        Err(_) => {
            tracing::error!(status = raw, "unmapped proposal status, rendering fallback badge");
            Ok(UNKNOWN_STATUS_BADGE)
        }
    }
}

pub fn badge_for_raw_opportunity_status(
    raw: &str,
    viewer: UserType,
    environment: AppEnvironment,
) -> Result<StatusBadge, PresentationError> {
    match raw.parse::<SwuOpportunityStatus>() {
        Ok(status) => Ok(opportunity_status_badge(status, viewer)),
        Err(_) if environment.is_strict() => Err(PresentationError::UnknownStatus(raw.to_string())),
        Err(_) => {
            tracing::error!(status = raw, "unmapped opportunity status, rendering fallback badge");
            Ok(UNKNOWN_STATUS_BADGE)
        }
    }
}
