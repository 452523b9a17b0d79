use super::super::domain::{ProposalId, ScoreKey, SwuProposalSlim};
use super::super::presentation::{proposal_status_badge, StatusBadge};
use super::super::scores::ScoreDisplay;
use super::tab::ProposalsTabState;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadCell {
    pub label: &'static str,
    pub centered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProponentCell {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymous_name: Option<String>,
    pub link_disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AwardAction {
    pub disabled: bool,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoresheetRow {
    pub proposal_id: ProposalId,
    pub proponent: ProponentCell,
    pub status: StatusBadge,
    pub questions: String,
    pub challenge: String,
    pub scenario: String,
    pub price: String,
    pub total: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub award_action: Option<AwardAction>,
}

/// Column headers; the trailing action column exists only while an award is possible.
pub fn head_cells(state: &ProposalsTabState) -> Vec<HeadCell> {
    let mut cells = vec![
        HeadCell {
            label: "Proponent",
            centered: false,
        },
        HeadCell {
            label: "Status",
            centered: false,
        },
    ];
    cells.extend(ScoreKey::ordered().into_iter().map(|key| HeadCell {
        label: key.short_label(),
        centered: true,
    }));
    if state.can_proposals_be_awarded {
        cells.push(HeadCell {
            label: "",
            centered: false,
        });
    }
    cells
}

pub fn body_rows(state: &ProposalsTabState, display: &ScoreDisplay) -> Vec<ScoresheetRow> {
    let is_loading = state.is_loading();
    let gate = state.gate();

    state
        .proposals
        .iter()
        .map(|proposal| {
            let award_action = (state.can_proposals_be_awarded && gate.allows(proposal)).then(|| {
                AwardAction {
                    disabled: is_loading,
                    loading: state.award_loading.as_ref() == Some(&proposal.id),
                }
            });

            ScoresheetRow {
                proposal_id: proposal.id.clone(),
                proponent: proponent_cell(proposal, is_loading),
                status: proposal_status_badge(proposal.status, state.viewer),
                questions: display.format(proposal.questions_score),
                challenge: display.format(proposal.challenge_score),
                scenario: display.format(proposal.scenario_score),
                price: display.format(proposal.price_score),
                total: display.format(proposal.total_score),
                award_action,
            }
        })
        .collect()
}

fn proponent_cell(proposal: &SwuProposalSlim, disabled: bool) -> ProponentCell {
    ProponentCell {
        name: proposal.proponent_name().to_string(),
        anonymous_name: proposal.anonymous_name().map(str::to_string),
        link_disabled: disabled,
    }
}
