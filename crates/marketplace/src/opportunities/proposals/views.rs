use super::super::domain::{OpportunityId, SwuOpportunityStatus};
use super::super::presentation::{opportunity_status_badge, StatusBadge};
use super::super::report::{aggregate, ReportCard};
use super::super::scores::ScoreDisplay;
use super::scoresheet::{body_rows, head_cells, HeadCell, ScoresheetRow};
use super::tab::{modal_view, not_available_message, ModalView, ProposalsTabState, Toast};
use serde::Serialize;

/// Everything the proposals tab renders, flattened for JSON clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposalsTabView {
    pub opportunity_id: OpportunityId,
    pub opportunity_title: String,
    pub opportunity_status: SwuOpportunityStatus,
    pub opportunity_badge: StatusBadge,
    pub report_cards: Vec<ReportCard>,
    pub can_view_proposals: bool,
    pub can_proposals_be_awarded: bool,
    pub show_export_link: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_available_message: Option<&'static str>,
    pub head_cells: Vec<HeadCell>,
    pub rows: Vec<ScoresheetRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modal: Option<ModalView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub toasts: Vec<Toast>,
}

impl ProposalsTabView {
    pub fn build(state: &ProposalsTabState, display: &ScoreDisplay) -> Self {
        let summary = aggregate(&state.opportunity, &state.proposals);
        let showing_scoresheet = state.can_view_proposals && !state.proposals.is_empty();

        Self {
            opportunity_id: state.opportunity.id.clone(),
            opportunity_title: state.opportunity.title.clone(),
            opportunity_status: state.opportunity.status,
            opportunity_badge: opportunity_status_badge(state.opportunity.status, state.viewer),
            report_cards: summary.cards(display),
            can_view_proposals: state.can_view_proposals,
            can_proposals_be_awarded: state.can_proposals_be_awarded,
            show_export_link: state.shows_export_link(),
            not_available_message: (!showing_scoresheet)
                .then(|| not_available_message(&state.opportunity)),
            head_cells: if showing_scoresheet {
                head_cells(state)
            } else {
                Vec::new()
            },
            rows: if showing_scoresheet {
                body_rows(state, display)
            } else {
                Vec::new()
            },
            modal: modal_view(state),
            toasts: Vec::new(),
        }
    }

    pub fn with_toasts(mut self, toasts: Vec<Toast>) -> Self {
        self.toasts = toasts;
        self
    }
}
