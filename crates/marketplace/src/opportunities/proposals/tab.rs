use super::super::award::AwardGate;
use super::super::domain::{ProposalId, ScoreKey, SwuOpportunity, SwuProposalSlim};
use super::super::ordering::sort_proposals_for_public_sector;
use crate::users::UserType;
use serde::Serialize;

/// Modal currently requested by the proposals tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tag", content = "value", rename_all = "snake_case")]
pub enum ModalId {
    Award(ProposalId),
}

/// State of the evaluation tab listing an opportunity's proposals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposalsTabState {
    pub opportunity: SwuOpportunity,
    pub viewer: UserType,
    pub show_modal: Option<ModalId>,
    pub award_loading: Option<ProposalId>,
    pub can_proposals_be_awarded: bool,
    pub can_view_proposals: bool,
    pub proposals: Vec<SwuProposalSlim>,
}

impl ProposalsTabState {
    /// Builds the tab from a freshly fetched snapshot. `proposals` should be
    /// empty when the opportunity does not allow viewing them yet.
    pub fn init(
        opportunity: SwuOpportunity,
        viewer: UserType,
        mut proposals: Vec<SwuProposalSlim>,
    ) -> Self {
        let can_view = opportunity.can_view_proposals();
        if !can_view {
            proposals.clear();
        }
        sort_proposals_for_public_sector(&mut proposals, ScoreKey::Total);
        let gate = AwardGate::evaluate(&opportunity, &proposals);

        Self {
            can_view_proposals: can_view && !proposals.is_empty(),
            can_proposals_be_awarded: gate.is_open(),
            show_modal: None,
            award_loading: None,
            opportunity,
            viewer,
            proposals,
        }
    }

    pub fn gate(&self) -> AwardGate {
        AwardGate::evaluate(&self.opportunity, &self.proposals)
    }

    pub fn is_loading(&self) -> bool {
        self.award_loading.is_some()
    }

    pub fn proposal(&self, id: &ProposalId) -> Option<&SwuProposalSlim> {
        self.proposals.iter().find(|proposal| &proposal.id == id)
    }

    pub fn shows_export_link(&self) -> bool {
        self.can_view_proposals && self.opportunity.has_passed_code_challenge()
    }
}

/// Outcome of the upstream award call, fed back into the tab.
#[derive(Debug, Clone, PartialEq)]
pub enum AwardResult {
    /// Award accepted; carries the re-fetched snapshot.
    Awarded {
        opportunity: SwuOpportunity,
        proposals: Vec<SwuProposalSlim>,
    },
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProposalsTabMsg {
    ShowModal(ModalId),
    HideModal,
    Award(ProposalId),
    AwardCompleted(AwardResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub body: String,
}

impl Toast {
    fn awarded() -> Self {
        Self {
            kind: ToastKind::Success,
            title: "Opportunity Awarded".to_string(),
            body: "This opportunity has been awarded.".to_string(),
        }
    }

    fn award_failed() -> Self {
        Self {
            kind: ToastKind::Error,
            title: "Unable to Mark Opportunity Awarded".to_string(),
            body: "This opportunity could not be marked awarded. Please try again later."
                .to_string(),
        }
    }
}

/// Side effects requested by `update`; the caller runs them and feeds results back.
#[derive(Debug, Clone, PartialEq)]
pub enum TabCommand {
    SubmitAward(ProposalId),
    Toast(Toast),
}

/// Processes one message against the current state.
pub fn update(
    mut state: ProposalsTabState,
    msg: ProposalsTabMsg,
) -> (ProposalsTabState, Vec<TabCommand>) {
    match msg {
        ProposalsTabMsg::ShowModal(modal) => {
            state.show_modal = Some(modal);
            (state, Vec::new())
        }
        ProposalsTabMsg::HideModal => {
            state.show_modal = None;
            (state, Vec::new())
        }
        ProposalsTabMsg::Award(proposal_id) => {
            state.show_modal = None;
            state.award_loading = Some(proposal_id.clone());
            (state, vec![TabCommand::SubmitAward(proposal_id)])
        }
        ProposalsTabMsg::AwardCompleted(AwardResult::Awarded {
            opportunity,
            proposals,
        }) => {
            let viewer = state.viewer;
            let toast = Toast::awarded();
            let fresh = ProposalsTabState::init(opportunity, viewer, proposals);
            (fresh, vec![TabCommand::Toast(toast)])
        }
        ProposalsTabMsg::AwardCompleted(AwardResult::Failed) => {
            state.award_loading = None;
            let toast = Toast::award_failed();
            (state, vec![TabCommand::Toast(toast)])
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalAction {
    pub text: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
    pub color: &'static str,
    pub button: bool,
    #[serde(skip)]
    pub msg: ProposalsTabMsg,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalView {
    pub title: &'static str,
    pub body: &'static str,
    pub actions: Vec<ModalAction>,
}

/// Confirmation shown before awarding `proposal_id`.
pub fn award_modal(proposal_id: &ProposalId) -> ModalView {
    ModalView {
        title: "Award Sprint With Us Opportunity?",
        body: "Are you sure you want to award this opportunity to this proponent? Once awarded, all subscribers and proponents will be notified accordingly.",
        actions: vec![
            ModalAction {
                text: "Award Opportunity",
                icon: Some("award"),
                color: "primary",
                button: true,
                msg: ProposalsTabMsg::Award(proposal_id.clone()),
            },
            ModalAction {
                text: "Cancel",
                icon: None,
                color: "secondary",
                button: false,
                msg: ProposalsTabMsg::HideModal,
            },
        ],
    }
}

pub fn modal_view(state: &ProposalsTabState) -> Option<ModalView> {
    state.show_modal.as_ref().map(|modal| match modal {
        ModalId::Award(proposal_id) => award_modal(proposal_id),
    })
}

/// Message shown in place of the scoresheet when nothing can be listed.
pub fn not_available_message(opportunity: &SwuOpportunity) -> &'static str {
    if opportunity.is_accepting_proposals() {
        "Proposals will be displayed here once this opportunity has closed."
    } else {
        "No proposals were submitted to this opportunity."
    }
}
