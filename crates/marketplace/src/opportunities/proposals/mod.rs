//! Public-sector evaluation of Sprint With Us proposals: the tab state
//! machine, scoresheet rows, CSV export, and the service/router pair that
//! drives them against the upstream API.

pub mod export;
pub mod repository;
pub mod router;
pub mod scoresheet;
pub mod service;
pub mod tab;
pub mod views;

#[cfg(test)]
mod tests;

pub use export::{proposals_csv, write_proposals_csv, ExportError};
pub use repository::{
    AwardNotice, AwardNotifier, NotificationError, OpportunityRepository, RepositoryError,
};
pub use router::proposal_router;
pub use service::{AwardOutcome, ProposalReviewService, ProposalServiceError};
pub use tab::{
    award_modal, modal_view, not_available_message, update, AwardResult, ModalId,
    ProposalsTabMsg, ProposalsTabState, TabCommand, Toast, ToastKind,
};
pub use views::ProposalsTabView;
