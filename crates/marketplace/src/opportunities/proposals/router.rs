use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::super::domain::{OpportunityId, ProposalId};
use super::repository::{AwardNotifier, OpportunityRepository, RepositoryError};
use super::service::{ProposalReviewService, ProposalServiceError};
use super::views::ProposalsTabView;
use crate::users::UserType;

/// Identity is resolved by the session layer upstream; routes only receive the role.
#[derive(Debug, Default, Deserialize)]
pub struct ViewerQuery {
    #[serde(default)]
    pub viewer: UserType,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub viewer: UserType,
    #[serde(default)]
    pub anonymous: bool,
}

/// Router builder exposing the proposal evaluation endpoints.
pub fn proposal_router<R, N>(service: Arc<ProposalReviewService<R, N>>) -> Router
where
    R: OpportunityRepository + 'static,
    N: AwardNotifier + 'static,
{
    Router::new()
        .route(
            "/api/v1/opportunities/swu/:opportunity_id/proposals",
            get(tab_handler::<R, N>),
        )
        .route(
            "/api/v1/opportunities/swu/:opportunity_id/proposals/export",
            get(export_handler::<R, N>),
        )
        .route(
            "/api/v1/opportunities/swu/:opportunity_id/proposals/:proposal_id/award",
            post(award_handler::<R, N>),
        )
        .with_state(service)
}

pub(crate) async fn tab_handler<R, N>(
    State(service): State<Arc<ProposalReviewService<R, N>>>,
    Path(opportunity_id): Path<String>,
    Query(query): Query<ViewerQuery>,
) -> Response
where
    R: OpportunityRepository + 'static,
    N: AwardNotifier + 'static,
{
    let id = OpportunityId(opportunity_id);
    match service.view(&id, query.viewer) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn award_handler<R, N>(
    State(service): State<Arc<ProposalReviewService<R, N>>>,
    Path((opportunity_id, proposal_id)): Path<(String, String)>,
    Query(query): Query<ViewerQuery>,
) -> Response
where
    R: OpportunityRepository + 'static,
    N: AwardNotifier + 'static,
{
    let opportunity_id = OpportunityId(opportunity_id);
    let proposal_id = ProposalId(proposal_id);
    match service.award(&opportunity_id, &proposal_id, query.viewer) {
        Ok(outcome) => {
            let status = if outcome.awarded {
                StatusCode::OK
            } else {
                StatusCode::BAD_GATEWAY
            };
            let view =
                ProposalsTabView::build(&outcome.state, service.display()).with_toasts(outcome.toasts);
            (status, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler<R, N>(
    State(service): State<Arc<ProposalReviewService<R, N>>>,
    Path(opportunity_id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Response
where
    R: OpportunityRepository + 'static,
    N: AwardNotifier + 'static,
{
    let id = OpportunityId(opportunity_id);
    match service.export_csv(&id, query.viewer, query.anonymous) {
        Ok(csv) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            csv,
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ProposalServiceError) -> Response {
    let status = match &error {
        ProposalServiceError::OpportunityNotFound
        | ProposalServiceError::ProposalNotFound
        | ProposalServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ProposalServiceError::Forbidden => StatusCode::FORBIDDEN,
        ProposalServiceError::Rejected(_) | ProposalServiceError::ExportUnavailable => {
            StatusCode::CONFLICT
        }
        ProposalServiceError::InvalidSnapshot(_) => StatusCode::BAD_GATEWAY,
        ProposalServiceError::Repository(_) | ProposalServiceError::Export(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
