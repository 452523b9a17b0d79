use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use marketplace::opportunities::proposals::{
    proposal_router, AwardNotifier, OpportunityRepository, ProposalReviewService,
};
use marketplace::organizations::{organization_router, OrganizationDirectory, OrganizationRepository};
use marketplace::site::{site_router, SiteInfo};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_marketplace_routes<R, N, O>(
    proposals: Arc<ProposalReviewService<R, N>>,
    directory: Arc<OrganizationDirectory<O>>,
    site: SiteInfo,
) -> axum::Router
where
    R: OpportunityRepository + 'static,
    N: AwardNotifier + 'static,
    O: OrganizationRepository + 'static,
{
    proposal_router(proposals)
        .merge(organization_router(directory))
        .merge(site_router(site))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        seed_organizations, seed_snapshot, InMemoryAwardNotifier, InMemoryOpportunityRepository,
        InMemoryOrganizationRepository, SEED_OPPORTUNITY_ID,
    };
    use axum::body::Body;
    use axum::http::Request;
    use marketplace::config::MarketplaceConfig;
    use marketplace::opportunities::ScoreDisplay;
    use tower::ServiceExt;

    fn app() -> (axum::Router, InMemoryAwardNotifier) {
        let config = MarketplaceConfig::default();
        let notifier = InMemoryAwardNotifier::default();
        let proposals = Arc::new(ProposalReviewService::new(
            Arc::new(InMemoryOpportunityRepository::from_snapshot(seed_snapshot())),
            Arc::new(notifier.clone()),
            ScoreDisplay::from_config(&config),
        ));
        let directory = Arc::new(OrganizationDirectory::new(
            Arc::new(InMemoryOrganizationRepository::new(seed_organizations())),
            config.empty_placeholder.clone(),
        ));
        let router = with_marketplace_routes(proposals, directory, SiteInfo::from_config(&config));
        (router, notifier)
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 128 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let (router, _) = app();
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn site_info_is_served() {
        let (router, _) = app();
        let response = router
            .oneshot(Request::get("/api/v1/site").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["footer_links"][6]["href"], "mailto:digitalmarketplace@gov.bc.ca");
    }

    #[tokio::test]
    async fn seeded_directory_is_listed() {
        let (router, _) = app();
        let response = router
            .oneshot(
                Request::get("/api/v1/organizations?viewer=ADMIN")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["rows"][0]["legal_name"], "Fraser Valley Digital");
        assert_eq!(body["rows"][2]["owner"]["text"], "-");
    }

    #[tokio::test]
    async fn seeded_opportunity_can_be_awarded() {
        let (router, notifier) = app();
        let uri = format!(
            "/api/v1/opportunities/swu/{SEED_OPPORTUNITY_ID}/proposals/prop-101/award?viewer=GOVERNMENT"
        );
        let response = router
            .oneshot(Request::post(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["opportunity_status"], "AWARDED");
        assert_eq!(body["report_cards"][1]["value"], "84.35%");
        assert_eq!(notifier.notices().len(), 1);
    }
}
