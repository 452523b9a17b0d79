use crate::cli::ServeArgs;
use crate::infra::{
    load_snapshot, seed_organizations, seed_snapshot, AppState, InMemoryAwardNotifier,
    InMemoryOpportunityRepository, InMemoryOrganizationRepository,
};
use crate::routes::with_marketplace_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use marketplace::config::AppConfig;
use marketplace::error::AppError;
use marketplace::opportunities::proposals::ProposalReviewService;
use marketplace::opportunities::ScoreDisplay;
use marketplace::organizations::OrganizationDirectory;
use marketplace::site::SiteInfo;
use marketplace::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = InMemoryOpportunityRepository::from_snapshot(seed_snapshot());
    for path in &args.snapshots {
        let snapshot = load_snapshot(path)?;
        info!(opportunity = %snapshot.opportunity.id, path = %path.display(), "snapshot loaded");
        repository.load(snapshot);
    }

    let proposal_service = Arc::new(ProposalReviewService::new(
        Arc::new(repository),
        Arc::new(InMemoryAwardNotifier::default()),
        ScoreDisplay::from_config(&config.marketplace),
    ));
    let directory = Arc::new(OrganizationDirectory::new(
        Arc::new(InMemoryOrganizationRepository::new(seed_organizations())),
        config.marketplace.empty_placeholder.clone(),
    ));
    let site = SiteInfo::from_config(&config.marketplace);

    let app = with_marketplace_routes(proposal_service, directory, site)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "marketplace api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
