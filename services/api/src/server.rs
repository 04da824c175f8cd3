use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredDispatcher, ConfiguredProfiles};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use listing_alerts::config::AppConfig;
use listing_alerts::error::AppError;
use listing_alerts::telemetry;
use listing_alerts::workflows::intake::ListingIntakeService;
use listing_alerts::workflows::realworks::RealworksClient;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    if config.realworks.api_base.is_none() {
        warn!("REALWORKS_API_BASE not set; webhook object URLs are fetched without a host check");
    }
    let fetcher = Arc::new(RealworksClient::new(&config.realworks));
    let profiles = Arc::new(ConfiguredProfiles::from_path(config.profiles_path.clone()));
    let dispatcher = Arc::new(ConfiguredDispatcher::from_config(&config));
    let intake_service = Arc::new(ListingIntakeService::new(
        fetcher,
        profiles,
        dispatcher,
        config.matching.clone(),
    ));
    let threshold = intake_service.engine().config().threshold;

    let app = with_operational_routes(intake_service, config.webhook)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        threshold,
        "listing alerts service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
