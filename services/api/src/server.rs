use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use assessment_intake::config::AppConfig;
use assessment_intake::error::AppError;
use assessment_intake::telemetry;
use assessment_intake::workflows::intake::ReceiverStore;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let public_base_url = config.server.public_base_url();
    let store = Arc::new(ReceiverStore::new(
        public_base_url.clone(),
        config.uploads.policy().max_bytes,
    ));

    let app = with_service_routes(store)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, %public_base_url, "intake receiver ready");

    axum::serve(listener, app).await?;
    Ok(())
}
