use crate::cli::ServeArgs;
use crate::infra::{AppState, GuideService, GuideSettings};
use crate::routes::{cors_layer, guide_routes};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use prepper_guide::checklist::ChecklistCatalog;
use prepper_guide::config::AppConfig;
use prepper_guide::delivery::{ArtifactStore, MailDelivery, SmtpMailer};
use prepper_guide::error::AppError;
use prepper_guide::guide::GuideRenderer;
use prepper_guide::payment::{PaymentGateway, StripeGateway};
use prepper_guide::telemetry;
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

    let catalog = Arc::new(ChecklistCatalog::load(&config.catalog.source())?);
    info!(
        scenarios = catalog.scenarios().count(),
        source = ?config.catalog.source(),
        "checklist catalog loaded"
    );

    let payments = StripeGateway::from_config(&config.payment)
        .map(|gateway| Arc::new(gateway) as Arc<dyn PaymentGateway>);
    if payments.is_none() {
        warn!("STRIPE_SECRET_KEY not set; checkout endpoints will answer 503");
    }
    let mailer = SmtpMailer::from_config(&config.mail)?
        .map(|mailer| Arc::new(mailer) as Arc<dyn MailDelivery>);
    if mailer.is_none() {
        warn!("MAIL_USERNAME/MAIL_PASSWORD not set; guides will not be emailed");
    }

    let service = GuideService {
        renderer: GuideRenderer::new(catalog),
        artifacts: ArtifactStore::new(config.delivery.artifact_dir.clone()),
        payments,
        mailer,
        settings: Arc::new(GuideSettings {
            environment: config.environment,
            delivery_mode: config.delivery.mode,
            payment: config.payment.clone(),
        }),
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = guide_routes(service)
        .layer(Extension(app_state))
        .layer(cors_layer(&config.server.cors_origins))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        delivery = ?config.delivery.mode,
        %addr,
        "prepper guide service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
