use crate::infra::{AppState, GuideService};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, Utc};
use prepper_guide::config::DeliveryMode;
use prepper_guide::delivery::ArtifactError;
use prepper_guide::error::AppError;
use prepper_guide::guide::profile::UserProfile;
use prepper_guide::payment::webhook::{
    verify_signature, WebhookError, WebhookEvent, SIGNATURE_HEADER,
};
use prepper_guide::payment::{CheckoutRequest, PaymentIntentRequest};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConfigResponse {
    pub(crate) publishable_key: Option<String>,
    pub(crate) price: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutResponse {
    pub(crate) session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentSuccessRequest {
    #[serde(default)]
    pub(crate) user_data: UserProfile,
    #[serde(default)]
    pub(crate) payment_intent_id: Option<String>,
}

pub(crate) fn guide_routes(service: GuideService) -> Router {
    let mut router = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/config", get(config_endpoint))
        .route("/api/create-checkout-session", post(checkout_session_endpoint))
        .route("/api/webhook", post(webhook_endpoint))
        .route("/api/create-payment-intent", post(payment_intent_endpoint))
        .route("/api/payment-success", post(payment_success_endpoint));

    // free downloads bypass payment, so they stay off in production
    if !service.settings.environment.is_production() {
        router = router.route("/api/guide", post(guide_endpoint));
    }

    router.with_state(service)
}

/// Lets the separately hosted web client call the API from a browser. An empty
/// origin list allows any origin.
pub(crate) fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring CORS origin that is not a valid header value");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
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

pub(crate) async fn config_endpoint(State(service): State<GuideService>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        publishable_key: service.settings.payment.publishable_key.clone(),
        price: service.settings.payment.price_cents,
    })
}

pub(crate) async fn guide_endpoint(
    State(service): State<GuideService>,
    Json(profile): Json<UserProfile>,
) -> Result<Response, AppError> {
    let artifact = service.render(&profile, Local::now().naive_local())?;
    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime::APPLICATION_PDF.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}

pub(crate) async fn checkout_session_endpoint(
    State(service): State<GuideService>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let payments = service.payments()?;
    let artifact = service.render(&profile, Local::now().naive_local())?;

    let guide_file = match service.settings.delivery_mode {
        DeliveryMode::Immediate => {
            let file_name = artifact.file_name.clone();
            if let Err(err) = service.deliver(&profile, artifact).await {
                warn!(error = %err, guide = %file_name, "guide email failed, continuing checkout");
            }
            None
        }
        DeliveryMode::OnPayment => {
            service.artifacts.save(&artifact).await?;
            Some(artifact.file_name)
        }
    };

    let request =
        CheckoutRequest::for_profile(&profile, &service.settings.payment, guide_file.as_deref());
    let session = payments.create_checkout_session(&request).await?;

    Ok(Json(CheckoutResponse {
        session_id: session.id,
        url: session.url,
    }))
}

pub(crate) async fn webhook_endpoint(
    State(service): State<GuideService>,
    headers: HeaderMap,
    payload: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let secret = service
        .settings
        .payment
        .webhook_secret
        .as_deref()
        .ok_or(AppError::NotConfigured("webhook secret"))?;
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(WebhookError::MalformedHeader)?;
    verify_signature(&payload, signature, secret, Utc::now().timestamp())?;

    let event = WebhookEvent::parse(&payload)?;
    let Some(checkout) = event.completed_checkout()? else {
        info!(event_type = %event.kind, "ignoring webhook event");
        return Ok(Json(json!({ "status": "success" })));
    };

    let profile = checkout.profile();
    match (checkout.guide_file(), profile.email()) {
        (Some(file), Some(_)) => match service.artifacts.load(file).await {
            Ok(artifact) => {
                service.deliver(&profile, artifact).await?;
                service.artifacts.remove(file).await?;
                info!(session_id = %checkout.id, guide = %file, "paid guide delivered");
            }
            Err(ArtifactError::Missing(_)) => {
                warn!(session_id = %checkout.id, guide = %file, "stored guide not found");
            }
            Err(err) => return Err(err.into()),
        },
        _ => info!(session_id = %checkout.id, "checkout completed with nothing to deliver"),
    }

    Ok(Json(json!({ "status": "success" })))
}

pub(crate) async fn payment_intent_endpoint(
    State(service): State<GuideService>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<serde_json::Value>, AppError> {
    let payments = service.payments()?;
    let request = PaymentIntentRequest::for_profile(&profile, service.settings.payment.price_cents);
    let intent = payments.create_payment_intent(&request).await?;
    Ok(Json(json!({ "clientSecret": intent.client_secret })))
}

pub(crate) async fn payment_success_endpoint(
    State(service): State<GuideService>,
    Json(request): Json<PaymentSuccessRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let payments = service.payments()?;
    let intent_id = request
        .payment_intent_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("paymentIntentId is required".to_string()))?;

    let intent = payments.retrieve_payment_intent(intent_id).await?;
    if !intent.is_succeeded() {
        return Err(AppError::PaymentIncomplete {
            status: intent.status,
        });
    }

    let artifact = service.render(&request.user_data, Local::now().naive_local())?;
    service.deliver(&request.user_data, artifact).await?;
    info!(payment_intent = %intent.id, "guide delivered after payment");

    Ok(Json(json!({
        "success": true,
        "message": "PDF sent to your email!",
    })))
}
