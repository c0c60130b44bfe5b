use crate::checklist::CatalogError;
use crate::config::ConfigError;
use crate::delivery::{ArtifactError, MailError};
use crate::guide::RenderError;
use crate::payment::webhook::WebhookError;
use crate::payment::PaymentError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Catalog(CatalogError),
    Render(RenderError),
    Artifact(ArtifactError),
    Mail(MailError),
    Payment(PaymentError),
    Webhook(WebhookError),
    /// Request is missing something the handler needs.
    BadRequest(String),
    /// A payment intent exists but has not succeeded.
    PaymentIncomplete { status: String },
    /// A collaborator (payments, mail) has no credentials.
    NotConfigured(&'static str),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Render(err) => write!(f, "render error: {}", err),
            AppError::Artifact(err) => write!(f, "artifact error: {}", err),
            AppError::Mail(err) => write!(f, "mail error: {}", err),
            AppError::Payment(err) => write!(f, "payment error: {}", err),
            AppError::Webhook(err) => write!(f, "webhook error: {}", err),
            AppError::BadRequest(message) => write!(f, "{}", message),
            AppError::PaymentIncomplete { status } => {
                write!(f, "Payment not completed (status: {})", status)
            }
            AppError::NotConfigured(what) => write!(f, "{} is not configured", what),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Render(err) => Some(err),
            AppError::Artifact(err) => Some(err),
            AppError::Mail(err) => Some(err),
            AppError::Payment(err) => Some(err),
            AppError::Webhook(err) => Some(err),
            AppError::BadRequest(_)
            | AppError::PaymentIncomplete { .. }
            | AppError::NotConfigured(_) => None,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Webhook(_) | AppError::BadRequest(_) | AppError::PaymentIncomplete { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::Payment(_) | AppError::Mail(_) => StatusCode::BAD_GATEWAY,
            AppError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Catalog(_)
            | AppError::Render(_)
            | AppError::Artifact(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<RenderError> for AppError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

impl From<ArtifactError> for AppError {
    fn from(value: ArtifactError) -> Self {
        Self::Artifact(value)
    }
}

impl From<MailError> for AppError {
    fn from(value: MailError) -> Self {
        Self::Mail(value)
    }
}

impl From<PaymentError> for AppError {
    fn from(value: PaymentError) -> Self {
        Self::Payment(value)
    }
}

impl From<WebhookError> for AppError {
    fn from(value: WebhookError) -> Self {
        Self::Webhook(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_mistakes_map_to_bad_request() {
        assert_eq!(
            AppError::from(WebhookError::SignatureMismatch).status(),
            StatusCode::BAD_REQUEST
        );
        let unpaid = AppError::PaymentIncomplete {
            status: "requires_payment_method".to_string(),
        };
        assert_eq!(unpaid.status(), StatusCode::BAD_REQUEST);
        assert!(unpaid.to_string().starts_with("Payment not completed"));
    }

    #[test]
    fn upstream_and_configuration_failures_are_distinguished() {
        let upstream = AppError::from(PaymentError::Api {
            status: 402,
            message: "card declined".to_string(),
        });
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::NotConfigured("payments").status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::from(RenderError::Serialize("boom".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
