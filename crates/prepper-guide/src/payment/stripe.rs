use super::{
    CheckoutRequest, CheckoutSession, PaymentError, PaymentGateway, PaymentIntent,
    PaymentIntentRequest, CURRENCY,
};
use crate::config::PaymentConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::info;

/// Stripe REST client using form-encoded requests and the secret key as bearer token.
#[derive(Clone)]
pub struct StripeGateway {
    client: Client,
    api_base: String,
    secret_key: String,
}

impl fmt::Debug for StripeGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeGateway")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl StripeGateway {
    /// `None` when no secret key is configured.
    pub fn from_config(config: &PaymentConfig) -> Option<Self> {
        let secret_key = config.secret_key.clone()?;
        Some(Self::new(&config.api_base, secret_key))
    }

    pub fn new(api_base: &str, secret_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
        }
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(format!("{}{path}", self.api_base))
            .bearer_auth(&self.secret_key)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, PaymentError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|envelope| envelope.error.message)
            .unwrap_or(body);
        Err(PaymentError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn metadata_fields(form: &mut Vec<(String, String)>, metadata: &[(String, String)]) {
    for (key, value) in metadata {
        form.push((format!("metadata[{key}]"), value.clone()));
    }
}

/// Stripe's bracketed form encoding for a single-item payment session.
pub(crate) fn checkout_form(request: &CheckoutRequest) -> Vec<(String, String)> {
    let mut form = vec![
        ("mode".to_string(), "payment".to_string()),
        ("payment_method_types[0]".to_string(), "card".to_string()),
        ("line_items[0][quantity]".to_string(), "1".to_string()),
        (
            "line_items[0][price_data][currency]".to_string(),
            CURRENCY.to_string(),
        ),
        (
            "line_items[0][price_data][unit_amount]".to_string(),
            request.price_cents.to_string(),
        ),
        (
            "line_items[0][price_data][product_data][name]".to_string(),
            request.product_name.clone(),
        ),
        (
            "line_items[0][price_data][product_data][description]".to_string(),
            request.description.clone(),
        ),
        ("success_url".to_string(), request.success_url.clone()),
        ("cancel_url".to_string(), request.cancel_url.clone()),
    ];
    if let Some(email) = &request.customer_email {
        form.push(("customer_email".to_string(), email.clone()));
    }
    metadata_fields(&mut form, &request.metadata);
    form
}

pub(crate) fn payment_intent_form(request: &PaymentIntentRequest) -> Vec<(String, String)> {
    let mut form = vec![
        ("amount".to_string(), request.amount_cents.to_string()),
        ("currency".to_string(), CURRENCY.to_string()),
    ];
    metadata_fields(&mut form, &request.metadata);
    form
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let body: SessionBody =
            Self::send(self.post("/v1/checkout/sessions").form(&checkout_form(request))).await?;
        info!(session_id = %body.id, "checkout session created");
        Ok(CheckoutSession {
            id: body.id,
            url: body.url,
        })
    }

    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let intent: PaymentIntent =
            Self::send(self.post("/v1/payment_intents").form(&payment_intent_form(request)))
                .await?;
        info!(payment_intent = %intent.id, "payment intent created");
        Ok(intent)
    }

    async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntent, PaymentError> {
        let request = self
            .client
            .get(format!("{}/v1/payment_intents/{id}", self.api_base))
            .bearer_auth(&self.secret_key);
        Self::send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Form, Path};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn fake_stripe() -> String {
        async fn sessions(
            headers: HeaderMap,
            Form(form): Form<HashMap<String, String>>,
        ) -> (StatusCode, Json<Value>) {
            if headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                != Some("Bearer sk_test_123")
            {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": { "message": "Invalid API Key provided" } })),
                );
            }
            let id = format!(
                "cs_test_{}",
                form.get("line_items[0][price_data][unit_amount]")
                    .cloned()
                    .unwrap_or_default()
            );
            (StatusCode::OK, Json(json!({ "id": id, "url": null })))
        }

        async fn intent(Path(id): Path<String>) -> Json<Value> {
            Json(json!({ "id": id, "status": "succeeded", "client_secret": "pi_secret" }))
        }

        let app = Router::new()
            .route("/v1/checkout/sessions", post(sessions))
            .route("/v1/payment_intents/:id", get(intent));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake stripe");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            product_name: "Ultimate Prepper Guide - Flood Checklist".to_string(),
            description: "Personalized for Tulsa, OK".to_string(),
            price_cents: 599,
            customer_email: Some("a@b.com".to_string()),
            success_url: "https://example.com/ok".to_string(),
            cancel_url: "https://example.com/cancel".to_string(),
            metadata: vec![("scenario".to_string(), "Flood".to_string())],
        }
    }

    #[test]
    fn checkout_form_uses_bracketed_keys() {
        let form = checkout_form(&request());
        let lookup = |key: &str| {
            form.iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str())
        };
        assert_eq!(lookup("line_items[0][price_data][unit_amount]"), Some("599"));
        assert_eq!(lookup("line_items[0][price_data][currency]"), Some("usd"));
        assert_eq!(lookup("metadata[scenario]"), Some("Flood"));
        assert_eq!(lookup("customer_email"), Some("a@b.com"));
    }

    #[tokio::test]
    async fn creates_sessions_and_reads_intents() {
        let base = fake_stripe().await;
        let gateway = StripeGateway::new(&base, "sk_test_123");

        let session = gateway
            .create_checkout_session(&request())
            .await
            .expect("session created");
        assert_eq!(session.id, "cs_test_599");
        assert_eq!(session.url, None);

        let intent = gateway
            .retrieve_payment_intent("pi_42")
            .await
            .expect("intent retrieved");
        assert_eq!(intent.id, "pi_42");
        assert!(intent.is_succeeded());
    }

    #[tokio::test]
    async fn surfaces_provider_error_messages() {
        let base = fake_stripe().await;
        let gateway = StripeGateway::new(&base, "sk_test_wrong");

        let error = gateway
            .create_checkout_session(&request())
            .await
            .expect_err("unauthorized");
        match error {
            PaymentError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API Key provided");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
