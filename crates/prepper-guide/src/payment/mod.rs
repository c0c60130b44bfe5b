//! Checkout and payment-intent plumbing against Stripe.

mod stripe;
pub mod webhook;

pub use stripe::StripeGateway;

use crate::config::PaymentConfig;
use crate::guide::profile::UserProfile;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Metadata key naming the stored guide awaiting payment confirmation.
pub const GUIDE_FILE_KEY: &str = "guide_file";
pub const CURRENCY: &str = "usd";

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment provider request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("payment provider rejected the request ({status}): {message}")]
    Api { status: u16, message: String },
}

/// One-item hosted checkout for a personalized guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub product_name: String,
    pub description: String,
    pub price_cents: u32,
    pub customer_email: Option<String>,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: Vec<(String, String)>,
}

impl CheckoutRequest {
    pub fn for_profile(
        profile: &UserProfile,
        config: &PaymentConfig,
        guide_file: Option<&str>,
    ) -> Self {
        let mut metadata: Vec<(String, String)> = profile
            .metadata()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        if let Some(file) = guide_file {
            metadata.push((GUIDE_FILE_KEY.to_string(), file.to_string()));
        }

        Self {
            product_name: format!(
                "Ultimate Prepper Guide - {} Checklist",
                profile.scenario().unwrap_or("Survival")
            ),
            description: format!(
                "Personalized for {}",
                profile.location().unwrap_or("your location")
            ),
            price_cents: config.price_cents,
            customer_email: profile.email().map(str::to_string),
            success_url: success_url(&config.success_url, profile.email()),
            cancel_url: config.cancel_url.clone(),
            metadata,
        }
    }
}

/// Appends the customer's address so the landing page can greet them.
fn success_url(base: &str, email: Option<&str>) -> String {
    let Some(email) = email else {
        return base.to_string();
    };
    match reqwest::Url::parse(base) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("email", email);
            url.to_string()
        }
        Err(_) => base.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentRequest {
    pub amount_cents: u32,
    pub metadata: Vec<(String, String)>,
}

impl PaymentIntentRequest {
    pub fn for_profile(profile: &UserProfile, price_cents: u32) -> Self {
        Self {
            amount_cents: price_cents,
            metadata: profile
                .metadata()
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub client_secret: Option<String>,
}

impl PaymentIntent {
    pub fn is_succeeded(&self) -> bool {
        self.status == "succeeded"
    }
}

/// Hosted payment provider used by the checkout endpoints.
#[async_trait]
pub trait PaymentGateway: fmt::Debug + Send + Sync {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError>;

    async fn retrieve_payment_intent(&self, id: &str) -> Result<PaymentIntent, PaymentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PaymentConfig {
        PaymentConfig {
            price_cents: 599,
            success_url: "https://ultimateprepperguide.org/?success=true".to_string(),
            cancel_url: "https://ultimateprepperguide.org/?canceled=true".to_string(),
            secret_key: None,
            publishable_key: None,
            webhook_secret: None,
            api_base: "https://api.stripe.com".to_string(),
        }
    }

    #[test]
    fn checkout_request_describes_the_guide() {
        let profile = UserProfile {
            scenario: Some("Wildfire".to_string()),
            email: Some("sam+prep@example.com".to_string()),
            ..UserProfile::default()
        };
        let request = CheckoutRequest::for_profile(
            &profile,
            &config(),
            Some("ultimate_prepper_wildfire_20250105140309.pdf"),
        );

        assert_eq!(
            request.product_name,
            "Ultimate Prepper Guide - Wildfire Checklist"
        );
        assert_eq!(request.description, "Personalized for your location");
        assert_eq!(request.price_cents, 599);
        assert_eq!(
            request.success_url,
            "https://ultimateprepperguide.org/?success=true&email=sam%2Bprep%40example.com"
        );
        assert!(request.metadata.contains(&(
            GUIDE_FILE_KEY.to_string(),
            "ultimate_prepper_wildfire_20250105140309.pdf".to_string()
        )));
        assert!(request
            .metadata
            .contains(&("scenario".to_string(), "Wildfire".to_string())));
    }

    #[test]
    fn success_url_is_untouched_without_email() {
        let request = CheckoutRequest::for_profile(&UserProfile::default(), &config(), None);
        assert_eq!(
            request.success_url,
            "https://ultimateprepperguide.org/?success=true"
        );
        assert_eq!(
            request.product_name,
            "Ultimate Prepper Guide - Survival Checklist"
        );
        assert!(request.metadata.is_empty());
    }
}
