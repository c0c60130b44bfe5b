//! Verification and parsing of Stripe webhook deliveries.

use super::GUIDE_FILE_KEY;
use crate::guide::profile::UserProfile;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::collections::BTreeMap;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "Stripe-Signature";
/// Maximum age, in seconds, of a signed delivery.
pub const TOLERANCE_SECS: i64 = 300;
pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("signature header is malformed")]
    MalformedHeader,
    #[error("no v1 signature matches the payload")]
    SignatureMismatch,
    #[error("signature timestamp is {age}s away from now, outside the 300s tolerance")]
    Stale { age: i64 },
    #[error("webhook secret is not usable as an HMAC key")]
    InvalidSecret,
    #[error("webhook payload is not a valid event: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

fn mac(secret: &str, timestamp: i64, payload: &[u8]) -> Result<HmacSha256, WebhookError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| WebhookError::InvalidSecret)?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac)
}

/// Builds a `t=…,v1=…` header value for `payload`.
pub fn sign(payload: &[u8], secret: &str, timestamp: i64) -> Result<String, WebhookError> {
    let digest = mac(secret, timestamp, payload)?.finalize().into_bytes();
    Ok(format!("t={timestamp},v1={}", hex::encode(digest)))
}

/// Checks a `Stripe-Signature` header against the raw request body. Any one
/// matching `v1` entry is enough; `now` is a unix timestamp in seconds.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    now: i64,
) -> Result<(), WebhookError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => {
                timestamp = Some(
                    value
                        .parse::<i64>()
                        .map_err(|_| WebhookError::MalformedHeader)?,
                )
            }
            "v1" => signatures.push(value),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(WebhookError::MalformedHeader)?;
    if signatures.is_empty() {
        return Err(WebhookError::MalformedHeader);
    }

    let mut matched = false;
    for signature in signatures {
        let Ok(expected) = hex::decode(signature) else {
            continue;
        };
        if mac(secret, timestamp, payload)?.verify_slice(&expected).is_ok() {
            matched = true;
            break;
        }
    }
    if !matched {
        return Err(WebhookError::SignatureMismatch);
    }

    let age = now - timestamp;
    if age.abs() > TOLERANCE_SECS {
        return Err(WebhookError::Stale { age });
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: EventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    pub object: serde_json::Value,
}

/// The parts of a completed checkout session needed to deliver a guide.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompletedCheckout {
    pub id: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl WebhookEvent {
    pub fn parse(payload: &[u8]) -> Result<Self, WebhookError> {
        Ok(serde_json::from_slice(payload)?)
    }

    /// `Ok(None)` for event types other than a completed checkout.
    pub fn completed_checkout(&self) -> Result<Option<CompletedCheckout>, WebhookError> {
        if self.kind != CHECKOUT_COMPLETED {
            return Ok(None);
        }
        Ok(Some(CompletedCheckout::deserialize(&self.data.object)?))
    }
}

impl CompletedCheckout {
    pub fn guide_file(&self) -> Option<&str> {
        self.metadata.get(GUIDE_FILE_KEY).map(String::as_str)
    }

    /// Questionnaire answers carried in the session metadata.
    pub fn profile(&self) -> UserProfile {
        let field = |key: &str| self.metadata.get(key).cloned();
        UserProfile {
            scenario: field("scenario"),
            location: field("location"),
            household_size: field("household_size"),
            climate: field("climate"),
            experience: field("experience"),
            email: field("email").or_else(|| self.customer_email.clone()),
        }
    }
}
