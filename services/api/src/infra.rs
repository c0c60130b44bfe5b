use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use prepper_guide::config::{AppEnvironment, DeliveryMode, PaymentConfig};
use prepper_guide::delivery::{ArtifactStore, GuideArtifact, GuideEmail, MailDelivery};
use prepper_guide::error::AppError;
use prepper_guide::guide::profile::UserProfile;
use prepper_guide::guide::GuideRenderer;
use prepper_guide::payment::PaymentGateway;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Deployment settings the guide endpoints consult per request.
#[derive(Debug, Clone)]
pub(crate) struct GuideSettings {
    pub(crate) environment: AppEnvironment,
    pub(crate) delivery_mode: DeliveryMode,
    pub(crate) payment: PaymentConfig,
}

/// Everything the guide endpoints share; collaborators are optional so the
/// service still boots without Stripe or SMTP credentials.
#[derive(Debug, Clone)]
pub(crate) struct GuideService {
    pub(crate) renderer: GuideRenderer,
    pub(crate) artifacts: ArtifactStore,
    pub(crate) payments: Option<Arc<dyn PaymentGateway>>,
    pub(crate) mailer: Option<Arc<dyn MailDelivery>>,
    pub(crate) settings: Arc<GuideSettings>,
}

impl GuideService {
    pub(crate) fn payments(&self) -> Result<&dyn PaymentGateway, AppError> {
        self.payments
            .as_deref()
            .ok_or(AppError::NotConfigured("payment provider"))
    }

    pub(crate) fn render(
        &self,
        profile: &UserProfile,
        now: chrono::NaiveDateTime,
    ) -> Result<GuideArtifact, AppError> {
        let bytes = self.renderer.render_on(profile, now.date())?;
        Ok(GuideArtifact::new(profile, bytes, now))
    }

    pub(crate) async fn deliver(
        &self,
        profile: &UserProfile,
        artifact: GuideArtifact,
    ) -> Result<(), AppError> {
        let mailer = self
            .mailer
            .as_deref()
            .ok_or(AppError::NotConfigured("mail delivery"))?;
        let email = GuideEmail::compose(profile, artifact)?;
        mailer.send(&email).await?;
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
