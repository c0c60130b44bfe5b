use super::artifact::GuideArtifact;
use crate::config::MailConfig;
use crate::guide::profile::{UserProfile, NOT_SPECIFIED};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::fmt;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("profile has no email address to deliver to")]
    MissingRecipient,
    #[error("invalid mailbox: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build message: {0}")]
    Build(String),
    #[error("smtp delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// The delivery email for one guide, ready to hand to a [`MailDelivery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: GuideArtifact,
}

impl GuideEmail {
    pub fn compose(profile: &UserProfile, attachment: GuideArtifact) -> Result<Self, MailError> {
        let to = profile.email().ok_or(MailError::MissingRecipient)?.to_string();
        let scenario = profile.scenario().unwrap_or("Survival");
        let answer = |value: Option<&str>| value.unwrap_or(NOT_SPECIFIED).to_string();
        let household = profile
            .household_size()
            .map(|size| format!("{size} people"))
            .unwrap_or_else(|| NOT_SPECIFIED.to_string());

        let body = format!(
            "Hi there!

Thank you for your purchase! Your personalized {scenario} Survival Guide is attached to this email.

Your Profile:
• Scenario: {scenario}
• Location: {location}
• Household Size: {household}
• Climate: {climate}
• Experience Level: {experience}

What's Inside Your Guide:
✓ Complete supply checklist with specific brands
✓ Quantities customized for your household size
✓ Priority levels (Critical → High → Medium → Low)
✓ Detailed explanations for why each item matters
✓ 72-hour action plan
✓ Storage and organization tips

Tips for Using Your Guide:
1. Print a copy and keep it with your emergency supplies
2. Check off items as you acquire them
3. Review and update your supplies every 6 months
4. Share relevant sections with family members

Questions or issues? Simply reply to this email.

Stay safe and prepared!

Best regards,
The Ultimate Prepper Team
",
            location = answer(profile.location()),
            climate = answer(profile.climate()),
            experience = answer(profile.experience()),
        );

        Ok(Self {
            to,
            subject: format!("Your {scenario} Survival Guide - Ready to Download!"),
            body,
            attachment,
        })
    }

    pub(crate) fn to_message(&self, from: &Mailbox) -> Result<Message, MailError> {
        let pdf = ContentType::parse(mime::APPLICATION_PDF.as_ref())
            .map_err(|err| MailError::Build(err.to_string()))?;
        Message::builder()
            .from(from.clone())
            .to(self.to.parse::<Mailbox>()?)
            .subject(self.subject.clone())
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(self.body.clone()))
                    .singlepart(
                        Attachment::new(self.attachment.file_name.clone())
                            .body(self.attachment.bytes.clone(), pdf),
                    ),
            )
            .map_err(|err| MailError::Build(err.to_string()))
    }
}

/// Outbound channel for finished guides.
#[async_trait]
pub trait MailDelivery: fmt::Debug + Send + Sync {
    async fn send(&self, email: &GuideEmail) -> Result<(), MailError>;
}

/// STARTTLS SMTP relay with password login.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    host: String,
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("host", &self.host)
            .field("from", &self.from.to_string())
            .finish()
    }
}

impl SmtpMailer {
    /// `Ok(None)` when the login or sender is not configured.
    pub fn from_config(config: &MailConfig) -> Result<Option<Self>, MailError> {
        let Some((username, password, from)) = config.credentials() else {
            return Ok(None);
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        Ok(Some(Self {
            transport,
            from: from.parse()?,
            host: config.smtp_host.clone(),
        }))
    }
}

#[async_trait]
impl MailDelivery for SmtpMailer {
    async fn send(&self, email: &GuideEmail) -> Result<(), MailError> {
        let message = email.to_message(&self.from)?;
        self.transport.send(message).await?;
        info!(
            to = %email.to,
            attachment = %email.attachment.file_name,
            "guide email sent"
        );
        Ok(())
    }
}
