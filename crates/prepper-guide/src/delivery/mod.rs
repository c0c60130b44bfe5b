//! Storing rendered guides and emailing them to customers.

mod artifact;
mod mail;

pub use artifact::{file_name, ArtifactError, ArtifactStore, GuideArtifact};
pub use mail::{GuideEmail, MailDelivery, MailError, SmtpMailer};
