use crate::guide::profile::UserProfile;
use chrono::NaiveDateTime;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact name `{0}` is not a plain file name")]
    InvalidName(String),
    #[error("artifact `{0}` does not exist")]
    Missing(String),
    #[error("artifact `{name}` I/O failed: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// A rendered guide with the file name it is stored and attached under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl GuideArtifact {
    pub fn new(profile: &UserProfile, bytes: Vec<u8>, created_at: NaiveDateTime) -> Self {
        Self {
            file_name: file_name(profile.scenario(), created_at),
            bytes,
        }
    }
}

/// `ultimate_prepper_{slug}_{YYYYmmddHHMMSS}.pdf`. The slug is the lower-cased
/// scenario with spaces as underscores; anything outside `[a-z0-9_-]` is dropped.
pub fn file_name(scenario: Option<&str>, created_at: NaiveDateTime) -> String {
    let slug: String = scenario
        .unwrap_or("guide")
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            'a'..='z' | '0'..='9' | '_' | '-' => Some(c),
            _ => None,
        })
        .collect();
    let slug = if slug.is_empty() { "guide" } else { slug.as_str() };
    format!(
        "ultimate_prepper_{slug}_{}.pdf",
        created_at.format("%Y%m%d%H%M%S")
    )
}

fn validate_name(name: &str) -> Result<(), ArtifactError> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && Path::new(name).file_name().is_some();
    if plain {
        Ok(())
    } else {
        Err(ArtifactError::InvalidName(name.to_string()))
    }
}

/// Directory of guides waiting for a payment confirmation.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, ArtifactError> {
        validate_name(name)?;
        Ok(self.dir.join(name))
    }

    pub async fn save(&self, artifact: &GuideArtifact) -> Result<PathBuf, ArtifactError> {
        let path = self.path_for(&artifact.file_name)?;
        let io_error = |source| ArtifactError::Io {
            name: artifact.file_name.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).await.map_err(io_error)?;
        fs::write(&path, &artifact.bytes).await.map_err(io_error)?;
        Ok(path)
    }

    pub async fn load(&self, name: &str) -> Result<GuideArtifact, ArtifactError> {
        let path = self.path_for(name)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(GuideArtifact {
                file_name: name.to_string(),
                bytes,
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(ArtifactError::Missing(name.to_string()))
            }
            Err(source) => Err(ArtifactError::Io {
                name: name.to_string(),
                source,
            }),
        }
    }

    /// Removing an artifact that is already gone is not an error.
    pub async fn remove(&self, name: &str) -> Result<(), ArtifactError> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ArtifactError::Io {
                name: name.to_string(),
                source,
            }),
        }
    }
}
