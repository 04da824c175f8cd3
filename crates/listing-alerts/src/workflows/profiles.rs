use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::workflows::matching::SearchProfile;

/// Read-only supplier of the search profiles evaluated for each listing.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn profiles(&self) -> Result<Vec<SearchProfile>, ProfileSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileSourceError {
    #[error("failed to read profile file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("profile document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("profile document must be a JSON array of profiles")]
    NotAList,
}

/// Fixed profile set, e.g. supplied by tests or a CLI invocation.
#[derive(Debug, Clone, Default)]
pub struct StaticProfileSource {
    profiles: Vec<SearchProfile>,
}

impl StaticProfileSource {
    pub fn new(profiles: Vec<SearchProfile>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl ProfileSource for StaticProfileSource {
    async fn profiles(&self) -> Result<Vec<SearchProfile>, ProfileSourceError> {
        Ok(self.profiles.clone())
    }
}

/// Profiles stored as a JSON array on disk. The file is re-read for every matching pass so edits
/// apply without a restart.
#[derive(Debug, Clone)]
pub struct JsonProfileSource {
    path: PathBuf,
}

impl JsonProfileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProfileSource for JsonProfileSource {
    async fn profiles(&self) -> Result<Vec<SearchProfile>, ProfileSourceError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ProfileSourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        parse_profiles(&raw)
    }
}

/// Decode a JSON array of profiles, skipping entries that do not decode.
pub fn parse_profiles(raw: &str) -> Result<Vec<SearchProfile>, ProfileSourceError> {
    let document: Value = serde_json::from_str(raw)?;
    let Value::Array(entries) = document else {
        return Err(ProfileSourceError::NotAList);
    };

    let mut profiles = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<SearchProfile>(entry) {
            Ok(profile) => profiles.push(profile),
            Err(err) => warn!(index, error = %err, "skipping undecodable search profile"),
        }
    }

    Ok(profiles)
}
