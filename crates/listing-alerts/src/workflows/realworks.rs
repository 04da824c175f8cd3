use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::RealworksConfig;

/// Retrieves the raw listing object a webhook points at.
#[async_trait]
pub trait ListingFetcher: Send + Sync {
    async fn fetch(&self, object_url: &str) -> Result<Value, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("object url '{url}' is outside the configured Realworks API base")]
    ForeignUrl { url: String },
    #[error("Realworks responded with status {status}")]
    Status { status: u16 },
    #[error("Realworks request failed: {0}")]
    Transport(String),
    #[error("Realworks returned an unreadable body: {0}")]
    Decode(String),
}

/// HTTP client for the Realworks object API.
#[derive(Debug, Clone)]
pub struct RealworksClient {
    client: Client,
    api_base: Option<String>,
    authorization: String,
}

impl RealworksClient {
    pub fn new(config: &RealworksConfig) -> Self {
        Self {
            client: Client::new(),
            api_base: config.api_base.clone(),
            authorization: format!("rwauth {}", config.api_token),
        }
    }

    fn ensure_trusted(&self, object_url: &str) -> Result<(), FetchError> {
        match &self.api_base {
            Some(base) if !object_url.starts_with(base.as_str()) => Err(FetchError::ForeignUrl {
                url: object_url.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ListingFetcher for RealworksClient {
    async fn fetch(&self, object_url: &str) -> Result<Value, FetchError> {
        self.ensure_trusted(object_url)?;

        let response = self
            .client
            .get(object_url)
            .header(AUTHORIZATION, &self.authorization)
            .header(ACCEPT, mime::APPLICATION_JSON.as_ref())
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = response.status();
        debug!(%status, object_url, "realworks object response");
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| FetchError::Decode(err.to_string()))
    }
}
