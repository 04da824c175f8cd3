use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::{evaluate_listing, ListingEvaluation};
use crate::workflows::listing::{self, Listing, ListingError};
use crate::workflows::matching::{MatchConfig, MatchEngine, ProfileId};
use crate::workflows::notify::NotificationDispatcher;
use crate::workflows::profiles::{ProfileSource, ProfileSourceError};
use crate::workflows::realworks::{FetchError, ListingFetcher};

/// Service composing the listing fetcher, profile source, match engine, and dispatcher.
pub struct ListingIntakeService<F, P, D> {
    fetcher: Arc<F>,
    profiles: Arc<P>,
    dispatcher: Arc<D>,
    engine: Arc<MatchEngine>,
}

impl<F, P, D> ListingIntakeService<F, P, D>
where
    F: ListingFetcher + 'static,
    P: ProfileSource + 'static,
    D: NotificationDispatcher + 'static,
{
    pub fn new(fetcher: Arc<F>, profiles: Arc<P>, dispatcher: Arc<D>, config: MatchConfig) -> Self {
        Self {
            fetcher,
            profiles,
            dispatcher,
            engine: Arc::new(MatchEngine::new(config)),
        }
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Normalize and match a raw object against the current profiles without notifying anyone.
    pub async fn evaluate(&self, raw: &Value) -> Result<ListingEvaluation, IntakeError> {
        let profiles = self.profiles.profiles().await?;
        Ok(evaluate_listing(raw, &profiles, &self.engine)?)
    }

    /// Handle one webhook event end to end. Delivery failures are recorded per profile and never
    /// abort the remaining deliveries.
    pub async fn process(&self, object_url: &str) -> Result<IntakeReport, IntakeError> {
        let received_at = Utc::now();
        let raw = self.fetcher.fetch(object_url).await?;
        let listing = listing::normalize(&raw)?;
        let profiles = self.profiles.profiles().await?;

        let matches = self.engine.match_listing(&listing, &profiles);
        info!(
            listing = listing.id.as_deref().unwrap_or("unknown"),
            profiles = profiles.len(),
            matches = matches.len(),
            "listing matched against search profiles"
        );

        let mut outcomes = Vec::with_capacity(matches.len());
        for matched in &matches {
            let result = self.dispatcher.dispatch(matched.profile, &listing).await;
            let error = match result {
                Ok(()) => None,
                Err(err) => {
                    warn!(profile = %matched.profile.id, error = %err, "notification failed");
                    Some(err.to_string())
                }
            };
            outcomes.push(DeliveryOutcome {
                profile_id: matched.profile.id.clone(),
                score: matched.score,
                delivered: error.is_none(),
                error,
            });
        }

        let delivered = outcomes.iter().filter(|outcome| outcome.delivered).count();
        let failed = outcomes.len() - delivered;

        Ok(IntakeReport {
            received_at,
            object_url: object_url.to_string(),
            listing,
            matches: outcomes,
            delivered,
            failed,
        })
    }
}

/// Result of one webhook event.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeReport {
    pub received_at: DateTime<Utc>,
    pub object_url: String,
    pub listing: Listing,
    pub matches: Vec<DeliveryOutcome>,
    pub delivered: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryOutcome {
    pub profile_id: ProfileId,
    pub score: u8,
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error raised while processing a listing event.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Listing(#[from] ListingError),
    #[error(transparent)]
    Profiles(#[from] ProfileSourceError),
}
