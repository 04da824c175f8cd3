//! Webhook-driven listing intake: fetch, normalize, match, notify.

mod router;
mod service;

pub use router::{intake_router, RealworksWebhook};
pub use service::{DeliveryOutcome, IntakeError, IntakeReport, ListingIntakeService};

use serde::Serialize;
use serde_json::Value;

use crate::workflows::listing::{self, Listing, ListingError};
use crate::workflows::matching::{MatchEngine, ProfileId, ScoreComponent, SearchProfile};

/// Normalized listing with the profiles it qualifies for, without any delivery side effects.
#[derive(Debug, Clone, Serialize)]
pub struct ListingEvaluation {
    pub listing: Listing,
    pub matches: Vec<MatchSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub profile_id: ProfileId,
    pub score: u8,
    pub components: Vec<ScoreComponent>,
}

pub fn evaluate_listing(
    raw: &Value,
    profiles: &[SearchProfile],
    engine: &MatchEngine,
) -> Result<ListingEvaluation, ListingError> {
    let listing = listing::normalize(raw)?;
    let matches = engine
        .match_listing(&listing, profiles)
        .into_iter()
        .map(|matched| MatchSummary {
            profile_id: matched.profile.id.clone(),
            score: matched.score,
            components: matched.components,
        })
        .collect();

    Ok(ListingEvaluation { listing, matches })
}
