mod config;
mod domain;
mod rules;

#[cfg(test)]
mod tests;

pub use config::{MatchConfig, DEFAULT_MATCH_THRESHOLD};
pub use domain::{HardCriteria, ProfileDefect, ProfileId, SearchProfile, SoftCriteria};
pub use rules::HardFilter;

use serde::Serialize;
use tracing::{debug, warn};

use crate::workflows::listing::Listing;

/// Stateless matcher applying hard filters and the soft score to every profile.
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    config: MatchConfig,
}

impl MatchEngine {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Profiles to notify for `listing`, in input order.
    pub fn match_listing<'p>(
        &self,
        listing: &Listing,
        profiles: &'p [SearchProfile],
    ) -> Vec<ProfileMatch<'p>> {
        profiles
            .iter()
            .filter_map(|profile| match self.evaluate(listing, profile) {
                ProfileEvaluation::Qualified { score, components } => Some(ProfileMatch {
                    profile,
                    score,
                    components,
                }),
                ProfileEvaluation::BelowThreshold { score } => {
                    debug!(profile = %profile.id, score, "score below match threshold");
                    None
                }
                ProfileEvaluation::Excluded(filter) => {
                    debug!(profile = %profile.id, ?filter, "hard criteria not met");
                    None
                }
                ProfileEvaluation::OptedOut => None,
                ProfileEvaluation::Malformed(defect) => {
                    warn!(profile = %profile.id, %defect, "skipping malformed search profile");
                    None
                }
            })
            .collect()
    }

    /// Full decision for one profile, including why it did not qualify.
    pub fn evaluate(&self, listing: &Listing, profile: &SearchProfile) -> ProfileEvaluation {
        if !profile.notification_opt_in {
            return ProfileEvaluation::OptedOut;
        }

        if let Err(defect) = profile.validate() {
            return ProfileEvaluation::Malformed(defect);
        }

        if let Err(filter) = rules::check_hard_criteria(listing, &profile.hard) {
            return ProfileEvaluation::Excluded(filter);
        }

        let (components, score) = rules::score_soft_criteria(listing, &profile.soft, &self.config);
        if score >= self.config.threshold {
            ProfileEvaluation::Qualified { score, components }
        } else {
            ProfileEvaluation::BelowThreshold { score }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileEvaluation {
    OptedOut,
    Malformed(ProfileDefect),
    Excluded(HardFilter),
    BelowThreshold {
        score: u8,
    },
    Qualified {
        score: u8,
        components: Vec<ScoreComponent>,
    },
}

/// A profile that qualifies for notification together with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileMatch<'p> {
    pub profile: &'p SearchProfile,
    pub score: u8,
    pub components: Vec<ScoreComponent>,
}

/// Soft criterion that moved the score, kept for audits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    RoomCount,
    LivingArea,
    EnergyLabel,
    OutdoorSpace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub score: i32,
    pub notes: String,
}
