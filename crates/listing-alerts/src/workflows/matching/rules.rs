use crate::workflows::listing::{labels_match, EnergyLabel, Listing};

use super::config::MatchConfig;
use super::domain::{HardCriteria, SoftCriteria};
use super::{ScoreComponent, ScoreFactor};

/// Class assumed for listings that publish no energy label.
pub(crate) const UNLABELED_LISTING: EnergyLabel = EnergyLabel::G;

/// Minimum assumed for profiles without one; nothing is strictly worse, so no penalty applies.
pub(crate) const UNCONSTRAINED_MINIMUM: EnergyLabel = EnergyLabel::G;

/// The first hard criterion a listing fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardFilter {
    City,
    PriceBelowMinimum,
    PriceAboveMaximum,
    PropertyType,
}

pub(crate) fn check_hard_criteria(listing: &Listing, hard: &HardCriteria) -> Result<(), HardFilter> {
    if let Some(cities) = &hard.cities {
        let city = listing.city.as_deref().unwrap_or_default();
        if !cities.iter().any(|allowed| labels_match(allowed, city)) {
            return Err(HardFilter::City);
        }
    }

    if let Some(min) = hard.effective_price_min() {
        if listing.asking_price < min {
            return Err(HardFilter::PriceBelowMinimum);
        }
    }

    if let Some(max) = hard.effective_price_max() {
        if listing.asking_price > max {
            return Err(HardFilter::PriceAboveMaximum);
        }
    }

    if let Some(types) = &hard.property_types {
        if !types
            .iter()
            .any(|allowed| labels_match(allowed, &listing.property_type))
        {
            return Err(HardFilter::PropertyType);
        }
    }

    Ok(())
}

pub(crate) fn score_soft_criteria(
    listing: &Listing,
    soft: &SoftCriteria,
    config: &MatchConfig,
) -> (Vec<ScoreComponent>, u8) {
    let mut components = Vec::new();
    let mut total_score = config.base_score;

    let min_rooms = soft.min_rooms.unwrap_or(0);
    if listing.room_count < min_rooms {
        components.push(ScoreComponent {
            factor: ScoreFactor::RoomCount,
            score: -config.room_shortfall_penalty,
            notes: format!("{} rooms below minimum {min_rooms}", listing.room_count),
        });
        total_score -= config.room_shortfall_penalty;
    }

    let min_area = soft.min_area.unwrap_or(0.0);
    if listing.living_area < min_area {
        components.push(ScoreComponent {
            factor: ScoreFactor::LivingArea,
            score: -config.area_shortfall_penalty,
            notes: format!("{} m2 below minimum {min_area} m2", listing.living_area),
        });
        total_score -= config.area_shortfall_penalty;
    }

    let label = listing.energy_label.unwrap_or(UNLABELED_LISTING);
    let minimum = soft.min_energy_label.unwrap_or(UNCONSTRAINED_MINIMUM);
    if label.is_worse_than(minimum) {
        components.push(ScoreComponent {
            factor: ScoreFactor::EnergyLabel,
            score: -config.energy_label_penalty,
            notes: format!("energy label {label} worse than minimum {minimum}"),
        });
        total_score -= config.energy_label_penalty;
    }

    if soft.wants_outdoor_space == Some(true) && listing.outdoor_space.is_present() {
        components.push(ScoreComponent {
            factor: ScoreFactor::OutdoorSpace,
            score: config.outdoor_space_bonus,
            notes: format!("outdoor space available ({})", listing.outdoor_space.label()),
        });
        total_score += config.outdoor_space_bonus;
    }

    (components, total_score.clamp(0, 100) as u8)
}
