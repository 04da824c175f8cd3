use serde::{Deserialize, Serialize};

use crate::workflows::listing::EnergyLabel;

/// Identifier wrapper for stored search profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub String);

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A buyer's stored preferences plus the contact used for delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchProfile {
    pub id: ProfileId,
    #[serde(default)]
    pub display_name: Option<String>,
    pub contact_handle: String,
    #[serde(default)]
    pub notification_opt_in: bool,
    #[serde(default)]
    pub hard: HardCriteria,
    #[serde(default)]
    pub soft: SoftCriteria,
}

/// Disqualifying constraints; `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardCriteria {
    #[serde(default)]
    pub cities: Option<Vec<String>>,
    #[serde(default)]
    pub price_min: Option<f64>,
    #[serde(default)]
    pub price_max: Option<f64>,
    #[serde(default)]
    pub property_types: Option<Vec<String>>,
}

impl HardCriteria {
    /// Bounds that actually constrain; upstream profile data uses 0 for "no bound".
    pub fn effective_price_min(&self) -> Option<f64> {
        self.price_min.filter(|bound| *bound > 0.0)
    }

    pub fn effective_price_max(&self) -> Option<f64> {
        self.price_max.filter(|bound| *bound > 0.0)
    }
}

/// Weighted preferences that only lower or raise the score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoftCriteria {
    #[serde(default)]
    pub min_rooms: Option<u32>,
    #[serde(default)]
    pub min_area: Option<f64>,
    #[serde(default)]
    pub min_energy_label: Option<EnergyLabel>,
    #[serde(default)]
    pub wants_outdoor_space: Option<bool>,
}

/// Reasons a profile cannot be evaluated at all.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileDefect {
    #[error("{field} must be a finite number")]
    NonFiniteBound { field: &'static str },
    #[error("price_min {min} exceeds price_max {max}")]
    InvertedPriceRange { min: f64, max: f64 },
    #[error("contact handle is empty")]
    MissingContact,
}

impl SearchProfile {
    pub fn validate(&self) -> Result<(), ProfileDefect> {
        let bounds = [
            ("price_min", self.hard.price_min),
            ("price_max", self.hard.price_max),
            ("min_area", self.soft.min_area),
        ];
        for (field, bound) in bounds {
            if bound.is_some_and(|value| !value.is_finite()) {
                return Err(ProfileDefect::NonFiniteBound { field });
            }
        }

        if let (Some(min), Some(max)) = (
            self.hard.effective_price_min(),
            self.hard.effective_price_max(),
        ) {
            if min > max {
                return Err(ProfileDefect::InvertedPriceRange { min, max });
            }
        }

        if self.contact_handle.trim().is_empty() {
            return Err(ProfileDefect::MissingContact);
        }

        Ok(())
    }
}
