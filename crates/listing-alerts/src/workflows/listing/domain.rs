use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical representation of one property offering, produced once per webhook event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: Option<String>,
    pub street: Option<String>,
    pub house_number: String,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub asking_price: f64,
    pub room_count: u32,
    pub living_area: f64,
    pub energy_label: Option<EnergyLabel>,
    pub outdoor_space: OutdoorSpace,
    pub property_type: String,
    pub image_url: Option<String>,
    pub brochure_url: Option<String>,
}

impl Listing {
    /// Street and house number as shown to buyers, e.g. "Hoogstraat 12 A".
    pub fn address_line(&self) -> String {
        let street = self.street.as_deref().unwrap_or_default();
        format!("{} {}", street, self.house_number).trim().to_string()
    }
}

/// EU energy performance classes ordered best (`A++`) to worst (`G`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnergyLabel {
    #[serde(rename = "A++", alias = "A_PLUS_PLUS")]
    APlusPlus,
    #[serde(rename = "A+", alias = "A_PLUS")]
    APlus,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl EnergyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLabel::APlusPlus => "A++",
            EnergyLabel::APlus => "A+",
            EnergyLabel::A => "A",
            EnergyLabel::B => "B",
            EnergyLabel::C => "C",
            EnergyLabel::D => "D",
            EnergyLabel::E => "E",
            EnergyLabel::F => "F",
            EnergyLabel::G => "G",
        }
    }

    /// True when `self` is a strictly lower class than `other`.
    pub fn is_worse_than(&self, other: EnergyLabel) -> bool {
        *self > other
    }
}

impl fmt::Display for EnergyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown energy label '{0}'")]
pub struct UnknownEnergyLabel(pub String);

impl FromStr for EnergyLabel {
    type Err = UnknownEnergyLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let code = value.trim().to_ascii_uppercase();
        let label = match code.as_str() {
            "A++" | "A_PLUS_PLUS" => EnergyLabel::APlusPlus,
            "A+" | "A_PLUS" => EnergyLabel::APlus,
            "A" => EnergyLabel::A,
            "B" => EnergyLabel::B,
            "C" => EnergyLabel::C,
            "D" => EnergyLabel::D,
            "E" => EnergyLabel::E,
            "F" => EnergyLabel::F,
            "G" => EnergyLabel::G,
            _ => return Err(UnknownEnergyLabel(value.to_string())),
        };
        Ok(label)
    }
}

/// Outdoor space classification derived from garden and balcony data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutdoorSpace {
    #[default]
    None,
    Garden,
    Balcony,
}

impl OutdoorSpace {
    pub fn is_present(&self) -> bool {
        !matches!(self, OutdoorSpace::None)
    }

    /// Dutch label used in buyer-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            OutdoorSpace::None => "geen",
            OutdoorSpace::Garden => "tuin",
            OutdoorSpace::Balcony => "balkon",
        }
    }
}
