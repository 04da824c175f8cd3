use crate::workflows::listing::{EnergyLabel, Listing, OutdoorSpace};
use crate::workflows::matching::{
    HardCriteria, MatchConfig, MatchEngine, ProfileId, SearchProfile, SoftCriteria,
};

pub(super) fn schiedam_listing() -> Listing {
    Listing {
        id: Some("RW-88231".to_string()),
        street: Some("Broersvest".to_string()),
        house_number: "112".to_string(),
        city: Some("Schiedam".to_string()),
        postal_code: Some("3111 EH".to_string()),
        asking_price: 300000.0,
        room_count: 3,
        living_area: 75.0,
        energy_label: Some(EnergyLabel::B),
        outdoor_space: OutdoorSpace::Garden,
        property_type: "Appartement".to_string(),
        image_url: None,
        brochure_url: None,
    }
}

pub(super) fn buyer_profile(id: &str) -> SearchProfile {
    SearchProfile {
        id: ProfileId(id.to_string()),
        display_name: Some("Fenna".to_string()),
        contact_handle: "0612345678".to_string(),
        notification_opt_in: true,
        hard: HardCriteria {
            cities: Some(vec![
                "Schiedam".to_string(),
                "Vlaardingen".to_string(),
                "Rotterdam".to_string(),
            ]),
            price_min: Some(250000.0),
            price_max: Some(500000.0),
            property_types: Some(vec![
                "Appartement".to_string(),
                "Eengezinswoning".to_string(),
            ]),
        },
        soft: SoftCriteria {
            min_rooms: Some(3),
            min_area: Some(70.0),
            min_energy_label: Some(EnergyLabel::C),
            wants_outdoor_space: Some(true),
        },
    }
}

pub(super) fn unconstrained_profile(id: &str) -> SearchProfile {
    SearchProfile {
        id: ProfileId(id.to_string()),
        display_name: None,
        contact_handle: "0687654321".to_string(),
        notification_opt_in: true,
        hard: HardCriteria::default(),
        soft: SoftCriteria::default(),
    }
}

pub(super) fn engine() -> MatchEngine {
    MatchEngine::new(MatchConfig::default())
}
