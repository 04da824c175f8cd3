//! Realworks listing normalization.
//!
//! Upstream objects drift between API versions, so every canonical field is resolved through an
//! ordered table of candidate paths (see `fields`). Missing data resolves to a documented default;
//! the only failure is a payload that is not a JSON object at all.

mod domain;
mod fields;
mod normalizer;
mod resolver;

pub use domain::{EnergyLabel, Listing, OutdoorSpace, UnknownEnergyLabel};
pub use normalizer::{labels_match, normalize_label};

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("listing payload must be a JSON object, got {found}")]
    MalformedInput { found: &'static str },
}

/// Map one raw Realworks object onto the canonical [`Listing`].
pub fn normalize(raw: &Value) -> Result<Listing, ListingError> {
    if !raw.is_object() {
        return Err(ListingError::MalformedInput {
            found: json_kind(raw),
        });
    }

    Ok(Listing {
        id: fields::ID.resolve(raw),
        street: fields::STREET.resolve(raw),
        house_number: fields::house_number(raw),
        city: fields::CITY.resolve(raw),
        postal_code: fields::POSTAL_CODE.resolve(raw),
        asking_price: fields::ASKING_PRICE.resolve_or(raw, 0.0),
        room_count: fields::ROOM_COUNT.resolve_or(raw, 0),
        living_area: fields::LIVING_AREA.resolve_or(raw, 0.0),
        energy_label: fields::ENERGY_LABEL.resolve(raw),
        outdoor_space: fields::outdoor_space(raw),
        property_type: fields::property_type(raw),
        image_url: fields::primary_image(raw),
        brochure_url: fields::brochure(raw),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn realworks_object() -> Value {
        json!({
            "id": "RW-88231",
            "adres": {
                "straat": "Broersvest",
                "huisnummer": 112,
                "huisnummertoevoeging": "B",
                "plaats": "Schiedam",
                "postcode": "3111 EH"
            },
            "algemeen": {
                "aantalKamers": 3,
                "woonoppervlakte": 75,
                "energieklasse": "B"
            },
            "financieel": { "overdracht": { "koopprijs": 300000 } },
            "detail": { "buitenruimte": { "tuintypes": ["ACHTERTUIN"] } },
            "object": { "type": { "objecttype": "APPARTEMENT" } },
            "media": [
                { "soort": "FOTO", "link": "https://cdn.example/1.jpg" },
                { "soort": "HOOFDFOTO", "link": "" },
                { "soort": "HOOFDFOTO", "link": "https://cdn.example/main.jpg" }
            ],
            "links": [
                { "soort": "DOCUMENT", "titel": "Plattegrond", "link": "https://cdn.example/plan.pdf" },
                { "soort": "DOCUMENT", "titel": "Verkoop Brochure", "link": "https://cdn.example/brochure.pdf" }
            ]
        })
    }

    #[test]
    fn normalizes_complete_realworks_object() {
        let listing = normalize(&realworks_object()).expect("object normalizes");

        assert_eq!(listing.id.as_deref(), Some("RW-88231"));
        assert_eq!(listing.street.as_deref(), Some("Broersvest"));
        assert_eq!(listing.house_number, "112 B");
        assert_eq!(listing.city.as_deref(), Some("Schiedam"));
        assert_eq!(listing.postal_code.as_deref(), Some("3111 EH"));
        assert_eq!(listing.asking_price, 300000.0);
        assert_eq!(listing.room_count, 3);
        assert_eq!(listing.living_area, 75.0);
        assert_eq!(listing.energy_label, Some(EnergyLabel::B));
        assert_eq!(listing.outdoor_space, OutdoorSpace::Garden);
        assert_eq!(listing.property_type, "Appartement");
        assert_eq!(
            listing.image_url.as_deref(),
            Some("https://cdn.example/main.jpg")
        );
        assert_eq!(
            listing.brochure_url.as_deref(),
            Some("https://cdn.example/brochure.pdf")
        );
        assert_eq!(listing.address_line(), "Broersvest 112 B");
    }

    #[test]
    fn empty_object_resolves_to_defaults() {
        let listing = normalize(&json!({})).expect("empty object normalizes");

        assert_eq!(listing.id, None);
        assert_eq!(listing.house_number, "");
        assert_eq!(listing.asking_price, 0.0);
        assert_eq!(listing.room_count, 0);
        assert_eq!(listing.living_area, 0.0);
        assert_eq!(listing.energy_label, None);
        assert_eq!(listing.outdoor_space, OutdoorSpace::None);
        assert_eq!(listing.property_type, "woning");
        assert_eq!(listing.image_url, None);
        assert_eq!(listing.brochure_url, None);
    }

    #[test]
    fn non_object_payloads_are_malformed() {
        for raw in [json!(null), json!([1, 2]), json!("listing"), json!(42)] {
            match normalize(&raw) {
                Err(ListingError::MalformedInput { .. }) => {}
                other => panic!("expected malformed input for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn house_number_composition() {
        let compose = |adres: Value| {
            normalize(&json!({ "adres": adres }))
                .expect("normalizes")
                .house_number
        };

        assert_eq!(compose(json!({ "huisnummer": "12", "huisnummertoevoeging": "A" })), "12 A");
        assert_eq!(compose(json!({ "huisnummer": "12" })), "12");
        assert_eq!(compose(json!({ "huisnummertoevoeging": "bis" })), "bis");
        assert_eq!(compose(json!({})), "");
    }

    #[test]
    fn garden_takes_precedence_over_balcony() {
        let raw = json!({
            "detail": { "buitenruimte": {
                "tuintypes": ["VOORTUIN"],
                "oppervlakteGebouwgebondenBuitenruimte": 15
            } }
        });
        assert_eq!(
            normalize(&raw).expect("normalizes").outdoor_space,
            OutdoorSpace::Garden
        );

        let raw = json!({
            "detail": { "buitenruimte": {
                "tuintypes": [],
                "oppervlakteGebouwgebondenBuitenruimte": 15
            } }
        });
        assert_eq!(
            normalize(&raw).expect("normalizes").outdoor_space,
            OutdoorSpace::Balcony
        );

        let raw = json!({
            "detail": { "buitenruimte": { "gebouwgebondenBuitenruimte": 0 } }
        });
        assert_eq!(
            normalize(&raw).expect("normalizes").outdoor_space,
            OutdoorSpace::None
        );
    }

    #[test]
    fn price_falls_back_through_historical_shapes() {
        let transaction = json!({ "financieel": { "overdracht": { "koopprijs": null, "transactieprijs": 289000 } } });
        assert_eq!(normalize(&transaction).expect("normalizes").asking_price, 289000.0);

        let direct = json!({ "financieel": {}, "vraagprijs": "315000" });
        assert_eq!(normalize(&direct).expect("normalizes").asking_price, 315000.0);
    }

    #[test]
    fn id_falls_back_to_object_code() {
        let raw = json!({ "id": "", "diversen": { "diversen": { "objectcode": 55012 } } });
        assert_eq!(
            normalize(&raw).expect("normalizes").id.as_deref(),
            Some("55012")
        );
    }

    #[test]
    fn property_type_codes_map_to_labels() {
        let resolve = |code: Value| {
            normalize(&json!({ "object": { "type": { "objecttype": code } } }))
                .expect("normalizes")
                .property_type
        };

        assert_eq!(resolve(json!("WOONHUIS")), "Woonhuis");
        assert_eq!(resolve(json!("appartement")), "Appartement");
        assert_eq!(resolve(json!("WOONBOOT")), "WOONBOOT");
        assert_eq!(resolve(json!("")), "woning");
    }

    #[test]
    fn unknown_energy_labels_are_absent() {
        let raw = json!({ "algemeen": { "energieklasse": "Z" }, "detail": { "energielabel": { "energieklasse": "A_PLUS" } } });
        assert_eq!(
            normalize(&raw).expect("normalizes").energy_label,
            Some(EnergyLabel::APlus)
        );

        let raw = json!({ "algemeen": { "energieklasse": "onbekend" } });
        assert_eq!(normalize(&raw).expect("normalizes").energy_label, None);
    }

    #[test]
    fn brochure_requires_document_category_and_caption() {
        let raw = json!({
            "links": [
                { "soort": "FOTO", "titel": "Brochure", "link": "https://cdn.example/photo.jpg" }
            ],
            "documenten": [
                { "categorie": "document", "omschrijving": "Digitale BROCHURE", "url": "https://cdn.example/doc.pdf" }
            ]
        });
        assert_eq!(
            normalize(&raw).expect("normalizes").brochure_url.as_deref(),
            Some("https://cdn.example/doc.pdf")
        );
    }

    #[test]
    fn malformed_containers_never_raise() {
        let raw = json!({
            "adres": "Broersvest 112",
            "algemeen": [1, 2, 3],
            "media": { "soort": "HOOFDFOTO" },
            "detail": { "buitenruimte": { "tuintypes": "ACHTERTUIN" } }
        });
        let listing = normalize(&raw).expect("normalizes");
        assert_eq!(listing.city, None);
        assert_eq!(listing.room_count, 0);
        assert_eq!(listing.image_url, None);
        assert_eq!(listing.outdoor_space, OutdoorSpace::None);
    }
}
