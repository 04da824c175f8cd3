use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::Value;

use super::domain::{EnergyLabel, OutdoorSpace};
use super::resolver::{amount, count, text, FieldChain, FieldRule};

pub(crate) const GENERIC_PROPERTY_TYPE: &str = "woning";

pub(crate) static ID: FieldChain<String> = FieldChain {
    rules: &[
        FieldRule::new("/id", text),
        FieldRule::new("/diversen/diversen/objectcode", text),
        FieldRule::new("/diversen/objectcode", text),
    ],
};

pub(crate) static STREET: FieldChain<String> = FieldChain {
    rules: &[FieldRule::new("/adres/straat", text)],
};

pub(crate) static HOUSE_NUMBER: FieldChain<String> = FieldChain {
    rules: &[FieldRule::new("/adres/huisnummer", text)],
};

pub(crate) static HOUSE_NUMBER_SUFFIX: FieldChain<String> = FieldChain {
    rules: &[FieldRule::new("/adres/huisnummertoevoeging", text)],
};

pub(crate) static CITY: FieldChain<String> = FieldChain {
    rules: &[FieldRule::new("/adres/plaats", text)],
};

pub(crate) static POSTAL_CODE: FieldChain<String> = FieldChain {
    rules: &[FieldRule::new("/adres/postcode", text)],
};

pub(crate) static ASKING_PRICE: FieldChain<f64> = FieldChain {
    rules: &[
        FieldRule::new("/financieel/overdracht/koopprijs", amount),
        FieldRule::new("/financieel/overdracht/transactieprijs", amount),
        FieldRule::new("/financieel/overdracht/prijs", amount),
        FieldRule::new("/koopprijs", amount),
        FieldRule::new("/vraagprijs", amount),
    ],
};

pub(crate) static ROOM_COUNT: FieldChain<u32> = FieldChain {
    rules: &[
        FieldRule::new("/algemeen/aantalKamers", count),
        FieldRule::new("/algemeen/aantalkamers", count),
        FieldRule::new("/detail/aantalKamers", count),
    ],
};

pub(crate) static LIVING_AREA: FieldChain<f64> = FieldChain {
    rules: &[
        FieldRule::new("/algemeen/woonoppervlakte", amount),
        FieldRule::new("/algemeen/gebruiksoppervlakteWoonfunctie", amount),
        FieldRule::new("/detail/woonoppervlakte", amount),
    ],
};

pub(crate) static ENERGY_LABEL: FieldChain<EnergyLabel> = FieldChain {
    rules: &[
        FieldRule::new("/algemeen/energieklasse", energy_label),
        FieldRule::new("/algemeen/energielabel", energy_label),
        FieldRule::new("/detail/energielabel/energieklasse", energy_label),
    ],
};

static BALCONY_AREA: FieldChain<f64> = FieldChain {
    rules: &[
        FieldRule::new(
            "/detail/buitenruimte/oppervlakteGebouwgebondenBuitenruimte",
            amount,
        ),
        FieldRule::new("/detail/buitenruimte/gebouwgebondenBuitenruimte", amount),
        FieldRule::new("/algemeen/gebouwgebondenBuitenruimte", amount),
    ],
};

static PROPERTY_TYPE_CODE: FieldChain<String> = FieldChain {
    rules: &[
        FieldRule::new("/object/type/objecttype", text),
        FieldRule::new("/objecttype", text),
    ],
};

const GARDEN_TYPES: &str = "/detail/buitenruimte/tuintypes";
const MEDIA: &str = "/media";
const DOCUMENT_POOLS: [&str; 3] = ["/links", "/documenten", "/media"];

const CATEGORY_KEYS: [&str; 3] = ["soort", "categorie", "type"];
const LINK_KEYS: [&str; 3] = ["link", "url", "href"];
const CAPTION_KEYS: [&str; 4] = ["titel", "omschrijving", "title", "description"];

fn energy_label(value: &Value) -> Option<EnergyLabel> {
    value.as_str().and_then(|raw| raw.parse().ok())
}

/// Base number and suffix joined by a single space; either side may be missing.
pub(crate) fn house_number(root: &Value) -> String {
    let base = HOUSE_NUMBER.resolve(root).unwrap_or_default();
    match HOUSE_NUMBER_SUFFIX.resolve(root) {
        Some(suffix) => format!("{base} {suffix}").trim().to_string(),
        None => base,
    }
}

pub(crate) fn outdoor_space(root: &Value) -> OutdoorSpace {
    let has_garden = root
        .pointer(GARDEN_TYPES)
        .and_then(Value::as_array)
        .is_some_and(|types| !types.is_empty());
    if has_garden {
        return OutdoorSpace::Garden;
    }

    if BALCONY_AREA.resolve(root).is_some_and(|area| area > 0.0) {
        return OutdoorSpace::Balcony;
    }

    OutdoorSpace::None
}

pub(crate) fn property_type(root: &Value) -> String {
    match PROPERTY_TYPE_CODE.resolve(root) {
        Some(code) => property_type_map()
            .get(code.to_ascii_uppercase().as_str())
            .map(|label| label.to_string())
            .unwrap_or(code),
        None => GENERIC_PROPERTY_TYPE.to_string(),
    }
}

fn property_type_map() -> &'static HashMap<&'static str, &'static str> {
    static PROPERTY_TYPES: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    PROPERTY_TYPES.get_or_init(|| {
        const CODE_TO_LABEL: &[(&str, &str)] = &[
            ("APPARTEMENT", "Appartement"),
            ("WOONHUIS", "Woonhuis"),
            ("BOUWGROND", "Bouwgrond"),
            ("PARKEERGELEGENHEID", "Parkeergelegenheid"),
        ];
        CODE_TO_LABEL.iter().copied().collect()
    })
}

pub(crate) fn primary_image(root: &Value) -> Option<String> {
    root.pointer(MEDIA)
        .and_then(Value::as_array)?
        .iter()
        .filter(|entry| category_is(entry, &["HOOFDFOTO"]))
        .find_map(link)
}

pub(crate) fn brochure(root: &Value) -> Option<String> {
    DOCUMENT_POOLS
        .iter()
        .filter_map(|pointer| root.pointer(pointer).and_then(Value::as_array))
        .flatten()
        .filter(|entry| category_is(entry, &["DOCUMENT", "BROCHURE"]))
        .filter(|entry| mentions_brochure(entry))
        .find_map(link)
}

fn category_is(entry: &Value, categories: &[&str]) -> bool {
    CATEGORY_KEYS
        .iter()
        .filter_map(|key| entry.get(key).and_then(Value::as_str))
        .any(|category| {
            categories
                .iter()
                .any(|expected| category.trim().eq_ignore_ascii_case(expected))
        })
}

fn mentions_brochure(entry: &Value) -> bool {
    CAPTION_KEYS
        .iter()
        .filter_map(|key| entry.get(key).and_then(Value::as_str))
        .any(|caption| caption.to_lowercase().contains("brochure"))
}

fn link(entry: &Value) -> Option<String> {
    LINK_KEYS
        .iter()
        .find_map(|key| entry.get(key).and_then(text))
}
