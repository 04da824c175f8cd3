use super::common::*;
use crate::workflows::matching::{HardFilter, ProfileDefect, ProfileEvaluation};

#[test]
fn end_to_end_listing_within_budget_qualifies_at_full_score() {
    let listing = schiedam_listing();
    let profiles = vec![buyer_profile("fenna")];

    let matches = engine().match_listing(&listing, &profiles);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].profile.id.0, "fenna");
    assert_eq!(matches[0].score, 100);
}

#[test]
fn listing_above_price_max_is_excluded_despite_perfect_soft_score() {
    let mut listing = schiedam_listing();
    listing.asking_price = 600000.0;
    let profile = buyer_profile("fenna");

    assert_eq!(
        engine().evaluate(&listing, &profile),
        ProfileEvaluation::Excluded(HardFilter::PriceAboveMaximum)
    );
    assert!(engine().match_listing(&listing, &[profile]).is_empty());
}

#[test]
fn listing_below_price_min_is_excluded() {
    let mut listing = schiedam_listing();
    listing.asking_price = 199000.0;

    assert_eq!(
        engine().evaluate(&listing, &buyer_profile("fenna")),
        ProfileEvaluation::Excluded(HardFilter::PriceBelowMinimum)
    );
}

#[test]
fn city_and_type_comparison_ignore_case_and_whitespace() {
    let mut listing = schiedam_listing();
    listing.city = Some("  rotterdam ".to_string());
    listing.property_type = "APPARTEMENT".to_string();

    let profiles = [buyer_profile("fenna")];
    let matches = engine().match_listing(&listing, &profiles);
    assert_eq!(matches.len(), 1);
}

#[test]
fn unknown_city_and_type_are_excluded() {
    let mut listing = schiedam_listing();
    listing.city = Some("Delft".to_string());
    assert_eq!(
        engine().evaluate(&listing, &buyer_profile("fenna")),
        ProfileEvaluation::Excluded(HardFilter::City)
    );

    let mut listing = schiedam_listing();
    listing.property_type = "Woonhuis".to_string();
    assert_eq!(
        engine().evaluate(&listing, &buyer_profile("fenna")),
        ProfileEvaluation::Excluded(HardFilter::PropertyType)
    );

    let mut listing = schiedam_listing();
    listing.city = None;
    assert_eq!(
        engine().evaluate(&listing, &buyer_profile("fenna")),
        ProfileEvaluation::Excluded(HardFilter::City)
    );
}

#[test]
fn absent_criteria_do_not_constrain() {
    let mut listing = schiedam_listing();
    listing.city = None;
    listing.asking_price = 9_000_000.0;
    listing.property_type = "Bouwgrond".to_string();

    let profiles = [unconstrained_profile("open")];
    let matches = engine().match_listing(&listing, &profiles);
    assert_eq!(matches.len(), 1);
}

#[test]
fn zero_price_bounds_are_treated_as_unset() {
    let mut profile = unconstrained_profile("zero-bounds");
    profile.hard.price_min = Some(0.0);
    profile.hard.price_max = Some(0.0);

    let profiles = [profile];
    let matches = engine().match_listing(&schiedam_listing(), &profiles);
    assert_eq!(matches.len(), 1);
}

#[test]
fn opted_out_profiles_are_skipped() {
    let mut profile = buyer_profile("quiet");
    profile.notification_opt_in = false;

    assert_eq!(
        engine().evaluate(&schiedam_listing(), &profile),
        ProfileEvaluation::OptedOut
    );
}

#[test]
fn malformed_profile_does_not_block_the_rest() {
    let mut inverted = buyer_profile("inverted");
    inverted.hard.price_min = Some(600000.0);
    inverted.hard.price_max = Some(400000.0);
    let profiles = vec![inverted, buyer_profile("fenna"), unconstrained_profile("open")];

    let matches = engine().match_listing(&schiedam_listing(), &profiles);

    let ids: Vec<&str> = matches
        .iter()
        .map(|matched| matched.profile.id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["fenna", "open"]);
    assert!(matches!(
        engine().evaluate(&schiedam_listing(), &profiles[0]),
        ProfileEvaluation::Malformed(_)
    ));
}

#[test]
fn profile_without_contact_handle_is_malformed() {
    let mut silent = buyer_profile("silent");
    silent.contact_handle = "   ".to_string();

    assert_eq!(
        engine().evaluate(&schiedam_listing(), &silent),
        ProfileEvaluation::Malformed(ProfileDefect::MissingContact)
    );
    assert!(engine()
        .match_listing(&schiedam_listing(), std::slice::from_ref(&silent))
        .is_empty());
}

#[test]
fn match_order_follows_profile_order() {
    let profiles = vec![
        unconstrained_profile("c"),
        buyer_profile("a"),
        unconstrained_profile("b"),
    ];

    let matches = engine().match_listing(&schiedam_listing(), &profiles);

    let ids: Vec<&str> = matches
        .iter()
        .map(|matched| matched.profile.id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}
