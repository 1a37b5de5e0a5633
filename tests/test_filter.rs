//! Filter predicate tests against the sample catalog.

mod common;

use pocketdex::models::Card;
use pocketdex::{Catalog, Filter, RarityFilter, Status};

fn card<'a>(catalog: &'a Catalog, set: &str, number: u32) -> &'a Card {
    catalog.card(set, number).unwrap()
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[test]
fn duplicates_owned_and_missing() {
    let catalog = common::sample_catalog();
    let pikachu = card(&catalog, "A1", 2);

    let duplicates = Filter::new().with_status(Status::Duplicates);
    let missing = Filter::new().with_status(Status::Missing);
    let owned = Filter::new().with_status(Status::Owned);

    assert!(duplicates.applies_to(pikachu, 2));
    assert!(!missing.applies_to(pikachu, 2));
    assert!(owned.applies_to(pikachu, 2));

    assert!(missing.applies_to(pikachu, 0));
    assert!(!owned.applies_to(pikachu, 0));
    assert!(!duplicates.applies_to(pikachu, 0));

    assert!(owned.applies_to(pikachu, 1));
    assert!(!duplicates.applies_to(pikachu, 1));
}

#[test]
fn unknown_status_is_any() {
    assert_eq!(Status::parse(""), Status::Any);
    assert_eq!(Status::parse("everything"), Status::Any);
    assert_eq!(Status::parse("Owned"), Status::Owned);
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

#[test]
fn text_query_is_case_insensitive_substring() {
    let catalog = common::sample_catalog();
    let filter = Filter::new().with_query("MEWTWO");
    assert!(filter.applies_to(card(&catalog, "A1", 4), 0));
    assert!(filter.applies_to(card(&catalog, "A1", 6), 0));
    assert!(!filter.applies_to(card(&catalog, "A1", 8), 0));
}

#[test]
fn blank_query_is_unconstrained() {
    let filter = Filter::new().with_query("   ");
    assert!(filter.is_unconstrained());
}

// ---------------------------------------------------------------------------
// Rarity
// ---------------------------------------------------------------------------

#[test]
fn rarity_exact_and_buckets() {
    let catalog = common::sample_catalog();
    let bulbasaur = card(&catalog, "A1", 1); // d1
    let charizard = card(&catalog, "A1", 3); // d3
    let pikachu_ex = card(&catalog, "A1", 7); // s1
    let mew = card(&catalog, "A1", 8); // c1

    let with = |selector: &str| Filter::new().with_rarity(RarityFilter::parse(selector));

    assert!(with("d1").applies_to(bulbasaur, 0));
    assert!(!with("d1").applies_to(charizard, 0));

    assert!(with("regular").applies_to(charizard, 0));
    assert!(!with("regular").applies_to(pikachu_ex, 0));

    assert!(with("secret").applies_to(pikachu_ex, 0));
    assert!(with("secret").applies_to(mew, 0));
    assert!(!with("secret").applies_to(bulbasaur, 0));

    assert!(with("three-four-diamond").applies_to(charizard, 0));
    assert!(!with("three-four-diamond").applies_to(bulbasaur, 0));
    assert!(with("one-two-diamond").applies_to(bulbasaur, 0));
    assert!(with("star").applies_to(pikachu_ex, 0));
    assert!(!with("star").applies_to(mew, 0));
    assert!(with("crown").applies_to(mew, 0));
}

#[test]
fn unknown_rarity_matches_nothing() {
    let catalog = common::sample_catalog();
    let filter = Filter::new().with_rarity(RarityFilter::parse("legendary"));
    assert_eq!(filter.rarity(), Some(RarityFilter::Unknown));
    assert!(!filter.applies_to(card(&catalog, "A1", 1), 0));
}

// ---------------------------------------------------------------------------
// Set and booster
// ---------------------------------------------------------------------------

#[test]
fn set_selector() {
    let catalog = common::sample_catalog();
    let filter = Filter::new().with_set("a1a");
    assert!(filter.applies_to(card(&catalog, "A1a", 1), 0));
    assert!(!filter.applies_to(card(&catalog, "A1", 1), 0));
}

#[test]
fn booster_selector() {
    let catalog = common::sample_catalog();
    let pikachu = Filter::new().with_booster("Pikachu");

    assert!(pikachu.applies_to(card(&catalog, "A1", 2), 0));
    assert!(!pikachu.applies_to(card(&catalog, "A1", 4), 0));
    // Poke Ball carries no booster restriction
    assert!(pikachu.applies_to(card(&catalog, "A1", 5), 0));

    let mew = card(&catalog, "A1", 8);
    assert!(Filter::new().with_booster("Mewtwo").applies_to(mew, 0));
    assert!(Filter::new().with_booster("Charizard").applies_to(mew, 0));
    assert!(!pikachu.applies_to(mew, 0));
}

#[test]
fn total_booster_matches_every_card() {
    let catalog = common::sample_catalog();
    let filter = Filter::new().with_booster("Total");
    for set in catalog.sets() {
        for c in &set.cards {
            assert!(filter.applies_to(c, 0));
        }
    }
}

// ---------------------------------------------------------------------------
// Conjunction and parsing
// ---------------------------------------------------------------------------

#[test]
fn criteria_are_conjoined() {
    let catalog = common::sample_catalog();
    let filter = Filter::from_query("q=mew&status=owned&rarity=secret&set=A1&booster=Mewtwo");

    assert!(filter.applies_to(card(&catalog, "A1", 8), 1));
    assert!(!filter.applies_to(card(&catalog, "A1", 8), 0));
    assert!(!filter.applies_to(card(&catalog, "A1", 6), 1));
}

#[test]
fn from_query_reads_named_parameters() {
    let filter = Filter::from_query("https://example.org/?q=Pika%20&status=missing&rarity=d2&set=A1&booster=Pikachu&page=3");
    assert_eq!(filter.query(), Some("pika"));
    assert_eq!(filter.status(), Status::Missing);
    assert_eq!(filter.rarity(), Some(RarityFilter::Exact(pocketdex::models::Rarity::D2)));
    assert_eq!(filter.set(), Some("A1"));
    assert_eq!(filter.booster(), Some("Pikachu"));
}

#[test]
fn empty_parameters_are_unconstrained() {
    let filter = Filter::from_query("q=&status=&rarity=&set=&booster=");
    assert!(filter.is_unconstrained());

    let catalog = common::sample_catalog();
    for set in catalog.sets() {
        for c in &set.cards {
            assert!(filter.applies_to(c, 0));
            assert!(filter.applies_to(c, 9));
        }
    }
}
