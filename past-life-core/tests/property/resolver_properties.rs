use past_life_core::{Catalog, YEAR_MAX, YEAR_MIN, YearLabels, fallback_story, name_hash};
use proptest::prelude::*;

fn catalog() -> Catalog {
    Catalog::embedded().expect("embedded catalog")
}

proptest! {
    #[test]
    fn resolution_is_deterministic(s in "\\PC*") {
        let catalog = catalog();
        prop_assert_eq!(catalog.resolve(&s), catalog.resolve(&s));
    }

    #[test]
    fn year_in_range_and_title_in_catalog(s in ".{0,64}") {
        let catalog = catalog();
        let life = catalog.resolve(&s);
        prop_assert!((YEAR_MIN..=YEAR_MAX).contains(&life.year), "year {} out of range", life.year);
        prop_assert!(catalog.contains(&life.title));
    }

    #[test]
    fn tiny_catalogs_stay_in_bounds(s in ".{0,32}", n in 1usize..8) {
        let titles: Vec<String> = (0..n).map(|i| format!("title-{i}")).collect();
        let catalog = Catalog::new(titles.clone()).unwrap();
        let life = catalog.resolve(&s);
        prop_assert!(titles.contains(&life.title));
    }

    #[test]
    fn hash_extends_incrementally(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        // Appending a unit is exactly one more step of the recurrence.
        let joined = format!("{a}{b}");
        let expected = b.encode_utf16().fold(name_hash(&a), |acc, u| {
            acc.wrapping_mul(31).wrapping_add(i32::from(u))
        });
        prop_assert_eq!(name_hash(&joined), expected);
    }

    #[test]
    fn fallback_always_names_the_facts(s in "[가-힣A-Za-z]{1,12}") {
        let catalog = catalog();
        let life = catalog.resolve(&s);
        let label = YearLabels::korean().format(life.year);
        let story = fallback_story(&s, &life.title, &label);
        prop_assert!(story.contains(&s));
        prop_assert!(story.contains(&life.title));
        prop_assert!(story.contains(&label));
    }
}

#[test]
fn collision_pair_resolves_identically() {
    let catalog = catalog();
    assert_eq!(name_hash("Aa"), name_hash("BB"));
    assert_eq!(catalog.resolve("Aa"), catalog.resolve("BB"));
}

#[test]
fn alice_is_stable_across_catalog_reloads() {
    let first = catalog().resolve("Alice");
    let second = catalog().resolve("Alice");
    assert_eq!(first, second);
    assert_eq!(first.year, -7_632);
}
