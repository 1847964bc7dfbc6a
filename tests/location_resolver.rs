use urban_mood::emotions::locations::{resolve, Coordinates, KNOWN_LOCATIONS};

fn coords(alias: &str) -> Coordinates {
    *KNOWN_LOCATIONS.get(alias).expect("alias in table")
}

#[test]
fn table_holds_all_aliases_in_order() {
    assert_eq!(KNOWN_LOCATIONS.len(), 34);
    assert_eq!(KNOWN_LOCATIONS.get_index(0).map(|(k, _)| *k), Some("central park"));
    assert_eq!(
        KNOWN_LOCATIONS.get_index(33).map(|(k, _)| *k),
        Some("washington heights")
    );
}

#[test]
fn resolution_ignores_case_and_padding() {
    let upper = resolve("Central Park");
    let lower = resolve("central park");
    assert_eq!(upper, lower);
    assert_eq!(resolve("  CENTRAL PARK "), lower);
    assert_eq!(lower, Some(Coordinates { lat: 40.7829, lng: -73.9654 }));
}

#[test]
fn alias_inside_longer_text_resolves() {
    assert_eq!(
        resolve("I was near Union Square today"),
        Some(coords("union square"))
    );
}

#[test]
fn short_aliases_resolve_exactly() {
    assert_eq!(resolve("UWS"), Some(coords("upper west side")));
    assert_eq!(resolve("FiDi"), Some(coords("financial district")));
    assert_eq!(resolve("LES"), Some(coords("lower east side")));
}

#[test]
fn unknown_or_blank_names_are_unresolved() {
    assert_eq!(resolve("Astoria"), None);
    assert_eq!(resolve(""), None);
    assert_eq!(resolve("   "), None);
}

// Pinned fuzzy-match hazards: first alias in table order wins, not the best one.

#[test]
fn short_alias_matches_inside_unrelated_words() {
    assert_eq!(resolve("Charles Street"), Some(coords("les")));
    assert_eq!(resolve("the Cloisters"), None);
}

#[test]
fn fragment_of_an_alias_takes_first_alias_containing_it() {
    assert_eq!(resolve("park"), Some(coords("central park")));
    assert_eq!(resolve("village"), Some(coords("east village")));
}

#[test]
fn compound_name_takes_first_listed_alias() {
    assert_eq!(resolve("midtown east"), Some(coords("midtown")));
    // "downtown brooklyn" lands on lower Manhattan's downtown entry.
    assert_eq!(resolve("Downtown Brooklyn"), Some(coords("downtown")));
    // "central park" precedes "times square" in the table.
    assert_eq!(
        resolve("walked from times square to central park"),
        Some(coords("central park"))
    );
}
